//! Tool definitions module.
//!
//! This module exports all available tool definitions.
//! Each tool is defined in its own file for better maintainability.

pub mod calculator;
mod common;
pub mod users;
pub mod weather;

pub use calculator::{CalculateParams, CalculateTool};
pub use users::{AddUserParams, AddUserTool, QueryUsersParams, QueryUsersTool, UserStore};
pub use weather::{GetWeatherTool, WeatherClient, WeatherParams};
