//! User database tool family.
//!
//! An in-memory user store shared by the `query_users` and `add_user` tools
//! (and exposed read-only through the `db://users` resource).

mod add;
mod query;
pub mod store;

pub use add::{AddUserParams, AddUserTool};
pub use query::{QueryUsersParams, QueryUsersTool};
pub use store::{StoreError, UserRecord, UserStore};
