//! Domain models.
//!
//! These types represent validated domain objects separate from database
//! row types; repositories construct them from raw rows.

pub mod item;
pub mod session;
pub mod store;
pub mod user;

pub use item::{Item, ItemInput};
pub use session::{CurrentUser, session_keys};
pub use store::Store;
pub use user::User;
