pub mod auth;
mod handlers;
mod model;
mod routes;

use uuid::Uuid;

pub use handlers::{find_users, register};
pub use model::*;
pub use routes::router;

pub type UserId = Uuid;
