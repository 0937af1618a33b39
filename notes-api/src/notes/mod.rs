mod handlers;
mod model;
mod routes;

pub use handlers::{create_note, delete_note, find_notes, get_note, update_note};
pub use model::*;
pub use routes::router;
