pub mod connection;
pub mod guesses;
pub mod hints;
pub mod models;
pub mod players;
pub mod schedules;
pub mod sessions;
pub mod setup;
pub mod users;

pub use connection::{create_memory_pool, create_pool, get_connection, DbConn, DbPool};
pub use models::*;
