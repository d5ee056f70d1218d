pub use error::EngineError;
pub use ops::FeedbackStats;
pub use ops::{DEFAULT_ADMIN_PASSWORD, DEFAULT_ADMIN_USERNAME};

use sea_orm::DatabaseConnection;

mod error;
pub mod feedback;
mod ops;
pub mod users;

type ResultEngine<T> = Result<T, EngineError>;

/// Domain logic over the pooled database connection.
///
/// One instance is created at startup and shared by every request handler.
#[derive(Clone, Debug)]
pub struct Engine {
    database: DatabaseConnection,
}

impl Engine {
    pub fn new(database: DatabaseConnection) -> Self {
        Self { database }
    }
}
