mod accounts;
mod feedback;

pub use accounts::{DEFAULT_ADMIN_PASSWORD, DEFAULT_ADMIN_USERNAME};
pub use feedback::FeedbackStats;
