use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub mod auth {
    use super::*;

    /// Request body for registration.
    ///
    /// Fields are optional at the wire level so a missing field yields the
    /// same 400 envelope as an empty one instead of a deserialization
    /// error.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct RegisterRequest {
        pub username: Option<String>,
        pub email: Option<String>,
        pub password: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct LoginRequest {
        pub username: Option<String>,
        pub password: Option<String>,
    }

    /// Public view of an account. Never carries the password hash.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct UserView {
        pub id: i32,
        pub username: String,
        pub email: String,
        #[serde(rename = "isAdmin")]
        pub is_admin: bool,
    }

    /// Identity carried by a verified token (no email, no database read).
    #[derive(Debug, Serialize, Deserialize)]
    pub struct TokenUser {
        pub id: i32,
        pub username: String,
        #[serde(rename = "isAdmin")]
        pub is_admin: bool,
    }

    /// Response body for both register and login.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct AuthResponse {
        pub success: bool,
        pub message: String,
        pub token: String,
        pub user: UserView,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct VerifyResponse {
        pub success: bool,
        pub user: TokenUser,
    }
}

pub mod feedback {
    use super::*;

    /// Request body for submitting feedback.
    ///
    /// `rating` is optional at the wire level so a missing field yields the
    /// same 400 as an out-of-range one instead of a deserialization error.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct FeedbackNew {
        pub rating: Option<i32>,
        pub comments: Option<String>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct FeedbackCreated {
        pub success: bool,
        pub message: String,
        #[serde(rename = "feedbackId")]
        pub feedback_id: i32,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct FeedbackView {
        pub id: i32,
        pub rating: i32,
        pub comments: Option<String>,
        pub created_at: DateTime<Utc>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct FeedbackListResponse {
        pub success: bool,
        pub feedback: Vec<FeedbackView>,
    }

    /// Aggregates over all feedback rows.
    ///
    /// The aggregate fields are null when the table is empty.
    #[derive(Debug, Serialize, Deserialize)]
    pub struct FeedbackStats {
        pub total_feedback: i64,
        pub average_rating: Option<f64>,
        pub highest_rating: Option<i32>,
        pub lowest_rating: Option<i32>,
    }

    #[derive(Debug, Serialize, Deserialize)]
    pub struct StatsResponse {
        pub success: bool,
        pub stats: FeedbackStats,
    }
}

pub mod health {
    use super::*;

    #[derive(Debug, Serialize, Deserialize)]
    pub struct Health {
        pub status: String,
        pub message: String,
        pub database: String,
    }
}
