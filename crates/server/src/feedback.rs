//! Feedback endpoints: submit, list, stats.

use api_types::feedback::{
    FeedbackCreated, FeedbackListResponse, FeedbackNew, FeedbackStats, FeedbackView,
    StatsResponse,
};
use axum::{Json, extract::State};

use crate::{ServerError, server::ServerState};

pub async fn submit(
    State(state): State<ServerState>,
    Json(payload): Json<FeedbackNew>,
) -> Result<Json<FeedbackCreated>, ServerError> {
    let row = state
        .engine
        .add_feedback(payload.rating, payload.comments)
        .await?;

    Ok(Json(FeedbackCreated {
        success: true,
        message: "Thank you for your feedback!".to_string(),
        feedback_id: row.id,
    }))
}

pub async fn list(
    State(state): State<ServerState>,
) -> Result<Json<FeedbackListResponse>, ServerError> {
    let feedback = state
        .engine
        .list_feedback()
        .await?
        .into_iter()
        .map(|row| FeedbackView {
            id: row.id,
            rating: row.rating,
            comments: row.comments,
            created_at: row.created_at,
        })
        .collect();

    Ok(Json(FeedbackListResponse {
        success: true,
        feedback,
    }))
}

pub async fn stats(State(state): State<ServerState>) -> Result<Json<StatsResponse>, ServerError> {
    let stats = state.engine.feedback_stats().await?;

    Ok(Json(StatsResponse {
        success: true,
        stats: FeedbackStats {
            total_feedback: stats.total_feedback,
            average_rating: stats.average_rating,
            highest_rating: stats.highest_rating,
            lowest_rating: stats.lowest_rating,
        },
    }))
}
