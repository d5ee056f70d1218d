//! Feedback operations: submit, list and aggregate.

use chrono::Utc;
use sea_orm::{
    ActiveValue, FromQueryResult, QueryOrder, QuerySelect, prelude::*,
    sea_query::{Expr, Func, SimpleExpr},
};

use crate::{Engine, EngineError, ResultEngine, feedback};

const RATING_MIN: i32 = 1;
const RATING_MAX: i32 = 5;

/// Aggregates over all feedback rows.
///
/// The rating aggregates are `None` when no feedback exists yet.
#[derive(Debug, Default, PartialEq, FromQueryResult)]
pub struct FeedbackStats {
    pub total_feedback: i64,
    pub average_rating: Option<f64>,
    pub highest_rating: Option<i32>,
    pub lowest_rating: Option<i32>,
}

impl Engine {
    /// Persist one feedback row.
    ///
    /// An absent rating and an out-of-range rating are the same failure:
    /// nothing is written and the message names the 1-5 rule.
    pub async fn add_feedback(
        &self,
        rating: Option<i32>,
        comments: Option<String>,
    ) -> ResultEngine<feedback::Model> {
        let rating = rating
            .filter(|r| (RATING_MIN..=RATING_MAX).contains(r))
            .ok_or_else(|| {
                EngineError::Validation(
                    "Invalid rating. Rating must be between 1 and 5.".to_string(),
                )
            })?;

        let row = feedback::ActiveModel {
            rating: ActiveValue::Set(rating),
            comments: ActiveValue::Set(comments),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        };

        Ok(row.insert(&self.database).await?)
    }

    /// All feedback rows, most recent first. Unbounded.
    pub async fn list_feedback(&self) -> ResultEngine<Vec<feedback::Model>> {
        Ok(feedback::Entity::find()
            .order_by_desc(feedback::Column::CreatedAt)
            // Tie-break rows created within the same timestamp.
            .order_by_desc(feedback::Column::Id)
            .all(&self.database)
            .await?)
    }

    /// Count, average, max and min rating over all feedback rows.
    pub async fn feedback_stats(&self) -> ResultEngine<FeedbackStats> {
        let stats = feedback::Entity::find()
            .select_only()
            .column_as(feedback::Column::Id.count(), "total_feedback")
            .column_as(
                SimpleExpr::from(Func::avg(Expr::col(feedback::Column::Rating))),
                "average_rating",
            )
            .column_as(feedback::Column::Rating.max(), "highest_rating")
            .column_as(feedback::Column::Rating.min(), "lowest_rating")
            .into_model::<FeedbackStats>()
            .one(&self.database)
            .await?;

        // An ungrouped aggregate always yields one row.
        Ok(stats.unwrap_or_default())
    }
}
