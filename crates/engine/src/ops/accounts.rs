//! Account operations: registration, credential verification and the
//! default admin seed.

use bcrypt::{DEFAULT_COST, hash, verify};
use chrono::Utc;
use sea_orm::{ActiveValue, Condition, QueryFilter, prelude::*};

use crate::{Engine, EngineError, ResultEngine, users};

pub const DEFAULT_ADMIN_USERNAME: &str = "admin";
pub const DEFAULT_ADMIN_PASSWORD: &str = "admin123";
pub const DEFAULT_ADMIN_EMAIL: &str = "admin@beanery.local";

const MIN_PASSWORD_LEN: usize = 6;

impl Engine {
    /// Create a regular account.
    ///
    /// Rejects empty fields and short passwords before touching the
    /// database, then checks username and email for collisions. A race
    /// between the check and the insert falls through to the unique
    /// constraint and surfaces as a database error.
    pub async fn register_account(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> ResultEngine<users::Model> {
        if username.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
            return Err(EngineError::Validation(
                "Username, email and password are required".to_string(),
            ));
        }
        if password.chars().count() < MIN_PASSWORD_LEN {
            return Err(EngineError::Validation(
                "Password must be at least 6 characters long".to_string(),
            ));
        }

        let existing = users::Entity::find()
            .filter(
                Condition::any()
                    .add(users::Column::Username.eq(username))
                    .add(users::Column::Email.eq(email)),
            )
            .one(&self.database)
            .await?;
        if existing.is_some() {
            return Err(EngineError::ExistingKey("Username or email".to_string()));
        }

        self.insert_account(username, email, password, false).await
    }

    /// Look up an account by username and check the password against the
    /// stored hash.
    ///
    /// Unknown username and wrong password both map to
    /// [`EngineError::InvalidCredentials`].
    pub async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> ResultEngine<users::Model> {
        let user = users::Entity::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.database)
            .await?;

        let Some(user) = user else {
            return Err(EngineError::InvalidCredentials);
        };

        if !verify(password, &user.password_hash)? {
            return Err(EngineError::InvalidCredentials);
        }

        Ok(user)
    }

    /// Insert the default admin account unless one named `admin` exists.
    ///
    /// Returns `true` when a row was inserted. The check-then-insert pair
    /// is not race-safe; it runs once at startup before traffic arrives.
    pub async fn seed_default_admin(&self) -> ResultEngine<bool> {
        let existing = users::Entity::find()
            .filter(users::Column::Username.eq(DEFAULT_ADMIN_USERNAME))
            .one(&self.database)
            .await?;
        if existing.is_some() {
            return Ok(false);
        }

        self.insert_account(
            DEFAULT_ADMIN_USERNAME,
            DEFAULT_ADMIN_EMAIL,
            DEFAULT_ADMIN_PASSWORD,
            true,
        )
        .await?;

        Ok(true)
    }

    async fn insert_account(
        &self,
        username: &str,
        email: &str,
        password: &str,
        is_admin: bool,
    ) -> ResultEngine<users::Model> {
        let password_hash = hash(password, DEFAULT_COST)?;

        let account = users::ActiveModel {
            username: ActiveValue::Set(username.to_string()),
            email: ActiveValue::Set(email.to_string()),
            password_hash: ActiveValue::Set(password_hash),
            is_admin: ActiveValue::Set(is_admin),
            created_at: ActiveValue::Set(Utc::now()),
            ..Default::default()
        };

        Ok(account.insert(&self.database).await?)
    }
}
