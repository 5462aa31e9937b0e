//! User model for storage and API.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
#[cfg(feature = "binding-generation")]
use ts_rs::TS;
use validator::Validate;

use crate::models::record_id::new_record_id;
use crate::password::hash_password;
use crate::validation::{FieldErrors, Fields};

/// User stored in the database.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// Record id (also used as document ID)
    pub id: String,
    /// Unique login name
    pub username: String,
    pub email: String,
    /// Salted password hash, see [`crate::password`]
    pub password: String,
}

/// User as returned by the API. The password is write-only.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "binding-generation", derive(TS))]
#[cfg_attr(
    feature = "binding-generation",
    ts(export, export_to = "web/src/lib/generated/")
)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub email: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            username: user.username,
            email: user.email,
        }
    }
}

/// Validated body of `POST /api/users/`.
#[derive(Debug, Clone, Validate)]
pub struct NewUser {
    #[validate(length(
        min = 1,
        max = 150,
        message = "Ensure this field has between 1 and 150 characters."
    ))]
    pub username: String,
    #[validate(
        email(message = "Enter a valid email address."),
        length(max = 254, message = "Ensure this field has no more than 254 characters.")
    )]
    pub email: String,
    #[validate(length(
        min = 1,
        max = 128,
        message = "Ensure this field has between 1 and 128 characters."
    ))]
    pub password: String,
}

impl NewUser {
    pub fn from_fields(body: &Map<String, Value>) -> Result<Self, FieldErrors> {
        let mut fields = Fields::new(body);
        let username = fields.string("username");
        let email = fields.string("email");
        let password = fields.string("password");

        let (Some(username), Some(email), Some(password)) = (username, email, password) else {
            return Err(fields.into_errors());
        };
        fields.finish()?;

        let new_user = Self {
            username: username.trim().to_string(),
            email: email.trim().to_string(),
            // Passwords are hashed exactly as sent, surrounding whitespace included.
            password,
        };
        new_user.validate()?;
        Ok(new_user)
    }

    /// Assign an id and hash the password.
    pub fn into_record(self) -> anyhow::Result<User> {
        Ok(User {
            id: new_record_id()?,
            username: self.username,
            email: self.email,
            password: hash_password(&self.password)?,
        })
    }
}
