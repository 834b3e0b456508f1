use serde::{Deserialize, Serialize};
use time::OffsetDateTime;
use uuid::Uuid;

use crate::domain::{NewUser, Session, User};

/// Request body for user registration.
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub nickname: String,
    pub weight: f64,
    pub height: f64,
    pub birth_date: String, // YYYY-MM-DD
    pub gender: String,
    pub activity_level: String,
}

impl RegisterRequest {
    pub fn as_new_user(&self) -> NewUser<'_> {
        NewUser {
            email: &self.email,
            password: &self.password,
            nickname: &self.nickname,
            weight_kg: self.weight,
            height_cm: self.height,
            birth_date: &self.birth_date,
            gender: &self.gender,
            activity_level: &self.activity_level,
        }
    }
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Public part of the user returned to the client.
#[derive(Debug, Serialize)]
pub struct PublicUser {
    pub id: Uuid,
    pub email: String,
    pub nickname: String,
}

impl From<&User> for PublicUser {
    fn from(user: &User) -> Self {
        Self {
            id: user.id().as_uuid(),
            email: user.email().as_str().to_owned(),
            nickname: user.nickname().as_str().to_owned(),
        }
    }
}

/// Response returned after login or register.
#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub session_id: String,
    #[serde(with = "time::serde::rfc3339")]
    pub expires_at: OffsetDateTime,
    pub user: PublicUser,
}

impl AuthResponse {
    pub fn new(user: &User, session: &Session) -> Self {
        Self {
            session_id: session.id().as_str().to_owned(),
            expires_at: session.expires_at(),
            user: user.into(),
        }
    }
}
