use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};

/// Stored user. `password` holds the bcrypt hash and never leaves the service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserDocument {
    #[serde(rename = "_id")]
    pub id: ObjectId,
    pub username: String,
    pub password: String,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub created_at: i64,
    #[serde(default, deserialize_with = "super::null_as_default")]
    pub updated_at: i64,
}

impl UserDocument {
    pub fn new(username: String, password_hash: String, now: i64) -> Self {
        Self {
            id: ObjectId::new(),
            username,
            password: password_hash,
            created_at: now,
            updated_at: now,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateUserRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

/// Public projection of a user, without the password hash.
#[derive(Debug, Clone, Serialize)]
pub struct UserResponse {
    pub id: String,
    pub username: String,
    pub created_at: i64,
    pub updated_at: i64,
}

impl From<&UserDocument> for UserResponse {
    fn from(user: &UserDocument) -> Self {
        Self {
            id: user.id.to_hex(),
            username: user.username.clone(),
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub user_id: String,
    pub username: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token: Option<String>,
    pub message: String,
}

/// `{id, username}` projection injected into galleries and news.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AuthorSummary {
    pub id: String,
    pub username: String,
}

impl From<&UserDocument> for AuthorSummary {
    fn from(user: &UserDocument) -> Self {
        Self {
            id: user.id.to_hex(),
            username: user.username.clone(),
        }
    }
}
