//! User account models.

use serde::{Deserialize, Serialize};

/// Registration channel recorded for phone sign-ups.
pub const REGISTER_MODE_PHONE: &str = "byphone";

/// Represents a registered user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i32,
    pub name: String,
    pub gender: i16,
    pub age: i32,
    pub telphone: String,
    pub register_mode: String,
    pub third_party_id: String,
    #[serde(skip_serializing)] // Never leaves the server
    pub encrypt_password: Option<String>,
}

/// Data needed to create a user row and its credential row.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub gender: i16,
    pub age: i32,
    pub telphone: String,
    pub register_mode: String,
    pub encrypt_password: String,
}

/// Public projection of a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserView {
    pub id: i32,
    pub name: String,
    pub gender: i16,
    pub age: i32,
    pub telphone: String,
}

impl From<User> for UserView {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            gender: user.gender,
            age: user.age,
            telphone: user.telphone,
        }
    }
}
