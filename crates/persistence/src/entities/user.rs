//! User entity (database row mapping).

use sqlx::FromRow;

/// A `users` row joined with its `user_passwords` credential.
#[derive(Debug, Clone, FromRow)]
pub struct UserEntity {
    pub id: i32,
    pub name: String,
    pub gender: i16,
    pub age: i32,
    pub telphone: String,
    pub register_mode: String,
    pub third_party_id: String,
    pub encrypt_password: Option<String>,
}

impl From<UserEntity> for domain::models::User {
    fn from(entity: UserEntity) -> Self {
        Self {
            id: entity.id,
            name: entity.name,
            gender: entity.gender,
            age: entity.age,
            telphone: entity.telphone,
            register_mode: entity.register_mode,
            third_party_id: entity.third_party_id,
            encrypt_password: entity.encrypt_password,
        }
    }
}
