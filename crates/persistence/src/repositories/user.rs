//! User repository for database operations.

use domain::models::NewUser;
use sqlx::PgPool;

use crate::entities::UserEntity;
use crate::metrics::QueryTimer;

/// Repository for user accounts and their password credentials.
#[derive(Clone)]
pub struct UserRepository {
    pool: PgPool,
}

impl UserRepository {
    /// Creates a new UserRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Find a user by ID, including the stored password hash.
    pub async fn find_by_id(&self, id: i32) -> Result<Option<UserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_user_by_id");
        let result = sqlx::query_as::<_, UserEntity>(
            r#"
            SELECT u.id, u.name, u.gender, u.age, u.telphone, u.register_mode,
                   u.third_party_id, p.encrypt_password
            FROM users u
            LEFT JOIN user_passwords p ON p.user_id = u.id
            WHERE u.id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Find a user by phone number, including the stored password hash.
    pub async fn find_by_telphone(&self, telphone: &str) -> Result<Option<UserEntity>, sqlx::Error> {
        let timer = QueryTimer::new("find_user_by_telphone");
        let result = sqlx::query_as::<_, UserEntity>(
            r#"
            SELECT u.id, u.name, u.gender, u.age, u.telphone, u.register_mode,
                   u.third_party_id, p.encrypt_password
            FROM users u
            LEFT JOIN user_passwords p ON p.user_id = u.id
            WHERE u.telphone = $1
            "#,
        )
        .bind(telphone)
        .fetch_optional(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Check whether a phone number is already registered.
    pub async fn exists_by_telphone(&self, telphone: &str) -> Result<bool, sqlx::Error> {
        let timer = QueryTimer::new("exists_user_by_telphone");
        let result = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM users WHERE telphone = $1)",
        )
        .bind(telphone)
        .fetch_one(&self.pool)
        .await;
        timer.record();
        result
    }

    /// Create a user and its credential row in one transaction.
    ///
    /// A duplicate phone number surfaces as a unique violation (SQLSTATE 23505)
    /// and nothing is written.
    pub async fn create_user(&self, user: &NewUser) -> Result<UserEntity, sqlx::Error> {
        let timer = QueryTimer::new("create_user");
        let mut tx = self.pool.begin().await?;

        let user_id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO users (name, gender, age, telphone, register_mode, third_party_id)
            VALUES ($1, $2, $3, $4, $5, '')
            RETURNING id
            "#,
        )
        .bind(&user.name)
        .bind(user.gender)
        .bind(user.age)
        .bind(&user.telphone)
        .bind(&user.register_mode)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query("INSERT INTO user_passwords (encrypt_password, user_id) VALUES ($1, $2)")
            .bind(&user.encrypt_password)
            .bind(user_id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;
        timer.record();

        Ok(UserEntity {
            id: user_id,
            name: user.name.clone(),
            gender: user.gender,
            age: user.age,
            telphone: user.telphone.clone(),
            register_mode: user.register_mode.clone(),
            third_party_id: String::new(),
            encrypt_password: Some(user.encrypt_password.clone()),
        })
    }
}
