/// Common test utilities for integration tests
///
/// This module provides shared infrastructure for integration tests:
/// - Test database setup and migrations
/// - Test user creation with a known password
/// - JWT token generation
/// - API client helpers

use sqlx::PgPool;
use taskhive_api::app::{build_router, AppState};
use taskhive_api::config::Config;
use taskhive_shared::auth::jwt::{create_token, Claims};
use taskhive_shared::auth::password::hash_password;
use taskhive_shared::models::user::{CreateUser, User};
use uuid::Uuid;

/// Password used for every seeded test user
pub const TEST_PASSWORD: &str = "correct horse battery staple";

/// Test context containing all necessary resources
pub struct TestContext {
    pub db: PgPool,
    pub app: axum::Router,
    pub config: Config,
    pub user: User,
    pub jwt_token: String,
}

impl TestContext {
    /// Creates a new test context with a fresh seeded user
    pub async fn new() -> anyhow::Result<Self> {
        // Load test configuration
        let config = Config::from_env()?;

        // Connect to database
        let db = PgPool::connect(&config.database.url).await?;

        // Run migrations (path relative to Cargo.toml, not this file)
        sqlx::migrate!("../taskhive-shared/migrations").run(&db).await?;

        // Create test user with a real password hash so login works
        let user = User::create(
            &db,
            CreateUser {
                name: "Test User".to_string(),
                email: format!("test-{}@example.com", Uuid::new_v4()),
                password_hash: hash_password(TEST_PASSWORD)?,
            },
        )
        .await?;

        // Generate JWT token
        let claims = Claims::new(user.id);
        let jwt_token = create_token(&claims, &config.jwt.secret)?;

        // Build app
        let state = AppState::new(db.clone(), config.clone());
        let app = build_router(state);

        Ok(TestContext {
            db,
            app,
            config,
            user,
            jwt_token,
        })
    }

    /// Returns authorization header value
    pub fn auth_header(&self) -> String {
        format!("Bearer {}", self.jwt_token)
    }

    /// Cleans up test data
    pub async fn cleanup(&self) -> anyhow::Result<()> {
        User::delete(&self.db, self.user.id).await?;
        Ok(())
    }
}

/// Creates an additional user and a valid token for multi-user scenarios
pub async fn create_second_user(ctx: &TestContext) -> anyhow::Result<(User, String)> {
    let user = User::create(
        &ctx.db,
        CreateUser {
            name: "Second User".to_string(),
            email: format!("second-{}@example.com", Uuid::new_v4()),
            password_hash: hash_password(TEST_PASSWORD)?,
        },
    )
    .await?;

    let token = create_token(&Claims::new(user.id), &ctx.config.jwt.secret)?;

    Ok((user, token))
}

/// Mints a token whose expiry already lies in the past
pub fn expired_token(ctx: &TestContext, user_id: Uuid) -> anyhow::Result<String> {
    let claims = Claims::with_expiration(user_id, chrono::Duration::hours(-2));
    Ok(create_token(&claims, &ctx.config.jwt.secret)?)
}

/// Reads a response body as JSON
pub async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&body).unwrap()
}
