/// Application state and router builder
///
/// This module defines the shared application state and provides a
/// function to build the axum router with all routes and middleware.
///
/// # Example
///
/// ```no_run
/// use taskhive_api::{app::AppState, config::Config};
/// use sqlx::PgPool;
///
/// # async fn example() -> anyhow::Result<()> {
/// let config = Config::from_env()?;
/// let pool = PgPool::connect(&config.database.url).await?;
/// let state = AppState::new(pool, config);
/// let app = taskhive_api::app::build_router(state);
/// # Ok(())
/// # }
/// ```

use crate::config::Config;
use axum::{
    extract::Request,
    middleware::Next,
    response::Response,
    routing::{delete, get, post, put},
    Router,
};
use sqlx::PgPool;
use std::sync::Arc;
use taskhive_shared::auth::{
    jwt::{self, JwtError},
    middleware::{AuthContext, AuthError},
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

/// Shared application state
///
/// Cloned for each request handler via axum's `State` extractor. The pool
/// is internally reference-counted and `Config` sits behind an Arc, so
/// cloning is cheap.
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool
    pub db: PgPool,

    /// Application configuration
    pub config: Arc<Config>,
}

impl AppState {
    /// Creates new application state
    pub fn new(db: PgPool, config: Config) -> Self {
        Self {
            db,
            config: Arc::new(config),
        }
    }

    /// Gets the token signing secret
    pub fn jwt_secret(&self) -> &str {
        &self.config.jwt.secret
    }
}

/// Builds the complete axum router with all routes and middleware
///
/// # Architecture
///
/// ```text
/// /
/// ├── /health                          # Health check (public)
/// ├── /signup                          # Account creation (public)
/// ├── /login                           # Token issuance (public)
/// ├── /account/...                     # Profile management (auth)
/// ├── /tasks/...                       # Personal + group tasks (auth)
/// └── /groups/...                      # Groups and memberships (auth)
/// ```
///
/// Protected sub-routers share one JWT middleware layer; the public
/// routes sit outside it.
pub fn build_router(state: AppState) -> Router {
    use crate::routes;

    // Public routes: health check and credential issuance
    let public_routes = Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/signup", post(routes::auth::signup))
        .route("/login", post(routes::auth::login));

    let account_routes = Router::new()
        .route("/", get(routes::account::get_account))
        .route("/update", put(routes::account::update_account))
        .route("/password", put(routes::account::change_password))
        .route("/delete", delete(routes::account::delete_account));

    let task_routes = Router::new()
        .route("/", get(routes::tasks::list_tasks))
        .route("/create", post(routes::tasks::create_task))
        .route("/:id", put(routes::tasks::update_task))
        .route("/:id", delete(routes::tasks::delete_task))
        .route("/:id/toggle-complete", put(routes::tasks::toggle_complete))
        .route("/:id/archive", put(routes::tasks::archive_task));

    let group_routes = Router::new()
        .route("/", get(routes::groups::list_groups))
        .route("/create", post(routes::groups::create_group))
        .route("/join", post(routes::groups::join_group))
        .route("/leave", post(routes::groups::leave_group))
        .route("/:group_id", delete(routes::groups::delete_group))
        .route("/:group_id/members", get(routes::groups::list_members));

    // Protected routes share the bearer-token gate
    let protected_routes = Router::new()
        .nest("/account", account_routes)
        .nest("/tasks", task_routes)
        .nest("/groups", group_routes)
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            jwt_auth_layer,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bearer-token authentication middleware layer
///
/// Extracts and validates the token from the Authorization header, then
/// injects [`AuthContext`] into request extensions. Verification is
/// stateless: no revocation list, expiry is the sole invalidation.
async fn jwt_auth_layer(
    state: axum::extract::State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, crate::error::ApiError> {
    let auth_header = req
        .headers()
        .get(axum::http::header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());

    // A header without a Bearer token counts as no credential at all
    let token = auth_header
        .and_then(|h| h.strip_prefix("Bearer "))
        .ok_or(AuthError::MissingCredentials)?;

    let claims = jwt::validate_token(token, state.jwt_secret()).map_err(|e| match e {
        JwtError::Expired => AuthError::ExpiredToken,
        other => AuthError::InvalidToken(other.to_string()),
    })?;

    req.extensions_mut().insert(AuthContext::from_token(claims.sub));

    Ok(next.run(req).await)
}
