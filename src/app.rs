use axum::{
    extract::DefaultBodyLimit,
    handler::Handler,
    http::HeaderValue,
    middleware::{from_fn, from_fn_with_state},
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};

use crate::config::SecurityConfig;
use crate::handlers::{protected, public};
use crate::middleware::{require_admin, require_auth, require_manager};
use crate::state::AppState;

/// Full HTTP surface of the service
pub fn app(state: AppState) -> Router {
    let config = state.config.clone();

    let mut router = Router::new()
        // Public
        .route("/", get(public::root))
        .route("/health", get(public::health))
        .merge(auth_public_routes())
        // Bearer token required
        .merge(protected_routes(state.clone()))
        .layer(DefaultBodyLimit::max(config.api.max_request_size_bytes));

    if config.security.enable_cors {
        router = router.layer(cors_layer(&config.security));
    }
    if config.api.enable_request_logging {
        router = router.layer(TraceLayer::new_for_http());
    }

    router.with_state(state)
}

fn auth_public_routes() -> Router<AppState> {
    use public::auth;

    Router::new()
        .route("/api/register", post(auth::register_post))
        .route("/api/login", post(auth::login_post))
}

/// Every route here passes `require_auth`; manager and admin routes add a
/// role check on the individual method.
fn protected_routes(state: AppState) -> Router<AppState> {
    use protected::{assignments, auth, devices, find, users};

    Router::new()
        .route("/api/logout", post(auth::logout_post))
        // Devices
        .route(
            "/api/devices",
            get(devices::list).post(devices::create.layer(from_fn(require_manager))),
        )
        .route(
            "/api/devices/:id",
            get(devices::show)
                .put(devices::update.layer(from_fn(require_manager)))
                .delete(devices::delete.layer(from_fn(require_admin))),
        )
        // Assignments
        .route(
            "/api/assignments",
            get(assignments::list).post(assignments::create.layer(from_fn(require_manager))),
        )
        .route(
            "/api/assignments/:id",
            get(assignments::show)
                .put(assignments::update.layer(from_fn(require_manager)))
                .delete(assignments::delete.layer(from_fn(require_admin))),
        )
        // Users
        .route("/api/users/profile", get(auth::profile_get))
        .route(
            "/api/users",
            get(users::list.layer(from_fn(require_admin)))
                .post(users::create.layer(from_fn(require_admin))),
        )
        .route(
            "/api/users/:id",
            get(users::show.layer(from_fn(require_manager)))
                .put(users::update.layer(from_fn(require_admin)))
                .delete(users::delete.layer(from_fn(require_admin))),
        )
        // Search
        .route("/search", get(find::search_get))
        .route_layer(from_fn_with_state(state, require_auth))
}

/// `*` (or no list at all) allows any origin
fn cors_layer(security: &SecurityConfig) -> CorsLayer {
    if security.cors_origins.is_empty() || security.cors_origins.iter().any(|o| o == "*") {
        return CorsLayer::permissive();
    }

    let origins: Vec<HeaderValue> = security
        .cors_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!("Ignoring invalid CORS origin: {}", origin);
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods(Any)
        .allow_headers(Any)
}
