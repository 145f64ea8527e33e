use axum::{
    Router,
    http::HeaderValue,
    routing::{get, post},
};
use recommender::{MatchingEngine, SkillCatalog};
use std::sync::Arc;
use store::OrganizationStore;
use tokio::sync::Mutex;
use tower_http::{
    cors::{AllowHeaders, AllowMethods, AllowOrigin, Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

pub mod config;
pub mod error;
pub mod handlers;
pub mod industries;
pub mod store;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn OrganizationStore>,
    pub engine: MatchingEngine,
    pub catalog: Arc<SkillCatalog>,
    pub top_k_per_objective: usize,
    /// Serialises the check-then-save in organization creation
    create_lock: Arc<Mutex<()>>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn OrganizationStore>,
        engine: MatchingEngine,
        catalog: SkillCatalog,
        top_k_per_objective: usize,
    ) -> Self {
        Self {
            store,
            engine,
            catalog: Arc::new(catalog),
            top_k_per_objective,
            create_lock: Arc::new(Mutex::new(())),
        }
    }
}

pub fn create_router(state: AppState, cors_origins: &[String]) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/organization/",
            post(handlers::add_organization).get(handlers::get_organization),
        )
        .route(
            "/generate_training_recommendations/",
            get(handlers::generate_training_recommendations),
        )
        .route("/industries/", get(handlers::get_industries))
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer(cors_origins))
        .with_state(state)
}

/// `*` anywhere in the list allows every origin without credentials.
/// An explicit list allows credentials, so methods and headers are mirrored
/// from the request instead of using wildcards.
pub fn cors_layer(origins: &[String]) -> CorsLayer {
    if origins.iter().any(|origin| origin == "*") {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let allowed: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(e) => {
                warn!(origin = %origin, error = %e, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(allowed))
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true)
}
