mod plugin;
mod rates;
mod regions;
mod settings;

use std::sync::Arc;

use axum::{
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use pickup_core::{AppConfig, Catalog, ConfigError, EmptyLocationPolicy, SettingsProvider};
use pickup_rates::RegionalPickup;
use pickup_settings::{FormRenderer, ReferenceData, SettingsError};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{request_id, require_bearer_auth, AuthState, RequestId};

pub type SharedSettings = Arc<dyn SettingsProvider + Send + Sync>;
pub type SharedReference = Arc<dyn ReferenceData + Send + Sync>;

#[derive(Clone)]
pub struct AppState {
    pub settings: SharedSettings,
    pub pickup: Arc<RegionalPickup<SharedSettings, Catalog>>,
    pub reference: SharedReference,
    pub renderer: Arc<FormRenderer>,
    pub empty_location_policy: EmptyLocationPolicy,
}

impl AppState {
    pub fn new(
        settings: SharedSettings,
        reference: SharedReference,
        config: &AppConfig,
    ) -> Result<Self, SettingsError> {
        Ok(Self {
            settings: Arc::clone(&settings),
            pickup: Arc::new(RegionalPickup::new(
                settings,
                Catalog::for_locale(&config.locale),
            )),
            reference,
            renderer: Arc::new(FormRenderer::new(config.region_lookup_url.clone())?),
            empty_location_policy: config.empty_location_policy,
        })
    }

    pub(super) fn localizer(&self) -> &Catalog {
        self.pickup.localizer()
    }
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "unauthorized" => StatusCode::UNAUTHORIZED,
            "bad_request" | "validation_error" => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

pub(super) fn map_config_error(request_id: String, error: &ConfigError) -> ApiError {
    tracing::error!(error = %error, "settings unavailable");
    ApiError::new(request_id, "internal_error", "shipping settings are unavailable")
}

pub(super) fn map_settings_error(
    request_id: String,
    error: &SettingsError,
    state: &AppState,
) -> ApiError {
    if error.is_validation() {
        tracing::debug!(error = %error, "settings submission rejected");
        ApiError::new(
            request_id,
            "validation_error",
            error.user_message(state.localizer()),
        )
    } else {
        tracing::error!(error = %error, "settings form rendering failed");
        ApiError::new(request_id, "internal_error", "settings form rendering failed")
    }
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([
            header::CONTENT_TYPE,
            header::AUTHORIZATION,
            HeaderName::from_static("x-request-id"),
        ])
}

fn protected_router(auth: AuthState) -> Router<AppState> {
    Router::new()
        .route("/api/v1/rates", post(rates::quote))
        .route("/api/v1/plugin", get(plugin::describe))
        .route(
            "/api/v1/settings/validate",
            post(settings::validate_settings),
        )
        .route("/api/v1/settings/form", post(settings::render_form))
        .layer(axum::middleware::from_fn_with_state(
            auth,
            require_bearer_auth,
        ))
}

pub fn build_app(state: AppState, auth: AuthState) -> Router {
    let public_routes = Router::new()
        .route("/api/v1/health", get(health))
        .route(
            "/api/v1/regions",
            get(regions::lookup_query).post(regions::lookup_form),
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_router(auth))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health(Extension(req_id): Extension<RequestId>) -> impl IntoResponse {
    Json(ApiResponse {
        data: HealthData { status: "ok" },
        meta: ResponseMeta::new(req_id.0),
    })
}
