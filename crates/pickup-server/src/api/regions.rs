use axum::{
    extract::{Query, State},
    Extension, Form, Json,
};
use pickup_settings::{region_lookup, RegionLookup};
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Default, Deserialize)]
pub(super) struct RegionQuery {
    #[serde(default)]
    pub country: String,
}

/// GET /api/v1/regions?country=RUS
pub(super) async fn lookup_query(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<RegionQuery>,
) -> Json<ApiResponse<RegionLookup>> {
    respond(&state, req_id, &query.country)
}

/// POST /api/v1/regions with a form-encoded `country`, as sent by the
/// settings form script.
pub(super) async fn lookup_form(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Form(query): Form<RegionQuery>,
) -> Json<ApiResponse<RegionLookup>> {
    respond(&state, req_id, &query.country)
}

fn respond(state: &AppState, req_id: RequestId, country: &str) -> Json<ApiResponse<RegionLookup>> {
    let data = region_lookup(state.reference.as_ref(), country.trim());
    tracing::debug!(country, regions = data.order.len(), "region lookup");
    Json(ApiResponse {
        data,
        meta: ResponseMeta::new(req_id.0),
    })
}
