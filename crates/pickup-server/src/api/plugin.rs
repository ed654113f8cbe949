use axum::{extract::State, Extension, Json};
use pickup_core::{Address, WeightUnit};
use serde::Serialize;

use crate::middleware::RequestId;

use super::{map_config_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Serialize)]
pub(super) struct PluginInfo {
    pub currency: String,
    pub allowed_address: Address,
    pub weight_unit: WeightUnit,
    pub requested_address_fields: &'static [&'static str],
}

/// GET /api/v1/plugin: what the host needs to offer this shipping option.
pub(super) async fn describe(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<ApiResponse<PluginInfo>>, ApiError> {
    let currency = state
        .pickup
        .allowed_currency()
        .map_err(|e| map_config_error(req_id.0.clone(), &e))?;
    let allowed_address = state
        .pickup
        .allowed_address()
        .map_err(|e| map_config_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: PluginInfo {
            currency,
            allowed_address,
            weight_unit: state.pickup.allowed_weight_unit(),
            requested_address_fields: state.pickup.requested_address_fields(),
        },
        meta: ResponseMeta::new(req_id.0),
    }))
}
