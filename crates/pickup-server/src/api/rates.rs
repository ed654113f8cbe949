use axum::{extract::State, Extension, Json};
use pickup_core::{DeliveryOption, Quote};
use pickup_rates::ShippingRequest;
use serde::ser::SerializeMap;
use serde::{Serialize, Serializer};

use crate::middleware::RequestId;

use super::{map_config_error, ApiError, ApiResponse, AppState, ResponseMeta};

/// Quote as the host checkout consumes it.
#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub(super) enum QuoteBody {
    Available { options: OptionsById },
    Unavailable { message: String },
}

/// Options keyed by pick-up point id, in rate-table order.
#[derive(Debug)]
pub(super) struct OptionsById(Vec<DeliveryOption>);

impl Serialize for OptionsById {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for option in &self.0 {
            map.serialize_entry(option.id.as_str(), option)?;
        }
        map.end()
    }
}

impl From<Quote> for QuoteBody {
    fn from(quote: Quote) -> Self {
        match quote {
            Quote::Available(options) => QuoteBody::Available {
                options: OptionsById(options),
            },
            Quote::Unavailable { message } => QuoteBody::Unavailable { message },
        }
    }
}

/// POST /api/v1/rates: price an order.
pub(super) async fn quote(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<ShippingRequest>,
) -> Result<Json<ApiResponse<QuoteBody>>, ApiError> {
    let quote = state
        .pickup
        .calculate(&body)
        .map_err(|e| map_config_error(req_id.0.clone(), &e))?;

    tracing::info!(
        available = quote.is_available(),
        options = quote.options().len(),
        "priced pick-up shipping"
    );

    Ok(Json(ApiResponse {
        data: QuoteBody::from(quote),
        meta: ResponseMeta::new(req_id.0),
    }))
}
