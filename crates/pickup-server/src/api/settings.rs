use axum::{extract::State, response::Html, Extension, Json};
use pickup_core::{Settings, SettingsProvider};
use pickup_settings::{normalize_settings, Namespace, RawSettings};
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{map_config_error, map_settings_error, ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub(super) struct FormRequest {
    /// A rejected submission to redisplay instead of the persisted values.
    pub overrides: Option<RawSettings>,
    pub namespace: Option<Namespace>,
}

/// POST /api/v1/settings/validate: normalize a submission for the host to
/// persist.
pub(super) async fn validate_settings(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<RawSettings>,
) -> Result<Json<ApiResponse<Settings>>, ApiError> {
    let settings = normalize_settings(&body, state.empty_location_policy)
        .map_err(|e| map_settings_error(req_id.0.clone(), &e, &state))?;

    tracing::info!(
        rates = settings.rate.len(),
        policy = %state.empty_location_policy,
        "settings submission normalized"
    );

    Ok(Json(ApiResponse {
        data: settings,
        meta: ResponseMeta::new(req_id.0),
    }))
}

/// POST /api/v1/settings/form: render the admin settings form.
pub(super) async fn render_form(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Json(body): Json<FormRequest>,
) -> Result<Html<String>, ApiError> {
    let settings = state
        .settings
        .settings()
        .map_err(|e| map_config_error(req_id.0.clone(), &e))?;

    let html = state
        .renderer
        .render(
            &settings,
            body.overrides.as_ref(),
            body.namespace.as_ref(),
            state.reference.as_ref(),
            state.localizer(),
        )
        .map_err(|e| map_settings_error(req_id.0.clone(), &e, &state))?;

    Ok(Html(html))
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use axum::http::{header, StatusCode};
    use pickup_core::{EmptyLocationPolicy, SettingsFile};
    use pickup_settings::StaticReferenceData;
    use serde_json::json;
    use tower::ServiceExt;

    use super::super::test_support::{
        app, app_with, body_json, body_text, config, json_request, state_with, REFERENCE,
    };
    use super::super::AppState;

    #[tokio::test]
    async fn validate_normalizes_submission() {
        let submission = json!({
            "currency": " RUB ",
            "rate_zone": {"country": "RUS", "region": "MOW"},
            "rate": {
                "7": {"location": " Point A ", "cost": "200,50", "maxweight": 10, "free": "abc"}
            }
        });
        let response = app()
            .oneshot(json_request("POST", "/api/v1/settings/validate", &submission))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let data = &json["data"];
        assert_eq!(data["currency"], "RUB");
        assert_eq!(data["rate"]["7"]["location"], "Point A");
        assert_eq!(data["rate"]["7"]["cost"], "200.5");
        assert_eq!(data["rate"]["7"]["maxweight"], "10");
        assert_eq!(data["rate"]["7"]["free"], "0");
    }

    #[tokio::test]
    async fn empty_location_is_a_localized_validation_error() {
        let submission = json!({"rate": {"a": {"location": "  ", "cost": "1"}}});
        let state = state_with("ru_RU", EmptyLocationPolicy::Reject);
        let response = app_with(state)
            .oneshot(json_request("POST", "/api/v1/settings/validate", &submission))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(json["error"]["code"], "validation_error");
        assert_eq!(
            json["error"]["message"],
            "Название пункта выдачи не может быть пустым"
        );
    }

    #[tokio::test]
    async fn drop_policy_omits_empty_rows() {
        let submission = json!({"rate": {
            "a": {"location": "", "cost": "1"},
            "b": {"location": "Point B", "cost": "2"}
        }});
        let state = state_with("en_US", EmptyLocationPolicy::Drop);
        let response = app_with(state)
            .oneshot(json_request("POST", "/api/v1/settings/validate", &submission))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        let rate = json["data"]["rate"].as_object().expect("rate");
        assert!(rate.get("a").is_none());
        assert_eq!(rate["b"]["cost"], "2");
    }

    #[tokio::test]
    async fn zero_rate_id_is_rejected() {
        let submission = json!({"rate": {"0": {"location": "Point", "cost": "1"}}});
        let response = app()
            .oneshot(json_request("POST", "/api/v1/settings/validate", &submission))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = body_json(response).await;
        assert_eq!(
            json["error"]["message"],
            "Pick-up point id cannot be empty or zero"
        );
    }

    #[tokio::test]
    async fn form_renders_persisted_settings_as_html() {
        let response = app()
            .oneshot(json_request("POST", "/api/v1/settings/form", &json!({})))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let content_type = response
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(content_type.starts_with("text/html"));
        let html = body_text(response).await;
        assert!(html.contains(r#"name="rate[a1][location]" value="Point A""#));
        assert!(html.contains(r#"<option value="MOW" selected>Moscow</option>"#));
    }

    #[tokio::test]
    async fn form_applies_namespace_and_overrides() {
        let body = json!({
            "namespace": ["shipping", "pickup"],
            "overrides": {"currency": "USD"}
        });
        let response = app()
            .oneshot(json_request("POST", "/api/v1/settings/form", &body))
            .await
            .expect("response");

        let html = body_text(response).await;
        assert!(html.contains(r#"name="shipping[pickup][currency]""#));
        assert!(html.contains(r#"<option value="USD" selected>USD</option>"#));
        assert!(html.contains(r#"name="shipping[pickup][rate][b2][free]" value="3000""#));
    }

    #[tokio::test]
    async fn form_renders_for_unconfigured_instance() {
        let reference = StaticReferenceData::from_yaml(REFERENCE).expect("reference");
        let state = AppState::new(
            Arc::new(SettingsFile::new("/nonexistent/pickup/settings.yaml")),
            Arc::new(reference),
            &config("en_US", EmptyLocationPolicy::Reject),
        )
        .expect("state");

        let response = app_with(state)
            .oneshot(json_request("POST", "/api/v1/settings/form", &json!({})))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let html = body_text(response).await;
        assert!(html.contains(r#"<option value="RUB">RUB</option>"#));
        assert!(html.contains(r#"data-name="rate[__id__][location]""#));
        assert!(!html.contains(r#"name="rate[a1]"#));
    }
}
