use pickup_core::Catalog;

use crate::reference::StaticReferenceData;
use crate::submission::{RawRateRow, RawRates, RawZone};

use super::*;

const REFERENCE: &str = r"
currencies: [RUB, USD]
countries:
  - iso3: RUS
    name: Russia
    regions:
      - {code: MOW, name: Moscow}
      - {code: SPE, name: Saint Petersburg}
  - iso3: MCO
    name: Monaco
";

fn reference() -> StaticReferenceData {
    StaticReferenceData::from_yaml(REFERENCE).unwrap()
}

fn settings(yaml: &str) -> Settings {
    serde_yaml::from_str(yaml).unwrap()
}

fn moscow() -> Settings {
    settings(
        r#"
currency: RUB
rate_zone: {country: RUS, region: SPE}
rate:
  a1: {location: "Point A", cost: "200", maxweight: "10", free: "0"}
  b2: {location: "Point B", cost: "150.5", maxweight: "0", free: "3000"}
"#,
    )
}

fn renderer() -> FormRenderer {
    FormRenderer::new("/api/v1/regions").unwrap()
}

fn render(settings: &Settings, overrides: Option<&RawSettings>, ns: Option<&Namespace>) -> String {
    renderer()
        .render(settings, overrides, ns, &reference(), &Catalog::default())
        .unwrap()
}

#[test]
fn renders_one_row_per_entry_in_order() {
    let html = render(&moscow(), None, None);
    let a = html.find(r#"name="rate[a1][location]" value="Point A""#).unwrap();
    let b = html.find(r#"name="rate[b2][cost]" value="150.5""#).unwrap();
    assert!(a < b);
}

#[test]
fn template_row_uses_placeholder_and_data_names() {
    let html = render(&moscow(), None, None);
    assert!(html.contains(r#"data-name="rate[__id__][location]""#));
    assert!(!html.contains(r#" name="rate[__id__]"#));
}

#[test]
fn location_is_html_escaped() {
    let s = settings(
        r#"
currency: RUB
rate_zone: {country: RUS, region: ""}
rate:
  x: {location: "<script>alert(1)</script>", cost: "1"}
"#,
    );
    let html = render(&s, None, None);
    assert!(!html.contains("<script>alert(1)</script>"));
    assert!(html.contains("&lt;script&gt;"));
}

#[test]
fn namespace_prefixes_every_field() {
    let ns = Namespace::Path(vec!["shipping".into(), "7".into()]);
    let html = render(&moscow(), None, Some(&ns));
    assert!(html.contains(r#"name="shipping[7][currency]""#));
    assert!(html.contains(r#"name="shipping[7][rate_zone][country]""#));
    assert!(html.contains(r#"name="shipping[7][rate][a1][cost]""#));
    assert!(html.contains(r#"id="shipping-7-rate_zone""#));
}

#[test]
fn persisted_region_is_selected() {
    let html = render(&moscow(), None, None);
    assert!(html.contains(r#"<option value="SPE" selected>Saint Petersburg</option>"#));
    assert!(html.contains(r#"<option value="MOW">Moscow</option>"#));
    assert!(html.contains(r#"<option value="RUS" selected>Russia</option>"#));
    assert!(html.contains(r#"<option value="RUB" selected>RUB</option>"#));
}

#[test]
fn country_without_regions_falls_back_to_hidden_input() {
    let s = settings("currency: EUR\nrate_zone: {country: MCO, region: \"\"}\n");
    let html = render(&s, None, None);
    assert!(html.contains(r#"<input type="hidden" name="rate_zone[region]" value="">"#));
    assert!(html.contains(r#"<select id="rate_zone-region" name="rate_zone[region]" disabled>"#));
    assert!(html.contains(messages::COUNTRY_ONLY_HINT));
}

#[test]
fn country_with_regions_disables_hidden_input() {
    let html = render(&moscow(), None, None);
    assert!(html.contains(r#"<input type="hidden" name="rate_zone[region]" value="" disabled>"#));
}

#[test]
fn unknown_currency_is_kept_selectable() {
    let s = settings("currency: EUR\nrate_zone: {country: RUS, region: MOW}\n");
    let html = render(&s, None, None);
    assert!(html.contains(r#"<option value="EUR" selected>EUR</option>"#));
}

#[test]
fn lookup_url_is_embedded_as_json() {
    let html = render(&moscow(), None, None);
    assert!(html.contains(r#"var lookupUrl = "/api/v1/regions";"#));
}

#[test]
fn refreshed_placeholder_region_is_disabled() {
    let html = render(&moscow(), None, None);
    assert!(html.contains("opt.disabled = code === '';"));
}

#[test]
fn labels_follow_locale() {
    let html = renderer()
        .render(&moscow(), None, None, &reference(), &Catalog::for_locale("ru_RU"))
        .unwrap();
    let ru = Catalog::for_locale("ru_RU");
    assert!(html.contains(&ru.translate(messages::ADD_POINT)));
    assert!(!html.contains(messages::ADD_POINT));
}

// -----------------------------------------------------------------------
// merge_overrides
// -----------------------------------------------------------------------

#[test]
fn merge_without_overrides_shows_persisted_values() {
    let values = merge_overrides(&moscow(), None);
    assert_eq!(values.currency, "RUB");
    assert_eq!(values.rate_zone.region, "SPE");
    assert_eq!(values.rate.len(), 2);
    assert_eq!(values.rate[1].free, "3000");
}

#[test]
fn merge_replaces_only_submitted_top_level_keys() {
    let overrides = RawSettings {
        currency: None,
        rate_zone: Some(RawZone {
            country: Some("MCO".into()),
            region: None,
        }),
        rate: Some(RawRates(vec![(
            "n1".into(),
            RawRateRow {
                location: Some(String::new()),
                cost: Some("12,5".into()),
                maxweight: None,
                free: None,
            },
        )])),
    };
    let values = merge_overrides(&moscow(), Some(&overrides));
    assert_eq!(values.currency, "RUB");
    assert_eq!(values.rate_zone.country, "MCO");
    assert_eq!(values.rate_zone.region, "");
    assert_eq!(values.rate.len(), 1);
    assert_eq!(values.rate[0].id, "n1");
    assert_eq!(values.rate[0].cost, "12,5");
}

#[test]
fn rejected_submission_is_redisplayed_as_typed() {
    let overrides: RawSettings = serde_json::from_str(
        r#"{"rate": {"n1": {"location": "", "cost": "12,5 rub"}}}"#,
    )
    .unwrap();
    let html = render(&moscow(), Some(&overrides), None);
    assert!(html.contains(r#"name="rate[n1][cost]" value="12,5 rub""#));
    assert!(!html.contains("Point A"));
}
