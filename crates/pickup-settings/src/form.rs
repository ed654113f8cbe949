//! Settings form rendering.
//!
//! Templates are embedded in the crate and compiled once per renderer. Their
//! `.html` names switch on MiniJinja's HTML auto-escaping.

use minijinja::Environment;
use pickup_core::locale::messages;
use pickup_core::{Localizer, Settings};
use serde::Serialize;

use crate::error::SettingsError;
use crate::namespace::{container_id, field_name, Namespace};
use crate::reference::ReferenceData;
use crate::submission::{RawScalar, RawSettings};

mod embedded {
    pub const SETTINGS: &str = include_str!("../templates/settings.html");
    pub const REGION_ZONE: &str = include_str!("../templates/region_zone.html");
}

const SETTINGS_TEMPLATE: &str = "settings.html";
const REGION_ZONE_TEMPLATE: &str = "region_zone.html";

/// Values shown in the form, as text so a rejected submission can be
/// redisplayed exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FormValues {
    pub currency: String,
    pub rate_zone: ZoneValues,
    pub rate: Vec<RowValues>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ZoneValues {
    pub country: String,
    pub region: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RowValues {
    pub id: String,
    pub location: String,
    pub cost: String,
    pub maxweight: String,
    pub free: String,
}

/// Overlays a submission on the persisted settings. Each top-level key the
/// submission carries replaces the persisted one wholesale.
#[must_use]
pub fn merge_overrides(settings: &Settings, overrides: Option<&RawSettings>) -> FormValues {
    let mut values = FormValues {
        currency: settings.currency.clone(),
        rate_zone: ZoneValues {
            country: settings.rate_zone.country.clone(),
            region: settings.rate_zone.region.clone(),
        },
        rate: settings
            .rate
            .iter()
            .map(|(id, entry)| RowValues {
                id: id.to_string(),
                location: entry.location.clone(),
                cost: entry.cost.to_string(),
                maxweight: entry.max_weight.to_string(),
                free: entry.free_threshold.to_string(),
            })
            .collect(),
    };

    let Some(overrides) = overrides else {
        return values;
    };

    if let Some(currency) = &overrides.currency {
        values.currency.clone_from(currency);
    }

    if let Some(zone) = &overrides.rate_zone {
        values.rate_zone = ZoneValues {
            country: zone.country.clone().unwrap_or_default(),
            region: zone.region.clone().unwrap_or_default(),
        };
    }

    if let Some(rates) = &overrides.rate {
        let text = |v: Option<&RawScalar>| v.map(RawScalar::as_text).unwrap_or_default();
        values.rate = rates
            .iter()
            .map(|(id, row)| RowValues {
                id: id.clone(),
                location: row.location.clone().unwrap_or_default(),
                cost: text(row.cost.as_ref()),
                maxweight: text(row.maxweight.as_ref()),
                free: text(row.free.as_ref()),
            })
            .collect();
    }

    values
}

#[derive(Debug, Serialize)]
struct Fields {
    currency: String,
    country: String,
    region: String,
    rate: String,
}

#[derive(Debug, Serialize)]
struct Labels {
    currency: String,
    country: String,
    country_hint: String,
    region: String,
    region_hint: String,
    country_only_hint: String,
    pickup_point: String,
    cost: String,
    max_weight: String,
    free_from: String,
    zero_means_no_limit: String,
    add_point: String,
    delete: String,
}

impl Labels {
    fn translate<L>(localizer: &L) -> Self
    where
        L: Localizer + ?Sized,
    {
        Self {
            currency: localizer.translate(messages::CURRENCY),
            country: localizer.translate(messages::COUNTRY),
            country_hint: localizer.translate(messages::COUNTRY_HINT),
            region: localizer.translate(messages::REGION),
            region_hint: localizer.translate(messages::REGION_HINT),
            country_only_hint: localizer.translate(messages::COUNTRY_ONLY_HINT),
            pickup_point: localizer.translate(messages::PICKUP_POINT),
            cost: localizer.translate(messages::COST),
            max_weight: localizer.translate(messages::MAX_WEIGHT),
            free_from: localizer.translate(messages::FREE_FROM),
            zero_means_no_limit: localizer.translate(messages::ZERO_MEANS_NO_LIMIT),
            add_point: localizer.translate(messages::ADD_POINT),
            delete: localizer.translate(messages::DELETE),
        }
    }
}

#[derive(Debug, Serialize)]
struct Choice {
    value: String,
    label: String,
    selected: bool,
}

#[derive(Debug, Serialize)]
struct FormContext {
    values: FormValues,
    fields: Fields,
    t: Labels,
    currencies: Vec<Choice>,
    countries: Vec<Choice>,
    regions: Vec<Choice>,
    container_id: String,
    table_id: String,
    lookup_url: String,
}

/// Renders the settings form.
#[derive(Debug)]
pub struct FormRenderer {
    env: Environment<'static>,
    lookup_url: String,
}

impl FormRenderer {
    /// `lookup_url` is the region-lookup endpoint the form script queries
    /// when the selected country changes.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Template`] if an embedded template fails to
    /// compile.
    pub fn new(lookup_url: impl Into<String>) -> Result<Self, SettingsError> {
        let mut env = Environment::new();
        env.add_template(SETTINGS_TEMPLATE, embedded::SETTINGS)?;
        env.add_template(REGION_ZONE_TEMPLATE, embedded::REGION_ZONE)?;
        Ok(Self {
            env,
            lookup_url: lookup_url.into(),
        })
    }

    /// Renders the form for `settings`, with `overrides` (a rejected
    /// submission) taking precedence.
    ///
    /// # Errors
    ///
    /// Returns [`SettingsError::Template`] if rendering fails.
    pub fn render<R, L>(
        &self,
        settings: &Settings,
        overrides: Option<&RawSettings>,
        namespace: Option<&Namespace>,
        reference: &R,
        localizer: &L,
    ) -> Result<String, SettingsError>
    where
        R: ReferenceData + ?Sized,
        L: Localizer + ?Sized,
    {
        let values = merge_overrides(settings, overrides);

        let fields = Fields {
            currency: field_name(namespace, &["currency"]),
            country: field_name(namespace, &["rate_zone", "country"]),
            region: field_name(namespace, &["rate_zone", "region"]),
            rate: field_name(namespace, &["rate"]),
        };
        let zone_name = field_name(namespace, &["rate_zone"]);

        let mut currencies: Vec<Choice> = reference
            .currencies()
            .into_iter()
            .map(|code| Choice {
                selected: code == values.currency,
                label: code.clone(),
                value: code,
            })
            .collect();
        if !values.currency.is_empty() && !currencies.iter().any(|c| c.selected) {
            currencies.push(Choice {
                value: values.currency.clone(),
                label: values.currency.clone(),
                selected: true,
            });
        }

        let countries = reference
            .countries()
            .into_iter()
            .map(|c| Choice {
                selected: c.iso3 == values.rate_zone.country,
                value: c.iso3,
                label: c.name,
            })
            .collect();

        let regions = if values.rate_zone.country.is_empty() {
            Vec::new()
        } else {
            reference
                .regions(&values.rate_zone.country)
                .into_iter()
                .map(|r| Choice {
                    selected: r.code == values.rate_zone.region,
                    value: r.code,
                    label: r.name,
                })
                .collect()
        };

        let ctx = FormContext {
            container_id: container_id(&zone_name),
            table_id: container_id(&fields.rate),
            values,
            fields,
            t: Labels::translate(localizer),
            currencies,
            countries,
            regions,
            lookup_url: self.lookup_url.clone(),
        };

        let html = self.env.get_template(SETTINGS_TEMPLATE)?.render(&ctx)?;
        tracing::debug!(rows = ctx.values.rate.len(), "rendered settings form");
        Ok(html)
    }
}

#[cfg(test)]
#[path = "form_test.rs"]
mod tests;
