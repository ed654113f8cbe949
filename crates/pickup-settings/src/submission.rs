//! Loosely-typed settings as they arrive from the admin form.
//!
//! Every field is optional and numbers may come as strings or JSON numbers;
//! [`crate::normalize`] turns this into the typed [`pickup_core::Settings`].

use std::fmt;

use pickup_core::Settings;
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawSettings {
    pub currency: Option<String>,
    pub rate_zone: Option<RawZone>,
    pub rate: Option<RawRates>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawZone {
    pub country: Option<String>,
    pub region: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RawRateRow {
    pub location: Option<String>,
    pub cost: Option<RawScalar>,
    pub maxweight: Option<RawScalar>,
    pub free: Option<RawScalar>,
}

/// A form value that should hold a number.
///
/// Integers keep their exact digits; only fractional numbers pass through a
/// float.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawScalar {
    Number(serde_json::Number),
    Bool(bool),
    Text(String),
}

impl RawScalar {
    /// The value as the text an input field would carry.
    #[must_use]
    pub fn as_text(&self) -> String {
        match self {
            RawScalar::Number(n) => match n.as_f64() {
                Some(f) if n.is_f64() => f.to_string(),
                _ => n.to_string(),
            },
            RawScalar::Bool(true) => "1".to_string(),
            RawScalar::Bool(false) => "0".to_string(),
            RawScalar::Text(s) => s.clone(),
        }
    }
}

impl From<&str> for RawScalar {
    fn from(value: &str) -> Self {
        RawScalar::Text(value.to_string())
    }
}

/// Submitted rate rows keyed by id, in submission order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRates(pub Vec<(String, RawRateRow)>);

impl RawRates {
    pub fn iter(&self) -> impl Iterator<Item = &(String, RawRateRow)> {
        self.0.iter()
    }
}

impl Serialize for RawRates {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (id, row) in &self.0 {
            map.serialize_entry(id, row)?;
        }
        map.end()
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawKey {
    Number(i64),
    Text(String),
}

struct RawRatesVisitor;

impl<'de> Visitor<'de> for RawRatesVisitor {
    type Value = RawRates;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of rate rows keyed by id")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut rows = Vec::new();
        while let Some((key, row)) = access.next_entry::<RawKey, Option<RawRateRow>>()? {
            let id = match key {
                RawKey::Number(n) => n.to_string(),
                RawKey::Text(s) => s,
            };
            rows.push((id, row.unwrap_or_default()));
        }
        Ok(RawRates(rows))
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(RawRates::default())
    }
}

impl<'de> Deserialize<'de> for RawRates {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(RawRatesVisitor)
    }
}

impl From<&Settings> for RawSettings {
    fn from(settings: &Settings) -> Self {
        let rows = settings
            .rate
            .iter()
            .map(|(id, entry)| {
                (
                    id.to_string(),
                    RawRateRow {
                        location: Some(entry.location.clone()),
                        cost: Some(RawScalar::Text(entry.cost.to_string())),
                        maxweight: Some(RawScalar::Text(entry.max_weight.to_string())),
                        free: Some(RawScalar::Text(entry.free_threshold.to_string())),
                    },
                )
            })
            .collect();

        RawSettings {
            currency: Some(settings.currency.clone()),
            rate_zone: Some(RawZone {
                country: Some(settings.rate_zone.country.clone()),
                region: Some(settings.rate_zone.region.clone()),
            }),
            rate: Some(RawRates(rows)),
        }
    }
}
