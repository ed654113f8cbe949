use std::fmt;
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::CoreError;

/// The single country and region a plugin instance serves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Zone {
    /// ISO 3166-1 alpha-3 country code, e.g. `"RUS"`.
    pub country: String,
    /// Region code within `country`, e.g. `"MOW"`.
    #[serde(default)]
    pub region: String,
}

/// Identifier of a pick-up point. Never empty and never `"0"`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct RateId(String);

impl RateId {
    /// # Errors
    ///
    /// Returns [`CoreError::InvalidRateId`] for an empty or `"0"` id.
    pub fn new(raw: impl Into<String>) -> Result<Self, CoreError> {
        let raw = raw.into();
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed == "0" {
            return Err(CoreError::InvalidRateId(raw));
        }
        Ok(Self(trimmed.to_string()))
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RateId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for RateId {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

/// Map keys may arrive as YAML integers (`1:`) or strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawKey {
    Number(u64),
    Text(String),
}

impl<'de> Deserialize<'de> for RateId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = match RawKey::deserialize(deserializer)? {
            RawKey::Number(n) => n.to_string(),
            RawKey::Text(s) => s,
        };
        RateId::new(raw).map_err(de::Error::custom)
    }
}

/// One pick-up point offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateEntry {
    /// Display name of the pick-up point.
    pub location: String,
    /// Delivery price in the plugin currency.
    #[serde(default)]
    pub cost: Decimal,
    /// Weight ceiling in kilograms; zero means unlimited.
    #[serde(rename = "maxweight", default)]
    pub max_weight: Decimal,
    /// Order total from which delivery is free; zero disables the threshold.
    #[serde(rename = "free", default)]
    pub free_threshold: Decimal,
}

/// Pick-up points in the order the administrator configured them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RateTable(Vec<(RateId, RateEntry)>);

impl RateTable {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an entry.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::DuplicateRateId`] when `id` is already present.
    pub fn insert(&mut self, id: RateId, entry: RateEntry) -> Result<(), CoreError> {
        if self.get(&id).is_some() {
            return Err(CoreError::DuplicateRateId(id.to_string()));
        }
        self.0.push((id, entry));
        Ok(())
    }

    #[must_use]
    pub fn get(&self, id: &RateId) -> Option<&RateEntry> {
        self.0.iter().find(|(k, _)| k == id).map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&RateId, &RateEntry)> {
        self.0.iter().map(|(k, v)| (k, v))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Serialize for RateTable {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.0.len()))?;
        for (id, entry) in &self.0 {
            map.serialize_entry(id, entry)?;
        }
        map.end()
    }
}

struct RateTableVisitor;

impl<'de> Visitor<'de> for RateTableVisitor {
    type Value = RateTable;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a map of pick-up points keyed by id")
    }

    fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut table = RateTable::new();
        while let Some((id, entry)) = access.next_entry::<RateId, RateEntry>()? {
            table.insert(id, entry).map_err(de::Error::custom)?;
        }
        Ok(table)
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(RateTable::new())
    }
}

impl<'de> Deserialize<'de> for RateTable {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_map(RateTableVisitor)
    }
}

/// Destination address as supplied by the host checkout.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Address {
    pub country: Option<String>,
    pub region: Option<String>,
    pub city: Option<String>,
    pub zip: Option<String>,
    pub street: Option<String>,
}

impl Address {
    /// Returns `true` when both country and region are present and equal to
    /// the zone's.
    #[must_use]
    pub fn is_within(&self, zone: &Zone) -> bool {
        self.country.as_deref() == Some(zone.country.as_str())
            && self.region.as_deref() == Some(zone.region.as_str())
    }
}

/// Weight units the host may report order weight in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WeightUnit {
    #[default]
    #[serde(rename = "kg")]
    Kilogram,
    #[serde(rename = "g")]
    Gram,
    #[serde(rename = "lb")]
    Pound,
    #[serde(rename = "oz")]
    Ounce,
}

impl WeightUnit {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            WeightUnit::Kilogram => "kg",
            WeightUnit::Gram => "g",
            WeightUnit::Pound => "lb",
            WeightUnit::Ounce => "oz",
        }
    }

    /// Converts `value` expressed in this unit to kilograms.
    #[must_use]
    pub fn to_kilograms(self, value: Decimal) -> Decimal {
        match self {
            WeightUnit::Kilogram => value,
            WeightUnit::Gram => value / Decimal::ONE_THOUSAND,
            // 1 lb = 0.45359237 kg
            WeightUnit::Pound => value * Decimal::new(45_359_237, 8),
            // 1 oz = 0.028349523125 kg
            WeightUnit::Ounce => value * Decimal::new(28_349_523_125, 12),
        }
    }
}

impl fmt::Display for WeightUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WeightUnit {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "kg" => Ok(WeightUnit::Kilogram),
            "g" => Ok(WeightUnit::Gram),
            "lb" | "lbs" => Ok(WeightUnit::Pound),
            "oz" => Ok(WeightUnit::Ounce),
            other => Err(CoreError::UnknownWeightUnit(other.to_string())),
        }
    }
}

/// A priced pick-up point offered to the customer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeliveryOption {
    #[serde(skip_serializing)]
    pub id: RateId,
    pub name: String,
    pub currency: String,
    #[serde(rename = "rate")]
    pub cost: Decimal,
    pub est_delivery: String,
}

/// Result of a rate evaluation. Unavailability is a value, not an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Quote {
    Available(Vec<DeliveryOption>),
    Unavailable { message: String },
}

impl Quote {
    #[must_use]
    pub fn is_available(&self) -> bool {
        matches!(self, Quote::Available(_))
    }

    #[must_use]
    pub fn options(&self) -> &[DeliveryOption] {
        match self {
            Quote::Available(options) => options,
            Quote::Unavailable { .. } => &[],
        }
    }
}
