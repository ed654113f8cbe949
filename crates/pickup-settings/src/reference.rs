//! Country, region and currency reference data consumed by the form.

use std::collections::BTreeMap;
use std::path::Path;

use pickup_core::ConfigError;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Country {
    pub iso3: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Region {
    pub code: String,
    pub name: String,
}

/// Lookup service for the selectors on the settings form.
pub trait ReferenceData {
    fn countries(&self) -> Vec<Country>;

    /// Regions of `country` in display order; empty for countries without
    /// a region list.
    fn regions(&self, country: &str) -> Vec<Region>;

    fn currencies(&self) -> Vec<String>;
}

#[derive(Debug, Clone, Deserialize)]
struct CountryRecord {
    iso3: String,
    name: String,
    #[serde(default)]
    regions: Vec<Region>,
}

/// Reference data read once from a YAML file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StaticReferenceData {
    #[serde(default)]
    currencies: Vec<String>,
    #[serde(default)]
    countries: Vec<CountryRecord>,
}

impl StaticReferenceData {
    /// # Errors
    ///
    /// Returns `ConfigError` if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileIo {
            path: path.display().to_string(),
            source: e,
        })?;
        Self::from_yaml(&content).map_err(|e| ConfigError::FileParse {
            path: path.display().to_string(),
            source: e,
        })
    }

    /// # Errors
    ///
    /// Returns the YAML error when `content` is not valid reference data.
    pub fn from_yaml(content: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(content)
    }
}

impl ReferenceData for StaticReferenceData {
    fn countries(&self) -> Vec<Country> {
        self.countries
            .iter()
            .map(|c| Country {
                iso3: c.iso3.clone(),
                name: c.name.clone(),
            })
            .collect()
    }

    fn regions(&self, country: &str) -> Vec<Region> {
        self.countries
            .iter()
            .find(|c| c.iso3 == country)
            .map(|c| c.regions.clone())
            .unwrap_or_default()
    }

    fn currencies(&self) -> Vec<String> {
        self.currencies.clone()
    }
}

/// Payload of the region-lookup endpoint the form script calls when the
/// country changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RegionLookup {
    pub options: BTreeMap<String, String>,
    pub order: Vec<String>,
}

#[must_use]
pub fn region_lookup<R>(reference: &R, country: &str) -> RegionLookup
where
    R: ReferenceData + ?Sized,
{
    let regions = reference.regions(country);
    RegionLookup {
        order: regions.iter().map(|r| r.code.clone()).collect(),
        options: regions.into_iter().map(|r| (r.code, r.name)).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r"
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

    #[test]
    fn regions_follow_file_order() {
        let data = StaticReferenceData::from_yaml(SAMPLE).unwrap();
        let codes: Vec<String> = data.regions("RUS").into_iter().map(|r| r.code).collect();
        assert_eq!(codes, vec!["MOW", "SPE"]);
        assert!(data.regions("MCO").is_empty());
        assert!(data.regions("XXX").is_empty());
        assert_eq!(data.currencies(), vec!["RUB", "USD"]);
    }

    #[test]
    fn lookup_payload_shape() {
        let data = StaticReferenceData::from_yaml(SAMPLE).unwrap();
        let payload = serde_json::to_value(region_lookup(&data, "RUS")).unwrap();
        assert_eq!(payload["order"], serde_json::json!(["MOW", "SPE"]));
        assert_eq!(payload["options"]["SPE"], "Saint Petersburg");
    }

    #[test]
    fn lookup_for_country_without_regions_is_empty() {
        let data = StaticReferenceData::from_yaml(SAMPLE).unwrap();
        assert_eq!(region_lookup(&data, "MCO"), RegionLookup::default());
    }

    #[test]
    fn load_reports_missing_file() {
        let err = StaticReferenceData::load(Path::new("/nonexistent/reference.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::FileIo { .. }));
    }
}
