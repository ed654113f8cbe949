pub mod error;
pub mod form;
pub mod namespace;
pub mod normalize;
pub mod reference;
pub mod submission;

pub use error::SettingsError;
pub use form::{merge_overrides, FormRenderer, FormValues, RowValues, ZoneValues};
pub use namespace::{container_id, field_name, Namespace};
pub use normalize::{normalize_settings, parse_amount};
pub use reference::{region_lookup, Country, ReferenceData, Region, RegionLookup, StaticReferenceData};
pub use submission::{RawRateRow, RawRates, RawScalar, RawSettings, RawZone};
