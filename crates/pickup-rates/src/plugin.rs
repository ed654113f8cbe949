use pickup_core::{
    Address, ConfigError, Localizer, Quote, SettingsProvider, WeightUnit, Zone,
};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::evaluate::evaluate;

/// Everything the host knows about an order at checkout.
#[derive(Debug, Clone, Deserialize)]
pub struct ShippingRequest {
    #[serde(default)]
    pub address: Address,
    pub weight: Decimal,
    #[serde(default)]
    pub weight_unit: WeightUnit,
    pub order_total: Decimal,
}

/// The pick-up shipping option as the host sees it: a settings source and a
/// localizer composed with the rate evaluator.
#[derive(Debug, Clone)]
pub struct RegionalPickup<P, L> {
    settings: P,
    localizer: L,
}

impl<P, L> RegionalPickup<P, L>
where
    P: SettingsProvider,
    L: Localizer,
{
    pub fn new(settings: P, localizer: L) -> Self {
        Self {
            settings,
            localizer,
        }
    }

    pub fn localizer(&self) -> &L {
        &self.localizer
    }

    /// Prices `request` against a fresh settings snapshot.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` only when the settings cannot be loaded; an
    /// unserviceable order is a [`Quote::Unavailable`].
    pub fn calculate(&self, request: &ShippingRequest) -> Result<Quote, ConfigError> {
        let settings = self.settings.settings()?;
        let weight_kg = request.weight_unit.to_kilograms(request.weight);
        Ok(evaluate(
            &settings,
            &request.address,
            weight_kg,
            request.order_total,
            &self.localizer,
        ))
    }

    /// Currency every quoted price is expressed in.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when the settings cannot be loaded.
    pub fn allowed_currency(&self) -> Result<String, ConfigError> {
        Ok(self.settings.settings()?.currency)
    }

    /// The served zone with unset parts removed, so a country-only zone
    /// carries no region.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` when the settings cannot be loaded.
    pub fn allowed_address(&self) -> Result<Address, ConfigError> {
        let Zone { country, region } = self.settings.settings()?.rate_zone;
        Ok(Address {
            country: Some(country).filter(|s| !s.is_empty()),
            region: Some(region).filter(|s| !s.is_empty()),
            ..Address::default()
        })
    }

    /// Unit the evaluator expects weights in.
    #[must_use]
    pub fn allowed_weight_unit(&self) -> WeightUnit {
        WeightUnit::Kilogram
    }

    /// Address fields the plugin asks checkout to collect beyond the host's
    /// defaults. Pick-up needs none.
    #[must_use]
    pub fn requested_address_fields(&self) -> &'static [&'static str] {
        &[]
    }
}
