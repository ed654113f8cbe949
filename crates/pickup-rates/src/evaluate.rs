//! Rate evaluation: which pick-up points can take an order, and at what price.
//!
//! Evaluation is pure. It never fails; an order that cannot be served yields
//! [`Quote::Unavailable`] carrying the localized reason.

use pickup_core::locale::messages;
use pickup_core::{Address, DeliveryOption, Localizer, Quote, RateEntry, Settings};
use rust_decimal::Decimal;

/// Filters the rate table down to the entries that can serve the order and
/// prices each one.
///
/// `total_weight` is in kilograms. Entries keep their configured order.
#[must_use]
pub fn evaluate<L>(
    settings: &Settings,
    address: &Address,
    total_weight: Decimal,
    order_total: Decimal,
    localizer: &L,
) -> Quote
where
    L: Localizer + ?Sized,
{
    if !address.is_within(&settings.rate_zone) {
        tracing::debug!(
            country = address.country.as_deref().unwrap_or(""),
            region = address.region.as_deref().unwrap_or(""),
            "address outside configured zone"
        );
        return unavailable(localizer);
    }

    let options: Vec<DeliveryOption> = settings
        .rate
        .iter()
        .filter(|(id, entry)| {
            let allowed = is_allowed_weight(entry, total_weight);
            if !allowed {
                tracing::debug!(
                    rate_id = %id,
                    max_weight = %entry.max_weight,
                    weight = %total_weight,
                    "pick-up point rejected by weight limit"
                );
            }
            allowed
        })
        .map(|(id, entry)| DeliveryOption {
            id: id.clone(),
            name: entry.location.clone(),
            currency: settings.currency.clone(),
            cost: delivery_cost(entry, order_total),
            est_delivery: String::new(),
        })
        .collect();

    if options.is_empty() {
        return unavailable(localizer);
    }

    tracing::debug!(count = options.len(), "pick-up points available");
    Quote::Available(options)
}

/// A zero ceiling means the entry has no weight limit; otherwise the limit
/// is inclusive.
#[must_use]
pub fn is_allowed_weight(entry: &RateEntry, weight: Decimal) -> bool {
    entry.max_weight.is_zero() || weight <= entry.max_weight
}

/// Price charged by `entry` for an order of `order_total`.
///
/// Delivery is free once the order total reaches the threshold
/// (`order_total >= free_threshold`); a zero threshold never makes it free.
#[must_use]
pub fn delivery_cost(entry: &RateEntry, order_total: Decimal) -> Decimal {
    if entry.free_threshold.is_zero() || order_total < entry.free_threshold {
        entry.cost
    } else {
        Decimal::ZERO
    }
}

fn unavailable<L>(localizer: &L) -> Quote
where
    L: Localizer + ?Sized,
{
    Quote::Unavailable {
        message: localizer.translate(messages::NO_SUITABLE_POINTS),
    }
}

#[cfg(test)]
#[path = "evaluate_test.rs"]
mod tests;
