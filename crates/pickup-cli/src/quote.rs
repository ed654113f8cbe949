use std::fmt::Write as _;

use pickup_core::{Address, Quote, SettingsFile, WeightUnit};
use pickup_rates::{RegionalPickup, ShippingRequest};
use rust_decimal::Decimal;

use crate::Context;

pub(crate) fn build_request(
    country: String,
    region: Option<String>,
    city: Option<String>,
    weight: Decimal,
    unit: WeightUnit,
    total: Decimal,
) -> ShippingRequest {
    ShippingRequest {
        address: Address {
            country: Some(country),
            region,
            city,
            ..Address::default()
        },
        weight,
        weight_unit: unit,
        order_total: total,
    }
}

pub(crate) fn run_quote(ctx: &Context, request: &ShippingRequest) -> anyhow::Result<()> {
    let pickup = RegionalPickup::new(SettingsFile::new(&ctx.settings_path), &ctx.catalog);
    let quote = pickup.calculate(request)?;
    print!("{}", format_quote(&quote));
    Ok(())
}

/// One tab-separated line per option (`id`, `name`, `rate currency`), or
/// the unavailability message.
pub(crate) fn format_quote(quote: &Quote) -> String {
    match quote {
        Quote::Available(options) => {
            let mut out = String::new();
            for option in options {
                let _ = writeln!(
                    out,
                    "{}\t{}\t{} {}",
                    option.id, option.name, option.cost, option.currency
                );
            }
            out
        }
        Quote::Unavailable { message } => format!("{message}\n"),
    }
}

#[cfg(test)]
mod tests {
    use pickup_core::{DeliveryOption, RateId};

    use super::*;

    #[test]
    fn available_quote_lists_options_in_order() {
        let quote = Quote::Available(vec![
            DeliveryOption {
                id: RateId::new("a1").unwrap(),
                name: "Point A".to_string(),
                currency: "RUB".to_string(),
                cost: Decimal::new(200, 0),
                est_delivery: String::new(),
            },
            DeliveryOption {
                id: RateId::new("b2").unwrap(),
                name: "Point B".to_string(),
                currency: "RUB".to_string(),
                cost: Decimal::ZERO,
                est_delivery: String::new(),
            },
        ]);
        assert_eq!(
            format_quote(&quote),
            "a1\tPoint A\t200 RUB\nb2\tPoint B\t0 RUB\n"
        );
    }

    #[test]
    fn unavailable_quote_prints_message() {
        let quote = Quote::Unavailable {
            message: "No suitable pick-up points".to_string(),
        };
        assert_eq!(format_quote(&quote), "No suitable pick-up points\n");
    }

    #[test]
    fn build_request_keeps_unit_and_address() {
        let request = build_request(
            "RUS".to_string(),
            Some("MOW".to_string()),
            None,
            Decimal::new(500, 0),
            WeightUnit::Gram,
            Decimal::new(1000, 0),
        );
        assert_eq!(request.address.country.as_deref(), Some("RUS"));
        assert_eq!(request.address.region.as_deref(), Some("MOW"));
        assert_eq!(request.weight_unit, WeightUnit::Gram);
    }
}
