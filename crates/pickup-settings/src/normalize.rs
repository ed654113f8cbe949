//! Validation and normalization of submitted settings before the host
//! persists them.

use pickup_core::{EmptyLocationPolicy, RateEntry, RateId, RateTable, Settings, Zone};
use rust_decimal::Decimal;

use crate::error::SettingsError;
use crate::submission::{RawScalar, RawSettings};

/// Turns a form submission into typed settings.
///
/// Numbers are parsed permissively with [`parse_amount`]. Rows with an empty
/// location are handled according to `policy`. Normalizing the result of a
/// previous normalization yields the same settings.
///
/// # Errors
///
/// Returns [`SettingsError::EmptyLocation`] under [`EmptyLocationPolicy::Reject`],
/// and [`SettingsError::InvalidRateId`] / [`SettingsError::DuplicateRateId`]
/// for unusable row ids.
pub fn normalize_settings(
    raw: &RawSettings,
    policy: EmptyLocationPolicy,
) -> Result<Settings, SettingsError> {
    let currency = raw
        .currency
        .as_deref()
        .map(str::trim)
        .unwrap_or_default()
        .to_string();

    let rate_zone = raw
        .rate_zone
        .as_ref()
        .map(|zone| Zone {
            country: zone.country.as_deref().map(str::trim).unwrap_or_default().to_string(),
            region: zone.region.as_deref().map(str::trim).unwrap_or_default().to_string(),
        })
        .unwrap_or_default();

    let mut rate = RateTable::new();
    for (key, row) in raw.rate.iter().flat_map(|rates| rates.iter()) {
        let location = row.location.as_deref().map(str::trim).unwrap_or_default();
        if location.is_empty() {
            match policy {
                EmptyLocationPolicy::Reject => {
                    return Err(SettingsError::EmptyLocation {
                        rate_id: key.clone(),
                    });
                }
                EmptyLocationPolicy::Drop => {
                    tracing::debug!(rate_id = %key, "dropping pick-up point with empty location");
                    continue;
                }
            }
        }

        let id = RateId::new(key.as_str()).map_err(|_| SettingsError::InvalidRateId(key.clone()))?;
        let entry = RateEntry {
            location: location.to_string(),
            cost: amount(row.cost.as_ref()),
            max_weight: amount(row.maxweight.as_ref()),
            free_threshold: amount(row.free.as_ref()),
        };

        rate.insert(id, entry)
            .map_err(|_| SettingsError::DuplicateRateId(key.trim().to_string()))?;
    }

    Ok(Settings {
        currency,
        rate_zone,
        rate,
    })
}

fn amount(value: Option<&RawScalar>) -> Decimal {
    value.map_or(Decimal::ZERO, |v| parse_amount(&v.as_text()))
}

/// Parses a user-typed amount.
///
/// Accepts `,` as the fraction separator and reads the longest numeric
/// prefix (`"12,5 kg"` is `12.5`). Negative, unparsable, or empty input
/// yields zero. The result carries no trailing fractional zeros.
#[must_use]
pub fn parse_amount(raw: &str) -> Decimal {
    let text = raw.trim().replace(',', ".");
    let Some(prefix) = numeric_prefix(&text) else {
        return Decimal::ZERO;
    };

    let parsed = if prefix.contains('e') {
        Decimal::from_scientific(&prefix)
    } else {
        prefix.parse::<Decimal>()
    };

    match parsed {
        Ok(value) if value.is_sign_positive() && !value.is_zero() => value.normalize(),
        _ => Decimal::ZERO,
    }
}

/// Longest leading `[+-]digits[.digits][e[+-]digits]` run, rewritten so the
/// decimal parser accepts it (`".5"` becomes `"0.5"`, `"5."` becomes `"5"`).
fn numeric_prefix(text: &str) -> Option<String> {
    let bytes = text.as_bytes();
    let mut i = 0usize;
    let mut out = String::new();

    if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
        if bytes[i] == b'-' {
            out.push('-');
        }
        i += 1;
    }

    let int_start = i;
    while i < bytes.len() && bytes[i].is_ascii_digit() {
        i += 1;
    }
    let int_digits = &text[int_start..i];

    let mut frac_digits = "";
    if i < bytes.len() && bytes[i] == b'.' {
        let frac_start = i + 1;
        let mut j = frac_start;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        frac_digits = &text[frac_start..j];
        i = j;
    }

    if int_digits.is_empty() && frac_digits.is_empty() {
        return None;
    }

    out.push_str(if int_digits.is_empty() { "0" } else { int_digits });
    if !frac_digits.is_empty() {
        out.push('.');
        out.push_str(frac_digits);
    }

    if i < bytes.len() && (bytes[i] == b'e' || bytes[i] == b'E') {
        let mut j = i + 1;
        if j < bytes.len() && (bytes[j] == b'+' || bytes[j] == b'-') {
            j += 1;
        }
        let exp_digits_start = j;
        while j < bytes.len() && bytes[j].is_ascii_digit() {
            j += 1;
        }
        if j > exp_digits_start {
            out.push('e');
            out.push_str(&text[i + 1..j]);
        }
    }

    Some(out)
}

#[cfg(test)]
#[path = "normalize_test.rs"]
mod tests;
