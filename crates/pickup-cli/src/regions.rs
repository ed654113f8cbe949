use std::fmt::Write as _;

use pickup_settings::{region_lookup, RegionLookup, StaticReferenceData};

use crate::Context;

pub(crate) fn run_regions(ctx: &Context, country: &str) -> anyhow::Result<()> {
    let reference = StaticReferenceData::load(&ctx.reference_path)?;
    let lookup = region_lookup(&reference, country.trim());
    if lookup.order.is_empty() {
        tracing::info!(country, "country has no regions");
    }
    print!("{}", format_lookup(&lookup));
    Ok(())
}

pub(crate) fn format_lookup(lookup: &RegionLookup) -> String {
    let mut out = String::new();
    for code in &lookup.order {
        let name = lookup.options.get(code).map_or("", String::as_str);
        let _ = writeln!(out, "{code}\t{name}");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lists_regions_in_lookup_order() {
        let reference = StaticReferenceData::from_yaml(
            "countries:\n  - iso3: RUS\n    name: Russia\n    regions:\n      - {code: SPE, name: Saint Petersburg}\n      - {code: MOW, name: Moscow}\n",
        )
        .unwrap();
        let lookup = region_lookup(&reference, "RUS");
        assert_eq!(format_lookup(&lookup), "SPE\tSaint Petersburg\nMOW\tMoscow\n");
    }

    #[test]
    fn empty_lookup_prints_nothing() {
        assert_eq!(format_lookup(&RegionLookup::default()), "");
    }
}
