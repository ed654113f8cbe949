use super::*;

#[test]
fn parses_quote_command() {
    let cli = Cli::try_parse_from([
        "pickup-cli", "quote", "--country", "RUS", "--region", "MOW", "--weight", "2.5", "--total",
        "1000",
    ])
    .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Quote {
            ref country,
            region: Some(ref region),
            city: None,
            unit: WeightUnit::Kilogram,
            ..
        } if country == "RUS" && region == "MOW"
    ));
}

#[test]
fn parses_quote_weight_unit() {
    let cli = Cli::try_parse_from([
        "pickup-cli", "quote", "--country", "RUS", "--weight", "500", "--unit", "g", "--total", "10",
    ])
    .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Quote {
            unit: WeightUnit::Gram,
            region: None,
            ..
        }
    ));
}

#[test]
fn rejects_unknown_weight_unit() {
    let result = Cli::try_parse_from([
        "pickup-cli", "quote", "--country", "RUS", "--weight", "1", "--unit", "stone", "--total",
        "10",
    ]);
    assert!(result.is_err());
}

#[test]
fn parses_normalize_with_policy() {
    let cli = Cli::try_parse_from(["pickup-cli", "normalize", "submission.yaml", "--policy", "drop"])
        .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Normalize {
            ref input,
            policy: Some(EmptyLocationPolicy::Drop),
            json: false,
            output: None,
        } if input == Path::new("submission.yaml")
    ));
}

#[test]
fn normalize_policy_defaults_to_config() {
    let cli = Cli::try_parse_from(["pickup-cli", "normalize", "submission.yaml", "--json"])
        .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::Normalize {
            policy: None,
            json: true,
            ..
        }
    ));
}

#[test]
fn parses_render_form_with_nested_namespace() {
    let cli = Cli::try_parse_from([
        "pickup-cli",
        "render-form",
        "--namespace",
        "shipping",
        "--namespace",
        "pickup",
        "--output",
        "form.html",
    ])
    .expect("expected valid cli args");

    assert!(matches!(
        cli.command,
        Commands::RenderForm {
            ref namespace,
            overrides: None,
            output: Some(_),
        } if namespace == &["shipping", "pickup"]
    ));
}

#[test]
fn parses_regions_command() {
    let cli =
        Cli::try_parse_from(["pickup-cli", "regions", "RUS"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Regions { ref country } if country == "RUS"));
}

#[test]
fn global_paths_apply_after_subcommand() {
    let cli = Cli::try_parse_from([
        "pickup-cli",
        "regions",
        "RUS",
        "--reference",
        "ref.yaml",
        "--locale",
        "ru_RU",
    ])
    .expect("expected valid cli args");
    assert_eq!(cli.reference.as_deref(), Some(Path::new("ref.yaml")));
    assert_eq!(cli.locale.as_deref(), Some("ru_RU"));
}

#[test]
fn missing_subcommand_is_an_error() {
    assert!(Cli::try_parse_from(["pickup-cli"]).is_err());
}
