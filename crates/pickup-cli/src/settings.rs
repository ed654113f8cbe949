use std::path::Path;

use anyhow::Context as _;
use pickup_core::{EmptyLocationPolicy, SettingsFile, SettingsProvider};
use pickup_settings::{normalize_settings, FormRenderer, Namespace, RawSettings, StaticReferenceData};

use crate::{write_output, Context};

/// Parses a settings submission. JSON is accepted as a subset of YAML.
pub(crate) fn parse_submission(content: &str) -> anyhow::Result<RawSettings> {
    Ok(serde_yaml::from_str(content)?)
}

fn read_submission(path: &Path) -> anyhow::Result<RawSettings> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    parse_submission(&content).with_context(|| format!("failed to parse {}", path.display()))
}

pub(crate) fn run_normalize(
    ctx: &Context,
    input: &Path,
    policy: EmptyLocationPolicy,
    json: bool,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let raw = read_submission(input)?;
    let settings = match normalize_settings(&raw, policy) {
        Ok(settings) => settings,
        Err(e) if e.is_validation() => {
            tracing::debug!(error = %e, "submission rejected");
            anyhow::bail!("{}", e.user_message(&ctx.catalog));
        }
        Err(e) => return Err(e.into()),
    };

    tracing::info!(rates = settings.rate.len(), %policy, "settings normalized");

    let rendered = if json {
        let mut text = serde_json::to_string_pretty(&settings)?;
        text.push('\n');
        text
    } else {
        serde_yaml::to_string(&settings)?
    };
    write_output(output, &rendered)
}

/// Empty `segments` means no namespace.
pub(crate) fn namespace_from_segments(segments: Vec<String>) -> Option<Namespace> {
    if segments.is_empty() {
        None
    } else {
        Some(Namespace::Path(segments))
    }
}

pub(crate) fn run_render_form(
    ctx: &Context,
    overrides: Option<&Path>,
    namespace: Vec<String>,
    output: Option<&Path>,
) -> anyhow::Result<()> {
    let settings = SettingsFile::new(&ctx.settings_path).settings()?;
    let reference = StaticReferenceData::load(&ctx.reference_path)?;
    let overrides = overrides.map(read_submission).transpose()?;
    let namespace = namespace_from_segments(namespace);

    let renderer = FormRenderer::new(ctx.region_lookup_url.clone())?;
    let html = renderer.render(
        &settings,
        overrides.as_ref(),
        namespace.as_ref(),
        &reference,
        &ctx.catalog,
    )?;
    write_output(output, &html)
}
