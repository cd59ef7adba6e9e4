//! Decoding scenarios, one per list flavour plus the aggregate record.

use std::fmt::Debug;

use anyhow::{Context, Result};
use serde::Serialize;
use splitconf_config::Settings;
use splitconf_decode::Decoder;
use splitconf_decode::hooks::TextUnmarshallerHook;
use splitconf_list_dot::{DotSeparatedStringList, DotSeparatedStringListHook};
use splitconf_list_semicolon::SemicolonSeparatedStringList;
use tracing::info;

use crate::config::{Config, all_in_one_hook};

/// How decoded values are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Rust debug representation.
    Debug,
    /// Compact JSON.
    Json,
}

fn render<T: Debug + Serialize>(label: &str, value: &T, format: OutputFormat) -> Result<String> {
    let body = match format {
        OutputFormat::Debug => format!("{value:?}"),
        OutputFormat::Json => serde_json::to_string(value)?,
    };
    Ok(format!("{label}: {body}"))
}

/// Decodes a dot separated list with its dedicated hook.
pub fn dot_separated(format: OutputFormat) -> Result<String> {
    let mut settings = Settings::new();
    settings.set("key", "foo.bar.baz.bat")?;

    let decoder = Decoder::new().with_hook(Box::new(DotSeparatedStringListHook::new()));
    let list: DotSeparatedStringList = settings
        .unmarshal_key_with("key", &decoder)
        .context("failed to decode dot separated list")?;

    render(
        "Dot separated list (DotSeparatedStringListHook)",
        &list,
        format,
    )
}

/// Decodes a semicolon separated list through its text unmarshaller.
pub fn semicolon_separated(format: OutputFormat) -> Result<String> {
    let mut settings = Settings::new();
    settings.set("key", "foo;bar;baz;bat")?;

    let decoder = Decoder::new().with_hook(Box::new(TextUnmarshallerHook));
    let list: SemicolonSeparatedStringList = settings
        .unmarshal_key_with("key", &decoder)
        .context("failed to decode semicolon separated list")?;

    render(
        "Semicolon separated list (TextUnmarshallerHook)",
        &list,
        format,
    )
}

/// Decodes a comma separated list with the default hooks.
pub fn comma_separated(format: OutputFormat) -> Result<String> {
    let mut settings = Settings::new();
    settings.set("key", "foo,bar,baz,bat")?;

    let list: Vec<String> = settings
        .unmarshal_key("key")
        .context("failed to decode comma separated list")?;

    render("Comma separated list (default hooks)", &list, format)
}

/// Decodes all three flavours into one [`Config`].
pub fn all_in_one(format: OutputFormat) -> Result<String> {
    let mut settings = Settings::new();
    settings.set("comma", "foo,bar,baz,bat")?;
    settings.set("dot", "foo.bar.baz.bat")?;
    settings.set("semicolon", "foo;bar;baz;bat")?;

    let decoder = Decoder::new().with_hook(Box::new(all_in_one_hook()));
    let config: Config = settings
        .unmarshal_with(&decoder)
        .context("failed to decode config")?;

    render("All in one config struct", &config, format)
}

/// Runs every scenario in order.
pub fn run_all(format: OutputFormat) -> Result<Vec<String>> {
    let scenarios: [fn(OutputFormat) -> Result<String>; 4] =
        [dot_separated, semicolon_separated, comma_separated, all_in_one];

    let lines = scenarios
        .iter()
        .map(|scenario| scenario(format))
        .collect::<Result<Vec<_>>>()?;
    info!(scenarios = lines.len(), "decoded all scenarios");

    Ok(lines)
}
