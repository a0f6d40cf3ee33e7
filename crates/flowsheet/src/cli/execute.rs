//! Command execution logic.
//!
//! This module contains the implementation of all CLI commands.

use anyhow::{Context, Result, bail};
use std::path::Path;

use super::args::{ClassifyArgs, DotArgs, InitArgs, RenderArgs};
use crate::app::App;
use crate::config::{DEFAULT_CONFIG_FILE, FlowsheetConfig, Settings, SettingsOverrides};
use crate::output::{self, OutputMode};
use crate::render::Variant;

/// Resolve settings from an explicit config file, or `flowsheet.yaml` in the
/// working directory if there is one, under the given overrides.
pub async fn load_settings(
    config_path: Option<&Path>,
    overrides: SettingsOverrides,
) -> Result<Settings> {
    let config = match config_path {
        Some(path) => Some(FlowsheetConfig::load(path).await?),
        None => FlowsheetConfig::discover(&std::env::current_dir()?).await?,
    };
    Ok(Settings::resolve(config, overrides)?)
}

fn load_app(settings: Settings) -> Result<App> {
    let input = settings.input.clone();
    App::load(settings).with_context(|| format!("Failed to read steps from {}", input.display()))
}

/// Execute the render command
pub async fn execute_render(
    config_path: Option<&Path>,
    args: &RenderArgs,
    output_mode: OutputMode,
) -> Result<()> {
    let settings = load_settings(config_path, args.to_overrides()).await?;
    let engine = settings.graphviz();
    let app = load_app(settings)?;

    let images = app.render(&engine).await?;
    output::print_rendered(&images, output_mode)?;
    Ok(())
}

/// Execute the classify command
pub async fn execute_classify(
    config_path: Option<&Path>,
    args: &ClassifyArgs,
    output_mode: OutputMode,
) -> Result<()> {
    let settings = load_settings(config_path, args.source.to_overrides()).await?;
    let app = load_app(settings)?;

    output::print_summary(&app.summary(), output_mode)?;
    Ok(())
}

/// Execute the dot command
pub async fn execute_dot(
    config_path: Option<&Path>,
    args: &DotArgs,
    output_mode: OutputMode,
) -> Result<()> {
    let settings = load_settings(config_path, args.source.to_overrides()).await?;
    let app = load_app(settings)?;
    let variant = Variant::from(args.variant);
    let dot = app.dot(variant);

    match &args.output {
        Some(path) => {
            tokio::fs::write(path, &dot)
                .await
                .map_err(|source| crate::error::Error::OutputWriteFailed {
                    path: path.clone(),
                    source,
                })?;
            match output_mode {
                OutputMode::Json => output::print_json(&serde_json::json!({
                    "variant": variant,
                    "layout": variant.layout(),
                    "path": path.display().to_string(),
                }))?,
                OutputMode::Text => println!("Wrote {} DOT source to {}", variant, path.display()),
            }
        }
        None => match output_mode {
            OutputMode::Json => output::print_json(&serde_json::json!({
                "variant": variant,
                "layout": variant.layout(),
                "dot": dot,
            }))?,
            OutputMode::Text => print!("{dot}"),
        },
    }
    Ok(())
}

/// Execute the init command
pub async fn execute_init(
    config_path: Option<&Path>,
    args: &InitArgs,
    output_mode: OutputMode,
) -> Result<()> {
    let path = match config_path {
        Some(path) => path.to_path_buf(),
        None => std::env::current_dir()?.join(DEFAULT_CONFIG_FILE),
    };

    if !args.force && tokio::fs::try_exists(&path).await.unwrap_or(false) {
        bail!(
            "Config file {} already exists. Use --force to overwrite it.",
            path.display()
        );
    }

    FlowsheetConfig::starter().save(&path).await?;
    tracing::info!(path = %path.display(), "Wrote config file");

    match output_mode {
        OutputMode::Json => output::print_json(&serde_json::json!({
            "path": path.display().to_string(),
        }))?,
        OutputMode::Text => println!("Wrote {}", path.display()),
    }
    Ok(())
}
