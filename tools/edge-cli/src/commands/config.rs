//! Configuration inspection commands.

use anyhow::{bail, Result};
use contacts::LINK_TITLE_BINDING;
use edge_core::Bindings;
use edge_observability::{LogFormat, LogLevel};
use edge_security::SignatureClassifier;

use super::{ConfigArgs, ConfigCommand};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx).await,
        ConfigCommand::Validate => validate_config(ctx).await,
    }
}

async fn show_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Current Configuration");

    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    match ctx.config_path {
        Some(ref path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    // App section
    ctx.output.info("");
    ctx.output.info("[app]");
    ctx.output.kv("name", &ctx.config.app.name);
    ctx.output.kv("spa_mode", &ctx.config.app.spa_mode.to_string());

    // Bindings, sorted for stable output
    if !ctx.config.bindings.is_empty() {
        ctx.output.info("");
        ctx.output.info("[bindings]");
        let mut names: Vec<&String> = ctx.config.bindings.keys().collect();
        names.sort();
        for name in names {
            ctx.output.kv(name, &ctx.config.bindings[name]);
        }
    }

    // Crawlers
    ctx.output.info("");
    ctx.output.info("[crawlers]");
    for signature in &ctx.config.crawlers.signatures {
        ctx.output.list_item(signature);
    }

    // Logging
    ctx.output.info("");
    ctx.output.info("[logging]");
    ctx.output.kv("level", &ctx.config.logging.level);
    ctx.output.kv("format", &ctx.config.logging.format);

    Ok(())
}

async fn validate_config(ctx: &Context) -> Result<()> {
    ctx.output.header("Validating configuration");

    let mut errors: Vec<String> = Vec::new();
    let mut warnings: Vec<String> = Vec::new();

    if let Err(e) = ctx.config.validate() {
        errors.push(e.to_string());
    } else if let Err(e) = SignatureClassifier::from_config(&ctx.config.crawlers) {
        errors.push(format!("crawlers.signatures: {}", e));
    }

    if ctx.config.crawlers.signatures.is_empty() {
        warnings.push("crawlers.signatures is empty; crawlers will get streamed responses".to_string());
    }

    // Checked against the resolved bindings so EDGE_* overrides count.
    if ctx.bindings().get(LINK_TITLE_BINDING).is_none() {
        errors.push(format!(
            "binding '{}' is not set; every page load would fail",
            LINK_TITLE_BINDING
        ));
    }

    if ctx.config.logging.level.parse::<LogLevel>().is_err() {
        warnings.push(format!(
            "logging.level '{}' is unknown; using info",
            ctx.config.logging.level
        ));
    }

    if ctx.config.logging.format.parse::<LogFormat>().is_err() {
        warnings.push(format!(
            "logging.format '{}' is unknown; using json",
            ctx.config.logging.format
        ));
    }

    // Print results
    if errors.is_empty() && warnings.is_empty() {
        ctx.output.success("Configuration is valid");
        return Ok(());
    }

    for error in &errors {
        ctx.output.error(&format!("Error: {}", error));
    }

    for warning in &warnings {
        ctx.output.warn(&format!("Warning: {}", warning));
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }

    ctx.output.success("Configuration is valid (with warnings)");

    Ok(())
}
