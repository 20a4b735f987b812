//! Configuration management commands.

use std::fs;

use anyhow::{bail, Context as _, Result};
use store_core::config::StoreConfig;

use super::{ConfigArgs, ConfigCommand};
use crate::context::Context;

/// Run the config command.
pub fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { path, force } => init_config(&path, force, ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }
    ctx.output.kv(
        "tax_rate",
        &format!(
            "{} bps ({:.2}%)",
            ctx.config.tax_rate_bps,
            f64::from(ctx.config.tax_rate_bps) / 100.0
        ),
    );
    ctx.output.kv("currency", ctx.config.currency.code());
    match &ctx.config.seed_path {
        Some(path) => ctx.output.kv("seed", &path.display().to_string()),
        None => ctx.output.kv("seed", "(bundled)"),
    }
    Ok(())
}

fn init_config(path: &str, force: bool, ctx: &Context) -> Result<()> {
    let target = ctx.resolve_path(path);
    if target.exists() && !force {
        bail!(
            "Config file already exists: {} (use --force to overwrite)",
            target.display()
        );
    }

    let content = StoreConfig::default().to_toml()?;
    fs::write(&target, content)
        .with_context(|| format!("Failed to write config file: {}", target.display()))?;

    ctx.output
        .success(&format!("Created {}", target.display()));
    Ok(())
}
