//! Configuration management commands.

use anyhow::{bail, Context as _, Result};

use super::{ConfigArgs, ConfigCommand};
use crate::config::CliConfig;
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
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
    ctx.output.kv("data_dir", &ctx.data_dir.display().to_string());

    let rendered = toml::to_string_pretty(&ctx.config).context("Failed to render config")?;
    println!("\n{}", rendered.trim_end());
    Ok(())
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let path = ctx.cwd.join("shop.toml");
    if path.exists() && !force {
        bail!(
            "{} already exists. Use --force to overwrite.",
            path.display()
        );
    }

    CliConfig::default().save(&path)?;
    ctx.output
        .success(&format!("Created {}", path.display()));
    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    let Some(path) = &ctx.config_path else {
        ctx.output
            .warn("No config file found; built-in defaults are in use");
        return Ok(());
    };

    // Loading the context already parsed and validated the file.
    let store = &ctx.config.store;
    ctx.output
        .success(&format!("{} is valid", path.display()));
    ctx.output.kv("currency", store.currency.code());
    ctx.output.kv("coupons", &store.coupons.len().to_string());
    ctx.output
        .kv("shipping options", &store.shipping_options.len().to_string());
    ctx.output.kv(
        "simulated delay",
        &format!("{} ms", store.checkout.simulated_delay_ms),
    );
    Ok(())
}
