use anyhow::Result;
use clap::Parser;
use overhear::cli::{Cli, Commands};
use overhear::config::{Config, default_config_path};
use overhear::diagnostics::check_dependencies;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        None => {
            let mut config = load_config(cli.config.as_deref())?;
            apply_cli_overrides(&mut config, &cli);
            overhear::app::run_listen_command(config, cli.json, cli.quiet, cli.verbose).await?;
        }
        Some(Commands::Check) => {
            let config = load_config(cli.config.as_deref())?;
            check_dependencies(&config);
        }
    }

    Ok(())
}

/// Load configuration from file or use defaults.
///
/// Priority order:
/// 1. Custom config path from CLI (--config)
/// 2. Default config path (~/.config/overhear/config.toml)
/// 3. Built-in defaults with environment variable overrides
fn load_config(custom_path: Option<&std::path::Path>) -> Result<Config> {
    let config = if let Some(path) = custom_path {
        Config::load(path)?
    } else {
        Config::load_or_default(&default_config_path())?
    };

    Ok(config.with_env_overrides())
}

/// CLI flags win over the config file and environment.
fn apply_cli_overrides(config: &mut Config, cli: &Cli) {
    if let Some(chunks) = cli.chunks {
        config.recording.total_chunks = chunks;
    }
    if let Some(duration) = cli.chunk_duration {
        config.recording.chunk_duration_secs = duration;
    }
    if let Some(consumers) = cli.consumers {
        config.recording.consumer_count = consumers;
    }
    if let Some(ref dir) = cli.chunk_dir {
        config.recording.chunk_dir = dir.clone();
    }
}
