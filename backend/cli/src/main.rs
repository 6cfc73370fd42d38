mod session;

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};
use tokio::io::BufReader;
use tracing::info;

use devconsole_commands::{build_default_console, ConsoleOutput};
use devconsole_config::{
    check_config, config_dir, config_file_path, load_unvalidated_with, write_config, ConsoleConfig,
};
use devconsole_logging::{init_logger, LoggerOptions};

use session::ConsoleSession;

#[derive(Parser)]
#[command(name = "devconsole")]
#[command(about = "Developer console: route prefixed text lines to commands")]
#[command(version)]
struct Cli {
    /// Config file (default: ~/.devconsole/config.yaml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override the command prefix
    #[arg(long, global = true, allow_hyphen_values = true)]
    prefix: Option<String>,

    /// Override the log level
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Read lines from stdin until EOF or quit (default)
    Repl,
    /// Dispatch each given line once and exit
    Run {
        #[arg(required = true)]
        lines: Vec<String>,
    },
    /// Write a config file with default values
    InitConfig {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let mut cli = Cli::parse();
    let config_path = cli
        .config
        .clone()
        .unwrap_or_else(|| config_file_path(&config_dir()));

    match cli.command.take() {
        Some(Commands::InitConfig { force }) => init_config(&config_path, force).await,
        Some(Commands::Run { lines }) => {
            let session = start_session(&cli, &config_path).await?;
            for line in &lines {
                session.handle_line(line);
                if session.should_quit() {
                    break;
                }
            }
            Ok(())
        }
        Some(Commands::Repl) | None => {
            let session = start_session(&cli, &config_path).await?;
            session.run(BufReader::new(tokio::io::stdin())).await
        }
    }
}

/// Load config, set up logging and wire the built-in commands.
async fn start_session(cli: &Cli, config_path: &Path) -> Result<ConsoleSession> {
    let env: HashMap<String, String> = std::env::vars().collect();
    let config = resolve_config(cli, config_path, &env).await?;

    init_logger(&LoggerOptions {
        level: config.log_level().to_string(),
        json: config.log_json(),
        dir: config.log_dir().cloned(),
    });
    check_config(&config)?;

    let output = ConsoleOutput::stdout();
    let quit = Arc::new(AtomicBool::new(false));
    let console = build_default_console(config.prefix(), output.clone(), Arc::clone(&quit));
    Ok(ConsoleSession::new(console, output, quit, config.log_events()))
}

/// File, then env, then defaults, then CLI flags. Not yet validated.
async fn resolve_config(
    cli: &Cli,
    config_path: &Path,
    env: &HashMap<String, String>,
) -> Result<ConsoleConfig> {
    let mut config = load_unvalidated_with(config_path, env).await?;
    apply_cli_overrides(&mut config, cli);
    Ok(config)
}

fn apply_cli_overrides(config: &mut ConsoleConfig, cli: &Cli) {
    if let Some(prefix) = &cli.prefix {
        config.prefix = Some(prefix.clone());
    }
    if let Some(level) = &cli.log_level {
        config.logging.get_or_insert_with(Default::default).level = Some(level.clone());
    }
}

async fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        bail!("Config already exists at {} (use --force to overwrite)", path.display());
    }
    let config = devconsole_config::apply_all_defaults(ConsoleConfig::default());
    write_config(&config, path).await?;
    info!(path = %path.display(), "Initialized config");
    println!("Wrote {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_run_with_global_overrides() {
        let cli = Cli::parse_from(["devconsole", "run", "/echo hi", "--prefix", "!"]);
        assert_eq!(cli.prefix.as_deref(), Some("!"));
        match cli.command {
            Some(Commands::Run { lines }) => assert_eq!(lines, vec!["/echo hi".to_string()]),
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn cli_overrides_config() {
        let cli = Cli::parse_from(["devconsole", "--prefix", "::", "--log-level", "debug"]);
        let mut config = devconsole_config::apply_all_defaults(ConsoleConfig::default());
        apply_cli_overrides(&mut config, &cli);
        assert_eq!(config.prefix(), "::");
        assert_eq!(config.log_level(), "debug");
        assert!(cli.command.is_none());
    }

    #[tokio::test]
    async fn cli_flag_overrides_invalid_env_level() {
        let dir = tempfile::tempdir().unwrap();
        let env = HashMap::from([("DEVCONSOLE_LOG_LEVEL".to_string(), "loud".to_string())]);
        let cli = Cli::parse_from(["devconsole", "--log-level", "debug"]);

        let config = resolve_config(&cli, &dir.path().join("config.yaml"), &env).await.unwrap();
        assert_eq!(config.log_level(), "debug");
        assert!(check_config(&config).is_ok());
    }

    #[tokio::test]
    async fn empty_prefix_flag_is_warned_about() {
        let dir = tempfile::tempdir().unwrap();
        let cli = Cli::parse_from(["devconsole", "--prefix", ""]);

        let config = resolve_config(&cli, &dir.path().join("config.yaml"), &HashMap::new())
            .await
            .unwrap();
        let report = check_config(&config).unwrap();
        assert_eq!(config.prefix(), "");
        assert_eq!(report.warnings[0].path, "prefix");
    }
}
