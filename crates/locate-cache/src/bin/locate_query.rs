use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use chrono::{DateTime, Local};
use clap::Parser;
use locate_cache::{load_locate_config, parse_query, CommandBackend, LocateBackend, LocateEngine};

/// Query the locate index the way the launcher does.
#[derive(Debug, Parser)]
#[command(name = "locate-query", version)]
struct Cli {
    /// Print the index database modification time and exit.
    #[arg(long)]
    mtime: bool,

    /// Print the parsed query to stderr.
    #[arg(long)]
    verbose: bool,

    /// Emit results as JSON lines.
    #[arg(long)]
    json: bool,

    /// JSON config file. Defaults to `<config dir>/locate-cache/config.json`.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[arg(required_unless_present = "mtime")]
    pattern: Option<String>,
}

fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("locate-cache")
        .join("config.json")
}

fn main() -> anyhow::Result<ExitCode> {
    env_logger::init();
    // Multibyte wildcards in fnmatch(3) follow the process locale.
    // SAFETY: called before any other thread exists.
    unsafe {
        libc::setlocale(libc::LC_CTYPE, c"".as_ptr());
    }
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(default_config_path);
    let config = load_locate_config(&config_path)
        .with_context(|| format!("loading config {}", config_path.display()))?;

    if cli.mtime {
        return match CommandBackend::new(&config).database_mtime() {
            Ok(mtime) => {
                let local: DateTime<Local> = mtime.into();
                println!("{}", local.format("%F %T %z"));
                Ok(ExitCode::SUCCESS)
            }
            Err(error) => {
                log::debug!("mtime probe failed: {error}");
                eprintln!("could not find any database");
                Ok(ExitCode::FAILURE)
            }
        };
    }

    let raw = cli.pattern.unwrap_or_default();
    if cli.verbose {
        let query = parse_query(&raw);
        eprintln!("pattern={}", query.pattern());
        eprintln!("base_name={}", query.locate_query.base_name_only);
        eprintln!("ignore_case={}", query.locate_query.ignore_case);
        eprintln!("absolute={}", query.absolute);
        eprintln!("file_type_filter={}", query.file_type_filter.as_str());
    }

    let mut engine = LocateEngine::from_config(&config);
    let matches = engine
        .query_now(&raw)
        .with_context(|| format!("querying {raw:?}"))?;
    for found in &matches {
        if cli.json {
            println!("{}", serde_json::to_string(found)?);
        } else {
            println!("{}", found.path);
        }
    }
    Ok(ExitCode::SUCCESS)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pattern_is_required_without_mtime() {
        let error = Cli::try_parse_from(["locate-query"]).expect_err("missing pattern");
        assert_eq!(error.kind(), clap::error::ErrorKind::MissingRequiredArgument);
        assert_eq!(error.exit_code(), 2);
    }

    #[test]
    fn mtime_needs_no_pattern() {
        let cli = Cli::try_parse_from(["locate-query", "--mtime"]).expect("parse");
        assert!(cli.mtime);
        assert!(cli.pattern.is_none());
    }

    #[test]
    fn pattern_after_separator() {
        let cli = Cli::try_parse_from(["locate-query", "--", "--verbose"]).expect("parse");
        assert!(!cli.verbose);
        assert_eq!(cli.pattern.as_deref(), Some("--verbose"));
    }
}
