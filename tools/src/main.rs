//! cartel-schema: create the telemetry tables for the cartel simulation.
//!
//! Usage:
//!   cartel-schema --db cartel_simulation.db
//!   cartel-schema --config store.json --verify
//!   cartel-schema --db run.db --no-foreign-keys

use anyhow::{bail, Result};
use cartel_telemetry_core::{
    config::StoreConfig,
    initializer::{initialize_and_verify, initialize_schema},
    schema::TABLES,
};
use std::env;

const USAGE: &str =
    "usage: cartel-schema --db <path> [--config <file.json>] [--verify] [--no-foreign-keys]";

const SUCCESS_LINE: &str = "Database schema for cartel simulation created successfully.";

#[derive(Debug, Default, PartialEq)]
struct CliArgs {
    db: Option<String>,
    config: Option<String>,
    verify: bool,
    no_foreign_keys: bool,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().skip(1).collect();
    let cli = parse_args(&args)?;
    for line in run(&cli)? {
        println!("{line}");
    }
    Ok(())
}

/// Initialize the store and return the lines to print.
fn run(cli: &CliArgs) -> Result<Vec<String>> {
    let config = build_config(cli)?;

    log::info!("initializing telemetry schema at {}", config.db_path.display());
    if cli.verify {
        initialize_and_verify(&config)?;
    } else {
        initialize_schema(&config)?;
    }

    let mut lines = vec![SUCCESS_LINE.to_string()];
    if cli.verify {
        lines.push(format!("Schema verified: {} tables.", TABLES.len()));
    }
    Ok(lines)
}

/// Every argument must be a known flag; value flags need a value that is not itself a flag.
fn parse_args(args: &[String]) -> Result<CliArgs> {
    let mut cli = CliArgs::default();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--db" => cli.db = Some(flag_value(iter.next(), "--db")?),
            "--config" => cli.config = Some(flag_value(iter.next(), "--config")?),
            "--verify" => cli.verify = true,
            "--no-foreign-keys" => cli.no_foreign_keys = true,
            other => bail!("unrecognized argument '{other}'\n{USAGE}"),
        }
    }
    Ok(cli)
}

fn flag_value(value: Option<&String>, flag: &str) -> Result<String> {
    match value {
        Some(v) if !v.starts_with("--") => Ok(v.clone()),
        _ => bail!("{flag} requires a value\n{USAGE}"),
    }
}

/// Config file first, then command-line overrides.
fn build_config(cli: &CliArgs) -> Result<StoreConfig> {
    let mut config = match (&cli.config, &cli.db) {
        (Some(path), _) => StoreConfig::load(path)?,
        (None, Some(db)) => StoreConfig::new(db),
        (None, None) => bail!("no database path given\n{USAGE}"),
    };
    if let Some(db) = &cli.db {
        config.db_path = db.into();
    }
    if cli.no_foreign_keys {
        config.foreign_keys = false;
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use cartel_telemetry_core::store::TelemetryStore;
    use std::{fs, path::PathBuf};

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn parses_all_flags() {
        let cli = parse_args(&args(&[
            "--db", "run.db", "--config", "store.json", "--verify", "--no-foreign-keys",
        ]))
        .unwrap();
        assert_eq!(
            cli,
            CliArgs {
                db: Some("run.db".into()),
                config: Some("store.json".into()),
                verify: true,
                no_foreign_keys: true,
            }
        );
    }

    #[test]
    fn db_followed_by_a_flag_is_rejected() {
        let err = parse_args(&args(&["--db", "--verify"])).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("--db requires a value"), "unexpected error: {msg}");
        assert!(msg.contains(USAGE));
    }

    #[test]
    fn db_without_value_is_rejected() {
        let err = parse_args(&args(&["--db"])).unwrap_err();
        assert!(err.to_string().contains("--db requires a value"));
    }

    #[test]
    fn unknown_flag_is_rejected() {
        let err = parse_args(&args(&["--db", "ok.db", "--bogus"])).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("unrecognized argument '--bogus'"), "unexpected error: {msg}");
        assert!(msg.contains(USAGE));
    }

    #[test]
    fn missing_path_is_a_usage_error() {
        let cli = parse_args(&args(&["--verify"])).unwrap();
        let err = build_config(&cli).unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("no database path given"), "unexpected error: {msg}");
        assert!(msg.contains(USAGE));
        assert!(run(&cli).is_err(), "main would exit non-zero");
    }

    #[test]
    fn db_flag_overrides_config_file() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("store.json");
        fs::write(&file, r#"{"db_path": "from-file.db", "wal": false}"#).unwrap();

        let cli = CliArgs {
            db: Some("from-flag.db".into()),
            config: Some(file.to_string_lossy().into_owned()),
            ..CliArgs::default()
        };
        let config = build_config(&cli).unwrap();
        assert_eq!(config.db_path, PathBuf::from("from-flag.db"));
        assert!(!config.wal, "other file settings are kept");
    }

    #[test]
    fn no_foreign_keys_flag_takes_effect() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("nofk.db");
        let cli = CliArgs {
            db: Some(db.to_string_lossy().into_owned()),
            no_foreign_keys: true,
            ..CliArgs::default()
        };

        let config = build_config(&cli).unwrap();
        assert!(!config.foreign_keys);

        run(&cli).unwrap();
        let store = TelemetryStore::open(&config).unwrap();
        assert!(!store.foreign_keys_enabled().unwrap());
    }

    #[test]
    fn success_prints_single_confirmation_line() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("cartel_simulation.db");
        let cli = CliArgs {
            db: Some(db.to_string_lossy().into_owned()),
            ..CliArgs::default()
        };

        let lines = run(&cli).unwrap();
        assert_eq!(
            lines,
            vec!["Database schema for cartel simulation created successfully.".to_string()]
        );
        assert!(db.exists());
    }

    #[test]
    fn verify_adds_table_count_line() {
        let dir = tempfile::tempdir().unwrap();
        let db = dir.path().join("verified.db");
        let cli = parse_args(&args(&["--db", db.to_str().unwrap(), "--verify"])).unwrap();

        let lines = run(&cli).unwrap();
        assert_eq!(
            lines,
            vec![
                "Database schema for cartel simulation created successfully.".to_string(),
                "Schema verified: 7 tables.".to_string(),
            ]
        );
    }
}
