use crate::{LoaderError, Result};

use clap::{arg, ArgAction, ArgMatches, Command};
use config::{Config, File};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;
use std::time::Duration;
use tracing::{info, Level};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::FmtSubscriber;

/// Environment variables read by the track inserter, mapped to configuration keys.
const POSTGRES_ENV: [(&str, &str); 5] = [
    ("POSTGRES_HOST", "database.host"),
    ("POSTGRES_PORT", "database.port"),
    ("POSTGRES_DB", "database.name"),
    ("POSTGRES_USER", "database.user"),
    ("POSTGRES_PASSWORD", "database.password"),
];

/// Environment variables read by the auto loader, mapped to configuration keys.
const DB_ENV: [(&str, &str); 5] = [
    ("DB_HOST", "database.host"),
    ("DB_PORT", "database.port"),
    ("DB_NAME", "database.name"),
    ("DB_USER", "database.user"),
    ("DB_PASSWORD", "database.password"),
];

/// Which binary the configuration is for; selects the defaults.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Mode {
    /// `generate-load`: continuous inserter fed from a track file.
    TrackInserter,

    /// `auto-load`: seed phase followed by optional continuous generation.
    AutoLoader,
}

/// Connection parameters.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DatabaseSettings {
    pub host: String,
    pub port: u16,
    pub name: String,
    pub user: String,
    pub password: String,
}

/// Loader configuration, built once at process start and passed down explicitly.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub database: DatabaseSettings,

    /// Log level: warn, info, debug or trace.
    pub log: String,

    /// Directory for rolling log files; logs go to stderr when unset.
    pub log_dir: Option<String>,

    /// Seed for the random number generator.
    pub seed: Option<u64>,

    /// Stop the unbounded loops after this many inserts.
    pub iterations: Option<u64>,

    /// CSV file with `Name` and `Composer` columns.
    pub track_file: String,

    /// Render table and column names as quoted CamelCase identifiers.
    pub quote_identifiers: bool,

    /// Restart the identifier sequences during the seed phase.
    pub reset_sequences: bool,

    /// Enter continuous generation without prompting.
    pub continuous: bool,

    pub pause_min_ms: u64,
    pub pause_max_ms: u64,
}

/// Initialise configuration from defaults and an optional file.
pub fn init_config(file: &str, mode: Mode) -> Result<Config> {
    info!("initialise configuration using {}", file);
    let mut settings = Config::default();

    settings.set_default("database.host", "localhost")?;
    settings.set_default("database.port", 5432_i64)?;
    settings.set_default("database.name", "chinook")?;
    settings.set_default("database.user", "postgres")?;
    settings.set_default("database.password", "postgres")?;
    settings.set_default("log", "info")?;
    settings.set_default("track_file", "/tmp/track.csv")?;
    settings.set_default("reset_sequences", true)?;
    settings.set_default("continuous", false)?;

    match mode {
        Mode::TrackInserter => {
            settings.set_default("quote_identifiers", true)?;
            settings.set_default("pause_min_ms", 100_i64)?;
            settings.set_default("pause_max_ms", 500_i64)?;
        }
        Mode::AutoLoader => {
            settings.set_default("quote_identifiers", false)?;
            settings.set_default("pause_min_ms", 3000_i64)?;
            settings.set_default("pause_max_ms", 8000_i64)?;
        }
    }

    settings.merge(File::with_name(file).required(false))?;
    Ok(settings)
}

/// Apply connection overrides from the environment.
///
/// `POSTGRES_*` variables are applied first, so `DB_*` variables win when both are set.
pub fn apply_env<F>(config: &mut Config, lookup: F) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    for (var, key) in POSTGRES_ENV.iter().chain(DB_ENV.iter()) {
        if let Some(value) = lookup(*var) {
            config.set(*key, value)?;
        }
    }
    Ok(())
}

/// Command line arguments shared by both binaries.
pub fn command(name: &'static str, about: &'static str) -> Command<'static> {
    Command::new(name)
        .version("0.1.0")
        .about(about)
        .arg(arg!(--config <FILE> "Configuration file").required(false))
        .arg(arg!(--host <HOST> "Database host").required(false))
        .arg(arg!(--port <PORT> "Database port").required(false))
        .arg(arg!(--dbname <NAME> "Database name").required(false))
        .arg(arg!(--user <USER> "Database user").required(false))
        .arg(arg!(--password <PASSWORD> "Database password").required(false))
        .arg(arg!(-l --log <LOG> "Log level").required(false))
        .arg(arg!(-s --seed <SEED> "Random seed").required(false))
        .arg(arg!(-n --iterations <N> "Stop after N inserts").required(false))
        .arg(
            arg!(--quoted "Use quoted CamelCase identifiers")
                .action(ArgAction::SetTrue)
                .required(false),
        )
        .arg(
            arg!(--folded "Use unquoted, case-folded identifiers")
                .action(ArgAction::SetTrue)
                .conflicts_with("quoted")
                .required(false),
        )
}

/// Apply command line overrides.
pub fn apply_args(config: &mut Config, matches: &ArgMatches) -> Result<()> {
    let keys = [
        ("host", "database.host"),
        ("port", "database.port"),
        ("dbname", "database.name"),
        ("user", "database.user"),
        ("password", "database.password"),
        ("log", "log"),
        ("seed", "seed"),
        ("iterations", "iterations"),
    ];

    for (arg, key) in keys.iter() {
        if let Some(v) = matches.get_one::<String>(*arg) {
            config.set(*key, v.clone())?;
        }
    }

    if let Some(true) = matches.get_one::<bool>("quoted").copied() {
        config.set("quote_identifiers", true)?;
    }
    if let Some(true) = matches.get_one::<bool>("folded").copied() {
        config.set("quote_identifiers", false)?;
    }

    Ok(())
}

impl Settings {
    /// Deserialize and check a layered configuration.
    pub fn from_config(config: &Config) -> Result<Settings> {
        let settings: Settings = config.clone().try_into()?;

        if settings.pause_min_ms > settings.pause_max_ms {
            return Err(LoaderError::InvalidSetting(format!(
                "pause_min_ms ({}) exceeds pause_max_ms ({})",
                settings.pause_min_ms, settings.pause_max_ms
            )));
        }

        match settings.log.as_str() {
            "warn" | "info" | "debug" | "trace" => {}
            other => {
                return Err(LoaderError::InvalidSetting(format!(
                    "unknown log level {}",
                    other
                )))
            }
        }

        Ok(settings)
    }

    /// Bounds of the pause between inserts.
    pub fn pause(&self) -> (Duration, Duration) {
        (
            Duration::from_millis(self.pause_min_ms),
            Duration::from_millis(self.pause_max_ms),
        )
    }

    /// Random number generator, seeded if a seed is configured.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => SeedableRng::seed_from_u64(seed),
            None => SeedableRng::from_entropy(),
        }
    }
}

/// Install the global tracing subscriber.
///
/// The returned guard flushes the file writer and must be held until exit.
pub fn set_log_level(settings: &Settings) -> Option<WorkerGuard> {
    let level = match settings.log.as_str() {
        "info" => Level::INFO,
        "debug" => Level::DEBUG,
        "trace" => Level::TRACE,
        _ => Level::WARN,
    };

    match settings.log_dir {
        Some(ref dir) => {
            let file_appender = tracing_appender::rolling::hourly(dir, "chinook-loader.log");
            let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_target(false)
                .with_writer(non_blocking)
                .finish();
            tracing::subscriber::set_global_default(subscriber)
                .expect("setting default subscriber failed");
            Some(guard)
        }
        None => {
            let subscriber = FmtSubscriber::builder()
                .with_max_level(level)
                .with_target(false)
                .with_writer(std::io::stderr)
                .finish();
            tracing::subscriber::set_global_default(subscriber)
                .expect("setting default subscriber failed");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k: &str| map.get(k).cloned()
    }

    #[test]
    fn defaults_test() {
        let config = init_config("does-not-exist", Mode::TrackInserter).unwrap();
        let settings = Settings::from_config(&config).unwrap();

        assert_eq!(
            settings.database,
            DatabaseSettings {
                host: "localhost".to_string(),
                port: 5432,
                name: "chinook".to_string(),
                user: "postgres".to_string(),
                password: "postgres".to_string(),
            }
        );
        assert_eq!(settings.track_file, "/tmp/track.csv");
        assert!(settings.quote_identifiers);
        assert_eq!(
            settings.pause(),
            (Duration::from_millis(100), Duration::from_millis(500))
        );
        assert_eq!(settings.seed, None);
        assert_eq!(settings.iterations, None);

        let config = init_config("does-not-exist", Mode::AutoLoader).unwrap();
        let settings = Settings::from_config(&config).unwrap();
        assert!(!settings.quote_identifiers);
        assert!(settings.reset_sequences);
        assert_eq!(
            settings.pause(),
            (Duration::from_secs(3), Duration::from_secs(8))
        );
    }

    #[test]
    fn env_override_test() {
        let mut config = init_config("does-not-exist", Mode::AutoLoader).unwrap();
        let lookup = env(&[
            ("POSTGRES_HOST", "pg"),
            ("POSTGRES_DB", "music"),
            ("DB_HOST", "db"),
            ("DB_PORT", "6543"),
        ]);
        apply_env(&mut config, lookup).unwrap();
        let settings = Settings::from_config(&config).unwrap();

        assert_eq!(settings.database.host, "db");
        assert_eq!(settings.database.port, 6543);
        assert_eq!(settings.database.name, "music");
        assert_eq!(settings.database.user, "postgres");
    }

    #[test]
    fn args_override_test() {
        let mut config = init_config("does-not-exist", Mode::TrackInserter).unwrap();
        let matches = command("test", "test")
            .try_get_matches_from(vec!["test", "--port", "7000", "--seed", "42", "--folded"])
            .unwrap();
        apply_args(&mut config, &matches).unwrap();
        let settings = Settings::from_config(&config).unwrap();

        assert_eq!(settings.database.port, 7000);
        assert_eq!(settings.seed, Some(42));
        assert!(!settings.quote_identifiers);
    }

    #[test]
    fn invalid_settings_test() {
        let mut config = init_config("does-not-exist", Mode::TrackInserter).unwrap();
        config.set("pause_min_ms", 900_i64).unwrap();
        assert!(matches!(
            Settings::from_config(&config),
            Err(LoaderError::InvalidSetting(_))
        ));

        let mut config = init_config("does-not-exist", Mode::TrackInserter).unwrap();
        config.set("log", "loud").unwrap();
        assert!(Settings::from_config(&config).is_err());
    }
}
