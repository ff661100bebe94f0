// --- File: crates/agenda_config/src/lib.rs ---
use config::{Config, ConfigError, Environment, File};
use once_cell::sync::OnceCell;
use std::env;
use std::path::Path;
use tracing::{debug, info};

pub mod env_vars;
pub mod models;

pub use env_vars::{config_path_to_env_var, get_config_prefix, CONFIG_SEPARATOR};
pub use models::*;

/// Loads the application configuration.
///
/// Sources, later ones winning:
/// 1. `<config dir>/default.{toml,yaml,json}`
/// 2. `<config dir>/<RUN_ENV>.{toml,yaml,json}` (`RUN_ENV` defaults to `debug`)
/// 3. `AGENDA__*` environment variables
///
/// The config directory is `AGENDA_CONFIG_DIR`, or `config` relative to the
/// working directory. Every section has defaults, so a missing directory
/// yields the built-in practice configuration.
pub fn load_config() -> Result<AppConfig, ConfigError> {
    ensure_dotenv_loaded();

    let run_env = env::var("RUN_ENV").unwrap_or_else(|_| "debug".to_string());
    let config_dir = env::var("AGENDA_CONFIG_DIR").unwrap_or_else(|_| "config".to_string());

    load_config_from(Path::new(&config_dir), &run_env)
}

/// Loads the configuration from an explicit directory and run environment.
pub fn load_config_from(config_dir: &Path, run_env: &str) -> Result<AppConfig, ConfigError> {
    let default_path = config_dir.join("default");
    let env_path = config_dir.join(run_env);
    let prefix = get_config_prefix();

    debug!(
        "Loading config: default={}, env={}, overrides like {}",
        default_path.display(),
        env_path.display(),
        config_path_to_env_var("server.port")
    );

    let builder = Config::builder()
        .add_source(File::from(default_path.as_path()).required(false))
        .add_source(File::from(env_path.as_path()).required(false))
        .add_source(Environment::with_prefix(&prefix).separator(CONFIG_SEPARATOR));

    let config: AppConfig = builder.build()?.try_deserialize()?;
    info!(
        "Configuration loaded ({} plans, {} time slots)",
        config.plans.len(),
        config.availability.time_slots.len()
    );
    Ok(config)
}

static INIT_DOTENV: OnceCell<()> = OnceCell::new();

/// Ensures that the dotenv file is loaded into the environment variables.
///
/// The file is `DOTENV_OVERRIDE` when set, otherwise `.env`. Loading happens at
/// most once per process; a missing file is not an error.
///
/// Returns the path that was (or would have been) loaded.
pub fn ensure_dotenv_loaded() -> String {
    let dotenv_path = env::var("DOTENV_OVERRIDE").unwrap_or_else(|_| ".env".to_string());

    INIT_DOTENV.get_or_init(|| {
        dotenv::from_filename(&dotenv_path).ok();
    });

    dotenv_path
}
