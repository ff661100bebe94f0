//! Environment overrides follow `AGENDA__SECTION__KEY`, e.g.
//! `AGENDA__SERVER__PORT=9000` or `AGENDA__CONTACT__WHATSAPP_NUMBER=56912345678`.

use std::env;

pub const DEFAULT_PREFIX: &str = "AGENDA";

/// Between the prefix, the section and the key.
pub const CONFIG_SEPARATOR: &str = "__";

/// `AGENDA_ENV_PREFIX` replaces the prefix, mainly so tests don't collide.
pub fn get_config_prefix() -> String {
    env::var("AGENDA_ENV_PREFIX").unwrap_or_else(|_| DEFAULT_PREFIX.to_string())
}

/// `server.port` -> `AGENDA__SERVER__PORT`
pub fn config_path_to_env_var(path: &str) -> String {
    [get_config_prefix().as_str(), path]
        .join(CONFIG_SEPARATOR)
        .replace('.', CONFIG_SEPARATOR)
        .to_uppercase()
}
