//! Configuration loader with TOML parsing and environment variable overrides

use super::schema::QuireConfig;
use crate::domain::errors::QuireError;
use crate::domain::result::Result;
use regex::Regex;
use std::fs;
use std::path::Path;

/// Loads configuration from a TOML file
///
/// This function:
/// 1. Reads the TOML file
/// 2. Performs environment variable substitution (${VAR} syntax)
/// 3. Parses the TOML into QuireConfig
/// 4. Applies environment variable overrides (QUIRE_* prefix)
/// 5. Resolves relative catalog paths against the config file's directory
/// 6. Validates the configuration
///
/// # Errors
///
/// Returns a configuration error if the file cannot be read or parsed, a
/// referenced environment variable is unset, or validation fails.
///
/// # Examples
///
/// ```no_run
/// use quire::config::loader::load_config;
///
/// let config = load_config("quire.toml").expect("Failed to load config");
/// ```
pub fn load_config(path: impl AsRef<Path>) -> Result<QuireConfig> {
    let path = path.as_ref();

    if !path.exists() {
        return Err(QuireError::Configuration(format!(
            "Configuration file not found: {}",
            path.display()
        )));
    }

    let contents = fs::read_to_string(path).map_err(|e| {
        QuireError::Configuration(format!(
            "Failed to read configuration file {}: {}",
            path.display(),
            e
        ))
    })?;

    let contents = substitute_env_vars(&contents)?;

    let mut config: QuireConfig = toml::from_str(&contents)
        .map_err(|e| QuireError::Configuration(format!("Failed to parse TOML: {e}")))?;

    apply_env_overrides(&mut config);

    if let Some(base_dir) = path.parent() {
        resolve_relative_paths(&mut config, base_dir);
    }

    config.validate().map_err(|e| {
        QuireError::Configuration(format!("Configuration validation failed: {e}"))
    })?;

    tracing::debug!(
        config_path = %path.display(),
        catalog = %config.catalog.path,
        "Configuration loaded"
    );

    Ok(config)
}

/// Substitutes environment variables in the format ${VAR_NAME}
///
/// Comment lines are left untouched.
///
/// # Errors
///
/// Returns an error listing every referenced variable that is not set
fn substitute_env_vars(input: &str) -> Result<String> {
    let re = Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}")
        .map_err(|e| QuireError::Other(format!("Invalid substitution pattern: {e}")))?;
    let mut result = String::with_capacity(input.len());
    let mut missing_vars: Vec<String> = Vec::new();

    for line in input.lines() {
        if line.trim_start().starts_with('#') {
            result.push_str(line);
            result.push('\n');
            continue;
        }

        let mut processed_line = line.to_string();
        for cap in re.captures_iter(line) {
            let var_name = &cap[1];
            match std::env::var(var_name) {
                Ok(value) => {
                    processed_line = processed_line.replace(&format!("${{{var_name}}}"), &value);
                }
                Err(_) => {
                    if !missing_vars.iter().any(|v| v == var_name) {
                        missing_vars.push(var_name.to_string());
                    }
                }
            }
        }
        result.push_str(&processed_line);
        result.push('\n');
    }

    if !missing_vars.is_empty() {
        return Err(QuireError::Configuration(format!(
            "Missing required environment variables: {}",
            missing_vars.join(", ")
        )));
    }

    Ok(result)
}

/// Applies environment variable overrides using the QUIRE_* prefix
///
/// Environment variables follow the pattern QUIRE_<SECTION>_<KEY>, for
/// example QUIRE_EXPORT_MAX_CONCURRENCY. Unparseable numeric and boolean
/// values are ignored.
fn apply_env_overrides(config: &mut QuireConfig) {
    if let Ok(val) = std::env::var("QUIRE_APPLICATION_LOG_LEVEL") {
        config.application.log_level = val;
    }

    if let Ok(val) = std::env::var("QUIRE_SITE_DOWNLOAD_PREFIX") {
        config.site.download_prefix = val;
    }
    if let Ok(val) = std::env::var("QUIRE_SITE_COMMIT") {
        config.site.commit = Some(val);
    }

    if let Ok(val) = std::env::var("QUIRE_CATALOG_PATH") {
        config.catalog.path = val;
    }
    if let Ok(val) = std::env::var("QUIRE_CATALOG_DOCUMENTS_DIR") {
        config.catalog.documents_dir = val;
    }

    if let Ok(val) = std::env::var("QUIRE_EXPORT_MAX_CONCURRENCY") {
        if let Ok(n) = val.parse() {
            config.export.max_concurrency = n;
        }
    }
    if let Ok(val) = std::env::var("QUIRE_EXPORT_ATTACHMENT_TIMEOUT_SECS") {
        if let Ok(secs) = val.parse() {
            config.export.attachment_timeout_secs = secs;
        }
    }
    if let Ok(val) = std::env::var("QUIRE_EXPORT_VERIFY_HASHES") {
        if let Ok(flag) = val.parse() {
            config.export.verify_hashes = flag;
        }
    }

    if let Ok(val) = std::env::var("QUIRE_LOGGING_LOCAL_ENABLED") {
        if let Ok(flag) = val.parse() {
            config.logging.local_enabled = flag;
        }
    }
    if let Ok(val) = std::env::var("QUIRE_LOGGING_LOCAL_PATH") {
        config.logging.local_path = val;
    }
    if let Ok(val) = std::env::var("QUIRE_LOGGING_LOCAL_ROTATION") {
        config.logging.local_rotation = val;
    }
}

fn resolve_relative_paths(config: &mut QuireConfig, base_dir: &Path) {
    for path in [
        &mut config.catalog.path,
        &mut config.catalog.documents_dir,
    ] {
        if !path.is_empty() && Path::new(path.as_str()).is_relative() {
            *path = base_dir.join(path.as_str()).to_string_lossy().into_owned();
        }
    }
}
