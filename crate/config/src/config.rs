use std::{
    env,
    error::Error,
    fmt,
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use tracing::{info, trace};

use crate::{
    config_bail,
    error::{result::ConfigResultHelper, ConfigError},
};

/// Enables shipping to the remote ingestion service. Defaults to true.
pub const TELEMETRY_ENABLED_ENV: &str = "TELEMETRY_ENABLED";
/// Source token issued by the remote ingestion service console.
pub const TELEMETRY_SOURCE_TOKEN_ENV: &str = "TELEMETRY_SOURCE_TOKEN";
/// Overrides the configuration file location.
pub const TELEMETRY_CONF_ENV: &str = "TELEMETRY_CONF";

const CONF_DEFAULT_LOCAL_PATH: &str = ".telemetry/telemetry.toml";
const CONF_DEFAULT_SYSTEM_PATH: &str = "/etc/telemetry/telemetry.toml";

/// Returns the path to the current user's home folder.
///
/// On Linux and macOS, the home folder is typically located at
/// `/home/<username>` or `/Users/<username>`, respectively. On Windows, the
/// home folder is typically located at `C:\Users\<username>`. However, the
/// location of the home folder can be changed by the user or by system
/// administrators, so it's important to check for the existence of the
/// appropriate environment variables.
///
/// Returns `None` if the home folder cannot be determined.
pub fn get_home_folder() -> Option<PathBuf> {
    env::var_os("HOME")
        .or_else(|| env::var_os("USERPROFILE"))
        .or_else(|| {
            let hdrive = env::var_os("HOMEDRIVE")?;
            env::var_os("HOMEPATH").map(|hpath| {
                let mut path = PathBuf::from(hdrive);
                path.push(hpath);
                path.into_os_string()
            })
        })
        .map(PathBuf::from)
}

/// Returns the default configuration path
///  or an error if the path cannot be determined
pub fn get_default_conf_path() -> Result<PathBuf, ConfigError> {
    get_home_folder()
        .ok_or_else(|| ConfigError::NotFound("unable to determine the home folder".to_owned()))
        .map(|home| home.join(CONF_DEFAULT_LOCAL_PATH))
}

/// Resolves the configuration file location from:
/// - the `conf` arg
/// - the `TELEMETRY_CONF` environment variable
/// - a pre-determined user or system path
pub fn location(conf: Option<PathBuf>) -> Result<PathBuf, ConfigError> {
    trace!("Getting telemetry configuration file location");
    if let Some(conf_path) = conf {
        if !conf_path.exists() {
            return Err(ConfigError::NotFound(format!(
                "Configuration file {conf_path:?} does not exist"
            )));
        }
        return Ok(conf_path);
    } else if let Ok(conf_path) = env::var(TELEMETRY_CONF_ENV).map(PathBuf::from) {
        // Error if the specified file does not exist
        if !conf_path.exists() {
            return Err(ConfigError::NotFound(format!(
                "Configuration file {conf_path:?} specified in {TELEMETRY_CONF_ENV} environment \
                 variable does not exist"
            )));
        }
        return Ok(conf_path);
    }

    let user_conf_path = get_default_conf_path();
    trace!("User conf path is at: {user_conf_path:?}");

    match user_conf_path {
        Err(_) => {
            // no user home, this may be the system attempting a load
            let default_system_path = PathBuf::from(CONF_DEFAULT_SYSTEM_PATH);
            if default_system_path.exists() {
                info!("No active user, using configuration at {CONF_DEFAULT_SYSTEM_PATH}");
                return Ok(default_system_path);
            }
            config_bail!(
                "no configuration found at {CONF_DEFAULT_SYSTEM_PATH}, and no current user, \
                 bailing out"
            );
        }
        Ok(user_conf) => {
            // the user home exists, if there is no conf file, check the
            // system-wide path before provisioning a default
            if !user_conf.exists() {
                let default_system_path = PathBuf::from(CONF_DEFAULT_SYSTEM_PATH);
                if default_system_path.exists() {
                    info!(
                        "User conf path is at: {user_conf:?} but is empty, using \
                         {CONF_DEFAULT_SYSTEM_PATH} instead"
                    );
                    return Ok(default_system_path);
                }
                info!(
                    "User conf path is at: {user_conf:?} and will be initialized with a default \
                     value"
                );
            }
            Ok(user_conf)
        }
    }
}

/// Writes a default configuration file into `dir` unless one is already
/// present. This is a deployment-time scaffolding action for host
/// applications adopting the telemetry facade; it is not part of the logging
/// data path.
pub fn publish_default_conf(dir: &Path) -> Result<PathBuf, ConfigError> {
    let conf_path = dir.join("telemetry.toml");
    if conf_path.exists() {
        trace!("Configuration file {conf_path:?} already present, leaving it untouched");
        return Ok(conf_path);
    }
    fs::create_dir_all(dir)
        .with_context(|| format!("Unable to create configuration directory {dir:?}"))?;
    TelemetryConfig::default().to_toml(&conf_path)?;
    info!("Published default telemetry configuration to {conf_path:?}");
    Ok(conf_path)
}

/// An exception-class identifier usable in the ignore/report lists.
///
/// Built from a concrete error type; matching is a downcast test, so the
/// identifier survives type erasure behind `dyn Error`.
#[derive(Clone, Copy)]
pub struct ExceptionClass {
    name: &'static str,
    matches: fn(&(dyn Error + 'static)) -> bool,
}

impl ExceptionClass {
    #[must_use]
    pub fn of<E: Error + 'static>() -> Self {
        Self {
            name: std::any::type_name::<E>(),
            matches: |e| e.is::<E>(),
        }
    }

    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Whether `error` itself is an instance of this class.
    #[must_use]
    pub fn matches(&self, error: &(dyn Error + 'static)) -> bool {
        (self.matches)(error)
    }
}

impl fmt::Debug for ExceptionClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ExceptionClass").field(&self.name).finish()
    }
}

/// Configuration for the telemetry logging facade.
///
/// `enabled` and `source_token` come from the environment or the TOML file;
/// the two exception lists are declared in code when wiring the host
/// application, since class identifiers are types, not strings.
#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct TelemetryConfig {
    /// Ship logs to the remote ingestion service when true; fall back to the
    /// host's own logging facade when false.
    #[serde(default = "enabled_default")]
    pub enabled: bool,

    /// The source token found in the ingestion service console.
    #[serde(default)]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_token: Option<String>,

    /// Exceptions the telemetry logger should suppress.
    #[serde(skip)]
    pub ignore_exceptions: Vec<ExceptionClass>,

    /// Exceptions the telemetry logger should always surface.
    #[serde(skip)]
    pub report_exceptions: Vec<ExceptionClass>,
}

const fn enabled_default() -> bool {
    true
}

impl Default for TelemetryConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            source_token: None,
            ignore_exceptions: Vec::new(),
            report_exceptions: Vec::new(),
        }
    }
}

impl TelemetryConfig {
    /// Reads `TELEMETRY_ENABLED` and `TELEMETRY_SOURCE_TOKEN` from the
    /// process environment; both exception lists start empty.
    pub fn from_env() -> Result<Self, ConfigError> {
        let enabled = match env::var(TELEMETRY_ENABLED_ENV) {
            Ok(raw) => parse_bool(&raw)?,
            Err(env::VarError::NotPresent) => true,
            Err(e) => return Err(ConfigError::Env(e.to_string())),
        };
        let source_token = env::var(TELEMETRY_SOURCE_TOKEN_ENV)
            .ok()
            .filter(|token| !token.is_empty());
        Ok(Self {
            enabled,
            source_token,
            ..Self::default()
        })
    }

    pub fn to_toml(&self, conf_path: &Path) -> Result<(), ConfigError> {
        trace!("Saving telemetry configuration to {conf_path:?}");
        let content = toml::to_string_pretty(self)
            .with_context(|| format!("Unable to serialize telemetry configuration {self:?}"))?;
        fs::write(conf_path, &content).with_context(|| {
            format!("Unable to write telemetry configuration to file {conf_path:?}\n{self:?}")
        })?;

        Ok(())
    }

    /// Deserialize the configuration from the file, or provision the file
    /// with default values if none exists
    pub fn from_toml(conf_path: &Path) -> Result<Self, ConfigError> {
        let conf = if conf_path.exists() {
            let content = fs::read_to_string(conf_path)
                .with_context(|| format!("Unable to read configuration file {conf_path:?}"))?;
            trace!("Configuration file contents: {content}");
            toml::from_str(&content)
                .with_context(|| format!("Error while parsing configuration file {conf_path:?}"))?
        } else {
            if let Some(parent) = conf_path.parent() {
                fs::create_dir_all(parent).with_context(|| {
                    format!("Unable to create directory for configuration file {parent:?}")
                })?;
            }

            let default_conf = Self::default();
            default_conf.to_toml(conf_path)?;
            default_conf
        };

        Ok(conf)
    }
}

fn parse_bool(raw: &str) -> Result<bool, ConfigError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" => Ok(true),
        "0" | "false" | "no" => Ok(false),
        other => Err(ConfigError::Env(format!(
            "invalid boolean {other:?} in {TELEMETRY_ENABLED_ENV}"
        ))),
    }
}
