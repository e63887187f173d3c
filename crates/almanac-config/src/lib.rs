use almanac_astro::{EphemerisConfig, SignLabels};
use log::{debug, info};
use serde::Deserialize;
use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

/// Service-account JSON blob for Google Drive.
pub const CREDENTIALS_ENV: &str = "GOOGLE_CREDENTIALS";
/// Target Drive folder id.
pub const FOLDER_ID_ENV: &str = "GOOGLE_DRIVE_FOLDER_ID";
/// Swiss Ephemeris data directory, overrides `ephemeris_path`.
pub const EPHEMERIS_PATH_ENV: &str = "SWISS_EPHEMERIS_PATH";

/// Substring marking files this tool owns in the remote folder.
pub const DEFAULT_NAME_MARKER: &str = "transit_";

const DEFAULT_CONFIG_PATHS: [&str; 2] = ["configs/almanac.toml", "../../configs/almanac.toml"];

/// Where and how to publish. Present only when both values are configured.
#[derive(Clone, PartialEq, Eq)]
pub struct DriveSettings {
    pub credentials_json: String,
    pub folder_id: String,
}

impl fmt::Debug for DriveSettings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DriveSettings")
            .field("credentials_json", &"<redacted>")
            .field("folder_id", &self.folder_id)
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AlmanacConfig {
    pub output_dir: PathBuf,
    pub ephemeris: EphemerisConfig,
    pub sign_labels: SignLabels,
    pub name_marker: String,
    pub drive: Option<DriveSettings>,
}

impl AlmanacConfig {
    /// Publishing happens only with both a credential and a folder id.
    pub fn publish_enabled(&self) -> bool {
        self.drive.is_some()
    }
}

impl Default for AlmanacConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            ephemeris: EphemerisConfig::default(),
            sign_labels: SignLabels::default(),
            name_marker: DEFAULT_NAME_MARKER.to_string(),
            drive: None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct AlmanacToml {
    #[serde(default)]
    output_dir: Option<PathBuf>,
    #[serde(default)]
    ephemeris_path: Option<PathBuf>,
    #[serde(default)]
    sign_labels: Option<SignLabels>,
    #[serde(default)]
    name_marker: Option<String>,
}

fn default_output_dir() -> PathBuf {
    PathBuf::from(".")
}

/// Text of the config file: the explicit path when given (it must exist),
/// otherwise the first of the usual relative locations that can be read.
pub fn read_config_toml_text(explicit: Option<&Path>) -> anyhow::Result<Option<String>> {
    if let Some(path) = explicit {
        let text = fs::read_to_string(path)
            .map_err(|e| anyhow::anyhow!("Could not read config {}: {e}", path.display()))?;
        return Ok(Some(text));
    }
    for p in &DEFAULT_CONFIG_PATHS {
        if let Ok(c) = fs::read_to_string(p) {
            debug!("Loaded config from {}", p);
            return Ok(Some(c));
        }
    }
    Ok(None)
}

/// Load the config file (if any) and overlay the process environment.
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<AlmanacConfig> {
    let text = read_config_toml_text(explicit)?;
    let config = resolve_config(text.as_deref(), |key| env::var(key).ok())?;
    if config.publish_enabled() {
        info!("Google Drive publishing enabled");
    } else {
        info!("{} / {} not set, running local-only", CREDENTIALS_ENV, FOLDER_ID_ENV);
    }
    Ok(config)
}

/// Combine TOML text and an environment lookup into a config.
///
/// Empty environment values count as unset.
pub fn resolve_config<F>(toml_text: Option<&str>, env_lookup: F) -> anyhow::Result<AlmanacConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let file: AlmanacToml = match toml_text {
        Some(text) => toml::from_str(text)
            .map_err(|e| anyhow::anyhow!("Failed to parse almanac.toml: {e}"))?,
        None => AlmanacToml::default(),
    };
    let lookup = |key: &str| env_lookup(key).filter(|v| !v.trim().is_empty());

    let ephemeris_path = lookup(EPHEMERIS_PATH_ENV)
        .map(PathBuf::from)
        .or(file.ephemeris_path);

    let name_marker = file
        .name_marker
        .unwrap_or_else(|| DEFAULT_NAME_MARKER.to_string());
    if name_marker.is_empty() {
        anyhow::bail!("name_marker must not be empty: it would match every file in the folder");
    }
    if name_marker.contains('\'') || name_marker.contains('\\') {
        anyhow::bail!("name_marker must not contain quotes or backslashes: {name_marker}");
    }

    let drive = match (lookup(CREDENTIALS_ENV), lookup(FOLDER_ID_ENV)) {
        (Some(credentials_json), Some(folder_id)) => Some(DriveSettings {
            credentials_json,
            folder_id: folder_id.trim().to_string(),
        }),
        _ => None,
    };

    Ok(AlmanacConfig {
        output_dir: file.output_dir.unwrap_or_else(default_output_dir),
        ephemeris: EphemerisConfig::new(ephemeris_path),
        sign_labels: file.sign_labels.unwrap_or_default(),
        name_marker,
        drive,
    })
}
