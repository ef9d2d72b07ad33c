//! Site configuration: `invite.toml` plus `INVITE_*` environment overrides.

use std::path::{Path, PathBuf};

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_DATA_PATH, DEFAULT_DEMOS_URL, DEFAULT_OUTPUT_PATH};
use crate::error::{InviteError, InviteResult};

pub const CONFIG_FILE: &str = "invite.toml";
const ENV_PREFIX: &str = "INVITE";

fn default_data() -> String {
    DEFAULT_DATA_PATH.to_string()
}

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT_PATH)
}

fn default_demos_url() -> String {
    DEFAULT_DEMOS_URL.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Path or `http(s)` url of the event document
    #[serde(default = "default_data")]
    pub data: String,

    /// Page template replacing the built-in one
    #[serde(default)]
    pub template: Option<PathBuf>,

    #[serde(default = "default_output")]
    pub output: PathBuf,

    /// Locale for the display date, e.g. `fr_FR`
    #[serde(default)]
    pub locale: Option<String>,

    #[serde(default = "default_demos_url")]
    pub demos_url: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        SiteConfig {
            data: default_data(),
            template: None,
            output: default_output(),
            locale: None,
            demos_url: default_demos_url(),
        }
    }
}

impl SiteConfig {
    /// Load `invite.toml` from the working directory, if there is one.
    pub fn load() -> InviteResult<Self> {
        Self::load_from(Path::new(CONFIG_FILE))
    }

    pub fn load_from(path: &Path) -> InviteResult<Self> {
        Self::build(path, Environment::with_prefix(ENV_PREFIX))
    }

    fn build(path: &Path, env: Environment) -> InviteResult<Self> {
        tracing::debug!(path = %path.display(), "Loading site configuration");

        Config::builder()
            .add_source(File::from(path).required(false))
            .add_source(env)
            .build()
            .map_err(|e| InviteError::Config(e.to_string()))?
            .try_deserialize()
            .map_err(|e| InviteError::Config(e.to_string()))
    }

    /// The document source with `~` expanded.
    pub fn data_source(&self) -> String {
        shellexpand::tilde(&self.data).into_owned()
    }

    pub fn output_path(&self) -> PathBuf {
        expand(&self.output)
    }

    pub fn template_path(&self) -> Option<PathBuf> {
        self.template.as_deref().map(expand)
    }
}

fn expand(path: &Path) -> PathBuf {
    PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    // A prefix nothing in the test environment sets
    fn isolated() -> Environment {
        Environment::with_prefix("INVITE_TEST_UNSET")
    }

    #[test]
    fn missing_file_gives_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = SiteConfig::build(&dir.path().join(CONFIG_FILE), isolated()).unwrap();

        assert_eq!(config, SiteConfig::default());
        assert_eq!(config.data, "data/event.json");
        assert_eq!(config.output, PathBuf::from("dist/index.html"));
    }

    #[test]
    fn file_values_override_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(
            &path,
            r#"
data = "https://example.com/event.json"
template = "~/templates/party.html"
locale = "fr_FR"
"#,
        )
        .unwrap();

        let config = SiteConfig::build(&path, isolated()).unwrap();
        assert_eq!(config.data_source(), "https://example.com/event.json");
        assert_eq!(config.locale.as_deref(), Some("fr_FR"));
        assert_eq!(config.output, PathBuf::from("dist/index.html"));

        let template = config.template_path().unwrap();
        assert!(template.ends_with("templates/party.html"));
        assert!(!template.starts_with("~"));
    }

    #[test]
    fn malformed_file_is_a_config_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "data = [").unwrap();

        let err = SiteConfig::build(&path, isolated()).unwrap_err();
        assert!(matches!(err, InviteError::Config(_)));
    }
}
