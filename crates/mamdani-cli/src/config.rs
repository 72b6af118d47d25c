//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use mamdani_loader::DEFAULT_OUTPUT_MARKER;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Fuzzy-set definition file
    #[serde(default = "default_variables_file")]
    pub variables_file: PathBuf,

    /// Rule definition file
    #[serde(default = "default_rules_file")]
    pub rules_file: PathBuf,

    /// Set names containing this substring are output sets
    #[serde(default = "default_output_marker")]
    pub output_marker: String,

    /// Crisp inputs and the sets they feed
    #[serde(default = "default_inputs")]
    pub inputs: Vec<InputRoute>,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,
}

/// A crisp input value and the set names it is routed to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputRoute {
    /// Input name, used by `--input name=value`
    pub name: String,

    /// Crisp value
    pub value: f64,

    /// Input sets whose name contains any of these substrings receive the value
    pub matches: Vec<String>,
}

impl InputRoute {
    /// Whether this route feeds the set called `set_name`
    pub fn feeds(&self, set_name: &str) -> bool {
        self.matches.iter().any(|pattern| set_name.contains(pattern.as_str()))
    }
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Config {
    /// Get the default configuration file path.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".mamdani").join("config.toml"))
    }

    /// Resolve an explicit path or fall back to the default one.
    pub fn resolve_path(path: Option<&Path>) -> Result<PathBuf> {
        match path {
            Some(path) => Ok(path.to_path_buf()),
            None => Self::default_path(),
        }
    }

    /// Load configuration from file or create default.
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = fs::read_to_string(path)?;
            let config: Config = toml::from_str(&contents)?;
            config.validate()?;
            Ok(config)
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file.
    pub fn save(&self, path: &Path) -> Result<()> {
        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)?;
        fs::write(path, contents)?;
        Ok(())
    }

    /// Check settings that serde cannot.
    pub fn validate(&self) -> Result<()> {
        if self.output_marker.is_empty() {
            return Err(CliError::Config("output_marker must not be empty".into()));
        }
        for route in &self.inputs {
            if route.matches.iter().any(String::is_empty) {
                return Err(CliError::Config(format!(
                    "Input '{}' has an empty match pattern",
                    route.name
                )));
            }
        }
        Ok(())
    }

    /// First route feeding `set_name`, in configuration order.
    pub fn route_for(&self, set_name: &str) -> Option<&InputRoute> {
        self.inputs.iter().find(|route| route.feeds(set_name))
    }

    /// Override a crisp value by input name.
    pub fn set_input(&mut self, name: &str, value: f64) -> Result<()> {
        let route = self
            .inputs
            .iter_mut()
            .find(|route| route.name == name)
            .ok_or_else(|| CliError::InvalidInput(format!("Unknown input '{}'", name)))?;
        route.value = value;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            variables_file: default_variables_file(),
            rules_file: default_rules_file(),
            output_marker: default_output_marker(),
            inputs: default_inputs(),
            settings: Settings::default(),
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
        }
    }
}

fn default_variables_file() -> PathBuf {
    PathBuf::from("variables.txt")
}

fn default_rules_file() -> PathBuf {
    PathBuf::from("rules.txt")
}

fn default_output_marker() -> String {
    DEFAULT_OUTPUT_MARKER.to_string()
}

fn default_inputs() -> Vec<InputRoute> {
    vec![
        InputRoute {
            name: "service".to_string(),
            value: 40.0,
            matches: vec!["Service".to_string(), "waiting_time".to_string()],
        },
        InputRoute {
            name: "food".to_string(),
            value: 60.0,
            matches: vec!["Food".to_string(), "price".to_string()],
        },
    ]
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}
