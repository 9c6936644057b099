use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::utils::io::{self, IoError};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] IoError),

    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Top-level configuration, loaded from TOML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub prepare: PrepareConfig,
    #[serde(default)]
    pub training: TrainingConfig,
}

/// Where the batch driver reads pairs from and writes tables to
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrepareConfig {
    #[serde(default = "default_input_dir")]
    pub input_dir: PathBuf,
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    #[serde(default = "default_normal_extension")]
    pub normal_extension: String,
    #[serde(default = "default_simple_extension")]
    pub simple_extension: String,
}

/// Fine-tuning hyperparameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingConfig {
    #[serde(default = "default_epochs")]
    pub epochs: usize,
    #[serde(default = "default_batch_size")]
    pub batch_size: usize,
    #[serde(default = "default_learning_rate")]
    pub learning_rate: f32,
    /// Sequences are padded or truncated to this many tokens.
    #[serde(default = "default_max_length")]
    pub max_length: usize,
    #[serde(default = "default_shuffle")]
    pub shuffle: bool,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default = "default_generation_max_length")]
    pub generation_max_length: usize,
    /// Fine-tuned model and tokenizer are saved here.
    #[serde(default = "default_model_dir")]
    pub model_dir: PathBuf,
}

fn default_input_dir() -> PathBuf { PathBuf::from("dataset") }
fn default_output_dir() -> PathBuf { PathBuf::from("prepared_dataset") }
fn default_normal_extension() -> String { "normal".to_string() }
fn default_simple_extension() -> String { "simple".to_string() }
fn default_epochs() -> usize { 3 }
fn default_batch_size() -> usize { 8 }
fn default_learning_rate() -> f32 { 5e-5 }
fn default_max_length() -> usize { 1024 }
fn default_shuffle() -> bool { true }
fn default_generation_max_length() -> usize { 50 }
fn default_model_dir() -> PathBuf { PathBuf::from("gpt2_simplification_model") }

impl Default for PrepareConfig {
    fn default() -> Self {
        Self {
            input_dir: default_input_dir(),
            output_dir: default_output_dir(),
            normal_extension: default_normal_extension(),
            simple_extension: default_simple_extension(),
        }
    }
}

impl Default for TrainingConfig {
    fn default() -> Self {
        Self {
            epochs: default_epochs(),
            batch_size: default_batch_size(),
            learning_rate: default_learning_rate(),
            max_length: default_max_length(),
            shuffle: default_shuffle(),
            seed: None,
            generation_max_length: default_generation_max_length(),
            model_dir: default_model_dir(),
        }
    }
}

impl Config {
    /// Parses and validates a TOML document.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads a config file; the file must exist.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = io::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Loads `path` when given, defaults otherwise.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self, ConfigError> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.prepare.validate()?;
        self.training.validate()
    }
}

impl PrepareConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (name, ext) in [("normal_extension", &self.normal_extension), ("simple_extension", &self.simple_extension)] {
            if ext.is_empty() || ext.contains(['.', '/', '\\']) {
                return Err(ConfigError::Invalid(format!("{name} must be a bare extension, got {ext:?}")));
            }
        }
        if self.normal_extension == self.simple_extension {
            return Err(ConfigError::Invalid(
                "normal_extension and simple_extension must differ".to_string(),
            ));
        }
        Ok(())
    }
}

impl TrainingConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.epochs == 0 {
            return Err(ConfigError::Invalid("epochs must be greater than 0".to_string()));
        }
        if self.batch_size == 0 {
            return Err(ConfigError::Invalid("batch_size must be greater than 0".to_string()));
        }
        if self.max_length == 0 {
            return Err(ConfigError::Invalid("max_length must be greater than 0".to_string()));
        }
        if self.generation_max_length == 0 {
            return Err(ConfigError::Invalid("generation_max_length must be greater than 0".to_string()));
        }
        if !self.learning_rate.is_finite() || self.learning_rate <= 0.0 {
            return Err(ConfigError::Invalid(format!(
                "learning_rate must be positive, got {}",
                self.learning_rate
            )));
        }
        Ok(())
    }
}
