//! CLI configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use epistat_core::batch::RunOptions;
use epistat_core::calculators::{InputDefaults, DEFAULT_CONFIDENCE, DEFAULT_YATES};
use epistat_core::validation::validate_confidence;

/// Top-level epistat configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EpistatConfig {
    /// Confidence level (percent) for inputs that don't set one.
    #[serde(default = "default_confidence")]
    pub default_confidence: f64,
    /// Yates correction for chi-square inputs that don't set it.
    #[serde(default = "default_yates")]
    pub yates: bool,
    /// Output format for `run`: text or json.
    #[serde(default = "default_format")]
    pub format: String,
    /// Attach R snippets to results.
    #[serde(default)]
    pub include_r_code: bool,
    /// Output directory for batch reports.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
}

fn default_confidence() -> f64 {
    DEFAULT_CONFIDENCE
}
fn default_yates() -> bool {
    DEFAULT_YATES
}
fn default_format() -> String {
    "text".to_string()
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./epistat-results")
}

impl Default for EpistatConfig {
    fn default() -> Self {
        Self {
            default_confidence: default_confidence(),
            yates: default_yates(),
            format: default_format(),
            include_r_code: false,
            output_dir: default_output_dir(),
        }
    }
}

impl EpistatConfig {
    pub fn input_defaults(&self) -> InputDefaults {
        InputDefaults {
            confidence: self.default_confidence,
            yates: self.yates,
        }
    }

    pub fn run_options(&self) -> RunOptions {
        RunOptions {
            defaults: self.input_defaults(),
            include_r_code: self.include_r_code,
        }
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order:
/// 1. `epistat.toml` in the current directory
/// 2. `~/.config/epistat/config.toml`
///
/// Environment variable overrides: `EPISTAT_CONFIDENCE`, `EPISTAT_FORMAT`.
pub fn load_config_from(path: Option<&Path>) -> Result<EpistatConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("epistat.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let config = match config_path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading config");
            parse_config_str(
                &std::fs::read_to_string(&path)
                    .with_context(|| format!("failed to read config: {}", path.display()))?,
                &path,
            )?
        }
        None => EpistatConfig::default(),
    };

    let config = apply_overrides(config, |key| std::env::var(key).ok())?;
    validate_confidence(config.default_confidence)
        .context("invalid default_confidence in config")?;
    Ok(config)
}

fn parse_config_str(content: &str, path: &Path) -> Result<EpistatConfig> {
    toml::from_str::<EpistatConfig>(content)
        .with_context(|| format!("failed to parse config: {}", path.display()))
}

fn apply_overrides(
    mut config: EpistatConfig,
    lookup: impl Fn(&str) -> Option<String>,
) -> Result<EpistatConfig> {
    if let Some(raw) = lookup("EPISTAT_CONFIDENCE") {
        config.default_confidence = raw
            .trim()
            .parse()
            .with_context(|| format!("EPISTAT_CONFIDENCE is not a number: {raw}"))?;
    }
    if let Some(format) = lookup("EPISTAT_FORMAT") {
        config.format = format;
    }
    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("epistat"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = EpistatConfig::default();
        assert_eq!(config.default_confidence, 95.0);
        assert!(config.yates);
        assert_eq!(config.format, "text");
        assert!(!config.include_r_code);
    }

    #[test]
    fn parse_partial_config() {
        let config = parse_config_str(
            "default_confidence = 90\nyates = false\n",
            Path::new("epistat.toml"),
        )
        .unwrap();
        assert_eq!(config.default_confidence, 90.0);
        assert!(!config.yates);
        assert_eq!(config.output_dir, PathBuf::from("./epistat-results"));

        let defaults = config.input_defaults();
        assert_eq!(defaults.confidence, 90.0);
        assert!(!defaults.yates);
    }

    #[test]
    fn env_overrides_win() {
        let config = apply_overrides(EpistatConfig::default(), |key| match key {
            "EPISTAT_CONFIDENCE" => Some("99".into()),
            "EPISTAT_FORMAT" => Some("json".into()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.default_confidence, 99.0);
        assert_eq!(config.format, "json");
    }

    #[test]
    fn bad_env_confidence_is_an_error() {
        let err = apply_overrides(EpistatConfig::default(), |key| {
            (key == "EPISTAT_CONFIDENCE").then(|| "high".to_string())
        })
        .unwrap_err();
        assert!(err.to_string().contains("EPISTAT_CONFIDENCE"));
    }

    #[test]
    fn explicit_path_must_exist() {
        let err = load_config_from(Some(Path::new("/nonexistent/epistat.toml"))).unwrap_err();
        assert!(err.to_string().contains("config file not found"));
    }

    #[test]
    fn out_of_range_confidence_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("epistat.toml");
        std::fs::write(&path, "default_confidence = 50\n").unwrap();
        // EPISTAT_CONFIDENCE set in the environment would mask the file value
        if std::env::var("EPISTAT_CONFIDENCE").is_err() {
            assert!(load_config_from(Some(&path)).is_err());
        }
    }
}
