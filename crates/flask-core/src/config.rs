use std::fs;
use std::path::{Path, PathBuf};

use flask_parser::HeaderMode;
use serde::{Deserialize, Serialize};

use crate::error::{PipelineError, Result};
use crate::outputs::OutputFormat;

pub const DEFAULT_INPUT: &str = "mauna-loa/flask-monthly/flask_monthly.txt";
pub const DEFAULT_OUTPUT_DIR: &str = "mauna-loa/flask-monthly";
pub const DEFAULT_STEM: &str = "flask_monthly";

/// Environment variable naming a TOML config file.
pub const CONFIG_ENV_VAR: &str = "FLASK_CONFIG";

/// Everything a conversion run needs. Defaults reproduce the published layout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ConverterConfig {
    pub input: PathBuf,
    pub output_dir: PathBuf,
    pub stem: String,
    pub header: HeaderMode,
    pub formats: Vec<OutputFormat>,
    pub pretty_json: bool,
}

impl Default for ConverterConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from(DEFAULT_INPUT),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            stem: DEFAULT_STEM.to_string(),
            header: HeaderMode::default(),
            formats: OutputFormat::ALL.to_vec(),
            pretty_json: false,
        }
    }
}

/// Command-line values that win over the config file when present.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub input: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
    pub stem: Option<String>,
    pub header: Option<HeaderMode>,
    pub formats: Vec<OutputFormat>,
    pub pretty_json: bool,
}

impl ConverterConfig {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: ConverterConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|source| PipelineError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    /// Defaults, then the config file (explicit path or `FLASK_CONFIG`), then overrides.
    pub fn resolve(config_path: Option<&Path>, overrides: ConfigOverrides) -> Result<Self> {
        let env_path = std::env::var_os(CONFIG_ENV_VAR).map(PathBuf::from);
        let base = match config_path.map(Path::to_path_buf).or(env_path) {
            Some(path) => Self::from_file(&path)?,
            None => Self::default(),
        };
        base.with_overrides(overrides)
    }

    pub fn with_overrides(mut self, overrides: ConfigOverrides) -> Result<Self> {
        if let Some(input) = overrides.input {
            self.input = input;
        }
        if let Some(output_dir) = overrides.output_dir {
            self.output_dir = output_dir;
        }
        if let Some(stem) = overrides.stem {
            self.stem = stem;
        }
        if let Some(header) = overrides.header {
            self.header = header;
        }
        if !overrides.formats.is_empty() {
            self.formats = overrides.formats;
        }
        self.pretty_json |= overrides.pretty_json;

        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.formats.is_empty() {
            return Err(PipelineError::InvalidConfig(
                "at least one output format must be enabled".to_string(),
            ));
        }
        if self.stem.trim().is_empty() {
            return Err(PipelineError::InvalidConfig(
                "output file stem must not be empty".to_string(),
            ));
        }
        if self.stem.contains(['/', '\\']) {
            return Err(PipelineError::InvalidConfig(format!(
                "output file stem '{}' must not contain path separators",
                self.stem
            )));
        }
        Ok(())
    }

    /// Enabled formats without duplicates, always in CSV, JSON, Markdown order.
    pub fn enabled_formats(&self) -> Vec<OutputFormat> {
        OutputFormat::ALL
            .into_iter()
            .filter(|format| self.formats.contains(format))
            .collect()
    }

    pub fn output_path(&self, format: OutputFormat) -> PathBuf {
        self.output_dir
            .join(format!("{}.{}", self.stem, format.extension()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_published_paths() {
        let config = ConverterConfig::default();

        assert_eq!(config.input, PathBuf::from(DEFAULT_INPUT));
        assert_eq!(config.header, HeaderMode::Fixed(54));
        assert_eq!(
            config.output_path(OutputFormat::Csv),
            PathBuf::from("mauna-loa/flask-monthly/flask_monthly.csv")
        );
        assert_eq!(
            config.output_path(OutputFormat::Json),
            PathBuf::from("mauna-loa/flask-monthly/flask_monthly.json")
        );
        assert_eq!(
            config.output_path(OutputFormat::Markdown),
            PathBuf::from("mauna-loa/flask-monthly/flask_monthly.md")
        );
    }

    #[test]
    fn toml_overrides_selected_fields() {
        let config = ConverterConfig::from_toml_str(
            r#"
                input = "data/flask.txt"
                header = "detect"
                formats = ["markdown", "csv"]
            "#,
        )
        .expect("config parse failed");

        assert_eq!(config.input, PathBuf::from("data/flask.txt"));
        assert_eq!(config.output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
        assert_eq!(config.header, HeaderMode::Detect);
        assert_eq!(
            config.enabled_formats(),
            vec![OutputFormat::Csv, OutputFormat::Markdown]
        );
    }

    #[test]
    fn toml_fixed_header_count() {
        let config = ConverterConfig::from_toml_str("header = { fixed = 60 }").expect("parse");
        assert_eq!(config.header, HeaderMode::Fixed(60));
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let err = ConverterConfig::from_toml_str("skiprows = 54").expect_err("expected failure");
        assert!(matches!(err, PipelineError::ConfigParse(_)));
    }

    #[test]
    fn empty_formats_are_invalid() {
        let err = ConverterConfig::from_toml_str("formats = []").expect_err("expected failure");
        assert!(matches!(err, PipelineError::InvalidConfig(_)));
    }

    #[test]
    fn overrides_win_over_file_values() {
        let base = ConverterConfig::from_toml_str(r#"stem = "from_file""#).expect("parse");
        let config = base
            .with_overrides(ConfigOverrides {
                stem: Some("from_cli".to_string()),
                header: Some(HeaderMode::Fixed(10)),
                formats: vec![OutputFormat::Json],
                pretty_json: true,
                ..ConfigOverrides::default()
            })
            .expect("overrides");

        assert_eq!(config.stem, "from_cli");
        assert_eq!(config.header, HeaderMode::Fixed(10));
        assert_eq!(config.enabled_formats(), vec![OutputFormat::Json]);
        assert!(config.pretty_json);
    }

    #[test]
    fn stem_with_separator_is_invalid() {
        let err = ConverterConfig::default()
            .with_overrides(ConfigOverrides {
                stem: Some("nested/name".to_string()),
                ..ConfigOverrides::default()
            })
            .expect_err("expected failure");
        assert!(matches!(err, PipelineError::InvalidConfig(_)));
    }
}
