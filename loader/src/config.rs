//! Run configuration for the contract agent.
//!
//! Defines the YAML-serializable configuration naming the input documents
//! and how the resulting report is delivered.
//!
//! # Example YAML
//!
//! ```yaml
//! producer_schema: sample_data/producer_schema.json
//! consumer_requirements: sample_data/consumer_requirements.json
//! report:
//!   format: text
//!   output: reports/contract.txt
//!   fail_on_issues: true
//! ```

use std::io::{BufReader, BufWriter};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{LoaderError, Result};
use crate::output::OutputFormat;

/// How and where the report is written.
///
/// # Examples
///
/// ```
/// # use data_contract_loader::{OutputFormat, ReportConfig};
/// let report = ReportConfig::default();
/// assert_eq!(report.format, OutputFormat::Text);
/// assert!(report.output.is_none());
/// assert!(!report.fail_on_issues);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Rendering of the report.
    #[serde(default)]
    pub format: OutputFormat,
    /// Report file; standard output when absent.
    #[serde(default)]
    pub output: Option<PathBuf>,
    /// Treat any compliance issue as a failed run.
    #[serde(default)]
    pub fail_on_issues: bool,
}

/// Top-level agent configuration.
///
/// # Examples
///
/// ```no_run
/// use data_contract_loader::AgentConfig;
///
/// let config = AgentConfig::load("contract-agent.yml").unwrap();
/// println!("producer: {}", config.producer_schema.display());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AgentConfig {
    /// Producer schema document.
    pub producer_schema: PathBuf,
    /// Consumer requirements document.
    pub consumer_requirements: PathBuf,
    /// Report delivery settings.
    #[serde(default)]
    pub report: ReportConfig,
}

impl AgentConfig {
    /// Creates a configuration with default report settings.
    pub fn new(producer_schema: impl Into<PathBuf>, consumer_requirements: impl Into<PathBuf>) -> Self {
        Self {
            producer_schema: producer_schema.into(),
            consumer_requirements: consumer_requirements.into(),
            report: ReportConfig::default(),
        }
    }

    /// Loads configuration from a YAML file and resolves relative paths
    /// against the file's directory.
    ///
    /// # Errors
    ///
    /// Returns [`LoaderError::Io`] if the file cannot be read,
    /// [`LoaderError::Yaml`] if parsing fails, or
    /// [`LoaderError::InvalidConfig`] if a document path is empty.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let file = std::fs::File::open(path).map_err(|source| LoaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let reader = BufReader::new(file);
        let mut config: Self =
            serde_yaml::from_reader(reader).map_err(|source| LoaderError::Yaml {
                path: path.to_path_buf(),
                source,
            })?;

        config.validate()?;
        if let Some(base) = path.parent() {
            config.resolve_paths(base);
        }
        Ok(config)
    }

    /// Saves the configuration as YAML.
    ///
    /// # Errors
    ///
    /// Returns [`LoaderError::Io`] if the file cannot be written, or
    /// [`LoaderError::Yaml`] if serialization fails.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let file = std::fs::File::create(path).map_err(|source| LoaderError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let writer = BufWriter::new(file);
        serde_yaml::to_writer(writer, self).map_err(|source| LoaderError::Yaml {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Rewrites relative paths so they are relative to `base`.
    pub fn resolve_paths(&mut self, base: &Path) {
        resolve(&mut self.producer_schema, base);
        resolve(&mut self.consumer_requirements, base);
        if let Some(output) = self.report.output.as_mut() {
            resolve(output, base);
        }
    }

    fn validate(&self) -> Result<()> {
        if self.producer_schema.as_os_str().is_empty() {
            return Err(LoaderError::InvalidConfig(
                "producer_schema cannot be empty".to_string(),
            ));
        }
        if self.consumer_requirements.as_os_str().is_empty() {
            return Err(LoaderError::InvalidConfig(
                "consumer_requirements cannot be empty".to_string(),
            ));
        }
        Ok(())
    }
}

fn resolve(path: &mut PathBuf, base: &Path) {
    if path.is_relative() {
        *path = base.join(&*path);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_section_defaults_when_absent() {
        let config: AgentConfig = serde_yaml::from_str(
            "producer_schema: p.json\nconsumer_requirements: c.json\n",
        )
        .unwrap();
        assert_eq!(config.report, ReportConfig::default());
    }

    #[test]
    fn test_resolve_paths_keeps_absolute_paths() {
        let mut config = AgentConfig::new("/abs/p.json", "c.json");
        config.report.output = Some(PathBuf::from("out/report.txt"));
        config.resolve_paths(Path::new("/base"));

        assert_eq!(config.producer_schema, PathBuf::from("/abs/p.json"));
        assert_eq!(config.consumer_requirements, PathBuf::from("/base/c.json"));
        assert_eq!(
            config.report.output,
            Some(PathBuf::from("/base/out/report.txt"))
        );
    }

    #[test]
    fn test_validate_rejects_empty_paths() {
        let config = AgentConfig::new("", "c.json");
        assert!(matches!(
            config.validate(),
            Err(LoaderError::InvalidConfig(_))
        ));
    }
}
