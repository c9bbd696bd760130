//! Loading producer schemas, consumer requirements and contracts from disk.
//!
//! Documents are JSON by default; files ending in `.yaml` or `.yml` are read
//! as YAML. Shape errors (for example a `columns` field that is not a
//! mapping of strings) are rejected here, before anything reaches the core.
//!
//! ```no_run
//! use data_contract_loader::{SchemaDocuments, load_producer_schema};
//!
//! let producer = load_producer_schema("sample_data/producer_schema.json").unwrap();
//! println!("producer declares {} column(s)", producer.columns.len());
//!
//! // Conventional pair in one directory
//! let docs = SchemaDocuments::from_dir("sample_data").unwrap();
//! assert_eq!(docs.producer, producer);
//! ```

use std::io::BufReader;
use std::path::{Path, PathBuf};

use data_contract_core::{ConsumerRequirements, Contract, ProducerSchema};
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::error::{LoaderError, Result};

/// File name of the producer schema inside a documents directory.
pub const PRODUCER_SCHEMA_FILE: &str = "producer_schema.json";

/// File name of the consumer requirements inside a documents directory.
pub const CONSUMER_REQUIREMENTS_FILE: &str = "consumer_requirements.json";

/// Serialization format of an input document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DocumentFormat {
    Json,
    Yaml,
}

impl DocumentFormat {
    /// Picks the format from a file extension; anything but `yaml`/`yml` is
    /// JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                Self::Yaml
            }
            _ => Self::Json,
        }
    }
}

/// Reads and deserializes a JSON or YAML document.
///
/// # Errors
///
/// Returns [`LoaderError::Io`] if the file cannot be opened, or
/// [`LoaderError::Json`]/[`LoaderError::Yaml`] if it does not match `T`.
pub fn load_document<T: DeserializeOwned>(path: impl AsRef<Path>) -> Result<T> {
    let path = path.as_ref();
    let file = std::fs::File::open(path).map_err(|source| LoaderError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let reader = BufReader::new(file);

    let format = DocumentFormat::from_path(path);
    debug!(path = %path.display(), ?format, "loading document");

    match format {
        DocumentFormat::Json => {
            serde_json::from_reader(reader).map_err(|source| LoaderError::Json {
                path: path.to_path_buf(),
                source,
            })
        }
        DocumentFormat::Yaml => {
            serde_yaml::from_reader(reader).map_err(|source| LoaderError::Yaml {
                path: path.to_path_buf(),
                source,
            })
        }
    }
}

/// Loads a producer schema document (`{"columns": {...}}`).
pub fn load_producer_schema(path: impl AsRef<Path>) -> Result<ProducerSchema> {
    load_document(path)
}

/// Loads a consumer requirements document
/// (`{"required_columns": {...}, "optional_columns": {...}}`).
pub fn load_consumer_requirements(path: impl AsRef<Path>) -> Result<ConsumerRequirements> {
    load_document(path)
}

/// Loads a previously written contract document (`{"columns": {...}}`).
pub fn load_contract(path: impl AsRef<Path>) -> Result<Contract> {
    load_document(path)
}

/// A producer schema and consumer requirements loaded together.
#[derive(Debug, Clone)]
pub struct SchemaDocuments {
    pub producer: ProducerSchema,
    pub consumer: ConsumerRequirements,
    pub producer_path: PathBuf,
    pub consumer_path: PathBuf,
}

impl SchemaDocuments {
    /// Loads both documents from explicit paths.
    ///
    /// # Errors
    ///
    /// Fails with the first document that cannot be read or parsed.
    pub fn load(producer_path: impl AsRef<Path>, consumer_path: impl AsRef<Path>) -> Result<Self> {
        let producer_path = producer_path.as_ref().to_path_buf();
        let consumer_path = consumer_path.as_ref().to_path_buf();
        let producer = load_producer_schema(&producer_path)?;
        let consumer = load_consumer_requirements(&consumer_path)?;
        Ok(Self {
            producer,
            consumer,
            producer_path,
            consumer_path,
        })
    }

    /// Loads [`PRODUCER_SCHEMA_FILE`] and [`CONSUMER_REQUIREMENTS_FILE`] from
    /// `dir`.
    pub fn from_dir(dir: impl AsRef<Path>) -> Result<Self> {
        let dir = dir.as_ref();
        Self::load(
            dir.join(PRODUCER_SCHEMA_FILE),
            dir.join(CONSUMER_REQUIREMENTS_FILE),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_from_extension() {
        assert_eq!(
            DocumentFormat::from_path(Path::new("a/schema.yaml")),
            DocumentFormat::Yaml
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("schema.YML")),
            DocumentFormat::Yaml
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("schema.json")),
            DocumentFormat::Json
        );
        assert_eq!(
            DocumentFormat::from_path(Path::new("schema")),
            DocumentFormat::Json
        );
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = load_producer_schema("does/not/exist.json").unwrap_err();
        assert!(matches!(err, LoaderError::Io { .. }));
        assert!(err.to_string().contains("does/not/exist.json"));
    }
}
