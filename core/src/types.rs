//! Schema type definitions for producer/consumer reconciliation.
//!
//! This module defines the data model shared by the synthesizer and the
//! checker. All types serialize with [`serde`] using the same document keys
//! the loader reads (`columns`, `required_columns`, `optional_columns`).

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Version of the reconciliation report format (semver).
pub const CONTRACT_FORMAT_VERSION: &str = "1.0.0";

/// Opaque column type label such as `"int"` or `"string"`.
///
/// Labels are compared with exact, case-sensitive equality. No normalization
/// is ever applied.
pub type TypeLabel = String;

/// Mapping from column name to type label.
///
/// Iteration is ordered by column name so that every pass over a mapping is
/// deterministic.
pub type Columns = BTreeMap<String, TypeLabel>;

/// The schema a producer declares for the data it publishes.
///
/// # Examples
///
/// ```
/// use data_contract_core::ProducerSchema;
///
/// let schema = ProducerSchema::new()
///     .with_column("id", "int")
///     .with_column("email", "string");
///
/// assert_eq!(schema.type_of("id"), Some("int"));
/// assert!(!schema.contains("phone"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProducerSchema {
    /// Declared columns. A document without `columns` loads as empty.
    #[serde(default)]
    pub columns: Columns,
}

impl ProducerSchema {
    /// Creates an empty producer schema.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a column declaration.
    pub fn with_column(mut self, name: impl Into<String>, type_label: impl Into<String>) -> Self {
        self.columns.insert(name.into(), type_label.into());
        self
    }

    /// Returns the declared type for `column`, if the producer has it.
    pub fn type_of(&self, column: &str) -> Option<&str> {
        self.columns.get(column).map(String::as_str)
    }

    /// Returns `true` if the producer declares `column`.
    pub fn contains(&self, column: &str) -> bool {
        self.columns.contains_key(column)
    }
}

/// How a consumer classifies a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnRequirement {
    /// Listed in `required_columns`.
    Required,
    /// Listed in `optional_columns` only.
    Optional,
    /// Not mentioned by the consumer at all.
    Unspecified,
}

/// The columns a consumer needs (and would like) from a producer.
///
/// # Examples
///
/// ```
/// use data_contract_core::{ColumnRequirement, ConsumerRequirements};
///
/// let reqs = ConsumerRequirements::new()
///     .with_required("id", "int")
///     .with_optional("nickname", "string");
///
/// assert_eq!(reqs.classify("id"), ColumnRequirement::Required);
/// assert_eq!(reqs.classify("nickname"), ColumnRequirement::Optional);
/// assert_eq!(reqs.classify("other"), ColumnRequirement::Unspecified);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsumerRequirements {
    /// Columns the consumer cannot work without.
    #[serde(default)]
    pub required_columns: Columns,
    /// Columns the consumer would use when available.
    #[serde(default)]
    pub optional_columns: Columns,
}

impl ConsumerRequirements {
    /// Creates an empty requirement set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a required column.
    pub fn with_required(mut self, name: impl Into<String>, type_label: impl Into<String>) -> Self {
        self.required_columns.insert(name.into(), type_label.into());
        self
    }

    /// Adds an optional column.
    pub fn with_optional(mut self, name: impl Into<String>, type_label: impl Into<String>) -> Self {
        self.optional_columns.insert(name.into(), type_label.into());
        self
    }

    /// Classifies `column`. A column listed as both required and optional
    /// is required.
    pub fn classify(&self, column: &str) -> ColumnRequirement {
        if self.required_columns.contains_key(column) {
            ColumnRequirement::Required
        } else if self.optional_columns.contains_key(column) {
            ColumnRequirement::Optional
        } else {
            ColumnRequirement::Unspecified
        }
    }
}

/// The agreed set of columns and types between a producer and a consumer.
///
/// A contract is built once by [`synthesize`](crate::synthesize) and is
/// read-only afterwards.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Contract {
    #[serde(default)]
    columns: Columns,
}

impl Contract {
    /// Wraps an already agreed column mapping.
    pub fn new(columns: Columns) -> Self {
        Self { columns }
    }

    /// Returns the agreed type for `column`.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.columns.get(column).map(String::as_str)
    }

    /// Returns `true` if the contract covers `column`.
    pub fn contains(&self, column: &str) -> bool {
        self.columns.contains_key(column)
    }

    /// Number of columns in the contract.
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    /// Returns `true` if the contract has no columns.
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    /// Iterates `(column, type)` pairs in column-name order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.columns
            .iter()
            .map(|(name, type_label)| (name.as_str(), type_label.as_str()))
    }

    /// Borrows the underlying column mapping.
    pub fn columns(&self) -> &Columns {
        &self.columns
    }

    /// SHA-256 over the column mapping, as lowercase hex.
    ///
    /// Two contracts with the same columns and types always share a
    /// fingerprint, so downstream tooling can detect contract drift without
    /// diffing documents.
    ///
    /// # Examples
    ///
    /// ```
    /// use data_contract_core::{Columns, Contract};
    ///
    /// let mut columns = Columns::new();
    /// columns.insert("id".into(), "int".into());
    /// let a = Contract::new(columns.clone());
    /// let b = Contract::new(columns);
    /// assert_eq!(a.fingerprint(), b.fingerprint());
    /// assert_eq!(a.fingerprint().len(), 64);
    /// ```
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for (name, type_label) in &self.columns {
            hasher.update(name.as_bytes());
            hasher.update([0u8]);
            hasher.update(type_label.as_bytes());
            hasher.update([0u8]);
        }
        format!("{:x}", hasher.finalize())
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Contract {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::new(
            iter.into_iter()
                .map(|(name, type_label)| (name.into(), type_label.into()))
                .collect(),
        )
    }
}

impl fmt::Display for Contract {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (name, type_label) in self.iter() {
            writeln!(f, "{name}: {type_label}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_producer_schema_missing_columns_key_is_empty() {
        let schema: ProducerSchema = serde_json::from_str("{}").unwrap();
        assert!(schema.columns.is_empty());
    }

    #[test]
    fn test_consumer_requirements_default_to_empty() {
        let reqs: ConsumerRequirements =
            serde_json::from_str(r#"{"required_columns": {"id": "int"}}"#).unwrap();
        assert_eq!(reqs.required_columns.len(), 1);
        assert!(reqs.optional_columns.is_empty());
    }

    #[test]
    fn test_classify_prefers_required() {
        let reqs = ConsumerRequirements::new()
            .with_required("id", "int")
            .with_optional("id", "string");
        assert_eq!(reqs.classify("id"), ColumnRequirement::Required);
    }

    #[test]
    fn test_contract_serializes_under_columns_key() {
        let contract: Contract = [("a", "int")].into_iter().collect();
        let json = serde_json::to_value(&contract).unwrap();
        assert_eq!(json, serde_json::json!({"columns": {"a": "int"}}));
    }

    #[test]
    fn test_contract_display_lists_columns() {
        let contract: Contract = [("b", "string"), ("a", "int")].into_iter().collect();
        assert_eq!(contract.to_string(), "a: int\nb: string\n");
    }

    #[test]
    fn test_fingerprint_distinguishes_types() {
        let a: Contract = [("a", "int")].into_iter().collect();
        let b: Contract = [("a", "Int")].into_iter().collect();
        assert_ne!(a.fingerprint(), b.fingerprint());
    }
}
