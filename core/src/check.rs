//! Compliance checking of a producer schema against a synthesized contract.
//!
//! [`check`] runs two passes and concatenates their findings in order:
//!
//! 1. every required column the producer does not declare yields an
//!    [`Issue::MissingRequiredColumn`];
//! 2. every contract column the producer declares with a different type
//!    string yields an [`Issue::TypeMismatch`].
//!
//! # Examples
//!
//! ```
//! use data_contract_core::*;
//!
//! let producer = ProducerSchema::new().with_column("a", "int");
//! let consumer = ConsumerRequirements::new()
//!     .with_required("a", "int")
//!     .with_required("c", "bool");
//!
//! let contract = synthesize(&producer, &consumer);
//! let issues = check(&contract, &producer, &consumer);
//! assert_eq!(
//!     issues,
//!     vec![Issue::MissingRequiredColumn {
//!         column: "c".into(),
//!         required_type: "bool".into(),
//!     }]
//! );
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::{ConsumerRequirements, Contract, ProducerSchema, TypeLabel};

/// Category of a compliance issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueKind {
    /// A consumer-required column is missing from the producer schema.
    MissingRequiredColumn,
    /// The producer declares a contract column with a different type.
    TypeMismatch,
}

impl IssueKind {
    /// Stable snake_case identifier, matching the serialized form.
    pub fn as_str(self) -> &'static str {
        match self {
            IssueKind::MissingRequiredColumn => "missing_required_column",
            IssueKind::TypeMismatch => "type_mismatch",
        }
    }
}

/// A deviation between the producer schema, the contract and the consumer's
/// requirements.
///
/// The `Display` text always contains the column name and the relevant
/// type labels verbatim, each wrapped in single quotes.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Issue {
    /// Required column absent from the producer schema.
    #[error("Producer missing required column '{column}' of type '{required_type}'.")]
    MissingRequiredColumn {
        column: String,
        required_type: TypeLabel,
    },
    /// Producer type differs from the contract type.
    #[error(
        "Column '{column}' type mismatch: producer '{producer_type}', contract '{contract_type}'."
    )]
    TypeMismatch {
        column: String,
        producer_type: TypeLabel,
        contract_type: TypeLabel,
    },
}

impl Issue {
    /// Returns the issue category.
    pub fn kind(&self) -> IssueKind {
        match self {
            Issue::MissingRequiredColumn { .. } => IssueKind::MissingRequiredColumn,
            Issue::TypeMismatch { .. } => IssueKind::TypeMismatch,
        }
    }

    /// Returns the offending column name.
    pub fn column(&self) -> &str {
        match self {
            Issue::MissingRequiredColumn { column, .. } | Issue::TypeMismatch { column, .. } => {
                column
            }
        }
    }
}

/// Checks a producer schema against a contract and the consumer's
/// requirements.
///
/// Coverage issues come first, followed by type mismatches. An empty result
/// means full compliance.
///
/// The consumer's requested type for a required column is never compared to
/// the producer's type directly. Once the producer declares the column, the
/// contract carries the producer's type, so only later drift between the two
/// shows up as a mismatch.
pub fn check(
    contract: &Contract,
    producer: &ProducerSchema,
    consumer: &ConsumerRequirements,
) -> Vec<Issue> {
    let mut issues = check_required_coverage(producer, consumer);
    let missing = issues.len();
    issues.extend(check_contract_conformance(contract, producer));

    debug!(
        missing_required = missing,
        type_mismatches = issues.len() - missing,
        "checked producer compliance"
    );

    issues
}

fn check_required_coverage(
    producer: &ProducerSchema,
    consumer: &ConsumerRequirements,
) -> Vec<Issue> {
    consumer
        .required_columns
        .iter()
        .filter(|(column, _)| !producer.contains(column))
        .map(|(column, required_type)| Issue::MissingRequiredColumn {
            column: column.clone(),
            required_type: required_type.clone(),
        })
        .collect()
}

fn check_contract_conformance(contract: &Contract, producer: &ProducerSchema) -> Vec<Issue> {
    let mut issues = Vec::new();

    for (column, contract_type) in contract.iter() {
        let Some(producer_type) = producer.type_of(column) else {
            continue;
        };
        if producer_type != contract_type {
            issues.push(Issue::TypeMismatch {
                column: column.to_string(),
                producer_type: producer_type.to_string(),
                contract_type: contract_type.to_string(),
            });
        }
    }

    issues
}

#[cfg(test)]
mod tests {
    use crate::synthesize;

    use super::*;

    #[test]
    fn test_missing_required_column_reported_once() {
        let producer = ProducerSchema::new().with_column("a", "int");
        let consumer = ConsumerRequirements::new()
            .with_required("a", "int")
            .with_required("c", "bool");

        let contract = synthesize(&producer, &consumer);
        let issues = check(&contract, &producer, &consumer);

        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind(), IssueKind::MissingRequiredColumn);
        assert_eq!(issues[0].column(), "c");
        assert_eq!(contract.get("c"), Some("bool"));
    }

    #[test]
    fn test_mismatch_against_stored_contract() {
        let contract: Contract = [("a", "int"), ("b", "string")].into_iter().collect();
        let producer = ProducerSchema::new()
            .with_column("a", "bigint")
            .with_column("b", "string");

        let issues = check(&contract, &producer, &ConsumerRequirements::new());
        assert_eq!(
            issues,
            vec![Issue::TypeMismatch {
                column: "a".into(),
                producer_type: "bigint".into(),
                contract_type: "int".into(),
            }]
        );
    }

    #[test]
    fn test_type_comparison_is_case_sensitive() {
        let contract: Contract = [("a", "int")].into_iter().collect();
        let producer = ProducerSchema::new().with_column("a", "INT");

        let issues = check(&contract, &producer, &ConsumerRequirements::new());
        assert_eq!(issues.len(), 1);
        assert_eq!(issues[0].kind(), IssueKind::TypeMismatch);
    }

    #[test]
    fn test_coverage_issues_precede_mismatches() {
        let contract: Contract = [("a", "int"), ("z", "bool")].into_iter().collect();
        let producer = ProducerSchema::new().with_column("a", "string");
        let consumer = ConsumerRequirements::new().with_required("z", "bool");

        let issues = check(&contract, &producer, &consumer);
        let kinds: Vec<_> = issues.iter().map(Issue::kind).collect();
        assert_eq!(
            kinds,
            vec![IssueKind::MissingRequiredColumn, IssueKind::TypeMismatch]
        );
    }

    #[test]
    fn test_absent_optional_column_is_silently_accepted() {
        let producer = ProducerSchema::new().with_column("a", "int");
        let consumer = ConsumerRequirements::new().with_optional("nickname", "string");

        let contract = synthesize(&producer, &consumer);
        assert!(contract.contains("nickname"));
        assert!(check(&contract, &producer, &consumer).is_empty());
    }

    #[test]
    fn test_required_type_request_is_advisory_when_producer_declares_column() {
        let producer = ProducerSchema::new().with_column("x", "string");
        let consumer = ConsumerRequirements::new().with_required("x", "int");

        let contract = synthesize(&producer, &consumer);
        assert_eq!(contract.get("x"), Some("string"));
        assert!(check(&contract, &producer, &consumer).is_empty());
    }

    #[test]
    fn test_issue_text_contains_column_and_types() {
        let missing = Issue::MissingRequiredColumn {
            column: "c".into(),
            required_type: "bool".into(),
        };
        assert_eq!(
            missing.to_string(),
            "Producer missing required column 'c' of type 'bool'."
        );

        let mismatch = Issue::TypeMismatch {
            column: "x".into(),
            producer_type: "string".into(),
            contract_type: "int".into(),
        };
        assert_eq!(
            mismatch.to_string(),
            "Column 'x' type mismatch: producer 'string', contract 'int'."
        );
    }

    #[test]
    fn test_issue_serializes_with_kind_tag() {
        let issue = Issue::MissingRequiredColumn {
            column: "c".into(),
            required_type: "bool".into(),
        };
        let json = serde_json::to_value(&issue).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "kind": "missing_required_column",
                "column": "c",
                "required_type": "bool"
            })
        );
        assert_eq!(IssueKind::TypeMismatch.as_str(), "type_mismatch");
    }
}
