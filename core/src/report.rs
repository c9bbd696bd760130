use serde::{Deserialize, Serialize};

use crate::{ConsumerRequirements, Contract, Issue, ProducerSchema, check, synthesize};

/// Outcome of one reconciliation run: the contract plus its issues.
///
/// Reports are built fresh per run and are suitable for serializing to JSON
/// or YAML for downstream tooling.
///
/// # Examples
///
/// ```
/// use data_contract_core::*;
///
/// let producer = ProducerSchema::new().with_column("id", "int");
/// let consumer = ConsumerRequirements::new().with_required("id", "int");
///
/// let report = reconcile(&producer, &consumer);
/// assert!(report.is_compliant());
/// assert_eq!(report.contract.len(), 1);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationReport {
    /// Report format version (populated from
    /// [`CONTRACT_FORMAT_VERSION`](crate::CONTRACT_FORMAT_VERSION)).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format_version: Option<String>,
    /// The synthesized contract.
    pub contract: Contract,
    /// Fingerprint of [`contract`](Self::contract).
    pub contract_fingerprint: String,
    /// Issues in check order.
    pub issues: Vec<Issue>,
}

impl ReconciliationReport {
    /// Bundles an existing contract with its issues.
    pub fn new(contract: Contract, issues: Vec<Issue>) -> Self {
        Self {
            format_version: Some(crate::CONTRACT_FORMAT_VERSION.to_string()),
            contract_fingerprint: contract.fingerprint(),
            contract,
            issues,
        }
    }

    /// Returns `true` if no issues were found.
    pub fn is_compliant(&self) -> bool {
        self.issues.is_empty()
    }

    /// Returns the number of issues.
    pub fn issue_count(&self) -> usize {
        self.issues.len()
    }
}

/// Synthesizes a contract and checks the producer against it.
pub fn reconcile(
    producer: &ProducerSchema,
    consumer: &ConsumerRequirements,
) -> ReconciliationReport {
    let contract = synthesize(producer, consumer);
    let issues = check(&contract, producer, consumer);
    ReconciliationReport::new(contract, issues)
}

#[cfg(test)]
mod tests {
    use crate::IssueKind;

    use super::*;

    fn worked_example() -> (ProducerSchema, ConsumerRequirements) {
        let producer = ProducerSchema::new()
            .with_column("a", "int")
            .with_column("b", "string");
        let consumer = ConsumerRequirements::new()
            .with_required("a", "int")
            .with_required("c", "bool")
            .with_optional("b", "float");
        (producer, consumer)
    }

    #[test]
    fn test_worked_example() {
        let (producer, consumer) = worked_example();
        let report = reconcile(&producer, &consumer);

        let expected: Contract = [("a", "int"), ("b", "string"), ("c", "bool")]
            .into_iter()
            .collect();
        assert_eq!(report.contract, expected);
        assert_eq!(report.issue_count(), 1);
        assert_eq!(report.issues[0].kind(), IssueKind::MissingRequiredColumn);
        assert_eq!(report.issues[0].column(), "c");
        assert!(!report.is_compliant());
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let (producer, consumer) = worked_example();
        let first = serde_json::to_string(&reconcile(&producer, &consumer)).unwrap();
        let second = serde_json::to_string(&reconcile(&producer, &consumer)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_report_carries_fingerprint_and_version() {
        let (producer, consumer) = worked_example();
        let report = reconcile(&producer, &consumer);
        assert_eq!(report.contract_fingerprint, report.contract.fingerprint());
        assert_eq!(
            report.format_version.as_deref(),
            Some(crate::CONTRACT_FORMAT_VERSION)
        );
    }
}
