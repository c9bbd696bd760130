//! Contract synthesis from a producer schema and consumer requirements.
//!
//! [`synthesize`] merges both sides into a single [`Contract`]. Conflicts are
//! resolved by pass order: required columns first, then optional columns,
//! then any producer column nobody asked for. Within the first two passes a
//! type the producer declares always wins over the consumer's request.
//!
//! # Example
//!
//! ```
//! use data_contract_core::*;
//!
//! let producer = ProducerSchema::new()
//!     .with_column("a", "int")
//!     .with_column("b", "string");
//! let consumer = ConsumerRequirements::new()
//!     .with_required("a", "int")
//!     .with_required("c", "bool")
//!     .with_optional("b", "float");
//!
//! let contract = synthesize(&producer, &consumer);
//! assert_eq!(contract.get("a"), Some("int"));
//! assert_eq!(contract.get("b"), Some("string"));
//! assert_eq!(contract.get("c"), Some("bool"));
//! ```

use tracing::debug;

use crate::{Columns, ConsumerRequirements, Contract, ProducerSchema};

/// Builds the contract for one producer/consumer pair.
///
/// Never fails and never mutates its inputs.
pub fn synthesize(producer: &ProducerSchema, consumer: &ConsumerRequirements) -> Contract {
    let mut columns = Columns::new();

    apply_required(&mut columns, producer, &consumer.required_columns);
    let after_required = columns.len();

    apply_optional(&mut columns, producer, &consumer.optional_columns);
    let after_optional = columns.len();

    fill_from_producer(&mut columns, producer);

    debug!(
        required = after_required,
        optional_added = after_optional - after_required,
        producer_added = columns.len() - after_optional,
        "synthesized contract"
    );

    Contract::new(columns)
}

/// Pass 1: required columns always set their entry.
fn apply_required(columns: &mut Columns, producer: &ProducerSchema, required: &Columns) {
    for (name, requested) in required {
        let agreed = producer.type_of(name).unwrap_or(requested.as_str());
        columns.insert(name.clone(), agreed.to_string());
    }
}

/// Pass 2: optional columns only fill gaps left by pass 1.
fn apply_optional(columns: &mut Columns, producer: &ProducerSchema, optional: &Columns) {
    for (name, requested) in optional {
        if columns.contains_key(name) {
            continue;
        }
        let agreed = producer.type_of(name).unwrap_or(requested.as_str());
        columns.insert(name.clone(), agreed.to_string());
    }
}

/// Pass 3: expose producer columns the consumer never mentioned.
fn fill_from_producer(columns: &mut Columns, producer: &ProducerSchema) {
    for (name, declared) in &producer.columns {
        columns
            .entry(name.clone())
            .or_insert_with(|| declared.clone());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_absent_from_producer_uses_consumer_type() {
        let producer = ProducerSchema::new();
        let consumer = ConsumerRequirements::new().with_required("c", "bool");

        let contract = synthesize(&producer, &consumer);
        assert_eq!(contract.get("c"), Some("bool"));
    }

    #[test]
    fn test_producer_type_wins_for_required_and_optional() {
        let producer = ProducerSchema::new()
            .with_column("x", "string")
            .with_column("y", "float");
        let consumer = ConsumerRequirements::new()
            .with_required("x", "int")
            .with_optional("y", "double");

        let contract = synthesize(&producer, &consumer);
        assert_eq!(contract.get("x"), Some("string"));
        assert_eq!(contract.get("y"), Some("float"));
    }

    #[test]
    fn test_required_entry_is_not_overridden_by_optional() {
        let producer = ProducerSchema::new();
        let consumer = ConsumerRequirements::new()
            .with_required("id", "int")
            .with_optional("id", "string");

        let contract = synthesize(&producer, &consumer);
        assert_eq!(contract.get("id"), Some("int"));
    }

    #[test]
    fn test_conflicting_required_and_optional_with_producer_column() {
        let producer = ProducerSchema::new().with_column("id", "bigint");
        let consumer = ConsumerRequirements::new()
            .with_required("id", "int")
            .with_optional("id", "string");

        let contract = synthesize(&producer, &consumer);
        assert_eq!(contract.get("id"), Some("bigint"));
        assert_eq!(contract.len(), 1);
    }

    #[test]
    fn test_optional_absent_from_producer_uses_consumer_type() {
        let producer = ProducerSchema::new().with_column("a", "int");
        let consumer = ConsumerRequirements::new().with_optional("z", "date");

        let contract = synthesize(&producer, &consumer);
        assert_eq!(contract.get("z"), Some("date"));
        assert_eq!(contract.get("a"), Some("int"));
    }

    #[test]
    fn test_every_producer_column_lands_in_contract() {
        let producer = ProducerSchema::new()
            .with_column("a", "int")
            .with_column("b", "string")
            .with_column("extra", "bool");
        let consumer = ConsumerRequirements::new().with_required("a", "int");

        let contract = synthesize(&producer, &consumer);
        for (name, declared) in &producer.columns {
            assert_eq!(contract.get(name), Some(declared.as_str()));
        }
    }

    #[test]
    fn test_empty_inputs_yield_empty_contract() {
        let contract = synthesize(&ProducerSchema::new(), &ConsumerRequirements::new());
        assert!(contract.is_empty());
    }

    #[test]
    fn test_inputs_are_not_mutated() {
        let producer = ProducerSchema::new().with_column("a", "int");
        let consumer = ConsumerRequirements::new()
            .with_required("b", "int")
            .with_optional("c", "string");
        let producer_before = producer.clone();
        let consumer_before = consumer.clone();

        let _ = synthesize(&producer, &consumer);
        assert_eq!(producer, producer_before);
        assert_eq!(consumer, consumer_before);
    }
}
