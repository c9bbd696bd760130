//! Contract synthesis and compliance checking for data producers and
//! consumers.
//!
//! A producer declares the columns it publishes ([`ProducerSchema`]); a
//! consumer declares the columns it needs and would like
//! ([`ConsumerRequirements`]). This crate reconciles the two:
//!
//! - [`synthesize`] merges both sides into a [`Contract`], preferring the
//!   producer's declared type whenever the producer has the column.
//! - [`check`] lists the [`Issue`]s where the producer falls short: required
//!   columns it does not declare, and declared types that differ from the
//!   contract.
//! - [`reconcile`] runs both and returns a [`ReconciliationReport`].
//!
//! Everything here is pure: no I/O, no shared state, no failure modes.
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
//! assert_eq!(contract.get("b"), Some("string"));
//!
//! let issues = check(&contract, &producer, &consumer);
//! assert_eq!(issues.len(), 1);
//! assert_eq!(issues[0].kind(), IssueKind::MissingRequiredColumn);
//! ```

mod check;
mod report;
mod synthesize;
mod types;

pub use check::{Issue, IssueKind, check};
pub use report::{ReconciliationReport, reconcile};
pub use synthesize::synthesize;
pub use types::*;
