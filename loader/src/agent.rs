//! Orchestration of a full reconciliation run.

use std::io::Write;
use std::path::Path;

use data_contract_core::{ReconciliationReport, reconcile};
use tracing::{info, info_span};

use crate::error::Result;
use crate::loader::SchemaDocuments;
use crate::output::Communicator;

/// Loads the input documents, reconciles them and notifies the result.
///
/// # Examples
///
/// ```no_run
/// use data_contract_loader::{Communicator, DataContractAgent};
///
/// let mut agent = DataContractAgent::new(Communicator::new(std::io::stdout()));
/// let report = agent
///     .run(
///         "sample_data/producer_schema.json",
///         "sample_data/consumer_requirements.json",
///     )
///     .unwrap();
/// println!("{} issue(s)", report.issue_count());
/// ```
#[derive(Debug)]
pub struct DataContractAgent<W: Write> {
    communicator: Communicator<W>,
}

impl<W: Write> DataContractAgent<W> {
    pub fn new(communicator: Communicator<W>) -> Self {
        Self { communicator }
    }

    /// Runs the workflow on two document paths.
    ///
    /// # Errors
    ///
    /// Returns the loader error for an unreadable or malformed document, or
    /// [`LoaderError::Notify`](crate::LoaderError::Notify) if the notification cannot be written.
    pub fn run(
        &mut self,
        producer_path: impl AsRef<Path>,
        consumer_path: impl AsRef<Path>,
    ) -> Result<ReconciliationReport> {
        let documents = SchemaDocuments::load(producer_path, consumer_path)?;
        self.run_documents(&documents)
    }

    /// Runs the workflow on documents that are already loaded.
    pub fn run_documents(&mut self, documents: &SchemaDocuments) -> Result<ReconciliationReport> {
        let span = info_span!(
            "reconcile",
            producer = %documents.producer_path.display(),
            consumer = %documents.consumer_path.display()
        );
        let _guard = span.enter();

        let report = reconcile(&documents.producer, &documents.consumer);
        info!(
            columns = report.contract.len(),
            issues = report.issue_count(),
            fingerprint = %report.contract_fingerprint,
            "reconciliation complete"
        );

        self.communicator.notify(&report)?;

        Ok(report)
    }

    /// Returns the communicator, e.g. to inspect a buffered writer.
    pub fn into_communicator(self) -> Communicator<W> {
        self.communicator
    }
}
