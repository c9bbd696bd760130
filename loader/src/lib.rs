//! Document loading, run configuration and reporting around the data
//! contract core.
//!
//! The core crate only reconciles in-memory values. This crate supplies
//! everything around it: reading producer/consumer documents from disk,
//! the YAML agent configuration, report formatting and the agent that wires
//! the steps together.
//!
//! # Quick start
//!
//! ```no_run
//! use data_contract_loader::{Communicator, DataContractAgent, OutputFormat, SchemaDocuments};
//!
//! // Load the conventional document pair and print a JSON report
//! let docs = SchemaDocuments::from_dir("sample_data").unwrap();
//! let report = data_contract_core::reconcile(&docs.producer, &docs.consumer);
//! println!("{}", data_contract_loader::format_report(&report, OutputFormat::Json).unwrap());
//!
//! // Or run the full workflow with console notification
//! let mut agent = DataContractAgent::new(Communicator::new(std::io::stdout()));
//! agent
//!     .run(
//!         "sample_data/producer_schema.json",
//!         "sample_data/consumer_requirements.json",
//!     )
//!     .unwrap();
//! ```

mod agent;
mod config;
mod error;
mod loader;
mod output;

pub use agent::DataContractAgent;
pub use config::{AgentConfig, ReportConfig};
pub use error::{LoaderError, Result};
pub use loader::{
    CONSUMER_REQUIREMENTS_FILE, DocumentFormat, PRODUCER_SCHEMA_FILE, SchemaDocuments,
    load_consumer_requirements, load_contract, load_document, load_producer_schema,
};
pub use output::{Communicator, OutputFormat, format_contract_json, format_report};
