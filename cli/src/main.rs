use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use clap::{Args, Parser, Subcommand};
use data_contract_core::{ReconciliationReport, check, synthesize};
use data_contract_loader::{
    AgentConfig, Communicator, DataContractAgent, OutputFormat, SchemaDocuments,
    format_contract_json, load_contract,
};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

/// Exit code for a successful run that found compliance issues while
/// `--fail-on-issues` is in effect.
const EXIT_ISSUES_FOUND: i32 = 2;

/// CLI-specific output format enum with clap argument parsing support.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum CliOutputFormat {
    Text,
    Json,
    Yaml,
    Markdown,
}

impl From<CliOutputFormat> for OutputFormat {
    fn from(fmt: CliOutputFormat) -> Self {
        match fmt {
            CliOutputFormat::Text => Self::Text,
            CliOutputFormat::Json => Self::Json,
            CliOutputFormat::Yaml => Self::Yaml,
            CliOutputFormat::Markdown => Self::Markdown,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "contract-agent")]
#[command(about = "Synthesize data contracts between producers and consumers and enforce them")]
#[command(version)]
struct Cli {
    /// Enable debug logging on stderr (overrides RUST_LOG).
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Synthesize a contract, check the producer against it and report.
    Run(RunArgs),
    /// Synthesize a contract and write it as JSON.
    Synthesize(SynthesizeArgs),
    /// Check a producer schema against a previously written contract.
    Check(CheckArgs),
    /// Run against the producer/consumer pair in a sample directory.
    Demo(DemoArgs),
}

#[derive(Debug, Args)]
struct RunArgs {
    /// YAML agent configuration naming the documents and report settings.
    #[arg(long, conflicts_with_all = ["producer", "consumer"])]
    config: Option<PathBuf>,
    /// Producer schema document (JSON or YAML).
    #[arg(long, required_unless_present = "config")]
    producer: Option<PathBuf>,
    /// Consumer requirements document (JSON or YAML).
    #[arg(long, required_unless_present = "config")]
    consumer: Option<PathBuf>,
    /// Report format (default: text, or the configured format).
    #[arg(long)]
    format: Option<CliOutputFormat>,
    /// Write the report to a file instead of stdout.
    #[arg(long)]
    output: Option<PathBuf>,
    /// Exit with status 2 when any compliance issue is found.
    #[arg(long)]
    fail_on_issues: bool,
}

#[derive(Debug, Args)]
struct SynthesizeArgs {
    /// Producer schema document (JSON or YAML).
    #[arg(long)]
    producer: PathBuf,
    /// Consumer requirements document (JSON or YAML).
    #[arg(long)]
    consumer: PathBuf,
    /// Output contract path (stdout when omitted).
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Args)]
struct CheckArgs {
    /// Contract document previously written by `synthesize`.
    #[arg(long)]
    contract: PathBuf,
    /// Producer schema document (JSON or YAML).
    #[arg(long)]
    producer: PathBuf,
    /// Consumer requirements document (JSON or YAML).
    #[arg(long)]
    consumer: PathBuf,
    /// Report format.
    #[arg(long, default_value = "text")]
    format: CliOutputFormat,
    /// Exit with status 2 when any compliance issue is found.
    #[arg(long)]
    fail_on_issues: bool,
}

#[derive(Debug, Args)]
struct DemoArgs {
    /// Directory containing producer_schema.json and consumer_requirements.json.
    #[arg(long, default_value = "sample_data")]
    dir: PathBuf,
}

/// How a successful command finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum RunStatus {
    Clean,
    IssuesFound,
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Command::Run(args) => run_reconcile(args),
        Command::Synthesize(args) => run_synthesize(args),
        Command::Check(args) => run_check(args),
        Command::Demo(args) => run_demo(args),
    };

    match result {
        Ok(RunStatus::Clean) => {}
        Ok(RunStatus::IssuesFound) => std::process::exit(EXIT_ISSUES_FOUND),
        Err(err) => {
            eprintln!("error: {err}");
            std::process::exit(1);
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run_reconcile(args: RunArgs) -> Result<RunStatus, String> {
    let mut config = match (&args.config, &args.producer, &args.consumer) {
        (Some(path), _, _) => AgentConfig::load(path).map_err(|e| e.to_string())?,
        (None, Some(producer), Some(consumer)) => AgentConfig::new(producer, consumer),
        _ => return Err("Specify --config, or both --producer and --consumer".to_string()),
    };

    if let Some(format) = args.format {
        config.report.format = format.into();
    }
    if args.output.is_some() {
        config.report.output = args.output;
    }
    config.report.fail_on_issues |= args.fail_on_issues;

    debug!(?config, "resolved agent configuration");

    let writer = open_report_writer(config.report.output.as_deref())?;
    let mut agent = DataContractAgent::new(Communicator::with_format(writer, config.report.format));
    let report = agent
        .run(&config.producer_schema, &config.consumer_requirements)
        .map_err(|e| e.to_string())?;

    if let Some(path) = &config.report.output {
        eprintln!(
            "Wrote report with {} issue(s) to '{}'.",
            report.issue_count(),
            path.display()
        );
    }

    Ok(status_for(&report, config.report.fail_on_issues))
}

fn run_synthesize(args: SynthesizeArgs) -> Result<RunStatus, String> {
    let documents =
        SchemaDocuments::load(&args.producer, &args.consumer).map_err(|e| e.to_string())?;
    let contract = synthesize(&documents.producer, &documents.consumer);
    let raw = format_contract_json(&contract).map_err(|e| e.to_string())?;

    match &args.output {
        Some(path) => {
            create_parent_dir(path)?;
            fs::write(path, raw)
                .map_err(|err| format!("Failed to write '{}': {err}", path.display()))?;
            info!(columns = contract.len(), path = %path.display(), "wrote contract");
            eprintln!(
                "Wrote contract with {} column(s) to '{}'.",
                contract.len(),
                path.display()
            );
        }
        None => print!("{raw}"),
    }

    Ok(RunStatus::Clean)
}

fn run_check(args: CheckArgs) -> Result<RunStatus, String> {
    let contract = load_contract(&args.contract).map_err(|e| e.to_string())?;
    let documents =
        SchemaDocuments::load(&args.producer, &args.consumer).map_err(|e| e.to_string())?;

    let issues = check(&contract, &documents.producer, &documents.consumer);
    let report = ReconciliationReport::new(contract, issues);
    info!(issues = report.issue_count(), "checked stored contract");

    let mut communicator = Communicator::with_format(std::io::stdout(), args.format.into());
    communicator.notify(&report).map_err(|e| e.to_string())?;

    Ok(status_for(&report, args.fail_on_issues))
}

fn run_demo(args: DemoArgs) -> Result<RunStatus, String> {
    let documents = SchemaDocuments::from_dir(&args.dir).map_err(|e| e.to_string())?;
    let mut agent = DataContractAgent::new(Communicator::new(std::io::stdout()));
    agent
        .run_documents(&documents)
        .map_err(|e| e.to_string())?;
    Ok(RunStatus::Clean)
}

fn status_for(report: &ReconciliationReport, fail_on_issues: bool) -> RunStatus {
    if fail_on_issues && !report.is_compliant() {
        RunStatus::IssuesFound
    } else {
        RunStatus::Clean
    }
}

fn open_report_writer(output: Option<&Path>) -> Result<Box<dyn Write>, String> {
    match output {
        Some(path) => {
            create_parent_dir(path)?;
            let file = fs::File::create(path)
                .map_err(|err| format!("Failed to create '{}': {err}", path.display()))?;
            Ok(Box::new(std::io::BufWriter::new(file)))
        }
        None => Ok(Box::new(std::io::stdout())),
    }
}

fn create_parent_dir(path: &Path) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|err| {
                format!(
                    "Failed to create output directory '{}': {err}",
                    parent.display()
                )
            })?;
        }
    }
    Ok(())
}
