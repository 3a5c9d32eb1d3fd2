//! Pacer CLI - Command-line interface for Pacer
//!
//! Commands:
//! - summarize: Process sensor packets into workout summaries
//! - validate: Validate sensor packets against the registry
//! - codes: Print recognized workout codes
//! - demo: Run the built-in demo batch
//! - doctor: Diagnose engine health and configuration

use clap::{Parser, Subcommand, ValueEnum};
use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use pacer::pipeline::{demo_packets, TrackerProcessor};
use pacer::report::unknown_code_message;
use pacer::{PacketReader, SensorPacket, TrackerError, WorkoutRegistry, PACER_VERSION, PRODUCER_NAME};

/// Pacer - On-device summary engine for workout sensor packets
#[derive(Parser)]
#[command(name = "pacer")]
#[command(version = PACER_VERSION)]
#[command(about = "Turn workout sensor packets into summary statistics", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Process sensor packets into workout summaries
    Summarize {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Output file path (use - for stdout)
        #[arg(short, long, default_value = "-")]
        output: PathBuf,

        /// Input format
        #[arg(long, default_value = "ndjson")]
        input_format: InputFormat,

        /// Output format
        #[arg(long, default_value = "text")]
        output_format: OutputFormat,
    },

    /// Validate sensor packets against the registry
    Validate {
        /// Input file path (use - for stdin)
        #[arg(short, long)]
        input: PathBuf,

        /// Input format
        #[arg(long, default_value = "ndjson")]
        input_format: InputFormat,

        /// Output validation report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print recognized workout codes
    Codes,

    /// Run the built-in demo batch and print its summaries
    Demo,

    /// Diagnose engine health and configuration
    Doctor {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

#[derive(Clone, ValueEnum)]
enum InputFormat {
    /// Newline-delimited JSON (one packet per line)
    Ndjson,
    /// JSON array of packets
    Json,
}

#[derive(Clone, ValueEnum)]
enum OutputFormat {
    /// One summary message per line
    Text,
    /// Newline-delimited JSON (one summary per line)
    Ndjson,
    /// Batch report as JSON
    Json,
    /// Batch report as pretty-printed JSON
    JsonPretty,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!(
                "{}",
                serde_json::to_string(&CliError::from(e))
                    .unwrap_or_else(|_| "Unknown error".to_string())
            );
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> Result<(), PacerCliError> {
    match cli.command {
        Commands::Summarize {
            input,
            output,
            input_format,
            output_format,
        } => cmd_summarize(&input, &output, input_format, output_format),

        Commands::Validate {
            input,
            input_format,
            json,
        } => cmd_validate(&input, input_format, json),

        Commands::Codes => cmd_codes(),

        Commands::Demo => cmd_demo(),

        Commands::Doctor { json } => cmd_doctor(json),
    }
}

fn cmd_summarize(
    input: &Path,
    output: &Path,
    input_format: InputFormat,
    output_format: OutputFormat,
) -> Result<(), PacerCliError> {
    let packets = read_packets(input, input_format)?;

    if packets.is_empty() {
        return Err(PacerCliError::NoPackets);
    }

    let processor = TrackerProcessor::new();
    let report = processor.process(&packets);

    // Diagnostics go to stderr so piped output stays clean
    let registry = WorkoutRegistry::global();
    for failure in &report.failures {
        if registry.resolve(&failure.code).is_none() {
            eprintln!("{}", unknown_code_message(registry));
        } else {
            eprintln!("Packet {} skipped: {}", failure.index, failure.error);
        }
    }

    let output_data = match output_format {
        OutputFormat::Text => {
            let mut lines: Vec<String> = Vec::new();
            for summary in &report.entries {
                lines.push(summary.message());
            }
            lines.join("\n") + "\n"
        }
        OutputFormat::Ndjson => {
            let mut lines: Vec<String> = Vec::new();
            for summary in &report.entries {
                lines.push(serde_json::to_string(summary)?);
            }
            lines.join("\n") + "\n"
        }
        OutputFormat::Json => serde_json::to_string(&report)?,
        OutputFormat::JsonPretty => serde_json::to_string_pretty(&report)?,
    };

    if output.to_string_lossy() == "-" {
        print!("{}", output_data);
    } else {
        fs::write(output, output_data)?;
    }

    if report.failures.is_empty() {
        Ok(())
    } else {
        Err(PacerCliError::PacketsFailed(report.failures.len()))
    }
}

fn cmd_validate(input: &Path, input_format: InputFormat, json: bool) -> Result<(), PacerCliError> {
    let packets = read_packets(input, input_format)?;
    let failures = PacketReader::validate_packets(&packets);

    let report = ValidationReport {
        total_packets: packets.len(),
        valid_packets: packets.len() - failures.len(),
        invalid_packets: failures.len(),
        errors: failures
            .iter()
            .map(|f| ValidationErrorDetail {
                index: f.index,
                code: f.code.clone(),
                error: f.error.to_string(),
            })
            .collect(),
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Validation Report");
        println!("=================");
        println!("Total packets:   {}", report.total_packets);
        println!("Valid packets:   {}", report.valid_packets);
        println!("Invalid packets: {}", report.invalid_packets);

        if !report.errors.is_empty() {
            println!("\nErrors:");
            for err in &report.errors {
                println!("  - Packet {} ({}): {}", err.index, err.code, err.error);
            }
        }
    }

    if report.invalid_packets > 0 {
        Err(PacerCliError::ValidationFailed(report.invalid_packets))
    } else {
        Ok(())
    }
}

fn cmd_codes() -> Result<(), PacerCliError> {
    let registry = WorkoutRegistry::global();

    println!("Recognized workout codes:");
    for registration in registry.registrations() {
        println!(
            "  {}  {} ({} sensor values)",
            registration.code, registration.kind, registration.arity
        );
    }

    Ok(())
}

fn cmd_demo() -> Result<(), PacerCliError> {
    for packet in demo_packets() {
        match pacer::summarize_packet(&packet) {
            Ok(summary) => println!("{}", summary.message()),
            Err(e) => eprintln!("Packet {} skipped: {}", packet.code, e),
        }
    }

    Ok(())
}

fn cmd_doctor(json: bool) -> Result<(), PacerCliError> {
    let mut checks: Vec<DoctorCheck> = Vec::new();

    checks.push(DoctorCheck {
        name: "pacer_version".to_string(),
        status: CheckStatus::Ok,
        message: format!("Pacer version {}", PACER_VERSION),
    });

    // Registry integrity: every code resolves back to its own entry
    let registry = WorkoutRegistry::global();
    let mut registry_ok = true;
    for registration in registry.registrations() {
        match registry.resolve(registration.code) {
            Some(found) if found == registration => {}
            _ => registry_ok = false,
        }
    }
    checks.push(if registry_ok {
        DoctorCheck {
            name: "registry".to_string(),
            status: CheckStatus::Ok,
            message: format!(
                "{} workout codes registered: {}",
                registry.registrations().len(),
                registry.codes().collect::<Vec<_>>().join(", ")
            ),
        }
    } else {
        DoctorCheck {
            name: "registry".to_string(),
            status: CheckStatus::Error,
            message: "Registry lookup is inconsistent".to_string(),
        }
    });

    let stdin_check = if atty::is(atty::Stream::Stdin) {
        DoctorCheck {
            name: "stdin".to_string(),
            status: CheckStatus::Ok,
            message: "stdin is a TTY (interactive mode)".to_string(),
        }
    } else {
        DoctorCheck {
            name: "stdin".to_string(),
            status: CheckStatus::Ok,
            message: "stdin is a pipe (streaming mode ready)".to_string(),
        }
    };
    checks.push(stdin_check);

    let report = DoctorReport {
        producer: PRODUCER_NAME.to_string(),
        version: PACER_VERSION.to_string(),
        checks,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Pacer Doctor Report");
        println!("===================");
        println!("Producer: {}", report.producer);
        println!("Version:  {}", report.version);
        println!("\nChecks:");

        for check in &report.checks {
            let status_icon = match check.status {
                CheckStatus::Ok => "[OK]",
                CheckStatus::Error => "[ERR]",
            };
            println!("  {} {}: {}", status_icon, check.name, check.message);
        }
    }

    let has_errors = report
        .checks
        .iter()
        .any(|c| matches!(c.status, CheckStatus::Error));
    if has_errors {
        Err(PacerCliError::DoctorFailed)
    } else {
        Ok(())
    }
}

// Helper functions

fn read_packets(input: &Path, input_format: InputFormat) -> Result<Vec<SensorPacket>, PacerCliError> {
    let input_data = if input.to_string_lossy() == "-" {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(input)?
    };

    let packets = match input_format {
        InputFormat::Ndjson => PacketReader::parse_ndjson(&input_data)?,
        InputFormat::Json => PacketReader::parse_array(&input_data)?,
    };

    Ok(packets)
}

// Error types

#[derive(Debug)]
enum PacerCliError {
    Io(io::Error),
    Tracker(TrackerError),
    Json(serde_json::Error),
    NoPackets,
    PacketsFailed(usize),
    ValidationFailed(usize),
    DoctorFailed,
}

impl From<io::Error> for PacerCliError {
    fn from(e: io::Error) -> Self {
        PacerCliError::Io(e)
    }
}

impl From<TrackerError> for PacerCliError {
    fn from(e: TrackerError) -> Self {
        PacerCliError::Tracker(e)
    }
}

impl From<serde_json::Error> for PacerCliError {
    fn from(e: serde_json::Error) -> Self {
        PacerCliError::Json(e)
    }
}

#[derive(serde::Serialize)]
struct CliError {
    code: String,
    message: String,
    hint: Option<String>,
}

impl From<PacerCliError> for CliError {
    fn from(e: PacerCliError) -> Self {
        match e {
            PacerCliError::Io(e) => CliError {
                code: "IO_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check file paths and permissions".to_string()),
            },
            PacerCliError::Tracker(e) => CliError {
                code: "TRACKER_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Run 'pacer codes' to list recognized workout codes".to_string()),
            },
            PacerCliError::Json(e) => CliError {
                code: "JSON_ERROR".to_string(),
                message: e.to_string(),
                hint: Some("Check JSON syntax".to_string()),
            },
            PacerCliError::NoPackets => CliError {
                code: "NO_PACKETS".to_string(),
                message: "No packets found in input".to_string(),
                hint: Some("Ensure input file is not empty".to_string()),
            },
            PacerCliError::PacketsFailed(count) => CliError {
                code: "PACKETS_FAILED".to_string(),
                message: format!("{} packets produced no summary", count),
                hint: Some("Run 'pacer validate' for details".to_string()),
            },
            PacerCliError::ValidationFailed(count) => CliError {
                code: "VALIDATION_FAILED".to_string(),
                message: format!("{} packets failed validation", count),
                hint: Some("Fix validation errors and retry".to_string()),
            },
            PacerCliError::DoctorFailed => CliError {
                code: "DOCTOR_FAILED".to_string(),
                message: "One or more health checks failed".to_string(),
                hint: Some("Review the doctor report for details".to_string()),
            },
        }
    }
}

// Report types

#[derive(serde::Serialize)]
struct ValidationReport {
    total_packets: usize,
    valid_packets: usize,
    invalid_packets: usize,
    errors: Vec<ValidationErrorDetail>,
}

#[derive(serde::Serialize)]
struct ValidationErrorDetail {
    index: usize,
    code: String,
    error: String,
}

#[derive(serde::Serialize)]
struct DoctorReport {
    producer: String,
    version: String,
    checks: Vec<DoctorCheck>,
}

#[derive(serde::Serialize)]
struct DoctorCheck {
    name: String,
    status: CheckStatus,
    message: String,
}

#[derive(serde::Serialize)]
enum CheckStatus {
    Ok,
    Error,
}
