//! Triage Desk — command-line client.
//!
//! Submits patient intake to the triage service and prints the report, the
//! agent ledger and the decision panel. Completed cases are kept in a local
//! ten-case history that can be listed and replayed offline.
//!
//! Usage:
//!   triage-desk submit --name "Asha Rao" --age 54 --sex female \
//!       --symptoms "chest pain, sweating" --duration 2 --location "Zone A"
//!   triage-desk history
//!   triage-desk replay CASE-42 --format html
//!   triage-desk lang hi

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde_json::json;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use triage_client::{
    session::DEADLINE_GRACE, ClientConfig, HttpPipeline, IntakeForm, TriageOutcome, TriageSession,
};
use triage_contracts::{
    error::{DeskError, DeskResult},
    language::Language,
};
use triage_history::{ClientState, FileStateStore};
use triage_render::{
    render_decision_html, render_decision_text, render_history_html, render_history_text,
    render_ledger_html, render_ledger_text, render_report_html, render_report_text,
};

// ── CLI definition ────────────────────────────────────────────────────────────

/// Triage Desk — client for the multi-agent emergency triage pipeline.
///
/// Informational demo only; not a medical diagnosis or treatment.
#[derive(Parser)]
#[command(name = "triage-desk", about = "Multi-agent emergency triage client")]
struct Cli {
    /// TOML configuration file.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the triage service base URL.
    #[arg(long, global = true)]
    api_base: Option<String>,

    /// Override the request timeout, in seconds.
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Override the directory holding language and history files.
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Submit one intake to the triage service.
    Submit {
        #[command(flatten)]
        intake: IntakeArgs,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// List the locally stored cases, newest first.
    History {
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Rebuild the report of a stored case.
    Replay {
        case_id: String,
        #[arg(long, value_enum, default_value_t = Format::Text)]
        format: Format,
    },
    /// Show or set the UI language (en, hi, kn).
    Lang { code: Option<String> },
}

#[derive(clap::Args)]
struct IntakeArgs {
    #[arg(long = "name")]
    patient_name: String,
    #[arg(long)]
    age: String,
    #[arg(long)]
    sex: String,
    /// Comma- or newline-separated symptoms.
    #[arg(long)]
    symptoms: String,
    /// Symptom duration in hours.
    #[arg(long)]
    duration: String,
    #[arg(long)]
    location: String,
    #[arg(long)]
    heart_rate: Option<String>,
    #[arg(long)]
    systolic_bp: Option<String>,
    #[arg(long)]
    diastolic_bp: Option<String>,
    #[arg(long)]
    spo2: Option<String>,
    #[arg(long)]
    temperature_c: Option<String>,
}

impl From<IntakeArgs> for IntakeForm {
    fn from(args: IntakeArgs) -> Self {
        IntakeForm {
            patient_name: args.patient_name,
            age: args.age,
            sex: args.sex,
            symptoms_text: args.symptoms,
            duration_hours: args.duration,
            location_hint: args.location,
            heart_rate: args.heart_rate.unwrap_or_default(),
            systolic_bp: args.systolic_bp.unwrap_or_default(),
            diastolic_bp: args.diastolic_bp.unwrap_or_default(),
            spo2: args.spo2.unwrap_or_default(),
            temperature_c: args.temperature_c.unwrap_or_default(),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Text,
    Html,
    Json,
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() {
    // Set RUST_LOG=debug for verbose output.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .compact()
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("{}", e.status_message());
        eprintln!("  {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> DeskResult<()> {
    let config = load_config(&cli)?;
    debug!(api_base = %config.api_base, data_dir = %config.data_dir.display(), "config loaded");

    let mut state = ClientState::load(Box::new(FileStateStore::new(&config.data_dir)));

    // Only submit talks to the backend; the other commands work offline.
    match cli.command {
        Command::Submit { intake, format } => {
            let pipeline = HttpPipeline::new(&config)?;
            let mut session = TriageSession::new(Box::new(pipeline), state)
                .with_deadline(config.request_timeout() + DEADLINE_GRACE);
            let outcome = session.submit(&IntakeForm::from(intake))?;
            print_outcome(&outcome, session.language(), format)
        }
        Command::History { format } => {
            let rows = state.history().rows();
            match format {
                Format::Text => print!("{}", render_history_text(&rows, state.language())),
                Format::Html => print!("{}", render_history_html(&rows, state.language())),
                Format::Json => print_json(&rows)?,
            }
            Ok(())
        }
        Command::Replay { case_id, format } => {
            let (Some(report), Some(decision)) =
                (state.history().replay(&case_id), state.history().replay_decision(&case_id))
            else {
                eprintln!("No stored case with id {case_id:?}.");
                return Ok(());
            };
            let language = state.language();
            match format {
                Format::Text => {
                    print!("{}", render_decision_text(&decision, language));
                    print!("{}", render_report_text(&report));
                }
                Format::Html => {
                    print!("{}", render_decision_html(&decision, language));
                    print!("{}", render_report_html(&report));
                }
                Format::Json => print_json(&json!({ "report": report, "decision": decision }))?,
            }
            Ok(())
        }
        Command::Lang { code: None } => {
            println!("{}", state.language());
            Ok(())
        }
        Command::Lang { code: Some(code) } => {
            let language = Language::from_code(&code)
                .ok_or(DeskError::UnsupportedLanguage { code })?;
            state.set_language(language)?;
            println!("{language}");
            Ok(())
        }
    }
}

// File values first, then flag overrides, then one validation pass.
fn load_config(cli: &Cli) -> DeskResult<ClientConfig> {
    let mut config = match &cli.config {
        Some(path) => ClientConfig::from_file(path)?,
        None => ClientConfig::default(),
    };
    if let Some(api_base) = &cli.api_base {
        config.api_base = api_base.clone();
    }
    if let Some(timeout) = cli.timeout {
        config.request_timeout_secs = timeout;
    }
    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }
    config.validate()?;
    Ok(config)
}

// ── Output ────────────────────────────────────────────────────────────────────

fn print_outcome(outcome: &TriageOutcome, language: Language, format: Format) -> DeskResult<()> {
    match format {
        Format::Text => {
            println!("Done.");
            print!("{}", render_decision_text(&outcome.decision, language));
            print!("{}", render_report_text(&outcome.report));
            print!("{}", render_ledger_text(&outcome.ledger));
        }
        Format::Html => {
            print!("{}", render_decision_html(&outcome.decision, language));
            print!("{}", render_report_html(&outcome.report));
            print!("{}", render_ledger_html(&outcome.ledger));
        }
        Format::Json => print_json(&json!({
            "report": outcome.report,
            "ledger": outcome.ledger,
            "decision": outcome.decision,
        }))?,
    }
    Ok(())
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> DeskResult<()> {
    let text = serde_json::to_string_pretty(value).map_err(|e| DeskError::Output {
        reason: e.to_string(),
    })?;
    println!("{text}");
    Ok(())
}
