use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use casedesk::DomainStore;
use casedesk::aggregate::{
    AccountRow, CaseDetail, CaseRow, DashboardSummary, FinancialOverview, ReportSummary,
};
use casedesk::clock::SystemClock;
use casedesk::config::{Config, LoggingConfig};
use casedesk::model::CaseStatus;
use casedesk::query::{AccountSearch, CaseFilter, ReportPeriod, case_types};
use casedesk::settings::Settings;

#[derive(Parser)]
#[command(name = "casedesk", version, about = "Investigation case management views")]
struct Cli {
    /// Settings file (default: ~/.casedesk/settings.toml)
    #[arg(long, value_name = "PATH")]
    settings: Option<PathBuf>,
    /// Seed the store from this fixture file
    #[arg(long, value_name = "PATH", conflicts_with = "empty")]
    fixtures: Option<PathBuf>,
    /// Start with an empty store
    #[arg(long)]
    empty: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Headline figures, recent cases, open tasks and activity
    Dashboard,
    /// Client accounts with retainer status
    Accounts {
        #[arg(long, default_value = "")]
        search: String,
    },
    /// Case list
    Cases {
        #[arg(long, default_value = "")]
        search: String,
        /// Active, Closed or "On Hold"
        #[arg(long, value_parser = parse_case_status)]
        status: Option<CaseStatus>,
        #[arg(long = "type", value_name = "TYPE")]
        case_type: Option<String>,
    },
    /// One case file
    Case { id: String },
    /// Ledger totals and retainer balances
    Financials,
    /// Period report
    Report {
        /// current-month, last-month or last-3-months
        #[arg(long, value_parser = parse_report_period)]
        period: Option<ReportPeriod>,
    },
}

/// Output of the `cases` command: matching rows plus every known type for
/// narrowing the next query.
#[derive(Serialize)]
struct CaseList<'a> {
    cases: Vec<CaseRow<'a>>,
    case_types: Vec<&'a str>,
}

fn parse_case_status(raw: &str) -> Result<CaseStatus, String> {
    CaseStatus::from_label(raw)
        .ok_or_else(|| format!("unknown case status '{raw}' (expected Active, Closed or On Hold)"))
}

fn parse_report_period(raw: &str) -> Result<ReportPeriod, String> {
    ReportPeriod::from_label(raw).ok_or_else(|| {
        format!("unknown report period '{raw}' (expected current-month, last-month or last-3-months)")
    })
}

fn init_tracing(config: &LoggingConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(&config.filter)
        .with_context(|| format!("invalid log filter '{}'", config.filter))?;
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if config.json {
        builder.json().init();
    } else {
        builder.init();
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    let rendered = serde_json::to_string_pretty(value).context("failed to render output")?;
    println!("{rendered}");
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let dotenv = dotenvy::dotenv();
    let cli = Cli::parse();

    let settings = match cli.settings.as_deref() {
        Some(path) => Settings::load(path)?,
        None => match Settings::default_path() {
            Some(path) => Settings::load_or_default(&path)?,
            None => Settings::default(),
        },
    };
    let mut config = Config::resolve(&settings)?;
    config.store = config.store.with_overrides(cli.fixtures, cli.empty);

    init_tracing(&config.logging)?;
    if let Err(err) = dotenv
        && !err.not_found()
    {
        tracing::warn!(error = %err, "Ignoring unreadable .env file");
    }

    let store = DomainStore::bootstrap(&config.store, Arc::new(SystemClock))
        .context("failed to populate store")?;
    let snapshot = store.snapshot();
    let now = store.now();

    match cli.command {
        Command::Dashboard => print_json(&DashboardSummary::build(snapshot, now)),
        Command::Accounts { search } => {
            let matched = AccountSearch::new(&search).apply(store.accounts());
            print_json(&AccountRow::list(matched))
        }
        Command::Cases {
            search,
            status,
            case_type,
        } => {
            let matched = CaseFilter::new()
                .search(&search)
                .status(status)
                .case_type(case_type)
                .apply(store.cases());
            print_json(&CaseList {
                cases: CaseRow::list(matched, store.accounts()),
                case_types: case_types(store.cases()),
            })
        }
        Command::Case { id } => {
            let detail = CaseDetail::build(snapshot, &id, now)
                .with_context(|| format!("no case with id '{id}'"))?;
            print_json(&detail)
        }
        Command::Financials => print_json(&FinancialOverview::build(snapshot)),
        Command::Report { period } => {
            let period = period.unwrap_or(config.report.default_period);
            print_json(&ReportSummary::build(snapshot, period, now))
        }
    }
}
