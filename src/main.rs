use std::path::Path;
use std::process::ExitCode;

use clap::Parser;

use cashflow_scheduler::engine::dispatcher::{self, Mode};
use cashflow_scheduler::error::CashflowError;
use cashflow_scheduler::export::{self, ExportFormat};
use cashflow_scheduler::model::plan::Plan;
use cashflow_scheduler::resume;
use cashflow_scheduler::validate;

mod cli;

fn main() -> ExitCode {
    let cli = cli::Cli::parse();
    match run(cli.command) {
        Ok(()) => ExitCode::from(0),
        Err(CliError::Solver(CashflowError::Infeasible { .. })) => ExitCode::from(2),
        Err(CliError::ValidationFailed) => ExitCode::from(2),
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::from(1)
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("{0}")]
    Io(#[from] std::io::Error),
    #[error("{0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Solver(#[from] CashflowError),
    #[error("unknown format `{0}`, expected one of md, csv, json")]
    UnknownFormat(String),
    #[error("validator rejected the schedule")]
    ValidationFailed,
    #[error("the `full` feature is required for the `api` subcommand")]
    ApiFeatureDisabled,
    #[error("the `cp-solver` feature is required for the `verify` subcommand")]
    VerifyFeatureDisabled,
}

fn run(command: cli::Command) -> Result<(), CliError> {
    match command {
        cli::Command::Solve { file, solver, format } => cmd_solve(&file, &solver, &format),
        cli::Command::Validate { plan, schedule } => cmd_validate(&plan, &schedule),
        cli::Command::Resume { file, day, eod_amount, format } => {
            cmd_resume(&file, day, eod_amount, &format)
        }
        cli::Command::Verify { file, ties } => cmd_verify(&file, ties),
        cli::Command::Api { host, port } => cmd_api(&host, port),
    }
}

fn load_plan(path: &Path) -> Result<Plan, CliError> {
    let text = std::fs::read_to_string(path)?;
    let plan: Plan = serde_json::from_str(&text)?;
    plan.validate_shape()
        .map_err(CliError::Solver)?;
    Ok(plan)
}

fn parse_format(format: &str) -> Result<ExportFormat, CliError> {
    ExportFormat::parse(format).ok_or_else(|| CliError::UnknownFormat(format.to_string()))
}

fn parse_mode(solver: &str) -> Mode {
    match solver {
        "primary" => Mode::Primary,
        "secondary" => Mode::Secondary,
        _ => Mode::Auto,
    }
}

fn cmd_solve(file: &Path, solver: &str, format: &str) -> Result<(), CliError> {
    let plan = load_plan(file)?;
    let fmt = parse_format(format)?;
    let (schedule, _diagnostics) = dispatcher::solve(&plan, parse_mode(solver))?;
    println!("{}", export::render(&schedule, fmt));
    Ok(())
}

fn cmd_validate(plan_path: &Path, schedule_path: &Path) -> Result<(), CliError> {
    let plan = load_plan(plan_path)?;
    let schedule_text = std::fs::read_to_string(schedule_path)?;
    let schedule: cashflow_scheduler::model::schedule::Schedule =
        serde_json::from_str(&schedule_text)?;
    let report = validate::validate(&plan, &schedule);
    for check in &report.checks {
        println!("[{}] {}: {}", if check.pass { "ok" } else { "FAIL" }, check.name, check.detail);
    }
    if report.ok {
        Ok(())
    } else {
        Err(CliError::ValidationFailed)
    }
}

fn cmd_resume(file: &Path, day: u8, eod_amount: f64, format: &str) -> Result<(), CliError> {
    let plan = load_plan(file)?;
    let fmt = parse_format(format)?;
    let desired_cents = cashflow_scheduler::money::to_cents(eod_amount)?;
    let schedule = resume::resume(&plan, day, desired_cents)?;
    println!("{}", export::render(&schedule, fmt));
    Ok(())
}

#[cfg(feature = "cp-solver")]
fn cmd_verify(file: &Path, ties: usize) -> Result<(), CliError> {
    let plan = load_plan(file)?;
    let report = dispatcher::verify(&plan, ties)?;
    println!(
        "dp_objective={:?} cp_objective={:?} match={} ties_found={}",
        report.dp_objective, report.cp_objective, report.objectives_match, report.tie_count
    );
    if report.objectives_match {
        Ok(())
    } else {
        Err(CliError::ValidationFailed)
    }
}

#[cfg(not(feature = "cp-solver"))]
fn cmd_verify(_file: &Path, _ties: usize) -> Result<(), CliError> {
    Err(CliError::VerifyFeatureDisabled)
}

#[cfg(feature = "full")]
fn cmd_api(host: &str, port: u16) -> Result<(), CliError> {
    let rt = tokio::runtime::Runtime::new().map_err(CliError::Io)?;
    rt.block_on(cashflow_scheduler::api::serve(host, port))
        .map_err(|e| CliError::Solver(CashflowError::SolverBug(e.to_string())))
}

#[cfg(not(feature = "full"))]
fn cmd_api(_host: &str, _port: u16) -> Result<(), CliError> {
    Err(CliError::ApiFeatureDisabled)
}
