//! Thin textual renderers over a [`Schedule`]: `md`, `csv`, `json`.
//! The JSON form is the canonical response shape.

use std::fmt::Write as _;

use serde::Serialize;

use crate::money::cents_to_str;
use crate::model::schedule::Schedule;
use crate::validate::Check;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Markdown,
    Csv,
    Json,
}

impl ExportFormat {
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_ascii_lowercase().as_str() {
            "md" | "markdown" => Some(Self::Markdown),
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

pub fn render(schedule: &Schedule, format: ExportFormat) -> String {
    match format {
        ExportFormat::Markdown => render_markdown(schedule),
        ExportFormat::Csv => render_csv(schedule),
        ExportFormat::Json => render_json(schedule),
    }
}

fn render_markdown(schedule: &Schedule) -> String {
    let mut out = String::new();
    out.push_str("| Day | Opening | Deposits | Action | Net | Bills | Closing |\n");
    out.push_str("| ---:| -------:| --------:|:------:| ---:| -----:| -------:|\n");
    for row in &schedule.ledger {
        let _ = writeln!(
            out,
            "| {:>3} | {:>7} | {:>8} | {:^6} | {:>5} | {:>5} | {:>7} |",
            row.day,
            cents_to_str(row.opening_cents),
            cents_to_str(row.deposit_cents),
            row.action,
            cents_to_str(row.net_cents),
            cents_to_str(row.bills_cents),
            cents_to_str(row.closing_cents),
        );
    }
    out.push('\n');
    let (workdays, adj_pairs, abs_delta) = schedule.objective;
    let _ = writeln!(
        out,
        "Objective: workdays={workdays}, adjacent_work_pairs={adj_pairs}, |delta|={}",
        cents_to_str(abs_delta)
    );
    let _ = writeln!(out, "Final closing: {}", cents_to_str(schedule.final_closing_cents));
    out
}

fn render_csv(schedule: &Schedule) -> String {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer
        .write_record(["Day", "Opening", "Deposits", "Action", "Net", "Bills", "Closing"])
        .expect("writing to an in-memory buffer cannot fail");
    for row in &schedule.ledger {
        writer
            .write_record([
                row.day.to_string(),
                cents_to_str(row.opening_cents),
                cents_to_str(row.deposit_cents),
                row.action.clone(),
                cents_to_str(row.net_cents),
                cents_to_str(row.bills_cents),
                cents_to_str(row.closing_cents),
            ])
            .expect("writing to an in-memory buffer cannot fail");
    }
    let bytes = writer.into_inner().expect("in-memory buffer flush cannot fail");
    String::from_utf8(bytes).expect("csv writer only emits UTF-8 for these fields")
}

#[derive(Serialize)]
struct JsonLedgerRow {
    day: u8,
    opening: String,
    deposits: String,
    action: String,
    net: String,
    bills: String,
    closing: String,
}

#[derive(Serialize)]
struct JsonSchedule {
    actions: Vec<String>,
    objective: [i64; 3],
    final_closing: String,
    ledger: Vec<JsonLedgerRow>,
}

fn render_json(schedule: &Schedule) -> String {
    let ledger = schedule
        .ledger
        .iter()
        .map(|r| JsonLedgerRow {
            day: r.day,
            opening: cents_to_str(r.opening_cents),
            deposits: cents_to_str(r.deposit_cents),
            action: r.action.clone(),
            net: cents_to_str(r.net_cents),
            bills: cents_to_str(r.bills_cents),
            closing: cents_to_str(r.closing_cents),
        })
        .collect();
    let dto = JsonSchedule {
        actions: schedule.actions.clone(),
        objective: [schedule.objective.0, schedule.objective.1, schedule.objective.2],
        final_closing: cents_to_str(schedule.final_closing_cents),
        ledger,
    };
    serde_json::to_string(&dto).unwrap_or_default()
}

/// Render a `checks` list as `[name, ok, detail]` triples, the shape
/// the HTTP response contract expects.
pub fn checks_as_triples(checks: &[Check]) -> Vec<(String, bool, String)> {
    checks.iter().map(|c| (c.name.clone(), c.pass, c.detail.clone())).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::plan::{HORIZON_DAYS, Plan};

    fn tiny_schedule() -> Schedule {
        let plan = Plan {
            start_balance_cents: 0,
            target_end_cents: 300_000,
            band_cents: 5_000,
            rent_guard_cents: 0,
            deposits: vec![],
            bills: vec![],
            manual_adjustments: vec![],
            actions: vec![None; HORIZON_DAYS],
            locks: vec![],
            metadata: Default::default(),
        };
        let actions_vec = vec!["Work".to_string(); HORIZON_DAYS];
        let ledger = crate::ledger_builder::build_ledger(&plan, &actions_vec);
        let final_closing = ledger.last().unwrap().closing_cents;
        Schedule { actions: actions_vec, objective: (30, 29, 0), final_closing_cents: final_closing, ledger }
    }

    #[test]
    fn all_formats_render_without_panicking() {
        let schedule = tiny_schedule();
        for fmt in [ExportFormat::Markdown, ExportFormat::Csv, ExportFormat::Json] {
            let text = render(&schedule, fmt);
            assert!(!text.is_empty());
        }
    }

    #[test]
    fn json_round_trips_actions() {
        let schedule = tiny_schedule();
        let text = render(&schedule, ExportFormat::Json);
        let value: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(value["actions"].as_array().unwrap().len(), HORIZON_DAYS);
    }

    #[test]
    fn format_parsing_is_case_insensitive() {
        assert_eq!(ExportFormat::parse("MD"), Some(ExportFormat::Markdown));
        assert_eq!(ExportFormat::parse("Csv"), Some(ExportFormat::Csv));
        assert_eq!(ExportFormat::parse("bogus"), None);
    }
}
