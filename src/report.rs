//! Run report — per-team sections aggregated into one text report.

use std::fmt::Write;

use chrono::NaiveDate;

use crate::game::{GameStatus, GameSummary};
use crate::promo::PromotionResult;

/// One team's slice of the report, in configuration order.
#[derive(Debug, Clone)]
pub struct TeamSection {
    pub team_name: String,
    pub summary: GameSummary,
    pub results: Vec<PromotionResult>,
}

/// Aggregated result of one run. Built fresh each run, never persisted.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub date: NaiveDate,
    pub sections: Vec<TeamSection>,
    /// Count of triggered results across all teams — the sole input to the
    /// send/no-send decision.
    pub total_triggers: usize,
}

/// Accumulates team sections in the order teams were configured.
#[derive(Debug)]
pub struct RunReportBuilder {
    date: NaiveDate,
    sections: Vec<TeamSection>,
}

impl RunReportBuilder {
    pub fn new(date: NaiveDate) -> Self {
        Self {
            date,
            sections: Vec::new(),
        }
    }

    /// Append one team's results. Insertion order is preserved in the report.
    pub fn push_team(
        &mut self,
        team_name: impl Into<String>,
        summary: GameSummary,
        results: Vec<PromotionResult>,
    ) {
        self.sections.push(TeamSection {
            team_name: team_name.into(),
            summary,
            results,
        });
    }

    pub fn build(self) -> RunReport {
        let total_triggers = self
            .sections
            .iter()
            .flat_map(|s| &s.results)
            .filter(|r| r.triggered)
            .count();
        RunReport {
            date: self.date,
            sections: self.sections,
            total_triggers,
        }
    }
}

impl RunReport {
    /// Render the plain-text report used for stdout and the email body.
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "Promo results — {}", self.date);

        for section in &self.sections {
            let _ = writeln!(out);
            let _ = writeln!(
                out,
                "{}: {}",
                section.team_name,
                outcome_line(&section.summary)
            );
            for result in &section.results {
                let marker = if result.triggered { "ACTIVE" } else { "  --  " };
                let _ = write!(out, "  [{marker}] {}", result.rule_name);
                if let Some(note) = &result.note {
                    let _ = write!(out, " (could not evaluate: {note})");
                }
                let _ = writeln!(out);
            }
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "Total active promotions: {}", self.total_triggers);
        out
    }
}

/// One-line outcome summary for a team section.
fn outcome_line(summary: &GameSummary) -> String {
    if !summary.played {
        return "did not play".into();
    }
    let venue = if summary.is_home { "vs" } else { "at" };
    let opponent = if summary.opponent_name.is_empty() {
        "unknown opponent"
    } else {
        summary.opponent_name.as_str()
    };
    match summary.status {
        GameStatus::Final => {
            let mark = if summary.is_winner { 'W' } else { 'L' };
            format!(
                "{mark} {}-{} {venue} {opponent}",
                summary.runs_for, summary.runs_against
            )
        }
        GameStatus::Postponed => format!("postponed {venue} {opponent}"),
        GameStatus::InProgress => format!(
            "in progress {venue} {opponent}, {}-{}",
            summary.runs_for, summary.runs_against
        ),
        GameStatus::Unknown => format!("{venue} {opponent}, status unknown"),
    }
}
