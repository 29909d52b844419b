//! Notification boundary.
//!
//! The only place allowed to request the recipient list and invoke
//! dispatch. The gate decides from the aggregate trigger count alone; the
//! core performs no retries — a failed collaborator call fails the run.

pub mod email;
pub mod recipients;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::error::NotifyError;
use crate::report::RunReport;

pub use email::{SmtpConfig, SmtpDispatcher};
pub use recipients::{SheetRecipients, StaticRecipients};

/// Subscriber-list collaborator.
#[async_trait]
pub trait RecipientSource: Send + Sync {
    /// Fetch the current subscriber addresses. May be empty.
    async fn fetch_recipients(&self) -> Result<Vec<String>, NotifyError>;
}

/// Notification transport collaborator.
#[async_trait]
pub trait Dispatcher: Send + Sync {
    async fn dispatch(
        &self,
        subject: &str,
        body: &str,
        recipients: &[String],
    ) -> Result<(), NotifyError>;
}

/// Send/no-send decision for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Send { subject: String, body: String },
    Suppress,
}

/// What actually happened at the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifyOutcome {
    /// Notification dispatched to this many recipients.
    Sent { recipients: usize },
    /// Zero triggers; nothing to say.
    Suppressed,
    /// A send was warranted but no dispatcher is configured; the report
    /// still went to stdout.
    Disabled,
}

/// Decide from the aggregate trigger count. `Suppress` iff zero triggers;
/// otherwise the subject encodes the count and the body is the rendered
/// report.
pub fn decide(report: &RunReport) -> Decision {
    let count = report.total_triggers;
    if count == 0 {
        return Decision::Suppress;
    }
    let plural = if count == 1 { "" } else { "s" };
    Decision::Send {
        subject: format!("{count} promotion{plural} active — {} games", report.date),
        body: report.render(),
    }
}

/// Run the gate: decide, and on `Send` fetch recipients and dispatch.
///
/// An empty recipient list on a warranted send is a failure distinct from a
/// successful no-op — the run must not claim success when nobody could be
/// notified.
pub async fn notify(
    report: &RunReport,
    recipients: &dyn RecipientSource,
    dispatcher: Option<&dyn Dispatcher>,
) -> Result<NotifyOutcome, NotifyError> {
    let Decision::Send { subject, body } = decide(report) else {
        info!("No promotions triggered; notification suppressed");
        return Ok(NotifyOutcome::Suppressed);
    };

    let Some(dispatcher) = dispatcher else {
        warn!(
            triggers = report.total_triggers,
            "Send warranted but no dispatcher configured"
        );
        return Ok(NotifyOutcome::Disabled);
    };

    let addresses = recipients.fetch_recipients().await?;
    if addresses.is_empty() {
        return Err(NotifyError::NoRecipients);
    }

    dispatcher.dispatch(&subject, &body, &addresses).await?;
    info!(
        recipients = addresses.len(),
        triggers = report.total_triggers,
        "Notification dispatched"
    );
    Ok(NotifyOutcome::Sent {
        recipients: addresses.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    use crate::game::GameSummary;
    use crate::promo::PromotionResult;
    use crate::report::RunReportBuilder;

    fn report_with_triggers(triggered: usize, not_triggered: usize) -> RunReport {
        let mut builder = RunReportBuilder::new(NaiveDate::from_ymd_opt(2025, 8, 7).unwrap());
        let results = (0..triggered)
            .map(|i| PromotionResult {
                rule_name: format!("hit {i}"),
                triggered: true,
                note: None,
            })
            .chain((0..not_triggered).map(|i| PromotionResult {
                rule_name: format!("miss {i}"),
                triggered: false,
                note: None,
            }))
            .collect();
        builder.push_team("Los Angeles Dodgers", GameSummary::not_played(), results);
        builder.build()
    }

    #[test]
    fn zero_triggers_suppresses() {
        assert_eq!(decide(&report_with_triggers(0, 3)), Decision::Suppress);
    }

    #[test]
    fn subject_encodes_count() {
        match decide(&report_with_triggers(1, 0)) {
            Decision::Send { subject, .. } => {
                assert!(subject.starts_with("1 promotion active"), "{subject}");
            }
            Decision::Suppress => panic!("expected Send"),
        }
        match decide(&report_with_triggers(3, 1)) {
            Decision::Send { subject, .. } => {
                assert!(subject.starts_with("3 promotions active"), "{subject}");
            }
            Decision::Suppress => panic!("expected Send"),
        }
    }

    #[test]
    fn body_is_rendered_report() {
        let report = report_with_triggers(2, 0);
        match decide(&report) {
            Decision::Send { body, .. } => assert_eq!(body, report.render()),
            Decision::Suppress => panic!("expected Send"),
        }
    }
}
