//! One end-to-end scan: authenticate, search the grid, notify.

use tracing::{error, info, info_span, Instrument};
use uuid::Uuid;

use crate::auth::Authenticator;
use crate::error::RunError;
use crate::model::SearchParams;
use crate::notifier::{AlertMessage, Notifier};
use crate::scanner::{scan, FlightSearch, ScanReport};

/// Result of a completed run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub report: ScanReport,
    pub notified: bool,
}

/// Execute one run.
///
/// Authentication failure aborts before any search is issued.
/// Notification failure is returned as an error. Per-cell search failures
/// are absorbed by the scanner.
pub async fn run<A, S, N>(
    auth: &A,
    search: &S,
    notifier: &N,
    params: &SearchParams,
) -> Result<RunSummary, RunError>
where
    A: Authenticator + ?Sized,
    S: FlightSearch + ?Sized,
    N: Notifier + ?Sized,
{
    let run_id = Uuid::new_v4();
    let span = info_span!("run", %run_id);

    async move {
        let token = auth.authenticate().await.map_err(|e| {
            error!(error = %e, "Authentication failed, aborting before search");
            RunError::Auth(e)
        })?;
        info!("Authenticated");

        let report = scan(search, &token, params).await;
        info!(
            cells = report.cells_searched,
            failed = report.cells_failed,
            deals = report.deals.len(),
            "Scan complete"
        );

        let notified = match AlertMessage::for_deals(&report.deals) {
            Some(message) => {
                notifier.notify(&message).await?;
                info!(deals = report.deals.len(), "Alert delivered");
                true
            }
            None => {
                info!("No deals, skipping notification");
                false
            }
        };

        Ok(RunSummary {
            run_id,
            report,
            notified,
        })
    }
    .instrument(span)
    .await
}
