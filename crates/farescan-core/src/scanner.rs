//! The destination × date search loop.

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, info, warn};

use crate::auth::AccessToken;
use crate::error::SearchError;
use crate::model::{Itinerary, SearchParams, SearchQuery};
use crate::offer::parse_offer;

/// Runs one flight-offers search and returns the raw offer objects.
#[async_trait]
pub trait FlightSearch: Send + Sync {
    async fn search(
        &self,
        token: &AccessToken,
        query: &SearchQuery,
    ) -> Result<Vec<Value>, SearchError>;
}

/// Outcome of scanning the whole grid.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanReport {
    /// Deals in discovery order (destination-major, then date-minor).
    pub deals: Vec<Itinerary>,
    pub cells_searched: usize,
    pub cells_failed: usize,
    pub offers_seen: usize,
    pub offers_malformed: usize,
}

/// Search every grid cell in order and keep offers at or below the threshold.
///
/// A failed cell is logged and skipped. A malformed offer is logged and
/// skipped without affecting the rest of its response.
pub async fn scan<S>(search: &S, token: &AccessToken, params: &SearchParams) -> ScanReport
where
    S: FlightSearch + ?Sized,
{
    let mut report = ScanReport::default();

    for cell in params.grid() {
        let query = params.query_for(&cell);
        info!(
            origin = %query.origin,
            destination = %query.destination,
            depart = %query.departure,
            return_date = %query.return_date,
            "Searching"
        );
        report.cells_searched += 1;

        let offers = match search.search(token, &query).await {
            Ok(offers) => offers,
            Err(e) => {
                report.cells_failed += 1;
                warn!(
                    destination = %query.destination,
                    depart = %query.departure,
                    error = %e,
                    "Search failed, skipping cell"
                );
                continue;
            }
        };

        info!(count = offers.len(), "Found offers");
        report.offers_seen += offers.len();

        for raw in &offers {
            match parse_offer(raw, &query) {
                Ok(itinerary) if itinerary.is_deal(params.price_threshold) => {
                    debug!(price = %itinerary.price, "Offer within threshold");
                    report.deals.push(itinerary);
                }
                Ok(_) => {}
                Err(e) => {
                    report.offers_malformed += 1;
                    warn!(destination = %query.destination, error = %e, "Skipping malformed offer");
                }
            }
        }
    }

    report
}
