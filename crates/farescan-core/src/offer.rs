//! Decoding of individual flight-offer payloads.
//!
//! Offers are decoded one at a time so that a malformed entry only
//! costs that entry, not the whole search response.

use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::Value;

use crate::error::ParseError;
use crate::model::{Itinerary, Price, SearchQuery};

#[derive(Deserialize)]
struct OfferPayload {
    price: OfferPrice,
    itineraries: Vec<OfferItinerary>,
}

#[derive(Deserialize)]
struct OfferPrice {
    total: Price,
    currency: Option<String>,
}

#[derive(Deserialize)]
struct OfferItinerary {
    segments: Vec<OfferSegment>,
}

#[derive(Deserialize)]
struct OfferSegment {
    departure: SegmentEndpoint,
}

#[derive(Deserialize)]
struct SegmentEndpoint {
    at: String,
}

/// Decode one raw offer into an itinerary for the route in `query`.
///
/// Depart and return dates come from the first segment of the outbound
/// and inbound itineraries respectively.
pub fn parse_offer(raw: &Value, query: &SearchQuery) -> Result<Itinerary, ParseError> {
    let offer = OfferPayload::deserialize(raw).map_err(|e| ParseError::offer(e.to_string()))?;

    let depart = first_departure(&offer.itineraries, 0, "outbound")?;
    let return_date = first_departure(&offer.itineraries, 1, "inbound")?;

    Ok(Itinerary {
        origin: query.origin.clone(),
        destination: query.destination.clone(),
        depart,
        return_date,
        price: offer.price.total,
        currency: offer
            .price
            .currency
            .unwrap_or_else(|| query.currency.clone()),
    })
}

fn first_departure(
    itineraries: &[OfferItinerary],
    index: usize,
    leg: &str,
) -> Result<NaiveDate, ParseError> {
    let at = itineraries
        .get(index)
        .and_then(|it| it.segments.first())
        .map(|segment| segment.departure.at.as_str())
        .ok_or_else(|| ParseError::offer(format!("missing {} segment", leg)))?;

    date_portion(at)
}

/// Parse the `YYYY-MM-DD` prefix of an ISO-8601 timestamp.
pub fn date_portion(timestamp: &str) -> Result<NaiveDate, ParseError> {
    let prefix = timestamp
        .get(..10)
        .ok_or_else(|| ParseError::Date(timestamp.to_string()))?;
    NaiveDate::parse_from_str(prefix, "%Y-%m-%d").map_err(|_| ParseError::Date(timestamp.to_string()))
}
