//! Search and deal domain models.

use chrono::{Days, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;

/// Passenger count sent with every search.
pub const ADULTS: u32 = 1;

/// An exact decimal amount held in minor units (cents).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPrice", into = "String")]
pub struct Price {
    minor: i64,
}

impl Price {
    /// Create a price from minor units.
    pub const fn from_minor(minor: i64) -> Self {
        Self { minor }
    }

    /// Create a price from whole units.
    pub const fn from_whole(whole: i64) -> Self {
        Self { minor: whole * 100 }
    }

    /// Amount in minor units.
    pub fn minor_units(&self) -> i64 {
        self.minor
    }
}

impl FromStr for Price {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let invalid = || ParseError::Price(s.to_string());

        let (whole, frac) = match s.split_once('.') {
            Some((w, f)) => (w, f),
            None => (s, ""),
        };

        if whole.is_empty()
            || frac.len() > 2
            || !whole.bytes().all(|b| b.is_ascii_digit())
            || !frac.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        let whole: i64 = whole.parse().map_err(|_| invalid())?;
        let frac: i64 = match frac.len() {
            0 => 0,
            1 => frac.parse::<i64>().map_err(|_| invalid())? * 10,
            _ => frac.parse().map_err(|_| invalid())?,
        };

        whole
            .checked_mul(100)
            .and_then(|m| m.checked_add(frac))
            .map(Self::from_minor)
            .ok_or_else(invalid)
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.minor < 0 { "-" } else { "" };
        let abs = self.minor.unsigned_abs();
        write!(f, "{}{}.{:02}", sign, abs / 100, abs % 100)
    }
}

impl From<Price> for String {
    fn from(price: Price) -> Self {
        price.to_string()
    }
}

/// Prices arrive as decimal strings from the API and as numbers from TOML.
#[derive(Deserialize)]
#[serde(untagged)]
enum RawPrice {
    Text(String),
    Int(i64),
    Float(f64),
}

impl TryFrom<RawPrice> for Price {
    type Error = ParseError;

    fn try_from(raw: RawPrice) -> Result<Self, Self::Error> {
        match raw {
            RawPrice::Text(s) => s.parse(),
            RawPrice::Int(n) if n >= 0 => n
                .checked_mul(100)
                .map(Self::from_minor)
                .ok_or_else(|| ParseError::Price(n.to_string())),
            RawPrice::Int(n) => Err(ParseError::Price(n.to_string())),
            RawPrice::Float(x) => x.to_string().parse(),
        }
    }
}

/// A three-letter IATA airport code, stored upper-case.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AirportCode(String);

impl AirportCode {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for AirportCode {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let code = s.trim();
        if code.len() == 3 && code.bytes().all(|b| b.is_ascii_alphabetic()) {
            Ok(Self(code.to_ascii_uppercase()))
        } else {
            Err(ParseError::AirportCode(s.to_string()))
        }
    }
}

impl TryFrom<String> for AirportCode {
    type Error = ParseError;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<AirportCode> for String {
    fn from(code: AirportCode) -> Self {
        code.0
    }
}

impl fmt::Display for AirportCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Everything that defines one scan. Immutable for the run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchParams {
    pub origin: AirportCode,
    pub destinations: Vec<AirportCode>,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub trip_duration_days: u32,
    pub price_threshold: Price,
    pub currency: String,
    pub max_results: u32,
}

impl Default for SearchParams {
    fn default() -> Self {
        let code = |s: &str| AirportCode(s.to_string());
        Self {
            origin: code("ORD"),
            destinations: ["LIS", "CDG", "AMS", "ATH", "MAD"]
                .into_iter()
                .map(code)
                .collect(),
            start_date: NaiveDate::from_ymd_opt(2025, 9, 15).unwrap_or_default(),
            end_date: NaiveDate::from_ymd_opt(2025, 10, 15).unwrap_or_default(),
            trip_duration_days: 7,
            price_threshold: Price::from_whole(500),
            currency: "USD".to_string(),
            max_results: 5,
        }
    }
}

impl SearchParams {
    /// Number of departure dates scanned per destination (inclusive range).
    pub fn day_count(&self) -> i64 {
        (self.end_date - self.start_date).num_days() + 1
    }

    /// Departure dates from `start_date` through `end_date`, in order.
    ///
    /// Stops early rather than overflowing past the last representable date.
    pub fn departure_dates(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        (0..self.day_count().max(0) as u64)
            .map_while(move |offset| self.start_date.checked_add_days(Days::new(offset)))
    }

    /// Return date for a given departure, or `None` if it is not representable.
    pub fn return_date(&self, departure: NaiveDate) -> Option<NaiveDate> {
        departure.checked_add_days(Days::new(u64::from(self.trip_duration_days)))
    }

    /// The full search grid, destination-major then date-minor.
    ///
    /// Cells whose return date cannot be represented are left out;
    /// `Config::validate` rejects such ranges up front.
    pub fn grid(&self) -> Vec<GridCell> {
        self.destinations
            .iter()
            .flat_map(move |destination| {
                self.departure_dates().filter_map(move |departure| {
                    Some(GridCell {
                        destination: destination.clone(),
                        departure,
                        return_date: self.return_date(departure)?,
                    })
                })
            })
            .collect()
    }

    /// Build the search request for one grid cell.
    pub fn query_for(&self, cell: &GridCell) -> SearchQuery {
        SearchQuery {
            origin: self.origin.clone(),
            destination: cell.destination.clone(),
            departure: cell.departure,
            return_date: cell.return_date,
            adults: ADULTS,
            currency: self.currency.clone(),
            max_results: self.max_results,
        }
    }
}

/// One (destination, departure-date) pair searched in one API call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GridCell {
    pub destination: AirportCode,
    pub departure: NaiveDate,
    pub return_date: NaiveDate,
}

/// A round-trip flight-offers query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery {
    pub origin: AirportCode,
    pub destination: AirportCode,
    pub departure: NaiveDate,
    pub return_date: NaiveDate,
    pub adults: u32,
    pub currency: String,
    pub max_results: u32,
}

impl SearchQuery {
    /// Query-string pairs in the flight-offers API's naming.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("originLocationCode", self.origin.to_string()),
            ("destinationLocationCode", self.destination.to_string()),
            ("departureDate", self.departure.format("%Y-%m-%d").to_string()),
            ("returnDate", self.return_date.format("%Y-%m-%d").to_string()),
            ("adults", self.adults.to_string()),
            ("currencyCode", self.currency.clone()),
            ("max", self.max_results.to_string()),
        ]
    }
}

/// A candidate round trip extracted from one offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Itinerary {
    pub origin: AirportCode,
    pub destination: AirportCode,
    pub depart: NaiveDate,
    pub return_date: NaiveDate,
    pub price: Price,
    pub currency: String,
}

impl Itinerary {
    /// Whether this itinerary qualifies as a deal.
    pub fn is_deal(&self, threshold: Price) -> bool {
        self.price <= threshold
    }
}
