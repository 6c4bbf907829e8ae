//! # farescan Amadeus
//!
//! OAuth2 client-credentials authentication and flight-offers search
//! against the Amadeus Self-Service API.

pub mod client;

pub use client::{basic_credentials, parse_offers_response, parse_token_response, AmadeusClient};
