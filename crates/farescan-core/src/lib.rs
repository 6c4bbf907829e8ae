//! farescan core library
//!
//! Search grid, offer decoding, deal filtering and the run pipeline.
//! Network access sits behind the `Authenticator`, `FlightSearch` and
//! `Notifier` traits, implemented by `farescan-amadeus` and `farescan-mail`.

pub mod auth;
pub mod config;
pub mod error;
pub mod model;
pub mod notifier;
pub mod offer;
pub mod run;
pub mod scanner;

pub use auth::{AccessToken, Authenticator};
pub use config::{ApiConfig, Config, SmtpConfig};
pub use error::{AuthError, ConfigError, ConfigResult, NotifyError, ParseError, RunError, SearchError};
pub use model::{AirportCode, GridCell, Itinerary, Price, SearchParams, SearchQuery};
pub use notifier::{AlertMessage, Notifier};
pub use run::{run, RunSummary};
pub use scanner::{scan, FlightSearch, ScanReport};
