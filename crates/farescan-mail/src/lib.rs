//! # farescan Mail
//!
//! Delivers deal alerts over an encrypted SMTP session: implicit TLS on
//! port 465, STARTTLS on any other port.

pub mod smtp;

pub use smtp::{build_message, SmtpNotifier, SmtpSecurity};
