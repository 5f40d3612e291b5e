//! Remote timings source used when no local table matches.
//!
//! The adapter talks to an Aladhan-compatible `/timings/{DD-MM-YYYY}`
//! endpoint. Every failure mode has its own [`RemoteError`] variant, and
//! [`RemoteClient::fetch_or_fallback`] turns any of them into the static
//! [`fallback_times`] set so callers always have something to show.

pub mod fallback;
pub mod remote;
mod schema;

pub use fallback::{fallback_times, FALLBACK_REFERENCE};
pub use remote::{RemoteClient, RemoteDay, RemoteError, RemoteHijri, RemoteOutcome, RemoteQuery, DEFAULT_BASE_URL};
