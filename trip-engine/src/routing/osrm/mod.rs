//! OSRM Table API client.
//!
//! Driving durations and distances for a whole batch come from one table
//! request with the origin as the single source:
//!
//! ```text
//! GET {base}/table/v1/{profile}/{lon},{lat};{lon},{lat};...?sources=0&annotations=duration,distance
//! ```
//!
//! Row 0 of each matrix holds the origin's legs; its first cell is the
//! origin to itself and is skipped.

mod client;
mod types;

pub use client::{OsrmClient, OsrmConfig};
pub use types::TableResponse;
