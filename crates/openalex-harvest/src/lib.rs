//! OpenAlex Open-Access Harvester
//!
//! Collects metadata about open-access research works produced by
//! institutions whose display name matches a filter (by default "Illinois"),
//! using the OpenAlex API, and writes the results to a single JSON file.
//!
//! # Features
//!
//! - **Cursor pagination**: follows `meta.next_cursor` chains on the
//!   institutions and works endpoints
//! - **Rate-limited**: fixed inter-page delay plus exponential-backoff
//!   retries for transient failures
//! - **Typed failures**: every fetch returns an explicit [`ClientError`]
//!   instead of crashing on a bad response
//!
//! # Example
//!
//! ```no_run
//! use openalex_harvest::{Config, Harvester};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::from_env()?;
//!     let summary = Harvester::new(config)?.run().await?;
//!     println!("{} works from {} institutions", summary.works, summary.institutions);
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod pipeline;

pub use client::OpenAlexClient;
pub use config::Config;
pub use error::{ClientError, HarvestError};
pub use pipeline::{Harvester, HarvestSummary};
