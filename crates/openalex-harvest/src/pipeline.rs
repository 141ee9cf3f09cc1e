//! Harvest pipeline: institutions in, one JSON dataset out.
//!
//! Sequential by design. Institutions are processed one at a time and works
//! pages are fetched one at a time; the only scheduling construct is the
//! client's fixed inter-page delay.

use indicatif::{ProgressBar, ProgressStyle};

use crate::client::OpenAlexClient;
use crate::config::Config;
use crate::error::HarvestResult;
use crate::models::Work;

/// Counts reported after a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HarvestSummary {
    /// Institutions matched by the name filter.
    pub institutions: usize,

    /// Works written to the output file.
    pub works: usize,
}

/// Drives the fetch-transform-write pipeline.
pub struct Harvester {
    client: OpenAlexClient,
    config: Config,
}

impl Harvester {
    /// Create a harvester and its API client from one configuration.
    ///
    /// # Errors
    ///
    /// Returns error if HTTP client initialization fails.
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let client = OpenAlexClient::new(&config)?;
        Ok(Self { client, config })
    }

    /// Run the pipeline end to end.
    ///
    /// Finds matching institutions, collects up to the configured cap of
    /// open-access works per institution, attaches each institution's
    /// display name to its works, and overwrites the output file with the
    /// aggregate as 2-space-indented JSON.
    ///
    /// # Errors
    ///
    /// Any fetch or write failure aborts the run; no partial output file is
    /// produced.
    pub async fn run(&self) -> HarvestResult<HarvestSummary> {
        let institutions = self.client.find_institutions(&self.config.name_filter).await?;
        println!(
            "Found {} institutions matching \"{}\".",
            institutions.len(),
            self.config.name_filter
        );

        let bar = progress_bar(institutions.len() as u64);
        let mut all_works: Vec<Work> = Vec::new();

        for institution in &institutions {
            bar.set_message(institution.display_name.clone());
            let mut works =
                self.client.find_open_access_works(&institution.id, self.config.max_works).await?;
            for work in &mut works {
                work.institution_name = institution.display_name.clone();
            }
            tracing::info!(
                institution = %institution.display_name,
                works = works.len(),
                "collected"
            );
            all_works.extend(works);
            bar.inc(1);
        }
        bar.finish_and_clear();

        self.write_output(&all_works)?;
        println!("Saved {} open-access works.", all_works.len());

        Ok(HarvestSummary { institutions: institutions.len(), works: all_works.len() })
    }

    /// Serialize the aggregate and overwrite the output file in one step.
    fn write_output(&self, works: &[Work]) -> HarvestResult<()> {
        let json = serde_json::to_string_pretty(works)?;
        std::fs::write(&self.config.output_path, json)?;
        Ok(())
    }
}

/// Per-institution progress bar over the collection loop.
fn progress_bar(total: u64) -> ProgressBar {
    ProgressBar::new(total).with_style(
        ProgressStyle::with_template("Collecting works {bar:30.green/dim} {pos}/{len} {wide_msg:.dim}")
            .unwrap_or_else(|_| ProgressStyle::default_bar()),
    )
}
