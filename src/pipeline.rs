use anyhow::Result;
use serde_json::Value;
use tracing::info;

use crate::store::tracker::IncrementalIdTracker;

/// Lightweight card descriptor from a listing page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobCard {
    pub id: String,
    pub title: String,
    pub url: String,
    pub date_posted_raw: Option<String>,
}

/// Raw material for one detail page: extracted text plus any embedded
/// structured-data block, both produced by the fetch collaborator.
#[derive(Debug, Clone, Default)]
pub struct JobDetail {
    pub text: String,
    pub structured: Option<Value>,
}

/// Already-parsed scraping parameters, supplied by the configuration
/// collaborator and treated as opaque input.
#[derive(Debug, Clone, Copy)]
pub struct ScrapeConfig {
    pub max_pages: usize,
}

impl Default for ScrapeConfig {
    fn default() -> Self {
        ScrapeConfig { max_pages: 999 }
    }
}

/// The retrieval capability this engine consumes and never implements:
/// listing pages are numbered from 1 and ordered newest-first.
pub trait Fetcher {
    fn listing_page(&mut self, page: usize) -> Result<Vec<JobCard>>;
    fn detail(&mut self, card: &JobCard) -> Result<JobDetail>;
}

/// Full scan: walk listing pages until one comes back empty or the page cap
/// is reached. Duplicate ids across pages collapse to their first card.
pub fn collect_all<F: Fetcher>(fetcher: &mut F, cfg: &ScrapeConfig) -> Result<Vec<JobCard>> {
    let mut cards: Vec<JobCard> = Vec::new();

    for page in 1..=cfg.max_pages {
        let page_cards = fetcher.listing_page(page)?;
        if page_cards.is_empty() {
            info!(page, "empty listing page; end of results");
            break;
        }
        let mut added = 0;
        for card in page_cards {
            if !cards.iter().any(|c| c.id == card.id) {
                cards.push(card);
                added += 1;
            }
        }
        info!(page, added, total = cards.len(), "listing page scanned");
    }

    Ok(cards)
}

/// Incremental scan: collect cards newest-first and stop at the first id the
/// tracker already knows. Everything before that point is new since the last
/// run; everything after it was collected previously.
pub fn collect_new<F: Fetcher>(
    fetcher: &mut F,
    cfg: &ScrapeConfig,
    tracker: &IncrementalIdTracker,
) -> Result<Vec<JobCard>> {
    let mut cards: Vec<JobCard> = Vec::new();

    for page in 1..=cfg.max_pages {
        let page_cards = fetcher.listing_page(page)?;
        if page_cards.is_empty() {
            info!(page, "empty listing page; end of results");
            break;
        }
        for card in page_cards {
            if tracker.should_stop(&card.id) {
                info!(
                    page,
                    id = %card.id,
                    new = cards.len(),
                    "known id reached; stopping incremental scan"
                );
                return Ok(cards);
            }
            if !cards.iter().any(|c| c.id == card.id) {
                cards.push(card);
            }
        }
        info!(page, total = cards.len(), "listing page scanned, all new");
    }

    Ok(cards)
}
