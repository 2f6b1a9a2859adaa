//! Full-engine round trip: listing scan → detail extraction → rule
//! evaluation → atomic persistence → incremental rescan.

use anyhow::Result;
use chrono::NaiveDate;
use serde_json::json;
use tempfile::tempdir;

use jobsift::filter::{self, RuleSet};
use jobsift::pipeline::{self, Fetcher, JobCard, JobDetail, ScrapeConfig};
use jobsift::record::JobRecord;
use jobsift::store::buckets::{ClassifyBy, DateBucketOrganizer};
use jobsift::store::tracker::IncrementalIdTracker;
use jobsift::store::{self, Index};
use jobsift::{extract, AvoidHit};

/// Route the library's tracing output through the test harness. Safe to
/// call from every test; only the first init wins.
fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_test_writer()
        .try_init();
}

const DETAIL_TEXT: &str = "We build developer tools. \
    Required Qualifications: Python experience. \
    Other Requirements: Willingness to travel. \
    Preferred Qualifications: AWS knowledge. \
    The typical base pay range for this role is USD $80,000 - $120,000.";

struct CareersSite {
    pages: Vec<Vec<JobCard>>,
}

impl CareersSite {
    fn with_jobs(ids: &[(&str, &str, &str)]) -> Self {
        // Newest-first listing, six cards per page.
        let cards: Vec<JobCard> = ids
            .iter()
            .map(|(id, title, posted)| JobCard {
                id: id.to_string(),
                title: title.to_string(),
                url: format!("https://example.com/job/{id}"),
                date_posted_raw: Some(posted.to_string()),
            })
            .collect();
        let pages = cards.chunks(6).map(<[JobCard]>::to_vec).collect();
        CareersSite { pages }
    }
}

impl Fetcher for CareersSite {
    fn listing_page(&mut self, page: usize) -> Result<Vec<JobCard>> {
        Ok(self.pages.get(page - 1).cloned().unwrap_or_default())
    }

    fn detail(&mut self, card: &JobCard) -> Result<JobDetail> {
        Ok(JobDetail {
            text: DETAIL_TEXT.to_string(),
            structured: Some(json!({
                "@type": "JobPosting",
                "jobLocation": {
                    "address": {"addressLocality": "Redmond", "addressRegion": "WA"}
                },
                "datePosted": format!("2025-09-0{}T00:00:00Z", card.id.len().min(9)),
            })),
        })
    }
}

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 9, 10).unwrap()
}

fn harvest(site: &mut CareersSite, cards: Vec<JobCard>, db: &mut Index<JobRecord>) -> usize {
    let mut new = 0;
    for card in cards {
        let detail = site.detail(&card).unwrap();
        let rec = extract::extract_record(&card, &detail, today());
        if store::upsert(db, rec, today()) {
            new += 1;
        }
    }
    new
}

#[test]
fn full_run_extracts_filters_and_persists() {
    init_tracing();
    let dir = tempdir().unwrap();
    let index_path = dir.path().join("job_details.json");
    let filtered_path = dir.path().join("avoid_hits.json");

    let mut site = CareersSite::with_jobs(&[
        ("301", "Full Stack Engineer", "Sep 03, 2025"),
        ("300", "Python Engineer", "Sep 03, 2025"),
        ("298", "Data Scientist", "not a date"),
    ]);

    let cards = pipeline::collect_all(&mut site, &ScrapeConfig::default()).unwrap();
    assert_eq!(cards.len(), 3);

    let mut db: Index<JobRecord> = store::load(&index_path).unwrap();
    let new = harvest(&mut site, cards, &mut db);
    assert_eq!(new, 3);

    // Detail extraction produced the split sections end to end.
    let rec = &db["300"];
    assert!(rec.qualifications.required.contains("Python experience."));
    assert!(rec.qualifications.preferred.contains("AWS knowledge."));
    assert_eq!(rec.pay_ranges.len(), 1);
    assert_eq!(rec.pay_ranges[0].range, "USD $80,000 - $120,000");
    assert_eq!(rec.locations, vec!["Redmond, WA"]);
    // Unparseable card date fell back to the structured block's datePosted.
    assert!(db["298"].date_posted.is_some());

    // Rule evaluation: the full-stack title is flagged with exactly one hit.
    let rules: RuleSet =
        serde_json::from_value(json!({"full_stack_block": {"title": ["full stack"]}})).unwrap();
    let hits = filter::evaluate_index(&db, &rules);
    assert_eq!(hits.len(), 1);
    assert_eq!(hits["301"].len(), 1);
    assert_eq!(hits["301"][0].field, "title");

    // Persist both stores and read them back.
    store::save_atomic(&index_path, &db).unwrap();
    store::save_atomic(&filtered_path, &hits).unwrap();
    let db2: Index<JobRecord> = store::load(&index_path).unwrap();
    assert_eq!(db2, db);
    let hits2: Index<Vec<AvoidHit>> = store::load(&filtered_path).unwrap();
    assert_eq!(hits2, hits);
}

#[test]
fn incremental_run_collects_only_new_jobs() {
    init_tracing();
    let dir = tempdir().unwrap();
    let index_path = dir.path().join("job_details.json");
    let ids_path = dir.path().join("job_ids.json");

    // Day one: full scan.
    let mut site = CareersSite::with_jobs(&[
        ("301", "Full Stack Engineer", "Sep 03, 2025"),
        ("300", "Python Engineer", "Sep 03, 2025"),
    ]);
    let cards = pipeline::collect_all(&mut site, &ScrapeConfig::default()).unwrap();
    let mut db: Index<JobRecord> = store::load(&index_path).unwrap();
    harvest(&mut site, cards, &mut db);
    store::save_atomic(&index_path, &db).unwrap();

    let mut tracker = IncrementalIdTracker::new();
    tracker.merge(db.keys().cloned());
    store::save_atomic(&ids_path, &tracker.known().collect::<Vec<_>>()).unwrap();

    // Day two: two new postings on top, listing still newest-first.
    let mut site = CareersSite::with_jobs(&[
        ("305", "Backend Engineer", "Sep 09, 2025"),
        ("304", "Platform Engineer", "Sep 09, 2025"),
        ("301", "Full Stack Engineer", "Sep 03, 2025"),
        ("300", "Python Engineer", "Sep 03, 2025"),
    ]);
    let known: Vec<String> =
        serde_json::from_str(&std::fs::read_to_string(&ids_path).unwrap()).unwrap();
    let tracker = IncrementalIdTracker::from_ids(known);
    let new_cards = pipeline::collect_new(&mut site, &ScrapeConfig::default(), &tracker).unwrap();
    let ids: Vec<&str> = new_cards.iter().map(|c| c.id.as_str()).collect();
    assert_eq!(ids, vec!["305", "304"]);

    let mut db: Index<JobRecord> = store::load(&index_path).unwrap();
    let new = harvest(&mut site, new_cards, &mut db);
    assert_eq!(new, 2);
    assert_eq!(db.len(), 4);

    // Re-upserting an existing id is not "new" and clobbers nothing.
    let mut partial = JobRecord::new("300");
    partial.title = "Python Engineer II".into();
    assert!(!store::upsert(&mut db, partial, today()));
    assert!(db["300"].qualifications.required.contains("Python experience."));
    assert_eq!(db["300"].title, "Python Engineer II");
}

#[test]
fn discovery_buckets_partition_an_incremental_run() {
    init_tracing();
    let mut site = CareersSite::with_jobs(&[
        ("305", "Backend Engineer", "Sep 09, 2025"),
        ("304", "Platform Engineer", "bad date"),
    ]);
    let cards = pipeline::collect_all(&mut site, &ScrapeConfig::default()).unwrap();
    let mut db: Index<JobRecord> = Index::new();
    harvest(&mut site, cards, &mut db);

    let mut org = DateBucketOrganizer::new(ClassifyBy::DiscoveryDate);
    let buckets = org.organize(db.values());
    // Incremental mode buckets by discovery date, so both land together.
    assert_eq!(buckets["2025-09-10"], vec!["305", "304"]);
}
