//! Job record extraction, filtering, and incremental persistence.
//!
//! Turns semi-structured career-page content (rendered text, detail
//! fragments, embedded JSON-LD blocks) into normalized [`JobRecord`]s,
//! evaluates user-authored avoid-rules against them, tracks which ids earlier
//! runs already collected, and stores everything in date-partitioned
//! JSON-backed stores behind a crash-safe atomic-rename write.
//!
//! Fetching (browser/HTTP) and the CLI live outside this crate; the engine
//! consumes a [`pipeline::Fetcher`] and already-parsed configuration.

pub mod dates;
pub mod extract;
pub mod filter;
pub mod pipeline;
pub mod record;
pub mod store;
pub mod text;

pub use dates::DateParseError;
pub use filter::{AvoidHit, RuleSet};
pub use pipeline::{Fetcher, JobCard, JobDetail, ScrapeConfig};
pub use record::{JobRecord, PayRange, Qualifications};
pub use store::{Index, StoreError};
