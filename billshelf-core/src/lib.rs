//! Billshelf core library — domain types, descriptor persistence, dates.
//!
//! Public API surface:
//! - [`types`] — [`BillKey`], [`CandidateRecord`], recency ordering
//! - [`descriptor`] — the `data.json` document, load / save
//! - [`dates`] — lenient date parsing and mtime fallbacks
//! - [`error`] — [`DescriptorError`]

pub mod dates;
pub mod descriptor;
pub mod error;
pub mod types;

pub use descriptor::Descriptor;
pub use error::DescriptorError;
pub use types::{best_by_recency, BillKey, CandidateRecord, RecencyKey};
