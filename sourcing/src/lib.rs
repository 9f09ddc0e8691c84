//! Context sourcing adapter.
//!
//! Given an incident identifier, gathers raw context from the configured
//! operational systems into a [`ContextBundle`]. Fetches fan out
//! concurrently, each bounded by its own timeout; a slow or failing source
//! degrades to a `!ok` fragment instead of blocking the others. The adapter
//! only errors when every configured source failed, so the pipeline stays
//! useful under partial upstream outage.

mod adapter;
mod sources;

pub use adapter::SourcingAdapter;
pub use sources::{ContextSource, FileSource, StaticSource};

pub const DEFAULT_SOURCE_TIMEOUT_SECS: u64 = 5;
