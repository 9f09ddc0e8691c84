//! Core domain types for Herald.
//!
//! This crate contains pure domain types with no IO, no async, and minimal
//! dependencies. Everything here can be used from any layer of the
//! application.

mod context;
mod draft;
mod errors;
mod guardrail;
mod ids;
mod pipeline;
mod progress;
mod publish;
mod tone;

pub use context::{ContextBundle, ContextFragment};
pub use draft::Draft;
pub use errors::{ComposeError, PipelineError, PublishError, SourcingError};
pub use guardrail::{Finding, GuardrailResult, Span, Verdict, SCAN_ERROR_CATEGORY};
pub use ids::{IncidentId, InvalidIncidentId};
pub use pipeline::PipelineResult;
pub use progress::{ProgressEvent, Stage, StageStatus};
pub use publish::PublishedUpdate;
pub use tone::Tone;
