//! Core orchestration for Herald.
//!
//! Sequences sourcing, composition, and gating into the draft pipeline;
//! owns the guardrail gate, the publish controller, the append-only status
//! log, and the debounced re-validation path used while the operator edits.
//!
//! The one rule everything here bends around: an undetected leak is worse
//! than a false block, so the gate never fails open.

mod gate;
mod log;
mod pipeline;
mod publish;
mod revalidate;

pub use gate::{GuardrailGate, LeakScanner, Scan};
pub use log::{FileStatusLog, MemoryStatusLog, StatusLog, MAX_LOG_ENTRIES};
pub use pipeline::DraftPipeline;
pub use publish::PublishController;
pub use revalidate::{DebouncedValidator, EditSeq, DEFAULT_QUIET_WINDOW_MS};
