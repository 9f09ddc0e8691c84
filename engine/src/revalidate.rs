use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use herald_types::GuardrailResult;
use tokio::sync::watch;

use crate::GuardrailGate;

/// Monotonically increasing per-edit sequence number.
///
/// Last-writer-wins is keyed by this counter compared at scan completion,
/// not by arrival time, so an older scan that happens to finish after a
/// newer one can never clobber it.
pub type EditSeq = u64;

/// Quiet window before a submitted edit is actually scanned.
pub const DEFAULT_QUIET_WINDOW_MS: u64 = 500;

/// Debounced re-validation for the edit loop.
///
/// Every operator edit is submitted here; only the scan for the most recent
/// edit within the quiet window runs, and a superseded scan that is already
/// in flight has its result discarded at completion time.
pub struct DebouncedValidator {
    gate: GuardrailGate,
    quiet: Duration,
    seq: AtomicU64,
    tx: watch::Sender<Option<(EditSeq, GuardrailResult)>>,
}

impl DebouncedValidator {
    #[must_use]
    pub fn new(gate: GuardrailGate) -> Self {
        Self::with_quiet_window(gate, Duration::from_millis(DEFAULT_QUIET_WINDOW_MS))
    }

    #[must_use]
    pub fn with_quiet_window(gate: GuardrailGate, quiet: Duration) -> Self {
        let (tx, _) = watch::channel(None);
        Self {
            gate,
            quiet,
            seq: AtomicU64::new(0),
            tx,
        }
    }

    /// Submit an edit for validation, superseding any earlier pending edit.
    /// Returns the edit's sequence number.
    pub fn submit(self: &Arc<Self>, text: String) -> EditSeq {
        let seq = self.seq.fetch_add(1, Ordering::SeqCst) + 1;
        let this = Arc::clone(self);
        tokio::spawn(async move {
            tokio::time::sleep(this.quiet).await;
            if this.seq.load(Ordering::SeqCst) != seq {
                // Superseded during the quiet window; skip the scan entirely.
                return;
            }
            let result = this.gate.evaluate(&text);
            this.tx.send_if_modified(|current| match current {
                Some((applied, _)) if *applied >= seq => false,
                _ => {
                    *current = Some((seq, result));
                    true
                }
            });
        });
        seq
    }

    /// Watch the validated state. The published sequence number only ever
    /// increases.
    #[must_use]
    pub fn results(&self) -> watch::Receiver<Option<(EditSeq, GuardrailResult)>> {
        self.tx.subscribe()
    }

    /// Most recently applied validation, if any edit has completed.
    #[must_use]
    pub fn latest(&self) -> Option<(EditSeq, GuardrailResult)> {
        self.tx.borrow().clone()
    }
}
