use std::panic::{AssertUnwindSafe, catch_unwind};
use std::sync::Arc;

use herald_types::{Finding, GuardrailResult};

/// Scanner seam for the gate.
///
/// `scan` reports findings; `render` produces the marker-bearing text shown
/// to the operator. Both must be deterministic for a given input.
pub trait Scan: Send + Sync {
    fn scan(&self, text: &str) -> Vec<Finding>;
    fn render(&self, text: &str) -> String;
}

/// Production scanner delegating to `herald-redact`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LeakScanner;

impl Scan for LeakScanner {
    fn scan(&self, text: &str) -> Vec<Finding> {
        herald_redact::scan(text)
    }

    fn render(&self, text: &str) -> String {
        herald_redact::redact(text)
    }
}

/// The guardrail gate: text in, verdict out, no failure path.
///
/// A scanner that cannot reach a verdict degrades to BLOCK with a single
/// synthetic `scan-error` finding. Failing open is unacceptable here; an
/// undetected leak is worse than a false block.
#[derive(Clone)]
pub struct GuardrailGate {
    scanner: Arc<dyn Scan>,
}

impl Default for GuardrailGate {
    fn default() -> Self {
        Self::new(Arc::new(LeakScanner))
    }
}

impl GuardrailGate {
    #[must_use]
    pub fn new(scanner: Arc<dyn Scan>) -> Self {
        Self { scanner }
    }

    /// Screen text for sensitive content. Always returns a result.
    #[must_use]
    pub fn evaluate(&self, text: &str) -> GuardrailResult {
        let scanner = Arc::clone(&self.scanner);
        let outcome = catch_unwind(AssertUnwindSafe(|| {
            let mut findings = scanner.scan(text);
            // Operators fix findings top to bottom; present them in text order.
            findings.sort_by_key(|f| f.span.map_or((usize::MAX, 0), |s| (s.start, s.end)));
            let rendered = scanner.render(text);
            (findings, rendered)
        }));

        match outcome {
            Ok((findings, rendered)) => GuardrailResult::new(findings, rendered),
            Err(_) => {
                tracing::error!("Sensitive-data scanner panicked; blocking by default");
                GuardrailResult::new(
                    vec![Finding::scan_error(
                        "scanner could not reach a verdict; text blocked",
                    )],
                    text,
                )
            }
        }
    }
}
