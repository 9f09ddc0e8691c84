use serde::{Deserialize, Serialize};

/// Category used for the synthetic finding emitted when the scanner itself
/// cannot reach a verdict. The gate fails closed rather than open.
pub const SCAN_ERROR_CATEGORY: &str = "scan-error";

/// Byte-offset span of a finding in the scanned text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub const fn overlaps(&self, other: &Span) -> bool {
        self.start < other.end && other.start < self.end
    }
}

/// A detected span of sensitive content.
///
/// Purely descriptive; carries no remediation. Only the scanner produces
/// these (plus the gate's synthetic scan-error finding).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finding {
    pub category: String,
    pub excerpt: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub span: Option<Span>,
}

impl Finding {
    #[must_use]
    pub fn new(category: impl Into<String>, excerpt: impl Into<String>, span: Span) -> Self {
        Self {
            category: category.into(),
            excerpt: excerpt.into(),
            span: Some(span),
        }
    }

    /// Synthetic finding for a scanner that could not complete.
    #[must_use]
    pub fn scan_error(detail: impl Into<String>) -> Self {
        Self {
            category: SCAN_ERROR_CATEGORY.to_string(),
            excerpt: detail.into(),
            span: None,
        }
    }
}

impl std::fmt::Display for Finding {
    /// Wire form used by the `leaks` arrays: `CATEGORY: excerpt`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.category, self.excerpt)
    }
}

/// Outcome of a guardrail evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Verdict {
    Pass,
    Block,
}

/// Result of screening a text for sensitive content.
///
/// The verdict is derived from the findings at construction time, so
/// `verdict == Block ⇔ findings is non-empty` holds for every value of
/// this type.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuardrailResult {
    verdict: Verdict,
    findings: Vec<Finding>,
    rendered_text: String,
}

impl GuardrailResult {
    /// Build a result from scanner output. Findings are kept in the order
    /// given (the scanner contract orders them by position in the text).
    #[must_use]
    pub fn new(findings: Vec<Finding>, rendered_text: impl Into<String>) -> Self {
        let verdict = if findings.is_empty() {
            Verdict::Pass
        } else {
            Verdict::Block
        };
        Self {
            verdict,
            findings,
            rendered_text: rendered_text.into(),
        }
    }

    #[must_use]
    pub const fn verdict(&self) -> Verdict {
        self.verdict
    }

    #[must_use]
    pub fn is_pass(&self) -> bool {
        self.verdict == Verdict::Pass
    }

    #[must_use]
    pub fn findings(&self) -> &[Finding] {
        &self.findings
    }

    #[must_use]
    pub fn into_findings(self) -> Vec<Finding> {
        self.findings
    }

    /// Text with blocked spans replaced by in-band `<REDACTED ...>` markers.
    #[must_use]
    pub fn rendered_text(&self) -> &str {
        &self.rendered_text
    }

    /// Findings in their wire form, one `CATEGORY: excerpt` line each.
    #[must_use]
    pub fn leak_lines(&self) -> Vec<String> {
        self.findings.iter().map(ToString::to_string).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verdict_is_pass_without_findings() {
        let result = GuardrailResult::new(Vec::new(), "clean text");
        assert_eq!(result.verdict(), Verdict::Pass);
        assert!(result.is_pass());
        assert!(result.findings().is_empty());
    }

    #[test]
    fn verdict_is_block_with_findings() {
        let finding = Finding::new("EMAIL", "a@b.co", Span::new(0, 6));
        let result = GuardrailResult::new(vec![finding], "<REDACTED_EMAIL>");
        assert_eq!(result.verdict(), Verdict::Block);
        assert!(!result.is_pass());
        assert_eq!(result.findings().len(), 1);
    }

    #[test]
    fn scan_error_finding_blocks() {
        let result = GuardrailResult::new(vec![Finding::scan_error("scanner panicked")], "");
        assert_eq!(result.verdict(), Verdict::Block);
        assert_eq!(result.findings()[0].category, SCAN_ERROR_CATEGORY);
    }

    #[test]
    fn leak_lines_use_wire_form() {
        let result = GuardrailResult::new(
            vec![Finding::new("EMAIL", "ops@example.com", Span::new(3, 18))],
            "",
        );
        assert_eq!(result.leak_lines(), vec!["EMAIL: ops@example.com"]);
    }

    #[test]
    fn span_overlap_detection() {
        assert!(Span::new(0, 5).overlaps(&Span::new(4, 8)));
        assert!(!Span::new(0, 5).overlaps(&Span::new(5, 8)));
        assert!(Span::new(2, 10).overlaps(&Span::new(0, 20)));
    }
}
