//! Sensitive-data scanner.
//!
//! Pure functions over text: no external calls, no state. The same input
//! always yields the same findings, which the guardrail gate relies on when
//! re-screening operator edits.
//!
//! Detected categories:
//! - `EMAIL` - RFC-ish mailbox addresses
//! - `PHONE` - US phone number formats
//! - `IP` - dotted-quad IPv4 addresses
//! - `HOSTNAME` - two-plus dotted labels ending in an alphabetic TLD
//!
//! Redaction substitutes in-band `<REDACTED_*>` markers recognizable by
//! simple text splitting, leaving all surrounding prose untouched.

use std::sync::LazyLock;

use herald_types::{Finding, Span};
use regex::Regex;

/// Marker inserted for a redacted email address.
pub const REDACTED_EMAIL: &str = "<REDACTED_EMAIL>";
/// Marker inserted for a redacted phone number.
pub const REDACTED_PHONE: &str = "<REDACTED_PHONE>";
/// Marker inserted for a redacted IP address.
pub const REDACTED_IP: &str = "<REDACTED_IP>";
/// Marker inserted for a redacted hostname.
pub const REDACTED_HOSTNAME: &str = "<REDACTED_HOSTNAME>";

static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}\b").expect("email pattern")
});

static PHONE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:\+?1[-.\s]?)?\(?[0-9]{3}\)?[-.\s]?[0-9]{3}[-.\s]?[0-9]{4}\b")
        .expect("phone pattern")
});

static IP: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b(?:[0-9]{1,3}\.){3}[0-9]{1,3}\b").expect("ip pattern"));

static HOSTNAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:[a-zA-Z0-9-]+\.){2,}[a-zA-Z]{2,}\b").expect("hostname pattern")
});

/// Scan text for sensitive content.
///
/// Deterministic and side-effect free; an empty input yields an empty
/// sequence. Findings are ordered by byte offset so operators can fix them
/// top to bottom. When two patterns match overlapping text (an email's
/// domain also looks like a hostname), only the earliest-starting, longest
/// match is reported.
#[must_use]
pub fn scan(text: &str) -> Vec<Finding> {
    let mut candidates: Vec<Finding> = Vec::new();

    for (category, pattern) in [
        ("EMAIL", &*EMAIL),
        ("PHONE", &*PHONE),
        ("IP", &*IP),
        ("HOSTNAME", &*HOSTNAME),
    ] {
        for m in pattern.find_iter(text) {
            if category == "HOSTNAME" && m.as_str().len() <= 4 {
                continue;
            }
            candidates.push(Finding::new(
                category,
                m.as_str(),
                Span::new(m.start(), m.end()),
            ));
        }
    }

    candidates.sort_by(|a, b| {
        let (sa, sb) = (span_of(a), span_of(b));
        sa.start.cmp(&sb.start).then(sb.end.cmp(&sa.end))
    });

    let mut findings: Vec<Finding> = Vec::new();
    for candidate in candidates {
        let span = span_of(&candidate);
        let overlaps = findings
            .iter()
            .any(|kept| span_of(kept).overlaps(&span));
        if !overlaps {
            findings.push(candidate);
        }
    }
    findings
}

fn span_of(finding: &Finding) -> Span {
    // Every finding produced by `scan` carries a span.
    finding.span.unwrap_or(Span::new(0, 0))
}

/// Replace sensitive content with in-band markers.
#[must_use]
pub fn redact(text: &str) -> String {
    let text = EMAIL.replace_all(text, REDACTED_EMAIL);
    let text = PHONE.replace_all(&text, REDACTED_PHONE);
    let text = IP.replace_all(&text, REDACTED_IP);
    HOSTNAME.replace_all(&text, REDACTED_HOSTNAME).into_owned()
}

/// Scan and redact in one pass: `(redacted_text, findings)`.
#[must_use]
pub fn process(text: &str) -> (String, Vec<Finding>) {
    (redact(text), scan(text))
}
