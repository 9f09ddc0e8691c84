//! Prompt construction for incident status updates.

use herald_types::{ContextBundle, Tone};

/// System role for the generation capability.
pub const SYSTEM_PROMPT: &str =
    "You are a professional incident communications specialist for a public status feed.";

const DRAFT_PROMPT: &str = "\
Generate a clear, concise status update for a service incident.

Based on the incident context provided, write a status update that:
1. Clearly explains what happened without technical jargon
2. States current impact to users
3. Describes what actions the team is taking
4. Provides an estimated timeline if available
5. Maintains a tone appropriate for external customers

Keep the update under 300 words and avoid revealing sensitive technical
details. Use markdown formatting for better readability (headers, bold
text, lists, etc.).

Sign off as \"Incident Communications Team\".

Incident Context:
";

/// Build the user prompt for a drafting request.
///
/// The bundle content gets a first-pass redaction before interpolation so
/// raw operational context cannot smuggle sensitive details into the
/// generation capability's input.
#[must_use]
pub fn build_prompt(bundle: &ContextBundle, tone: Tone) -> String {
    let (redacted_context, _) = herald_redact::process(&bundle.combined_content());
    format!(
        "{DRAFT_PROMPT}{redacted_context}\n\nTone: Write in a {} tone.\n\nGenerate a status update:",
        tone.style()
    )
}
