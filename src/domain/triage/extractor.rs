//! Categorization extraction from model replies.
//!
//! The model is prompted to embed a single JSON block in its reply only when
//! it has enough information to conclude. Anything that fails to parse or
//! validate here means the model is still gathering information, so the
//! caller treats `None` as a normal conversational continuation, never as an
//! error.

use serde_json::Value;

use crate::domain::foundation::ValidationError;
use crate::domain::triage::{Categorization, Category};

/// Extractor output: a valid category plus the rationale as the model sent
/// it, if it sent one at all.
///
/// Whether a missing rationale disqualifies the draft is the caller's
/// decision; [`into_categorization`](Self::into_categorization) performs that
/// field-completeness check.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorizationDraft {
    /// The validated, normalized category.
    pub category: Category,
    /// The rationale, carried through verbatim when present.
    pub reason: Option<String>,
}

impl CategorizationDraft {
    /// Promotes the draft to an accepted categorization.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the reason is absent, empty, or whitespace only.
    pub fn into_categorization(self) -> Result<Categorization, ValidationError> {
        let reason = self
            .reason
            .ok_or_else(|| ValidationError::empty_field("reason"))?;
        Categorization::new(self.category, reason)
    }
}

/// Scans a raw model reply for an embedded categorization payload.
///
/// The candidate payload is the substring from the first `{` to the last `}`
/// inclusive. This heuristic is deliberately permissive: it tolerates
/// natural-language preamble and postamble around a single embedded JSON
/// block, but misfires if the reply contains several blocks or stray braces.
/// The true contract is that the model emits at most one block per reply;
/// whether that always holds is an open question of the prompt, so the
/// heuristic is kept as is rather than tightened.
///
/// Returns `None` ("no categorization present") when:
/// - the reply has no `{`/`}` pair,
/// - the candidate payload is not valid JSON,
/// - the payload has no `category` field,
/// - the field is a string that does not parse as an integer,
/// - the number is not one of the four valid codes.
///
/// This is a pure function of its input.
pub fn extract_categorization(reply: &str) -> Option<CategorizationDraft> {
    let start = reply.find('{')?;
    let end = reply.rfind('}')?;
    if end < start {
        return None;
    }

    let payload: Value = serde_json::from_str(&reply[start..=end]).ok()?;

    let code = match payload.get("category")? {
        Value::Number(n) => n.as_i64()?,
        Value::String(s) => s.trim().parse::<i64>().ok()?,
        _ => return None,
    };
    let category = Category::from_code(code)?;

    let reason = payload
        .get("reason")
        .and_then(Value::as_str)
        .map(str::to_owned);

    Some(CategorizationDraft { category, reason })
}
