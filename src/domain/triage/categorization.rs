//! Final categorization of an appointment request.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::ValidationError;
use crate::domain::triage::Category;

/// An accepted categorization: the category plus the model's rationale.
///
/// # Invariants
///
/// - `category` is one of the four valid triage categories (guaranteed by
///   the type).
/// - `reason` is non-empty (validated at construction).
///
/// Only the turn handler constructs these, from extractor output; nothing
/// else in the system builds one ad hoc.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Categorization {
    category: Category,
    reason: String,
}

impl Categorization {
    /// Creates a categorization with the given category and rationale.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the reason is empty or whitespace only.
    pub fn new(category: Category, reason: impl Into<String>) -> Result<Self, ValidationError> {
        let reason = reason.into();
        if reason.trim().is_empty() {
            return Err(ValidationError::empty_field("reason"));
        }
        Ok(Self { category, reason })
    }

    /// Returns the triage category.
    pub fn category(&self) -> Category {
        self.category
    }

    /// Returns the model's rationale for the categorization.
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_keeps_category_and_reason() {
        let c = Categorization::new(Category::NonPhysician, "travel vaccination request").unwrap();
        assert_eq!(c.category(), Category::NonPhysician);
        assert_eq!(c.reason(), "travel vaccination request");
    }

    #[test]
    fn rejects_empty_reason() {
        let result = Categorization::new(Category::Administrative, "");
        assert_eq!(result, Err(ValidationError::empty_field("reason")));
    }

    #[test]
    fn rejects_whitespace_only_reason() {
        assert!(Categorization::new(Category::Administrative, "   \n").is_err());
    }

    #[test]
    fn serializes_category_as_code() {
        let c = Categorization::new(Category::PhysicianRequired, "persistent chest pain").unwrap();
        let json = serde_json::to_value(&c).unwrap();
        assert_eq!(json["category"], 4);
        assert_eq!(json["reason"], "persistent chest pain");
    }
}
