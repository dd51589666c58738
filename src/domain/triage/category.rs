//! Triage category taxonomy.
//!
//! The four fixed classifications of an appointment request. The enum is the
//! single source of truth for what a valid category is: a code outside 1..=4
//! cannot be constructed, so an invalid category can never reach display
//! logic or a terminal session outcome.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::ValidationError;

/// A triage category for a family-practice appointment request.
///
/// Each variant is bound to a stable numeric code (the code the model is
/// prompted to emit), a human-readable description, and a recommended next
/// action for the patient.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "i64", into = "i64")]
pub enum Category {
    /// Administrative request: forms, referral paperwork, medical summaries.
    Administrative,

    /// Not a family-doctor matter: travel vaccinations and similar requests.
    NonPhysician,

    /// Clinical, but resolvable without a doctor visit.
    ResolvableElsewhere,

    /// Clinical, requires the family doctor.
    PhysicianRequired,
}

impl Category {
    /// All categories in code order. Used for help text and prompt rendering.
    pub const ALL: [Category; 4] = [
        Category::Administrative,
        Category::NonPhysician,
        Category::ResolvableElsewhere,
        Category::PhysicianRequired,
    ];

    /// Creates a category from its numeric code, rejecting anything
    /// outside 1..=4.
    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            1 => Some(Category::Administrative),
            2 => Some(Category::NonPhysician),
            3 => Some(Category::ResolvableElsewhere),
            4 => Some(Category::PhysicianRequired),
            _ => None,
        }
    }

    /// Returns the numeric code for this category.
    pub fn code(&self) -> i64 {
        match self {
            Category::Administrative => 1,
            Category::NonPhysician => 2,
            Category::ResolvableElsewhere => 3,
            Category::PhysicianRequired => 4,
        }
    }

    /// Returns the human-readable description of this category.
    pub fn description(&self) -> &'static str {
        match self {
            Category::Administrative => {
                "Administrative - forms, referral paperwork, medical summaries"
            }
            Category::NonPhysician => {
                "Not for the family doctor - travel vaccinations and similar requests"
            }
            Category::ResolvableElsewhere => "Clinical - but resolvable without a doctor visit",
            Category::PhysicianRequired => "Clinical - needs the family doctor",
        }
    }

    /// Returns the recommended next step for a patient in this category.
    pub fn recommended_action(&self) -> &'static str {
        match self {
            Category::Administrative => {
                "Contact the clinic secretariat for administrative requests"
            }
            Category::NonPhysician => "Contact the clinic nurse or a travel vaccination center",
            Category::ResolvableElsewhere => {
                "Try a phone consultation with the nurse or ask a pharmacist"
            }
            Category::PhysicianRequired => "Book an appointment with the family doctor",
        }
    }
}

impl TryFrom<i64> for Category {
    type Error = ValidationError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        Self::from_code(code).ok_or_else(|| ValidationError::out_of_range("category", 1, 4, code))
    }
}

impl From<Category> for i64 {
    fn from(category: Category) -> i64 {
        category.code()
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}. {}", self.code(), self.description())
    }
}
