//! Presence checks run before anything is sent
//!
//! Every field must be filled in. A string field counts as missing when
//! empty; mood counts as missing when zero, even though zero is a value
//! rather than a blank. The mood slider never produces zero, so this only
//! bites callers that build `FormValues` by hand.

use std::fmt;

use crate::form::fields::{Field, FormValues};

/// Why a field failed the presence check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueReason {
    /// Text field left empty
    Empty,
    /// Mood left at zero
    Zero,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldIssue {
    pub field: Field,
    pub reason: IssueReason,
}

impl fmt::Display for FieldIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.reason {
            IssueReason::Empty => write!(f, "{} is empty", self.field),
            IssueReason::Zero => write!(f, "{} is zero", self.field),
        }
    }
}

/// Outcome of validating a form, one issue per failing field
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationReport {
    issues: Vec<FieldIssue>,
}

impl ValidationReport {
    pub fn is_ok(&self) -> bool {
        self.issues.is_empty()
    }

    pub fn issues(&self) -> &[FieldIssue] {
        &self.issues
    }

    /// Fields that failed, in form order
    pub fn failed_fields(&self) -> Vec<Field> {
        self.issues.iter().map(|i| i.field).collect()
    }

    fn push(&mut self, field: Field, reason: IssueReason) {
        self.issues.push(FieldIssue { field, reason });
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.issues.is_empty() {
            return f.write_str("all fields present");
        }
        let parts: Vec<String> = self.issues.iter().map(|i| i.to_string()).collect();
        f.write_str(&parts.join(", "))
    }
}

/// Check that all four fields are filled in
pub fn validate(values: &FormValues) -> ValidationReport {
    let mut report = ValidationReport::default();

    for field in Field::ALL {
        match field {
            Field::Name if values.name.is_empty() => report.push(field, IssueReason::Empty),
            Field::Food if values.food.is_empty() => report.push(field, IssueReason::Empty),
            Field::Mood if values.mood == 0 => report.push(field, IssueReason::Zero),
            Field::Water if values.water.is_empty() => report.push(field, IssueReason::Empty),
            _ => {}
        }
    }

    report
}
