//! Transient notices shown to the respondent (toasts)

use crate::form::sink::SubmitError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeVariant {
    Default,
    Destructive,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub variant: NoticeVariant,
    pub title: String,
    pub description: String,
}

impl Notice {
    /// Shown when submit is pressed with a field still missing
    pub fn incomplete_form() -> Self {
        Self {
            variant: NoticeVariant::Destructive,
            title: "Uh oh! You didn't fill out the form".to_string(),
            description: "It's only 4 questions. C`mon try again".to_string(),
        }
    }

    /// Shown when the insert call did not produce an entry
    pub fn submit_failed(error: &SubmitError) -> Self {
        Self {
            variant: NoticeVariant::Destructive,
            title: "Your answers were not saved".to_string(),
            description: format!("{}. Press submit to try again", error),
        }
    }

    pub fn is_destructive(&self) -> bool {
        self.variant == NoticeVariant::Destructive
    }
}
