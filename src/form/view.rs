//! Text rendering of the check-in page
//!
//! The page shows either the question cards with a submit control, or,
//! once an entry is stored, only the thank-you card.

use std::fmt;

use crate::form::controller::SubmissionState;
use crate::form::fields::{FormValues, FOOD_OPTIONS};
use crate::form::mood::mood_emoji;
use crate::form::notice::{Notice, NoticeVariant};

pub const HEADLINE: &str = "Daily Routine Schedule For THE SAMINA RANI SHRESTHA";
pub const THANK_YOU_TITLE: &str = "Thank you for your time";
pub const THANK_YOU_DESCRIPTION: &str = "THIS DATA WILL BE USED FOR FUTURE PURPOSE";

/// A question card: title, subtitle and the current answer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuestionCard {
    pub title: &'static str,
    pub description: &'static str,
    pub answer: String,
}

/// What the page renders for a given state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageView {
    Form {
        cards: Vec<QuestionCard>,
        submit_label: &'static str,
        submit_enabled: bool,
    },
    ThankYou,
}

impl PageView {
    pub fn new(state: &SubmissionState, values: &FormValues) -> Self {
        if !state.is_form_visible() {
            return PageView::ThankYou;
        }

        let submitting = matches!(state, SubmissionState::Submitting);
        PageView::Form {
            cards: question_cards(values),
            submit_label: if submitting { "Loading..." } else { "Submit" },
            submit_enabled: state.is_submit_enabled(),
        }
    }
}

/// The four question cards for `values`
pub fn question_cards(values: &FormValues) -> Vec<QuestionCard> {
    let mood = match mood_emoji(values.mood) {
        Some(emoji) => format!("{} {}", values.mood, emoji),
        None => values.mood.to_string(),
    };

    vec![
        QuestionCard {
            title: "Specify your name",
            description: "NO ANY OTHER PERSON, ONLY HER!!!",
            answer: values.name.clone(),
        },
        QuestionCard {
            title: "1. Did you eat?",
            description: "IT'S VERY IMPORTANT FOR ME THAT YOUR TUMMY IS FULL",
            answer: if values.food.is_empty() {
                format!("({})", FOOD_OPTIONS.join(" / "))
            } else {
                values.food.clone()
            },
        },
        QuestionCard {
            title: "2. What's your current mood?",
            description: "YOUR SMILE IS THE SUNSHINE THAT LIGHTS UP MY WORLD",
            answer: mood,
        },
        QuestionCard {
            title: "3. Did you drink? How much?",
            description: "ABOUT 11.5 CUPS (2.7 LITERS) OF FLUIDS A DAY FOR WOMEN.",
            answer: values.water.clone(),
        },
    ]
}

impl fmt::Display for QuestionCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "+ {}", self.title)?;
        writeln!(f, "| {}", self.description)?;
        writeln!(f, "| > {}", self.answer)
    }
}

impl fmt::Display for PageView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", HEADLINE)?;
        writeln!(f)?;
        match self {
            PageView::ThankYou => {
                writeln!(f, "+ {}", THANK_YOU_TITLE)?;
                writeln!(f, "| {}", THANK_YOU_DESCRIPTION)
            }
            PageView::Form {
                cards,
                submit_label,
                submit_enabled,
            } => {
                for card in cards {
                    writeln!(f, "{}", card)?;
                }
                if *submit_enabled {
                    writeln!(f, "[ {} ]", submit_label)
                } else {
                    writeln!(f, "[ {} ] (disabled)", submit_label)
                }
            }
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let marker = match self.variant {
            NoticeVariant::Destructive => "!",
            NoticeVariant::Default => "i",
        };
        write!(f, "[{}] {} - {}", marker, self.title, self.description)
    }
}
