//! Form fields and their local, uncommitted values

use std::fmt;

use crate::store::Entry;

/// Answers offered by the "Did you eat?" question
pub const FOOD_OPTIONS: [&str; 2] = ["Yes", "No"];

/// The four questions on the form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Name,
    Food,
    Mood,
    Water,
}

impl Field {
    pub const ALL: [Field; 4] = [Field::Name, Field::Food, Field::Mood, Field::Water];

    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Food => "food",
            Field::Mood => "mood",
            Field::Water => "water",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current form contents. Nothing here is persisted until submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormValues {
    pub name: String,
    pub food: String,
    pub mood: i64,
    pub water: String,
}

impl Default for FormValues {
    fn default() -> Self {
        Self {
            name: String::new(),
            food: String::new(),
            mood: 1,
            water: String::new(),
        }
    }
}

impl FormValues {
    pub fn new(
        name: impl Into<String>,
        food: impl Into<String>,
        mood: i64,
        water: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            food: food.into(),
            mood,
            water: water.into(),
        }
    }

    /// The entry these values would be submitted as
    pub fn to_entry(&self) -> Entry {
        Entry::new(self.name.clone(), self.food.clone(), self.mood, self.water.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_fresh_form() {
        let values = FormValues::default();
        assert_eq!(values.name, "");
        assert_eq!(values.food, "");
        assert_eq!(values.mood, 1);
        assert_eq!(values.water, "");
    }

    #[test]
    fn test_to_entry_copies_values_verbatim() {
        let values = FormValues::new("Samina", "Yes", 8, "3 cups");
        assert_eq!(values.to_entry(), Entry::new("Samina", "Yes", 8, "3 cups"));
    }
}
