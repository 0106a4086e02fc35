use serde::Serialize;

use super::fields;
use crate::domain::document::{Document, Fields};

/// A registered football team
///
/// # Invariants
/// - `id` is opaque and assigned by the store; an empty id means the team
///   has not been persisted yet
/// - Every field has a total default, so building a team from a document
///   never fails
///
/// # Example
/// ```
/// use team_registry::domain::team::Team;
///
/// let team = Team::new("River", 1901, 38, "");
///
/// assert!(team.id.is_empty());
/// assert_eq!(team.name, "River");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Team {
    pub id: String,
    pub name: String,
    pub founded_year: i32,
    pub titles_won: i32,
    pub image_url: String,
}

impl Team {
    /// Creates a team that has not been persisted yet
    pub fn new(
        name: impl Into<String>,
        founded_year: i32,
        titles_won: i32,
        image_url: impl Into<String>,
    ) -> Self {
        Self {
            id: String::new(),
            name: name.into(),
            founded_year,
            titles_won,
            image_url: image_url.into(),
        }
    }

    /// Returns a copy of this team addressed at `id`
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = id.into();
        self
    }

    /// Maps a stored document into a team
    ///
    /// Missing or mistyped fields fall back to their zero value. Integer
    /// fields also accept numeric strings, which older writers produced.
    pub fn from_document(doc: &Document) -> Self {
        Self {
            id: doc.id.clone(),
            name: doc.field(fields::NAME).as_string_or_default(),
            founded_year: doc.field(fields::FOUNDED_YEAR).as_i32_or_default(),
            titles_won: doc.field(fields::TITLES_WON).as_i32_or_default(),
            image_url: doc.field(fields::IMAGE_URL).as_string_or_default(),
        }
    }

    /// Builds the field map written to the store
    ///
    /// The id is the document's address and is never written as a field.
    pub fn to_fields(&self) -> Fields {
        let mut map = Fields::new();
        map.insert(fields::NAME.to_string(), self.name.as_str().into());
        map.insert(fields::FOUNDED_YEAR.to_string(), self.founded_year.into());
        map.insert(fields::TITLES_WON.to_string(), self.titles_won.into());
        map.insert(fields::IMAGE_URL.to_string(), self.image_url.as_str().into());
        map
    }
}
