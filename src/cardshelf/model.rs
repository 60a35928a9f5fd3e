use crate::error::{CardsError, Result, FILL_ALL_FIELDS};
use serde::{Deserialize, Serialize};

/// A single catalog record.
///
/// The serialized shape is the persisted wire format: `id`, `title`, `desc`, `image`,
/// all strings. Anything else in a stored record makes the whole blob corrupt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Card {
    pub id: String,
    pub title: String,
    #[serde(rename = "desc")]
    pub description: String,
    pub image: String,
}

/// The user-editable fields of a card, as typed into the form.
///
/// Values are kept raw; [`CardFields::validated`] trims them and checks the required ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CardFields {
    pub title: String,
    pub description: String,
    pub image: String,
}

impl CardFields {
    pub fn new(
        title: impl Into<String>,
        description: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into(),
            description: description.into(),
            image: image.into(),
        }
    }

    pub fn from_card(card: &Card) -> Self {
        Self::new(&card.title, &card.description, &card.image)
    }

    /// Trimmed copy of the fields, or a validation error if title or description is blank.
    /// A blank image is allowed and comes back empty.
    pub fn validated(&self) -> Result<CardFields> {
        let title = self.title.trim();
        let description = self.description.trim();
        if title.is_empty() || description.is_empty() {
            return Err(CardsError::Validation(FILL_ALL_FIELDS.to_string()));
        }
        Ok(CardFields::new(title, description, self.image.trim()))
    }
}
