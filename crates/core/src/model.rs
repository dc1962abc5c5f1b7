//! Survey and response records as stored in the flat-file documents.
//!
//! The wire shapes here match the JSON documents on disk: `surveys.json`
//! holds an array of [`Survey`], `responses.json` an array of [`Response`].
//! Optional fields are tolerated on read via serde defaults so hand-edited
//! or older documents still load.

use chrono::{DateTime, Utc};
use kiosk_types::{ImageName, ItemId};
use serde::{Deserialize, Serialize};

/// A survey identifier.
///
/// Ids are decimal strings on the wire (`"1"`, `"2"`, ...) assigned by a
/// single monotonic max-plus-one scheme, so they stay unique even across
/// deletions. Non-numeric ids in hand-edited documents are tolerated; they
/// are simply ignored when allocating the next id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SurveyId(String);

impl SurveyId {
    /// Wraps an identifier string.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the id as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns the id parsed as a decimal number, if it is one.
    pub fn numeric(&self) -> Option<u64> {
        self.0.parse().ok()
    }
}

impl std::fmt::Display for SurveyId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for SurveyId {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.to_owned()))
    }
}

/// One selectable option within a survey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: ItemId,
    #[serde(default)]
    pub text: String,
    /// Filename reference into the image blob store; absent when the item
    /// has no image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ImageName>,
}

/// A survey definition with its display fields and ordered items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Survey {
    pub id: SurveyId,
    #[serde(default)]
    pub title_en: String,
    #[serde(default)]
    pub title_sv: String,
    #[serde(default)]
    pub description_en: String,
    #[serde(default)]
    pub description_sv: String,
    #[serde(default)]
    pub items: Vec<Item>,
    pub created_at: DateTime<Utc>,
    /// Set exactly once, by the first recorded response; cleared by reset.
    #[serde(default)]
    pub first_response_at: Option<DateTime<Utc>>,
}

impl Survey {
    /// Returns the item with the given id, if present.
    pub fn item(&self, item_id: &ItemId) -> Option<&Item> {
        self.items.iter().find(|item| &item.id == item_id)
    }
}

/// One end-user submission for a survey.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Response {
    pub survey_id: SurveyId,
    /// Semantically a set; stored in submission order.
    #[serde(default)]
    pub selected_items: Vec<ItemId>,
    pub timestamp: DateTime<Utc>,
}

/// Admin-submitted fields for creating or editing a survey.
///
/// Edits are full-replace: the items listed here become the survey's entire
/// item list, and the four display fields overwrite the stored ones.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SurveyDraft {
    #[serde(default)]
    pub title_en: String,
    #[serde(default)]
    pub title_sv: String,
    #[serde(default)]
    pub description_en: String,
    #[serde(default)]
    pub description_sv: String,
    #[serde(default)]
    pub items: Vec<ItemDraft>,
}

/// One item in a survey draft.
///
/// An item may carry a new inline image (`image` filename plus `image_data`
/// base64 payload), keep an already-stored one (`existing_image`), or have
/// no image at all.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ItemDraft {
    pub id: String,
    #[serde(default)]
    pub text: String,
    /// Filename for a new inline image payload.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Base64-encoded bytes of a new inline image.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_data: Option<String>,
    /// Filename of an image already in the blob store, kept as-is.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub existing_image: Option<String>,
}
