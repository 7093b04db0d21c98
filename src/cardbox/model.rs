use crate::error::FieldError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Repository-assigned card identifier. Always >= 1.
pub type CardId = u64;

/// The four categories a card can be filed under.
///
/// Persisted data written by another client may carry a name outside the known
/// set. That value is kept verbatim in [`Category::Other`] so a load/save cycle
/// never rewrites it. The form only passes it through when an edit leaves
/// the category untouched.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Category {
    Work,
    Personal,
    Shopping,
    Ideas,
    Other(String),
}

impl Category {
    /// The selectable categories, in the order the category picker lists them.
    pub const KNOWN: [Category; 4] = [
        Category::Work,
        Category::Personal,
        Category::Shopping,
        Category::Ideas,
    ];

    pub fn as_str(&self) -> &str {
        match self {
            Category::Work => "Work",
            Category::Personal => "Personal",
            Category::Shopping => "Shopping",
            Category::Ideas => "Ideas",
            Category::Other(name) => name,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, Category::Other(_))
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strict parsing: only the four known names are accepted.
impl FromStr for Category {
    type Err = FieldError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(FieldError::MissingCategory);
        }
        Category::KNOWN
            .iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(trimmed))
            .cloned()
            .ok_or_else(|| FieldError::UnknownCategory(trimmed.to_string()))
    }
}

impl From<String> for Category {
    fn from(name: String) -> Self {
        match name.as_str() {
            "Work" => Category::Work,
            "Personal" => Category::Personal,
            "Shopping" => Category::Shopping,
            "Ideas" => Category::Ideas,
            _ => Category::Other(name),
        }
    }
}

impl From<Category> for String {
    fn from(category: Category) -> Self {
        match category {
            Category::Other(name) => name,
            known => known.as_str().to_string(),
        }
    }
}

/// Validated field values that have not been given an id yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardDraft {
    pub title: String,
    pub description: String,
    pub category: Category,
    pub image: Option<String>,
}

impl CardDraft {
    pub fn new(title: impl Into<String>, category: Category) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            category,
            image: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_image(mut self, image: impl Into<String>) -> Self {
        self.image = Some(image.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub id: CardId,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub category: Category,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
}

impl Card {
    pub fn from_draft(id: CardId, draft: CardDraft) -> Self {
        Self {
            id,
            title: draft.title,
            description: draft.description,
            category: draft.category,
            image: draft.image,
        }
    }

    /// Replaces every field except `id`.
    pub fn apply(&mut self, draft: CardDraft) {
        self.title = draft.title;
        self.description = draft.description;
        self.category = draft.category;
        self.image = draft.image;
    }
}
