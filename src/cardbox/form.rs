//! # Form-to-Model Mapper
//!
//! [`CardForm`] holds the raw values of the add/edit dialog and turns them
//! into a [`CardDraft`] on submit.
//!
//! ## Image precedence
//!
//! An uploaded file wins over the URL field. Choosing a file replaces any
//! earlier upload, typing a URL drops the pending upload, and clearing the file
//! input falls back to whatever is in the URL field.
//!
//! ## Blob lifetime
//!
//! The form owns at most one pending [`BlobRef`]. It is released through the
//! host whenever it is superseded (new file, URL typed, file cleared), on
//! [`CardForm::reset`], and on [`CardForm::release`] when the dialog closes.

use crate::blob::{BlobHost, BlobRef, ImageBlob};
use crate::error::{FieldError, Result};
use crate::model::{Card, CardDraft, Category};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CardForm {
    pub title: String,
    pub description: String,
    /// Raw selector value; empty means nothing selected.
    pub category: String,
    /// A category another client wrote that the selector doesn't offer. Kept
    /// as long as the selector still shows it unchanged.
    stored_category: Option<Category>,
    image_url: String,
    upload: Option<BlobRef>,
    preview: Option<String>,
}

impl CardForm {
    /// Blank form for add mode.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Form pre-filled from an existing card for edit mode.
    pub fn for_card(card: &Card) -> Self {
        Self {
            title: card.title.clone(),
            description: card.description.clone(),
            category: card.category.as_str().to_string(),
            stored_category: (!card.category.is_known()).then(|| card.category.clone()),
            image_url: card.image.clone().unwrap_or_default(),
            upload: None,
            preview: card.image.clone(),
        }
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    pub fn set_category(&mut self, category: impl Into<String>) {
        self.category = category.into();
    }

    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    pub fn pending_upload(&self) -> Option<&BlobRef> {
        self.upload.as_ref()
    }

    /// What the preview area currently shows.
    pub fn preview(&self) -> Option<&str> {
        self.preview.as_deref()
    }

    pub fn select_file<H: BlobHost>(&mut self, blob: &ImageBlob, host: &mut H) -> Result<()> {
        let reference = host.create_ref(blob)?;
        self.drop_upload(host);
        self.preview = Some(reference.as_str().to_string());
        self.upload = Some(reference);
        Ok(())
    }

    pub fn clear_file<H: BlobHost>(&mut self, host: &mut H) {
        self.drop_upload(host);
        self.preview = non_empty(&self.image_url);
    }

    pub fn set_image_url<H: BlobHost>(&mut self, url: impl Into<String>, host: &mut H) {
        self.drop_upload(host);
        self.image_url = url.into();
        self.preview = non_empty(&self.image_url);
    }

    /// Drops the image entirely: no upload, empty URL.
    pub fn clear_image<H: BlobHost>(&mut self, host: &mut H) {
        self.drop_upload(host);
        self.image_url.clear();
        self.preview = None;
    }

    pub fn submit(&self) -> Result<CardDraft> {
        if self.title.trim().is_empty() {
            return Err(FieldError::MissingTitle.into());
        }
        let category = match &self.stored_category {
            Some(stored) if self.category == stored.as_str() => stored.clone(),
            _ => self.category.parse::<Category>()?,
        };

        let image = match &self.upload {
            Some(reference) => Some(reference.as_str().to_string()),
            None => non_empty(&self.image_url),
        };

        Ok(CardDraft {
            title: self.title.clone(),
            description: self.description.clone(),
            category,
            image,
        })
    }

    /// Empties every field, releasing any pending upload.
    pub fn reset<H: BlobHost>(&mut self, host: &mut H) {
        self.drop_upload(host);
        *self = Self::empty();
    }

    /// Releases the pending upload without touching the text fields.
    pub fn release<H: BlobHost>(&mut self, host: &mut H) {
        self.drop_upload(host);
    }

    fn drop_upload<H: BlobHost>(&mut self, host: &mut H) {
        if let Some(reference) = self.upload.take() {
            host.release(&reference);
        }
    }
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blob::ObjectUrlHost;
    use crate::error::CardboxError;

    fn filled() -> CardForm {
        let mut form = CardForm::empty();
        form.set_title("Buy milk");
        form.set_category("Shopping");
        form
    }

    fn field_error(form: &CardForm) -> FieldError {
        match form.submit() {
            Err(CardboxError::ValidationFailed(e)) => e,
            other => panic!("expected validation failure, got {:?}", other),
        }
    }

    #[test]
    fn minimal_submission() {
        let draft = filled().submit().unwrap();
        assert_eq!(draft, CardDraft::new("Buy milk", Category::Shopping));
    }

    #[test]
    fn blank_title_rejected() {
        let mut form = filled();
        form.set_title("   ");
        assert_eq!(field_error(&form), FieldError::MissingTitle);
    }

    #[test]
    fn unselected_category_rejected() {
        let mut form = filled();
        form.set_category("");
        assert_eq!(field_error(&form), FieldError::MissingCategory);

        form.set_category("Errands");
        assert_eq!(
            field_error(&form),
            FieldError::UnknownCategory("Errands".into())
        );
    }

    #[test]
    fn url_is_trimmed_and_blank_url_is_absent() {
        let mut host = ObjectUrlHost::new();
        let mut form = filled();
        form.set_image_url("  https://example.com/m.png ", &mut host);
        assert_eq!(
            form.submit().unwrap().image.as_deref(),
            Some("https://example.com/m.png")
        );

        form.set_image_url("   ", &mut host);
        assert_eq!(form.submit().unwrap().image, None);
        assert_eq!(form.preview(), None);
    }

    #[test]
    fn upload_wins_over_url() {
        let mut host = ObjectUrlHost::new();
        let mut form = filled();
        form.set_image_url("https://example.com/m.png", &mut host);
        form.select_file(&ImageBlob::new("m.png", vec![0]), &mut host)
            .unwrap();

        let reference = form.pending_upload().unwrap().as_str().to_string();
        assert_eq!(form.preview(), Some(reference.as_str()));
        assert_eq!(form.submit().unwrap().image, Some(reference));
    }

    #[test]
    fn typing_url_drops_upload() {
        let mut host = ObjectUrlHost::new();
        let mut form = filled();
        form.select_file(&ImageBlob::new("m.png", vec![0]), &mut host)
            .unwrap();
        assert_eq!(host.live_count(), 1);

        form.set_image_url("https://example.com/n.png", &mut host);
        assert_eq!(host.live_count(), 0);
        assert!(form.pending_upload().is_none());
        assert_eq!(
            form.submit().unwrap().image.as_deref(),
            Some("https://example.com/n.png")
        );
    }

    #[test]
    fn clearing_file_falls_back_to_url() {
        let mut host = ObjectUrlHost::new();
        let mut form = filled();
        form.set_image_url("https://example.com/m.png", &mut host);
        form.select_file(&ImageBlob::new("m.png", vec![0]), &mut host)
            .unwrap();
        form.clear_file(&mut host);

        assert_eq!(host.live_count(), 0);
        assert_eq!(form.preview(), Some("https://example.com/m.png"));
        assert_eq!(
            form.submit().unwrap().image.as_deref(),
            Some("https://example.com/m.png")
        );
    }

    #[test]
    fn new_selection_releases_previous() {
        let mut host = ObjectUrlHost::new();
        let mut form = filled();
        form.select_file(&ImageBlob::new("a.png", vec![1]), &mut host)
            .unwrap();
        let first = form.pending_upload().cloned().unwrap();
        form.select_file(&ImageBlob::new("b.png", vec![2]), &mut host)
            .unwrap();

        assert_eq!(host.live_count(), 1);
        assert!(!host.is_live(first.as_str()));
    }

    #[test]
    fn reset_clears_fields_and_releases() {
        let mut host = ObjectUrlHost::new();
        let mut form = filled();
        form.set_description("2 litres");
        form.select_file(&ImageBlob::new("a.png", vec![1]), &mut host)
            .unwrap();
        form.reset(&mut host);

        assert_eq!(form, CardForm::empty());
        assert_eq!(host.live_count(), 0);
    }

    #[test]
    fn for_card_prefills_everything() {
        let card = Card::from_draft(
            5,
            CardDraft::new("Plan trip", Category::Personal)
                .with_description("Lisbon")
                .with_image("https://example.com/lisbon.jpg"),
        );
        let form = CardForm::for_card(&card);
        assert_eq!(form.title, "Plan trip");
        assert_eq!(form.description, "Lisbon");
        assert_eq!(form.category, "Personal");
        assert_eq!(form.image_url(), "https://example.com/lisbon.jpg");
        assert_eq!(form.preview(), Some("https://example.com/lisbon.jpg"));

        let draft = form.submit().unwrap();
        assert_eq!(Card::from_draft(5, draft), card);
    }

    #[test]
    fn clear_image_removes_url() {
        let mut host = ObjectUrlHost::new();
        let card = Card::from_draft(
            1,
            CardDraft::new("t", Category::Work).with_image("https://example.com/x.png"),
        );
        let mut form = CardForm::for_card(&card);
        form.clear_image(&mut host);
        assert_eq!(form.submit().unwrap().image, None);
    }

    #[test]
    fn unchanged_foreign_category_survives_edit() {
        let card = Card::from_draft(3, CardDraft::new("t", Category::Other("Errands".into())));
        let mut form = CardForm::for_card(&card);
        form.set_title("renamed");
        assert_eq!(
            form.submit().unwrap().category,
            Category::Other("Errands".into())
        );

        form.set_category("Ideas");
        assert_eq!(form.submit().unwrap().category, Category::Ideas);

        // Retyping an unknown name is not the same as leaving the stored one alone.
        form.set_category("Chores");
        assert_eq!(field_error(&form), FieldError::UnknownCategory("Chores".into()));
    }
}
