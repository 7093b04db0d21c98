//! # View Coordinator
//!
//! [`Coordinator`] sits between the repository and whatever UI is on top. It
//! owns no card data beyond the dialog state: either [`Dialog::Idle`], or
//! [`Dialog::Editing`] with the open [`CardForm`] and, in edit mode, the id of
//! the card being edited.
//!
//! ```text
//!            open_add / open_edit
//!   Idle ─────────────────────────▶ Editing
//!    ▲  ◀──────── submit (ok) ────────┘ │
//!    │  ◀──────── cancel ───────────────┘
//!    └─ delete (confirmed) ─┘
//! ```
//!
//! A submit that fails validation leaves the dialog open and touches nothing.
//! Mutating operations return a [`CmdResult`] with the affected cards and
//! leveled messages; rendering them is the UI's job.

use crate::blob::{BlobHost, ImageBlob};
use crate::error::{CardboxError, Result};
use crate::form::CardForm;
use crate::model::{Card, CardId, Category};
use crate::repo::CardRepository;
use crate::store::SlotStore;
use tracing::debug;

pub const DELETE_PROMPT: &str = "Are you sure you want to delete this card?";
pub const EMPTY_MESSAGE: &str = "No cards yet!";
pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/400x300?text=No+Image";

/// Synchronous yes/no gate in front of destructive actions.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

impl<F: FnMut(&str) -> bool> Confirm for F {
    fn confirm(&mut self, prompt: &str) -> bool {
        self(prompt)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_cards: Vec<Card>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }
}

/// Badge colour for a category.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BadgeTone {
    Blue,
    Green,
    Purple,
    Yellow,
    Gray,
}

impl BadgeTone {
    pub fn style_name(&self) -> &'static str {
        match self {
            BadgeTone::Blue => "badge_blue",
            BadgeTone::Green => "badge_green",
            BadgeTone::Purple => "badge_purple",
            BadgeTone::Yellow => "badge_yellow",
            BadgeTone::Gray => "badge_gray",
        }
    }
}

pub fn category_tone(category: &Category) -> BadgeTone {
    match category {
        Category::Work => BadgeTone::Blue,
        Category::Personal => BadgeTone::Green,
        Category::Shopping => BadgeTone::Purple,
        Category::Ideas => BadgeTone::Yellow,
        Category::Other(_) => BadgeTone::Gray,
    }
}

/// One card as the list shows it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub id: CardId,
    pub title: String,
    pub description: String,
    pub category: String,
    pub tone: BadgeTone,
    /// Image to show; the placeholder when the card's image can't be displayed.
    pub image: Option<String>,
    pub image_is_placeholder: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListView {
    pub heading: String,
    pub cards: Vec<CardView>,
    /// Set when there are no cards; the UI shows it with an add prompt.
    pub empty_message: Option<String>,
}

#[derive(Debug)]
pub enum Dialog {
    Idle,
    Editing {
        target: Option<CardId>,
        form: CardForm,
    },
}

pub struct Coordinator<S: SlotStore, H: BlobHost> {
    repo: CardRepository<S>,
    host: H,
    dialog: Dialog,
}

impl<S: SlotStore, H: BlobHost> Coordinator<S, H> {
    pub fn new(repo: CardRepository<S>, host: H) -> Self {
        Self {
            repo,
            host,
            dialog: Dialog::Idle,
        }
    }

    pub fn repository(&self) -> &CardRepository<S> {
        &self.repo
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn dialog(&self) -> &Dialog {
        &self.dialog
    }

    pub fn is_editing(&self) -> bool {
        matches!(self.dialog, Dialog::Editing { .. })
    }

    /// Id of the card bound to the open dialog, if it is in edit mode.
    pub fn editing_target(&self) -> Option<CardId> {
        match self.dialog {
            Dialog::Editing { target, .. } => target,
            Dialog::Idle => None,
        }
    }

    pub fn dialog_title(&self) -> Option<&'static str> {
        match self.dialog {
            Dialog::Idle => None,
            Dialog::Editing { target: None, .. } => Some("Add New Card"),
            Dialog::Editing {
                target: Some(_), ..
            } => Some("Edit Card"),
        }
    }

    pub fn submit_label(&self) -> Option<&'static str> {
        match self.dialog {
            Dialog::Idle => None,
            Dialog::Editing { target: None, .. } => Some("Add Card"),
            Dialog::Editing {
                target: Some(_), ..
            } => Some("Update Card"),
        }
    }

    pub fn open_add(&mut self) {
        self.close();
        debug!("dialog opened for a new card");
        self.dialog = Dialog::Editing {
            target: None,
            form: CardForm::empty(),
        };
    }

    pub fn open_edit(&mut self, id: CardId) -> Result<()> {
        let form = CardForm::for_card(self.repo.get(id)?);
        self.close();
        debug!(id, "dialog opened for editing");
        self.dialog = Dialog::Editing {
            target: Some(id),
            form,
        };
        Ok(())
    }

    pub fn form(&self) -> Result<&CardForm> {
        match &self.dialog {
            Dialog::Editing { form, .. } => Ok(form),
            Dialog::Idle => Err(CardboxError::NoDialog),
        }
    }

    pub fn form_mut(&mut self) -> Result<&mut CardForm> {
        match &mut self.dialog {
            Dialog::Editing { form, .. } => Ok(form),
            Dialog::Idle => Err(CardboxError::NoDialog),
        }
    }

    pub fn select_file(&mut self, blob: &ImageBlob) -> Result<()> {
        let (form, host) = self.form_and_host()?;
        form.select_file(blob, host)
    }

    pub fn clear_file(&mut self) -> Result<()> {
        let (form, host) = self.form_and_host()?;
        form.clear_file(host);
        Ok(())
    }

    pub fn set_image_url(&mut self, url: impl Into<String>) -> Result<()> {
        let (form, host) = self.form_and_host()?;
        form.set_image_url(url, host);
        Ok(())
    }

    pub fn clear_image(&mut self) -> Result<()> {
        let (form, host) = self.form_and_host()?;
        form.clear_image(host);
        Ok(())
    }

    fn form_and_host(&mut self) -> Result<(&mut CardForm, &mut H)> {
        match &mut self.dialog {
            Dialog::Editing { form, .. } => Ok((form, &mut self.host)),
            Dialog::Idle => Err(CardboxError::NoDialog),
        }
    }

    /// Validates the form and applies it: `add` in add mode, `update` in edit mode.
    pub fn submit(&mut self) -> Result<CmdResult> {
        let (target, draft) = match &self.dialog {
            Dialog::Idle => return Err(CardboxError::NoDialog),
            Dialog::Editing { target, form } => (*target, form.submit()?),
        };

        let mut result = CmdResult::default();
        match target {
            None => {
                let card = self.repo.add(draft)?;
                if let Dialog::Editing { form, .. } = &mut self.dialog {
                    form.reset(&mut self.host);
                }
                self.close();
                result.add_message(CmdMessage::success(format!(
                    "Card added ({}): {}",
                    card.id, card.title
                )));
                result.affected_cards.push(card);
            }
            Some(id) => match self.repo.update(id, draft) {
                Ok(card) => {
                    self.close();
                    result.add_message(CmdMessage::success(format!(
                        "Card updated ({}): {}",
                        card.id, card.title
                    )));
                    result.affected_cards.push(card);
                }
                Err(e @ CardboxError::CardNotFound(_)) => {
                    self.close();
                    return Err(e);
                }
                Err(e) => return Err(e),
            },
        }
        Ok(result)
    }

    /// Closes the dialog, discarding whatever was typed.
    pub fn cancel(&mut self) {
        self.close();
    }

    fn close(&mut self) {
        if let Dialog::Editing { mut form, target } =
            std::mem::replace(&mut self.dialog, Dialog::Idle)
        {
            form.release(&mut self.host);
            debug!(?target, "dialog closed");
        }
    }

    /// Removes a card after the user confirms. Only allowed while no dialog is open.
    pub fn delete<C: Confirm + ?Sized>(
        &mut self,
        id: CardId,
        confirm: &mut C,
    ) -> Result<CmdResult> {
        if self.is_editing() {
            return Err(CardboxError::DialogOpen);
        }

        let mut result = CmdResult::default();
        let card = match self.repo.get(id) {
            Ok(card) => card.clone(),
            Err(_) => {
                result.add_message(CmdMessage::warning(format!("Card not found: {}", id)));
                return Ok(result);
            }
        };

        if !confirm.confirm(DELETE_PROMPT) {
            debug!(id, "delete declined");
            result.add_message(CmdMessage::info("Delete cancelled."));
            return Ok(result);
        }

        if self.repo.remove(id)? {
            result.add_message(CmdMessage::success(format!(
                "Card deleted ({}): {}",
                card.id, card.title
            )));
            result.affected_cards.push(card);
        }
        Ok(result)
    }

    pub fn card_view(&self, card: &Card) -> CardView {
        let (image, image_is_placeholder) = match &card.image {
            None => (None, false),
            Some(image) if self.host.can_display(image) => (Some(image.clone()), false),
            Some(_) => (Some(PLACEHOLDER_IMAGE.to_string()), true),
        };
        CardView {
            id: card.id,
            title: card.title.clone(),
            description: card.description.clone(),
            category: card.category.to_string(),
            tone: category_tone(&card.category),
            image,
            image_is_placeholder,
        }
    }

    pub fn list_view(&self) -> ListView {
        let cards: Vec<CardView> = self
            .repo
            .list()
            .iter()
            .map(|card| self.card_view(card))
            .collect();
        ListView {
            heading: format!("My Cards ({})", cards.len()),
            empty_message: cards.is_empty().then(|| EMPTY_MESSAGE.to_string()),
            cards,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blob::ObjectUrlHost;
    use crate::error::FieldError;
    use crate::persist::CardPersistence;
    use crate::store::memory::MemSlots;

    type TestCoordinator = Coordinator<MemSlots, ObjectUrlHost>;

    fn coordinator(initial: &str) -> TestCoordinator {
        let repo = CardRepository::open(CardPersistence::new(MemSlots::with_value(
            "cards", initial,
        )));
        Coordinator::new(repo, ObjectUrlHost::new())
    }

    fn writes(c: &TestCoordinator) -> usize {
        c.repository().persistence().store().write_count()
    }

    fn yes(_: &str) -> bool {
        true
    }

    fn no(_: &str) -> bool {
        false
    }

    fn add(c: &mut TestCoordinator, title: &str, category: &str) -> Card {
        c.open_add();
        let form = c.form_mut().unwrap();
        form.set_title(title);
        form.set_category(category);
        c.submit().unwrap().affected_cards.remove(0)
    }

    #[test]
    fn add_flow_returns_to_idle() {
        let mut c = coordinator("[]");
        c.open_add();
        assert_eq!(c.dialog_title(), Some("Add New Card"));
        assert_eq!(c.submit_label(), Some("Add Card"));

        let form = c.form_mut().unwrap();
        form.set_title("Buy milk");
        form.set_category("Shopping");
        let result = c.submit().unwrap();

        assert!(!c.is_editing());
        assert_eq!(result.affected_cards.len(), 1);
        assert_eq!(result.affected_cards[0].id, 1);
        assert_eq!(result.messages[0].level, MessageLevel::Success);
        assert_eq!(c.repository().list(), result.affected_cards.as_slice());
    }

    #[test]
    fn invalid_submit_keeps_dialog_open_and_writes_nothing() {
        let mut c = coordinator("[]");
        c.open_add();
        c.form_mut().unwrap().set_category("Work");

        let err = c.submit().unwrap_err();
        assert!(matches!(
            err,
            CardboxError::ValidationFailed(FieldError::MissingTitle)
        ));
        assert!(c.is_editing());
        assert!(c.repository().is_empty());
        assert_eq!(writes(&c), 0);

        // Fix the field and submit again from the same dialog.
        c.form_mut().unwrap().set_title("Now valid");
        c.submit().unwrap();
        assert_eq!(c.repository().len(), 1);
    }

    #[test]
    fn edit_flow_updates_bound_card() {
        let mut c = coordinator("[]");
        add(&mut c, "one", "Work");
        add(&mut c, "two", "Ideas");

        c.open_edit(1).unwrap();
        assert_eq!(c.editing_target(), Some(1));
        assert_eq!(c.dialog_title(), Some("Edit Card"));
        assert_eq!(c.submit_label(), Some("Update Card"));
        assert_eq!(c.form().unwrap().title, "one");

        c.form_mut().unwrap().set_title("ONE");
        c.submit().unwrap();

        assert!(!c.is_editing());
        let titles: Vec<_> = c.repository().list().iter().map(|x| &x.title).collect();
        assert_eq!(titles, vec!["ONE", "two"]);
    }

    #[test]
    fn open_edit_unknown_id_keeps_state() {
        let mut c = coordinator("[]");
        let err = c.open_edit(3).unwrap_err();
        assert!(matches!(err, CardboxError::CardNotFound(3)));
        assert!(!c.is_editing());
    }

    #[test]
    fn cancel_discards_and_releases() {
        let mut c = coordinator("[]");
        c.open_add();
        c.form_mut().unwrap().set_title("draft");
        c.select_file(&ImageBlob::new("a.png", vec![1])).unwrap();
        assert_eq!(c.host().live_count(), 1);

        c.cancel();
        assert!(!c.is_editing());
        assert_eq!(c.host().live_count(), 0);
        assert!(c.repository().is_empty());
        assert_eq!(writes(&c), 0);
    }

    #[test]
    fn reopening_releases_previous_form() {
        let mut c = coordinator("[]");
        add(&mut c, "one", "Work");
        c.open_add();
        c.select_file(&ImageBlob::new("a.png", vec![1])).unwrap();
        c.open_edit(1).unwrap();
        assert_eq!(c.host().live_count(), 0);
        assert_eq!(c.editing_target(), Some(1));
    }

    #[test]
    fn submit_with_upload_persists_reference_and_closes() {
        let mut c = coordinator("[]");
        c.open_add();
        let form = c.form_mut().unwrap();
        form.set_title("pic");
        form.set_category("Ideas");
        c.set_image_url("https://example.com/ignored.png").unwrap();
        c.select_file(&ImageBlob::new("a.png", vec![1])).unwrap();

        let card = c.submit().unwrap().affected_cards.remove(0);
        assert!(card.image.as_deref().unwrap().starts_with("blob:"));
        assert_eq!(c.host().live_count(), 0);
    }

    #[test]
    fn submit_without_dialog() {
        let mut c = coordinator("[]");
        assert!(matches!(c.submit(), Err(CardboxError::NoDialog)));
        assert!(matches!(c.form_mut(), Err(CardboxError::NoDialog)));
        assert!(matches!(c.clear_file(), Err(CardboxError::NoDialog)));
    }

    #[test]
    fn delete_confirmed() {
        let mut c = coordinator("[]");
        add(&mut c, "one", "Work");
        add(&mut c, "two", "Work");

        let mut asked = Vec::new();
        let mut gate = |prompt: &str| {
            asked.push(prompt.to_string());
            true
        };
        let result = c.delete(1, &mut gate).unwrap();

        assert_eq!(asked, vec![DELETE_PROMPT.to_string()]);
        assert_eq!(result.affected_cards[0].title, "one");
        assert_eq!(c.repository().list().len(), 1);
        assert_eq!(c.repository().list()[0].id, 2);
    }

    #[test]
    fn delete_declined_is_noop() {
        let mut c = coordinator("[]");
        add(&mut c, "one", "Work");
        let before = writes(&c);

        let result = c.delete(1, &mut no).unwrap();
        assert!(result.affected_cards.is_empty());
        assert_eq!(c.repository().len(), 1);
        assert_eq!(writes(&c), before);
    }

    #[test]
    fn delete_unknown_does_not_prompt() {
        let mut c = coordinator("[]");
        let mut prompted = false;
        let mut gate = |_: &str| {
            prompted = true;
            true
        };
        let result = c.delete(5, &mut gate).unwrap();
        assert!(!prompted);
        assert_eq!(result.messages[0].level, MessageLevel::Warning);
        assert_eq!(writes(&c), 0);
    }

    #[test]
    fn delete_refused_while_editing() {
        let mut c = coordinator("[]");
        add(&mut c, "one", "Work");
        c.open_edit(1).unwrap();
        assert!(matches!(
            c.delete(1, &mut yes),
            Err(CardboxError::DialogOpen)
        ));
        assert_eq!(c.repository().len(), 1);
    }

    #[test]
    fn update_of_vanished_card_closes_dialog() {
        let mut c = coordinator("[]");
        add(&mut c, "one", "Work");
        c.open_edit(1).unwrap();
        // Simulate the card disappearing under the open dialog.
        c.repo.remove(1).unwrap();
        let before = writes(&c);

        assert!(matches!(c.submit(), Err(CardboxError::CardNotFound(1))));
        assert!(!c.is_editing());
        assert_eq!(writes(&c), before);
    }

    #[test]
    fn list_view_heading_and_badges() {
        let c = coordinator(
            r#"[{"id":1,"title":"a","description":"","category":"Work"},
                {"id":2,"title":"b","description":"","category":"Errands",
                 "image":"blob:cardbox/gone"}]"#,
        );
        let view = c.list_view();
        assert_eq!(view.heading, "My Cards (2)");
        assert_eq!(view.empty_message, None);
        assert_eq!(view.cards[0].tone, BadgeTone::Blue);
        assert_eq!(view.cards[0].image, None);
        assert_eq!(view.cards[1].tone, BadgeTone::Gray);
        assert_eq!(view.cards[1].image.as_deref(), Some(PLACEHOLDER_IMAGE));
        assert!(view.cards[1].image_is_placeholder);
    }

    #[test]
    fn list_view_empty() {
        let c = coordinator("[]");
        let view = c.list_view();
        assert_eq!(view.heading, "My Cards (0)");
        assert_eq!(view.empty_message.as_deref(), Some(EMPTY_MESSAGE));
    }

    #[test]
    fn category_tones_cover_known_set() {
        let tones: Vec<_> = Category::KNOWN.iter().map(category_tone).collect();
        assert_eq!(
            tones,
            vec![
                BadgeTone::Blue,
                BadgeTone::Green,
                BadgeTone::Purple,
                BadgeTone::Yellow
            ]
        );
    }

    #[test]
    fn seed_card_shown_when_slot_is_garbage() {
        let c = coordinator("garbage");
        let view = c.list_view();
        assert_eq!(view.cards.len(), 1);
        assert_eq!(view.cards[0].title, "Sample Card");
        assert!(!view.cards[0].image_is_placeholder);
    }
}
