//! # Modal Controller
//!
//! The dialog that sits over the card list. It is in exactly one of four states:
//!
//! ```text
//!            create                      submit ok / close
//!   Closed ─────────▶ Creating ──────────────────────────▶ Closed
//!     │  view                                         ▲
//!     ├─────────▶ Viewing(id) ── delete (confirmed) ──┤
//!     │  edit          │ edit                         │
//!     └─────────▶ Editing(id) ◀┘ ── submit ok / close ┘
//! ```
//!
//! Any open state closes on the close button, a click outside the dialog, or Escape.
//!
//! The controller holds card ids, never cards. A subject that has been deleted elsewhere
//! simply fails to resolve, and whatever was about to happen becomes a no-op.
//!
//! Exactly one region is visible while open: the read-only view or the form.

use crate::error::Result;
use crate::model::{Card, CardFields};
use crate::record_store::{DeleteOutcome, RecordStore, UpdateOutcome};
use crate::storage::KeyValueStore;
use tracing::debug;

pub const CREATE_HEADING: &str = "Create Card";
pub const EDIT_HEADING: &str = "Edit Card";

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ModalState {
    #[default]
    Closed,
    Viewing(String),
    Creating,
    Editing(String),
}

/// Which part of the dialog is on screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Hidden,
    View,
    Form,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CloseReason {
    CloseButton,
    Cancel,
    OutsideClick,
    Escape,
    Submitted,
    Deleted,
}

/// Read-only content shown while viewing.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewContent {
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Created(Card),
    Updated(Card),
    /// The card being edited vanished; the dialog closed without effect.
    SubjectGone,
    /// The form is not open.
    Ignored,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModalDeleteOutcome {
    Deleted(Card),
    SubjectGone,
    Declined,
    Ignored,
}

#[derive(Debug, Default)]
pub struct ModalController {
    state: ModalState,
    view: ViewContent,
    form: CardFields,
    heading: &'static str,
}

impl ModalController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &ModalState {
        &self.state
    }

    pub fn is_open(&self) -> bool {
        self.state != ModalState::Closed
    }

    pub fn region(&self) -> Region {
        match self.state {
            ModalState::Closed => Region::Hidden,
            ModalState::Viewing(_) => Region::View,
            ModalState::Creating | ModalState::Editing(_) => Region::Form,
        }
    }

    /// The card id the dialog is about, if any.
    pub fn subject(&self) -> Option<&str> {
        match &self.state {
            ModalState::Viewing(id) | ModalState::Editing(id) => Some(id.as_str()),
            _ => None,
        }
    }

    pub fn view(&self) -> &ViewContent {
        &self.view
    }

    pub fn form(&self) -> &CardFields {
        &self.form
    }

    pub fn form_heading(&self) -> &str {
        self.heading
    }

    /// `Closed → Creating` with an empty form.
    pub fn open_create(&mut self) -> bool {
        if self.is_open() {
            return false;
        }
        self.form = CardFields::default();
        self.heading = CREATE_HEADING;
        self.transition(ModalState::Creating);
        true
    }

    /// `Closed → Viewing(id)`. A card that no longer resolves leaves the dialog closed.
    pub fn open_view(&mut self, card: Option<&Card>) -> bool {
        if self.is_open() {
            return false;
        }
        let Some(card) = card else {
            return false;
        };
        self.view = ViewContent {
            title: card.title.clone(),
            description: card.description.clone(),
        };
        self.transition(ModalState::Viewing(card.id.clone()));
        true
    }

    /// `Closed/Viewing → Editing(id)` with the form pre-filled from the card.
    pub fn open_edit(&mut self, card: Option<&Card>) -> bool {
        if !matches!(self.state, ModalState::Closed | ModalState::Viewing(_)) {
            return false;
        }
        let Some(card) = card else {
            return false;
        };
        self.form = CardFields::from_card(card);
        self.heading = EDIT_HEADING;
        self.transition(ModalState::Editing(card.id.clone()));
        true
    }

    /// The in-view edit button: edit whatever is being viewed.
    pub fn edit_subject<S: KeyValueStore>(&mut self, store: &RecordStore<S>) -> bool {
        let ModalState::Viewing(id) = &self.state else {
            return false;
        };
        let card = store.find_by_id(id).cloned();
        self.open_edit(card.as_ref())
    }

    /// Any state → `Closed`. Clears both regions.
    pub fn close(&mut self, reason: CloseReason) {
        if self.is_open() {
            debug!(?reason, "closing modal");
        }
        self.view = ViewContent::default();
        self.form = CardFields::default();
        self.heading = "";
        self.state = ModalState::Closed;
    }

    /// Submits the form.
    ///
    /// Blank title or description is a validation error: nothing is written, the dialog
    /// stays open and keeps what was typed. Otherwise creates or updates, then closes.
    pub fn submit<S: KeyValueStore>(
        &mut self,
        store: &mut RecordStore<S>,
        fields: CardFields,
    ) -> Result<SubmitOutcome> {
        if self.region() != Region::Form {
            return Ok(SubmitOutcome::Ignored);
        }
        self.form = fields;
        let clean = self.form.validated()?;

        let outcome = match &self.state {
            ModalState::Creating => SubmitOutcome::Created(store.create(clean)?),
            ModalState::Editing(id) => match store.update(id, clean)? {
                UpdateOutcome::Updated(card) => SubmitOutcome::Updated(card),
                UpdateOutcome::NotFound => SubmitOutcome::SubjectGone,
            },
            _ => SubmitOutcome::Ignored,
        };
        self.close(CloseReason::Submitted);
        Ok(outcome)
    }

    /// The in-view delete button, after the user answered the confirmation prompt.
    ///
    /// Declining keeps the card on screen. Confirming deletes (if the card still exists)
    /// and closes.
    pub fn delete_subject<S: KeyValueStore>(
        &mut self,
        store: &mut RecordStore<S>,
        confirmed: bool,
    ) -> ModalDeleteOutcome {
        let ModalState::Viewing(id) = &self.state else {
            return ModalDeleteOutcome::Ignored;
        };
        if !confirmed {
            return ModalDeleteOutcome::Declined;
        }
        let outcome = match store.delete(id) {
            DeleteOutcome::Deleted(card) => ModalDeleteOutcome::Deleted(card),
            DeleteOutcome::NotFound => ModalDeleteOutcome::SubjectGone,
        };
        self.close(CloseReason::Deleted);
        outcome
    }

    fn transition(&mut self, next: ModalState) {
        debug!(from = ?self.state, to = ?next, "modal transition");
        self.state = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collab::{PlaceholderImages, SequentialIds};
    use crate::storage::memory::MemoryKv;
    use crate::storage::{CardSlot, DEFAULT_STORAGE_KEY};

    fn seeded_store() -> RecordStore<MemoryKv> {
        let mut store = RecordStore::open(
            CardSlot::new(MemoryKv::new(), DEFAULT_STORAGE_KEY),
            Box::new(SequentialIds::new("c")),
            Box::new(PlaceholderImages::default()),
        );
        store.seed_if_empty();
        store
    }

    fn first(store: &RecordStore<MemoryKv>) -> Card {
        store.cards()[0].clone()
    }

    #[test]
    fn starts_closed() {
        let modal = ModalController::new();
        assert_eq!(modal.state(), &ModalState::Closed);
        assert_eq!(modal.region(), Region::Hidden);
        assert_eq!(modal.subject(), None);
    }

    #[test]
    fn create_clears_form_and_shows_it() {
        let mut modal = ModalController::new();
        assert!(modal.open_create());
        assert_eq!(modal.state(), &ModalState::Creating);
        assert_eq!(modal.region(), Region::Form);
        assert_eq!(modal.form(), &CardFields::default());
        assert_eq!(modal.form_heading(), CREATE_HEADING);
    }

    #[test]
    fn create_then_valid_submit_adds_one_card_and_closes() {
        let mut store = seeded_store();
        let mut modal = ModalController::new();
        modal.open_create();

        let outcome = modal
            .submit(&mut store, CardFields::new("Widget", "A widget", ""))
            .unwrap();

        assert!(matches!(outcome, SubmitOutcome::Created(ref c) if c.title == "Widget"));
        assert_eq!(store.len(), 4);
        assert_eq!(store.cards()[0].title, "Widget");
        assert_eq!(modal.state(), &ModalState::Closed);
    }

    #[test]
    fn invalid_submit_keeps_form_open_with_input() {
        let mut store = seeded_store();
        let mut modal = ModalController::new();
        modal.open_create();

        let err = modal
            .submit(&mut store, CardFields::new("Only title", "  ", ""))
            .unwrap_err();

        assert!(err.is_validation());
        assert_eq!(modal.state(), &ModalState::Creating);
        assert_eq!(modal.form().title, "Only title");
        assert_eq!(store.len(), 3);
        assert_eq!(store.backend().write_count(), 1);
    }

    #[test]
    fn view_loads_content() {
        let store = seeded_store();
        let card = first(&store);
        let mut modal = ModalController::new();

        assert!(modal.open_view(store.find_by_id(&card.id)));
        assert_eq!(modal.state(), &ModalState::Viewing(card.id.clone()));
        assert_eq!(modal.region(), Region::View);
        assert_eq!(modal.view().title, card.title);
        assert_eq!(modal.view().description, card.description);
    }

    #[test]
    fn view_of_missing_card_is_a_no_op() {
        let store = seeded_store();
        let mut modal = ModalController::new();
        assert!(!modal.open_view(store.find_by_id("gone")));
        assert_eq!(modal.state(), &ModalState::Closed);
    }

    #[test]
    fn view_is_ignored_while_open() {
        let store = seeded_store();
        let mut modal = ModalController::new();
        modal.open_create();
        assert!(!modal.open_view(store.cards().first()));
        assert_eq!(modal.state(), &ModalState::Creating);
    }

    #[test]
    fn edit_prefills_form_from_list_or_view() {
        let store = seeded_store();
        let card = first(&store);

        let mut from_list = ModalController::new();
        assert!(from_list.open_edit(Some(&card)));
        assert_eq!(from_list.form(), &CardFields::from_card(&card));
        assert_eq!(from_list.form_heading(), EDIT_HEADING);

        let mut from_view = ModalController::new();
        from_view.open_view(Some(&card));
        assert!(from_view.edit_subject(&store));
        assert_eq!(from_view.state(), &ModalState::Editing(card.id.clone()));
        assert_eq!(from_view.region(), Region::Form);
    }

    #[test]
    fn edit_is_not_reachable_from_creating() {
        let store = seeded_store();
        let mut modal = ModalController::new();
        modal.open_create();
        assert!(!modal.open_edit(store.cards().first()));
        assert_eq!(modal.state(), &ModalState::Creating);
    }

    #[test]
    fn edit_submit_updates_in_place() {
        let mut store = seeded_store();
        let card = store.cards()[1].clone();
        let mut modal = ModalController::new();
        modal.open_edit(Some(&card));

        let outcome = modal
            .submit(&mut store, CardFields::new("New", "Desc", "img.png"))
            .unwrap();

        assert!(matches!(outcome, SubmitOutcome::Updated(_)));
        assert_eq!(store.cards()[1].id, card.id);
        assert_eq!(store.cards()[1].title, "New");
        assert!(!modal.is_open());
    }

    #[test]
    fn edit_submit_for_vanished_card_closes_without_effect() {
        let mut store = seeded_store();
        let card = first(&store);
        let mut modal = ModalController::new();
        modal.open_edit(Some(&card));
        store.delete(&card.id);
        let snapshot = store.cards().to_vec();

        let outcome = modal
            .submit(&mut store, CardFields::new("x", "y", ""))
            .unwrap();

        assert_eq!(outcome, SubmitOutcome::SubjectGone);
        assert_eq!(store.cards(), snapshot.as_slice());
        assert!(!modal.is_open());
    }

    #[test]
    fn submit_is_ignored_when_form_hidden() {
        let mut store = seeded_store();
        let card = first(&store);
        let mut modal = ModalController::new();
        assert_eq!(
            modal
                .submit(&mut store, CardFields::new("a", "b", ""))
                .unwrap(),
            SubmitOutcome::Ignored
        );
        modal.open_view(Some(&card));
        assert_eq!(
            modal
                .submit(&mut store, CardFields::new("a", "b", ""))
                .unwrap(),
            SubmitOutcome::Ignored
        );
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn confirmed_delete_from_view_removes_and_closes() {
        let mut store = seeded_store();
        let card = first(&store);
        let mut modal = ModalController::new();
        modal.open_view(Some(&card));

        let outcome = modal.delete_subject(&mut store, true);
        assert_eq!(outcome, ModalDeleteOutcome::Deleted(card.clone()));
        assert!(store.find_by_id(&card.id).is_none());
        assert!(!modal.is_open());
    }

    #[test]
    fn declined_delete_keeps_viewing() {
        let mut store = seeded_store();
        let card = first(&store);
        let mut modal = ModalController::new();
        modal.open_view(Some(&card));

        assert_eq!(
            modal.delete_subject(&mut store, false),
            ModalDeleteOutcome::Declined
        );
        assert_eq!(modal.state(), &ModalState::Viewing(card.id));
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn delete_of_stale_subject_just_closes() {
        let mut store = seeded_store();
        let card = first(&store);
        let mut modal = ModalController::new();
        modal.open_view(Some(&card));
        store.delete(&card.id);
        let writes = store.backend().write_count();

        assert_eq!(
            modal.delete_subject(&mut store, true),
            ModalDeleteOutcome::SubjectGone
        );
        assert!(!modal.is_open());
        assert_eq!(store.backend().write_count(), writes);
    }

    #[test]
    fn every_close_reason_returns_to_closed() {
        let store = seeded_store();
        for reason in [
            CloseReason::CloseButton,
            CloseReason::Cancel,
            CloseReason::OutsideClick,
            CloseReason::Escape,
        ] {
            let mut modal = ModalController::new();
            modal.open_view(store.cards().first());
            modal.close(reason);
            assert_eq!(modal.state(), &ModalState::Closed);
            assert_eq!(modal.region(), Region::Hidden);
            assert_eq!(modal.view(), &ViewContent::default());
        }
    }
}
