//! # Application Root
//!
//! [`App`] owns everything with state: the record store, the modal controller, the current
//! search query, the theme preference and the collaborators. UI code never touches those
//! directly; it turns each user gesture into an [`Action`] and hands it to
//! [`App::dispatch`].
//!
//! Every dispatch runs to completion (mutation, persistence, re-projection) and returns a
//! [`DispatchResult`] with freshly rendered card elements plus any messages for the user.
//! Validation failures and declined confirmations come back as messages, not errors, and
//! leave the app fully usable.

use crate::collab::{Collaborators, Confirm, PlaceholderImages, DELETE_PROMPT};
use crate::config::CardsConfig;
use crate::error::Result;
use crate::modal::{CloseReason, ModalController, ModalDeleteOutcome, Region, SubmitOutcome};
use crate::model::{Card, CardFields};
use crate::record_store::{DeleteOutcome, RecordStore};
use crate::render::{render, CardElement};
use crate::search;
use crate::storage::{CardSlot, KeyValueStore};
use crate::theme::ThemeMode;
use tracing::{debug, info, warn};

/// Every UI affordance, as a typed event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    CreateClick,
    SearchInput(String),
    CardView(String),
    CardEdit(String),
    CardDelete(String),
    ModalClose,
    FormCancel,
    OutsideClick,
    EscapeKey,
    FormSubmit(CardFields),
    ModalEdit,
    ModalDelete,
    ToggleTheme,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
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

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

#[derive(Debug, Default)]
pub struct DispatchResult {
    /// The re-rendered card list for the current query.
    pub elements: Vec<CardElement>,
    pub messages: Vec<CmdMessage>,
    /// Whether the action had any effect on state.
    pub changed: bool,
}

impl DispatchResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }
}

pub struct App<S: KeyValueStore> {
    store: RecordStore<S>,
    modal: ModalController,
    query: String,
    theme: ThemeMode,
    confirm: Box<dyn Confirm>,
    render_images: PlaceholderImages,
}

impl<S: KeyValueStore> App<S> {
    /// Loads the catalog from `kv`, seeding it when empty (unless disabled in config).
    /// The modal always starts closed and the query empty.
    pub fn open(kv: S, config: &CardsConfig, collab: Collaborators) -> Self {
        let theme = ThemeMode::load(&kv);
        let slot = CardSlot::new(kv, config.storage_key.clone());
        let mut store = RecordStore::open(slot, collab.ids, collab.images);
        if config.seed_examples {
            store.seed_if_empty();
        }
        info!(cards = store.len(), "catalog ready");
        Self {
            store,
            modal: ModalController::new(),
            query: String::new(),
            theme,
            confirm: collab.confirm,
            render_images: PlaceholderImages::new(config.placeholder_base.clone()),
        }
    }

    pub fn store(&self) -> &RecordStore<S> {
        &self.store
    }

    pub fn modal(&self) -> &ModalController {
        &self.modal
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn theme(&self) -> ThemeMode {
        self.theme
    }

    pub fn find(&self, id: &str) -> Option<&Card> {
        self.store.find_by_id(id)
    }

    /// Cards matching the current query, in collection order.
    pub fn visible_cards(&self) -> Vec<&Card> {
        search::filter(self.store.cards(), &self.query)
    }

    /// Renders the current projection.
    pub fn elements(&mut self) -> Vec<CardElement> {
        let visible = search::filter(self.store.cards(), &self.query);
        render(&visible, &mut self.render_images)
    }

    pub fn dispatch(&mut self, action: Action) -> Result<DispatchResult> {
        debug!(?action, "dispatch");
        let mut result = DispatchResult::default();

        let changed = match action {
            Action::CreateClick => self.modal.open_create(),
            Action::SearchInput(text) => {
                let changed = text != self.query;
                self.query = text;
                changed
            }
            Action::CardView(id) => self.modal.open_view(self.store.find_by_id(&id)),
            Action::CardEdit(id) => self.modal.open_edit(self.store.find_by_id(&id)),
            Action::CardDelete(id) => self.delete_from_list(&id, &mut result),
            Action::ModalClose => self.close(CloseReason::CloseButton),
            Action::FormCancel => self.close(CloseReason::Cancel),
            Action::OutsideClick => self.close(CloseReason::OutsideClick),
            Action::EscapeKey => self.close(CloseReason::Escape),
            Action::FormSubmit(fields) => self.submit(fields, &mut result)?,
            Action::ModalEdit => self.modal.edit_subject(&self.store),
            Action::ModalDelete => self.delete_from_modal(&mut result),
            Action::ToggleTheme => {
                self.theme = self.theme.toggled();
                if let Err(e) = self.theme.save(self.store.backend()) {
                    warn!(error = %e, "could not save theme preference");
                    result.add_message(CmdMessage::warning(
                        "Theme changed for this session only; it could not be saved.",
                    ));
                }
                true
            }
        };
        result.changed = changed;

        if result.changed && self.store.is_unsaved() {
            result.add_message(CmdMessage::warning(
                "Changes could not be saved and will be lost when you quit.",
            ));
        }
        result.elements = self.elements();
        Ok(result)
    }

    fn close(&mut self, reason: CloseReason) -> bool {
        let was_open = self.modal.is_open();
        self.modal.close(reason);
        was_open
    }

    fn submit(&mut self, fields: CardFields, result: &mut DispatchResult) -> Result<bool> {
        match self.modal.submit(&mut self.store, fields) {
            Ok(SubmitOutcome::Created(card)) => {
                result.add_message(CmdMessage::success(format!("Card created: {}", card.title)));
                Ok(true)
            }
            Ok(SubmitOutcome::Updated(card)) => {
                result.add_message(CmdMessage::success(format!("Card updated: {}", card.title)));
                Ok(true)
            }
            Ok(SubmitOutcome::SubjectGone) => Ok(true),
            Ok(SubmitOutcome::Ignored) => Ok(false),
            Err(e) if e.is_validation() => {
                result.add_message(CmdMessage::error(e.to_string()));
                Ok(false)
            }
            Err(e) => Err(e),
        }
    }

    fn delete_from_list(&mut self, id: &str, result: &mut DispatchResult) -> bool {
        if !self.confirm.confirm(DELETE_PROMPT) {
            result.add_message(CmdMessage::info("Delete cancelled."));
            return false;
        }
        match self.store.delete(id) {
            DeleteOutcome::Deleted(card) => {
                result.add_message(CmdMessage::success(format!("Card deleted: {}", card.title)));
                true
            }
            DeleteOutcome::NotFound => false,
        }
    }

    fn delete_from_modal(&mut self, result: &mut DispatchResult) -> bool {
        if self.modal.region() != Region::View {
            return false;
        }
        let confirmed = self.confirm.confirm(DELETE_PROMPT);
        match self.modal.delete_subject(&mut self.store, confirmed) {
            ModalDeleteOutcome::Deleted(card) => {
                result.add_message(CmdMessage::success(format!("Card deleted: {}", card.title)));
                true
            }
            ModalDeleteOutcome::SubjectGone => true,
            ModalDeleteOutcome::Declined => {
                result.add_message(CmdMessage::info("Delete cancelled."));
                false
            }
            ModalDeleteOutcome::Ignored => false,
        }
    }
}
