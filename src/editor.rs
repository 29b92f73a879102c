// Edit controller - the view -> edit -> save -> resync round-trip
//
// A session tracks one selected product through the phases
// Viewing -> Editing -> Saving -> (Viewing | Editing). The session is
// headless: it owns the draft and the phase transitions, while the TUI
// renders it and the app layer performs the actual network call between
// `request_save` and `save_succeeded`/`save_failed`.
//
// Invariants:
// - at most one draft exists at a time; opening a session for another
//   product discards any unsaved draft (enforced by the app replacing the
//   session wholesale)
// - a failed save never loses the draft; the user retries or cancels
// - local validation runs before any network call
// - a save requested while one is in flight is rejected, not queued

use crate::catalog::{Product, ProductPatch};
use thiserror::Error;

/// Local reasons a save cannot proceed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EditError {
    #[error("title must not be empty")]
    EmptyTitle,
    #[error("price must be a non-negative number")]
    InvalidPrice,
    #[error("a save is already in progress")]
    SaveInFlight,
    #[error("nothing is being edited")]
    NotEditing,
}

/// Which draft field has input focus
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DraftField {
    #[default]
    Title,
    Price,
    Description,
}

impl DraftField {
    pub fn next(self) -> Self {
        match self {
            DraftField::Title => DraftField::Price,
            DraftField::Price => DraftField::Description,
            DraftField::Description => DraftField::Title,
        }
    }

    pub fn prev(self) -> Self {
        match self {
            DraftField::Title => DraftField::Description,
            DraftField::Price => DraftField::Title,
            DraftField::Description => DraftField::Price,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            DraftField::Title => "Title",
            DraftField::Price => "Price",
            DraftField::Description => "Description",
        }
    }
}

/// Transient copy of one product's editable fields.
///
/// Price is kept as entered text while editing and only parsed on save, so
/// intermediate states like "12." don't fight the user.
#[derive(Debug, Clone, PartialEq)]
pub struct Draft {
    pub title: String,
    pub price: String,
    pub description: String,
    /// Immutable category reference carried through to the PUT body
    pub category_id: Option<u64>,
}

impl Draft {
    fn snapshot(product: &Product) -> Self {
        Self {
            title: product.title.clone(),
            price: format!("{}", product.price),
            description: product.description.clone(),
            category_id: product.category.as_ref().and_then(|c| c.id),
        }
    }

    /// Validate the draft and build the wire patch
    fn to_patch(&self) -> Result<ProductPatch, EditError> {
        let title = self.title.trim();
        if title.is_empty() {
            return Err(EditError::EmptyTitle);
        }

        let price: f64 = self
            .price
            .trim()
            .parse()
            .map_err(|_| EditError::InvalidPrice)?;
        if !price.is_finite() || price < 0.0 {
            return Err(EditError::InvalidPrice);
        }

        Ok(ProductPatch {
            title: title.to_string(),
            price,
            description: self.description.clone(),
            category_id: self.category_id,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditPhase {
    Viewing,
    Editing,
    Saving,
}

/// One product's edit session
#[derive(Debug, Clone)]
pub struct EditSession {
    pub product_id: u64,
    pub phase: EditPhase,
    pub draft: Option<Draft>,
    pub focus: DraftField,
    /// Last validation/save error, shown inline in the edit form
    pub error: Option<String>,
}

impl EditSession {
    /// Open the detail view for a product (Viewing phase, no draft)
    pub fn open(product: &Product) -> Self {
        Self {
            product_id: product.id,
            phase: EditPhase::Viewing,
            draft: None,
            focus: DraftField::default(),
            error: None,
        }
    }

    /// Viewing -> Editing: snapshot the current fields into a draft
    pub fn begin_edit(&mut self, product: &Product) {
        if self.phase != EditPhase::Viewing {
            return;
        }
        self.draft = Some(Draft::snapshot(product));
        self.focus = DraftField::default();
        self.error = None;
        self.phase = EditPhase::Editing;
    }

    /// Editing -> Saving, if local validation passes.
    ///
    /// On success returns the patch for the network call. On a validation
    /// failure the session stays in Editing with the error recorded; while a
    /// save is already in flight the request is rejected outright.
    pub fn request_save(&mut self) -> Result<ProductPatch, EditError> {
        match self.phase {
            EditPhase::Saving => return Err(EditError::SaveInFlight),
            EditPhase::Viewing => return Err(EditError::NotEditing),
            EditPhase::Editing => {}
        }

        let draft = self.draft.as_ref().expect("Editing phase implies a draft");
        match draft.to_patch() {
            Ok(patch) => {
                self.error = None;
                self.phase = EditPhase::Saving;
                Ok(patch)
            }
            Err(e) => {
                self.error = Some(e.to_string());
                Err(e)
            }
        }
    }

    /// Saving -> Viewing: the server confirmed, the draft is spent
    pub fn save_succeeded(&mut self) {
        self.draft = None;
        self.error = None;
        self.phase = EditPhase::Viewing;
    }

    /// Saving -> Editing: keep the draft so nothing the user typed is lost
    pub fn save_failed(&mut self, message: String) {
        self.error = Some(message);
        self.phase = EditPhase::Editing;
    }

    /// Editing -> Viewing: discard the draft, no network call
    pub fn cancel_edit(&mut self) {
        if self.phase != EditPhase::Editing {
            return;
        }
        self.draft = None;
        self.error = None;
        self.phase = EditPhase::Viewing;
    }

    pub fn is_saving(&self) -> bool {
        self.phase == EditPhase::Saving
    }

    // ── draft text entry ─────────────────────────────────────────────────

    pub fn focus_next(&mut self) {
        self.focus = self.focus.next();
    }

    pub fn focus_prev(&mut self) {
        self.focus = self.focus.prev();
    }

    pub fn insert_char(&mut self, c: char) {
        if self.phase != EditPhase::Editing {
            return;
        }
        if let Some(draft) = self.draft.as_mut() {
            match self.focus {
                DraftField::Title => draft.title.push(c),
                DraftField::Price => draft.price.push(c),
                DraftField::Description => draft.description.push(c),
            }
        }
    }

    pub fn backspace(&mut self) {
        if self.phase != EditPhase::Editing {
            return;
        }
        if let Some(draft) = self.draft.as_mut() {
            match self.focus {
                DraftField::Title => draft.title.pop(),
                DraftField::Price => draft.price.pop(),
                DraftField::Description => draft.description.pop(),
            };
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Category;

    fn product() -> Product {
        Product {
            id: 7,
            title: "Shoe A".to_string(),
            price: 10.0,
            description: "A shoe".to_string(),
            category: Some(Category {
                id: Some(4),
                name: "Shoes".to_string(),
                image: None,
            }),
            images: Vec::new(),
        }
    }

    fn editing_session() -> EditSession {
        let p = product();
        let mut session = EditSession::open(&p);
        session.begin_edit(&p);
        session
    }

    #[test]
    fn test_open_starts_viewing_without_draft() {
        let session = EditSession::open(&product());
        assert_eq!(session.phase, EditPhase::Viewing);
        assert!(session.draft.is_none());
    }

    #[test]
    fn test_begin_edit_snapshots_fields() {
        let session = editing_session();
        let draft = session.draft.as_ref().unwrap();
        assert_eq!(draft.title, "Shoe A");
        assert_eq!(draft.price, "10");
        assert_eq!(draft.description, "A shoe");
        assert_eq!(draft.category_id, Some(4));
    }

    #[test]
    fn test_empty_title_blocks_save_locally() {
        let mut session = editing_session();
        session.draft.as_mut().unwrap().title = "   ".to_string();

        let err = session.request_save().unwrap_err();
        assert_eq!(err, EditError::EmptyTitle);
        // Still editing, draft intact, error surfaced inline
        assert_eq!(session.phase, EditPhase::Editing);
        assert!(session.draft.is_some());
        assert_eq!(session.error.as_deref(), Some("title must not be empty"));
    }

    #[test]
    fn test_invalid_price_blocks_save_locally() {
        for bad in ["abc", "", "-1", "1.2.3", "NaN"] {
            let mut session = editing_session();
            session.draft.as_mut().unwrap().price = bad.to_string();
            assert_eq!(
                session.request_save().unwrap_err(),
                EditError::InvalidPrice,
                "price {:?} should be rejected",
                bad
            );
            assert_eq!(session.phase, EditPhase::Editing);
        }
    }

    #[test]
    fn test_valid_save_builds_patch_and_enters_saving() {
        let mut session = editing_session();
        {
            let draft = session.draft.as_mut().unwrap();
            draft.title = "  Shoe A2  ".to_string();
            draft.price = "12.5".to_string();
        }

        let patch = session.request_save().unwrap();
        assert_eq!(patch.title, "Shoe A2"); // trimmed
        assert_eq!(patch.price, 12.5);
        assert_eq!(patch.category_id, Some(4));
        assert_eq!(session.phase, EditPhase::Saving);
    }

    #[test]
    fn test_save_without_draft_is_not_editing() {
        let mut session = EditSession::open(&product());
        assert_eq!(session.request_save().unwrap_err(), EditError::NotEditing);
        assert_eq!(session.phase, EditPhase::Viewing);
    }

    #[test]
    fn test_save_while_saving_is_rejected() {
        let mut session = editing_session();
        session.request_save().unwrap();

        let err = session.request_save().unwrap_err();
        assert_eq!(err, EditError::SaveInFlight);
        // Still saving; the in-flight request is untouched
        assert_eq!(session.phase, EditPhase::Saving);
    }

    #[test]
    fn test_failed_save_keeps_draft_for_retry() {
        let mut session = editing_session();
        session.draft.as_mut().unwrap().title = "Edited".to_string();
        session.request_save().unwrap();

        session.save_failed("this product cannot be edited on the server".to_string());
        assert_eq!(session.phase, EditPhase::Editing);
        assert_eq!(session.draft.as_ref().unwrap().title, "Edited");
        assert!(session.error.is_some());

        // Retry works from here
        assert!(session.request_save().is_ok());
    }

    #[test]
    fn test_successful_save_discards_draft() {
        let mut session = editing_session();
        session.request_save().unwrap();
        session.save_succeeded();
        assert_eq!(session.phase, EditPhase::Viewing);
        assert!(session.draft.is_none());
        assert!(session.error.is_none());
    }

    #[test]
    fn test_cancel_discards_draft_without_saving() {
        let mut session = editing_session();
        session.draft.as_mut().unwrap().title = "Edited".to_string();
        session.cancel_edit();
        assert_eq!(session.phase, EditPhase::Viewing);
        assert!(session.draft.is_none());
    }

    #[test]
    fn test_cancel_does_nothing_while_saving() {
        let mut session = editing_session();
        session.request_save().unwrap();
        session.cancel_edit();
        assert_eq!(session.phase, EditPhase::Saving);
        assert!(session.draft.is_some());
    }

    #[test]
    fn test_text_entry_edits_focused_field() {
        let mut session = editing_session();
        session.draft.as_mut().unwrap().title.clear();
        session.insert_char('H');
        session.insert_char('i');
        session.focus_next(); // Price
        session.backspace();
        session.backspace();
        session.insert_char('9');

        let draft = session.draft.as_ref().unwrap();
        assert_eq!(draft.title, "Hi");
        assert_eq!(draft.price, "9");
    }
}
