//! Exchange proposal wizard state machine.
//!
//! Four linear steps with back-navigation. Every transition checks the
//! current step and its selection guard; a failed check leaves the state
//! untouched. The state performs no I/O: callers fetch candidates and
//! libraries and hand them in.

use std::fmt;

use serde::Serialize;

use crate::book::{Book, UserBook};
use crate::error::{DomainError, DomainResult};
use crate::exchange::CreateExchangeRequest;
use crate::user::UserPreview;

/// A step of the wizard.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum WizardStep {
    /// Search the catalog and pick wanted books.
    ChooseWanted,
    /// Pick users owning all wanted books.
    ChooseCounterparties,
    /// Pick own exchangeable books to offer.
    ChooseOffered,
    /// Review and submit.
    Confirm,
}

impl WizardStep {
    /// One-based step number.
    #[must_use]
    pub const fn number(self) -> u8 {
        match self {
            Self::ChooseWanted => 1,
            Self::ChooseCounterparties => 2,
            Self::ChooseOffered => 3,
            Self::Confirm => 4,
        }
    }

    /// Step heading.
    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::ChooseWanted => "Find the books you want",
            Self::ChooseCounterparties => "Users who have these books",
            Self::ChooseOffered => "Books you offer",
            Self::Confirm => "Confirm the exchange",
        }
    }
}

impl fmt::Display for WizardStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Step {}/4: {}", self.number(), self.title())
    }
}

/// A catalog book the user wants to receive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WantedBook {
    /// Catalog id
    pub id: String,
    /// Title
    pub title: String,
    /// Author
    pub author: String,
}

impl From<&Book> for WantedBook {
    fn from(book: &Book) -> Self {
        Self {
            id: book.id.clone(),
            title: book.title_or_default().to_string(),
            author: book.author_or_default().to_string(),
        }
    }
}

/// One of the user's own library entries offered in return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OfferedBook {
    /// Library entry id
    pub entry_id: String,
    /// Catalog id sent to the backend
    pub book_id: String,
    /// Title
    pub title: String,
    /// Author
    pub author: String,
}

impl OfferedBook {
    /// Builds the selection from a library entry.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidIdentifier`] when the entry carries no
    /// catalog id.
    pub fn from_entry(entry: &UserBook) -> DomainResult<Self> {
        let book_id = entry
            .catalog_id()
            .ok_or_else(|| DomainError::InvalidIdentifier(format!("library entry {}", entry.id)))?;
        Ok(Self {
            entry_id: entry.id.clone(),
            book_id: book_id.to_string(),
            title: entry.book.title_or_default().to_string(),
            author: entry.book.author_or_default().to_string(),
        })
    }
}

/// Why a counterparty got no proposal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProposalFailure {
    /// The counterparty is the session user.
    SelfProposal,
    /// The counterparty owns none of the wanted books.
    NoMatchingBooks,
    /// The create call failed.
    Request(String),
}

impl fmt::Display for ProposalFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SelfProposal => f.write_str("cannot create exchange with yourself"),
            Self::NoMatchingBooks => f.write_str("no matching books"),
            Self::Request(message) => f.write_str(message),
        }
    }
}

/// A proposal ready to send to one counterparty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposalPlan {
    /// The create-exchange payload
    pub request: CreateExchangeRequest,
    /// Wanted catalog ids the counterparty does not own
    pub unmatched: Vec<String>,
}

/// In-memory selections of one wizard run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ExchangeWizardState {
    step: WizardStep,
    wanted: Vec<WantedBook>,
    counterparties: Vec<UserPreview>,
    offered: Vec<OfferedBook>,
    search_results: Vec<Book>,
    candidates: Vec<UserPreview>,
    own_books: Vec<UserBook>,
}

impl Default for ExchangeWizardState {
    fn default() -> Self {
        Self::new()
    }
}

fn toggle_by<T>(items: &mut Vec<T>, item: T, same: impl Fn(&T, &T) -> bool) -> bool {
    if let Some(index) = items.iter().position(|existing| same(existing, &item)) {
        items.remove(index);
        false
    } else {
        items.push(item);
        true
    }
}

impl ExchangeWizardState {
    /// Starts a fresh run at step 1.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            step: WizardStep::ChooseWanted,
            wanted: Vec::new(),
            counterparties: Vec::new(),
            offered: Vec::new(),
            search_results: Vec::new(),
            candidates: Vec::new(),
            own_books: Vec::new(),
        }
    }

    /// Current step.
    #[must_use]
    pub const fn step(&self) -> WizardStep {
        self.step
    }

    /// Selected wanted books, in selection order.
    #[must_use]
    pub fn wanted(&self) -> &[WantedBook] {
        &self.wanted
    }

    /// Selected counterparties, in selection order.
    #[must_use]
    pub fn counterparties(&self) -> &[UserPreview] {
        &self.counterparties
    }

    /// Selected offered books, in selection order.
    #[must_use]
    pub fn offered(&self) -> &[OfferedBook] {
        &self.offered
    }

    /// Last catalog search results.
    #[must_use]
    pub fn search_results(&self) -> &[Book] {
        &self.search_results
    }

    /// Counterparty candidates shown in step 2.
    #[must_use]
    pub fn candidates(&self) -> &[UserPreview] {
        &self.candidates
    }

    /// Own exchangeable books shown in step 3.
    #[must_use]
    pub fn own_books(&self) -> &[UserBook] {
        &self.own_books
    }

    /// Catalog ids of the wanted books.
    #[must_use]
    pub fn wanted_ids(&self) -> Vec<String> {
        self.wanted.iter().map(|b| b.id.clone()).collect()
    }

    /// Returns true if the catalog book is selected.
    #[must_use]
    pub fn is_wanted(&self, book_id: &str) -> bool {
        self.wanted.iter().any(|b| b.id == book_id)
    }

    /// Returns true if the user is selected.
    #[must_use]
    pub fn is_counterparty(&self, user_id: &str) -> bool {
        self.counterparties.iter().any(|u| u.id == user_id)
    }

    /// Returns true if the library entry is selected.
    #[must_use]
    pub fn is_offered(&self, entry_id: &str) -> bool {
        self.offered.iter().any(|b| b.entry_id == entry_id)
    }

    /// Fails unless the wizard is at `expected`.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::WrongStep`].
    pub fn ensure_step(&self, expected: WizardStep) -> DomainResult<()> {
        if self.step == expected {
            Ok(())
        } else {
            Err(DomainError::WrongStep {
                expected,
                actual: self.step,
            })
        }
    }

    /// Fails when the current step's selection is empty.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptySelection`].
    pub fn require_selection(&self) -> DomainResult<()> {
        let empty = match self.step {
            WizardStep::ChooseWanted => self.wanted.is_empty(),
            WizardStep::ChooseCounterparties => self.counterparties.is_empty(),
            WizardStep::ChooseOffered => self.offered.is_empty(),
            WizardStep::Confirm => {
                self.wanted.is_empty() || self.counterparties.is_empty() || self.offered.is_empty()
            }
        };
        if empty {
            Err(DomainError::EmptySelection { step: self.step })
        } else {
            Ok(())
        }
    }

    /// Stores catalog search results for step 1.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::WrongStep`] outside step 1.
    pub fn set_search_results(&mut self, books: Vec<Book>) -> DomainResult<()> {
        self.ensure_step(WizardStep::ChooseWanted)?;
        self.search_results = books;
        Ok(())
    }

    /// Adds or removes a wanted book. Returns true if it is now selected.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::WrongStep`] outside step 1.
    pub fn toggle_wanted(&mut self, book: WantedBook) -> DomainResult<bool> {
        self.ensure_step(WizardStep::ChooseWanted)?;
        Ok(toggle_by(&mut self.wanted, book, |a, b| a.id == b.id))
    }

    /// Adds or removes a counterparty. Returns true if it is now selected.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::WrongStep`] outside step 2.
    pub fn toggle_counterparty(&mut self, user: UserPreview) -> DomainResult<bool> {
        self.ensure_step(WizardStep::ChooseCounterparties)?;
        Ok(toggle_by(&mut self.counterparties, user, |a, b| a.id == b.id))
    }

    /// Adds or removes an offered book. Returns true if it is now selected.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::WrongStep`] outside step 3.
    pub fn toggle_offered(&mut self, book: OfferedBook) -> DomainResult<bool> {
        self.ensure_step(WizardStep::ChooseOffered)?;
        Ok(toggle_by(&mut self.offered, book, |a, b| a.entry_id == b.entry_id))
    }

    /// Moves to step 2 with freshly queried candidates.
    ///
    /// Allowed forward from step 1 (guarded) and back from step 3. The
    /// session user is removed from the candidates, and selected
    /// counterparties that are no longer candidates are deselected.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::WrongStep`] from any other step, or
    /// [`DomainError::EmptySelection`] when no wanted book is selected.
    pub fn enter_counterparties(
        &mut self,
        candidates: Vec<UserPreview>,
        self_id: &str,
    ) -> DomainResult<()> {
        match self.step {
            WizardStep::ChooseWanted => self.require_selection()?,
            WizardStep::ChooseOffered => {}
            actual => {
                return Err(DomainError::WrongStep {
                    expected: WizardStep::ChooseWanted,
                    actual,
                });
            }
        }
        self.candidates = candidates.into_iter().filter(|u| u.id != self_id).collect();
        let candidates = &self.candidates;
        self.counterparties
            .retain(|selected| candidates.iter().any(|c| c.id == selected.id));
        self.step = WizardStep::ChooseCounterparties;
        Ok(())
    }

    /// Moves to step 3 with the user's exchangeable books.
    ///
    /// Allowed forward from step 2 (guarded) and back from step 4. Entries
    /// not flagged for exchange are dropped.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::WrongStep`] from any other step,
    /// [`DomainError::EmptySelection`] when no counterparty is selected, or
    /// [`DomainError::NothingToOffer`] when no exchangeable book remains.
    pub fn enter_offered(&mut self, own_books: Vec<UserBook>) -> DomainResult<()> {
        match self.step {
            WizardStep::ChooseCounterparties => self.require_selection()?,
            WizardStep::Confirm => {}
            actual => {
                return Err(DomainError::WrongStep {
                    expected: WizardStep::ChooseCounterparties,
                    actual,
                });
            }
        }
        let own_books: Vec<UserBook> = own_books
            .into_iter()
            .filter(|b| b.wants_to_exchange)
            .collect();
        if own_books.is_empty() {
            return Err(DomainError::NothingToOffer);
        }
        self.own_books = own_books;
        self.step = WizardStep::ChooseOffered;
        Ok(())
    }

    /// Moves to step 4.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::WrongStep`] outside step 3, or
    /// [`DomainError::EmptySelection`] when no offered book is selected.
    pub fn enter_confirm(&mut self) -> DomainResult<()> {
        self.ensure_step(WizardStep::ChooseOffered)?;
        self.require_selection()?;
        self.step = WizardStep::Confirm;
        Ok(())
    }

    /// Returns from step 2 to step 1, keeping all selections.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::WrongStep`] outside step 2.
    pub fn back_to_wanted(&mut self) -> DomainResult<()> {
        self.ensure_step(WizardStep::ChooseCounterparties)?;
        self.step = WizardStep::ChooseWanted;
        Ok(())
    }

    /// Builds the create-exchange payload for one counterparty.
    ///
    /// Each wanted catalog id is matched against the counterparty's library;
    /// matched entries contribute their catalog id and misses are reported
    /// in [`ProposalPlan::unmatched`].
    ///
    /// # Errors
    ///
    /// Returns [`ProposalFailure::SelfProposal`] when the counterparty is the
    /// requester, or [`ProposalFailure::NoMatchingBooks`] when nothing matches.
    pub fn plan_proposal(
        &self,
        counterparty: &UserPreview,
        requester_id: &str,
        library: &[UserBook],
    ) -> Result<ProposalPlan, ProposalFailure> {
        if counterparty.id == requester_id {
            return Err(ProposalFailure::SelfProposal);
        }

        let mut owner_book_ids = Vec::new();
        let mut unmatched = Vec::new();
        for wanted in &self.wanted {
            match library
                .iter()
                .filter_map(UserBook::catalog_id)
                .find(|id| *id == wanted.id)
            {
                Some(id) => owner_book_ids.push(id.to_string()),
                None => unmatched.push(wanted.id.clone()),
            }
        }
        if owner_book_ids.is_empty() {
            return Err(ProposalFailure::NoMatchingBooks);
        }

        Ok(ProposalPlan {
            request: CreateExchangeRequest {
                owner_id: counterparty.id.clone(),
                requester_id: requester_id.to_string(),
                owner_book_ids,
                requester_book_ids: self.offered.iter().map(|b| b.book_id.clone()).collect(),
            },
            unmatched,
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn wanted(id: &str) -> WantedBook {
        WantedBook {
            id: id.into(),
            title: format!("Title {id}"),
            author: "Author".into(),
        }
    }

    fn user(id: &str) -> UserPreview {
        UserPreview {
            id: id.into(),
            ..UserPreview::default()
        }
    }

    fn offered(entry: &str, book: &str) -> OfferedBook {
        OfferedBook {
            entry_id: entry.into(),
            book_id: book.into(),
            title: "Mine".into(),
            author: "Me".into(),
        }
    }

    fn library(value: serde_json::Value) -> Vec<UserBook> {
        serde_json::from_value(value).unwrap()
    }

    fn at_confirm() -> ExchangeWizardState {
        let mut state = ExchangeWizardState::new();
        state.toggle_wanted(wanted("b1")).unwrap();
        state.toggle_wanted(wanted("b2")).unwrap();
        state
            .enter_counterparties(vec![user("u2")], "u1")
            .unwrap();
        state.toggle_counterparty(user("u2")).unwrap();
        state
            .enter_offered(library(json!([
                {"id": "ob1", "bookId": "bk1", "wantsToExchange": true}
            ])))
            .unwrap();
        state.toggle_offered(offered("ob1", "bk1")).unwrap();
        state.enter_confirm().unwrap();
        state
    }

    #[test]
    fn test_toggle_twice_restores_selection() {
        let mut state = ExchangeWizardState::new();
        state.toggle_wanted(wanted("b1")).unwrap();
        let before = state.wanted().to_vec();
        assert!(state.toggle_wanted(wanted("b2")).unwrap());
        assert!(!state.toggle_wanted(wanted("b2")).unwrap());
        assert_eq!(state.wanted(), before.as_slice());
    }

    #[test]
    fn test_empty_selection_blocks_every_step() {
        let mut state = ExchangeWizardState::new();
        assert_eq!(
            state.enter_counterparties(vec![user("u2")], "u1"),
            Err(DomainError::EmptySelection {
                step: WizardStep::ChooseWanted
            })
        );
        assert_eq!(state.step(), WizardStep::ChooseWanted);

        state.toggle_wanted(wanted("b1")).unwrap();
        state.enter_counterparties(vec![user("u2")], "u1").unwrap();
        assert!(matches!(
            state.enter_offered(Vec::new()),
            Err(DomainError::EmptySelection { .. })
        ));
        assert_eq!(state.step(), WizardStep::ChooseCounterparties);
    }

    #[test]
    fn test_self_is_filtered_from_candidates() {
        let mut state = ExchangeWizardState::new();
        state.toggle_wanted(wanted("b1")).unwrap();
        state
            .enter_counterparties(vec![user("u1"), user("u2")], "u1")
            .unwrap();
        let ids: Vec<&str> = state.candidates().iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, vec!["u2"]);
    }

    #[test]
    fn test_nothing_to_offer() {
        let mut state = ExchangeWizardState::new();
        state.toggle_wanted(wanted("b1")).unwrap();
        state.enter_counterparties(vec![user("u2")], "u1").unwrap();
        state.toggle_counterparty(user("u2")).unwrap();
        let only_private = library(json!([{"id": 1, "book": {"id": "x"}}]));
        assert_eq!(state.enter_offered(only_private), Err(DomainError::NothingToOffer));
        assert_eq!(state.step(), WizardStep::ChooseCounterparties);
    }

    #[test]
    fn test_back_navigation_keeps_selections() {
        let mut state = at_confirm();
        state
            .enter_offered(library(json!([
                {"id": "ob1", "bookId": "bk1", "wantsToExchange": true}
            ])))
            .unwrap();
        assert_eq!(state.step(), WizardStep::ChooseOffered);
        state.enter_counterparties(vec![user("u2")], "u1").unwrap();
        state.back_to_wanted().unwrap();
        assert_eq!(state.step(), WizardStep::ChooseWanted);
        assert_eq!(state.wanted().len(), 2);
        assert!(state.is_counterparty("u2"));
        assert!(state.is_offered("ob1"));
    }

    #[test]
    fn test_requery_drops_counterparties_no_longer_offered() {
        let mut state = ExchangeWizardState::new();
        state.toggle_wanted(wanted("b1")).unwrap();
        state
            .enter_counterparties(vec![user("u2"), user("u3")], "u1")
            .unwrap();
        state.toggle_counterparty(user("u2")).unwrap();
        state.toggle_counterparty(user("u3")).unwrap();
        state.back_to_wanted().unwrap();

        state.toggle_wanted(wanted("b7")).unwrap();
        state.enter_counterparties(vec![user("u3")], "u1").unwrap();

        let ids: Vec<&str> = state.counterparties().iter().map(|u| u.id.as_str()).collect();
        assert_eq!(ids, vec!["u3"]);
        assert!(!state.is_counterparty("u2"));
    }

    #[test]
    fn test_toggle_outside_its_step_is_rejected() {
        let mut state = ExchangeWizardState::new();
        assert_eq!(
            state.toggle_counterparty(user("u2")),
            Err(DomainError::WrongStep {
                expected: WizardStep::ChooseCounterparties,
                actual: WizardStep::ChooseWanted
            })
        );
    }

    #[test]
    fn test_plan_maps_wanted_books_through_owner_library() {
        let state = at_confirm();
        let owner_library = library(json!([
            {"id": 10, "book": {"id": "b1"}},
            {"id": 11, "book": {"id": "zz"}}
        ]));
        let plan = state.plan_proposal(&user("u2"), "u1", &owner_library).unwrap();
        assert_eq!(
            plan.request,
            CreateExchangeRequest {
                owner_id: "u2".into(),
                requester_id: "u1".into(),
                owner_book_ids: vec!["b1".into()],
                requester_book_ids: vec!["bk1".into()],
            }
        );
        assert_eq!(plan.unmatched, vec!["b2".to_string()]);
    }

    #[test]
    fn test_plan_failures() {
        let state = at_confirm();
        assert_eq!(
            state.plan_proposal(&user("u1"), "u1", &[]),
            Err(ProposalFailure::SelfProposal)
        );
        assert_eq!(
            state.plan_proposal(&user("u3"), "u1", &library(json!([{"id": 1, "book": {"id": "q"}}]))),
            Err(ProposalFailure::NoMatchingBooks)
        );
        assert_eq!(ProposalFailure::NoMatchingBooks.to_string(), "no matching books");
    }

    #[test]
    fn test_offered_from_entry_needs_catalog_id() {
        let entries = library(json!([{"id": "ob1"}, {"id": "ob2", "book": {"id": "bk2"}}]));
        assert!(OfferedBook::from_entry(&entries[0]).is_err());
        assert_eq!(OfferedBook::from_entry(&entries[1]).unwrap().book_id, "bk2");
    }
}
