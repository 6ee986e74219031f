//! Exchange proposal wizard.
//!
//! Drives [`ExchangeWizardState`] through its four steps, fetching what each
//! step needs, and submits one proposal per selected counterparty.

use std::sync::Arc;

use booky_domain::{
    CatalogBookView, DomainError, ExchangeWizardState, LibraryFilter, OfferedBook, Panel,
    ProposalFailure, Toast, UserPreview, WantedBook, WizardStep,
};
use tracing::{debug, info, warn};

use crate::context::AppContext;
use crate::controllers::{ExchangesController, GamificationController};
use crate::{ApplicationError, ApplicationResult};

/// Result of proposing to one counterparty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProposalOutcome {
    /// Counterparty id
    pub user_id: String,
    /// Counterparty display name
    pub user_name: String,
    /// Whether the proposal was sent
    pub result: Result<(), ProposalFailure>,
    /// Wanted catalog ids the counterparty does not own
    pub unmatched: Vec<String>,
}

impl ProposalOutcome {
    fn failed(user: &UserPreview, failure: ProposalFailure) -> Self {
        Self {
            user_id: user.id.clone(),
            user_name: user.full_name(),
            result: Err(failure),
            unmatched: Vec::new(),
        }
    }
}

/// Outcomes of a finalize, in selection order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FinalizeReport {
    /// One entry per counterparty
    pub outcomes: Vec<ProposalOutcome>,
}

impl FinalizeReport {
    /// Number of proposals sent.
    #[must_use]
    pub fn succeeded(&self) -> usize {
        self.outcomes.iter().filter(|o| o.result.is_ok()).count()
    }

    /// Number of counterparties that got no proposal.
    #[must_use]
    pub fn failed(&self) -> usize {
        self.outcomes.len() - self.succeeded()
    }
}

/// One run of the wizard. Dropping it discards every selection.
pub struct ExchangeWizard {
    ctx: Arc<AppContext>,
    state: ExchangeWizardState,
}

impl ExchangeWizard {
    /// Starts at step 1 with nothing selected.
    #[must_use]
    pub const fn new(ctx: Arc<AppContext>) -> Self {
        Self {
            ctx,
            state: ExchangeWizardState::new(),
        }
    }

    /// Current selections.
    #[must_use]
    pub const fn state(&self) -> &ExchangeWizardState {
        &self.state
    }

    /// Current step.
    #[must_use]
    pub const fn step(&self) -> WizardStep {
        self.state.step()
    }

    /// Searches the catalog for step 1.
    ///
    /// # Errors
    ///
    /// Returns a validation error for a blank query (no network call), a
    /// domain error outside step 1, otherwise the API error.
    pub async fn search(&mut self, query: &str) -> ApplicationResult<Panel<CatalogBookView>> {
        if query.trim().is_empty() {
            return Err(self.ctx.reject("Enter a title, author or ISBN to search"));
        }
        let result = match self.state.ensure_step(WizardStep::ChooseWanted) {
            Ok(()) => self.ctx.api().search_books(query).await,
            Err(e) => Err(e.into()),
        };
        let books = result.inspect_err(|e| self.ctx.report("Book search failed", e))?;
        self.state.set_search_results(books)?;
        Ok(self.search_panel())
    }

    /// Last search results with their selection marks.
    #[must_use]
    pub fn search_panel(&self) -> Panel<CatalogBookView> {
        Panel::from_items(
            self.state
                .search_results()
                .iter()
                .map(|b| CatalogBookView::new(b, self.state.is_wanted(&b.id)))
                .collect(),
            "No books found",
        )
    }

    /// Selects or deselects a wanted book by catalog id.
    ///
    /// # Errors
    ///
    /// Fails outside step 1, or when the id is neither a search result nor
    /// already selected.
    pub fn toggle_wanted(&mut self, book_id: &str) -> ApplicationResult<bool> {
        let book = self
            .state
            .search_results()
            .iter()
            .find(|b| b.id == book_id)
            .map(WantedBook::from)
            .or_else(|| self.state.wanted().iter().find(|b| b.id == book_id).cloned());
        let book = book.ok_or_else(|| self.ctx.reject(format!("Unknown book {book_id}")))?;
        let toggled = self.state.toggle_wanted(book);
        self.checked(toggled)
    }

    /// Selects or deselects a counterparty by user id.
    ///
    /// # Errors
    ///
    /// Fails outside step 2, or when the id is neither a candidate nor
    /// already selected.
    pub fn toggle_counterparty(&mut self, user_id: &str) -> ApplicationResult<bool> {
        let user = self
            .state
            .candidates()
            .iter()
            .chain(self.state.counterparties())
            .find(|u| u.id == user_id)
            .cloned();
        let user = user.ok_or_else(|| self.ctx.reject(format!("Unknown user {user_id}")))?;
        let toggled = self.state.toggle_counterparty(user);
        self.checked(toggled)
    }

    /// Selects or deselects an own book by library entry id.
    ///
    /// # Errors
    ///
    /// Fails outside step 3, or when the id is not an exchangeable entry.
    pub fn toggle_offered(&mut self, entry_id: &str) -> ApplicationResult<bool> {
        let book = match self.state.own_books().iter().find(|b| b.id == entry_id) {
            Some(entry) => OfferedBook::from_entry(entry),
            None => self
                .state
                .offered()
                .iter()
                .find(|b| b.entry_id == entry_id)
                .cloned()
                .ok_or_else(|| DomainError::InvalidIdentifier(entry_id.to_string())),
        };
        let book = self.checked(book)?;
        let toggled = self.state.toggle_offered(book);
        self.checked(toggled)
    }

    fn checked<T>(&self, result: Result<T, DomainError>) -> ApplicationResult<T> {
        result.map_err(|e| {
            let e = ApplicationError::from(e);
            self.ctx.report("", &e);
            e
        })
    }

    /// Moves to the next step once the current one has a selection.
    ///
    /// The guard is checked before any network call. On failure the step
    /// is unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::EmptySelection`], [`DomainError::NothingToOffer`],
    /// [`DomainError::WrongStep`] at step 4, or the API error.
    pub async fn next(&mut self) -> ApplicationResult<WizardStep> {
        let result = self.advance().await;
        if let Err(e) = &result {
            self.ctx.report("Could not continue", e);
        }
        result
    }

    async fn advance(&mut self) -> ApplicationResult<WizardStep> {
        match self.state.step() {
            WizardStep::ChooseWanted => {
                self.state.require_selection()?;
                self.load_counterparties().await?;
            }
            WizardStep::ChooseCounterparties => {
                self.state.require_selection()?;
                self.load_own_books().await?;
            }
            WizardStep::ChooseOffered => self.state.enter_confirm()?,
            WizardStep::Confirm => {
                return Err(DomainError::WrongStep {
                    expected: WizardStep::ChooseOffered,
                    actual: WizardStep::Confirm,
                }
                .into());
            }
        }
        Ok(self.state.step())
    }

    /// Returns to the previous step, keeping every selection.
    ///
    /// Going back to steps 2 and 3 re-queries their candidates.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::WrongStep`] at step 1, or the API error.
    pub async fn back(&mut self) -> ApplicationResult<WizardStep> {
        let result = match self.state.step() {
            WizardStep::ChooseWanted => Err(DomainError::WrongStep {
                expected: WizardStep::ChooseCounterparties,
                actual: WizardStep::ChooseWanted,
            }
            .into()),
            WizardStep::ChooseCounterparties => {
                self.state.back_to_wanted().map_err(ApplicationError::from)
            }
            WizardStep::ChooseOffered => self.load_counterparties().await,
            WizardStep::Confirm => self.load_own_books().await,
        };
        if let Err(e) = &result {
            self.ctx.report("Could not go back", e);
        }
        result.map(|()| self.state.step())
    }

    async fn load_counterparties(&mut self) -> ApplicationResult<()> {
        let me = self.ctx.require_user().await?;
        let candidates = self
            .ctx
            .api()
            .search_users_by_books(&self.state.wanted_ids())
            .await?;
        self.state.enter_counterparties(candidates, &me.id)?;
        Ok(())
    }

    async fn load_own_books(&mut self) -> ApplicationResult<()> {
        let me = self.ctx.require_user().await?;
        let own = self
            .ctx
            .api()
            .user_library(&me.id, &LibraryFilter::exchangeable())
            .await?;
        self.state.enter_offered(own)?;
        Ok(())
    }

    /// Sends one proposal per counterparty, in selection order.
    ///
    /// Per-counterparty failures are recorded in the report and do not stop
    /// the batch. Afterwards the selections are discarded and the exchange
    /// list and gamification panel reload.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::WrongStep`] before step 4, or
    /// [`ApplicationError::SessionMissing`] when signed out. Both abort
    /// before any network call.
    pub async fn finalize(&mut self) -> ApplicationResult<FinalizeReport> {
        self.checked(self.state.ensure_step(WizardStep::Confirm))?;
        let me = self.ctx.require_user().await?;

        let mut report = FinalizeReport::default();
        for counterparty in self.state.counterparties() {
            let outcome = self.propose(counterparty, &me.id).await;
            match &outcome.result {
                Ok(()) => info!(owner = %outcome.user_id, "exchange proposal sent"),
                Err(failure) => {
                    warn!(owner = %outcome.user_id, reason = %failure, "exchange proposal skipped");
                }
            }
            report.outcomes.push(outcome);
        }

        let (sent, failed) = (report.succeeded(), report.failed());
        if sent > 0 {
            self.ctx
                .notify(Toast::success(format!("{sent} proposal(s) sent")));
        }
        if failed > 0 {
            self.ctx
                .notify(Toast::error(format!("{failed} proposal(s) failed")));
        }

        self.state = ExchangeWizardState::new();
        ExchangesController::new(self.ctx.clone()).load().await;
        if let Err(e) = GamificationController::new(self.ctx.clone())
            .refresh(&me.id)
            .await
        {
            debug!(error = %e, "gamification refresh after change failed");
        }
        Ok(report)
    }

    async fn propose(&self, counterparty: &UserPreview, requester_id: &str) -> ProposalOutcome {
        if counterparty.id == requester_id {
            return ProposalOutcome::failed(counterparty, ProposalFailure::SelfProposal);
        }
        let api = self.ctx.api();
        let library = match api
            .user_library(&counterparty.id, &LibraryFilter::default())
            .await
        {
            Ok(library) => library,
            Err(e) => {
                return ProposalOutcome::failed(counterparty, ProposalFailure::Request(e.to_string()));
            }
        };
        let plan = match self.state.plan_proposal(counterparty, requester_id, &library) {
            Ok(plan) => plan,
            Err(failure) => return ProposalOutcome::failed(counterparty, failure),
        };
        let result = api
            .create_exchange(&plan.request)
            .await
            .map_err(|e| ProposalFailure::Request(e.to_string()));
        ProposalOutcome {
            user_id: counterparty.id.clone(),
            user_name: counterparty.full_name(),
            result,
            unmatched: plan.unmatched,
        }
    }
}
