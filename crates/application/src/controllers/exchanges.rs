use std::sync::Arc;

use booky_domain::{CounterOfferRequest, ExchangeCardView, ExchangeStatus, Panel, Toast};
use tracing::{debug, warn};

use super::GamificationController;
use crate::context::AppContext;
use crate::wizard::ExchangeWizard;
use crate::ApplicationResult;

/// Exchange list, details and responses.
#[derive(Clone)]
pub struct ExchangesController {
    ctx: Arc<AppContext>,
}

impl ExchangesController {
    /// Creates the controller.
    #[must_use]
    pub const fn new(ctx: Arc<AppContext>) -> Self {
        Self { ctx }
    }

    /// Loads the session user's exchanges as cards seen from their side.
    pub async fn load(&self) -> Panel<ExchangeCardView> {
        let result = match self.ctx.require_user().await {
            Ok(user) => self
                .ctx
                .api()
                .user_exchanges(&user.id)
                .await
                .map(|list| (user, list)),
            Err(e) => Err(e),
        };
        let panel = match result {
            Ok((user, exchanges)) => Panel::from_items(
                exchanges
                    .iter()
                    .map(|e| ExchangeCardView::new(e, &user.id))
                    .collect(),
                "You have no exchanges yet",
            ),
            Err(e) => {
                warn!(error = %e, "exchanges load failed");
                Panel::error("Could not load exchanges")
            }
        };
        self.ctx.update_screen(|s| s.exchanges = panel.clone()).await;
        panel
    }

    /// Loads one exchange.
    ///
    /// # Errors
    ///
    /// Returns the API error, or [`crate::ApplicationError::SessionMissing`].
    pub async fn details(&self, exchange_id: &str) -> ApplicationResult<ExchangeCardView> {
        let user = self.ctx.require_user().await?;
        match self.ctx.api().exchange(exchange_id).await {
            Ok(exchange) => {
                let view = ExchangeCardView::new(&exchange, &user.id);
                self.ctx
                    .update_screen(|s| s.exchange_details = Some(view.clone()))
                    .await;
                Ok(view)
            }
            Err(e) => {
                self.ctx.report("Could not load the exchange", &e);
                Err(e)
            }
        }
    }

    /// Accepts, rejects, cancels or completes an exchange, then reloads the
    /// list and the gamification panel.
    ///
    /// # Errors
    ///
    /// Returns the API error, or [`crate::ApplicationError::SessionMissing`].
    pub async fn respond(&self, exchange_id: &str, status: ExchangeStatus) -> ApplicationResult<()> {
        let user = self.ctx.require_user().await?;
        if let Err(e) = self
            .ctx
            .api()
            .update_exchange_status(exchange_id, &user.id, status)
            .await
        {
            self.ctx.report("Could not update the exchange", &e);
            return Err(e);
        }
        self.ctx
            .notify(Toast::success(format!("Exchange {}", status.label().to_lowercase())));
        self.load().await;
        if let Err(e) = GamificationController::new(self.ctx.clone())
            .refresh(&user.id)
            .await
        {
            debug!(error = %e, "gamification refresh after change failed");
        }
        Ok(())
    }

    /// Replaces the books of a pending exchange with a counter-offer.
    ///
    /// # Errors
    ///
    /// Returns a validation error when either side is empty (no network
    /// call), otherwise the API error.
    pub async fn counter_offer(
        &self,
        exchange_id: &str,
        owner_book_ids: Vec<String>,
        requester_book_ids: Vec<String>,
    ) -> ApplicationResult<()> {
        if owner_book_ids.is_empty() || requester_book_ids.is_empty() {
            return Err(self
                .ctx
                .reject("A counter-offer needs books on both sides"));
        }
        let offer = CounterOfferRequest {
            owner_book_ids,
            requester_book_ids,
        };
        if let Err(e) = self.ctx.api().counter_offer(exchange_id, &offer).await {
            self.ctx.report("Could not send the counter-offer", &e);
            return Err(e);
        }
        self.ctx.notify(Toast::success("Counter-offer sent"));
        self.load().await;
        Ok(())
    }

    /// Opens a fresh exchange wizard.
    #[must_use]
    pub fn wizard(&self) -> ExchangeWizard {
        ExchangeWizard::new(self.ctx.clone())
    }
}
