use booky_domain::{
    ApiRequest, CounterOfferRequest, CreateExchangeRequest, Exchange, ExchangeStatus,
    UpdateExchangeStatusRequest,
};

use super::BookyApi;
use crate::ApplicationResult;

impl BookyApi {
    /// `GET /exchanges/users/{userId}`.
    ///
    /// # Errors
    ///
    /// Fails on transport, HTTP or decode errors.
    #[tracing::instrument(skip(self))]
    pub async fn user_exchanges(&self, user_id: &str) -> ApplicationResult<Vec<Exchange>> {
        self.send_list(ApiRequest::get(format!("/exchanges/users/{user_id}")))
            .await
    }

    /// `GET /exchanges/{id}`.
    ///
    /// # Errors
    ///
    /// Fails on transport, HTTP or decode errors.
    #[tracing::instrument(skip(self))]
    pub async fn exchange(&self, exchange_id: &str) -> ApplicationResult<Exchange> {
        self.send(ApiRequest::get(format!("/exchanges/{exchange_id}")))
            .await
    }

    /// `POST /exchanges`. The payload is validated before sending.
    ///
    /// # Errors
    ///
    /// Returns a domain error for an invalid payload, otherwise fails on
    /// transport or HTTP errors.
    #[tracing::instrument(skip(self))]
    pub async fn create_exchange(&self, exchange: &CreateExchangeRequest) -> ApplicationResult<()> {
        exchange.validate()?;
        self.send_unit(ApiRequest::post("/exchanges").with_json(exchange)?)
            .await
    }

    /// `PUT /exchanges/{id}/status?userId=`.
    ///
    /// # Errors
    ///
    /// Fails on transport or HTTP errors.
    #[tracing::instrument(skip(self))]
    pub async fn update_exchange_status(
        &self,
        exchange_id: &str,
        user_id: &str,
        status: ExchangeStatus,
    ) -> ApplicationResult<()> {
        let request = ApiRequest::put(format!("/exchanges/{exchange_id}/status"))
            .with_query("userId", user_id)
            .with_json(&UpdateExchangeStatusRequest { status })?;
        self.send_unit(request).await
    }

    /// `PUT /exchanges/{id}/counter-offer`.
    ///
    /// # Errors
    ///
    /// Fails on transport or HTTP errors.
    #[tracing::instrument(skip(self))]
    pub async fn counter_offer(
        &self,
        exchange_id: &str,
        offer: &CounterOfferRequest,
    ) -> ApplicationResult<()> {
        let request =
            ApiRequest::put(format!("/exchanges/{exchange_id}/counter-offer")).with_json(offer)?;
        self.send_unit(request).await
    }
}
