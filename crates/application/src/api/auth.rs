use booky_domain::{ApiRequest, SignInRequest, SignInResponse};

use super::BookyApi;
use crate::ApplicationResult;

impl BookyApi {
    /// `POST /sign-in`.
    ///
    /// # Errors
    ///
    /// Fails on transport, HTTP or decode errors.
    #[tracing::instrument(skip(self, password))]
    pub async fn sign_in(&self, email: &str, password: &str) -> ApplicationResult<SignInResponse> {
        let request = ApiRequest::post("/sign-in").with_json(&SignInRequest {
            email: email.to_string(),
            password: password.to_string(),
        })?;
        self.send(request).await
    }
}
