use std::time::Duration;

use async_trait::async_trait;
use common::UserId;
use domain::{OrderSummary, ResponseOrder};
use reqwest::Url;

use super::OrderClient;
use crate::error::{ClientBuildError, RemoteCallError};

/// Calls a remote order service over HTTP.
///
/// Issues `GET {base}/order-service/{userId}/orders` and decodes the body as
/// a list of order responses.
#[derive(Debug, Clone)]
pub struct HttpOrderClient {
    http: reqwest::Client,
    base_url: Url,
    timeout: Duration,
}

impl HttpOrderClient {
    /// Builds a client whose requests give up after `timeout`.
    ///
    /// Fails when the TLS backend cannot be initialised.
    pub fn new(base_url: Url, timeout: Duration) -> Result<Self, ClientBuildError> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url,
            timeout,
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    fn orders_url(&self, user_id: &UserId) -> Result<Url, RemoteCallError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| {
                RemoteCallError::Unreachable(format!("{} cannot carry a path", self.base_url))
            })?
            .pop_if_empty()
            .extend(["order-service", user_id.as_str(), "orders"]);
        Ok(url)
    }

    fn classify(&self, err: reqwest::Error) -> RemoteCallError {
        if err.is_timeout() {
            RemoteCallError::Timeout(self.timeout)
        } else if err.is_decode() || err.is_body() {
            RemoteCallError::Decode(err.to_string())
        } else {
            RemoteCallError::Unreachable(err.to_string())
        }
    }
}

#[async_trait]
impl OrderClient for HttpOrderClient {
    #[tracing::instrument(skip(self), fields(base_url = %self.base_url))]
    async fn orders_for_user(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<OrderSummary>, RemoteCallError> {
        let url = self.orders_url(user_id)?;

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RemoteCallError::Status(status.as_u16()));
        }

        let orders: Vec<ResponseOrder> = response.json().await.map_err(|e| self.classify(e))?;

        tracing::debug!(count = orders.len(), "fetched remote order history");
        Ok(orders.into_iter().map(OrderSummary::from).collect())
    }
}
