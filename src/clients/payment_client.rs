use std::time::Duration;

use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

use crate::model::{ChargeReceipt, OrderId, Payment, PaymentCreate};
use crate::payment_actor::PaymentError;

/// Anything that can take a charge for an order.
///
/// The order workflow depends on this rather than on [`PaymentClient`] directly, so a
/// different processor (or a test double) can stand in for the payment actor.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    async fn charge(&self, order_id: OrderId, amount: u64) -> Result<ChargeReceipt, PaymentError>;
}

/// Client for interacting with the payment actor.
#[derive(Clone)]
pub struct PaymentClient {
    inner: ResourceClient<Payment>,
}

impl PaymentClient {
    pub fn new(inner: ResourceClient<Payment>) -> Self {
        Self { inner }
    }

    /// Gives every call made through this client a deadline.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        Self {
            inner: self.inner.with_timeout(timeout),
        }
    }

    /// Records a payment for `order_id` and approves it.
    ///
    /// The transaction id is the id of the recorded payment.
    #[instrument(skip(self))]
    pub async fn charge(&self, order_id: OrderId, amount: u64) -> Result<ChargeReceipt, PaymentError> {
        debug!("Sending request");
        let payment = self
            .inner
            .create(PaymentCreate { order_id, amount })
            .await
            .map_err(Self::map_error)?;
        Ok(ChargeReceipt::approved(&payment))
    }
}

#[async_trait]
impl PaymentGateway for PaymentClient {
    async fn charge(&self, order_id: OrderId, amount: u64) -> Result<ChargeReceipt, PaymentError> {
        PaymentClient::charge(self, order_id, amount).await
    }
}

#[async_trait]
impl ActorClient<Payment> for PaymentClient {
    type Error = PaymentError;

    fn inner(&self) -> &ResourceClient<Payment> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        PaymentError::from_framework(e)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actor_framework::mock::MockClient;
    use actor_framework::StoreError;

    #[tokio::test]
    async fn test_charge_returns_payment_id_as_transaction() {
        let mut mock = MockClient::<Payment>::new();
        mock.expect_create().return_ok(Payment {
            id: "9F3A01BC".into(),
            order_id: "O1".into(),
            amount: 350,
        });

        let client = PaymentClient::new(mock.client());
        let receipt = client.charge("O1".into(), 350).await.unwrap();

        assert!(receipt.success);
        assert_eq!(receipt.transaction_id.as_str(), "9F3A01BC");
        mock.verify();
    }

    #[tokio::test]
    async fn test_charge_store_failure_is_persistence() {
        let mut mock = MockClient::<Payment>::new();
        mock.expect_create().return_err(FrameworkError::Store(StoreError::Unavailable {
            table: "payment",
            reason: "offline".to_string(),
        }));

        let client = PaymentClient::new(mock.client());
        let err = client.charge("O1".into(), 10).await.unwrap_err();

        assert!(matches!(err, PaymentError::Persistence(_)));
    }
}
