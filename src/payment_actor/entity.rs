use actor_framework::ActorEntity;
use async_trait::async_trait;

use crate::model::{Payment, PaymentCreate, PaymentId};
use crate::payment_actor::PaymentError;

#[async_trait]
impl ActorEntity for Payment {
    type Id = PaymentId;
    type Create = PaymentCreate;
    type Context = ();
    type Error = PaymentError;

    const TABLE: &'static str = "payment";

    fn id(&self) -> &PaymentId {
        &self.id
    }

    fn from_create_params(id: PaymentId, params: PaymentCreate) -> Result<Self, PaymentError> {
        Ok(Self {
            id,
            order_id: params.order_id,
            amount: params.amount,
        })
    }
}
