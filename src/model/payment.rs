use serde::{Deserialize, Serialize};

use super::{string_id, OrderId};

string_id! {
    /// Identifier of a recorded payment, also handed back as the transaction id.
    PaymentId
}

/// A recorded charge against an order.
///
/// `order_id` is a plain reference; the payment component never checks that the order
/// exists, and it usually does not yet when the charge is taken.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: PaymentId,
    pub order_id: OrderId,
    pub amount: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentCreate {
    pub order_id: OrderId,
    pub amount: u64,
}

/// Outcome of a charge as seen by the caller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChargeReceipt {
    pub success: bool,
    pub transaction_id: PaymentId,
}

impl ChargeReceipt {
    pub fn approved(payment: &Payment) -> Self {
        Self {
            success: true,
            transaction_id: payment.id.clone(),
        }
    }
}
