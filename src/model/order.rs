use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::{string_id, Product, ProductId};

string_id! {
    /// Identifier minted by the order component before pricing starts.
    OrderId
}

/// Lifecycle status of an order.
///
/// Only two values are ever stored. An order is written once, after the charge, so
/// `Pending` survives only when the charge came back unsuccessful.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending,
    Completed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Completed => "COMPLETED",
        }
    }

    /// Inverse of [`as_str`](Self::as_str).
    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "PENDING" => Some(OrderStatus::Pending),
            "COMPLETED" => Some(OrderStatus::Completed),
            _ => None,
        }
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A customer's purchase of a set of products.
///
/// `product_ids` is kept exactly as requested, duplicates and unknown ids included.
/// `products` is never stored: it is filled in on every read from the catalog's
/// current contents.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    pub id: OrderId,
    #[serde(rename = "userId")]
    pub owner_id: String,
    pub product_ids: Vec<ProductId>,
    pub status: OrderStatus,
    pub total_amount: u64,
    #[serde(skip)]
    pub products: Vec<Product>,
}

impl Order {
    /// Builds a freshly initiated order: pending, unpriced, not enriched.
    pub fn new(id: OrderId, params: OrderCreate) -> Self {
        Self {
            id,
            owner_id: params.owner_id,
            product_ids: params.product_ids,
            status: OrderStatus::Pending,
            total_amount: 0,
            products: Vec::new(),
        }
    }

    /// Sets the total to the sum of the resolved products' prices and returns it.
    ///
    /// `resolved` is the catalog's answer, so a product requested twice counts once and
    /// an unknown id contributes nothing. Returns `None` and leaves the total untouched
    /// when the sum does not fit in a `u64`.
    pub fn price(&mut self, resolved: &[Product]) -> Option<u64> {
        let total = resolved
            .iter()
            .try_fold(0u64, |acc, p| acc.checked_add(p.price))?;
        self.total_amount = total;
        Some(total)
    }

    pub fn complete(&mut self) {
        self.status = OrderStatus::Completed;
    }

    pub fn is_completed(&self) -> bool {
        self.status == OrderStatus::Completed
    }

    /// Attaches resolved products, listed in the order the request first named them.
    ///
    /// Products the order never named go last.
    pub fn enrich(&mut self, mut products: Vec<Product>) {
        let mut first_seen: HashMap<&ProductId, usize> =
            HashMap::with_capacity(self.product_ids.len());
        for (pos, id) in self.product_ids.iter().enumerate() {
            first_seen.entry(id).or_insert(pos);
        }
        products.sort_by_key(|p| first_seen.get(&p.id).copied().unwrap_or(usize::MAX));
        self.products = products;
    }
}

/// Parameters for placing an order; the order component assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderCreate {
    #[serde(rename = "userId")]
    pub owner_id: String,
    pub product_ids: Vec<ProductId>,
}

impl OrderCreate {
    pub fn new(owner_id: impl Into<String>, product_ids: Vec<ProductId>) -> Self {
        Self {
            owner_id: owner_id.into(),
            product_ids,
        }
    }
}
