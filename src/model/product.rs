use serde::{Deserialize, Serialize};

use super::string_id;

string_id! {
    /// Identifier minted by the catalog for each product.
    ProductId
}

/// A purchasable catalog item.
///
/// Prices are whole minor currency units, so an order total is an exact sum.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub display_name: String,
    pub price: u64,
}

impl Product {
    pub fn new(id: impl Into<ProductId>, display_name: impl Into<String>, price: u64) -> Self {
        Self {
            id: id.into(),
            display_name: display_name.into(),
            price,
        }
    }
}

/// Parameters for adding a product; the catalog assigns the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductCreate {
    pub display_name: String,
    pub price: u64,
}

impl ProductCreate {
    pub fn new(display_name: impl Into<String>, price: u64) -> Self {
        Self {
            display_name: display_name.into(),
            price,
        }
    }
}
