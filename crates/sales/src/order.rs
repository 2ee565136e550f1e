use std::collections::HashSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use logiflow_core::{CustomerId, DomainError, DomainResult, OrderId, ProductId};

/// A customer order for a single product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub order_id: OrderId,
    pub product: ProductId,
    #[serde(rename = "qty")]
    pub requested_qty: u64,
    pub customer: CustomerId,
    pub order_date: NaiveDate,
}

impl Order {
    /// Construct a validated order.
    pub fn new(
        order_id: OrderId,
        product: ProductId,
        requested_qty: u64,
        customer: CustomerId,
        order_date: NaiveDate,
    ) -> DomainResult<Self> {
        let order = Self {
            order_id,
            product,
            requested_qty,
            customer,
            order_date,
        };
        order.validate()?;
        Ok(order)
    }

    pub fn validate(&self) -> DomainResult<()> {
        if self.requested_qty == 0 {
            return Err(DomainError::validation(format!(
                "order {} must request a positive quantity",
                self.order_id
            )));
        }
        Ok(())
    }
}

/// Validate a whole batch before any stock moves.
///
/// Every order must be valid on its own and order ids must be unique, since
/// shipments, delivery updates and returns all join on them.
pub fn validate_batch(orders: &[Order]) -> DomainResult<()> {
    let mut seen = HashSet::with_capacity(orders.len());
    for order in orders {
        order.validate()?;
        if !seen.insert(order.order_id) {
            return Err(DomainError::conflict(format!(
                "duplicate order id {} in batch",
                order.order_id
            )));
        }
    }
    Ok(())
}
