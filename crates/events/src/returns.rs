use serde::{Deserialize, Serialize};

use logiflow_core::{DomainError, DomainResult, OrderId, ProductId};

use crate::event::Event;

/// Inspected condition of returned goods.
///
/// Only `Good` items go back on the shelf; anything else is held outside the
/// tracked stock pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReturnCondition {
    Good,
    Damaged,
    #[serde(other)]
    Other,
}

impl ReturnCondition {
    pub fn is_restockable(self) -> bool {
        matches!(self, ReturnCondition::Good)
    }
}

/// Event: goods returned against an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReturnEvent {
    pub order_id: OrderId,
    pub product: ProductId,
    pub qty_returned: u64,
    #[serde(default)]
    pub reason: String,
    pub condition: ReturnCondition,
}

impl ReturnEvent {
    pub fn validate(&self) -> DomainResult<()> {
        if self.qty_returned == 0 {
            return Err(DomainError::validation(format!(
                "return for order {} must have a positive quantity",
                self.order_id
            )));
        }
        Ok(())
    }
}

impl Event for ReturnEvent {
    fn event_type(&self) -> &'static str {
        "logistics.return.received"
    }

    fn order_id(&self) -> OrderId {
        self.order_id
    }
}
