use serde::{Deserialize, Serialize};

use logiflow_core::OrderId;

use crate::event::Event;

/// Last known carrier status of a shipment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeliveryStatus {
    Delivered,
    #[serde(rename = "In Transit")]
    InTransit,
    #[serde(rename = "Not Shipped")]
    NotShipped,
    #[default]
    Unknown,
}

impl DeliveryStatus {
    pub fn label(self) -> &'static str {
        match self {
            DeliveryStatus::Delivered => "Delivered",
            DeliveryStatus::InTransit => "In Transit",
            DeliveryStatus::NotShipped => "Not Shipped",
            DeliveryStatus::Unknown => "Unknown",
        }
    }
}

impl core::fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.label())
    }
}

/// Event: delivery status reported for one order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryUpdate {
    pub order_id: OrderId,
    pub delivery_status: DeliveryStatus,
    #[serde(default)]
    pub on_time: bool,
}

impl Event for DeliveryUpdate {
    fn event_type(&self) -> &'static str {
        "logistics.delivery.updated"
    }

    fn order_id(&self) -> OrderId {
        self.order_id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn statuses_use_carrier_labels_on_the_wire() {
        let update: DeliveryUpdate = serde_json::from_str(
            r#"{"order_id": 4, "delivery_status": "In Transit", "on_time": false}"#,
        )
        .unwrap();
        assert_eq!(update.delivery_status, DeliveryStatus::InTransit);
        assert_eq!(update.order_id, OrderId::new(4));
        assert_eq!(
            serde_json::to_string(&DeliveryStatus::NotShipped).unwrap(),
            "\"Not Shipped\""
        );
    }

    #[test]
    fn on_time_defaults_to_false() {
        let update: DeliveryUpdate =
            serde_json::from_str(r#"{"order_id": 1, "delivery_status": "Delivered"}"#).unwrap();
        assert!(!update.on_time);
    }

    #[test]
    fn default_status_is_unknown() {
        assert_eq!(DeliveryStatus::default(), DeliveryStatus::Unknown);
        assert_eq!(DeliveryStatus::default().to_string(), "Unknown");
    }
}
