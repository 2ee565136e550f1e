use logiflow_core::OrderId;

/// An external fact about an order.
///
/// Events are:
/// - **immutable** (treat them as facts)
/// - keyed by the order they refer to
pub trait Event: Clone + core::fmt::Debug + Send + Sync + 'static {
    /// Stable event name/type identifier (e.g. "logistics.delivery.updated").
    fn event_type(&self) -> &'static str;

    /// Order this event refers to.
    fn order_id(&self) -> OrderId;
}
