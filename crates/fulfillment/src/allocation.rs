//! First-come-first-served allocation of a single shared stock pool.
//!
//! Orders are served strictly in the sequence given. An order takes everything
//! it asked for if it can, otherwise whatever is left, otherwise nothing.

use logiflow_core::DomainResult;
use logiflow_inventory::InventoryStore;
use logiflow_sales::Order;

use crate::shipment::{AllocationStatus, Shipment, ShipmentBook};

/// Allocate stock to one order and return its shipment.
///
/// Unknown products have zero stock and end up on backorder. Invalid orders
/// are rejected before the store is touched.
pub fn allocate_order(store: &mut InventoryStore, order: &Order) -> DomainResult<Shipment> {
    order.validate()?;

    let available = store.get(&order.product);
    let requested = order.requested_qty;

    let shipment = if available >= requested {
        store.decrement(&order.product, requested)?;
        Shipment::for_order(
            order,
            requested,
            AllocationStatus::Allocated,
            "Full quantity allocated",
        )
    } else if available > 0 {
        store.decrement(&order.product, available)?;
        Shipment::for_order(
            order,
            available,
            AllocationStatus::PartiallyAllocated,
            format!("Only {available} out of {requested} available"),
        )
    } else {
        Shipment::for_order(order, 0, AllocationStatus::Backorder, "No stock available")
    };

    match shipment.allocation_status {
        AllocationStatus::Allocated => tracing::debug!(
            order_id = %order.order_id,
            product = %order.product,
            requested,
            "order fully allocated"
        ),
        status => tracing::info!(
            order_id = %order.order_id,
            product = %order.product,
            requested,
            available,
            status = %status,
            "order short of stock"
        ),
    }

    Ok(shipment)
}

/// Allocate every order, in sequence, against `store`.
pub fn allocate(store: &mut InventoryStore, orders: &[Order]) -> DomainResult<ShipmentBook> {
    let mut book = ShipmentBook::with_capacity(orders.len());
    for order in orders {
        let shipment = allocate_order(store, order)?;
        book.push(shipment)?;
    }

    tracing::info!(
        orders = book.total_orders(),
        allocated = book.allocated_orders(),
        backorders = book.backorders(),
        "allocation complete"
    );
    Ok(book)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use logiflow_core::{CustomerId, DomainError, OrderId, ProductId};
    use proptest::prelude::*;

    fn product(name: &str) -> ProductId {
        ProductId::new(name).unwrap()
    }

    fn test_order(id: u64, name: &str, qty: u64) -> Order {
        Order {
            order_id: OrderId::new(id),
            product: product(name),
            requested_qty: qty,
            customer: CustomerId::new("Meera").unwrap(),
            order_date: NaiveDate::from_ymd_opt(2025, 12, 2).unwrap(),
        }
    }

    #[test]
    fn full_allocation_when_stock_covers_request() {
        let mut store = InventoryStore::with_levels([(product("Laptop"), 10)]).unwrap();
        let shipment = allocate_order(&mut store, &test_order(1, "Laptop", 4)).unwrap();

        assert_eq!(shipment.shipped_qty, 4);
        assert_eq!(shipment.allocation_status, AllocationStatus::Allocated);
        assert_eq!(shipment.note, "Full quantity allocated");
        assert_eq!(store.get(&product("Laptop")), 6);
    }

    #[test]
    fn exact_stock_is_a_full_allocation() {
        let mut store = InventoryStore::with_levels([(product("Laptop"), 4)]).unwrap();
        let shipment = allocate_order(&mut store, &test_order(1, "Laptop", 4)).unwrap();
        assert_eq!(shipment.allocation_status, AllocationStatus::Allocated);
        assert_eq!(store.get(&product("Laptop")), 0);
    }

    #[test]
    fn partial_allocation_drains_remaining_stock() {
        let mut store = InventoryStore::with_levels([(product("Laptop"), 4)]).unwrap();
        let shipment = allocate_order(&mut store, &test_order(5, "Laptop", 6)).unwrap();

        assert_eq!(shipment.shipped_qty, 4);
        assert_eq!(shipment.allocation_status, AllocationStatus::PartiallyAllocated);
        assert_eq!(shipment.note, "Only 4 out of 6 available");
        assert_eq!(store.get(&product("Laptop")), 0);
    }

    #[test]
    fn empty_stock_is_a_backorder() {
        let mut store = InventoryStore::with_levels([(product("Laptop"), 0)]).unwrap();
        let shipment = allocate_order(&mut store, &test_order(1, "Laptop", 1)).unwrap();

        assert_eq!(shipment.shipped_qty, 0);
        assert_eq!(shipment.allocation_status, AllocationStatus::Backorder);
        assert_eq!(shipment.note, "No stock available");
        assert_eq!(store.get(&product("Laptop")), 0);
    }

    #[test]
    fn unknown_product_is_a_backorder_and_leaves_store_untouched() {
        let mut store = InventoryStore::with_levels([(product("Laptop"), 3)]).unwrap();
        let shipment = allocate_order(&mut store, &test_order(1, "Monitor", 1)).unwrap();

        assert!(shipment.is_backorder());
        assert!(!store.contains(&product("Monitor")));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn earlier_orders_win_scarce_stock() {
        let orders = vec![test_order(1, "Laptop", 3), test_order(2, "Laptop", 3)];

        let mut store = InventoryStore::with_levels([(product("Laptop"), 4)]).unwrap();
        let book = allocate(&mut store, &orders).unwrap();
        let shipped: Vec<u64> = book.iter().map(|s| s.shipped_qty).collect();
        assert_eq!(shipped, vec![3, 1]);

        let reversed: Vec<Order> = orders.into_iter().rev().collect();
        let mut store = InventoryStore::with_levels([(product("Laptop"), 4)]).unwrap();
        let book = allocate(&mut store, &reversed).unwrap();
        assert_eq!(book.get(&OrderId::new(2)).unwrap().shipped_qty, 3);
        assert_eq!(book.get(&OrderId::new(1)).unwrap().shipped_qty, 1);
    }

    #[test]
    fn carries_order_identity_onto_shipment() {
        let order = test_order(9, "Keyboard", 3);
        let mut store = InventoryStore::with_levels([(product("Keyboard"), 20)]).unwrap();
        let shipment = allocate_order(&mut store, &order).unwrap();

        assert_eq!(shipment.order_id, order.order_id);
        assert_eq!(shipment.customer, order.customer);
        assert_eq!(shipment.order_date, order.order_date);
        assert_eq!(shipment.requested_qty, 3);
    }

    #[test]
    fn zero_quantity_order_is_rejected() {
        let mut store = InventoryStore::with_levels([(product("Laptop"), 5)]).unwrap();
        let err = allocate_order(&mut store, &test_order(3, "Laptop", 0)).unwrap_err();

        assert!(matches!(err, DomainError::Validation(_)));
        assert_eq!(store.get(&product("Laptop")), 5);
    }

    #[test]
    fn batch_with_zero_quantity_order_fails() {
        let orders = vec![test_order(1, "Laptop", 2), test_order(2, "Laptop", 0)];
        let mut store = InventoryStore::with_levels([(product("Laptop"), 5)]).unwrap();

        assert!(allocate(&mut store, &orders).is_err());
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 256,
            ..ProptestConfig::default()
        })]

        /// Property: every shipment gets min(requested, available at its turn),
        /// statuses follow from the quantities, and total shipped never
        /// exceeds opening stock.
        #[test]
        fn allocation_matches_min_rule(
            opening in 0u64..50,
            requests in prop::collection::vec(1u64..20, 1..20)
        ) {
            let orders: Vec<Order> = requests
                .iter()
                .enumerate()
                .map(|(i, &qty)| test_order(i as u64 + 1, "Laptop", qty))
                .collect();
            let mut store = InventoryStore::with_levels([(product("Laptop"), opening)]).unwrap();
            let book = allocate(&mut store, &orders).unwrap();

            let mut remaining = opening;
            for shipment in book.iter() {
                let expected = shipment.requested_qty.min(remaining);
                prop_assert_eq!(shipment.shipped_qty, expected);
                remaining -= expected;

                let status = if shipment.shipped_qty == shipment.requested_qty {
                    AllocationStatus::Allocated
                } else if shipment.shipped_qty == 0 {
                    AllocationStatus::Backorder
                } else {
                    AllocationStatus::PartiallyAllocated
                };
                prop_assert_eq!(shipment.allocation_status, status);
            }

            prop_assert_eq!(store.get(&product("Laptop")), remaining);
            prop_assert_eq!(
                book.shipped_units(&product("Laptop")) + u128::from(remaining),
                u128::from(opening)
            );
        }
    }
}
