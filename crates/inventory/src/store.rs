use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use logiflow_core::{DomainError, DomainResult, ProductId};

/// One row of an inventory snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockLevel {
    pub product: ProductId,
    pub quantity: u64,
}

/// Available quantity per product.
///
/// A missing product is the same as zero stock. Quantities are unsigned and
/// `decrement` refuses to take more than is available, so stock can never go
/// negative. Iteration follows insertion order: initial products first, then
/// products introduced by a restock.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InventoryStore {
    levels: IndexMap<ProductId, u64>,
}

impl InventoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the opening stock. A product listed twice keeps the sum.
    pub fn with_levels<I>(levels: I) -> DomainResult<Self>
    where
        I: IntoIterator<Item = (ProductId, u64)>,
    {
        let mut store = Self::new();
        for (product, quantity) in levels {
            store.increment(&product, quantity)?;
        }
        Ok(store)
    }

    /// Available quantity (0 when the product is unknown).
    pub fn get(&self, product: &ProductId) -> u64 {
        self.levels.get(product).copied().unwrap_or(0)
    }

    /// Remove `qty` units. Requires `qty <= get(product)`.
    pub fn decrement(&mut self, product: &ProductId, qty: u64) -> DomainResult<u64> {
        if qty == 0 {
            return Ok(self.get(product));
        }

        let current = self.get(product);
        if qty > current {
            return Err(DomainError::invariant(format!(
                "stock for {product} cannot go negative (available: {current}, requested: {qty})"
            )));
        }

        let remaining = current - qty;
        // Only reachable when current > 0, so the entry exists.
        if let Some(level) = self.levels.get_mut(product) {
            *level = remaining;
        }
        tracing::trace!(%product, qty, remaining, "stock decremented");
        Ok(remaining)
    }

    /// Add `qty` units, creating the product entry if needed.
    ///
    /// Fails without touching the store if the level would exceed `u64::MAX`.
    pub fn increment(&mut self, product: &ProductId, qty: u64) -> DomainResult<u64> {
        let current = self.get(product);
        let level = current.checked_add(qty).ok_or_else(|| {
            DomainError::validation(format!(
                "stock for {product} would overflow (on hand: {current}, adding: {qty})"
            ))
        })?;

        self.levels.insert(product.clone(), level);
        tracing::trace!(%product, qty, level, "stock incremented");
        Ok(level)
    }

    pub fn contains(&self, product: &ProductId) -> bool {
        self.levels.contains_key(product)
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    /// Units on hand across all products.
    pub fn total_units(&self) -> u128 {
        self.levels.values().map(|&qty| u128::from(qty)).sum()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&ProductId, u64)> {
        self.levels.iter().map(|(product, qty)| (product, *qty))
    }

    /// Point-in-time copy of every level, in insertion order.
    pub fn snapshot(&self) -> Vec<StockLevel> {
        self.iter()
            .map(|(product, quantity)| StockLevel {
                product: product.clone(),
                quantity,
            })
            .collect()
    }
}
