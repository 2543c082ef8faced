//! # Cart
//!
//! Cart snapshot and mutation operations.
//!
//! ## Cart Operations Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Cart Operations                                │
//! │                                                                     │
//! │  Caller Action            Operation              State Change       │
//! │  ─────────────            ─────────              ────────────       │
//! │  Add product ───────────► add_item() ──────────► lines.push / merge │
//! │  Change quantity ───────► update_quantity() ───► lines[i].qty = n   │
//! │  Remove line ───────────► remove_item() ───────► lines.remove(i)    │
//! │  Empty the cart ────────► clear() ─────────────► lines.clear()      │
//! │                                                                     │
//! │  Every stock check respects a running flash sale's limited stock.   │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each line carries a frozen product snapshot plus the flash-sale-discount
//! records applicable to that product, so pricing a cart is a pure function
//! of the cart itself and an injected instant.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::pricing;
use crate::types::{FlashSaleDiscount, Product};
use crate::validation::validate_quantity;
use crate::{MAX_CART_ITEMS, MAX_ITEM_QUANTITY};

// =============================================================================
// Cart Line
// =============================================================================

/// One product in the cart.
///
/// The product data is frozen at the time of adding; if the catalog record
/// changes afterwards the cart keeps displaying consistent data. The
/// applicable flash-sale records travel with the line for the same reason.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    /// Product snapshot at time of adding.
    pub product: Product,

    /// Quantity in cart.
    pub quantity: i64,

    /// Flash-sale-discount records applicable to this product.
    pub flash_discounts: Vec<FlashSaleDiscount>,
}

impl CartLine {
    /// The discount record in effect for this line at `now`, if any.
    pub fn active_discount(&self, now: DateTime<Utc>) -> Option<&FlashSaleDiscount> {
        pricing::running_discount(&self.product, &self.flash_discounts, now)
    }

    /// Effective unit price at `now` (flash-sale price while a window runs).
    pub fn unit_price(&self, now: DateTime<Utc>) -> Money {
        pricing::resolve_price(&self.product, &self.flash_discounts, now)
    }

    /// Line total at `now` (effective unit price × quantity).
    pub fn line_total(&self, now: DateTime<Utc>) -> Money {
        self.unit_price(now).multiply_quantity(self.quantity)
    }

    /// How many units may be taken right now.
    ///
    /// While a discount window runs, the sale's limited stock caps the
    /// regular stock level.
    pub fn purchasable_stock(&self, now: DateTime<Utc>) -> i64 {
        match self.active_discount(now) {
            Some(record) => self.product.stock.min(record.limited_stock),
            None => self.product.stock,
        }
    }
}

// =============================================================================
// Cart
// =============================================================================

/// The shopping cart.
///
/// ## Invariants
/// - Lines are unique by product id (adding the same product merges quantity)
/// - Quantity is always positive (an update to 0 removes the line)
/// - At most [`MAX_CART_ITEMS`] distinct lines
/// - Quantity never exceeds the purchasable stock at the time of mutation
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Cart {
    /// Lines in the cart.
    pub lines: Vec<CartLine>,
}

impl Cart {
    /// Creates a new empty cart.
    pub fn new() -> Self {
        Cart { lines: Vec::new() }
    }

    /// Adds a product to the cart or merges quantity if already present.
    pub fn add_item(
        &mut self,
        product: &Product,
        flash_discounts: &[FlashSaleDiscount],
        quantity: i64,
        now: DateTime<Utc>,
    ) -> CoreResult<()> {
        validate_quantity(quantity)?;

        if !product.is_available {
            return Err(CoreError::ProductUnavailable {
                sku: product.sku.clone(),
            });
        }

        if let Some(line) = self.lines.iter_mut().find(|l| l.product.id == product.id) {
            let new_qty = line.quantity + quantity;
            if new_qty > MAX_ITEM_QUANTITY {
                return Err(CoreError::QuantityTooLarge {
                    requested: new_qty,
                    max: MAX_ITEM_QUANTITY,
                });
            }
            let available = line.purchasable_stock(now);
            if new_qty > available {
                return Err(CoreError::InsufficientStock {
                    sku: line.product.sku.clone(),
                    available,
                    requested: new_qty,
                });
            }
            line.quantity = new_qty;
            return Ok(());
        }

        if self.lines.len() >= MAX_CART_ITEMS {
            return Err(CoreError::CartTooLarge {
                max: MAX_CART_ITEMS,
            });
        }

        let line = CartLine {
            product: product.clone(),
            quantity,
            flash_discounts: flash_discounts
                .iter()
                .filter(|d| d.product_id == product.id)
                .cloned()
                .collect(),
        };
        let available = line.purchasable_stock(now);
        if quantity > available {
            return Err(CoreError::InsufficientStock {
                sku: product.sku.clone(),
                available,
                requested: quantity,
            });
        }
        self.lines.push(line);
        Ok(())
    }

    /// Sets the quantity of a line; 0 removes it.
    pub fn update_quantity(
        &mut self,
        product_id: &str,
        quantity: i64,
        now: DateTime<Utc>,
    ) -> CoreResult<()> {
        if quantity == 0 {
            return self.remove_item(product_id);
        }
        validate_quantity(quantity)?;

        let line = self
            .lines
            .iter_mut()
            .find(|l| l.product.id == product_id)
            .ok_or_else(|| CoreError::ProductNotInCart(product_id.to_string()))?;

        let available = line.purchasable_stock(now);
        if quantity > available {
            return Err(CoreError::InsufficientStock {
                sku: line.product.sku.clone(),
                available,
                requested: quantity,
            });
        }
        line.quantity = quantity;
        Ok(())
    }

    /// Removes a line by product id.
    pub fn remove_item(&mut self, product_id: &str) -> CoreResult<()> {
        let initial_len = self.lines.len();
        self.lines.retain(|l| l.product.id != product_id);

        if self.lines.len() == initial_len {
            Err(CoreError::ProductNotInCart(product_id.to_string()))
        } else {
            Ok(())
        }
    }

    /// Clears all lines from the cart.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Returns the number of distinct lines.
    pub fn item_count(&self) -> usize {
        self.lines.len()
    }

    /// Returns the total quantity across all lines.
    pub fn total_quantity(&self) -> i64 {
        self.lines.iter().map(|l| l.quantity).sum()
    }

    /// Checks if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Cart subtotal at `now`, at effective (flash-sale) unit prices.
    pub fn subtotal(&self, now: DateTime<Utc>) -> Money {
        self.lines.iter().map(|l| l.line_total(now)).sum()
    }

    /// Checks whether any line carries a running flash-sale discount at `now`.
    pub fn has_flash_sale_item(&self, now: DateTime<Utc>) -> bool {
        self.lines.iter().any(|l| l.active_discount(now).is_some())
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
