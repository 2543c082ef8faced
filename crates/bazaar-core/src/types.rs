//! # Domain Types
//!
//! Catalog and promotion snapshots used throughout the crate.
//!
//! ## Type Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                │
//! │                                                                     │
//! │  ┌────────────────┐   ┌───────────────────┐   ┌─────────────────┐   │
//! │  │    Product     │   │ FlashSaleDiscount │   │     Coupon      │   │
//! │  │  ────────────  │   │  ───────────────  │   │  ─────────────  │   │
//! │  │  id (UUID)     │   │  product_id       │   │  code (unique)  │   │
//! │  │  sku           │   │  window           │   │  discount       │   │
//! │  │  price_cents   │   │  discount         │   │  start/end date │   │
//! │  │  stock         │   │  limited_stock    │   │  usage caps     │   │
//! │  └────────────────┘   └───────────────────┘   └─────────────────┘   │
//! │                                                                     │
//! │  ┌────────────────┐   ┌───────────────────┐                         │
//! │  │    Discount    │   │  FlashSaleWindow  │                         │
//! │  │  Percent (bps) │   │  start_time       │                         │
//! │  │  Fixed (cents) │   │  end_time         │                         │
//! │  └────────────────┘   └───────────────────┘                         │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Every type here is a plain-data snapshot: records are loaded by the
//! surrounding persistence layer and passed in by value or reference. No
//! type holds a live connection or reads a global clock.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::COUPON_CODE_LEN;

// =============================================================================
// Discount
// =============================================================================

/// A discount, either a percentage of the base amount or a flat reduction.
///
/// ## Why Basis Points?
/// 1 basis point = 0.01% = 1/10000, so fractional percentages such as 12.5%
/// stay in integer arithmetic (1250 bps). A percent discount must be in
/// (0, 10000]; a fixed discount must not exceed the base price it is attached
/// to. Both bounds are enforced at the data-entry boundary
/// ([`crate::validation`]), not re-checked here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Discount {
    /// Percentage off, in basis points (5000 = 50%).
    Percent(u32),
    /// Flat amount off, in subunits.
    Fixed(i64),
}

impl Discount {
    /// The amount this discount takes off a base amount.
    ///
    /// Clipped so it never exceeds the base: a runaway fixed discount makes
    /// an item free, not negatively priced, and a coupon can at most erase
    /// the order subtotal.
    ///
    /// ## Example
    /// ```rust
    /// use bazaar_core::money::Money;
    /// use bazaar_core::types::Discount;
    ///
    /// let base = Money::from_cents(1000);
    /// assert_eq!(Discount::Percent(5000).amount_off(base).cents(), 500);
    /// assert_eq!(Discount::Fixed(300).amount_off(base).cents(), 300);
    /// assert_eq!(Discount::Fixed(9999).amount_off(base).cents(), 1000);
    /// ```
    pub fn amount_off(&self, base: Money) -> Money {
        let raw = match self {
            Discount::Percent(bps) => base.percent_of(*bps),
            Discount::Fixed(cents) => Money::from_cents(*cents),
        };
        raw.min(base)
    }

    /// Applies this discount to a base amount.
    ///
    /// ## Example
    /// ```rust
    /// use bazaar_core::money::Money;
    /// use bazaar_core::types::Discount;
    ///
    /// let base = Money::from_cents(1000);
    /// assert_eq!(Discount::Percent(5000).apply(base).cents(), 500);
    /// assert_eq!(Discount::Fixed(300).apply(base).cents(), 700);
    /// ```
    pub fn apply(&self, base: Money) -> Money {
        base.saturating_sub(self.amount_off(base))
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product available in the catalog.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Unique identifier (UUID v4).
    pub id: String,

    /// Stock Keeping Unit - business identifier.
    pub sku: String,

    /// Display name shown in listings and on order lines.
    pub name: String,

    /// Base price in subunits, before any flash-sale discount.
    pub price_cents: i64,

    /// Current stock level.
    pub stock: i64,

    /// Whether the product may currently be sold (soft toggle).
    pub is_available: bool,

    /// When the product was created.
    pub created_at: DateTime<Utc>,

    /// When the product was last updated.
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Returns the base price as a Money type.
    #[inline]
    pub fn price(&self) -> Money {
        Money::from_cents(self.price_cents)
    }

    /// Checks whether the product can satisfy a plain stock request.
    ///
    /// Flash-sale limited stock is a cart concern; see
    /// [`crate::cart::CartLine::purchasable_stock`].
    pub fn can_sell(&self, quantity: i64) -> bool {
        self.is_available && self.stock >= quantity
    }
}

// =============================================================================
// Flash Sales
// =============================================================================

/// A time-bounded promotional window.
///
/// The window is *running* exactly while `start_time <= now <= end_time`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashSaleWindow {
    /// Campaign title shown by the back office ("Summer Sale").
    pub title: String,

    /// First instant at which attached discounts take effect.
    pub start_time: DateTime<Utc>,

    /// Last instant at which attached discounts apply.
    pub end_time: DateTime<Utc>,
}

impl FlashSaleWindow {
    /// Checks whether the window is running at the given instant.
    #[inline]
    pub fn is_running(&self, now: DateTime<Utc>) -> bool {
        self.start_time <= now && now <= self.end_time
    }
}

/// A flash-sale discount attached to one product.
///
/// The window is embedded as a snapshot rather than referenced by id, so the
/// record is self-contained and pricing never needs a lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlashSaleDiscount {
    /// Product this discount applies to.
    pub product_id: String,

    /// The promotional window this discount belongs to.
    pub window: FlashSaleWindow,

    /// The reduction granted while the window runs.
    pub discount: Discount,

    /// Units reserved for the sale; a cart may not take more than this many
    /// while the window runs, even if regular stock is higher.
    pub limited_stock: i64,
}

impl FlashSaleDiscount {
    /// Checks whether this discount is in effect at the given instant.
    #[inline]
    pub fn is_running(&self, now: DateTime<Utc>) -> bool {
        self.window.is_running(now)
    }
}

// =============================================================================
// Coupon
// =============================================================================

/// A user-supplied code granting an order-level discount.
///
/// Codes are stored trimmed and uppercase; [`Coupon::normalize_code`] applies
/// the same normalization to user input so lookup is case-insensitive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coupon {
    /// Unique redemption code, uppercase.
    pub code: String,

    /// Back-office description, never shown to customers.
    pub description: Option<String>,

    /// The reduction granted on the order subtotal.
    pub discount: Discount,

    /// Inactive coupons are treated as nonexistent during lookup.
    pub is_active: bool,

    /// First instant the coupon may be redeemed.
    pub start_date: DateTime<Utc>,

    /// Last instant the coupon may be redeemed; `None` never expires.
    pub end_date: Option<DateTime<Utc>>,

    /// Minimum order subtotal required for redemption, in subunits.
    pub min_order_amount_cents: i64,

    /// Maximum number of redemptions; `None` is unlimited.
    pub max_usage: Option<i64>,

    /// Redemptions so far. Incremented exactly once per completed order via
    /// [`Coupon::record_use`]; must never exceed `max_usage` when set.
    pub usage_count: i64,
}

impl Coupon {
    /// Returns the minimum order subtotal as a Money type.
    #[inline]
    pub fn min_order_amount(&self) -> Money {
        Money::from_cents(self.min_order_amount_cents)
    }

    /// Checks whether the coupon's validity window covers the given instant.
    ///
    /// An absent `end_date` means the window is open-ended.
    pub fn is_within_window(&self, now: DateTime<Utc>) -> bool {
        if now < self.start_date {
            return false;
        }
        match self.end_date {
            Some(end) => now <= end,
            None => true,
        }
    }

    /// Checks whether the coupon has reached its usage limit.
    pub fn is_exhausted(&self) -> bool {
        match self.max_usage {
            Some(max) => self.usage_count >= max,
            None => false,
        }
    }

    /// Records one redemption.
    ///
    /// The caller invokes this exactly once per successfully completed order
    /// referencing this coupon. This guards the usage invariant on the
    /// snapshot it owns; serializing concurrent redemptions of the same
    /// coupon is the persistence layer's obligation (an atomic conditional
    /// update on the stored row).
    pub fn record_use(&mut self) -> CoreResult<()> {
        if self.is_exhausted() {
            return Err(CoreError::CouponExhausted {
                code: self.code.clone(),
            });
        }
        self.usage_count += 1;
        Ok(())
    }

    /// Normalizes a user-supplied code for lookup: trimmed, uppercase.
    pub fn normalize_code(input: &str) -> String {
        input.trim().to_uppercase()
    }

    /// Generates a fresh opaque redemption code.
    ///
    /// Uppercase hex from a v4 UUID, so back-office bulk generation needs no
    /// coordination to stay collision-free in practice.
    pub fn generate_code() -> String {
        let raw = Uuid::new_v4().simple().to_string().to_uppercase();
        raw[..COUPON_CODE_LEN].to_string()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn test_coupon(code: &str) -> Coupon {
        Coupon {
            code: code.to_string(),
            description: None,
            discount: Discount::Percent(2000),
            is_active: true,
            start_date: noon() - chrono::Duration::days(1),
            end_date: Some(noon() + chrono::Duration::days(1)),
            min_order_amount_cents: 0,
            max_usage: Some(2),
            usage_count: 0,
        }
    }

    #[test]
    fn test_discount_amount_off() {
        let base = Money::from_cents(1000);
        assert_eq!(Discount::Percent(5000).amount_off(base).cents(), 500);
        assert_eq!(Discount::Fixed(300).amount_off(base).cents(), 300);
    }

    #[test]
    fn test_discount_amount_off_clips_to_base() {
        let base = Money::from_cents(250);
        assert_eq!(Discount::Fixed(1000).amount_off(base).cents(), 250);
        assert_eq!(Discount::Fixed(1000).apply(base).cents(), 0);
    }

    #[test]
    fn test_discount_apply() {
        let base = Money::from_cents(1000);
        assert_eq!(Discount::Percent(5000).apply(base).cents(), 500);
        assert_eq!(Discount::Fixed(300).apply(base).cents(), 700);
    }

    #[test]
    fn test_window_is_running() {
        let window = FlashSaleWindow {
            title: "Summer Sale".to_string(),
            start_time: noon() - chrono::Duration::hours(1),
            end_time: noon() + chrono::Duration::hours(2),
        };
        assert!(window.is_running(noon()));
        assert!(window.is_running(window.start_time));
        assert!(window.is_running(window.end_time));
        assert!(!window.is_running(noon() - chrono::Duration::hours(2)));
        assert!(!window.is_running(noon() + chrono::Duration::hours(3)));
    }

    #[test]
    fn test_coupon_window() {
        let mut coupon = test_coupon("SAVE20");
        assert!(coupon.is_within_window(noon()));
        assert!(!coupon.is_within_window(noon() - chrono::Duration::days(2)));
        assert!(!coupon.is_within_window(noon() + chrono::Duration::days(2)));

        // Open-ended coupons never expire.
        coupon.end_date = None;
        assert!(coupon.is_within_window(noon() + chrono::Duration::days(3650)));
    }

    #[test]
    fn test_coupon_usage_accounting() {
        let mut coupon = test_coupon("SAVE20");
        assert!(!coupon.is_exhausted());

        coupon.record_use().unwrap();
        coupon.record_use().unwrap();
        assert!(coupon.is_exhausted());

        let err = coupon.record_use().unwrap_err();
        assert!(matches!(err, CoreError::CouponExhausted { .. }));
        assert_eq!(coupon.usage_count, 2); // unchanged after rejection
    }

    #[test]
    fn test_coupon_unlimited_usage() {
        let mut coupon = test_coupon("SAVE20");
        coupon.max_usage = None;
        coupon.usage_count = 1_000_000;
        assert!(!coupon.is_exhausted());
        coupon.record_use().unwrap();
        assert_eq!(coupon.usage_count, 1_000_001);
    }

    #[test]
    fn test_normalize_code() {
        assert_eq!(Coupon::normalize_code("  save20 "), "SAVE20");
        assert_eq!(Coupon::normalize_code("SAVE20"), "SAVE20");
    }

    #[test]
    fn test_generate_code_shape() {
        let code = Coupon::generate_code();
        assert_eq!(code.len(), crate::COUPON_CODE_LEN);
        assert!(code.chars().all(|c| c.is_ascii_uppercase() || c.is_ascii_digit()));
        assert_ne!(Coupon::generate_code(), code);
    }

    #[test]
    fn test_product_can_sell() {
        let product = Product {
            id: "p1".to_string(),
            sku: "PHONE-X1".to_string(),
            name: "Flash Phone".to_string(),
            price_cents: 1000,
            stock: 5,
            is_available: true,
            created_at: noon(),
            updated_at: noon(),
        };
        assert!(product.can_sell(5));
        assert!(!product.can_sell(6));

        let hidden = Product {
            is_available: false,
            ..product
        };
        assert!(!hidden.can_sell(1));
    }
}
