//! # Price Resolution
//!
//! Computes a product's effective price under flash sales.
//!
//! ## Resolution Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                     resolve_price(product, discounts, now)          │
//! │                                                                     │
//! │  discount records ──► keep this product's ──► keep windows running  │
//! │                       records                 at `now`              │
//! │                                                     │               │
//! │             ┌───────────────────────────────────────┤               │
//! │             ▼                                       ▼               │
//! │        none running                          one or more running    │
//! │             │                                       │               │
//! │             ▼                                       ▼               │
//! │        base price                          deepest cut wins,        │
//! │                                            apply to base price      │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Both functions are pure: the clock is a parameter and nothing is mutated.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::money::Money;
use crate::types::{FlashSaleDiscount, Product};

/// Selects the flash-sale discount in effect for a product at `now`.
///
/// When several windows run simultaneously, the record with the largest
/// effective price cut wins; ties break toward the earliest `start_time`.
/// The result is independent of the order of `discounts`.
///
/// Records for other products are ignored, so a caller may pass either a
/// per-product slice or the full set of active records.
pub fn running_discount<'a>(
    product: &Product,
    discounts: &'a [FlashSaleDiscount],
    now: DateTime<Utc>,
) -> Option<&'a FlashSaleDiscount> {
    let base = product.price();
    discounts
        .iter()
        .filter(|d| d.product_id == product.id && d.is_running(now))
        .max_by(|a, b| {
            a.discount
                .amount_off(base)
                .cmp(&b.discount.amount_off(base))
                // equal cuts: the earlier window ranks higher
                .then_with(|| b.window.start_time.cmp(&a.window.start_time))
        })
}

/// Resolves a product's effective sale price at `now`.
///
/// With no running discount the base price is returned unchanged. A percent
/// discount takes a rounded share off the base; a fixed discount subtracts,
/// floored at zero.
///
/// ## Example
/// ```rust
/// use bazaar_core::pricing::resolve_price;
/// # use bazaar_core::types::{Discount, FlashSaleDiscount, FlashSaleWindow, Product};
/// # use chrono::{Duration, TimeZone, Utc};
/// # let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
/// # let product = Product {
/// #     id: "p1".into(), sku: "PHONE-X1".into(), name: "Flash Phone".into(),
/// #     price_cents: 1000, stock: 10, is_available: true,
/// #     created_at: now, updated_at: now,
/// # };
/// # let sale = FlashSaleDiscount {
/// #     product_id: "p1".into(),
/// #     window: FlashSaleWindow {
/// #         title: "Summer Sale".into(),
/// #         start_time: now - Duration::hours(1),
/// #         end_time: now + Duration::hours(2),
/// #     },
/// #     discount: Discount::Percent(5000),
/// #     limited_stock: 3,
/// # };
/// assert_eq!(resolve_price(&product, &[sale], now).cents(), 500);
/// assert_eq!(resolve_price(&product, &[], now).cents(), 1000);
/// ```
pub fn resolve_price(
    product: &Product,
    discounts: &[FlashSaleDiscount],
    now: DateTime<Utc>,
) -> Money {
    let base = product.price();
    match running_discount(product, discounts, now) {
        None => base,
        Some(record) => {
            let price = record.discount.apply(base);
            debug!(
                sku = %product.sku,
                sale = %record.window.title,
                base = %base,
                price = %price,
                "Applying flash-sale discount"
            );
            price
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Discount, FlashSaleWindow};
    use chrono::{Duration, TimeZone};

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn test_product(price_cents: i64) -> Product {
        Product {
            id: "p1".to_string(),
            sku: "PHONE-X1".to_string(),
            name: "Flash Phone".to_string(),
            price_cents,
            stock: 10,
            is_available: true,
            created_at: noon(),
            updated_at: noon(),
        }
    }

    fn sale(product_id: &str, discount: Discount, start: DateTime<Utc>, end: DateTime<Utc>) -> FlashSaleDiscount {
        FlashSaleDiscount {
            product_id: product_id.to_string(),
            window: FlashSaleWindow {
                title: "Summer Sale".to_string(),
                start_time: start,
                end_time: end,
            },
            discount,
            limited_stock: 3,
        }
    }

    fn running(product_id: &str, discount: Discount) -> FlashSaleDiscount {
        sale(
            product_id,
            discount,
            noon() - Duration::hours(1),
            noon() + Duration::hours(2),
        )
    }

    #[test]
    fn test_no_discount_returns_base_price() {
        let product = test_product(1000);
        assert_eq!(resolve_price(&product, &[], noon()).cents(), 1000);
    }

    #[test]
    fn test_percent_discount() {
        let product = test_product(1000);
        let discounts = [running("p1", Discount::Percent(5000))];
        assert_eq!(resolve_price(&product, &discounts, noon()).cents(), 500);
    }

    #[test]
    fn test_fixed_discount() {
        let product = test_product(1000);
        let discounts = [running("p1", Discount::Fixed(300))];
        assert_eq!(resolve_price(&product, &discounts, noon()).cents(), 700);
    }

    #[test]
    fn test_lapsed_window_does_not_affect_price() {
        let product = test_product(1000);
        let discounts = [sale(
            "p1",
            Discount::Percent(5000),
            noon() - Duration::days(5),
            noon() - Duration::days(1),
        )];
        assert_eq!(resolve_price(&product, &discounts, noon()).cents(), 1000);
    }

    #[test]
    fn test_future_window_does_not_affect_price() {
        let product = test_product(1000);
        let discounts = [sale(
            "p1",
            Discount::Percent(5000),
            noon() + Duration::hours(1),
            noon() + Duration::hours(5),
        )];
        assert_eq!(resolve_price(&product, &discounts, noon()).cents(), 1000);
    }

    #[test]
    fn test_other_products_records_ignored() {
        let product = test_product(1000);
        let discounts = [running("p2", Discount::Percent(5000))];
        assert_eq!(resolve_price(&product, &discounts, noon()).cents(), 1000);
    }

    #[test]
    fn test_fixed_discount_floors_at_zero() {
        let product = test_product(200);
        let discounts = [running("p1", Discount::Fixed(200))];
        assert_eq!(resolve_price(&product, &discounts, noon()).cents(), 0);
    }

    #[test]
    fn test_deepest_cut_wins() {
        let product = test_product(1000);
        let discounts = [
            running("p1", Discount::Percent(1000)), // 100 off
            running("p1", Discount::Fixed(400)),    // 400 off
            running("p1", Discount::Percent(3000)), // 300 off
        ];
        assert_eq!(resolve_price(&product, &discounts, noon()).cents(), 600);

        // Selection does not depend on slice order.
        let mut reversed = discounts.to_vec();
        reversed.reverse();
        assert_eq!(resolve_price(&product, &reversed, noon()).cents(), 600);
    }

    #[test]
    fn test_equal_cuts_earliest_window_wins() {
        let product = test_product(1000);
        let early = sale(
            "p1",
            Discount::Percent(5000),
            noon() - Duration::hours(3),
            noon() + Duration::hours(1),
        );
        let late = sale(
            "p1",
            Discount::Fixed(500),
            noon() - Duration::hours(1),
            noon() + Duration::hours(1),
        );
        let windows = [late.clone(), early.clone()];
        let picked = running_discount(&product, &windows, noon()).unwrap();
        assert_eq!(picked.window.start_time, early.window.start_time);

        let windows = [early.clone(), late];
        let picked = running_discount(&product, &windows, noon()).unwrap();
        assert_eq!(picked.window.start_time, early.window.start_time);
    }
}
