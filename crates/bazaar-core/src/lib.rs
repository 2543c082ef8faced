//! # bazaar-core: Pure Business Logic for the Bazaar Shop Backend
//!
//! This crate is the **heart** of the shop: pricing under flash sales,
//! coupon validation, cart math, and order/payment lifecycles, all as pure
//! functions with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                        Bazaar Architecture                          │
//! │                                                                     │
//! │  ┌───────────────────────────────────────────────────────────────┐  │
//! │  │              Storefront API / Back Office                     │  │
//! │  │   product pages ── cart endpoints ── checkout ── admin        │  │
//! │  └──────────────────────────────┬────────────────────────────────┘  │
//! │                                 │ plain snapshots + injected `now`   │
//! │  ┌──────────────────────────────▼────────────────────────────────┐  │
//! │  │                 ★ bazaar-core (THIS CRATE) ★                  │  │
//! │  │                                                               │  │
//! │  │  ┌─────────┐ ┌─────────┐ ┌────────┐ ┌────────┐ ┌──────────┐  │  │
//! │  │  │  types  │ │ pricing │ │  cart  │ │ coupon │ │  order   │  │  │
//! │  │  │ Product │ │ resolve │ │  Cart  │ │ verify │ │ Order    │  │  │
//! │  │  │ Coupon  │ │ _price  │ │ lines  │ │_coupon │ │ Payment  │  │  │
//! │  │  └─────────┘ └─────────┘ └────────┘ └────────┘ └──────────┘  │  │
//! │  │                                                               │  │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • NO GLOBAL CLOCK         │  │
//! │  └──────────────────────────────┬────────────────────────────────┘  │
//! │                                 │                                   │
//! │  ┌──────────────────────────────▼────────────────────────────────┐  │
//! │  │                  Persistence Layer (external)                 │  │
//! │  │   loads/stores snapshots; serializes coupon usage increments  │  │
//! │  └───────────────────────────────────────────────────────────────┘  │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Catalog and promotion snapshots (Product, Coupon, flash sales)
//! - [`money`] - Money type with integer arithmetic (no floating point!)
//! - [`pricing`] - Effective price under running flash-sale windows
//! - [`cart`] - Cart snapshot, mutation ops, sale-limited stock checks
//! - [`coupon`] - Coupon validation with typed rejection outcomes
//! - [`order`] - Orders, payments, tracking codes, status state machines
//! - [`validation`] - Data-entry boundary checks
//! - [`error`] - Domain error types
//!
//! ## Design Principles
//!
//! 1. **Pure Functions**: every computation is deterministic - same snapshot
//!    and same instant in, same result out
//! 2. **Injected Clock**: `now` is always a parameter; nothing here reads the
//!    wall clock
//! 3. **Integer Money**: all monetary values are integer subunits (i64)
//! 4. **Explicit Outcomes**: rejections are typed values for the caller to
//!    translate, never panics or bare strings
//!
//! ## Example Usage
//!
//! ```rust
//! use bazaar_core::money::Money;
//! use bazaar_core::pricing::resolve_price;
//! use bazaar_core::types::{Discount, FlashSaleDiscount, FlashSaleWindow, Product};
//! use chrono::{Duration, TimeZone, Utc};
//!
//! let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
//! let product = Product {
//!     id: "4b54e9a2-9f44-4a6e-b0a4-6ce2c3a9c6f1".into(),
//!     sku: "PHONE-X1".into(),
//!     name: "Flash Phone".into(),
//!     price_cents: 100_000,
//!     stock: 10,
//!     is_available: true,
//!     created_at: now,
//!     updated_at: now,
//! };
//! let sale = FlashSaleDiscount {
//!     product_id: product.id.clone(),
//!     window: FlashSaleWindow {
//!         title: "Summer Sale".into(),
//!         start_time: now - Duration::hours(1),
//!         end_time: now + Duration::hours(2),
//!     },
//!     discount: Discount::Percent(5000), // 50%
//!     limited_stock: 3,
//! };
//!
//! // Half price while the window runs, base price outside it.
//! assert_eq!(resolve_price(&product, &[sale.clone()], now), Money::from_cents(50_000));
//! let after = now + Duration::hours(3);
//! assert_eq!(resolve_price(&product, &[sale], after), Money::from_cents(100_000));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod cart;
pub mod coupon;
pub mod error;
pub mod money;
pub mod order;
pub mod pricing;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================
// These allow users to do `use bazaar_core::Money` instead of
// `use bazaar_core::money::Money`

pub use cart::{Cart, CartLine};
pub use coupon::{verify_coupon, CouponApplication, CouponRejection};
pub use error::{CoreError, CoreResult, ValidationError};
pub use money::Money;
pub use order::{
    new_tracking_code, Order, OrderItem, OrderStatus, Payment, PaymentMethod, PaymentStatus,
};
pub use pricing::{resolve_price, running_discount};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum distinct items allowed in a single cart.
///
/// ## Business Reason
/// Prevents runaway carts and ensures reasonable order sizes.
pub const MAX_CART_ITEMS: usize = 100;

/// Maximum quantity of a single item in a cart.
///
/// ## Business Reason
/// Prevents accidental over-ordering (e.g., typing 1000 instead of 10).
pub const MAX_ITEM_QUANTITY: i64 = 999;

/// Length of generated coupon codes.
pub const COUPON_CODE_LEN: usize = 12;

/// Length of generated order/payment tracking codes.
pub const TRACKING_CODE_LEN: usize = 20;
