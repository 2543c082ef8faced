//! # Coupon Validation
//!
//! Decides whether a coupon may be applied to a cart and computes the
//! resulting discount.
//!
//! ## Check Precedence
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                  verify_coupon(cart, code, coupons, now)            │
//! │                                                                     │
//! │  1. code resolves to an existing, active coupon   else NotFound     │
//! │  2. now inside [start_date, end_date]             else Expired      │
//! │  3. no cart line under a running flash sale       else Conflict     │
//! │  4. usage below max_usage (when set)              else Exhausted    │
//! │  5. subtotal >= min_order_amount                  else BelowMinimum │
//! │  6. success: discount on subtotal, clipped to the subtotal          │
//! │                                                                     │
//! │  First failing check wins. The order is part of the contract and    │
//! │  does not depend on how the registry happens to be sorted.          │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Validation never mutates anything: usage accounting happens separately,
//! at order-completion time, via [`Coupon::record_use`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

use crate::cart::Cart;
use crate::money::Money;
use crate::types::Coupon;

// =============================================================================
// Outcomes
// =============================================================================

/// Why a coupon was refused.
///
/// Each variant is a distinct outcome code; the `Display` text is the
/// human-readable detail for the caller to surface. Use [`code`] when an API
/// layer needs a stable machine-readable token.
///
/// [`code`]: CouponRejection::code
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CouponRejection {
    /// No active coupon matches the supplied code.
    #[error("Coupon {0} was not found")]
    NotFound(String),

    /// The coupon exists but its validity window does not cover `now`.
    #[error("Coupon {0} is not valid at this time")]
    Expired(String),

    /// The cart holds at least one item under a running flash sale; flash
    /// sales and coupons are mutually exclusive.
    #[error("Coupons cannot be combined with flash-sale items")]
    Conflict,

    /// The coupon has already been redeemed `max_usage` times.
    #[error("Coupon {0} has reached its usage limit")]
    Exhausted(String),

    /// The cart subtotal is below the coupon's minimum order amount.
    #[error("Order subtotal {subtotal} is below the required minimum {minimum}")]
    BelowMinimum { subtotal: Money, minimum: Money },
}

impl CouponRejection {
    /// Stable token for API serialization.
    pub fn code(&self) -> &'static str {
        match self {
            CouponRejection::NotFound(_) => "not_found",
            CouponRejection::Expired(_) => "expired",
            CouponRejection::Conflict => "conflict",
            CouponRejection::Exhausted(_) => "exhausted",
            CouponRejection::BelowMinimum { .. } => "below_minimum",
        }
    }
}

/// A successfully validated coupon, ready for checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CouponApplication {
    /// The normalized code that was applied.
    pub code: String,

    /// Cart subtotal the discount was computed against.
    pub subtotal: Money,

    /// Discount granted; never exceeds `subtotal`.
    pub discount_amount: Money,

    /// What remains to pay: `subtotal - discount_amount`.
    pub payable: Money,
}

// =============================================================================
// Validator
// =============================================================================

/// Validates a coupon code against a cart snapshot.
///
/// Pure: consumes snapshots and an injected instant, writes nothing. The
/// caller translates the rejection into its own response format and, on
/// success, carries the [`CouponApplication`] into checkout.
///
/// ## Example
/// ```rust
/// use bazaar_core::coupon::{verify_coupon, CouponRejection};
/// # use bazaar_core::cart::Cart;
/// # use chrono::{TimeZone, Utc};
/// # let now = Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap();
/// let cart = Cart::new();
/// let outcome = verify_coupon(&cart, "NOSUCH", &[], now);
/// assert_eq!(outcome.unwrap_err(), CouponRejection::NotFound("NOSUCH".into()));
/// ```
pub fn verify_coupon(
    cart: &Cart,
    code: &str,
    coupons: &[Coupon],
    now: DateTime<Utc>,
) -> Result<CouponApplication, CouponRejection> {
    let normalized = Coupon::normalize_code(code);

    let coupon = match coupons
        .iter()
        .find(|c| c.is_active && c.code == normalized)
    {
        Some(coupon) => coupon,
        None => {
            debug!(code = %normalized, "Coupon lookup failed");
            return Err(CouponRejection::NotFound(normalized));
        }
    };

    if !coupon.is_within_window(now) {
        debug!(code = %normalized, "Coupon outside its validity window");
        return Err(CouponRejection::Expired(normalized));
    }

    if cart.has_flash_sale_item(now) {
        debug!(code = %normalized, "Coupon refused: cart holds flash-sale items");
        return Err(CouponRejection::Conflict);
    }

    if coupon.is_exhausted() {
        debug!(code = %normalized, usage = coupon.usage_count, "Coupon usage limit reached");
        return Err(CouponRejection::Exhausted(normalized));
    }

    let subtotal = cart.subtotal(now);
    let minimum = coupon.min_order_amount();
    if subtotal < minimum {
        debug!(code = %normalized, subtotal = %subtotal, minimum = %minimum, "Order below coupon minimum");
        return Err(CouponRejection::BelowMinimum { subtotal, minimum });
    }

    let discount_amount = coupon.discount.amount_off(subtotal);
    let payable = subtotal - discount_amount;
    debug!(
        code = %normalized,
        subtotal = %subtotal,
        discount = %discount_amount,
        "Coupon accepted"
    );

    Ok(CouponApplication {
        code: normalized,
        subtotal,
        discount_amount,
        payable,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
