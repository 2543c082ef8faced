//! # Orders & Payments
//!
//! Checkout snapshots and their status state machines.
//!
//! ## Order Lifecycle
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                       Order Lifecycle                               │
//! │                                                                     │
//! │   Pending ──► Paid ──► Shipped ──► Completed                        │
//! │      │          │         │                                         │
//! │      └──────────┴─────────┴──────► Canceled                         │
//! │                                                                     │
//! │   Completed and Canceled are terminal. Every change goes through    │
//! │   transition(), which refuses edges not drawn above.                │
//! │                                                                     │
//! │   Payments: Pending ──► Success | Failed (both terminal)            │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Order items use the snapshot pattern: sku, name, and the *effective* unit
//! price (flash-sale price if one was running) are frozen at checkout, so a
//! later catalog edit or lapsed sale never changes what the customer owes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;
use uuid::Uuid;

use crate::cart::Cart;
use crate::coupon::CouponApplication;
use crate::error::{CoreError, CoreResult};
use crate::money::Money;
use crate::TRACKING_CODE_LEN;

// =============================================================================
// Order Status
// =============================================================================

/// The status of an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Order created, awaiting payment.
    Pending,
    /// Payment confirmed.
    Paid,
    /// Handed to the carrier.
    Shipped,
    /// Delivered and closed.
    Completed,
    /// Abandoned or withdrawn before completion.
    Canceled,
}

impl OrderStatus {
    /// Whether the state machine allows moving from `self` to `next`.
    pub fn can_transition_to(self, next: OrderStatus) -> bool {
        use OrderStatus::*;
        matches!(
            (self, next),
            (Pending, Paid)
                | (Paid, Shipped)
                | (Shipped, Completed)
                | (Pending, Canceled)
                | (Paid, Canceled)
                | (Shipped, Canceled)
        )
    }

    /// Terminal states accept no further transitions.
    pub fn is_terminal(self) -> bool {
        matches!(self, OrderStatus::Completed | OrderStatus::Canceled)
    }
}

impl Default for OrderStatus {
    fn default() -> Self {
        OrderStatus::Pending
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OrderStatus::Pending => "pending",
            OrderStatus::Paid => "paid",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Completed => "completed",
            OrderStatus::Canceled => "canceled",
        };
        f.write_str(name)
    }
}

// =============================================================================
// Payment Status & Method
// =============================================================================

/// The status of a payment attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Sent to the gateway, no verdict yet.
    Pending,
    /// Gateway confirmed the charge.
    Success,
    /// Gateway declined or the attempt lapsed.
    Failed,
}

impl PaymentStatus {
    /// Whether the state machine allows moving from `self` to `next`.
    pub fn can_transition_to(self, next: PaymentStatus) -> bool {
        use PaymentStatus::*;
        matches!((self, next), (Pending, Success) | (Pending, Failed))
    }
}

impl Default for PaymentStatus {
    fn default() -> Self {
        PaymentStatus::Pending
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PaymentStatus::Pending => "pending",
            PaymentStatus::Success => "success",
            PaymentStatus::Failed => "failed",
        };
        f.write_str(name)
    }
}

/// How an order is paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "snake_case"))]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Online payment through the external gateway.
    Gateway,
    /// Settled in cash when the order is delivered.
    CashOnDelivery,
}

// =============================================================================
// Order
// =============================================================================

/// A line item frozen at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Product the line refers to.
    pub product_id: String,
    /// SKU at time of checkout (frozen).
    pub sku_snapshot: String,
    /// Product name at time of checkout (frozen).
    pub name_snapshot: String,
    /// Effective unit price at time of checkout (frozen).
    pub unit_price_cents: i64,
    /// Quantity ordered.
    pub quantity: i64,
    /// unit_price × quantity.
    pub line_total_cents: i64,
}

impl OrderItem {
    /// Returns the frozen unit price as Money.
    #[inline]
    pub fn unit_price(&self) -> Money {
        Money::from_cents(self.unit_price_cents)
    }

    /// Returns the line total as Money.
    #[inline]
    pub fn line_total(&self) -> Money {
        Money::from_cents(self.line_total_cents)
    }
}

/// An order assembled from a cart at checkout time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Unique identifier (UUID v4).
    pub id: String,
    /// Opaque identifier for external reference (carrier, support).
    pub tracking_code: String,
    /// Current lifecycle state.
    pub status: OrderStatus,
    /// Frozen line items.
    pub items: Vec<OrderItem>,
    /// Coupon code applied at checkout, if any.
    pub coupon_code: Option<String>,
    /// Sum of line totals at checkout.
    pub total_amount_cents: i64,
    /// Coupon discount granted at checkout.
    pub discount_amount_cents: i64,
    /// What the customer owes: total - discount.
    pub final_amount_cents: i64,
    /// When the order was created.
    pub created_at: DateTime<Utc>,
    /// When the order last changed state.
    pub updated_at: DateTime<Utc>,
}

impl Order {
    /// Assembles a pending order from a cart snapshot.
    ///
    /// Unit prices are resolved at `now` (so running flash sales are frozen
    /// into the items) and the optional validated coupon's discount is
    /// carried into the final amount. The cart itself is not consumed or
    /// mutated; clearing it after checkout is the caller's business.
    pub fn from_cart(
        cart: &Cart,
        coupon: Option<&CouponApplication>,
        now: DateTime<Utc>,
    ) -> CoreResult<Order> {
        if cart.is_empty() {
            return Err(CoreError::EmptyOrder);
        }

        let items: Vec<OrderItem> = cart
            .lines
            .iter()
            .map(|line| {
                let unit_price = line.unit_price(now);
                OrderItem {
                    product_id: line.product.id.clone(),
                    sku_snapshot: line.product.sku.clone(),
                    name_snapshot: line.product.name.clone(),
                    unit_price_cents: unit_price.cents(),
                    quantity: line.quantity,
                    line_total_cents: unit_price.multiply_quantity(line.quantity).cents(),
                }
            })
            .collect();

        let total = cart.subtotal(now);
        let discount = coupon.map_or(Money::zero(), |c| c.discount_amount);
        let final_amount = total.saturating_sub(discount);

        let order = Order {
            id: Uuid::new_v4().to_string(),
            tracking_code: new_tracking_code(),
            status: OrderStatus::Pending,
            items,
            coupon_code: coupon.map(|c| c.code.clone()),
            total_amount_cents: total.cents(),
            discount_amount_cents: discount.cents(),
            final_amount_cents: final_amount.cents(),
            created_at: now,
            updated_at: now,
        };
        debug!(
            order = %order.id,
            tracking = %order.tracking_code,
            total = %total,
            payable = %final_amount,
            "Order assembled from cart"
        );
        Ok(order)
    }

    /// Returns the pre-discount total as Money.
    #[inline]
    pub fn total_amount(&self) -> Money {
        Money::from_cents(self.total_amount_cents)
    }

    /// Returns the coupon discount as Money.
    #[inline]
    pub fn discount_amount(&self) -> Money {
        Money::from_cents(self.discount_amount_cents)
    }

    /// Returns the payable amount as Money.
    #[inline]
    pub fn final_amount(&self) -> Money {
        Money::from_cents(self.final_amount_cents)
    }

    /// Moves the order to `next`, refusing edges the state machine lacks.
    pub fn transition(&mut self, next: OrderStatus, now: DateTime<Utc>) -> CoreResult<()> {
        if !self.status.can_transition_to(next) {
            return Err(CoreError::InvalidStatusTransition {
                from: self.status.to_string(),
                to: next.to_string(),
            });
        }
        debug!(order = %self.id, from = %self.status, to = %next, "Order status change");
        self.status = next;
        self.updated_at = now;
        Ok(())
    }

    /// Marks the order paid.
    pub fn mark_paid(&mut self, now: DateTime<Utc>) -> CoreResult<()> {
        self.transition(OrderStatus::Paid, now)
    }

    /// Marks the order shipped.
    pub fn mark_shipped(&mut self, now: DateTime<Utc>) -> CoreResult<()> {
        self.transition(OrderStatus::Shipped, now)
    }

    /// Marks the order completed.
    ///
    /// If a coupon was applied, the caller must also invoke
    /// [`crate::types::Coupon::record_use`] exactly once for this order.
    pub fn mark_completed(&mut self, now: DateTime<Utc>) -> CoreResult<()> {
        self.transition(OrderStatus::Completed, now)
    }

    /// Cancels the order.
    pub fn mark_canceled(&mut self, now: DateTime<Utc>) -> CoreResult<()> {
        self.transition(OrderStatus::Canceled, now)
    }
}

// =============================================================================
// Payment
// =============================================================================

/// A payment attempt against an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    /// Unique identifier (UUID v4).
    pub id: String,
    /// Order this payment settles.
    pub order_id: String,
    /// How the payment is made.
    pub method: PaymentMethod,
    /// Amount due, in subunits; equals the order's final amount.
    pub amount_cents: i64,
    /// Current state of the attempt.
    pub status: PaymentStatus,
    /// Gateway reference, set when the attempt succeeds.
    pub transaction_id: Option<String>,
    /// Opaque identifier for external reference.
    pub tracking_code: String,
    /// When the attempt was created.
    pub created_at: DateTime<Utc>,
}

impl Payment {
    /// Opens a pending payment attempt for an order.
    pub fn new(order: &Order, method: PaymentMethod, now: DateTime<Utc>) -> Payment {
        Payment {
            id: Uuid::new_v4().to_string(),
            order_id: order.id.clone(),
            method,
            amount_cents: order.final_amount_cents,
            status: PaymentStatus::Pending,
            transaction_id: None,
            tracking_code: new_tracking_code(),
            created_at: now,
        }
    }

    /// Returns the payment amount as Money.
    #[inline]
    pub fn amount(&self) -> Money {
        Money::from_cents(self.amount_cents)
    }

    /// Records the gateway's confirmation.
    pub fn mark_success(&mut self, transaction_id: impl Into<String>) -> CoreResult<()> {
        self.set_status(PaymentStatus::Success)?;
        self.transaction_id = Some(transaction_id.into());
        Ok(())
    }

    /// Records the gateway's refusal.
    pub fn mark_failed(&mut self) -> CoreResult<()> {
        self.set_status(PaymentStatus::Failed)
    }

    fn set_status(&mut self, next: PaymentStatus) -> CoreResult<()> {
        if !self.status.can_transition_to(next) {
            return Err(CoreError::InvalidStatusTransition {
                from: self.status.to_string(),
                to: next.to_string(),
            });
        }
        debug!(payment = %self.id, from = %self.status, to = %next, "Payment status change");
        self.status = next;
        Ok(())
    }
}

// =============================================================================
// Tracking Codes
// =============================================================================

/// Generates a fresh opaque tracking code.
///
/// Uppercase hex from a v4 UUID; no coordination with other instances is
/// needed for uniqueness in practice.
pub fn new_tracking_code() -> String {
    let raw = Uuid::new_v4().simple().to_string().to_uppercase();
    raw[..TRACKING_CODE_LEN].to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================
