//! # Error Types
//!
//! Domain-specific error types for bazaar-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                 │
//! │                                                                     │
//! │  bazaar-core errors (this file)                                     │
//! │  ├── CoreError        - Business rule violations                    │
//! │  └── ValidationError  - Data-entry boundary failures                │
//! │                                                                     │
//! │  Coupon rejections live in the coupon module: they are reported     │
//! │  outcomes with user-facing detail, not fatal errors.                │
//! │                                                                     │
//! │  Flow: ValidationError → CoreError → caller's API error → client    │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (SKU, code, status names)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core business logic errors.
///
/// These errors represent business rule violations. They should be caught
/// and translated to user-friendly messages by the calling layer.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product exists but is not currently sellable.
    #[error("Product {sku} is not available for sale")]
    ProductUnavailable { sku: String },

    /// Requested quantity exceeds what can be sold right now.
    ///
    /// `available` already accounts for a flash sale's limited stock when
    /// a discount window is running.
    #[error("Insufficient stock for {sku}: available {available}, requested {requested}")]
    InsufficientStock {
        sku: String,
        available: i64,
        requested: i64,
    },

    /// Cart has exceeded the maximum number of distinct items.
    #[error("Cart cannot have more than {max} items")]
    CartTooLarge { max: usize },

    /// Item quantity exceeds the global per-item cap.
    #[error("Quantity {requested} exceeds maximum allowed ({max})")]
    QuantityTooLarge { requested: i64, max: i64 },

    /// A cart operation referenced a product that is not in the cart.
    #[error("Product {0} is not in the cart")]
    ProductNotInCart(String),

    /// Checkout was attempted on an empty cart.
    #[error("Cannot create an order from an empty cart")]
    EmptyOrder,

    /// An order or payment status change violated the state machine.
    ///
    /// ## When This Occurs
    /// - Marking a pending order as shipped before it was paid
    /// - Touching a completed or canceled order
    /// - Re-resolving a payment that already succeeded or failed
    #[error("Illegal status transition from {from} to {to}")]
    InvalidStatusTransition { from: String, to: String },

    /// `record_use` was called on a coupon already at its usage limit.
    #[error("Coupon {code} has no remaining uses")]
    CouponExhausted { code: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Data-entry boundary errors.
///
/// These occur when administrator- or user-supplied input doesn't meet
/// requirements. Malformed records are rejected here so the pricing and
/// coupon computations never have to re-check them defensively.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too short.
    #[error("{field} must be at least {min} characters")]
    TooShort { field: String, min: usize },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must be positive.
    #[error("{field} must be positive")]
    MustBePositive { field: String },

    /// Invalid format (e.g., invalid UUID, inverted date window).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
