//! # Validation Module
//!
//! Data-entry boundary checks.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                              │
//! │                                                                     │
//! │  Layer 1: Admin / storefront forms                                  │
//! │  └── Basic format checks, immediate feedback                        │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 2: THIS MODULE, at record create/update time                 │
//! │  └── Business bounds: percent ∈ (0,100], fixed ≤ base price,        │
//! │      usage_count ≤ max_usage, sane date windows                     │
//! │           │                                                         │
//! │           ▼                                                         │
//! │  Layer 3: Pricing & coupon computations                             │
//! │  └── Assume well-formed records; no defensive re-checks             │
//! └─────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Records that pass here are safe for the resolver and validator to consume
//! without re-checking numeric bounds.

use crate::error::ValidationError;
use crate::money::Money;
use crate::types::{Coupon, Discount, FlashSaleDiscount};
use crate::MAX_ITEM_QUANTITY;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a SKU (Stock Keeping Unit).
///
/// ## Rules
/// - Must not be empty
/// - At most 50 characters
/// - Only alphanumeric characters, hyphens, underscores
pub fn validate_sku(sku: &str) -> ValidationResult<()> {
    let sku = sku.trim();

    if sku.is_empty() {
        return Err(ValidationError::Required {
            field: "sku".to_string(),
        });
    }

    if sku.len() > 50 {
        return Err(ValidationError::TooLong {
            field: "sku".to_string(),
            max: 50,
        });
    }

    if !sku
        .chars()
        .all(|c| c.is_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "sku".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a product name: non-empty, at most 200 characters.
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a stored coupon code.
///
/// ## Rules
/// - Non-empty after trimming, 4 to 40 characters
/// - Uppercase letters, digits, hyphens, underscores (codes are stored
///   normalized; see [`Coupon::normalize_code`])
pub fn validate_coupon_code(code: &str) -> ValidationResult<()> {
    let code = code.trim();

    if code.is_empty() {
        return Err(ValidationError::Required {
            field: "code".to_string(),
        });
    }

    if code.len() < 4 {
        return Err(ValidationError::TooShort {
            field: "code".to_string(),
            min: 4,
        });
    }

    if code.len() > 40 {
        return Err(ValidationError::TooLong {
            field: "code".to_string(),
            max: 40,
        });
    }

    if !code
        .chars()
        .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "code".to_string(),
            reason: "must contain only uppercase letters, digits, hyphens, and underscores"
                .to_string(),
        });
    }

    Ok(())
}

/// Validates a UUID string format.
pub fn validate_uuid(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    uuid::Uuid::parse_str(id).map_err(|_| ValidationError::InvalidFormat {
        field: "id".to_string(),
        reason: "must be a valid UUID".to_string(),
    })?;

    Ok(())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a cart/order quantity: positive and within the global cap.
pub fn validate_quantity(qty: i64) -> ValidationResult<()> {
    if qty <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if qty > MAX_ITEM_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity".to_string(),
            min: 1,
            max: MAX_ITEM_QUANTITY,
        });
    }

    Ok(())
}

/// Validates a price in subunits: non-negative (zero means a free item).
pub fn validate_price_cents(cents: i64) -> ValidationResult<()> {
    if cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "price".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    Ok(())
}

// =============================================================================
// Promotion Validators
// =============================================================================

/// Validates a discount's bounds.
///
/// ## Rules
/// - Percent: basis points in (0, 10000]: a 0% discount is meaningless and
///   more than 100% would be a negative price
/// - Fixed: positive, and no larger than `base` when a base price is known
///   (flash-sale records know their product's price; coupons apply to a
///   subtotal only determined later)
pub fn validate_discount(discount: &Discount, base: Option<Money>) -> ValidationResult<()> {
    match discount {
        Discount::Percent(bps) => {
            if *bps == 0 || *bps > 10000 {
                return Err(ValidationError::OutOfRange {
                    field: "discount_value".to_string(),
                    min: 1,
                    max: 10000,
                });
            }
        }
        Discount::Fixed(cents) => {
            if *cents <= 0 {
                return Err(ValidationError::MustBePositive {
                    field: "discount_value".to_string(),
                });
            }
            if let Some(base) = base {
                if *cents > base.cents() {
                    return Err(ValidationError::OutOfRange {
                        field: "discount_value".to_string(),
                        min: 1,
                        max: base.cents(),
                    });
                }
            }
        }
    }

    Ok(())
}

/// Validates a coupon record before it is stored.
pub fn validate_coupon(coupon: &Coupon) -> ValidationResult<()> {
    validate_coupon_code(&coupon.code)?;
    validate_discount(&coupon.discount, None)?;

    if coupon.min_order_amount_cents < 0 {
        return Err(ValidationError::OutOfRange {
            field: "min_order_amount".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    if let Some(end) = coupon.end_date {
        if end < coupon.start_date {
            return Err(ValidationError::InvalidFormat {
                field: "end_date".to_string(),
                reason: "must not precede start_date".to_string(),
            });
        }
    }

    if coupon.usage_count < 0 {
        return Err(ValidationError::OutOfRange {
            field: "usage_count".to_string(),
            min: 0,
            max: i64::MAX,
        });
    }

    if let Some(max) = coupon.max_usage {
        if max <= 0 {
            return Err(ValidationError::MustBePositive {
                field: "max_usage".to_string(),
            });
        }
        if coupon.usage_count > max {
            return Err(ValidationError::OutOfRange {
                field: "usage_count".to_string(),
                min: 0,
                max,
            });
        }
    }

    Ok(())
}

/// Validates a flash-sale-discount record against its product's base price.
pub fn validate_flash_sale_discount(
    record: &FlashSaleDiscount,
    base: Money,
) -> ValidationResult<()> {
    if record.product_id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "product_id".to_string(),
        });
    }

    if record.window.end_time < record.window.start_time {
        return Err(ValidationError::InvalidFormat {
            field: "end_time".to_string(),
            reason: "must not precede start_time".to_string(),
        });
    }

    if record.limited_stock <= 0 {
        return Err(ValidationError::MustBePositive {
            field: "limited_stock".to_string(),
        });
    }

    validate_discount(&record.discount, Some(base))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::FlashSaleWindow;
    use chrono::{DateTime, Duration, TimeZone, Utc};

    fn noon() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    fn test_coupon() -> Coupon {
        Coupon {
            code: "SAVE20".to_string(),
            description: None,
            discount: Discount::Percent(2000),
            is_active: true,
            start_date: noon(),
            end_date: Some(noon() + Duration::days(30)),
            min_order_amount_cents: 0,
            max_usage: Some(100),
            usage_count: 0,
        }
    }

    #[test]
    fn test_validate_sku() {
        assert!(validate_sku("PHONE-X1").is_ok());
        assert!(validate_sku("abc_123").is_ok());

        assert!(validate_sku("").is_err());
        assert!(validate_sku("   ").is_err());
        assert!(validate_sku("has space").is_err());
        assert!(validate_sku(&"A".repeat(100)).is_err());
    }

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Flash Phone 128GB").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name(&"A".repeat(300)).is_err());
    }

    #[test]
    fn test_validate_coupon_code() {
        assert!(validate_coupon_code("SAVE20").is_ok());
        assert!(validate_coupon_code("NEW-YEAR_25").is_ok());

        assert!(validate_coupon_code("").is_err());
        assert!(validate_coupon_code("ABC").is_err()); // too short
        assert!(validate_coupon_code("save20").is_err()); // not normalized
        assert!(validate_coupon_code(&"A".repeat(60)).is_err());
    }

    #[test]
    fn test_validate_quantity() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(MAX_ITEM_QUANTITY).is_ok());

        assert!(validate_quantity(0).is_err());
        assert!(validate_quantity(-1).is_err());
        assert!(validate_quantity(MAX_ITEM_QUANTITY + 1).is_err());
    }

    #[test]
    fn test_validate_price_cents() {
        assert!(validate_price_cents(0).is_ok());
        assert!(validate_price_cents(1099).is_ok());
        assert!(validate_price_cents(-100).is_err());
    }

    #[test]
    fn test_validate_uuid() {
        assert!(validate_uuid("550e8400-e29b-41d4-a716-446655440000").is_ok());
        assert!(validate_uuid("").is_err());
        assert!(validate_uuid("not-a-uuid").is_err());
    }

    #[test]
    fn test_validate_discount_percent_bounds() {
        assert!(validate_discount(&Discount::Percent(1), None).is_ok());
        assert!(validate_discount(&Discount::Percent(10000), None).is_ok());

        assert!(validate_discount(&Discount::Percent(0), None).is_err());
        assert!(validate_discount(&Discount::Percent(10001), None).is_err());
    }

    #[test]
    fn test_validate_discount_fixed_bounds() {
        let base = Money::from_cents(1000);
        assert!(validate_discount(&Discount::Fixed(300), Some(base)).is_ok());
        assert!(validate_discount(&Discount::Fixed(1000), Some(base)).is_ok());

        assert!(validate_discount(&Discount::Fixed(0), Some(base)).is_err());
        assert!(validate_discount(&Discount::Fixed(-5), None).is_err());
        assert!(validate_discount(&Discount::Fixed(1001), Some(base)).is_err());
        // Without a known base, any positive fixed amount passes.
        assert!(validate_discount(&Discount::Fixed(1001), None).is_ok());
    }

    #[test]
    fn test_validate_coupon() {
        assert!(validate_coupon(&test_coupon()).is_ok());

        let mut inverted = test_coupon();
        inverted.end_date = Some(inverted.start_date - Duration::days(1));
        assert!(validate_coupon(&inverted).is_err());

        let mut over_used = test_coupon();
        over_used.max_usage = Some(5);
        over_used.usage_count = 6;
        assert!(validate_coupon(&over_used).is_err());

        let mut bad_code = test_coupon();
        bad_code.code = "ab".to_string();
        assert!(validate_coupon(&bad_code).is_err());

        let mut negative_min = test_coupon();
        negative_min.min_order_amount_cents = -1;
        assert!(validate_coupon(&negative_min).is_err());
    }

    #[test]
    fn test_validate_flash_sale_discount() {
        let record = FlashSaleDiscount {
            product_id: "550e8400-e29b-41d4-a716-446655440000".to_string(),
            window: FlashSaleWindow {
                title: "Summer Sale".to_string(),
                start_time: noon(),
                end_time: noon() + Duration::hours(2),
            },
            discount: Discount::Fixed(300),
            limited_stock: 3,
        };
        let base = Money::from_cents(1000);
        assert!(validate_flash_sale_discount(&record, base).is_ok());

        let mut inverted = record.clone();
        inverted.window.end_time = noon() - Duration::hours(1);
        assert!(validate_flash_sale_discount(&inverted, base).is_err());

        let mut no_stock = record.clone();
        no_stock.limited_stock = 0;
        assert!(validate_flash_sale_discount(&no_stock, base).is_err());

        let mut too_deep = record;
        too_deep.discount = Discount::Fixed(1500);
        assert!(validate_flash_sale_discount(&too_deep, base).is_err());
    }
}
