//! Promotion eligibility and discount arithmetic.
//!
//! Kept free of I/O so the gating rules and the discount computation can be
//! exercised as plain unit tests. The repository resolves the code (upper-
//! cased, active rows only); everything after the lookup happens here.

use jiff::Timestamp;
use thiserror::Error;

use crate::domain::promotions::records::{PromotionKind, PromotionRecord};

/// Why a promotion did not apply. Messages are user-facing.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PromotionRejection {
    #[error("promotion code does not exist or is inactive")]
    UnknownCode,

    #[error("promotion code has expired")]
    Expired,

    #[error("promotion code has no remaining uses")]
    UsageLimitReached,

    #[error("order subtotal is below the minimum of {min_amount} for this code")]
    BelowMinimum { min_amount: u64 },
}

/// Evaluate a promotion against an order subtotal, short-circuiting on the
/// first failed gate, and compute the clamped discount.
pub fn evaluate(
    promotion: &PromotionRecord,
    subtotal: u64,
    now: Timestamp,
) -> Result<u64, PromotionRejection> {
    if let Some(expires_at) = promotion.expires_at
        && expires_at < now
    {
        return Err(PromotionRejection::Expired);
    }

    if promotion.usage_limit > 0 && promotion.usage_count >= promotion.usage_limit {
        return Err(PromotionRejection::UsageLimitReached);
    }

    if subtotal < promotion.min_amount {
        return Err(PromotionRejection::BelowMinimum {
            min_amount: promotion.min_amount,
        });
    }

    let discount = match promotion.kind {
        PromotionKind::Percent => {
            // Widen before multiplying; subtotal * value can exceed u64.
            let raw = u128::from(subtotal) * u128::from(promotion.value) / 100;
            let raw = u64::try_from(raw).unwrap_or(u64::MAX);

            match promotion.max_amount {
                Some(cap) if cap > 0 => raw.min(cap),
                _ => raw,
            }
        }
        PromotionKind::Fixed => promotion.value,
    };

    // A discount never exceeds what is being discounted.
    Ok(discount.min(subtotal))
}

#[cfg(test)]
mod tests {
    use jiff::ToSpan;

    use crate::domain::promotions::records::{PromotionStatus, PromotionUuid};

    use super::*;

    fn percent(value: u64, cap: Option<u64>) -> PromotionRecord {
        PromotionRecord {
            uuid: PromotionUuid::new(),
            code: "SUMMER10".to_string(),
            kind: PromotionKind::Percent,
            value,
            min_amount: 0,
            max_amount: cap,
            usage_limit: 0,
            usage_count: 0,
            expires_at: None,
            free_shipping: false,
            min_items: 0,
            status: PromotionStatus::Active,
            created_at: Timestamp::UNIX_EPOCH,
            updated_at: Timestamp::UNIX_EPOCH,
        }
    }

    fn fixed(value: u64) -> PromotionRecord {
        PromotionRecord {
            kind: PromotionKind::Fixed,
            value,
            max_amount: None,
            ..percent(0, None)
        }
    }

    #[test]
    fn percent_discount_is_value_share_of_subtotal() {
        let promotion = percent(10, None);

        assert_eq!(evaluate(&promotion, 250_000, Timestamp::now()), Ok(25_000));
    }

    #[test]
    fn percent_discount_caps_at_max_amount() {
        let promotion = percent(10, Some(20_000));

        assert_eq!(evaluate(&promotion, 250_000, Timestamp::now()), Ok(20_000));
    }

    #[test]
    fn percent_discount_ignores_zero_cap() {
        let promotion = percent(10, Some(0));

        assert_eq!(evaluate(&promotion, 250_000, Timestamp::now()), Ok(25_000));
    }

    #[test]
    fn percent_discount_is_monotonic_below_the_cap() {
        let promotion = percent(15, Some(100_000));
        let now = Timestamp::now();

        let mut previous = 0;

        for subtotal in [0, 10_000, 50_000, 200_000, 500_000] {
            let discount = evaluate(&promotion, subtotal, now)
                .unwrap_or_else(|rejection| panic!("unexpected rejection {rejection:?}"));

            assert!(discount >= previous, "discount decreased at {subtotal}");

            previous = discount;
        }
    }

    #[test]
    fn fixed_discount_is_taken_verbatim() {
        assert_eq!(evaluate(&fixed(50_000), 250_000, Timestamp::now()), Ok(50_000));
    }

    #[test]
    fn fixed_discount_never_exceeds_subtotal() {
        assert_eq!(evaluate(&fixed(50_000), 30_000, Timestamp::now()), Ok(30_000));
    }

    #[test]
    fn hundred_percent_discount_clamps_to_subtotal() {
        // Values beyond 99 are rejected at creation, but the clamp holds
        // regardless of what is in the row.
        let promotion = percent(150, None);

        assert_eq!(evaluate(&promotion, 40_000, Timestamp::now()), Ok(40_000));
    }

    #[test]
    fn exhausted_usage_limit_is_rejected() {
        let mut promotion = percent(10, None);
        promotion.usage_limit = 3;
        promotion.usage_count = 3;

        assert_eq!(
            evaluate(&promotion, 250_000, Timestamp::now()),
            Err(PromotionRejection::UsageLimitReached)
        );
    }

    #[test]
    fn zero_usage_limit_means_unlimited() {
        let mut promotion = percent(10, None);
        promotion.usage_limit = 0;
        promotion.usage_count = 1_000;

        assert!(evaluate(&promotion, 250_000, Timestamp::now()).is_ok());
    }

    #[test]
    fn expiry_one_second_in_the_past_is_rejected() {
        let now = Timestamp::now();

        let mut promotion = percent(10, None);
        promotion.expires_at = Some(now - 1.second());

        assert_eq!(
            evaluate(&promotion, 250_000, now),
            Err(PromotionRejection::Expired)
        );
    }

    #[test]
    fn expiry_one_second_in_the_future_is_accepted() {
        let now = Timestamp::now();

        let mut promotion = percent(10, None);
        promotion.expires_at = Some(now + 1.second());

        assert!(evaluate(&promotion, 250_000, now).is_ok());
    }

    #[test]
    fn expiry_exactly_now_is_accepted() {
        let now = Timestamp::now();

        let mut promotion = percent(10, None);
        promotion.expires_at = Some(now);

        assert!(evaluate(&promotion, 250_000, now).is_ok());
    }

    #[test]
    fn subtotal_below_minimum_is_rejected_with_the_floor() {
        let mut promotion = percent(10, None);
        promotion.min_amount = 100_000;

        assert_eq!(
            evaluate(&promotion, 99_999, Timestamp::now()),
            Err(PromotionRejection::BelowMinimum {
                min_amount: 100_000
            })
        );
    }

    #[test]
    fn subtotal_at_minimum_is_accepted() {
        let mut promotion = percent(10, None);
        promotion.min_amount = 100_000;

        assert!(evaluate(&promotion, 100_000, Timestamp::now()).is_ok());
    }

    #[test]
    fn expiry_is_checked_before_usage_and_minimum() {
        let now = Timestamp::now();

        let mut promotion = percent(10, None);
        promotion.expires_at = Some(now - 1.second());
        promotion.usage_limit = 1;
        promotion.usage_count = 1;
        promotion.min_amount = 1_000_000;

        assert_eq!(
            evaluate(&promotion, 0, now),
            Err(PromotionRejection::Expired)
        );
    }

    #[test]
    fn min_items_and_free_shipping_do_not_gate() {
        // Display-only fields: a one-line order passes a min_items of 5.
        let mut promotion = fixed(10_000);
        promotion.min_items = 5;
        promotion.free_shipping = true;

        assert_eq!(evaluate(&promotion, 50_000, Timestamp::now()), Ok(10_000));
    }
}
