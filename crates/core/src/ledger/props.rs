//! Property-based tests for movement planning.

use proptest::prelude::*;
use rust_decimal::Decimal;

use super::error::LedgerError;
use super::movement::plan_movement;

/// Decimal with two fractional digits, as balances and amounts are on the wire.
fn cents(range: std::ops::Range<i64>) -> impl Strategy<Value = Decimal> {
    range.prop_map(|v| Decimal::new(v, 2))
}

proptest! {
    #[test]
    fn plan_succeeds_iff_result_non_negative(
        balance in cents(0..1_000_000_00),
        amount in cents(-1_000_000_00..1_000_000_00),
    ) {
        let result = plan_movement(balance, amount);
        if balance + amount >= Decimal::ZERO {
            let draft = result.expect("non-negative result must be accepted");
            prop_assert_eq!(draft.balance_after, balance + amount);
            prop_assert_eq!(draft.amount, amount);
        } else {
            prop_assert_eq!(
                result.unwrap_err(),
                LedgerError::InsufficientFunds { balance, amount }
            );
        }
    }

    #[test]
    fn description_wording_follows_input_sign(
        balance in cents(0..1_000_000_00),
        amount in cents(-1_000_000_00..1_000_000_00),
    ) {
        if let Ok(draft) = plan_movement(balance, amount) {
            if amount < Decimal::ZERO {
                prop_assert!(draft.description.starts_with("Withdrawal of "));
            } else {
                prop_assert!(draft.description.starts_with("Deposit of "));
            }
            prop_assert!(draft.description.contains(&amount.abs().to_string()));
        }
    }
}
