//! Movement planning.
//!
//! A movement is a single signed balance change. Planning is pure: given the
//! balance read from storage and the requested amount, it either yields the
//! values to persist or rejects the movement. Persistence (and the
//! compare-and-swap against the balance actually still being current) is the
//! repository's problem.

use rust_decimal::Decimal;

use super::error::LedgerError;

/// The computed outcome of a movement, ready to persist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovementDraft {
    /// Human-readable description embedding the unsigned magnitude.
    pub description: String,
    /// The original signed amount.
    pub amount: Decimal,
    /// Account balance after the movement is applied.
    pub balance_after: Decimal,
}

/// Plans a movement of `amount` against an account holding `balance`.
///
/// Credits are positive, debits negative; zero counts as a deposit. The
/// description wording follows the sign of the input amount, not of the
/// resulting balance.
///
/// # Errors
///
/// Returns [`LedgerError::InsufficientFunds`] when the resulting balance
/// would be negative. Nothing must be persisted in that case.
pub fn plan_movement(balance: Decimal, amount: Decimal) -> Result<MovementDraft, LedgerError> {
    let balance_after = balance + amount;
    if balance_after < Decimal::ZERO {
        return Err(LedgerError::InsufficientFunds { balance, amount });
    }

    let magnitude = amount.abs();
    let description = if amount < Decimal::ZERO {
        format!("Withdrawal of {magnitude}")
    } else {
        format!("Deposit of {magnitude}")
    };

    Ok(MovementDraft {
        description,
        amount,
        balance_after,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_deposit_increases_balance() {
        let draft = plan_movement(dec!(100.00), dec!(25.50)).unwrap();
        assert_eq!(draft.balance_after, dec!(125.50));
        assert_eq!(draft.amount, dec!(25.50));
        assert_eq!(draft.description, "Deposit of 25.50");
    }

    #[test]
    fn test_withdrawal_keeps_signed_amount() {
        let draft = plan_movement(dec!(1000.00), dec!(-500.00)).unwrap();
        assert_eq!(draft.balance_after, dec!(500.00));
        assert_eq!(draft.amount, dec!(-500.00));
        assert_eq!(draft.description, "Withdrawal of 500.00");
    }

    #[test]
    fn test_withdrawal_to_exactly_zero_is_allowed() {
        let draft = plan_movement(dec!(75.25), dec!(-75.25)).unwrap();
        assert_eq!(draft.balance_after, Decimal::ZERO);
    }

    #[test]
    fn test_zero_amount_is_a_deposit() {
        let draft = plan_movement(dec!(10), Decimal::ZERO).unwrap();
        assert_eq!(draft.balance_after, dec!(10));
        assert_eq!(draft.description, "Deposit of 0");
    }

    #[test]
    fn test_overdraw_is_rejected_with_context() {
        let err = plan_movement(dec!(500.00), dec!(-600.00)).unwrap_err();
        assert_eq!(
            err,
            LedgerError::InsufficientFunds {
                balance: dec!(500.00),
                amount: dec!(-600.00),
            }
        );
        assert!(err.to_string().contains("500.00"));
        assert!(err.to_string().contains("-600.00"));
    }

    #[test]
    fn test_statement_scenario_withdraw_then_overdraw() {
        // Account holds 1000.00; withdraw 500.00, then try 600.00 more.
        let first = plan_movement(dec!(1000.00), dec!(-500.00)).unwrap();
        assert_eq!(first.balance_after, dec!(500.00));
        assert!(first.description.contains("500.00"));
        assert!(first.description.starts_with("Withdrawal"));

        let second = plan_movement(first.balance_after, dec!(-600.00));
        assert!(matches!(
            second,
            Err(LedgerError::InsufficientFunds { .. })
        ));
        // The rejected plan must not have touched anything: the caller still
        // holds the 500.00 balance from the first movement.
        assert_eq!(first.balance_after, dec!(500.00));
    }
}
