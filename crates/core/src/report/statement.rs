//! Statement assembly.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

/// The client a statement is generated for, as known to the clients service.
#[derive(Debug, Clone)]
pub struct ClientInfo {
    /// Client identifier.
    pub id: i64,
    /// Client display name.
    pub name: String,
}

/// One account together with its in-window movements, as fetched by the
/// caller.
#[derive(Debug, Clone)]
pub struct AccountActivity {
    /// Account number.
    pub account_number: String,
    /// Account type label (`Ahorro` / `Corriente`).
    pub account_type: String,
    /// Current stored balance (not a point-in-time reconstruction).
    pub balance: Decimal,
    /// Movements inside the report window, oldest first.
    pub movements: Vec<MovementLine>,
}

/// A single movement as it appears on a statement.
#[derive(Debug, Clone)]
pub struct MovementLine {
    /// When the movement was registered.
    pub occurred_at: DateTime<Utc>,
    /// Stored description.
    pub description: String,
    /// Signed amount.
    pub amount: Decimal,
    /// Balance snapshot after the movement.
    pub balance: Decimal,
}

/// A full account statement, serialized with the historical wire names.
#[derive(Debug, Clone, Serialize)]
pub struct AccountStatement {
    /// Client identifier.
    #[serde(rename = "clienteId")]
    pub client_id: i64,
    /// Client display name.
    #[serde(rename = "clienteNombre")]
    pub client_name: String,
    /// One entry per account the client owns, in the order fetched.
    #[serde(rename = "cuentas")]
    pub accounts: Vec<StatementAccount>,
}

/// Per-account section of a statement.
#[derive(Debug, Clone, Serialize)]
pub struct StatementAccount {
    /// Account number.
    #[serde(rename = "numeroCuenta")]
    pub account_number: String,
    /// Account type label.
    #[serde(rename = "tipoCuenta")]
    pub account_type: String,
    /// Current stored balance.
    #[serde(rename = "saldoInicial")]
    pub balance: Decimal,
    /// Movements inside the window.
    #[serde(rename = "movimientos")]
    pub movements: Vec<StatementMovement>,
}

/// Per-movement line of a statement.
#[derive(Debug, Clone, Serialize)]
pub struct StatementMovement {
    /// When the movement was registered.
    #[serde(rename = "fecha")]
    pub occurred_at: DateTime<Utc>,
    /// Stored description.
    #[serde(rename = "tipoMovimiento")]
    pub description: String,
    /// Signed amount.
    #[serde(rename = "valor")]
    pub amount: Decimal,
    /// Balance snapshot after the movement.
    #[serde(rename = "saldo")]
    pub balance: Decimal,
}

/// Assembles a statement from already-fetched pieces.
///
/// An empty `accounts` list is a valid statement, not an error.
#[must_use]
pub fn build_statement(client: &ClientInfo, accounts: Vec<AccountActivity>) -> AccountStatement {
    AccountStatement {
        client_id: client.id,
        client_name: client.name.clone(),
        accounts: accounts
            .into_iter()
            .map(|activity| StatementAccount {
                account_number: activity.account_number,
                account_type: activity.account_type,
                balance: activity.balance,
                movements: activity
                    .movements
                    .into_iter()
                    .map(|line| StatementMovement {
                        occurred_at: line.occurred_at,
                        description: line.description,
                        amount: line.amount,
                        balance: line.balance,
                    })
                    .collect(),
            })
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    fn client() -> ClientInfo {
        ClientInfo {
            id: 4,
            name: "Marianela Montalvo".to_string(),
        }
    }

    fn movement(amount: Decimal, balance: Decimal) -> MovementLine {
        MovementLine {
            occurred_at: Utc.with_ymd_and_hms(2024, 2, 10, 14, 0, 0).unwrap(),
            description: format!("Deposit of {}", amount.abs()),
            amount,
            balance,
        }
    }

    #[test]
    fn test_statement_has_one_entry_per_account() {
        let accounts = vec![
            AccountActivity {
                account_number: "225487".to_string(),
                account_type: "Corriente".to_string(),
                balance: dec!(700),
                movements: vec![movement(dec!(600), dec!(700))],
            },
            AccountActivity {
                account_number: "496825".to_string(),
                account_type: "Ahorro".to_string(),
                balance: dec!(540),
                movements: vec![],
            },
        ];

        let statement = build_statement(&client(), accounts);
        assert_eq!(statement.client_id, 4);
        assert_eq!(statement.client_name, "Marianela Montalvo");
        assert_eq!(statement.accounts.len(), 2);
        assert_eq!(statement.accounts[0].movements.len(), 1);
        assert!(statement.accounts[1].movements.is_empty());
    }

    #[test]
    fn test_statement_with_no_accounts_is_valid() {
        let statement = build_statement(&client(), vec![]);
        assert!(statement.accounts.is_empty());
    }

    #[test]
    fn test_wire_field_names() {
        let statement = build_statement(
            &client(),
            vec![AccountActivity {
                account_number: "225487".to_string(),
                account_type: "Corriente".to_string(),
                balance: dec!(700.00),
                movements: vec![movement(dec!(600), dec!(700))],
            }],
        );

        let json = serde_json::to_value(&statement).unwrap();
        assert_eq!(json["clienteId"], 4);
        assert_eq!(json["clienteNombre"], "Marianela Montalvo");
        let cuenta = &json["cuentas"][0];
        assert_eq!(cuenta["numeroCuenta"], "225487");
        assert_eq!(cuenta["tipoCuenta"], "Corriente");
        // Decimal serializes as a string to keep exact precision.
        assert_eq!(cuenta["saldoInicial"], "700.00");
        let movimiento = &cuenta["movimientos"][0];
        assert!(movimiento["fecha"].is_string());
        assert_eq!(movimiento["tipoMovimiento"], "Deposit of 600");
        assert_eq!(movimiento["valor"], "600");
        assert_eq!(movimiento["saldo"], "700");
    }
}
