//! Statement report route for the ledger service.

use axum::{
    Json, Router,
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
};
use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use tracing::info;

use crate::error::ApiError;
use crate::LedgerState;
use neobank_core::report::{
    AccountActivity, ClientInfo, MovementLine, ReportWindow, build_statement,
};
use neobank_db::repositories::account::AccountRepository;
use neobank_db::repositories::movement::MovementRepository;

/// Creates the report routes.
pub fn routes() -> Router<LedgerState> {
    Router::new().route("/api/reportes", get(account_statement))
}

/// Query parameters for the statement report.
#[derive(Debug, Deserialize)]
pub struct ReportParams {
    /// Client to report on.
    #[serde(rename = "clienteId")]
    pub client_id: i64,
    /// First day of the window, `YYYY-MM-DD`.
    #[serde(rename = "fechaInicio")]
    pub start: NaiveDate,
    /// Last day of the window (inclusive), `YYYY-MM-DD`.
    #[serde(rename = "fechaFin")]
    pub end: NaiveDate,
}

/// GET `/api/reportes` - Account statement for one client over a date range.
///
/// The client comes from the clients service, the accounts and movements
/// from the local ledger. Every account the client owns appears in the
/// statement, with or without movements in the window.
async fn account_statement(
    State(state): State<LedgerState>,
    Query(params): Query<ReportParams>,
) -> Result<Response, ApiError> {
    let window = ReportWindow::new(params.start, params.end);
    let client = state.clients.fetch_client(params.client_id).await?;

    let account_repo = AccountRepository::new((*state.db).clone());
    let movement_repo = MovementRepository::new((*state.db).clone());

    let accounts = account_repo.list_by_client(client.id).await?;
    let mut activity = Vec::with_capacity(accounts.len());
    for account in accounts {
        let movements = movement_repo
            .list_for_account_in_window(&account.account_number, &window)
            .await?;
        activity.push(AccountActivity {
            account_number: account.account_number,
            account_type: account.account_type,
            balance: account.balance,
            movements: movements
                .into_iter()
                .map(|m| MovementLine {
                    occurred_at: m.occurred_at.with_timezone(&Utc),
                    description: m.description,
                    amount: m.amount,
                    balance: m.balance,
                })
                .collect(),
        });
    }

    let statement = build_statement(
        &ClientInfo {
            id: client.id,
            name: client.name,
        },
        activity,
    );

    info!(
        client_id = params.client_id,
        start = %window.start(),
        end = %window.end(),
        accounts = statement.accounts.len(),
        "statement built"
    );
    Ok((StatusCode::OK, Json(statement)).into_response())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_params_parse_dates_and_wire_names() {
        let params: ReportParams = serde_urlencoded::from_str(
            "clienteId=4&fechaInicio=2024-02-08&fechaFin=2024-03-10",
        )
        .unwrap();

        assert_eq!(params.client_id, 4);
        assert_eq!(params.start, NaiveDate::from_ymd_opt(2024, 2, 8).unwrap());
        assert_eq!(params.end, NaiveDate::from_ymd_opt(2024, 3, 10).unwrap());
    }

    #[test]
    fn test_params_reject_malformed_dates() {
        let result: Result<ReportParams, _> =
            serde_urlencoded::from_str("clienteId=4&fechaInicio=08-02-2024&fechaFin=2024-03-10");
        assert!(result.is_err());
    }
}
