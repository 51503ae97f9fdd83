use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use tracing::error;
use uuid::Uuid;

use crate::{
    database::PostgresConnection,
    http_err::{ApiError, ApiResponse, MessageRep},
    server::AppState,
};

use super::{
    commands::{PostgresCommands, TransactionCommands, UpdateTransactionError},
    domain,
    queries::{PostgresQueries, TransactionQueries},
};

pub mod reps;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/accounts/:account_id/transactions",
            get(list_transactions).post(create_transaction),
        )
        .route(
            "/transactions/:transaction_id",
            put(update_transaction).delete(delete_transaction),
        )
}

async fn list_transactions(
    State(db): State<PostgresConnection>,
    Path(account_id): Path<Uuid>,
) -> ApiResponse<Json<Vec<reps::Transaction>>> {
    let queries = PostgresQueries(db);

    match queries.list_for_account(account_id).await {
        Ok(transactions) => Ok(Json(
            transactions.iter().map(reps::Transaction::from).collect(),
        )),
        Err(error) => {
            error!(?error, %account_id, "Failed to list transactions.");

            Err(ApiError::InternalServerError)
        }
    }
}

async fn create_transaction(
    State(db): State<PostgresConnection>,
    Path(account_id): Path<Uuid>,
    Json(data): Json<domain::TransactionData>,
) -> ApiResponse<(StatusCode, Json<reps::Transaction>)> {
    let transaction = domain::NewTransaction::from_data(account_id, data)
        .map_err(|error| ApiError::BadRequest(error.to_string()))?;

    let commands = PostgresCommands(&db);

    match commands.persist_transaction(transaction).await {
        Ok(persisted) => Ok((
            StatusCode::CREATED,
            Json(reps::Transaction::from(&persisted)),
        )),
        Err(error) => {
            error!(?error, "Failed to persist transaction.");

            Err(ApiError::InternalServerError)
        }
    }
}

async fn update_transaction(
    State(db): State<PostgresConnection>,
    Path(transaction_id): Path<Uuid>,
    Json(data): Json<domain::TransactionData>,
) -> ApiResponse<Json<reps::Transaction>> {
    let update = domain::TransactionUpdate::from_data(data)
        .map_err(|error| ApiError::BadRequest(error.to_string()))?;

    let commands = PostgresCommands(&db);

    match commands.update_transaction(transaction_id, update).await {
        Ok(updated) => Ok(Json(reps::Transaction::from(&updated))),
        Err(UpdateTransactionError::TransactionNotFound) => Err(ApiError::NotFound(
            "No transaction found with the provided ID.".to_owned(),
        )),
        Err(error) => {
            error!(?error, %transaction_id, "Failed to update transaction.");

            Err(ApiError::InternalServerError)
        }
    }
}

async fn delete_transaction(
    State(app_state): State<AppState>,
    Path(transaction_id): Path<Uuid>,
) -> ApiResponse<Json<MessageRep>> {
    let db = PostgresConnection::from_ref(&app_state);
    let commands = PostgresCommands(&db);

    match commands.delete_transaction(transaction_id).await {
        Ok(true) => Ok(Json(MessageRep {
            message: "Transaction deleted.".to_owned(),
        })),
        Ok(false) => Err(ApiError::NotFound(
            "No transaction found with the provided ID.".to_owned(),
        )),
        Err(error) => {
            error!(?error, %transaction_id, "Failed to delete transaction.");

            Err(ApiError::InternalServerError)
        }
    }
}
