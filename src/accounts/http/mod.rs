use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    routing::{delete, get},
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
    commands::{AccountCommands, CreateAccountError, PostgresCommands},
    domain,
    queries::{AccountQueries, PostgresQueries},
};

pub mod reps;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/accounts", get(list_accounts).post(create_account))
        .route("/accounts/:account_id", delete(delete_account))
}

async fn list_accounts(
    State(db): State<PostgresConnection>,
) -> ApiResponse<Json<Vec<reps::Account>>> {
    let queries = PostgresQueries(db);

    match queries.list_accounts().await {
        Ok(accounts) => Ok(Json(accounts.iter().map(reps::Account::from).collect())),
        Err(error) => {
            error!(?error, "Failed to list accounts.");

            Err(ApiError::InternalServerError)
        }
    }
}

async fn create_account(
    State(db): State<PostgresConnection>,
    Json(new_account): Json<reps::NewAccount>,
) -> ApiResponse<(StatusCode, Json<reps::Account>)> {
    let name = new_account.name.as_deref().unwrap_or_default();
    let balance = match crate::amounts::RawAmount::coerce_or_zero(new_account.balance.as_ref()) {
        Ok(balance) => balance,
        Err(error) => return Err(ApiError::BadRequest(error.to_string())),
    };
    let balance_type = new_account.balance_type.as_deref().unwrap_or_default();

    let account = domain::NewAccount::new(name, balance, balance_type)
        .map_err(|error| ApiError::BadRequest(error.to_string()))?;

    let commands = PostgresCommands(&db);

    match commands.create_account(account).await {
        Ok(created) => Ok((StatusCode::CREATED, Json(reps::Account::from(&created)))),
        Err(CreateAccountError::DuplicateName(name)) => Err(ApiError::BadRequest(format!(
            "An account named {:?} already exists.",
            name
        ))),
        Err(error) => {
            error!(?error, "Failed to persist account.");

            Err(ApiError::InternalServerError)
        }
    }
}

async fn delete_account(
    State(app_state): State<AppState>,
    Path(account_id): Path<Uuid>,
) -> ApiResponse<Json<MessageRep>> {
    let db = PostgresConnection::from_ref(&app_state);
    let commands = PostgresCommands(&db);

    match commands.delete_account(account_id).await {
        Ok(true) => Ok(Json(MessageRep {
            message: "Account deleted.".to_owned(),
        })),
        Ok(false) => Err(ApiError::NotFound(
            "No account found with the provided ID.".to_owned(),
        )),
        Err(error) => {
            error!(?error, %account_id, "Failed to delete account.");

            Err(ApiError::InternalServerError)
        }
    }
}
