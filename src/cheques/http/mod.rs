use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use tracing::error;

use crate::{
    database::PostgresConnection,
    http_err::{ApiError, ApiResponse, MessageRep},
    server::AppState,
};

use super::{
    commands::{ChequeCommands, ChequeMutationError, PostgresCommands},
    domain,
    queries::{ChequeQueries, PostgresQueries},
};

pub mod reps;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/cheques", get(list_cheques).post(create_cheque))
        .route(
            "/cheques/:cheque_number",
            get(get_cheque)
                .put(update_cheque)
                .patch(update_cheque)
                .delete(delete_cheque),
        )
        .route(
            "/cheques/:cheque_number/status",
            put(set_cheque_status).patch(set_cheque_status),
        )
        .route(
            "/cheques/:cheque_number/details",
            get(get_cheque_details)
                .post(save_cheque_details)
                .patch(patch_cheque_details),
        )
}

async fn list_cheques(
    State(db): State<PostgresConnection>,
) -> ApiResponse<Json<Vec<reps::Cheque>>> {
    let queries = PostgresQueries(db);

    match queries.list_cheques().await {
        Ok(cheques) => Ok(Json(cheques.iter().map(reps::Cheque::from).collect())),
        Err(error) => {
            error!(?error, "Failed to list cheques.");

            Err(ApiError::InternalServerError)
        }
    }
}

async fn get_cheque(
    State(db): State<PostgresConnection>,
    Path(cheque_number): Path<String>,
) -> ApiResponse<Json<reps::Cheque>> {
    let queries = PostgresQueries(db);

    match queries.get_cheque(&cheque_number).await {
        Ok(Some(cheque)) => Ok(Json(reps::Cheque::from(&cheque))),
        Ok(None) => Err(ApiError::NotFound("Cheque not found.".to_owned())),
        Err(error) => {
            error!(?error, %cheque_number, "Failed to query for cheque.");

            Err(ApiError::InternalServerError)
        }
    }
}

async fn create_cheque(
    State(db): State<PostgresConnection>,
    Json(data): Json<domain::ChequeData>,
) -> ApiResponse<(StatusCode, Json<reps::Cheque>)> {
    let cheque = domain::NewCheque::from_data(data)
        .map_err(|error| ApiError::BadRequest(error.to_string()))?;

    let commands = PostgresCommands(&db);

    match commands.create_cheque(cheque).await {
        Ok(persisted) => Ok((StatusCode::CREATED, Json(reps::Cheque::from(&persisted)))),
        Err(error) => {
            error!(?error, "Failed to persist cheque.");

            Err(ApiError::InternalServerError)
        }
    }
}

async fn update_cheque(
    State(db): State<PostgresConnection>,
    Path(cheque_number): Path<String>,
    Json(data): Json<domain::ChequeData>,
) -> ApiResponse<Json<reps::Cheque>> {
    let update = domain::ChequeUpdate::from_data(data)
        .map_err(|error| ApiError::BadRequest(error.to_string()))?;

    let commands = PostgresCommands(&db);

    match commands.update_cheque(&cheque_number, update).await {
        Ok(updated) => Ok(Json(reps::Cheque::from(&updated))),
        Err(ChequeMutationError::NotFound) => {
            Err(ApiError::NotFound("Cheque not found.".to_owned()))
        }
        Err(error) => {
            error!(?error, %cheque_number, "Failed to update cheque.");

            Err(ApiError::InternalServerError)
        }
    }
}

async fn set_cheque_status(
    State(db): State<PostgresConnection>,
    Path(cheque_number): Path<String>,
    Json(update): Json<reps::StatusUpdate>,
) -> ApiResponse<Json<reps::Cheque>> {
    let status = update
        .status
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ApiError::BadRequest("A status value is required.".to_owned()))?;

    let commands = PostgresCommands(&db);

    match commands.set_status(&cheque_number, status).await {
        Ok(updated) => Ok(Json(reps::Cheque::from(&updated))),
        Err(ChequeMutationError::NotFound) => {
            Err(ApiError::NotFound("Cheque not found.".to_owned()))
        }
        Err(error) => {
            error!(?error, %cheque_number, "Failed to update cheque status.");

            Err(ApiError::InternalServerError)
        }
    }
}

async fn delete_cheque(
    State(app_state): State<AppState>,
    Path(cheque_number): Path<String>,
) -> ApiResponse<Json<MessageRep>> {
    let db = PostgresConnection::from_ref(&app_state);
    let commands = PostgresCommands(&db);

    match commands.delete_cheque(&cheque_number).await {
        Ok(true) => Ok(Json(MessageRep {
            message: "Cheque deleted.".to_owned(),
        })),
        Ok(false) => Err(ApiError::NotFound("Cheque not found.".to_owned())),
        Err(error) => {
            error!(?error, %cheque_number, "Failed to delete cheque.");

            Err(ApiError::InternalServerError)
        }
    }
}

async fn get_cheque_details(
    State(db): State<PostgresConnection>,
    Path(cheque_number): Path<String>,
) -> ApiResponse<Json<reps::ChequeDetails>> {
    let queries = PostgresQueries(db);

    match queries.get_details(&cheque_number).await {
        Ok(Some(details)) => Ok(Json(reps::ChequeDetails::from(&details))),
        Ok(None) => Err(ApiError::NotFound(
            "No details recorded for that cheque.".to_owned(),
        )),
        Err(error) => {
            error!(?error, %cheque_number, "Failed to query for cheque details.");

            Err(ApiError::InternalServerError)
        }
    }
}

async fn save_cheque_details(
    State(db): State<PostgresConnection>,
    Path(cheque_number): Path<String>,
    Json(data): Json<domain::ChequeDetailsData>,
) -> ApiResponse<Json<reps::ChequeDetails>> {
    let details = domain::NewChequeDetails::from_data(data)
        .map_err(|error| ApiError::BadRequest(error.to_string()))?;

    let queries = PostgresQueries(db.clone());
    if !cheque_exists_or_500(&queries, &cheque_number).await? {
        return Err(ApiError::NotFound("Cheque not found.".to_owned()));
    }

    let commands = PostgresCommands(&db);

    match commands.upsert_details(&cheque_number, details).await {
        Ok(saved) => Ok(Json(reps::ChequeDetails::from(&saved))),
        Err(error) => {
            error!(?error, %cheque_number, "Failed to save cheque details.");

            Err(ApiError::InternalServerError)
        }
    }
}

async fn patch_cheque_details(
    State(db): State<PostgresConnection>,
    Path(cheque_number): Path<String>,
    Json(patch): Json<domain::ChequeDetailsPatch>,
) -> ApiResponse<Json<reps::ChequeDetails>> {
    if patch.is_empty() {
        return Err(ApiError::BadRequest(
            "At least one updatable field is required.".to_owned(),
        ));
    }

    let patch = patch
        .validated()
        .map_err(|error| ApiError::BadRequest(error.to_string()))?;

    let queries = PostgresQueries(db.clone());
    if !cheque_exists_or_500(&queries, &cheque_number).await? {
        return Err(ApiError::NotFound("Cheque not found.".to_owned()));
    }

    let commands = PostgresCommands(&db);

    match commands.patch_details(&cheque_number, patch).await {
        Ok(updated) => Ok(Json(reps::ChequeDetails::from(&updated))),
        Err(ChequeMutationError::NotFound) => Err(ApiError::NotFound(
            "No details recorded for that cheque.".to_owned(),
        )),
        Err(error) => {
            error!(?error, %cheque_number, "Failed to patch cheque details.");

            Err(ApiError::InternalServerError)
        }
    }
}

async fn cheque_exists_or_500(
    queries: &PostgresQueries,
    cheque_number: &str,
) -> Result<bool, ApiError> {
    queries.cheque_exists(cheque_number).await.map_err(|error| {
        error!(?error, %cheque_number, "Failed to check for cheque existence.");

        ApiError::InternalServerError
    })
}
