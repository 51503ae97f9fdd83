use axum::{
    extract::{FromRef, Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use chrono::NaiveDate;
use tracing::error;
use uuid::Uuid;

use crate::{
    database::PostgresConnection,
    http_err::{ApiError, ApiResponse, MessageRep},
    server::AppState,
};

use super::{
    commands::{PostgresCommands, ReportCommands, ReportMutationError},
    domain,
    queries::{PostgresQueries, ReportQueries},
};

pub mod reps;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/daily-receivables",
            get(list_receivables).post(upsert_receivables),
        )
        .route(
            "/daily-receivables/:report_date",
            get(get_receivables)
                .put(update_receivables)
                .delete(delete_receivables),
        )
        .route("/daily-receivables/finish/:report_date", put(finish_receivables))
        .route(
            "/daily-reports",
            get(list_daily_reports).post(create_daily_report),
        )
        .route(
            "/daily-reports/:report_id",
            get(get_daily_report)
                .put(update_daily_report)
                .delete(delete_daily_report),
        )
        .route("/daily-reports/date/:report_date", get(list_daily_reports_for_date))
}

async fn list_receivables(
    State(db): State<PostgresConnection>,
) -> ApiResponse<Json<Vec<reps::ReceivablesReport>>> {
    let queries = PostgresQueries(db);

    match queries.list_receivables().await {
        Ok(reports) => Ok(Json(
            reports.iter().map(reps::ReceivablesReport::from).collect(),
        )),
        Err(error) => {
            error!(?error, "Failed to list receivables snapshots.");

            Err(ApiError::InternalServerError)
        }
    }
}

async fn get_receivables(
    State(db): State<PostgresConnection>,
    Path(report_date): Path<NaiveDate>,
) -> ApiResponse<Json<reps::ReceivablesReport>> {
    let queries = PostgresQueries(db);

    match queries.get_receivables(report_date).await {
        Ok(Some(report)) => Ok(Json(reps::ReceivablesReport::from(&report))),
        Ok(None) => Err(ApiError::NotFound(
            "No receivables report found for that date.".to_owned(),
        )),
        Err(error) => {
            error!(?error, %report_date, "Failed to query for receivables snapshot.");

            Err(ApiError::InternalServerError)
        }
    }
}

async fn upsert_receivables(
    State(db): State<PostgresConnection>,
    Json(data): Json<domain::ReceivablesData>,
) -> ApiResponse<(StatusCode, Json<reps::ReceivablesReport>)> {
    let report_date = data
        .report_date
        .ok_or_else(|| ApiError::BadRequest("A report date is required.".to_owned()))?;

    let snapshot = domain::ReceivablesSnapshot::from_data(data)
        .map_err(|error| ApiError::BadRequest(error.to_string()))?;

    let commands = PostgresCommands(&db);

    match commands.upsert_receivables(report_date, snapshot).await {
        Ok((report, created)) => {
            let status = if created {
                StatusCode::CREATED
            } else {
                StatusCode::OK
            };

            Ok((status, Json(reps::ReceivablesReport::from(&report))))
        }
        Err(error) => {
            error!(?error, %report_date, "Failed to upsert receivables snapshot.");

            Err(ApiError::InternalServerError)
        }
    }
}

async fn update_receivables(
    State(db): State<PostgresConnection>,
    Path(report_date): Path<NaiveDate>,
    Json(data): Json<domain::ReceivablesData>,
) -> ApiResponse<Json<reps::ReceivablesReport>> {
    let snapshot = domain::ReceivablesSnapshot::from_data(data)
        .map_err(|error| ApiError::BadRequest(error.to_string()))?;

    let commands = PostgresCommands(&db);

    match commands.update_receivables(report_date, snapshot).await {
        Ok(report) => Ok(Json(reps::ReceivablesReport::from(&report))),
        Err(ReportMutationError::ReportNotFound) => Err(ApiError::NotFound(
            "No receivables report found for that date.".to_owned(),
        )),
        Err(error) => {
            error!(?error, %report_date, "Failed to update receivables snapshot.");

            Err(ApiError::InternalServerError)
        }
    }
}

async fn finish_receivables(
    State(db): State<PostgresConnection>,
    Path(report_date): Path<NaiveDate>,
) -> ApiResponse<Json<reps::ReceivablesReport>> {
    let commands = PostgresCommands(&db);

    match commands.finish_receivables(report_date).await {
        Ok(report) => Ok(Json(reps::ReceivablesReport::from(&report))),
        Err(ReportMutationError::ReportNotFound) => Err(ApiError::NotFound(
            "No receivables report found for that date.".to_owned(),
        )),
        Err(error) => {
            error!(?error, %report_date, "Failed to finish receivables snapshot.");

            Err(ApiError::InternalServerError)
        }
    }
}

async fn delete_receivables(
    State(app_state): State<AppState>,
    Path(report_date): Path<NaiveDate>,
) -> ApiResponse<Json<MessageRep>> {
    let db = PostgresConnection::from_ref(&app_state);
    let commands = PostgresCommands(&db);

    match commands.delete_receivables(report_date).await {
        Ok(true) => Ok(Json(MessageRep {
            message: "Receivables report deleted.".to_owned(),
        })),
        Ok(false) => Err(ApiError::NotFound(
            "No receivables report found for that date.".to_owned(),
        )),
        Err(error) => {
            error!(?error, %report_date, "Failed to delete receivables snapshot.");

            Err(ApiError::InternalServerError)
        }
    }
}

async fn list_daily_reports(
    State(db): State<PostgresConnection>,
) -> ApiResponse<Json<Vec<reps::DailyReport>>> {
    let queries = PostgresQueries(db);

    match queries.list_daily_reports().await {
        Ok(reports) => Ok(Json(reports.iter().map(reps::DailyReport::from).collect())),
        Err(error) => {
            error!(?error, "Failed to list daily reports.");

            Err(ApiError::InternalServerError)
        }
    }
}

async fn get_daily_report(
    State(db): State<PostgresConnection>,
    Path(report_id): Path<Uuid>,
) -> ApiResponse<Json<reps::DailyReport>> {
    let queries = PostgresQueries(db);

    match queries.get_daily_report(report_id).await {
        Ok(Some(report)) => Ok(Json(reps::DailyReport::from(&report))),
        Ok(None) => Err(ApiError::NotFound(
            "No daily report found with the provided ID.".to_owned(),
        )),
        Err(error) => {
            error!(?error, %report_id, "Failed to query for daily report.");

            Err(ApiError::InternalServerError)
        }
    }
}

async fn list_daily_reports_for_date(
    State(db): State<PostgresConnection>,
    Path(report_date): Path<NaiveDate>,
) -> ApiResponse<Json<Vec<reps::DailyReport>>> {
    let queries = PostgresQueries(db);

    match queries.list_daily_reports_for_date(report_date).await {
        Ok(reports) => Ok(Json(reports.iter().map(reps::DailyReport::from).collect())),
        Err(error) => {
            error!(?error, %report_date, "Failed to list daily reports for date.");

            Err(ApiError::InternalServerError)
        }
    }
}

async fn create_daily_report(
    State(db): State<PostgresConnection>,
    Json(data): Json<domain::DailyReportData>,
) -> ApiResponse<(StatusCode, Json<reps::DailyReport>)> {
    let (input, totals) = validate_report(data)?;

    let commands = PostgresCommands(&db);

    match commands.create_daily_report(input, totals).await {
        Ok(report) => Ok((StatusCode::CREATED, Json(reps::DailyReport::from(&report)))),
        Err(error) => {
            error!(?error, "Failed to persist daily report.");

            Err(ApiError::InternalServerError)
        }
    }
}

async fn update_daily_report(
    State(db): State<PostgresConnection>,
    Path(report_id): Path<Uuid>,
    Json(data): Json<domain::DailyReportData>,
) -> ApiResponse<Json<reps::DailyReport>> {
    let (input, totals) = validate_report(data)?;

    let commands = PostgresCommands(&db);

    match commands.update_daily_report(report_id, input, totals).await {
        Ok(report) => Ok(Json(reps::DailyReport::from(&report))),
        Err(ReportMutationError::ReportNotFound) => Err(ApiError::NotFound(
            "No daily report found with the provided ID.".to_owned(),
        )),
        Err(error) => {
            error!(?error, %report_id, "Failed to update daily report.");

            Err(ApiError::InternalServerError)
        }
    }
}

async fn delete_daily_report(
    State(app_state): State<AppState>,
    Path(report_id): Path<Uuid>,
) -> ApiResponse<Json<MessageRep>> {
    let db = PostgresConnection::from_ref(&app_state);
    let commands = PostgresCommands(&db);

    match commands.delete_daily_report(report_id).await {
        Ok(true) => Ok(Json(MessageRep {
            message: "Daily report deleted.".to_owned(),
        })),
        Ok(false) => Err(ApiError::NotFound(
            "No daily report found with the provided ID.".to_owned(),
        )),
        Err(error) => {
            error!(?error, %report_id, "Failed to delete daily report.");

            Err(ApiError::InternalServerError)
        }
    }
}

/// Validate the submitted inputs and recompute the derived totals. The totals
/// are always derived server-side; only the `total_proceedings` sub-totals
/// are read as submitted.
fn validate_report(
    data: domain::DailyReportData,
) -> Result<(domain::DailyReportInput, domain::DerivedTotals), ApiError> {
    let input = domain::DailyReportInput::from_data(data)
        .map_err(|error| ApiError::BadRequest(error.to_string()))?;
    let totals = domain::DerivedTotals::compute(&input)
        .map_err(|error| ApiError::BadRequest(error.to_string()))?;

    Ok((input, totals))
}
