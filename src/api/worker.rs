use actix_web::{HttpResponse, Responder, web};
use chrono::NaiveDate;
use serde::Deserialize;
use serde_json::json;
use tracing::info;
use utoipa::ToSchema;

use crate::model::attendance::AttendanceRecord;
use crate::model::stats::MonthlyStats;
use crate::model::worker::{NewWorker, Worker, WorkerPatch};
use crate::service::AttendanceService;

#[derive(Debug, Deserialize, ToSchema)]
pub struct WorkerQuery {
    /// Case-insensitive match on name or role
    pub search: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct DateRange {
    #[schema(example = "2024-01-01", value_type = String, format = "date")]
    pub start: NaiveDate,
    #[schema(example = "2024-01-31", value_type = String, format = "date")]
    pub end: NaiveDate,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct MonthQuery {
    #[schema(example = 2024)]
    pub year: i32,
    #[schema(example = 1)]
    pub month: u32,
}

/// Create Worker
#[utoipa::path(
    post,
    path = "/api/workers",
    request_body = NewWorker,
    responses(
        (status = 201, description = "Worker created", body = Object, example = json!({
            "id": 1
        })),
        (status = 400, description = "Name or role missing", body = Object, example = json!({
            "message": "validation failed: name must not be empty"
        })),
        (status = 500, description = "Internal server error")
    ),
    tag = "Worker"
)]
pub async fn create_worker(
    service: web::Data<AttendanceService>,
    payload: web::Json<NewWorker>,
) -> actix_web::Result<impl Responder> {
    let id = service.store().add_worker(payload.into_inner()).await?;

    info!(id, "Worker created");
    Ok(HttpResponse::Created().json(json!({ "id": id })))
}

#[utoipa::path(
    get,
    path = "/api/workers",
    params(
        ("search", Query, description = "Search by name or role")
    ),
    responses(
        (status = 200, description = "Workers ordered by name", body = [Worker])
    ),
    tag = "Worker"
)]
pub async fn list_workers(
    service: web::Data<AttendanceService>,
    query: web::Query<WorkerQuery>,
) -> actix_web::Result<impl Responder> {
    let workers: Vec<Worker> = match query.search.as_deref() {
        Some(search) if !search.is_empty() => service.store().search_workers(search).await?,
        _ => service.store().get_all_workers().await?,
    };

    Ok(HttpResponse::Ok().json(workers))
}

/// Get Worker by ID
#[utoipa::path(
    get,
    path = "/api/workers/{worker_id}",
    params(
        ("worker_id", Path, description = "Worker ID")
    ),
    responses(
        (status = 200, description = "Worker found", body = Worker),
        (status = 404, description = "Worker not found", body = Object, example = json!({
            "message": "Worker not found"
        }))
    ),
    tag = "Worker"
)]
pub async fn get_worker(
    service: web::Data<AttendanceService>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    let worker_id = path.into_inner();

    match service.store().get_worker_by_id(worker_id).await? {
        Some(worker) => Ok(HttpResponse::Ok().json(worker)),
        None => Ok(HttpResponse::NotFound().json(json!({
            "message": "Worker not found"
        }))),
    }
}

/// Update Worker
#[utoipa::path(
    put,
    path = "/api/workers/{worker_id}",
    params(
        ("worker_id", Path, description = "Worker ID")
    ),
    request_body = WorkerPatch,
    responses(
        (status = 200, description = "Worker updated successfully", body = Object, example = json!({
            "message": "Worker updated successfully"
        })),
        (status = 400, description = "Empty name or role, or negative rate"),
        (status = 404, description = "Worker not found")
    ),
    tag = "Worker"
)]
pub async fn update_worker(
    service: web::Data<AttendanceService>,
    path: web::Path<i64>,
    body: web::Json<WorkerPatch>,
) -> actix_web::Result<impl Responder> {
    let worker_id = path.into_inner();

    service
        .store()
        .update_worker(worker_id, body.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(json!({
        "message": "Worker updated successfully"
    })))
}

/// Delete Worker and its attendance records
#[utoipa::path(
    delete,
    path = "/api/workers/{worker_id}",
    params(
        ("worker_id", Path, description = "Worker ID")
    ),
    responses(
        (status = 200, description = "Successfully deleted", body = Object, example = json!({
            "message": "Successfully deleted"
        }))
    ),
    tag = "Worker"
)]
pub async fn delete_worker(
    service: web::Data<AttendanceService>,
    path: web::Path<i64>,
) -> actix_web::Result<impl Responder> {
    let worker_id = path.into_inner();

    service.store().delete_worker(worker_id).await?;

    info!(worker_id, "Worker deleted");
    Ok(HttpResponse::Ok().json(json!({
        "message": "Successfully deleted"
    })))
}

#[utoipa::path(
    get,
    path = "/api/workers/{worker_id}/attendance",
    params(
        ("worker_id", Path, description = "Worker ID"),
        ("start", Query, description = "First date, inclusive"),
        ("end", Query, description = "Last date, inclusive")
    ),
    responses(
        (status = 200, description = "Records, newest first", body = [AttendanceRecord])
    ),
    tag = "Worker"
)]
pub async fn worker_attendance(
    service: web::Data<AttendanceService>,
    path: web::Path<i64>,
    query: web::Query<DateRange>,
) -> actix_web::Result<impl Responder> {
    let worker_id = path.into_inner();

    let records: Vec<AttendanceRecord> = service
        .get_worker_attendance(worker_id, query.start, query.end)
        .await?;

    Ok(HttpResponse::Ok().json(records))
}

#[utoipa::path(
    get,
    path = "/api/workers/{worker_id}/stats/monthly",
    params(
        ("worker_id", Path, description = "Worker ID"),
        ("year", Query, description = "Calendar year"),
        ("month", Query, description = "Month, 1 to 12")
    ),
    responses(
        (status = 200, description = "Status breakdown for the month", body = MonthlyStats),
        (status = 400, description = "Invalid month")
    ),
    tag = "Worker"
)]
pub async fn monthly_stats(
    service: web::Data<AttendanceService>,
    path: web::Path<i64>,
    query: web::Query<MonthQuery>,
) -> actix_web::Result<impl Responder> {
    let worker_id = path.into_inner();

    let stats: MonthlyStats = service
        .get_monthly_attendance_stats(worker_id, query.year, query.month)
        .await?;

    Ok(HttpResponse::Ok().json(stats))
}
