use actix_web::{HttpResponse, Responder, web};
use serde_json::json;

use crate::api::{AbsentRequest, ClockRequest, DateQuery};
use crate::model::attendance::{AttendanceRecord, AttendanceWithWorker, NewAttendance};
use crate::service::AttendanceService;

/// Record (or replace) a worker's attendance for one day
#[utoipa::path(
    post,
    path = "/api/attendance",
    request_body = NewAttendance,
    responses(
        (status = 200, description = "Attendance recorded", body = Object, example = json!({
            "id": 1
        })),
        (status = 400, description = "Negative hours"),
        (status = 404, description = "Worker not found")
    ),
    tag = "Attendance"
)]
pub async fn record_attendance(
    service: web::Data<AttendanceService>,
    payload: web::Json<NewAttendance>,
) -> actix_web::Result<impl Responder> {
    let id = service
        .store()
        .record_attendance(payload.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(json!({ "id": id })))
}

#[utoipa::path(
    get,
    path = "/api/attendance",
    params(
        ("date", Query, description = "Day to list, defaults to today")
    ),
    responses(
        (status = 200, description = "Records with worker name and role", body = [AttendanceWithWorker])
    ),
    tag = "Attendance"
)]
pub async fn attendance_by_date(
    service: web::Data<AttendanceService>,
    query: web::Query<DateQuery>,
) -> actix_web::Result<impl Responder> {
    let date = query.date.unwrap_or_else(|| service.today());

    let records: Vec<AttendanceWithWorker> = service.get_attendance_by_date(date).await?;

    Ok(HttpResponse::Ok().json(records))
}

/// Check-in endpoint
#[utoipa::path(
    post,
    path = "/api/attendance/check-in",
    request_body = ClockRequest,
    responses(
        (status = 200, description = "Checked in successfully", body = Object, example = json!({
            "id": 1,
            "message": "Checked in successfully"
        })),
        (status = 404, description = "Worker not found")
    ),
    tag = "Attendance"
)]
pub async fn check_in(
    service: web::Data<AttendanceService>,
    payload: web::Json<ClockRequest>,
) -> actix_web::Result<impl Responder> {
    let id = service.check_in(payload.worker_id, payload.time).await?;

    Ok(HttpResponse::Ok().json(json!({
        "id": id,
        "message": "Checked in successfully"
    })))
}

/// Check-out endpoint
#[utoipa::path(
    post,
    path = "/api/attendance/check-out",
    request_body = ClockRequest,
    responses(
        (status = 200, description = "Checked out, or nothing to close", body = AttendanceRecord),
        (status = 400, description = "Check-out before check-in")
    ),
    tag = "Attendance"
)]
pub async fn check_out(
    service: web::Data<AttendanceService>,
    payload: web::Json<ClockRequest>,
) -> actix_web::Result<impl Responder> {
    let record: Option<AttendanceRecord> =
        service.check_out(payload.worker_id, payload.time).await?;

    match record {
        Some(record) => Ok(HttpResponse::Ok().json(record)),
        None => Ok(HttpResponse::Ok().json(json!({
            "message": "No active check-in found for today"
        }))),
    }
}

#[utoipa::path(
    post,
    path = "/api/attendance/absent",
    request_body = AbsentRequest,
    responses(
        (status = 200, description = "Absence recorded", body = Object, example = json!({
            "id": 1
        })),
        (status = 404, description = "Worker not found")
    ),
    tag = "Attendance"
)]
pub async fn mark_absent(
    service: web::Data<AttendanceService>,
    payload: web::Json<AbsentRequest>,
) -> actix_web::Result<impl Responder> {
    let AbsentRequest {
        worker_id,
        date,
        notes,
    } = payload.into_inner();

    let id = service.mark_absent(worker_id, date, notes).await?;

    Ok(HttpResponse::Ok().json(json!({ "id": id })))
}
