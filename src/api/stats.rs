use actix_web::{HttpResponse, Responder, web};

use crate::api::DateQuery;
use crate::model::stats::{TodayStats, WeeklySummary};
use crate::service::AttendanceService;

#[utoipa::path(
    get,
    path = "/api/stats/today",
    responses(
        (status = 200, description = "Worker total and today's status counts", body = TodayStats)
    ),
    tag = "Stats"
)]
pub async fn today_stats(
    service: web::Data<AttendanceService>,
) -> actix_web::Result<impl Responder> {
    let stats: TodayStats = service.get_today_attendance_stats().await?;

    Ok(HttpResponse::Ok().json(stats))
}

#[utoipa::path(
    get,
    path = "/api/stats/weekly",
    params(
        ("date", Query, description = "Any day of the week, defaults to today")
    ),
    responses(
        (status = 200, description = "Monday to Sunday totals per worker", body = WeeklySummary)
    ),
    tag = "Stats"
)]
pub async fn weekly_summary(
    service: web::Data<AttendanceService>,
    query: web::Query<DateQuery>,
) -> actix_web::Result<impl Responder> {
    let date = query.date.unwrap_or_else(|| service.today());

    let summary: WeeklySummary = service.get_weekly_summary(date).await?;

    Ok(HttpResponse::Ok().json(summary))
}
