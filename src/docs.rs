use crate::api::worker::{DateRange, MonthQuery, WorkerQuery};
use crate::api::{AbsentRequest, ClockRequest};
use crate::model::attendance::{
    AttendanceRecord, AttendanceStatus, AttendanceWithWorker, NewAttendance,
};
use crate::model::stats::{MonthlyStats, TodayStats, WeekRating, WeeklySummary, WorkerWeek};
use crate::model::worker::{NewWorker, Worker, WorkerPatch};
use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Attendance Tracker API",
        version = "0.1.0",
        description = r#"
## Attendance Tracker

Register workers, record daily check-in and check-out, and read
daily, weekly and monthly attendance statistics.

### Key Features
- **Workers**
  - Create, update, search and delete workers (deleting removes their attendance)
- **Attendance**
  - One record per worker per day; writing a day again replaces it
  - Check-in and check-out, with hours worked computed on check-out
- **Statistics**
  - Today's counts, Monday to Sunday weekly summaries, monthly breakdowns

### Response Format
- JSON, camelCase field names
- Dates as `YYYY-MM-DD`, times as `HH:MM:SS`
- Errors as `{"message": "..."}`

---
Built with **Rust**, **Actix Web**, **SQLx** (SQLite), and **Utoipa**.
"#,
    ),
    paths(
        crate::api::worker::create_worker,
        crate::api::worker::list_workers,
        crate::api::worker::get_worker,
        crate::api::worker::update_worker,
        crate::api::worker::delete_worker,
        crate::api::worker::worker_attendance,
        crate::api::worker::monthly_stats,

        crate::api::attendance::record_attendance,
        crate::api::attendance::attendance_by_date,
        crate::api::attendance::check_in,
        crate::api::attendance::check_out,
        crate::api::attendance::mark_absent,

        crate::api::stats::today_stats,
        crate::api::stats::weekly_summary
    ),
    components(
        schemas(
            Worker,
            NewWorker,
            WorkerPatch,
            WorkerQuery,
            DateRange,
            MonthQuery,
            AttendanceStatus,
            AttendanceRecord,
            AttendanceWithWorker,
            NewAttendance,
            ClockRequest,
            AbsentRequest,
            TodayStats,
            MonthlyStats,
            WeekRating,
            WorkerWeek,
            WeeklySummary
        )
    ),
    tags(
        (name = "Worker", description = "Worker management APIs"),
        (name = "Attendance", description = "Attendance recording APIs"),
        (name = "Stats", description = "Attendance statistics APIs"),
    )
)]
pub struct ApiDoc;
