mod common;

use actix_web::http::StatusCode;
use actix_web::{App, test, web::Data};
use attendance_tracker::config::Config;
use attendance_tracker::{AttendanceService, Store, routes};
use common::open_service;
use serde_json::{Value, json};

fn config() -> Config {
    Config {
        database_url: "sqlite::memory:".to_string(),
        server_addr: "127.0.0.1:0".to_string(),
        api_prefix: "/api".to_string(),
        log_dir: "logs".to_string(),
    }
}

macro_rules! app {
    ($service:expr) => {{
        let config = config();
        test::init_service(
            App::new()
                .app_data(Data::new($service))
                .configure(|cfg| routes::configure(cfg, &config)),
        )
        .await
    }};
}

#[actix_web::test]
async fn worker_lifecycle_over_http() {
    let app = app!(open_service("2024-01-15T12:00:00").await);

    let req = test::TestRequest::post()
        .uri("/api/workers")
        .set_json(json!({ "name": "John Doe", "role": "Engineer", "hourlyRate": 25.0 }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let body: Value = test::read_body_json(resp).await;
    let id = body["id"].as_i64().unwrap();

    let req = test::TestRequest::put()
        .uri(&format!("/api/workers/{id}"))
        .set_json(json!({ "email": "john@example.com" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/api/workers/{id}"))
        .to_request();
    let worker: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(worker["name"], "John Doe");
    assert_eq!(worker["email"], "john@example.com");
    assert_eq!(worker["hourlyRate"], 25.0);

    let req = test::TestRequest::get()
        .uri("/api/workers?search=ENG")
        .to_request();
    let found: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(found.as_array().unwrap().len(), 1);

    let req = test::TestRequest::delete()
        .uri(&format!("/api/workers/{id}"))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::get()
        .uri(&format!("/api/workers/{id}"))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[actix_web::test]
async fn invalid_worker_is_a_bad_request() {
    let app = app!(open_service("2024-01-15T12:00:00").await);

    let req = test::TestRequest::post()
        .uri("/api/workers")
        .set_json(json!({ "name": "", "role": "X" }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: Value = test::read_body_json(resp).await;
    assert!(body["message"].as_str().unwrap().contains("name"));
}

#[actix_web::test]
async fn updating_unknown_worker_is_not_found() {
    let app = app!(open_service("2024-01-15T12:00:00").await);

    let req = test::TestRequest::put()
        .uri("/api/workers/99")
        .set_json(json!({ "role": "Cook" }))
        .to_request();

    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::NOT_FOUND
    );
}

#[actix_web::test]
async fn check_in_and_out_over_http() {
    let app = app!(open_service("2024-01-15T18:00:00").await);

    let req = test::TestRequest::post()
        .uri("/api/workers")
        .set_json(json!({ "name": "Ann", "role": "Cook" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let id = body["id"].as_i64().unwrap();

    let req = test::TestRequest::post()
        .uri("/api/attendance/check-in")
        .set_json(json!({ "workerId": id, "time": "09:00:00" }))
        .to_request();
    assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

    let req = test::TestRequest::post()
        .uri("/api/attendance/check-out")
        .set_json(json!({ "workerId": id, "time": "17:30:00" }))
        .to_request();
    let record: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(record["hoursWorked"], 8.5);
    assert_eq!(record["status"], "present");
    assert_eq!(record["checkOutTime"], "17:30:00");

    let req = test::TestRequest::get().uri("/api/attendance").to_request();
    let today: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(today[0]["workerName"], "Ann");
    assert_eq!(today[0]["date"], "2024-01-15");

    let req = test::TestRequest::get().uri("/api/stats/today").to_request();
    let stats: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(
        stats,
        json!({ "totalWorkers": 1, "presentToday": 1, "absentToday": 0, "lateToday": 0 })
    );
}

#[actix_web::test]
async fn monthly_stats_over_http() {
    let app = app!(open_service("2024-01-20T12:00:00").await);

    let req = test::TestRequest::post()
        .uri("/api/workers")
        .set_json(json!({ "name": "Ann", "role": "Cook" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, req).await;
    let id = body["id"].as_i64().unwrap();

    for (date, status) in [("2024-01-02", "present"), ("2024-01-03", "half-day")] {
        let req = test::TestRequest::post()
            .uri("/api/attendance")
            .set_json(json!({ "workerId": id, "date": date, "status": status }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);
    }

    let req = test::TestRequest::get()
        .uri(&format!("/api/workers/{id}/stats/monthly?year=2024&month=1"))
        .to_request();
    let stats: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(stats["totalDays"], 2);
    assert_eq!(stats["presentDays"], 1);
    assert_eq!(stats["halfDayDays"], 1);

    let req = test::TestRequest::get()
        .uri(&format!("/api/workers/{id}/stats/monthly?year=2024&month=0"))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        StatusCode::BAD_REQUEST
    );
}

#[actix_web::test]
async fn closed_store_is_service_unavailable() {
    let app = app!(AttendanceService::new(Store::in_memory()));

    let req = test::TestRequest::get().uri("/api/workers").to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::SERVICE_UNAVAILABLE);
}
