use crate::{
    api::{attendance, stats, worker},
    config::Config,
};
use actix_web::web;

pub fn configure(cfg: &mut web::ServiceConfig, config: &Config) {
    cfg.service(
        web::scope(&config.api_prefix)
            .service(
                web::scope("/workers")
                    // /workers
                    .service(
                        web::resource("")
                            .route(web::post().to(worker::create_worker))
                            .route(web::get().to(worker::list_workers)),
                    )
                    // /workers/{id}
                    .service(
                        web::resource("/{id}")
                            .route(web::put().to(worker::update_worker))
                            .route(web::get().to(worker::get_worker))
                            .route(web::delete().to(worker::delete_worker)),
                    )
                    // /workers/{id}/attendance
                    .service(
                        web::resource("/{id}/attendance")
                            .route(web::get().to(worker::worker_attendance)),
                    )
                    // /workers/{id}/stats/monthly
                    .service(
                        web::resource("/{id}/stats/monthly")
                            .route(web::get().to(worker::monthly_stats)),
                    ),
            )
            .service(
                web::scope("/attendance")
                    // /attendance
                    .service(
                        web::resource("")
                            .route(web::post().to(attendance::record_attendance))
                            .route(web::get().to(attendance::attendance_by_date)),
                    )
                    .service(
                        web::resource("/check-in").route(web::post().to(attendance::check_in)),
                    )
                    .service(
                        web::resource("/check-out").route(web::post().to(attendance::check_out)),
                    )
                    .service(
                        web::resource("/absent").route(web::post().to(attendance::mark_absent)),
                    ),
            )
            .service(
                web::scope("/stats")
                    .service(web::resource("/today").route(web::get().to(stats::today_stats)))
                    .service(
                        web::resource("/weekly").route(web::get().to(stats::weekly_summary)),
                    ),
            ),
    );
}
