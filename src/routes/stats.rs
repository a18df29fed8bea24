use actix_web::web;

use crate::handlers::stats;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/stats")
            .route("/services/{id}", web::get().to(stats::get_service_stats))
            .route("/owners/{id}", web::get().to(stats::get_owner_stats)),
    );
}
