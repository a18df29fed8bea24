use actix_web::web;

use crate::handlers::catalog;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/services")
            .route("", web::post().to(catalog::create_service))
            .route("", web::get().to(catalog::get_services))
            .route("/{id}", web::get().to(catalog::get_service)),
    );
}
