use actix_web::web;

pub mod assignments;
pub mod bookings;
pub mod catalog;
pub mod directory;
pub mod stats;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(bookings::configure)
            .configure(assignments::configure)
            .configure(stats::configure)
            .configure(catalog::configure)
            .configure(directory::configure),
    );
}
