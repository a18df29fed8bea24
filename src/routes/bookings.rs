use actix_web::web;

use crate::handlers::{availability, bookings};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/bookings")
            .route("", web::post().to(bookings::create_booking))
            .route("", web::get().to(bookings::get_bookings))
            .route("/{id}", web::get().to(bookings::get_booking))
            .route("/{id}/activity", web::get().to(bookings::get_booking_activity))
            .route("/{id}/cancel", web::post().to(bookings::cancel_booking))
            .route("/{id}/status", web::post().to(bookings::update_booking_status)),
    )
    .route("/availability", web::get().to(availability::get_availability));
}
