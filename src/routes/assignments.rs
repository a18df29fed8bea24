use actix_web::web;

use crate::handlers::assignments;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/assignments")
            .route("", web::post().to(assignments::create_assignment))
            .route(
                "/assignable",
                web::get().to(assignments::get_assignable_staff),
            )
            .route(
                "/booking/{booking_id}",
                web::get().to(assignments::get_booking_assignments),
            )
            .route(
                "/{booking_id}/{staff_id}",
                web::delete().to(assignments::delete_assignment),
            ),
    );
}
