use actix_web::web;

use crate::handlers::directory;

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(web::scope("/users").route("", web::post().to(directory::create_user)))
        .service(
            web::scope("/staff")
                .route("", web::post().to(directory::create_staff))
                .route("", web::get().to(directory::get_staff)),
        );
}
