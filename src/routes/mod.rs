pub mod admin;
pub mod applications;
pub mod auth;
pub mod health;
pub mod offers;
pub mod profile;

use actix_web::web;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .service(health::health_check)
            .configure(auth::auth_routes)
            .configure(offers::offer_routes)
            .configure(applications::application_routes)
            .configure(profile::profile_routes)
            .configure(admin::admin_routes),
    );
}
