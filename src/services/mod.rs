pub mod application_service;
pub mod auth_service;
pub mod offer_service;
pub mod policy;
pub mod stats_service;
