// Configuration globale de l'application
//
// Construite UNE SEULE FOIS au démarrage depuis les variables d'environnement
// (.env via dotenv), puis partagée aux composants via web::Data.
// Aucun composant ne lit l'environnement directement.

use std::env;

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub bind_addr: String,
    /// Secret pour signer les access tokens (courte durée)
    pub access_secret: String,
    /// Secret pour signer les refresh tokens (longue durée)
    /// Distinct de access_secret: la fuite de l'un ne compromet pas l'autre
    pub refresh_secret: String,
    pub access_ttl_secs: i64,
    pub refresh_ttl_secs: i64,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let database_url = env::var("DATABASE_URL")
            .expect("DATABASE_URL must be set in .env file");

        let bind_addr = env::var("BIND_ADDR")
            .unwrap_or_else(|_| "127.0.0.1:8080".to_string());

        let access_secret = secret_or_warn("JWT_ACCESS_SECRET", "default-insecure-access-key");
        let refresh_secret = secret_or_warn("JWT_REFRESH_SECRET", "default-insecure-refresh-key");

        // Durées de vie: access court (15 min), refresh long (7 jours)
        let access_ttl_secs = env_i64("JWT_ACCESS_TTL_SECS", 15 * 60);
        let refresh_ttl_secs = env_i64("JWT_REFRESH_TTL_SECS", 7 * 24 * 3600);

        AppConfig {
            database_url,
            bind_addr,
            access_secret,
            refresh_secret,
            access_ttl_secs,
            refresh_ttl_secs,
        }
    }
}

fn secret_or_warn(key: &str, fallback: &str) -> String {
    env::var(key).unwrap_or_else(|_| {
        eprintln!("⚠️  WARNING: {} not found in .env, using default (INSECURE)", key);
        fallback.to_string()
    })
}

fn env_i64(key: &str, default: i64) -> i64 {
    env::var(key)
        .ok()
        .and_then(|v| v.parse::<i64>().ok())
        .unwrap_or(default)
}
