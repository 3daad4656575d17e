use actix_web::{dev::Payload, web, Error, FromRequest, HttpRequest, HttpResponse};
use futures::future::{ready, Ready};
use serde::Serialize;

use crate::config::AppConfig;
use crate::models::role::Role;
use crate::utils::jwt::{self, TokenError};

/// Identité authentifiée extraite de l'access token
/// Utilisée comme extracteur dans les routes protégées
#[derive(Debug, Clone, Serialize)]
pub struct AuthUser {
    pub id: i32,
    pub email: String,
    pub role: Role,
}

fn unauthorized(message: &str) -> Error {
    let response = HttpResponse::Unauthorized().json(serde_json::json!({
        "success": false,
        "message": message,
    }));
    actix_web::error::InternalError::from_response("", response).into()
}

/// Implémentation de FromRequest pour AuthUser
/// Permet à Actix-Web d'extraire automatiquement l'identité des requêtes
impl FromRequest for AuthUser {
    type Error = Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        // 1. Extraire le header Authorization
        let auth_header = match req.headers().get("Authorization") {
            Some(header) => header,
            None => return ready(Err(unauthorized("Missing Authorization header"))),
        };

        let auth_str = match auth_header.to_str() {
            Ok(s) => s,
            Err(_) => return ready(Err(unauthorized("Invalid Authorization header"))),
        };

        // 2. Extraire le token (format: "Bearer <token>")
        let token = match auth_str.strip_prefix("Bearer ") {
            Some(t) => t,
            None => {
                return ready(Err(unauthorized(
                    "Invalid Authorization format (expected: Bearer <token>)",
                )))
            }
        };

        // 3. Récupérer le secret access depuis la config partagée
        let config = match req.app_data::<web::Data<AppConfig>>() {
            Some(config) => config,
            None => return ready(Err(unauthorized("Server configuration missing"))),
        };

        // 4. Vérifier l'access token
        let claims = match jwt::verify_token(token, &config.access_secret) {
            Ok(claims) => claims,
            Err(TokenError::Expired) => return ready(Err(unauthorized("Token expired"))),
            Err(TokenError::Invalid) => return ready(Err(unauthorized("Invalid token"))),
        };

        ready(Ok(AuthUser {
            id: claims.sub,
            email: claims.email,
            role: claims.role,
        }))
    }
}
