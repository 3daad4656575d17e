// ============================================================================
// ERREURS - TAXONOMIE DU DOMAINE
// ============================================================================
//
// Description:
//   Toutes les erreurs métier passent par ApiError. Les services retournent
//   Result<T, ApiError> et la couche HTTP (ResponseError) est la SEULE
//   responsable du mapping taxonomie -> code HTTP:
//
//   - Unauthenticated -> 401 (token manquant/invalide/expiré)
//   - Forbidden       -> 403 (authentifié mais refusé par la politique)
//   - NotFound        -> 404 (ressource absente)
//   - Conflict        -> 409 (violation d'unicité, ex: double candidature)
//   - InvalidState    -> 400 (précondition d'état échouée, ex: offre fermée)
//   - Validation      -> 400 (champs invalides, TOUS les champs en erreur)
//   - Internal        -> 500 (erreur BD/interne, détail loggé côté serveur)
//
// Points d'attention:
//   - Forbidden n'est JAMAIS dégradé en NotFound quand la ressource existe
//   - Le détail des erreurs internes ne sort jamais dans la réponse HTTP
//
// ============================================================================

use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use sea_orm::{DbErr, SqlErr};
use std::fmt;
use validator::ValidationErrors;

pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug)]
pub enum ApiError {
    Unauthenticated(String),
    Forbidden(String),
    NotFound(String),
    Conflict(String),
    InvalidState(String),
    Validation(ValidationErrors),
    Internal(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Unauthenticated(msg)
            | ApiError::Forbidden(msg)
            | ApiError::NotFound(msg)
            | ApiError::Conflict(msg)
            | ApiError::InvalidState(msg) => write!(f, "{}", msg),
            ApiError::Validation(_) => write!(f, "Validation failed"),
            ApiError::Internal(_) => write!(f, "Internal server error"),
        }
    }
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::InvalidState(_) => StatusCode::BAD_REQUEST,
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        if let ApiError::Internal(detail) = self {
            // Le détail reste côté serveur
            eprintln!("❌ Internal error: {}", detail);
        }

        let body = match self {
            ApiError::Validation(errors) => serde_json::json!({
                "success": false,
                "message": "Validation failed",
                "errors": errors,
            }),
            _ => serde_json::json!({
                "success": false,
                "message": self.to_string(),
            }),
        };

        HttpResponse::build(self.status_code()).json(body)
    }
}

impl From<DbErr> for ApiError {
    fn from(err: DbErr) -> Self {
        // Violation d'unicité Postgres -> Conflict (ex: la contrainte
        // UNIQUE (student_id, offer_id) ferme la course check-then-create).
        // sql_err() classe l'erreur structurellement; le match texte reste en
        // secours pour les DbErr reconstruits sans code SQLSTATE
        if matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_))) {
            return ApiError::Conflict("Resource already exists".to_string());
        }
        let detail = err.to_string();
        if detail.contains("duplicate key value violates unique constraint") {
            ApiError::Conflict("Resource already exists".to_string())
        } else {
            ApiError::Internal(detail)
        }
    }
}

impl From<ValidationErrors> for ApiError {
    fn from(errors: ValidationErrors) -> Self {
        ApiError::Validation(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(
            ApiError::Unauthenticated("x".into()).status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            ApiError::Forbidden("x".into()).status_code(),
            StatusCode::FORBIDDEN
        );
        assert_eq!(
            ApiError::NotFound("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            ApiError::Conflict("x".into()).status_code(),
            StatusCode::CONFLICT
        );
        assert_eq!(
            ApiError::InvalidState("x".into()).status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            ApiError::Internal("boom".into()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_unique_violation_maps_to_conflict() {
        // DbErr::Custom n'a pas de SQLSTATE: ce cas passe par le match texte
        let err = DbErr::Custom(
            "error returned from database: duplicate key value violates unique constraint \
             \"applications_student_id_offer_id_key\""
                .to_string(),
        );
        match ApiError::from(err) {
            ApiError::Conflict(_) => {}
            other => panic!("expected Conflict, got {:?}", other),
        }
    }

    #[test]
    fn test_other_db_error_maps_to_internal() {
        let err = DbErr::Custom("connection reset".to_string());
        match ApiError::from(err) {
            ApiError::Internal(_) => {}
            other => panic!("expected Internal, got {:?}", other),
        }
    }

    #[test]
    fn test_internal_message_does_not_leak_detail() {
        let err = ApiError::Internal("secret connection string".to_string());
        assert_eq!(err.to_string(), "Internal server error");
    }
}
