use actix_web::{delete, get, post, put, web, HttpResponse};
use sea_orm::DatabaseConnection;

use crate::errors::ApiResult;
use crate::middleware::AuthUser;
use crate::models::dto::{ApplyRequest, DecideApplicationRequest};
use crate::services::application_service::ApplicationService;

/// POST /applications - Candidater à une offre (PROTÉGÉE, étudiant)
#[post("")]
pub async fn apply(
    db: web::Data<DatabaseConnection>,
    auth_user: AuthUser,
    body: web::Json<ApplyRequest>,
) -> ApiResult<HttpResponse> {
    let created = ApplicationService::apply(db.get_ref(), &auth_user, body.offer_id).await?;

    Ok(HttpResponse::Created().json(created))
}

/// GET /applications/mine - Mes candidatures (PROTÉGÉE, étudiant)
#[get("/mine")]
pub async fn list_my_applications(
    db: web::Data<DatabaseConnection>,
    auth_user: AuthUser,
) -> ApiResult<HttpResponse> {
    let applications = ApplicationService::list_mine(db.get_ref(), &auth_user).await?;

    Ok(HttpResponse::Ok().json(applications))
}

/// GET /applications/{id} - Détail d'une candidature
/// (PROTÉGÉE: admin, entreprise propriétaire de l'offre, ou candidat)
#[get("/{id}")]
pub async fn get_application(
    db: web::Data<DatabaseConnection>,
    auth_user: AuthUser,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let application =
        ApplicationService::get(db.get_ref(), &auth_user, path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(application))
}

/// PUT /applications/{id}/status - Accepter/refuser une candidature
/// (PROTÉGÉE, admin ou entreprise propriétaire de l'offre)
#[put("/{id}/status")]
pub async fn decide_application(
    db: web::Data<DatabaseConnection>,
    auth_user: AuthUser,
    path: web::Path<i32>,
    body: web::Json<DecideApplicationRequest>,
) -> ApiResult<HttpResponse> {
    let updated =
        ApplicationService::decide(db.get_ref(), &auth_user, path.into_inner(), body.status)
            .await?;

    Ok(HttpResponse::Ok().json(updated))
}

/// DELETE /applications/{id} - Retirer sa candidature
/// (PROTÉGÉE, étudiant candidat, status PENDING uniquement)
#[delete("/{id}")]
pub async fn withdraw_application(
    db: web::Data<DatabaseConnection>,
    auth_user: AuthUser,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    ApplicationService::withdraw(db.get_ref(), &auth_user, path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": "Application withdrawn",
    })))
}

pub fn application_routes(cfg: &mut web::ServiceConfig) {
    // "/mine" avant "/{id}"
    cfg.service(
        web::scope("/applications")
            .service(apply)
            .service(list_my_applications)
            .service(get_application)
            .service(decide_application)
            .service(withdraw_application),
    );
}
