use actix_web::{get, put, web, HttpResponse};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};
use validator::Validate;

use crate::errors::{ApiError, ApiResult};
use crate::middleware::AuthUser;
use crate::models::dto::{MeResponse, UpdateProfileRequest};
use crate::models::role::Role;
use crate::models::{company, student};
use crate::services::policy::{self, Action};
use crate::services::stats_service::StatsService;

/// GET /profile - Son propre profil (PROTÉGÉE)
#[get("")]
pub async fn get_profile(
    db: web::Data<DatabaseConnection>,
    auth_user: AuthUser,
) -> ApiResult<HttpResponse> {
    if !policy::can(
        auth_user.role,
        auth_user.id,
        &Action::ViewProfile { owner_role: auth_user.role, owner_id: auth_user.id },
    ) {
        return Err(ApiError::Forbidden(
            "You cannot view this profile".to_string(),
        ));
    }

    match auth_user.role {
        // Les admins n'ont pas d'attributs de profil au-delà de l'identité
        Role::Admin => Ok(HttpResponse::Ok().json(MeResponse {
            id: auth_user.id,
            email: auth_user.email,
            role: auth_user.role,
        })),
        Role::Company => {
            let row = company::Entity::find_by_id(auth_user.id)
                .one(db.get_ref())
                .await?
                .ok_or_else(|| ApiError::NotFound("Account not found".to_string()))?;
            Ok(HttpResponse::Ok().json(row))
        }
        Role::Student => {
            let row = student::Entity::find_by_id(auth_user.id)
                .one(db.get_ref())
                .await?
                .ok_or_else(|| ApiError::NotFound("Account not found".to_string()))?;
            Ok(HttpResponse::Ok().json(row))
        }
    }
}

/// PUT /profile - Modifier son propre profil (PROTÉGÉE)
/// Champs appliqués selon le rôle; l'email et le mot de passe passent par
/// les routes auth dédiées
#[put("")]
pub async fn update_profile(
    db: web::Data<DatabaseConnection>,
    auth_user: AuthUser,
    body: web::Json<UpdateProfileRequest>,
) -> ApiResult<HttpResponse> {
    body.validate()?;

    if !policy::can(
        auth_user.role,
        auth_user.id,
        &Action::UpdateProfile { owner_role: auth_user.role, owner_id: auth_user.id },
    ) {
        return Err(ApiError::Forbidden(
            "This account has no editable profile".to_string(),
        ));
    }

    match auth_user.role {
        // Déjà refusé par la garde: les admins n'ont pas de profil éditable
        Role::Admin => Err(ApiError::Forbidden(
            "This account has no editable profile".to_string(),
        )),
        Role::Company => {
            let row = company::Entity::find_by_id(auth_user.id)
                .one(db.get_ref())
                .await?
                .ok_or_else(|| ApiError::NotFound("Account not found".to_string()))?;

            let mut active: company::ActiveModel = row.into();
            if let Some(name) = &body.name {
                active.name = Set(name.clone());
            }
            if let Some(sector) = &body.sector {
                active.sector = Set(Some(sector.clone()));
            }
            let updated = active.update(db.get_ref()).await?;
            Ok(HttpResponse::Ok().json(updated))
        }
        Role::Student => {
            let row = student::Entity::find_by_id(auth_user.id)
                .one(db.get_ref())
                .await?
                .ok_or_else(|| ApiError::NotFound("Account not found".to_string()))?;

            let mut active: student::ActiveModel = row.into();
            if let Some(name) = &body.name {
                active.name = Set(name.clone());
            }
            if let Some(niveau) = &body.niveau_etude {
                active.niveau_etude = Set(Some(niveau.clone()));
            }
            if let Some(groupe) = &body.groupe {
                active.groupe = Set(Some(groupe.clone()));
            }
            if let Some(cv_path) = &body.cv_path {
                active.cv_path = Set(Some(cv_path.clone()));
            }
            let updated = active.update(db.get_ref()).await?;
            Ok(HttpResponse::Ok().json(updated))
        }
    }
}

/// GET /profile/stats - Ses propres statistiques (PROTÉGÉE)
#[get("/stats")]
pub async fn my_stats(
    db: web::Data<DatabaseConnection>,
    auth_user: AuthUser,
) -> ApiResult<HttpResponse> {
    match auth_user.role {
        Role::Admin => {
            let stats = StatsService::admin_stats(db.get_ref(), &auth_user).await?;
            Ok(HttpResponse::Ok().json(stats))
        }
        Role::Company => {
            let stats = StatsService::company_stats(db.get_ref(), &auth_user).await?;
            Ok(HttpResponse::Ok().json(stats))
        }
        Role::Student => {
            let stats = StatsService::student_stats(db.get_ref(), &auth_user).await?;
            Ok(HttpResponse::Ok().json(stats))
        }
    }
}

pub fn profile_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/profile")
            .service(my_stats)
            .service(get_profile)
            .service(update_profile),
    );
}
