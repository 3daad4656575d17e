use actix_web::{delete, get, put, web, HttpResponse};
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set};

use crate::errors::{ApiError, ApiResult};
use crate::middleware::AuthUser;
use crate::models::dto::AccountsResponse;
use crate::models::role::Role;
use crate::models::{admin, company, student};
use crate::services::policy::{self, Action};
use crate::services::stats_service::StatsService;

/// Un segment {role} non reconnu désigne une variante de compte qui n'existe
/// pas: 404, pas une erreur d'état
fn parse_role_param(raw: &str) -> ApiResult<Role> {
    Role::parse(raw).ok_or_else(|| {
        ApiError::NotFound(format!(
            "Unknown account role '{}' (expected ADMIN, COMPANY or STUDENT)",
            raw
        ))
    })
}

fn require_admin(auth_user: &AuthUser) -> ApiResult<()> {
    if !policy::can(auth_user.role, auth_user.id, &Action::ManageAccounts) {
        return Err(ApiError::Forbidden(
            "Admin privileges required".to_string(),
        ));
    }
    Ok(())
}

/// GET /admin/accounts - Lister tous les comptes (PROTÉGÉE, admin)
#[get("/accounts")]
pub async fn list_accounts(
    db: web::Data<DatabaseConnection>,
    auth_user: AuthUser,
) -> ApiResult<HttpResponse> {
    require_admin(&auth_user)?;

    let response = AccountsResponse {
        admins: admin::Entity::find().all(db.get_ref()).await?,
        companies: company::Entity::find().all(db.get_ref()).await?,
        students: student::Entity::find().all(db.get_ref()).await?,
    };

    Ok(HttpResponse::Ok().json(response))
}

/// DELETE /admin/accounts/{role}/{id} - Supprimer un compte (PROTÉGÉE, admin)
/// La suppression d'une entreprise emporte ses offres et leurs candidatures
/// (ON DELETE CASCADE côté BD)
#[delete("/accounts/{role}/{id}")]
pub async fn delete_account(
    db: web::Data<DatabaseConnection>,
    auth_user: AuthUser,
    path: web::Path<(String, i32)>,
) -> ApiResult<HttpResponse> {
    require_admin(&auth_user)?;

    let (role_raw, id) = path.into_inner();
    let role = parse_role_param(&role_raw)?;

    let deleted = match role {
        Role::Admin => admin::Entity::delete_by_id(id).exec(db.get_ref()).await?,
        Role::Company => company::Entity::delete_by_id(id).exec(db.get_ref()).await?,
        Role::Student => student::Entity::delete_by_id(id).exec(db.get_ref()).await?,
    };

    if deleted.rows_affected == 0 {
        return Err(ApiError::NotFound("Account not found".to_string()));
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": "Account deleted",
    })))
}

/// PUT /admin/companies/{id}/approve - Approuver une entreprise (PROTÉGÉE, admin)
#[put("/companies/{id}/approve")]
pub async fn approve_company(
    db: web::Data<DatabaseConnection>,
    auth_user: AuthUser,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    require_admin(&auth_user)?;

    let row = company::Entity::find_by_id(path.into_inner())
        .one(db.get_ref())
        .await?
        .ok_or_else(|| ApiError::NotFound("Company not found".to_string()))?;

    let mut active: company::ActiveModel = row.into();
    active.is_approved = Set(true);
    let updated = active.update(db.get_ref()).await?;

    Ok(HttpResponse::Ok().json(updated))
}

/// GET /admin/stats - Statistiques de la plateforme (PROTÉGÉE, admin)
#[get("/stats")]
pub async fn platform_stats(
    db: web::Data<DatabaseConnection>,
    auth_user: AuthUser,
) -> ApiResult<HttpResponse> {
    let stats = StatsService::admin_stats(db.get_ref(), &auth_user).await?;

    Ok(HttpResponse::Ok().json(stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::ResponseError;

    #[test]
    fn test_parse_role_param_known_variants() {
        assert_eq!(parse_role_param("STUDENT").unwrap(), Role::Student);
        assert_eq!(parse_role_param("company").unwrap(), Role::Company);
        assert_eq!(parse_role_param("Admin").unwrap(), Role::Admin);
    }

    #[test]
    fn test_parse_role_param_unknown_is_not_found() {
        match parse_role_param("moderator") {
            Err(err) => assert_eq!(err.status_code(), StatusCode::NOT_FOUND),
            Ok(role) => panic!("expected NotFound, got {:?}", role),
        }
    }
}

pub fn admin_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/admin")
            .service(list_accounts)
            .service(delete_account)
            .service(approve_company)
            .service(platform_stats),
    );
}
