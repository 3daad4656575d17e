use actix_web::{delete, get, post, put, web, HttpResponse};
use sea_orm::DatabaseConnection;
use validator::Validate;

use crate::errors::ApiResult;
use crate::middleware::AuthUser;
use crate::models::dto::{CreateOfferRequest, OfferListQuery, UpdateOfferRequest};
use crate::services::application_service::ApplicationService;
use crate::services::offer_service::OfferService;

/// GET /offers - Listing filtré par rôle (PROTÉGÉE)
#[get("")]
pub async fn list_offers(
    db: web::Data<DatabaseConnection>,
    auth_user: AuthUser,
    query: web::Query<OfferListQuery>,
) -> ApiResult<HttpResponse> {
    let offers = OfferService::list(db.get_ref(), &auth_user, query.into_inner()).await?;

    Ok(HttpResponse::Ok().json(offers))
}

/// GET /offers/mine - Les offres de l'entreprise connectée (PROTÉGÉE)
#[get("/mine")]
pub async fn list_my_offers(
    db: web::Data<DatabaseConnection>,
    auth_user: AuthUser,
) -> ApiResult<HttpResponse> {
    let offers = OfferService::list_mine(db.get_ref(), &auth_user).await?;

    Ok(HttpResponse::Ok().json(offers))
}

/// GET /offers/{id} - Détail d'une offre (PROTÉGÉE)
#[get("/{id}")]
pub async fn get_offer(
    db: web::Data<DatabaseConnection>,
    auth_user: AuthUser,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let offer = OfferService::get(db.get_ref(), &auth_user, path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(offer))
}

/// POST /offers - Publier une offre (PROTÉGÉE, entreprise approuvée)
#[post("")]
pub async fn create_offer(
    db: web::Data<DatabaseConnection>,
    auth_user: AuthUser,
    body: web::Json<CreateOfferRequest>,
) -> ApiResult<HttpResponse> {
    body.validate()?;

    let created = OfferService::create(db.get_ref(), &auth_user, body.into_inner()).await?;

    Ok(HttpResponse::Created().json(created))
}

/// PUT /offers/{id} - Modifier une offre (PROTÉGÉE, admin ou propriétaire)
#[put("/{id}")]
pub async fn update_offer(
    db: web::Data<DatabaseConnection>,
    auth_user: AuthUser,
    path: web::Path<i32>,
    body: web::Json<UpdateOfferRequest>,
) -> ApiResult<HttpResponse> {
    body.validate()?;

    let updated =
        OfferService::update(db.get_ref(), &auth_user, path.into_inner(), body.into_inner())
            .await?;

    Ok(HttpResponse::Ok().json(updated))
}

/// DELETE /offers/{id} - Supprimer une offre (PROTÉGÉE, admin ou propriétaire)
#[delete("/{id}")]
pub async fn delete_offer(
    db: web::Data<DatabaseConnection>,
    auth_user: AuthUser,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    OfferService::delete(db.get_ref(), &auth_user, path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": "Offer deleted",
    })))
}

/// GET /offers/{id}/applications - Candidatures reçues sur une offre
/// (PROTÉGÉE, admin ou entreprise propriétaire)
#[get("/{id}/applications")]
pub async fn list_offer_applications(
    db: web::Data<DatabaseConnection>,
    auth_user: AuthUser,
    path: web::Path<i32>,
) -> ApiResult<HttpResponse> {
    let applications =
        ApplicationService::list_for_offer(db.get_ref(), &auth_user, path.into_inner()).await?;

    Ok(HttpResponse::Ok().json(applications))
}

pub fn offer_routes(cfg: &mut web::ServiceConfig) {
    // "/mine" est enregistrée avant "/{id}" pour ne pas être capturée
    cfg.service(
        web::scope("/offers")
            .service(list_offers)
            .service(list_my_offers)
            .service(create_offer)
            .service(list_offer_applications)
            .service(get_offer)
            .service(update_offer)
            .service(delete_offer),
    );
}
