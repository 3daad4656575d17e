use actix_web::{get, post, web, HttpResponse};
use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};
use validator::Validate;

use crate::config::AppConfig;
use crate::errors::{ApiError, ApiResult};
use crate::middleware::AuthUser;
use crate::models::dto::{
    AuthResponse, ChangePasswordRequest, LoginRequest, MeResponse, RefreshRequest,
    RegisterCompanyRequest, RegisterStudentRequest,
};
use crate::models::role::Role;
use crate::models::{company, student};
use crate::services::auth_service::AuthService;
use crate::utils::{jwt, password};

/// POST /auth/register/student - Créer un compte étudiant (PUBLIC)
#[post("/register/student")]
pub async fn register_student(
    body: web::Json<RegisterStudentRequest>,
    db: web::Data<DatabaseConnection>,
    config: web::Data<AppConfig>,
) -> ApiResult<HttpResponse> {
    body.validate()?;

    // 1. Email unique DANS la table students (les autres variantes ont leur
    //    propre espace d'emails)
    let existing = student::Entity::find()
        .filter(student::Column::Email.eq(&body.email))
        .one(db.get_ref())
        .await?;
    if existing.is_some() {
        return Err(ApiError::Conflict("Email already registered".to_string()));
    }

    // 2. Hash le mot de passe
    let password_hash = password::hash_password(&body.password).map_err(ApiError::Internal)?;

    // 3. Créer l'étudiant
    let new_student = student::ActiveModel {
        name: Set(body.name.clone()),
        email: Set(body.email.clone()),
        password_hash: Set(password_hash),
        niveau_etude: Set(body.niveau_etude.clone()),
        groupe: Set(body.groupe.clone()),
        cv_path: Set(body.cv_path.clone()),
        ..Default::default()
    };
    let created = new_student.insert(db.get_ref()).await?;

    // 4. Émettre la paire de tokens
    let tokens = jwt::generate_token_pair(created.id, &created.email, Role::Student, &config)
        .map_err(ApiError::Internal)?;

    Ok(HttpResponse::Created().json(AuthResponse {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        id: created.id,
        email: created.email,
        role: Role::Student,
    }))
}

/// POST /auth/register/company - Créer un compte entreprise (PUBLIC)
/// Le compte est créé NON approuvé: pas de tokens tant qu'un admin n'a pas
/// approuvé (le login renverra 403 d'ici là)
#[post("/register/company")]
pub async fn register_company(
    body: web::Json<RegisterCompanyRequest>,
    db: web::Data<DatabaseConnection>,
) -> ApiResult<HttpResponse> {
    body.validate()?;

    let existing = company::Entity::find()
        .filter(company::Column::Email.eq(&body.email))
        .one(db.get_ref())
        .await?;
    if existing.is_some() {
        return Err(ApiError::Conflict("Email already registered".to_string()));
    }

    let password_hash = password::hash_password(&body.password).map_err(ApiError::Internal)?;

    let new_company = company::ActiveModel {
        name: Set(body.name.clone()),
        email: Set(body.email.clone()),
        password_hash: Set(password_hash),
        sector: Set(body.sector.clone()),
        is_approved: Set(false),
        ..Default::default()
    };
    let created = new_company.insert(db.get_ref()).await?;

    Ok(HttpResponse::Created().json(serde_json::json!({
        "success": true,
        "message": "Company account created, pending admin approval",
        "data": created,
    })))
}

/// POST /auth/login - Se connecter (PUBLIC)
/// Résolution dans l'ordre Admin -> Company -> Student; une entreprise non
/// approuvée reçoit 403, un échec de credentials 401
#[post("/login")]
pub async fn login(
    body: web::Json<LoginRequest>,
    db: web::Data<DatabaseConnection>,
    config: web::Data<AppConfig>,
) -> ApiResult<HttpResponse> {
    body.validate()?;

    let (account, tokens) =
        AuthService::login(db.get_ref(), &config, &body.email, &body.password).await?;

    Ok(HttpResponse::Ok().json(AuthResponse {
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        id: account.id(),
        email: account.email().to_string(),
        role: account.role(),
    }))
}

/// POST /auth/refresh - Ré-émettre une paire de tokens (PUBLIC, stateless)
#[post("/refresh")]
pub async fn refresh(
    body: web::Json<RefreshRequest>,
    config: web::Data<AppConfig>,
) -> ApiResult<HttpResponse> {
    let tokens = AuthService::refresh(&config, &body.refresh_token)?;

    Ok(HttpResponse::Ok().json(tokens))
}

/// GET /auth/me - Vérifier le token (PROTÉGÉE)
#[get("/me")]
pub async fn me(auth_user: AuthUser) -> HttpResponse {
    HttpResponse::Ok().json(MeResponse {
        id: auth_user.id,
        email: auth_user.email,
        role: auth_user.role,
    })
}

/// POST /auth/change-password - Changer son mot de passe (PROTÉGÉE)
#[post("/change-password")]
pub async fn change_password(
    auth_user: AuthUser,
    body: web::Json<ChangePasswordRequest>,
    db: web::Data<DatabaseConnection>,
) -> ApiResult<HttpResponse> {
    body.validate()?;

    AuthService::change_password(
        db.get_ref(),
        &auth_user,
        &body.current_password,
        &body.new_password,
    )
    .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "success": true,
        "message": "Password changed successfully",
    })))
}

pub fn auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(register_student)
            .service(register_company)
            .service(login)
            .service(refresh)
            .service(me)
            .service(change_password),
    );
}
