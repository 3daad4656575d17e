// DTOs pour les requêtes (validées) et les réponses structurées

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use super::application::ApplicationStatus;
use super::offer::{self, OfferCategory, OfferStatus};
use super::role::Role;

// ---------------------------------------------------------------------------
// Requêtes - authentification
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterStudentRequest {
    #[validate(length(min = 2, message = "name must be at least 2 characters"))]
    pub name: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
    pub niveau_etude: Option<String>,
    pub groupe: Option<String>,
    pub cv_path: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct RegisterCompanyRequest {
    #[validate(length(min = 2, message = "name must be at least 2 characters"))]
    pub name: String,
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 8, message = "password must be at least 8 characters"))]
    pub password: String,
    pub sector: Option<String>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    #[validate(email(message = "email must be a valid address"))]
    pub email: String,
    #[validate(length(min = 1, message = "password must not be empty"))]
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct RefreshRequest {
    pub refresh_token: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct ChangePasswordRequest {
    pub current_password: String,
    #[validate(length(min = 8, message = "new_password must be at least 8 characters"))]
    pub new_password: String,
}

// ---------------------------------------------------------------------------
// Requêtes - offres
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Validate)]
pub struct CreateOfferRequest {
    #[validate(length(min = 3, message = "title must be at least 3 characters"))]
    pub title: String,
    #[validate(length(min = 10, message = "description must be at least 10 characters"))]
    pub description: String,
    pub category: OfferCategory,
    /// ACTIVE par défaut; DRAFT doit être demandé explicitement
    pub status: Option<OfferStatus>,
    pub deadline: Option<NaiveDate>,
    pub start_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateOfferRequest {
    #[validate(length(min = 3, message = "title must be at least 3 characters"))]
    pub title: Option<String>,
    #[validate(length(min = 10, message = "description must be at least 10 characters"))]
    pub description: Option<String>,
    pub category: Option<OfferCategory>,
    pub status: Option<OfferStatus>,
    pub deadline: Option<NaiveDate>,
    pub start_date: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub struct OfferListQuery {
    pub category: Option<OfferCategory>,
    pub skip: Option<u64>,
    pub take: Option<u64>,
}

// ---------------------------------------------------------------------------
// Requêtes - candidatures
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct ApplyRequest {
    pub offer_id: i32,
}

#[derive(Debug, Deserialize)]
pub struct DecideApplicationRequest {
    /// ACCEPTED ou REJECTED uniquement (PENDING refusé par le service)
    pub status: ApplicationStatus,
}

// ---------------------------------------------------------------------------
// Requêtes - profil
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateProfileRequest {
    #[validate(length(min = 2, message = "name must be at least 2 characters"))]
    pub name: Option<String>,
    // Champs entreprise
    pub sector: Option<String>,
    // Champs étudiant
    pub niveau_etude: Option<String>,
    pub groupe: Option<String>,
    pub cv_path: Option<String>,
}

// ---------------------------------------------------------------------------
// Réponses
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub refresh_token: String,
    pub id: i32,
    pub email: String,
    pub role: Role,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    pub id: i32,
    pub email: String,
    pub role: Role,
}

#[derive(Debug, Serialize)]
pub struct OfferResponse {
    #[serde(flatten)]
    pub offer: offer::Model,
    pub company_name: Option<String>,
}

#[derive(Debug, Default, Serialize)]
pub struct OfferCounts {
    pub total: u64,
    pub active: u64,
    pub closed: u64,
    pub draft: u64,
}

#[derive(Debug, Default, Serialize)]
pub struct ApplicationCounts {
    pub total: u64,
    pub pending: u64,
    pub accepted: u64,
    pub rejected: u64,
}

#[derive(Debug, Serialize)]
pub struct CompanyCounts {
    pub total: u64,
    pub approved: u64,
    pub pending: u64,
}

#[derive(Debug, Serialize)]
pub struct AdminStatsResponse {
    pub admins: u64,
    pub students: u64,
    pub companies: CompanyCounts,
    pub offers: OfferCounts,
    pub applications: ApplicationCounts,
}

#[derive(Debug, Serialize)]
pub struct CompanyStatsResponse {
    pub offers: OfferCounts,
    pub applications_received: ApplicationCounts,
}

#[derive(Debug, Serialize)]
pub struct StudentStatsResponse {
    pub applications: ApplicationCounts,
}

#[derive(Debug, Serialize)]
pub struct AccountsResponse {
    pub admins: Vec<super::admin::Model>,
    pub companies: Vec<super::company::Model>,
    pub students: Vec<super::student::Model>,
}
