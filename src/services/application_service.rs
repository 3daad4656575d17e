// ============================================================================
// SERVICE : CANDIDATURES
// ============================================================================
//
// Description:
//   La machine à états des candidatures:
//
//           create                 decide(ACCEPTED|REJECTED)
//   (rien) -------> PENDING ------------------------------> ACCEPTED | REJECTED
//                     |
//                     | withdraw (étudiant propriétaire seulement)
//                     v
//                 (supprimée)
//
// Préconditions de création, dans l'ordre (premier échec gagnant):
//   1. L'offre existe                      -> sinon NotFound
//   2. status = ACTIVE                     -> sinon InvalidState
//   3. Entreprise approuvée                -> sinon InvalidState
//   4. deadline absente OU >= aujourd'hui  -> sinon InvalidState
//   5. Pas de ligne (student_id, offer_id) -> sinon Conflict
//
// ============================================================================

use chrono::{NaiveDate, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, Set,
};

use crate::errors::{ApiError, ApiResult};
use crate::middleware::AuthUser;
use crate::models::application::{self, ApplicationStatus, Entity as Applications};
use crate::models::offer::{self, OfferStatus};
use crate::models::role::Role;
use crate::models::student;
use crate::services::offer_service::OfferService;
use crate::services::policy::{self, Action};

/// Vérifie qu'une offre accepte encore des candidatures.
/// Fonction pure (l'appelant fournit les faits déjà fetchés et la date du
/// jour), testable sans base de données.
pub fn ensure_offer_open(
    offer_row: &offer::Model,
    company_approved: bool,
    today: NaiveDate,
) -> ApiResult<()> {
    if offer_row.status != OfferStatus::Active {
        return Err(ApiError::InvalidState(
            "Offer is closed to applications".to_string(),
        ));
    }
    if !company_approved {
        return Err(ApiError::InvalidState(
            "Company is not approved".to_string(),
        ));
    }
    if let Some(deadline) = offer_row.deadline {
        if deadline < today {
            return Err(ApiError::InvalidState(
                "Application deadline has passed".to_string(),
            ));
        }
    }
    Ok(())
}

/// Vérifie qu'un statut cible de décision est admis (ACCEPTED ou REJECTED).
/// Fonction pure, testable sans base de données.
pub fn ensure_decidable(target: ApplicationStatus) -> ApiResult<()> {
    if target == ApplicationStatus::Pending {
        return Err(ApiError::InvalidState(
            "Target status must be ACCEPTED or REJECTED".to_string(),
        ));
    }
    Ok(())
}

/// Vérifie qu'une candidature peut encore être retirée (PENDING seulement).
/// Fonction pure, testable sans base de données.
pub fn ensure_withdrawable(application_row: &application::Model) -> ApiResult<()> {
    if application_row.status != ApplicationStatus::Pending {
        return Err(ApiError::InvalidState(
            "Only pending applications may be withdrawn".to_string(),
        ));
    }
    Ok(())
}

pub struct ApplicationService;

impl ApplicationService {
    /// Dépôt d'une candidature par l'étudiant connecté
    pub async fn apply(
        db: &DatabaseConnection,
        user: &AuthUser,
        offer_id: i32,
    ) -> ApiResult<application::Model> {
        if !policy::can(user.role, user.id, &Action::CreateApplication) {
            return Err(ApiError::Forbidden(
                "Only students can apply to offers".to_string(),
            ));
        }

        // 1. L'offre existe (404 sinon)
        let (offer_row, company_row) = OfferService::fetch_with_company(db, offer_id).await?;

        // 2-4. L'offre est ouverte aux candidatures
        ensure_offer_open(&offer_row, company_row.is_approved, Utc::now().date_naive())?;

        // 5. Une seule candidature par (étudiant, offre)
        let existing = Applications::find()
            .filter(application::Column::StudentId.eq(user.id))
            .filter(application::Column::OfferId.eq(offer_id))
            .one(db)
            .await?;
        if existing.is_some() {
            return Err(ApiError::Conflict(
                "You have already applied to this offer".to_string(),
            ));
        }

        // Snapshot du CV courant de l'étudiant (pas une référence vivante)
        let student_row = student::Entity::find_by_id(user.id)
            .one(db)
            .await?
            .ok_or_else(|| ApiError::NotFound("Student not found".to_string()))?;

        let new_application = application::ActiveModel {
            student_id: Set(user.id),
            offer_id: Set(offer_id),
            status: Set(ApplicationStatus::Pending),
            cv_path: Set(student_row.cv_path),
            created_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        // La contrainte UNIQUE (student_id, offer_id) côté BD couvre la course
        // entre le check ci-dessus et cet insert: sous deux requêtes identiques
        // concurrentes, le perdant reçoit la violation d'unicité -> Conflict
        new_application.insert(db).await.map_err(|e| {
            match ApiError::from(e) {
                ApiError::Conflict(_) => {
                    ApiError::Conflict("You have already applied to this offer".to_string())
                }
                other => other,
            }
        })
    }

    /// Candidature + son offre (pour les faits de propriété)
    async fn fetch_with_offer(
        db: &DatabaseConnection,
        application_id: i32,
    ) -> ApiResult<(application::Model, offer::Model)> {
        let found = Applications::find_by_id(application_id)
            .find_also_related(offer::Entity)
            .one(db)
            .await?
            .ok_or_else(|| ApiError::NotFound("Application not found".to_string()))?;

        let (application_row, offer_row) = found;
        let offer_row = offer_row.ok_or_else(|| {
            ApiError::Internal(format!("Application {} has no offer", application_id))
        })?;

        Ok((application_row, offer_row))
    }

    /// Vue d'une candidature: admin, entreprise propriétaire de l'offre,
    /// ou étudiant candidat
    pub async fn get(
        db: &DatabaseConnection,
        user: &AuthUser,
        application_id: i32,
    ) -> ApiResult<application::Model> {
        let (application_row, offer_row) = Self::fetch_with_offer(db, application_id).await?;

        if !policy::can(
            user.role,
            user.id,
            &Action::ViewApplication {
                offer_company_id: offer_row.company_id,
                applicant_id: application_row.student_id,
            },
        ) {
            return Err(ApiError::Forbidden(
                "You cannot view this application".to_string(),
            ));
        }

        Ok(application_row)
    }

    /// Les candidatures de l'étudiant connecté
    pub async fn list_mine(
        db: &DatabaseConnection,
        user: &AuthUser,
    ) -> ApiResult<Vec<application::Model>> {
        if user.role != Role::Student {
            return Err(ApiError::Forbidden(
                "Only students have applications".to_string(),
            ));
        }

        Ok(Applications::find()
            .filter(application::Column::StudentId.eq(user.id))
            .order_by_desc(application::Column::CreatedAt)
            .all(db)
            .await?)
    }

    /// Les candidatures reçues sur une offre (admin ou entreprise propriétaire)
    pub async fn list_for_offer(
        db: &DatabaseConnection,
        user: &AuthUser,
        offer_id: i32,
    ) -> ApiResult<Vec<application::Model>> {
        let (offer_row, _company_row) = OfferService::fetch_with_company(db, offer_id).await?;

        if !policy::can(
            user.role,
            user.id,
            &Action::ListOfferApplications { offer_company_id: offer_row.company_id },
        ) {
            return Err(ApiError::Forbidden(
                "You cannot view applications for this offer".to_string(),
            ));
        }

        Ok(Applications::find()
            .filter(application::Column::OfferId.eq(offer_id))
            .order_by_desc(application::Column::CreatedAt)
            .all(db)
            .await?)
    }

    /// Décision: ACCEPTED ou REJECTED, par l'admin ou l'entreprise
    /// propriétaire de l'offre.
    ///
    /// Pas de contrainte sur l'état de départ dans la politique actuelle:
    /// une candidature ACCEPTED peut être repassée REJECTED.
    /// TODO: confirmer avec le produit si PENDING -> {ACCEPTED, REJECTED}
    /// doit devenir la seule transition admise (états terminaux).
    pub async fn decide(
        db: &DatabaseConnection,
        user: &AuthUser,
        application_id: i32,
        new_status: ApplicationStatus,
    ) -> ApiResult<application::Model> {
        ensure_decidable(new_status)?;

        let (application_row, offer_row) = Self::fetch_with_offer(db, application_id).await?;

        if !policy::can(
            user.role,
            user.id,
            &Action::DecideApplication { offer_company_id: offer_row.company_id },
        ) {
            return Err(ApiError::Forbidden(
                "You cannot decide on this application".to_string(),
            ));
        }

        let mut active: application::ActiveModel = application_row.into();
        active.status = Set(new_status);
        Ok(active.update(db).await?)
    }

    /// Retrait par l'étudiant candidat, tant que la candidature est PENDING.
    /// Suppression définitive (pas de soft delete, pas d'archive).
    pub async fn withdraw(
        db: &DatabaseConnection,
        user: &AuthUser,
        application_id: i32,
    ) -> ApiResult<()> {
        let (application_row, _offer_row) = Self::fetch_with_offer(db, application_id).await?;

        if !policy::can(
            user.role,
            user.id,
            &Action::WithdrawApplication { applicant_id: application_row.student_id },
        ) {
            return Err(ApiError::Forbidden(
                "Only the applicant may withdraw an application".to_string(),
            ));
        }

        ensure_withdrawable(&application_row)?;

        application_row.delete(db).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::offer::OfferCategory;

    fn offer_fixture(status: OfferStatus, deadline: Option<NaiveDate>) -> offer::Model {
        offer::Model {
            id: 1,
            company_id: 1,
            title: "Stage PFE data".to_string(),
            description: "Six mois sur la plateforme data".to_string(),
            category: OfferCategory::Pfe,
            status,
            deadline,
            start_date: None,
            posted_at: Utc::now().naive_utc(),
        }
    }

    fn application_fixture(status: ApplicationStatus) -> application::Model {
        application::Model {
            id: 1,
            student_id: 7,
            offer_id: 1,
            status,
            cv_path: None,
            created_at: Utc::now().naive_utc(),
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 3, 15).unwrap()
    }

    #[test]
    fn test_active_offer_without_deadline_is_open() {
        let offer_row = offer_fixture(OfferStatus::Active, None);
        assert!(ensure_offer_open(&offer_row, true, today()).is_ok());
    }

    #[test]
    fn test_closed_offer_rejected() {
        let offer_row = offer_fixture(OfferStatus::Closed, None);
        match ensure_offer_open(&offer_row, true, today()) {
            Err(ApiError::InvalidState(msg)) => assert!(msg.contains("closed")),
            other => panic!("expected InvalidState, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_draft_offer_rejected() {
        let offer_row = offer_fixture(OfferStatus::Draft, None);
        assert!(matches!(
            ensure_offer_open(&offer_row, true, today()),
            Err(ApiError::InvalidState(_))
        ));
    }

    #[test]
    fn test_unapproved_company_rejected_even_if_active() {
        let offer_row = offer_fixture(OfferStatus::Active, None);
        match ensure_offer_open(&offer_row, false, today()) {
            Err(ApiError::InvalidState(msg)) => assert!(msg.contains("approved")),
            other => panic!("expected InvalidState, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_past_deadline_rejected() {
        // deadline = hier
        let yesterday = today().pred_opt().unwrap();
        let offer_row = offer_fixture(OfferStatus::Active, Some(yesterday));
        match ensure_offer_open(&offer_row, true, today()) {
            Err(ApiError::InvalidState(msg)) => assert!(msg.contains("deadline")),
            other => panic!("expected InvalidState, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_deadline_today_still_open() {
        let offer_row = offer_fixture(OfferStatus::Active, Some(today()));
        assert!(ensure_offer_open(&offer_row, true, today()).is_ok());
    }

    #[test]
    fn test_decide_target_cannot_be_pending() {
        assert!(ensure_decidable(ApplicationStatus::Accepted).is_ok());
        assert!(ensure_decidable(ApplicationStatus::Rejected).is_ok());
        match ensure_decidable(ApplicationStatus::Pending) {
            Err(ApiError::InvalidState(msg)) => assert!(msg.contains("ACCEPTED or REJECTED")),
            other => panic!("expected InvalidState, got {:?}", other.err()),
        }
    }

    #[test]
    fn test_withdraw_pending_only() {
        assert!(ensure_withdrawable(&application_fixture(ApplicationStatus::Pending)).is_ok());
        // Une candidature déjà décidée ne peut plus être retirée
        for decided in [ApplicationStatus::Accepted, ApplicationStatus::Rejected] {
            match ensure_withdrawable(&application_fixture(decided)) {
                Err(ApiError::InvalidState(msg)) => assert!(msg.contains("pending")),
                other => panic!("expected InvalidState, got {:?}", other.err()),
            }
        }
    }

    #[test]
    fn test_status_checked_before_deadline() {
        // Premier échec gagnant: offre fermée ET deadline passée -> "closed"
        let yesterday = today().pred_opt().unwrap();
        let offer_row = offer_fixture(OfferStatus::Closed, Some(yesterday));
        match ensure_offer_open(&offer_row, false, today()) {
            Err(ApiError::InvalidState(msg)) => assert!(msg.contains("closed")),
            other => panic!("expected InvalidState(closed), got {:?}", other.err()),
        }
    }
}
