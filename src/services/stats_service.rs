// Statistiques en lecture seule: de simples counts dérivés des autres tables

use sea_orm::{ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter,
    QuerySelect};

use crate::errors::{ApiError, ApiResult};
use crate::middleware::AuthUser;
use crate::models::application::{self, ApplicationStatus};
use crate::models::dto::{
    AdminStatsResponse, ApplicationCounts, CompanyCounts, CompanyStatsResponse, OfferCounts,
    StudentStatsResponse,
};
use crate::models::offer::{self, OfferStatus};
use crate::models::role::Role;
use crate::models::{admin, company, student};
use crate::services::policy::{self, Action};

pub struct StatsService;

impl StatsService {
    /// Tableau de bord admin: comptes par variante, offres et candidatures
    /// par statut
    pub async fn admin_stats(
        db: &DatabaseConnection,
        user: &AuthUser,
    ) -> ApiResult<AdminStatsResponse> {
        if !policy::can(user.role, user.id, &Action::ManageAccounts) {
            return Err(ApiError::Forbidden(
                "Only admins can view platform statistics".to_string(),
            ));
        }

        let admins = admin::Entity::find().count(db).await?;
        let students = student::Entity::find().count(db).await?;

        let companies_total = company::Entity::find().count(db).await?;
        let companies_approved = company::Entity::find()
            .filter(company::Column::IsApproved.eq(true))
            .count(db)
            .await?;

        let offers = Self::offer_counts(db, None).await?;
        let applications = Self::application_counts_all(db).await?;

        Ok(AdminStatsResponse {
            admins,
            students,
            companies: CompanyCounts {
                total: companies_total,
                approved: companies_approved,
                pending: companies_total - companies_approved,
            },
            offers,
            applications,
        })
    }

    /// Stats de l'entreprise connectée: ses offres et les candidatures reçues
    pub async fn company_stats(
        db: &DatabaseConnection,
        user: &AuthUser,
    ) -> ApiResult<CompanyStatsResponse> {
        if user.role != Role::Company {
            return Err(ApiError::Forbidden(
                "Only companies have company statistics".to_string(),
            ));
        }

        let offers = Self::offer_counts(db, Some(user.id)).await?;

        // Candidatures reçues: jointure par les ids des offres de l'entreprise
        let offer_ids: Vec<i32> = offer::Entity::find()
            .filter(offer::Column::CompanyId.eq(user.id))
            .select_only()
            .column(offer::Column::Id)
            .into_tuple()
            .all(db)
            .await?;

        let applications_received = if offer_ids.is_empty() {
            ApplicationCounts::default()
        } else {
            let base = application::Entity::find()
                .filter(application::Column::OfferId.is_in(offer_ids.clone()));
            ApplicationCounts {
                total: base.clone().count(db).await?,
                pending: base
                    .clone()
                    .filter(application::Column::Status.eq(ApplicationStatus::Pending))
                    .count(db)
                    .await?,
                accepted: base
                    .clone()
                    .filter(application::Column::Status.eq(ApplicationStatus::Accepted))
                    .count(db)
                    .await?,
                rejected: base
                    .filter(application::Column::Status.eq(ApplicationStatus::Rejected))
                    .count(db)
                    .await?,
            }
        };

        Ok(CompanyStatsResponse {
            offers,
            applications_received,
        })
    }

    /// Stats de l'étudiant connecté: ses candidatures par statut
    pub async fn student_stats(
        db: &DatabaseConnection,
        user: &AuthUser,
    ) -> ApiResult<StudentStatsResponse> {
        if user.role != Role::Student {
            return Err(ApiError::Forbidden(
                "Only students have student statistics".to_string(),
            ));
        }

        let base =
            application::Entity::find().filter(application::Column::StudentId.eq(user.id));

        Ok(StudentStatsResponse {
            applications: ApplicationCounts {
                total: base.clone().count(db).await?,
                pending: base
                    .clone()
                    .filter(application::Column::Status.eq(ApplicationStatus::Pending))
                    .count(db)
                    .await?,
                accepted: base
                    .clone()
                    .filter(application::Column::Status.eq(ApplicationStatus::Accepted))
                    .count(db)
                    .await?,
                rejected: base
                    .filter(application::Column::Status.eq(ApplicationStatus::Rejected))
                    .count(db)
                    .await?,
            },
        })
    }

    async fn offer_counts(
        db: &DatabaseConnection,
        company_id: Option<i32>,
    ) -> ApiResult<OfferCounts> {
        let base = match company_id {
            Some(id) => offer::Entity::find().filter(offer::Column::CompanyId.eq(id)),
            None => offer::Entity::find(),
        };

        Ok(OfferCounts {
            total: base.clone().count(db).await?,
            active: base
                .clone()
                .filter(offer::Column::Status.eq(OfferStatus::Active))
                .count(db)
                .await?,
            closed: base
                .clone()
                .filter(offer::Column::Status.eq(OfferStatus::Closed))
                .count(db)
                .await?,
            draft: base
                .filter(offer::Column::Status.eq(OfferStatus::Draft))
                .count(db)
                .await?,
        })
    }

    async fn application_counts_all(db: &DatabaseConnection) -> ApiResult<ApplicationCounts> {
        let base = application::Entity::find();

        Ok(ApplicationCounts {
            total: base.clone().count(db).await?,
            pending: base
                .clone()
                .filter(application::Column::Status.eq(ApplicationStatus::Pending))
                .count(db)
                .await?,
            accepted: base
                .clone()
                .filter(application::Column::Status.eq(ApplicationStatus::Accepted))
                .count(db)
                .await?,
            rejected: base
                .filter(application::Column::Status.eq(ApplicationStatus::Rejected))
                .count(db)
                .await?,
        })
    }
}
