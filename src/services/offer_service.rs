use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, ModelTrait, QueryFilter,
    QueryOrder, QuerySelect, Set,
};

use crate::errors::{ApiError, ApiResult};
use crate::middleware::AuthUser;
use crate::models::dto::{CreateOfferRequest, OfferListQuery, OfferResponse, UpdateOfferRequest};
use crate::models::offer::{self, OfferStatus};
use crate::models::role::Role;
use crate::models::{company, offer::Entity as Offers};
use crate::services::policy::{self, Action};

const DEFAULT_PAGE_SIZE: u64 = 50;
const MAX_PAGE_SIZE: u64 = 100;

pub struct OfferService;

impl OfferService {
    /// Crée une offre pour l'entreprise connectée.
    /// Une entreprise non approuvée reçoit un 403, JAMAIS un brouillon silencieux.
    pub async fn create(
        db: &DatabaseConnection,
        user: &AuthUser,
        request: CreateOfferRequest,
    ) -> ApiResult<offer::Model> {
        if user.role != Role::Company {
            return Err(ApiError::Forbidden(
                "Only companies can create offers".to_string(),
            ));
        }

        let acting_company = company::Entity::find_by_id(user.id)
            .one(db)
            .await?
            .ok_or_else(|| ApiError::NotFound("Company not found".to_string()))?;

        if !policy::can(
            user.role,
            user.id,
            &Action::CreateOffer { company_approved: acting_company.is_approved },
        ) {
            return Err(ApiError::Forbidden(
                "Company account is pending approval".to_string(),
            ));
        }

        let new_offer = offer::ActiveModel {
            company_id: Set(user.id),
            title: Set(request.title),
            description: Set(request.description),
            category: Set(request.category),
            status: Set(request.status.unwrap_or(OfferStatus::Active)),
            deadline: Set(request.deadline),
            start_date: Set(request.start_date),
            posted_at: Set(Utc::now().naive_utc()),
            ..Default::default()
        };

        Ok(new_offer.insert(db).await?)
    }

    /// Récupère une offre avec son entreprise propriétaire.
    /// 404 si l'offre est absente; une offre orpheline est une erreur interne.
    pub(crate) async fn fetch_with_company(
        db: &DatabaseConnection,
        offer_id: i32,
    ) -> ApiResult<(offer::Model, company::Model)> {
        let found = Offers::find_by_id(offer_id)
            .find_also_related(company::Entity)
            .one(db)
            .await?
            .ok_or_else(|| ApiError::NotFound("Offer not found".to_string()))?;

        let (offer_row, company_row) = found;
        let company_row = company_row
            .ok_or_else(|| ApiError::Internal(format!("Offer {} has no company", offer_id)))?;

        Ok((offer_row, company_row))
    }

    /// Vue d'une offre. L'offre existe mais n'est pas visible pour l'acteur
    /// -> Forbidden (et pas NotFound).
    pub async fn get(
        db: &DatabaseConnection,
        user: &AuthUser,
        offer_id: i32,
    ) -> ApiResult<OfferResponse> {
        let (offer_row, company_row) = Self::fetch_with_company(db, offer_id).await?;

        let visible = policy::can(
            user.role,
            user.id,
            &Action::ViewOffer {
                offer_active: offer_row.status == OfferStatus::Active,
                company_approved: company_row.is_approved,
            },
        );
        if !visible {
            return Err(ApiError::Forbidden(
                "This offer is not available".to_string(),
            ));
        }

        Ok(OfferResponse {
            offer: offer_row,
            company_name: Some(company_row.name),
        })
    }

    /// Listing filtré par rôle AU NIVEAU DE LA REQUÊTE:
    /// les étudiants ne voient que les offres ACTIVE d'entreprises approuvées;
    /// admins et entreprises voient tout.
    pub async fn list(
        db: &DatabaseConnection,
        user: &AuthUser,
        query: OfferListQuery,
    ) -> ApiResult<Vec<OfferResponse>> {
        let mut select = Offers::find()
            .find_also_related(company::Entity)
            .order_by_desc(offer::Column::PostedAt)
            .order_by_desc(offer::Column::Id);

        if user.role == Role::Student {
            select = select
                .filter(offer::Column::Status.eq(OfferStatus::Active))
                .filter(company::Column::IsApproved.eq(true));
        }

        if let Some(category) = query.category {
            select = select.filter(offer::Column::Category.eq(category));
        }

        let take = query.take.unwrap_or(DEFAULT_PAGE_SIZE).min(MAX_PAGE_SIZE);
        let rows = select
            .offset(query.skip.unwrap_or(0))
            .limit(take)
            .all(db)
            .await?;

        Ok(rows
            .into_iter()
            .map(|(o, c)| OfferResponse {
                offer: o,
                company_name: c.map(|c| c.name),
            })
            .collect())
    }

    /// Les offres de l'entreprise connectée (tous statuts)
    pub async fn list_mine(
        db: &DatabaseConnection,
        user: &AuthUser,
    ) -> ApiResult<Vec<offer::Model>> {
        if user.role != Role::Company {
            return Err(ApiError::Forbidden(
                "Only companies have posted offers".to_string(),
            ));
        }

        Ok(Offers::find()
            .filter(offer::Column::CompanyId.eq(user.id))
            .order_by_desc(offer::Column::PostedAt)
            .all(db)
            .await?)
    }

    /// Mise à jour partielle; propriété exigée (admin ou entreprise propriétaire).
    /// Le statut est un ensemble plat: toute mise à jour autorisée peut poser
    /// n'importe quelle valeur de statut.
    pub async fn update(
        db: &DatabaseConnection,
        user: &AuthUser,
        offer_id: i32,
        request: UpdateOfferRequest,
    ) -> ApiResult<offer::Model> {
        let (offer_row, _company_row) = Self::fetch_with_company(db, offer_id).await?;

        if !policy::can(
            user.role,
            user.id,
            &Action::UpdateOffer { owner_company_id: offer_row.company_id },
        ) {
            return Err(ApiError::Forbidden(
                "You do not own this offer".to_string(),
            ));
        }

        let mut active: offer::ActiveModel = offer_row.into();
        if let Some(title) = request.title {
            active.title = Set(title);
        }
        if let Some(description) = request.description {
            active.description = Set(description);
        }
        if let Some(category) = request.category {
            active.category = Set(category);
        }
        if let Some(status) = request.status {
            active.status = Set(status);
        }
        if let Some(deadline) = request.deadline {
            active.deadline = Set(Some(deadline));
        }
        if let Some(start_date) = request.start_date {
            active.start_date = Set(Some(start_date));
        }

        Ok(active.update(db).await?)
    }

    /// Suppression; mêmes règles de propriété que la mise à jour
    pub async fn delete(db: &DatabaseConnection, user: &AuthUser, offer_id: i32) -> ApiResult<()> {
        let (offer_row, _company_row) = Self::fetch_with_company(db, offer_id).await?;

        if !policy::can(
            user.role,
            user.id,
            &Action::DeleteOffer { owner_company_id: offer_row.company_id },
        ) {
            return Err(ApiError::Forbidden(
                "You do not own this offer".to_string(),
            ));
        }

        offer_row.delete(db).await?;
        Ok(())
    }
}
