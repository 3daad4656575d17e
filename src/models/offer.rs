// ============================================================================
// MODÈLE : OFFERS
// ============================================================================
//
// Description:
//   Modèle de la table offers correspondant EXACTEMENT à la structure SQL
//   créée par la migration (migrations/001_init.sql).
//
// Colonnes de la table offers:
//   - id (INTEGER, PRIMARY KEY, SERIAL)
//   - company_id (INTEGER, NOT NULL, FK vers companies, ON DELETE CASCADE)
//   - title (VARCHAR, NOT NULL)
//   - description (TEXT, NOT NULL)
//   - category (VARCHAR: PFE | SUMMER_INTERNSHIP | JOB)
//   - status (VARCHAR: ACTIVE | CLOSED | DRAFT)
//   - deadline (DATE, NULL) - date limite de candidature
//   - start_date (DATE, NULL)
//   - posted_at (TIMESTAMP, NOT NULL)
//
// Points d'attention:
//   - Une offre n'accepte des candidatures que si status = ACTIVE, que la
//     deadline (si définie) n'est pas passée ET que l'entreprise est approuvée
//   - Le statut est un ensemble plat: pas de graphe de transitions imposé
//
// ============================================================================

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum OfferCategory {
    #[sea_orm(string_value = "PFE")]
    #[serde(rename = "PFE")]
    Pfe,
    #[sea_orm(string_value = "SUMMER_INTERNSHIP")]
    #[serde(rename = "SUMMER_INTERNSHIP")]
    SummerInternship,
    #[sea_orm(string_value = "JOB")]
    #[serde(rename = "JOB")]
    Job,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum OfferStatus {
    #[sea_orm(string_value = "ACTIVE")]
    #[serde(rename = "ACTIVE")]
    Active,
    #[sea_orm(string_value = "CLOSED")]
    #[serde(rename = "CLOSED")]
    Closed,
    #[sea_orm(string_value = "DRAFT")]
    #[serde(rename = "DRAFT")]
    Draft,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "offers")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub company_id: i32,

    pub title: String,

    pub description: String,

    pub category: OfferCategory,

    pub status: OfferStatus,

    pub deadline: Option<Date>,

    pub start_date: Option<Date>,

    pub posted_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::company::Entity",
        from = "Column::CompanyId",
        to = "super::company::Column::Id"
    )]
    Company,

    #[sea_orm(has_many = "super::application::Entity")]
    Application,
}

impl Related<super::company::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Company.def()
    }
}

impl Related<super::application::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Application.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
