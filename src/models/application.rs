// ============================================================================
// MODÈLE : APPLICATIONS
// ============================================================================
//
// Description:
//   Candidature d'un étudiant à une offre. Table applications, structure SQL
//   créée par la migration (migrations/001_init.sql).
//
// Colonnes de la table applications:
//   - id (INTEGER, PRIMARY KEY, SERIAL)
//   - student_id (INTEGER, NOT NULL, FK vers students, ON DELETE CASCADE)
//   - offer_id (INTEGER, NOT NULL, FK vers offers, ON DELETE CASCADE)
//   - status (VARCHAR: PENDING | ACCEPTED | REJECTED)
//   - cv_path (VARCHAR, NULL) - snapshot du CV au moment du dépôt
//   - created_at (TIMESTAMP, NOT NULL)
//   - UNIQUE (student_id, offer_id)
//
// Cycle de vie:
//   create (étudiant) -> PENDING
//   PENDING -> ACCEPTED | REJECTED (entreprise propriétaire ou admin)
//   PENDING -> supprimée (retrait par l'étudiant uniquement;
//              pas de suppression une fois décidée)
//
// Points d'attention:
//   - La contrainte UNIQUE (student_id, offer_id) est portée par la BD:
//     c'est elle qui ferme la course check-then-create entre deux requêtes
//     identiques concurrentes
//   - cv_path est un snapshot, PAS une référence vivante vers le profil
//
// ============================================================================

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(32))")]
pub enum ApplicationStatus {
    #[sea_orm(string_value = "PENDING")]
    #[serde(rename = "PENDING")]
    Pending,
    #[sea_orm(string_value = "ACCEPTED")]
    #[serde(rename = "ACCEPTED")]
    Accepted,
    #[sea_orm(string_value = "REJECTED")]
    #[serde(rename = "REJECTED")]
    Rejected,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "applications")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,

    pub student_id: i32,

    pub offer_id: i32,

    pub status: ApplicationStatus,

    pub cv_path: Option<String>,

    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::student::Entity",
        from = "Column::StudentId",
        to = "super::student::Column::Id"
    )]
    Student,

    #[sea_orm(
        belongs_to = "super::offer::Entity",
        from = "Column::OfferId",
        to = "super::offer::Column::Id"
    )]
    Offer,
}

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::offer::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Offer.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
