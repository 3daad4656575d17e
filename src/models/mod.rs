// ============================================================================
// MODELS - MODULE PRINCIPAL
// ============================================================================
//
// Description:
//   Point d'entrée pour tous les modèles de données.
//   Chaque modèle correspond à une table PostgreSQL avec SeaORM.
//
// Liste des modules:
//   - role : Tag de variante de compte (ADMIN / COMPANY / STUDENT)
//   - admin : Comptes administrateurs
//   - company : Comptes entreprises (avec flag d'approbation)
//   - student : Comptes étudiants (avec chemin du CV)
//   - offer : Offres (PFE / stage d'été / emploi)
//   - application : Candidatures (une par étudiant et par offre)
//   - health : Health check API
//   - dto : Data Transfer Objects pour les requêtes/réponses API
//
// Points d'attention:
//   - Tous les modèles utilisent SeaORM (pas de SQL brut)
//   - Les trois variantes de compte sont des tables DISJOINTES: role + id
//     forment ensemble la vraie clé d'identité
//   - Les relations entre tables sont définies dans chaque modèle
//
// ============================================================================

pub mod admin;
pub mod application;
pub mod company;
pub mod dto;
pub mod health;
pub mod offer;
pub mod role;
pub mod student;
