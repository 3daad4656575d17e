// ============================================================================
// POLICY - GARDE D'AUTORISATION
// ============================================================================
//
// Description:
//   Fonction de décision PURE: (rôle, id acteur, action demandée) -> bool.
//   Les faits de propriété (id de l'entreprise propriétaire, id du candidat,
//   flag d'approbation...) sont portés par les variantes d'Action et fournis
//   par l'appelant qui a déjà fetché les lignes concernées.
//
// Points d'attention:
//   - Ce module ne touche JAMAIS la base de données: il se teste sans BD
//   - Un refus sur une ressource existante doit être mappé en Forbidden
//     par l'appelant, jamais en NotFound
//
// ============================================================================

use crate::models::role::Role;

/// Action demandée, avec les faits de propriété déjà fetchés
#[derive(Debug)]
pub enum Action {
    ViewProfile { owner_role: Role, owner_id: i32 },
    UpdateProfile { owner_role: Role, owner_id: i32 },
    ManageAccounts,
    CreateOffer { company_approved: bool },
    UpdateOffer { owner_company_id: i32 },
    DeleteOffer { owner_company_id: i32 },
    ViewOffer { offer_active: bool, company_approved: bool },
    CreateApplication,
    ViewApplication { offer_company_id: i32, applicant_id: i32 },
    ListOfferApplications { offer_company_id: i32 },
    DecideApplication { offer_company_id: i32 },
    WithdrawApplication { applicant_id: i32 },
}

/// La table de décision
pub fn can(role: Role, actor_id: i32, action: &Action) -> bool {
    match action {
        // Profil: uniquement le propriétaire (même variante ET même id)
        Action::ViewProfile { owner_role, owner_id } => {
            role == *owner_role && actor_id == *owner_id
        }

        // Les admins n'ont pas de profil éditable (identité seulement)
        Action::UpdateProfile { owner_role, owner_id } => {
            role != Role::Admin && role == *owner_role && actor_id == *owner_id
        }

        // Lister/supprimer des comptes: admin seulement
        Action::ManageAccounts => role == Role::Admin,

        // Créer une offre: entreprise approuvée seulement
        Action::CreateOffer { company_approved } => role == Role::Company && *company_approved,

        // Modifier/supprimer une offre: admin, ou entreprise propriétaire
        Action::UpdateOffer { owner_company_id } | Action::DeleteOffer { owner_company_id } => {
            match role {
                Role::Admin => true,
                Role::Company => actor_id == *owner_company_id,
                Role::Student => false,
            }
        }

        // Voir une offre: admin et entreprises voient tout; les étudiants ne
        // voient que les offres ACTIVE d'entreprises approuvées
        Action::ViewOffer { offer_active, company_approved } => match role {
            Role::Admin | Role::Company => true,
            Role::Student => *offer_active && *company_approved,
        },

        // Candidater: étudiants seulement (préconditions d'état vérifiées
        // ensuite par le service candidatures)
        Action::CreateApplication => role == Role::Student,

        // Voir une candidature: admin, entreprise propriétaire de l'offre,
        // ou étudiant propriétaire de la candidature
        Action::ViewApplication { offer_company_id, applicant_id } => match role {
            Role::Admin => true,
            Role::Company => actor_id == *offer_company_id,
            Role::Student => actor_id == *applicant_id,
        },

        // Lister les candidatures d'une offre / décider:
        // admin ou entreprise propriétaire de l'offre
        Action::ListOfferApplications { offer_company_id }
        | Action::DecideApplication { offer_company_id } => match role {
            Role::Admin => true,
            Role::Company => actor_id == *offer_company_id,
            Role::Student => false,
        },

        // Retirer une candidature: UNIQUEMENT l'étudiant propriétaire
        // (ni admin ni entreprise; la contrainte status = PENDING est une
        // précondition d'état, vérifiée par le service)
        Action::WithdrawApplication { applicant_id } => {
            role == Role::Student && actor_id == *applicant_id
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OWNER: i32 = 10;
    const OTHER: i32 = 99;

    #[test]
    fn test_profile_only_owner() {
        let view = Action::ViewProfile { owner_role: Role::Student, owner_id: OWNER };
        assert!(can(Role::Student, OWNER, &view));
        assert!(!can(Role::Student, OTHER, &view));
        // Même id mais autre variante: les espaces d'ids sont disjoints
        assert!(!can(Role::Company, OWNER, &view));
        assert!(!can(Role::Admin, OWNER, &view));

        let update = Action::UpdateProfile { owner_role: Role::Company, owner_id: OWNER };
        assert!(can(Role::Company, OWNER, &update));
        assert!(!can(Role::Company, OTHER, &update));
        assert!(!can(Role::Student, OWNER, &update));
    }

    #[test]
    fn test_admin_profile_identity_only() {
        // Un admin voit sa propre identité mais n'a pas de profil éditable
        assert!(can(Role::Admin, OWNER, &Action::ViewProfile { owner_role: Role::Admin, owner_id: OWNER }));
        assert!(!can(Role::Admin, OWNER, &Action::UpdateProfile { owner_role: Role::Admin, owner_id: OWNER }));
    }

    #[test]
    fn test_manage_accounts_admin_only() {
        assert!(can(Role::Admin, 1, &Action::ManageAccounts));
        assert!(!can(Role::Company, 1, &Action::ManageAccounts));
        assert!(!can(Role::Student, 1, &Action::ManageAccounts));
    }

    #[test]
    fn test_create_offer_requires_approved_company() {
        assert!(can(Role::Company, OWNER, &Action::CreateOffer { company_approved: true }));
        assert!(!can(Role::Company, OWNER, &Action::CreateOffer { company_approved: false }));
        assert!(!can(Role::Student, OWNER, &Action::CreateOffer { company_approved: true }));
        assert!(!can(Role::Admin, OWNER, &Action::CreateOffer { company_approved: true }));
    }

    #[test]
    fn test_update_offer_ownership() {
        let action = Action::UpdateOffer { owner_company_id: OWNER };
        assert!(can(Role::Admin, OTHER, &action));
        assert!(can(Role::Company, OWNER, &action));
        // Entreprise non propriétaire: refus
        assert!(!can(Role::Company, OTHER, &action));
        assert!(!can(Role::Student, OWNER, &action));
    }

    #[test]
    fn test_delete_offer_ownership() {
        let action = Action::DeleteOffer { owner_company_id: OWNER };
        assert!(can(Role::Admin, OTHER, &action));
        assert!(can(Role::Company, OWNER, &action));
        assert!(!can(Role::Company, OTHER, &action));
        assert!(!can(Role::Student, OTHER, &action));
    }

    #[test]
    fn test_student_offer_visibility() {
        // Étudiant: ACTIVE + entreprise approuvée exigés
        assert!(can(Role::Student, OWNER, &Action::ViewOffer { offer_active: true, company_approved: true }));
        assert!(!can(Role::Student, OWNER, &Action::ViewOffer { offer_active: false, company_approved: true }));
        assert!(!can(Role::Student, OWNER, &Action::ViewOffer { offer_active: true, company_approved: false }));
        // Admin et entreprises voient tout
        assert!(can(Role::Admin, OWNER, &Action::ViewOffer { offer_active: false, company_approved: false }));
        assert!(can(Role::Company, OTHER, &Action::ViewOffer { offer_active: false, company_approved: false }));
    }

    #[test]
    fn test_create_application_students_only() {
        assert!(can(Role::Student, OWNER, &Action::CreateApplication));
        assert!(!can(Role::Company, OWNER, &Action::CreateApplication));
        assert!(!can(Role::Admin, OWNER, &Action::CreateApplication));
    }

    #[test]
    fn test_view_application() {
        let action = Action::ViewApplication { offer_company_id: 5, applicant_id: OWNER };
        // Admin: toujours
        assert!(can(Role::Admin, OTHER, &action));
        // Entreprise propriétaire de l'offre: oui; autre entreprise: non
        assert!(can(Role::Company, 5, &action));
        assert!(!can(Role::Company, OTHER, &action));
        // Étudiant candidat: oui; autre étudiant: non
        assert!(can(Role::Student, OWNER, &action));
        assert!(!can(Role::Student, OTHER, &action));
    }

    #[test]
    fn test_decide_application() {
        let action = Action::DecideApplication { offer_company_id: 5 };
        assert!(can(Role::Admin, OTHER, &action));
        assert!(can(Role::Company, 5, &action));
        assert!(!can(Role::Company, OTHER, &action));
        assert!(!can(Role::Student, OWNER, &action));
    }

    #[test]
    fn test_list_offer_applications() {
        let action = Action::ListOfferApplications { offer_company_id: 5 };
        assert!(can(Role::Admin, OTHER, &action));
        assert!(can(Role::Company, 5, &action));
        assert!(!can(Role::Company, OTHER, &action));
        assert!(!can(Role::Student, OWNER, &action));
    }

    #[test]
    fn test_withdraw_only_owning_student() {
        let action = Action::WithdrawApplication { applicant_id: OWNER };
        assert!(can(Role::Student, OWNER, &action));
        assert!(!can(Role::Student, OTHER, &action));
        // Ni admin ni entreprise, même sur leur propre offre
        assert!(!can(Role::Admin, OWNER, &action));
        assert!(!can(Role::Company, OWNER, &action));
    }
}
