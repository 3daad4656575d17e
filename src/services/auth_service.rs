use sea_orm::{ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, Set};

use crate::config::AppConfig;
use crate::errors::{ApiError, ApiResult};
use crate::middleware::AuthUser;
use crate::models::role::Role;
use crate::models::{admin, company, student};
use crate::utils::jwt::{self, TokenError, TokenPair};
use crate::utils::password;

/// Compte résolu: union taguée sur les trois variantes disjointes.
/// Le tag (le rôle) est retourné avec la ligne matchée, pas d'héritage.
pub enum ResolvedAccount {
    Admin(admin::Model),
    Company(company::Model),
    Student(student::Model),
}

impl ResolvedAccount {
    pub fn id(&self) -> i32 {
        match self {
            ResolvedAccount::Admin(a) => a.id,
            ResolvedAccount::Company(c) => c.id,
            ResolvedAccount::Student(s) => s.id,
        }
    }

    pub fn email(&self) -> &str {
        match self {
            ResolvedAccount::Admin(a) => &a.email,
            ResolvedAccount::Company(c) => &c.email,
            ResolvedAccount::Student(s) => &s.email,
        }
    }

    pub fn role(&self) -> Role {
        match self {
            ResolvedAccount::Admin(_) => Role::Admin,
            ResolvedAccount::Company(_) => Role::Company,
            ResolvedAccount::Student(_) => Role::Student,
        }
    }

    fn password_hash(&self) -> &str {
        match self {
            ResolvedAccount::Admin(a) => &a.password_hash,
            ResolvedAccount::Company(c) => &c.password_hash,
            ResolvedAccount::Student(s) => &s.password_hash,
        }
    }
}

pub struct AuthService;

impl AuthService {
    /// Résout un compte par email dans l'ordre FIXE Admin -> Company -> Student.
    /// Premier match gagne; les variantes ne sont jamais fusionnées (le même
    /// email peut en théorie exister dans plusieurs tables).
    ///
    /// Une entreprise trouvée mais non approuvée donne Forbidden (403) AVANT
    /// toute comparaison de mot de passe, distinct d'un échec de credentials.
    pub async fn resolve_by_email(
        db: &DatabaseConnection,
        email: &str,
    ) -> ApiResult<ResolvedAccount> {
        if let Some(a) = admin::Entity::find()
            .filter(admin::Column::Email.eq(email))
            .one(db)
            .await?
        {
            return Ok(ResolvedAccount::Admin(a));
        }

        if let Some(c) = company::Entity::find()
            .filter(company::Column::Email.eq(email))
            .one(db)
            .await?
        {
            if !c.is_approved {
                return Err(ApiError::Forbidden(
                    "Company account is pending approval".to_string(),
                ));
            }
            return Ok(ResolvedAccount::Company(c));
        }

        if let Some(s) = student::Entity::find()
            .filter(student::Column::Email.eq(email))
            .one(db)
            .await?
        {
            return Ok(ResolvedAccount::Student(s));
        }

        // Même message qu'un mauvais mot de passe: ne pas révéler
        // l'existence ou non d'un compte
        Err(ApiError::Unauthenticated(
            "Invalid email or password".to_string(),
        ))
    }

    /// Connexion: résolution -> vérification du mot de passe -> paire de tokens
    pub async fn login(
        db: &DatabaseConnection,
        config: &AppConfig,
        email: &str,
        plaintext: &str,
    ) -> ApiResult<(ResolvedAccount, TokenPair)> {
        let account = Self::resolve_by_email(db, email).await?;

        let is_valid = password::verify_password(plaintext, account.password_hash())
            .map_err(ApiError::Internal)?;
        if !is_valid {
            return Err(ApiError::Unauthenticated(
                "Invalid email or password".to_string(),
            ));
        }

        let tokens = jwt::generate_token_pair(account.id(), account.email(), account.role(), config)
            .map_err(ApiError::Internal)?;

        Ok((account, tokens))
    }

    /// Refresh SANS état: ré-émet une paire neuve depuis les claims décodés
    /// du refresh token, sans retoucher la base.
    ///
    /// Limitation assumée (pas de liste de révocation): un compte supprimé ou
    /// repassé non approuvé peut continuer à rafraîchir jusqu'à l'expiration
    /// naturelle de son refresh token.
    pub fn refresh(config: &AppConfig, refresh_token: &str) -> ApiResult<TokenPair> {
        let claims = jwt::verify_token(refresh_token, &config.refresh_secret).map_err(|e| {
            ApiError::Unauthenticated(match e {
                TokenError::Expired => "Refresh token expired".to_string(),
                TokenError::Invalid => "Invalid refresh token".to_string(),
            })
        })?;

        jwt::generate_token_pair(claims.sub, &claims.email, claims.role, config)
            .map_err(ApiError::Internal)
    }

    /// Changement de mot de passe, toutes variantes confondues.
    /// Vérifie l'ancien mot de passe avant d'écrire le nouveau.
    pub async fn change_password(
        db: &DatabaseConnection,
        user: &AuthUser,
        current: &str,
        new_plaintext: &str,
    ) -> ApiResult<()> {
        match user.role {
            Role::Admin => {
                let row = admin::Entity::find_by_id(user.id)
                    .one(db)
                    .await?
                    .ok_or_else(|| ApiError::NotFound("Account not found".to_string()))?;
                Self::check_current(current, &row.password_hash)?;
                let hash = password::hash_password(new_plaintext).map_err(ApiError::Internal)?;
                let mut active: admin::ActiveModel = row.into();
                active.password_hash = Set(hash);
                active.update(db).await?;
            }
            Role::Company => {
                let row = company::Entity::find_by_id(user.id)
                    .one(db)
                    .await?
                    .ok_or_else(|| ApiError::NotFound("Account not found".to_string()))?;
                Self::check_current(current, &row.password_hash)?;
                let hash = password::hash_password(new_plaintext).map_err(ApiError::Internal)?;
                let mut active: company::ActiveModel = row.into();
                active.password_hash = Set(hash);
                active.update(db).await?;
            }
            Role::Student => {
                let row = student::Entity::find_by_id(user.id)
                    .one(db)
                    .await?
                    .ok_or_else(|| ApiError::NotFound("Account not found".to_string()))?;
                Self::check_current(current, &row.password_hash)?;
                let hash = password::hash_password(new_plaintext).map_err(ApiError::Internal)?;
                let mut active: student::ActiveModel = row.into();
                active.password_hash = Set(hash);
                active.update(db).await?;
            }
        }

        Ok(())
    }

    fn check_current(plaintext: &str, stored_hash: &str) -> ApiResult<()> {
        let is_valid =
            password::verify_password(plaintext, stored_hash).map_err(ApiError::Internal)?;
        if !is_valid {
            return Err(ApiError::Unauthenticated(
                "Current password is incorrect".to_string(),
            ));
        }
        Ok(())
    }
}
