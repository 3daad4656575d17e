use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::config::AppConfig;
use crate::models::role::Role;

/// Claims portés par les deux tokens: identité du compte + échéances
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: i32, // id du compte (dans l'espace d'ids de sa variante)
    pub email: String,
    pub role: Role,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, PartialEq, Eq)]
pub enum TokenError {
    Expired,
    Invalid,
}

#[derive(Debug, Serialize)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Génère un JWT signé pour un compte
pub fn generate_token(
    id: i32,
    email: &str,
    role: Role,
    secret: &str,
    ttl_secs: i64,
) -> Result<String, String> {
    let now = Utc::now();
    let expiration = now
        .checked_add_signed(Duration::seconds(ttl_secs))
        .ok_or("Failed to calculate expiration")?
        .timestamp();

    let claims = Claims {
        sub: id,
        email: email.to_string(),
        role,
        iat: now.timestamp(),
        exp: expiration,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_ref()),
    )
    .map_err(|e| format!("Failed to generate token: {}", e))
}

/// Génère la paire access + refresh
/// Les deux tokens sont signés avec des secrets DISTINCTS: la fuite du
/// secret refresh ne permet pas de forger des access tokens, et inversement
pub fn generate_token_pair(
    id: i32,
    email: &str,
    role: Role,
    config: &AppConfig,
) -> Result<TokenPair, String> {
    let access_token = generate_token(id, email, role, &config.access_secret, config.access_ttl_secs)?;
    let refresh_token =
        generate_token(id, email, role, &config.refresh_secret, config.refresh_ttl_secs)?;

    Ok(TokenPair {
        access_token,
        refresh_token,
    })
}

/// Vérifie et décode un JWT contre le secret donné
/// Expired et Invalid sont distingués pour que la couche HTTP puisse
/// renvoyer un message exploitable
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, TokenError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0; // expiration exacte

    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|e| match e.kind() {
        jsonwebtoken::errors::ErrorKind::ExpiredSignature => TokenError::Expired,
        _ => TokenError::Invalid,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> AppConfig {
        AppConfig {
            database_url: String::new(),
            bind_addr: String::new(),
            access_secret: "access-secret-for-tests".to_string(),
            refresh_secret: "refresh-secret-for-tests".to_string(),
            access_ttl_secs: 900,
            refresh_ttl_secs: 604800,
        }
    }

    #[test]
    fn test_pair_round_trip() {
        let config = test_config();
        let pair = generate_token_pair(42, "etudiant@example.com", Role::Student, &config).unwrap();

        let access = verify_token(&pair.access_token, &config.access_secret).unwrap();
        assert_eq!(access.sub, 42);
        assert_eq!(access.email, "etudiant@example.com");
        assert_eq!(access.role, Role::Student);

        let refresh = verify_token(&pair.refresh_token, &config.refresh_secret).unwrap();
        assert_eq!(refresh.sub, 42);
        assert_eq!(refresh.role, Role::Student);
    }

    #[test]
    fn test_secrets_are_not_interchangeable() {
        let config = test_config();
        let pair = generate_token_pair(7, "rh@entreprise.com", Role::Company, &config).unwrap();

        // Un refresh token vérifié avec le secret access est invalide (et vice versa)
        assert_eq!(
            verify_token(&pair.refresh_token, &config.access_secret).unwrap_err(),
            TokenError::Invalid
        );
        assert_eq!(
            verify_token(&pair.access_token, &config.refresh_secret).unwrap_err(),
            TokenError::Invalid
        );
    }

    #[test]
    fn test_expired_token() {
        let config = test_config();
        // ttl négatif: déjà expiré au moment de l'émission
        let token =
            generate_token(1, "admin@example.com", Role::Admin, &config.access_secret, -10).unwrap();

        assert_eq!(
            verify_token(&token, &config.access_secret).unwrap_err(),
            TokenError::Expired
        );
    }

    #[test]
    fn test_garbage_token_invalid() {
        let config = test_config();
        assert_eq!(
            verify_token("invalid.token.here", &config.access_secret).unwrap_err(),
            TokenError::Invalid
        );
    }
}
