use serde::{Deserialize, Serialize};
use std::fmt;

/// Variante de compte. Les trois genres sont mutuellement exclusifs et
/// stockés dans des tables séparées: le couple (role, id) identifie un compte.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    #[serde(rename = "ADMIN")]
    Admin,
    #[serde(rename = "COMPANY")]
    Company,
    #[serde(rename = "STUDENT")]
    Student,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::Company => "COMPANY",
            Role::Student => "STUDENT",
        }
    }

    /// Parse un rôle depuis un paramètre de route (insensible à la casse)
    pub fn parse(value: &str) -> Option<Role> {
        match value.to_ascii_uppercase().as_str() {
            "ADMIN" => Some(Role::Admin),
            "COMPANY" => Some(Role::Company),
            "STUDENT" => Some(Role::Student),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_roundtrip() {
        for role in [Role::Admin, Role::Company, Role::Student] {
            assert_eq!(Role::parse(role.as_str()), Some(role));
        }
        assert_eq!(Role::parse("student"), Some(Role::Student));
        assert_eq!(Role::parse("guest"), None);
    }
}
