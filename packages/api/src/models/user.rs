use serde::{Deserialize, Serialize};

/// The logged-in user as returned by `/auth/me` and `/auth/login`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserInfo {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub role: String,
}

impl UserInfo {
    /// Full name, falling back to the email address.
    pub fn display_name(&self) -> &str {
        if self.full_name.trim().is_empty() {
            &self.email
        } else {
            &self.full_name
        }
    }

    pub fn initials(&self) -> String {
        self.display_name()
            .split_whitespace()
            .filter_map(|w| w.chars().next())
            .take(2)
            .flat_map(char::to_uppercase)
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: String,
    pub user: UserInfo,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_name_and_initials() {
        let user = UserInfo {
            email: "admin@zenvit.no".into(),
            full_name: "Kari Nordmann".into(),
            ..Default::default()
        };
        assert_eq!(user.display_name(), "Kari Nordmann");
        assert_eq!(user.initials(), "KN");

        let anon = UserInfo {
            email: "x@zenvit.no".into(),
            ..Default::default()
        };
        assert_eq!(anon.display_name(), "x@zenvit.no");
    }
}
