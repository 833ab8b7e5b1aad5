//! Signed-in user identity and organization roles.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Organization role. Declaration order is the privilege order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Deserialize, Serialize)]
pub enum OrgRole {
    #[default]
    None,
    Viewer,
    Editor,
    Admin,
}

impl OrgRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrgRole::None => "None",
            OrgRole::Viewer => "Viewer",
            OrgRole::Editor => "Editor",
            OrgRole::Admin => "Admin",
        }
    }

    /// True if this role grants at least `other`.
    pub fn includes(&self, other: OrgRole) -> bool {
        *self >= other
    }
}

impl fmt::Display for OrgRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The user a request runs as.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct SignedInUser {
    pub user_id: i64,
    pub org_id: i64,
    pub org_name: String,
    pub org_role: OrgRole,
    pub login: String,
    pub name: String,
    pub email: String,
    pub is_server_admin: bool,
    pub is_anonymous: bool,
}

impl SignedInUser {
    /// True if the user's org role is at least `role`.
    pub fn has_role(&self, role: OrgRole) -> bool {
        self.org_role.includes(role)
    }

    /// A copy of this user with `role` as org role.
    pub fn with_role(&self, role: OrgRole) -> Self {
        Self {
            org_role: role,
            ..self.clone()
        }
    }
}

/// Session token the request was authenticated with.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct UserToken {
    pub id: i64,
    pub user_id: i64,
    pub auth_token: String,
    pub client_ip: String,
    pub user_agent: String,
    /// Unix seconds.
    pub created_at: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_order() {
        assert!(OrgRole::None < OrgRole::Viewer);
        assert!(OrgRole::Viewer < OrgRole::Editor);
        assert!(OrgRole::Editor < OrgRole::Admin);
    }

    #[test]
    fn test_has_role() {
        let user = SignedInUser {
            org_role: OrgRole::Editor,
            ..Default::default()
        };
        assert!(user.has_role(OrgRole::Viewer));
        assert!(user.has_role(OrgRole::Editor));
        assert!(!user.has_role(OrgRole::Admin));
        assert!(!SignedInUser::default().has_role(OrgRole::Viewer));
    }

    #[test]
    fn test_with_role_keeps_other_fields() {
        let user = SignedInUser {
            user_id: 3,
            org_id: 1,
            login: "alice".into(),
            org_role: OrgRole::Viewer,
            ..Default::default()
        };
        let editor = user.with_role(OrgRole::Editor);
        assert_eq!(editor.org_role, OrgRole::Editor);
        assert_eq!(editor.login, "alice");
        assert_eq!(editor.user_id, 3);
        assert_eq!(user.org_role, OrgRole::Viewer);
    }

    #[test]
    fn test_role_deserialize() {
        let role: OrgRole = serde_json::from_str("\"Admin\"").unwrap();
        assert_eq!(role, OrgRole::Admin);
        assert_eq!(role.to_string(), "Admin");
    }
}
