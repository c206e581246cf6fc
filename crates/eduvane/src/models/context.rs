use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Student,
    Teacher,
}

/// A persisted user profile, as returned by a [`crate::profile::ProfileStore`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub role: UserRole,
    pub name: String,
}

/// Who the engine is talking to. Empty for guest sessions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionContext {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<UserRole>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
}

impl SessionContext {
    pub fn guest() -> Self {
        Self::default()
    }

    pub fn is_guest(&self) -> bool {
        self.role.is_none() && self.user_name.is_none()
    }
}

impl From<UserProfile> for SessionContext {
    fn from(profile: UserProfile) -> Self {
        SessionContext {
            role: Some(profile.role),
            user_name: Some(profile.name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_profile_hydrates_context() {
        let profile: UserProfile =
            serde_json::from_value(json!({"role": "teacher", "name": "Ms. Okafor"})).unwrap();
        let context = SessionContext::from(profile);

        assert_eq!(context.role, Some(UserRole::Teacher));
        assert_eq!(context.user_name.as_deref(), Some("Ms. Okafor"));
        assert!(!context.is_guest());
    }

    #[test]
    fn test_guest_context_serializes_empty() {
        let context = SessionContext::guest();
        assert!(context.is_guest());
        assert_eq!(serde_json::to_value(&context).unwrap(), json!({}));
    }
}
