use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalaryRange {
    pub min: Number,
    pub max: Number,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Preferences {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_alerts: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_notifications: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub locations: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industries: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub salary_range: Option<SalaryRange>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub remote_preference: Option<String>,
}

/// A user's career profile as stored under `userId` in the profiles collection.
///
/// Every attribute is optional on the wire: profiles are created wholesale by
/// POST and later patched field by field, so absent fields must stay absent
/// rather than being written back as nulls. Attributes without a typed field
/// are carried in `extra` and stored as sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub skills: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_role: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub career_stage: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub graduation_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<Preferences>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_analysis: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl UserProfile {
    pub fn skills(&self) -> &[String] {
        self.skills.as_deref().unwrap_or_default()
    }

    pub fn locations(&self) -> &[String] {
        self.preferences
            .as_ref()
            .and_then(|p| p.locations.as_deref())
            .unwrap_or_default()
    }

    pub fn industries(&self) -> &[String] {
        self.preferences
            .as_ref()
            .and_then(|p| p.industries.as_deref())
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_absent_fields_stay_absent() {
        let profile: UserProfile =
            serde_json::from_value(json!({"userId": "u1", "skills": ["Python"]})).unwrap();
        assert_eq!(
            serde_json::to_value(&profile).unwrap(),
            json!({"userId": "u1", "skills": ["Python"]})
        );
    }

    #[test]
    fn test_preference_accessors_default_to_empty() {
        let profile = UserProfile::default();
        assert!(profile.skills().is_empty());
        assert!(profile.locations().is_empty());
        assert!(profile.industries().is_empty());
    }

    #[test]
    fn test_untyped_attributes_survive_round_trip() {
        let sent = json!({"userId": "u1", "experienceYears": 4, "linkedin": "in/u1"});
        let profile: UserProfile = serde_json::from_value(sent.clone()).unwrap();
        assert_eq!(profile.extra["experienceYears"], 4);
        assert_eq!(serde_json::to_value(&profile).unwrap(), sent);
    }

    #[test]
    fn test_wrong_field_type_is_rejected() {
        let result = serde_json::from_value::<UserProfile>(json!({"skills": "Python"}));
        assert!(result.is_err());
    }
}
