use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Request body for signup. Required fields deserialize as `Option` so an
/// absent field surfaces as a field-level 400, not a deserialization error.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub photo: Option<String>,
}

/// Request body for login. A missing field just fails the credential check,
/// indistinguishable from a wrong password.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

/// Request body for profile update; only these two fields are mutable.
#[derive(Debug, Deserialize)]
pub struct UpdateRequest {
    pub name: Option<String>,
    pub photo: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Returned after a successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub name: String,
}

/// Public view of the profile returned by the dashboard.
#[derive(Debug, Serialize)]
pub struct DashboardResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub photo: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn login_response_serialization() {
        let response = LoginResponse {
            token: "abc.def.ghi".into(),
            name: "Ann".into(),
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("abc.def.ghi"));
        assert!(json.contains("Ann"));
    }

    #[test]
    fn dashboard_response_serialization() {
        let response = DashboardResponse {
            id: Uuid::new_v4(),
            name: "Ann".into(),
            email: "a@x.com".into(),
            photo: None,
        };
        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("a@x.com"));
        assert!(json.contains("id"));
        assert!(json.contains("photo"));
    }

    #[test]
    fn signup_request_tolerates_absent_fields() {
        let req: SignupRequest = serde_json::from_str("{}").unwrap();
        assert!(req.name.is_none());
        assert!(req.email.is_none());
        assert!(req.password.is_none());
        assert!(req.photo.is_none());
    }
}
