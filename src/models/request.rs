use serde::Deserialize;

use super::Gender;
use crate::error::ApiError;

/// The editable fields of a client, once presence has been checked
#[derive(Debug, Clone, PartialEq)]
pub struct ClientFields {
    pub name: String,
    pub email: String,
    pub gender: Gender,
    pub phone: String,
}

/// Payload of `POST /clients`
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct CreateClientRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub gender: Option<Gender>,
    pub phone: Option<String>,
}

impl CreateClientRequest {
    /// Every field is required and string fields must not be empty
    pub fn validate(self) -> Result<ClientFields, ApiError> {
        Ok(ClientFields {
            name: required_text("name", self.name)?,
            email: required_text("email", self.email)?,
            gender: self.gender.ok_or_else(|| missing("gender"))?,
            phone: required_text("phone", self.phone)?,
        })
    }
}

/// Payload of `PUT /clients/{id}`
#[derive(Deserialize, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateClientRequest {
    pub id: Option<i32>,
    pub name: Option<String>,
    pub email: Option<String>,
    pub gender: Option<Gender>,
    pub phone: Option<String>,
}

impl UpdateClientRequest {
    /// Checks presence and that the body id matches the one in the path
    pub fn validate(self, path_id: i32) -> Result<ClientFields, ApiError> {
        let id = self.id.ok_or_else(|| missing("id"))?;
        if id != path_id {
            return Err(ApiError::InvalidInput(format!(
                "body id {} does not match path id {}",
                id, path_id
            )));
        }

        CreateClientRequest {
            name: self.name,
            email: self.email,
            gender: self.gender,
            phone: self.phone,
        }
        .validate()
    }
}

fn missing(field: &str) -> ApiError {
    ApiError::InvalidInput(format!("'{}' is required", field))
}

fn required_text(field: &str, value: Option<String>) -> Result<String, ApiError> {
    match value {
        Some(text) if !text.is_empty() => Ok(text),
        _ => Err(missing(field)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_create() -> CreateClientRequest {
        serde_json::from_str(
            r#"{"name":"Rui Costa","email":"rui.costa@api.doc","gender":"Male","phone":"(21) 5555-0101"}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_create_request_validates() {
        let fields = full_create().validate().unwrap();
        assert_eq!(fields.name, "Rui Costa");
        assert_eq!(fields.gender, Gender::Male);
    }

    #[test]
    fn test_create_request_rejects_missing_and_empty_fields() {
        let mut request = full_create();
        request.phone = None;
        assert!(matches!(request.validate(), Err(ApiError::InvalidInput(_))));

        let mut request = full_create();
        request.name = Some(String::new());
        assert!(matches!(request.validate(), Err(ApiError::InvalidInput(_))));

        let mut request = full_create();
        request.gender = None;
        assert!(matches!(request.validate(), Err(ApiError::InvalidInput(_))));
    }

    #[test]
    fn test_update_request_requires_matching_id() {
        let request: UpdateClientRequest = serde_json::from_str(
            r#"{"id":4,"name":"Rui Costa","email":"rui@api.doc","gender":"Male","phone":"1"}"#,
        )
        .unwrap();
        assert!(matches!(request.validate(5), Err(ApiError::InvalidInput(_))));

        let request: UpdateClientRequest = serde_json::from_str(
            r#"{"name":"Rui Costa","email":"rui@api.doc","gender":"Male","phone":"1"}"#,
        )
        .unwrap();
        assert!(matches!(request.validate(4), Err(ApiError::InvalidInput(_))));
    }

    #[test]
    fn test_update_request_accepts_matching_id() {
        let request: UpdateClientRequest = serde_json::from_str(
            r#"{"id":4,"name":"Rui Costa","email":"rui@api.doc","gender":"Female","phone":"1"}"#,
        )
        .unwrap();
        let fields = request.validate(4).unwrap();
        assert_eq!(fields.gender, Gender::Female);
    }
}
