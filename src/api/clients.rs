use serde::de::DeserializeOwned;
use serde_json::json;

use super::{Request, Response};
use crate::db::Database;
use crate::error::ApiError;
use crate::models::{CreateClientRequest, Gender, IdResponse, UpdateClientRequest};
use crate::query::{self, ClientFilter, ClientList};

/// GET /clients/{id}
pub async fn get(db: &Database, id: i32) -> Result<Response, ApiError> {
    let client = query::find_by_id(db, id).await?;
    Ok(Response::new(200, Some(json!(client))))
}

/// GET /clients/search?name=&gender=
pub async fn search(db: &Database, request: &Request) -> Result<Response, ApiError> {
    let gender = match request.query_param("gender").filter(|g| !g.is_empty()) {
        Some(raw) => Some(raw.parse::<Gender>().map_err(ApiError::InvalidInput)?),
        None => None,
    };
    let name = request.query_param("name").map(str::to_string);

    let clients = query::search(db, &ClientFilter::new(name, gender)).await?;
    Ok(Response::new(200, Some(json!(clients))))
}

/// GET /clients
pub async fn list(db: &Database) -> Response {
    match query::list_all(db).await {
        ClientList::Empty => Response::no_content(),
        ClientList::Clients(clients) => Response::new(200, Some(json!(clients))),
    }
}

/// POST /clients
pub async fn create(db: &Database, request: &Request) -> Result<Response, ApiError> {
    let fields = parse_body::<CreateClientRequest>(request)?.validate()?;
    let id = db.create_client(fields).await.ok_or(ApiError::IdsExhausted)?;

    Ok(Response::new(201, Some(json!(IdResponse { id }))))
}

/// PUT /clients/{id}
///
/// Overwrites name, email, gender and phone. Timestamps and `enabled` are kept
pub async fn update(db: &Database, id: i32, request: &Request) -> Result<Response, ApiError> {
    let fields = parse_body::<UpdateClientRequest>(request)?.validate(id)?;

    if !db.update_client_fields(id, fields).await {
        return Err(ApiError::NotFound(id));
    }

    Ok(Response::new(200, Some(json!(IdResponse { id }))))
}

/// PATCH /clients/{id}?enabled=bool
pub async fn set_enabled(db: &Database, id: i32, request: &Request) -> Result<Response, ApiError> {
    let enabled = match request.query_param("enabled") {
        Some(raw) => raw.to_ascii_lowercase().parse::<bool>().map_err(|_| {
            ApiError::InvalidInput(format!("'{}' is not a valid value for enabled", raw))
        })?,
        None => return Err(ApiError::InvalidInput("'enabled' is required".to_string())),
    };

    if !db.set_client_enabled(id, enabled).await {
        return Err(ApiError::NotFound(id));
    }

    Ok(Response::new(200, Some(json!(IdResponse { id }))))
}

/// DELETE /clients/{id}
pub async fn delete(db: &Database, id: i32) -> Result<Response, ApiError> {
    match db.delete_client(id).await {
        Some(_) => Ok(Response::no_content()),
        None => Err(ApiError::NotFound(id)),
    }
}

fn parse_body<T: DeserializeOwned>(request: &Request) -> Result<T, ApiError> {
    let body = request
        .body
        .as_deref()
        .ok_or_else(|| ApiError::InvalidInput("request body is required".to_string()))?;

    serde_json::from_str(body).map_err(|e| ApiError::InvalidInput(format!("malformed body: {}", e)))
}
