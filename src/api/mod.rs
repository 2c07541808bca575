mod clients;

use std::collections::HashMap;
use std::fmt;

use serde_json::Value;
use tracing::debug;

use crate::db::Database;
use crate::error::ApiError;

/// Prefix of the versioned route, accepted in front of `/clients`
const VERSION_PREFIX: &str = "/api/v1";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl std::str::FromStr for Method {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(Method::Get),
            "POST" => Ok(Method::Post),
            "PUT" => Ok(Method::Put),
            "PATCH" => Ok(Method::Patch),
            "DELETE" => Ok(Method::Delete),
            _ => Err(format!("unsupported method '{}'", s)),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Request {
    pub method: Method,
    pub path: String,
    pub query: HashMap<String, String>,
    pub body: Option<String>,
}

impl Request {
    /// Parse `METHOD TARGET [BODY]`, where TARGET may carry a `?query`
    pub fn parse(line: &str) -> Result<Self, ApiError> {
        let line = line.trim();
        let (method, rest) = line
            .split_once(char::is_whitespace)
            .unwrap_or((line, ""));
        let method = method.parse::<Method>().map_err(ApiError::InvalidInput)?;

        let rest = rest.trim_start();
        if rest.is_empty() {
            return Err(ApiError::InvalidInput("missing request target".to_string()));
        }
        let (target, body) = match rest.split_once(char::is_whitespace) {
            Some((target, body)) => (target, Some(body.trim().to_string())),
            None => (rest, None),
        };

        let (path, query) = target.split_once('?').unwrap_or((target, ""));

        Ok(Self {
            method,
            path: path.to_string(),
            query: parse_query(query),
            body: body.filter(|b| !b.is_empty()),
        })
    }

    pub fn query_param(&self, key: &str) -> Option<&str> {
        self.query.get(key).map(String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Response {
    pub status: u16,
    pub body: Option<Value>,
}

impl Response {
    pub fn new(status: u16, body: Option<Value>) -> Self {
        Self { status, body }
    }

    pub fn no_content() -> Self {
        Self::new(204, None)
    }
}

impl From<ApiError> for Response {
    fn from(err: ApiError) -> Self {
        Self::new(err.status(), Some(serde_json::json!({ "error": err.to_string() })))
    }
}

impl fmt::Display for Response {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.status, reason(self.status))
    }
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        201 => "Created",
        204 => "No Content",
        400 => "Bad Request",
        404 => "Not Found",
        405 => "Method Not Allowed",
        409 => "Conflict",
        _ => "",
    }
}

/// Route a request to the matching client operation
pub async fn handle(db: &Database, request: &Request) -> Response {
    debug!(method = ?request.method, path = %request.path, "handling request");

    let path = request
        .path
        .strip_prefix(VERSION_PREFIX)
        .unwrap_or(request.path.as_str());
    let segments: Vec<&str> = path.trim_matches('/').split('/').collect();

    let result = match (request.method, segments.as_slice()) {
        (Method::Get, ["clients"]) => Ok(clients::list(db).await),
        (Method::Post, ["clients"]) => clients::create(db, request).await,
        (Method::Get, ["clients", "search"]) => clients::search(db, request).await,
        (Method::Get, ["clients", id]) => match parse_id(id) {
            Ok(id) => clients::get(db, id).await,
            Err(e) => Err(e),
        },
        (Method::Put, ["clients", id]) => match parse_id(id) {
            Ok(id) => clients::update(db, id, request).await,
            Err(e) => Err(e),
        },
        (Method::Patch, ["clients", id]) => match parse_id(id) {
            Ok(id) => clients::set_enabled(db, id, request).await,
            Err(e) => Err(e),
        },
        (Method::Delete, ["clients", id]) => match parse_id(id) {
            Ok(id) => clients::delete(db, id).await,
            Err(e) => Err(e),
        },
        (_, ["clients"]) | (_, ["clients", _]) => return Response::new(405, None),
        _ => return Response::new(404, None),
    };

    result.unwrap_or_else(Response::from)
}

/// Path ids must be positive integers
fn parse_id(segment: &str) -> Result<i32, ApiError> {
    match segment.parse::<i32>() {
        Ok(id) if id > 0 => Ok(id),
        _ => Err(ApiError::InvalidInput(format!(
            "'{}' is not a valid client id",
            segment
        ))),
    }
}

fn parse_query(query: &str) -> HashMap<String, String> {
    query
        .split('&')
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            (decode_component(key), decode_component(value))
        })
        .collect()
}

/// Decode `+` and `%XX` escapes; malformed escapes are kept verbatim
fn decode_component(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        match bytes[i] {
            b'+' => out.push(b' '),
            b'%' if i + 2 < bytes.len()
                && bytes[i + 1].is_ascii_hexdigit()
                && bytes[i + 2].is_ascii_hexdigit() =>
            {
                out.push(hex_value(bytes[i + 1]) << 4 | hex_value(bytes[i + 2]));
                i += 3;
                continue;
            }
            b => out.push(b),
        }
        i += 1;
    }

    String::from_utf8_lossy(&out).into_owned()
}

fn hex_value(digit: u8) -> u8 {
    match digit {
        b'0'..=b'9' => digit - b'0',
        b'a'..=b'f' => digit - b'a' + 10,
        _ => digit - b'A' + 10,
    }
}
