//! HTTP client for the task backend.
//!
//! A thin blocking wrapper around the REST API: one `request` entry point
//! that attaches the bearer token when present and converts transport
//! failures and non-2xx statuses into the typed error taxonomy, plus typed
//! helpers for each endpoint.

use reqwest::blocking::Client;
use reqwest::{Method, StatusCode};
use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::task::{Task, TaskPatch};

/// Client for the task backend REST API
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

/// Response body of `POST /login`
#[derive(Debug, Deserialize)]
pub struct LoginResponse {
    pub token: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: Client::new(),
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issue a request and return the parsed JSON body.
    ///
    /// Attaches `Authorization: Bearer <token>` when a token is supplied.
    /// Bodiless success responses (204) yield `Value::Null`.
    pub fn request(
        &self,
        method: Method,
        path: &str,
        body: Option<&Value>,
        token: Option<&str>,
    ) -> Result<Value> {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%method, %url, "api request");

        let mut builder = self.http.request(method, &url);
        if let Some(token) = token {
            builder = builder.bearer_auth(token);
        }
        if let Some(body) = body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .map_err(|err| Error::Network(err.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .map_err(|err| Error::Network(err.to_string()))?;
        tracing::debug!(status = status.as_u16(), "api response");

        if status.is_success() {
            if text.trim().is_empty() {
                return Ok(Value::Null);
            }
            return serde_json::from_str(&text).map_err(Error::Json);
        }

        Err(error_for_status(status, &text))
    }

    // =========================================================================
    // Typed endpoints
    // =========================================================================

    /// `POST /register` with name, email, and password
    pub fn register(&self, name: &str, email: &str, password: &str) -> Result<()> {
        let body = serde_json::json!({
            "name": name,
            "email": email,
            "password": password,
        });
        self.request(Method::POST, "/register", Some(&body), None)?;
        Ok(())
    }

    /// `POST /login`, returning the bearer token
    pub fn login(&self, email: &str, password: &str) -> Result<String> {
        let body = serde_json::json!({
            "email": email,
            "password": password,
        });
        let value = self.request(Method::POST, "/login", Some(&body), None)?;
        let parsed: LoginResponse = serde_json::from_value(value)?;
        Ok(parsed.token)
    }

    /// `GET /tasks` for the current session
    pub fn list_tasks(&self, token: &str) -> Result<Vec<Task>> {
        let value = self.request(Method::GET, "/tasks", None, Some(token))?;
        let tasks: Vec<Task> = serde_json::from_value(value)?;
        Ok(tasks)
    }

    /// `POST /tasks` with title and description
    pub fn create_task(&self, token: &str, title: &str, description: &str) -> Result<Task> {
        let body = serde_json::json!({
            "title": title,
            "description": description,
        });
        let value = self.request(Method::POST, "/tasks", Some(&body), Some(token))?;
        let task: Task = serde_json::from_value(value)?;
        Ok(task)
    }

    /// `PUT /tasks/:id` with a partial update
    pub fn update_task(&self, token: &str, id: &str, patch: &TaskPatch) -> Result<Task> {
        let body = serde_json::to_value(patch)?;
        let path = format!("/tasks/{id}");
        let value = self.request(Method::PUT, &path, Some(&body), Some(token))?;
        let task: Task = serde_json::from_value(value)?;
        Ok(task)
    }

    /// `DELETE /tasks/:id` (backend answers 204 or 200)
    pub fn delete_task(&self, token: &str, id: &str) -> Result<()> {
        let path = format!("/tasks/{id}");
        self.request(Method::DELETE, &path, None, Some(token))?;
        Ok(())
    }
}

/// Map a non-2xx response to the error taxonomy, carrying the parsed
/// server message when the body has one.
fn error_for_status(status: StatusCode, body: &str) -> Error {
    let message = extract_message(body);
    match status.as_u16() {
        400 | 401 => Error::Auth {
            status: status.as_u16(),
            message,
        },
        409 => Error::Conflict(message),
        500..=599 => Error::Server(message),
        other => Error::Unexpected {
            status: other,
            message,
        },
    }
}

/// Pull the human message out of an error body: `{"message": ...}` or
/// `{"error": ...}`, otherwise empty.
fn extract_message(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<Value>(body) else {
        return String::new();
    };
    value
        .get("message")
        .or_else(|| value.get("error"))
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = ApiClient::new("http://localhost:5000/api/");
        assert_eq!(client.base_url(), "http://localhost:5000/api");
    }

    #[test]
    fn error_mapping_follows_status_taxonomy() {
        let err = error_for_status(StatusCode::UNAUTHORIZED, "{}");
        assert!(matches!(err, Error::Auth { status: 401, .. }));

        let err = error_for_status(StatusCode::CONFLICT, r#"{"message":"Email exists"}"#);
        assert!(matches!(err, Error::Conflict(message) if message == "Email exists"));

        let err = error_for_status(StatusCode::INTERNAL_SERVER_ERROR, "");
        assert!(matches!(err, Error::Server(_)));

        let err = error_for_status(StatusCode::IM_A_TEAPOT, "not json");
        assert!(matches!(err, Error::Unexpected { status: 418, .. }));
    }

    #[test]
    fn extract_message_reads_message_then_error() {
        assert_eq!(extract_message(r#"{"message":"nope"}"#), "nope");
        assert_eq!(extract_message(r#"{"error":"bad"}"#), "bad");
        assert_eq!(extract_message("plain text"), "");
    }
}
