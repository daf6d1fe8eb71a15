//! Login and registration flows.
//!
//! Credentials are validated locally before any request goes out; a failed
//! validation never touches the network. Backend rejections are mapped to
//! the fixed user-facing messages by the error taxonomy.

use crate::api::ApiClient;
use crate::error::{Error, Result};
use crate::session::Session;

const MIN_PASSWORD_LEN: usize = 6;

/// Check the RFC-light email shape: one `@` with non-blank text before it,
/// and a `.` somewhere after it with non-blank text on both sides.
pub fn is_valid_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    match domain.rsplit_once('.') {
        Some((host, tld)) => !host.is_empty() && !tld.is_empty(),
        None => false,
    }
}

/// Validate login credentials locally, before any network call.
pub fn validate_login(email: &str, password: &str) -> Result<()> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(Error::Validation(
            "Please fill in all required fields".to_string(),
        ));
    }
    if !is_valid_email(email.trim()) {
        return Err(Error::Validation(
            "Please enter a valid email address".to_string(),
        ));
    }
    if password.len() < MIN_PASSWORD_LEN {
        return Err(Error::Validation(
            "Password must be at least 6 characters".to_string(),
        ));
    }
    Ok(())
}

/// Validate registration input: login rules plus a required name.
pub fn validate_register(name: &str, email: &str, password: &str) -> Result<()> {
    if email.trim().is_empty() || password.is_empty() {
        return Err(Error::Validation(
            "Please fill in all required fields".to_string(),
        ));
    }
    if name.trim().is_empty() {
        return Err(Error::Validation("Please enter your name".to_string()));
    }
    if !is_valid_email(email.trim()) {
        return Err(Error::Validation(
            "Please enter a valid email address".to_string(),
        ));
    }
    if password.len() < MIN_PASSWORD_LEN {
        return Err(Error::Validation(
            "Password must be at least 6 characters".to_string(),
        ));
    }
    Ok(())
}

/// Log in and store the returned token in the session.
pub fn login(api: &ApiClient, session: &mut Session, email: &str, password: &str) -> Result<()> {
    validate_login(email, password)?;
    let token = api.login(email.trim(), password)?;
    session.store(token)?;
    Ok(())
}

/// Register a new account. The caller switches back to login on success;
/// no session is created here.
pub fn register(api: &ApiClient, name: &str, email: &str, password: &str) -> Result<()> {
    validate_register(name, email, password)?;
    api.register(name.trim(), email.trim(), password)?;
    Ok(())
}
