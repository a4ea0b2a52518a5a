//! Input validation shared by the domain managers

use crate::error::{ServiceError, ServiceResult};

/// Profile contact number: exactly 11 digits.
pub fn is_contact_phone(phone: &str) -> bool {
    phone.len() == 11 && phone.bytes().all(|b| b.is_ascii_digit())
}

/// CN mobile number for shipping: 11 digits, `1` then `3`-`9`.
pub fn is_mobile_phone(phone: &str) -> bool {
    let bytes = phone.as_bytes();
    bytes.len() == 11
        && bytes[0] == b'1'
        && (b'3'..=b'9').contains(&bytes[1])
        && bytes.iter().all(|b| b.is_ascii_digit())
}

/// `local@domain.tld`, no whitespace, single `@`.
pub fn is_email(email: &str) -> bool {
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

pub fn check_registration(username: &str, password: &str) -> ServiceResult<()> {
    if username.is_empty() || password.is_empty() {
        return Err(ServiceError::InvalidInput(
            "username and password are required".to_string(),
        ));
    }
    if username.chars().count() < 3 {
        return Err(ServiceError::InvalidInput(
            "username must be at least 3 characters".to_string(),
        ));
    }
    check_password(password)
}

pub fn check_password(password: &str) -> ServiceResult<()> {
    if password.chars().count() < 6 {
        return Err(ServiceError::InvalidInput(
            "password must be at least 6 characters".to_string(),
        ));
    }
    Ok(())
}

pub fn check_address(recipient_name: &str, phone: &str, full_address: &str) -> ServiceResult<()> {
    if recipient_name.trim().is_empty() {
        return Err(ServiceError::InvalidInput(
            "recipient name is required".to_string(),
        ));
    }
    if !is_mobile_phone(phone) {
        return Err(ServiceError::InvalidInput(
            "phone must be a valid mobile number".to_string(),
        ));
    }
    if full_address.trim().chars().count() < 5 {
        return Err(ServiceError::InvalidInput(
            "address must be at least 5 characters".to_string(),
        ));
    }
    Ok(())
}
