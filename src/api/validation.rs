use super::ApiError;

pub fn validate_record_id(id: i32) -> Result<i32, ApiError> {
    if id <= 0 {
        return Err(ApiError::validation(format!(
            "Invalid ID: {}. ID must be a positive integer",
            id
        )));
    }
    Ok(id)
}

pub fn validate_username(username: &str) -> Result<&str, ApiError> {
    let trimmed = username.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation("Username cannot be empty"));
    }

    if trimmed.len() > 100 {
        return Err(ApiError::validation(
            "Username must be 100 characters or less",
        ));
    }

    Ok(trimmed)
}

pub fn validate_email(email: &str) -> Result<&str, ApiError> {
    let trimmed = email.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation("Email cannot be empty"));
    }

    if trimmed.len() > 100 {
        return Err(ApiError::validation("Email must be 100 characters or less"));
    }

    // Real validation belongs to the mail layer; this only rejects
    // obvious non-addresses.
    if !trimmed.contains('@') {
        return Err(ApiError::validation(format!(
            "'{}' is not a valid email address",
            trimmed
        )));
    }

    Ok(trimmed)
}

pub fn validate_password(password: &str) -> Result<&str, ApiError> {
    if password.len() < 8 {
        return Err(ApiError::validation(
            "Password must be at least 8 characters",
        ));
    }
    Ok(password)
}

pub fn validate_cafe_name(name: &str) -> Result<&str, ApiError> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation("Cafe name cannot be empty"));
    }

    if trimmed.len() > 250 {
        return Err(ApiError::validation(
            "Cafe name must be 250 characters or less",
        ));
    }

    Ok(trimmed)
}

pub fn validate_location(location: &str) -> Result<&str, ApiError> {
    let trimmed = location.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation("Location cannot be empty"));
    }
    Ok(trimmed)
}

pub fn validate_price(price: &str) -> Result<&str, ApiError> {
    let trimmed = price.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation("Price cannot be empty"));
    }

    if trimmed.len() > 250 {
        return Err(ApiError::validation("Price must be 250 characters or less"));
    }

    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_record_id() {
        assert!(validate_record_id(1).is_ok());
        assert!(validate_record_id(12345).is_ok());
        assert!(validate_record_id(0).is_err());
        assert!(validate_record_id(-1).is_err());
    }

    #[test]
    fn test_validate_username() {
        assert!(validate_username("maria").is_ok());
        assert_eq!(validate_username("  maria  ").unwrap(), "maria");
        assert!(validate_username("").is_err());
        assert!(validate_username("   ").is_err());
        assert!(validate_username(&"a".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_email() {
        assert!(validate_email("maria@example.com").is_ok());
        assert!(validate_email("not-an-address").is_err());
        assert!(validate_email("").is_err());
    }

    #[test]
    fn test_validate_password() {
        assert!(validate_password("long enough").is_ok());
        assert!(validate_password("short").is_err());
    }

    #[test]
    fn test_validate_cafe_name() {
        assert!(validate_cafe_name("Blue Bottle").is_ok());
        assert!(validate_cafe_name("").is_err());
        assert!(validate_cafe_name(&"a".repeat(251)).is_err());
    }

    #[test]
    fn test_validate_location() {
        assert_eq!(validate_location(" Paris ").unwrap(), "Paris");
        assert!(validate_location("  ").is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price("$3.50").is_ok());
        assert!(validate_price("").is_err());
    }
}
