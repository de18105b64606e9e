use thiserror::Error;

/// Who is taking the quiz.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDetails {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Name and email are required to start the quiz.")]
    MissingField,
    #[error("Please enter a valid email address.")]
    InvalidEmail,
}

impl UserDetails {
    /// Trims both fields and checks they can start a quiz.
    pub fn parse(name: &str, email: &str) -> Result<Self, ValidationError> {
        let name = name.trim();
        let email = email.trim();

        if name.is_empty() || email.is_empty() {
            return Err(ValidationError::MissingField);
        }
        if !looks_like_email(email) {
            return Err(ValidationError::InvalidEmail);
        }

        Ok(Self {
            name: name.to_string(),
            email: email.to_string(),
        })
    }
}

/// Same bar as an HTML `type="email"` input: one `@` with text on both sides
/// and no whitespace.
fn looks_like_email(email: &str) -> bool {
    if email.chars().any(char::is_whitespace) {
        return false;
    }
    match email.split_once('@') {
        Some((local, domain)) => !local.is_empty() && !domain.is_empty() && !domain.contains('@'),
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_user_details() {
        let user = UserDetails::parse("  Ada ", "ada@example.com ").unwrap();
        assert_eq!(user.name, "Ada");
        assert_eq!(user.email, "ada@example.com");
    }

    #[test]
    fn test_parse_requires_both_fields() {
        assert_eq!(
            UserDetails::parse("", "ada@example.com"),
            Err(ValidationError::MissingField)
        );
        assert_eq!(UserDetails::parse("Ada", ""), Err(ValidationError::MissingField));
        assert_eq!(UserDetails::parse("   ", "  "), Err(ValidationError::MissingField));
    }

    #[test]
    fn test_parse_rejects_malformed_email() {
        for email in ["ada", "@example.com", "ada@", "ada@@example.com", "a da@example.com"] {
            assert_eq!(
                UserDetails::parse("Ada", email),
                Err(ValidationError::InvalidEmail),
                "{email}"
            );
        }
    }
}
