//! Common validation utilities.

use validator::ValidationError;

lazy_static::lazy_static! {
    /// Phone numbers are digits with an optional leading `+`.
    pub static ref PHONE_REGEX: regex::Regex = regex::Regex::new(r"^\+?[0-9]{5,20}$").unwrap();
    /// Verification codes are exactly six digits.
    pub static ref OTP_REGEX: regex::Regex = regex::Regex::new(r"^[0-9]{6}$").unwrap();
}

/// Gender value stored for male users.
pub const GENDER_MALE: i16 = 1;
/// Gender value stored for female users.
pub const GENDER_FEMALE: i16 = 2;

/// Validates a phone number used as login identity.
pub fn validate_phone(phone: &str) -> Result<(), ValidationError> {
    if PHONE_REGEX.is_match(phone) {
        Ok(())
    } else {
        let mut err = ValidationError::new("phone_format");
        err.message = Some("Phone number must be 5-20 digits".into());
        Err(err)
    }
}

/// Validates a six-digit verification code.
pub fn validate_otp_code(code: &str) -> Result<(), ValidationError> {
    if OTP_REGEX.is_match(code.trim()) {
        Ok(())
    } else {
        let mut err = ValidationError::new("otp_format");
        err.message = Some("Verification code must be 6 digits".into());
        Err(err)
    }
}

/// Validates the gender code (1 = male, 2 = female).
pub fn validate_gender(gender: i16) -> Result<(), ValidationError> {
    if gender == GENDER_MALE || gender == GENDER_FEMALE {
        Ok(())
    } else {
        let mut err = ValidationError::new("gender_value");
        err.message = Some("Gender must be 1 (male) or 2 (female)".into());
        Err(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_phone() {
        assert!(validate_phone("13800138000").is_ok());
        assert!(validate_phone("+8613800138000").is_ok());
        assert!(validate_phone("12345").is_ok());
    }

    #[test]
    fn test_validate_phone_rejects_garbage() {
        assert!(validate_phone("").is_err());
        assert!(validate_phone("1234").is_err());
        assert!(validate_phone("138-0013-8000").is_err());
        assert!(validate_phone("phone").is_err());
        assert!(validate_phone(&"1".repeat(21)).is_err());
    }

    #[test]
    fn test_validate_phone_error_message() {
        let err = validate_phone("abc").unwrap_err();
        assert_eq!(
            err.message.unwrap().to_string(),
            "Phone number must be 5-20 digits"
        );
    }

    #[test]
    fn test_validate_otp_code() {
        assert!(validate_otp_code("123456").is_ok());
        assert!(validate_otp_code(" 123456").is_ok());
        assert!(validate_otp_code("12345").is_err());
        assert!(validate_otp_code("1234567").is_err());
        assert!(validate_otp_code("12a456").is_err());
    }

    #[test]
    fn test_validate_gender() {
        assert!(validate_gender(GENDER_MALE).is_ok());
        assert!(validate_gender(GENDER_FEMALE).is_ok());
        assert!(validate_gender(0).is_err());
        assert!(validate_gender(3).is_err());
    }

    #[test]
    fn test_validate_phone_with_fake_numbers() {
        use fake::faker::number::raw::NumberWithFormat;
        use fake::locales::EN;
        use fake::Fake;

        for _ in 0..20 {
            let phone: String = NumberWithFormat(EN, "1##########").fake();
            assert!(validate_phone(&phone).is_ok(), "{phone}");
        }
    }
}
