//! One-time password generation for phone verification.

use rand::Rng;

/// Smallest code handed out; keeps every code at six digits.
pub const OTP_MIN: u32 = 100_000;
/// Largest code handed out.
pub const OTP_MAX: u32 = 999_999;

/// Generates a six-digit numeric verification code.
pub fn generate_otp_code() -> String {
    let code = rand::thread_rng().gen_range(OTP_MIN..=OTP_MAX);
    code.to_string()
}

/// Compares a submitted code with the issued one without short-circuiting.
pub fn otp_matches(submitted: &str, issued: &str) -> bool {
    let a = submitted.trim().as_bytes();
    let b = issued.as_bytes();
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
