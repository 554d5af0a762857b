//! Shared utilities and common types for the promo-shop backend.
//!
//! This crate provides common functionality used across all other crates:
//! - Cryptographic utilities (hashing, session token generation)
//! - Password hashing with Argon2id
//! - One-time password generation
//! - Common validation logic

pub mod crypto;
pub mod otp;
pub mod password;
pub mod validation;
