//! Stateless authentication primitives
//!
//! Provides the building blocks for token-based, server-stateless auth flows:
//! - Signed, expiring tokens with audience separation (HS256)
//! - One-time passcode generation and comparison
//!
//! Services define their own claims types and decide what each token kind
//! carries. Nothing in this crate keeps state between calls.
//!
//! # Examples
//!
//! ## Tokens
//! ```
//! use auth::TokenCodec;
//! use chrono::Duration;
//! use serde_json::json;
//!
//! let codec = TokenCodec::new(b"secret_key_at_least_32_bytes_long!");
//! let token = codec
//!     .encode("access", &json!({ "phoneNumber": "+14155551234" }), Duration::hours(1))
//!     .unwrap();
//! let claims = codec.decode::<serde_json::Value>("access", &token).unwrap();
//! assert_eq!(claims.custom["phoneNumber"], "+14155551234");
//! ```
//!
//! ## Passcodes
//! ```
//! use auth::PasscodeGenerator;
//!
//! let generator = PasscodeGenerator::new();
//! let passcode = generator.generate();
//! assert_eq!(passcode.len(), 6);
//! assert!(generator.verify(&passcode, &passcode));
//! ```

pub mod jwt;
pub mod otp;

// Re-export commonly used items
pub use jwt::Claims;
pub use jwt::TokenCodec;
pub use jwt::TokenError;
pub use otp::PasscodeError;
pub use otp::PasscodeGenerator;
