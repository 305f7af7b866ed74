use std::ops::RangeInclusive;

use rand::rngs::OsRng;
use rand::Rng;
use subtle::ConstantTimeEq;

use super::errors::PasscodeError;

/// One-time passcode generation and comparison.
///
/// Passcodes are six decimal digits drawn uniformly from the OS random
/// source. The range starts at 100000, so there is never a leading zero.
pub struct PasscodeGenerator;

impl PasscodeGenerator {
    pub const LENGTH: usize = 6;
    const RANGE: RangeInclusive<u32> = 100_000..=999_999;

    /// Create a new passcode generator.
    pub fn new() -> Self {
        Self
    }

    /// Generate a fresh passcode.
    ///
    /// # Returns
    /// Six-digit decimal string
    pub fn generate(&self) -> String {
        OsRng.gen_range(Self::RANGE).to_string()
    }

    /// Compare a supplied passcode with the expected one.
    ///
    /// Exact string equality, evaluated in constant time over the bytes so the
    /// comparison does not hint at how many leading characters matched.
    pub fn verify(&self, supplied: &str, expected: &str) -> bool {
        supplied.as_bytes().ct_eq(expected.as_bytes()).into()
    }

    /// Check that a string has passcode shape.
    ///
    /// # Errors
    /// * `InvalidLength` - Not exactly six characters
    /// * `NonDigit` - Contains anything other than ASCII digits
    pub fn validate_format(&self, passcode: &str) -> Result<(), PasscodeError> {
        if passcode.len() != Self::LENGTH {
            return Err(PasscodeError::InvalidLength {
                expected: Self::LENGTH,
                actual: passcode.len(),
            });
        }

        if !passcode.bytes().all(|b| b.is_ascii_digit()) {
            return Err(PasscodeError::NonDigit);
        }

        Ok(())
    }
}

impl Default for PasscodeGenerator {
    fn default() -> Self {
        Self::new()
    }
}
