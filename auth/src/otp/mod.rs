pub mod errors;
pub mod passcode;

pub use errors::PasscodeError;
pub use passcode::PasscodeGenerator;
