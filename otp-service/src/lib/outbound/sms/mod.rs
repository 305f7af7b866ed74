pub mod logging;

pub use logging::LoggingPasscodeSender;
