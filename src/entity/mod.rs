//! SeaORM entity definitions

pub mod badge;
pub mod contest;
pub mod language;
pub mod platform;
pub mod profile;
pub mod session;
pub mod submission;
pub mod user;

pub use platform::Platform;
