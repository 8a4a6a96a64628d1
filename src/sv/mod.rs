//! Business logic services, one per aggregate

pub mod platform;
pub mod refresh;
pub mod session;
pub mod stats;
pub mod user;

pub use platform::Platforms;
pub use refresh::Refresh;
pub use session::Sessions;
pub use stats::Stats;
pub use user::Users;
