pub mod app;
pub mod identity;

pub use app::Config;
pub use identity::IdentityConfig;
