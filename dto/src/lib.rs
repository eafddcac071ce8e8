pub mod booking;
pub mod credentials;
pub mod error;
pub mod import_summary;
pub mod membership;
pub mod page;
pub mod seva;
pub mod user;
mod validation;
