//! JWT token handling
//!
//! Bearer tokens issued at login and checked on every authenticated request.

mod handler;
pub mod types;


pub use handler::JwtHandler;
pub use types::Claims;
