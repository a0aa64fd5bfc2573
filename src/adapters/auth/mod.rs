//! Authentication adapters implementing the `SessionValidator` port.
//!
//! - `jwt` - HS256 tokens signed by the console's login service
//! - `mock` - fixed bearer strings for tests and local development

mod jwt;
mod mock;

pub use jwt::{JwtSessionValidator, SessionClaims};
pub use mock::MockSessionValidator;
