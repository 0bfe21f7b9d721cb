//! Domain entities representing core business objects.

pub mod token;


// Re-export commonly used types
pub use token::{
    Claims, RefreshToken, TokenPair,
    ACCESS_TOKEN_VALIDITY_SECONDS, REFRESH_TOKEN_VALIDITY_SECONDS,
};
