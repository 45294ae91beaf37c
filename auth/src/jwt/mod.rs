pub mod claims;
pub mod codec;
pub mod errors;

pub use claims::token_lifetime;
pub use claims::Claims;
pub use claims::TOKEN_LIFETIME_DAYS;
pub use codec::TokenCodec;
pub use errors::TokenError;
