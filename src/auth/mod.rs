pub mod credentials;
pub mod jwt;

pub use credentials::Credentials;
pub use jwt::{DecodeError, TokenPayload, decode_payload, pad_segment, try_decode_payload};
