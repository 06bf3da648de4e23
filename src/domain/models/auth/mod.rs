//! 인증 도메인 모델

pub mod principal;
pub mod token;

pub use principal::{OptionalPrincipal, Principal};
pub use token::TokenClaims;
