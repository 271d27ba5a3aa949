// src/extractors/mod.rs
pub mod email;
pub mod phone;
pub mod social;

pub use email::EmailExtractor;
pub use phone::PhoneExtractor;
pub use social::{SocialLinkMatcher, SocialLinks};
