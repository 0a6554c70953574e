pub mod flash;
pub mod geo;
pub mod html;
pub mod jwt;
pub mod multipart;
pub mod pagination;
pub mod serde_ext;
pub mod validation;
