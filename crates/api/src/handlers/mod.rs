pub mod annotation;
pub mod heat;
pub mod log;
