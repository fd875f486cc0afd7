pub mod classify;
pub mod patterns;
