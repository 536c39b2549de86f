pub mod catalog;
pub mod treatment;
