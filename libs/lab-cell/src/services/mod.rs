pub mod lab;
pub mod orders;
