#[macro_use]
extern crate log;

pub mod clock;
pub mod http;
pub mod parser;

pub use http::execute;
