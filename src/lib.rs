#[macro_use]
extern crate tracing;

#[macro_use]
pub mod cli;
