#![forbid(unsafe_code)]

pub mod harness;
pub mod invoker;
pub mod strategy;
