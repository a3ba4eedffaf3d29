#[cfg(test)]
pub mod common;

mod operations_flow;
