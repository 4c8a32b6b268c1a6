// Integration tests for migstate

pub mod helpers;
pub mod unit;
