pub mod output;
pub mod reconciliation;
pub mod resolver;
