pub mod info;
pub mod init;
pub mod validate;

// Re-export all command functions
pub use info::cmd_info;
pub use init::cmd_init;
pub use validate::cmd_validate;
