pub mod connection;

pub use connection::{connect_with_retry, mask_url_password};
