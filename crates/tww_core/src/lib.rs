pub mod checksum;
pub mod codec;
pub mod core_api;
pub mod layout;
pub mod save;
