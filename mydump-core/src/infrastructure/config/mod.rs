pub mod connection;
pub mod patterns;

pub use connection::load_connection_config;
pub use patterns::load_pattern_file;
