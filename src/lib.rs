pub mod config;
pub mod db;
pub mod error;
pub mod http_error;
pub mod kernel;
pub mod plugins;


pub use crate::kernel::*;
pub use crate::db::*;
