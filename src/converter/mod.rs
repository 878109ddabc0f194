pub mod converter_config;
pub use converter_config::*;

pub mod view_converter;
pub use view_converter::*;
