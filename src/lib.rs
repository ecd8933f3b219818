pub mod config;
pub mod converter;
pub mod emitter;
pub mod error;
pub mod logger;
pub mod post;
pub mod source;
mod text_utils;
mod test_data;
