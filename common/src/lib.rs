#[macro_use]
extern crate log;

pub mod config;
pub mod error;
pub mod file_utils;
pub mod json;
pub mod listify;
pub mod naming;
pub mod path_builder;

pub use error::{format_error, Error};
pub use json::{load_json, save_json, Encoding, JsonOptions};
pub use listify::listify;
pub use naming::{get_ext, get_filename, normalize_path};
pub use path_builder::PathBuilder;

pub const VERSION: &'static str = env!("CARGO_PKG_VERSION");
