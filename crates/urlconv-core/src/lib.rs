pub mod config;
pub mod convert;
pub mod error;
pub mod logging;
pub mod record;
pub mod url_model;

pub use convert::{Converter, Direction};
pub use error::{ConvertError, UrlErrorKind};
pub use record::{QueryMap, UrlRecord, Userinfo};
