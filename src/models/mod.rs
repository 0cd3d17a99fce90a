//! Data models

pub mod reading;
pub mod response;

pub use reading::*;
pub use response::*;
