//! Chart aggregate: scales, markers, label groups and the drawing port.

pub mod backend;
pub mod config;
pub mod entities;
pub mod services;
pub mod tooltip;
pub mod transition;
pub mod value_objects;

pub use backend::*;
pub use config::*;
pub use entities::*;
pub use services::*;
pub use tooltip::*;
pub use value_objects::*;
