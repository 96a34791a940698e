//! Census aggregate: survey rows and the fields an axis may show.

pub mod entities;
pub mod repositories;
pub mod value_objects;

pub use entities::*;
pub use repositories::*;
pub use value_objects::*;
