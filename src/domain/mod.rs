pub mod census;
pub mod chart;
pub mod errors;
pub mod events;
pub mod logging;
