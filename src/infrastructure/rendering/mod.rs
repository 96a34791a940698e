pub mod animation;
pub mod headless;
pub mod svg_renderer;

pub use headless::{BackendCall, HeadlessBackend};
pub use svg_renderer::SvgBackend;
