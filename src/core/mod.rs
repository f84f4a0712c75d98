pub mod constants;
pub mod cutout;
pub mod layout;
pub mod media;
pub mod motion;
pub mod orbit;
pub mod store;

pub use cutout::*;
pub use layout::*;
pub use media::*;
pub use motion::*;
pub use orbit::*;
pub use store::*;

// Shaders bundled as string constants
pub static PLANES_WGSL: &str = include_str!("../../shaders/planes.wgsl");
