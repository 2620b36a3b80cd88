mod native;

pub use native::{Renderer, CLEAR_COLOR};
