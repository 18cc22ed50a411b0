pub mod color;
pub mod surface;

pub use color::Color;
pub use surface::{DrawCommand, Surface, TextAlign};
