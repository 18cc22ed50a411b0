pub mod geom;
pub mod rng;

pub use geom::RectArea;
pub use rng::Rng;
