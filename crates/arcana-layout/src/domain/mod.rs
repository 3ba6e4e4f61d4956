//! Pure layout geometry.

pub mod generators;
pub mod kinds;
pub mod normalize;
pub mod projection;
pub mod shapes;
