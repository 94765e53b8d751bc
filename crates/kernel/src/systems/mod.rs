//! Systems built on the combinatorial dispatcher.

mod collision;
mod movement;
mod parallax;
mod render;

pub use collision::{Collision, DetectCollisions, polygons_overlap};
pub use movement::Move;
pub use parallax::Parallax;
pub use render::{CameraView, DrawCommand, Outline, Render, VisualizePolygons};
