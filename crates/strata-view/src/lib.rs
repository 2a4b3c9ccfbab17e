//! View-side geometry for sector culling: bounding boxes, clipping planes,
//! cameras, frustum tests and projected screen area.

mod aabb;
mod camera;
mod clipping;
mod frustum;
mod ndc;

pub use aabb::Aabb;
pub use camera::{Camera, Projection};
pub use clipping::{ClipMode, ClippingPlanes, Plane};
pub use frustum::Frustum;
pub use ndc::ndc_area_of_box;
