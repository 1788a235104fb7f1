//! Camera Module
//!
//! View-side math the simulation consumes: the first-person eye, the
//! viewport, and screen-to-world rays. Window-system agnostic; the host
//! feeds the viewport size and may move or turn the eye.

pub mod raycast;

pub use raycast::{Ray, ViewCamera, Viewport, raycast_to_depth_plane, screen_ray, screen_to_ndc};
