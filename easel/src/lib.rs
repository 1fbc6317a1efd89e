//! Client-side core for the collaborative drawing canvas.
//!
//! This crate owns everything between raw pointer events and the wire: the
//! gesture state machine that turns input into local renders and outgoing
//! [`wire::DrawCommand`]s, the stateless primitive renderer, the pan/zoom
//! camera, and the raster target abstraction the embedding surface
//! implements. It is deliberately transport-free — the embedding
//! application opens the socket and sends whatever messages the session
//! hands back.
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`session`] | Draw session state machine (one per open canvas) |
//! | [`render`] | Stateless primitive renderer for the 4 tool kinds |
//! | [`raster`] | [`raster::RasterTarget`] trait and the software [`raster::Bitmap`] |
//! | [`camera`] | Pan/zoom camera with anchor-preserving zoom |
//! | [`input`] | Brush settings and the gesture state type |
//! | [`consts`] | Shared numeric constants (zoom limits, eraser width, etc.) |

pub mod camera;
pub mod consts;
pub mod input;
pub mod raster;
pub mod render;
pub mod session;
