//! A minimal OpenGL logo viewer built on [glow], [glutin], and [winit].
//!
//! The viewer opens an 800×600 window with an OpenGL 3.1 core context. It
//! compiles one vertex/fragment shader pair from disk, uploads a full-viewport
//! quad, and uploads a 256×256 logo decoded with the [image] crate. It then
//! draws that quad every frame until the window is closed.
//!
//! Each setup step is exposed on its own so it can be driven from tests or
//! embedded elsewhere:
//!
//! - [`GlWindow`]: window, context, and function loading.
//! - [`shaders::compile_program`]: program compilation and linking.
//! - [`QuadMesh`]: the static quad.
//! - [`PixelBuffer`] and [`LogoTexture`]: image decoding and texture upload.
//! - [`QuadRenderer`]: the three above, owned together.
//! - [`FrameLoop`]: the running/terminated render loop.
//!
//! # Safety
//!
//! GL-touching functions are `unsafe` and require the context they were
//! created with to be current.
//!
//! [glow]: https://docs.rs/glow
//! [glutin]: https://docs.rs/glutin
//! [winit]: https://docs.rs/winit
//! [image]: https://docs.rs/image

mod app;
pub mod config;
mod context;
mod error;
mod frame_loop;
pub mod geometry;
pub mod logging;
pub mod pixels;
mod render;
pub mod shaders;
pub mod texture;

pub use app::{run, Viewer};
pub use config::{AssetPaths, ViewerConfig, WindowConfig};
pub use context::{centered_position, version_satisfies, GlWindow};
pub use error::{Error, Result, ShaderStage};
pub use frame_loop::{FrameLoop, LoopState};
pub use geometry::{QuadMesh, Vertex, QUAD_INDICES, QUAD_VERTICES};
pub use pixels::PixelBuffer;
pub use render::QuadRenderer;
pub use texture::{LogoTexture, SamplerSettings};
