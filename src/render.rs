//! The draw state: one program, one quad, one texture.
//!
//! [`QuadRenderer`] is built in the fixed order shaders → geometry → texture
//! and leaves all three bound, so each frame is a clear plus a single indexed
//! draw.

use std::sync::Arc;

use glow::HasContext;
use log::debug;

use crate::{
    error::Result,
    geometry::{QuadMesh, QUAD_INDEX_COUNT},
    pixels::PixelBuffer,
    shaders,
    texture::{LogoTexture, SamplerSettings},
};

/// Owns every GPU object the frame needs.
///
/// GL objects are deleted on drop. The renderer must therefore be dropped
/// while the context that created it is still current.
///
/// # Example
///
/// ```no_run
/// # use logo_viewer::{PixelBuffer, QuadRenderer, SamplerSettings};
/// # use std::sync::Arc;
/// # fn example(gl: Arc<glow::Context>, vs: &str, fs: &str) -> logo_viewer::Result<()> {
/// let logo = PixelBuffer::solid(256, 256, [255, 255, 255, 255]);
/// // During setup (with a current GL context):
/// let renderer = unsafe { QuadRenderer::new(gl, vs, fs, &logo, SamplerSettings::LOGO) }?;
///
/// // Each frame:
/// unsafe { renderer.draw([1.0, 0.0, 0.0, 1.0], [800, 600]) };
/// # Ok(())
/// # }
/// ```
pub struct QuadRenderer {
    /// The OpenGL context, shared via [`Arc`] with the window that owns it.
    gl: Arc<glow::Context>,

    /// Linked program with `aXY`/`aUV` inputs and the `uTexture` sampler.
    program: glow::Program,
    /// Static quad buffers.
    mesh: QuadMesh,
    /// Logo texture on unit 0.
    texture: LogoTexture,
}

impl QuadRenderer {
    /// Compile the program, upload the quad, and upload `logo` sampled with
    /// `sampler`.
    ///
    /// A failure at any step deletes what earlier steps created.
    ///
    /// # Safety
    ///
    /// The `gl` context must be current and valid, and must outlive the
    /// renderer.
    ///
    /// # Errors
    ///
    /// Returns the first shader, geometry, or texture error.
    pub unsafe fn new(
        gl: Arc<glow::Context>,
        vertex_src: &str,
        fragment_src: &str,
        logo: &PixelBuffer,
        sampler: SamplerSettings,
    ) -> Result<Self> {
        let program = unsafe { shaders::compile_program(&gl, vertex_src, fragment_src) }?;

        let mesh = match unsafe { QuadMesh::upload(&gl, program) } {
            Ok(mesh) => mesh,
            Err(err) => {
                unsafe { gl.delete_program(program) };
                return Err(err);
            }
        };

        let texture = unsafe { LogoTexture::upload(&gl, program, logo, sampler) };
        let texture = match texture {
            Ok(texture) => texture,
            Err(err) => {
                unsafe {
                    mesh.delete(&gl);
                    gl.delete_program(program);
                }
                return Err(err);
            }
        };

        debug!("draw state ready");

        Ok(Self {
            gl,
            program,
            mesh,
            texture,
        })
    }

    /// Clear the bound framebuffer to `clear_color` and draw the quad over
    /// the whole `[width, height]` viewport.
    ///
    /// Presenting is left to the caller.
    ///
    /// # Safety
    ///
    /// Requires the GL context passed to [`new`](Self::new) to be current.
    pub unsafe fn draw(&self, clear_color: [f32; 4], [width, height]: [u32; 2]) {
        let gl = &self.gl;
        let [r, g, b, a] = clear_color;

        unsafe {
            gl.viewport(
                0,
                0,
                i32::try_from(width).unwrap_or(i32::MAX),
                i32::try_from(height).unwrap_or(i32::MAX),
            );
            gl.clear_color(r, g, b, a);
            gl.clear(glow::COLOR_BUFFER_BIT);

            gl.use_program(Some(self.program));
            gl.bind_vertex_array(Some(self.mesh.vao));
            gl.active_texture(glow::TEXTURE0);
            gl.bind_texture(glow::TEXTURE_2D, Some(self.texture.texture));
            gl.draw_elements(glow::TRIANGLES, QUAD_INDEX_COUNT, glow::UNSIGNED_INT, 0);
        }
    }

    /// Dimensions of the uploaded logo.
    #[must_use]
    pub fn texture_size(&self) -> (u32, u32) {
        self.texture.size
    }
}

impl Drop for QuadRenderer {
    fn drop(&mut self) {
        let gl = &self.gl;
        unsafe {
            gl.use_program(None);
            gl.bind_vertex_array(None);
            gl.bind_texture(glow::TEXTURE_2D, None);
            self.texture.delete(gl);
            self.mesh.delete(gl);
            gl.delete_program(self.program);
        }
        debug!("draw state released");
    }
}
