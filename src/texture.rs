//! Logo texture upload and sampler state.

use glow::{HasContext, PixelUnpackData};
use log::debug;

use crate::error::{Error, Result};
use crate::pixels::PixelBuffer;
use crate::shaders::TEXTURE_UNIFORM;

/// GL internal format for RGBA8 textures, pre-cast to the `i32` that
/// `tex_image_2d` expects.
#[expect(clippy::cast_possible_wrap)]
const RGBA8_INTERNAL_FORMAT: i32 = glow::RGBA8 as i32;

/// Convert a `u32` to `i32` for GL API calls.
///
/// # Panics
///
/// Panics if `value > i32::MAX`, which no texture the driver accepts can
/// reach.
fn gl_size(value: u32) -> i32 {
    i32::try_from(value).expect("dimension exceeds i32::MAX")
}

/// Wrap and filter modes applied to a texture.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SamplerSettings {
    /// `TEXTURE_WRAP_S` and `TEXTURE_WRAP_T`.
    pub wrap: u32,
    /// `TEXTURE_MIN_FILTER`.
    pub min_filter: u32,
    /// `TEXTURE_MAG_FILTER`.
    pub mag_filter: u32,
}

impl SamplerSettings {
    /// Clamp-to-border with linear filtering and no mipmaps.
    pub const LOGO: Self = Self {
        wrap: glow::CLAMP_TO_BORDER,
        min_filter: glow::LINEAR,
        mag_filter: glow::LINEAR,
    };

    /// Clamp-to-edge with nearest filtering: every fragment reads exactly
    /// one texel, with no border color mixed in.
    pub const EXACT: Self = Self {
        wrap: glow::CLAMP_TO_EDGE,
        min_filter: glow::NEAREST,
        mag_filter: glow::NEAREST,
    };

    /// Apply to the texture bound at `TEXTURE_2D`.
    ///
    /// # Safety
    ///
    /// Requires a valid, current OpenGL context with a texture bound.
    // GL constant values are small enough that the cast is always safe.
    #[expect(clippy::cast_possible_wrap)]
    unsafe fn apply(self, gl: &glow::Context) {
        unsafe {
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_S, self.wrap as i32);
            gl.tex_parameter_i32(glow::TEXTURE_2D, glow::TEXTURE_WRAP_T, self.wrap as i32);
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MIN_FILTER,
                self.min_filter as i32,
            );
            gl.tex_parameter_i32(
                glow::TEXTURE_2D,
                glow::TEXTURE_MAG_FILTER,
                self.mag_filter as i32,
            );
        }
    }
}

impl Default for SamplerSettings {
    fn default() -> Self {
        Self::LOGO
    }
}

/// The uploaded logo, bound to texture unit 0.
#[derive(Debug)]
pub struct LogoTexture {
    /// GL texture name.
    pub texture: glow::Texture,
    /// Dimensions of the uploaded image.
    pub size: (u32, u32),
}

impl LogoTexture {
    /// Upload `pixels` as an RGBA8 2D texture on unit 0 and point
    /// [`TEXTURE_UNIFORM`] at it.
    ///
    /// Also enables source-alpha blending so transparent logo pixels show the
    /// clear color. The texture stays bound and `program` stays in use.
    ///
    /// # Safety
    ///
    /// Requires a valid, current OpenGL context; `program` must be linked.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingUniform`] if the sampler is inactive in
    /// `program`, or [`Error::Gl`] if the texture cannot be created.
    pub unsafe fn upload(
        gl: &glow::Context,
        program: glow::Program,
        pixels: &PixelBuffer,
        sampler: SamplerSettings,
    ) -> Result<Self> {
        let location = unsafe { gl.get_uniform_location(program, TEXTURE_UNIFORM) }
            .ok_or(Error::MissingUniform(TEXTURE_UNIFORM))?;

        let texture = unsafe { gl.create_texture() }?;
        unsafe {
            gl.active_texture(glow::TEXTURE0);
            gl.bind_texture(glow::TEXTURE_2D, Some(texture));
            sampler.apply(gl);
            gl.pixel_store_i32(glow::UNPACK_ALIGNMENT, 1);
            gl.tex_image_2d(
                glow::TEXTURE_2D,
                0,
                RGBA8_INTERNAL_FORMAT,
                gl_size(pixels.width()),
                gl_size(pixels.height()),
                0,
                glow::RGBA,
                glow::UNSIGNED_BYTE,
                PixelUnpackData::Slice(Some(pixels.as_bytes())),
            );

            gl.use_program(Some(program));
            gl.uniform_1_i32(Some(&location), 0);

            gl.enable(glow::BLEND);
            gl.blend_func(glow::SRC_ALPHA, glow::ONE_MINUS_SRC_ALPHA);
        }

        debug!(
            "uploaded {}x{} logo texture to unit 0",
            pixels.width(),
            pixels.height()
        );

        Ok(Self {
            texture,
            size: (pixels.width(), pixels.height()),
        })
    }

    /// Delete the texture.
    ///
    /// # Safety
    ///
    /// Must be called once, with the context that created the texture current.
    pub unsafe fn delete(&self, gl: &glow::Context) {
        unsafe { gl.delete_texture(self.texture) };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn logo_sampler_clamps_to_border() {
        assert_eq!(SamplerSettings::LOGO.wrap, glow::CLAMP_TO_BORDER);
    }

    #[test]
    fn logo_sampler_filters_linearly_without_mipmaps() {
        let sampler = SamplerSettings::LOGO;
        assert_eq!(sampler.min_filter, glow::LINEAR);
        assert_eq!(sampler.mag_filter, glow::LINEAR);
    }

    #[test]
    fn exact_sampler_never_reaches_the_border() {
        let sampler = SamplerSettings::EXACT;
        assert_eq!(sampler.wrap, glow::CLAMP_TO_EDGE);
        assert_eq!(sampler.min_filter, glow::NEAREST);
        assert_eq!(sampler.mag_filter, glow::NEAREST);
        assert_ne!(sampler, SamplerSettings::LOGO);
    }

    #[test]
    fn default_sampler_is_logo() {
        assert_eq!(SamplerSettings::default(), SamplerSettings::LOGO);
    }

    #[test]
    fn gl_size_accepts_logo_dimensions() {
        assert_eq!(gl_size(256), 256);
    }

    #[test]
    #[should_panic(expected = "dimension exceeds i32::MAX")]
    fn gl_size_panics_past_i32() {
        let _ = gl_size(u32::MAX);
    }
}
