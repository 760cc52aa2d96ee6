//! Fixed startup configuration.
//!
//! Nothing here is read from the command line or the environment; the
//! defaults reproduce the demo exactly. Tests and embedders override fields
//! directly.

use std::path::{Path, PathBuf};

/// Window and context parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowConfig {
    /// Window title.
    pub title: String,
    /// Inner width in physical pixels.
    pub width: u32,
    /// Inner height in physical pixels.
    pub height: u32,
    /// Minimum core-profile OpenGL version as `(major, minor)`.
    pub gl_version: (u8, u8),
    /// Whether the window is shown. Off-screen checks run with a hidden one.
    pub visible: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "App".to_owned(),
            width: 800,
            height: 600,
            gl_version: (3, 1),
            visible: true,
        }
    }
}

/// Locations of the files read at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetPaths {
    /// GLSL vertex stage.
    pub vertex_shader: PathBuf,
    /// GLSL fragment stage.
    pub fragment_shader: PathBuf,
    /// Logo image, any format the `image` crate decodes.
    pub logo: PathBuf,
}

impl AssetPaths {
    /// Default file names rooted at `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            vertex_shader: dir.join("basic.v.glsl"),
            fragment_shader: dir.join("basic.f.glsl"),
            logo: dir.join("logo.bmp"),
        }
    }
}

impl Default for AssetPaths {
    fn default() -> Self {
        Self::in_dir("assets")
    }
}

/// Everything [`crate::run`] needs.
#[derive(Debug, Clone, PartialEq)]
pub struct ViewerConfig {
    /// Window and context parameters.
    pub window: WindowConfig,
    /// Shader and image locations.
    pub assets: AssetPaths,
    /// Required logo dimensions; other sizes are rejected.
    pub logo_size: (u32, u32),
    /// RGBA clear color applied before every draw.
    pub clear_color: [f32; 4],
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            window: WindowConfig::default(),
            assets: AssetPaths::default(),
            logo_size: (256, 256),
            clear_color: [1.0, 0.0, 0.0, 1.0],
        }
    }
}
