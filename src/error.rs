//! Error type shared by every setup step.
//!
//! Each failure that used to abort startup (window, context, loader, shader,
//! image) has its own variant so the entry point can report it and unwind in
//! order.

use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Shader stage, used to label compile diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShaderStage {
    /// `GL_VERTEX_SHADER`.
    Vertex,
    /// `GL_FRAGMENT_SHADER`.
    Fragment,
}

impl ShaderStage {
    /// The GL enum for this stage.
    #[must_use]
    pub fn gl_kind(self) -> u32 {
        match self {
            ShaderStage::Vertex => glow::VERTEX_SHADER,
            ShaderStage::Fragment => glow::FRAGMENT_SHADER,
        }
    }
}

impl std::fmt::Display for ShaderStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShaderStage::Vertex => f.write_str("vertex"),
            ShaderStage::Fragment => f.write_str("fragment"),
        }
    }
}

/// Errors produced while bringing up the window, the GL context, or any of
/// the GPU resources drawn each frame.
#[derive(Debug, Error)]
pub enum Error {
    /// The platform event loop could not be created or run.
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),

    /// No window could be opened, or no GL config matched the template.
    #[error("creating main window failed: {0}")]
    Window(String),

    /// The window exposes no native handle a GL surface can be built on.
    #[error("window handle unavailable: {0}")]
    WindowHandle(#[source] raw_window_handle::HandleError),

    /// The driver refused the requested context version/profile.
    #[error("creating GL context failed: {0}")]
    Context(#[source] glutin::error::Error),

    /// The window surface could not be created.
    #[error("creating GL window surface failed: {0}")]
    Surface(#[source] glutin::error::Error),

    /// The context could not be made current on the window surface.
    #[error("making GL context current failed: {0}")]
    MakeCurrent(#[source] glutin::error::Error),

    /// The loaded function table reports an older GL than requested.
    #[error("OpenGL {required_major}.{required_minor} required, driver reports {major}.{minor}")]
    UnsupportedVersion {
        /// Reported major version.
        major: u32,
        /// Reported minor version.
        minor: u32,
        /// Requested major version.
        required_major: u32,
        /// Requested minor version.
        required_minor: u32,
    },

    /// A shader source file could not be read.
    #[error("unable to read shader source {}: {source}", .path.display())]
    ShaderSource {
        /// File that failed to open.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A shader stage failed to compile.
    #[error("compiling {stage} shader failed:\n{log}")]
    ShaderCompile {
        /// Which stage failed.
        stage: ShaderStage,
        /// Compiler info log.
        log: String,
    },

    /// The program failed to link.
    #[error("linking shader program failed:\n{0}")]
    ProgramLink(String),

    /// The linked program does not declare a required vertex attribute.
    #[error("shader program has no active attribute `{0}`")]
    MissingAttribute(&'static str),

    /// The linked program does not declare a required uniform.
    #[error("shader program has no active uniform `{0}`")]
    MissingUniform(&'static str),

    /// The image file could not be read or decoded.
    #[error("failed to load image {}: {source}", .path.display())]
    Image {
        /// File that failed to load.
        path: PathBuf,
        /// Decoder error.
        #[source]
        source: image::ImageError,
    },

    /// In-memory image bytes could not be decoded.
    #[error("failed to decode image: {0}")]
    Decode(#[from] image::ImageError),

    /// The decoded image does not have the expected dimensions.
    #[error("image is {width}x{height}, expected {expected_width}x{expected_height}")]
    ImageSize {
        /// Decoded width.
        width: u32,
        /// Decoded height.
        height: u32,
        /// Required width.
        expected_width: u32,
        /// Required height.
        expected_height: u32,
    },

    /// A GL object (buffer, texture, program...) could not be created.
    #[error("GL object creation failed: {0}")]
    Gl(String),
}

impl From<String> for Error {
    fn from(value: String) -> Self {
        Error::Gl(value)
    }
}
