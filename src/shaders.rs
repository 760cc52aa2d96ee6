//! Shader source loading and program compilation.
//!
//! The sources are read from disk at startup and target GLSL 1.40
//! (OpenGL 3.1). Any program built here must follow the interface below.
//!
//! | Name       | Kind              | Description                          |
//! |------------|-------------------|--------------------------------------|
//! | `aXY`      | `in vec2`         | Clip-space position                  |
//! | `aUV`      | `in vec2`         | Texture coordinate                   |
//! | `uTexture` | `uniform sampler2D` | Logo texture, always unit 0        |
//! | `oRGBA`    | `out vec4`        | Fragment color, bound to location 0  |

use std::path::Path;

use glow::HasContext;
use log::debug;

use crate::error::{Error, Result, ShaderStage};

/// Vertex attribute carrying the clip-space position.
pub const POSITION_ATTRIBUTE: &str = "aXY";

/// Vertex attribute carrying the texture coordinate.
pub const TEXCOORD_ATTRIBUTE: &str = "aUV";

/// Sampler uniform bound to texture unit 0.
pub const TEXTURE_UNIFORM: &str = "uTexture";

/// Fragment output bound to draw buffer 0.
pub const COLOR_OUTPUT: &str = "oRGBA";

/// Placeholder used when a driver fails a stage without writing a log.
const EMPTY_LOG: &str = "(driver returned no diagnostic)";

/// Read a shader source file into a string.
///
/// # Errors
///
/// Returns [`Error::ShaderSource`] naming `path` if it cannot be read.
pub fn load_source(path: &Path) -> Result<String> {
    let source = std::fs::read_to_string(path).map_err(|source| Error::ShaderSource {
        path: path.to_path_buf(),
        source,
    })?;
    debug!("read {} bytes of shader source from {}", source.len(), path.display());
    Ok(source)
}

/// Compile a shader program from vertex and fragment source strings.
///
/// Fragment output [`COLOR_OUTPUT`] is bound to location 0 before linking.
/// The compiled shader objects are detached and deleted after successful
/// linking, so only the program handle needs to be cleaned up by the caller.
/// Nothing is leaked on failure.
///
/// # Safety
///
/// Requires a valid, current OpenGL context.
///
/// # Errors
///
/// Returns [`Error::ShaderCompile`] or [`Error::ProgramLink`] carrying the
/// driver's info log, or [`Error::Gl`] if an object cannot be created.
pub unsafe fn compile_program(
    gl: &glow::Context,
    vertex_src: &str,
    fragment_src: &str,
) -> Result<glow::Program> {
    let vs = unsafe { compile_shader(gl, ShaderStage::Vertex, vertex_src) }?;
    let fs = match unsafe { compile_shader(gl, ShaderStage::Fragment, fragment_src) } {
        Ok(fs) => fs,
        Err(err) => {
            unsafe { gl.delete_shader(vs) };
            return Err(err);
        }
    };

    unsafe {
        let program = match gl.create_program() {
            Ok(program) => program,
            Err(err) => {
                gl.delete_shader(vs);
                gl.delete_shader(fs);
                return Err(Error::Gl(err));
            }
        };

        gl.attach_shader(program, vs);
        gl.attach_shader(program, fs);
        gl.bind_frag_data_location(program, 0, COLOR_OUTPUT);
        gl.link_program(program);

        let linked = gl.get_program_link_status(program);
        let log = if linked {
            String::new()
        } else {
            gl.get_program_info_log(program)
        };

        gl.detach_shader(program, vs);
        gl.detach_shader(program, fs);
        gl.delete_shader(vs);
        gl.delete_shader(fs);

        if !linked {
            gl.delete_program(program);
            return Err(Error::ProgramLink(non_empty(log)));
        }

        debug!("linked shader program");
        Ok(program)
    }
}

/// Compile a single shader stage from source.
///
/// # Safety
///
/// Requires a valid, current OpenGL context.
unsafe fn compile_shader(
    gl: &glow::Context,
    stage: ShaderStage,
    source: &str,
) -> Result<glow::Shader> {
    unsafe {
        let shader = gl.create_shader(stage.gl_kind())?;
        gl.shader_source(shader, source);
        gl.compile_shader(shader);

        if !gl.get_shader_compile_status(shader) {
            let log = gl.get_shader_info_log(shader);
            gl.delete_shader(shader);
            return Err(Error::ShaderCompile {
                stage,
                log: non_empty(log),
            });
        }

        debug!("compiled {stage} shader");
        Ok(shader)
    }
}

fn non_empty(log: String) -> String {
    let trimmed = log.trim_end();
    if trimmed.is_empty() {
        EMPTY_LOG.to_owned()
    } else {
        trimmed.to_owned()
    }
}
