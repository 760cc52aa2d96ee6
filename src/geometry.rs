//! The static full-viewport quad and its GPU buffers.

use bytemuck::{Pod, Zeroable};
use glow::HasContext;
use log::debug;

use crate::error::{Error, Result};
use crate::shaders::{POSITION_ATTRIBUTE, TEXCOORD_ATTRIBUTE};

/// An interleaved quad vertex, ready for the GPU.
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
#[repr(C)]
pub struct Vertex {
    /// Clip-space position.
    pub position: [f32; 2],
    /// Texture coordinate; V grows downward so the image is upright.
    pub texcoord: [f32; 2],
}

/// Corners of the clip-space square `[-1, 1]²`.
pub const QUAD_VERTICES: [Vertex; 4] = [
    Vertex {
        position: [-1.0, -1.0],
        texcoord: [0.0, 1.0],
    },
    Vertex {
        position: [-1.0, 1.0],
        texcoord: [0.0, 0.0],
    },
    Vertex {
        position: [1.0, 1.0],
        texcoord: [1.0, 0.0],
    },
    Vertex {
        position: [1.0, -1.0],
        texcoord: [1.0, 1.0],
    },
];

/// Two triangles sharing the `0-2` diagonal.
pub const QUAD_INDICES: [u32; 6] = [0, 1, 2, 0, 2, 3];

/// Number of indices issued by each draw call.
#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
pub const QUAD_INDEX_COUNT: i32 = QUAD_INDICES.len() as i32;

// Vertex is 16 bytes.
#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
const VERTEX_STRIDE: i32 = std::mem::size_of::<Vertex>() as i32;

#[expect(clippy::cast_possible_truncation, clippy::cast_possible_wrap)]
const TEXCOORD_OFFSET: i32 = std::mem::offset_of!(Vertex, texcoord) as i32;

/// Vertex array, vertex buffer, and element buffer for the quad.
#[derive(Debug)]
pub struct QuadMesh {
    /// Vertex array object recording the attribute layout.
    pub vao: glow::VertexArray,
    /// Static vertex buffer holding [`QUAD_VERTICES`].
    pub vbo: glow::Buffer,
    /// Static element buffer holding [`QUAD_INDICES`].
    pub ebo: glow::Buffer,
}

impl QuadMesh {
    /// Upload the quad and bind `aXY` / `aUV` at the locations `program`
    /// reports.
    ///
    /// The VAO stays bound on return.
    ///
    /// # Safety
    ///
    /// Requires a valid, current OpenGL context; `program` must be linked.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingAttribute`] if either attribute is inactive in
    /// `program`, or [`Error::Gl`] if an object cannot be created.
    pub unsafe fn upload(gl: &glow::Context, program: glow::Program) -> Result<Self> {
        let (position, texcoord) = unsafe {
            (
                gl.get_attrib_location(program, POSITION_ATTRIBUTE)
                    .ok_or(Error::MissingAttribute(POSITION_ATTRIBUTE))?,
                gl.get_attrib_location(program, TEXCOORD_ATTRIBUTE)
                    .ok_or(Error::MissingAttribute(TEXCOORD_ATTRIBUTE))?,
            )
        };

        unsafe {
            let vao = gl.create_vertex_array()?;
            let vbo = match gl.create_buffer() {
                Ok(vbo) => vbo,
                Err(err) => {
                    gl.delete_vertex_array(vao);
                    return Err(Error::Gl(err));
                }
            };
            let ebo = match gl.create_buffer() {
                Ok(ebo) => ebo,
                Err(err) => {
                    gl.delete_buffer(vbo);
                    gl.delete_vertex_array(vao);
                    return Err(Error::Gl(err));
                }
            };

            gl.bind_vertex_array(Some(vao));

            gl.bind_buffer(glow::ARRAY_BUFFER, Some(vbo));
            gl.buffer_data_u8_slice(
                glow::ARRAY_BUFFER,
                bytemuck::cast_slice(&QUAD_VERTICES),
                glow::STATIC_DRAW,
            );

            gl.bind_buffer(glow::ELEMENT_ARRAY_BUFFER, Some(ebo));
            gl.buffer_data_u8_slice(
                glow::ELEMENT_ARRAY_BUFFER,
                bytemuck::cast_slice(&QUAD_INDICES),
                glow::STATIC_DRAW,
            );

            gl.vertex_attrib_pointer_f32(position, 2, glow::FLOAT, false, VERTEX_STRIDE, 0);
            gl.enable_vertex_attrib_array(position);
            gl.vertex_attrib_pointer_f32(
                texcoord,
                2,
                glow::FLOAT,
                false,
                VERTEX_STRIDE,
                TEXCOORD_OFFSET,
            );
            gl.enable_vertex_attrib_array(texcoord);

            debug!(
                "uploaded quad: {} vertices, {} indices (aXY@{position}, aUV@{texcoord})",
                QUAD_VERTICES.len(),
                QUAD_INDICES.len()
            );

            Ok(Self { vao, vbo, ebo })
        }
    }

    /// Delete the buffers and vertex array.
    ///
    /// # Safety
    ///
    /// Must be called once, with the context that created the mesh current.
    pub unsafe fn delete(&self, gl: &glow::Context) {
        unsafe {
            gl.delete_buffer(self.ebo);
            gl.delete_buffer(self.vbo);
            gl.delete_vertex_array(self.vao);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn triangle(i: usize) -> [[f32; 2]; 3] {
        let t = &QUAD_INDICES[i * 3..i * 3 + 3];
        [
            QUAD_VERTICES[t[0] as usize].position,
            QUAD_VERTICES[t[1] as usize].position,
            QUAD_VERTICES[t[2] as usize].position,
        ]
    }

    fn signed_area([a, b, c]: [[f32; 2]; 3]) -> f32 {
        0.5 * ((b[0] - a[0]) * (c[1] - a[1]) - (c[0] - a[0]) * (b[1] - a[1]))
    }

    #[test]
    fn quad_has_four_vertices_and_two_triangles() {
        assert_eq!(QUAD_VERTICES.len(), 4);
        assert_eq!(QUAD_INDICES.len(), 6);
        assert_eq!(QUAD_INDEX_COUNT, 6);
        assert!(QUAD_INDICES.iter().all(|&i| (i as usize) < QUAD_VERTICES.len()));
    }

    #[test]
    fn triangles_tile_the_clip_square() {
        let total: f32 = (0..2).map(|i| signed_area(triangle(i)).abs()).sum();
        assert!((total - 4.0).abs() < f32::EPSILON, "covered area {total}");

        // Same winding, so the two halves don't overlap.
        let a = signed_area(triangle(0));
        let b = signed_area(triangle(1));
        assert_eq!(a.signum(), b.signum());
    }

    #[test]
    fn corners_span_minus_one_to_one() {
        let xs = QUAD_VERTICES.iter().map(|v| v.position[0]);
        let ys = QUAD_VERTICES.iter().map(|v| v.position[1]);
        let (min_x, max_x) = xs.fold((f32::MAX, f32::MIN), |(lo, hi), x| (lo.min(x), hi.max(x)));
        let (min_y, max_y) = ys.fold((f32::MAX, f32::MIN), |(lo, hi), y| (lo.min(y), hi.max(y)));
        assert_eq!((min_x, max_x), (-1.0, 1.0));
        assert_eq!((min_y, max_y), (-1.0, 1.0));
    }

    #[test]
    fn top_left_corner_samples_texture_origin() {
        let top_left = QUAD_VERTICES
            .iter()
            .find(|v| v.position == [-1.0, 1.0])
            .map(|v| v.texcoord);
        assert_eq!(top_left, Some([0.0, 0.0]));
    }

    #[test]
    fn vertex_layout_is_interleaved_pairs() {
        assert_eq!(VERTEX_STRIDE, 16);
        assert_eq!(TEXCOORD_OFFSET, 8);
        let bytes: &[u8] = bytemuck::cast_slice(&QUAD_VERTICES);
        assert_eq!(bytes.len(), 4 * 16);
    }
}
