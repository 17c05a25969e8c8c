use super::glutils::GlApi;
use super::math::{vec3, Vec3};
use bytemuck::{Pod, Zeroable};
use std::mem::{offset_of, size_of};

/// Interleaved position + color, as laid out in the vertex buffer.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: Vec3,
    pub color: Vec3,
}

pub const FLOATS_PER_VERTEX: usize = size_of::<Vertex>() / size_of::<f32>();

pub const TRIANGLE: [Vertex; 3] = [
    // bottom right
    Vertex {
        position: vec3(0.5, -0.5, 0.0),
        color: vec3(1.0, 0.0, 0.0),
    },
    // bottom left
    Vertex {
        position: vec3(-0.5, -0.5, 0.0),
        color: vec3(0.0, 1.0, 0.0),
    },
    // top
    Vertex {
        position: vec3(0.0, 0.5, 0.0),
        color: vec3(0.0, 0.0, 1.0),
    },
];

/// One float attribute over the interleaved buffer. Sizes are in bytes.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct VertexAttribute {
    pub index: u32,
    pub components: i32,
    pub stride: i32,
    pub offset: usize,
}

pub const ATTRIBUTES: [VertexAttribute; 2] = [
    VertexAttribute {
        index: 0,
        components: 3,
        stride: size_of::<Vertex>() as i32,
        offset: offset_of!(Vertex, position),
    },
    VertexAttribute {
        index: 1,
        components: 3,
        stride: size_of::<Vertex>() as i32,
        offset: offset_of!(Vertex, color),
    },
];

/// GL objects backing the uploaded triangle. Never released; process exit
/// reclaims them.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Mesh {
    pub vao: u32,
    pub vbo: u32,
    pub vertex_count: i32,
}

/// Creates and binds a vertex array and buffer, uploads `vertices` and
/// describes and enables [`ATTRIBUTES`] over it.
pub fn upload(gl: &mut impl GlApi, vertices: &[Vertex]) -> Mesh {
    let vao = gl.gen_vertex_array();
    gl.bind_vertex_array(vao);
    let vbo = gl.gen_buffer();
    gl.bind_array_buffer(vbo);
    gl.buffer_data_static(bytemuck::cast_slice(vertices));

    for attr in ATTRIBUTES {
        gl.vertex_attrib_pointer(attr.index, attr.components, attr.stride, attr.offset);
        gl.enable_vertex_attrib_array(attr.index);
    }

    Mesh {
        vao,
        vbo,
        vertex_count: vertices.len() as i32,
    }
}
