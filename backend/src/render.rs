use super::config::Settings;
use super::glutils::{check_gl_err, GlApi};
use super::mesh::{self, Mesh, TRIANGLE};
use super::shaders::Shaders;

/// What the single frame left behind in the GL context.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Frame {
    pub program: Shaders,
    pub mesh: Mesh,
}

/// Clears the viewport and draws the demo triangle once.
///
/// Nothing here is fatal. Shader and GL problems end up in the log and the
/// sequence carries on to the draw call regardless.
pub fn draw_triangle(gl: &mut impl GlApi, settings: &Settings) -> Frame {
    let [r, g, b, a] = settings.clear_color;
    gl.viewport(0, 0, settings.window.w as i32, settings.window.h as i32);
    gl.clear_color(r, g, b, a);
    gl.clear_color_buffer();

    let program = Shaders::from_sources(gl, &settings.shaders);
    let mesh = mesh::upload(gl, &TRIANGLE);

    program.use_program(gl);
    gl.draw_triangles(0, mesh.vertex_count);
    check_gl_err(gl);

    Frame { program, mesh }
}
