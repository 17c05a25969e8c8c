use super::logging::APP;
use gl::types::*;
use std::ffi::CStr;

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ShaderStage {
    Vertex,
    Fragment,
}

impl ShaderStage {
    fn gl_enum(self) -> GLenum {
        match self {
            ShaderStage::Vertex => gl::VERTEX_SHADER,
            ShaderStage::Fragment => gl::FRAGMENT_SHADER,
        }
    }
}

/// The slice of OpenGL the triangle demo talks to.
///
/// Object names are raw GL ids. Calls are only valid once the function
/// loader has run for a current context, which is why an implementation is
/// only ever handed out by [`crate::platform::Platform::load_gl`].
pub trait GlApi {
    fn viewport(&mut self, x: i32, y: i32, w: i32, h: i32);
    fn clear_color(&mut self, r: f32, g: f32, b: f32, a: f32);
    fn clear_color_buffer(&mut self);

    fn create_shader(&mut self, stage: ShaderStage) -> u32;
    fn shader_source(&mut self, shader: u32, source: &str);
    fn compile_shader(&mut self, shader: u32);
    fn shader_compile_status(&self, shader: u32) -> bool;
    fn shader_info_log(&self, shader: u32, max_len: usize) -> String;
    fn delete_shader(&mut self, shader: u32);

    fn create_program(&mut self) -> u32;
    fn attach_shader(&mut self, program: u32, shader: u32);
    fn link_program(&mut self, program: u32);
    fn program_link_status(&self, program: u32) -> bool;
    fn program_info_log(&self, program: u32, max_len: usize) -> String;
    fn use_program(&mut self, program: u32);

    fn gen_vertex_array(&mut self) -> u32;
    fn bind_vertex_array(&mut self, vao: u32);
    fn gen_buffer(&mut self) -> u32;
    fn bind_array_buffer(&mut self, vbo: u32);
    /// Uploads to the bound array buffer with a `STATIC_DRAW` hint.
    fn buffer_data_static(&mut self, data: &[u8]);
    /// Float attribute, not normalized. `stride` and `offset` are in bytes.
    fn vertex_attrib_pointer(&mut self, index: u32, components: i32, stride: i32, offset: usize);
    fn enable_vertex_attrib_array(&mut self, index: u32);

    fn draw_triangles(&mut self, first: i32, count: i32);

    fn get_error(&mut self) -> GLenum;
    fn get_string(&self, name: GLenum) -> Option<String>;
}

/// Entry points the render sequence relies on. The loader is considered
/// failed if any of these did not resolve.
pub fn missing_entry_points() -> Vec<&'static str> {
    let required: [(&'static str, bool); 23] = [
        ("glViewport", gl::Viewport::is_loaded()),
        ("glClearColor", gl::ClearColor::is_loaded()),
        ("glClear", gl::Clear::is_loaded()),
        ("glCreateShader", gl::CreateShader::is_loaded()),
        ("glShaderSource", gl::ShaderSource::is_loaded()),
        ("glCompileShader", gl::CompileShader::is_loaded()),
        ("glGetShaderiv", gl::GetShaderiv::is_loaded()),
        ("glGetShaderInfoLog", gl::GetShaderInfoLog::is_loaded()),
        ("glDeleteShader", gl::DeleteShader::is_loaded()),
        ("glCreateProgram", gl::CreateProgram::is_loaded()),
        ("glAttachShader", gl::AttachShader::is_loaded()),
        ("glLinkProgram", gl::LinkProgram::is_loaded()),
        ("glGetProgramiv", gl::GetProgramiv::is_loaded()),
        ("glGetProgramInfoLog", gl::GetProgramInfoLog::is_loaded()),
        ("glUseProgram", gl::UseProgram::is_loaded()),
        ("glGenVertexArrays", gl::GenVertexArrays::is_loaded()),
        ("glBindVertexArray", gl::BindVertexArray::is_loaded()),
        ("glGenBuffers", gl::GenBuffers::is_loaded()),
        ("glBindBuffer", gl::BindBuffer::is_loaded()),
        ("glBufferData", gl::BufferData::is_loaded()),
        ("glVertexAttribPointer", gl::VertexAttribPointer::is_loaded()),
        ("glEnableVertexAttribArray", gl::EnableVertexAttribArray::is_loaded()),
        ("glDrawArrays", gl::DrawArrays::is_loaded()),
    ];
    required
        .iter()
        .filter(|(_, loaded)| !loaded)
        .map(|(name, _)| *name)
        .collect()
}

/// Forwards to the process-wide function pointers loaded by `gl::load_with`.
#[derive(Debug)]
pub struct NativeGl {
    _loaded: (),
}

impl NativeGl {
    /// # Safety
    ///
    /// `gl::load_with` must have run for the context that is current on this
    /// thread, and [`missing_entry_points`] must be empty.
    pub unsafe fn assume_loaded() -> Self {
        NativeGl { _loaded: () }
    }
}

impl GlApi for NativeGl {
    fn viewport(&mut self, x: i32, y: i32, w: i32, h: i32) {
        unsafe { gl::Viewport(x, y, w, h) };
    }

    fn clear_color(&mut self, r: f32, g: f32, b: f32, a: f32) {
        unsafe { gl::ClearColor(r, g, b, a) };
    }

    fn clear_color_buffer(&mut self) {
        unsafe { gl::Clear(gl::COLOR_BUFFER_BIT) };
    }

    fn create_shader(&mut self, stage: ShaderStage) -> u32 {
        unsafe { gl::CreateShader(stage.gl_enum()) }
    }

    fn shader_source(&mut self, shader: u32, source: &str) {
        let len = source.len() as GLint;
        unsafe {
            gl::ShaderSource(shader, 1, &(source.as_bytes().as_ptr().cast()), &len);
        }
    }

    fn compile_shader(&mut self, shader: u32) {
        unsafe { gl::CompileShader(shader) };
    }

    fn shader_compile_status(&self, shader: u32) -> bool {
        let mut success = 0;
        unsafe { gl::GetShaderiv(shader, gl::COMPILE_STATUS, &mut success) };
        success != 0
    }

    fn shader_info_log(&self, shader: u32, max_len: usize) -> String {
        let mut v = vec![0u8; max_len];
        let mut log_len: GLsizei = 0;
        unsafe {
            gl::GetShaderInfoLog(shader, max_len as GLsizei, &mut log_len, v.as_mut_ptr().cast());
        }
        v.truncate(log_len.max(0) as usize);
        String::from_utf8_lossy(&v).trim_end().to_string()
    }

    fn delete_shader(&mut self, shader: u32) {
        unsafe { gl::DeleteShader(shader) };
    }

    fn create_program(&mut self) -> u32 {
        unsafe { gl::CreateProgram() }
    }

    fn attach_shader(&mut self, program: u32, shader: u32) {
        unsafe { gl::AttachShader(program, shader) };
    }

    fn link_program(&mut self, program: u32) {
        unsafe { gl::LinkProgram(program) };
    }

    fn program_link_status(&self, program: u32) -> bool {
        let mut success = 0;
        unsafe { gl::GetProgramiv(program, gl::LINK_STATUS, &mut success) };
        success != 0
    }

    fn program_info_log(&self, program: u32, max_len: usize) -> String {
        let mut v = vec![0u8; max_len];
        let mut log_len: GLsizei = 0;
        unsafe {
            gl::GetProgramInfoLog(program, max_len as GLsizei, &mut log_len, v.as_mut_ptr().cast());
        }
        v.truncate(log_len.max(0) as usize);
        String::from_utf8_lossy(&v).trim_end().to_string()
    }

    fn use_program(&mut self, program: u32) {
        unsafe { gl::UseProgram(program) };
    }

    fn gen_vertex_array(&mut self) -> u32 {
        let mut vao = 0;
        unsafe { gl::GenVertexArrays(1, &mut vao) };
        vao
    }

    fn bind_vertex_array(&mut self, vao: u32) {
        unsafe { gl::BindVertexArray(vao) };
    }

    fn gen_buffer(&mut self) -> u32 {
        let mut vbo = 0;
        unsafe { gl::GenBuffers(1, &mut vbo) };
        vbo
    }

    fn bind_array_buffer(&mut self, vbo: u32) {
        unsafe { gl::BindBuffer(gl::ARRAY_BUFFER, vbo) };
    }

    fn buffer_data_static(&mut self, data: &[u8]) {
        unsafe {
            gl::BufferData(
                gl::ARRAY_BUFFER,
                data.len() as GLsizeiptr,
                data.as_ptr().cast(),
                gl::STATIC_DRAW,
            )
        };
    }

    fn vertex_attrib_pointer(&mut self, index: u32, components: i32, stride: i32, offset: usize) {
        unsafe {
            gl::VertexAttribPointer(
                index,
                components,
                gl::FLOAT,
                gl::FALSE,
                stride,
                offset as *const _,
            )
        };
    }

    fn enable_vertex_attrib_array(&mut self, index: u32) {
        unsafe { gl::EnableVertexAttribArray(index) };
    }

    fn draw_triangles(&mut self, first: i32, count: i32) {
        unsafe { gl::DrawArrays(gl::TRIANGLES, first, count) };
    }

    fn get_error(&mut self) -> GLenum {
        unsafe { gl::GetError() }
    }

    fn get_string(&self, name: GLenum) -> Option<String> {
        let ptr = unsafe { gl::GetString(name) };
        if ptr.is_null() {
            return None;
        }
        let s = unsafe { CStr::from_ptr(ptr.cast()) };
        Some(s.to_string_lossy().into_owned())
    }
}

// A lost context can report errors forever; stop after this many.
const MAX_DRAINED_ERRORS: usize = 16;

/// Drains the GL error queue and reports anything found as a warning.
/// Returns the error codes that were pending.
pub fn check_gl_err(gl: &mut impl GlApi) -> Vec<GLenum> {
    let mut errors = Vec::new();
    while errors.len() < MAX_DRAINED_ERRORS {
        let err = gl.get_error();
        if err == gl::NO_ERROR {
            break;
        }
        errors.push(err);
    }
    if !errors.is_empty() {
        log::warn!(target: APP, "OpenGL reported errors: {:#06x?}", errors);
    }
    errors
}

pub fn log_opengl_info(gl: &impl GlApi) {
    for (label, name) in [
        ("GL_VENDOR", gl::VENDOR),
        ("GL_RENDERER", gl::RENDERER),
        ("GL_VERSION", gl::VERSION),
        ("GL_SHADING_LANGUAGE_VERSION", gl::SHADING_LANGUAGE_VERSION),
    ] {
        match gl.get_string(name) {
            Some(v) => log::debug!(target: APP, "{label} = {v}"),
            None => log::debug!(target: APP, "{label} unavailable"),
        }
    }
}
