use super::glutils::{GlApi, ShaderStage};
use super::logging::APP;

// Matches the fixed-size log buffer drivers are usually queried with.
const INFO_LOG_LEN: usize = 512;

/// GLSL text for the two pipeline stages.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderSources {
    pub vertex: String,
    pub fragment: String,
}

impl ShaderSources {
    pub fn new(vertex: impl Into<String>, fragment: impl Into<String>) -> Self {
        ShaderSources {
            vertex: vertex.into(),
            fragment: fragment.into(),
        }
    }

    /// Position/color pass-through pair for the demo triangle.
    pub fn triangle() -> Self {
        Self::new(
            include_str!("../shaders/triangle.vert"),
            include_str!("../shaders/triangle.frag"),
        )
    }
}

/// A linked program object. Never deleted; it lives until process exit.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shaders {
    program_id: u32,
}

impl Shaders {
    /// Compiles both stages and links them.
    ///
    /// Compile and link failures are logged as warnings and otherwise
    /// ignored: the returned program may be unusable and draws with it may
    /// produce nothing. Callers wanting a hard failure must check the driver
    /// state themselves.
    pub fn from_sources(gl: &mut impl GlApi, sources: &ShaderSources) -> Shaders {
        let vertex_shader = Self::compile(gl, ShaderStage::Vertex, &sources.vertex);
        let fragment_shader = Self::compile(gl, ShaderStage::Fragment, &sources.fragment);

        let shader_program = gl.create_program();
        gl.attach_shader(shader_program, vertex_shader);
        gl.attach_shader(shader_program, fragment_shader);
        gl.link_program(shader_program);

        if !gl.program_link_status(shader_program) {
            log::warn!(
                target: APP,
                "Shader program linking failed: {}",
                gl.program_info_log(shader_program, INFO_LOG_LEN)
            );
        }

        // not needed anymore
        gl.delete_shader(vertex_shader);
        gl.delete_shader(fragment_shader);

        Shaders {
            program_id: shader_program,
        }
    }

    fn compile(gl: &mut impl GlApi, stage: ShaderStage, shader_code: &str) -> u32 {
        let shader_id = gl.create_shader(stage);
        gl.shader_source(shader_id, shader_code);
        gl.compile_shader(shader_id);

        if !gl.shader_compile_status(shader_id) {
            log::warn!(
                target: APP,
                "Shader compilation failed: {}",
                gl.shader_info_log(shader_id, INFO_LOG_LEN)
            );
        }
        shader_id
    }

    pub fn program_id(&self) -> u32 {
        self.program_id
    }

    pub fn use_program(&self, gl: &mut impl GlApi) {
        gl.use_program(self.program_id);
    }
}
