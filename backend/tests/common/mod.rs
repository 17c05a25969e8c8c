#![allow(dead_code)]

use backend::config::{GlVersion, WindowSettings};
use backend::glutils::{GlApi, ShaderStage};
use backend::platform::{Platform, WindowBackend};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;
use std::sync::Once;
use std::time::Duration;

// ---------------------------------------------------------------------------
// log capture

#[derive(Debug, Clone)]
pub struct Captured {
    pub level: log::Level,
    pub target: String,
    pub message: String,
}

thread_local! {
    static RECORDS: RefCell<Vec<Captured>> = const { RefCell::new(Vec::new()) };
}

struct CaptureLogger;

impl log::Log for CaptureLogger {
    fn enabled(&self, _: &log::Metadata) -> bool {
        true
    }

    fn log(&self, record: &log::Record) {
        RECORDS.with(|r| {
            r.borrow_mut().push(Captured {
                level: record.level(),
                target: record.target().to_string(),
                message: record.args().to_string(),
            })
        });
    }

    fn flush(&self) {}
}

static LOGGER: CaptureLogger = CaptureLogger;
static INIT: Once = Once::new();

/// Starts capturing log records emitted on the current test thread.
pub fn capture_logs() {
    INIT.call_once(|| {
        let _ = log::set_logger(&LOGGER);
        log::set_max_level(log::LevelFilter::Trace);
    });
    RECORDS.with(|r| r.borrow_mut().clear());
}

pub fn take_logs() -> Vec<Captured> {
    RECORDS.with(|r| r.borrow_mut().drain(..).collect())
}

pub fn at_level(logs: &[Captured], level: log::Level) -> Vec<&Captured> {
    logs.iter().filter(|c| c.level == level).collect()
}

// ---------------------------------------------------------------------------
// recording GL

#[derive(Debug, Clone, PartialEq)]
pub enum GlCall {
    Viewport(i32, i32, i32, i32),
    ClearColor([f32; 4]),
    Clear,
    CreateShader(ShaderStage, u32),
    ShaderSource(u32),
    CompileShader(u32),
    DeleteShader(u32),
    CreateProgram(u32),
    AttachShader(u32, u32),
    LinkProgram(u32),
    UseProgram(u32),
    GenVertexArray(u32),
    BindVertexArray(u32),
    GenBuffer(u32),
    BindArrayBuffer(u32),
    BufferData(Vec<f32>),
    VertexAttribPointer {
        index: u32,
        components: i32,
        stride: i32,
        offset: usize,
    },
    EnableVertexAttribArray(u32),
    DrawTriangles(i32, i32),
}

#[derive(Debug, Default)]
pub struct GlState {
    pub calls: Vec<GlCall>,
    next_id: u32,
    sources: HashMap<u32, String>,
    compiled: HashMap<u32, bool>,
    attached: HashMap<u32, Vec<u32>>,
    linked: HashMap<u32, bool>,
    pub pending_errors: Vec<u32>,
}

impl GlState {
    fn next_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }
}

/// Fake GL that records every call. A shader compiles only when its source
/// starts with a `#version` line; a program links only when every attached
/// shader compiled.
#[derive(Debug, Clone, Default)]
pub struct RecordingGl {
    pub state: Rc<RefCell<GlState>>,
}

impl RecordingGl {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<GlCall> {
        self.state.borrow().calls.clone()
    }

    fn record(&self, call: GlCall) {
        self.state.borrow_mut().calls.push(call);
    }
}

impl GlApi for RecordingGl {
    fn viewport(&mut self, x: i32, y: i32, w: i32, h: i32) {
        self.record(GlCall::Viewport(x, y, w, h));
    }

    fn clear_color(&mut self, r: f32, g: f32, b: f32, a: f32) {
        self.record(GlCall::ClearColor([r, g, b, a]));
    }

    fn clear_color_buffer(&mut self) {
        self.record(GlCall::Clear);
    }

    fn create_shader(&mut self, stage: ShaderStage) -> u32 {
        let id = self.state.borrow_mut().next_id();
        self.record(GlCall::CreateShader(stage, id));
        id
    }

    fn shader_source(&mut self, shader: u32, source: &str) {
        self.state
            .borrow_mut()
            .sources
            .insert(shader, source.to_string());
        self.record(GlCall::ShaderSource(shader));
    }

    fn compile_shader(&mut self, shader: u32) {
        let mut state = self.state.borrow_mut();
        let ok = state
            .sources
            .get(&shader)
            .is_some_and(|s| s.starts_with("#version"));
        state.compiled.insert(shader, ok);
        state.calls.push(GlCall::CompileShader(shader));
    }

    fn shader_compile_status(&self, shader: u32) -> bool {
        self.state
            .borrow()
            .compiled
            .get(&shader)
            .copied()
            .unwrap_or(false)
    }

    fn shader_info_log(&self, shader: u32, max_len: usize) -> String {
        let mut msg = format!("0:1(1): error: shader {shader} is missing #version");
        msg.truncate(max_len);
        msg
    }

    fn delete_shader(&mut self, shader: u32) {
        self.record(GlCall::DeleteShader(shader));
    }

    fn create_program(&mut self) -> u32 {
        let id = self.state.borrow_mut().next_id();
        self.record(GlCall::CreateProgram(id));
        id
    }

    fn attach_shader(&mut self, program: u32, shader: u32) {
        self.state
            .borrow_mut()
            .attached
            .entry(program)
            .or_default()
            .push(shader);
        self.record(GlCall::AttachShader(program, shader));
    }

    fn link_program(&mut self, program: u32) {
        let mut state = self.state.borrow_mut();
        let ok = state.attached.get(&program).is_some_and(|shaders| {
            shaders
                .iter()
                .all(|s| state.compiled.get(s).copied().unwrap_or(false))
        });
        state.linked.insert(program, ok);
        state.calls.push(GlCall::LinkProgram(program));
    }

    fn program_link_status(&self, program: u32) -> bool {
        self.state
            .borrow()
            .linked
            .get(&program)
            .copied()
            .unwrap_or(false)
    }

    fn program_info_log(&self, program: u32, max_len: usize) -> String {
        let mut msg = format!("program {program}: attached shaders did not compile");
        msg.truncate(max_len);
        msg
    }

    fn use_program(&mut self, program: u32) {
        self.record(GlCall::UseProgram(program));
    }

    fn gen_vertex_array(&mut self) -> u32 {
        let id = self.state.borrow_mut().next_id();
        self.record(GlCall::GenVertexArray(id));
        id
    }

    fn bind_vertex_array(&mut self, vao: u32) {
        self.record(GlCall::BindVertexArray(vao));
    }

    fn gen_buffer(&mut self) -> u32 {
        let id = self.state.borrow_mut().next_id();
        self.record(GlCall::GenBuffer(id));
        id
    }

    fn bind_array_buffer(&mut self, vbo: u32) {
        self.record(GlCall::BindArrayBuffer(vbo));
    }

    fn buffer_data_static(&mut self, data: &[u8]) {
        let floats = data
            .chunks_exact(4)
            .map(|c| f32::from_ne_bytes([c[0], c[1], c[2], c[3]]))
            .collect();
        self.record(GlCall::BufferData(floats));
    }

    fn vertex_attrib_pointer(&mut self, index: u32, components: i32, stride: i32, offset: usize) {
        self.record(GlCall::VertexAttribPointer {
            index,
            components,
            stride,
            offset,
        });
    }

    fn enable_vertex_attrib_array(&mut self, index: u32) {
        self.record(GlCall::EnableVertexAttribArray(index));
    }

    fn draw_triangles(&mut self, first: i32, count: i32) {
        self.record(GlCall::DrawTriangles(first, count));
    }

    fn get_error(&mut self) -> u32 {
        let mut state = self.state.borrow_mut();
        if state.pending_errors.is_empty() {
            gl::NO_ERROR
        } else {
            state.pending_errors.remove(0)
        }
    }

    fn get_string(&self, _name: u32) -> Option<String> {
        Some("4.5 (recording)".to_string())
    }
}

// ---------------------------------------------------------------------------
// mock platform

/// Bootstrap steps a [`MockPlatform`] can be told to fail.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Step {
    InitVideo,
    ShutdownHook,
    CreateWindow,
    CreateContext,
    LoadGl,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    InitVideo,
    RegisterShutdownHook,
    SetGlAttributes(GlVersion),
    CreateWindow(WindowSettings),
    WindowBackend(u32),
    CreateContext(u32),
    LoadGl(u32),
    SwapWindow(u32),
    Delay(Duration),
    DeleteContext(u32),
    DestroyWindow(u32),
}

#[derive(Debug)]
pub struct MockWindow(u32);

#[derive(Debug)]
pub struct MockContext(u32);

pub struct MockPlatform {
    calls: RefCell<Vec<Call>>,
    fail: Option<(Step, String)>,
    pub backend: Result<WindowBackend, String>,
    pub gl: RecordingGl,
    next_id: u32,
}

impl MockPlatform {
    pub fn new() -> Self {
        MockPlatform {
            calls: RefCell::new(Vec::new()),
            fail: None,
            backend: Ok(WindowBackend::Wayland),
            gl: RecordingGl::new(),
            next_id: 0,
        }
    }

    pub fn failing_at(step: Step, message: &str) -> Self {
        MockPlatform {
            fail: Some((step, message.to_string())),
            ..Self::new()
        }
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn count(&self, pred: impl Fn(&Call) -> bool) -> usize {
        self.calls.borrow().iter().filter(|c| pred(c)).count()
    }

    pub fn position(&self, pred: impl Fn(&Call) -> bool) -> Option<usize> {
        self.calls.borrow().iter().position(pred)
    }

    fn record(&self, call: Call) {
        self.calls.borrow_mut().push(call);
    }

    fn check(&self, step: Step) -> Result<(), String> {
        match &self.fail {
            Some((s, msg)) if *s == step => Err(msg.clone()),
            _ => Ok(()),
        }
    }

    fn next_id(&mut self) -> u32 {
        self.next_id += 1;
        self.next_id
    }
}

impl Platform for MockPlatform {
    type Window = MockWindow;
    type Context = MockContext;
    type Gl = RecordingGl;

    fn init_video(&mut self) -> Result<(), String> {
        self.record(Call::InitVideo);
        self.check(Step::InitVideo)
    }

    fn register_shutdown_hook(&mut self) -> Result<(), String> {
        self.record(Call::RegisterShutdownHook);
        self.check(Step::ShutdownHook)
    }

    fn set_gl_attributes(&mut self, version: GlVersion) {
        self.record(Call::SetGlAttributes(version));
    }

    fn create_window(&mut self, settings: &WindowSettings) -> Result<MockWindow, String> {
        self.record(Call::CreateWindow(settings.clone()));
        self.check(Step::CreateWindow)?;
        Ok(MockWindow(self.next_id()))
    }

    fn window_backend(&self, window: &MockWindow) -> Result<WindowBackend, String> {
        self.record(Call::WindowBackend(window.0));
        self.backend.clone()
    }

    fn create_context(&mut self, window: &MockWindow) -> Result<MockContext, String> {
        self.record(Call::CreateContext(window.0));
        self.check(Step::CreateContext)?;
        Ok(MockContext(self.next_id()))
    }

    fn load_gl(&mut self, context: &MockContext) -> Result<RecordingGl, String> {
        self.record(Call::LoadGl(context.0));
        self.check(Step::LoadGl)?;
        Ok(self.gl.clone())
    }

    fn swap_window(&mut self, window: &MockWindow) {
        self.record(Call::SwapWindow(window.0));
    }

    fn delay(&mut self, duration: Duration) {
        self.record(Call::Delay(duration));
    }

    fn delete_context(&mut self, context: MockContext) {
        self.record(Call::DeleteContext(context.0));
    }

    fn destroy_window(&mut self, window: MockWindow) {
        self.record(Call::DestroyWindow(window.0));
    }
}
