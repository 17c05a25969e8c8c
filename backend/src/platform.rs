use super::config::{GlVersion, WindowSettings};
use super::glutils::GlApi;
use std::fmt;
use std::time::Duration;

/// Windowing protocol the platform picked for a window.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum WindowBackend {
    Wayland,
    X11,
    Win32,
    AppKit,
    Other,
}

impl fmt::Display for WindowBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            WindowBackend::Wayland => "Wayland",
            WindowBackend::X11 => "X11",
            WindowBackend::Win32 => "Win32",
            WindowBackend::AppKit => "AppKit",
            WindowBackend::Other => "other",
        };
        f.write_str(name)
    }
}

/// Windowing and context layer the bootstrap chain drives.
///
/// Errors are the platform's own diagnostic text; the caller decides which
/// ones are fatal. Windows and contexts are handed back to the platform for
/// destruction so teardown order is visible to the implementation.
pub trait Platform {
    type Window;
    type Context;
    type Gl: GlApi;

    /// Initializes the video subsystem.
    fn init_video(&mut self) -> Result<(), String>;

    /// Arranges for the platform to shut down at process exit, even when
    /// the owning value is never dropped.
    fn register_shutdown_hook(&mut self) -> Result<(), String>;

    /// Context attribute hints. Must precede window and context creation.
    fn set_gl_attributes(&mut self, version: GlVersion);

    fn create_window(&mut self, settings: &WindowSettings) -> Result<Self::Window, String>;

    fn window_backend(&self, window: &Self::Window) -> Result<WindowBackend, String>;

    fn create_context(&mut self, window: &Self::Window) -> Result<Self::Context, String>;

    /// Resolves GL entry points for the current context.
    fn load_gl(&mut self, context: &Self::Context) -> Result<Self::Gl, String>;

    fn swap_window(&mut self, window: &Self::Window);

    fn delay(&mut self, duration: Duration);

    fn delete_context(&mut self, context: Self::Context);

    fn destroy_window(&mut self, window: Self::Window);
}
