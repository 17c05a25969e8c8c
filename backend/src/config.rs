use super::platform::WindowBackend;
use super::shaders::ShaderSources;
use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct WindowSettings {
    pub title: String,
    pub w: u32,
    pub h: u32,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum GlProfile {
    Core,
}

/// Requested OpenGL context version. Applied as attribute hints before the
/// window and its context are created.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct GlVersion {
    pub major: u8,
    pub minor: u8,
    pub profile: GlProfile,
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub window: WindowSettings,
    pub gl: GlVersion,
    // rgba
    pub clear_color: [f32; 4],
    /// How long the presented frame stays on screen before teardown.
    pub present_delay: Duration,
    pub preferred_backend: WindowBackend,
    pub shaders: ShaderSources,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            window: WindowSettings {
                title: "Hello Wayland".to_string(),
                w: 800,
                h: 600,
            },
            // check the supported core profile with `glxinfo | grep -i opengl`
            gl: GlVersion {
                major: 4,
                minor: 5,
                profile: GlProfile::Core,
            },
            clear_color: [1.0, 0.4, 0.8, 1.0], // pink
            present_delay: Duration::from_millis(5000),
            preferred_backend: WindowBackend::Wayland,
            shaders: ShaderSources::triangle(),
        }
    }
}
