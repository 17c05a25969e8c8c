use super::config::{GlProfile, GlVersion, WindowSettings};
use super::glutils::{missing_entry_points, NativeGl};
use super::platform::{Platform, WindowBackend};
use sdl2;
use sdl2::sys::{SDL_SysWMinfo, SDL_bool, SDL_SYSWM_TYPE};
use sdl2::video::{GLContext, Window};
use std::time::Duration;

/// SDL2-backed platform. Owns the SDL handles, so dropping it shuts SDL down;
/// the exit hook covers the paths where it never gets dropped.
#[derive(Default)]
pub struct SdlPlatform {
    sdl_context: Option<sdl2::Sdl>,
    video_subsystem: Option<sdl2::VideoSubsystem>,
}

impl SdlPlatform {
    pub fn new() -> SdlPlatform {
        SdlPlatform::default()
    }

    fn video(&self) -> Result<&sdl2::VideoSubsystem, String> {
        self.video_subsystem
            .as_ref()
            .ok_or_else(|| "video subsystem is not initialized".to_string())
    }
}

extern "C" fn quit_sdl() {
    unsafe { sdl2::sys::SDL_Quit() };
}

// atexit reports failure only through its return value, errno is untouched.
fn shutdown_hook_status(rc: libc::c_int) -> Result<(), String> {
    if rc != 0 {
        return Err(format!("atexit returned {rc}"));
    }
    Ok(())
}

fn backend_from_subsystem(subsystem: SDL_SYSWM_TYPE) -> WindowBackend {
    match subsystem {
        SDL_SYSWM_TYPE::SDL_SYSWM_WAYLAND => WindowBackend::Wayland,
        SDL_SYSWM_TYPE::SDL_SYSWM_X11 => WindowBackend::X11,
        SDL_SYSWM_TYPE::SDL_SYSWM_WINDOWS | SDL_SYSWM_TYPE::SDL_SYSWM_WINRT => {
            WindowBackend::Win32
        }
        SDL_SYSWM_TYPE::SDL_SYSWM_COCOA => WindowBackend::AppKit,
        _ => WindowBackend::Other,
    }
}

impl Platform for SdlPlatform {
    type Window = Window;
    type Context = GLContext;
    type Gl = NativeGl;

    fn init_video(&mut self) -> Result<(), String> {
        let sdl_context = sdl2::init()?;
        let video_subsystem = sdl_context.video()?;
        self.sdl_context = Some(sdl_context);
        self.video_subsystem = Some(video_subsystem);
        Ok(())
    }

    fn register_shutdown_hook(&mut self) -> Result<(), String> {
        shutdown_hook_status(unsafe { libc::atexit(quit_sdl) })
    }

    fn set_gl_attributes(&mut self, version: GlVersion) {
        let Ok(video_subsystem) = self.video() else {
            return;
        };
        let gl_attr = video_subsystem.gl_attr();
        gl_attr.set_context_profile(match version.profile {
            GlProfile::Core => sdl2::video::GLProfile::Core,
        });
        gl_attr.set_context_version(version.major, version.minor);
    }

    fn create_window(&mut self, settings: &WindowSettings) -> Result<Window, String> {
        // position is left undefined, the platform places the window
        self.video()?
            .window(&settings.title, settings.w, settings.h)
            .opengl()
            .build()
            .map_err(|e| e.to_string())
    }

    fn window_backend(&self, window: &Window) -> Result<WindowBackend, String> {
        // SDL checks the caller's version field before filling in the rest
        let mut info: SDL_SysWMinfo = unsafe { std::mem::zeroed() };
        unsafe { sdl2::sys::SDL_GetVersion(&mut info.version) };
        let got_info = unsafe { sdl2::sys::SDL_GetWindowWMInfo(window.raw(), &mut info) };
        if got_info == SDL_bool::SDL_FALSE {
            return Err(sdl2::get_error());
        }
        Ok(backend_from_subsystem(info.subsystem))
    }

    fn create_context(&mut self, window: &Window) -> Result<GLContext, String> {
        window.gl_create_context()
    }

    fn load_gl(&mut self, _context: &GLContext) -> Result<NativeGl, String> {
        let video_subsystem = self.video()?;
        gl::load_with(|name| video_subsystem.gl_get_proc_address(name) as *const _);

        let missing = missing_entry_points();
        if !missing.is_empty() {
            return Err(format!("unresolved entry points: {}", missing.join(", ")));
        }
        // the context created just before is current on this thread
        Ok(unsafe { NativeGl::assume_loaded() })
    }

    fn swap_window(&mut self, window: &Window) {
        window.gl_swap_window();
    }

    fn delay(&mut self, duration: Duration) {
        ::std::thread::sleep(duration);
    }

    fn delete_context(&mut self, context: GLContext) {
        drop(context);
    }

    fn destroy_window(&mut self, window: Window) {
        drop(window);
    }
}
