//! The setup, draw, teardown chain.
//!
//! Each bootstrap step either succeeds or ends the chain with a
//! [`BootstrapError`]. Whatever was acquired up to that point is tracked in
//! [`Acquired`] and released in reverse order (context, then window) on every
//! path out of [`run`].

use super::config::Settings;
use super::error::BootstrapError;
use super::glutils::log_opengl_info;
use super::logging::APP;
use super::platform::{Platform, WindowBackend};
use super::render;

/// Window and context currently owned by the chain.
// Field order is drop order: an unwinding path still drops the context first.
pub struct Acquired<P: Platform> {
    context: Option<P::Context>,
    window: Option<P::Window>,
}

impl<P: Platform> Acquired<P> {
    pub fn new() -> Self {
        Acquired {
            context: None,
            window: None,
        }
    }

    /// Deletes the context, then destroys the window. Each is handed back to
    /// the platform at most once; calling this again is a no-op.
    pub fn release(&mut self, platform: &mut P) {
        if let Some(context) = self.context.take() {
            log::debug!(target: APP, "deleting OpenGL context");
            platform.delete_context(context);
        }
        if let Some(window) = self.window.take() {
            log::debug!(target: APP, "destroying window");
            platform.destroy_window(window);
        }
    }
}

impl<P: Platform> Default for Acquired<P> {
    fn default() -> Self {
        Self::new()
    }
}

fn fatal(err: BootstrapError) -> BootstrapError {
    log::error!(target: APP, "{err}");
    err
}

/// Runs the whole demo once against `platform`.
///
/// The result only reflects the bootstrap steps. Render problems are logged
/// and do not turn a successful bring-up into an error.
pub fn run<P: Platform>(platform: &mut P, settings: &Settings) -> Result<(), BootstrapError> {
    platform
        .init_video()
        .map_err(|e| fatal(BootstrapError::PlatformInit(e)))?;
    platform
        .register_shutdown_hook()
        .map_err(|e| fatal(BootstrapError::ShutdownHook(e)))?;

    let mut acquired = Acquired::new();
    let result = bring_up(platform, settings, &mut acquired);
    acquired.release(platform);
    result
}

fn bring_up<P: Platform>(
    platform: &mut P,
    settings: &Settings,
    acquired: &mut Acquired<P>,
) -> Result<(), BootstrapError> {
    let Acquired { window, context } = acquired;

    platform.set_gl_attributes(settings.gl);
    let window = &*window.insert(
        platform
            .create_window(&settings.window)
            .map_err(|e| fatal(BootstrapError::WindowCreation(e)))?,
    );
    report_window_backend(platform, window, settings.preferred_backend);

    let context = &*context.insert(
        platform
            .create_context(window)
            .map_err(|e| fatal(BootstrapError::ContextCreation(e)))?,
    );
    let mut gl = platform
        .load_gl(context)
        .map_err(|e| fatal(BootstrapError::LoaderInit(e)))?;
    log_opengl_info(&gl);

    render::draw_triangle(&mut gl, settings);

    platform.swap_window(window);
    platform.delay(settings.present_delay);
    Ok(())
}

/// Logs which windowing backend the window ended up on. Purely
/// informational: nothing here can stop the chain.
pub fn report_window_backend<P: Platform>(
    platform: &P,
    window: &P::Window,
    preferred: WindowBackend,
) -> Option<WindowBackend> {
    match platform.window_backend(window) {
        Err(e) => {
            log::warn!(target: APP, "Could not retrieve window information: {e}");
            None
        }
        Ok(backend) if backend == preferred => {
            log::info!(target: APP, "Using {backend} - SUCCESS");
            Some(backend)
        }
        Ok(backend) => {
            log::warn!(target: APP, "Not using {preferred} ({backend} instead) - FAILURE");
            Some(backend)
        }
    }
}
