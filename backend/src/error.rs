use thiserror::Error;

/// Fatal bootstrap failures. Each one stops the chain, releases what was
/// already acquired and turns into a non-zero exit status.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BootstrapError {
    #[error("Unable to initialize SDL: {0}")]
    PlatformInit(String),

    #[error("Failed registering SDL_Quit: {0}")]
    ShutdownHook(String),

    #[error("Could not create window: {0}")]
    WindowCreation(String),

    #[error("Could not create OpenGL context: {0}")]
    ContextCreation(String),

    #[error("Error initializing GL function loader: {0}")]
    LoaderInit(String),
}

pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_FAILURE: u8 = 1;

/// Only the bootstrap chain decides the exit status; render problems are
/// reported through the log and never reach here.
pub fn exit_code(result: &Result<(), BootstrapError>) -> u8 {
    match result {
        Ok(()) => EXIT_SUCCESS,
        Err(_) => EXIT_FAILURE,
    }
}
