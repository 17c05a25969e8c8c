use backend::bootstrap;
use backend::config::Settings;
use backend::error::exit_code;
use backend::logging::{init_logging, LoggingConfig};
use backend::system::SdlPlatform;
use std::process::ExitCode;

fn main() -> ExitCode {
    init_logging(LoggingConfig::default());

    let settings = Settings::default();
    let mut system = SdlPlatform::new();
    let result = bootstrap::run(&mut system, &settings);
    ExitCode::from(exit_code(&result))
}
