pub mod bootstrap;
pub mod config;
pub mod error;
pub mod glutils;
pub mod logging;
pub mod math;
pub mod mesh;
pub mod platform;
pub mod render;
pub mod shaders;
pub mod system;
