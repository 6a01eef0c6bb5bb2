use thiserror::Error;

#[derive(Debug, Error)]
pub enum ShadowsError {
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("no suitable GPU adapter: {0}")]
    Adapter(#[from] wgpu::RequestAdapterError),

    #[error("failed to request device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),

    #[error("failed to decode texture: {0}")]
    Texture(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("DOM error: {0}")]
    Dom(String),

    #[cfg(not(target_arch = "wasm32"))]
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),

    #[cfg(not(target_arch = "wasm32"))]
    #[error("event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
}

impl From<toml::de::Error> for ShadowsError {
    fn from(e: toml::de::Error) -> Self {
        ShadowsError::Config(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ShadowsError>;
