/// Fatal failures while bringing up the GPU renderer.
#[derive(Debug, thiserror::Error)]
pub enum RenderInitError {
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),
    #[error("no GPU adapter compatible with the surface")]
    AdapterMissing,
    #[error("failed to create device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
    #[error("surface reports no supported texture formats")]
    NoSurfaceFormat,
}
