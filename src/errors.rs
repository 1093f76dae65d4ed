//! Error Types
//!
//! This module defines the error types used throughout the crate.
//!
//! # Overview
//!
//! The main error type [`HowlError`] covers the failure modes of startup:
//! - GPU initialization failures
//! - Window, event loop and host container errors
//! - Configuration parsing errors
//!
//! Once the mascot is running, nothing in the per-frame path returns an
//! error: render failures are logged and the frame is skipped.
//!
//! A missing host container is *not* an error. [`Mascot::mount`](crate::app::Mascot::mount)
//! reports it as `Ok(None)`.

use thiserror::Error;

/// The main error type for the crate.
#[derive(Error, Debug)]
pub enum HowlError {
    // ========================================================================
    // GPU & Rendering Errors
    // ========================================================================
    /// Failed to request a compatible GPU adapter.
    #[error("Failed to request WGPU adapter: {0}")]
    AdapterRequestFailed(String),

    /// Failed to create the GPU device.
    #[error("Failed to create WGPU device: {0}")]
    DeviceCreateFailed(#[from] wgpu::RequestDeviceError),

    /// Failed to create the presentation surface.
    #[error("Failed to create surface: {0}")]
    SurfaceCreateFailed(#[from] wgpu::CreateSurfaceError),

    /// The surface is not supported by the selected adapter.
    #[error("Surface not supported by adapter")]
    SurfaceUnsupported,

    /// Acquiring the next frame from the surface failed in a way that
    /// reconfiguring cannot fix.
    #[error("Failed to acquire surface texture: {0}")]
    SurfaceAcquireFailed(&'static str),

    // ========================================================================
    // Window Errors
    // ========================================================================
    /// Event loop error (winit).
    #[cfg(feature = "winit")]
    #[error("Event loop error: {0}")]
    EventLoopError(#[from] winit::error::EventLoopError),

    /// Window creation error (winit).
    #[cfg(feature = "winit")]
    #[error("Window creation error: {0}")]
    WindowCreateFailed(#[from] winit::error::OsError),

    // ========================================================================
    // Configuration Errors
    // ========================================================================
    /// JSON settings could not be parsed.
    #[error("Settings parse error: {0}")]
    SettingsError(#[from] serde_json::Error),

    // ========================================================================
    // Host Errors
    // ========================================================================
    /// The host container exists but the render target could not be set
    /// up inside it (e.g. the canvas could not be created or appended).
    #[error("Container unavailable: {0}")]
    ContainerUnavailable(String),
}

/// Alias for `Result<T, HowlError>`.
pub type Result<T> = std::result::Result<T, HowlError>;
