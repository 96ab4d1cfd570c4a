//! Optional device capabilities used by the scanner
//!
//! Each capability may be missing from the platform; [`Platform`] holds
//! whichever ones the binding could provide.

use async_trait::async_trait;
use std::sync::Arc;

use crate::{
    error::ClientResult,
    models::{BarcodeFormat, DetectedBarcode, FacingMode},
};

/// Live camera stream
pub trait MediaStream: Send + Sync {
    fn active_tracks(&self) -> usize;

    /// Stop every track, releasing the device
    fn stop_tracks(&self);
}

#[async_trait]
pub trait Camera: Send + Sync {
    /// Ask for a video stream; fails on denied permission or missing device
    async fn open(&self, facing: FacingMode) -> ClientResult<Arc<dyn MediaStream>>;
}

/// Video element showing the camera feed
#[async_trait]
pub trait VideoSurface: Send + Sync {
    /// Bind the stream and start playback
    async fn play(&self, stream: Arc<dyn MediaStream>) -> ClientResult<()>;

    /// Pause and unbind, returning the stream that was bound
    fn release(&self) -> Option<Arc<dyn MediaStream>>;
}

#[async_trait]
pub trait BarcodeDetector: Send + Sync {
    /// Inspect the frame currently shown by `video`
    async fn detect(&self, video: &dyn VideoSurface) -> ClientResult<Vec<DetectedBarcode>>;
}

/// Native barcode detection support
pub trait BarcodeDetection: Send + Sync {
    fn create(&self, formats: &[BarcodeFormat]) -> ClientResult<Arc<dyn BarcodeDetector>>;
}

#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn read_text(&self) -> ClientResult<String>;
}

#[derive(Clone, Default)]
pub struct Platform {
    pub detection: Option<Arc<dyn BarcodeDetection>>,
    pub camera: Option<Arc<dyn Camera>>,
    pub video: Option<Arc<dyn VideoSurface>>,
    pub clipboard: Option<Arc<dyn Clipboard>>,
}

impl Platform {
    /// Platform without any capability
    pub fn headless() -> Self {
        Self::default()
    }

    pub fn supports_camera_scan(&self) -> bool {
        self.detection.is_some() && self.camera.is_some() && self.video.is_some()
    }
}
