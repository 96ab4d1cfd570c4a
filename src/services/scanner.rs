//! Camera barcode scanner with clipboard fallback
//!
//! The controller owns at most one scanner session. Starting acquires the
//! camera and binds it to the video surface; the detection loop then polls the
//! detector at a fixed interval until a code is read, the session is stopped,
//! or detection fails. The clipboard fallback writes to the same targets and
//! does not depend on the session.

use std::sync::{Arc, Mutex, MutexGuard};
use tokio::sync::Notify;

use crate::{
    config::{PageBindings, ScannerConfig},
    error::{ClientError, ClientResult},
    isbn,
    messages::Message,
    page::Page,
    platform::{BarcodeDetector, MediaStream, Platform},
    services::notifier::Announcer,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScannerState {
    Idle,
    Starting,
    Scanning,
}

/// How a detection loop ended
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    Detected(String),
    Stopped,
    DetectionFailed(String),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PasteOutcome {
    Pasted(String),
    Empty,
    Unavailable,
    Failed,
}

struct Session {
    id: u64,
    stream: Arc<dyn MediaStream>,
    detector: Arc<dyn BarcodeDetector>,
}

struct Inner {
    state: ScannerState,
    /// Attempt id while `Starting`; cleared by `stop`
    starting: Option<u64>,
    session: Option<Session>,
    next_session_id: u64,
}

pub struct ScannerController {
    page: Arc<dyn Page>,
    platform: Platform,
    bindings: PageBindings,
    config: ScannerConfig,
    announcer: Announcer,
    inner: Mutex<Inner>,
    wake: Notify,
}

impl ScannerController {
    pub fn new(
        page: Arc<dyn Page>,
        platform: Platform,
        bindings: PageBindings,
        config: ScannerConfig,
        announcer: Announcer,
    ) -> Self {
        Self {
            page,
            platform,
            bindings,
            config,
            announcer,
            inner: Mutex::new(Inner {
                state: ScannerState::Idle,
                starting: None,
                session: None,
                next_session_id: 1,
            }),
            wake: Notify::new(),
        }
    }

    fn inner(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn state(&self) -> ScannerState {
        self.inner().state
    }

    /// Put the buttons in their idle state
    pub fn bind_controls(&self) {
        self.set_controls(ScannerState::Idle);
    }

    /// Open the camera and enter `Scanning`.
    ///
    /// Rejected unless the scanner is idle. Failures are reported to the user
    /// and leave the scanner idle with no stream held. A `stop` issued while
    /// the camera is opening cancels this attempt even if another one has
    /// begun since.
    pub async fn start(&self) -> ClientResult<()> {
        let (detection, attempt) = {
            let mut inner = self.inner();
            if inner.state != ScannerState::Idle {
                tracing::warn!("Scanner start ignored, state is {:?}", inner.state);
                return Err(ClientError::InvalidState(
                    "a scanner session is already active".to_string(),
                ));
            }
            let Some(detection) = self.platform.detection.clone() else {
                drop(inner);
                tracing::info!("Barcode detection not supported, paste fallback only");
                self.announcer.info(Message::ScannerUnsupported);
                return Err(ClientError::Unsupported("barcode detection".to_string()));
            };
            let attempt = inner.next_session_id;
            inner.next_session_id += 1;
            inner.state = ScannerState::Starting;
            inner.starting = Some(attempt);
            (detection, attempt)
        };
        self.set_controls(ScannerState::Starting);

        let detector = match detection.create(&self.config.formats) {
            Ok(detector) => detector,
            Err(e) => {
                tracing::error!("Barcode detector initialization failed: {}", e);
                if self.abort_start(attempt) {
                    self.announcer.error(Message::DetectorInitFailed);
                }
                return Err(e);
            }
        };

        let stream = match self.acquire_stream(attempt).await {
            Ok(stream) => stream,
            Err(e) => {
                if self.abort_start(attempt) {
                    tracing::error!("Camera start failed: {}", e);
                    self.announcer.error(Message::CameraFailed);
                } else {
                    tracing::debug!("Scanner start {} abandoned: {}", attempt, e);
                }
                return Err(e);
            }
        };

        {
            let mut inner = self.inner();
            if inner.starting != Some(attempt) {
                drop(inner);
                self.release_video();
                stream.stop_tracks();
                tracing::debug!("Scanner start {} stopped while playing", attempt);
                return Err(stopped_while_starting());
            }
            inner.starting = None;
            inner.session = Some(Session {
                id: attempt,
                stream,
                detector,
            });
            inner.state = ScannerState::Scanning;
        }
        self.set_controls(ScannerState::Scanning);
        tracing::info!("Scanner session {} started", attempt);
        Ok(())
    }

    fn is_starting(&self, attempt: u64) -> bool {
        self.inner().starting == Some(attempt)
    }

    async fn acquire_stream(&self, attempt: u64) -> ClientResult<Arc<dyn MediaStream>> {
        let camera = self
            .platform
            .camera
            .clone()
            .ok_or_else(|| ClientError::Unsupported("camera".to_string()))?;
        let video = self
            .platform
            .video
            .clone()
            .ok_or_else(|| ClientError::Device("no video element".to_string()))?;

        let stream = camera.open(self.config.facing_mode).await?;
        // The video surface may already belong to a newer attempt
        if !self.is_starting(attempt) {
            stream.stop_tracks();
            return Err(stopped_while_starting());
        }
        if let Err(e) = video.play(stream.clone()).await {
            video.release();
            stream.stop_tracks();
            return Err(e);
        }
        Ok(stream)
    }

    /// Return to `Idle` if `attempt` is still the pending start
    fn abort_start(&self, attempt: u64) -> bool {
        {
            let mut inner = self.inner();
            if inner.starting != Some(attempt) {
                return false;
            }
            inner.starting = None;
            inner.state = ScannerState::Idle;
        }
        self.set_controls(ScannerState::Idle);
        true
    }

    /// Poll the detector until the current session ends.
    ///
    /// Stopping is noticed at the next iteration; a result that arrives after
    /// the session was stopped is discarded.
    pub async fn run_detection(&self) -> ScanOutcome {
        let Some(session_id) = self.inner().session.as_ref().map(|s| s.id) else {
            return ScanOutcome::Stopped;
        };
        let Some(video) = self.platform.video.clone() else {
            return ScanOutcome::Stopped;
        };

        loop {
            let Some((detector, stream)) = self.live_session(session_id) else {
                tracing::debug!("Scanner session {} ended", session_id);
                return ScanOutcome::Stopped;
            };
            if stream.active_tracks() == 0 {
                tracing::debug!("Scanner session {} lost its tracks", session_id);
                return ScanOutcome::Stopped;
            }

            match detector.detect(video.as_ref()).await {
                Ok(barcodes) => {
                    if let Some(code) = barcodes.first().and_then(|b| b.code()) {
                        if self.live_session(session_id).is_none() {
                            tracing::debug!("Discarding code read after stop");
                            return ScanOutcome::Stopped;
                        }
                        tracing::info!("Barcode detected: {}", code);
                        self.write_code(&code);
                        if self.config.stop_after_first {
                            self.stop();
                            return ScanOutcome::Detected(code);
                        }
                    }
                }
                Err(e) => {
                    tracing::error!("Barcode detection failed: {}", e);
                    self.stop();
                    return ScanOutcome::DetectionFailed(e.to_string());
                }
            }

            tokio::select! {
                _ = tokio::time::sleep(self.config.poll_interval()) => {}
                _ = self.wake.notified() => {}
            }
        }
    }

    fn live_session(
        &self,
        session_id: u64,
    ) -> Option<(Arc<dyn BarcodeDetector>, Arc<dyn MediaStream>)> {
        let inner = self.inner();
        match (&inner.state, &inner.session) {
            (ScannerState::Scanning, Some(session)) if session.id == session_id => {
                Some((session.detector.clone(), session.stream.clone()))
            }
            _ => None,
        }
    }

    /// Release the camera and return to `Idle`. Safe to call at any time.
    pub fn stop(&self) {
        let (session, was) = {
            let mut inner = self.inner();
            let was = inner.state;
            inner.state = ScannerState::Idle;
            inner.starting = None;
            (inner.session.take(), was)
        };
        self.set_controls(ScannerState::Idle);

        let bound = self.release_video();
        if let Some(stream) = session.map(|s| s.stream).or(bound) {
            stream.stop_tracks();
        }
        self.wake.notify_waiters();

        if was != ScannerState::Idle {
            tracing::info!("Scanner stopped");
        }
    }

    fn release_video(&self) -> Option<Arc<dyn MediaStream>> {
        self.platform.video.as_ref().and_then(|video| video.release())
    }

    /// Read the clipboard and use its trimmed text as the scanned code
    pub async fn paste(&self) -> PasteOutcome {
        let Some(clipboard) = self.platform.clipboard.clone() else {
            self.announcer.error(Message::ClipboardUnavailable);
            return PasteOutcome::Unavailable;
        };

        match clipboard.read_text().await {
            Ok(text) => {
                let code = text.trim();
                if code.is_empty() {
                    self.announcer.info(Message::ClipboardEmpty);
                    return PasteOutcome::Empty;
                }
                self.write_code(code);
                PasteOutcome::Pasted(code.to_string())
            }
            Err(e) => {
                tracing::error!("Clipboard read failed: {}", e);
                self.announcer.error(Message::ClipboardReadFailed);
                PasteOutcome::Failed
            }
        }
    }

    fn write_code(&self, code: &str) {
        if !isbn::is_valid_isbn(code) {
            tracing::warn!("{} is not a valid ISBN, writing it anyway", code);
        }
        let written = self
            .bindings
            .scan_targets
            .iter()
            .any(|target| self.page.set_input_value(target, code));
        if !written {
            tracing::debug!("No scan target input on the page");
        }
        self.page.set_text(&self.bindings.result_display, code);
    }

    fn set_controls(&self, state: ScannerState) {
        let idle = state == ScannerState::Idle;
        self.page.set_disabled(&self.bindings.scan_start_button, !idle);
        self.page.set_disabled(&self.bindings.scan_stop_button, state != ScannerState::Scanning);
    }
}

fn stopped_while_starting() -> ClientError {
    ClientError::InvalidState("scanner stopped while starting".to_string())
}
