//! Page flows driven through `App`

use async_trait::async_trait;
use mockall::mock;
use std::sync::{Arc, Mutex};

use kashidashi_client::{
    config::ClientConfig,
    error::ClientResult,
    messages::{Locale, Message},
    models::{DetectedBarcode, FacingMode, RawResponse, SelectOption, BarcodeFormat},
    page::{MemoryPage, Page},
    platform::{BarcodeDetection, BarcodeDetector, Camera, Clipboard, MediaStream, Platform, VideoSurface},
    services::{PasteOutcome, RecordingNotifier, ScanOutcome, ScannerState, SubmissionOutcome},
    App, ClientError,
};

mock! {
    Transport {}

    #[async_trait]
    impl kashidashi_client::services::HttpTransport for Transport {
        async fn post_form(&self, action: &str, fields: &[(String, String)]) -> ClientResult<RawResponse>;
    }
}

fn index_page() -> Arc<MemoryPage> {
    Arc::new(
        MemoryPage::new()
            .with_input("logged_at", "")
            .with_form("/add_book", &[("isbn_new", "")])
            .with_form("/add_user", &[("user_name_new", "")])
            .with_select("isbn", vec![SelectOption::new("9784101010014", "Kokoro — 9784101010014")])
            .with_select("user_id", vec![SelectOption::new("1", "Sato (ID: 1)")])
            .with_button("scan-start", false)
            .with_button("scan-stop", true)
            .with_button("paste-isbn", false)
            .with_element("scanner-video")
            .with_text("scanned_result", ""),
    )
}

fn json(body: &str) -> ClientResult<RawResponse> {
    Ok(RawResponse {
        status: 200,
        content_type: Some("application/json".to_string()),
        body: body.to_string(),
    })
}

fn english() -> ClientConfig {
    ClientConfig {
        locale: Locale::En,
        ..ClientConfig::default()
    }
}

struct Stream(Mutex<usize>);

impl MediaStream for Stream {
    fn active_tracks(&self) -> usize {
        if *self.0.lock().unwrap() == 0 { 1 } else { 0 }
    }

    fn stop_tracks(&self) {
        *self.0.lock().unwrap() += 1;
    }
}

struct Device(Arc<Stream>);

#[async_trait]
impl Camera for Device {
    async fn open(&self, facing: FacingMode) -> ClientResult<Arc<dyn MediaStream>> {
        assert_eq!(facing, FacingMode::Environment);
        Ok(self.0.clone())
    }
}

#[derive(Default)]
struct Video(Mutex<Option<Arc<dyn MediaStream>>>);

#[async_trait]
impl VideoSurface for Video {
    async fn play(&self, stream: Arc<dyn MediaStream>) -> ClientResult<()> {
        *self.0.lock().unwrap() = Some(stream);
        Ok(())
    }

    fn release(&self) -> Option<Arc<dyn MediaStream>> {
        self.0.lock().unwrap().take()
    }
}

/// Sees nothing for a few frames, then the code
struct SlowDetector {
    frames_before_hit: Mutex<usize>,
    code: String,
}

#[async_trait]
impl BarcodeDetector for SlowDetector {
    async fn detect(&self, _video: &dyn VideoSurface) -> ClientResult<Vec<DetectedBarcode>> {
        let mut remaining = self.frames_before_hit.lock().unwrap();
        if *remaining > 0 {
            *remaining -= 1;
            return Ok(vec![]);
        }
        Ok(vec![DetectedBarcode {
            format: Some(BarcodeFormat::Ean13),
            raw_value: None,
            raw_data: Some(self.code.as_bytes().to_vec()),
        }])
    }
}

struct Detection(Arc<SlowDetector>);

impl BarcodeDetection for Detection {
    fn create(&self, formats: &[BarcodeFormat]) -> ClientResult<Arc<dyn BarcodeDetector>> {
        if formats.iter().all(|f| f.is_retail_1d()) {
            Ok(self.0.clone())
        } else {
            Err(ClientError::Unsupported("format".to_string()))
        }
    }
}

struct Text(String);

#[async_trait]
impl Clipboard for Text {
    async fn read_text(&self) -> ClientResult<String> {
        Ok(self.0.clone())
    }
}

#[tokio::test]
async fn test_page_ready_defaults_timestamp_and_finds_features() {
    let page = index_page();
    let app = App::new(
        &english(),
        page.clone(),
        Arc::new(MockTransport::new()),
        Platform::headless(),
        Arc::new(RecordingNotifier::new()),
    );

    let features = app.on_page_ready();

    assert!(features.timestamp_defaulted && features.book_form && features.user_form && features.scanner);
    let value = page.input_value("logged_at").unwrap();
    assert_eq!(value.len(), "YYYY-MM-DDTHH:MM".len());
    assert_eq!(&value[10..11], "T");
    assert_eq!(page.is_disabled("scan-stop"), Some(true));

    // A second ready event keeps the value already there
    assert!(!app.on_page_ready().timestamp_defaulted);
    assert_eq!(page.input_value("logged_at").unwrap(), value);
}

#[tokio::test]
async fn test_page_without_scanner() {
    let page = Arc::new(MemoryPage::new().with_form("/add_book", &[("isbn_new", "")]));
    let app = App::new(
        &english(),
        page,
        Arc::new(MockTransport::new()),
        Platform::headless(),
        Arc::new(RecordingNotifier::new()),
    );

    let features = app.on_page_ready();
    assert!(!features.scanner && !features.timestamp_defaulted && !features.user_form);
    assert!(app.on_scan_start().await.is_none());
    assert!(app.on_paste().await.is_none());
    app.on_scan_stop();
}

#[tokio::test]
async fn test_both_forms_update_their_selects() {
    let page = index_page();
    let notifier = Arc::new(RecordingNotifier::new());
    let mut transport = MockTransport::new();
    transport
        .expect_post_form()
        .withf(|action, _| action == "/add_book")
        .returning(|_, _| json(r#"{"ok":true,"isbn":"9784101010021","title":"Botchan"}"#));
    transport
        .expect_post_form()
        .withf(|action, fields| action == "/add_user" && fields[0].1 == "Ito")
        .returning(|_, _| json(r#"{"ok":true,"user_id":"2","name":"Ito"}"#));

    let app = App::new(&english(), page.clone(), Arc::new(transport), Platform::headless(), notifier.clone());
    page.set_input_value("isbn_new", "9784101010021");
    page.set_input_value("user_name_new", "Ito");

    assert!(matches!(app.on_book_submit().await, SubmissionOutcome::Created { .. }));
    assert!(matches!(app.on_user_submit().await, SubmissionOutcome::Created { .. }));

    assert_eq!(page.select_options("isbn").unwrap().len(), 2);
    assert_eq!(page.selected("isbn").as_deref(), Some("9784101010021"));
    assert_eq!(page.select_options("user_id").unwrap()[1].label, "Ito (ID: 2)");
    assert_eq!(page.selected("user_id").as_deref(), Some("2"));
    assert_eq!(
        notifier.texts(),
        vec!["Book registered: Botchan".to_string(), "User added: Ito".to_string()]
    );
}

#[tokio::test]
async fn test_user_rejection_without_reason_uses_fallback() {
    let page = index_page();
    let notifier = Arc::new(RecordingNotifier::new());
    let mut transport = MockTransport::new();
    transport
        .expect_post_form()
        .returning(|_, _| json(r#"{"ok":false}"#));

    let app = App::new(&ClientConfig::default(), page.clone(), Arc::new(transport), Platform::headless(), notifier.clone());
    let outcome = app.on_user_submit().await;

    assert_eq!(outcome, SubmissionOutcome::Rejected { reason: None });
    assert_eq!(notifier.texts(), vec!["ユーザー登録失敗: 不明なエラー".to_string()]);
    assert_eq!(page.select_options("user_id").unwrap().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_scan_then_paste_share_targets() {
    let page = index_page();
    let stream = Arc::new(Stream(Mutex::new(0)));
    let notifier = Arc::new(RecordingNotifier::new());
    let platform = Platform {
        detection: Some(Arc::new(Detection(Arc::new(SlowDetector {
            frames_before_hit: Mutex::new(3),
            code: "9784101010014".to_string(),
        })))),
        camera: Some(Arc::new(Device(stream.clone()))),
        video: Some(Arc::new(Video::default())),
        clipboard: Some(Arc::new(Text("\t9784101010021\n".to_string()))),
    };
    let app = App::new(&english(), page.clone(), Arc::new(MockTransport::new()), platform, notifier.clone());
    app.on_page_ready();

    let handle = app.on_scan_start().await.unwrap().unwrap();
    assert_eq!(app.scanner().unwrap().state(), ScannerState::Scanning);
    assert_eq!(page.is_disabled("scan-start"), Some(true));

    assert_eq!(handle.await.unwrap(), ScanOutcome::Detected("9784101010014".to_string()));
    // `isbn_new` is the first scan target; the select named `isbn` is not an input
    assert_eq!(page.text("scanned_result").as_deref(), Some("9784101010014"));
    assert_eq!(*stream.0.lock().unwrap(), 1);
    assert_eq!(app.scanner().unwrap().state(), ScannerState::Idle);

    assert_eq!(
        app.on_paste().await,
        Some(PasteOutcome::Pasted("9784101010021".to_string()))
    );
    assert_eq!(page.text("scanned_result").as_deref(), Some("9784101010021"));
    assert_eq!(page.input_value("isbn_new").as_deref(), Some("9784101010021"));
    assert!(notifier.messages().iter().all(|m| *m != Message::CameraFailed));
}

#[tokio::test]
async fn test_paste_needs_its_button() {
    let page = Arc::new(
        MemoryPage::new()
            .with_button("scan-start", false)
            .with_button("scan-stop", true)
            .with_input("isbn_new", ""),
    );
    let notifier = Arc::new(RecordingNotifier::new());
    let platform = Platform {
        clipboard: Some(Arc::new(Text("9784101010014".to_string()))),
        ..Platform::headless()
    };
    let app = App::new(&english(), page.clone(), Arc::new(MockTransport::new()), platform, notifier.clone());

    let features = app.on_page_ready();
    assert!(features.scanner);
    assert!(!features.paste);
    assert!(!features.camera_scan);
    assert!(app.on_paste().await.is_none());
    assert_eq!(page.input_value("isbn_new").as_deref(), Some(""));
    assert!(notifier.notifications().is_empty());
}

#[tokio::test]
async fn test_camera_scan_needs_video_element() {
    let stream = Arc::new(Stream(Mutex::new(0)));
    let platform = || Platform {
        detection: Some(Arc::new(Detection(Arc::new(SlowDetector {
            frames_before_hit: Mutex::new(0),
            code: "9784101010014".to_string(),
        })))),
        camera: Some(Arc::new(Device(stream.clone()))),
        video: Some(Arc::new(Video::default())),
        clipboard: None,
    };

    let features = App::new(
        &english(),
        index_page(),
        Arc::new(MockTransport::new()),
        platform(),
        Arc::new(RecordingNotifier::new()),
    )
    .on_page_ready();
    assert!(features.camera_scan && features.paste);

    let page = Arc::new(MemoryPage::new().with_button("scan-start", false));
    let features = App::new(
        &english(),
        page,
        Arc::new(MockTransport::new()),
        platform(),
        Arc::new(RecordingNotifier::new()),
    )
    .on_page_ready();
    assert!(features.scanner && !features.camera_scan);
}
