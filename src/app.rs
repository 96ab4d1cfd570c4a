//! Page-level wiring of the behaviors
//!
//! [`App`] is what a page binding holds on to: it is built once per page load
//! and each DOM event is forwarded to the matching `on_*` handler.

use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::{
    config::{ClientConfig, PageBindings},
    error::ClientResult,
    page::Page,
    platform::Platform,
    services::{
        notifier::{Announcer, Notifier},
        scanner::{PasteOutcome, ScanOutcome, ScannerController},
        submitter::{BookSubmitter, SubmissionOutcome, UserSubmitter},
        timestamp, HttpTransport, LoansClient,
    },
};

/// Features found on the page when it became ready
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PageFeatures {
    pub timestamp_defaulted: bool,
    pub book_form: bool,
    pub user_form: bool,
    pub scanner: bool,
    /// Camera scanning is possible; otherwise only paste works
    pub camera_scan: bool,
    pub paste: bool,
}

pub struct App {
    page: Arc<dyn Page>,
    bindings: PageBindings,
    books: BookSubmitter,
    users: UserSubmitter,
    loans: LoansClient,
    scanner: Option<Arc<ScannerController>>,
    camera_scan: bool,
}

impl App {
    pub fn new(
        config: &ClientConfig,
        page: Arc<dyn Page>,
        transport: Arc<dyn HttpTransport>,
        platform: Platform,
        notifier: Arc<dyn Notifier>,
    ) -> Self {
        let announcer = Announcer::new(notifier, config.locale);
        let bindings = config.page.clone();
        let camera_scan =
            platform.supports_camera_scan() && page.has_element(&bindings.video);

        // No start button means no scanner UI on this page
        let scanner = page.has_element(&bindings.scan_start_button).then(|| {
            Arc::new(ScannerController::new(
                page.clone(),
                platform,
                bindings.clone(),
                config.scanner.clone(),
                announcer.clone(),
            ))
        });

        Self {
            books: BookSubmitter::for_books(transport.clone(), page.clone(), announcer.clone(), &bindings),
            users: UserSubmitter::for_users(transport.clone(), page.clone(), announcer.clone(), &bindings),
            loans: LoansClient::new(transport, announcer),
            scanner,
            camera_scan,
            page,
            bindings,
        }
    }

    /// Document is ready: default the timestamp and report what is bound
    pub fn on_page_ready(&self) -> PageFeatures {
        let features = PageFeatures {
            timestamp_defaulted: timestamp::fill_with_local_time(
                self.page.as_ref(),
                &self.bindings.timestamp_input,
            ),
            book_form: self.books.is_bound(),
            user_form: self.users.is_bound(),
            scanner: self.scanner.is_some(),
            camera_scan: self.scanner.is_some() && self.camera_scan,
            paste: self.paste_scanner().is_some(),
        };
        if let Some(scanner) = &self.scanner {
            scanner.bind_controls();
        }
        tracing::info!("Page ready: {:?}", features);
        features
    }

    pub async fn on_book_submit(&self) -> SubmissionOutcome {
        self.books.submit().await
    }

    pub async fn on_user_submit(&self) -> SubmissionOutcome {
        self.users.submit().await
    }

    /// Start scanning and run the detection loop in the background
    pub async fn on_scan_start(&self) -> Option<ClientResult<JoinHandle<ScanOutcome>>> {
        let scanner = self.scanner.clone()?;
        Some(match scanner.start().await {
            Ok(()) => Ok(tokio::spawn(async move { scanner.run_detection().await })),
            Err(e) => Err(e),
        })
    }

    pub fn on_scan_stop(&self) {
        if let Some(scanner) = &self.scanner {
            scanner.stop();
        }
    }

    /// Paste from the clipboard; needs the paste button on the page
    pub async fn on_paste(&self) -> Option<PasteOutcome> {
        match self.paste_scanner() {
            Some(scanner) => Some(scanner.paste().await),
            None => None,
        }
    }

    fn paste_scanner(&self) -> Option<&Arc<ScannerController>> {
        self.scanner
            .as_ref()
            .filter(|_| self.page.has_element(&self.bindings.paste_button))
    }

    pub fn scanner(&self) -> Option<&Arc<ScannerController>> {
        self.scanner.as_ref()
    }

    pub fn loans(&self) -> &LoansClient {
        &self.loans
    }
}
