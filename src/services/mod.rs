//! Page behaviors and the services they rely on

pub mod http;
pub mod loans;
pub mod notifier;
pub mod scanner;
pub mod submitter;
pub mod timestamp;

pub use http::{HttpTransport, ReqwestTransport};
pub use loans::LoansClient;
pub use notifier::{Announcer, Notification, NotificationLevel, Notifier, RecordingNotifier, TracingNotifier};
pub use scanner::{PasteOutcome, ScanOutcome, ScannerController, ScannerState};
pub use submitter::{BookSubmitter, EntitySubmitter, SubmissionOutcome, UserSubmitter};
