//! User-facing notification texts

use serde::{Deserialize, Serialize};

use crate::models::{EntityKind, LoanAction};

/// Display language of the notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    Ja,
    En,
}

/// Everything the interaction layer may tell the user
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Message {
    Created { kind: EntityKind, name: String },
    Rejected { kind: EntityKind, reason: Option<String> },
    UnexpectedResponse,
    CommunicationError,
    ScannerUnsupported,
    DetectorInitFailed,
    CameraFailed,
    ClipboardUnavailable,
    ClipboardEmpty,
    ClipboardReadFailed,
    LoanRecorded { action: LoanAction, isbn: String },
    LoanRejected { reason: Option<String> },
}

impl Message {
    pub fn text(&self, locale: Locale) -> String {
        match locale {
            Locale::Ja => self.ja(),
            Locale::En => self.en(),
        }
    }

    fn ja(&self) -> String {
        match self {
            Message::Created { kind: EntityKind::Book, name } => {
                format!("書籍を登録しました: {}", name)
            }
            Message::Created { kind: EntityKind::User, name } => {
                format!("ユーザーを追加しました: {}", name)
            }
            Message::Rejected { kind: EntityKind::Book, reason } => format!(
                "登録失敗: {}",
                reason.as_deref().unwrap_or("書籍登録に失敗しました。")
            ),
            Message::Rejected { kind: EntityKind::User, reason } => format!(
                "ユーザー登録失敗: {}",
                reason.as_deref().unwrap_or("不明なエラー")
            ),
            Message::UnexpectedResponse => {
                "サーバーから予期しないレスポンスを受け取りました。ページをリロードします。".to_string()
            }
            Message::CommunicationError => {
                "通信エラーが発生しました。開発者ツールのコンソールを確認してください。".to_string()
            }
            Message::ScannerUnsupported => "このブラウザはカメラ直接スキャンに対応していません。\
                 外部スキャナーで読み取り「クリップボード貼り付け」を使ってください。"
                .to_string(),
            Message::DetectorInitFailed => {
                "BarcodeDetector の初期化に失敗しました。ブラウザの対応状況を確認してください。"
                    .to_string()
            }
            Message::CameraFailed => {
                "カメラの起動に失敗しました。サイトのカメラ許可を確認してください。".to_string()
            }
            Message::ClipboardUnavailable => {
                "クリップボードAPIが利用できません。手動で貼り付けてください。".to_string()
            }
            Message::ClipboardEmpty => "クリップボードにテキストがありません。".to_string(),
            Message::ClipboardReadFailed => {
                "クリップボードの読み取りに失敗しました。権限を確認してください。".to_string()
            }
            Message::LoanRecorded { action, isbn } => {
                format!("アクションを登録しました: {} (ISBN: {})", action, isbn)
            }
            Message::LoanRejected { reason } => format!(
                "アクション登録中にエラーが発生しました: {}",
                reason.as_deref().unwrap_or("不明なエラー")
            ),
        }
    }

    fn en(&self) -> String {
        match self {
            Message::Created { kind: EntityKind::Book, name } => {
                format!("Book registered: {}", name)
            }
            Message::Created { kind: EntityKind::User, name } => format!("User added: {}", name),
            Message::Rejected { kind: EntityKind::Book, reason } => format!(
                "Registration failed: {}",
                reason.as_deref().unwrap_or("could not register the book.")
            ),
            Message::Rejected { kind: EntityKind::User, reason } => format!(
                "User registration failed: {}",
                reason.as_deref().unwrap_or("unknown error")
            ),
            Message::UnexpectedResponse => {
                "Unexpected response from the server. Reloading the page.".to_string()
            }
            Message::CommunicationError => {
                "A communication error occurred. Check the developer console.".to_string()
            }
            Message::ScannerUnsupported => "This browser cannot scan with the camera. \
                 Scan with an external scanner and use \"Paste from clipboard\"."
                .to_string(),
            Message::DetectorInitFailed => {
                "Could not initialize the barcode detector. Check browser support.".to_string()
            }
            Message::CameraFailed => {
                "Could not start the camera. Check the site's camera permission.".to_string()
            }
            Message::ClipboardUnavailable => {
                "Clipboard access is not available. Paste the code manually.".to_string()
            }
            Message::ClipboardEmpty => "The clipboard contains no text.".to_string(),
            Message::ClipboardReadFailed => {
                "Could not read the clipboard. Check the permission.".to_string()
            }
            Message::LoanRecorded { action, isbn } => {
                format!("Action recorded: {} (ISBN: {})", action, isbn)
            }
            Message::LoanRejected { reason } => format!(
                "Could not record the action: {}",
                reason.as_deref().unwrap_or("unknown error")
            ),
        }
    }
}
