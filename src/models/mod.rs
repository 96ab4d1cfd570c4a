//! Data models for the Kashidashi client

pub mod barcode;
pub mod loan;
pub mod select;
pub mod submission;

// Re-export commonly used types
pub use barcode::{BarcodeFormat, DetectedBarcode, FacingMode};
pub use loan::{LoanAction, LoanReply, LoanRequest};
pub use select::SelectOption;
pub use submission::{
    BookCreated, CreatedEntity, CreationReply, EntityKind, RawResponse, SubmissionResponse,
    UserCreated, UserId,
};
