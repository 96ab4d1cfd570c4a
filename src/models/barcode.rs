//! Barcode detection types

use serde::{Deserialize, Serialize};

/// Symbologies understood by the platform barcode detector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BarcodeFormat {
    #[serde(rename = "ean_13")]
    Ean13,
    #[serde(rename = "ean_8")]
    Ean8,
    #[serde(rename = "upc_a")]
    UpcA,
    #[serde(rename = "upc_e")]
    UpcE,
    #[serde(rename = "code_128")]
    Code128,
    #[serde(rename = "qr_code")]
    QrCode,
}

impl BarcodeFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            BarcodeFormat::Ean13 => "ean_13",
            BarcodeFormat::Ean8 => "ean_8",
            BarcodeFormat::UpcA => "upc_a",
            BarcodeFormat::UpcE => "upc_e",
            BarcodeFormat::Code128 => "code_128",
            BarcodeFormat::QrCode => "qr_code",
        }
    }

    /// One-dimensional retail symbologies
    pub fn is_retail_1d(&self) -> bool {
        matches!(
            self,
            BarcodeFormat::Ean13 | BarcodeFormat::Ean8 | BarcodeFormat::UpcA | BarcodeFormat::UpcE
        )
    }
}

/// Preferred camera when opening a video stream
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum FacingMode {
    User,
    #[default]
    Environment,
}

/// One barcode reported by the detector for a frame
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DetectedBarcode {
    pub format: Option<BarcodeFormat>,
    pub raw_value: Option<String>,
    pub raw_data: Option<Vec<u8>>,
}

impl DetectedBarcode {
    pub fn from_value(value: impl Into<String>) -> Self {
        Self {
            format: Some(BarcodeFormat::Ean13),
            raw_value: Some(value.into()),
            raw_data: None,
        }
    }

    /// Decoded value, preferring the string form over the raw bytes
    pub fn code(&self) -> Option<String> {
        if let Some(value) = self.raw_value.as_deref().filter(|v| !v.is_empty()) {
            return Some(value.to_string());
        }
        self.raw_data
            .as_deref()
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
            .filter(|v| !v.is_empty())
    }
}
