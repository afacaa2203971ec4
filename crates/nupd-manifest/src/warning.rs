//! Non-fatal diagnostics for fields the decoder had to drop.
//!
//! Decoding never fails because of a single bad field; the attribute keeps
//! its zero value instead. Callers that want to know which fields were
//! dropped pass a [`WarningSink`] to [`crate::UpdateManifest::decode_with`].

use std::{fmt, sync::Mutex};

use serde::Serialize;

/// Why a field value was dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    InvalidInteger,
    InvalidDate,
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WarningKind::InvalidInteger => write!(f, "not an unsigned integer"),
            WarningKind::InvalidDate => write!(f, "not a DD.MM.YYYY date"),
        }
    }
}

/// A field whose value could not be converted to its target type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldWarning {
    pub section: String,
    pub key: String,
    pub value: String,
    pub kind: WarningKind,
}

impl fmt::Display for FieldWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}={:?}: {}",
            self.section, self.key, self.value, self.kind
        )
    }
}

/// Trait for consuming field warnings.
pub trait WarningSink: Send + Sync {
    fn emit(&self, warning: FieldWarning);
}

/// Discards every warning.
pub struct NullSink;

impl WarningSink for NullSink {
    fn emit(&self, _warning: FieldWarning) {}
}

/// Collector sink that stores all warnings for inspection.
#[derive(Default)]
pub struct CollectorSink {
    warnings: Mutex<Vec<FieldWarning>>,
}

impl CollectorSink {
    pub fn warnings(&self) -> Vec<FieldWarning> {
        self.warnings
            .lock()
            .map(|w| w.clone())
            .unwrap_or_else(|poisoned| poisoned.into_inner().clone())
    }

    pub fn into_warnings(self) -> Vec<FieldWarning> {
        self.warnings
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    pub fn len(&self) -> usize {
        self.warnings().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl WarningSink for CollectorSink {
    fn emit(&self, warning: FieldWarning) {
        match self.warnings.lock() {
            Ok(mut w) => w.push(warning),
            Err(poisoned) => poisoned.into_inner().push(warning),
        }
    }
}
