//! Decoder for `update.ver` update manifests.
//!
//! An update manifest is an INI document listing mirror hosts for three
//! release channels (`[HOSTS]`) and one section per downloadable component.
//! This crate turns the raw bytes into an [`UpdateManifest`]; fetching the
//! file is left to the caller.
//!
//! # Overview
//!
//! Decoding happens in a single pass:
//! - [`Document::load`] tokenizes the bytes into ordered sections
//! - [`UpdateManifest::from_document`] routes each section
//! - [`decode`] converts individual fields
//!
//! Only a document that cannot be tokenized is an error. A field whose value
//! does not convert (a bad integer or date) keeps its zero value; callers
//! interested in those can collect them as [`FieldWarning`]s.
//!
//! # Example
//!
//! ```
//! use nupd_manifest::{Channel, UpdateManifest};
//!
//! let content = b"\
//! [HOSTS]
//! Other=10@http://mirror-a/eset_upd/, 100000@http://mirror-b/eset_upd/
//!
//! [ENGINE0]
//! versionid=NOTANUMBER
//! size=1220743
//! ";
//!
//! let (manifest, warnings) = UpdateManifest::from_bytes_with_warnings(content).unwrap();
//!
//! assert_eq!(manifest.hosts.channel(Channel::Regular).len(), 2);
//! assert_eq!(manifest.component("ENGINE0").unwrap().version_id, 0);
//! assert_eq!(warnings.len(), 1);
//! ```

pub mod decode;
pub mod document;
pub mod error;
pub mod manifest;
pub mod model;
pub mod warning;

pub use document::{Document, Section};
pub use error::{ManifestError, Result};
pub use manifest::HOSTS_SECTION;
pub use model::{Channel, Component, HostLists, UpdateManifest};
pub use warning::{CollectorSink, FieldWarning, NullSink, WarningKind, WarningSink};
