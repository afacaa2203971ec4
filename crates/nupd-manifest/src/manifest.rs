//! Section routing: builds an [`UpdateManifest`] from a loaded document.

use std::str::FromStr;

use tracing::{debug, trace};

use crate::{
    decode::{decode_component, decode_hosts},
    document::Document,
    error::{ManifestError, Result},
    model::UpdateManifest,
    warning::{CollectorSink, FieldWarning, NullSink, WarningSink},
};

/// Name of the section listing mirror hosts.
pub const HOSTS_SECTION: &str = "HOSTS";

impl UpdateManifest {
    /// Decodes manifest bytes, silently dropping fields that do not convert.
    ///
    /// # Errors
    ///
    /// Fails only when the bytes cannot be tokenized as an INI document; no
    /// partial manifest is returned in that case.
    ///
    /// # Example
    ///
    /// ```
    /// use nupd_manifest::UpdateManifest;
    ///
    /// let manifest = UpdateManifest::from_bytes(
    ///     b"[HOSTS]\nOther=10@http://mirror/eset_upd/\n\n[ENGINE0]\nbuild=1032\n",
    /// )
    /// .unwrap();
    ///
    /// assert_eq!(manifest.hosts.regular, ["10@http://mirror/eset_upd/"]);
    /// assert_eq!(manifest.component("ENGINE0").unwrap().build, 1032);
    /// ```
    pub fn from_bytes(content: &[u8]) -> Result<Self> {
        Self::decode_with(content, &NullSink)
    }

    /// Like [`UpdateManifest::from_bytes`], also returning every dropped field.
    pub fn from_bytes_with_warnings(content: &[u8]) -> Result<(Self, Vec<FieldWarning>)> {
        let sink = CollectorSink::default();
        let manifest = Self::decode_with(content, &sink)?;
        Ok((manifest, sink.into_warnings()))
    }

    /// Decodes manifest bytes, reporting dropped fields to `sink`.
    pub fn decode_with(content: &[u8], sink: &dyn WarningSink) -> Result<Self> {
        let document = Document::load(content)?;
        Ok(Self::from_document(&document, sink))
    }

    /// Routes every section of an already loaded document.
    ///
    /// The unnamed default section is skipped, `HOSTS` fills the host lists
    /// and every other section becomes a component. Repeated `HOSTS`
    /// sections merge key by key; a repeated component name replaces the
    /// earlier component.
    pub fn from_document(document: &Document, sink: &dyn WarningSink) -> Self {
        let mut manifest = Self::default();

        for section in document.iter() {
            let Some(name) = section.name.as_deref() else {
                trace!("skipping default section");
                continue;
            };

            if name == HOSTS_SECTION {
                trace!("decoding {} section", HOSTS_SECTION);
                decode_hosts(section, &mut manifest.hosts);
                continue;
            }

            trace!("decoding component section [{}]", name);
            let component = decode_component(name, section, sink);
            if manifest.components.insert(name.to_string(), component).is_some() {
                debug!("section [{}] repeated, keeping the later one", name);
            }
        }

        debug!(
            "decoded manifest with {} components and {} regular hosts",
            manifest.components.len(),
            manifest.hosts.regular.len()
        );

        manifest
    }
}

impl FromStr for UpdateManifest {
    type Err = ManifestError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_bytes(s.as_bytes())
    }
}
