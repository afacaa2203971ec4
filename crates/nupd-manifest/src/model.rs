//! Typed view of a decoded `update.ver` manifest.

use std::{collections::HashMap, fmt, str::FromStr};

use chrono::NaiveDate;
use serde::Serialize;

/// Release channel served by a set of mirror hosts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Channel {
    Regular,
    Prerelease,
    Deferred,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Regular, Channel::Prerelease, Channel::Deferred];

    /// Key naming this channel's host list in the `HOSTS` section.
    pub fn hosts_key(self) -> &'static str {
        match self {
            Channel::Regular => "Other",
            Channel::Prerelease => "Prerelease-other",
            Channel::Deferred => "Deferred-other",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Channel::Regular => write!(f, "regular"),
            Channel::Prerelease => write!(f, "prerelease"),
            Channel::Deferred => write!(f, "deferred"),
        }
    }
}

impl FromStr for Channel {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "regular" => Ok(Channel::Regular),
            "prerelease" => Ok(Channel::Prerelease),
            "deferred" => Ok(Channel::Deferred),
            other => Err(format!("unknown channel `{other}`")),
        }
    }
}

/// Mirror host entries per release channel.
///
/// Entries are opaque `priority@url` tokens kept in source order, which is
/// the order the vendor lists mirrors in.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HostLists {
    pub regular: Vec<String>,
    pub prerelease: Vec<String>,
    pub deferred: Vec<String>,
}

impl HostLists {
    pub fn channel(&self, channel: Channel) -> &[String] {
        match channel {
            Channel::Regular => &self.regular,
            Channel::Prerelease => &self.prerelease,
            Channel::Deferred => &self.deferred,
        }
    }

    pub(crate) fn channel_mut(&mut self, channel: Channel) -> &mut Vec<String> {
        match channel {
            Channel::Regular => &mut self.regular,
            Channel::Prerelease => &mut self.prerelease,
            Channel::Deferred => &mut self.deferred,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.regular.is_empty() && self.prerelease.is_empty() && self.deferred.is_empty()
    }
}

/// One downloadable update component (engine module, signature pack, ...).
///
/// Attributes missing from the manifest, or present with a value that does
/// not convert, hold their zero value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Component {
    /// Free-text version label, e.g. `1031 (20190528)`.
    pub version: String,
    pub version_id: u64,
    pub build: u64,
    /// Component type tag, e.g. `perseus`.
    pub kind: String,
    pub category: String,
    pub level: u64,
    /// Opaque base offset.
    pub base: u64,
    pub release_date: Option<NaiveDate>,
    pub platform: String,
    pub group: Vec<String>,
    pub build_registry_name: String,
    /// Artifact path relative to a mirror host.
    pub file: String,
    /// Artifact size in bytes.
    pub size: u64,
}

impl Component {
    pub fn in_group(&self, tag: &str) -> bool {
        self.group.iter().any(|g| g == tag)
    }
}

/// A decoded manifest: mirror hosts plus components keyed by section name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct UpdateManifest {
    pub hosts: HostLists,
    pub components: HashMap<String, Component>,
}

impl UpdateManifest {
    pub fn component(&self, name: &str) -> Option<&Component> {
        self.components.get(name)
    }

    /// Components tagged with `group`, in no particular order.
    pub fn components_in_group<'a>(
        &'a self,
        group: &'a str,
    ) -> impl Iterator<Item = (&'a str, &'a Component)> + 'a {
        self.components
            .iter()
            .filter(move |(_, c)| c.in_group(group))
            .map(|(name, c)| (name.as_str(), c))
    }

    /// Sum of all component sizes, saturating at `u64::MAX`.
    pub fn total_size(&self) -> u64 {
        self.components
            .values()
            .fold(0u64, |acc, c| acc.saturating_add(c.size))
    }
}
