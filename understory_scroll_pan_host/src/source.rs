// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Configuration sources: where a mount finds its data URL and placement.
//!
//! Hosts describe a pan sequence either with explicit attributes
//! ([`AttributeSource`]) or with a compact marker name whose key/value pairs
//! are written in alternating case ([`MarkerSource`]). Both resolve to the
//! same [`MountProps`].

use std::collections::BTreeMap;
use std::fmt;

use understory_scroll_pan::{Placement, ViewportMetrics};

use crate::placement::{parse_percentage, placement_from_strs};

/// Prefix of marker names that describe a pan sequence.
pub const MARKER_PREFIX: &str = "panny";

/// Prefix of the attribute holding a marker's data URL; the marker id follows.
pub const DATA_ATTRIBUTE_PREFIX: &str = "data-odyssey-panny-";

/// Width-over-height ratio at or below which a portrait data URL is preferred.
pub const PORTRAIT_ASPECT_RATIO: f64 = 0.75;

/// Everything needed to mount one pan sequence.
#[derive(Clone, Debug, PartialEq)]
pub struct MountProps {
    /// URL of the JSON configuration document.
    pub data_url: String,
    /// Placement percentages.
    pub placement: Placement,
}

/// A way of discovering [`MountProps`].
pub trait ConfigSource {
    /// Resolves the props for the current viewport, or `None` if the source
    /// does not describe a usable sequence.
    fn resolve(&self, viewport: &ViewportMetrics) -> Option<MountProps>;
}

/// Props given directly, as read from element attributes.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct AttributeSource {
    /// Configuration URL.
    pub data_url: String,
    /// Configuration URL for portrait viewports, if any.
    pub portrait_data_url: Option<String>,
    /// Raw start percentage.
    pub start_vh: Option<String>,
    /// Raw end percentage.
    pub end_vh: Option<String>,
}

impl ConfigSource for AttributeSource {
    fn resolve(&self, viewport: &ViewportMetrics) -> Option<MountProps> {
        let data_url = pick_data_url(
            Some(self.data_url.clone()),
            self.portrait_data_url.clone(),
            viewport,
        )?;
        Some(MountProps {
            data_url,
            placement: placement_from_strs(self.start_vh.as_deref(), self.end_vh.as_deref()),
        })
    }
}

/// Props encoded in a marker name such as `pannyIDharbourSTART20END80`.
///
/// The data URL is looked up through `lookup`, which receives an attribute
/// name (`data-odyssey-panny-<id>` and its `-portrait` variant) and returns
/// its value. A marker without `START` or `END` places that bound at `0`.
pub struct MarkerSource<F> {
    marker_name: String,
    lookup: F,
}

impl<F> MarkerSource<F>
where
    F: Fn(&str) -> Option<String>,
{
    /// Creates a source for one marker name.
    pub fn new(marker_name: impl Into<String>, lookup: F) -> Self {
        Self {
            marker_name: marker_name.into(),
            lookup,
        }
    }

    /// The raw marker name.
    #[must_use]
    pub fn marker_name(&self) -> &str {
        &self.marker_name
    }
}

impl<F> fmt::Debug for MarkerSource<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MarkerSource")
            .field("marker_name", &self.marker_name)
            .finish_non_exhaustive()
    }
}

impl<F> ConfigSource for MarkerSource<F>
where
    F: Fn(&str) -> Option<String>,
{
    fn resolve(&self, viewport: &ViewportMetrics) -> Option<MountProps> {
        let encoded = self.marker_name.strip_prefix(MARKER_PREFIX)?;
        let fields = decode_alternating_case(encoded);
        let id = fields.get("id").filter(|id| !id.is_empty())?;

        let attribute = format!("{DATA_ATTRIBUTE_PREFIX}{id}");
        let data_url = pick_data_url(
            (self.lookup)(attribute.as_str()),
            (self.lookup)(format!("{attribute}-portrait").as_str()),
            viewport,
        )?;

        let bound = |key: &str| match fields.get(key) {
            Some(raw) => parse_percentage(raw),
            None => Some(0.0),
        };
        Some(MountProps {
            data_url,
            placement: Placement::new(bound("start"), bound("end")),
        })
    }
}

fn pick_data_url(
    data_url: Option<String>,
    portrait_data_url: Option<String>,
    viewport: &ViewportMetrics,
) -> Option<String> {
    let data_url = data_url.filter(|url| !url.is_empty())?;
    let portrait = viewport
        .aspect_ratio()
        .is_some_and(|ratio| ratio <= PORTRAIT_ASPECT_RATIO);
    match portrait_data_url.filter(|url| !url.is_empty()) {
        Some(portrait_url) if portrait => Some(portrait_url),
        _ => Some(data_url),
    }
}

/// Decodes alternating-case `KEYvalueKEYvalue` text.
///
/// Each run of ASCII uppercase letters is a key (lowercased); the run of
/// other characters after it is its value, possibly empty. Text before the
/// first key is ignored and later duplicates win.
///
/// ```
/// use understory_scroll_pan_host::decode_alternating_case;
///
/// let fields = decode_alternating_case("IDharbourSTART20END80");
/// assert_eq!(fields["id"], "harbour");
/// assert_eq!(fields["start"], "20");
/// assert_eq!(fields["end"], "80");
/// ```
#[must_use]
pub fn decode_alternating_case(text: &str) -> BTreeMap<String, String> {
    let mut fields = BTreeMap::new();
    let mut key = String::new();
    let mut value = String::new();
    for c in text.chars() {
        if c.is_ascii_uppercase() {
            // An uppercase letter after a value starts the next key.
            if !value.is_empty() {
                fields.insert(std::mem::take(&mut key), std::mem::take(&mut value));
            }
            key.push(c.to_ascii_lowercase());
        } else if !key.is_empty() {
            value.push(c);
        }
    }
    if !key.is_empty() {
        fields.insert(key, value);
    }
    fields
}
