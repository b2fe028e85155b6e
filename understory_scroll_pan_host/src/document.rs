// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Size};
use serde::{Deserialize, Serialize};
use understory_scroll_pan::PanConfig;

use crate::error::LoadError;

/// Pan configuration document as served next to its image.
///
/// ```json
/// {
///   "imageURL": "harbour.jpg",
///   "beginAt": { "x": 0, "y": 0 },
///   "endAt": { "x": 100, "y": 50 },
///   "naturalViewport": { "width": 800, "height": 600 }
/// }
/// ```
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PanDocument {
    /// Image location, relative to the document unless absolute.
    #[serde(rename = "imageURL")]
    pub image_url: String,
    /// Image-space point where the visible window starts.
    pub begin_at: Point,
    /// Image-space point where the visible window ends.
    pub end_at: Point,
    /// Intrinsic pixel size of the image.
    pub natural_viewport: Size,
}

impl PanDocument {
    /// Decodes and validates a document.
    pub fn from_json(text: &str) -> Result<Self, LoadError> {
        let document: Self = serde_json::from_str(text)?;
        document.validate()?;
        Ok(document)
    }

    /// Checks that the geometry can drive a pan sequence.
    ///
    /// Points must be finite and the natural size finite and positive, since
    /// the cover zoom divides by it.
    pub fn validate(&self) -> Result<(), LoadError> {
        let Size { width, height } = self.natural_viewport;
        if !(width.is_finite() && height.is_finite() && width > 0.0 && height > 0.0) {
            return Err(LoadError::InvalidConfig(format!(
                "natural viewport must be positive, got {width}x{height}"
            )));
        }
        for (name, pt) in [("beginAt", self.begin_at), ("endAt", self.end_at)] {
            if !pt.is_finite() {
                return Err(LoadError::InvalidConfig(format!(
                    "{name} must be finite, got ({}, {})",
                    pt.x, pt.y
                )));
            }
        }
        Ok(())
    }

    /// Geometry for the factor resolver.
    #[must_use]
    pub fn pan_config(&self) -> PanConfig {
        PanConfig::new(self.begin_at, self.end_at, self.natural_viewport)
    }

    /// Image URL resolved against the document's own URL.
    #[must_use]
    pub fn resolved_image_url(&self, data_url: &str) -> String {
        resolve_image_url(data_url, &self.image_url)
    }
}

/// Resolves `image_url` against the URL of the document that named it.
///
/// - URLs with a scheme (`https:`, `data:`) and protocol-relative `//` URLs
///   are returned unchanged.
/// - Root-relative `/path` URLs join the document's origin.
/// - Anything else is appended to the document's directory, that is, its URL
///   up to and including the last `/` before any query or fragment.
#[must_use]
pub fn resolve_image_url(data_url: &str, image_url: &str) -> String {
    if has_scheme(image_url) || image_url.starts_with("//") {
        return image_url.to_owned();
    }
    if image_url.starts_with('/') {
        return format!("{}{image_url}", origin(data_url));
    }
    format!("{}{image_url}", directory(data_url))
}

fn has_scheme(url: &str) -> bool {
    let Some((scheme, _)) = url.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

/// `scheme://authority` of an absolute URL, or empty for relative ones.
fn origin(url: &str) -> &str {
    let Some(authority_start) = url.find("://").map(|i| i + 3) else {
        return "";
    };
    match url[authority_start..].find(['/', '?', '#']) {
        Some(end) => &url[..authority_start + end],
        None => url,
    }
}

fn directory(url: &str) -> String {
    let path_end = url.find(['?', '#']).unwrap_or(url.len());
    let path = &url[..path_end];
    let origin = origin(path);
    if !origin.is_empty() && origin.len() == path.len() {
        return format!("{origin}/");
    }
    match path.rfind('/') {
        Some(slash) => path[..=slash].to_owned(),
        None => String::new(),
    }
}
