// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

/// Failures while loading a pan configuration or its image.
///
/// These never escape a mounted [`PanZoom`](crate::PanZoom): they are logged
/// and the component stays inert.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// The configuration document could not be fetched.
    #[error("fetch of {url} failed: {reason}")]
    Fetch {
        /// Requested URL.
        url: String,
        /// Host-provided failure description.
        reason: String,
    },

    /// The configuration document is not valid JSON of the expected shape.
    #[error("malformed configuration: {0}")]
    Decode(#[from] serde_json::Error),

    /// The configuration decoded but describes unusable geometry.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    /// The image failed to load.
    #[error("image {url} failed to load: {reason}")]
    Image {
        /// Resolved image URL.
        url: String,
        /// Host-provided failure description.
        reason: String,
    },
}
