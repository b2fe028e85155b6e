// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use understory_scroll_pan::Placement;

/// Parses a placement percentage from markup, leniently.
///
/// Surrounding whitespace and a trailing `%` are accepted. Anything that is
/// not a number (including `NaN`) yields `None`, which [`Placement`] then
/// replaces with its default.
#[must_use]
pub fn parse_percentage(text: &str) -> Option<f64> {
    let text = text.trim();
    let text = text.strip_suffix('%').unwrap_or(text).trim_end();
    text.parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// Builds a [`Placement`] from optional markup strings.
#[must_use]
pub fn placement_from_strs(start_vh: Option<&str>, end_vh: Option<&str>) -> Placement {
    Placement::new(
        start_vh.and_then(parse_percentage),
        end_vh.and_then(parse_percentage),
    )
}
