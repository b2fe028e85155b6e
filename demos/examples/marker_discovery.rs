// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Discovering pan sequences from marker names.
//!
//! Decodes a few alternating-case marker names and resolves them against a
//! landscape and a portrait viewport.
//!
//! Run:
//! - `cargo run -p understory_scroll_pan_demos --example marker_discovery`

use understory_scroll_pan::ViewportMetrics;
use understory_scroll_pan_host::{ConfigSource, MarkerSource, decode_alternating_case};

fn attribute(name: &str) -> Option<String> {
    match name {
        "data-odyssey-panny-harbour" => Some("https://media.example.com/harbour.json".to_owned()),
        "data-odyssey-panny-harbour-portrait" => {
            Some("https://media.example.com/harbour-tall.json".to_owned())
        }
        "data-odyssey-panny-ridge" => Some("https://media.example.com/ridge.json".to_owned()),
        _ => None,
    }
}

fn main() {
    env_logger::init();

    let viewports = [
        ("landscape", ViewportMetrics::new(1440.0, 900.0)),
        ("portrait", ViewportMetrics::new(390.0, 844.0)),
    ];

    for marker in [
        "pannyIDharbourSTART20END80",
        "pannyIDridgeEND50",
        "pannyIDmissing",
        "pannySTART10",
    ] {
        println!("{marker}: {:?}", decode_alternating_case(&marker["panny".len()..]));
        let source = MarkerSource::new(marker, attribute);
        for (label, viewport) in &viewports {
            match source.resolve(viewport) {
                Some(props) => println!(
                    "  {label:<9} {} start={} end={}",
                    props.data_url,
                    props.placement.start_vh(),
                    props.placement.end_vh()
                ),
                None => println!("  {label:<9} not resolvable"),
            }
        }
    }
}
