// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Headless scroll-through of a pan sequence.
//!
//! Mounts a sequence from attribute-style props, attaches it after a few
//! polls, then scrolls the container past the viewport and prints the CSS
//! transform written at each step.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p understory_scroll_pan_demos --example headless_scroll`

use understory_scroll_pan::ViewportMetrics;
use understory_scroll_pan_demos::HeadlessHost;
use understory_scroll_pan_host::{AttributeSource, PanZoom};

const CONFIG_URL: &str = "https://media.example.com/stories/harbour/panny.json";

const CONFIG: &str = r#"{
    "imageURL": "harbour-wide.jpg",
    "beginAt": { "x": 0, "y": 0 },
    "endAt": { "x": 640, "y": 180 },
    "naturalViewport": { "width": 1280, "height": 720 }
}"#;

fn main() {
    env_logger::init();

    // Desktop browser: 200px or more of chrome, so `innerHeight` wins.
    let viewport = ViewportMetrics::new(1440.0, 800.0).with_available_height(1050.0);
    let host = HeadlessHost::new(viewport, 3200.0);
    host.serve(CONFIG_URL, CONFIG);

    let source = AttributeSource {
        data_url: CONFIG_URL.to_owned(),
        start_vh: Some("25%".to_owned()),
        end_vh: Some("75".to_owned()),
        ..AttributeSource::default()
    };
    let Some(pan) = PanZoom::from_source(&source, HeadlessHost::context(&host)) else {
        eprintln!("nothing to mount");
        return;
    };
    println!("mounted {:?}, image {:?}", pan.status(), pan.image_url());

    // The container only joins the layout after a couple of polls.
    host.tick();
    host.tick();
    host.attach();
    host.tick();
    println!("after attachment: {:?}", pan.status());
    for css in host.take_css() {
        println!("  initial  {css}");
    }

    if let Some(factors) = pan.factors() {
        let [from, to] = factors.domain();
        println!("panning while top goes from {from} to {to}, zoom {}", factors.zoom());
    }

    for step in 0..=8 {
        let top = 400.0 - f64::from(step) * 450.0;
        host.scroll_to(top);
        for css in host.take_css() {
            println!("  top={top:>7}  {css}");
        }
    }

    // A phone-sized resize recomputes the zoom and domain.
    host.resize(ViewportMetrics::new(390.0, 664.0).with_available_height(844.0));
    for css in host.take_css() {
        println!("  resized  {css}");
    }

    pan.dispose();
    host.scroll_to(0.0);
    println!("after dispose: {:?}, {} writes", pan.status(), host.take_css().len());
}
