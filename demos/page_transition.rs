//! Page Transition Cycle
//!
//! This example clicks an internal link on a simulated site and follows the
//! fade-out, the navigation and the fade-in on the next page.
//!
//! Key concepts:
//! - Outbound fade-out with a deferred navigation
//! - The persisted flag handed from one document to the next
//! - Per-document phases recorded with virtual timestamps
//!
//! Run with: cargo run --example page_transition

use pagefade::config::PageFadeConfig;
use pagefade::host::Page;
use pagefade::sim::{Browser, VirtualPage};
use pagefade::style::StyleProperty;
use pagefade::State;
use std::time::Duration;
use url::Url;

fn site(url: Url) -> VirtualPage {
    let mut page = VirtualPage::at(url);
    page.add_rule("transition-active", StyleProperty::Opacity, "1");
    page.add_rule("transition-active", StyleProperty::Transform, "translateY(0)");
    let body = page.body();
    let wrap = page.append(body, "div").attr_id("inner-wrap").node();
    page.append(wrap, "a").href("/services/");
    page.append(wrap, "a").href("/about/").class("no-fade-transition");
    page
}

fn wrapper_state(browser: &Browser) -> String {
    let Some(page) = browser.page() else {
        return "no document".to_string();
    };
    let Some(wrap) = page.query_selector("#inner-wrap") else {
        return "no wrapper".to_string();
    };
    format!(
        "opacity={} transform={}",
        page.computed_style(wrap, StyleProperty::Opacity).unwrap_or("-"),
        page.computed_style(wrap, StyleProperty::Transform).unwrap_or("-"),
    )
}

fn main() {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .init();

    println!("=== Page Transition Cycle ===\n");

    let config = PageFadeConfig::builder().duration_ms(800).build().unwrap();
    let mut browser = Browser::new(config, site);
    browser.open("https://example.com/").unwrap();
    println!("Loaded {}", browser.loads()[0].url);
    println!("  inbound: {:?}", browser.loads()[0].inbound);
    println!("  wrapper: {}\n", wrapper_state(&browser));

    let link = browser.page().unwrap().links()[0];
    let outcome = browser.click(link).unwrap();
    println!("Clicked the first link: {outcome:?}");
    println!("  flag:    {:?}", browser.store().value("isTransitioning"));
    println!("  wrapper: {}\n", wrapper_state(&browser));

    let history = browser.session().unwrap().history().clone();

    for step in [400, 400] {
        let fired = browser.advance(Duration::from_millis(step)).unwrap();
        println!("+{step}ms: {fired:?}");
    }

    println!("\nPhases of the first document:");
    for state in history.get_path() {
        println!("  {}", state.name());
    }

    let load = browser.loads().last().unwrap();
    println!("\nLoaded {}", load.url);
    println!("  flag at start: {:?}", load.flag_at_start);
    println!("  inbound:       {:?}", load.inbound);
    println!("  flag now:      {:?}", browser.store().value("isTransitioning"));

    browser.advance(Duration::from_millis(800)).unwrap();
    println!(
        "  settled in {:?}: {}",
        browser.session().unwrap().phase(),
        wrapper_state(&browser)
    );

    let about = browser.page().unwrap().links()[1];
    let outcome = browser.click(about).unwrap();
    println!("\nClicked the opted-out link: {outcome:?}");
    println!("  navigations: {:#?}", browser.navigations());

    println!("\n=== Example Complete ===");
}
