//! Full navigation cycles through the simulated browser.

use pagefade::config::{FadeInMode, PageFadeConfig};
use pagefade::host::{NodeId, Page};
use pagefade::inbound::{FadeInProgress, InboundOutcome, RevealCause};
use pagefade::outbound::{ClickOutcome, Exclusion};
use pagefade::session::TimerOutcome;
use pagefade::sim::{Browser, MemoryStore, NavigationKind, StoreWrite, VirtualPage};
use pagefade::style::StyleProperty;
use pagefade::PagePhase;
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
    page.append(wrap, "section").class("fade-up-element");
    page
}

fn bare(url: Url) -> VirtualPage {
    let mut page = VirtualPage::at(url);
    let body = page.body();
    page.append(body, "a").href("/services/");
    page
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .with_test_writer()
        .try_init();
}

fn wrapper(browser: &Browser) -> NodeId {
    browser
        .page()
        .and_then(|page| page.query_selector("#inner-wrap"))
        .unwrap()
}

fn first_link(browser: &Browser) -> NodeId {
    browser.page().unwrap().links()[0]
}

#[test]
fn click_fades_out_then_navigates_after_the_duration() {
    init_tracing();
    let mut browser = Browser::new(PageFadeConfig::default(), site);
    browser.open("https://example.com/").unwrap();
    let clicked_at = browser.now();

    let outcome = browser.click(first_link(&browser)).unwrap();

    assert_eq!(
        outcome,
        ClickOutcome::Intercepted {
            destination: "https://example.com/services/".into(),
            navigate_after: Duration::from_millis(800),
        }
    );
    let page = browser.page().unwrap();
    let wrap = wrapper(&browser);
    assert_eq!(page.inline_style(wrap, StyleProperty::Opacity), Some("0"));
    assert_eq!(
        page.inline_style(wrap, StyleProperty::Transform),
        Some("translateY(-30px)")
    );
    assert_eq!(page.computed_style(wrap, StyleProperty::Opacity), Some("0"));
    assert_eq!(browser.store().value("isTransitioning"), Some("true"));

    browser.advance(Duration::from_millis(799)).unwrap();
    assert_eq!(browser.navigations().len(), 1);
    assert_eq!(browser.session().unwrap().phase(), PagePhase::FadingOut);

    browser.advance(Duration::from_millis(1)).unwrap();
    let last = browser.navigations().last().unwrap();
    assert_eq!(last.kind, NavigationKind::Faded);
    assert_eq!(last.destination, "https://example.com/services/");
    let waited = (last.at - clicked_at).num_milliseconds();
    assert!((800..850).contains(&waited), "navigated after {waited}ms");
}

#[test]
fn next_page_consumes_the_flag_and_fades_in() {
    init_tracing();
    let mut browser = Browser::new(PageFadeConfig::default(), site);
    browser.open("https://example.com/").unwrap();
    browser.click(first_link(&browser)).unwrap();
    browser.advance(Duration::from_millis(800)).unwrap();

    let load = browser.loads().last().unwrap();
    assert_eq!(load.url, "https://example.com/services/");
    assert_eq!(load.flag_at_start.as_deref(), Some("true"));
    assert_eq!(
        load.inbound,
        Some(InboundOutcome::FadingIn {
            settles_after: Duration::from_millis(800)
        })
    );
    assert_eq!(browser.store().value("isTransitioning"), None);

    let wrap = wrapper(&browser);
    let page = browser.page().unwrap();
    assert!(page.has_class(wrap, "transition-active"));
    assert_eq!(page.inline_style(wrap, StyleProperty::Opacity), None);
    assert_eq!(page.computed_style(wrap, StyleProperty::Opacity), Some("1"));

    assert_eq!(browser.session().unwrap().phase(), PagePhase::FadingIn);
    let fired = browser.advance(Duration::from_millis(800)).unwrap();
    assert_eq!(fired, vec![TimerOutcome::FadeIn(FadeInProgress::Settled)]);
    assert_eq!(browser.session().unwrap().phase(), PagePhase::Idle);
}

#[test]
fn unset_flag_reveals_synchronously() {
    init_tracing();
    let mut browser = Browser::new(PageFadeConfig::default(), site);
    browser.store_mut().exceed_quota(true);

    browser.open("https://example.com/").unwrap();

    let load = browser.loads().last().unwrap();
    assert_eq!(load.flag_at_start, None);
    assert_eq!(
        load.inbound,
        Some(InboundOutcome::RevealedImmediately {
            cause: RevealCause::NoFlag
        })
    );
    let wrap = wrapper(&browser);
    assert!(browser.page().unwrap().has_class(wrap, "transition-active"));
    assert_eq!(browser.session().unwrap().phase(), PagePhase::Idle);
    assert!(browser.scheduler().is_empty());
}

#[test]
fn flag_is_cleared_once_per_load() {
    init_tracing();
    let mut browser = Browser::new(PageFadeConfig::default(), site);
    browser.open("https://example.com/").unwrap();
    browser.open("https://example.com/").unwrap();

    let removes = browser
        .store()
        .writes()
        .iter()
        .filter(|w| matches!(w, StoreWrite::Remove { .. }))
        .count();
    assert_eq!(removes, 2);
    assert_eq!(browser.loads()[1].flag_at_start, None);
}

#[test]
fn unavailable_storage_still_shows_the_page() {
    init_tracing();
    let mut browser =
        Browser::new(PageFadeConfig::default(), site).with_store(MemoryStore::unavailable());
    browser.open("https://example.com/").unwrap();

    let wrap = wrapper(&browser);
    assert_eq!(
        browser.page().unwrap().computed_style(wrap, StyleProperty::Opacity),
        Some("1")
    );

    browser.click(first_link(&browser)).unwrap();
    browser.advance(Duration::from_millis(800)).unwrap();

    let load = browser.loads().last().unwrap();
    assert_eq!(load.url, "https://example.com/services/");
    assert!(matches!(
        load.inbound,
        Some(InboundOutcome::RevealedImmediately {
            cause: RevealCause::StorageFailed(_)
        })
    ));
    let wrap = wrapper(&browser);
    let page = browser.page().unwrap();
    assert_eq!(page.computed_style(wrap, StyleProperty::Opacity), Some("1"));
    assert_eq!(
        page.computed_style(wrap, StyleProperty::Transform),
        Some("translateY(0)")
    );
}

#[test]
fn top_and_parent_targets_fade_like_same_tab_links() {
    init_tracing();
    let mut browser = Browser::new(PageFadeConfig::default(), |url| {
        let mut page = site(url);
        let wrap = page.query_selector("#inner-wrap").unwrap();
        page.append(wrap, "a").href("/top/").target("_top");
        page.append(wrap, "a").href("/parent/").target("_parent");
        page
    });

    for (index, destination) in [
        (2, "https://example.com/top/"),
        (3, "https://example.com/parent/"),
    ] {
        browser.open("https://example.com/").unwrap();
        let link = browser.page().unwrap().links()[index];

        let outcome = browser.click(link).unwrap();
        browser.advance(Duration::from_millis(800)).unwrap();

        assert!(
            matches!(outcome, ClickOutcome::Intercepted { .. }),
            "{destination}: {outcome:?}"
        );
        let last = browser.navigations().last().unwrap();
        assert_eq!(last.kind, NavigationKind::Faded);
        assert_eq!(last.destination, destination);
        assert_eq!(browser.loads().last().unwrap().flag_at_start.as_deref(), Some("true"));
    }
}

#[test]
fn opted_out_link_navigates_without_a_fade() {
    init_tracing();
    let mut browser = Browser::new(PageFadeConfig::default(), site);
    browser.open("https://example.com/").unwrap();
    let about = browser.page().unwrap().links()[1];

    let outcome = browser.click(about).unwrap();

    assert_eq!(outcome, ClickOutcome::Ignored(Exclusion::OptedOut));
    let last = browser.navigations().last().unwrap();
    assert_eq!(last.kind, NavigationKind::Default);
    assert_eq!(last.destination, "https://example.com/about/");
    assert_eq!(browser.loads().last().unwrap().flag_at_start, None);
}

#[test]
fn pages_without_a_wrapper_behave_normally() {
    init_tracing();
    let mut browser = Browser::new(PageFadeConfig::default(), bare);
    browser.open("https://example.com/").unwrap();

    assert_eq!(
        browser.loads()[0].inbound,
        Some(InboundOutcome::WrapperMissing)
    );
    assert_eq!(browser.session().unwrap().phase(), PagePhase::Idle);

    let outcome = browser.click(first_link(&browser)).unwrap();

    assert_eq!(outcome, ClickOutcome::Inactive);
    assert_eq!(browser.navigations().last().unwrap().kind, NavigationKind::Default);
}

#[test]
fn style_failure_navigates_immediately() {
    init_tracing();
    let mut browser = Browser::new(PageFadeConfig::default(), site);
    browser.open("https://example.com/").unwrap();
    browser.page_mut().unwrap().reject_style_writes(true);
    let clicked_at = browser.now();

    let outcome = browser.click(first_link(&browser)).unwrap();

    assert!(matches!(outcome, ClickOutcome::FallbackNavigated { .. }));
    let last = browser.navigations().last().unwrap();
    assert_eq!(last.kind, NavigationKind::Fallback);
    assert_eq!(last.at, clicked_at);
    assert_eq!(browser.loads().len(), 2);
}

#[test]
fn second_click_during_fade_out_keeps_the_first_destination() {
    init_tracing();
    let mut browser = Browser::new(PageFadeConfig::default(), site);
    browser.open("https://example.com/").unwrap();
    let link = first_link(&browser);

    browser.click(link).unwrap();
    browser.advance(Duration::from_millis(300)).unwrap();
    let second = browser.click(link).unwrap();
    browser.advance(Duration::from_millis(500)).unwrap();

    assert!(matches!(second, ClickOutcome::Suppressed { .. }));
    let faded: Vec<_> = browser
        .navigations()
        .iter()
        .filter(|n| n.kind == NavigationKind::Faded)
        .collect();
    assert_eq!(faded.len(), 1);
}

#[test]
fn inline_mode_fades_in_with_inline_styles() {
    init_tracing();
    let config = PageFadeConfig::builder()
        .fade_in(FadeInMode::inline())
        .build()
        .unwrap();
    let mut browser = Browser::new(config, site);
    browser.open("https://example.com/").unwrap();
    let wrap = wrapper(&browser);

    assert_eq!(
        browser.page().unwrap().inline_style(wrap, StyleProperty::Opacity),
        Some("0")
    );

    browser.advance(Duration::from_millis(10)).unwrap();
    let page = browser.page().unwrap();
    assert_eq!(page.inline_style(wrap, StyleProperty::Opacity), Some("1"));
    assert_eq!(
        page.inline_style(wrap, StyleProperty::Transition),
        Some("opacity 800ms ease-in-out, transform 800ms ease-in-out")
    );

    browser.advance(Duration::from_millis(850)).unwrap();
    let page = browser.page().unwrap();
    assert_eq!(browser.session().unwrap().phase(), PagePhase::Idle);
    assert_eq!(page.inline_style(wrap, StyleProperty::Opacity), Some("1"));
    assert_eq!(
        page.inline_style(wrap, StyleProperty::Transition),
        Some("opacity 800ms ease-in-out, transform 800ms ease-in-out")
    );
}

#[test]
fn scroll_reveal_runs_alongside_the_page_fade() {
    init_tracing();
    let mut browser = Browser::new(PageFadeConfig::default(), site);
    browser.open("https://example.com/").unwrap();
    let block = browser
        .page()
        .unwrap()
        .query_all_by_class("fade-up-element")[0];

    assert!(browser.scroll_into_view(block, 0.05).unwrap().is_empty());
    assert_eq!(browser.scroll_into_view(block, 0.4).unwrap(), vec![block]);
    assert!(browser.scroll_into_view(block, 1.0).unwrap().is_empty());
    assert!(!browser.viewport().is_observing(block));
    assert_eq!(
        browser.page().unwrap().inline_style(block, StyleProperty::Opacity),
        Some("1")
    );
}
