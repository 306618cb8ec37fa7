mod common;

use comic_view::store::PagePosition;
use common::{Shown, fill, navigator};

#[test]
fn next_renders_page_and_title() {
    let (navigator, store, screen) = navigator();
    fill(&store, &["a.png", "b.png", "c.png"]);

    assert_eq!(navigator.next(), 1);

    assert_eq!(
        screen.calls(),
        vec![
            Shown::Page("b.png".to_string(), PagePosition { index: 1, count: 3 }),
            Shown::Title("ComicView - 1 of 3".to_string()),
        ]
    );
}

#[test]
fn next_from_last_page_goes_one_past_the_end_without_rendering() {
    let (navigator, store, screen) = navigator();
    fill(&store, &["a.png", "b.png"]);
    navigator.next();
    let rendered = screen.calls().len();

    assert_eq!(navigator.next(), 2);
    assert_eq!(store.cursor(), store.len());
    assert_eq!(screen.calls().len(), rendered);

    // Further presses stay put.
    assert_eq!(navigator.next(), 2);
    assert_eq!(screen.calls().len(), rendered);

    // And stepping back shows the last page again.
    assert_eq!(navigator.previous(), 1);
    assert_eq!(
        screen.pages().last(),
        Some(&("b.png".to_string(), PagePosition { index: 1, count: 2 }))
    );
}

#[test]
fn previous_on_first_page_stays_put() {
    let (navigator, store, screen) = navigator();
    fill(&store, &["a.png", "b.png"]);

    assert_eq!(navigator.previous(), 0);
    assert_eq!(
        screen.pages(),
        vec![("a.png".to_string(), PagePosition { index: 0, count: 2 })]
    );
}

#[test]
fn navigation_on_empty_store_is_a_no_op() {
    let (navigator, store, screen) = navigator();

    assert_eq!(navigator.next(), 0);
    assert_eq!(navigator.previous(), 0);
    assert_eq!(store.cursor(), 0);
    assert!(screen.calls().is_empty());
}
