//! The demo menu: six alignment switches, a few inserts, and a long tail of
//! help rows so the panel has to scroll.

use std::cell::Cell;
use std::rc::Rc;

use popmenu::{ActionItem, Alignment, HorizontalAlignment as H, MenuItem, SeparatorItem, VerticalAlignment as V};

/// Alignment chosen by the last performed row, applied by the session loop.
pub type AlignmentRequest = Rc<Cell<Option<Alignment>>>;

const HELP_ROWS: usize = 7;

fn align_row(name: &str, h: H, v: V, request: &AlignmentRequest) -> Rc<dyn MenuItem> {
    let request = Rc::clone(request);
    Rc::new(
        ActionItem::new(name, move || request.set(Some(Alignment::new(h, v)))).with_shortcut("⌘Z"),
    )
}

fn plain_row(name: &str, shortcut: &str) -> Rc<dyn MenuItem> {
    let label = name.to_string();
    Rc::new(
        ActionItem::new(name, move || tracing::info!(message = "demo.action", row = %label))
            .with_shortcut(shortcut),
    )
}

/// Build the rows for one open.
pub fn items(request: &AlignmentRequest) -> Vec<Rc<dyn MenuItem>> {
    let mut rows = vec![
        align_row("Right Bottom", H::Right, V::Bottom, request),
        align_row("Center Bottom", H::Center, V::Bottom, request),
        align_row("Left Bottom", H::Left, V::Bottom, request),
        align_row("Right Top", H::Right, V::Top, request),
        align_row("Center Top", H::Center, V::Top, request),
        align_row("Left Top", H::Left, V::Top, request),
        Rc::new(SeparatorItem),
        plain_row("Insert Image…", "⌥⌘I"),
        plain_row("Insert Link…", "⌥⌘L"),
    ];
    for _ in 0..HELP_ROWS {
        rows.push(Rc::new(SeparatorItem));
        rows.push(plain_row("Help", "⌘?"));
    }
    rows
}
