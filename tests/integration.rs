//! Integration tests for strata-tui.
//!
//! These tests drive the public API from outside the crate: building trees,
//! feeding raw terminal input through the pilot and the async loop, and
//! checking what ends up on screen.

use std::cell::RefCell;
use std::rc::Rc;

use pretty_assertions::assert_eq;

use strata_tui::app::App;
use strata_tui::event::{ArrowKey, InputEvent, InputParser, MouseEventKind};
use strata_tui::geometry::{Extended, Position, Rect, Size};
use strata_tui::layout::{Edges, HorizontalAlignment, VerticalAlignment};
use strata_tui::render::{
    BufferRenderer, CellAttributes, Color, Renderer, SizeSource, TerminalRenderer,
};
use strata_tui::testing::{highlight_mask, render_to_string, Pilot};
use strata_tui::tree::{WidgetId, Window};
use strata_tui::widget::{ControlKind, Direction};
use strata_tui::widgets::*;

fn log() -> Rc<RefCell<Vec<String>>> {
    Rc::new(RefCell::new(Vec::new()))
}

/// A form: a title, a text field, and two buttons side by side.
fn form(window: &mut Window, submitted: Rc<RefCell<Vec<String>>>) -> (WidgetId, WidgetId, WidgetId) {
    let title = window.create(Text::new("Sign up"));
    let sink = Rc::clone(&submitted);
    let field = window.create(
        TextField::new(move |_, text| sink.borrow_mut().push(text.to_owned())).placeholder("name"),
    );
    let ok_sink = Rc::clone(&submitted);
    let ok = Button::labeled(window, "[ok]", move |_| ok_sink.borrow_mut().push("ok".into()));
    let cancel_sink = Rc::clone(&submitted);
    let cancel = Button::labeled(window, "[cancel]", move |_| {
        cancel_sink.borrow_mut().push("cancel".into())
    });
    let buttons = window.compose(Stack::horizontal().spacing(1), [ok, cancel]);
    let column = window.compose(
        Stack::vertical().horizontal_alignment(HorizontalAlignment::Leading),
        [title, field, buttons],
    );
    window.add_control(column);
    (field, ok, cancel)
}

// ---------------------------------------------------------------------------
// Rendering
// ---------------------------------------------------------------------------

#[test]
fn form_renders() {
    let mut window = Window::new();
    form(&mut window, log());
    insta::assert_snapshot!(render_to_string(&mut window, 16, 3), @r"
    Sign up
    name
    [ok] [cancel]
    ");
}

#[test]
fn focus_highlights_button() {
    let mut window = Window::new();
    let (field, ok, _) = form(&mut window, log());
    render_to_string(&mut window, 16, 3);
    assert_eq!(window.first_responder(), Some(field));

    window.set_first_responder(Some(ok));
    assert_eq!(highlight_mask(&window), "Sign up\nname\n#### [cancel]");
}

#[test]
fn nested_layout_with_decorations() {
    let mut window = Window::new();
    let label = window.create(Text::new("hi"));
    let padded = window.compose(Padding::new(Edges::symmetric(0, 1)), [label]);
    let boxed = window.compose(Border::new(BorderStyle::ROUNDED), [padded]);
    let frame = Frame::fixed(Some(8), Some(3))
        .alignment(HorizontalAlignment::Leading, VerticalAlignment::Top);
    let framed = window.compose(frame, [boxed]);
    window.add_control(framed);
    insta::assert_snapshot!(render_to_string(&mut window, 8, 3), @r"
    ╭────╮
    │ hi │
    ╰────╯
    ");
}

#[test]
fn background_fills_behind_text() {
    let mut window = Window::new();
    let text = window.create(Text::new("ab"));
    let background = window.compose(Background::new(Color::Xterm(4)), [text]);
    window.add_control(background);
    render_to_string(&mut window, 4, 1);

    let glyph = window.cell_at(Position::new(0, 0)).unwrap();
    assert_eq!((glyph.ch, glyph.background), ('a', Some(Color::Xterm(4))));
    let past_end = window.cell_at(Position::new(3, 0)).unwrap();
    assert_eq!(past_end.background, Some(Color::Xterm(4)));
}

// ---------------------------------------------------------------------------
// Interaction through the pilot
// ---------------------------------------------------------------------------

#[test]
fn typing_submits_and_buttons_navigate() {
    let submitted = log();
    let mut window = Window::new();
    let (field, ok, cancel) = form(&mut window, Rc::clone(&submitted));
    let mut pilot = Pilot::new(window, 16, 3).unwrap();
    assert_eq!(pilot.first_responder(), Some(field));

    pilot.type_text("ada");
    assert_eq!(pilot.screen(), "Sign up\nada\n[ok] [cancel]");
    pilot.press_enter();
    assert_eq!(pilot.screen(), "Sign up\nname\n[ok] [cancel]");

    pilot.press_arrow(ArrowKey::Down);
    assert_eq!(pilot.first_responder(), Some(ok));
    pilot.press_arrow(ArrowKey::Right);
    assert_eq!(pilot.first_responder(), Some(cancel));
    pilot.press_enter();
    pilot.press_arrow(ArrowKey::Left);
    pilot.type_text(" ");

    assert_eq!(*submitted.borrow(), vec!["ada", "cancel", "ok"]);
}

#[test]
fn unknown_escape_is_literal_after_timeout() {
    let mut window = Window::new();
    let field = window.create(TextField::new(|_, _| {}));
    window.add_control(field);
    let mut pilot = Pilot::new(window, 10, 1).unwrap();

    pilot.send("x\x1b[");
    assert_eq!(pilot.screen(), "x");
    pilot.escape_timeout();
    // ESC is dropped by the field, '[' is typed.
    assert_eq!(pilot.window().control::<TextField>(field).unwrap().text(), "x[");
}

#[test]
fn click_focuses_and_activates() {
    let submitted = log();
    let mut window = Window::new();
    let (_, _, cancel) = form(&mut window, Rc::clone(&submitted));
    let mut pilot = Pilot::new(window, 16, 3).unwrap();
    pilot.click(6, 2);
    assert_eq!(pilot.first_responder(), Some(cancel));
    assert_eq!(*submitted.borrow(), vec!["cancel"]);
}

#[test]
fn wheel_scrolls_the_view_under_the_pointer() {
    let mut window = Window::new();
    let rows: Vec<_> = (0..10).map(|i| window.create(Text::new(format!("row {i}")))).collect();
    let content = window.compose(Stack::vertical(), rows);
    let view = window.compose(ScrollView::new(), [content]);
    window.add_control(view);
    let mut pilot = Pilot::new(window, 6, 3).unwrap();
    assert_eq!(pilot.screen(), "row 0\nrow 1\nrow 2");

    pilot.scroll(1, 1, 3);
    assert_eq!(pilot.screen(), "row 3\nrow 4\nrow 5");
    pilot.scroll(1, 1, -1);
    assert_eq!(pilot.screen(), "row 2\nrow 3\nrow 4");
}

#[test]
fn resize_redraws_at_new_size() {
    let mut window = Window::new();
    let fill = window.create(Spacer::vertical());
    let divider = window.create(Divider::horizontal());
    let column = window.compose(Stack::vertical(), [fill, divider]);
    window.add_control(column);
    let mut pilot = Pilot::new(window, 3, 1).unwrap();
    assert_eq!(pilot.screen(), "───");

    pilot.resize(5, 2);
    assert_eq!(pilot.screen(), "\n─────");
}

// ---------------------------------------------------------------------------
// Tree editing
// ---------------------------------------------------------------------------

#[test]
fn removing_focused_widget_moves_focus() {
    let mut window = Window::new();
    let a = Button::labeled(&mut window, "a", |_| {});
    let b = Button::labeled(&mut window, "b", |_| {});
    let c = Button::labeled(&mut window, "c", |_| {});
    let stack = window.compose(Stack::vertical(), [a, b, c]);
    window.add_control(stack);
    window.set_first_responder(Some(b));

    assert!(window.remove(stack, 1));
    assert!(!window.contains(b));
    assert_eq!(window.first_responder(), Some(a));

    assert!(window.remove(stack, 0));
    assert_eq!(window.first_responder(), Some(c));
}

#[test]
fn action_edits_the_tree_and_screen_follows() {
    let mut window = Window::new();
    let status = window.create(Text::new("idle"));
    let button = Button::labeled(&mut window, "go", move |w: &mut Window| {
        if let Some(text) = w.control_mut::<Text>(status) {
            text.set_text("busy");
        }
        w.invalidate(status);
    });
    let stack = window.compose(
        Stack::vertical().horizontal_alignment(HorizontalAlignment::Leading),
        [status, button],
    );
    window.add_control(stack);

    let mut pilot = Pilot::new(window, 4, 2).unwrap();
    assert_eq!(pilot.screen(), "idle\ngo");
    pilot.press_enter();
    assert_eq!(pilot.screen(), "busy\ngo");
}

#[test]
fn identity_reports_kind() {
    let mut window = Window::new();
    let text = window.create(Text::new("same"));
    let other = window.create(Text::new("same"));
    let button = Button::labeled(&mut window, "x", |_| {});
    assert_eq!(window.identity(text).map(|i| i.kind), Some(ControlKind::Text));
    assert_eq!(window.identity(text), window.identity(other));
    assert_eq!(window.identity(button).map(|i| i.kind), Some(ControlKind::Button));
}

// ---------------------------------------------------------------------------
// Invalidation and flushing
// ---------------------------------------------------------------------------

#[test]
fn invalidations_coalesce_into_one_flush() {
    let mut window = Window::new();
    let field = window.create(TextField::new(|_, _| {}));
    window.add_control(field);
    let mut app = App::headless(window, Size::new(10, 1));
    app.start().unwrap();

    app.handle_input("abcdef");
    assert!(app.update_if_needed().unwrap());
    assert_eq!(app.flush_count(), 2);
    assert_eq!(app.renderer().to_text(), "abcdef");
}

#[test]
fn invalidated_region_is_bounding_union() {
    let mut window = Window::new();
    window.set_window_size(Size::new(10, 10));
    let root = window.layers().root();
    window.layers_mut().take_invalidated();
    window.layers_mut().invalidate_rect(root, Rect::new(1, 1, 2, 2));
    window.layers_mut().invalidate_rect(root, Rect::new(5, 4, 1, 1));
    assert_eq!(window.layers().invalidated(), Some(Rect::new(1, 1, 5, 4)));
}

#[test]
fn unchanged_frames_write_nothing() {
    let mut window = Window::new();
    let text = window.create(Text::new("static"));
    window.add_control(text);
    let mut renderer = TerminalRenderer::new(Vec::new())
        .size_source(SizeSource::Fixed(Size::new(6, 1)))
        .alternate_screen(false)
        .mouse_reporting(false);
    renderer.start(&mut window).unwrap();
    window.layout_window();
    renderer.update(&mut window).unwrap();
    let drawn = renderer.writer().len();

    window.invalidate(text);
    renderer.update(&mut window).unwrap();
    assert_eq!(renderer.writer().len(), drawn);
}

#[test]
fn buffer_renderer_tracks_updates() {
    let mut window = Window::new();
    let mut renderer = BufferRenderer::new(Size::new(3, 2));
    renderer.start(&mut window).unwrap();
    renderer.update(&mut window).unwrap();
    renderer.update(&mut window).unwrap();
    assert_eq!(renderer.update_count(), 2);
    assert_eq!(renderer.cells_written(), 0);
}

// ---------------------------------------------------------------------------
// Decoding
// ---------------------------------------------------------------------------

#[test]
fn parser_handles_mixed_stream() {
    let mut parser = InputParser::new();
    let events = parser.advance("q\x1b[D\x1b[<65;4;2M\x1b[<0;4;2");
    assert_eq!(events.len(), 3);
    assert_eq!(events[0], InputEvent::Char('q'));
    assert_eq!(events[1], InputEvent::Arrow(ArrowKey::Left));
    let InputEvent::Mouse(wheel) = events[2] else { panic!("expected mouse event") };
    assert_eq!(wheel.kind, MouseEventKind::Wheel);
    assert_eq!(wheel.wheel_delta(), Some(1));

    assert!(parser.has_pending());
    let done = parser.advance("m");
    let InputEvent::Mouse(release) = done[0] else { panic!("expected mouse event") };
    assert_eq!((release.kind, release.column, release.row), (MouseEventKind::Release, 4, 2));
}

#[test]
fn arrow_keys_map_to_directions() {
    assert_eq!(ArrowKey::Down.direction(), Direction::Below);
    assert_eq!(ArrowKey::Right.direction(), Direction::RightOf);
}

// ---------------------------------------------------------------------------
// Geometry and colors
// ---------------------------------------------------------------------------

#[test]
fn extended_arithmetic_saturates() {
    assert_eq!(Extended::INFINITY + 5, Extended::INFINITY);
    assert_eq!(Extended::INFINITY - Extended::INFINITY, Extended::ZERO);
    assert_eq!(Extended::new(i32::MAX) + 1, Extended::new(i32::MAX));
    assert!(Extended::new(1_000_000) < Extended::INFINITY);
}

#[test]
fn colors_parse() {
    assert_eq!("#ff8800".parse::<Color>(), Ok(Color::rgb(255, 136, 0)));
    assert_eq!("xterm:208".parse::<Color>(), Ok(Color::Xterm(208)));
    assert!("mauve".parse::<Color>().is_err());
}

#[test]
fn focused_field_cursor_is_underlined() {
    let mut window = Window::new();
    let field = window.create(TextField::new(|_, _| {}));
    window.add_control(field);
    let mut pilot = Pilot::new(window, 4, 1).unwrap();
    pilot.type_text("ab");
    let cursor = pilot.cell(2, 0).unwrap();
    assert_eq!(cursor.attributes, CellAttributes::UNDERLINE);
}

// ---------------------------------------------------------------------------
// Async loop
// ---------------------------------------------------------------------------

#[tokio::test]
async fn run_processes_reads_until_eof() {
    let submitted = log();
    let mut window = Window::new();
    let (field, _, _) = form(&mut window, Rc::clone(&submitted));
    let mut app = App::headless(window, Size::new(16, 3));

    let input = tokio_test::io::Builder::new()
        .read(b"gr")
        .read(b"ace\r")
        .read(b"\x1b[B")
        .build();
    app.run(input).await.unwrap();

    assert_eq!(*submitted.borrow(), vec!["grace"]);
    assert_ne!(app.window().first_responder(), Some(field));
    assert!(!app.renderer().is_running());
}

#[tokio::test]
async fn run_flushes_dangling_escape_after_timeout() {
    let mut window = Window::new();
    let field = window.create(TextField::new(|_, _| {}));
    window.add_control(field);
    let mut app = App::headless(window, Size::new(10, 1));

    let input = tokio_test::io::Builder::new()
        .read(b"a\x1b")
        .wait(std::time::Duration::from_millis(100))
        .read(b"[b")
        .build();
    app.run(input).await.unwrap();

    assert_eq!(app.window().control::<TextField>(field).unwrap().text(), "a[b");
}
