use path_editor::geometry::Point;
use path_editor::{Color, DeviceId, EditorMode, EditorModel, InputEvent};

const PEN: DeviceId = DeviceId(1);
const FINGER: DeviceId = DeviceId(2);

fn editor() -> EditorModel {
    let _ = env_logger::builder().is_test(true).try_init();
    EditorModel::new()
}

fn point(editor: &mut EditorModel, x: f64, y: f64, event: InputEvent, device: DeviceId) {
    editor.process_point(Point::new(x, y), event, device);
}

#[test]
fn test_tap_without_second_point_adds_nothing() {
    let mut editor = editor();

    point(&mut editor, 10.0, 10.0, InputEvent::Down, PEN);
    point(&mut editor, 10.0, 10.0, InputEvent::Up, PEN);

    assert!(editor.paths().is_empty());
    assert!(!editor.can_undo());
    assert!(editor.state().current_path(PEN).is_none());
}

#[test]
fn test_stroke_is_added_with_one_undo_entry() {
    let mut editor = editor();

    point(&mut editor, 0.0, 0.0, InputEvent::Down, PEN);
    point(&mut editor, 10.0, 0.0, InputEvent::Move, PEN);
    point(&mut editor, 10.0, 10.0, InputEvent::Up, PEN);

    assert_eq!(editor.paths().len(), 1);
    let path = editor.paths().get(0).cloned().unwrap();
    assert_eq!(
        path.borrow().point_slice(),
        &[Point::new(0.0, 0.0), Point::new(10.0, 0.0), Point::new(10.0, 10.0)]
    );
    assert_eq!(editor.undo_stack().undo_len(), 1);
    assert_eq!(editor.undo_stack().next_undo_name(), Some("Add Path"));

    assert!(editor.undo());
    assert!(editor.paths().is_empty());

    assert!(editor.redo());
    assert_eq!(editor.paths().as_slice(), &[path]);
}

#[test]
fn test_path_is_added_when_second_point_arrives() {
    let mut editor = editor();

    point(&mut editor, 0.0, 0.0, InputEvent::Down, PEN);
    assert!(editor.paths().is_empty());

    point(&mut editor, 0.0, 0.0, InputEvent::Move, PEN);
    assert!(editor.paths().is_empty());

    point(&mut editor, 1.0, 0.0, InputEvent::Move, PEN);
    assert_eq!(editor.paths().len(), 1);

    // Further points extend the committed path without new undo entries
    point(&mut editor, 2.0, 0.0, InputEvent::Move, PEN);
    assert_eq!(editor.paths().get(0).unwrap().borrow().segment_count(), 2);
    assert_eq!(editor.undo_stack().undo_len(), 1);
}

#[test]
fn test_devices_draw_independently() {
    let mut editor = editor();

    point(&mut editor, 0.0, 0.0, InputEvent::Down, PEN);
    point(&mut editor, 100.0, 100.0, InputEvent::Down, FINGER);
    point(&mut editor, 0.0, 5.0, InputEvent::Move, PEN);
    point(&mut editor, 100.0, 105.0, InputEvent::Move, FINGER);
    point(&mut editor, 0.0, 10.0, InputEvent::Up, PEN);
    point(&mut editor, 100.0, 110.0, InputEvent::Up, FINGER);

    assert_eq!(editor.paths().len(), 2);
    let first = editor.paths().get(0).unwrap().borrow().point_slice().to_vec();
    let second = editor.paths().get(1).unwrap().borrow().point_slice().to_vec();
    assert_eq!(first, vec![Point::new(0.0, 0.0), Point::new(0.0, 5.0), Point::new(0.0, 10.0)]);
    assert_eq!(second[0], Point::new(100.0, 100.0));
    assert_eq!(editor.undo_stack().undo_len(), 2);
}

#[test]
fn test_move_without_down_starts_a_path() {
    let mut editor = editor();

    point(&mut editor, 3.0, 3.0, InputEvent::Move, PEN);
    point(&mut editor, 4.0, 3.0, InputEvent::Move, PEN);

    assert_eq!(editor.paths().len(), 1);
}

#[test]
fn test_new_strokes_use_current_settings() {
    let mut editor = editor();
    editor.set_stroke_color(Color::RED);
    editor.set_stroke_thickness(7.5);
    editor.set_stroke_thickness(-1.0);

    point(&mut editor, 0.0, 0.0, InputEvent::Down, PEN);
    point(&mut editor, 1.0, 1.0, InputEvent::Up, PEN);

    let path = editor.paths().get(0).unwrap().borrow();
    assert_eq!(path.stroke_color(), Color::RED);
    assert_eq!(path.stroke_thickness(), 7.5);
}

#[test]
fn test_switching_to_select_drops_uncommitted_strokes() {
    let mut editor = editor();

    point(&mut editor, 0.0, 0.0, InputEvent::Down, PEN);
    point(&mut editor, 50.0, 50.0, InputEvent::Down, FINGER);
    point(&mut editor, 50.0, 60.0, InputEvent::Move, FINGER);
    assert_eq!(editor.state().current_paths().count(), 2);

    editor.set_mode(EditorMode::Select);

    assert_eq!(editor.mode(), EditorMode::Select);
    assert_eq!(editor.state().current_paths().count(), 0);
    // The finger's stroke was already committed and stays
    assert_eq!(editor.paths().len(), 1);

    editor.set_mode(EditorMode::Draw);
    point(&mut editor, 0.0, 1.0, InputEvent::Move, PEN);
    assert_eq!(editor.paths().len(), 1);
}

#[test]
fn test_undo_mid_stroke_detaches_the_stroke() {
    let mut editor = editor();

    point(&mut editor, 0.0, 0.0, InputEvent::Down, PEN);
    point(&mut editor, 1.0, 0.0, InputEvent::Move, PEN);
    assert!(editor.undo());

    assert!(editor.paths().is_empty());
    assert!(editor.state().current_path(PEN).is_none());

    // The next sample begins a fresh stroke instead of extending the removed one
    point(&mut editor, 2.0, 0.0, InputEvent::Move, PEN);
    point(&mut editor, 3.0, 0.0, InputEvent::Up, PEN);
    assert_eq!(editor.paths().len(), 1);
    assert_eq!(
        editor.paths().get(0).unwrap().borrow().point_slice(),
        &[Point::new(2.0, 0.0), Point::new(3.0, 0.0)]
    );
}
