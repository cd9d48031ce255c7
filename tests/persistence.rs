use std::fs;
use std::time::Duration;

use path_editor::geometry::{Point, Size};
use path_editor::{
    AutoSaver, Color, Command, ConfigError, DeviceId, Drawing, EditorConfig, EditorError, EditorModel,
    FileInformation, InputEvent, PathData, PersistenceError, Style, StyleBook,
};
use tempfile::TempDir;

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn config_in(dir: &TempDir) -> EditorConfig {
    EditorConfig {
        data_dir: dir.path().join("data"),
        ..EditorConfig::default()
    }
}

fn sample_drawing() -> Drawing {
    Drawing {
        paths: vec![PathData {
            points: vec![Point::new(1.0, 1.0), Point::new(2.0, 3.0)],
            stroke_color: Color::RED,
            stroke_thickness: 3.0,
        }],
        canvas_size: Size::new(300.0, 200.0),
    }
}

fn draw_line(editor: &mut EditorModel) {
    editor.process_point(Point::new(10.0, 10.0), InputEvent::Down, DeviceId::MOUSE);
    editor.process_point(Point::new(20.0, 20.0), InputEvent::Up, DeviceId::MOUSE);
}

#[test]
fn test_autosave_round_trip() {
    init_logging();
    let dir = TempDir::new().unwrap();
    let saver = AutoSaver::from_config(&config_in(&dir));
    assert_eq!(saver.path(), dir.path().join("data").join("AutoSave.path"));
    assert!(saver.open().is_none());

    saver.try_save(&sample_drawing()).unwrap();

    assert_eq!(saver.open(), Some(sample_drawing()));
}

#[test]
fn test_autosave_tick_waits_for_interval() {
    init_logging();
    let dir = TempDir::new().unwrap();
    let mut saver = AutoSaver::new(dir.path().join("auto.path"), Duration::from_secs(60));
    let editor = EditorModel::new();
    let due = saver.next_due();

    assert!(!saver.tick(due - Duration::from_secs(1), &editor));
    assert!(!saver.path().exists());

    assert!(saver.tick(due, &editor));
    assert!(saver.path().exists());
    assert_eq!(saver.next_due(), due + Duration::from_secs(60));

    assert!(!saver.tick(due + Duration::from_secs(59), &editor));
}

#[test]
fn test_autosave_rejects_garbage() {
    init_logging();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("auto.path");
    fs::write(&path, [1, 2, 3]).unwrap();
    let saver = AutoSaver::new(&path, Duration::from_secs(60));

    assert!(matches!(saver.try_open(), Err(PersistenceError::Malformed(_))));
    assert!(saver.open().is_none());
}

#[test]
fn test_editor_restores_autosave_without_undo_entry() {
    init_logging();
    let dir = TempDir::new().unwrap();
    let config = config_in(&dir);
    AutoSaver::from_config(&config).try_save(&sample_drawing()).unwrap();

    let editor = EditorModel::with_autosave(config.clone());

    assert_eq!(editor.drawing(), sample_drawing());
    assert!(!editor.can_undo());
    assert!(editor.file_info().is_none());

    let mut later = EditorModel::with_autosave(config);
    draw_line(&mut later);
    let mut saver = AutoSaver::from_config(later.config());
    saver.shutdown(&later);
    let restored = EditorModel::with_autosave(later.config().clone());
    assert_eq!(restored.paths().len(), 2);
}

#[test]
fn test_editor_starts_empty_without_autosave() {
    init_logging();
    let dir = TempDir::new().unwrap();

    let editor = EditorModel::with_autosave(config_in(&dir));

    assert!(editor.paths().is_empty());
    assert_eq!(editor.canvas_size(), Size::new(1920.0, 1080.0));
}

#[test]
fn test_style_book_order_and_lookup() {
    let mut book = StyleBook::from_styles([
        Style::new("thick", None, Some(20.0)),
        Style::new("Alert", Some(Color::RED), None),
        Style::new("blue pen", Some(Color::BLUE), Some(2.0)),
    ]);
    let names: Vec<&str> = book.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, ["Alert", "blue pen", "thick"]);

    book.add_or_update(Style::new("THICK", None, Some(40.0)));
    assert_eq!(book.len(), 3);
    assert_eq!(book.get("thick").and_then(|s| s.stroke_thickness), Some(40.0));

    assert!(book.remove("alert").is_some());
    assert!(book.remove("alert").is_none());
    assert_eq!(book.len(), 2);
}

#[test]
fn test_style_book_persists() {
    init_logging();
    let dir = TempDir::new().unwrap();
    let path = config_in(&dir).styles_path();
    let book = StyleBook::from_styles([Style::new("a", Some(Color::BLACK), Some(1.0)), Style::new("b", None, None)]);

    book.try_save(&path).unwrap();

    assert_eq!(StyleBook::open(&path), Some(book));
    assert!(StyleBook::open(&dir.path().join("missing.json")).is_none());

    fs::write(&path, "{ not json").unwrap();
    assert!(matches!(StyleBook::try_open(&path), Err(PersistenceError::Malformed(_))));
}

#[test]
fn test_applying_styles() {
    let mut editor = EditorModel::new();
    let red = Style::new("red", Some(Color::RED), None);
    let thin = Style::new("thin", None, Some(1.0));

    assert!(!editor.is_style_active(&red));
    editor.apply_style(&red);
    assert!(editor.is_style_active(&red));
    assert_eq!(editor.stroke_thickness(), 50.0);

    editor.apply_style(&thin);
    assert!(editor.is_style_active(&red));
    assert!(editor.is_style_active(&thin));
    assert!(editor.is_style_active(&Style::new("empty", None, None)));
}

#[test]
fn test_config_loading() {
    init_logging();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("config.json");

    assert_eq!(EditorConfig::load(&path).unwrap(), EditorConfig::default());

    let mut config = config_in(&dir);
    config.stroke_thickness = 3.0;
    config.move_arm_delay_ms = 250;
    config.save(&path).unwrap();
    assert_eq!(EditorConfig::load(&path).unwrap(), config);

    let partial = EditorConfig::from_json_str(r#"{ "stroke_thickness": 7.0 }"#).unwrap();
    assert_eq!(partial.stroke_thickness, 7.0);
    assert_eq!(partial.canvas_size, Size::new(1920.0, 1080.0));

    fs::write(&path, "[").unwrap();
    assert!(matches!(EditorConfig::load(&path), Err(ConfigError::Parse(_))));
}

#[test]
fn test_config_falls_back_on_bad_values() {
    init_logging();
    let config = EditorConfig::from_json_str(
        r#"{ "canvas_size": { "width": 0.0, "height": 10.0 }, "stroke_thickness": -2.0, "autosave_interval_secs": 0 }"#,
    )
    .unwrap();

    assert_eq!(config.canvas_size, Size::new(1920.0, 1080.0));
    assert_eq!(config.stroke_thickness, 50.0);
    assert_eq!(config.autosave_interval(), Duration::from_secs(60));
}

#[test]
fn test_save_as_then_open() {
    init_logging();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("picture.path");
    let mut editor = EditorModel::new();
    draw_line(&mut editor);
    assert_eq!(editor.file_name(), "[Untitled]");
    assert!(!editor.can_execute(&Command::Save));

    editor.execute(Command::SaveAs(FileInformation::for_path(&path).unwrap())).unwrap();

    assert_eq!(editor.file_name(), "picture");
    assert_eq!(editor.undo_stack().undo_len(), 1);
    editor.execute(Command::Save).unwrap();

    let mut other = EditorModel::new();
    other.execute(Command::Open { path: path.clone() }).unwrap();
    assert_eq!(other.drawing(), editor.drawing());
    assert_eq!(other.file_name(), "picture");
    assert_eq!(other.undo_stack().next_undo_name(), Some("Open Picture"));

    assert!(other.undo());
    assert!(other.paths().is_empty());
    assert!(other.file_info().is_none());
}

#[test]
fn test_undoing_selection_keeps_file_association() {
    init_logging();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("pic.path");
    let mut editor = EditorModel::new();
    draw_line(&mut editor);
    editor.execute(Command::SelectAll).unwrap();
    editor.save_as(FileInformation::for_path(&path).unwrap(), |_| false).unwrap();

    // Select All never touched the association, so undoing it leaves the file in place.
    assert!(editor.undo());
    assert_eq!(editor.file_name(), "pic");
    editor.save(|_| false).unwrap();

    assert!(editor.redo());
    assert_eq!(editor.file_name(), "pic");
}

#[test]
fn test_svg_round_trip_through_editor() {
    init_logging();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("picture.svg");
    let mut editor = EditorModel::new();
    draw_line(&mut editor);

    editor.save_as(FileInformation::for_path(&path).unwrap(), |_| false).unwrap();
    let mut other = EditorModel::new();
    other.open(&path).unwrap();

    assert_eq!(other.drawing(), editor.drawing());
}

#[test]
fn test_open_failures_change_nothing() {
    init_logging();
    let dir = TempDir::new().unwrap();
    let mut editor = EditorModel::new();
    draw_line(&mut editor);

    let garbage = dir.path().join("garbage.path");
    fs::write(&garbage, [0u8; 5]).unwrap();
    assert!(matches!(editor.open(&garbage), Err(EditorError::Malformed { .. })));

    assert!(matches!(editor.open(dir.path().join("missing.path")), Err(EditorError::Io(_))));

    let unknown = dir.path().join("picture.png");
    fs::write(&unknown, "").unwrap();
    assert!(matches!(editor.open(&unknown), Err(EditorError::Malformed { .. })));

    let empty_canvas = dir.path().join("empty.svg");
    fs::write(&empty_canvas, r#"<svg width="0" height="10"></svg>"#).unwrap();
    assert!(matches!(editor.open(&empty_canvas), Err(EditorError::Malformed { .. })));

    assert_eq!(editor.paths().len(), 1);
    assert_eq!(editor.undo_stack().undo_len(), 1);
}

#[test]
fn test_failed_save_asks_to_retry() {
    init_logging();
    let dir = TempDir::new().unwrap();
    let mut editor = EditorModel::new();
    let unreachable = FileInformation::for_path(dir.path().join("no such dir").join("p.path")).unwrap();
    let mut attempts = 0;

    let result = editor.save_as(unreachable, |e| {
        assert!(matches!(e, EditorError::Save { .. }));
        attempts += 1;
        attempts < 3
    });

    assert!(matches!(result, Err(EditorError::Save { .. })));
    assert_eq!(attempts, 3);
    assert!(editor.file_info().is_none());
    assert!(matches!(editor.save(|_| true), Err(EditorError::NoFileAssociated)));
    assert!(matches!(editor.execute(Command::Save), Err(EditorError::NoFileAssociated)));
}

#[test]
fn test_new_picture_resets_canvas() {
    init_logging();
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("picture.path");
    let mut editor = EditorModel::new();
    draw_line(&mut editor);
    editor.resize_canvas(Size::new(10.0, 10.0), false).unwrap();
    editor.save_as(FileInformation::for_path(&path).unwrap(), |_| false).unwrap();

    editor.execute(Command::New).unwrap();

    assert!(editor.paths().is_empty());
    assert_eq!(editor.canvas_size(), Size::new(1920.0, 1080.0));
    assert!(editor.file_info().is_none());

    assert!(editor.undo());
    assert_eq!(editor.canvas_size(), Size::new(10.0, 10.0));
    assert_eq!(editor.file_name(), "picture");
}
