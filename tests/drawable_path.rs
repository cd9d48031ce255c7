use std::cell::RefCell;
use std::collections::HashSet;
use std::rc::Rc;

use path_editor::geometry::{Matrix, Point, Rectangle, Size, Vector};
use path_editor::observable::{Change, ObservableSet};
use path_editor::{Color, DrawablePath, PathError, PathRef};

fn zigzag() -> DrawablePath {
    let points = [
        Point::new(0.0, 0.0),
        Point::new(10.0, 10.0),
        Point::new(20.0, 0.0),
        Point::new(30.0, 10.0),
    ];
    DrawablePath::new(points, Color::RED, 4.0).unwrap()
}

// Every point inflated by half the thickness must lie inside the bounds
fn assert_bounds_cover(path: &DrawablePath) {
    let half = path.stroke_thickness() / 2.0;
    let bounds = path.bounds();
    for point in path.point_slice() {
        for corner in [
            Point::new(point.x - half, point.y - half),
            Point::new(point.x + half, point.y + half),
        ] {
            assert!(bounds.contains(corner), "{corner:?} outside {bounds:?}");
        }
    }
}

#[test]
fn test_empty_path_is_rejected() {
    let result = DrawablePath::new(Vec::new(), Color::BLACK, 1.0);
    assert_eq!(result.err(), Some(PathError::Empty));
}

#[test]
fn test_initial_bounds_are_inflated() {
    let path = zigzag();
    assert_eq!(path.bounds(), Rectangle::from_xywh(-2.0, -2.0, 34.0, 14.0));
    assert_eq!(path.segment_count(), 3);
    assert_bounds_cover(&path);
}

#[test]
fn test_append_rejects_duplicate_of_last_point() {
    let mut path = DrawablePath::from_point(Point::new(1.0, 1.0), Color::BLUE, 2.0);
    assert!(!path.append(Point::new(1.0, 1.0)));
    assert_eq!(path.segment_count(), 0);

    assert!(path.append(Point::new(2.0, 1.0)));
    // Only the last point matters; returning to an earlier point is fine
    assert!(path.append(Point::new(1.0, 1.0)));
    assert_eq!(path.segment_count(), 2);
}

#[test]
fn test_append_grows_bounds_incrementally() {
    let mut path = DrawablePath::from_point(Point::new(0.0, 0.0), Color::BLUE, 2.0);
    assert_eq!(path.bounds(), Rectangle::from_xywh(-1.0, -1.0, 2.0, 2.0));

    path.append(Point::new(10.0, -5.0));
    assert_eq!(path.bounds(), Rectangle::from_corners(Point::new(-1.0, -6.0), Point::new(11.0, 1.0)));

    path.append(Point::new(3.0, 3.0));
    assert_eq!(path.bounds(), Rectangle::from_corners(Point::new(-1.0, -6.0), Point::new(11.0, 4.0)));
    assert_bounds_cover(&path);
}

#[test]
fn test_point_observers_follow_appends() {
    let mut path = DrawablePath::from_point(Point::new(0.0, 0.0), Color::BLUE, 2.0);
    let appended = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&appended);
    path.points().subscribe(move |_, change| {
        if let Change::Added(point) = change {
            sink.borrow_mut().push(**point);
        }
    });

    path.append(Point::new(0.0, 0.0));
    path.append(Point::new(1.0, 0.0));

    assert_eq!(*appended.borrow(), vec![Point::new(1.0, 0.0)]);
}

#[test]
fn test_hit_test_accepts_own_points() {
    let path = zigzag();
    for point in path.point_slice() {
        assert!(path.hit_test(*point));
    }
    let single = DrawablePath::from_point(Point::new(5.0, 5.0), Color::BLUE, 2.0);
    assert!(single.hit_test(Point::new(5.0, 5.0)));
    assert!(!single.hit_test(Point::new(6.0, 5.0)));
}

#[test]
fn test_hit_test_uses_distance_to_segments() {
    let path = DrawablePath::new([Point::new(0.0, 0.0), Point::new(10.0, 0.0)], Color::BLUE, 4.0).unwrap();
    assert!(path.hit_test(Point::new(5.0, 1.9)));
    // Exactly half the thickness away is a miss
    assert!(!path.hit_test(Point::new(5.0, 2.0)));
    // Inside the bounds but beyond the end of the segment
    assert!(!path.hit_test(Point::new(11.9, 1.9)));
    assert!(!path.hit_test(Point::new(50.0, 0.0)));
}

#[test]
fn test_transformed_path_scales_thickness() {
    let path = zigzag();
    let matrix = Matrix::scale(2.0, 4.0) * Matrix::translation(Vector::new(1.0, 1.0));
    let moved = path.transformed(matrix);

    assert_ne!(moved.id(), path.id());
    assert_eq!(moved.stroke_thickness(), 12.0);
    assert_eq!(moved.point_slice()[1], Point::new(21.0, 41.0));
    assert_eq!(path.point_slice()[1], Point::new(10.0, 10.0));
}

#[test]
fn test_translated_keeps_style() {
    let path = zigzag();
    let moved = path.translated(Vector::new(-1.0, 2.0));
    assert_eq!(moved.stroke_thickness(), 4.0);
    assert_eq!(moved.stroke_color(), Color::RED);
    assert_eq!(moved.bounds().origin, Point::new(-3.0, 0.0));
    assert_eq!(moved.bounds().size, Size::new(34.0, 14.0));
}

#[test]
fn test_path_refs_compare_by_identity() {
    let a = PathRef::new(zigzag());
    let b = PathRef::new(zigzag());
    let a_again = a.clone();

    assert_ne!(a, b);
    assert_eq!(a, a_again);

    let refs: HashSet<PathRef> = [a.clone(), b.clone(), a_again].into_iter().collect();
    assert_eq!(refs.len(), 2);
}

#[test]
fn test_selection_is_a_query() {
    let a = PathRef::new(zigzag());
    let b = PathRef::new(zigzag());
    let mut selection = ObservableSet::new();
    selection.add(a.clone());

    assert!(a.is_selected(&selection));
    assert!(!b.is_selected(&selection));

    // Mutating the path does not affect its membership
    a.borrow_mut().append(Point::new(40.0, 0.0));
    assert!(a.is_selected(&selection));
}
