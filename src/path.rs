use std::cell::{Cell, Ref, RefCell, RefMut};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use uuid::Uuid;

use crate::color::Color;
use crate::error::PathError;
use crate::format::PathData;
use crate::geometry::hit_testing::{distance_squared_to_segment, polyline_contains};
use crate::geometry::{Matrix, Point, Rectangle, Size, Vector};
use crate::observable::{Change, ObservableList, ObservableSet, Pending};

/// One freehand stroke.
///
/// The point list only grows through [`append`](Self::append); a validator on it refuses a point
/// equal to the current last point, and an observer widens the bounds by one inflated point per
/// accepted append. Geometry is otherwise immutable: transforms build a new path.
#[derive(Debug)]
pub struct DrawablePath {
    id: Uuid,
    points: ObservableList<Point>,
    stroke_color: Color,
    stroke_thickness: f64,
    bounds: Rc<Cell<Rectangle>>,
    movement: Vector,
}

impl DrawablePath {
    pub fn new(
        points: impl IntoIterator<Item = Point>,
        stroke_color: Color,
        stroke_thickness: f64,
    ) -> Result<Self, PathError> {
        let points: Vec<Point> = points.into_iter().collect();
        if points.is_empty() {
            return Err(PathError::Empty);
        }
        Ok(Self::from_nonempty(points, stroke_color, stroke_thickness))
    }

    /// A one-point path, the start of a stroke.
    pub fn from_point(point: Point, stroke_color: Color, stroke_thickness: f64) -> Self {
        Self::from_nonempty(vec![point], stroke_color, stroke_thickness)
    }

    pub fn from_data(data: &PathData) -> Result<Self, PathError> {
        Self::new(data.points.iter().copied(), data.stroke_color, data.stroke_thickness)
    }

    fn from_nonempty(points: Vec<Point>, stroke_color: Color, stroke_thickness: f64) -> Self {
        let inflation = Size::new(stroke_thickness / 2.0, stroke_thickness / 2.0);
        let initial = Rectangle::union_all(points.iter().map(|p| Rectangle::from_point(*p)))
            .unwrap_or(Rectangle::EMPTY)
            .inflate(inflation);
        let bounds = Rc::new(Cell::new(initial));

        let points = ObservableList::from_items(points);
        points.guard(|items: &Vec<Point>, pending: &Pending<'_, Point>| match pending {
            Pending::Add(point) => items.last() != Some(*point),
            _ => true,
        });
        let tracked = Rc::clone(&bounds);
        points.subscribe(move |_: &Vec<Point>, change: &Change<'_, Point>| {
            if let Change::Added(point) | Change::Inserted { item: point, .. } = change {
                let grown = tracked.get() | Rectangle::from_point(**point).inflate(inflation);
                tracked.set(grown);
            }
        });

        Self {
            id: Uuid::new_v4(),
            points,
            stroke_color,
            stroke_thickness,
            bounds,
            movement: Vector::ZERO,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Observable view of the points; subscribe here to follow a stroke as it is drawn.
    pub fn points(&self) -> &ObservableList<Point> {
        &self.points
    }

    pub fn point_slice(&self) -> &[Point] {
        self.points.as_slice()
    }

    pub fn stroke_color(&self) -> Color {
        self.stroke_color
    }

    pub fn stroke_thickness(&self) -> f64 {
        self.stroke_thickness
    }

    /// Covers every point inflated by half the stroke thickness.
    pub fn bounds(&self) -> Rectangle {
        self.bounds.get()
    }

    pub fn segment_count(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// Appends a point; false if it equals the last one.
    pub fn append(&mut self, point: Point) -> bool {
        self.points.add(point)
    }

    /// Whether `point` lies on the stroke.
    pub fn hit_test(&self, point: Point) -> bool {
        if !self.bounds().contains(point) {
            return false;
        }
        let half = self.stroke_thickness / 2.0;
        match self.point_slice() {
            [single] => distance_squared_to_segment(point, *single, *single) < half * half,
            points => polyline_contains(points, point, half),
        }
    }

    /// Uncommitted drag offset, applied only when presenting the path.
    pub fn movement(&self) -> Vector {
        self.movement
    }

    pub fn set_movement(&mut self, movement: Vector) {
        self.movement = movement;
    }

    /// A new path with every point mapped through `matrix` and the thickness scaled by its
    /// average axis scale.
    pub fn transformed(&self, matrix: Matrix) -> Self {
        let points = self.point_slice().iter().map(|p| *p * matrix).collect();
        Self::from_nonempty(points, self.stroke_color, self.stroke_thickness * matrix.average_scale())
    }

    pub fn translated(&self, delta: Vector) -> Self {
        let points = self.point_slice().iter().map(|p| *p + delta).collect();
        Self::from_nonempty(points, self.stroke_color, self.stroke_thickness)
    }

    /// Same geometry and style under a fresh identity.
    pub fn duplicate(&self) -> Self {
        Self::from_nonempty(self.point_slice().to_vec(), self.stroke_color, self.stroke_thickness)
    }

    pub fn to_data(&self) -> PathData {
        PathData {
            points: self.point_slice().to_vec(),
            stroke_color: self.stroke_color,
            stroke_thickness: self.stroke_thickness,
        }
    }
}

/// Shared handle to a path owned by the editor.
///
/// Equality and hashing follow the path's id, so two handles are equal only if they refer to
/// the same path, regardless of geometry.
#[derive(Clone)]
pub struct PathRef {
    id: Uuid,
    path: Rc<RefCell<DrawablePath>>,
}

impl PathRef {
    pub fn new(path: DrawablePath) -> Self {
        Self {
            id: path.id(),
            path: Rc::new(RefCell::new(path)),
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn borrow(&self) -> Ref<'_, DrawablePath> {
        self.path.borrow()
    }

    pub fn borrow_mut(&self) -> RefMut<'_, DrawablePath> {
        self.path.borrow_mut()
    }

    pub fn is_selected(&self, selection: &ObservableSet<PathRef>) -> bool {
        selection.contains(self)
    }

    pub fn hit_test(&self, point: Point) -> bool {
        self.borrow().hit_test(point)
    }

    pub fn bounds(&self) -> Rectangle {
        self.borrow().bounds()
    }
}

impl From<DrawablePath> for PathRef {
    fn from(path: DrawablePath) -> Self {
        Self::new(path)
    }
}

impl PartialEq for PathRef {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for PathRef {}

impl Hash for PathRef {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Debug for PathRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.path.try_borrow() {
            Ok(path) => f
                .debug_struct("PathRef")
                .field("id", &self.id)
                .field("points", &path.points.len())
                .finish(),
            Err(_) => f.debug_struct("PathRef").field("id", &self.id).finish_non_exhaustive(),
        }
    }
}
