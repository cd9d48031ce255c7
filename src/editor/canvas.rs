use log::debug;

use super::EditorModel;
use crate::error::EditorError;
use crate::geometry::{Matrix, Point, Rectangle, Size, Vector};
use crate::path::PathRef;

impl EditorModel {
    /// Bounds of the picture, if it has any area to work with.
    fn usable_bounds(&self) -> Option<Rectangle> {
        self.bounds().filter(|bounds| bounds.size.is_positive())
    }

    pub fn bounds_arent_empty(&self) -> bool {
        self.usable_bounds().is_some()
    }

    /// Shrinks the canvas to the bounds of the paths, moving them to the origin.
    pub fn crop_to_paths(&mut self) -> Result<(), EditorError> {
        let bounds = self.usable_bounds().ok_or(EditorError::CannotExecute("Crop to Paths"))?;
        let matrix = Matrix::translation(Point::ORIGIN - bounds.origin);
        self.transform_canvas("Crop to Paths", matrix, bounds.size);
        Ok(())
    }

    /// Changes the canvas size, scaling the paths with it.
    ///
    /// With `keep_proportional` the paths are scaled uniformly by the smaller axis ratio and
    /// centred on the new canvas.
    pub fn resize_canvas(&mut self, size: Size, keep_proportional: bool) -> Result<(), EditorError> {
        if !size.is_positive() {
            return Err(EditorError::InvalidCanvasSize);
        }
        let old = self.canvas_size();
        let mut matrix = Vector::from(old).scale_to(Vector::from(size));
        if keep_proportional {
            let scale = matrix.m11.min(matrix.m22);
            let offset = Vector::new(
                (size.width - old.width * scale) / 2.0,
                (size.height - old.height * scale) / 2.0,
            );
            matrix = Matrix::uniform_scale(scale) * Matrix::translation(offset);
        }
        self.transform_canvas("Resize Canvas", matrix, size);
        Ok(())
    }

    /// Scales the paths so their bounds fill the canvas.
    pub fn fit_to_canvas(&mut self) -> Result<(), EditorError> {
        let bounds = self.usable_bounds().ok_or(EditorError::CannotExecute("Fit to Canvas"))?;
        let matrix = Matrix::translation(Point::ORIGIN - bounds.origin)
            * Vector::from(bounds.size).scale_to(Vector::from(self.canvas_size()));
        self.transform_canvas("Fit to Canvas", matrix, self.canvas_size());
        Ok(())
    }

    pub fn center_on_canvas(&mut self) -> Result<(), EditorError> {
        let bounds = self.usable_bounds().ok_or(EditorError::CannotExecute("Center on Canvas"))?;
        let canvas_center = Point::ORIGIN + Vector::from(self.canvas_size()) / 2.0;
        let matrix = Matrix::translation(canvas_center - bounds.center());
        self.transform_canvas("Center on Canvas", matrix, self.canvas_size());
        Ok(())
    }

    /// Replaces every path by its image under `matrix` and sets the canvas size, as one
    /// undo entry.
    fn transform_canvas(&mut self, name: &'static str, matrix: Matrix, canvas_size: Size) {
        debug!("{name}: {matrix:?}, canvas {canvas_size:?}");
        self.change(name, |after| {
            *after = after.map_paths(|path| Some(PathRef::new(path.borrow().transformed(matrix))));
            after.canvas_size = canvas_size;
        });
    }
}
