use std::time::Instant;

use log::debug;

use super::EditorModel;
use crate::document::{Document, Snapshot};
use crate::geometry::{Point, Vector};
use crate::input::{DeviceId, InputEvent};
use crate::path::{DrawablePath, PathRef};
use crate::state::{EditorMode, EditorState, MoveInfo};

impl EditorModel {
    /// Feeds one pointer sample into the current mode's gesture.
    pub fn process_point(&mut self, point: Point, event: InputEvent, device: DeviceId) {
        self.process_point_at(point, event, device, Instant::now());
    }

    /// [`process_point`](Self::process_point) with an explicit clock, used to arm the move timer.
    pub fn process_point_at(&mut self, point: Point, event: InputEvent, device: DeviceId, now: Instant) {
        match self.mode() {
            EditorMode::Draw => self.draw_point(point, event, device),
            EditorMode::Select => self.select_at_point(point, event, now),
        }
    }

    /// When the pending move timer fires, if one is armed. Hosts call [`tick`](Self::tick) then.
    pub fn move_timer_deadline(&self) -> Option<Instant> {
        self.document.state.move_deadline()
    }

    /// Starts the armed move if its deadline has passed. Returns whether a move started.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.document.state.move_deadline() {
            Some(deadline) if now >= deadline => {}
            _ => return false,
        }
        let original_paths = self.document.paths.to_vec();
        let moving = self.document.selection_in_order();
        let EditorState::Selecting { press_point, move_deadline, move_info } = &mut self.document.state
        else {
            return false;
        };
        *move_deadline = None;
        let Some(start) = press_point.take() else {
            return false;
        };
        debug!("move of {} paths started at {start:?}", moving.len());
        *move_info = Some(MoveInfo { start, original_paths, moving });
        true
    }

    pub fn is_moving(&self) -> bool {
        self.document.state.is_moving()
    }

    /// Abandons a move in progress without committing it. Returns whether one was abandoned.
    pub fn cancel_move(&mut self) -> bool {
        if !self.is_moving() {
            return false;
        }
        self.document.state.abandon_gestures();
        debug!("move cancelled");
        true
    }

    fn draw_point(&mut self, point: Point, event: InputEvent, device: DeviceId) {
        let EditorState::Drawing { current_paths } = &mut self.document.state else {
            return;
        };
        match current_paths.get(&device).cloned() {
            Some(path) if event != InputEvent::Down => {
                let first_segment = {
                    let mut path = path.borrow_mut();
                    path.append(point) && path.segment_count() == 1
                };
                if first_segment {
                    self.add_path(path);
                }
            }
            _ => {
                let path = DrawablePath::from_point(point, self.stroke_color, self.stroke_thickness);
                current_paths.insert(device, PathRef::new(path));
            }
        }
        if event == InputEvent::Up {
            if let EditorState::Drawing { current_paths } = &mut self.document.state {
                current_paths.remove(&device);
            }
        }
    }

    /// Puts a stroke on the canvas once it has its first segment.
    fn add_path(&mut self, path: PathRef) {
        let added = path.clone();
        let removed = path;
        self.undo_stack.do_action(
            "Add Path",
            move |document: &mut Document| {
                document.paths.add(added.clone());
            },
            move |document: &mut Document| {
                document.paths.remove(&removed);
                document.selected_paths.remove(&removed);
                document.state.forget_path(&removed);
            },
            &mut self.document,
        );
    }

    fn select_at_point(&mut self, point: Point, event: InputEvent, now: Instant) {
        match event {
            InputEvent::Down => {
                let on_selection = self.document.selected_paths.iter().any(|path| path.hit_test(point));
                let deadline = on_selection.then(|| now + self.config.move_arm_delay());
                if let EditorState::Selecting { press_point, move_deadline, .. } = &mut self.document.state {
                    *press_point = Some(point);
                    *move_deadline = deadline;
                }
            }
            InputEvent::Move => {
                if let Some(info) = self.document.state.move_info() {
                    let delta = info.delta_to(point);
                    for path in &info.moving {
                        path.borrow_mut().set_movement(delta);
                    }
                }
            }
            InputEvent::Up => {
                let EditorState::Selecting { press_point, move_deadline, move_info } = &mut self.document.state
                else {
                    return;
                };
                *move_deadline = None;
                let press = press_point.take();
                match (move_info.take(), press) {
                    (Some(info), _) => self.commit_move(info, point),
                    (None, Some(press)) if self.is_click(press, point) => self.click_select(point),
                    _ => {}
                }
            }
        }
    }

    /// A release close enough to its press, relative to the canvas size, is a click.
    fn is_click(&self, press: Point, release: Point) -> bool {
        let tolerance = Vector::from(self.canvas_size() / self.config.no_move_divisor);
        (release - press).abs().all_lt(tolerance)
    }

    /// Toggles the topmost path under `point`, or clears the selection if there is none.
    fn click_select(&mut self, point: Point) {
        let hit = self.document.paths.iter().rev().find(|path| path.hit_test(point)).cloned();
        let selection = &mut self.document.selected_paths;
        match hit {
            Some(path) => {
                if !selection.remove(&path) {
                    selection.add(path);
                }
            }
            None if !selection.is_empty() => selection.clear(),
            None => {}
        }
    }

    fn commit_move(&mut self, info: MoveInfo, release: Point) {
        let delta = info.delta_to(release);
        for path in &info.moving {
            path.borrow_mut().set_movement(Vector::ZERO);
        }
        let mut before = Snapshot::capture(&self.document);
        before.paths = info.original_paths;
        let after = before.map_paths(|path| {
            info.moving
                .contains(path)
                .then(|| PathRef::new(path.borrow().translated(delta)))
        });
        debug!("moving {} paths by {delta:?}", info.moving.len());
        self.commit("Move Paths", before, after);
    }
}
