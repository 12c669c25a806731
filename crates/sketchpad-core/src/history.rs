//! Bounded linear undo/redo over full-scene snapshots.

use crate::elements::Element;
use std::collections::VecDeque;

/// Maximum number of undo states to keep.
pub const MAX_HISTORY_LENGTH: usize = 50;

/// An ordered list of committed elements.
pub type Scene = Vec<Element>;

/// Past, present and future scene snapshots.
///
/// `present` is exactly what gets rendered. `past` is ordered oldest first;
/// `future` is ordered next-to-redo first.
#[derive(Debug, Clone)]
pub struct History {
    past: VecDeque<Scene>,
    present: Scene,
    future: VecDeque<Scene>,
    limit: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::new()
    }
}

impl History {
    /// Create an empty history with the default cap.
    pub fn new() -> Self {
        Self::with_limit(MAX_HISTORY_LENGTH)
    }

    /// Create an empty history that keeps at most `limit` undo states.
    pub fn with_limit(limit: usize) -> Self {
        Self {
            past: VecDeque::new(),
            present: Vec::new(),
            future: VecDeque::new(),
            limit,
        }
    }

    /// The visible scene.
    pub fn present(&self) -> &[Element] {
        &self.present
    }

    pub fn past(&self) -> impl Iterator<Item = &Scene> {
        self.past.iter()
    }

    pub fn future(&self) -> impl Iterator<Item = &Scene> {
        self.future.iter()
    }

    pub fn past_len(&self) -> usize {
        self.past.len()
    }

    pub fn future_len(&self) -> usize {
        self.future.len()
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    fn push_past(&mut self, scene: Scene) {
        self.past.push_back(scene);
        while self.past.len() > self.limit {
            self.past.pop_front();
        }
    }

    /// Make `scene` the present. The outgoing present becomes undoable and
    /// any redo states are discarded.
    pub fn commit(&mut self, scene: Scene) {
        let previous = std::mem::replace(&mut self.present, scene);
        self.push_past(previous);
        self.future.clear();
        log::debug!(
            "Committed scene with {} elements ({} undo states)",
            self.present.len(),
            self.past.len()
        );
    }

    /// Step back one state.
    /// Returns true if undo was performed, false if nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(previous) = self.past.pop_back() else {
            return false;
        };
        let current = std::mem::replace(&mut self.present, previous);
        self.future.push_front(current);
        while self.future.len() > self.limit {
            self.future.pop_back();
        }
        log::debug!("Undo: {} elements visible", self.present.len());
        true
    }

    /// Step forward one state.
    /// Returns true if redo was performed, false if nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(next) = self.future.pop_front() else {
            return false;
        };
        let current = std::mem::replace(&mut self.present, next);
        self.push_past(current);
        log::debug!("Redo: {} elements visible", self.present.len());
        true
    }

    pub fn can_undo(&self) -> bool {
        !self.past.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.future.is_empty()
    }

    /// Reset past, present and future to empty.
    pub fn clear(&mut self) {
        self.past.clear();
        self.present.clear();
        self.future.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::elements::{ElementStyle, Ellipse, Rectangle};
    use kurbo::Point;

    fn rectangle() -> Element {
        Element::Rectangle(Rectangle::new(
            Point::ZERO,
            Point::new(10.0, 10.0),
            ElementStyle::default(),
        ))
    }

    fn ellipse() -> Element {
        Element::Ellipse(Ellipse::new(
            Point::ZERO,
            Point::new(20.0, 10.0),
            ElementStyle::default(),
        ))
    }

    #[test]
    fn test_empty_history() {
        let mut history = History::new();
        assert!(history.present().is_empty());
        assert!(!history.can_undo());
        assert!(!history.can_redo());
        assert!(!history.undo());
        assert!(!history.redo());
        assert_eq!(history.limit(), MAX_HISTORY_LENGTH);
    }

    #[test]
    fn test_commit_then_undo_restores_scene() {
        let mut history = History::new();
        let a = rectangle();
        history.commit(vec![a.clone()]);

        let before = history.present().to_vec();
        for i in 0..10 {
            let mut scene = history.present().to_vec();
            scene.push(if i % 2 == 0 { ellipse() } else { rectangle() });
            history.commit(scene);
        }
        for _ in 0..10 {
            assert!(history.undo());
        }
        assert_eq!(history.present(), before.as_slice());
    }

    #[test]
    fn test_undo_then_redo_is_identity() {
        let mut history = History::new();
        history.commit(vec![rectangle()]);
        history.commit(vec![rectangle(), ellipse()]);

        let visible = history.present().to_vec();
        assert!(history.undo());
        assert!(history.redo());
        assert_eq!(history.present(), visible.as_slice());
    }

    #[test]
    fn test_commit_after_undo_clears_future() {
        let mut history = History::new();
        history.commit(vec![rectangle()]);
        history.undo();
        assert!(history.can_redo());

        history.commit(vec![ellipse()]);
        assert!(!history.can_redo());
        assert_eq!(history.future_len(), 0);
    }

    #[test]
    fn test_past_is_capped() {
        let mut history = History::new();
        let scenes: Vec<Scene> = (0..MAX_HISTORY_LENGTH + 10)
            .map(|_| vec![rectangle()])
            .collect();
        for scene in &scenes {
            history.commit(scene.clone());
        }
        assert_eq!(history.past_len(), MAX_HISTORY_LENGTH);

        // The oldest ten states (the empty scene and the first nine) were evicted.
        let oldest = history.past().next().unwrap();
        assert_eq!(oldest, &scenes[9]);
    }

    #[test]
    fn test_custom_limit() {
        let mut history = History::with_limit(2);
        for _ in 0..5 {
            history.commit(vec![rectangle()]);
        }
        assert_eq!(history.past_len(), 2);
        assert!(history.undo());
        assert!(history.undo());
        assert!(!history.undo());
    }

    #[test]
    fn test_rectangle_then_ellipse_walkthrough() {
        let mut history = History::new();
        let a = rectangle();
        let b = ellipse();

        history.commit(vec![a.clone()]);
        history.commit(vec![a.clone(), b.clone()]);
        assert_eq!(history.present(), [a.clone(), b.clone()].as_slice());

        history.undo();
        assert_eq!(history.present(), [a.clone()].as_slice());
        let future: Vec<_> = history.future().cloned().collect();
        assert_eq!(future, vec![vec![a.clone(), b.clone()]]);

        history.undo();
        assert!(history.present().is_empty());
        let future: Vec<_> = history.future().cloned().collect();
        assert_eq!(future, vec![vec![a.clone()], vec![a.clone(), b.clone()]]);

        history.redo();
        assert_eq!(history.present(), [a].as_slice());
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut history = History::new();
        history.commit(vec![rectangle()]);
        history.commit(vec![ellipse()]);
        history.undo();

        history.clear();
        assert!(history.present().is_empty());
        assert_eq!(history.past_len(), 0);
        assert_eq!(history.future_len(), 0);
    }
}
