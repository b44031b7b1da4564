//! Z-order operations

use super::SceneState;
use crate::error::Result;

impl SceneState {
    /// Swap an object with its neighbour above. No-op when already topmost.
    pub fn move_object_up(&mut self, view_key: &str, id: &str) -> Result<bool> {
        let view = self.view_mut(view_key)?;

        match view.index_of(id) {
            Some(index) if index + 1 < view.objects.len() => {
                view.objects.swap(index, index + 1);
                self.version += 1;
                tracing::debug!("Moved {id} up to layer {}", index + 1);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Swap an object with its neighbour below. No-op when already bottommost.
    pub fn move_object_down(&mut self, view_key: &str, id: &str) -> Result<bool> {
        let view = self.view_mut(view_key)?;

        match view.index_of(id) {
            Some(index) if index > 0 => {
                view.objects.swap(index, index - 1);
                self.version += 1;
                tracing::debug!("Moved {id} down to layer {}", index - 1);
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    /// Layer index of an object (0 = bottom)
    pub fn layer_of(&self, view_key: &str, id: &str) -> Option<usize> {
        self.scene.view(view_key)?.index_of(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::DesignObject;

    fn stacked() -> SceneState {
        let mut s = SceneState::default();
        for id in ["a", "b", "c"] {
            s.add_object("front", DesignObject::image(id, "x.png", 0.0, 0.0, 10.0, 10.0))
                .unwrap();
        }
        s
    }

    fn order(s: &SceneState) -> Vec<String> {
        s.objects("front").unwrap().iter().map(|o| o.id.clone()).collect()
    }

    #[test]
    fn test_move_up_swaps_with_neighbour() {
        let mut s = stacked();
        assert!(s.move_object_up("front", "a").unwrap());
        assert_eq!(order(&s), vec!["b", "a", "c"]);
        assert_eq!(s.layer_of("front", "a"), Some(1));
    }

    #[test]
    fn test_move_down_swaps_with_neighbour() {
        let mut s = stacked();
        assert!(s.move_object_down("front", "c").unwrap());
        assert_eq!(order(&s), vec!["a", "c", "b"]);
    }

    #[test]
    fn test_boundaries_are_noops() {
        let mut s = stacked();
        let version = s.version();
        assert!(!s.move_object_up("front", "c").unwrap());
        assert!(!s.move_object_down("front", "a").unwrap());
        assert!(!s.move_object_up("front", "missing").unwrap());
        assert!(!s.move_object_down("front", "missing").unwrap());
        assert_eq!(order(&s), vec!["a", "b", "c"]);
        assert_eq!(s.version(), version);
    }

    #[test]
    fn test_single_object_cannot_move() {
        let mut s = SceneState::default();
        s.add_object("back", DesignObject::text("t", "x", 0.0, 0.0, 10.0))
            .unwrap();
        assert!(!s.move_object_up("back", "t").unwrap());
        assert!(!s.move_object_down("back", "t").unwrap());
    }

    #[test]
    fn test_unknown_view_errors() {
        let mut s = stacked();
        assert!(s.move_object_up("side", "a").is_err());
        assert!(s.move_object_down("side", "a").is_err());
    }
}
