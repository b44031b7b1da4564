//! Object CRUD operations
//!
//! Unknown view keys are errors. Unknown object IDs are silent no-ops: late updates
//! routinely arrive for objects the same interaction stream already deleted.

use shared::{DesignObject, ObjectId, ObjectPatch};

use super::SceneState;
use crate::error::Result;

impl SceneState {
    /// Append an object on top of a view.
    ///
    /// An empty or already-used ID is replaced with a fresh one. Returns the ID stored.
    pub fn add_object(&mut self, view_key: &str, mut object: DesignObject) -> Result<ObjectId> {
        let view = self.view_mut(view_key)?;

        if object.id.is_empty() || view.contains(&object.id) {
            let fresh = Self::new_object_id();
            tracing::debug!("Reassigning object id {:?} -> {fresh}", object.id);
            object.id = fresh;
        }

        let id = object.id.clone();
        view.objects.push(object);

        self.version += 1;
        tracing::debug!("Added object {id} to {view_key}");
        Ok(id)
    }

    /// Merge a patch into an object. Returns whether the object was found and changed.
    pub fn update_object(&mut self, view_key: &str, id: &str, patch: &ObjectPatch) -> Result<bool> {
        let view = self.view_mut(view_key)?;

        let Some(obj) = view.get_mut(id) else {
            tracing::debug!("update_object: {id} not in {view_key}, ignored");
            return Ok(false);
        };

        let changed = patch.apply_to(obj);
        if changed {
            self.version += 1;
        }
        Ok(changed)
    }

    /// Remove an object. Returns whether it existed.
    pub fn remove_object(&mut self, view_key: &str, id: &str) -> Result<bool> {
        let view = self.view_mut(view_key)?;

        let Some(index) = view.index_of(id) else {
            tracing::debug!("remove_object: {id} not in {view_key}, ignored");
            return Ok(false);
        };

        view.objects.remove(index);
        self.version += 1;
        tracing::debug!("Removed object {id} from {view_key}");
        Ok(true)
    }

    /// Clone an object directly above the original, offset so it is visibly distinct.
    ///
    /// Returns the new ID, or `None` if `id` is not in the view.
    pub fn duplicate_object(&mut self, view_key: &str, id: &str) -> Result<Option<ObjectId>> {
        let [dx, dy] = self.edit.duplicate_offset;
        let view = self.view_mut(view_key)?;

        let Some(index) = view.index_of(id) else {
            tracing::debug!("duplicate_object: {id} not in {view_key}, ignored");
            return Ok(None);
        };

        let mut copy = view.objects[index].clone();
        copy.id = Self::new_object_id();
        copy.placement.x += dx;
        copy.placement.y += dy;

        let new_id = copy.id.clone();
        view.objects.insert(index + 1, copy);

        self.version += 1;
        tracing::debug!("Duplicated {id} as {new_id} in {view_key}");
        Ok(Some(new_id))
    }

    /// Toggle object visibility
    pub fn toggle_object_visibility(&mut self, view_key: &str, id: &str) -> Result<bool> {
        let Some(visible) = self.get_object(view_key, id).map(|o| o.visible) else {
            self.view(view_key)?;
            return Ok(false);
        };
        self.update_object(
            view_key,
            id,
            &ObjectPatch {
                visible: Some(!visible),
                ..Default::default()
            },
        )
    }

    /// Toggle object lock
    pub fn toggle_object_lock(&mut self, view_key: &str, id: &str) -> Result<bool> {
        let Some(locked) = self.get_object(view_key, id).map(|o| o.locked) else {
            self.view(view_key)?;
            return Ok(false);
        };
        self.update_object(
            view_key,
            id,
            &ObjectPatch {
                locked: Some(!locked),
                ..Default::default()
            },
        )
    }
}
