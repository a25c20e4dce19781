//! Editor state: the current design, selection, zoom and history.

use crate::config::EditorConfig;
use crate::factory::{self, ImagePlacement};
use crate::history::{DesignSnapshot, History};
use crate::hit;
use crate::model::{
    BackgroundPatch, EditorObject, MenuDesign, ObjectId, ObjectKind, ObjectPatch, ShapeKind,
};
use kurbo::{Point, Vec2};
use uuid::Uuid;

/// The editing session core.
///
/// Every mutating operation records exactly one history entry before it
/// runs, including calls whose target does not exist.
#[derive(Debug, Clone)]
pub struct Editor {
    design: Option<MenuDesign>,
    /// Selected object ids, in selection order.
    selection: Vec<ObjectId>,
    zoom_level: f64,
    history: History,
    config: EditorConfig,
}

impl Default for Editor {
    fn default() -> Self {
        Self::new(EditorConfig::default())
    }
}

impl Editor {
    /// Create an editor with no design loaded.
    pub fn new(config: EditorConfig) -> Self {
        Self {
            design: None,
            selection: Vec::new(),
            zoom_level: 1.0,
            history: History::with_limit(config.history_limit),
            config,
        }
    }

    /// Create an editor showing an empty design on the default canvas.
    pub fn with_empty_design(config: EditorConfig) -> Self {
        let mut editor = Self::new(config);
        editor.ensure_design();
        editor
    }

    pub fn config(&self) -> &EditorConfig {
        &self.config
    }

    pub fn design(&self) -> Option<&MenuDesign> {
        self.design.as_ref()
    }

    /// All objects in insertion order (empty when no design is loaded).
    pub fn objects(&self) -> &[EditorObject] {
        self.design.as_ref().map_or(&[], |d| d.objects.as_slice())
    }

    pub fn object(&self, id: ObjectId) -> Option<&EditorObject> {
        self.design.as_ref().and_then(|d| d.object(id))
    }

    pub fn selected_objects(&self) -> &[ObjectId] {
        &self.selection
    }

    pub fn is_selected(&self, id: ObjectId) -> bool {
        self.selection.contains(&id)
    }

    /// The single selected object, if exactly one is selected.
    pub fn selected_object(&self) -> Option<&EditorObject> {
        match self.selection.as_slice() {
            [id] => self.object(*id),
            _ => None,
        }
    }

    pub fn zoom_level(&self) -> f64 {
        self.zoom_level
    }

    pub fn history(&self) -> &History {
        &self.history
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    fn ensure_design(&mut self) -> &mut MenuDesign {
        let canvas = self.config.default_canvas.clone();
        self.design
            .get_or_insert_with(|| MenuDesign::new(canvas.name.clone(), canvas))
    }

    /// Push the current state onto the undo stack (call before making changes).
    fn record_history(&mut self) {
        let snapshot = DesignSnapshot::capture(self.ensure_design());
        self.history.record(snapshot);
    }

    /// Append an object as the new topmost item and make it the sole selection.
    fn insert_object(&mut self, mut object: EditorObject) -> ObjectId {
        let min_size = self.config.min_object_size;
        let design = self.ensure_design();
        object.z_index = design.objects.len() as i32 + 1;
        object.sanitize(min_size);
        let id = object.id;
        design.objects.push(object);
        self.selection.clear();
        self.selection.push(id);
        id
    }

    /// Add a text object. Returns the new id.
    pub fn add_text_object(&mut self, text: Option<&str>, position: Option<Point>) -> ObjectId {
        self.record_history();
        self.insert_object(factory::text_object(text, position))
    }

    /// Add a `contain`-fitted image object. Returns the new id.
    pub fn add_image_object(&mut self, src: &str, position: Option<Point>) -> ObjectId {
        self.record_history();
        self.insert_object(factory::image_object(src, position))
    }

    /// Add an image with a clip mask, fit and size chosen by the caller.
    pub fn add_image_with_options(&mut self, placement: &ImagePlacement) -> ObjectId {
        self.record_history();
        self.insert_object(factory::placed_image_object(placement))
    }

    /// Add a shape object. Returns the new id.
    pub fn add_shape_object(&mut self, shape_type: ShapeKind, position: Option<Point>) -> ObjectId {
        self.record_history();
        self.insert_object(factory::shape_object(shape_type, position))
    }

    /// Merge `patch` into the object with `id`.
    ///
    /// Returns false if no such object exists; history is recorded either way.
    pub fn update_object(&mut self, id: ObjectId, patch: &ObjectPatch) -> bool {
        self.record_history();
        self.apply_patch(id, patch)
    }

    /// Apply `patch` without recording history.
    ///
    /// Used for live feedback during gestures; the gesture commits its final
    /// state through [`Editor::update_object`].
    pub fn preview_object(&mut self, id: ObjectId, patch: &ObjectPatch) -> bool {
        self.apply_patch(id, patch)
    }

    fn apply_patch(&mut self, id: ObjectId, patch: &ObjectPatch) -> bool {
        let min_size = self.config.min_object_size;
        let Some(object) = self.design.as_mut().and_then(|d| d.object_mut(id)) else {
            log::debug!("update: object {} not found", id);
            return false;
        };
        patch.apply_to(object);
        object.sanitize(min_size);
        true
    }

    /// Change the design background.
    pub fn update_background(&mut self, patch: &BackgroundPatch) {
        self.record_history();
        let design = self.ensure_design();
        if let ObjectKind::Background(props) = &mut design.background.kind {
            patch.apply_to(props);
        }
    }

    /// Remove an object and drop it from the selection.
    ///
    /// Returns false if no such object exists; history is recorded either way.
    pub fn delete_object(&mut self, id: ObjectId) -> bool {
        self.record_history();
        self.selection.retain(|&s| s != id);
        let Some(design) = self.design.as_mut() else {
            return false;
        };
        let before = design.objects.len();
        design.objects.retain(|o| o.id != id);
        let removed = design.objects.len() != before;
        if !removed {
            log::debug!("delete: object {} not found", id);
        }
        removed
    }

    /// Delete every selected object as a single undo step.
    pub fn delete_selected(&mut self) -> usize {
        if self.selection.is_empty() {
            return 0;
        }
        self.record_history();
        let selected = std::mem::take(&mut self.selection);
        let Some(design) = self.design.as_mut() else {
            return 0;
        };
        let before = design.objects.len();
        design.objects.retain(|o| !selected.contains(&o.id));
        before - design.objects.len()
    }

    /// Copy an object, offset by the configured delta, as a new topmost object.
    ///
    /// The copy becomes the selection. Returns `None` for unknown ids.
    pub fn duplicate_object(&mut self, id: ObjectId) -> Option<ObjectId> {
        self.record_history();
        let Some(source) = self.object(id) else {
            log::debug!("duplicate: object {} not found", id);
            return None;
        };
        let offset = self.config.duplicate_offset;
        let mut copy = source.clone();
        copy.id = Uuid::new_v4();
        copy.translate(Vec2::new(offset, offset));
        Some(self.insert_object(copy))
    }

    /// Make `id` the only selected object. Unknown ids leave the selection alone.
    pub fn select_object(&mut self, id: ObjectId) -> bool {
        if self.object(id).is_none() {
            log::debug!("select: object {} not found", id);
            return false;
        }
        self.selection.clear();
        self.selection.push(id);
        true
    }

    pub fn clear_selection(&mut self) {
        self.selection.clear();
    }

    /// Set the view zoom, clamped to the configured range. Not historized.
    pub fn set_zoom(&mut self, level: f64) -> f64 {
        self.zoom_level = self.config.clamp_zoom(level);
        self.zoom_level
    }

    /// Undo the last change.
    /// Returns true if undo was performed, false if nothing to undo.
    pub fn undo(&mut self) -> bool {
        let Some(design) = self.design.as_mut() else {
            return false;
        };
        match self.history.undo(DesignSnapshot::capture(design)) {
            Some(snapshot) => {
                snapshot.restore(design);
                self.prune_selection();
                true
            }
            None => false,
        }
    }

    /// Redo the last undone change.
    /// Returns true if redo was performed, false if nothing to redo.
    pub fn redo(&mut self) -> bool {
        let Some(design) = self.design.as_mut() else {
            return false;
        };
        match self.history.redo(DesignSnapshot::capture(design)) {
            Some(snapshot) => {
                snapshot.restore(design);
                self.prune_selection();
                true
            }
            None => false,
        }
    }

    /// Drop selected ids that no longer exist. Selection is otherwise kept.
    fn prune_selection(&mut self) {
        let Some(design) = self.design.as_ref() else {
            self.selection.clear();
            return;
        };
        self.selection.retain(|&id| design.contains(id));
    }

    /// Replace the current design with a template bundle.
    ///
    /// Every object is re-inserted with a fresh id while keeping its declared
    /// geometry, styling and z-index. A background object found in the list
    /// replaces the bundle's background. The loaded design is the session
    /// baseline: history and selection start empty.
    pub fn load_design(&mut self, bundle: MenuDesign) {
        let MenuDesign {
            id,
            name,
            canvas_size,
            objects,
            mut background,
        } = bundle;

        let min_size = self.config.min_object_size;
        let mut placed = Vec::with_capacity(objects.len());
        for mut object in objects {
            if matches!(object.kind, ObjectKind::Background(_)) {
                background = object;
                continue;
            }
            object.id = Uuid::new_v4();
            object.sanitize(min_size);
            placed.push(object);
        }
        background.id = Uuid::new_v4();

        let design = MenuDesign {
            id,
            name,
            canvas_size,
            objects: placed,
            background,
        };

        log::info!(
            "Loaded design {:?} with {} objects",
            design.name,
            design.objects.len()
        );
        self.design = Some(design);
        self.selection.clear();
        self.history.clear();
    }

    /// Topmost visible object at a canvas-space point.
    pub fn object_at(&self, point: Point) -> Option<&EditorObject> {
        hit::object_at(self.objects(), point)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{KindPatch, SerializableColor, ShapePatch, TextProps};

    #[test]
    fn test_add_selects_new_object() {
        let mut editor = Editor::default();
        let a = editor.add_text_object(None, None);
        assert_eq!(editor.selected_objects(), &[a]);
        let b = editor.add_shape_object(ShapeKind::Rectangle, None);
        assert_eq!(editor.selected_objects(), &[b]);
        let c = editor.add_image_object("photo.jpg", None);
        assert_eq!(editor.selected_objects(), &[c]);
    }

    #[test]
    fn test_z_index_is_count_plus_one() {
        let mut editor = Editor::default();
        let a = editor.add_text_object(None, None);
        let b = editor.add_text_object(None, None);
        assert_eq!(editor.object(a).map(|o| o.z_index), Some(1));
        assert_eq!(editor.object(b).map(|o| o.z_index), Some(2));
    }

    #[test]
    fn test_first_add_creates_design() {
        let mut editor = Editor::default();
        assert!(editor.design().is_none());
        editor.add_text_object(Some("Hello"), Some(Point::new(1.0, 2.0)));
        let design = editor.design().unwrap();
        assert_eq!(design.canvas_size.width, 800);
        assert_eq!(design.objects.len(), 1);
    }

    #[test]
    fn test_circle_undo_redo_scenario() {
        let mut editor = Editor::default();
        let id = editor.add_shape_object(ShapeKind::Circle, Some(Point::new(50.0, 50.0)));
        let created = editor.object(id).cloned().unwrap();
        assert_eq!(editor.objects().len(), 1);
        assert_eq!(created.as_shape().unwrap().shape_type, ShapeKind::Circle);
        assert_eq!(created.as_shape().unwrap().fill.to_hex(), "#e2e2e2");

        assert!(editor.undo());
        assert!(editor.objects().is_empty());
        assert!(editor.redo());
        assert_eq!(editor.objects().len(), 1);
        assert_eq!(editor.objects()[0], created);
    }

    #[test]
    fn test_update_preserves_variant() {
        let mut editor = Editor::default();
        let id = editor.add_shape_object(ShapeKind::Rectangle, None);
        let patch = ObjectPatch::position(5.0, 6.0).with_kind(KindPatch::Shape(ShapePatch {
            fill: Some(SerializableColor::rgb(255, 0, 0)),
            ..Default::default()
        }));
        assert!(editor.update_object(id, &patch));
        let obj = editor.object(id).unwrap();
        assert_eq!(obj.position(), Point::new(5.0, 6.0));
        assert_eq!(obj.type_name(), "shape");
        assert_eq!(obj.as_shape().unwrap().fill, SerializableColor::rgb(255, 0, 0));
        assert_eq!(obj.z_index, 1);
    }

    #[test]
    fn test_update_does_not_reselect() {
        let mut editor = Editor::default();
        let a = editor.add_text_object(None, None);
        let b = editor.add_text_object(None, None);
        editor.update_object(a, &ObjectPatch::position(0.0, 0.0));
        assert_eq!(editor.selected_objects(), &[b]);
    }

    #[test]
    fn test_update_clamps_invalid_size() {
        let mut editor = Editor::default();
        let id = editor.add_text_object(None, None);
        editor.update_object(id, &ObjectPatch::size(-10.0, 0.0));
        let obj = editor.object(id).unwrap();
        assert!((obj.width - 1.0).abs() < f64::EPSILON);
        assert!((obj.height - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_update_resets_non_finite_position() {
        let mut editor = Editor::default();
        let id = editor.add_shape_object(ShapeKind::Rectangle, None);
        editor.update_object(id, &ObjectPatch::position(f64::NAN, f64::INFINITY));
        assert_eq!(editor.object(id).unwrap().position(), Point::ZERO);
        assert_eq!(editor.object_at(Point::new(50.0, 50.0)).map(|o| o.id), Some(id));
    }

    #[test]
    fn test_missing_targets_still_record_history() {
        let mut editor = Editor::default();
        let ghost = Uuid::new_v4();
        assert!(!editor.update_object(ghost, &ObjectPatch::locked(true)));
        assert!(!editor.delete_object(ghost));
        assert!(editor.duplicate_object(ghost).is_none());
        assert_eq!(editor.history().past_len(), 3);
    }

    #[test]
    fn test_delete_removes_from_selection() {
        let mut editor = Editor::default();
        let id = editor.add_text_object(None, None);
        assert!(editor.delete_object(id));
        assert!(editor.objects().is_empty());
        assert!(editor.selected_objects().is_empty());
        assert!(!editor.delete_object(id));
        assert!(editor.objects().is_empty());
    }

    #[test]
    fn test_duplicate_offsets_and_selects() {
        let mut editor = Editor::default();
        let id = editor.add_text_object(Some("Soup"), Some(Point::new(10.0, 10.0)));
        let copy = editor.duplicate_object(id).unwrap();
        assert_ne!(copy, id);
        assert_eq!(editor.selected_objects(), &[copy]);
        let copied = editor.object(copy).unwrap();
        assert_eq!(copied.position(), Point::new(30.0, 30.0));
        assert_eq!(copied.as_text().unwrap().text, "Soup");
        assert_eq!(copied.z_index, 2);
    }

    #[test]
    fn test_preview_skips_history() {
        let mut editor = Editor::default();
        let id = editor.add_text_object(None, None);
        let depth = editor.history().past_len();
        assert!(editor.preview_object(id, &ObjectPatch::position(1.0, 1.0)));
        assert_eq!(editor.history().past_len(), depth);
    }

    #[test]
    fn test_selection_not_restored_by_undo() {
        let mut editor = Editor::default();
        let a = editor.add_text_object(None, None);
        let b = editor.add_text_object(None, None);
        editor.select_object(a);
        editor.undo();
        // b is gone, a is still selected
        assert!(editor.object(b).is_none());
        assert_eq!(editor.selected_objects(), &[a]);
    }

    #[test]
    fn test_zoom_clamped_and_not_historized() {
        let mut editor = Editor::default();
        assert!((editor.set_zoom(5.0) - 3.0).abs() < f64::EPSILON);
        assert!((editor.set_zoom(0.1) - 0.4).abs() < f64::EPSILON);
        assert!(!editor.can_undo());
    }

    #[test]
    fn test_update_background_is_undoable() {
        let mut editor = Editor::with_empty_design(EditorConfig::default());
        editor.update_background(&BackgroundPatch {
            fill: Some(SerializableColor::rgb(0, 0, 0)),
            ..Default::default()
        });
        let fill = |e: &Editor| e.design().and_then(|d| d.background_props()).map(|b| b.fill);
        assert_eq!(fill(&editor), Some(SerializableColor::black()));
        editor.undo();
        assert_eq!(fill(&editor), Some(SerializableColor::white()));
    }

    #[test]
    fn test_load_design_preserves_z_and_resets_history() {
        let mut editor = Editor::default();
        editor.add_text_object(None, None);

        let mut bundle = MenuDesign::default();
        let mut title = EditorObject::new(
            ObjectKind::Text(TextProps::new("Title")),
            250.0,
            80.0,
            300.0,
            60.0,
        );
        title.z_index = 7;
        let title_id = title.id;
        bundle.objects.push(title);

        editor.load_design(bundle);
        assert_eq!(editor.objects().len(), 1);
        assert_ne!(editor.objects()[0].id, title_id);
        assert_eq!(editor.objects()[0].z_index, 7);
        assert_eq!(editor.objects()[0].position(), Point::new(250.0, 80.0));
        assert!(!editor.can_undo());
        assert!(editor.selected_objects().is_empty());
    }

    #[test]
    fn test_delete_selected_single_step() {
        let mut editor = Editor::default();
        let id = editor.add_text_object(None, None);
        editor.select_object(id);
        let depth = editor.history().past_len();
        assert_eq!(editor.delete_selected(), 1);
        assert_eq!(editor.history().past_len(), depth + 1);
        assert_eq!(editor.delete_selected(), 0);
        assert_eq!(editor.history().past_len(), depth + 1);
    }
}
