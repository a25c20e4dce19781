//! Paint ordering and pointer hit-testing.

use crate::model::{EditorObject, ObjectId};
use kurbo::Point;

/// Visible objects sorted back to front.
///
/// Sorting is by `z_index` and stable, so ties keep insertion order.
pub fn paint_order(objects: &[EditorObject]) -> Vec<&EditorObject> {
    let mut visible: Vec<&EditorObject> = objects.iter().filter(|o| o.visible).collect();
    visible.sort_by_key(|o| o.z_index);
    visible
}

/// The topmost visible object whose unrotated box contains `point`.
///
/// `point` is in canvas space. Edges count as inside.
pub fn object_at(objects: &[EditorObject], point: Point) -> Option<&EditorObject> {
    paint_order(objects)
        .into_iter()
        .rev()
        .find(|o| o.contains(point))
}

/// Id of the topmost object under `point`.
pub fn object_id_at(objects: &[EditorObject], point: Point) -> Option<ObjectId> {
    object_at(objects, point).map(|o| o.id)
}
