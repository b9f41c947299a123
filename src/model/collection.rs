use super::object::PathObject;
use crate::geometry::{nearest_control_point, BoundingBox, ControlPointMatch, Point, Rect};

/// Ordered set of objects; order is drawing order (last is top-most).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Collection {
    objects: Vec<PathObject>,
}

impl From<Vec<PathObject>> for Collection {
    fn from(objects: Vec<PathObject>) -> Self {
        Self { objects }
    }
}

impl IntoIterator for Collection {
    type Item = PathObject;
    type IntoIter = std::vec::IntoIter<PathObject>;

    fn into_iter(self) -> Self::IntoIter {
        self.objects.into_iter()
    }
}

impl Extend<PathObject> for Collection {
    fn extend<T: IntoIterator<Item = PathObject>>(&mut self, iter: T) {
        self.objects.extend(iter);
    }
}

impl Collection {
    pub fn new() -> Self {
        Self { objects: vec![] }
    }

    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PathObject> + '_ {
        self.objects.iter()
    }

    pub fn as_slice(&self) -> &[PathObject] {
        &self.objects
    }

    pub fn push(&mut self, object: PathObject) {
        self.objects.push(object);
    }

    pub fn get(&self, id: &str) -> Option<&PathObject> {
        self.objects.iter().find(|o| o.id == id)
    }

    pub fn get_mut(&mut self, id: &str) -> Option<&mut PathObject> {
        self.objects.iter_mut().find(|o| o.id == id)
    }

    pub fn remove(&mut self, id: &str) -> Option<PathObject> {
        let index = self.objects.iter().position(|o| o.id == id)?;
        Some(self.objects.remove(index))
    }

    /// Remove a point from an object; an object left with no points is
    /// removed from the collection. Returns true if a point was removed.
    pub fn remove_point(&mut self, object_id: &str, point_index: usize) -> bool {
        let Some(object) = self.get_mut(object_id) else {
            return false;
        };
        if object.remove_point(point_index).is_none() {
            return false;
        }
        if object.points.is_empty() {
            self.remove(object_id);
        }
        true
    }

    /// Find the control point under `query`, searching top-most objects first.
    /// Returns the object index with the match.
    pub fn hit_test(
        &self,
        query: Point,
        radius: f64,
        include_handles: bool,
    ) -> Option<(usize, ControlPointMatch)> {
        self.objects
            .iter()
            .enumerate()
            .rev()
            .find_map(|(idx, obj)| {
                nearest_control_point(&obj.points, query, radius, include_handles)
                    .map(|m| (idx, m))
            })
    }

    /// Select every object with at least one anchor inside `rect`, deselecting
    /// the rest. Returns the number selected.
    pub fn select_in_rect(&mut self, rect: Rect) -> usize {
        let mut count = 0;
        for obj in &mut self.objects {
            obj.selected = obj.points.iter().any(|p| rect.contains(p.anchor));
            if obj.selected {
                count += 1;
            }
        }
        count
    }

    pub fn clear_selection(&mut self) {
        for obj in &mut self.objects {
            obj.selected = false;
        }
    }

    pub fn selected(&self) -> impl Iterator<Item = &PathObject> + '_ {
        self.objects.iter().filter(|o| o.selected)
    }

    /// Bounds over all objects after their transforms
    pub fn bounds(&self) -> Option<BoundingBox> {
        BoundingBox::union(self.objects.iter().filter_map(|obj| {
            let transformed = obj.clone().with_points(obj.transformed_points());
            transformed.bounds()
        }))
    }
}
