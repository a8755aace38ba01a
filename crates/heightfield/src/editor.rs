use crate::events::{FieldEvent, FieldObserver, FieldObservers};
use crate::grid::Heightfield;

/// Applies edits to a heightfield and notifies subscribers after each one.
///
/// The editor owns the field for the duration of a session; readers go
/// through [`FieldEditor::field`].
pub struct FieldEditor {
    field: Heightfield,
    observers: FieldObservers,
}

impl FieldEditor {
    pub fn new(field: Heightfield) -> FieldEditor {
        FieldEditor {
            field,
            observers: FieldObservers::new(),
        }
    }

    pub fn field(&self) -> &Heightfield {
        &self.field
    }

    pub fn subscribe(&mut self, observer: FieldObserver) {
        self.observers.subscribe(observer);
    }

    /// Set one cell. Panics when `(x, y)` is outside the field, so callers
    /// validate coordinates first.
    pub fn set_altitude(&mut self, x: usize, y: usize, altitude: f32) {
        self.field.set_altitude(x, y, altitude);
        self.observers
            .notify(&FieldEvent::CellChanged { x, y, altitude });
    }

    pub fn fill(&mut self, altitude: f32) {
        self.field.fill(altitude);
        self.observers.notify(&FieldEvent::Filled { altitude });
    }

    pub fn raise_rect(&mut self, x: usize, y: usize, width: usize, height: usize, delta: f32) {
        self.field.raise_rect(x, y, width, height, delta);
        self.observers.notify(&FieldEvent::RectRaised {
            x,
            y,
            width,
            height,
            delta,
        });
    }
}
