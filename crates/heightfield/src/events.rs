/// A completed edit on a heightfield.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldEvent {
    /// One cell took a new altitude.
    CellChanged { x: usize, y: usize, altitude: f32 },
    /// Every cell took the same altitude.
    Filled { altitude: f32 },
    /// A rectangle was raised, or dug for negative deltas.
    RectRaised {
        x: usize,
        y: usize,
        width: usize,
        height: usize,
        delta: f32,
    },
}

/// Subscriber callback, boxed so callers can capture state.
pub type FieldObserver = Box<dyn FnMut(&FieldEvent)>;

/// A plain subscriber list. Callbacks run synchronously, in subscription
/// order, after the edit they describe has been applied. There is no
/// unsubscription: lists live as long as the editing session.
#[derive(Default)]
pub struct FieldObservers {
    subscribers: Vec<FieldObserver>,
}

impl FieldObservers {
    pub fn new() -> FieldObservers {
        FieldObservers {
            subscribers: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, observer: FieldObserver) {
        self.subscribers.push(observer);
    }

    pub fn notify(&mut self, event: &FieldEvent) {
        for subscriber in &mut self.subscribers {
            subscriber(event);
        }
    }
}
