//! Lifecycle signals and the stage journal.
//!
//! Every page and element owns a set of [`Signal`] observer lists. Listeners run
//! synchronously, in registration order, at the moment the signal fires. The stage
//! additionally records each fired signal with its virtual timestamp in a [`Journal`].

use crate::foundation::core::{ElementId, PageId};

/// Page lifecycle signals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageSignal {
    Init,
    Focus,
    LostFocus,
    ShowStart,
    HideStart,
    ShowFinished,
    HideFinished,
}

impl PageSignal {
    pub const ALL: [PageSignal; 7] = [
        PageSignal::Init,
        PageSignal::Focus,
        PageSignal::LostFocus,
        PageSignal::ShowStart,
        PageSignal::HideStart,
        PageSignal::ShowFinished,
        PageSignal::HideFinished,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            PageSignal::Init => "init",
            PageSignal::Focus => "focus",
            PageSignal::LostFocus => "lost_focus",
            PageSignal::ShowStart => "show_start",
            PageSignal::HideStart => "hide_start",
            PageSignal::ShowFinished => "show_finished",
            PageSignal::HideFinished => "hide_finished",
        }
    }
}

/// Element lifecycle signals.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ElementSignal {
    Show,
    Hide,
    ShowFinished,
    HideFinished,
}

impl ElementSignal {
    pub const ALL: [ElementSignal; 4] = [
        ElementSignal::Show,
        ElementSignal::Hide,
        ElementSignal::ShowFinished,
        ElementSignal::HideFinished,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ElementSignal::Show => "show",
            ElementSignal::Hide => "hide",
            ElementSignal::ShowFinished => "show_finished",
            ElementSignal::HideFinished => "hide_finished",
        }
    }
}

/// A fired signal together with its source.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum UiEvent {
    Page { page: PageId, signal: PageSignal },
    Element {
        element: ElementId,
        signal: ElementSignal,
    },
}

/// A [`UiEvent`] stamped with the stage time it fired at.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize)]
pub struct TimedEvent {
    pub at: f64,
    pub event: UiEvent,
}

type Listener<T> = Box<dyn FnMut(T)>;

/// Observer list for one signal.
pub struct Signal<T> {
    listeners: Vec<Listener<T>>,
}

impl<T> Default for Signal<T> {
    fn default() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }
}

impl<T> std::fmt::Debug for Signal<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Signal")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl<T: Copy> Signal<T> {
    pub fn connect(&mut self, listener: impl FnMut(T) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    pub fn emit(&mut self, source: T) {
        for listener in &mut self.listeners {
            listener(source);
        }
    }

    pub fn clear(&mut self) {
        self.listeners.clear();
    }

    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }
}

/// The signals a page exposes, indexed by [`PageSignal`].
#[derive(Debug, Default)]
pub struct PageSignals {
    slots: [Signal<PageId>; 7],
}

impl PageSignals {
    pub fn get_mut(&mut self, signal: PageSignal) -> &mut Signal<PageId> {
        &mut self.slots[signal as usize]
    }

    /// Shorthand for `get_mut(signal).connect(listener)`.
    pub fn on(&mut self, signal: PageSignal, listener: impl FnMut(PageId) + 'static) {
        self.get_mut(signal).connect(listener);
    }
}

/// The signals an element exposes, indexed by [`ElementSignal`].
#[derive(Debug, Default)]
pub struct ElementSignals {
    slots: [Signal<ElementId>; 4],
}

impl ElementSignals {
    pub fn get_mut(&mut self, signal: ElementSignal) -> &mut Signal<ElementId> {
        &mut self.slots[signal as usize]
    }

    pub fn on(&mut self, signal: ElementSignal, listener: impl FnMut(ElementId) + 'static) {
        self.get_mut(signal).connect(listener);
    }
}

/// Time-ordered record of fired signals.
#[derive(Clone, Debug, Default)]
pub struct Journal {
    enabled: bool,
    events: Vec<TimedEvent>,
}

impl Journal {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            events: Vec::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn record(&mut self, at: f64, event: UiEvent) {
        tracing::trace!(at, ?event, "signal");
        if self.enabled {
            self.events.push(TimedEvent { at, event });
        }
    }

    pub fn events(&self) -> &[TimedEvent] {
        &self.events
    }

    pub fn take(&mut self) -> Vec<TimedEvent> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
#[path = "../tests/unit/events/events.rs"]
mod tests;
