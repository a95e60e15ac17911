//! Pages and their show/hide sequencing.
//!
//! A page walks its elements one at a time, in the configured [`Order`], waiting each
//! element's chain delay before starting the next. The last element visited is special:
//! the page waits for that element's own animation to end before it reports the
//! sequence finished. [`Page::show_duration`] and [`Page::hide_duration`] give the same
//! timing in closed form.

pub(crate) mod element;
pub(crate) mod sequence;

use std::cell::OnceCell;

use crate::{
    events::{PageSignal, PageSignals, UiEvent},
    foundation::{
        core::{ElementId, NodeId, PageId},
        error::{PageflowError, PageflowResult, ensure_seconds},
    },
    page::{
        element::{Element, ElementDef},
        sequence::{Cursor, Order, sequence_duration},
    },
    stage::{context::StageCtx, scheduler::Task},
    transition::player::{Direction, TransitionPlayer},
};

/// Declarative description of a page, consumed by [`crate::Stage::add_page`].
#[derive(Clone, Debug, PartialEq)]
pub struct PageDef {
    pub name: String,
    pub node: NodeId,
    pub elements: Vec<ElementDef>,
    pub show_order: Order,
    pub hide_order: Order,
    /// Disable the page node once its hide sequence finished.
    pub deactivate_on_hide_finished: bool,
    /// Snap to hidden (without animation) during [`crate::Stage::start`].
    pub hide_on_init: bool,
}

impl PageDef {
    pub fn new(name: impl Into<String>, node: NodeId) -> Self {
        Self {
            name: name.into(),
            node,
            elements: Vec::new(),
            show_order: Order::Forward,
            hide_order: Order::Forward,
            deactivate_on_hide_finished: true,
            hide_on_init: true,
        }
    }

    pub fn element(mut self, element: ElementDef) -> Self {
        self.elements.push(element);
        self
    }

    pub fn show_order(mut self, order: Order) -> Self {
        self.show_order = order;
        self
    }

    pub fn hide_order(mut self, order: Order) -> Self {
        self.hide_order = order;
        self
    }

    pub fn deactivate_on_hide_finished(mut self, yes: bool) -> Self {
        self.deactivate_on_hide_finished = yes;
        self
    }

    pub fn hide_on_init(mut self, yes: bool) -> Self {
        self.hide_on_init = yes;
        self
    }

    pub fn validate(&self) -> PageflowResult<()> {
        if self.name.trim().is_empty() {
            return Err(PageflowError::validation("page name must be non-empty"));
        }
        for (i, e) in self.elements.iter().enumerate() {
            if e.name.trim().is_empty() {
                return Err(PageflowError::validation(format!(
                    "page '{}': element {i} has an empty name",
                    self.name
                )));
            }
            let what = |field: &str| format!("page '{}' element '{}' {field}", self.name, e.name);
            if let Some(d) = e.delay_after_show {
                ensure_seconds(&what("delay_after_show"), d)?;
            }
            if let Some(d) = e.delay_after_hide {
                ensure_seconds(&what("delay_after_hide"), d)?;
            }
        }
        Ok(())
    }
}

/// Lifecycle phase of a page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PagePhase {
    #[default]
    Hidden,
    Showing,
    Shown,
    Hiding,
}

#[derive(Debug)]
struct Slot {
    element: Element,
    delay_after_show: f64,
    delay_after_hide: f64,
}

impl Slot {
    fn chain_delay(&self, direction: Direction) -> f64 {
        match direction {
            Direction::Show => self.delay_after_show,
            Direction::Hide => self.delay_after_hide,
        }
    }
}

/// A screen made of sequenced elements.
#[derive(Debug)]
pub struct Page {
    id: PageId,
    name: String,
    node: NodeId,
    slots: Vec<Slot>,
    show_order: Order,
    hide_order: Order,
    deactivate_on_hide_finished: bool,
    hide_on_init: bool,
    durations: OnceCell<(f64, f64)>,
    phase: PagePhase,
    cursor: Option<Cursor>,
    epoch: u64,
    focus_epoch: u64,
    focused: bool,
    interactable: bool,
    signals: PageSignals,
}

impl Page {
    pub(crate) fn build(id: PageId, def: PageDef) -> PageflowResult<Self> {
        def.validate()?;
        let slots = def
            .elements
            .into_iter()
            .enumerate()
            .map(|(index, e)| {
                let player = TransitionPlayer::new(e.show, e.hide);
                let delay_after_show = e.delay_after_show.unwrap_or_else(|| player.show_duration());
                let delay_after_hide = e.delay_after_hide.unwrap_or_else(|| player.hide_duration());
                let element_id = ElementId {
                    page: id,
                    index: index as u32,
                };
                Slot {
                    element: Element::new(element_id, e.name, e.node, player),
                    delay_after_show,
                    delay_after_hide,
                }
            })
            .collect();
        Ok(Self {
            id,
            name: def.name,
            node: def.node,
            slots,
            show_order: def.show_order,
            hide_order: def.hide_order,
            deactivate_on_hide_finished: def.deactivate_on_hide_finished,
            hide_on_init: def.hide_on_init,
            durations: OnceCell::new(),
            phase: PagePhase::Hidden,
            cursor: None,
            epoch: 0,
            focus_epoch: 0,
            focused: false,
            interactable: false,
            signals: PageSignals::default(),
        })
    }

    pub fn id(&self) -> PageId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn phase(&self) -> PagePhase {
        self.phase
    }

    pub fn is_interactable(&self) -> bool {
        self.interactable
    }

    /// Whether the stack controller currently treats this page as the focused one.
    pub fn has_focus(&self) -> bool {
        self.focused
    }

    pub fn order(&self, direction: Direction) -> Order {
        match direction {
            Direction::Show => self.show_order,
            Direction::Hide => self.hide_order,
        }
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn element(&self, index: usize) -> Option<&Element> {
        self.slots.get(index).map(|s| &s.element)
    }

    pub fn element_mut(&mut self, index: usize) -> Option<&mut Element> {
        self.slots.get_mut(index).map(|s| &mut s.element)
    }

    pub fn elements(&self) -> impl Iterator<Item = &Element> {
        self.slots.iter().map(|s| &s.element)
    }

    /// Configured chain delay of element `index`, after defaults were resolved.
    pub fn chain_delay(&self, index: usize, direction: Direction) -> Option<f64> {
        self.slots.get(index).map(|s| s.chain_delay(direction))
    }

    pub fn signals_mut(&mut self) -> &mut PageSignals {
        &mut self.signals
    }

    /// Time from `show(0)` to the show-finished signal.
    pub fn show_duration(&self) -> f64 {
        self.durations().0
    }

    /// Time from `hide(0)` to the hide-finished signal.
    pub fn hide_duration(&self) -> f64 {
        self.durations().1
    }

    pub fn duration(&self, direction: Direction) -> f64 {
        match direction {
            Direction::Show => self.show_duration(),
            Direction::Hide => self.hide_duration(),
        }
    }

    fn durations(&self) -> (f64, f64) {
        *self.durations.get_or_init(|| {
            let compute = |direction: Direction| {
                sequence_duration(
                    self.order(direction),
                    self.slots.len(),
                    |i| self.slots[i].chain_delay(direction),
                    |i| self.slots[i].element.duration(direction),
                )
            };
            (compute(Direction::Show), compute(Direction::Hide))
        })
    }

    pub(crate) fn epoch(&self) -> u64 {
        self.epoch
    }

    pub(crate) fn focus_epoch(&self) -> u64 {
        self.focus_epoch
    }

    pub(crate) fn init(&mut self, ctx: &mut StageCtx<'_>) {
        self.fire(PageSignal::Init, ctx);
        if self.hide_on_init {
            self.hide_without_animation(ctx);
        }
    }

    pub(crate) fn show(&mut self, delay: f64, ctx: &mut StageCtx<'_>) {
        ctx.host.set_active(self.node, true);
        // elements are switched back on one by one as the sequence reaches them
        self.set_all_elements_active(false, ctx);
        self.set_interactable(false, ctx);
        self.begin(Direction::Show, delay, ctx);
    }

    pub(crate) fn hide(&mut self, delay: f64, ctx: &mut StageCtx<'_>) {
        ctx.host.set_active(self.node, true);
        self.drop_focus();
        self.set_interactable(false, ctx);
        // outgoing elements must be visible for their hide transitions
        self.set_all_elements_active(true, ctx);
        self.begin(Direction::Hide, delay, ctx);
    }

    pub(crate) fn show_without_animation(&mut self, ctx: &mut StageCtx<'_>) {
        self.cancel_sequence();
        self.set_all_elements_active(true, ctx);
        self.phase = PagePhase::Shown;
        self.focused = true;
        self.set_interactable(true, ctx);
    }

    pub(crate) fn hide_without_animation(&mut self, ctx: &mut StageCtx<'_>) {
        self.cancel_sequence();
        self.set_all_elements_active(false, ctx);
        self.phase = PagePhase::Hidden;
        self.drop_focus();
        self.set_interactable(false, ctx);
    }

    pub(crate) fn on_focus(&mut self, ctx: &mut StageCtx<'_>) {
        self.focused = true;
        // a page still mid-sequence picks interactability up when its sequence ends
        let ready = self.phase == PagePhase::Shown;
        self.set_interactable(ready, ctx);
        self.fire(PageSignal::Focus, ctx);
    }

    pub(crate) fn on_lost_focus(&mut self, ctx: &mut StageCtx<'_>) {
        self.drop_focus();
        self.set_interactable(false, ctx);
        self.fire(PageSignal::LostFocus, ctx);
    }

    /// Mark the page as the stack's focus target without firing a signal; used when the
    /// controller pushes a page.
    pub(crate) fn grant_focus(&mut self) {
        self.focused = true;
    }

    pub(crate) fn deactivate_interactable(&mut self, ctx: &mut StageCtx<'_>) {
        self.set_interactable(false, ctx);
    }

    pub(crate) fn resume(&mut self, epoch: u64, ctx: &mut StageCtx<'_>) {
        if epoch != self.epoch {
            tracing::debug!(page = %self.name, "dropping superseded sequence step");
            return;
        }
        self.run_sequence(ctx);
    }

    pub(crate) fn element_finished(
        &mut self,
        index: usize,
        direction: Direction,
        epoch: u64,
        ctx: &mut StageCtx<'_>,
    ) {
        match self.slots.get_mut(index) {
            Some(slot) => slot.element.finish(direction, epoch, ctx),
            None => tracing::warn!(page = %self.name, index, "finished signal for unknown element"),
        }
    }

    fn begin(&mut self, direction: Direction, delay: f64, ctx: &mut StageCtx<'_>) {
        if direction == Direction::Show && self.phase == PagePhase::Hiding {
            // every HideStart is paired with a HideFinished; the node stays active
            self.fire(PageSignal::HideFinished, ctx);
        }
        self.epoch += 1;
        self.cursor = Some(Cursor::start(direction));
        let (phase, started) = match direction {
            Direction::Show => (PagePhase::Showing, PageSignal::ShowStart),
            Direction::Hide => (PagePhase::Hiding, PageSignal::HideStart),
        };
        self.phase = phase;
        self.fire(started, ctx);

        if delay > 0.0 {
            ctx.after(
                delay,
                Task::ResumeSequence {
                    page: self.id,
                    epoch: self.epoch,
                },
            );
        } else {
            self.run_sequence(ctx);
        }
    }

    fn run_sequence(&mut self, ctx: &mut StageCtx<'_>) {
        let Some(mut cursor) = self.cursor else {
            return;
        };
        let direction = cursor.direction;
        let order = self.order(direction);
        let len = self.slots.len();

        while cursor.step < len {
            let slot = &mut self.slots[order.index_at(len, cursor.step)];
            slot.element.play(direction, ctx);
            cursor.step += 1;

            let wait = if cursor.step == len {
                slot.element.duration(direction)
            } else {
                slot.chain_delay(direction)
            };
            if wait > 0.0 {
                self.cursor = Some(cursor);
                ctx.after(
                    wait,
                    Task::ResumeSequence {
                        page: self.id,
                        epoch: self.epoch,
                    },
                );
                return;
            }
        }

        if len == 0 {
            tracing::debug!(page = %self.name, "no elements in page");
        }
        self.cursor = None;
        self.complete(direction, ctx);
    }

    fn complete(&mut self, direction: Direction, ctx: &mut StageCtx<'_>) {
        match direction {
            Direction::Show => {
                self.phase = PagePhase::Shown;
                self.fire(PageSignal::ShowFinished, ctx);
                let focused = self.focused;
                self.set_interactable(focused, ctx);
            }
            Direction::Hide => {
                self.phase = PagePhase::Hidden;
                self.fire(PageSignal::HideFinished, ctx);
                if self.deactivate_on_hide_finished {
                    ctx.host.set_active(self.node, false);
                }
            }
        }
    }

    fn cancel_sequence(&mut self) {
        self.epoch += 1;
        self.cursor = None;
    }

    fn drop_focus(&mut self) {
        self.focused = false;
        self.focus_epoch += 1;
    }

    fn set_all_elements_active(&mut self, active: bool, ctx: &mut StageCtx<'_>) {
        for slot in &mut self.slots {
            slot.element.set_active(active, ctx);
        }
    }

    fn set_interactable(&mut self, interactable: bool, ctx: &mut StageCtx<'_>) {
        self.interactable = interactable;
        // both flags, otherwise raw pointer handlers on children still receive input
        ctx.host.set_interactable(self.node, interactable);
        ctx.host.set_blocks_input(self.node, interactable);
    }

    fn fire(&mut self, signal: PageSignal, ctx: &mut StageCtx<'_>) {
        ctx.record(UiEvent::Page {
            page: self.id,
            signal,
        });
        self.signals.get_mut(signal).emit(self.id);
    }
}
