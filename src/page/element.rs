use crate::{
    events::{ElementSignal, ElementSignals, UiEvent},
    foundation::core::{ElementId, NodeId},
    stage::{context::StageCtx, scheduler::Task},
    transition::{
        player::{Direction, TransitionPlayer},
        spec::TransitionSpec,
    },
};

/// Declarative description of one element, consumed by [`crate::PageDef`].
#[derive(Clone, Debug, PartialEq)]
pub struct ElementDef {
    pub name: String,
    pub node: NodeId,
    pub show: Vec<TransitionSpec>,
    pub hide: Vec<TransitionSpec>,
    /// Wait before the next element starts showing; defaults to this element's show duration.
    pub delay_after_show: Option<f64>,
    /// Wait before the next element starts hiding; defaults to this element's hide duration.
    pub delay_after_hide: Option<f64>,
}

impl ElementDef {
    pub fn new(name: impl Into<String>, node: NodeId) -> Self {
        Self {
            name: name.into(),
            node,
            show: Vec::new(),
            hide: Vec::new(),
            delay_after_show: None,
            delay_after_hide: None,
        }
    }

    pub fn show(mut self, spec: TransitionSpec) -> Self {
        self.show.push(spec);
        self
    }

    pub fn hide(mut self, spec: TransitionSpec) -> Self {
        self.hide.push(spec);
        self
    }

    pub fn delays(mut self, after_show: f64, after_hide: f64) -> Self {
        self.delay_after_show = Some(after_show);
        self.delay_after_hide = Some(after_hide);
        self
    }
}

/// A visual node with show/hide transitions and completion signals.
#[derive(Debug)]
pub struct Element {
    id: ElementId,
    name: String,
    node: NodeId,
    player: TransitionPlayer,
    epoch: u64,
    signals: ElementSignals,
}

impl Element {
    pub(crate) fn new(id: ElementId, name: String, node: NodeId, player: TransitionPlayer) -> Self {
        Self {
            id,
            name,
            node,
            player,
            epoch: 0,
            signals: ElementSignals::default(),
        }
    }

    pub fn id(&self) -> ElementId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn node(&self) -> NodeId {
        self.node
    }

    pub fn player(&self) -> &TransitionPlayer {
        &self.player
    }

    pub fn signals_mut(&mut self) -> &mut ElementSignals {
        &mut self.signals
    }

    pub fn show_duration(&self) -> f64 {
        self.player.show_duration()
    }

    pub fn hide_duration(&self) -> f64 {
        self.player.hide_duration()
    }

    pub fn duration(&self, direction: Direction) -> f64 {
        self.player.duration(direction)
    }

    /// Toggle the node directly. Pending finished signals from an earlier show or hide
    /// are cancelled.
    pub(crate) fn set_active(&mut self, active: bool, ctx: &mut StageCtx<'_>) {
        self.epoch += 1;
        ctx.host.set_active(self.node, active);
    }

    /// Show or hide: enable the node, start the transitions, fire the started signal
    /// now and the finished signal once the longest transition has run.
    pub(crate) fn play(&mut self, direction: Direction, ctx: &mut StageCtx<'_>) {
        self.epoch += 1;
        // the node must be enabled for the transition to be visible, hide included
        ctx.host.set_active(self.node, true);
        self.player
            .play(direction, self.node, &mut *ctx.host, &mut *ctx.animator);

        let (started, _) = signals_for(direction);
        self.fire(started, ctx);

        if direction == Direction::Hide && !self.player.has_hide_transitions() {
            ctx.host.set_active(self.node, false);
        }

        let duration = self.player.duration(direction);
        if duration > 0.0 {
            ctx.after(
                duration,
                Task::ElementFinished {
                    element: self.id,
                    direction,
                    epoch: self.epoch,
                },
            );
        } else {
            self.finish(direction, self.epoch, ctx);
        }
    }

    pub(crate) fn finish(&mut self, direction: Direction, epoch: u64, ctx: &mut StageCtx<'_>) {
        if epoch != self.epoch {
            tracing::debug!(element = %self.name, ?direction, "dropping superseded finished signal");
            return;
        }
        let (_, finished) = signals_for(direction);
        self.fire(finished, ctx);
    }

    fn fire(&mut self, signal: ElementSignal, ctx: &mut StageCtx<'_>) {
        ctx.record(UiEvent::Element {
            element: self.id,
            signal,
        });
        self.signals.get_mut(signal).emit(self.id);
    }
}

fn signals_for(direction: Direction) -> (ElementSignal, ElementSignal) {
    match direction {
        Direction::Show => (ElementSignal::Show, ElementSignal::ShowFinished),
        Direction::Hide => (ElementSignal::Hide, ElementSignal::HideFinished),
    }
}
