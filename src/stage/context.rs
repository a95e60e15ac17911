use crate::{
    animation::tween::Animator,
    events::{Journal, UiEvent},
    host::NodeHost,
    stage::scheduler::{Scheduler, Task},
};

/// Borrowed view of the stage's collaborators, handed to pages and elements.
pub(crate) struct StageCtx<'a> {
    pub(crate) host: &'a mut dyn NodeHost,
    pub(crate) animator: &'a mut dyn Animator,
    pub(crate) timers: &'a mut Scheduler,
    pub(crate) journal: &'a mut Journal,
}

impl StageCtx<'_> {
    pub(crate) fn now(&self) -> f64 {
        self.timers.now()
    }

    pub(crate) fn after(&mut self, delay: f64, task: Task) {
        self.timers.schedule(delay, task);
    }

    pub(crate) fn record(&mut self, event: UiEvent) {
        let now = self.now();
        self.journal.record(now, event);
    }
}
