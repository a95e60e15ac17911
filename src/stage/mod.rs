//! The stage: pages, the stack controller and the virtual clock that drives them.
//!
//! Nothing happens between calls to [`Stage::update`]. Every wait (sequence chain
//! delays, element finished signals, stack hand-offs) is a timer on the stage clock,
//! dispatched exactly at its due time while the animator is advanced up to it.

pub(crate) mod context;
pub(crate) mod requests;
pub(crate) mod scheduler;
pub(crate) mod stack;

use crate::{
    animation::tween::Animator,
    events::{ElementSignals, Journal, PageSignals, TimedEvent},
    foundation::{
        core::{ElementId, PageId},
        error::{PageflowError, PageflowResult, ensure_seconds},
    },
    host::NodeHost,
    page::{Page, PageDef},
    stage::{
        context::StageCtx,
        requests::PageRequests,
        scheduler::{Scheduler, Task},
        stack::{PageStack, RejectReason, StackOutcome},
    },
};

/// Default wait before the configured first page opens.
pub const DEFAULT_FIRST_PAGE_DELAY: f64 = 0.5;

/// Stage-wide switches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct StageSettings {
    /// Log applied stack requests at info level instead of debug.
    pub log_requests: bool,
    /// Keep a [`Journal`] of fired signals.
    pub record_events: bool,
}

impl Default for StageSettings {
    fn default() -> Self {
        Self {
            log_requests: false,
            record_events: true,
        }
    }
}

/// Owns the pages and the stack controller, and borrows nothing: the host scene graph
/// and the animator are owned too, so one value drives a whole UI.
#[derive(Debug)]
pub struct Stage<H: NodeHost, A: Animator> {
    host: H,
    animator: A,
    timers: Scheduler,
    journal: Journal,
    pages: Vec<Page>,
    stack: PageStack,
    first_page: Option<(PageId, f64)>,
    started: bool,
}

impl<H: NodeHost, A: Animator> Stage<H, A> {
    pub fn new(host: H, animator: A) -> Self {
        Self::with_settings(host, animator, StageSettings::default())
    }

    pub fn with_settings(host: H, animator: A, settings: StageSettings) -> Self {
        Self {
            host,
            animator,
            timers: Scheduler::new(),
            journal: Journal::new(settings.record_events),
            pages: Vec::new(),
            stack: PageStack::new(settings.log_requests),
            first_page: None,
            started: false,
        }
    }

    /// Add a page and register it with the stack controller.
    pub fn add_page(&mut self, def: PageDef) -> PageflowResult<PageId> {
        let id = self.add_unregistered_page(def)?;
        self.stack.register(id);
        Ok(id)
    }

    /// Add a page the controller does not know about. Requests naming it still work but
    /// log a warning, and [`Stage::start`] does not initialize it.
    pub fn add_unregistered_page(&mut self, def: PageDef) -> PageflowResult<PageId> {
        if self.page_id(&def.name).is_some() {
            return Err(PageflowError::validation(format!(
                "duplicate page name '{}'",
                def.name
            )));
        }
        let id = PageId(self.pages.len() as u32);
        self.pages.push(Page::build(id, def)?);
        Ok(id)
    }

    pub fn register(&mut self, page: PageId) -> PageflowResult<()> {
        if self.pages.get(page.index()).is_none() {
            return Err(PageflowError::validation(format!("unknown page {page}")));
        }
        self.stack.register(page);
        Ok(())
    }

    /// Open `page` with `keep_current_and_open` `delay` seconds after [`Stage::start`].
    pub fn set_first_page(&mut self, page: PageId, delay: f64) -> PageflowResult<()> {
        if self.pages.get(page.index()).is_none() {
            return Err(PageflowError::validation(format!("unknown page {page}")));
        }
        ensure_seconds("first page delay", delay)?;
        self.first_page = Some((page, delay));
        Ok(())
    }

    /// Initialize every registered page, then schedule the first page if one is set.
    #[tracing::instrument(skip(self))]
    pub fn start(&mut self) {
        if self.started {
            tracing::warn!("stage already started");
            return;
        }
        self.started = true;

        let registered: Vec<PageId> = self.stack.registered().collect();
        let (pages, _, mut ctx) = self.split();
        for id in registered {
            pages[id.index()].init(&mut ctx);
        }

        match self.first_page {
            Some((page, delay)) if delay > 0.0 => {
                self.timers.schedule(delay, Task::OpenFirstPage { page });
            }
            Some((page, _)) => self.dispatch(Task::OpenFirstPage { page }),
            None => tracing::debug!("no first page configured"),
        }
    }

    /// Advance the clock by `dt` seconds, firing every timer that comes due on the way.
    pub fn update(&mut self, dt: f64) {
        if !dt.is_finite() || dt < 0.0 {
            tracing::warn!(dt, "ignoring invalid time step");
            return;
        }
        let target = self.timers.now() + dt;
        while let Some(due) = self.timers.next_due().filter(|&due| due <= target) {
            let slice = due - self.timers.now();
            if slice > 0.0 {
                self.animator.advance(slice, &mut self.host);
            }
            let Some(task) = self.timers.pop_due(target) else {
                break;
            };
            self.dispatch(task);
        }
        let rest = target - self.timers.now();
        if rest > 0.0 {
            self.animator.advance(rest, &mut self.host);
        }
        self.timers.advance_to(target);
    }

    pub fn now(&self) -> f64 {
        self.timers.now()
    }

    /// Timers waiting on the clock, superseded ones included.
    pub fn pending_timers(&self) -> usize {
        self.timers.pending()
    }

    #[tracing::instrument(skip(self))]
    pub fn keep_current_and_open(&mut self, page: PageId) -> StackOutcome {
        let (pages, stack, mut ctx) = self.split();
        stack.keep_current_and_open(page, pages, &mut ctx)
    }

    #[tracing::instrument(skip(self))]
    pub fn close_current_and_open(&mut self, page: PageId) -> StackOutcome {
        let (pages, stack, mut ctx) = self.split();
        stack.close_current_and_open(page, pages, &mut ctx)
    }

    #[tracing::instrument(skip(self))]
    pub fn close_current_only(&mut self, page: PageId) -> StackOutcome {
        let (pages, stack, mut ctx) = self.split();
        stack.close_current_only(page, pages, &mut ctx)
    }

    #[tracing::instrument(skip(self))]
    pub fn force_close(&mut self, page: PageId) -> StackOutcome {
        let (pages, stack, mut ctx) = self.split();
        stack.force_close(page, pages, &mut ctx)
    }

    /// Snap `page` to fully shown, bypassing transitions and the stack.
    pub fn show_without_animation(&mut self, page: PageId) -> StackOutcome {
        let (pages, _, mut ctx) = self.split();
        match pages.get_mut(page.index()) {
            Some(p) => {
                p.show_without_animation(&mut ctx);
                StackOutcome::Applied
            }
            None => unknown_page(page),
        }
    }

    /// Snap `page` to hidden, bypassing transitions and the stack.
    pub fn hide_without_animation(&mut self, page: PageId) -> StackOutcome {
        let (pages, _, mut ctx) = self.split();
        match pages.get_mut(page.index()) {
            Some(p) => {
                p.hide_without_animation(&mut ctx);
                StackOutcome::Applied
            }
            None => unknown_page(page),
        }
    }

    /// Request surface on behalf of `page`, for code that belongs to that page.
    pub fn requests(&mut self, page: PageId) -> PageRequests<'_, H, A> {
        PageRequests::new(self, page)
    }

    pub fn page(&self, page: PageId) -> Option<&Page> {
        self.pages.get(page.index())
    }

    pub fn page_by_name(&self, name: &str) -> Option<&Page> {
        self.pages.iter().find(|p| p.name() == name)
    }

    pub fn page_id(&self, name: &str) -> Option<PageId> {
        self.page_by_name(name).map(Page::id)
    }

    pub fn pages(&self) -> &[Page] {
        &self.pages
    }

    pub fn is_registered(&self, page: PageId) -> bool {
        self.stack.is_registered(page)
    }

    pub fn page_signals(&mut self, page: PageId) -> Option<&mut PageSignals> {
        self.pages.get_mut(page.index()).map(Page::signals_mut)
    }

    pub fn element_signals(&mut self, element: ElementId) -> Option<&mut ElementSignals> {
        self.pages
            .get_mut(element.page.index())?
            .element_mut(element.index as usize)
            .map(|e| e.signals_mut())
    }

    /// Open pages, bottom first.
    pub fn open_pages(&self) -> &[PageId] {
        self.stack.open()
    }

    pub fn top(&self) -> Option<PageId> {
        self.stack.top()
    }

    pub fn events(&self) -> &[TimedEvent] {
        self.journal.events()
    }

    pub fn take_events(&mut self) -> Vec<TimedEvent> {
        self.journal.take()
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn animator(&self) -> &A {
        &self.animator
    }

    pub(crate) fn deactivate_interactable(&mut self, page: PageId) {
        let (pages, _, mut ctx) = self.split();
        match pages.get_mut(page.index()) {
            Some(p) => p.deactivate_interactable(&mut ctx),
            None => {
                let _ = unknown_page(page);
            }
        }
    }

    fn split(&mut self) -> (&mut [Page], &mut PageStack, StageCtx<'_>) {
        let ctx = StageCtx {
            host: &mut self.host,
            animator: &mut self.animator,
            timers: &mut self.timers,
            journal: &mut self.journal,
        };
        (self.pages.as_mut_slice(), &mut self.stack, ctx)
    }

    fn dispatch(&mut self, task: Task) {
        let (pages, stack, mut ctx) = self.split();
        match task {
            Task::ElementFinished {
                element,
                direction,
                epoch,
            } => match pages.get_mut(element.page.index()) {
                Some(page) => {
                    page.element_finished(element.index as usize, direction, epoch, &mut ctx)
                }
                None => tracing::warn!(%element, "finished signal for unknown page"),
            },
            Task::ResumeSequence { page, epoch } => {
                if let Some(p) = pages.get_mut(page.index()) {
                    p.resume(epoch, &mut ctx);
                }
            }
            Task::ShowPage { page, epoch } => {
                let Some(p) = pages.get_mut(page.index()) else {
                    return;
                };
                if p.epoch() != epoch || !stack.contains(page) {
                    tracing::debug!(page = %p.name(), "dropping superseded deferred show");
                    return;
                }
                p.show(0.0, &mut ctx);
            }
            Task::FocusPage { page, focus_epoch } => {
                let Some(p) = pages.get_mut(page.index()) else {
                    return;
                };
                if p.focus_epoch() != focus_epoch || stack.top() != Some(page) {
                    tracing::debug!(page = %p.name(), "dropping superseded focus hand-off");
                    return;
                }
                p.on_focus(&mut ctx);
            }
            Task::OpenFirstPage { page } => {
                if !stack.keep_current_and_open(page, pages, &mut ctx).is_applied() {
                    tracing::warn!(%page, "first page could not be opened");
                }
            }
        }
    }
}

fn unknown_page(page: PageId) -> StackOutcome {
    tracing::warn!(%page, "request for a page that does not exist");
    StackOutcome::Rejected(RejectReason::UnknownPage)
}

#[cfg(test)]
#[path = "../../tests/unit/stage/stage.rs"]
mod tests;
