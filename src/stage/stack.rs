use std::collections::BTreeSet;

use crate::{
    foundation::core::PageId,
    page::Page,
    stage::{context::StageCtx, scheduler::Task},
};

/// The four page-stack requests.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StackRequest {
    KeepCurrentAndOpen,
    CloseCurrentAndOpen,
    CloseCurrentOnly,
    ForceClose,
}

/// Why a request was turned into a no-op.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RejectReason {
    /// The id does not name a page of this stage.
    UnknownPage,
    /// Opening a page that is already on the stack.
    AlreadyOpen,
    /// Closing a page that is not the top of the stack.
    NotTop,
    /// Force-closing a page that is not on the stack.
    NotOpen,
    /// Closing while nothing is open.
    StackEmpty,
}

/// Result of a stack request. Rejections are also logged as warnings.
#[must_use]
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub enum StackOutcome {
    Applied,
    Rejected(RejectReason),
}

impl StackOutcome {
    pub fn is_applied(self) -> bool {
        self == Self::Applied
    }
}

/// LIFO stack of open pages plus the set of pages registered with the controller.
#[derive(Debug, Default)]
pub(crate) struct PageStack {
    known: BTreeSet<PageId>,
    open: Vec<PageId>,
    log_requests: bool,
}

impl PageStack {
    pub(crate) fn new(log_requests: bool) -> Self {
        Self {
            log_requests,
            ..Self::default()
        }
    }

    pub(crate) fn register(&mut self, page: PageId) {
        self.known.insert(page);
    }

    pub(crate) fn is_registered(&self, page: PageId) -> bool {
        self.known.contains(&page)
    }

    pub(crate) fn registered(&self) -> impl Iterator<Item = PageId> + '_ {
        self.known.iter().copied()
    }

    pub(crate) fn open(&self) -> &[PageId] {
        &self.open
    }

    pub(crate) fn top(&self) -> Option<PageId> {
        self.open.last().copied()
    }

    pub(crate) fn contains(&self, page: PageId) -> bool {
        self.open.contains(&page)
    }

    pub(crate) fn keep_current_and_open(
        &mut self,
        page: PageId,
        pages: &mut [Page],
        ctx: &mut StageCtx<'_>,
    ) -> StackOutcome {
        let request = StackRequest::KeepCurrentAndOpen;
        if let Some(reason) = self.check(request, page, pages) {
            return StackOutcome::Rejected(reason);
        }
        if self.contains(page) {
            return self.reject(request, pages, page, RejectReason::AlreadyOpen);
        }

        if let Some(top) = self.top() {
            pages[top.index()].on_lost_focus(ctx);
        }
        let target = &mut pages[page.index()];
        ctx.host.set_as_last_sibling(target.node());
        target.grant_focus();
        target.show(0.0, ctx);
        self.open.push(page);

        self.log_applied(request, target);
        StackOutcome::Applied
    }

    pub(crate) fn close_current_and_open(
        &mut self,
        page: PageId,
        pages: &mut [Page],
        ctx: &mut StageCtx<'_>,
    ) -> StackOutcome {
        let request = StackRequest::CloseCurrentAndOpen;
        if let Some(reason) = self.check(request, page, pages) {
            return StackOutcome::Rejected(reason);
        }
        if self.contains(page) && self.top() != Some(page) {
            return self.reject(request, pages, page, RejectReason::AlreadyOpen);
        }

        let closed = self.open.pop();
        match closed {
            Some(top) => pages[top.index()].hide(0.0, ctx),
            None => tracing::warn!(
                page = %pages[page.index()].name(),
                "close_current_and_open with an empty stack, opening only"
            ),
        }

        let target = &mut pages[page.index()];
        ctx.host.set_as_last_sibling(target.node());
        target.grant_focus();
        self.open.push(page);

        let wait = closed.map_or(0.0, |top| pages[top.index()].hide_duration());
        let target = &mut pages[page.index()];
        if wait > 0.0 {
            ctx.after(
                wait,
                Task::ShowPage {
                    page,
                    epoch: target.epoch(),
                },
            );
        } else {
            target.show(0.0, ctx);
        }

        self.log_applied(request, target);
        StackOutcome::Applied
    }

    pub(crate) fn close_current_only(
        &mut self,
        page: PageId,
        pages: &mut [Page],
        ctx: &mut StageCtx<'_>,
    ) -> StackOutcome {
        let request = StackRequest::CloseCurrentOnly;
        if let Some(reason) = self.check(request, page, pages) {
            return StackOutcome::Rejected(reason);
        }
        match self.top() {
            None => return self.reject(request, pages, page, RejectReason::StackEmpty),
            Some(top) if top != page => {
                return self.reject(request, pages, page, RejectReason::NotTop);
            }
            Some(_) => {}
        }

        self.pop_top_and_hand_off(pages, ctx);
        self.log_applied(request, &pages[page.index()]);
        StackOutcome::Applied
    }

    pub(crate) fn force_close(
        &mut self,
        page: PageId,
        pages: &mut [Page],
        ctx: &mut StageCtx<'_>,
    ) -> StackOutcome {
        let request = StackRequest::ForceClose;
        if let Some(reason) = self.check(request, page, pages) {
            return StackOutcome::Rejected(reason);
        }
        if self.open.is_empty() {
            return self.reject(request, pages, page, RejectReason::StackEmpty);
        }

        if self.top() == Some(page) {
            self.pop_top_and_hand_off(pages, ctx);
        } else if let Some(pos) = self.open.iter().position(|&p| p == page) {
            // closing below the top never moves focus
            self.open.remove(pos);
            pages[page.index()].hide(0.0, ctx);
        } else {
            return self.reject(request, pages, page, RejectReason::NotOpen);
        }

        self.log_applied(request, &pages[page.index()]);
        StackOutcome::Applied
    }

    /// Pop and hide the top page, then focus the page below once the hide has run.
    fn pop_top_and_hand_off(&mut self, pages: &mut [Page], ctx: &mut StageCtx<'_>) {
        let Some(closed) = self.open.pop() else {
            return;
        };
        pages[closed.index()].hide(0.0, ctx);

        let Some(previous) = self.top() else {
            return;
        };
        let wait = pages[closed.index()].hide_duration();
        let prev = &mut pages[previous.index()];
        if wait > 0.0 {
            ctx.after(
                wait,
                Task::FocusPage {
                    page: previous,
                    focus_epoch: prev.focus_epoch(),
                },
            );
        } else {
            prev.on_focus(ctx);
        }
    }

    /// Shared validation: unresolvable ids abort, unregistered pages only warn.
    fn check(&self, request: StackRequest, page: PageId, pages: &[Page]) -> Option<RejectReason> {
        let Some(p) = pages.get(page.index()) else {
            tracing::warn!(?request, %page, "request for a page that does not exist");
            return Some(RejectReason::UnknownPage);
        };
        if !self.is_registered(page) {
            tracing::warn!(
                ?request,
                page = %p.name(),
                "page is not registered with the controller, it was never initialized"
            );
        }
        None
    }

    fn reject(
        &self,
        request: StackRequest,
        pages: &[Page],
        page: PageId,
        reason: RejectReason,
    ) -> StackOutcome {
        tracing::warn!(
            ?request,
            page = %pages[page.index()].name(),
            ?reason,
            open = ?self.open,
            "stack request ignored"
        );
        StackOutcome::Rejected(reason)
    }

    fn log_applied(&self, request: StackRequest, page: &Page) {
        if self.log_requests {
            tracing::info!(?request, page = %page.name(), open = ?self.open, "stack request");
        } else {
            tracing::debug!(?request, page = %page.name(), open = ?self.open, "stack request");
        }
    }
}
