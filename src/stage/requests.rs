use crate::{
    animation::tween::Animator,
    foundation::core::PageId,
    host::NodeHost,
    stage::{Stage, stack::StackOutcome},
};

/// Stack requests issued on behalf of one page, e.g. from that page's button handlers.
///
/// Obtained from [`Stage::requests`].
pub struct PageRequests<'s, H: NodeHost, A: Animator> {
    stage: &'s mut Stage<H, A>,
    page: PageId,
}

impl<'s, H: NodeHost, A: Animator> PageRequests<'s, H, A> {
    pub(crate) fn new(stage: &'s mut Stage<H, A>, page: PageId) -> Self {
        Self { stage, page }
    }

    pub fn page(&self) -> PageId {
        self.page
    }

    /// Replace this page (assumed top) with `next`.
    pub fn close_self_and_open(&mut self, next: PageId) -> StackOutcome {
        self.stage.close_current_and_open(next)
    }

    /// Open `next` above this page.
    pub fn keep_self_and_open(&mut self, next: PageId) -> StackOutcome {
        self.stage.keep_current_and_open(next)
    }

    pub fn close_self_only(&mut self) -> StackOutcome {
        self.stage.close_current_only(self.page)
    }

    pub fn force_close_self(&mut self) -> StackOutcome {
        self.stage.force_close(self.page)
    }

    /// Stop this page from receiving input until it is focused or shown again.
    pub fn deactivate_interactable(&mut self) {
        self.stage.deactivate_interactable(self.page);
    }
}
