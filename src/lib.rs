#![forbid(unsafe_code)]
//! pageflow sequences UI page transitions.
//!
//! A [`Stage`] owns a set of pages. Each page is a list of elements that show and hide
//! one after another, each element driving its own transitions (move, rotate, zoom,
//! fade) through an [`Animator`]. A stack controller decides which page is open, hands
//! focus back and forth, and keeps only the top page interactable.
//!
//! The crate is toolkit-agnostic: nodes live in the host's scene graph behind
//! [`NodeHost`], and time only moves when the host calls [`Stage::update`].
//! [`SceneGraph`] and [`Tweener`] are in-memory implementations for headless use.

mod animation;
mod config;
mod events;
mod foundation;
mod host;
mod page;
mod stage;
mod transition;

pub use animation::ease::Ease;
pub use animation::tween::{Animator, Lerp, Tween, TweenHandle, TweenProperty, Tweener};
pub use config::model::{ElementConfig, FirstPage, PageConfig, StageConfig};
pub use config::scenario::{
    DEFAULT_STEP, PageDurations, Scenario, ScenarioReport, ScenarioRequest, ScenarioStep,
    StepReport, TimelineEntry, durations,
};
pub use events::{
    ElementSignal, ElementSignals, Journal, PageSignal, PageSignals, Signal, TimedEvent, UiEvent,
};
pub use foundation::core::{ElementId, LocalTransform, NodeId, PageId, Vec2};
pub use foundation::error::{PageflowError, PageflowResult};
pub use host::scene::{SceneGraph, SceneNode};
pub use host::{NodeFactory, NodeHost};
pub use page::element::{Element, ElementDef};
pub use page::sequence::Order;
pub use page::{Page, PageDef, PagePhase};
pub use stage::requests::PageRequests;
pub use stage::stack::{RejectReason, StackOutcome, StackRequest};
pub use stage::{DEFAULT_FIRST_PAGE_DELAY, Stage, StageSettings};
pub use transition::player::{Direction, TransitionPlayer};
pub use transition::spec::{DeriveHide, TransitionKind, TransitionSpec};
