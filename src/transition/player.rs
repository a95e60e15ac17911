use std::cell::OnceCell;

use crate::{
    animation::tween::{Animator, Tween, TweenHandle, TweenProperty},
    foundation::core::{LocalTransform, NodeId, Vec2},
    host::NodeHost,
    transition::spec::{DeriveHide, TransitionKind, TransitionSpec, max_duration},
};

/// Which half of a show/hide cycle is being played.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Show,
    Hide,
}

/// Plays the show and hide transition sets of one element.
///
/// The baseline transform is captured from the host on the first play and reused by
/// every later play, so offsets never accumulate across cycles. Durations are computed
/// on first use and never recomputed.
#[derive(Debug)]
pub struct TransitionPlayer {
    show: Vec<TransitionSpec>,
    hide: Vec<TransitionSpec>,
    baseline: OnceCell<LocalTransform>,
    show_duration: OnceCell<f64>,
    hide_duration: OnceCell<f64>,
    running: Vec<TweenHandle>,
}

impl TransitionPlayer {
    pub fn new(show: Vec<TransitionSpec>, hide: Vec<TransitionSpec>) -> Self {
        Self {
            show,
            hide,
            baseline: OnceCell::new(),
            show_duration: OnceCell::new(),
            hide_duration: OnceCell::new(),
            running: Vec::new(),
        }
    }

    /// Replace the hide set with a copy of the show set.
    pub fn hide_same_as_show(self) -> Self {
        let hide = DeriveHide::SameAsShow.apply(&self.show);
        Self::new(self.show, hide)
    }

    /// Replace the hide set with the show set played backwards (begin and end swapped).
    pub fn hide_reversed_from_show(self) -> Self {
        let hide = DeriveHide::ReversedShow.apply(&self.show);
        Self::new(self.show, hide)
    }

    pub fn specs(&self, direction: Direction) -> &[TransitionSpec] {
        match direction {
            Direction::Show => &self.show,
            Direction::Hide => &self.hide,
        }
    }

    pub fn show_duration(&self) -> f64 {
        *self.show_duration.get_or_init(|| max_duration(&self.show))
    }

    pub fn hide_duration(&self) -> f64 {
        *self.hide_duration.get_or_init(|| max_duration(&self.hide))
    }

    pub fn duration(&self, direction: Direction) -> f64 {
        match direction {
            Direction::Show => self.show_duration(),
            Direction::Hide => self.hide_duration(),
        }
    }

    pub fn has_hide_transitions(&self) -> bool {
        !self.hide.is_empty()
    }

    /// Baseline captured on first play, if any play happened yet.
    pub fn baseline(&self) -> Option<LocalTransform> {
        self.baseline.get().copied()
    }

    /// Start every transition of `direction` at once, cancelling tweens from an earlier play.
    pub fn play(
        &mut self,
        direction: Direction,
        node: NodeId,
        host: &mut dyn NodeHost,
        animator: &mut dyn Animator,
    ) {
        for handle in self.running.drain(..) {
            animator.cancel(handle);
        }
        let base = *self.baseline.get_or_init(|| {
            host.local_transform(node).unwrap_or_else(|| {
                tracing::warn!(node = node.0, "no transform for node, using identity baseline");
                LocalTransform::default()
            })
        });

        let specs = match direction {
            Direction::Show => &self.show,
            Direction::Hide => &self.hide,
        };
        for spec in specs {
            let Some(property) = start_property(spec, base, node, host) else {
                continue;
            };
            self.running.push(animator.play(Tween {
                node,
                property,
                duration: spec.duration(),
                ease: spec.ease(),
            }));
        }
    }
}

/// Snap `node` to the begin value of `spec` and return the tween toward its end value.
fn start_property(
    spec: &TransitionSpec,
    base: LocalTransform,
    node: NodeId,
    host: &mut dyn NodeHost,
) -> Option<TweenProperty> {
    let mut current = host.local_transform(node).unwrap_or(base);
    let property = match spec.kind() {
        TransitionKind::MoveX => {
            let from = base.position.x + spec.begin();
            current.position.x = from;
            TweenProperty::PositionX {
                from,
                to: base.position.x + spec.end(),
            }
        }
        TransitionKind::MoveY => {
            let from = base.position.y + spec.begin();
            current.position.y = from;
            TweenProperty::PositionY {
                from,
                to: base.position.y + spec.end(),
            }
        }
        TransitionKind::RotateZ => {
            let from = base.rotation_deg + spec.begin();
            current.rotation_deg = from;
            TweenProperty::RotationZ {
                from,
                to: base.rotation_deg + spec.end(),
            }
        }
        TransitionKind::Zoom => {
            let from = Vec2::new(spec.begin(), spec.begin());
            current.scale = from;
            TweenProperty::Scale {
                from,
                to: Vec2::new(spec.end(), spec.end()),
            }
        }
        TransitionKind::Fade => {
            host.set_opacity(node, spec.begin());
            return Some(TweenProperty::Opacity {
                from: spec.begin(),
                to: spec.end(),
            });
        }
        TransitionKind::Unknown(name) => {
            tracing::warn!(kind = %name, node = node.0, "transition kind not implemented, skipping");
            return None;
        }
    };
    host.set_local_transform(node, current);
    Some(property)
}

#[cfg(test)]
#[path = "../../tests/unit/transition/player.rs"]
mod tests;
