use crate::{
    animation::ease::Ease,
    foundation::core::{NodeId, Vec2},
    host::NodeHost,
};

pub trait Lerp: Sized {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self;
}

impl Lerp for f64 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        a + (b - a) * t
    }
}

impl Lerp for Vec2 {
    fn lerp(a: &Self, b: &Self, t: f64) -> Self {
        Vec2::new(a.x + (b.x - a.x) * t, a.y + (b.y - a.y) * t)
    }
}

/// Identifies a running tween so it can be cancelled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TweenHandle(pub u64);

/// Property channel and endpoints of one interpolation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TweenProperty {
    PositionX { from: f64, to: f64 },
    PositionY { from: f64, to: f64 },
    RotationZ { from: f64, to: f64 },
    Scale { from: Vec2, to: Vec2 },
    Opacity { from: f64, to: f64 },
}

impl TweenProperty {
    /// Write the value at eased progress `t` to `node`.
    fn apply(&self, t: f64, node: NodeId, host: &mut dyn NodeHost) {
        if let Self::Opacity { from, to } = *self {
            host.set_opacity(node, Lerp::lerp(&from, &to, t));
            return;
        }
        let mut tr = host.local_transform(node).unwrap_or_default();
        match *self {
            Self::PositionX { from, to } => tr.position.x = Lerp::lerp(&from, &to, t),
            Self::PositionY { from, to } => tr.position.y = Lerp::lerp(&from, &to, t),
            Self::RotationZ { from, to } => tr.rotation_deg = Lerp::lerp(&from, &to, t),
            Self::Scale { from, to } => tr.scale = Lerp::lerp(&from, &to, t),
            Self::Opacity { .. } => return,
        }
        host.set_local_transform(node, tr);
    }
}

/// One requested interpolation.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Tween {
    pub node: NodeId,
    pub property: TweenProperty,
    /// Seconds; zero snaps to the end value on the next advance.
    pub duration: f64,
    pub ease: Ease,
}

/// The interpolation primitive pageflow drives.
///
/// `advance` is called by the stage with the elapsed virtual time; implementations
/// that animate on their own (e.g. a toolkit's tween system) may ignore it.
pub trait Animator {
    fn play(&mut self, tween: Tween) -> TweenHandle;

    /// Stop a tween where it is. Unknown or finished handles are ignored.
    fn cancel(&mut self, handle: TweenHandle);

    fn advance(&mut self, dt: f64, host: &mut dyn NodeHost);
}

#[derive(Clone, Debug)]
struct ActiveTween {
    handle: TweenHandle,
    tween: Tween,
    elapsed: f64,
}

/// Reference [`Animator`] that samples tweens on the stage's virtual clock.
#[derive(Clone, Debug, Default)]
pub struct Tweener {
    next_handle: u64,
    active: Vec<ActiveTween>,
}

impl Tweener {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_running(&self, handle: TweenHandle) -> bool {
        self.active.iter().any(|a| a.handle == handle)
    }

    pub fn running_count(&self) -> usize {
        self.active.len()
    }
}

impl Animator for Tweener {
    fn play(&mut self, tween: Tween) -> TweenHandle {
        let handle = TweenHandle(self.next_handle);
        self.next_handle += 1;
        self.active.push(ActiveTween {
            handle,
            tween,
            elapsed: 0.0,
        });
        handle
    }

    fn cancel(&mut self, handle: TweenHandle) {
        self.active.retain(|a| a.handle != handle);
    }

    fn advance(&mut self, dt: f64, host: &mut dyn NodeHost) {
        let dt = dt.max(0.0);
        self.active.retain_mut(|a| {
            a.elapsed += dt;
            let progress = if a.tween.duration > 0.0 {
                (a.elapsed / a.tween.duration).min(1.0)
            } else {
                1.0
            };
            a.tween
                .property
                .apply(a.tween.ease.apply(progress), a.tween.node, host);
            progress < 1.0
        });
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/tween.rs"]
mod tests;
