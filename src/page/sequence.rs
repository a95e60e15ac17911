use crate::transition::player::Direction;

/// Iteration order of a page's elements during a show or hide sequence.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Order {
    /// Index 0 first.
    #[default]
    Forward,
    /// Last index first.
    Reverse,
}

impl Order {
    /// Element index visited at `step` of a sequence over `len` elements.
    pub fn index_at(self, len: usize, step: usize) -> usize {
        debug_assert!(step < len);
        match self {
            Self::Forward => step,
            Self::Reverse => len - 1 - step,
        }
    }
}

/// Where a running sequence stands: `step` elements have been triggered so far.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Cursor {
    pub(crate) direction: Direction,
    pub(crate) step: usize,
}

impl Cursor {
    pub(crate) fn start(direction: Direction) -> Self {
        Self { direction, step: 0 }
    }
}

/// Wall-clock length of a sequence in closed form: the chain delays of every element
/// but the last one visited, plus the last one's own animation duration.
///
/// Must agree with the step-by-step sequencing in `Page::run_sequence`.
pub(crate) fn sequence_duration(
    order: Order,
    len: usize,
    chain_delay: impl Fn(usize) -> f64,
    own_duration: impl Fn(usize) -> f64,
) -> f64 {
    if len == 0 {
        return 0.0;
    }
    let chained: f64 = (0..len - 1)
        .map(|step| chain_delay(order.index_at(len, step)))
        .sum();
    chained + own_duration(order.index_at(len, len - 1))
}

#[cfg(test)]
#[path = "../../tests/unit/page/sequence.rs"]
mod tests;
