use crate::{
    animation::ease::Ease,
    foundation::error::{PageflowError, PageflowResult, ensure_seconds},
};

/// Property animated by a [`TransitionSpec`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TransitionKind {
    /// Horizontal offset from the baseline position.
    MoveX,
    /// Vertical offset from the baseline position.
    MoveY,
    /// Rotation offset (degrees) from the baseline rotation.
    RotateZ,
    /// Absolute uniform scale.
    Zoom,
    /// Absolute opacity.
    Fade,
    /// A kind this build does not know; kept so newer configs still load.
    Unknown(String),
}

impl TransitionKind {
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "move_x" | "movex" => Self::MoveX,
            "move_y" | "movey" => Self::MoveY,
            "rotate_z" | "rotatez" => Self::RotateZ,
            "zoom" | "scale" => Self::Zoom,
            "fade" | "alpha" => Self::Fade,
            _ => Self::Unknown(name.to_string()),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::MoveX => "move_x",
            Self::MoveY => "move_y",
            Self::RotateZ => "rotate_z",
            Self::Zoom => "zoom",
            Self::Fade => "fade",
            Self::Unknown(name) => name,
        }
    }
}

/// Immutable description of one property animation.
///
/// `begin`/`end` are interpreted against the element's baseline transform, see
/// [`TransitionKind`].
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(try_from = "TransitionSpecDef", into = "TransitionSpecDef")]
pub struct TransitionSpec {
    kind: TransitionKind,
    begin: f64,
    end: f64,
    duration: f64,
    ease: Ease,
}

impl TransitionSpec {
    /// Build a spec with the default [`Ease::OutQuad`] curve.
    pub fn new(kind: TransitionKind, begin: f64, end: f64, duration: f64) -> PageflowResult<Self> {
        ensure_seconds("transition duration", duration)?;
        if !begin.is_finite() || !end.is_finite() {
            return Err(PageflowError::validation(format!(
                "transition '{}' endpoints must be finite",
                kind.name()
            )));
        }
        Ok(Self {
            kind,
            begin,
            end,
            duration,
            ease: Ease::default(),
        })
    }

    pub fn with_ease(mut self, ease: Ease) -> Self {
        self.ease = ease;
        self
    }

    pub fn kind(&self) -> &TransitionKind {
        &self.kind
    }

    pub fn begin(&self) -> f64 {
        self.begin
    }

    pub fn end(&self) -> f64 {
        self.end
    }

    pub fn duration(&self) -> f64 {
        self.duration
    }

    pub fn ease(&self) -> Ease {
        self.ease
    }

    /// Copy with `begin` and `end` swapped, typically a hide derived from a show.
    pub fn reversed(&self) -> Self {
        Self {
            begin: self.end,
            end: self.begin,
            ..self.clone()
        }
    }
}

/// How to build an element's hide transitions from its show transitions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeriveHide {
    /// Replay the show transitions unchanged.
    SameAsShow,
    /// Replay the show transitions with endpoints swapped.
    ReversedShow,
}

impl DeriveHide {
    pub fn apply(self, show: &[TransitionSpec]) -> Vec<TransitionSpec> {
        match self {
            Self::SameAsShow => show.to_vec(),
            Self::ReversedShow => show.iter().map(TransitionSpec::reversed).collect(),
        }
    }
}

/// Longest duration in a set, zero when empty.
pub(crate) fn max_duration(specs: &[TransitionSpec]) -> f64 {
    specs.iter().map(|s| s.duration).fold(0.0, f64::max)
}

#[derive(serde::Serialize, serde::Deserialize)]
struct TransitionSpecDef {
    kind: String,
    #[serde(default)]
    begin: f64,
    #[serde(default)]
    end: f64,
    duration: f64,
    #[serde(default)]
    ease: Ease,
}

impl TryFrom<TransitionSpecDef> for TransitionSpec {
    type Error = PageflowError;

    fn try_from(def: TransitionSpecDef) -> Result<Self, Self::Error> {
        if def.kind.trim().is_empty() {
            return Err(PageflowError::validation("transition kind must be non-empty"));
        }
        Ok(Self::new(TransitionKind::parse(&def.kind), def.begin, def.end, def.duration)?
            .with_ease(def.ease))
    }
}

impl From<TransitionSpec> for TransitionSpecDef {
    fn from(spec: TransitionSpec) -> Self {
        Self {
            kind: spec.kind.name().to_string(),
            begin: spec.begin,
            end: spec.end,
            duration: spec.duration,
            ease: spec.ease,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/transition/spec.rs"]
mod tests;
