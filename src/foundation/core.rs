pub use kurbo::Vec2;

/// Opaque handle to a node owned by the host scene graph.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct NodeId(pub u64);

/// Index of a page inside a [`crate::Stage`].
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct PageId(pub u32);

impl PageId {
    pub(crate) fn index(self) -> usize {
        self.0 as usize
    }
}

/// An element is addressed by its owning page and its position in that page's element list.
#[derive(
    Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
pub struct ElementId {
    /// Owning page.
    pub page: PageId,
    /// Position in the page's configured element list.
    pub index: u32,
}

impl std::fmt::Display for PageId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "page#{}", self.0)
    }
}

impl std::fmt::Display for ElementId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "page#{}/element#{}", self.page.0, self.index)
    }
}

/// Local transform of a node relative to its parent.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LocalTransform {
    /// Local position.
    #[serde(default)]
    pub position: Vec2,
    /// Rotation around the view axis, in degrees.
    #[serde(default)]
    pub rotation_deg: f64,
    /// Local scale, default (1,1).
    #[serde(default = "unit_scale")]
    pub scale: Vec2,
}

fn unit_scale() -> Vec2 {
    Vec2::new(1.0, 1.0)
}

impl Default for LocalTransform {
    fn default() -> Self {
        Self {
            position: Vec2::ZERO,
            rotation_deg: 0.0,
            scale: unit_scale(),
        }
    }
}

impl LocalTransform {
    /// Build a transform at `position` with no rotation and unit scale.
    pub fn at(x: f64, y: f64) -> Self {
        Self {
            position: Vec2::new(x, y),
            ..Self::default()
        }
    }

    /// Equivalent affine matrix (scale, then rotate, then translate).
    pub fn to_affine(self) -> kurbo::Affine {
        kurbo::Affine::translate(self.position)
            * kurbo::Affine::rotate(self.rotation_deg.to_radians())
            * kurbo::Affine::scale_non_uniform(self.scale.x, self.scale.y)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;
