//! Stage kinds and the catalog that weights them for map generation.

/// Kind of encounter a map node resolves to.
#[derive(
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
    strum::EnumIter,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum StageKind {
    Enemy,
    Shop,
    Treasure,
    Rest,
    Events,
    Boss,
    #[default]
    Undefined,
}

impl StageKind {
    /// Kinds that may be drawn for ordinary grid cells.
    pub fn is_drawable(self) -> bool {
        self != StageKind::Boss
    }
}

/// Catalog entry for one stage kind.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StageData {
    pub kind: StageKind,
    /// Relative weight in the weighted stage draw.
    pub weight: u32,
    /// Visual identifier handed to the map renderer.
    #[cfg_attr(feature = "serde", serde(default))]
    pub visual: Option<String>,
}

impl StageData {
    pub fn new(kind: StageKind, weight: u32) -> Self {
        Self {
            kind,
            weight,
            visual: None,
        }
    }

    #[must_use]
    pub fn with_visual(mut self, visual: impl Into<String>) -> Self {
        self.visual = Some(visual.into());
        self
    }
}

/// Read-only stage definitions in catalog order.
pub trait StageCatalog: Send + Sync {
    fn stages(&self) -> Vec<StageData>;

    fn stage(&self, kind: StageKind) -> Option<StageData> {
        self.stages().into_iter().find(|data| data.kind == kind)
    }
}
