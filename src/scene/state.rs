//! Authoritative showcase state: selection, per-gem properties, and the
//! visualization mode.

use crate::gem::{GemId, OpticalProperties};

/// Which assembly the showcase is currently presenting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VisualizationMode {
    /// The two individually selectable loose stones.
    #[default]
    Diamonds,
    /// The golden ring assembly. No selectable sub-objects.
    GoldenRing,
}

impl VisualizationMode {
    /// The other mode.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Diamonds => Self::GoldenRing,
            Self::GoldenRing => Self::Diamonds,
        }
    }
}

/// Process-wide showcase state.
///
/// Selection is globally exclusive: at most one gem is selected, and
/// selecting the already-selected gem clears the selection. Mutation goes
/// through the methods here; controllers only ever read the resulting
/// flags.
#[derive(Debug, Clone)]
pub struct SceneState {
    selection: Option<GemId>,
    diamond_properties: OpticalProperties,
    radiant_properties: OpticalProperties,
    mode: VisualizationMode,
}

impl Default for SceneState {
    fn default() -> Self {
        Self::new(OpticalProperties::default(), OpticalProperties::default())
    }
}

impl SceneState {
    /// Create a state with the given per-gem starting properties, no
    /// selection, in the loose-stones mode.
    #[must_use]
    pub fn new(
        diamond_properties: OpticalProperties,
        radiant_properties: OpticalProperties,
    ) -> Self {
        Self {
            selection: None,
            diamond_properties,
            radiant_properties,
            mode: VisualizationMode::default(),
        }
    }

    /// The currently selected gem, if any.
    pub fn selection(&self) -> Option<GemId> {
        self.selection
    }

    /// Whether the given gem is the selected one.
    pub fn is_selected(&self, id: GemId) -> bool {
        self.selection == Some(id)
    }

    /// The current visualization mode.
    pub fn mode(&self) -> VisualizationMode {
        self.mode
    }

    /// Toggle-select a gem.
    ///
    /// Selecting the gem that is already selected clears the selection;
    /// selecting the other gem instantly replaces it. Ignored outside the
    /// loose-stones mode (the ring assembly has no selectable parts).
    /// Returns the new selection.
    pub fn select(&mut self, id: GemId) -> Option<GemId> {
        if self.mode != VisualizationMode::Diamonds {
            log::debug!("ignoring selection of {id}: ring assembly is shown");
            return self.selection;
        }
        if self.selection == Some(id) {
            self.selection = None;
        } else {
            self.selection = Some(id);
        }
        log::debug!("selection -> {:?}", self.selection);
        self.selection
    }

    /// Clear the selection regardless of which gem held it.
    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    /// The stored optical properties for a gem.
    pub fn properties(&self, id: GemId) -> &OpticalProperties {
        match id {
            GemId::Diamond => &self.diamond_properties,
            GemId::Radiant => &self.radiant_properties,
        }
    }

    /// Commit edited properties for a gem.
    ///
    /// Edits flow in from the parameter panel and are only committed while
    /// the gem is selected; edits addressed to a deselected gem are
    /// dropped. Returns whether the edit was committed.
    pub fn update_properties(
        &mut self,
        id: GemId,
        properties: OpticalProperties,
    ) -> bool {
        if !self.is_selected(id) {
            log::debug!("dropping property edit for deselected {id}");
            return false;
        }
        match id {
            GemId::Diamond => self.diamond_properties = properties,
            GemId::Radiant => self.radiant_properties = properties,
        }
        true
    }

    /// Flip between the loose stones and the ring assembly.
    ///
    /// Switching discards the selection; whatever was animating in the
    /// departed mode does not resume on switch-back. Returns the new mode.
    pub fn toggle_visualization(&mut self) -> VisualizationMode {
        self.mode = self.mode.toggled();
        self.selection = None;
        log::info!("visualization -> {:?}", self.mode);
        self.mode
    }
}
