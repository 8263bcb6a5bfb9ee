//! Show/hide coordination for independently triggered panels sharing one
//! backdrop.
//!
//! The coordinator owns every panel's open/closed state. Each call returns a
//! [`CoordinatorUpdate`] listing the panels whose projection changed plus the
//! backdrop visibility, which is recomputed by scanning all panels on every
//! transition. The backdrop is visible iff at least one panel is open.

use thiserror::Error;
use tracing::trace;

use crate::config::PanelConfig;

/// Stable handle for a registered panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PanelId(u32);

impl PanelId {
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    const fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PanelState {
    #[default]
    Closed,
    Open,
}

impl PanelState {
    #[must_use]
    pub const fn is_open(self) -> bool {
        matches!(self, Self::Open)
    }

    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Open => Self::Closed,
            Self::Closed => Self::Open,
        }
    }
}

/// Trigger button text for each panel state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriggerGlyphs {
    pub idle: String,
    pub close: String,
}

impl TriggerGlyphs {
    #[must_use]
    pub fn new(idle: impl Into<String>, close: impl Into<String>) -> Self {
        Self {
            idle: idle.into(),
            close: close.into(),
        }
    }
}

impl From<&PanelConfig> for TriggerGlyphs {
    fn from(config: &PanelConfig) -> Self {
        Self::new(config.idle_glyph.as_str(), config.close_glyph.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoordinatorError {
    #[error("unknown panel id {0:?}")]
    UnknownPanel(PanelId),
    #[error("panel {0:?} is already registered")]
    DuplicatePanel(String),
}

/// How one panel and its trigger should be rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelProjection {
    pub id: PanelId,
    /// Open-state marker on the panel element.
    pub open: bool,
    /// Active marker on the trigger element.
    pub trigger_active: bool,
    pub trigger_glyph: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackdropProjection {
    pub visible: bool,
}

/// Result of one coordinator call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CoordinatorUpdate {
    /// Panels whose state changed, in registration order.
    pub panels: Vec<PanelProjection>,
    pub backdrop: BackdropProjection,
}

impl CoordinatorUpdate {
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.panels.is_empty()
    }
}

/// Where a click landed, from the coordinator's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickTarget {
    Trigger(PanelId),
    /// Inside a panel's own content; never dismisses it.
    Panel(PanelId),
    Backdrop,
}

#[derive(Debug, Clone)]
struct PanelEntry {
    name: String,
    glyphs: TriggerGlyphs,
    state: PanelState,
}

impl PanelEntry {
    fn projection(&self, id: PanelId) -> PanelProjection {
        let open = self.state.is_open();
        PanelProjection {
            id,
            open,
            trigger_active: open,
            trigger_glyph: if open {
                self.glyphs.close.clone()
            } else {
                self.glyphs.idle.clone()
            },
        }
    }
}

/// Owner of all coordinated panel state.
#[derive(Debug, Clone, Default)]
pub struct PanelCoordinator {
    panels: Vec<PanelEntry>,
}

impl PanelCoordinator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a panel. `initially_open` restores state found at page load.
    pub fn register(
        &mut self,
        name: impl Into<String>,
        glyphs: TriggerGlyphs,
        initially_open: bool,
    ) -> Result<PanelId, CoordinatorError> {
        let name = name.into();
        if self.id_of(&name).is_some() {
            return Err(CoordinatorError::DuplicatePanel(name));
        }
        let id = PanelId(self.panels.len() as u32);
        self.panels.push(PanelEntry {
            name,
            glyphs,
            state: if initially_open {
                PanelState::Open
            } else {
                PanelState::Closed
            },
        });
        Ok(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.panels.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.panels.is_empty()
    }

    #[must_use]
    pub fn id_of(&self, name: &str) -> Option<PanelId> {
        self.panels
            .iter()
            .position(|entry| entry.name == name)
            .map(|idx| PanelId(idx as u32))
    }

    pub fn state(&self, id: PanelId) -> Result<PanelState, CoordinatorError> {
        Ok(self.entry(id)?.state)
    }

    pub fn projection(&self, id: PanelId) -> Result<PanelProjection, CoordinatorError> {
        Ok(self.entry(id)?.projection(id))
    }

    /// Visible iff any panel is open. Always a full scan.
    #[must_use]
    pub fn backdrop_visible(&self) -> bool {
        self.panels.iter().any(|entry| entry.state.is_open())
    }

    pub fn open_panels(&self) -> impl Iterator<Item = PanelId> + '_ {
        self.panels
            .iter()
            .enumerate()
            .filter(|(_, entry)| entry.state.is_open())
            .map(|(idx, _)| PanelId(idx as u32))
    }

    /// Projection of every panel, for the initial render.
    #[must_use]
    pub fn snapshot(&self) -> CoordinatorUpdate {
        CoordinatorUpdate {
            panels: self
                .panels
                .iter()
                .enumerate()
                .map(|(idx, entry)| entry.projection(PanelId(idx as u32)))
                .collect(),
            backdrop: self.backdrop(),
        }
    }

    /// Trigger click: flip the panel between open and closed.
    pub fn toggle(&mut self, id: PanelId) -> Result<CoordinatorUpdate, CoordinatorError> {
        let next = self.entry(id)?.state.toggled();
        self.set_state(id, next)
    }

    pub fn open(&mut self, id: PanelId) -> Result<CoordinatorUpdate, CoordinatorError> {
        self.set_state(id, PanelState::Open)
    }

    pub fn close(&mut self, id: PanelId) -> Result<CoordinatorUpdate, CoordinatorError> {
        self.set_state(id, PanelState::Closed)
    }

    /// Backdrop click: close every open panel in one step.
    pub fn backdrop_click(&mut self) -> CoordinatorUpdate {
        let mut changed = Vec::new();
        for (idx, entry) in self.panels.iter_mut().enumerate() {
            if entry.state.is_open() {
                entry.state = PanelState::Closed;
                trace!(panel = %entry.name, "panel closed by backdrop");
                changed.push(entry.projection(PanelId(idx as u32)));
            }
        }
        CoordinatorUpdate {
            panels: changed,
            backdrop: self.backdrop(),
        }
    }

    /// Whether a click on `target` must stay out of document-level handlers.
    ///
    /// Trigger clicks always do. A click inside a panel only does while that
    /// panel is open; closed or always-visible panels let it through.
    #[must_use]
    pub fn contains_click(&self, target: ClickTarget) -> bool {
        match target {
            ClickTarget::Trigger(id) => self.entry(id).is_ok(),
            ClickTarget::Panel(id) => self.entry(id).is_ok_and(|entry| entry.state.is_open()),
            ClickTarget::Backdrop => false,
        }
    }

    /// Route a click through the coordinator.
    pub fn click(&mut self, target: ClickTarget) -> Result<CoordinatorUpdate, CoordinatorError> {
        match target {
            ClickTarget::Trigger(id) => self.toggle(id),
            ClickTarget::Panel(id) => {
                self.entry(id)?;
                Ok(self.unchanged())
            }
            ClickTarget::Backdrop => Ok(self.backdrop_click()),
        }
    }

    fn set_state(
        &mut self,
        id: PanelId,
        next: PanelState,
    ) -> Result<CoordinatorUpdate, CoordinatorError> {
        let entry = self
            .panels
            .get_mut(id.index())
            .ok_or(CoordinatorError::UnknownPanel(id))?;
        if entry.state == next {
            return Ok(self.unchanged());
        }
        entry.state = next;
        trace!(panel = %entry.name, open = next.is_open(), "panel toggled");
        let projection = entry.projection(id);
        Ok(CoordinatorUpdate {
            panels: vec![projection],
            backdrop: self.backdrop(),
        })
    }

    fn unchanged(&self) -> CoordinatorUpdate {
        CoordinatorUpdate {
            panels: Vec::new(),
            backdrop: self.backdrop(),
        }
    }

    fn backdrop(&self) -> BackdropProjection {
        BackdropProjection {
            visible: self.backdrop_visible(),
        }
    }

    fn entry(&self, id: PanelId) -> Result<&PanelEntry, CoordinatorError> {
        self.panels
            .get(id.index())
            .ok_or(CoordinatorError::UnknownPanel(id))
    }
}
