//! Collapsible panel bookkeeping: at most one panel is expanded at a time

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identity of a registered panel
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PanelId(Uuid);

impl PanelId {
    fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

#[derive(Debug, Clone)]
struct PanelEntry {
    id: PanelId,
    title: String,
    expanded: bool,
}

/// Registry owned by the UI root and handed to each panel
#[derive(Debug, Clone, Default)]
pub struct PanelRegistry {
    panels: Vec<PanelEntry>,
}

impl PanelRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a collapsed panel
    pub fn register(&mut self, title: impl Into<String>) -> PanelId {
        let id = PanelId::new();
        self.panels.push(PanelEntry {
            id,
            title: title.into(),
            expanded: false,
        });
        id
    }

    fn entry_mut(&mut self, id: PanelId) -> Option<&mut PanelEntry> {
        self.panels.iter_mut().find(|p| p.id == id)
    }

    /// Expand `id`, collapsing every other panel.
    /// Returns the panels that were collapsed as a result.
    pub fn expand(&mut self, id: PanelId) -> Vec<PanelId> {
        if !self.panels.iter().any(|p| p.id == id) {
            return Vec::new();
        }
        let mut collapsed = Vec::new();
        for panel in &mut self.panels {
            if panel.id == id {
                panel.expanded = true;
            } else if panel.expanded {
                panel.expanded = false;
                collapsed.push(panel.id);
            }
        }
        collapsed
    }

    /// Returns true if the panel was expanded
    pub fn collapse(&mut self, id: PanelId) -> bool {
        match self.entry_mut(id) {
            Some(panel) if panel.expanded => {
                panel.expanded = false;
                true
            }
            _ => false,
        }
    }

    /// Flip a panel. Returns the other panels collapsed by expanding it.
    pub fn toggle(&mut self, id: PanelId) -> Vec<PanelId> {
        if self.is_expanded(id) {
            self.collapse(id);
            Vec::new()
        } else {
            self.expand(id)
        }
    }

    pub fn is_expanded(&self, id: PanelId) -> bool {
        self.panels.iter().any(|p| p.id == id && p.expanded)
    }

    pub fn title(&self, id: PanelId) -> Option<&str> {
        self.panels
            .iter()
            .find(|p| p.id == id)
            .map(|p| p.title.as_str())
    }

    pub fn expanded(&self) -> Option<PanelId> {
        self.panels.iter().find(|p| p.expanded).map(|p| p.id)
    }
}
