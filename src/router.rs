// 🧭 View Router - Tab switching over navigation entries and panels
// Exactly one entry is active; the visible panels follow its target

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavEntry {
    /// Identifier of the panel this entry shows
    pub target: String,
    pub label: String,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Panel {
    pub id: String,
    pub active: bool,
}

type NavigateListener = Box<dyn FnMut(&NavEntry) + Send>;

pub struct ViewRouter {
    entries: Vec<NavEntry>,
    panels: Vec<Panel>,
    /// `None` when the layout has no breadcrumb slot
    breadcrumb: Option<String>,
    listeners: Vec<NavigateListener>,
}

impl ViewRouter {
    /// Build a router from `(target, label)` pairs and panel ids.
    /// The first entry and its panel start active.
    pub fn new(entries: &[(&str, &str)], panel_ids: &[&str], with_breadcrumb: bool) -> Self {
        let entries: Vec<NavEntry> = entries
            .iter()
            .enumerate()
            .map(|(i, (target, label))| NavEntry {
                target: target.to_string(),
                label: label.to_string(),
                active: i == 0,
            })
            .collect();

        let first_target = entries.first().map(|e| e.target.clone());
        let panels = panel_ids
            .iter()
            .map(|id| Panel {
                id: id.to_string(),
                active: first_target.as_deref() == Some(*id),
            })
            .collect();

        let breadcrumb = if with_breadcrumb {
            Some(entries.first().map(|e| e.label.clone()).unwrap_or_default())
        } else {
            None
        };

        ViewRouter {
            entries,
            panels,
            breadcrumb,
            listeners: Vec::new(),
        }
    }

    /// Register a callback fired after every activation
    pub fn on_navigate(&mut self, listener: impl FnMut(&NavEntry) + Send + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Activate the entry at `index`. Out-of-range indices are ignored.
    ///
    /// A target that names no panel leaves every panel inactive.
    pub fn activate(&mut self, index: usize) {
        if index >= self.entries.len() {
            return;
        }

        for entry in &mut self.entries {
            entry.active = false;
        }
        self.entries[index].active = true;

        let entry = self.entries[index].clone();

        if let Some(breadcrumb) = self.breadcrumb.as_mut() {
            *breadcrumb = entry.label.clone();
        }

        for panel in &mut self.panels {
            panel.active = panel.id == entry.target;
        }

        for listener in &mut self.listeners {
            listener(&entry);
        }
    }

    /// Activate the first entry declaring `target`; false if none does
    pub fn activate_target(&mut self, target: &str) -> bool {
        match self.entries.iter().position(|e| e.target == target) {
            Some(index) => {
                self.activate(index);
                true
            }
            None => false,
        }
    }

    pub fn next(&mut self) {
        if let Some(i) = self.active_index() {
            self.activate((i + 1) % self.entries.len());
        }
    }

    pub fn previous(&mut self) {
        if let Some(i) = self.active_index() {
            let len = self.entries.len();
            self.activate((i + len - 1) % len);
        }
    }

    pub fn entries(&self) -> &[NavEntry] {
        &self.entries
    }

    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    pub fn breadcrumb(&self) -> Option<&str> {
        self.breadcrumb.as_deref()
    }

    pub fn active_index(&self) -> Option<usize> {
        self.entries.iter().position(|e| e.active)
    }

    pub fn active_entry(&self) -> Option<&NavEntry> {
        self.entries.iter().find(|e| e.active)
    }

    pub fn visible_panels(&self) -> Vec<&str> {
        self.panels
            .iter()
            .filter(|p| p.active)
            .map(|p| p.id.as_str())
            .collect()
    }

    pub fn state(&self) -> RouterState {
        RouterState {
            entries: self.entries.clone(),
            panels: self.panels.clone(),
            breadcrumb: self.breadcrumb.clone(),
        }
    }
}

/// Serializable view of the router
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RouterState {
    pub entries: Vec<NavEntry>,
    pub panels: Vec<Panel>,
    pub breadcrumb: Option<String>,
}

// ============================================================================
// DASHBOARD LAYOUT
// ============================================================================

pub const DASHBOARD_VIEWS: [(&str, &str); 4] = [
    ("overview", "Overview"),
    ("sources", "Data Sources"),
    ("breakdown", "Score Breakdown"),
    ("benefits", "Benefits"),
];

/// Router for the standard dashboard: four entries, four panels, breadcrumb
pub fn dashboard_router() -> ViewRouter {
    let panel_ids: Vec<&str> = DASHBOARD_VIEWS.iter().map(|(target, _)| *target).collect();
    ViewRouter::new(&DASHBOARD_VIEWS, &panel_ids, true)
}
