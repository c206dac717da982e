//! Viewer state.

use crate::model::SeverityTier;
use crate::reports::HumanReport;

/// Viewer tabs, in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Overview,
    High,
    Medium,
    Info,
    Permissions,
}

impl Tab {
    pub const ALL: [Self; 5] = [
        Self::Overview,
        Self::High,
        Self::Medium,
        Self::Info,
        Self::Permissions,
    ];

    #[must_use]
    pub const fn title(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::High => "High",
            Self::Medium => "Medium",
            Self::Info => "Info",
            Self::Permissions => "Permissions",
        }
    }

    #[must_use]
    pub const fn index(self) -> usize {
        match self {
            Self::Overview => 0,
            Self::High => 1,
            Self::Medium => 2,
            Self::Info => 3,
            Self::Permissions => 4,
        }
    }

    /// Severity tier shown on this tab, if it is a findings tab.
    #[must_use]
    pub const fn tier(self) -> Option<SeverityTier> {
        match self {
            Self::High => Some(SeverityTier::High),
            Self::Medium => Some(SeverityTier::Medium),
            Self::Info => Some(SeverityTier::Info),
            Self::Overview | Self::Permissions => None,
        }
    }
}

/// Viewer state over one report.
pub struct App {
    pub report: HumanReport,
    pub active_tab: Tab,
    /// Selected row per tab
    selected: [usize; 5],
    pub should_quit: bool,
}

impl App {
    #[must_use]
    pub fn new(report: HumanReport) -> Self {
        Self {
            report,
            active_tab: Tab::Overview,
            selected: [0; 5],
            should_quit: false,
        }
    }

    /// Rows on `tab`.
    #[must_use]
    pub fn item_count(&self, tab: Tab) -> usize {
        match tab {
            Tab::Overview => 0,
            Tab::Permissions => self.report.permissions.len(),
            tab => tab
                .tier()
                .and_then(|tier| self.report.section(tier))
                .map_or(0, |section| section.findings.len()),
        }
    }

    /// Selected row on the active tab.
    #[must_use]
    pub fn selected(&self) -> usize {
        self.selected[self.active_tab.index()]
    }

    pub fn next_tab(&mut self) {
        let idx = (self.active_tab.index() + 1) % Tab::ALL.len();
        self.active_tab = Tab::ALL[idx];
    }

    pub fn prev_tab(&mut self) {
        let idx = (self.active_tab.index() + Tab::ALL.len() - 1) % Tab::ALL.len();
        self.active_tab = Tab::ALL[idx];
    }

    /// Jump to a tab by zero-based position.
    pub fn select_tab(&mut self, idx: usize) {
        if let Some(tab) = Tab::ALL.get(idx) {
            self.active_tab = *tab;
        }
    }

    pub fn select_next(&mut self) {
        let count = self.item_count(self.active_tab);
        let slot = &mut self.selected[self.active_tab.index()];
        if count > 0 && *slot + 1 < count {
            *slot += 1;
        }
    }

    pub fn select_prev(&mut self) {
        let slot = &mut self.selected[self.active_tab.index()];
        *slot = slot.saturating_sub(1);
    }

    pub fn select_first(&mut self) {
        self.selected[self.active_tab.index()] = 0;
    }

    pub fn select_last(&mut self) {
        let count = self.item_count(self.active_tab);
        self.selected[self.active_tab.index()] = count.saturating_sub(1);
    }

    pub fn quit(&mut self) {
        self.should_quit = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::normalize::normalize;
    use crate::remediation::Advisor;
    use serde_json::json;

    fn app() -> App {
        let raw = json!({
            "vulnerabilities": [
                {"title": "a", "severity": "high"},
                {"title": "b", "severity": "high"},
                {"title": "c", "severity": "info"}
            ]
        });
        App::new(HumanReport::build(&normalize(&raw), &Advisor::builtin()))
    }

    #[test]
    fn test_tab_cycling() {
        let mut app = app();
        app.prev_tab();
        assert_eq!(app.active_tab, Tab::Permissions);
        app.next_tab();
        assert_eq!(app.active_tab, Tab::Overview);
        app.select_tab(2);
        assert_eq!(app.active_tab, Tab::Medium);
        app.select_tab(9);
        assert_eq!(app.active_tab, Tab::Medium);
    }

    #[test]
    fn test_selection_is_clamped_per_tab() {
        let mut app = app();
        app.select_tab(1);
        app.select_next();
        app.select_next();
        app.select_next();
        assert_eq!(app.selected(), 1);

        app.select_tab(3);
        assert_eq!(app.selected(), 0);
        app.select_next();
        assert_eq!(app.selected(), 0);

        app.select_tab(1);
        assert_eq!(app.selected(), 1);
        app.select_first();
        assert_eq!(app.selected(), 0);
        app.select_last();
        assert_eq!(app.selected(), 1);
    }

    #[test]
    fn test_item_counts() {
        let app = app();
        assert_eq!(app.item_count(Tab::High), 2);
        assert_eq!(app.item_count(Tab::Medium), 0);
        assert_eq!(app.item_count(Tab::Info), 1);
        assert_eq!(app.item_count(Tab::Permissions), 0);
    }
}
