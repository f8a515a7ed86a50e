//! Tab set of the main application.

/// A tab inside the main application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Tab {
    #[default]
    Home,
    Signals,
    Market,
    Performance,
    CopyTrade,
    Profile,
}

impl Tab {
    /// All tabs in display order.
    pub const ALL: [Tab; 6] = [
        Tab::Home,
        Tab::Signals,
        Tab::Market,
        Tab::Performance,
        Tab::CopyTrade,
        Tab::Profile,
    ];

    /// Route name shown in the tab bar.
    pub fn title(self) -> &'static str {
        match self {
            Self::Home => "Home",
            Self::Signals => "Signals",
            Self::Market => "Market",
            Self::Performance => "Performance",
            Self::CopyTrade => "CopyTrade",
            Self::Profile => "Profile",
        }
    }

    /// Icon for the tab, filled when focused and outlined otherwise.
    pub fn icon(self, focused: bool) -> &'static str {
        match (self, focused) {
            (Self::Home, true) => "◉",
            (Self::Home, false) => "◎",
            (Self::Signals, true) => "●",
            (Self::Signals, false) => "○",
            (Self::Market, true) => "▇",
            (Self::Market, false) => "▁",
            (Self::Performance, true) => "◆",
            (Self::Performance, false) => "◇",
            (Self::CopyTrade, true) => "■",
            (Self::CopyTrade, false) => "□",
            (Self::Profile, true) => "★",
            (Self::Profile, false) => "☆",
        }
    }

    /// Position in the tab bar.
    pub fn index(self) -> usize {
        Self::ALL.iter().position(|t| *t == self).unwrap_or(0)
    }

    /// The tab to the right, wrapping around.
    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    /// The tab to the left, wrapping around.
    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    /// Whether the screen behind this tab fetches data when it mounts.
    pub fn fetches_data(self) -> bool {
        matches!(
            self,
            Self::Signals | Self::Market | Self::Performance | Self::CopyTrade
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tab_cycling_wraps() {
        assert_eq!(Tab::Home.prev(), Tab::Profile);
        assert_eq!(Tab::Profile.next(), Tab::Home);
        assert_eq!(Tab::Market.next(), Tab::Performance);
    }

    #[test]
    fn test_icons_differ_by_focus() {
        for tab in Tab::ALL {
            assert_ne!(tab.icon(true), tab.icon(false), "{:?}", tab);
        }
    }
}
