#![forbid(unsafe_code)]

//! Current page and sidebar state, and how viewport changes affect them.

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::ValidationError;
use crate::reactive::{BatchScope, Observable, ReadSignal};

/// Viewports at most this wide (in CSS pixels) use the narrow layout.
pub const DEFAULT_NARROW_BREAKPOINT: u32 = 768;

/// The closed set of pages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Page {
    #[default]
    Dashboard,
    Forest,
    Rooms,
    Stats,
    Settings,
}

impl Page {
    /// Navigation order.
    pub const ALL: [Page; 5] = [
        Self::Dashboard,
        Self::Forest,
        Self::Rooms,
        Self::Stats,
        Self::Settings,
    ];

    /// Stable identifier, also the catalog key of the page title.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::Forest => "forest",
            Self::Rooms => "rooms",
            Self::Stats => "stats",
            Self::Settings => "settings",
        }
    }
}

impl fmt::Display for Page {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Page {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        Self::ALL
            .into_iter()
            .find(|page| page.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| ValidationError::UnknownPage(s.to_owned()))
    }
}

/// Layout class of the hosting viewport.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LayoutMode {
    Wide,
    Narrow,
}

impl LayoutMode {
    #[must_use]
    pub const fn from_width(width_px: u32, breakpoint_px: u32) -> Self {
        if width_px <= breakpoint_px {
            Self::Narrow
        } else {
            Self::Wide
        }
    }

    #[must_use]
    pub const fn from_narrow(is_narrow: bool) -> Self {
        if is_narrow { Self::Narrow } else { Self::Wide }
    }

    #[must_use]
    pub const fn is_narrow(self) -> bool {
        matches!(self, Self::Narrow)
    }
}

/// Owner of the page, sidebar and layout cells.
#[derive(Debug)]
pub struct Navigation {
    current_page: Observable<Page>,
    sidebar_open: Observable<bool>,
    layout: Observable<LayoutMode>,
    breakpoint_px: u32,
}

impl Navigation {
    /// The sidebar starts open on wide viewports and closed on narrow ones.
    #[must_use]
    pub fn new(initial_page: Page, viewport_width_px: u32, breakpoint_px: u32) -> Self {
        let layout = LayoutMode::from_width(viewport_width_px, breakpoint_px);
        Self {
            current_page: Observable::new(initial_page),
            sidebar_open: Observable::new(!layout.is_narrow()),
            layout: Observable::new(layout),
            breakpoint_px,
        }
    }

    #[must_use]
    pub fn current_page(&self) -> Page {
        self.current_page.get()
    }

    #[must_use]
    pub fn sidebar_open(&self) -> bool {
        self.sidebar_open.get()
    }

    #[must_use]
    pub fn layout(&self) -> LayoutMode {
        self.layout.get()
    }

    #[must_use]
    pub fn breakpoint_px(&self) -> u32 {
        self.breakpoint_px
    }

    #[must_use]
    pub fn current_page_signal(&self) -> ReadSignal<Page> {
        self.current_page.read_only()
    }

    #[must_use]
    pub fn sidebar_open_signal(&self) -> ReadSignal<bool> {
        self.sidebar_open.read_only()
    }

    /// Select a page. In the narrow layout the sidebar collapses as well.
    pub fn set_page(&self, page: Page) {
        let _batch = BatchScope::new();
        self.current_page.set(page);
        if self.layout.get_untracked().is_narrow() {
            self.sidebar_open.set(false);
        }
    }

    pub fn toggle_sidebar(&self) {
        self.sidebar_open.update(|open| *open = !*open);
    }

    /// The host reports the layout class after a resize. The sidebar is
    /// reset to open (wide) or closed (narrow) on every report.
    pub fn on_viewport_changed(&self, is_narrow: bool) {
        let layout = LayoutMode::from_narrow(is_narrow);
        let _batch = BatchScope::new();
        self.layout.set(layout);
        self.sidebar_open.set(!is_narrow);
    }

    /// Classify `width_px` against the breakpoint and report it.
    pub fn on_viewport_width(&self, width_px: u32) {
        let layout = LayoutMode::from_width(width_px, self.breakpoint_px);
        self.on_viewport_changed(layout.is_narrow());
    }
}
