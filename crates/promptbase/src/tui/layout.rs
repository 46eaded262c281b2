//! Layout calculations for the TUI.

use ratatui::layout::{Constraint, Direction, Layout, Rect};

/// Minimum width for dual panel mode (cols)
const DUAL_PANEL_MIN_WIDTH: u16 = 90;

/// Layout mode based on terminal width
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    /// Single panel - form or list depending on focus
    SinglePanel,
    /// Dual panel - form and list side by side
    DualPanel,
}

/// Main layout areas
pub struct MainLayout {
    pub header: Rect,
    pub form_panel: Rect,
    pub list_panel: Rect,
    pub status: Rect,
    pub footer: Rect,
    pub mode: LayoutMode,
}

/// Form panel layout
pub struct FormLayout {
    pub title: Rect,
    pub body: Rect,
    pub favorite: Rect,
    pub message: Rect,
}

/// List panel layout
pub struct ListLayout {
    pub search: Rect,
    pub sort: Rect,
    pub rows: Rect,
}

impl MainLayout {
    /// Calculate the main layout from the terminal area
    pub fn new(area: Rect) -> Self {
        let mode = if area.width >= DUAL_PANEL_MIN_WIDTH {
            LayoutMode::DualPanel
        } else {
            LayoutMode::SinglePanel
        };

        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Header
                Constraint::Min(10),   // Main content
                Constraint::Length(1), // Status line
                Constraint::Length(3), // Footer
            ])
            .split(area);

        let header = chunks[0];
        let main_area = chunks[1];
        let status = chunks[2];
        let footer = chunks[3];

        match mode {
            LayoutMode::DualPanel => {
                let panels = Layout::default()
                    .direction(Direction::Horizontal)
                    .constraints([
                        Constraint::Percentage(45), // Form
                        Constraint::Percentage(55), // List
                    ])
                    .split(main_area);

                Self {
                    header,
                    form_panel: panels[0],
                    list_panel: panels[1],
                    status,
                    footer,
                    mode,
                }
            }
            LayoutMode::SinglePanel => Self {
                header,
                form_panel: main_area,
                list_panel: main_area,
                status,
                footer,
                mode,
            },
        }
    }
}

impl FormLayout {
    /// Lay out the form fields inside the form panel
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Title input
                Constraint::Min(5),    // Body input
                Constraint::Length(1), // Favorite checkbox
                Constraint::Length(1), // Validation message
            ])
            .split(area);

        Self {
            title: chunks[0],
            body: chunks[1],
            favorite: chunks[2],
            message: chunks[3],
        }
    }
}

impl ListLayout {
    /// Lay out the search box, sort line, and rows inside the list panel
    pub fn new(area: Rect) -> Self {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3), // Search input
                Constraint::Length(1), // Sort selector
                Constraint::Min(3),    // Prompt rows
            ])
            .split(area);

        Self {
            search: chunks[0],
            sort: chunks[1],
            rows: chunks[2],
        }
    }
}
