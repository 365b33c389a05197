pub mod catalog_list;
pub mod catalog_view;
pub mod detail_panel;

use ratatui::style::Color;

// Re-export core Component trait
pub use tui_dispatch::Component;

pub use catalog_list::{CatalogList, CatalogListProps};
pub use catalog_view::{CatalogView, CatalogViewProps};
pub use detail_panel::{detail_lines, DetailPanel, DetailPanelProps, PLACEHOLDER};

pub(crate) const BG_BASE: Color = Color::Rgb(12, 18, 28);
pub(crate) const BG_PANEL: Color = Color::Rgb(20, 32, 46);
pub(crate) const BG_HIGHLIGHT: Color = Color::Rgb(28, 92, 110);
pub(crate) const TEXT_MAIN: Color = Color::Rgb(232, 242, 244);
pub(crate) const TEXT_DIM: Color = Color::Rgb(176, 195, 207);
pub(crate) const ACCENT_TEAL: Color = Color::Rgb(72, 204, 184);
pub(crate) const ACCENT_GOLD: Color = Color::Rgb(228, 176, 88);
