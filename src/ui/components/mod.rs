pub mod api_panel;
pub mod chart;
pub mod terminal;
pub mod utils;

pub use api_panel::{render_api_panel, ApiPanelState, ApiStatus, PanelViewport};
pub use chart::render_series_charts;
pub use terminal::TerminalGuard;
