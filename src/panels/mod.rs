pub mod controls_ui;
pub mod detail_ui;
pub mod isotherm_ui;
pub mod ranking_ui;
pub mod scatter_ui;

pub use controls_ui::{ControlAction, ControlsPanel};
pub use detail_ui::render_detail;
pub use isotherm_ui::IsothermPanel;
pub use ranking_ui::RankingPanel;
pub use scatter_ui::{apply_click, ScatterClick, ScatterPanel};
