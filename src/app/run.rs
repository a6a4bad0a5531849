//! Launch the explorer as a native window.

use eframe::egui;

use crate::config::ExplorerConfig;
use crate::controller::Explorer;

use super::ExplorerApp;

/// Open the explorer window and run the eframe event loop.
///
/// Blocks until the window is closed.
pub fn run_explorer(explorer: Explorer, cfg: &ExplorerConfig) -> eframe::Result<()> {
    let app = ExplorerApp::new(explorer, cfg);
    let opts = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(cfg.title.clone())
            .with_inner_size(egui::vec2(1400.0, 900.0)),
        ..Default::default()
    };

    eframe::run_native(
        &cfg.title,
        opts,
        Box::new(|cc| {
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);
            Ok(Box::new(app))
        }),
    )
}
