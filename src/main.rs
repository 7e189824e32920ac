use eframe::egui;
use std::path::PathBuf;
use std::sync::Arc;

mod config;
mod controller;
mod disclosure;
mod layout;
mod listing;
mod platform;
mod rebuild;
mod scene;
mod viewbox;

use config::AppConfig;
use controller::{CanvasController, FrameInput};
use layout::TreeLayout;
use listing::{DirectoryLister, FsLister};
use rebuild::RebuildQueue;
use scene::NodeAction;

fn main() -> Result<(), eframe::Error> {
    env_logger::init();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_title("Treescape - Visual File Browser"),
        ..Default::default()
    };

    eframe::run_native(
        "Treescape",
        options,
        Box::new(|cc| {
            configure_custom_style(&cc.egui_ctx);
            Box::new(TreescapeApp::new(cc))
        }),
    )
}

fn configure_custom_style(ctx: &egui::Context) {
    let mut style = (*ctx.style()).clone();

    // Dark theme with deep slate background
    let mut visuals = egui::Visuals::dark();
    visuals.panel_fill = egui::Color32::from_rgba_unmultiplied(30, 41, 59, 240);
    visuals.window_fill = egui::Color32::from_rgba_unmultiplied(30, 41, 59, 230);
    visuals.window_stroke = egui::Stroke::new(
        1.0,
        egui::Color32::from_rgba_unmultiplied(255, 255, 255, 26),
    );
    visuals.window_rounding = egui::Rounding::same(12.0);
    style.visuals = visuals;

    style.spacing.item_spacing = egui::vec2(12.0, 8.0);
    style.spacing.button_padding = egui::vec2(16.0, 8.0);

    ctx.set_style(style);
}

struct TreescapeApp {
    home: PathBuf,
    lister: Arc<dyn DirectoryLister>,
    controller: CanvasController,
    rebuilds: RebuildQueue,
    scene: Option<TreeLayout>,
    config: AppConfig,
}

impl TreescapeApp {
    fn new(cc: &eframe::CreationContext<'_>) -> Self {
        let config = AppConfig::load();
        let home = platform::home_dir();
        log::info!("browsing from {}", home.display());

        let mut app = Self {
            home,
            lister: Arc::new(FsLister),
            controller: CanvasController::new(config.camera.clone()),
            rebuilds: RebuildQueue::new(),
            scene: None,
            config,
        };
        app.request_rebuild(&cc.egui_ctx);
        app
    }

    /// The tree is anchored at the plane origin; the camera starts centered
    /// on it and is never moved by a rebuild.
    fn request_rebuild(&mut self, ctx: &egui::Context) {
        self.rebuilds.request(
            Arc::clone(&self.lister),
            self.home.clone(),
            egui::Pos2::ZERO,
            self.controller.disclosure.clone(),
            self.config.layout.clone(),
            ctx.clone(),
        );
    }

    fn handle_action(&mut self, action: NodeAction, ctx: &egui::Context) {
        match action {
            NodeAction::ToggleDirectory(path) => {
                self.controller.disclosure.toggle(&path);
                self.request_rebuild(ctx);
            }
            NodeAction::LaunchFile(path) => platform::launch_file(&path),
            NodeAction::GoHome => {
                self.controller.reset_camera();
                self.request_rebuild(ctx);
            }
        }
    }
}

impl eframe::App for TreescapeApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if let Some(layout) = self.rebuilds.take_latest() {
            self.scene = Some(layout);
        }

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading("Treescape");
                ui.separator();
                ui.label(self.home.display().to_string());

                if self.rebuilds.is_pending() {
                    ui.spinner();
                }
                if let Some(scene) = &self.scene {
                    ui.label(format!("Nodes: {}", scene.nodes.len()));
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let viewport = ui.available_rect_before_wrap();

            let input = FrameInput::gather(ui);
            self.controller.apply(&input, viewport);

            let action = scene::draw_scene(
                ui,
                self.scene.as_ref(),
                &self.controller.camera,
                viewport,
                &self.config.layout,
            );
            if let Some(action) = action {
                self.handle_action(action, ctx);
            }
        });

        if self.rebuilds.is_pending() {
            ctx.request_repaint();
        }
    }
}
