use eframe::egui;
use egui_commonmark::CommonMarkCache;
use egui_phosphor::regular as icons;
use researchbot::ui::{render, SearchForm};
use researchbot::{version, AppBuilder, AppConfig, AppDependencies, ResearchResult};
use std::sync::Arc;
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TryRecvError;
use tracing_subscriber::EnvFilter;

const GENERIC_ERROR: &str = "Something went wrong while researching. Please try again.";

fn main() -> anyhow::Result<()> {
    // Initialize tracing for logging (RUST_LOG overrides the default level)
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    // Missing API keys stop the app before any window opens
    let config = AppConfig::load()?;
    tracing::info!("✓ API keys loaded, using model {}", config.model);

    let deps = AppBuilder::new()
        .with_config(config)
        .with_production_deps()?
        .build()?;

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([960.0, 720.0])
            .with_title("AI Security News Researcher"),
        ..Default::default()
    };

    eframe::run_native(
        "researchbot",
        options,
        Box::new(move |cc| {
            let mut fonts = egui::FontDefinitions::default();
            egui_phosphor::add_to_fonts(&mut fonts, egui_phosphor::Variant::Regular);
            cc.egui_ctx.set_fonts(fonts);

            Ok(Box::new(ResearchApp::new(deps)))
        }),
    )
    .map_err(|e| anyhow::anyhow!("Failed to run UI: {}", e))
}

struct ResearchApp {
    deps: AppDependencies,

    // Input collector
    form: SearchForm,

    // Receiver for the in-flight request, if any
    pending_result: Option<mpsc::UnboundedReceiver<researchbot::Result<ResearchResult>>>,

    // Output region
    result: Option<ResearchResult>,
    error_message: Option<String>,
    markdown_cache: CommonMarkCache,
}

impl ResearchApp {
    fn new(deps: AppDependencies) -> Self {
        Self {
            deps,
            form: SearchForm::default(),
            pending_result: None,
            result: None,
            error_message: None,
            markdown_cache: CommonMarkCache::default(),
        }
    }

    fn is_waiting(&self) -> bool {
        self.pending_result.is_some()
    }

    /// Spawn one research request on the runtime
    fn start_research(&mut self, ctx: &egui::Context) {
        let request = self.form.to_request();
        tracing::info!("Research requested: '{}' ({} results)", request.query, request.result_limit);

        self.result = None;
        self.error_message = None;

        let (tx, rx) = mpsc::unbounded_channel();
        self.pending_result = Some(rx);

        let researcher = Arc::clone(&self.deps.researcher);
        let ctx = ctx.clone();
        self.deps.runtime.spawn(async move {
            let result = researcher.research(&request).await;
            let _ = tx.send(result);
            ctx.request_repaint();
        });
    }

    /// Pick up a finished request without blocking the UI thread
    fn poll_pending_result(&mut self) {
        let Some(rx) = self.pending_result.as_mut() else {
            return;
        };

        match rx.try_recv() {
            Ok(Ok(result)) => {
                self.result = Some(result);
                self.pending_result = None;
            }
            Ok(Err(e)) => {
                tracing::error!("Research request failed: {}", e);
                self.error_message = Some(GENERIC_ERROR.to_string());
                self.pending_result = None;
            }
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                tracing::error!("Research task ended without a result");
                self.error_message = Some(GENERIC_ERROR.to_string());
                self.pending_result = None;
            }
        }
    }

    fn render_main(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        ui.heading("AI Security News Researcher");
        ui.label("Stay updated on the latest trends and developments in AI Security.");
        ui.add_space(6.0);
        ui.label(
            egui::RichText::new("Use the sidebar to adjust search parameters.")
                .color(egui::Color32::from_rgb(110, 110, 110)),
        );
        ui.add_space(10.0);

        let button = egui::Button::new(format!(
            "{} Get Latest AI Security News",
            icons::MAGNIFYING_GLASS
        ));
        if ui.add_enabled(!self.is_waiting(), button).clicked() {
            self.start_research(ctx);
        }

        ui.add_space(10.0);

        if self.is_waiting() {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(
                    egui::RichText::new("Researching, please wait...")
                        .italics()
                        .color(egui::Color32::from_rgb(100, 150, 255)),
                );
            });
        }

        if let Some(error) = &self.error_message {
            ui.colored_label(
                egui::Color32::from_rgb(200, 60, 60),
                format!("{} {}", icons::WARNING, error),
            );
        }

        if let Some(result) = &self.result {
            ui.separator();
            egui::ScrollArea::vertical()
                .auto_shrink([false; 2])
                .show(ui, |ui| {
                    render::show(ui, &mut self.markdown_cache, result);
                });
        }
    }
}

impl eframe::App for ResearchApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_pending_result();

        egui::SidePanel::left("search_parameters")
            .resizable(false)
            .default_width(240.0)
            .show(ctx, |ui| {
                self.form.show(ui);
            });

        egui::TopBottomPanel::bottom("footer").show(ctx, |ui| {
            ui.label(
                egui::RichText::new(version::full_version_info())
                    .size(11.0)
                    .color(egui::Color32::from_rgb(140, 140, 140)),
            );
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.render_main(ui, ctx);
        });

        // Keep the spinner animating while a request is in flight
        if self.is_waiting() {
            ctx.request_repaint();
        }
    }
}
