mod components;
pub mod config;
mod events;

use self::components::Plotter;
use crate::backend_state::Record;
use crate::BackendAppState;
use app_core::backend::{BackendEventLoop, BackendLink, BackendRequest};
use app_core::frontend::UIParameter;
use config::Config;
use events::{EventQueue, ReloadData, SavePlotRequested};

use std::{
    sync::{mpsc::Sender, Arc},
    thread::JoinHandle,
};

pub type DynRequestSender = Sender<Box<dyn BackendRequest<BackendAppState>>>;

/// Result of the last dataset load. `None` until the first load answers.
type Dataset = Option<Result<Arc<[Record]>, String>>;

pub struct EguiApp {
    config: Config,
    backend_thread_handle: Option<JoinHandle<()>>,
    request_tx: DynRequestSender,
    dataset: UIParameter<Dataset>,
    plotter: Plotter,
    /// Seconds since start, taken from egui once per frame.
    clock: f64,
    shortcuts_modal_open: bool,
    ui_selection: UISelection,
    event_queue: EventQueue<Self>,
    request_redraw: Option<()>,
}

#[derive(Debug, PartialEq, Eq)]
enum UISelection {
    Chart,
    Preferences,
}

impl EguiApp {
    pub fn new(
        _cc: &eframe::CreationContext<'_>,
        config: Config,
        request_tx: Sender<Box<dyn BackendRequest<BackendAppState>>>,
        backend_thread_handle: JoinHandle<()>,
    ) -> Self {
        let mut app = Self {
            config,
            backend_thread_handle: Some(backend_thread_handle),
            request_tx,
            dataset: UIParameter::new(None),
            plotter: Plotter::new(),
            clock: 0.0,
            shortcuts_modal_open: false,
            ui_selection: UISelection::Chart,
            event_queue: EventQueue::<Self>::new(),
            request_redraw: None,
        };
        app.load_dataset();
        app
    }

    /// Ask the backend to (re)load the dataset. The chart is rebuilt once
    /// the answer arrives.
    pub fn load_dataset(&mut self) {
        log::debug!("requesting dataset");
        BackendLink::request_parameter_update(
            &mut self.dataset,
            "load dataset",
            |b: &mut BackendEventLoop<BackendAppState>| Some(b.state.load_records()),
            &mut self.request_tx,
        );
    }

    fn update_state(&mut self) {
        self.run_events();
        if self.dataset.try_update() {
            self.on_dataset_loaded();
            self.request_redraw();
        }
    }

    fn on_dataset_loaded(&mut self) {
        self.plotter.clear();
        let records = match self.dataset.value() {
            Some(Ok(records)) => records.clone(),
            Some(Err(err)) => {
                log::error!("unable to load dataset: {}", err);
                return;
            }
            None => return,
        };
        if let Err(err) = self.plotter.set_records(records, &self.config) {
            log::error!("unable to build chart: {}", err);
            *self.dataset.value_mut() = Some(Err(err));
        }
    }

    pub fn request_redraw(&mut self) {
        self.request_redraw = Some(());
    }

    fn request_svg_export(&mut self) {
        log::debug!("open dialog to select svg plot path");
        let handle = std::thread::spawn(|| {
            rfd::FileDialog::new()
                .set_file_name("census-scatter.svg")
                .add_filter("SVG", &["svg"])
                .save_file()
        });
        let event = SavePlotRequested::new(Some(handle));
        self.event_queue.queue_event(Box::new(event));
    }
}

impl eframe::App for EguiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.request_redraw.take().is_some() {
            ctx.request_repaint();
        }
        self.clock = ctx.input(|i| i.time);

        self.update_state();

        let mut should_quit = false;

        // Handle keyboard input.
        ctx.input(|i| {
            // Help window.
            if i.key_pressed(egui::Key::F1) {
                self.shortcuts_modal_open = !self.shortcuts_modal_open;
            }
            // Reload the dataset.
            if i.key_pressed(egui::Key::F5) {
                self.event_queue.queue_event(Box::new(ReloadData::new()));
            }
            // Close app.
            if i.key_pressed(egui::Key::F10) {
                should_quit = true;
            }
            // Toggle preferences.
            if i.key_pressed(egui::Key::F12) {
                self.ui_selection = match self.ui_selection {
                    UISelection::Chart => UISelection::Preferences,
                    UISelection::Preferences => UISelection::Chart,
                };
            }
            if i.key_pressed(egui::Key::P) && i.modifiers.ctrl {
                self.request_svg_export();
            }
        });

        egui::TopBottomPanel::top("top_panel").show(ctx, |ui| {
            self.render_shortcut_modal(ctx);
            self.menu(ui, ctx);
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.central_panel(ui, ctx);
        });

        if self.plotter.is_animating(self.clock) || !self.dataset.is_up_to_date() {
            ctx.request_repaint();
        }

        if should_quit {
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        if let Some(handle) = self.backend_thread_handle.take() {
            app_core::backend::request_stop(&self.request_tx, handle);
        }
    }
}

impl EguiApp {
    fn central_panel(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        match self.ui_selection {
            UISelection::Chart => {
                if self.plotter.chart().is_some() {
                    egui::ScrollArea::both().show(ui, |ui| {
                        self.plotter
                            .render(&self.config, self.clock, &mut self.event_queue, ui);
                    });
                } else if let Some(Err(err)) = self.dataset.value() {
                    ui.colored_label(egui::Color32::RED, format!("Unable to show chart: {err}"));
                    ui.label("Press F5 to try again.");
                } else {
                    ui.horizontal(|ui| {
                        ui.spinner();
                        ui.label(format!("Loading {:?} ...", self.config.data_path));
                    });
                }
            }
            UISelection::Preferences => {
                self.config.render(ctx, ui);
            }
        }
    }

    fn menu(&mut self, ui: &mut egui::Ui, ctx: &egui::Context) {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("Reload Data").clicked() {
                    self.event_queue.queue_event(Box::new(ReloadData::new()));
                    ui.close_menu();
                }
                if ui.button("Preferences").clicked() {
                    self.ui_selection = UISelection::Preferences;
                    ui.close_menu();
                }
                if ui.button("Quit").clicked() {
                    ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                }
            });

            // Selection of ui view.
            ui.menu_button("View", |ui| {
                ui.selectable_value(&mut self.ui_selection, UISelection::Chart, "Chart");
                ui.selectable_value(
                    &mut self.ui_selection,
                    UISelection::Preferences,
                    "Preferences",
                );
            });

            if ui.button("Export").clicked() {
                self.request_svg_export();
            };

            ui.toggle_value(&mut self.shortcuts_modal_open, "Help (F1)");

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                egui::widgets::global_theme_preference_buttons(ui);
            });
        });
    }

    fn render_shortcut_modal(&mut self, ctx: &egui::Context) {
        if self.shortcuts_modal_open
            && egui::Modal::new("shortcut_modal".into())
                .show(ctx, |ui| {
                    ui.heading("Keyboard Shortcuts");
                    ui.separator();
                    ui.label("CTRL + P = Export Chart as SVG");
                    ui.separator();
                    ui.label("F1 = Show Keyboard Shortcuts");
                    ui.separator();
                    ui.label("F5 = Reload Data");
                    ui.separator();
                    ui.label("F10 = Quit App");
                    ui.separator();
                    ui.label("F12 = Toggle Preferences");
                    ui.separator();
                })
                .should_close()
        {
            self.shortcuts_modal_open = false;
        };
    }
}
