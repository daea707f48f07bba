use std::{path::PathBuf, thread::JoinHandle};

use derive_new::new;

use super::EguiApp;
use crate::chart::Field;
use app_core::event::{AppEvent, EventState};

// ---------------------------------------------------------------------------
//
//
// EventQueue
//
//
// ---------------------------------------------------------------------------

/// The EventQueue stores events that are processed each iteration
/// of the application GUI event loop.
pub struct EventQueue<EguiApp> {
    /// Stores events for later processing.
    queue: Vec<Box<dyn AppEvent<App = EguiApp>>>,
    /// Temporarily stores events that have not yet finished running.
    tmp_backlog: Vec<Box<dyn AppEvent<App = EguiApp>>>,
}

impl<EguiApp> EventQueue<EguiApp> {
    pub fn new() -> Self {
        Self {
            queue: Vec::new(),
            tmp_backlog: Vec::new(),
        }
    }

    pub fn queue_event(&mut self, event: Box<dyn AppEvent<App = EguiApp>>) {
        self.queue.push(event);
    }
}

impl EguiApp {
    pub fn run_events(&mut self) {
        // Events are applied in the order they were queued, so two clicks in
        // one frame end with the later one selected.
        let mut queue = std::mem::take(&mut self.event_queue.queue);
        for mut event in queue.drain(..) {
            match event.apply(self) {
                Ok(EventState::Finished) => {
                    self.request_redraw();
                }
                Ok(EventState::Busy) => {
                    // Add busy event to the backlog.
                    self.event_queue.tmp_backlog.push(event);
                }
                Err(err) => {
                    log::error!("event failed: {:?}", err)
                }
            }
        }

        // Events queued while applying run next frame, after the backlog.
        let mut queued_meanwhile = std::mem::take(&mut self.event_queue.queue);
        std::mem::swap(
            &mut self.event_queue.queue,
            &mut self.event_queue.tmp_backlog,
        );
        self.event_queue.queue.append(&mut queued_meanwhile);
    }
}

// ---------------------------------------------------------------------------
//
//
// Events
//
//
// ---------------------------------------------------------------------------

/// An axis label was clicked.
#[derive(new)]
pub struct SelectField {
    field: Field,
}

/// Export the current chart as SVG once a path was picked.
#[derive(new)]
pub struct SavePlotRequested {
    thread_handle: Option<JoinHandle<Option<PathBuf>>>,
}

/// Load the dataset again from the configured path.
#[derive(new)]
pub struct ReloadData;

// ---------------------------------------------------------------------------
//
//
// apply()
//
//
// ---------------------------------------------------------------------------

impl AppEvent for SelectField {
    type App = EguiApp;

    fn apply(&mut self, app: &mut Self::App) -> Result<EventState, String> {
        app.plotter.select(self.field, app.clock)?;
        Ok(EventState::Finished)
    }
}

impl AppEvent for SavePlotRequested {
    type App = EguiApp;

    fn apply(&mut self, app: &mut Self::App) -> Result<EventState, String> {
        if let Some(handle) = self.thread_handle.take_if(|handle| handle.is_finished()) {
            match handle.join() {
                Ok(Some(path)) => {
                    super::components::save_svg(app, &path)?;
                }
                Ok(None) => (),
                Err(err) => {
                    log::error!("unable to save plot: {:?}", err)
                }
            };
            Ok(EventState::Finished)
        } else {
            Ok(EventState::Busy)
        }
    }
}

impl AppEvent for ReloadData {
    type App = EguiApp;

    fn apply(&mut self, app: &mut Self::App) -> Result<EventState, String> {
        app.load_dataset();
        Ok(EventState::Finished)
    }
}
