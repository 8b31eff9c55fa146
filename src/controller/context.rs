// Context struct
//
// Shared per-frame state owned by the Controller and lent to pages, items and
// click callbacks. Navigation requested from inside an update is queued here
// and applied by the Controller once the page has finished updating.

use crate::input::{EventType, Input, InputEvent};
use serde_json::Value;

/// Navigation requested during an update
#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Navigation {
    Redirect { page: String, args: Vec<Value> },
    Back,
}

pub struct Context {
    input: Input,
    dt_ms: f32,
    paused: bool,
    display_size: (u32, u32),
    requests: Vec<Navigation>,
}

impl Context {
    pub fn new(display_size: (u32, u32)) -> Self {
        Context {
            input: Input::new(),
            dt_ms: 0.0,
            paused: false,
            display_size,
            requests: Vec::new(),
        }
    }

    pub fn input(&self) -> &Input {
        &self.input
    }

    pub fn input_mut(&mut self) -> &mut Input {
        &mut self.input
    }

    /// Time between the previous frame and this one, in milliseconds
    pub fn dt(&self) -> f32 {
        self.dt_ms
    }

    /// Time between the previous frame and this one, in seconds
    pub fn dt_s(&self) -> f32 {
        self.dt_ms / 1000.0
    }

    pub(crate) fn set_dt(&mut self, dt_ms: f32) {
        self.dt_ms = dt_ms.max(0.0);
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    /// Toggle the pause flag; takes effect immediately
    pub fn pause_game(&mut self) {
        self.paused = !self.paused;
    }

    pub fn display_size(&self) -> (u32, u32) {
        self.display_size
    }

    /// Queue a redirect, applied after the current page's update
    pub fn redirect_to_page(&mut self, page: &str, args: &[Value]) {
        self.requests.push(Navigation::Redirect {
            page: page.to_string(),
            args: args.to_vec(),
        });
    }

    /// Queue a `go_back`, applied after the current page's update
    pub fn go_back(&mut self) {
        self.requests.push(Navigation::Back);
    }

    pub fn add_event_type_handler<F>(&mut self, event_type: EventType, handler: F)
    where
        F: FnMut(&InputEvent) + 'static,
    {
        self.input.add_event_type_handler(event_type, handler);
    }

    pub(crate) fn take_requests(&mut self) -> Vec<Navigation> {
        std::mem::take(&mut self.requests)
    }
}
