use sdl2::event::Event;
use sdl2::keyboard::Keycode;
use sdl2::mouse::MouseButton;
use std::collections::HashMap;
use tracing::trace;

/// Input events the frame loop cares about
///
/// Raw SDL2 events are translated into this enum once per frame, so pages,
/// items and handlers never depend on the full SDL2 event type.
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    Quit,
    KeyDown(Keycode),
    KeyUp(Keycode),
    MouseMotion { x: i32, y: i32 },
    MouseButtonDown { button: MouseButton, x: i32, y: i32 },
    MouseButtonUp { button: MouseButton, x: i32, y: i32 },
    MouseWheel { y: i32 },
}

/// Category of an [`InputEvent`], used as the key for registered handlers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventType {
    Quit,
    KeyDown,
    KeyUp,
    MouseMotion,
    MouseButtonDown,
    MouseButtonUp,
    MouseWheel,
}

impl InputEvent {
    /// Translate an SDL2 event, returning `None` for events we ignore
    pub fn from_sdl(event: &Event) -> Option<Self> {
        match *event {
            Event::Quit { .. } => Some(InputEvent::Quit),
            Event::KeyDown {
                keycode: Some(key),
                repeat: false,
                ..
            } => Some(InputEvent::KeyDown(key)),
            Event::KeyUp {
                keycode: Some(key), ..
            } => Some(InputEvent::KeyUp(key)),
            Event::MouseMotion { x, y, .. } => Some(InputEvent::MouseMotion { x, y }),
            Event::MouseButtonDown {
                mouse_btn, x, y, ..
            } => Some(InputEvent::MouseButtonDown {
                button: mouse_btn,
                x,
                y,
            }),
            Event::MouseButtonUp {
                mouse_btn, x, y, ..
            } => Some(InputEvent::MouseButtonUp {
                button: mouse_btn,
                x,
                y,
            }),
            Event::MouseWheel { y, .. } => Some(InputEvent::MouseWheel { y }),
            _ => None,
        }
    }

    pub fn event_type(&self) -> EventType {
        match self {
            InputEvent::Quit => EventType::Quit,
            InputEvent::KeyDown(_) => EventType::KeyDown,
            InputEvent::KeyUp(_) => EventType::KeyUp,
            InputEvent::MouseMotion { .. } => EventType::MouseMotion,
            InputEvent::MouseButtonDown { .. } => EventType::MouseButtonDown,
            InputEvent::MouseButtonUp { .. } => EventType::MouseButtonUp,
            InputEvent::MouseWheel { .. } => EventType::MouseWheel,
        }
    }
}

/// Callback registered for one [`EventType`]
pub type EventHandler = Box<dyn FnMut(&InputEvent)>;

/// Input dispatcher and pointer state
///
/// # Architecture
///
/// Input processing happens in phases each frame:
/// 1. `begin_frame()` clears the per-frame click/release flags
/// 2. The host feeds every translated event through `process()`
/// 3. `process()` updates pointer state, then calls the handlers registered
///    for the event's type in registration order
/// 4. Items read the pointer state during the update phase
pub struct Input {
    pointer: (i32, i32),
    previous_pointer: (i32, i32),
    pointer_down: bool,
    /// Positions of this frame's left clicks, in order
    clicks: Vec<(i32, i32)>,
    released: bool,
    quit_requested: bool,
    handlers: HashMap<EventType, Vec<EventHandler>>,
}

impl Input {
    pub fn new() -> Self {
        Input {
            pointer: (0, 0),
            previous_pointer: (0, 0),
            pointer_down: false,
            clicks: Vec::new(),
            released: false,
            quit_requested: false,
            handlers: HashMap::new(),
        }
    }

    /// Reset per-frame state, called before the frame's events are processed
    pub fn begin_frame(&mut self) {
        self.previous_pointer = self.pointer;
        self.clicks.clear();
        self.released = false;
    }

    /// Apply one event to the pointer state and dispatch it to handlers
    pub fn process(&mut self, event: InputEvent) {
        match event {
            InputEvent::Quit => self.quit_requested = true,
            InputEvent::MouseMotion { x, y } => self.pointer = (x, y),
            InputEvent::MouseButtonDown {
                button: MouseButton::Left,
                x,
                y,
            } => {
                self.pointer = (x, y);
                self.pointer_down = true;
                self.clicks.push((x, y));
            }
            InputEvent::MouseButtonUp {
                button: MouseButton::Left,
                x,
                y,
            } => {
                self.pointer = (x, y);
                self.pointer_down = false;
                self.released = true;
            }
            _ => {}
        }

        let event_type = event.event_type();
        if let Some(handlers) = self.handlers.get_mut(&event_type) {
            trace!(target: "input", ?event_type, handlers = handlers.len(), "dispatch");
            for handler in handlers.iter_mut() {
                handler(&event);
            }
        }
    }

    /// Register a handler called whenever an event of `event_type` is processed
    pub fn add_event_type_handler<F>(&mut self, event_type: EventType, handler: F)
    where
        F: FnMut(&InputEvent) + 'static,
    {
        self.handlers
            .entry(event_type)
            .or_default()
            .push(Box::new(handler));
    }

    /// Current pointer position in screen pixels
    pub fn pointer(&self) -> (i32, i32) {
        self.pointer
    }

    /// Pointer movement since the start of the frame
    pub fn pointer_delta(&self) -> (i32, i32) {
        (
            self.pointer.0 - self.previous_pointer.0,
            self.pointer.1 - self.previous_pointer.1,
        )
    }

    /// Left button is currently held
    pub fn pointer_down(&self) -> bool {
        self.pointer_down
    }

    /// Left button went down this frame
    pub fn clicked(&self) -> bool {
        !self.clicks.is_empty()
    }

    /// Where each of this frame's left clicks landed
    pub fn clicks(&self) -> &[(i32, i32)] {
        &self.clicks
    }

    /// Left button went up this frame
    pub fn released(&self) -> bool {
        self.released
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }
}

impl Default for Input {
    fn default() -> Self {
        Self::new()
    }
}
