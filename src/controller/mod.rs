//! Page navigation controller
//!
//! The [`Controller`] owns the page stack, the page registry and the shared
//! frame [`Context`]. The host game loop drives it once per frame:
//!
//! 1. `begin_frame(dt_ms)` then `process_event(..)` for every input event
//! 2. `update()`: the current page updates, then navigation queued during the
//!    update is applied in order
//! 3. `draw(surface)`: the current page draws
//!
//! Navigation failures (unknown page, empty stack) are logged and returned,
//! they never abort the frame.

pub mod context;
pub mod registry;

pub use context::Context;
pub use registry::{PageConstructor, PageRegistry};

use crate::error::{ControllerError, EmptyStackError};
use crate::input::{EventType, Input, InputEvent};
use crate::page::Page;
use crate::pages::WelcomePage;
use crate::render::Surface;
use crate::stack::Stack;
use context::Navigation;
use serde_json::Value;
use tracing::{debug, info, warn};

/// Name of the built-in landing page
pub const DEFAULT_PAGE: &str = "welcome";

/// A constructed page together with the name it was registered under
struct ActivePage {
    name: String,
    page: Box<dyn Page>,
}

pub struct Controller {
    pages: PageRegistry,
    page_stack: Stack<ActivePage>,
    context: Context,
}

impl Controller {
    /// Creates the controller and activates the entry page
    ///
    /// The built-in welcome page is registered and activated when the
    /// registry is empty, when `entry_page` is [`DEFAULT_PAGE`], or when
    /// `entry_page` is not registered.
    pub fn new(pages: PageRegistry, entry_page: &str, display_size: (u32, u32)) -> Self {
        let mut controller = Controller {
            pages,
            page_stack: Stack::new(),
            context: Context::new(display_size),
        };

        let entry = if controller.pages.is_empty() || entry_page == DEFAULT_PAGE {
            DEFAULT_PAGE
        } else if controller.pages.contains(entry_page) {
            entry_page
        } else {
            warn!(target: "controller", entry_page, "entry_page_not_registered_using_welcome");
            DEFAULT_PAGE
        };

        if entry == DEFAULT_PAGE && !controller.pages.contains(DEFAULT_PAGE) {
            // Cannot collide, the name was just checked
            let _ = controller.pages.register_page(DEFAULT_PAGE, WelcomePage::new);
        }

        if let Some(page) = controller
            .pages
            .construct(entry, &mut controller.context, &[])
        {
            controller.page_stack.push(ActivePage {
                name: entry.to_string(),
                page,
            });
        }

        info!(target: "controller", entry, pages = controller.pages.len(), "controller_ready");
        controller
    }

    /// Push the page registered under `name`
    ///
    /// Calls `on_exit` on the current page first. Unknown names leave the
    /// stack untouched and report [`ControllerError::Redirection`].
    pub fn redirect_to_page(&mut self, name: &str, args: &[Value]) -> Result<(), ControllerError> {
        if !self.pages.contains(name) {
            warn!(target: "controller", page = name, "redirection_error_page_does_not_exist");
            return Err(ControllerError::Redirection(name.to_string()));
        }

        if let Ok(current) = self.page_stack.peek_mut() {
            current.page.on_exit(&mut self.context);
        }

        let page = self
            .pages
            .construct(name, &mut self.context, args)
            .ok_or_else(|| ControllerError::Redirection(name.to_string()))?;
        self.page_stack.push(ActivePage {
            name: name.to_string(),
            page,
        });

        debug!(target: "controller", page = name, depth = self.page_stack.len(), "redirected");
        Ok(())
    }

    /// Pop the current page and reveal the one below it
    ///
    /// Calls `on_exit` on the popped page, then `on_appearance` on the
    /// revealed page if there is one.
    pub fn go_back(&mut self) -> Result<(), ControllerError> {
        let Ok(current) = self.page_stack.peek_mut() else {
            warn!(target: "controller", "redirection_error_go_back_on_empty_stack");
            return Err(ControllerError::EmptyStack(EmptyStackError));
        };
        current.page.on_exit(&mut self.context);

        let popped = self.page_stack.pop()?;

        if let Ok(revealed) = self.page_stack.peek_mut() {
            revealed.page.on_appearance(&mut self.context);
        }

        debug!(target: "controller", page = popped.name.as_str(), depth = self.page_stack.len(), "went_back");
        Ok(())
    }

    /// Register a game-wide input handler
    pub fn add_event_type_handler<F>(&mut self, event_type: EventType, handler: F)
    where
        F: FnMut(&InputEvent) + 'static,
    {
        self.context.add_event_type_handler(event_type, handler);
    }

    /// Toggle the shared pause flag
    pub fn pause_game(&mut self) {
        self.context.pause_game();
        info!(target: "controller", paused = self.context.paused(), "pause_toggled");
    }

    /// Start a frame: store the delta time and reset per-frame input state
    pub fn begin_frame(&mut self, dt_ms: f32) {
        self.context.set_dt(dt_ms);
        self.context.input_mut().begin_frame();
    }

    pub fn process_event(&mut self, event: InputEvent) {
        self.context.input_mut().process(event);
    }

    /// Update the current page, then apply the navigation it requested
    ///
    /// Requests raised while applying (from `on_exit`, constructors or
    /// `on_appearance`) stay queued for the next frame.
    pub fn update(&mut self) {
        if let Ok(current) = self.page_stack.peek_mut() {
            current.page.update(&mut self.context);
        }

        for request in self.context.take_requests() {
            // Failures are logged where they happen
            let _ = match request {
                Navigation::Redirect { page, args } => self.redirect_to_page(&page, &args),
                Navigation::Back => self.go_back(),
            };
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface) -> Result<(), String> {
        match self.page_stack.peek() {
            Ok(current) => current.page.draw(surface),
            Err(_) => Ok(()),
        }
    }

    pub fn current_page(&self) -> Result<&dyn Page, ControllerError> {
        let current = self.page_stack.peek()?;
        Ok(current.page.as_ref())
    }

    /// Registration name of the current page
    pub fn current_page_name(&self) -> Option<&str> {
        self.page_stack.peek().ok().map(|p| p.name.as_str())
    }

    /// Number of pages on the stack
    pub fn depth(&self) -> usize {
        self.page_stack.len()
    }

    pub fn pages(&self) -> &PageRegistry {
        &self.pages
    }

    pub fn context(&self) -> &Context {
        &self.context
    }

    pub fn context_mut(&mut self) -> &mut Context {
        &mut self.context
    }

    pub fn input(&self) -> &Input {
        self.context.input()
    }

    pub fn dt(&self) -> f32 {
        self.context.dt()
    }

    pub fn dt_s(&self) -> f32 {
        self.context.dt_s()
    }

    pub fn paused(&self) -> bool {
        self.context.paused()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::render::testing::RecordingSurface;
    use serde_json::json;
    use std::cell::RefCell;
    use std::rc::Rc;

    type Log = Rc<RefCell<Vec<String>>>;

    /// Page that records its lifecycle calls into a shared log
    struct LoggingPage {
        name: String,
        log: Log,
        on_update: Option<fn(&mut Context)>,
    }

    impl Page for LoggingPage {
        fn on_exit(&mut self, _ctx: &mut Context) {
            self.log.borrow_mut().push(format!("exit {}", self.name));
        }

        fn on_appearance(&mut self, _ctx: &mut Context) {
            self.log.borrow_mut().push(format!("appear {}", self.name));
        }

        fn update(&mut self, ctx: &mut Context) {
            self.log.borrow_mut().push(format!("update {}", self.name));
            if let Some(on_update) = self.on_update {
                on_update(ctx);
            }
        }

        fn draw(&self, surface: &mut dyn Surface) -> Result<(), String> {
            surface.draw_text(&self.name, 0, 0, sdl2::pixels::Color::RGB(255, 255, 255), 1)
        }
    }

    fn register(registry: &mut PageRegistry, name: &'static str, log: &Log, on_update: Option<fn(&mut Context)>) {
        let log = Rc::clone(log);
        registry
            .register_page(name, move |_ctx: &mut Context, args: &[Value]| {
                let suffix = if args.is_empty() {
                    String::new()
                } else {
                    format!(" {}", Value::Array(args.to_vec()))
                };
                log.borrow_mut().push(format!("construct {}{}", name, suffix));
                LoggingPage {
                    name: name.to_string(),
                    log: Rc::clone(&log),
                    on_update,
                }
            })
            .unwrap();
    }

    fn redirect_to_level(ctx: &mut Context) {
        ctx.redirect_to_page("level", &[]);
    }

    fn redirect_to_nowhere(ctx: &mut Context) {
        ctx.redirect_to_page("nowhere", &[]);
    }

    fn go_back(ctx: &mut Context) {
        ctx.go_back();
    }

    fn setup() -> (Controller, Log) {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let mut registry = PageRegistry::new();
        register(&mut registry, "menu", &log, None);
        register(&mut registry, "level", &log, None);
        let controller = Controller::new(registry, "menu", (640, 360));
        (controller, log)
    }

    #[test]
    fn test_entry_page_is_constructed() {
        let (controller, log) = setup();
        assert_eq!(controller.current_page_name(), Some("menu"));
        assert_eq!(controller.depth(), 1);
        assert_eq!(*log.borrow(), vec!["construct menu"]);
        // on_appearance is not called on first construction
        assert!(!log.borrow().iter().any(|entry| entry.starts_with("appear")));
    }

    #[test]
    fn test_empty_registry_falls_back_to_welcome() {
        let controller = Controller::new(PageRegistry::new(), "menu", (640, 360));
        assert_eq!(controller.current_page_name(), Some(DEFAULT_PAGE));
        assert!(controller.pages().contains(DEFAULT_PAGE));
    }

    #[test]
    fn test_default_marker_selects_welcome() {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let mut registry = PageRegistry::new();
        register(&mut registry, "menu", &log, None);

        let controller = Controller::new(registry, DEFAULT_PAGE, (640, 360));
        assert_eq!(controller.current_page_name(), Some(DEFAULT_PAGE));
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_unknown_entry_page_falls_back_to_welcome() {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let mut registry = PageRegistry::new();
        register(&mut registry, "menu", &log, None);

        let controller = Controller::new(registry, "missing", (640, 360));
        assert_eq!(controller.current_page_name(), Some(DEFAULT_PAGE));
    }

    #[test]
    fn test_redirect_to_unknown_page_is_noop() {
        let (mut controller, log) = setup();
        log.borrow_mut().clear();

        let result = controller.redirect_to_page("nonexistent", &[]);

        assert_eq!(result, Err(ControllerError::Redirection("nonexistent".to_string())));
        assert_eq!(controller.current_page_name(), Some("menu"));
        assert_eq!(controller.depth(), 1);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn test_redirect_exits_then_constructs() {
        let (mut controller, log) = setup();
        log.borrow_mut().clear();

        controller.redirect_to_page("level", &[json!(2), json!("hard")]).unwrap();

        assert_eq!(
            *log.borrow(),
            vec!["exit menu", r#"construct level [2,"hard"]"#]
        );
        assert_eq!(controller.current_page_name(), Some("level"));
        assert_eq!(controller.depth(), 2);
    }

    #[test]
    fn test_go_back_exits_then_appears() {
        let (mut controller, log) = setup();
        controller.redirect_to_page("level", &[]).unwrap();
        log.borrow_mut().clear();

        controller.go_back().unwrap();

        assert_eq!(*log.borrow(), vec!["exit level", "appear menu"]);
        assert_eq!(controller.current_page_name(), Some("menu"));
    }

    #[test]
    fn test_go_back_to_empty_then_error() {
        let (mut controller, log) = setup();
        log.borrow_mut().clear();

        controller.go_back().unwrap();
        assert_eq!(*log.borrow(), vec!["exit menu"]);
        assert_eq!(controller.depth(), 0);
        assert!(controller.current_page().is_err());

        assert!(matches!(controller.go_back(), Err(ControllerError::EmptyStack(_))));

        // Frame hooks keep working on an empty stack
        controller.update();
        let mut surface = RecordingSurface::new(10, 10);
        assert!(controller.draw(&mut surface).is_ok());
        assert!(surface.calls.is_empty());

        // Redirecting from an empty stack works and calls no on_exit
        log.borrow_mut().clear();
        controller.redirect_to_page("level", &[]).unwrap();
        assert_eq!(*log.borrow(), vec!["construct level"]);
    }

    #[test]
    fn test_navigation_from_update_is_applied_after_update() {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let mut registry = PageRegistry::new();
        register(
            &mut registry,
            "menu",
            &log,
            Some(redirect_to_level as fn(&mut Context)),
        );
        register(&mut registry, "level", &log, Some(go_back as fn(&mut Context)));
        let mut controller = Controller::new(registry, "menu", (640, 360));
        log.borrow_mut().clear();

        controller.update();
        assert_eq!(
            *log.borrow(),
            vec!["update menu", "exit menu", "construct level"]
        );

        log.borrow_mut().clear();
        controller.update();
        assert_eq!(*log.borrow(), vec!["update level", "exit level", "appear menu"]);
        assert_eq!(controller.current_page_name(), Some("menu"));
    }

    #[test]
    fn test_queued_redirect_to_unknown_page_keeps_running() {
        let log: Log = Rc::new(RefCell::new(Vec::new()));
        let mut registry = PageRegistry::new();
        register(
            &mut registry,
            "menu",
            &log,
            Some(redirect_to_nowhere as fn(&mut Context)),
        );
        let mut controller = Controller::new(registry, "menu", (640, 360));

        controller.update();
        controller.update();
        assert_eq!(controller.current_page_name(), Some("menu"));
        assert_eq!(controller.depth(), 1);
    }

    #[test]
    fn test_pause_and_frame_state() {
        let (mut controller, _log) = setup();
        assert!(!controller.paused());
        controller.pause_game();
        assert!(controller.paused());

        controller.begin_frame(20.0);
        assert_eq!(controller.dt(), 20.0);
        assert_eq!(controller.dt_s(), 0.02);
    }

    #[test]
    fn test_event_handlers_are_delegated_to_input() {
        let (mut controller, _log) = setup();
        let seen = Rc::new(RefCell::new(0));
        let counter = Rc::clone(&seen);
        controller.add_event_type_handler(EventType::Quit, move |_| *counter.borrow_mut() += 1);

        controller.begin_frame(16.0);
        controller.process_event(InputEvent::Quit);

        assert_eq!(*seen.borrow(), 1);
        assert!(controller.input().quit_requested());
    }

    #[test]
    fn test_draw_forwards_to_current_page() {
        let (controller, _log) = setup();
        let mut surface = RecordingSurface::new(640, 360);
        controller.draw(&mut surface).unwrap();
        assert!(!surface.calls.is_empty());
    }
}
