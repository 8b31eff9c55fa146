//! Base Item and the Widget trait
//!
//! [`Item`] is the base unit of every widget: a rectangle with visibility,
//! hover/selection state, an optional click callback, optional dragging, and
//! an ordered list of owned children. Composite widgets (text, buttons,
//! grids) embed an `Item` and implement [`Widget`] on top of it.
//!
//! # Frame behaviour
//!
//! - `update()` drags movable items while the button is held, recomputes
//!   hover state from the pointer, fires `on_click` once for each click that
//!   lands inside the rectangle, then updates the children
//! - `draw()` does nothing when hidden, otherwise draws the children in
//!   insertion order (later children end up on top)
//!
//! Children follow their owner: translating an item translates every child
//! by the same offset.

use crate::controller::Context;
use crate::error::ItemError;
use crate::render::Surface;
use sdl2::rect::Rect;

/// Callback fired when an item is clicked
pub type ClickHandler = Box<dyn FnMut(&mut Context)>;

/// Polymorphic capability set shared by every widget
pub trait Widget {
    fn item(&self) -> &Item;

    fn item_mut(&mut self) -> &mut Item;

    fn update(&mut self, ctx: &mut Context) {
        self.item_mut().update(ctx);
    }

    fn draw(&self, surface: &mut dyn Surface) -> Result<(), String> {
        self.item().draw(surface)
    }

    /// Move the widget (and everything it owns) by an offset
    fn translate(&mut self, dx: i32, dy: i32) {
        self.item_mut().translate(dx, dy);
    }

    fn set_position(&mut self, x: i32, y: i32) {
        let (current_x, current_y) = self.position();
        self.translate(x - current_x, y - current_y);
    }

    fn resize(&mut self, width: u32, height: u32) -> Result<(), ItemError> {
        self.item_mut().resize(width, height);
        Ok(())
    }

    fn position(&self) -> (i32, i32) {
        self.item().position()
    }

    fn size(&self) -> (u32, u32) {
        self.item().size()
    }

    fn rect(&self) -> Rect {
        self.item().rect()
    }
}

pub struct Item {
    x: i32,
    y: i32,
    width: u32,
    height: u32,
    pub visible: bool,
    pub selected: bool,
    hovered: bool,
    movable: bool,
    dragging: bool,
    on_click: Option<ClickHandler>,
    items: Vec<Box<dyn Widget>>,
}

impl Item {
    /// Creates a visible, static item
    pub fn new(position: (i32, i32), size: (u32, u32)) -> Self {
        Item {
            x: position.0,
            y: position.1,
            width: size.0,
            height: size.1,
            visible: true,
            selected: false,
            hovered: false,
            movable: false,
            dragging: false,
            on_click: None,
            items: Vec::new(),
        }
    }

    pub fn with_on_click<F>(mut self, on_click: F) -> Self
    where
        F: FnMut(&mut Context) + 'static,
    {
        self.on_click = Some(Box::new(on_click));
        self
    }

    /// Movable items follow the pointer while dragged
    pub fn with_movable(mut self, movable: bool) -> Self {
        self.movable = movable;
        self
    }

    pub fn set_on_click<F>(&mut self, on_click: F)
    where
        F: FnMut(&mut Context) + 'static,
    {
        self.on_click = Some(Box::new(on_click));
    }

    pub fn position(&self) -> (i32, i32) {
        (self.x, self.y)
    }

    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    /// Rectangle used for both hit-testing and drawing
    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.width, self.height)
    }

    /// Centre point of the rectangle, rounded down
    pub fn center(&self) -> (i32, i32) {
        (
            self.x + self.width as i32 / 2,
            self.y + self.height as i32 / 2,
        )
    }

    pub fn contains_point(&self, x: i32, y: i32) -> bool {
        self.width > 0 && self.height > 0 && self.rect().contains_point((x, y))
    }

    pub fn hovered(&self) -> bool {
        self.hovered
    }

    pub fn dragging(&self) -> bool {
        self.dragging
    }

    pub fn is_movable(&self) -> bool {
        self.movable
    }

    pub fn set_visible(&mut self, visible: bool) {
        self.visible = visible;
    }

    /// Move this item and its children by an offset
    pub fn translate(&mut self, dx: i32, dy: i32) {
        if dx == 0 && dy == 0 {
            return;
        }
        self.x += dx;
        self.y += dy;
        for item in &mut self.items {
            item.translate(dx, dy);
        }
    }

    pub fn set_position(&mut self, x: i32, y: i32) {
        self.translate(x - self.x, y - self.y);
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    /// Append an owned child, drawn after (on top of) earlier children
    pub fn add_item<W: Widget + 'static>(&mut self, item: W) {
        self.items.push(Box::new(item));
    }

    pub fn push(&mut self, item: Box<dyn Widget>) {
        self.items.push(item);
    }

    pub fn items(&self) -> &[Box<dyn Widget>] {
        &self.items
    }

    pub fn items_mut(&mut self) -> &mut [Box<dyn Widget>] {
        &mut self.items
    }

    pub fn update(&mut self, ctx: &mut Context) {
        if !self.visible {
            self.hovered = false;
            self.dragging = false;
            return;
        }

        self.update_interaction(ctx);

        for item in &mut self.items {
            item.update(ctx);
        }
    }

    fn update_interaction(&mut self, ctx: &mut Context) {
        if self.dragging {
            if ctx.input().pointer_down() {
                let (dx, dy) = ctx.input().pointer_delta();
                self.translate(dx, dy);
            } else {
                self.dragging = false;
            }
        }

        // Hit tests use the rectangle after this frame's drag
        let (pointer_x, pointer_y) = ctx.input().pointer();
        self.hovered = self.contains_point(pointer_x, pointer_y);

        let hits = ctx
            .input()
            .clicks()
            .iter()
            .filter(|(x, y)| self.contains_point(*x, *y))
            .count();
        if hits == 0 {
            return;
        }
        if self.movable {
            self.dragging = true;
        }
        if let Some(on_click) = self.on_click.as_mut() {
            for _ in 0..hits {
                on_click(ctx);
            }
        }
    }

    pub fn draw(&self, surface: &mut dyn Surface) -> Result<(), String> {
        if !self.visible {
            return Ok(());
        }
        for item in &self.items {
            item.draw(surface)?;
        }
        Ok(())
    }
}

impl Widget for Item {
    fn item(&self) -> &Item {
        self
    }

    fn item_mut(&mut self) -> &mut Item {
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::InputEvent;
    use crate::render::testing::{DrawCall, RecordingSurface};
    use sdl2::mouse::MouseButton;
    use sdl2::pixels::Color;
    use std::cell::Cell;
    use std::rc::Rc;

    /// Leaf widget that draws its own rectangle
    struct Swatch {
        base: Item,
        color: Color,
    }

    impl Swatch {
        fn new(position: (i32, i32), color: Color) -> Self {
            Swatch {
                base: Item::new(position, (10, 10)),
                color,
            }
        }
    }

    impl Widget for Swatch {
        fn item(&self) -> &Item {
            &self.base
        }

        fn item_mut(&mut self) -> &mut Item {
            &mut self.base
        }

        fn draw(&self, surface: &mut dyn Surface) -> Result<(), String> {
            if self.base.visible {
                surface.fill_rect(self.base.rect(), self.color)?;
            }
            Ok(())
        }
    }

    fn frame(ctx: &mut Context, events: Vec<InputEvent>) {
        ctx.input_mut().begin_frame();
        for event in events {
            ctx.input_mut().process(event);
        }
    }

    fn click(x: i32, y: i32) -> Vec<InputEvent> {
        vec![InputEvent::MouseButtonDown {
            button: MouseButton::Left,
            x,
            y,
        }]
    }

    fn counting_item(count: &Rc<Cell<u32>>) -> Item {
        let count = Rc::clone(count);
        Item::new((10, 10), (50, 20)).with_on_click(move |_| count.set(count.get() + 1))
    }

    #[test]
    fn test_hover_follows_pointer() {
        let mut ctx = Context::new((200, 200));
        let mut item = Item::new((10, 10), (50, 20));

        frame(&mut ctx, vec![InputEvent::MouseMotion { x: 20, y: 15 }]);
        item.update(&mut ctx);
        assert!(item.hovered());

        frame(&mut ctx, vec![InputEvent::MouseMotion { x: 60, y: 15 }]);
        item.update(&mut ctx);
        assert!(!item.hovered());
    }

    #[test]
    fn test_click_fires_once_per_click() {
        let mut ctx = Context::new((200, 200));
        let count = Rc::new(Cell::new(0));
        let mut item = counting_item(&count);

        frame(&mut ctx, click(20, 15));
        item.update(&mut ctx);
        assert_eq!(count.get(), 1);

        // Button held across frames does not click again
        frame(&mut ctx, vec![]);
        item.update(&mut ctx);
        assert_eq!(count.get(), 1);

        // Click outside does nothing
        frame(&mut ctx, click(100, 100));
        item.update(&mut ctx);
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn test_hidden_item_ignores_clicks_and_draws_nothing() {
        let mut ctx = Context::new((200, 200));
        let count = Rc::new(Cell::new(0));
        let mut item = counting_item(&count);
        item.add_item(Swatch::new((10, 10), Color::RGB(255, 0, 0)));
        item.set_visible(false);

        frame(&mut ctx, click(20, 15));
        item.update(&mut ctx);
        assert_eq!(count.get(), 0);
        assert!(!item.hovered());

        let mut surface = RecordingSurface::new(200, 200);
        item.draw(&mut surface).unwrap();
        assert!(surface.calls.is_empty());
    }

    #[test]
    fn test_click_can_navigate() {
        let mut ctx = Context::new((200, 200));
        let mut item = Item::new((0, 0), (10, 10)).with_on_click(|ctx| ctx.pause_game());

        frame(&mut ctx, click(5, 5));
        item.update(&mut ctx);
        assert!(ctx.paused());
    }

    #[test]
    fn test_children_draw_in_insertion_order() {
        let mut item = Item::new((0, 0), (100, 100));
        item.add_item(Swatch::new((0, 0), Color::RGB(255, 0, 0)));
        item.add_item(Swatch::new((5, 5), Color::RGB(0, 255, 0)));

        let mut surface = RecordingSurface::new(100, 100);
        item.draw(&mut surface).unwrap();

        assert_eq!(
            surface.calls,
            vec![
                DrawCall::Fill(Rect::new(0, 0, 10, 10), Color::RGB(255, 0, 0)),
                DrawCall::Fill(Rect::new(5, 5, 10, 10), Color::RGB(0, 255, 0)),
            ]
        );
    }

    #[test]
    fn test_translate_moves_children() {
        let mut item = Item::new((0, 0), (100, 100));
        item.add_item(Swatch::new((10, 20), Color::RGB(0, 0, 0)));

        item.set_position(50, 60);

        assert_eq!(item.position(), (50, 60));
        assert_eq!(item.items()[0].position(), (60, 80));
    }

    #[test]
    fn test_movable_item_drags_with_pointer() {
        let mut ctx = Context::new((200, 200));
        let mut item = Item::new((10, 10), (20, 20)).with_movable(true);

        frame(&mut ctx, click(15, 15));
        item.update(&mut ctx);
        assert!(item.dragging());

        frame(&mut ctx, vec![InputEvent::MouseMotion { x: 25, y: 35 }]);
        item.update(&mut ctx);
        assert_eq!(item.position(), (20, 30));

        frame(
            &mut ctx,
            vec![InputEvent::MouseButtonUp {
                button: MouseButton::Left,
                x: 25,
                y: 35,
            }],
        );
        item.update(&mut ctx);
        assert!(!item.dragging());

        frame(&mut ctx, vec![InputEvent::MouseMotion { x: 100, y: 100 }]);
        item.update(&mut ctx);
        assert_eq!(item.position(), (20, 30));
    }

    #[test]
    fn test_hover_follows_dragged_item() {
        let mut ctx = Context::new((200, 200));
        let mut item = Item::new((10, 10), (20, 20)).with_movable(true);

        frame(&mut ctx, click(15, 15));
        item.update(&mut ctx);

        // Pointer moves far beyond the old rectangle, the item follows it
        frame(&mut ctx, vec![InputEvent::MouseMotion { x: 100, y: 100 }]);
        item.update(&mut ctx);
        assert_eq!(item.position(), (95, 95));
        assert!(item.hovered());
    }

    #[test]
    fn test_two_clicks_in_one_frame_fire_twice() {
        let mut ctx = Context::new((200, 200));
        let count = Rc::new(Cell::new(0));
        let mut item = counting_item(&count);

        frame(
            &mut ctx,
            vec![
                InputEvent::MouseButtonDown { button: MouseButton::Left, x: 20, y: 15 },
                InputEvent::MouseButtonUp { button: MouseButton::Left, x: 20, y: 15 },
                InputEvent::MouseButtonDown { button: MouseButton::Left, x: 25, y: 15 },
                InputEvent::MouseButtonUp { button: MouseButton::Left, x: 25, y: 15 },
                // Outside the item, ignored
                InputEvent::MouseButtonDown { button: MouseButton::Left, x: 150, y: 150 },
            ],
        );
        item.update(&mut ctx);
        assert_eq!(count.get(), 2);
    }

    #[test]
    fn test_static_item_does_not_drag() {
        let mut ctx = Context::new((200, 200));
        let mut item = Item::new((10, 10), (20, 20));

        frame(&mut ctx, click(15, 15));
        item.update(&mut ctx);
        frame(&mut ctx, vec![InputEvent::MouseMotion { x: 50, y: 50 }]);
        item.update(&mut ctx);

        assert!(!item.dragging());
        assert_eq!(item.position(), (10, 10));
    }
}
