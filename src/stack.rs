//! LIFO container used for the page stack

use crate::error::EmptyStackError;

/// Simple last-in first-out stack, top is the last element
#[derive(Debug, Clone)]
pub struct Stack<T> {
    items: Vec<T>,
}

impl<T> Stack<T> {
    /// Creates an empty stack
    pub fn new() -> Self {
        Stack { items: Vec::new() }
    }

    /// Pushes an element, it becomes the new top
    pub fn push(&mut self, item: T) {
        self.items.push(item);
    }

    /// Removes and returns the top element
    pub fn pop(&mut self) -> Result<T, EmptyStackError> {
        self.items.pop().ok_or(EmptyStackError)
    }

    /// Returns the top element without removing it
    pub fn peek(&self) -> Result<&T, EmptyStackError> {
        self.items.last().ok_or(EmptyStackError)
    }

    pub fn peek_mut(&mut self) -> Result<&mut T, EmptyStackError> {
        self.items.last_mut().ok_or(EmptyStackError)
    }

    /// Alias of [`Stack::peek`]
    pub fn current(&self) -> Result<&T, EmptyStackError> {
        self.peek()
    }

    pub fn empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }
}

impl<T> Default for Stack<T> {
    fn default() -> Self {
        Self::new()
    }
}
