//! Composite nodes: [`Selector`] and [`Sequence`].

use crate::{Behavior, Status};

/// Priority selector: succeeds on the first child that succeeds.
///
/// Children are tried left to right and evaluation stops at the first
/// `Success`; later children are not ticked. Fails only when every child
/// fails (or when there are no children).
pub struct Selector<C> {
    children: Vec<Box<dyn Behavior<C>>>,
}

impl<C> Selector<C> {
    pub fn new(children: Vec<Box<dyn Behavior<C>>>) -> Self {
        Self { children }
    }
}

impl<C> Behavior<C> for Selector<C> {
    fn tick(&self, ctx: &mut C) -> Status {
        for child in &self.children {
            if child.tick(ctx).is_success() {
                return Status::Success;
            }
        }
        Status::Failure
    }
}

/// Sequence: succeeds only if every child succeeds.
///
/// Stops at the first non-success and returns it. An empty sequence
/// succeeds.
pub struct Sequence<C> {
    children: Vec<Box<dyn Behavior<C>>>,
}

impl<C> Sequence<C> {
    pub fn new(children: Vec<Box<dyn Behavior<C>>>) -> Self {
        Self { children }
    }
}

impl<C> Behavior<C> for Sequence<C> {
    fn tick(&self, ctx: &mut C) -> Status {
        for child in &self.children {
            let status = child.tick(ctx);
            if !status.is_success() {
                return status;
            }
        }
        Status::Success
    }
}
