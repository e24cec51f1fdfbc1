//! Leaf nodes wrapping closures over the context.

use crate::{Behavior, Status};

/// Read-only predicate leaf: `Success` when the predicate holds.
pub struct Condition<C> {
    check: Box<dyn Fn(&C) -> bool + Send + Sync>,
}

impl<C> Condition<C> {
    pub fn new(check: impl Fn(&C) -> bool + Send + Sync + 'static) -> Self {
        Self { check: Box::new(check) }
    }
}

impl<C> Behavior<C> for Condition<C> {
    #[inline]
    fn tick(&self, ctx: &mut C) -> Status {
        Status::from_bool((self.check)(ctx))
    }
}

/// Effect leaf: runs the closure and reports whatever it returns.
pub struct Action<C> {
    effect: Box<dyn Fn(&mut C) -> Status + Send + Sync>,
}

impl<C> Action<C> {
    pub fn new(effect: impl Fn(&mut C) -> Status + Send + Sync + 'static) -> Self {
        Self { effect: Box::new(effect) }
    }
}

impl<C> Behavior<C> for Action<C> {
    #[inline]
    fn tick(&self, ctx: &mut C) -> Status {
        (self.effect)(ctx)
    }
}
