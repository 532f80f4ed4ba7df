//! Synchronous observer lists for the simulator.
//!
//! Callbacks run in registration order. A panicking callback is caught and
//! logged so the remaining observers still run; ordering is unchanged.

use std::panic::{self, AssertUnwindSafe};

use tracing::warn;

/// Handle returned by a registration, used to unsubscribe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Subscription(pub(crate) u64);

pub(crate) struct ObserverList<A: ?Sized> {
    entries: Vec<(Subscription, Box<dyn FnMut(&A)>)>,
}

impl<A: ?Sized> Default for ObserverList<A> {
    fn default() -> Self {
        Self { entries: Vec::new() }
    }
}

impl<A: ?Sized> ObserverList<A> {
    pub fn push(&mut self, id: Subscription, callback: Box<dyn FnMut(&A)>) {
        self.entries.push((id, callback));
    }

    pub fn remove(&mut self, id: Subscription) -> bool {
        let before = self.entries.len();
        self.entries.retain(|(sub, _)| *sub != id);
        self.entries.len() != before
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn notify(&mut self, arg: &A) {
        for (id, callback) in self.entries.iter_mut() {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| callback(arg)));
            if outcome.is_err() {
                warn!(subscription = id.0, "observer panicked; continuing with remaining observers");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    #[test]
    fn test_order_and_removal() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let mut list: ObserverList<u32> = ObserverList::default();
        for tag in 0..3u64 {
            let seen = Rc::clone(&seen);
            list.push(Subscription(tag), Box::new(move |v: &u32| seen.borrow_mut().push((tag, *v))));
        }
        list.notify(&7);
        assert_eq!(*seen.borrow(), vec![(0, 7), (1, 7), (2, 7)]);

        assert!(list.remove(Subscription(1)));
        assert!(!list.remove(Subscription(1)));
        list.notify(&8);
        assert_eq!(seen.borrow().len(), 5);
        assert_eq!(list.len(), 2);
    }

    #[test]
    fn test_panicking_observer_is_isolated() {
        let hits = Rc::new(RefCell::new(0));
        let mut list: ObserverList<u32> = ObserverList::default();
        list.push(Subscription(0), Box::new(|_: &u32| panic!("boom")));
        let counter = Rc::clone(&hits);
        list.push(Subscription(1), Box::new(move |_: &u32| *counter.borrow_mut() += 1));
        list.notify(&1);
        assert_eq!(*hits.borrow(), 1);
    }
}
