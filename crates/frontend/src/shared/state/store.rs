use leptos::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

/// Owner of a piece of engine state.
///
/// Async orchestration touches state only through this trait, so the same
/// code drives a `RwSignal` in the browser and a plain `RefCell` in tests.
/// `None` means the owner is gone (component disposed) and the caller has
/// to drop whatever result it was about to apply.
pub trait Store<T> {
    fn update_with<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R>;
}

impl<T> Store<T> for Rc<RefCell<T>> {
    fn update_with<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }
}

impl<T: Send + Sync + 'static> Store<T> for RwSignal<T> {
    fn update_with<R>(&self, f: impl FnOnce(&mut T) -> R) -> Option<R> {
        self.try_update(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refcell_store() {
        let store = Rc::new(RefCell::new(1));
        assert_eq!(store.update_with(|v| {
            *v += 1;
            *v
        }), Some(2));
        assert_eq!(*store.borrow(), 2);
    }
}
