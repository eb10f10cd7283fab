//! Debounced remote uniqueness rule for the product id

use crate::domain::a001_product::api::ProductApi;
use crate::shared::timer::Timer;
use contracts::domain::a001_product::FieldError;
use std::cell::Cell;
use std::rc::Rc;
use std::time::Duration;

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(500);

/// Uniqueness check with trailing debounce and supersession.
///
/// Every call to [`validate`](Self::validate) takes a new generation number;
/// a call whose generation is no longer the latest resolves to `None` and
/// must not touch the field. Clones share the generation counter.
pub struct UniqueIdValidator<A: ?Sized, T> {
    api: Rc<A>,
    timer: T,
    debounce: Duration,
    generation: Rc<Cell<u64>>,
}

impl<A: ?Sized, T: Clone> Clone for UniqueIdValidator<A, T> {
    fn clone(&self) -> Self {
        Self {
            api: Rc::clone(&self.api),
            timer: self.timer.clone(),
            debounce: self.debounce,
            generation: Rc::clone(&self.generation),
        }
    }
}

impl<A, T> UniqueIdValidator<A, T>
where
    A: ProductApi + ?Sized,
    T: Timer,
{
    pub fn new(api: Rc<A>, timer: T, debounce: Duration) -> Self {
        Self {
            api,
            timer,
            debounce,
            generation: Rc::new(Cell::new(0)),
        }
    }

    /// Validate a candidate id.
    ///
    /// Empty ids are valid without a lookup. Otherwise waits for the
    /// debounce, then asks the API once. Lookup failures count as "not
    /// registered".
    pub async fn validate(&self, id: &str) -> Option<Result<(), FieldError>> {
        let generation = self.advance();
        if id.is_empty() {
            return Some(Ok(()));
        }

        self.timer.sleep(self.debounce).await;
        if !self.is_current(generation) {
            log::debug!("id check: {:?} superseded while debouncing", id);
            return None;
        }

        let exists = match self.api.check_id_exists(id).await {
            Ok(exists) => exists,
            Err(e) => {
                log::warn!("id check: lookup for {:?} failed, accepting: {}", id, e);
                false
            }
        };
        if !self.is_current(generation) {
            log::debug!("id check: result for {:?} superseded", id);
            return None;
        }

        if exists {
            Some(Err(FieldError::IdNotUnique))
        } else {
            Some(Ok(()))
        }
    }

    /// Drop interest in every check in flight
    pub fn cancel(&self) {
        self.advance();
    }

    fn advance(&self) -> u64 {
        let next = self.generation.get() + 1;
        self.generation.set(next);
        next
    }

    fn is_current(&self, generation: u64) -> bool {
        self.generation.get() == generation
    }
}
