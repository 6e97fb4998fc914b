use chrono::Utc;
use shared::domain::ProductId;

pub trait IdSource: Send {
    /// `None` once the source cannot produce an id it has not already handed out.
    fn next_id(&mut self) -> Option<ProductId>;
}

// Same millisecond, same id.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClockIds;

impl IdSource for SystemClockIds {
    fn next_id(&mut self) -> Option<ProductId> {
        Some(ProductId(Utc::now().timestamp_millis()))
    }
}

#[derive(Debug, Clone)]
pub struct MonotonicIds<I> {
    inner: I,
    last: Option<ProductId>,
}

impl<I: IdSource> MonotonicIds<I> {
    pub fn new(inner: I) -> Self {
        Self { inner, last: None }
    }

    pub fn observe(&mut self, floor: ProductId) {
        if self.last.map_or(true, |last| floor > last) {
            self.last = Some(floor);
        }
    }
}

impl<I: IdSource> IdSource for MonotonicIds<I> {
    fn next_id(&mut self) -> Option<ProductId> {
        let candidate = self.inner.next_id()?;
        let id = match self.last {
            Some(last) if candidate <= last => ProductId(last.0.checked_add(1)?),
            _ => candidate,
        };
        self.last = Some(id);
        Some(id)
    }
}

impl<T: IdSource + ?Sized> IdSource for Box<T> {
    fn next_id(&mut self) -> Option<ProductId> {
        (**self).next_id()
    }
}

#[cfg(test)]
#[path = "tests/ids_tests.rs"]
mod tests;
