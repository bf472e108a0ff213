use tokio::sync::{Semaphore, SemaphorePermit};

/// §4.2 bulkhead: bounds concurrent in-flight calls to a platform to
/// `max_concurrent`, with up to `queue_size` callers allowed to wait for a
/// slot before being rejected outright.
pub struct Bulkhead {
    semaphore: Semaphore,
    queue_size: usize,
    waiting: std::sync::atomic::AtomicUsize,
}

pub struct BulkheadPermit<'a>(#[allow(dead_code)] SemaphorePermit<'a>);

impl Bulkhead {
    pub fn new(max_concurrent: usize, queue_size: usize) -> Self {
        Self {
            semaphore: Semaphore::new(max_concurrent),
            queue_size,
            waiting: std::sync::atomic::AtomicUsize::new(0),
        }
    }

    /// Returns `None` immediately if the wait queue is already full;
    /// otherwise waits for a slot and returns a guard that releases it on
    /// drop.
    pub async fn acquire(&self) -> Option<BulkheadPermit<'_>> {
        use std::sync::atomic::Ordering;
        if let Ok(permit) = self.semaphore.try_acquire() {
            return Some(BulkheadPermit(permit));
        }
        if self.waiting.load(Ordering::SeqCst) >= self.queue_size {
            return None;
        }
        self.waiting.fetch_add(1, Ordering::SeqCst);
        let permit = self.semaphore.acquire().await.ok();
        self.waiting.fetch_sub(1, Ordering::SeqCst);
        permit.map(BulkheadPermit)
    }
}
