use std::sync::Arc;

use tokio::sync::{AcquireError, OwnedSemaphorePermit, Semaphore};

/// Counting permit pool that bounds simultaneous connect attempts.
///
/// A permit is an owned guard: it goes back to the pool when dropped, on the
/// success path, the error path and when the holding task is aborted.
#[derive(Debug, Clone)]
pub struct ConcurrencyGate {
    permits: Arc<Semaphore>,
    capacity: usize,
}

impl ConcurrencyGate {
    /// A capacity of zero would never admit anyone, so it is raised to one.
    pub fn new(capacity: usize) -> Self {
        let capacity: usize = capacity.max(1);
        Self {
            permits: Arc::new(Semaphore::new(capacity)),
            capacity,
        }
    }

    /// Waits until a slot is free.
    pub async fn acquire(&self) -> Result<OwnedSemaphorePermit, AcquireError> {
        Arc::clone(&self.permits).acquire_owned().await
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use tokio::time::timeout;

    #[tokio::test]
    async fn gate_blocks_when_exhausted_and_reopens_on_drop() {
        let gate = ConcurrencyGate::new(2);
        let first = gate.acquire().await.unwrap();
        let _second = gate.acquire().await.unwrap();
        assert_eq!(gate.permits.available_permits(), 0);

        let blocked = timeout(Duration::from_millis(50), gate.acquire()).await;
        assert!(blocked.is_err(), "third acquire should wait");

        drop(first);
        let third = timeout(Duration::from_millis(50), gate.acquire()).await;
        assert!(matches!(third, Ok(Ok(_))));
    }

    #[tokio::test]
    async fn permit_is_returned_when_task_fails() {
        let gate = ConcurrencyGate::new(1);
        let task_gate = gate.clone();

        let handle = tokio::spawn(async move {
            let _permit = task_gate.acquire().await.unwrap();
            panic!("attempt blew up");
        });
        assert!(handle.await.is_err());

        assert_eq!(gate.permits.available_permits(), 1);
    }

    #[test]
    fn zero_capacity_is_raised_to_one() {
        assert_eq!(ConcurrencyGate::new(0).capacity(), 1);
    }
}
