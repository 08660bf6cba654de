use crate::{
    config::ElevatorConfig,
    error::Result,
    queue::{Direction, Request, RequestArena, RequestId, Sector},
    scheduler::{assert_drained, Elevator},
    stats::ElevatorStats,
};
use static_assertions::assert_impl_all;
use tracing::warn;

/// Arrival-order scheduler. Useful for devices without seek cost and as a
/// baseline for the greedy policy.
pub struct Noop {
    queue: RequestArena<1>,
    // only tracked so seek stats are comparable across policies
    head_position: Sector,
    stats: ElevatorStats,
}
assert_impl_all!(Noop: Send);

impl Noop {
    pub const NAME: &'static str = "noop";

    pub fn new() -> Self {
        Self {
            queue: RequestArena::new(),
            head_position: 0,
            stats: ElevatorStats::new(),
        }
    }

    pub fn with_config(config: &ElevatorConfig) -> Result<Self> {
        Ok(Self {
            queue: RequestArena::try_with_capacity(config.capacity)?,
            head_position: 0,
            stats: ElevatorStats::new(),
        })
    }
}

impl Default for Noop {
    fn default() -> Self {
        Self::new()
    }
}

impl Elevator for Noop {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn add(&mut self, request: Request) -> Result<()> {
        if let Err(err) = self.queue.push_back(0, request) {
            warn!(id = request.id, sector = request.sector, "request added twice, ignored");
            return Err(err);
        }
        self.stats.record_add(self.queue.len());
        Ok(())
    }

    fn dispatch(&mut self, _force: bool) -> Option<Request> {
        let next = self.queue.pop_front(0)?;
        let head = self.head_position;
        self.head_position = next.sector;
        self.stats
            .record_dispatch(Direction::of(next.sector, head), next.distance(head));
        Some(next)
    }

    fn notify_merged(&mut self, surviving: RequestId, absorbed: RequestId) {
        if surviving == absorbed {
            warn!(id = absorbed, "request merged into itself, ignored");
            return;
        }
        if self.queue.remove(absorbed).is_some() {
            self.stats.record_merge();
        }
    }

    fn predecessor(&self, id: RequestId) -> Option<Request> {
        self.queue.prev(id)
    }

    fn successor(&self, id: RequestId) -> Option<Request> {
        self.queue.next(id)
    }

    fn len(&self) -> usize {
        self.queue.len()
    }

    fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    fn head_position(&self) -> Sector {
        self.head_position
    }

    fn stats(&self) -> &ElevatorStats {
        &self.stats
    }

    fn exit(self: Box<Self>) {
        drop(self)
    }
}

impl Drop for Noop {
    fn drop(&mut self) {
        assert_drained(Self::NAME, self.queue.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ElevatorError;

    #[test]
    fn test_noop() {
        let mut scheduler = Noop::new();
        assert!(scheduler.is_empty());
        for (id, sector) in [(1, 150), (2, 120), (3, 80), (4, 50)] {
            scheduler.add(Request::new(id, sector)).unwrap();
        }
        assert_eq!(scheduler.predecessor(1), None);
        assert_eq!(scheduler.successor(1), Some(Request::new(2, 120)));
        assert_eq!(scheduler.predecessor(4), Some(Request::new(3, 80)));

        scheduler.notify_merged(2, 3);
        assert_eq!(scheduler.successor(2), Some(Request::new(4, 50)));

        // misuse leaves the queue as it was
        assert_eq!(
            scheduler.add(Request::new(1, 7)),
            Err(ElevatorError::AlreadyQueued(1))
        );
        scheduler.notify_merged(2, 2);
        assert_eq!(scheduler.len(), 3);
        assert_eq!(scheduler.stats().added, 4);

        // arrival order, regardless of distance
        let order: Vec<_> = std::iter::from_fn(|| scheduler.dispatch(false))
            .map(|r| r.id)
            .collect();
        assert_eq!(order, vec![1, 2, 4]);
        assert_eq!(scheduler.head_position(), 50);

        let stats = scheduler.stats();
        assert_eq!(stats.merged, 1);
        assert_eq!(stats.forward_dispatches, 1);
        assert_eq!(stats.backward_dispatches, 2);
        // 150 + 30 + 70
        assert_eq!(stats.total_seek(), 250);
        Box::new(scheduler).exit();
    }

    #[test]
    #[should_panic(expected = "noop elevator destroyed")]
    fn test_exit_with_queued_requests() {
        let mut scheduler = Box::new(Noop::new());
        scheduler.add(Request::new(1, 10)).unwrap();
        scheduler.exit();
    }
}
