use crate::{
    config::ElevatorConfig,
    error::{ElevatorError, Result},
    queue::{Direction, Request, RequestArena, RequestId, Sector},
    scheduler::{assert_drained, Elevator},
    stats::ElevatorStats,
};
use static_assertions::assert_impl_all;
use tracing::{trace, warn};

const FORWARD: usize = 0;
const BACKWARD: usize = 1;

fn lane(direction: Direction) -> usize {
    match direction {
        Direction::Forward => FORWARD,
        Direction::Backward => BACKWARD,
    }
}

/// Greedy nearest-sector scheduler.
///
/// Keeps two queues, one for requests ahead of the head and one for requests
/// at or behind it, each sorted by distance from the head as it was when the
/// request was added. Dispatch compares the two fronts against the current
/// head and picks the nearer one, preferring forward on ties.
///
/// Queue order is never recomputed when the head moves. The head only ever
/// jumps to a front that was just dispatched, so every forward entry stays
/// at or ahead of it in ascending order and every backward entry stays at or
/// behind it in descending order.
pub struct Greedy {
    queues: RequestArena<2>,
    head_position: Sector,
    stats: ElevatorStats,
}
assert_impl_all!(Greedy: Send);

impl Greedy {
    pub const NAME: &'static str = "greedy";

    pub fn new() -> Self {
        Self {
            queues: RequestArena::new(),
            head_position: 0,
            stats: ElevatorStats::new(),
        }
    }

    pub fn with_config(config: &ElevatorConfig) -> Result<Self> {
        Ok(Self {
            queues: RequestArena::try_with_capacity(config.capacity)?,
            head_position: 0,
            stats: ElevatorStats::new(),
        })
    }

    /// Queue `id` currently sits in, if any.
    pub fn direction_of(&self, id: RequestId) -> Option<Direction> {
        self.queues.lane_of(id).map(|l| {
            if l == FORWARD {
                Direction::Forward
            } else {
                Direction::Backward
            }
        })
    }

    pub fn queue_len(&self, direction: Direction) -> usize {
        self.queues.lane_len(lane(direction))
    }

    /// Requests in one queue, front first.
    pub fn queued(&self, direction: Direction) -> impl Iterator<Item = &Request> + '_ {
        self.queues.iter(lane(direction))
    }
}

impl Default for Greedy {
    fn default() -> Self {
        Self::new()
    }
}

impl Elevator for Greedy {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    fn add(&mut self, request: Request) -> Result<()> {
        let head = self.head_position;
        let direction = Direction::of(request.sector, head);
        let distance = request.distance(head);
        if self.queues.contains(request.id) {
            warn!(id = request.id, sector = request.sector, "request added twice, ignored");
            return Err(ElevatorError::AlreadyQueued(request.id));
        }
        // ties go behind existing entries of equal distance
        let before = self
            .queues
            .find(lane(direction), |queued| queued.distance(head) > distance);
        self.queues.insert_before(lane(direction), before, request)?;
        self.stats.record_add(self.queues.len());
        trace!(
            id = request.id,
            sector = request.sector,
            head,
            ?direction,
            "queued request"
        );
        Ok(())
    }

    fn dispatch(&mut self, _force: bool) -> Option<Request> {
        let head = self.head_position;
        let forward = self.queues.front(FORWARD).copied();
        let backward = self.queues.front(BACKWARD).copied();
        let (direction, next) = match (forward, backward) {
            (None, None) => return None,
            (Some(f), None) => (Direction::Forward, f),
            (None, Some(b)) => (Direction::Backward, b),
            (Some(f), Some(b)) => {
                if b.distance(head) < f.distance(head) {
                    (Direction::Backward, b)
                } else {
                    (Direction::Forward, f)
                }
            }
        };
        self.queues.remove(next.id);
        self.head_position = next.sector;
        self.stats.record_dispatch(direction, next.distance(head));
        trace!(
            id = next.id,
            from = head,
            to = next.sector,
            ?direction,
            "dispatched request"
        );
        Some(next)
    }

    fn notify_merged(&mut self, surviving: RequestId, absorbed: RequestId) {
        if surviving == absorbed {
            warn!(id = absorbed, "request merged into itself, ignored");
            return;
        }
        if self.queues.remove(absorbed).is_some() {
            self.stats.record_merge();
            trace!(surviving, absorbed, "dropped merged request");
        } else {
            trace!(surviving, absorbed, "merged request not queued here");
        }
    }

    fn predecessor(&self, id: RequestId) -> Option<Request> {
        self.queues.prev(id)
    }

    fn successor(&self, id: RequestId) -> Option<Request> {
        self.queues.next(id)
    }

    fn len(&self) -> usize {
        self.queues.len()
    }

    fn is_empty(&self) -> bool {
        self.queues.is_empty()
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

impl Drop for Greedy {
    fn drop(&mut self) {
        assert_drained(Self::NAME, self.queues.len());
    }
}
