mod greedy;
mod noop;
pub use greedy::Greedy;
pub use noop::Noop;

use crate::error::Result;
use crate::queue::{Request, RequestId, Sector};
use crate::stats::ElevatorStats;

/// Per-device request scheduling policy: chooses *which request* goes to the
/// device next.
///
/// Implementations do no locking. The host must serialize every call made
/// against one instance, either by owning it on a single thread or by
/// holding one lock around it (see [`DeviceQueue`](crate::DeviceQueue)).
pub trait Elevator {
    /// Name the policy is registered under.
    fn name(&self) -> &'static str;

    /// Queue a request. Fails only if the id is already queued or storage
    /// cannot grow, and leaves the queue untouched in that case.
    fn add(&mut self, request: Request) -> Result<()>;

    /// Remove and return the next request for the device, or `None` when
    /// nothing is queued. `force` is a host hint that policies may ignore.
    fn dispatch(&mut self, force: bool) -> Option<Request>;

    /// `absorbed` has been folded into `surviving` by the host.
    /// Drops `absorbed` from its queue if it is queued here.
    fn notify_merged(&mut self, surviving: RequestId, absorbed: RequestId);

    /// Request queued right before `id` in scheduling order.
    /// `None` at the front, or if `id` is not queued.
    fn predecessor(&self, id: RequestId) -> Option<Request>;

    /// Request queued right after `id` in scheduling order.
    /// `None` at the tail, or if `id` is not queued.
    fn successor(&self, id: RequestId) -> Option<Request>;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn head_position(&self) -> Sector;

    fn stats(&self) -> &ElevatorStats;

    /// Tear down the policy when the device is detached.
    ///
    /// # Panics
    ///
    /// If any request is still queued. The host must drain or cancel every
    /// outstanding request first.
    fn exit(self: Box<Self>);
}

/// Fatal teardown check shared by the policies. Skipped while unwinding so a
/// failing caller does not turn into an abort.
pub(crate) fn assert_drained(policy: &str, queued: usize) {
    if queued == 0 || std::thread::panicking() {
        return;
    }
    tracing::error!(policy, queued, "elevator destroyed with requests still queued");
    panic!("{policy} elevator destroyed with {queued} requests still queued");
}
