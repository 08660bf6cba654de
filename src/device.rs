use crate::{
    config::ElevatorConfig,
    error::Result,
    queue::{Request, RequestId, Sector},
    registry::Registry,
    scheduler::Elevator,
    stats::ElevatorStats,
};
use parking_lot::Mutex;
use static_assertions::assert_impl_all;
use tracing::debug;

/// A device's request queue as seen by the host: one elevator behind one lock.
/// Every operation takes the lock for its whole duration, which is exactly the
/// serialization [`Elevator`] implementations rely on.
pub struct DeviceQueue {
    policy: &'static str,
    elevator: Mutex<Box<dyn Elevator + Send>>,
}
assert_impl_all!(DeviceQueue: Send, Sync);

impl DeviceQueue {
    pub fn new(elevator: Box<dyn Elevator + Send>) -> Self {
        Self {
            policy: elevator.name(),
            elevator: Mutex::new(elevator),
        }
    }

    /// Build the policy registered as `name` and attach it.
    pub fn attach(registry: &Registry, name: &str, config: &ElevatorConfig) -> Result<Self> {
        let elevator = registry.create(name, config)?;
        debug!(policy = name, capacity = config.capacity, "attached elevator");
        Ok(Self::new(elevator))
    }

    pub fn policy(&self) -> &'static str {
        self.policy
    }

    pub fn add(&self, request: Request) -> Result<()> {
        self.elevator.lock().add(request)
    }

    pub fn dispatch(&self, force: bool) -> Option<Request> {
        self.elevator.lock().dispatch(force)
    }

    pub fn notify_merged(&self, surviving: RequestId, absorbed: RequestId) {
        self.elevator.lock().notify_merged(surviving, absorbed)
    }

    pub fn predecessor(&self, id: RequestId) -> Option<Request> {
        self.elevator.lock().predecessor(id)
    }

    pub fn successor(&self, id: RequestId) -> Option<Request> {
        self.elevator.lock().successor(id)
    }

    pub fn len(&self) -> usize {
        self.elevator.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.elevator.lock().is_empty()
    }

    pub fn head_position(&self) -> Sector {
        self.elevator.lock().head_position()
    }

    pub fn stats(&self) -> ElevatorStats {
        self.elevator.lock().stats().clone()
    }

    /// Detach the elevator from the device.
    ///
    /// # Panics
    ///
    /// If requests are still queued.
    pub fn detach(self) {
        debug!(policy = self.policy, "detaching elevator");
        self.elevator.into_inner().exit();
    }
}
