/// Settings handed to every policy constructor when a device is attached.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ElevatorConfig {
    /// Number of queued requests to reserve storage for up front.
    /// Zero grows on demand.
    pub capacity: usize,
}

impl ElevatorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }
}
