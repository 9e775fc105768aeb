/// A click-equivalent interaction bubbling up from `target`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractionEvent<N> {
    target: N,
    default_prevented: bool,
    propagation_stopped: bool,
}

impl<N: Copy> InteractionEvent<N> {
    pub fn new(target: N) -> Self {
        Self {
            target,
            default_prevented: false,
            propagation_stopped: false,
        }
    }

    /// Element the interaction originated from.
    pub fn target(&self) -> N {
        self.target
    }

    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    pub fn stop_propagation(&mut self) {
        self.propagation_stopped = true;
    }

    pub fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    pub fn propagation_stopped(&self) -> bool {
        self.propagation_stopped
    }
}
