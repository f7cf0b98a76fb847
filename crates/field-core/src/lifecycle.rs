//! Interaction-gated audio activation.
//!
//! The host only lets the audio context run after a user gesture, and the
//! resume call completes asynchronously. Input handling may only *request*
//! activation; the front-end performs it and reports back.

#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum ResourceState {
    #[default]
    Inactive,
    Activating,
    Active,
}

#[derive(Debug, Default)]
pub struct AudioLifecycle {
    state: ResourceState,
    pending_request: bool,
}

impl AudioLifecycle {
    pub fn state(&self) -> ResourceState {
        self.state
    }

    pub fn is_active(&self) -> bool {
        self.state == ResourceState::Active
    }

    /// Ask for activation. Ignored unless inactive.
    pub fn request(&mut self) -> bool {
        if self.state != ResourceState::Inactive {
            return false;
        }
        self.state = ResourceState::Activating;
        self.pending_request = true;
        true
    }

    /// Hand the pending request to the front-end, once.
    pub fn take_request(&mut self) -> bool {
        std::mem::take(&mut self.pending_request)
    }

    /// Returns true when this call moved the resource to `Active`.
    pub fn resolve(&mut self, ok: bool) -> bool {
        if self.state != ResourceState::Activating {
            return false;
        }
        if ok {
            self.state = ResourceState::Active;
            true
        } else {
            log::warn!("[audio] context resume failed; audio stays silent");
            self.state = ResourceState::Inactive;
            false
        }
    }
}
