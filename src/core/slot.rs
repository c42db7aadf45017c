/// Releases whatever a live scene holds: recurring callbacks, GPU buffers,
/// DOM nodes.
pub trait Teardown {
    fn teardown(&mut self);
}

/// Owner of at most one live scene.
///
/// Installing a new scene tears the previous one down first, so two render
/// loops never run at once.
pub struct SceneSlot<T: Teardown> {
    active: Option<T>,
    generation: u64,
    requested: u64,
}

impl<T: Teardown> Default for SceneSlot<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Teardown> SceneSlot<T> {
    pub fn new() -> Self {
        Self {
            active: None,
            generation: 0,
            requested: 0,
        }
    }

    /// Tear down the current scene and hand out a ticket for the build that
    /// replaces it. Only the most recent ticket may install.
    pub fn request_build(&mut self) -> u64 {
        self.clear();
        self.requested += 1;
        self.requested
    }

    pub fn is_latest(&self, ticket: u64) -> bool {
        ticket == self.requested
    }

    /// Install `next` if `ticket` is still the latest request; otherwise tear
    /// `next` down and return `None`.
    pub fn install_if_latest(&mut self, ticket: u64, mut next: T) -> Option<u64> {
        if !self.is_latest(ticket) {
            next.teardown();
            return None;
        }
        Some(self.install(next))
    }

    /// Tear down any current scene, take ownership of `next`, and return its
    /// generation number.
    pub fn install(&mut self, next: T) -> u64 {
        self.clear();
        self.generation += 1;
        self.active = Some(next);
        self.generation
    }

    /// Tear down and drop the current scene. Returns false if the slot was
    /// already empty.
    pub fn clear(&mut self) -> bool {
        match self.active.take() {
            Some(mut scene) => {
                scene.teardown();
                true
            }
            None => false,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.active.is_none()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn active(&self) -> Option<&T> {
        self.active.as_ref()
    }

    pub fn active_mut(&mut self) -> Option<&mut T> {
        self.active.as_mut()
    }
}

impl<T: Teardown> Drop for SceneSlot<T> {
    fn drop(&mut self) {
        self.clear();
    }
}
