//! Teardown: every joined participant departs before the process exits.

use winsync_registry::{Presence, SharedMedium};

use super::Host;

impl<M: SharedMedium> Host<M> {
    /// Depart every participant that is still joined.
    ///
    /// A failed departure is logged; the rest still depart.
    pub fn shutdown(&mut self) {
        tracing::info!("Shutting down {} participant(s)", self.participants.len());

        for participant in &mut self.participants {
            if !matches!(participant.presence(), Presence::Joined(_)) {
                continue;
            }
            if let Err(e) = participant.depart() {
                tracing::warn!("Departure failed for {:?}: {e}", participant.id());
            }
        }

        tracing::info!("Shutdown complete");
    }
}
