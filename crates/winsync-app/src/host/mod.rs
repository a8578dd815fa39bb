//! The host loop: owns the participants and drives them on a fixed tick.

mod participant;
mod shutdown;

pub use participant::Participant;

use std::time::Duration;

use serde_json::{json, Value};
use tokio::time::MissedTickBehavior;
use winsync_common::{WindowShape, WinsyncError};
use winsync_registry::{RegistryKeys, SharedMedium};

/// Everything the host needs besides the media themselves.
#[derive(Debug, Clone)]
pub struct HostOptions {
    pub keys: RegistryKeys,
    pub tick_interval: Duration,
    /// Shape of the first participant; later ones are laid out to its right.
    pub origin: WindowShape,
    /// Metadata for every participant. `None` attaches a small default.
    pub meta_data: Option<Value>,
    pub drift: f64,
    pub max_ticks: Option<u64>,
}

pub struct Host<M: SharedMedium> {
    participants: Vec<Participant<M>>,
    tick_interval: Duration,
    drift: f64,
    max_ticks: Option<u64>,
}

/// Horizontal gap between in-process participants.
const LAYOUT_GAP: f64 = 20.0;

impl<M: SharedMedium> Host<M> {
    /// Join one participant per medium handle.
    pub fn new(media: Vec<M>, options: HostOptions) -> Result<Self, WinsyncError> {
        let mut participants = Vec::with_capacity(media.len());

        for (index, medium) in media.into_iter().enumerate() {
            let mut shape = options.origin;
            shape.x += index as f64 * (options.origin.w + LAYOUT_GAP);

            let meta_data = options.meta_data.clone().unwrap_or_else(|| {
                json!({
                    "pid": std::process::id(),
                    "index": index,
                })
            });

            let participant = Participant::join(medium, options.keys.clone(), shape, meta_data)?;
            participants.push(participant);
        }

        Ok(Self {
            participants,
            tick_interval: options.tick_interval,
            drift: options.drift,
            max_ticks: options.max_ticks,
        })
    }

    pub fn participants(&self) -> &[Participant<M>] {
        &self.participants
    }

    /// Tick until Ctrl-C or `max_ticks`, then depart everyone.
    ///
    /// Returns the number of ticks run.
    pub async fn run(&mut self) -> u64 {
        let mut interval = tokio::time::interval(self.tick_interval);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);

        let ctrl_c = tokio::signal::ctrl_c();
        tokio::pin!(ctrl_c);

        let mut ticks = 0u64;
        loop {
            tokio::select! {
                result = &mut ctrl_c => {
                    if let Err(e) = result {
                        tracing::warn!("Ctrl-C listener failed: {e}");
                    }
                    tracing::info!("Interrupt received");
                    break;
                }
                _ = interval.tick() => {
                    self.tick_all();
                    ticks += 1;
                    if self.max_ticks.is_some_and(|max| ticks >= max) {
                        tracing::info!("Tick limit reached ({ticks})");
                        break;
                    }
                }
            }
        }

        self.shutdown();
        ticks
    }

    fn tick_all(&mut self) {
        for participant in &mut self.participants {
            if let Err(e) = participant.tick(self.drift) {
                tracing::warn!("Tick failed for {:?}: {e}", participant.id());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use winsync_registry::{MemoryStore, Presence};

    fn options(max_ticks: u64) -> HostOptions {
        HostOptions {
            keys: RegistryKeys::default(),
            tick_interval: Duration::from_millis(1),
            origin: WindowShape::new(0.0, 0.0, 100.0, 80.0),
            meta_data: None,
            drift: 1.0,
            max_ticks: Some(max_ticks),
        }
    }

    #[test]
    fn participants_are_laid_out_side_by_side() {
        let store = MemoryStore::new();
        let host = Host::new(vec![store.connect(), store.connect()], options(1)).unwrap();

        let last = host.participants()[1].registry();
        let shapes: Vec<f64> = last.windows().iter().map(|w| w.shape.x).collect();
        assert_eq!(shapes, vec![0.0, 120.0]);
        assert_eq!(last.windows()[1].meta_data["index"], 1);
    }

    #[tokio::test]
    async fn run_stops_at_tick_limit_and_departs_everyone() {
        let store = MemoryStore::new();
        let mut host = Host::new(
            vec![store.connect(), store.connect(), store.connect()],
            options(3),
        )
        .unwrap();

        let ticks = host.run().await;

        assert_eq!(ticks, 3);
        assert_eq!(store.value("windows").as_deref(), Some("[]"));
        assert!(host
            .participants()
            .iter()
            .all(|p| matches!(p.presence(), Presence::Departed(_))));
        assert_eq!(store.value("count").as_deref(), Some("3"));
    }

    #[test]
    fn explicit_meta_data_is_shared_by_all() {
        let store = MemoryStore::new();
        let mut opts = options(1);
        opts.meta_data = Some(json!({"role": "viewer"}));
        let host = Host::new(vec![store.connect(), store.connect()], opts).unwrap();

        let windows = host.participants()[1].registry().windows();
        assert!(windows.iter().all(|w| w.meta_data["role"] == "viewer"));
    }
}
