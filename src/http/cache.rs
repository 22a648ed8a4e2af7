//! Single-slot binary artifact cache.

use std::ptr;
use std::sync::Arc;

use arc_swap::ArcSwapOption;

use crate::build::Artifact;

/// Write-once cache for the compiled binary.
///
/// Starts empty, is populated at most once, and is never invalidated for
/// the lifetime of the server. Publication is an atomic swap of the whole
/// entry, so readers either see nothing or a complete artifact; partial
/// entries cannot be observed. Concurrent first requests may each build
/// the artifact, but only the first publish wins.
#[derive(Default)]
pub struct BinaryCache {
    slot: ArcSwapOption<Artifact>,
}

impl BinaryCache {
    pub fn new() -> Self {
        Self {
            slot: ArcSwapOption::const_empty(),
        }
    }

    /// The cached artifact, if one has been published.
    pub fn get(&self) -> Option<Arc<Artifact>> {
        self.slot.load_full()
    }

    /// Publish an artifact into the empty slot.
    ///
    /// Returns `true` if this call populated the cache; `false` if another
    /// artifact was already published, in which case `artifact` is dropped.
    pub fn publish(&self, artifact: Arc<Artifact>) -> bool {
        let prev = self
            .slot
            .compare_and_swap(ptr::null::<Artifact>(), Some(artifact));
        prev.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;

    fn artifact(byte: u8) -> Arc<Artifact> {
        Arc::new(Artifact {
            contents: Bytes::from(vec![byte; 4]),
            hash: vec![byte],
        })
    }

    #[test]
    fn starts_empty() {
        assert!(BinaryCache::new().get().is_none());
    }

    #[test]
    fn first_publish_wins() {
        let cache = BinaryCache::new();
        assert!(cache.publish(artifact(1)));
        assert!(!cache.publish(artifact(2)));
        assert_eq!(cache.get().unwrap().hash, vec![1]);
    }

    #[test]
    fn concurrent_publishes_keep_a_single_complete_entry() {
        let cache = Arc::new(BinaryCache::new());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let cache = cache.clone();
                std::thread::spawn(move || cache.publish(artifact(i)))
            })
            .collect();

        let wins = handles
            .into_iter()
            .map(|h| h.join().unwrap())
            .filter(|won| *won)
            .count();
        assert_eq!(wins, 1);

        let entry = cache.get().expect("one publish must land");
        // the winning entry is internally consistent
        assert_eq!(entry.contents[0], entry.hash[0]);
    }
}
