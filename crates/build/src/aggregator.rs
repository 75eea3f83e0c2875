//! Build-scoped collection of utilities reported by module manifests.

use crate::error::{BuildError, BuildResult};
use crate::stylesheet::BuildStylesheet;
use core::sync::atomic::{AtomicUsize, Ordering};
use dashmap::mapref::entry::Entry;
use dashmap::{DashMap, DashSet};
use ecss_compiler::{UtilityId, UtilityRule};
use ecss_rewriter::Manifest;
use log::{debug, warn};

struct Slot {
    /// First-seen position across the build.
    seq: usize,
    rule: UtilityRule,
}

/// Accumulates the distinct utilities of one build.
///
/// Registration takes `&self` and may be called from many threads at once.
/// [`Aggregator::finish`] consumes the aggregator, so the stylesheet can only
/// be produced once every registering thread has let go of it.
#[derive(Default)]
pub struct Aggregator {
    slots: DashMap<UtilityId, Slot>,
    modules: DashSet<String>,
    next_seq: AtomicUsize,
}

impl Aggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a module's utilities. Returns how many were new to this build.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::IdentifierCollision`] when an identifier already
    /// stands for a different declaration.
    pub fn register(&self, module: &str, manifest: &Manifest) -> BuildResult<usize> {
        if !self.modules.insert(module.to_owned()) {
            warn!("module `{module}` registered more than once in this build");
        }
        let mut added = 0;
        for rule in manifest.rules() {
            match self.slots.entry(rule.id.clone()) {
                Entry::Occupied(slot) => {
                    let existing = &slot.get().rule.declaration;
                    if *existing != rule.declaration {
                        return Err(BuildError::IdentifierCollision {
                            id: rule.id.clone(),
                            first: existing.canonical_key(),
                            second: rule.declaration.canonical_key(),
                        });
                    }
                }
                Entry::Vacant(slot) => {
                    slot.insert(Slot {
                        seq: self.next_seq.fetch_add(1, Ordering::Relaxed),
                        rule: rule.clone(),
                    });
                    added += 1;
                }
            }
        }
        debug!(
            "module `{module}`: {} utilities, {added} new",
            manifest.len()
        );
        Ok(added)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn module_count(&self) -> usize {
        self.modules.len()
    }

    /// Close the build and order the utilities by first sighting.
    pub fn finish(self) -> BuildStylesheet {
        let mut slots: Vec<Slot> = self.slots.into_iter().map(|(_, slot)| slot).collect();
        slots.sort_by_key(|slot| slot.seq);
        BuildStylesheet::new(slots.into_iter().map(|slot| slot.rule).collect())
    }
}
