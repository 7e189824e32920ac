use std::path::PathBuf;
use std::sync::{Arc, Mutex};
use std::thread;

use egui::Pos2;

use crate::disclosure::DisclosureState;
use crate::layout::{build_layout, LayoutParams, TreeLayout};
use crate::listing::DirectoryLister;

struct Published {
    generation: u64,
    layout: TreeLayout,
}

/// Runs layout passes on short-lived worker threads so enumeration never
/// blocks the event loop.
///
/// Every request is stamped with a monotonic generation; a finished layout
/// only lands if nothing newer has been published, and the UI never applies
/// anything older than what it already shows. Out-of-order completions are
/// simply dropped.
pub struct RebuildQueue {
    next_generation: u64,
    applied_generation: u64,
    slot: Arc<Mutex<Option<Published>>>,
}

impl RebuildQueue {
    pub fn new() -> Self {
        Self {
            next_generation: 0,
            applied_generation: 0,
            slot: Arc::new(Mutex::new(None)),
        }
    }

    /// Kick off a full layout pass over a snapshot of the current state.
    pub fn request(
        &mut self,
        lister: Arc<dyn DirectoryLister>,
        root: PathBuf,
        origin: Pos2,
        disclosure: DisclosureState,
        params: LayoutParams,
        ctx: egui::Context,
    ) {
        self.next_generation += 1;
        let generation = self.next_generation;
        let slot = Arc::clone(&self.slot);

        thread::spawn(move || {
            let layout = build_layout(lister.as_ref(), &root, origin, &disclosure, &params);
            publish(&slot, Published { generation, layout });
            ctx.request_repaint();
        });
    }

    /// Latest finished layout, if it is newer than what was last applied.
    pub fn take_latest(&mut self) -> Option<TreeLayout> {
        let published = self.slot.lock().unwrap().take()?;
        if published.generation <= self.applied_generation {
            log::debug!("dropping stale layout generation {}", published.generation);
            return None;
        }
        self.applied_generation = published.generation;
        Some(published.layout)
    }

    /// True while a requested rebuild has not been applied yet.
    pub fn is_pending(&self) -> bool {
        self.next_generation > self.applied_generation
    }
}

impl Default for RebuildQueue {
    fn default() -> Self {
        Self::new()
    }
}

fn publish(slot: &Mutex<Option<Published>>, update: Published) {
    let mut slot = slot.lock().unwrap();
    let superseded = slot
        .as_ref()
        .is_some_and(|current| current.generation > update.generation);
    if superseded {
        log::debug!("discarding superseded layout generation {}", update.generation);
        return;
    }
    *slot = Some(update);
}
