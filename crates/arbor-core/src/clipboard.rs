//! Single-slot file clipboard.

use serde::{Deserialize, Serialize};

use crate::entry::{basename, join_path};

/// Transfer mode; serialized as the host's `"Copy"` / `"Cut"`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ClipboardMode {
    Copy,
    Cut,
}

/// The pending operation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClipboardSlot {
    pub mode: ClipboardMode,
    pub sources: Vec<String>,
    /// Bumped on every copy/cut so a late paste completion cannot clear a
    /// newer slot.
    pub generation: u64,
}

/// One source-to-destination transfer of a paste.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transfer {
    pub source: String,
    pub destination: String,
    pub mode: ClipboardMode,
    pub generation: u64,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Clipboard {
    slot: Option<ClipboardSlot>,
    generation: u64,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    fn store(&mut self, mode: ClipboardMode, sources: Vec<String>) {
        if sources.is_empty() {
            return;
        }
        self.generation += 1;
        self.slot = Some(ClipboardSlot {
            mode,
            sources,
            generation: self.generation,
        });
    }

    /// Replace the slot with a copy of `sources`. Empty input is ignored.
    pub fn copy(&mut self, sources: Vec<String>) {
        self.store(ClipboardMode::Copy, sources);
    }

    /// Replace the slot with a cut of `sources`. Empty input is ignored.
    pub fn cut(&mut self, sources: Vec<String>) {
        self.store(ClipboardMode::Cut, sources);
    }

    pub fn can_paste(&self) -> bool {
        self.slot.is_some()
    }

    pub fn slot(&self) -> Option<&ClipboardSlot> {
        self.slot.as_ref()
    }

    pub fn mode(&self) -> Option<ClipboardMode> {
        self.slot.as_ref().map(|s| s.mode)
    }

    /// Whether `path` is the source of a pending cut.
    pub fn is_cut(&self, path: &str) -> bool {
        self.slot
            .as_ref()
            .is_some_and(|s| s.mode == ClipboardMode::Cut && s.sources.iter().any(|p| p == path))
    }

    /// Transfers for pasting into `directory`; empty when nothing is stored.
    ///
    /// Each source lands at `directory/basename(source)`.
    pub fn transfers(&self, directory: &str) -> Vec<Transfer> {
        let Some(slot) = &self.slot else {
            return Vec::new();
        };
        slot.sources
            .iter()
            .map(|source| Transfer {
                source: source.clone(),
                destination: join_path(directory, basename(source)),
                mode: slot.mode,
                generation: slot.generation,
            })
            .collect()
    }

    /// Record a successful transfer. A cut clears the slot, unless it was
    /// replaced since the paste started.
    pub fn transfer_succeeded(&mut self, mode: ClipboardMode, generation: u64) -> bool {
        let current = self.slot.as_ref().map(|s| s.generation);
        if mode == ClipboardMode::Cut && current == Some(generation) {
            self.slot = None;
            return true;
        }
        false
    }

    pub fn clear(&mut self) {
        self.slot = None;
    }
}
