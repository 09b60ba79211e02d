//! Host-side edit state: the current raster and a bounded undo history.
//!
//! The filters never see this; it only sequences them. Every applied filter
//! pushes its result, the oldest snapshot is dropped past
//! [`HISTORY_CAPACITY`], and `revert` steps back one snapshot.

use std::collections::VecDeque;
use std::path::Path;

use log::{debug, info};

use crate::config::HISTORY_CAPACITY;
use crate::error::{FilterError, Result};
use crate::filters::Filter;
use crate::raster::Raster;

/// Bounded stack of raster snapshots, newest last.
#[derive(Debug, Clone)]
pub struct History {
    entries: VecDeque<Raster>,
    capacity: usize,
}

impl Default for History {
    fn default() -> Self {
        Self::with_capacity(HISTORY_CAPACITY)
    }
}

impl History {
    /// A history holding at most `capacity` snapshots (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Push a snapshot, evicting the oldest when full.
    pub fn push(&mut self, raster: Raster) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(raster);
    }

    /// Drop the newest snapshot and return the one before it, which stays in
    /// the history. With one snapshot or none there is nothing to go back to.
    pub fn revert(&mut self) -> Option<&Raster> {
        if self.entries.len() < 2 {
            return None;
        }
        self.entries.pop_back();
        self.entries.back()
    }

    pub fn latest(&self) -> Option<&Raster> {
        self.entries.back()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Current raster plus its history, driven one filter at a time.
#[derive(Debug, Clone, Default)]
pub struct EditSession {
    current: Option<Raster>,
    history: History,
}

impl EditSession {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode an image file (any format the codec knows), normalized to RGB8.
    pub fn open<P: AsRef<Path>>(&mut self, path: P) -> Result<&Raster> {
        let path = path.as_ref();
        let image = image::open(path)?;
        let raster = Raster::from_dynamic_image(&image)?;
        info!(
            "opened {} ({}x{})",
            path.display(),
            raster.width(),
            raster.height()
        );
        Ok(self.load(raster))
    }

    /// Start editing an in-memory raster. Earlier history is kept, as when a
    /// new file is opened mid-session.
    pub fn load(&mut self, raster: Raster) -> &Raster {
        self.history.push(raster.clone());
        self.current.insert(raster)
    }

    /// Run `filter` on the current raster and make the result current.
    pub fn apply(&mut self, filter: &Filter) -> Result<&Raster> {
        let current = self.current.as_ref().ok_or(FilterError::NoImage)?;
        let next = filter.apply(current)?;
        debug!("applied {} (history {})", filter, self.history.len() + 1);
        self.history.push(next.clone());
        Ok(self.current.insert(next))
    }

    /// Step back to the previous snapshot. Returns `false` when there is
    /// nothing to revert to, leaving the session untouched.
    pub fn revert(&mut self) -> bool {
        match self.history.revert() {
            Some(previous) => {
                self.current = Some(previous.clone());
                debug!("reverted (history {})", self.history.len());
                true
            }
            None => false,
        }
    }

    /// Encode the current raster; the format follows the file extension.
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        let current = self.current.as_ref().ok_or(FilterError::NoImage)?;
        current.to_rgb_image()?.save(path)?;
        info!("saved {}", path.display());
        Ok(())
    }

    pub fn current(&self) -> Option<&Raster> {
        self.current.as_ref()
    }

    pub fn history(&self) -> &History {
        &self.history
    }
}
