use std::path::PathBuf;

use anyhow::Result;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Track {
    pub title: String,
    pub path: PathBuf,
}

/// Fixed, ordered track list with a cursor that wraps in both directions.
#[derive(Debug, Clone)]
pub struct Playlist {
    tracks: Vec<Track>,
    current: usize,
}

impl Playlist {
    pub fn new(tracks: Vec<Track>) -> Result<Self> {
        if tracks.is_empty() {
            anyhow::bail!("A playlist needs at least one track");
        }
        Ok(Self { tracks, current: 0 })
    }

    pub fn tracks(&self) -> &[Track] {
        &self.tracks
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn current_index(&self) -> usize {
        self.current
    }

    pub fn current(&self) -> &Track {
        &self.tracks[self.current]
    }

    /// Move to the next track, wrapping from last to first.
    pub fn advance(&mut self) -> usize {
        self.current = (self.current + 1) % self.tracks.len();
        self.current
    }

    /// Move to the previous track, wrapping from first to last.
    pub fn retreat(&mut self) -> usize {
        self.current = (self.current + self.tracks.len() - 1) % self.tracks.len();
        self.current
    }

    /// Jump to `index`. Out-of-range indices are ignored.
    pub fn select(&mut self, index: usize) -> bool {
        if index < self.tracks.len() {
            self.current = index;
            true
        } else {
            false
        }
    }
}
