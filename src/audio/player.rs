use super::output::AudioOutput;
use super::playlist::Playlist;

/// Plays the playlist through an `AudioOutput`.
///
/// Playback failures are logged and leave the player stopped; nothing is
/// retried until the next explicit request.
pub struct PlaylistPlayer {
    playlist: Playlist,
    output: Box<dyn AudioOutput>,
    /// Index of the track currently queued in the output.
    loaded: Option<usize>,
    playing: bool,
}

impl PlaylistPlayer {
    pub fn new(playlist: Playlist, output: Box<dyn AudioOutput>) -> Self {
        Self {
            playlist,
            output,
            loaded: None,
            playing: false,
        }
    }

    pub fn playlist(&self) -> &Playlist {
        &self.playlist
    }

    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Play the current track, loading it first unless it is already queued
    /// (in which case it continues where it stopped).
    pub fn play(&mut self) -> bool {
        let index = self.playlist.current_index();
        if self.loaded != Some(index) {
            let track = self.playlist.current();
            if let Err(e) = self.output.load(&track.path) {
                log::error!("Playback of '{}' rejected: {e}", track.title);
                self.loaded = None;
                self.playing = false;
                return false;
            }
            log::debug!("Loaded '{}' from {}", track.title, track.path.display());
            self.loaded = Some(index);
        }

        match self.output.resume() {
            Ok(()) => {
                log::info!("Playing '{}'", self.playlist.current().title);
                self.playing = true;
                true
            }
            Err(e) => {
                log::error!("Playback of '{}' rejected: {e}", self.playlist.current().title);
                self.playing = false;
                false
            }
        }
    }

    /// Stop without losing the position in the track.
    pub fn pause(&mut self) {
        if self.playing {
            self.output.pause();
            self.playing = false;
            log::debug!("Music paused");
        }
    }

    pub fn toggle(&mut self) -> bool {
        if self.playing {
            self.pause();
            false
        } else {
            self.play()
        }
    }

    pub fn next(&mut self) -> bool {
        self.playlist.advance();
        self.play()
    }

    pub fn previous(&mut self) -> bool {
        self.playlist.retreat();
        self.play()
    }

    /// Play track `index` from its start, even when it is the one queued.
    pub fn select(&mut self, index: usize) -> bool {
        if !self.playlist.select(index) {
            return false;
        }
        self.loaded = None;
        self.play()
    }

    /// Advance to the next track when the current one played to its end.
    /// Returns true when that happened.
    pub fn poll_finished(&mut self) -> bool {
        if self.playing && self.output.is_finished() {
            log::info!("Finished '{}'", self.playlist.current().title);
            // The drained track must be queued again if the playlist wraps
            // back onto it.
            self.loaded = None;
            self.next();
            true
        } else {
            false
        }
    }

    pub fn sound_alarm(&mut self) {
        if let Err(e) = self.output.play_alarm() {
            log::error!("Alarm cue failed: {e}");
        }
    }
}
