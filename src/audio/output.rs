use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::time::Duration;

use rodio::source::SineWave;
use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink, Source};
use thiserror::Error;

/// Why a playback request was refused.
#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("audio output unavailable: {0}")]
    Unavailable(String),

    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode {path}: {reason}")]
    Decode { path: PathBuf, reason: String },

    #[error("no track loaded")]
    NothingLoaded,
}

/// Sound output used by the playlist player and the phase alarm.
pub trait AudioOutput {
    /// Queue a file, paused, replacing whatever was loaded before.
    fn load(&mut self, path: &Path) -> Result<(), PlaybackError>;
    /// Start or continue the loaded file from its current position.
    fn resume(&mut self) -> Result<(), PlaybackError>;
    fn pause(&mut self);
    /// The loaded file played to its end.
    fn is_finished(&self) -> bool;
    /// Short cue marking the end of a phase. Fire-and-forget.
    fn play_alarm(&mut self) -> Result<(), PlaybackError>;
}

/// Frequency and length of the end-of-phase beep.
const ALARM_HZ: f32 = 880.0;
const ALARM_LENGTH: Duration = Duration::from_millis(600);

/// Plays through the default output device.
pub struct RodioOutput {
    // RAII guard for the device. Dropping it silences every sink.
    _stream: OutputStream,
    handle: OutputStreamHandle,
    music: Option<Sink>,
    volume: f32,
}

impl RodioOutput {
    pub fn open(volume: f32) -> Result<Self, PlaybackError> {
        let (stream, handle) = OutputStream::try_default()
            .map_err(|e| PlaybackError::Unavailable(e.to_string()))?;
        Ok(Self {
            _stream: stream,
            handle,
            music: None,
            volume: volume.clamp(0.0, 1.0),
        })
    }

    fn new_sink(&self) -> Result<Sink, PlaybackError> {
        Sink::try_new(&self.handle).map_err(|e| PlaybackError::Unavailable(e.to_string()))
    }
}

impl AudioOutput for RodioOutput {
    fn load(&mut self, path: &Path) -> Result<(), PlaybackError> {
        let file = File::open(path).map_err(|source| PlaybackError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let source = Decoder::new(BufReader::new(file)).map_err(|e| PlaybackError::Decode {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let sink = self.new_sink()?;
        sink.pause();
        sink.set_volume(self.volume);
        sink.append(source);

        // The previous sink stops when dropped
        self.music = Some(sink);
        Ok(())
    }

    fn resume(&mut self) -> Result<(), PlaybackError> {
        let sink = self.music.as_ref().ok_or(PlaybackError::NothingLoaded)?;
        sink.play();
        Ok(())
    }

    fn pause(&mut self) {
        if let Some(sink) = &self.music {
            sink.pause();
        }
    }

    fn is_finished(&self) -> bool {
        self.music.as_ref().is_some_and(|sink| sink.empty())
    }

    fn play_alarm(&mut self) -> Result<(), PlaybackError> {
        let sink = self.new_sink()?;
        sink.append(
            SineWave::new(ALARM_HZ)
                .take_duration(ALARM_LENGTH)
                .amplify(0.25),
        );
        // Let rodio finish the beep on its own thread
        sink.detach();
        Ok(())
    }
}

/// Output that makes no sound.
///
/// `muted()` accepts every request; `unavailable()` refuses playback with
/// the given reason, for machines without an audio device.
pub struct SilentOutput {
    unavailable: Option<String>,
    loaded: bool,
}

impl SilentOutput {
    pub fn muted() -> Self {
        Self { unavailable: None, loaded: false }
    }

    pub fn unavailable(reason: impl Into<String>) -> Self {
        Self { unavailable: Some(reason.into()), loaded: false }
    }

    fn check(&self) -> Result<(), PlaybackError> {
        match &self.unavailable {
            Some(reason) => Err(PlaybackError::Unavailable(reason.clone())),
            None => Ok(()),
        }
    }
}

impl AudioOutput for SilentOutput {
    fn load(&mut self, _path: &Path) -> Result<(), PlaybackError> {
        self.check()?;
        self.loaded = true;
        Ok(())
    }

    fn resume(&mut self) -> Result<(), PlaybackError> {
        self.check()?;
        if !self.loaded {
            return Err(PlaybackError::NothingLoaded);
        }
        Ok(())
    }

    fn pause(&mut self) {}

    fn is_finished(&self) -> bool {
        false
    }

    fn play_alarm(&mut self) -> Result<(), PlaybackError> {
        self.check()
    }
}

/// Open the default device, falling back to a silent output when there is
/// none so the timer still works.
pub fn open_default(mute: bool, volume: f32) -> Box<dyn AudioOutput> {
    if mute {
        log::info!("Audio muted");
        return Box::new(SilentOutput::muted());
    }
    match RodioOutput::open(volume) {
        Ok(output) => {
            log::info!("Opened default audio output");
            Box::new(output)
        }
        Err(e) => {
            log::warn!("{e}; continuing without sound");
            Box::new(SilentOutput::unavailable(e.to_string()))
        }
    }
}
