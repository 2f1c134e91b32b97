//! Sound cues and the sink that plays them.

/// Sound requested by the session. Playback itself belongs to the sink.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SoundCue {
    MusicOn,
    MusicOff,
    Jump,
    Pickup,
    LevelUp,
    Poison,
    Win,
    Lose,
}

pub trait AudioSink {
    fn play(&mut self, cue: SoundCue);
}

/// Sink for builds without an audio device: records each cue in the log.
#[derive(Debug, Default)]
pub struct LogAudio {
    music_playing: bool,
}

impl LogAudio {
    pub fn music_playing(&self) -> bool {
        self.music_playing
    }
}

impl AudioSink for LogAudio {
    fn play(&mut self, cue: SoundCue) {
        match cue {
            SoundCue::MusicOn => self.music_playing = true,
            SoundCue::MusicOff => self.music_playing = false,
            _ => {}
        }
        log::debug!("audio: {:?}", cue);
    }
}
