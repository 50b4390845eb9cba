/// Terminal audio sink.  A terminal has no mixer, so each request is logged
/// and, when enabled, rung on the bell.

use std::io::Write;

use invaders::entities::Sound;
use invaders::render::AudioSink;
use tracing::{debug, warn};

pub struct TerminalAudio {
    bell: bool,
}

impl TerminalAudio {
    pub fn new(bell: bool) -> Self {
        Self { bell }
    }
}

impl AudioSink for TerminalAudio {
    fn play(&mut self, sound: Sound) {
        debug!(resource = sound.resource(), "play sound");
        if !self.bell {
            return;
        }
        let mut out = std::io::stdout();
        if let Err(e) = out.write_all(b"\x07").and_then(|_| out.flush()) {
            warn!(error = %e, "bell failed");
        }
    }
}
