// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at http://mozilla.org/MPL/2.0/.

//! Progress narration.  Big renders take a while, and it helps to be
//! told how far along they are, on the console or out loud.  The
//! renderer does not care who is listening; it announces to whatever
//! `Narrator` it is handed for the duration of one render.

use num::Complex;
use std::process::{Command, Stdio};

/// Anything that can receive progress messages.
pub trait Narrator {
    /// Deliver one message.  Narration is cosmetic, so this cannot
    /// fail; implementations deal with their own trouble.
    fn announce(&mut self, message: &str);
}

/// Prints each message on its own line to stdout.
#[derive(Debug, Default)]
pub struct ConsoleNarrator;

impl Narrator for ConsoleNarrator {
    fn announce(&mut self, message: &str) {
        println!("{}", message);
    }
}

/// Discards every message.
#[derive(Debug, Default)]
pub struct Silent;

impl Narrator for Silent {
    fn announce(&mut self, _message: &str) {}
}

/// A transcript: keeps every message.
impl Narrator for Vec<String> {
    fn announce(&mut self, message: &str) {
        self.push(message.to_string());
    }
}

/// The default program used to speak.
pub const DEFAULT_SPEECH_COMMAND: &str = "espeak";

/// Reads each message aloud by running a text-to-speech program with
/// the message as its only argument, and waiting for it to finish.
/// If the program cannot be run, says so once on stderr and keeps
/// quiet for the rest of its life.
#[derive(Debug)]
pub struct SpeechNarrator {
    program: String,
    enabled: bool,
}

impl SpeechNarrator {
    /// Speak through the given program, e.g. `espeak` or `say`.
    pub fn new(program: &str) -> SpeechNarrator {
        SpeechNarrator {
            program: program.to_string(),
            enabled: true,
        }
    }

    /// Whether this narrator is still trying to speak.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Default for SpeechNarrator {
    fn default() -> SpeechNarrator {
        SpeechNarrator::new(DEFAULT_SPEECH_COMMAND)
    }
}

impl Narrator for SpeechNarrator {
    fn announce(&mut self, message: &str) {
        if !self.enabled {
            return;
        }
        let status = Command::new(&self.program)
            .arg(message)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status();
        let failure = match status {
            Ok(ref s) if s.success() => return,
            Ok(s) => format!("exited with {}", s),
            Err(e) => e.to_string(),
        };
        eprintln!(
            "Speech disabled: could not run {}: {}",
            self.program, failure
        );
        self.enabled = false;
    }
}

/// Hands every message to several narrators, in order.
#[derive(Default)]
pub struct Chorus(Vec<Box<dyn Narrator>>);

impl Chorus {
    /// An empty chorus; as quiet as `Silent` until voices are added.
    pub fn new() -> Chorus {
        Chorus(vec![])
    }

    /// Add a voice.
    pub fn with<N: Narrator + 'static>(mut self, narrator: N) -> Chorus {
        self.0.push(Box::new(narrator));
        self
    }

    /// Number of voices.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True if nobody is listening.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl Narrator for Chorus {
    fn announce(&mut self, message: &str) {
        for narrator in &mut self.0 {
            narrator.announce(message);
        }
    }
}

/// The progress sentence for an image centred on `center`.
pub fn progress_message(center: Complex<f64>, percent: usize) -> String {
    format!(
        "Your {}+{}i image is {} percent complete.",
        center.re, center.im, percent
    )
}

/// Turns a count of finished pixels into announcements, one for each
/// new multiple of ten percent.
#[derive(Debug)]
pub struct ProgressTracker {
    center: Complex<f64>,
    total: usize,
    reported: usize,
}

impl ProgressTracker {
    /// A tracker for an image of `total` pixels, which announces zero
    /// percent straight away.
    pub fn start(center: Complex<f64>, total: usize, narrator: &mut dyn Narrator) -> ProgressTracker {
        narrator.announce(&progress_message(center, 0));
        ProgressTracker {
            center,
            total,
            reported: 0,
        }
    }

    /// Percent complete after `done` pixels, rounded down to a multiple
    /// of ten.  Counts one pixel ahead, as renders always have, and
    /// never claims more than a hundred.
    pub fn decade(&self, done: usize) -> usize {
        if self.total == 0 {
            return 100;
        }
        let percent = (done + 1) * 100 / self.total;
        (percent / 10 * 10).min(100)
    }

    /// Record that `done` pixels are finished, announcing if that
    /// crosses into a new decade.  Returns the decade announced.
    pub fn advance(&mut self, done: usize, narrator: &mut dyn Narrator) -> Option<usize> {
        let decade = self.decade(done);
        if decade > self.reported {
            self.reported = decade;
            narrator.announce(&progress_message(self.center, decade));
            Some(decade)
        } else {
            None
        }
    }

    /// The last decade announced.
    pub fn reported(&self) -> usize {
        self.reported
    }
}
