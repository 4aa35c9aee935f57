//! Text-to-speech through an external `espeak-ng` process.
//!
//! Each utterance runs in its own child process fed through stdin. A waiter
//! thread watches the child and reports `SpeechEvent::Finished` on the event
//! channel once it exits, whether it ended naturally or was killed by
//! `cancel`. The controller tells the two apart by generation.

use anyhow::{Context, Result, bail};
use chapter_reader_core::ReaderError;
use chapter_reader_core::speech::{SpeechEngine, SpeechEvent, Utterance, Voice};
use std::io::Write;
use std::process::{Child, Command, Stdio};
use std::sync::mpsc::Sender;
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, info, warn};

const MIN_WPM: u32 = 80;
const MAX_WPM: u32 = 450;
const WAIT_POLL: Duration = Duration::from_millis(40);

type ChildSlot = Arc<Mutex<Option<Child>>>;

struct ActiveUtterance {
    generation: u64,
    child: ChildSlot,
}

pub struct EspeakEngine {
    program: String,
    base_wpm: u32,
    events: Sender<SpeechEvent>,
    active: Option<ActiveUtterance>,
}

impl EspeakEngine {
    pub fn new(program: String, base_wpm: u32, events: Sender<SpeechEvent>) -> Self {
        info!(%program, base_wpm, "Initializing espeak speech engine");
        Self {
            program,
            base_wpm,
            events,
            active: None,
        }
    }

    fn spawn(&self, utterance: &Utterance) -> std::io::Result<Child> {
        let wpm = words_per_minute(self.base_wpm, utterance.rate);
        let mut command = Command::new(&self.program);
        command.arg("-s").arg(wpm.to_string());
        if let Some(voice) = &utterance.voice {
            command.arg("-v").arg(&voice.id);
        }
        debug!(
            generation = utterance.generation,
            wpm,
            voice = utterance.voice.as_ref().map(|v| v.id.as_str()).unwrap_or("default"),
            "Spawning speech process"
        );
        command
            .arg("--stdin")
            .stdin(Stdio::piped())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .spawn()
    }
}

impl SpeechEngine for EspeakEngine {
    fn speak(&mut self, utterance: Utterance) -> Result<(), ReaderError> {
        self.cancel();

        let mut child = self
            .spawn(&utterance)
            .map_err(|err| ReaderError::Speech(format!("{}: {err}", self.program)))?;
        let stdin = child.stdin.take();
        let slot: ChildSlot = Arc::new(Mutex::new(Some(child)));
        let generation = utterance.generation;

        let waiter_slot = Arc::clone(&slot);
        let events = self.events.clone();
        let text = utterance.text;
        thread::spawn(move || {
            if let Some(mut stdin) = stdin {
                // A killed child closes the pipe early; nothing to do about that here.
                if let Err(err) = stdin.write_all(text.as_bytes()) {
                    debug!(generation, "Speech input truncated: {err}");
                }
            }
            wait_for_exit(&waiter_slot, generation);
            if events.send(SpeechEvent::Finished { generation }).is_err() {
                debug!(generation, "Speech event receiver dropped");
            }
        });

        self.active = Some(ActiveUtterance {
            generation,
            child: slot,
        });
        Ok(())
    }

    fn cancel(&mut self) {
        let Some(active) = self.active.take() else {
            return;
        };
        let Ok(mut guard) = active.child.lock() else {
            warn!(generation = active.generation, "Speech process lock poisoned");
            return;
        };
        if let Some(mut child) = guard.take() {
            if let Err(err) = child.kill() {
                debug!(generation = active.generation, "Speech process already gone: {err}");
            }
            let _ = child.wait();
            info!(generation = active.generation, "Cancelled speech process");
        }
    }
}

impl Drop for EspeakEngine {
    fn drop(&mut self) {
        self.cancel();
    }
}

fn wait_for_exit(slot: &ChildSlot, generation: u64) {
    loop {
        {
            let Ok(mut guard) = slot.lock() else {
                return;
            };
            let Some(child) = guard.as_mut() else {
                // Taken by cancel().
                return;
            };
            match child.try_wait() {
                Ok(Some(status)) => {
                    debug!(generation, %status, "Speech process exited");
                    guard.take();
                    return;
                }
                Ok(None) => {}
                Err(err) => {
                    warn!(generation, "Failed to poll speech process: {err}");
                    guard.take();
                    return;
                }
            }
        }
        thread::sleep(WAIT_POLL);
    }
}

/// Map a rate multiplier onto espeak's words-per-minute scale.
pub fn words_per_minute(base_wpm: u32, rate: f32) -> u32 {
    let scaled = (base_wpm as f32 * rate).round();
    if !scaled.is_finite() || scaled <= 0.0 {
        return base_wpm.clamp(MIN_WPM, MAX_WPM);
    }
    (scaled as u32).clamp(MIN_WPM, MAX_WPM)
}

/// Ask the engine for its installed voices.
pub fn list_voices(program: &str) -> Result<Vec<Voice>> {
    let output = Command::new(program)
        .arg("--voices")
        .stdin(Stdio::null())
        .stderr(Stdio::null())
        .output()
        .with_context(|| format!("Running {program} --voices"))?;
    if !output.status.success() {
        bail!("{program} --voices exited with {}", output.status);
    }
    let voices = parse_voice_list(&String::from_utf8_lossy(&output.stdout));
    info!(count = voices.len(), "Enumerated speech voices");
    Ok(voices)
}

/// Enumerate voices off the UI thread and report them on the speech event channel.
pub fn spawn_voice_loader(program: String, events: Sender<SpeechEvent>) -> JoinHandle<()> {
    thread::spawn(move || match list_voices(&program) {
        Ok(voices) => {
            if events.send(SpeechEvent::VoicesChanged(voices)).is_err() {
                debug!("Speech event receiver dropped before voices loaded");
            }
        }
        Err(err) => warn!("Speech voices unavailable; using engine default: {err:#}"),
    })
}

/// Parse the table printed by `espeak-ng --voices`.
pub fn parse_voice_list(listing: &str) -> Vec<Voice> {
    listing
        .lines()
        .filter(|line| !line.trim_start().starts_with("Pty"))
        .filter_map(|line| {
            let columns: Vec<&str> = line.split_whitespace().collect();
            if columns.len() < 5 {
                return None;
            }
            Some(Voice {
                name: columns[3].replace('_', " "),
                language: columns[1].to_string(),
                id: columns[4].to_string(),
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;

    const LISTING: &str = "\
Pty Language       Age/Gender VoiceName          File                 Other Languages
 5  af              --/M      Afrikaans          gmw/af
 2  en-us           --/M      English_(America)  gmw/en-US            (en 10)
 5  fr-fr           --/M      French             roa/fr               (fr 5)
";

    #[test]
    fn parses_voice_table() {
        let voices = parse_voice_list(LISTING);
        assert_eq!(voices.len(), 3);
        assert_eq!(voices[1].name, "English (America)");
        assert_eq!(voices[1].language, "en-us");
        assert_eq!(voices[1].id, "gmw/en-US");
    }

    #[test]
    fn ignores_short_and_header_lines() {
        assert!(parse_voice_list("Pty Language Age/Gender VoiceName File\n\n junk line\n").is_empty());
    }

    #[test]
    fn rate_scales_and_clamps() {
        assert_eq!(words_per_minute(175, 1.0), 175);
        assert_eq!(words_per_minute(175, 2.0), 350);
        assert_eq!(words_per_minute(175, 0.1), MIN_WPM);
        assert_eq!(words_per_minute(175, 5.0), MAX_WPM);
        assert_eq!(words_per_minute(175, f32::NAN), 175);
    }

    #[test]
    fn missing_program_is_refused() {
        let (tx, _rx) = mpsc::channel();
        let mut engine = EspeakEngine::new("definitely-not-a-speech-program".into(), 175, tx);
        let result = engine.speak(Utterance {
            generation: 1,
            text: "hello".into(),
            rate: 1.0,
            voice: None,
        });
        assert!(matches!(result, Err(ReaderError::Speech(_))));
    }

    #[test]
    fn voice_loader_reports_nothing_when_program_is_missing() {
        let (tx, rx) = mpsc::channel();
        spawn_voice_loader("definitely-not-a-speech-program".into(), tx)
            .join()
            .unwrap();
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn cancel_when_idle_is_harmless() {
        let (tx, _rx) = mpsc::channel();
        let mut engine = EspeakEngine::new("espeak-ng".into(), 175, tx);
        engine.cancel();
        engine.cancel();
    }
}
