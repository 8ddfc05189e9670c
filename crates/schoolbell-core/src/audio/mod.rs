//! Bell audio collaborator.
//!
//! rodio's output types are not `Send`, so a dedicated `audio-bell` thread
//! owns the `OutputStream`/`Sink` and the rest of the program talks to it
//! over a command channel. The thread (and the output stream inside it) is
//! created lazily on first use and reused; the sender is guarded by a mutex
//! so at most one initialization ever happens.
//!
//! Playback is best-effort: a sound file that fails to open or decode falls
//! back to the synthesized [`chime::Chime`], and any remaining failure is
//! logged and swallowed. Sound must never take down the countdown.

pub mod chime;

use std::fs::File;
use std::io::BufReader;
use std::path::PathBuf;
use std::sync::mpsc::{self, Sender};
use std::sync::Mutex;
use std::thread;

use log::warn;
use rodio::{Decoder, OutputStream, Sink, Source};

use crate::error::AudioError;
use chime::Chime;

/// Side-effect contract the countdown host depends on.
pub trait Bell {
    /// Fire one chime. Returns an error only when the audio thread itself
    /// is unavailable; playback problems are handled internally.
    fn ring(&self) -> Result<(), AudioError>;
}

enum AudioCommand {
    /// Eagerly open the output stream; ack with the outcome.
    Unlock(Sender<Result<(), String>>),
    Ring,
    /// Ack once everything queued so far has finished playing.
    Flush(Sender<()>),
}

/// Handle to the audio thread.
pub struct BellPlayer {
    tx: Mutex<Option<Sender<AudioCommand>>>,
    /// Optional sound file played instead of the synthesized chime.
    sound_file: Option<PathBuf>,
}

impl BellPlayer {
    pub fn new(sound_file: Option<PathBuf>) -> Self {
        Self {
            tx: Mutex::new(None),
            sound_file,
        }
    }

    /// Initialize the audio output now, from a direct user action, so later
    /// autonomous rings have no setup latency. Reports setup failure; a host
    /// without any audio capability is not recoverable.
    pub fn unlock(&self) -> Result<(), AudioError> {
        let tx = self.ensure_thread()?;
        let (ack_tx, ack_rx) = mpsc::channel();
        tx.send(AudioCommand::Unlock(ack_tx))
            .map_err(|_| AudioError::ThreadStopped)?;
        ack_rx
            .recv()
            .map_err(|_| AudioError::ThreadStopped)?
            .map_err(AudioError::OutputUnavailable)
    }

    /// Block until queued playback has finished. Used by one-shot hosts
    /// (`bell test`) that would otherwise exit mid-chime.
    pub fn flush(&self) -> Result<(), AudioError> {
        let tx = self.ensure_thread()?;
        let (ack_tx, ack_rx) = mpsc::channel();
        tx.send(AudioCommand::Flush(ack_tx))
            .map_err(|_| AudioError::ThreadStopped)?;
        ack_rx.recv().map_err(|_| AudioError::ThreadStopped)
    }

    fn ensure_thread(&self) -> Result<Sender<AudioCommand>, AudioError> {
        let mut guard = self.tx.lock().map_err(|_| AudioError::ThreadStopped)?;
        if let Some(tx) = guard.as_ref() {
            return Ok(tx.clone());
        }

        let (tx, rx) = mpsc::channel::<AudioCommand>();
        let sound_file = self.sound_file.clone();

        // The thread holds the non-Send rodio objects for its whole life.
        thread::Builder::new()
            .name("audio-bell".to_string())
            .spawn(move || {
                let mut stream: Option<OutputStream> = None;
                let mut sink: Option<Sink> = None;

                fn ensure_sink(
                    stream: &mut Option<OutputStream>,
                    sink: &mut Option<Sink>,
                ) -> Result<(), String> {
                    if sink.is_none() {
                        let (s, handle) = OutputStream::try_default()
                            .map_err(|e| format!("failed to open output stream: {e}"))?;
                        let new_sink = Sink::try_new(&handle)
                            .map_err(|e| format!("failed to create sink: {e}"))?;
                        *stream = Some(s);
                        *sink = Some(new_sink);
                    }
                    Ok(())
                }

                while let Ok(cmd) = rx.recv() {
                    match cmd {
                        AudioCommand::Unlock(ack) => {
                            let _ = ack.send(ensure_sink(&mut stream, &mut sink));
                        }
                        AudioCommand::Ring => {
                            if let Err(e) = ensure_sink(&mut stream, &mut sink) {
                                warn!("bell skipped: {e}");
                                continue;
                            }
                            if let Some(ref s) = sink {
                                append_bell(s, sound_file.as_deref());
                            }
                        }
                        AudioCommand::Flush(ack) => {
                            if let Some(ref s) = sink {
                                s.sleep_until_end();
                            }
                            let _ = ack.send(());
                        }
                    }
                }
            })
            .map_err(|e| AudioError::SpawnFailed(e.to_string()))?;

        let tx_clone = tx.clone();
        *guard = Some(tx);
        Ok(tx_clone)
    }
}

impl Bell for BellPlayer {
    fn ring(&self) -> Result<(), AudioError> {
        let tx = self.ensure_thread()?;
        tx.send(AudioCommand::Ring)
            .map_err(|_| AudioError::ThreadStopped)
    }
}

/// Queue the configured sound file, falling back to the synthesized chime
/// when it cannot be opened or decoded.
fn append_bell(sink: &Sink, sound_file: Option<&std::path::Path>) {
    if let Some(path) = sound_file {
        match File::open(path).map_err(|e| e.to_string()).and_then(|f| {
            Decoder::new(BufReader::new(f)).map_err(|e| e.to_string())
        }) {
            Ok(source) => {
                sink.append(source.convert_samples::<f32>());
                return;
            }
            Err(e) => warn!("sound file {} unusable, using chime: {e}", path.display()),
        }
    }
    sink.append(Chime::default());
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// Recording fake for trigger-loop tests.
    pub struct CountingBell {
        pub rings: AtomicUsize,
    }

    impl Bell for CountingBell {
        fn ring(&self) -> Result<(), AudioError> {
            self.rings.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    #[test]
    fn bell_trait_is_object_safe() {
        let counting = CountingBell { rings: AtomicUsize::new(0) };
        let bell: &dyn Bell = &counting;
        bell.ring().unwrap();
        bell.ring().unwrap();
        assert_eq!(counting.rings.load(Ordering::SeqCst), 2);
    }
}
