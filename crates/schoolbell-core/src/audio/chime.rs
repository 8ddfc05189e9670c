//! Synthesized fallback chime.
//!
//! Two-tone school-bell-like chime: 880 Hz then 660 Hz sine strikes, each
//! with a quick exponential attack and a decay to silence over its half of
//! the total duration. Used when no sound file is configured or the file
//! fails to decode.

use std::time::Duration;

use rodio::Source;

const SAMPLE_RATE: u32 = 44_100;
const FREQS: [f32; 2] = [880.0, 660.0];
/// Attack length in seconds (the "strike").
const ATTACK_SECS: f32 = 0.02;
/// Envelope floor; exponential ramps start and end here.
const FLOOR: f32 = 0.0001;
const MASTER_GAIN: f32 = 0.3;

/// Finite mono source producing the chime.
pub struct Chime {
    position: usize,
    part_samples: usize,
}

impl Chime {
    pub fn new(duration_ms: u64) -> Self {
        let total_samples = (duration_ms as f32 / 1000.0 * SAMPLE_RATE as f32) as usize;
        Self {
            position: 0,
            part_samples: (total_samples / FREQS.len()).max(1),
        }
    }

    fn total_samples(&self) -> usize {
        self.part_samples * FREQS.len()
    }
}

impl Default for Chime {
    fn default() -> Self {
        Self::new(2000)
    }
}

impl Iterator for Chime {
    type Item = f32;

    fn next(&mut self) -> Option<f32> {
        if self.position >= self.total_samples() {
            return None;
        }
        let part = self.position / self.part_samples;
        let t = (self.position % self.part_samples) as f32 / SAMPLE_RATE as f32;
        let part_secs = self.part_samples as f32 / SAMPLE_RATE as f32;

        // Strike-decay envelope: exponential rise over the attack, then
        // exponential fall to the floor at the end of the part.
        let envelope = if t < ATTACK_SECS {
            FLOOR.powf(1.0 - t / ATTACK_SECS)
        } else {
            FLOOR.powf((t - ATTACK_SECS) / (part_secs - ATTACK_SECS))
        };

        let phase = 2.0 * std::f32::consts::PI * FREQS[part] * t;
        self.position += 1;
        Some(phase.sin() * envelope * MASTER_GAIN)
    }
}

impl Source for Chime {
    fn current_frame_len(&self) -> Option<usize> {
        None
    }

    fn channels(&self) -> u16 {
        1
    }

    fn sample_rate(&self) -> u32 {
        SAMPLE_RATE
    }

    fn total_duration(&self) -> Option<Duration> {
        Some(Duration::from_secs_f32(
            self.total_samples() as f32 / SAMPLE_RATE as f32,
        ))
    }
}
