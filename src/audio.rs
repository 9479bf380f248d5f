//! Audio cues
//!
//! The simulation only fires cues; nothing it does depends on playback.
//! The headless `AudioManager` logs each cue at its effective volume.

use serde::{Deserialize, Serialize};

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoundEffect {
    /// Game start jingle
    Intro,
    /// Plane appears at the edge of the screen
    PlaneAppear,
    /// Powerup caught in an explosion
    PowerUp,
    /// Game over
    GameOver,
}

impl SoundEffect {
    pub fn as_str(&self) -> &'static str {
        match self {
            SoundEffect::Intro => "intro",
            SoundEffect::PlaneAppear => "plane-appear",
            SoundEffect::PowerUp => "powerup",
            SoundEffect::GameOver => "game-over",
        }
    }
}

/// Fire-and-forget sink for sound cues
pub trait AudioSink {
    fn play(&mut self, effect: SoundEffect);
}

/// Collecting sink, handy for asserting which cues fired
impl AudioSink for Vec<SoundEffect> {
    fn play(&mut self, effect: SoundEffect) {
        self.push(effect);
    }
}

/// Audio manager for the headless runner
#[derive(Debug, Clone)]
pub struct AudioManager {
    master_volume: f32,
    sfx_volume: f32,
    muted: bool,
    cues_played: u32,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    pub fn new() -> Self {
        Self {
            master_volume: 0.8,
            sfx_volume: 1.0,
            muted: false,
            cues_played: 0,
        }
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Set SFX volume (0.0 - 1.0)
    pub fn set_sfx_volume(&mut self, vol: f32) {
        self.sfx_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Get effective volume
    pub fn effective_volume(&self) -> f32 {
        if self.muted {
            0.0
        } else {
            self.master_volume * self.sfx_volume
        }
    }

    /// Number of cues actually played (muted cues are dropped)
    pub fn cues_played(&self) -> u32 {
        self.cues_played
    }
}

impl AudioSink for AudioManager {
    fn play(&mut self, effect: SoundEffect) {
        let vol = self.effective_volume();
        if vol <= 0.0 {
            return;
        }
        self.cues_played += 1;
        log::debug!("sound cue {} at volume {:.2}", effect.as_str(), vol);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_effective_volume() {
        let mut audio = AudioManager::new();
        audio.set_master_volume(0.5);
        audio.set_sfx_volume(2.0);
        assert!((audio.effective_volume() - 0.5).abs() < 1e-6);

        audio.set_muted(true);
        assert_eq!(audio.effective_volume(), 0.0);
    }

    #[test]
    fn test_muted_cues_are_dropped() {
        let mut audio = AudioManager::new();
        audio.play(SoundEffect::Intro);
        audio.set_muted(true);
        audio.play(SoundEffect::GameOver);
        assert_eq!(audio.cues_played(), 1);
    }

    #[test]
    fn test_vec_sink_collects() {
        let mut cues: Vec<SoundEffect> = Vec::new();
        cues.play(SoundEffect::PowerUp);
        assert_eq!(cues, vec![SoundEffect::PowerUp]);
    }
}
