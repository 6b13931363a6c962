//! Audio playback over HtmlAudioElement
//!
//! Clip loading and decoding belong to the browser; this module only drives
//! volume, playback rate and play/pause. Every call degrades silently when
//! the elements could not be created, so simulation state never depends on
//! playback success.

/// One-shot audio cues
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cue {
    /// Loud vocalization on a monster teleport or jumpscare lead-in
    MonsterVocal,
    /// Quiet ambient whisper
    Whisper,
    /// Session-ending capture sting
    Jumpscare,
}

/// Looping ambient tracks with adjustable volume and playback rate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopTrack {
    Heartbeat,
    Breathing,
    RadioStatic,
}

// Public-domain/CC0 ambience and stingers, loaded straight off the CDN.
#[cfg(target_arch = "wasm32")]
mod urls {
    pub const HEARTBEAT: &str = "https://cdn.pixabay.com/audio/2022/10/16/audio_12e6a9b8d2.mp3";
    pub const BREATHING: &str = "https://cdn.pixabay.com/audio/2022/10/16/audio_12e6bfc655.mp3";
    pub const RADIO_STATIC: &str = "https://cdn.pixabay.com/audio/2022/07/26/audio_124bfa6e3e.mp3";
    pub const MONSTER_VOCAL: &str = "https://cdn.pixabay.com/audio/2022/11/16/audio_128b6e4d1c.mp3";
    pub const WHISPER: &str = "https://cdn.pixabay.com/audio/2022/11/16/audio_128b6e0f6e.mp3";
}

/// Base volumes for each clip before the master volume is applied
fn base_volume(track: LoopTrack) -> f32 {
    match track {
        LoopTrack::Heartbeat => 0.5,
        LoopTrack::Breathing => 0.18,
        LoopTrack::RadioStatic => 0.14,
    }
}

fn cue_volume(cue: Cue) -> f32 {
    match cue {
        Cue::MonsterVocal | Cue::Jumpscare => 0.35,
        Cue::Whisper => 0.15,
    }
}

#[cfg(target_arch = "wasm32")]
struct Elements {
    heartbeat: web_sys::HtmlAudioElement,
    breathing: web_sys::HtmlAudioElement,
    radio_static: web_sys::HtmlAudioElement,
    monster_vocal: web_sys::HtmlAudioElement,
    whisper: web_sys::HtmlAudioElement,
}

/// Audio manager for the game
pub struct AudioManager {
    #[cfg(target_arch = "wasm32")]
    elements: Option<Elements>,
    master_volume: f32,
    muted: bool,
}

impl Default for AudioManager {
    fn default() -> Self {
        Self::new()
    }
}

impl AudioManager {
    #[cfg(target_arch = "wasm32")]
    pub fn new() -> Self {
        let elements = Self::create_elements();
        if elements.is_none() {
            log::warn!("Failed to create audio elements - audio disabled");
        }
        Self {
            elements,
            master_volume: 1.0,
            muted: false,
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn new() -> Self {
        Self {
            master_volume: 1.0,
            muted: false,
        }
    }

    #[cfg(target_arch = "wasm32")]
    fn create_elements() -> Option<Elements> {
        let make_loop = |url: &str| -> Option<web_sys::HtmlAudioElement> {
            let el = web_sys::HtmlAudioElement::new_with_src(url).ok()?;
            el.set_loop(true);
            Some(el)
        };
        let make_cue = |url: &str| web_sys::HtmlAudioElement::new_with_src(url).ok();

        Some(Elements {
            heartbeat: make_loop(urls::HEARTBEAT)?,
            breathing: make_loop(urls::BREATHING)?,
            radio_static: make_loop(urls::RADIO_STATIC)?,
            monster_vocal: make_cue(urls::MONSTER_VOCAL)?,
            whisper: make_cue(urls::WHISPER)?,
        })
    }

    #[cfg(target_arch = "wasm32")]
    fn loop_element(&self, track: LoopTrack) -> Option<&web_sys::HtmlAudioElement> {
        let els = self.elements.as_ref()?;
        Some(match track {
            LoopTrack::Heartbeat => &els.heartbeat,
            LoopTrack::Breathing => &els.breathing,
            LoopTrack::RadioStatic => &els.radio_static,
        })
    }

    /// Set master volume (0.0 - 1.0)
    pub fn set_master_volume(&mut self, vol: f32) {
        self.master_volume = vol.clamp(0.0, 1.0);
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
        #[cfg(target_arch = "wasm32")]
        for track in [LoopTrack::Heartbeat, LoopTrack::Breathing, LoopTrack::RadioStatic] {
            self.set_loop_volume(track, base_volume(track));
        }
    }

    fn effective(&self, vol: f32) -> f32 {
        if self.muted {
            0.0
        } else {
            (vol * self.master_volume).clamp(0.0, 1.0)
        }
    }

    /// Start all ambient loops at their base volumes. Browsers only allow
    /// this after a user gesture, so the host calls it from a click handler.
    pub fn start_ambient(&self) {
        #[cfg(target_arch = "wasm32")]
        for track in [LoopTrack::Heartbeat, LoopTrack::Breathing, LoopTrack::RadioStatic] {
            if let Some(el) = self.loop_element(track) {
                el.set_volume(self.effective(base_volume(track)) as f64);
                if el.paused() {
                    let _ = el.play();
                }
            }
        }
    }

    /// Pause all ambient loops (session end)
    pub fn stop_ambient(&self) {
        #[cfg(target_arch = "wasm32")]
        for track in [LoopTrack::Heartbeat, LoopTrack::Breathing, LoopTrack::RadioStatic] {
            if let Some(el) = self.loop_element(track) {
                let _ = el.pause();
            }
        }
    }

    /// Set a loop's volume (pre-master, 0.0 - 1.0)
    pub fn set_loop_volume(&self, track: LoopTrack, vol: f32) {
        #[cfg(target_arch = "wasm32")]
        if let Some(el) = self.loop_element(track) {
            el.set_volume(self.effective(vol) as f64);
        }
        #[cfg(not(target_arch = "wasm32"))]
        let _ = (track, vol);
    }

    /// Set a loop's playback rate (1.0 = normal)
    pub fn set_loop_rate(&self, track: LoopTrack, rate: f32) {
        #[cfg(target_arch = "wasm32")]
        if let Some(el) = self.loop_element(track) {
            el.set_playback_rate(rate as f64);
        }
        #[cfg(not(target_arch = "wasm32"))]
        let _ = (track, rate);
    }

    /// Play a one-shot cue from the start
    pub fn play(&self, cue: Cue) {
        #[cfg(target_arch = "wasm32")]
        {
            let Some(els) = self.elements.as_ref() else {
                return;
            };
            let el = match cue {
                Cue::MonsterVocal | Cue::Jumpscare => &els.monster_vocal,
                Cue::Whisper => &els.whisper,
            };
            el.set_volume(self.effective(cue_volume(cue)) as f64);
            el.set_current_time(0.0);
            let _ = el.play();
        }
        #[cfg(not(target_arch = "wasm32"))]
        let _ = cue;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cue_volumes_are_audible() {
        for cue in [Cue::MonsterVocal, Cue::Whisper, Cue::Jumpscare] {
            let v = cue_volume(cue);
            assert!(v > 0.0 && v <= 1.0);
        }
    }

    #[test]
    fn muted_manager_is_silent() {
        let mut mgr = AudioManager::new();
        mgr.set_muted(true);
        assert_eq!(mgr.effective(0.5), 0.0);
        mgr.set_muted(false);
        assert!(mgr.effective(0.5) > 0.0);
    }
}
