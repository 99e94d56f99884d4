//! Music targets
//!
//! Melody playback drives any [`MusicTarget`]: an edge pin (square wave on
//! its PWM) or an on-board [`Speaker`].

use bitshim_hal::{PinLine, ToneOutput};

use crate::error::{Error, Result};
use crate::pin::Pin;

/// Lowest frequency an on-board speaker is asked to play
pub const SPEAKER_LOW_HZ: u32 = 40;

/// Something a melody can be played on
pub trait MusicTarget {
    /// Prepare for tones
    fn music_on(&mut self) -> Result<()>;

    /// Stop producing tones
    fn music_off(&mut self);

    /// Play `hz` until the next call; 0 is silence
    fn music_frequency(&mut self, hz: u32, desc: Option<&str>) -> Result<()>;
}

impl<L: PinLine> MusicTarget for Pin<L> {
    fn music_on(&mut self) -> Result<()> {
        Pin::music_on(self)
    }

    fn music_off(&mut self) {
        Pin::music_off(self)
    }

    fn music_frequency(&mut self, hz: u32, desc: Option<&str>) -> Result<()> {
        Pin::music_frequency(self, hz, desc)
    }
}

/// On-board speaker playing a looped sine sample
pub struct Speaker<T: ToneOutput> {
    tone: T,
    on: bool,
}

impl<T: ToneOutput> Speaker<T> {
    pub fn new(tone: T) -> Self {
        Self { tone, on: false }
    }

    /// Give back the tone output
    pub fn release(mut self) -> T {
        if self.tone.is_playing() {
            self.tone.stop();
        }
        self.tone
    }
}

impl<T: ToneOutput> MusicTarget for Speaker<T> {
    fn music_on(&mut self) -> Result<()> {
        self.on = true;
        Ok(())
    }

    fn music_off(&mut self) {
        if self.tone.is_playing() {
            self.tone.stop();
        }
        self.on = false;
    }

    /// Frequencies at or below [`SPEAKER_LOW_HZ`] silence the speaker
    fn music_frequency(&mut self, hz: u32, _desc: Option<&str>) -> Result<()> {
        if !self.on {
            return Err(Error::InvalidState("music_on() must be called first"));
        }
        // The looped sample must be stopped before its rate can change
        if self.tone.is_playing() {
            self.tone.stop();
        }
        if hz > SPEAKER_LOW_HZ {
            self.tone.play(hz)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use bitshim_hal::{Capability, Pull};
    use bitshim_hal_sim::{SimBoard, SimTone};
    use std::vec;

    fn play<M: MusicTarget>(target: &mut M, notes: &[u32]) -> Result<()> {
        target.music_on()?;
        for &hz in notes {
            target.music_frequency(hz, None)?;
        }
        target.music_frequency(0, None)?;
        target.music_off();
        Ok(())
    }

    #[test]
    fn test_speaker_skips_low_frequencies() {
        let tone = SimTone::new();
        let mut speaker = Speaker::new(tone.clone());
        speaker.music_on().unwrap();

        speaker.music_frequency(440, Some("A4")).unwrap();
        assert_eq!(tone.playing(), Some(440));

        speaker.music_frequency(40, None).unwrap();
        assert_eq!(tone.playing(), None);

        speaker.music_frequency(523, None).unwrap();
        speaker.music_frequency(0, None).unwrap();
        assert_eq!(tone.playing(), None);
        assert_eq!(tone.played(), vec![440, 523]);
    }

    #[test]
    fn test_speaker_needs_music_on() {
        let tone = SimTone::new();
        let mut speaker = Speaker::new(tone.clone());
        assert!(matches!(
            speaker.music_frequency(440, None),
            Err(Error::InvalidState(_))
        ));
        assert!(tone.played().is_empty());
    }

    #[test]
    fn test_same_melody_on_pin_and_speaker() {
        let board = SimBoard::new();
        let mut pin = Pin::new(board.line("pin0", Capability::Touch), Pull::PullDown);
        play(&mut pin, &[262, 294]).unwrap();
        assert_eq!(board.open_handles("pin0"), 0);

        let tone = SimTone::new();
        let mut speaker = Speaker::new(tone.clone());
        play(&mut speaker, &[262, 294]).unwrap();
        assert_eq!(tone.played(), vec![262, 294]);
        assert!(speaker.release().played().len() == 2);
    }
}
