//! Sound effects and background music, driven by game events.

#[cfg(feature = "audio")]
pub mod stream;

use crate::game::GameEvent;

pub const COLLISION_SOUND: &str = "assets/audio/ghostcollide.wav";
pub const MUSIC_TRACK: &str = "assets/audio/music.wav";

pub trait Audio {
    fn start_music(&mut self);
    fn play_collision(&mut self);
    fn pause_music(&mut self);
    fn resume_music(&mut self);
    /// Called once per frame.
    fn update(&mut self) {}
}

/// Used when no output device or asset is available.
#[derive(Debug, Default)]
pub struct Silent;

impl Audio for Silent {
    fn start_music(&mut self) {}
    fn play_collision(&mut self) {}
    fn pause_music(&mut self) {}
    fn resume_music(&mut self) {}
}

pub fn dispatch(audio: &mut dyn Audio, events: &[GameEvent]) {
    for event in events {
        match event {
            GameEvent::Collision { .. } => {
                audio.play_collision();
                audio.pause_music();
            }
            GameEvent::MusicResumed => audio.resume_music(),
            GameEvent::MazeCompleted { .. } | GameEvent::Won => {}
        }
    }
    audio.update();
}

/// Opens the rodio backend, falling back to silence when the device or the
/// asset files are missing.
pub fn open() -> Box<dyn Audio> {
    #[cfg(feature = "audio")]
    {
        match stream::RodioAudio::load(COLLISION_SOUND, MUSIC_TRACK) {
            Ok(audio) => return Box::new(audio),
            Err(e) => {
                tracing::warn!(error = %e, "audio disabled");
                eprintln!("Audio disabled: {e}");
            }
        }
    }
    Box::new(Silent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dir::Pos;

    #[derive(Default)]
    struct Recorder {
        calls: Vec<&'static str>,
    }

    impl Audio for Recorder {
        fn start_music(&mut self) {
            self.calls.push("start");
        }
        fn play_collision(&mut self) {
            self.calls.push("collide");
        }
        fn pause_music(&mut self) {
            self.calls.push("pause");
        }
        fn resume_music(&mut self) {
            self.calls.push("resume");
        }
        fn update(&mut self) {
            self.calls.push("update");
        }
    }

    #[test]
    fn collision_plays_sound_and_pauses() {
        let mut audio = Recorder::default();
        let events = [GameEvent::Collision {
            enemy: 2,
            at: Pos::new(1, 1),
        }];
        dispatch(&mut audio, &events);
        assert_eq!(audio.calls, vec!["collide", "pause", "update"]);
    }

    #[test]
    fn resume_and_quiet_events() {
        let mut audio = Recorder::default();
        let events = [
            GameEvent::MazeCompleted { steps: 4 },
            GameEvent::MusicResumed,
            GameEvent::Won,
        ];
        dispatch(&mut audio, &events);
        assert_eq!(audio.calls, vec!["resume", "update"]);
    }
}
