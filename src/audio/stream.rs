use std::fs::File;
use std::io::{Cursor, Read};
use std::path::Path;
use std::sync::Arc;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};

use super::Audio;
use crate::error::{GameError, GameResult};

const MUSIC_VOLUME: f32 = 0.35;

fn load_bytes(path: &str) -> GameResult<Arc<Vec<u8>>> {
    let mut buf = Vec::new();
    File::open(path)
        .and_then(|mut f| f.read_to_end(&mut buf))
        .map_err(|source| GameError::Asset {
            path: Path::new(path).to_path_buf(),
            source,
        })?;
    Ok(Arc::new(buf))
}

/// rodio output: one looping music sink plus fire-and-forget effect sinks.
pub struct RodioAudio {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    music: Sink,
    collide: Arc<Vec<u8>>,
    track: Arc<Vec<u8>>,
    started: bool,
}

impl RodioAudio {
    pub fn load(collide: &str, music: &str) -> GameResult<Self> {
        let collide = load_bytes(collide)?;
        let track = load_bytes(music)?;
        // Fail at startup rather than on the first collision.
        Decoder::new(Cursor::new(collide.as_ref().clone()))?;

        let (_stream, handle) = OutputStream::try_default()?;
        let music = Sink::try_new(&handle)?;
        music.set_volume(MUSIC_VOLUME);
        Ok(Self {
            _stream,
            handle,
            music,
            collide,
            track,
            started: false,
        })
    }
}

impl Audio for RodioAudio {
    fn start_music(&mut self) {
        if self.started {
            return;
        }
        match Decoder::new_looped(Cursor::new(self.track.as_ref().clone())) {
            Ok(dec) => {
                self.music.append(dec);
                self.music.play();
                self.started = true;
            }
            Err(e) => tracing::warn!(error = %e, "music track could not be decoded"),
        }
    }

    fn play_collision(&mut self) {
        let Ok(dec) = Decoder::new(Cursor::new(self.collide.as_ref().clone())) else {
            return;
        };
        if let Ok(sink) = Sink::try_new(&self.handle) {
            sink.append(dec);
            sink.detach();
        }
    }

    fn pause_music(&mut self) {
        self.music.pause();
    }

    fn resume_music(&mut self) {
        self.music.play();
    }
}
