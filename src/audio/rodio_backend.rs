//! Native audio output through rodio

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use rodio::{Decoder, OutputStream, OutputStreamHandle, Sink};

use super::{AudioBackend, AudioError, SoundEffect};

pub struct RodioBackend {
    _stream: OutputStream,
    handle: OutputStreamHandle,
    music: Option<Sink>,
}

impl RodioBackend {
    /// Open the default output device
    pub fn new() -> Result<Self, AudioError> {
        let (stream, handle) =
            OutputStream::try_default().map_err(|e| AudioError::Unavailable(e.to_string()))?;
        Ok(Self {
            _stream: stream,
            handle,
            music: None,
        })
    }

    fn sink(&self) -> Result<Sink, AudioError> {
        Sink::try_new(&self.handle).map_err(|e| AudioError::Unavailable(e.to_string()))
    }
}

fn open(path: &Path) -> Result<BufReader<File>, AudioError> {
    Ok(BufReader::new(File::open(path)?))
}

impl AudioBackend for RodioBackend {
    fn play_once(
        &mut self,
        _effect: SoundEffect,
        path: &Path,
        volume: f32,
    ) -> Result<(), AudioError> {
        let source = Decoder::new(open(path)?).map_err(|e| AudioError::Decode(e.to_string()))?;
        let sink = self.sink()?;
        sink.set_volume(volume);
        sink.append(source);
        sink.detach();
        Ok(())
    }

    fn start_loop(
        &mut self,
        _effect: SoundEffect,
        path: &Path,
        volume: f32,
        rate: f32,
    ) -> Result<(), AudioError> {
        self.stop_loop()?;
        let source =
            Decoder::new_looped(open(path)?).map_err(|e| AudioError::Decode(e.to_string()))?;
        let sink = self.sink()?;
        sink.set_volume(volume);
        sink.set_speed(rate);
        sink.append(source);
        self.music = Some(sink);
        Ok(())
    }

    fn set_loop_rate(&mut self, rate: f32) -> Result<(), AudioError> {
        let sink = self.music.as_ref().ok_or(AudioError::NotPlaying)?;
        sink.set_speed(rate);
        Ok(())
    }

    fn stop_loop(&mut self) -> Result<(), AudioError> {
        if let Some(sink) = self.music.take() {
            sink.stop();
        }
        Ok(())
    }
}
