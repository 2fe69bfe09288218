//! Facade
//!
//! `VideoConversionFacade` hides the codec, bitrate and audio subsystems
//! behind a single `convert_video` call.

use crate::error::{PlaygroundError, Result};
use std::fmt;
use std::io::Write;
use std::path::PathBuf;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Codec {
    Mpeg4,
    Ogg,
}

impl Codec {
    pub fn extension(self) -> &'static str {
        match self {
            Codec::Mpeg4 => "mp4",
            Codec::Ogg => "ogg",
        }
    }
}

impl fmt::Display for Codec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

impl FromStr for Codec {
    type Err = PlaygroundError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "mp4" => Ok(Codec::Mpeg4),
            "ogg" => Ok(Codec::Ogg),
            _ => Err(PlaygroundError::UnsupportedCodec(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VideoFile {
    name: String,
    codec_type: String,
}

impl VideoFile {
    /// The codec type is whatever follows the last dot.
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        let codec_type = name.rsplit_once('.').map_or("", |(_, ext)| ext).to_string();
        Self { name, codec_type }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn codec_type(&self) -> &str {
        &self.codec_type
    }

    fn stem(&self) -> &str {
        self.name.rsplit_once('.').map_or(self.name.as_str(), |(stem, _)| stem)
    }
}

pub struct CodecFactory;

impl CodecFactory {
    pub fn extract(&self, file: &VideoFile, out: &mut dyn Write) -> Result<Codec> {
        let codec: Codec = file.codec_type().parse()?;
        match codec {
            Codec::Mpeg4 => writeln!(out, "CodecFactory: extracting mpeg audio...")?,
            Codec::Ogg => writeln!(out, "CodecFactory: extracting ogg audio...")?,
        }
        Ok(codec)
    }
}

pub struct BitrateReader;

impl BitrateReader {
    pub fn read(&self, file: VideoFile, codec: Codec, out: &mut dyn Write) -> Result<VideoFile> {
        writeln!(out, "BitrateReader: reading file...")?;
        tracing::debug!(file = file.name(), %codec, "read");
        Ok(file)
    }

    pub fn convert(&self, buffer: VideoFile, codec: Codec, out: &mut dyn Write) -> Result<VideoFile> {
        writeln!(out, "BitrateReader: writing file...")?;
        tracing::debug!(file = buffer.name(), %codec, "convert");
        Ok(VideoFile::new(format!("{}.{}", buffer.stem(), codec.extension())))
    }
}

pub struct AudioMixer;

impl AudioMixer {
    pub fn fix(&self, result: &VideoFile, out: &mut dyn Write) -> Result<PathBuf> {
        writeln!(out, "AudioMixer: fixing audio...")?;
        Ok(PathBuf::from(result.name()))
    }
}

#[derive(Default)]
pub struct VideoConversionFacade;

impl VideoConversionFacade {
    pub fn new() -> Self {
        Self
    }

    /// Converts `file_name` into `format` and returns the resulting path.
    pub fn convert_video(&self, file_name: &str, format: &str, out: &mut dyn Write) -> Result<PathBuf> {
        writeln!(out, "VideoConversionFacade: conversion started.")?;
        let file = VideoFile::new(file_name);
        let source_codec = CodecFactory.extract(&file, out)?;
        let destination_codec: Codec = format.parse()?;
        tracing::info!(%source_codec, %destination_codec, "converting video");

        let buffer = BitrateReader.read(file, source_codec, out)?;
        let intermediate = BitrateReader.convert(buffer, destination_codec, out)?;
        let result = AudioMixer.fix(&intermediate, out)?;
        writeln!(out, "VideoConversionFacade: conversion completed.")?;
        Ok(result)
    }
}
