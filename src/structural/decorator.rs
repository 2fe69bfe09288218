//! Decorator
//!
//! Encryption and compression wrap any `DataSource` and transform the data
//! on its way in and out. Layers stack in any order; reading undoes them in
//! reverse.

use crate::error::Result;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use flate2::read::ZlibDecoder;
use flate2::write::ZlibEncoder;
use flate2::Compression;
use std::fs;
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

pub const SALARY_RECORDS: &str = "Name,Salary\nJohn Smith,100000\nSteven Jobs,912000";

pub trait DataSource {
    fn write_data(&mut self, data: &str) -> Result<()>;
    fn read_data(&self) -> Result<String>;
}

/// Stores the data verbatim in a file.
#[derive(Debug, Clone)]
pub struct FileDataSource {
    path: PathBuf,
}

impl FileDataSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DataSource for FileDataSource {
    fn write_data(&mut self, data: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        fs::write(&self.path, data)?;
        tracing::debug!(path = %self.path.display(), bytes = data.len(), "data written");
        Ok(())
    }

    fn read_data(&self) -> Result<String> {
        Ok(fs::read_to_string(&self.path)?)
    }
}

/// Shifts every byte up by one, then Base64-encodes the result.
pub struct EncryptionDecorator<D> {
    wrappee: D,
}

impl<D: DataSource> EncryptionDecorator<D> {
    pub fn new(wrappee: D) -> Self {
        Self { wrappee }
    }

    pub fn into_inner(self) -> D {
        self.wrappee
    }

    fn encode(data: &str) -> String {
        let shifted: Vec<u8> = data.bytes().map(|b| b.wrapping_add(1)).collect();
        STANDARD.encode(shifted)
    }

    fn decode(data: &str) -> Result<String> {
        let bytes = STANDARD.decode(data.trim_end())?;
        let restored: Vec<u8> = bytes.into_iter().map(|b| b.wrapping_sub(1)).collect();
        Ok(String::from_utf8(restored)?)
    }
}

impl<D: DataSource> DataSource for EncryptionDecorator<D> {
    fn write_data(&mut self, data: &str) -> Result<()> {
        self.wrappee.write_data(&Self::encode(data))
    }

    fn read_data(&self) -> Result<String> {
        Self::decode(&self.wrappee.read_data()?)
    }
}

pub const DEFAULT_COMPRESSION_LEVEL: u32 = 6;

/// Zlib-deflates the data, then Base64-encodes it.
pub struct CompressionDecorator<D> {
    wrappee: D,
    level: u32,
}

impl<D: DataSource> CompressionDecorator<D> {
    pub fn new(wrappee: D) -> Self {
        Self {
            wrappee,
            level: DEFAULT_COMPRESSION_LEVEL,
        }
    }

    pub fn compression_level(&self) -> u32 {
        self.level
    }

    /// Levels run from 0 (store) to 9 (best); larger values are capped.
    pub fn set_compression_level(&mut self, level: u32) {
        self.level = level.min(9);
    }

    pub fn into_inner(self) -> D {
        self.wrappee
    }

    fn compress(&self, data: &str) -> Result<String> {
        let mut encoder = ZlibEncoder::new(Vec::with_capacity(512), Compression::new(self.level));
        encoder.write_all(data.as_bytes())?;
        let compressed = encoder.finish()?;
        tracing::debug!(
            level = self.level,
            input = data.len(),
            output = compressed.len(),
            "compressed"
        );
        Ok(STANDARD.encode(compressed))
    }

    fn decompress(data: &str) -> Result<String> {
        let bytes = STANDARD.decode(data.trim_end())?;
        let mut decoder = ZlibDecoder::new(bytes.as_slice());
        let mut text = String::new();
        decoder.read_to_string(&mut text)?;
        Ok(text)
    }
}

impl<D: DataSource> DataSource for CompressionDecorator<D> {
    fn write_data(&mut self, data: &str) -> Result<()> {
        let compressed = self.compress(data)?;
        self.wrappee.write_data(&compressed)
    }

    fn read_data(&self) -> Result<String> {
        Self::decompress(&self.wrappee.read_data()?)
    }
}

/// Writes `records` through compression over encryption into `path`, then
/// prints the input, the raw file content and the decoded content.
pub fn run_demo(records: &str, path: &Path, level: u32, out: &mut dyn Write) -> Result<()> {
    let mut encoded = CompressionDecorator::new(EncryptionDecorator::new(FileDataSource::new(path)));
    encoded.set_compression_level(level);
    encoded.write_data(records)?;
    let plain = FileDataSource::new(path);

    writeln!(out, "- Input ----------------")?;
    writeln!(out, "{records}")?;
    writeln!(out, "- Encoded --------------")?;
    writeln!(out, "{}", plain.read_data()?)?;
    writeln!(out, "- Decoded --------------")?;
    writeln!(out, "{}", encoded.read_data()?)?;
    Ok(())
}
