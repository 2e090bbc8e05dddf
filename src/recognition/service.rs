//! Client for an out-of-process face embedding service.
//!
//! Frames are a `u32` little-endian length followed by a postcard payload.

use std::io::{Read, Write};
use std::os::unix::net::UnixStream;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use image::DynamicImage;
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::{Encoding, FaceRecognizer, within_tolerance};

const MAX_RESPONSE_LEN: usize = 1024 * 1024;

#[derive(Serialize, Deserialize, Debug)]
pub enum Request {
    Encode(EncodeRequest),
}

/// Raw RGB8 frame, row-major.
#[derive(Serialize, Deserialize, Debug)]
pub struct EncodeRequest {
    pub width: u32,
    pub height: u32,
    pub rgb: Vec<u8>,
}

#[derive(Serialize, Deserialize, Debug)]
pub enum Response {
    Encodings(Vec<Encoding>),
    Error(String),
}

pub struct EmbeddingServiceClient {
    socket_path: String,
    tolerance: f64,
    timeout: Duration,
}

impl EmbeddingServiceClient {
    pub fn new(socket_path: impl Into<String>, tolerance: f64) -> Self {
        Self {
            socket_path: socket_path.into(),
            tolerance,
            timeout: Duration::from_secs(30),
        }
    }

    fn connect(&self) -> Result<UnixStream> {
        let stream = UnixStream::connect(&self.socket_path)
            .with_context(|| format!("connecting to embedding service at {}", self.socket_path))?;
        stream.set_read_timeout(Some(self.timeout))?;
        stream.set_write_timeout(Some(self.timeout))?;
        Ok(stream)
    }
}

impl FaceRecognizer for EmbeddingServiceClient {
    fn detect_and_encode(&self, image: &DynamicImage) -> Result<Vec<Encoding>> {
        let rgb = image.to_rgb8();
        let request = Request::Encode(EncodeRequest {
            width: rgb.width(),
            height: rgb.height(),
            rgb: rgb.into_raw(),
        });

        let mut stream = self.connect()?;
        write_frame(&mut stream, &request)?;

        match read_frame(&mut stream)? {
            Response::Encodings(encodings) => {
                debug!(faces = encodings.len(), "Embedding service replied");
                Ok(encodings)
            }
            Response::Error(msg) => bail!("embedding service error: {msg}"),
        }
    }

    fn matches(&self, candidate: &Encoding, stored: &Encoding) -> bool {
        within_tolerance(candidate, stored, self.tolerance)
    }
}

pub fn write_frame<W: Write, T: Serialize>(writer: &mut W, message: &T) -> Result<()> {
    let payload = postcard::to_allocvec(message).context("serializing request")?;
    let len = u32::try_from(payload.len()).context("request too large")?;

    writer.write_all(&len.to_le_bytes())?;
    writer.write_all(&payload)?;
    writer.flush()?;
    Ok(())
}

pub fn read_frame<R: Read, T: for<'de> Deserialize<'de>>(reader: &mut R) -> Result<T> {
    let mut len_buf = [0u8; 4];
    reader.read_exact(&mut len_buf)?;
    let len = u32::from_le_bytes(len_buf) as usize;

    if len > MAX_RESPONSE_LEN {
        bail!("response too large: {len} bytes");
    }

    let mut buf = vec![0u8; len];
    reader.read_exact(&mut buf)?;
    postcard::from_bytes(&buf).context("deserializing response")
}
