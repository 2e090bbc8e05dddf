//! Face recognition seam.
//!
//! Detection and encoding are done by an external capability; this crate only
//! consumes its contract: an image yields zero or more encodings, and two
//! encodings either match or they don't.

pub mod service;

use image::DynamicImage;

use crate::model::student::Student;

/// Fixed-size numeric vector describing one detected face.
pub type Encoding = Vec<f64>;

/// Distance below which two encodings are taken to be the same person.
pub const DEFAULT_TOLERANCE: f64 = 0.6;

pub trait FaceRecognizer: Send + Sync {
    /// Detect every face in `image` and return one encoding per face.
    fn detect_and_encode(&self, image: &DynamicImage) -> anyhow::Result<Vec<Encoding>>;

    fn matches(&self, candidate: &Encoding, stored: &Encoding) -> bool;
}

pub fn euclidean_distance(a: &[f64], b: &[f64]) -> Option<f64> {
    if a.len() != b.len() || a.is_empty() {
        return None;
    }

    let sum: f64 = a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum();
    Some(sum.sqrt())
}

/// Encodings of different lengths never match.
pub fn within_tolerance(a: &[f64], b: &[f64], tolerance: f64) -> bool {
    euclidean_distance(a, b).is_some_and(|d| d <= tolerance)
}

/// Returns the first student, in iteration order, whose stored encoding
/// matches `candidate`. Later students are not consulted once one matches.
pub fn first_match<'a>(
    recognizer: &dyn FaceRecognizer,
    candidate: &Encoding,
    students: &'a [Student],
) -> Option<&'a Student> {
    students
        .iter()
        .find(|s| recognizer.matches(candidate, &s.facial_data))
}

pub fn encoding_to_bytes(encoding: &[f64]) -> Vec<u8> {
    encoding.iter().flat_map(|v| v.to_le_bytes()).collect()
}

/// Trailing bytes that do not form a whole `f64` are dropped.
pub fn encoding_from_bytes(bytes: &[u8]) -> Encoding {
    bytes
        .chunks_exact(8)
        .map(|chunk| {
            let mut buf = [0u8; 8];
            buf.copy_from_slice(chunk);
            f64::from_le_bytes(buf)
        })
        .collect()
}
