//! Random identifier generation for link ids and file handles.

use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use rand::Rng;
use rand::distr::{Alphanumeric, SampleString};

use linkgate_core::types::{FileId, LinkId};

/// Generates link ids and file handles.
///
/// Link ids are alphanumeric and safe to embed in URL paths. File
/// handles are random bytes rendered as unpadded URL-safe base64.
#[derive(Debug, Clone)]
pub struct TokenGenerator {
    link_id_length: usize,
    file_handle_bytes: usize,
}

impl TokenGenerator {
    /// Creates a generator with the given output sizes.
    pub fn new(link_id_length: usize, file_handle_bytes: usize) -> Self {
        Self {
            link_id_length,
            file_handle_bytes,
        }
    }

    /// Generates a random alphanumeric link id.
    pub fn generate_link_id(&self) -> LinkId {
        let raw = Alphanumeric.sample_string(&mut rand::rng(), self.link_id_length);
        LinkId::from(raw)
    }

    /// Generates a random opaque file handle.
    pub fn generate_file_handle(&self) -> FileId {
        let mut rng = rand::rng();
        let bytes: Vec<u8> = (0..self.file_handle_bytes).map(|_| rng.random()).collect();
        FileId::from(URL_SAFE_NO_PAD.encode(bytes))
    }
}
