//! CLI command implementations.

pub mod info;
pub mod json;
pub mod list;

use anyhow::{Context, Result};
use lunar_bytecode::{DecodeLimits, Prototype, Undumper};
use std::path::Path;

/// Read a chunk file. Failures here are I/O problems, not bad chunks.
pub fn read_chunk(path: &Path) -> Result<Vec<u8>> {
    std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))
}

/// Decode chunk bytes loaded from `path`
pub fn decode_chunk(path: &Path, bytes: &[u8], limits: DecodeLimits) -> Result<Prototype> {
    tracing::debug!(path = %path.display(), len = bytes.len(), "decoding chunk");
    Undumper::new()
        .limits(limits)
        .undump(bytes)
        .with_context(|| format!("failed to decode {}", path.display()))
}

/// Read and decode the chunk at `path`
pub fn load_chunk(path: &Path, limits: DecodeLimits) -> Result<Prototype> {
    let bytes = read_chunk(path)?;
    decode_chunk(path, &bytes, limits)
}

#[cfg(test)]
pub(crate) mod test_support {
    use lunar_bytecode::ChunkFormat;

    /// Chunk whose main function has one instruction, one constant and one
    /// nested function
    pub fn small_chunk() -> Vec<u8> {
        let format = ChunkFormat::LUA_54;
        let mut data = Vec::new();
        data.extend_from_slice(&format.signature);
        data.extend_from_slice(&[format.version, format.format]);
        data.extend_from_slice(&format.sentinel);
        data.extend_from_slice(&[4, 8, 4, 8, 8]);
        data.extend_from_slice(&format.sample_integer.to_le_bytes());
        data.extend_from_slice(&format.sample_number.to_le_bytes());
        data.push(1); // main upvalues

        // main function
        data.extend_from_slice(&[6, b'@', b'm', b'.', b'l', b'u', b'a']);
        data.extend_from_slice(&[0; 8]);
        data.extend_from_slice(&[0, 1, 2]);
        data.extend_from_slice(&[1, 0, 0, 0, 0x46, 0, 1, 0]); // code
        data.extend_from_slice(&[1, 0, 0, 0, 0x13]); // constants
        data.extend_from_slice(&42i64.to_le_bytes());
        data.extend_from_slice(&[1, 0, 0, 0, 1, 0]); // upvalues
        data.extend_from_slice(&[1, 0, 0, 0]); // protos

        // nested function
        data.push(0);
        data.extend_from_slice(&2u32.to_le_bytes());
        data.extend_from_slice(&3u32.to_le_bytes());
        data.extend_from_slice(&[0, 0, 2]);
        data.extend_from_slice(&[0; 7 * 4]);

        data.extend_from_slice(&[1, 0, 0, 0, 1, 0, 0, 0]); // line info
        data.extend_from_slice(&[0, 0, 0, 0]); // locals
        data.extend_from_slice(&[1, 0, 0, 0, 4, b'_', b'E', b'N', b'V']); // upvalue names
        data
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_chunk_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("m.luac");
        std::fs::write(&path, test_support::small_chunk()).unwrap();

        let proto = load_chunk(&path, DecodeLimits::default()).unwrap();
        assert_eq!(proto.source, "@m.lua");
        assert_eq!(proto.code, vec![0x0001_0046]);
        assert_eq!(proto.protos.len(), 1);
        assert_eq!(proto.upvalue_names.len(), 1);
    }

    #[test]
    fn test_missing_file_is_a_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_chunk(&dir.path().join("missing.luac"), DecodeLimits::default())
            .unwrap_err();
        assert!(err.to_string().starts_with("failed to read"));
        assert!(err.downcast_ref::<std::io::Error>().is_some());
    }

    #[test]
    fn test_bad_chunk_is_a_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("hello.lua");
        std::fs::write(&path, "print('hello')\n").unwrap();

        let err = load_chunk(&path, DecodeLimits::default()).unwrap_err();
        assert!(err.to_string().starts_with("failed to decode"));
        assert!(matches!(
            err.downcast_ref::<lunar_bytecode::UndumpError>(),
            Some(lunar_bytecode::UndumpError::HeaderMismatch { .. })
        ));
    }

    #[test]
    fn test_limits_are_applied() {
        let limits = DecodeLimits::default().with_max_depth(0);
        let err = decode_chunk(Path::new("m.luac"), &test_support::small_chunk(), limits)
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<lunar_bytecode::UndumpError>(),
            Some(lunar_bytecode::UndumpError::LimitExceeded { .. })
        ));
    }
}
