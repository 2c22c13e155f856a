//! Sealing and opening documents held in memory

use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use super::error::{CipherError, CipherResult};
use super::keys::{PrivateKeyMaterial, PublicKeyMaterial};

/// Plaintext bytes per RSA block.
///
/// Part of the on-disk format: documents sealed elsewhere use 500-byte chunks,
/// so this is not a tuning knob. It requires keys of at least 4096 bits.
pub const MAX_CHUNK_BYTES: usize = 500;

/// One line of a sealed document: a base64-encoded RSA block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkRecord(String);

impl ChunkRecord {
    /// Encode a raw ciphertext block
    pub fn encode(ciphertext: &[u8]) -> Self {
        let mut text = STANDARD.encode(ciphertext);
        text.retain(|c| c != '\n' && c != '\r');
        Self(text)
    }

    /// Read a record from one line of text; blank lines carry no record
    pub fn from_line(line: &str) -> Option<Self> {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Decode back to the raw ciphertext block
    pub fn ciphertext(&self) -> CipherResult<Vec<u8>> {
        STANDARD
            .decode(self.0.as_bytes())
            .map_err(|e| CipherError::decryption(format!("invalid base64: {e}")))
    }
}

impl std::fmt::Display for ChunkRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// An ordered sequence of chunk records
///
/// Each record remembers the 1-based line it was read from, so errors point
/// at the right place even when blank lines sit between records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SealedDocument {
    records: Vec<ChunkRecord>,
    lines: Vec<usize>,
}

impl SealedDocument {
    pub fn new(records: Vec<ChunkRecord>) -> Self {
        let lines = (1..=records.len()).collect();
        Self { records, lines }
    }

    /// Split sealed text into records, one per non-blank line
    pub fn parse(bytes: &[u8]) -> CipherResult<Self> {
        let text = std::str::from_utf8(bytes)
            .map_err(|_| CipherError::decryption("sealed document is not valid text"))?;
        let (lines, records) = text
            .lines()
            .enumerate()
            .filter_map(|(index, line)| ChunkRecord::from_line(line).map(|r| (index + 1, r)))
            .unzip();
        Ok(Self { records, lines })
    }

    pub fn records(&self) -> &[ChunkRecord] {
        &self.records
    }

    /// Line number of the record at `index`
    pub fn line_of(&self, index: usize) -> Option<usize> {
        self.lines.get(index).copied()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Render in the on-disk format, every record newline-terminated
    pub fn to_text(&self) -> String {
        let mut out = String::with_capacity(self.records.iter().map(|r| r.0.len() + 1).sum());
        for record in &self.records {
            out.push_str(record.as_str());
            out.push('\n');
        }
        out
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.to_text().into_bytes()
    }
}

/// Encrypt `plaintext` into a sealed document.
///
/// Empty input yields a document with no records.
pub fn seal(plaintext: &[u8], key: &PublicKeyMaterial) -> CipherResult<SealedDocument> {
    let largest = plaintext.len().min(MAX_CHUNK_BYTES);
    if largest > key.max_payload() {
        return Err(CipherError::encryption(format!(
            "{}-byte chunks do not fit a {}-bit key (limit {} bytes)",
            largest,
            key.bits(),
            key.max_payload()
        )));
    }

    let records = plaintext
        .chunks(MAX_CHUNK_BYTES)
        .map(|chunk| key.encrypt_block(chunk).map(|block| ChunkRecord::encode(&block)))
        .collect::<CipherResult<Vec<_>>>()?;

    Ok(SealedDocument::new(records))
}

/// Decrypt a sealed document.
///
/// All or nothing: the first record that fails to decode or decrypt aborts
/// the whole document. The error names the record and the line it came from.
pub fn open(document: &SealedDocument, key: &PrivateKeyMaterial) -> CipherResult<Vec<u8>> {
    let mut plaintext = Vec::with_capacity(document.len() * MAX_CHUNK_BYTES);
    for (index, record) in document.records().iter().enumerate() {
        let fragment = record
            .ciphertext()
            .and_then(|block| key.decrypt_block(&block))
            .map_err(|e| match e {
                CipherError::Decryption(reason) => {
                    let line = document.line_of(index).unwrap_or(index + 1);
                    CipherError::decryption(format!(
                        "record {} (line {}): {}",
                        index + 1,
                        line,
                        reason
                    ))
                }
                other => other,
            })?;
        plaintext.extend_from_slice(&fragment);
    }
    Ok(plaintext)
}

/// Seal straight to the on-disk text
pub fn seal_bytes(plaintext: &[u8], key: &PublicKeyMaterial) -> CipherResult<Vec<u8>> {
    seal(plaintext, key).map(SealedDocument::into_bytes)
}

/// Open straight from the on-disk text
pub fn open_bytes(sealed: &[u8], key: &PrivateKeyMaterial) -> CipherResult<Vec<u8>> {
    open(&SealedDocument::parse(sealed)?, key)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_encoding_has_no_line_breaks() {
        let record = ChunkRecord::encode(&[0xAB; 512]);
        assert!(!record.as_str().contains('\n'));
        assert_eq!(record.ciphertext().unwrap(), vec![0xAB; 512]);
    }

    #[test]
    fn test_parse_skips_blank_lines() {
        let doc = SealedDocument::parse(b"QUJD\r\n\nREVG\n\n\n").unwrap();
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.records()[0].as_str(), "QUJD");
        assert_eq!(doc.records()[1].as_str(), "REVG");
        assert_eq!(doc.to_text(), "QUJD\nREVG\n");
        assert_eq!(doc.line_of(0), Some(1));
        assert_eq!(doc.line_of(1), Some(3));
        assert_eq!(doc.line_of(2), None);
    }

    #[test]
    fn test_parse_empty_input() {
        let doc = SealedDocument::parse(b"").unwrap();
        assert!(doc.is_empty());
        assert_eq!(doc.to_text(), "");
    }

    #[test]
    fn test_parse_rejects_binary() {
        let err = SealedDocument::parse(&[0xff, 0xfe, 0x00]).unwrap_err();
        assert!(matches!(err, CipherError::Decryption(_)));
    }

    #[test]
    fn test_truncated_base64_is_decryption_error() {
        let record = ChunkRecord::from_line("QUJ").unwrap();
        assert!(matches!(record.ciphertext(), Err(CipherError::Decryption(_))));
    }
}
