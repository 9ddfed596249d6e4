//! ZIP package access for DOCX files.

use crate::error::{Error, Result};
use std::cell::RefCell;
use std::fs::File;
use std::io::{BufReader, Cursor, Read, Seek};
use std::path::Path;

/// OOXML package over a ZIP archive.
///
/// Only reads parts; the evaluator copies what it needs out of the package
/// at construction and never holds on to it.
pub struct OoxmlContainer {
    archive: RefCell<zip::ZipArchive<Cursor<Vec<u8>>>>,
}

impl OoxmlContainer {
    /// Open a package from a file path.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use unstyle::container::OoxmlContainer;
    ///
    /// let container = OoxmlContainer::open("document.docx")?;
    /// let xml = container.read_xml("word/document.xml")?;
    /// # Ok::<(), unstyle::Error>(())
    /// ```
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    /// Create a package from a byte vector.
    pub fn from_bytes(data: Vec<u8>) -> Result<Self> {
        let archive = zip::ZipArchive::new(Cursor::new(data))?;
        Ok(Self {
            archive: RefCell::new(archive),
        })
    }

    /// Create a package from a reader.
    pub fn from_reader<R: Read + Seek>(mut reader: R) -> Result<Self> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(data)
    }

    /// Read an XML part as a string.
    ///
    /// Fails with [`Error::MissingComponent`] when the part is absent.
    pub fn read_xml(&self, path: &str) -> Result<String> {
        let mut archive = self.archive.borrow_mut();
        let mut file = archive
            .by_name(path)
            .map_err(|_| Error::MissingComponent(path.to_string()))?;

        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)?;
        decode_xml_bytes(&bytes)
    }

    /// Read an XML part that a document may legitimately omit.
    pub fn read_optional_xml(&self, path: &str) -> Result<Option<String>> {
        if !self.exists(path) {
            return Ok(None);
        }
        self.read_xml(path).map(Some)
    }

    /// Check if a part exists in the package.
    pub fn exists(&self, path: &str) -> bool {
        let archive = self.archive.borrow();
        let found = archive.file_names().any(|n| n == path);
        found
    }

    /// List all part names in the package.
    pub fn list_files(&self) -> Vec<String> {
        let archive = self.archive.borrow();
        archive.file_names().map(String::from).collect()
    }
}

impl std::fmt::Debug for OoxmlContainer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OoxmlContainer")
            .field("files", &self.list_files().len())
            .finish()
    }
}

/// Decode XML part bytes as UTF-8 or UTF-16 (LE/BE).
///
/// A byte order mark decides when present. Without one, bytes that are
/// not valid UTF-8 are sniffed for the zero bytes of UTF-16 ASCII text
/// before falling back to lossy UTF-8.
pub fn decode_xml_bytes(bytes: &[u8]) -> Result<String> {
    match bytes {
        [0xEF, 0xBB, 0xBF, rest @ ..] => String::from_utf8(rest.to_vec()).map_err(invalid_data),
        [0xFF, 0xFE, rest @ ..] => decode_utf16(rest, false).map(|s| declare_utf8(&s)),
        [0xFE, 0xFF, rest @ ..] => decode_utf16(rest, true).map(|s| declare_utf8(&s)),
        _ => match std::str::from_utf8(bytes) {
            Ok(s) => Ok(s.to_string()),
            Err(_) => match bytes {
                [_, 0, _, 0, ..] => decode_utf16(bytes, false).map(|s| declare_utf8(&s)),
                [0, _, 0, _, ..] => decode_utf16(bytes, true).map(|s| declare_utf8(&s)),
                _ => Ok(String::from_utf8_lossy(bytes).into_owned()),
            },
        },
    }
}

fn decode_utf16(bytes: &[u8], big_endian: bool) -> Result<String> {
    let units = bytes.chunks_exact(2).map(|pair| {
        if big_endian {
            u16::from_be_bytes([pair[0], pair[1]])
        } else {
            u16::from_le_bytes([pair[0], pair[1]])
        }
    });
    char::decode_utf16(units)
        .collect::<std::result::Result<String, _>>()
        .map_err(invalid_data)
}

fn invalid_data<E>(err: E) -> Error
where
    E: Into<Box<dyn std::error::Error + Send + Sync>>,
{
    Error::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, err))
}

/// Rewrite a UTF-16 encoding declaration once the text is held as UTF-8,
/// so quick-xml does not try to decode it a second time.
fn declare_utf8(content: &str) -> String {
    let Some(end) = content.strip_prefix("<?xml").and(content.find("?>")) else {
        return content.to_string();
    };
    let (decl, rest) = content.split_at(end + 2);
    let mut fixed = decl.to_string();
    for quoted in ["\"UTF-16\"", "'UTF-16'", "\"utf-16\"", "'utf-16'"] {
        fixed = fixed.replace(&format!("encoding={quoted}"), "encoding=\"UTF-8\"");
    }
    fixed + rest
}
