//! Loading and decoding source files
//!
use encoding_rs::{Encoding, UTF_8};
use std::{
    collections::HashMap,
    io,
    path::{Path, PathBuf},
};

/// Provides the raw bytes of root and include files
pub trait Loader {
    fn load(&self, path: &Path) -> io::Result<Vec<u8>>;
}

/// Reads files from disk
#[derive(Default, Clone, Copy, Debug)]
pub struct FsLoader;

impl Loader for FsLoader {
    fn load(&self, path: &Path) -> io::Result<Vec<u8>> {
        std::fs::read(path)
    }
}

/// In-memory file set, keyed by the exact path a reader will ask for
impl<S: AsRef<[u8]>> Loader for HashMap<PathBuf, S> {
    fn load(&self, path: &Path) -> io::Result<Vec<u8>> {
        self.get(path)
            .map(|content| content.as_ref().to_vec())
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, path.display().to_string()))
    }
}

/// Decode file bytes to text.
///
/// Without an explicit encoding a byte order mark selects UTF-8 or UTF-16,
/// and anything else is read as UTF-8 with malformed sequences replaced.
pub fn decode(bytes: &[u8], encoding: Option<&'static Encoding>) -> String {
    let (text, _) = match encoding {
        Some(encoding) => encoding.decode_with_bom_removal(bytes),
        None => {
            let (text, _, _) = UTF_8.decode(bytes);
            (text, false)
        }
    };
    text.into_owned()
}

/// Split off the first line of a file, which holds its signature
pub fn split_signature(text: &str) -> (String, &str) {
    match text.split_once('\n') {
        Some((first, rest)) => (first.trim_end_matches('\r').to_string(), rest),
        None => (text.trim_end_matches('\r').to_string(), ""),
    }
}

/// Resolve an include target against the file containing the directive.
///
/// A target named `[[samename]]` stands for a file with the including
/// file's own name inside the target's directory.
pub fn resolve_include(current: &Path, target: &str) -> PathBuf {
    let directory = current.parent().unwrap_or(Path::new(""));
    let target = PathBuf::from(target.replace('\\', "/"));

    match (target.file_name(), current.file_name()) {
        (Some(name), Some(own)) if name == "[[samename]]" => {
            directory.join(target.with_file_name(own))
        }
        _ => directory.join(&target),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::UTF_16LE;
    use pretty_assertions::assert_eq;

    #[test]
    fn decodes_utf16_with_bom() {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "SIMISA@@@@@@@@@@JINX0D0t______\r\nWagon ( a )".encode_utf16() {
            bytes.extend(unit.to_le_bytes());
        }
        let text = decode(&bytes, None);
        assert!(text.starts_with("SIMISA"));
        assert!(text.ends_with("Wagon ( a )"));
    }

    #[test]
    fn decodes_with_forced_encoding() {
        let bytes: Vec<u8> = "ab".encode_utf16().flat_map(|u| u.to_le_bytes()).collect();
        assert_eq!(decode(&bytes, Some(UTF_16LE)), "ab");
        assert_eq!(decode(b"\xEF\xBB\xBFab", None), "ab");
    }

    #[test]
    fn signature_is_first_line() {
        let (signature, rest) = split_signature("SIMISA@@\r\nWagon ( )");
        assert_eq!(signature, "SIMISA@@");
        assert_eq!(rest, "Wagon ( )");

        let (signature, rest) = split_signature("SIMISA@@");
        assert_eq!(signature, "SIMISA@@");
        assert_eq!(rest, "");
    }

    #[test]
    fn include_paths() {
        let current = Path::new("trains/trainset/loco/loco.eng");
        assert_eq!(
            resolve_include(current, "../common/sound.inc"),
            PathBuf::from("trains/trainset/loco/../common/sound.inc")
        );
        assert_eq!(
            resolve_include(current, "../../OpenRails/[[samename]]"),
            PathBuf::from("trains/trainset/loco/../../OpenRails/loco.eng")
        );
        assert_eq!(resolve_include(Path::new("a.eng"), "b.inc"), PathBuf::from("b.inc"));
        assert_eq!(
            resolve_include(Path::new("x/a.eng"), "..\\common\\b.inc"),
            PathBuf::from("x/../common/b.inc")
        );
    }

    #[test]
    fn memory_loader() {
        let files = HashMap::from([(PathBuf::from("a.inc"), "x")]);
        assert_eq!(files.load(Path::new("a.inc")).ok(), Some(b"x".to_vec()));
        assert!(files.load(Path::new("b.inc")).is_err());
    }
}
