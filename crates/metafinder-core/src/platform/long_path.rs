/// Extended-length path handling.
///
/// Windows refuses most paths longer than `MAX_PATH` (260 UTF-16 units)
/// unless they carry the `\\?\` verbatim prefix. Every stat and security
/// query goes through [`extended_length`] so deep trees can be scanned.
/// Verbatim paths skip all normalisation, so separators are converted to
/// `\` before the prefix is added.
use std::borrow::Cow;
use std::path::Path;

const VERBATIM: &str = r"\\?\";
const DEVICE: &str = r"\\.\";

/// Rewrite an absolute Windows path string into its extended-length form.
///
/// - `C:\data\x.txt` → `\\?\C:\data\x.txt`
/// - `\\server\share\x.txt` → `\\?\UNC\server\share\x.txt`
/// - already verbatim or device paths are returned with separators fixed
/// - relative paths are returned unchanged (the prefix requires an absolute path)
pub fn to_extended_length(path: &str) -> String {
    let normalised = path.replace('/', "\\");
    if normalised.starts_with(VERBATIM) || normalised.starts_with(DEVICE) {
        return normalised;
    }
    if let Some(unc) = normalised.strip_prefix(r"\\") {
        return format!(r"{VERBATIM}UNC\{unc}");
    }
    let b = normalised.as_bytes();
    if b.len() >= 3 && b[0].is_ascii_alphabetic() && b[1] == b':' && b[2] == b'\\' {
        return format!("{VERBATIM}{normalised}");
    }
    path.to_owned()
}

/// Path to hand to filesystem queries.
///
/// On Windows this is the `\\?\` form of `path`; paths that are not valid
/// Unicode are passed through unchanged. Other hosts have no comparable
/// limit and get `path` back as is.
#[cfg(windows)]
pub fn extended_length(path: &Path) -> Cow<'_, Path> {
    match path.to_str() {
        Some(s) => Cow::Owned(to_extended_length(s).into()),
        None => Cow::Borrowed(path),
    }
}

#[cfg(not(windows))]
pub fn extended_length(path: &Path) -> Cow<'_, Path> {
    Cow::Borrowed(path)
}
