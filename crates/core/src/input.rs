//! Input collection: turns a file selection into a scan request.
//!
//! Three sources feed the collector (single-scan trigger, bulk-scan
//! trigger, drag-and-drop). Each is normalized into an ordered file list
//! plus a [`ScanMode`]. The collector remembers the last pressed trigger,
//! which decides the mode of a later single-file drop.

use crate::error::CoreError;

// ---------------------------------------------------------------------------
// Accepted image types
// ---------------------------------------------------------------------------

pub const MIME_JPEG: &str = "image/jpeg";
pub const MIME_PNG: &str = "image/png";
pub const MIME_GIF: &str = "image/gif";
pub const MIME_BMP: &str = "image/bmp";
pub const MIME_WEBP: &str = "image/webp";
/// Fallback for anything not recognised as an image.
pub const MIME_OCTET_STREAM: &str = "application/octet-stream";

/// MIME types allowed into a bulk request body.
pub const ACCEPTED_IMAGE_TYPES: &[&str] = &[MIME_JPEG, MIME_PNG, MIME_GIF, MIME_BMP, MIME_WEBP];

/// File extensions the classification service accepts.
pub const ACCEPTED_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "bmp", "webp"];

/// Whether a MIME type passes the bulk allowlist.
pub fn is_accepted_image_type(mime_type: &str) -> bool {
    ACCEPTED_IMAGE_TYPES.contains(&mime_type)
}

/// Guess a MIME type from a file name's extension.
pub fn mime_type_for_name(name: &str) -> &'static str {
    let Some((_, ext)) = name.rsplit_once('.') else {
        return MIME_OCTET_STREAM;
    };
    match ext.to_lowercase().as_str() {
        "jpg" | "jpeg" => MIME_JPEG,
        "png" => MIME_PNG,
        "gif" => MIME_GIF,
        "bmp" => MIME_BMP,
        "webp" => MIME_WEBP,
        _ => MIME_OCTET_STREAM,
    }
}

// ---------------------------------------------------------------------------
// Candidate files
// ---------------------------------------------------------------------------

/// A file the user picked, held in memory until it is uploaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateFile {
    pub name: String,
    pub mime_type: String,
    pub data: Vec<u8>,
}

impl CandidateFile {
    pub fn new(name: impl Into<String>, mime_type: impl Into<String>, data: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.into(),
            data,
        }
    }

    /// Build a candidate whose MIME type is inferred from its name.
    pub fn from_bytes(name: impl Into<String>, data: Vec<u8>) -> Self {
        let name = name.into();
        let mime_type = mime_type_for_name(&name);
        Self::new(name, mime_type, data)
    }

    pub fn is_accepted_image(&self) -> bool {
        is_accepted_image_type(&self.mime_type)
    }
}

// ---------------------------------------------------------------------------
// Scan mode and request
// ---------------------------------------------------------------------------

/// Which endpoint a scan goes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScanMode {
    Single,
    Bulk,
}

impl ScanMode {
    pub fn is_bulk(self) -> bool {
        self == ScanMode::Bulk
    }

    /// Prefix put in front of every failure message for this mode.
    pub fn failure_prefix(self) -> &'static str {
        match self {
            ScanMode::Single => "Single scan failed: ",
            ScanMode::Bulk => "Bulk scan failed: ",
        }
    }
}

impl std::fmt::Display for ScanMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(match self {
            ScanMode::Single => "single",
            ScanMode::Bulk => "bulk",
        })
    }
}

/// A non-empty, ordered file selection ready to be scanned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanRequest {
    files: Vec<CandidateFile>,
    mode: ScanMode,
}

impl ScanRequest {
    /// Build a request, routing to bulk whenever more than one file is present.
    pub fn new(files: Vec<CandidateFile>, bulk: bool) -> Result<Self, CoreError> {
        if files.is_empty() {
            return Err(CoreError::EmptySelection);
        }
        let mode = if bulk || files.len() > 1 {
            ScanMode::Bulk
        } else {
            ScanMode::Single
        };
        Ok(Self { files, mode })
    }

    pub fn mode(&self) -> ScanMode {
        self.mode
    }

    pub fn is_bulk(&self) -> bool {
        self.mode.is_bulk()
    }

    /// Every selected file, in selection order.
    pub fn files(&self) -> &[CandidateFile] {
        &self.files
    }

    /// Count shown to the user, taken before any type filtering.
    pub fn selected_count(&self) -> usize {
        self.files.len()
    }

    /// Files that go into a bulk request body. Others are dropped silently.
    pub fn accepted_files(&self) -> impl Iterator<Item = &CandidateFile> {
        self.files.iter().filter(|f| f.is_accepted_image())
    }

    pub fn excluded_count(&self) -> usize {
        self.files.iter().filter(|f| !f.is_accepted_image()).count()
    }

    pub fn into_files(self) -> Vec<CandidateFile> {
        self.files
    }
}

// ---------------------------------------------------------------------------
// Collector
// ---------------------------------------------------------------------------

/// Where a selection came from.
#[derive(Debug, Clone)]
pub enum InputSource {
    /// "Single scan" button. The picker only allows one file.
    SingleTrigger(Vec<CandidateFile>),
    /// "Bulk scan" button. The picker allows several files.
    BulkTrigger(Vec<CandidateFile>),
    /// Files dropped onto the upload area.
    Drop(Vec<CandidateFile>),
}

/// Normalizes input sources and tracks the session's bulk flag.
#[derive(Debug, Default)]
pub struct InputCollector {
    bulk_mode: bool,
}

impl InputCollector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current bulk flag (last pressed trigger, or a multi-file drop).
    pub fn bulk_mode(&self) -> bool {
        self.bulk_mode
    }

    /// Turn a selection into a scan request.
    ///
    /// Returns [`CoreError::EmptySelection`] for zero files, in which case
    /// the bulk flag is left untouched.
    pub fn collect(&mut self, source: InputSource) -> Result<ScanRequest, CoreError> {
        let files = match source {
            InputSource::SingleTrigger(mut files) => {
                if files.is_empty() {
                    return Err(CoreError::EmptySelection);
                }
                files.truncate(1);
                self.bulk_mode = false;
                files
            }
            InputSource::BulkTrigger(files) => {
                if files.is_empty() {
                    return Err(CoreError::EmptySelection);
                }
                self.bulk_mode = true;
                files
            }
            InputSource::Drop(files) => {
                if files.len() > 1 {
                    self.bulk_mode = true;
                }
                files
            }
        };

        ScanRequest::new(files, self.bulk_mode)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn jpeg(name: &str) -> CandidateFile {
        CandidateFile::new(name, MIME_JPEG, vec![0xFF, 0xD8])
    }

    #[test]
    fn mime_type_from_extension() {
        assert_eq!(mime_type_for_name("a.JPG"), MIME_JPEG);
        assert_eq!(mime_type_for_name("a.jpeg"), MIME_JPEG);
        assert_eq!(mime_type_for_name("dir.v2/b.webp"), MIME_WEBP);
        assert_eq!(mime_type_for_name("notes.txt"), MIME_OCTET_STREAM);
        assert_eq!(mime_type_for_name("README"), MIME_OCTET_STREAM);
    }

    #[test]
    fn allowlist_matches_exact_types() {
        for mime in ACCEPTED_IMAGE_TYPES {
            assert!(is_accepted_image_type(mime));
        }
        assert!(!is_accepted_image_type("image/tiff"));
        assert!(!is_accepted_image_type("text/plain"));
    }

    #[test]
    fn single_trigger_forces_single_mode() {
        let mut collector = InputCollector::new();
        let request = collector
            .collect(InputSource::SingleTrigger(vec![jpeg("a.jpg")]))
            .unwrap();
        assert_eq!(request.mode(), ScanMode::Single);
        assert!(!collector.bulk_mode());
    }

    #[test]
    fn single_trigger_keeps_only_first_file() {
        let mut collector = InputCollector::new();
        let request = collector
            .collect(InputSource::SingleTrigger(vec![jpeg("a.jpg"), jpeg("b.jpg")]))
            .unwrap();
        assert_eq!(request.selected_count(), 1);
        assert_eq!(request.files()[0].name, "a.jpg");
        assert_eq!(request.mode(), ScanMode::Single);
    }

    #[test]
    fn bulk_trigger_with_one_file_stays_bulk() {
        let mut collector = InputCollector::new();
        let request = collector
            .collect(InputSource::BulkTrigger(vec![jpeg("a.jpg")]))
            .unwrap();
        assert_eq!(request.mode(), ScanMode::Bulk);
        assert!(collector.bulk_mode());
    }

    #[test]
    fn dropping_two_files_after_single_trigger_is_bulk() {
        let mut collector = InputCollector::new();
        collector
            .collect(InputSource::SingleTrigger(vec![jpeg("a.jpg")]))
            .unwrap();

        let request = collector
            .collect(InputSource::Drop(vec![jpeg("b.jpg"), jpeg("c.jpg")]))
            .unwrap();
        assert_eq!(request.mode(), ScanMode::Bulk);
        assert!(collector.bulk_mode());
    }

    #[test]
    fn dropping_one_file_follows_last_trigger() {
        let mut collector = InputCollector::new();
        collector
            .collect(InputSource::BulkTrigger(vec![jpeg("a.jpg")]))
            .unwrap();
        let request = collector
            .collect(InputSource::Drop(vec![jpeg("b.jpg")]))
            .unwrap();
        assert_eq!(request.mode(), ScanMode::Bulk);

        collector
            .collect(InputSource::SingleTrigger(vec![jpeg("c.jpg")]))
            .unwrap();
        let request = collector
            .collect(InputSource::Drop(vec![jpeg("d.jpg")]))
            .unwrap();
        assert_eq!(request.mode(), ScanMode::Single);
    }

    #[test]
    fn empty_selection_is_rejected_without_state_change() {
        let mut collector = InputCollector::new();
        collector
            .collect(InputSource::BulkTrigger(vec![jpeg("a.jpg")]))
            .unwrap();

        assert_matches!(
            collector.collect(InputSource::SingleTrigger(Vec::new())),
            Err(CoreError::EmptySelection)
        );
        assert!(collector.bulk_mode());

        assert_matches!(
            collector.collect(InputSource::Drop(Vec::new())),
            Err(CoreError::EmptySelection)
        );
        assert!(collector.bulk_mode());
    }

    #[test]
    fn bulk_filter_excludes_non_images_but_keeps_selected_count() {
        let files = vec![
            jpeg("a.jpg"),
            CandidateFile::new("notes.txt", "text/plain", b"hi".to_vec()),
            CandidateFile::from_bytes("b.png", vec![0x89]),
        ];
        let request = ScanRequest::new(files, true).unwrap();
        assert_eq!(request.selected_count(), 3);
        assert_eq!(request.excluded_count(), 1);
        let names: Vec<_> = request.accepted_files().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a.jpg", "b.png"]);
    }

    #[test]
    fn failure_prefixes() {
        assert_eq!(ScanMode::Single.failure_prefix(), "Single scan failed: ");
        assert_eq!(ScanMode::Bulk.failure_prefix(), "Bulk scan failed: ");
    }
}
