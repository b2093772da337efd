//! Input validation: accept one candidate PDF from drag-drop or a file picker.
//!
//! ## Why validate the declared type, not the bytes?
//!
//! The conversion service re-checks everything server-side; the client's job
//! is only to catch the obvious mistake (dropping a `.txt` on the PDF well)
//! before a multi-megabyte upload. The declared content type is what a
//! browser would attach to the file — for picker-style path input we derive
//! it from the extension the same way.

use crate::error::ConvertError;
use std::path::Path;

/// The single recognised document type.
pub const PDF_CONTENT_TYPE: &str = "application/pdf";

/// A file offered by the user, before validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// File name as presented by the picker or drop.
    pub name: String,
    /// Raw file bytes.
    pub payload: Vec<u8>,
    /// Declared content type (what a browser would report).
    pub content_type: String,
}

/// A validated selection. Constructed only by [`validate`], so holding one
/// guarantees the content type is [`PDF_CONTENT_TYPE`].
///
/// Replaced wholesale by a later valid selection; never cleared.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedInput {
    name: String,
    payload: Vec<u8>,
    content_type: String,
}

impl SelectedInput {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn content_type(&self) -> &str {
        &self.content_type
    }
}

/// Validate a candidate file.
///
/// Accepts iff the declared content type equals [`PDF_CONTENT_TYPE`];
/// everything else is [`ConvertError::UnsupportedType`]. Rejection changes
/// nothing — the caller keeps whatever selection it already had.
pub fn validate(candidate: Candidate) -> Result<SelectedInput, ConvertError> {
    if candidate.content_type != PDF_CONTENT_TYPE {
        return Err(ConvertError::UnsupportedType {
            name: candidate.name,
            content_type: candidate.content_type,
        });
    }
    Ok(SelectedInput {
        name: candidate.name,
        payload: candidate.payload,
        content_type: candidate.content_type,
    })
}

/// Reduce a multi-file drop to the one candidate we consider.
///
/// Only the first file counts; the rest are silently ignored (batch
/// submission is a non-goal).
pub fn first_candidate(files: impl IntoIterator<Item = Candidate>) -> Option<Candidate> {
    files.into_iter().next()
}

/// Build a candidate from a filesystem path — the picker-style entry point.
///
/// The declared content type is derived from the extension, matching what a
/// browser would report for the same file.
pub fn candidate_from_path(path: &Path) -> Result<Candidate, ConvertError> {
    let payload = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(e) if e.kind() == std::io::ErrorKind::PermissionDenied => {
            return Err(ConvertError::PermissionDenied {
                path: path.to_path_buf(),
            });
        }
        Err(_) => {
            return Err(ConvertError::FileNotFound {
                path: path.to_path_buf(),
            });
        }
    };

    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| "document.pdf".to_string());

    let is_pdf = path
        .extension()
        .map(|e| e.eq_ignore_ascii_case("pdf"))
        .unwrap_or(false);
    let content_type = if is_pdf {
        PDF_CONTENT_TYPE
    } else {
        "application/octet-stream"
    };

    Ok(Candidate {
        name,
        payload,
        content_type: content_type.to_string(),
    })
}

// ── Drag lifecycle ───────────────────────────────────────────────────────

/// Observable phase of the drop target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DragPhase {
    /// Nothing hovering.
    #[default]
    Inactive,
    /// A drag is over the target.
    Active,
}

/// Presentation-side drag lifecycle: inactive → active-while-over →
/// inactive-on-drop.
///
/// Purely cosmetic — it supplies the dropped candidate and nothing else;
/// validation semantics do not depend on how the file arrived.
#[derive(Debug, Default)]
pub struct DropZone {
    phase: DragPhase,
}

impl DropZone {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> DragPhase {
        self.phase
    }

    /// A drag entered or moved over the target.
    pub fn drag_over(&mut self) {
        self.phase = DragPhase::Active;
    }

    /// The drag left without dropping.
    pub fn drag_leave(&mut self) {
        self.phase = DragPhase::Inactive;
    }

    /// Files were dropped; the target goes inactive and the first file is
    /// handed on for validation.
    pub fn drop_files(&mut self, files: impl IntoIterator<Item = Candidate>) -> Option<Candidate> {
        self.phase = DragPhase::Inactive;
        first_candidate(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pdf(name: &str) -> Candidate {
        Candidate {
            name: name.to_string(),
            payload: b"%PDF-1.4 fake".to_vec(),
            content_type: PDF_CONTENT_TYPE.to_string(),
        }
    }

    fn text(name: &str) -> Candidate {
        Candidate {
            name: name.to_string(),
            payload: b"hello".to_vec(),
            content_type: "text/plain".to_string(),
        }
    }

    #[test]
    fn accepts_declared_pdf() {
        let sel = validate(pdf("book.pdf")).unwrap();
        assert_eq!(sel.name(), "book.pdf");
        assert_eq!(sel.content_type(), PDF_CONTENT_TYPE);
    }

    #[test]
    fn rejects_every_other_type() {
        for ct in ["text/plain", "application/epub+zip", "image/png", ""] {
            let c = Candidate {
                name: "x".into(),
                payload: vec![],
                content_type: ct.into(),
            };
            assert!(
                matches!(validate(c), Err(ConvertError::UnsupportedType { .. })),
                "content type {ct:?} must be rejected"
            );
        }
    }

    #[test]
    fn multi_file_drop_keeps_only_the_first() {
        let first = first_candidate(vec![pdf("a.pdf"), pdf("b.pdf"), text("c.txt")]).unwrap();
        assert_eq!(first.name, "a.pdf");
    }

    #[test]
    fn empty_drop_yields_nothing() {
        assert!(first_candidate(Vec::<Candidate>::new()).is_none());
    }

    #[test]
    fn candidate_from_missing_path_is_not_found() {
        let err = candidate_from_path(Path::new("/definitely/not/here.pdf")).unwrap_err();
        assert!(matches!(err, ConvertError::FileNotFound { .. }));
    }

    #[test]
    fn candidate_from_path_derives_type_from_extension() {
        let dir = tempfile::tempdir().unwrap();

        let pdf_path = dir.path().join("Book.PDF");
        std::fs::write(&pdf_path, b"%PDF-1.4").unwrap();
        let c = candidate_from_path(&pdf_path).unwrap();
        assert_eq!(c.content_type, PDF_CONTENT_TYPE);
        assert_eq!(c.name, "Book.PDF");

        let txt_path = dir.path().join("notes.txt");
        std::fs::write(&txt_path, b"notes").unwrap();
        let c = candidate_from_path(&txt_path).unwrap();
        assert_eq!(c.content_type, "application/octet-stream");
        assert!(validate(c).is_err());
    }

    #[test]
    fn drop_zone_walks_the_three_phases() {
        let mut zone = DropZone::new();
        assert_eq!(zone.phase(), DragPhase::Inactive);

        zone.drag_over();
        assert_eq!(zone.phase(), DragPhase::Active);

        zone.drag_leave();
        assert_eq!(zone.phase(), DragPhase::Inactive);

        zone.drag_over();
        let dropped = zone.drop_files(vec![pdf("a.pdf"), pdf("b.pdf")]);
        assert_eq!(zone.phase(), DragPhase::Inactive);
        assert_eq!(dropped.unwrap().name, "a.pdf");
    }
}
