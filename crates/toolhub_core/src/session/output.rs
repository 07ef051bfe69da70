//! Fabricated output file names.

use crate::catalog::ToolDescriptor;

/// Name of the "processed" file offered for download.
///
/// The base is everything before the first dot of the original name.
/// Tools that change format append their output extension; all other
/// tools produce an extension-less `<base>_processed`.
pub fn processed_file_name(tool: &ToolDescriptor, original: &str) -> String {
    let base = original.split('.').next().unwrap_or(original);
    match tool.output_extension {
        Some(ext) => format!("{}_processed.{}", base, ext),
        None => format!("{}_processed", base),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{resolve, DEFAULT_TOOL};

    #[test]
    fn mapped_tools_change_extension() {
        assert_eq!(
            processed_file_name(resolve("pdf-to-word"), "report.pdf"),
            "report_processed.docx"
        );
        assert_eq!(
            processed_file_name(resolve("compress-image"), "photo.png"),
            "photo_processed.jpg"
        );
        assert_eq!(
            processed_file_name(resolve("pdf-to-jpg"), "slides.pdf"),
            "slides_processed.jpg"
        );
    }

    #[test]
    fn unmapped_tools_drop_extension() {
        assert_eq!(
            processed_file_name(resolve("txt-to-pdf"), "notes.txt"),
            "notes_processed"
        );
        assert_eq!(processed_file_name(&DEFAULT_TOOL, "notes.txt"), "notes_processed");
    }

    #[test]
    fn base_stops_at_first_dot() {
        assert_eq!(
            processed_file_name(resolve("compress-pdf"), "archive.v2.final.pdf"),
            "archive_processed.pdf"
        );
        assert_eq!(
            processed_file_name(resolve("compress-pdf"), "README"),
            "README_processed.pdf"
        );
    }
}
