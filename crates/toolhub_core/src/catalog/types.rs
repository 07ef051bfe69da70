//! Catalog types.

use std::fmt;

use serde::Serialize;

/// Section a tool is listed under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ToolCategory {
    /// Merge, split, compress and convert PDFs.
    Pdf,
    /// Compress, resize, convert, crop and rotate images.
    Image,
    /// Office, web and text documents to PDF.
    Document,
}

impl ToolCategory {
    /// All categories in display order.
    pub const ALL: [ToolCategory; 3] = [Self::Pdf, Self::Image, Self::Document];

    /// Get display string for UI.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pdf => "PDF Tools",
            Self::Image => "Image Tools",
            Self::Document => "Document Tools",
        }
    }

    /// Parse a category from its short name (`pdf`, `image`, `document`).
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "pdf" => Some(Self::Pdf),
            "image" => Some(Self::Image),
            "document" | "doc" => Some(Self::Document),
            _ => None,
        }
    }
}

impl fmt::Display for ToolCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// File-picker filter for a tool.
///
/// Advisory only: the session never rejects files that fail the filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AcceptFilter {
    /// Any file (`*/*`).
    Any,
    /// Listed extensions, each with a leading dot.
    Extensions(&'static [&'static str]),
}

impl AcceptFilter {
    /// Check whether a file name matches the filter (case-insensitive).
    pub fn accepts(&self, file_name: &str) -> bool {
        match self {
            AcceptFilter::Any => true,
            AcceptFilter::Extensions(exts) => {
                let lower = file_name.to_ascii_lowercase();
                exts.iter().any(|ext| lower.ends_with(ext))
            }
        }
    }
}

impl fmt::Display for AcceptFilter {
    /// Formats as an HTML `accept` attribute value.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AcceptFilter::Any => f.write_str("*/*"),
            AcceptFilter::Extensions(exts) => f.write_str(&exts.join(",")),
        }
    }
}

/// Static description of a tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ToolDescriptor {
    /// Catalog key (e.g. `merge-pdf`).
    pub id: &'static str,
    /// Upload panel title.
    pub title: &'static str,
    /// Upload panel description.
    pub description: &'static str,
    /// File-picker filter.
    pub accept: AcceptFilter,
    /// Whether the picker allows selecting several files.
    pub multiple: bool,
    /// Section the tool is listed under. `None` for the fallback descriptor.
    pub category: Option<ToolCategory>,
    /// Extension of the fabricated output file, if the tool changes format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_extension: Option<&'static str>,
}

impl ToolDescriptor {
    /// Whether this is the generic fallback descriptor.
    pub fn is_fallback(&self) -> bool {
        self.category.is_none()
    }

    /// Advisory check of a file name against this tool's filter.
    pub fn accepts(&self, file_name: &str) -> bool {
        self.accept.accepts(file_name)
    }
}
