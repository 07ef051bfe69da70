//! The tool table and lookups.

use super::types::{AcceptFilter, ToolCategory, ToolDescriptor};

const PDF: &[&str] = &[".pdf"];
const WORD: &[&str] = &[".doc", ".docx"];
const IMAGES: &[&str] = &[".jpg", ".jpeg", ".png", ".webp", ".gif"];
const ALL_IMAGES: &[&str] = &[".jpg", ".jpeg", ".png", ".webp", ".gif", ".bmp", ".tiff"];
const EXCEL: &[&str] = &[".xls", ".xlsx"];
const POWERPOINT: &[&str] = &[".ppt", ".pptx"];
const HTML: &[&str] = &[".html", ".htm"];
const TEXT: &[&str] = &[".txt"];
const EPUB: &[&str] = &[".epub"];
const XML: &[&str] = &[".xml"];

/// Descriptor used for ids missing from the catalog.
pub static DEFAULT_TOOL: ToolDescriptor = ToolDescriptor {
    id: "",
    title: "Process Files",
    description: "Select files to process",
    accept: AcceptFilter::Any,
    multiple: true,
    category: None,
    output_extension: None,
};

const fn tool(
    id: &'static str,
    title: &'static str,
    description: &'static str,
    accept: &'static [&'static str],
    multiple: bool,
    category: ToolCategory,
    output_extension: Option<&'static str>,
) -> ToolDescriptor {
    ToolDescriptor {
        id,
        title,
        description,
        accept: AcceptFilter::Extensions(accept),
        multiple,
        category: Some(category),
        output_extension,
    }
}

static TOOLS: [ToolDescriptor; 18] = [
    // PDF tools
    tool(
        "merge-pdf",
        "Merge PDF Files",
        "Select multiple PDF files to merge them into one document",
        PDF,
        true,
        ToolCategory::Pdf,
        None,
    ),
    tool(
        "split-pdf",
        "Split PDF File",
        "Select a PDF file to split into separate pages",
        PDF,
        false,
        ToolCategory::Pdf,
        None,
    ),
    tool(
        "compress-pdf",
        "Compress PDF",
        "Select PDF files to reduce their file size",
        PDF,
        true,
        ToolCategory::Pdf,
        Some("pdf"),
    ),
    tool(
        "pdf-to-word",
        "Convert PDF to Word",
        "Select PDF files to convert to Word documents",
        PDF,
        true,
        ToolCategory::Pdf,
        Some("docx"),
    ),
    tool(
        "word-to-pdf",
        "Convert Word to PDF",
        "Select Word documents to convert to PDF",
        WORD,
        true,
        ToolCategory::Pdf,
        Some("pdf"),
    ),
    tool(
        "pdf-to-jpg",
        "Convert PDF to JPG",
        "Select PDF files to convert pages to images",
        PDF,
        true,
        ToolCategory::Pdf,
        Some("jpg"),
    ),
    // Image tools
    tool(
        "compress-image",
        "Compress Images",
        "Select images to reduce their file size",
        IMAGES,
        true,
        ToolCategory::Image,
        Some("jpg"),
    ),
    tool(
        "resize-image",
        "Resize Images",
        "Select images to change their dimensions",
        IMAGES,
        true,
        ToolCategory::Image,
        None,
    ),
    tool(
        "convert-image",
        "Convert Image Format",
        "Select images to convert between different formats",
        ALL_IMAGES,
        true,
        ToolCategory::Image,
        None,
    ),
    tool(
        "crop-image",
        "Crop Images",
        "Select images to crop and cut",
        IMAGES,
        true,
        ToolCategory::Image,
        None,
    ),
    tool(
        "rotate-image",
        "Rotate Images",
        "Select images to rotate by any angle",
        IMAGES,
        true,
        ToolCategory::Image,
        None,
    ),
    tool(
        "jpg-to-pdf",
        "Convert Images to PDF",
        "Select images to convert to PDF document",
        IMAGES,
        true,
        ToolCategory::Image,
        Some("pdf"),
    ),
    // Document tools
    tool(
        "excel-to-pdf",
        "Convert Excel to PDF",
        "Select Excel files to convert to PDF",
        EXCEL,
        true,
        ToolCategory::Document,
        None,
    ),
    tool(
        "ppt-to-pdf",
        "Convert PowerPoint to PDF",
        "Select PowerPoint files to convert to PDF",
        POWERPOINT,
        true,
        ToolCategory::Document,
        None,
    ),
    tool(
        "html-to-pdf",
        "Convert HTML to PDF",
        "Select HTML files to convert to PDF",
        HTML,
        true,
        ToolCategory::Document,
        None,
    ),
    tool(
        "txt-to-pdf",
        "Convert Text to PDF",
        "Select text files to convert to PDF",
        TEXT,
        true,
        ToolCategory::Document,
        None,
    ),
    tool(
        "epub-to-pdf",
        "Convert EPUB to PDF",
        "Select EPUB files to convert to PDF",
        EPUB,
        true,
        ToolCategory::Document,
        None,
    ),
    tool(
        "xml-to-pdf",
        "Convert XML to PDF",
        "Select XML files to convert to PDF",
        XML,
        true,
        ToolCategory::Document,
        None,
    ),
];

/// All catalog entries in display order.
pub fn all() -> &'static [ToolDescriptor] {
    &TOOLS
}

/// Find a catalog entry by exact id.
pub fn lookup(id: &str) -> Option<&'static ToolDescriptor> {
    TOOLS.iter().find(|t| t.id == id)
}

/// Find a catalog entry, falling back to [`DEFAULT_TOOL`] for unknown ids.
pub fn resolve(id: &str) -> &'static ToolDescriptor {
    lookup(id).unwrap_or_else(|| {
        tracing::debug!("Unknown tool id '{}', using default descriptor", id);
        &DEFAULT_TOOL
    })
}

/// Catalog entries in one category.
pub fn by_category(category: ToolCategory) -> impl Iterator<Item = &'static ToolDescriptor> {
    TOOLS.iter().filter(move |t| t.category == Some(category))
}
