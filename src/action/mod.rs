//! Action module - Reference export and clipboard

pub mod clipboard;

pub use clipboard::{
    format_reference, format_references, output_references, ClipboardBackend, ClipboardExporter,
    CopyOutcome, ExportFormat, SystemClipboard, REFERENCES_HEADER,
};
