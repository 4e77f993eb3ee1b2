//! Rendering backends for Markdown slide decks.
//!
//! Both backends implement [`deck_core::RenderBackend`]: the JSON backend
//! writes the full slide plans, the outline backend a readable text summary.

pub mod json;
pub mod outline;

pub use json::JsonBackend;
pub use outline::OutlineBackend;

use deck_core::RenderBackend;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Output formats the backends in this crate provide.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Outline,
}

impl OutputFormat {
    /// File extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            OutputFormat::Json => "json",
            OutputFormat::Outline => "txt",
        }
    }

    /// A fresh backend for this format.
    pub fn backend(&self) -> Box<dyn RenderBackend> {
        match self {
            OutputFormat::Json => Box::new(JsonBackend::new()),
            OutputFormat::Outline => Box::new(OutlineBackend::new()),
        }
    }
}

/// Output path meaning standard output.
pub const STDOUT_PATH: &str = "-";

/// Write `content` to `path`, creating parent directories as needed.
/// [`STDOUT_PATH`] writes to standard output instead.
pub(crate) fn write_file(path: &Path, content: &str) -> deck_core::Result<()> {
    if path == Path::new(STDOUT_PATH) {
        let mut stdout = std::io::stdout().lock();
        stdout.write_all(content.as_bytes())?;
        stdout.flush()?;
        return Ok(());
    }

    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }

    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    log::debug!("Wrote {} bytes to {}", content.len(), path.display());
    Ok(())
}
