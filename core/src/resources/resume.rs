use crate::error::ResumeError;
use crate::traits::Resource;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::warn;

const PAGE_BREAK: char = '\u{c}';

pub struct ResumeResource {
    path: PathBuf,
}

impl ResumeResource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

/// Extracts the text of every page of the PDF at `path`.
pub fn extract_resume_text(path: &Path) -> Result<String, ResumeError> {
    let bytes = std::fs::read(path).map_err(|source| ResumeError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    guard_parser(|| pdf_extract::extract_text_from_mem(&bytes)).map(|text| join_pages(&text))
}

/// Runs `parse`, turning both its error and a panic into `ResumeError::Extract`.
///
/// The PDF parser can panic on malformed input. Catching it relies on the
/// workspace profiles unwinding on panic.
pub fn guard_parser<F, E>(parse: F) -> Result<String, ResumeError>
where
    F: FnOnce() -> Result<String, E> + std::panic::UnwindSafe,
    E: std::fmt::Display,
{
    std::panic::catch_unwind(parse)
        .map_err(|_| ResumeError::Extract("PDF parser panicked".to_string()))?
        .map_err(|e| ResumeError::Extract(e.to_string()))
}

/// Joins the non-blank pages of extracted text with a blank line.
pub fn join_pages(text: &str) -> String {
    text.split(PAGE_BREAK)
        .filter(|page| !page.trim().is_empty())
        .collect::<Vec<_>>()
        .join("\n\n")
}

pub fn render_resume(result: Result<String, ResumeError>) -> String {
    match result {
        Ok(text) => {
            let text = text.trim();
            let body = if text.is_empty() {
                "No readable content."
            } else {
                text
            };
            format!("# Resume Content\n\n{body}")
        }
        Err(e) => format!("Error reading resume: {e}"),
    }
}

#[async_trait]
impl Resource for ResumeResource {
    fn uri(&self) -> &str {
        "resume://default"
    }

    fn name(&self) -> &str {
        "resume"
    }

    fn description(&self) -> &str {
        "Text of the candidate's resume PDF, as markdown"
    }

    async fn read(&self) -> anyhow::Result<String> {
        let path = self.path.clone();
        let result = tokio::task::spawn_blocking(move || extract_resume_text(&path))
            .await
            .unwrap_or_else(|e| Err(ResumeError::Extract(e.to_string())));

        if let Err(e) = &result {
            warn!(path = %self.path.display(), "Could not read resume: {}", e);
        }

        Ok(render_resume(result))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn joins_non_blank_pages() {
        assert_eq!(
            join_pages("Page one\n\u{c}   \n\u{c}Page three"),
            "Page one\n\n\nPage three"
        );
        assert_eq!(join_pages("single page"), "single page");
    }

    #[test]
    fn renders_content_and_placeholder() {
        assert_eq!(
            render_resume(Ok("  Jane Doe\nRust engineer \n".to_string())),
            "# Resume Content\n\nJane Doe\nRust engineer"
        );
        assert_eq!(
            render_resume(Ok("   ".to_string())),
            "# Resume Content\n\nNo readable content."
        );
    }

    #[test]
    fn parser_panic_becomes_extract_error() {
        let err = guard_parser(|| -> Result<String, String> { panic!("bad xref table") })
            .unwrap_err();
        assert!(matches!(&err, ResumeError::Extract(msg) if msg == "PDF parser panicked"));
        assert_eq!(
            render_resume(Err(err)),
            "Error reading resume: PDF parser panicked"
        );

        let err = guard_parser(|| Err::<String, _>("unsupported encoding")).unwrap_err();
        assert_eq!(err.to_string(), "unsupported encoding");
    }

    #[tokio::test]
    async fn broken_pdf_structure_never_escapes_the_reader() {
        let tmp = TempDir::new().unwrap();
        let samples: [&[u8]; 3] = [
            b"%PDF-1.4\n%%EOF",
            b"%PDF-1.4\n1 0 obj << /Type /Catalog /Pages 2 0 R >> endobj\ntrailer << /Root 1 0 R >>\n%%EOF",
            b"%PDF-1.7\nxref\n0 2\n0000000000 65535 f \n9999999999 00000 n \ntrailer << /Size 2 /Root 1 0 R >>\nstartxref\n9\n%%EOF",
        ];

        for (i, bytes) in samples.iter().enumerate() {
            let path = tmp.path().join(format!("broken-{i}.pdf"));
            std::fs::write(&path, bytes).unwrap();

            let text = ResumeResource::new(path).read().await.unwrap();
            assert!(
                text.starts_with("Error reading resume: ") || text.starts_with("# Resume Content"),
                "unexpected output for sample {i}: {text}"
            );
        }
    }

    #[tokio::test]
    async fn missing_file_degrades_to_message() {
        let tmp = TempDir::new().unwrap();
        let resource = ResumeResource::new(tmp.path().join("nope.pdf"));

        let text = resource.read().await.unwrap();
        assert!(text.starts_with("Error reading resume: could not read"));
        assert!(text.contains("nope.pdf"));
    }

    #[tokio::test]
    async fn non_pdf_degrades_to_message() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("resume.pdf");
        std::fs::write(&path, "definitely not a pdf").unwrap();

        let text = ResumeResource::new(path).read().await.unwrap();
        assert!(text.starts_with("Error reading resume: "));
    }
}
