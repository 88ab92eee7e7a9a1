//! PDF Rendering
//!
//! Reports are printed with a headless Chromium. The renderer sits behind a
//! trait so the API can be exercised without a browser installed.

use async_trait::async_trait;
use std::path::{Component, Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;

use super::{ReportError, ReportResult};

/// Turns a report document into PDF bytes
#[async_trait]
pub trait ReportRenderer: Send + Sync {
    async fn render_pdf(&self, html: &str) -> ReportResult<Vec<u8>>;
}

/// Renderer backed by `chromium --headless --print-to-pdf`
#[derive(Debug, Clone)]
pub struct ChromiumRenderer {
    binary: PathBuf,
    timeout: Duration,
}

impl ChromiumRenderer {
    pub fn new(binary: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            binary: binary.into(),
            timeout,
        }
    }

    pub fn binary(&self) -> &Path {
        &self.binary
    }
}

impl Default for ChromiumRenderer {
    fn default() -> Self {
        Self::new("chromium", Duration::from_secs(60))
    }
}

#[async_trait]
impl ReportRenderer for ChromiumRenderer {
    async fn render_pdf(&self, html: &str) -> ReportResult<Vec<u8>> {
        let workdir = tempfile::tempdir()?;
        let html_path = workdir.path().join("report.html");
        let pdf_path = workdir.path().join("report.pdf");

        tokio::fs::write(&html_path, html).await?;

        let mut command = tokio::process::Command::new(&self.binary);
        command
            .arg("--headless")
            .arg("--no-sandbox")
            .arg("--disable-gpu")
            .arg(format!("--print-to-pdf={}", pdf_path.display()))
            .arg(file_url(&html_path))
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        tracing::debug!(binary = %self.binary.display(), "Starting PDF renderer");

        let child = command.spawn().map_err(|e| ReportError::RendererUnavailable {
            binary: self.binary.display().to_string(),
            error: e.to_string(),
        })?;

        let output = tokio::time::timeout(self.timeout, child.wait_with_output())
            .await
            .map_err(|_| ReportError::Timeout(self.timeout.as_secs()))??;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(ReportError::RendererFailed(format!(
                "{} exited with {}: {}",
                self.binary.display(),
                output.status,
                stderr.trim()
            )));
        }

        let pdf = tokio::fs::read(&pdf_path).await?;
        if pdf.is_empty() {
            return Err(ReportError::RendererFailed(
                "renderer produced an empty file".to_string(),
            ));
        }

        Ok(pdf)
    }
}

/// `file://` URL for an absolute path, each segment percent-encoded
fn file_url(path: &Path) -> String {
    let mut url = String::from("file://");
    for component in path.components() {
        if let Component::Normal(segment) = component {
            url.push('/');
            url.push_str(&urlencoding::encode(&segment.to_string_lossy()));
        }
    }
    url
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_file_url_encodes_segments() {
        assert_eq!(
            file_url(Path::new("/tmp/my reports/#1/report.html")),
            "file:///tmp/my%20reports/%231/report.html"
        );
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_slow_renderer_times_out() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let script = dir.path().join("slow-chromium");
        std::fs::write(&script, "#!/bin/sh\nsleep 30\n").unwrap();
        std::fs::set_permissions(&script, std::fs::Permissions::from_mode(0o755)).unwrap();

        let renderer = ChromiumRenderer::new(&script, Duration::from_secs(1));
        let started = std::time::Instant::now();

        let err = renderer.render_pdf("<html></html>").await.unwrap_err();
        assert!(matches!(err, ReportError::Timeout(1)));
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    #[tokio::test]
    async fn test_missing_binary_is_unavailable() {
        let renderer = ChromiumRenderer::new(
            "/nonexistent/interviewer-test-chromium",
            Duration::from_secs(5),
        );

        let err = renderer.render_pdf("<html></html>").await.unwrap_err();
        assert!(matches!(err, ReportError::RendererUnavailable { .. }));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_failing_renderer_reports_exit_status() {
        // `false` accepts any arguments and exits 1
        let renderer = ChromiumRenderer::new("false", Duration::from_secs(5));

        let err = renderer.render_pdf("<html></html>").await.unwrap_err();
        assert!(matches!(err, ReportError::RendererFailed(_)));
    }

    #[test]
    fn test_default_binary() {
        assert_eq!(
            ChromiumRenderer::default().binary(),
            Path::new("chromium")
        );
    }
}
