//! Demo surface showing a bundled HTML page on demand.

use std::path::{Path, PathBuf};

pub const VIEWER_TITLE: &str = "ローカルHTML表示サンプル";
pub const VIEWER_NAVIGATION_TITLE: &str = "HTML表示";
pub const OPEN_LABEL: &str = "index.html を開く";
pub const CLOSE_LABEL: &str = "閉じる";

/// What the embedded view renders.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum HtmlContent {
    /// The bundled file, loaded with read access to its directory
    Bundled { path: PathBuf, read_access: PathBuf },
    /// Inline markup used when the bundled file is missing
    Inline(String),
}

/// Toggles an embedded view of `<bundle_dir>/<file_name>.html`.
#[derive(Clone, Debug)]
pub struct LocalHtmlViewer {
    bundle_dir: PathBuf,
    file_name: String,
    visible: bool,
}

impl LocalHtmlViewer {
    pub fn new(bundle_dir: impl AsRef<Path>, file_name: &str) -> Self {
        LocalHtmlViewer {
            bundle_dir: bundle_dir.as_ref().to_path_buf(),
            file_name: file_name.to_string(),
            visible: false,
        }
    }

    /// Flips visibility and returns the new state.
    pub fn toggle(&mut self) -> bool {
        self.visible = !self.visible;
        self.visible
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn button_label(&self) -> &'static str {
        if self.visible { CLOSE_LABEL } else { OPEN_LABEL }
    }

    /// The content to render, or `None` while the view is hidden.
    pub fn content(&self) -> Option<HtmlContent> {
        if !self.visible {
            return None;
        }
        let path = self.bundle_dir.join(format!("{}.html", self.file_name));
        if path.is_file() {
            Some(HtmlContent::Bundled {
                read_access: self.bundle_dir.clone(),
                path,
            })
        } else {
            tracing::warn!("Bundled page {} not found", path.display());
            Some(HtmlContent::Inline(self.fallback_html()))
        }
    }

    fn fallback_html(&self) -> String {
        format!(
            "<html><body><h3>{}.html が見つかりません</h3></body></html>",
            self.file_name
        )
    }
}
