//! Serving of the prebuilt single-page frontend.

use std::path::{Path, PathBuf};

use axum::{
    extract::{Request, State},
    response::{Html, IntoResponse, Response},
};
use tower::ServiceExt;
use tower_http::services::ServeFile;
use tracing::{info, warn};

use crate::state::AppState;

const FALLBACK_INDEX: &str = r#"<html>
    <head><title>Excuse Email Draft Tool</title></head>
    <body>
        <h1>Excuse Email Draft Tool</h1>
        <p>Frontend not found. Please ensure index.html exists in the public directory.</p>
        <p>API is available at <a href="/docs">/docs</a></p>
    </body>
</html>"#;

const DOCS_PAGE: &str = r#"<html>
    <head><title>Excuse Email Draft Tool - API</title></head>
    <body>
        <h1>Excuse Email Draft Tool API</h1>
        <ul>
            <li><code>POST /api/generate-excuse</code> - body: <code>{"category", "tone", "seriousness" (1-5), "recipient_name", "sender_name", "eta_when"}</code>; returns <code>{"subject", "body", "success", "error"}</code></li>
            <li><code>GET /health</code>, <code>/healthz</code>, <code>/ready</code>, <code>/ping</code> - liveness</li>
            <li><code>GET /metrics</code> - metrics placeholder</li>
            <li><code>GET /debug</code> - configuration summary</li>
            <li><code>GET /static/*</code> - frontend assets</li>
        </ul>
    </body>
</html>"#;

/// Location of the frontend build, resolved once at startup.
#[derive(Debug, Clone, Default)]
pub struct Frontend {
    public_dir: Option<PathBuf>,
}

impl Frontend {
    /// Picks the first existing directory among `explicit` and the built-in
    /// candidates.
    pub fn resolve(explicit: Option<&Path>) -> Self {
        let public_dir = candidate_dirs(explicit).into_iter().find(|dir| dir.is_dir());

        match &public_dir {
            Some(dir) => info!("Found public directory at: {}", dir.display()),
            None => warn!("Public directory not found; serving fallback index page"),
        }

        Self { public_dir }
    }

    pub fn public_dir(&self) -> Option<&Path> {
        self.public_dir.as_deref()
    }

    /// `index.html` inside the public directory, if it exists right now.
    fn index_file(&self) -> Option<PathBuf> {
        self.public_dir
            .as_ref()
            .map(|dir| dir.join("index.html"))
            .filter(|file| file.is_file())
    }
}

fn candidate_dirs(explicit: Option<&Path>) -> Vec<PathBuf> {
    let mut dirs: Vec<PathBuf> = explicit.map(Path::to_path_buf).into_iter().collect();

    if let Some(exe_dir) = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(Path::to_path_buf))
    {
        dirs.push(exe_dir.join("..").join("public"));
    }
    dirs.extend(
        ["public", "/app/public", "/workspace/public"]
            .into_iter()
            .map(PathBuf::from),
    );

    dirs
}

/// GET /
pub async fn index_handler(State(state): State<AppState>, request: Request) -> Response {
    match state.frontend.index_file() {
        Some(index) => match ServeFile::new(index).oneshot(request).await {
            Ok(response) => response.into_response(),
            Err(never) => match never {},
        },
        None => Html(FALLBACK_INDEX).into_response(),
    }
}

/// GET /docs
pub async fn docs_handler() -> Html<&'static str> {
    Html(DOCS_PAGE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_dir_wins_when_present() {
        let dir = tempfile::tempdir().unwrap();
        let frontend = Frontend::resolve(Some(dir.path()));
        assert_eq!(frontend.public_dir(), Some(dir.path()));
    }

    #[test]
    fn test_missing_explicit_dir_is_skipped() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("nope");
        let frontend = Frontend::resolve(Some(&missing));
        assert_ne!(frontend.public_dir(), Some(missing.as_path()));
    }

    #[test]
    fn test_explicit_dir_is_tried_first() {
        let dir = tempfile::tempdir().unwrap();
        let dirs = candidate_dirs(Some(dir.path()));
        assert_eq!(dirs[0], dir.path());
        assert!(dirs.contains(&PathBuf::from("/app/public")));
    }

    #[test]
    fn test_index_file_requires_index_html() {
        let dir = tempfile::tempdir().unwrap();
        let frontend = Frontend::resolve(Some(dir.path()));
        assert!(frontend.index_file().is_none());

        std::fs::write(dir.path().join("index.html"), "<html></html>").unwrap();
        assert_eq!(frontend.index_file(), Some(dir.path().join("index.html")));
    }
}
