//! Watched files handler.

use tower_lsp::lsp_types::*;
use tracing::{debug, info};

use textwatch_core::settings::{SETTINGS_DIR, SETTINGS_FILE};

/// Handles the `workspace/didChangeWatchedFiles` notification.
///
/// Returns true if the settings file changed, in which case every open
/// document must be validated again.
pub async fn handle_did_change_watched_files(params: DidChangeWatchedFilesParams) -> bool {
    debug!("Watched files changed: {:?}", params.changes);

    let suffix = format!("/{SETTINGS_DIR}/{SETTINGS_FILE}");
    let settings_changed = params
        .changes
        .iter()
        .any(|change| change.uri.path().ends_with(&suffix));

    if settings_changed {
        info!("Settings file changed, revalidating open documents...");
    }
    settings_changed
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("file:///work/.vscode/settings.json", true)]
    #[case("file:///work/src/App.tsx", false)]
    #[case("file:///work/settings.json", false)]
    #[case("file:///work/.vscode/launch.json", false)]
    #[tokio::test]
    async fn test_detects_settings_change(#[case] uri: &str, #[case] expected: bool) {
        let params = DidChangeWatchedFilesParams {
            changes: vec![FileEvent {
                uri: Url::parse(uri).unwrap(),
                typ: FileChangeType::CHANGED,
            }],
        };

        assert_eq!(handle_did_change_watched_files(params).await, expected);
    }
}
