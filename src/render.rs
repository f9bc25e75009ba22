//! Renderer boundary: write the scene to a scratch file, shell out to the
//! manim CLI at the low-quality preset, and locate the produced MP4.

use crate::util::tail_chars;
use std::path::PathBuf;
use std::time::Duration;
use tokio::process::Command;

const STDERR_TAIL_MAX_CHARS: usize = 8_000;

/// Settings for a render invocation, resolved once at startup.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Renderer executable, normally `manim`
    pub manim_bin: String,
    /// Root of manim's media output tree; also what `/media` serves
    pub media_dir: PathBuf,
    /// Directory for per-request scratch scene files
    pub scratch_dir: PathBuf,
    /// Wall-clock budget for one render
    pub timeout: Duration,
}

/// A successfully rendered video.
#[derive(Debug)]
pub struct RenderedVideo {
    /// Filesystem path of the MP4
    pub video_path: PathBuf,
    /// URL path under which the HTTP layer serves it
    pub url_path: String,
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("could not run renderer: {0}")]
    Io(#[from] std::io::Error),

    #[error("renderer exited with {code:?}: {stderr}")]
    Failed { code: Option<i32>, stderr: String },

    #[error("rendering timed out after {0:?}")]
    Timeout(Duration),

    #[error("renderer succeeded but no video was found at {}", .0.display())]
    MissingOutput(PathBuf),
}

/// Scratch file removed on scope exit, success or failure.
struct ScratchFile(PathBuf);

impl Drop for ScratchFile {
    fn drop(&mut self) {
        if let Err(e) = std::fs::remove_file(&self.0) {
            log::debug!("could not remove scratch file {}: {e}", self.0.display());
        }
    }
}

/// Render `code` by invoking the manim CLI on a uniquely named scratch file.
///
/// Manim writes its output to a path derived from the scratch filename and
/// the scene name: `<media>/videos/<scratch-stem>/480p15/<scene>.mp4`. The
/// unique stem keeps concurrent renders from clobbering each other.
pub async fn render(
    code: &str,
    scene_name: &str,
    config: &RenderConfig,
) -> Result<RenderedVideo, RenderError> {
    tokio::fs::create_dir_all(&config.scratch_dir).await?;

    let stem = format!("scene_{}", uuid::Uuid::new_v4().simple());
    let scene_file = config.scratch_dir.join(format!("{stem}.py"));
    tokio::fs::write(&scene_file, code).await?;
    let _scratch = ScratchFile(scene_file.clone());

    log::info!(
        "rendering {scene_name} from {} (timeout {:?})",
        scene_file.display(),
        config.timeout
    );

    let result = tokio::time::timeout(
        config.timeout,
        Command::new(&config.manim_bin)
            .arg("-ql")
            .arg("--media_dir")
            .arg(&config.media_dir)
            .arg(&scene_file)
            .arg(scene_name)
            .kill_on_drop(true)
            .output(),
    )
    .await;

    let output = match result {
        Ok(output) => output?,
        Err(_) => return Err(RenderError::Timeout(config.timeout)),
    };

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr);
        return Err(RenderError::Failed {
            code: output.status.code(),
            stderr: tail_chars(&stderr, STDERR_TAIL_MAX_CHARS),
        });
    }

    // Quality preset -ql maps to manim's 480p15 output directory.
    let relative = PathBuf::from("videos")
        .join(&stem)
        .join("480p15")
        .join(format!("{scene_name}.mp4"));
    let video_path = config.media_dir.join(&relative);
    if !video_path.exists() {
        return Err(RenderError::MissingOutput(video_path));
    }

    Ok(RenderedVideo {
        url_path: format!("/media/{}", relative.display()),
        video_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn test_config(dir: &std::path::Path, manim_bin: &str) -> RenderConfig {
        RenderConfig {
            manim_bin: manim_bin.to_string(),
            media_dir: dir.join("media"),
            scratch_dir: dir.join("temp"),
            timeout: Duration::from_secs(5),
        }
    }

    #[tokio::test]
    async fn missing_renderer_binary_is_io_error() {
        let dir = tempdir().unwrap();
        let config = test_config(dir.path(), "animagen-no-such-renderer");
        let err = render("x = 1", "Intro", &config).await.unwrap_err();
        assert!(matches!(err, RenderError::Io(_)));
    }

    #[tokio::test]
    async fn scratch_file_is_removed_after_failure() {
        let dir = tempdir().unwrap();
        let config = test_config(dir.path(), "animagen-no-such-renderer");
        let _ = render("x = 1", "Intro", &config).await;
        let leftovers: Vec<_> = std::fs::read_dir(&config.scratch_dir)
            .unwrap()
            .collect();
        assert!(leftovers.is_empty(), "scratch file survived: {leftovers:?}");
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn successful_exit_without_video_is_missing_output() {
        // `true` exits 0 but writes nothing, so the expected MP4 is absent.
        let dir = tempdir().unwrap();
        let config = test_config(dir.path(), "true");
        let err = render("x = 1", "Intro", &config).await.unwrap_err();
        assert!(matches!(err, RenderError::MissingOutput(_)));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn nonzero_exit_carries_exit_code() {
        let dir = tempdir().unwrap();
        let config = test_config(dir.path(), "false");
        let err = render("x = 1", "Intro", &config).await.unwrap_err();
        match err {
            RenderError::Failed { code, .. } => assert_eq!(code, Some(1)),
            other => panic!("expected Failed, got {other:?}"),
        }
    }
}
