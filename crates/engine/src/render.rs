use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::plan::RenderJob;

/// Line prefix a renderer prints once the video has been written
pub const SUCCESS_MARKER: &str = "Video created successfully: ";

/// Structured result a renderer may write next to its job description
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenderOutcome {
    pub output_path: String,
}

/// Job description file contents handed to the renderer
pub fn job_description(job: &RenderJob) -> serde_json::Result<String> {
    serde_json::to_string_pretty(job)
}

pub fn parse_outcome(contents: &str) -> Option<PathBuf> {
    serde_json::from_str::<RenderOutcome>(contents)
        .ok()
        .map(|o| o.output_path.trim().to_string())
        .filter(|p| !p.is_empty())
        .map(PathBuf::from)
}

/// Finds the success marker in free-form renderer output.
///
/// The first marker wins; a marker with nothing after it does not count.
pub fn parse_success_marker(stdout: &str) -> Option<PathBuf> {
    stdout.lines().find_map(|line| {
        let idx = line.find(SUCCESS_MARKER)?;
        let path = line[idx + SUCCESS_MARKER.len()..].trim();
        (!path.is_empty()).then(|| PathBuf::from(path))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_is_found_among_other_output() {
        let stdout = "Moviepy - Building video\nchunk: 100%\nVideo created successfully: output/video_1.mp4\n";
        assert_eq!(
            parse_success_marker(stdout),
            Some(PathBuf::from("output/video_1.mp4"))
        );
    }

    #[test]
    fn first_marker_wins() {
        let stdout = "Video created successfully: out/first.mp4\nVideo created successfully: out/second.mp4\n";
        assert_eq!(parse_success_marker(stdout), Some(PathBuf::from("out/first.mp4")));
    }

    #[test]
    fn missing_or_empty_marker_is_none() {
        assert_eq!(parse_success_marker("done\n"), None);
        assert_eq!(parse_success_marker(""), None);
        assert_eq!(parse_success_marker("Video created successfully:   \n"), None);
    }

    #[test]
    fn outcome_file_is_parsed() {
        assert_eq!(
            parse_outcome(r#"{"output_path": "out/v.mp4"}"#),
            Some(PathBuf::from("out/v.mp4"))
        );
        assert_eq!(parse_outcome(r#"{"output_path": ""}"#), None);
        assert_eq!(parse_outcome("not json"), None);
    }
}
