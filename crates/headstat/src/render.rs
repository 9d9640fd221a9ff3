use anyhow::Result;
use clap::ValueEnum;
use colored::Colorize;
use serde::Deserialize;

use headstat_git::Status;

/// How the report is written to stdout
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Pretty,
    Json,
}

pub fn render(status: &Status, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Pretty => Ok(render_pretty(status)),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(status)?),
    }
}

fn render_pretty(status: &Status) -> String {
    let mut out = String::new();

    let branch = if status.is_detached() {
        "(detached)".dimmed().to_string()
    } else {
        status.branch.bright_green().to_string()
    };
    out.push_str(&format!("{} {}\n", "Branch: ".bold(), branch));
    out.push_str(&format!("{} {}\n", "Message:".bold(), status.subject()));

    let tags = if status.tags.is_empty() {
        "(none)".dimmed().to_string()
    } else {
        status.tags.join(", ").bright_yellow().to_string()
    };
    out.push_str(&format!("{} {}\n", "Tags:   ".bold(), tags));

    out.push_str(&format!(
        "{} {} changed",
        "Files:  ".bold(),
        status.files.len()
    ));
    for file in &status.files {
        out.push_str(&format!("\n  {}", file.bright_cyan()));
    }

    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Status {
        Status {
            branch: "feature/test".to_string(),
            files: vec!["a.txt".to_string(), "src/b.rs".to_string()],
            message: "add things\n\nwith a body\n".to_string(),
            tags: vec!["1.0.0".to_string(), "2.0.0".to_string()],
        }
    }

    #[test]
    fn test_render_pretty() {
        colored::control::set_override(false);

        let out = render(&sample(), OutputFormat::Pretty).unwrap();

        assert_eq!(
            out,
            "Branch:  feature/test\n\
             Message: add things\n\
             Tags:    1.0.0, 2.0.0\n\
             Files:   2 changed\n  a.txt\n  src/b.rs"
        );
    }

    #[test]
    fn test_render_pretty_detached_without_tags() {
        colored::control::set_override(false);

        let status = Status {
            message: "empty commit".to_string(),
            ..Default::default()
        };
        let out = render(&status, OutputFormat::Pretty).unwrap();

        assert!(out.contains("Branch:  (detached)"));
        assert!(out.contains("Tags:    (none)"));
        assert!(out.ends_with("Files:   0 changed"));
    }

    #[test]
    fn test_render_json_keeps_full_message() {
        let out = render(&sample(), OutputFormat::Json).unwrap();
        let parsed: Status = serde_json::from_str(&out).unwrap();

        assert_eq!(parsed, sample());
        assert_eq!(parsed.message, "add things\n\nwith a body\n");
    }
}
