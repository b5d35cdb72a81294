//! Standalone, print-ready HTML report. Opening the file in a browser brings
//! up the print dialog, which is where "Save as PDF" happens.

use crate::error::{CropwiseError, Result};
use crate::render::view_model::ResultsView;
use crate::render::{HtmlRenderer, ResultsRenderer};
use askama::Template;
use chrono::{DateTime, Local};
use std::fs::{File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

pub const REPORT_TITLE: &str = "Crop Recommendation Report";

#[derive(Template)]
#[template(path = "report.html")]
struct ReportTemplate<'a> {
    title: &'a str,
    generated: String,
    body: String,
}

pub fn render_report(view: &ResultsView, generated_at: DateTime<Local>) -> Result<String> {
    let report = ReportTemplate {
        title: REPORT_TITLE,
        generated: generated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        body: HtmlRenderer.render(view)?,
    };
    Ok(report.render()?)
}

/// `crop-report-YYYYMMDD-HHMMSS-mmm`, without extension.
pub fn report_file_stem(generated_at: DateTime<Local>) -> String {
    format!("crop-report-{}", generated_at.format("%Y%m%d-%H%M%S-%3f"))
}

/// Create a file that did not exist before, adding `-1`, `-2`, ... to the stem on collision.
fn create_unique(dir: &Path, stem: &str) -> Result<(PathBuf, File)> {
    for n in 0u32..1000 {
        let name = match n {
            0 => format!("{}.html", stem),
            _ => format!("{}-{}.html", stem, n),
        };
        let path = dir.join(name);
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => return Ok((path, file)),
            Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
            Err(e) => return Err(e.into()),
        }
    }
    Err(CropwiseError::InvalidData(format!(
        "No free report file name for {} in {}",
        stem,
        dir.display()
    )))
}

/// Render and write a report into `dir`, creating the directory if needed.
/// Never overwrites an earlier report.
pub fn write_report(dir: &Path, view: &ResultsView, generated_at: DateTime<Local>) -> Result<PathBuf> {
    let html = render_report(view, generated_at)?;
    std::fs::create_dir_all(dir)?;

    let (path, mut file) = create_unique(dir, &report_file_stem(generated_at))?;
    file.write_all(html.as_bytes())?;

    tracing::info!("Report written to {}", path.display());
    Ok(path)
}
