//! Translate command implementation

use crate::Emit;
use anyhow::{Context, Result};
use colored::Colorize;
use hr_driver::{HeronConfig, Translation};
use std::path::{Path, PathBuf};

pub fn translate(
    files: &[PathBuf],
    emit: Emit,
    config: Option<&Path>,
    out_dir: Option<&Path>,
) -> Result<()> {
    let config = match config {
        Some(path) => HeronConfig::from_file(path)?,
        None => {
            let dir = files
                .first()
                .and_then(|file| file.parent())
                .filter(|dir| !dir.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));
            HeronConfig::find_in_dir(dir)?
        }
    };

    if let Some(dir) = out_dir {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create output directory: {}", dir.display()))?;
    }

    tracing::debug!(files = files.len(), ?emit, "translating");

    let mut failures = 0;
    for (path, result) in hr_driver::translate_files(files, &config.printer) {
        match result {
            Ok(translation) => {
                let text = render(&translation, emit)?;
                match out_dir {
                    Some(dir) => {
                        let target = output_path(dir, &path, emit);
                        std::fs::write(&target, text)
                            .with_context(|| format!("Failed to write {}", target.display()))?;
                        eprintln!("{} {}", "Wrote".green().bold(), target.display());
                    }
                    None => print!("{text}"),
                }
            }
            Err(error) => {
                failures += 1;
                eprintln!("{:?}", miette::Report::new(error));
            }
        }
    }

    if failures > 0 {
        anyhow::bail!("{failures} file(s) could not be translated");
    }

    Ok(())
}

fn render(translation: &Translation, emit: Emit) -> Result<String> {
    match emit {
        Emit::Python => Ok(translation.output.clone()),
        Emit::Ast => {
            let mut json = serde_json::to_string_pretty(&translation.module)?;
            json.push('\n');
            Ok(json)
        }
    }
}

fn output_path(dir: &Path, input: &Path, emit: Emit) -> PathBuf {
    let stem = input
        .file_stem()
        .map_or_else(|| "out".into(), |stem| stem.to_string_lossy());
    let extension = match emit {
        Emit::Python => "py",
        Emit::Ast => "json",
    };
    dir.join(format!("{stem}.{extension}"))
}
