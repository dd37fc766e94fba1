//! Core template processing.
//! Walks a template directory once, rendering every path and file body, and
//! writes the result below an output directory.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use walkdir::WalkDir;

use crate::bindings::Bindings;
use crate::constants::TEMPLATE_CONFIG_FILE;
use crate::descriptor::Template;
use crate::error::{Error, Phase, Result};
use crate::renderer::TemplateRenderer;

/// What one call to [`Processor::process`] produced.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessResult {
    /// Number of files written.
    pub files_created: usize,
    /// Number of directory entries materialized. Parents created implicitly
    /// for a file are not counted.
    pub dirs_created: usize,
    /// Template-relative paths of written files, unrendered, in walk order.
    pub created_files: Vec<PathBuf>,
}

/// Renders a template tree into an output directory.
pub struct Processor<'a> {
    template: &'a Template,
    bindings: &'a Bindings,
    renderer: &'a dyn TemplateRenderer,
}

impl<'a> Processor<'a> {
    pub fn new(
        template: &'a Template,
        bindings: &'a Bindings,
        renderer: &'a dyn TemplateRenderer,
    ) -> Self {
        Self { template, bindings, renderer }
    }

    /// Processes every entry below `template_dir` into `output_dir`.
    ///
    /// Entries are visited depth-first, pre-order, sorted by file name within
    /// each directory. Any entry named `template.toml` is skipped. Paths are
    /// rendered as `output_dir` joined with the entry's relative path, so
    /// directory and file names may contain placeholders.
    ///
    /// The first error stops the walk and is returned wrapped with the
    /// relative path and the phase it occurred in. Output already written is
    /// left in place.
    pub fn process<P: AsRef<Path>, Q: AsRef<Path>>(
        &self,
        template_dir: P,
        output_dir: Q,
    ) -> Result<ProcessResult> {
        let template_dir = template_dir.as_ref();
        let output_dir = output_dir.as_ref();
        debug!(
            "Processing template '{}' from {} into {}",
            self.template.metadata.name,
            template_dir.display(),
            output_dir.display()
        );

        let mut result = ProcessResult::default();

        for entry in WalkDir::new(template_dir).min_depth(1).sort_by_file_name() {
            let entry = entry.map_err(|e| walk_error(template_dir, e))?;

            if entry.file_name() == TEMPLATE_CONFIG_FILE {
                debug!("Skipping template descriptor {}", entry.path().display());
                continue;
            }

            let relative_path = entry
                .path()
                .strip_prefix(template_dir)
                .map(Path::to_path_buf)
                .unwrap_or_else(|_| entry.path().to_path_buf());

            let target_path = self
                .render_path(&output_dir.join(&relative_path))
                .map_err(|e| e.within(&relative_path, Phase::RenderPath))?;

            if entry.file_type().is_dir() {
                debug!("Creating directory: {}", target_path.display());
                fs::create_dir_all(&target_path).map_err(|e| {
                    Error::io(&target_path, e).within(&relative_path, Phase::CreateDir)
                })?;
                result.dirs_created += 1;
                continue;
            }

            self.process_file(entry.path(), &target_path, &relative_path)?;
            result.files_created += 1;
            result.created_files.push(relative_path);
        }

        Ok(result)
    }

    fn render_path(&self, path: &Path) -> Result<PathBuf> {
        let text = path.to_str().ok_or_else(|| Error::NonUtf8Path(path.to_path_buf()))?;
        Ok(PathBuf::from(self.renderer.render(text, self.bindings)?))
    }

    /// Renders one file into `target_path`. Content that is not UTF-8 is
    /// written back unchanged.
    fn process_file(&self, source: &Path, target_path: &Path, relative_path: &Path) -> Result<()> {
        let raw = fs::read(source)
            .map_err(|e| Error::io(source, e).within(relative_path, Phase::Read))?;

        let content = match String::from_utf8(raw) {
            Ok(text) => self
                .renderer
                .render(&text, self.bindings)
                .map_err(|e| e.within(relative_path, Phase::RenderContent))?
                .into_bytes(),
            Err(err) => {
                debug!("Copying non UTF-8 file as is: {}", relative_path.display());
                err.into_bytes()
            }
        };

        if let Some(parent) = target_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::io(parent, e).within(relative_path, Phase::CreateDir))?;
        }

        debug!("Writing file: {}", target_path.display());
        fs::write(target_path, content)
            .map_err(|e| Error::io(target_path, e).within(relative_path, Phase::Write))
    }
}

fn walk_error(template_dir: &Path, err: walkdir::Error) -> Error {
    let path = err.path().unwrap_or(template_dir).to_path_buf();
    let relative_path = path.strip_prefix(template_dir).unwrap_or(&path).to_path_buf();
    Error::io(path, err.into()).within(relative_path, Phase::Walk)
}
