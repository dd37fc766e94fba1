//! Template discovery.
//! A template is any direct sub-directory of the templates directory that
//! holds a `template.toml`.

use std::fs;
use std::path::{Path, PathBuf};

use log::debug;
use serde::Serialize;

use crate::constants::TEMPLATE_CONFIG_FILE;
use crate::descriptor::{load_template, Template};
use crate::error::{Error, Result};

/// Summary of one template, as shown by `tg list`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TemplateInfo {
    pub name: String,
    pub version: String,
    pub author: String,
    pub description: String,
    pub variables: usize,
    pub path: PathBuf,
}

impl TemplateInfo {
    pub fn new(path: PathBuf, template: &Template) -> Self {
        Self {
            name: template.metadata.name.clone(),
            version: template.version.clone().unwrap_or_default(),
            author: template.metadata.author.clone(),
            description: template.metadata.description.clone(),
            variables: template.variables.len(),
            path,
        }
    }
}

/// Template directories below `templates_dir`, sorted by directory name.
fn template_dirs(templates_dir: &Path) -> Result<Vec<PathBuf>> {
    let entries = fs::read_dir(templates_dir).map_err(|e| Error::io(templates_dir, e))?;

    let mut dirs = Vec::new();
    for entry in entries {
        let path = entry.map_err(|e| Error::io(templates_dir, e))?.path();
        if !path.is_dir() {
            continue;
        }
        if !path.join(TEMPLATE_CONFIG_FILE).is_file() {
            debug!("Skipping {}: no {} found", path.display(), TEMPLATE_CONFIG_FILE);
            continue;
        }
        dirs.push(path);
    }
    dirs.sort();

    Ok(dirs)
}

/// Loads every template below `templates_dir`.
///
/// # Errors
/// * `Error::Io` if the directory cannot be listed
/// * any error from loading a descriptor; one broken template fails the
///   whole listing
pub fn find_templates<P: AsRef<Path>>(templates_dir: P) -> Result<Vec<TemplateInfo>> {
    template_dirs(templates_dir.as_ref())?
        .into_iter()
        .map(|dir| {
            let template = load_template(&dir)?;
            Ok(TemplateInfo::new(dir, &template))
        })
        .collect()
}

/// Keeps templates whose name or description contains `filter`, ignoring case.
pub fn filter_templates(templates: Vec<TemplateInfo>, filter: &str) -> Vec<TemplateInfo> {
    let filter = filter.to_lowercase();
    templates
        .into_iter()
        .filter(|info| {
            info.name.to_lowercase().contains(&filter)
                || info.description.to_lowercase().contains(&filter)
        })
        .collect()
}

/// Finds a template by directory name, then by `metadata.name`.
///
/// # Errors
/// * `Error::TemplateNotFound` if neither lookup matches
pub fn resolve_template<P: AsRef<Path>>(
    templates_dir: P,
    requested: &str,
) -> Result<(PathBuf, Template)> {
    let templates_dir = templates_dir.as_ref();

    let candidate = templates_dir.join(requested);
    if candidate.join(TEMPLATE_CONFIG_FILE).is_file() {
        let template = load_template(&candidate)?;
        return Ok((candidate, template));
    }

    for dir in template_dirs(templates_dir)? {
        let template = load_template(&dir)?;
        if template.metadata.name == requested {
            return Ok((dir, template));
        }
    }

    Err(Error::TemplateNotFound {
        name: requested.to_string(),
        templates_dir: templates_dir.to_path_buf(),
    })
}
