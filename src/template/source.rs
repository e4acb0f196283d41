use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::foundation::error::{SpriteError, SpriteResult};
use crate::template::model::Template;

/// Somewhere templates can be fetched from by name.
pub trait TemplateSource {
    /// Load and validate the template called `name`.
    ///
    /// Any failure (missing, unreadable, malformed) is a [`SpriteError::ResourceLoad`],
    /// except a malformed name, which is a [`SpriteError::Validation`].
    fn fetch(&self, name: &str) -> SpriteResult<Template>;
}

/// Reads `<root>/templates/<name>.json`.
#[derive(Clone, Debug)]
pub struct DirTemplateSource {
    root: PathBuf,
}

impl DirTemplateSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn templates_dir(&self) -> PathBuf {
        self.root.join("templates")
    }

    pub fn path_for(&self, name: &str) -> SpriteResult<PathBuf> {
        check_template_name(name)?;
        Ok(self.templates_dir().join(format!("{name}.json")))
    }

    /// Names of every `*.json` file in the templates directory, sorted.
    pub fn list(&self) -> SpriteResult<Vec<String>> {
        let dir = self.templates_dir();
        let entries = std::fs::read_dir(&dir).map_err(|e| {
            SpriteError::resource_load(format!("list templates in '{}': {e}", dir.display()))
        })?;
        let mut names = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                SpriteError::resource_load(format!("list templates in '{}': {e}", dir.display()))
            })?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json")
                && let Some(stem) = path.file_stem().and_then(|s| s.to_str())
            {
                names.push(stem.to_owned());
            }
        }
        names.sort();
        Ok(names)
    }
}

impl TemplateSource for DirTemplateSource {
    fn fetch(&self, name: &str) -> SpriteResult<Template> {
        let path = self.path_for(name)?;
        let bytes = std::fs::read(&path).map_err(|e| {
            SpriteError::resource_load(format!("read template '{}': {e}", path.display()))
        })?;
        Template::from_json_slice(&bytes).map_err(|e| {
            SpriteError::resource_load(format!("template \"{name}\" is invalid: {e}"))
        })
    }
}

/// In-memory set of templates, mostly for embedding and tests.
#[derive(Clone, Debug, Default)]
pub struct StaticTemplateSource {
    templates: BTreeMap<String, Template>,
}

impl StaticTemplateSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, template: Template) -> Self {
        self.insert(template);
        self
    }

    pub fn insert(&mut self, template: Template) {
        self.templates.insert(template.name.clone(), template);
    }
}

impl TemplateSource for StaticTemplateSource {
    fn fetch(&self, name: &str) -> SpriteResult<Template> {
        check_template_name(name)?;
        self.templates
            .get(name)
            .cloned()
            .ok_or_else(|| SpriteError::resource_load(format!("no template named \"{name}\"")))
    }
}

/// Currently selected template, replaced only by a successful fetch.
#[derive(Clone, Debug, Default)]
pub struct TemplateLibrary {
    current: Option<Template>,
}

impl TemplateLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&Template> {
        self.current.as_ref()
    }

    /// Fetch `name` and make it current. On failure the prior selection stays in place.
    pub fn select(&mut self, source: &dyn TemplateSource, name: &str) -> SpriteResult<&Template> {
        match source.fetch(name) {
            Ok(t) => {
                tracing::debug!(template = %t.name, frames = t.frames.len(), "selected template");
                Ok(self.current.insert(t))
            }
            Err(e) => {
                tracing::warn!(template = name, error = %e, "template selection failed");
                match e {
                    SpriteError::ResourceLoad(_) => Err(e),
                    other => Err(SpriteError::resource_load(other.to_string())),
                }
            }
        }
    }

    /// Drop the selection (e.g. the user picked "no template").
    pub fn clear(&mut self) {
        self.current = None;
    }
}

fn check_template_name(name: &str) -> SpriteResult<()> {
    if name.is_empty() {
        return Err(SpriteError::validation("template name must be non-empty"));
    }
    if name.contains(['/', '\\']) || name == "." || name == ".." {
        return Err(SpriteError::validation(format!(
            "template name \"{name}\" must not contain path separators"
        )));
    }
    Ok(())
}

#[cfg(test)]
#[path = "../../tests/unit/template/source.rs"]
mod tests;
