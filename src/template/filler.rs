//! Job-script generation from templates on disk

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::error::TemplateError;
use super::substitute::{placeholders, substitute, Bindings};
use crate::config::ProjectConfig;

/// Binding that names the generated script
pub const OUTPUT_NAME_KEY: &str = "name";

/// Extension of generated scripts
pub const SCRIPT_EXTENSION: &str = "sh";

/// A filled template that has not been written yet
#[derive(Debug, Clone, PartialEq)]
pub struct RenderedScript {
    /// Value of the `name` binding; the script is written as `<name>.sh`
    pub name: String,
    pub text: String,
}

/// Fills templates from a directory and writes the results as shell scripts.
///
/// Ambient bindings (typically the environment and the project config) are
/// merged under the per-call arguments, so arguments win on collision.
#[derive(Debug, Clone)]
pub struct TemplateFiller {
    templates_dir: PathBuf,
    output_dir: PathBuf,
    ambient: Bindings,
}

impl TemplateFiller {
    /// Create a filler with no ambient bindings
    pub fn new(templates_dir: impl Into<PathBuf>, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            templates_dir: templates_dir.into(),
            output_dir: output_dir.into(),
            ambient: Bindings::new(),
        }
    }

    /// Create a filler using the directories and ambient bindings of a project
    pub fn from_config(config: &ProjectConfig) -> Self {
        Self::new(config.templates_path(), config.output_path()).with_ambient(config.ambient())
    }

    /// Replace the ambient bindings
    pub fn with_ambient(mut self, ambient: Bindings) -> Self {
        self.ambient = ambient;
        self
    }

    /// Add or replace a single ambient binding
    pub fn with_ambient_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.ambient.insert(key.into(), value.into());
        self
    }

    pub fn ambient(&self) -> &Bindings {
        &self.ambient
    }

    pub fn templates_dir(&self) -> &Path {
        &self.templates_dir
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    /// Location of a named template
    pub fn template_path(&self, template_name: &str) -> PathBuf {
        self.templates_dir.join(template_name)
    }

    /// Location a script called `name` is written to
    pub fn output_path(&self, name: &str) -> PathBuf {
        self.output_dir.join(format!("{}.{}", name, SCRIPT_EXTENSION))
    }

    /// Read a template's source text
    pub fn load(&self, template_name: &str) -> Result<String, TemplateError> {
        let path = self.template_path(template_name);
        std::fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => TemplateError::NotFound { path: path.clone() },
            _ => TemplateError::io(path.clone(), e),
        })
    }

    /// Ambient bindings overlaid with `arguments`
    pub fn merged_bindings(&self, arguments: &Bindings) -> Bindings {
        let mut bindings = self.ambient.clone();
        bindings.extend(arguments.iter().map(|(k, v)| (k.clone(), v.clone())));
        bindings
    }

    /// Placeholders of a template that neither the ambient bindings nor
    /// `arguments` provide
    pub fn unbound(
        &self,
        template_name: &str,
        arguments: &Bindings,
    ) -> Result<Vec<String>, TemplateError> {
        let source = self.load(template_name)?;
        let bindings = self.merged_bindings(arguments);
        Ok(placeholders(&source)
            .into_iter()
            .filter(|name| !bindings.contains_key(name))
            .collect())
    }

    /// Fill a template without writing it
    pub fn render(
        &self,
        template_name: &str,
        arguments: &Bindings,
    ) -> Result<RenderedScript, TemplateError> {
        let source = self.load(template_name)?;
        let bindings = self.merged_bindings(arguments);
        debug!(
            "filling template '{}' with {} bindings ({} from arguments)",
            template_name,
            bindings.len(),
            arguments.len()
        );

        let text = substitute(&source, &bindings)?;
        let name = bindings
            .get(OUTPUT_NAME_KEY)
            .cloned()
            .ok_or(TemplateError::MissingOutputName)?;

        Ok(RenderedScript { name, text })
    }

    /// Fill a template and write it to `<output_dir>/<name>.sh`, creating the
    /// output directory if needed. Returns the written path.
    pub fn fill(&self, template_name: &str, arguments: &Bindings) -> Result<PathBuf, TemplateError> {
        let rendered = self.render(template_name, arguments)?;
        let dest = self.output_path(&rendered.name);

        std::fs::create_dir_all(&self.output_dir)
            .map_err(|e| TemplateError::io(self.output_dir.clone(), e))?;
        std::fs::write(&dest, &rendered.text).map_err(|e| TemplateError::io(dest.clone(), e))?;

        info!("wrote {} from template '{}'", dest.display(), template_name);
        Ok(dest)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_path_naming() {
        let filler = TemplateFiller::new("deploy/templates", "deploy/.jobscripts");
        assert_eq!(
            filler.output_path("run42"),
            PathBuf::from("deploy/.jobscripts/run42.sh")
        );
        assert_eq!(
            filler.template_path("pbs"),
            PathBuf::from("deploy/templates/pbs")
        );
    }

    #[test]
    fn test_ambient_builder() {
        let filler = TemplateFiller::new("t", "o")
            .with_ambient_value("user", "alice")
            .with_ambient_value("user", "bob");
        assert_eq!(filler.ambient().get("user").map(String::as_str), Some("bob"));
    }

    #[test]
    fn test_missing_template() {
        let filler = TemplateFiller::new("/nonexistent/templates", "/nonexistent/out");
        let err = filler.render("job", &Bindings::new()).unwrap_err();
        assert!(matches!(err, TemplateError::NotFound { .. }));
    }
}
