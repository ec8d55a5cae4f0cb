//! MiniJinja template engine wrapper

use anyhow::Result;
use minijinja::{Environment, Value};
use std::path::Path;

pub struct TemplateEngine {
    env: Environment<'static>,
}

impl TemplateEngine {
    pub fn new() -> Result<Self> {
        let mut env = Environment::new();

        env.set_debug(cfg!(debug_assertions));

        let template_path = "templates";
        if Path::new(template_path).exists() {
            env.set_loader(minijinja::path_loader(template_path));
        } else {
            tracing::warn!("template directory not found: {}", template_path);
        }

        Ok(Self { env })
    }

    /// Render a template with context
    pub fn render(&self, template_name: &str, ctx: Value) -> Result<String> {
        let template = self.env.get_template(template_name)?;
        Ok(template.render(ctx)?)
    }

    /// Add a template from string - requires owned strings for 'static lifetime
    pub fn add_template_owned(&mut self, name: String, content: String) -> Result<()> {
        // MiniJinja needs 'static strings, so we leak the memory
        // This is okay for templates as they're loaded once at startup
        let name_static: &'static str = Box::leak(name.into_boxed_str());
        let content_static: &'static str = Box::leak(content.into_boxed_str());
        self.env.add_template(name_static, content_static)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use minijinja::context;

    #[test]
    fn test_template_engine() -> Result<()> {
        let mut engine = TemplateEngine::new()?;
        engine.add_template_owned("test".to_string(), "Hello {{ name }}!".to_string())?;

        let result = engine.render("test", context! { name => "World" })?;
        assert_eq!(result, "Hello World!");

        Ok(())
    }

    #[test]
    fn test_ai_page_renders_error_and_answer_distinctly() -> Result<()> {
        let mut engine = TemplateEngine::new()?;
        engine.add_template_owned(
            "ai".to_string(),
            "{% if error %}ERR:{{ error }}{% elif answer %}OK:{{ answer }}{% endif %}".to_string(),
        )?;

        let ok = engine.render("ai", context! { answer => "A fine pot." })?;
        assert_eq!(ok, "OK:A fine pot.");

        let err = engine.render("ai", context! { error => "provider request timed out" })?;
        assert_eq!(err, "ERR:provider request timed out");

        Ok(())
    }
}
