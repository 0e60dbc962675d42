// bizlicense-core/src/infrastructure/report/jinja.rs

// Holds the embedded report and prompt templates. Both the deterministic
// report and the language-model prompt are rendered from the same context,
// see `context::report_context`.

use crate::infrastructure::error::InfrastructureError;
use minijinja::Environment;

pub const REPORT_TEMPLATE: &str = "report.md";
pub const PROMPT_TEMPLATE: &str = "prompt.md";

pub struct JinjaRenderer {
    env: Environment<'static>,
}

impl JinjaRenderer {
    pub fn new() -> Result<Self, InfrastructureError> {
        let mut env = Environment::new();

        // Block tags on their own line leave no blank lines behind
        env.set_trim_blocks(true);
        env.set_lstrip_blocks(true);

        env.add_filter("yes_no", |value: bool| -> String {
            if value { "yes".to_string() } else { "no".to_string() }
        });

        env.add_template(REPORT_TEMPLATE, include_str!("../../../templates/report.md.j2"))?;
        env.add_template(PROMPT_TEMPLATE, include_str!("../../../templates/prompt.md.j2"))?;

        Ok(Self { env })
    }

    pub fn render(
        &self,
        template_name: &str,
        context: &serde_json::Value,
    ) -> Result<String, InfrastructureError> {
        let tmpl = self.env.get_template(template_name)?;
        Ok(tmpl.render(context)?)
    }
}
