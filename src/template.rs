//! Commit message and post-update command templating
//!
//! The registry is compiled once at startup and handed to the pipeline. The
//! same `CommitContext` feeds the commit message and every token of the
//! post-update command, so follow-up scripts can be parameterized with
//! `{{project}}`, `{{version}}`, `{{raw_version}}` and friends.

use crate::domain::CommitContext;
use crate::error::TemplateError;
use handlebars::Handlebars;

const COMMIT_TEMPLATE_NAME: &str = "commit";

// Conditional blocks open and close mid-line so disabled sections leave no
// blank lines behind.
const COMMIT_TEMPLATE: &str = "\
modules: upgrade {{project}} to {{version}}

This updates:
  {{path}}

To version {{version}}.

Executed via:

  go get {{target}}
  go mod tidy{{#if vendor}}
  go mod vendor{{/if}}{{#if url}}

For details on changes, see the project's release page:
  {{url}}{{/if}}

This commit message was auto-generated.
";

/// A rendered commit message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitMessage {
    /// Full message passed to `git commit`
    pub full: String,
    /// First paragraph, used as the pull request title
    pub title: String,
    /// Everything after the first blank line, used as the pull request body
    pub body: String,
}

impl CommitMessage {
    /// Split a message at its first blank line
    pub fn new(full: impl Into<String>) -> Self {
        let full = full.into();
        let (title, body) = match full.split_once("\n\n") {
            Some((title, body)) => (title.to_string(), body.to_string()),
            None => (full.trim_end().to_string(), String::new()),
        };
        Self { full, title, body }
    }
}

/// Compiled commit template
pub struct CommitTemplate {
    registry: Handlebars<'static>,
}

impl CommitTemplate {
    /// Compile the built-in template
    pub fn new() -> Result<Self, TemplateError> {
        let mut registry = Handlebars::new();
        registry.set_strict_mode(true);
        registry.register_escape_fn(handlebars::no_escape);
        registry
            .register_template_string(COMMIT_TEMPLATE_NAME, COMMIT_TEMPLATE)
            .map_err(Box::new)?;
        Ok(Self { registry })
    }

    /// Render the commit message for `context`
    pub fn render(&self, context: &CommitContext) -> Result<CommitMessage, TemplateError> {
        let full = self
            .registry
            .render(COMMIT_TEMPLATE_NAME, context)
            .map_err(|e| TemplateError::Render(Box::new(e)))?;
        Ok(CommitMessage::new(full))
    }

    /// Render every token of a post-update command against `context`
    pub fn render_command(
        &self,
        tokens: &[String],
        context: &CommitContext,
    ) -> Result<Vec<String>, TemplateError> {
        tokens
            .iter()
            .map(|token| {
                self.registry
                    .render_template(token, context)
                    .map_err(|e| TemplateError::Command {
                        token: token.clone(),
                        source: Box::new(e),
                    })
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn github_context(vendor: bool) -> CommitContext {
        CommitContext::new(
            "github.com/foo/bar",
            "v1.3.0",
            "github.com/foo/bar@v1.3.0",
            vendor,
        )
    }

    #[test]
    fn test_render_github_release() {
        let template = CommitTemplate::new().unwrap();
        let message = template.render(&github_context(false)).unwrap();

        assert_eq!(message.title, "modules: upgrade bar to 1.3.0");
        assert!(message.full.contains("  github.com/foo/bar\n"));
        assert!(message.full.contains("To version 1.3.0."));
        assert!(message.full.contains("  go get github.com/foo/bar@v1.3.0\n"));
        assert!(message
            .full
            .contains("  https://github.com/foo/bar/tree/v1.3.0\n"));
        assert!(!message.full.contains("go mod vendor"));
    }

    #[test]
    fn test_render_exact_without_url_or_vendor() {
        let template = CommitTemplate::new().unwrap();
        let context = CommitContext::new("golang.org/x/net", "v0.20.0", "golang.org/x/net", false);
        let message = template.render(&context).unwrap();

        let expected = "\
modules: upgrade net to 0.20.0

This updates:
  golang.org/x/net

To version 0.20.0.

Executed via:

  go get golang.org/x/net
  go mod tidy

This commit message was auto-generated.
";
        assert_eq!(message.full, expected);
    }

    #[test]
    fn test_render_vendor_line() {
        let template = CommitTemplate::new().unwrap();
        let message = template.render(&github_context(true)).unwrap();
        assert!(message.full.contains("  go mod tidy\n  go mod vendor\n"));
    }

    #[test]
    fn test_render_does_not_escape_html() {
        let template = CommitTemplate::new().unwrap();
        let context = CommitContext::new("example.com/a&b", "v1.0.0", "example.com/a&b", false);
        let message = template.render(&context).unwrap();
        assert!(message.full.contains("example.com/a&b"));
        assert!(!message.full.contains("&amp;"));
    }

    #[test]
    fn test_render_is_deterministic() {
        let template = CommitTemplate::new().unwrap();
        let first = template.render(&github_context(true)).unwrap();
        let second = CommitTemplate::new()
            .unwrap()
            .render(&github_context(true))
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_commit_message_split() {
        let message = CommitMessage::new("title line\n\nfirst\n\nsecond\n");
        assert_eq!(message.title, "title line");
        assert_eq!(message.body, "first\n\nsecond\n");
    }

    #[test]
    fn test_commit_message_without_body() {
        let message = CommitMessage::new("only a title\n");
        assert_eq!(message.title, "only a title");
        assert!(message.body.is_empty());
    }

    #[test]
    fn test_render_command() {
        let template = CommitTemplate::new().unwrap();
        let tokens = vec![
            "./scripts/regen.sh".to_string(),
            "{{project}}".to_string(),
            "--tag={{raw_version}}".to_string(),
        ];
        let rendered = template
            .render_command(&tokens, &github_context(false))
            .unwrap();
        assert_eq!(rendered, vec!["./scripts/regen.sh", "bar", "--tag=v1.3.0"]);
    }

    #[test]
    fn test_render_command_unknown_field() {
        let template = CommitTemplate::new().unwrap();
        let tokens = vec!["echo".to_string(), "{{nope}}".to_string()];
        let err = template
            .render_command(&tokens, &github_context(false))
            .unwrap_err();
        assert!(matches!(err, TemplateError::Command { .. }));
        assert!(err.to_string().contains("{{nope}}"));
    }
}
