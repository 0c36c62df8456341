//! Server-side view rendering.
//!
//! # Responsibilities
//! - Carry the data a route view displays (action data, loader data)
//! - Carry the submission state explicitly instead of reading it from ambient state
//! - Render route templates inside the shared document shell
//!
//! # Design Decisions
//! - Templates are minijinja sources named `*.html`, so output is auto-escaped
//! - Route templates extend `document.html` and fill its `content` block

use minijinja::{context, Environment, Value};
use serde::Serialize;

use crate::routing::RouteModule;

/// Name of the shell every route template extends.
pub const DOCUMENT_TEMPLATE: &str = "document.html";

const DOCUMENT_SOURCE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{{ title }}</title>
</head>
<body>
{% block content %}{% endblock %}
</body>
</html>
"#;

/// Whether a form submission is in flight for the view being rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Submission {
    #[default]
    Idle,
    Submitting,
}

impl Submission {
    pub fn is_pending(self) -> bool {
        matches!(self, Submission::Submitting)
    }
}

/// Inputs to a route's template, exposed to it as `view`.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct ViewState<'a> {
    /// Data returned by the route's action, if one ran for this request.
    pub action_data: Option<&'a str>,
    /// Data returned by the route's loader, if it has one.
    pub loader_data: Option<&'a str>,
    pub submission: Submission,
}

/// A named template source. Names should end in `.html`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Template {
    pub name: &'static str,
    pub source: &'static str,
}

/// Compiled templates for the document shell and every registered route.
#[derive(Debug, Clone)]
pub struct Templates {
    env: Environment<'static>,
}

impl Templates {
    pub fn new() -> Self {
        let mut env = Environment::new();
        // The shell is a constant and known to parse.
        env.add_template(DOCUMENT_TEMPLATE, DOCUMENT_SOURCE)
            .expect("document shell template must parse");
        Self { env }
    }

    /// Compile and register a route template.
    pub fn add(&mut self, template: Template) -> Result<(), minijinja::Error> {
        self.env.add_template(template.name, template.source)
    }

    /// Render `route`'s template as a full document.
    ///
    /// The template sees `title`, `view` (the [`ViewState`]) and `route`
    /// (the route's [`RouteModule::view_context`]).
    pub fn render(
        &self,
        route: &dyn RouteModule,
        state: &ViewState<'_>,
    ) -> Result<String, minijinja::Error> {
        let template = self.env.get_template(route.template().name)?;
        template.render(context! {
            title => route.title(),
            view => Value::from_serialize(state),
            route => route.view_context(),
        })
    }
}

impl Default for Templates {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct Echo;

    impl RouteModule for Echo {
        fn id(&self) -> &str {
            "routes/echo"
        }

        fn path(&self) -> &str {
            "/echo"
        }

        fn title(&self) -> &str {
            "A & B"
        }

        fn template(&self) -> Template {
            Template {
                name: "routes/echo.html",
                source: concat!(
                    r#"{% extends "document.html" %}"#,
                    r#"{% block content %}<p>{{ view.loader_data }}</p>"#,
                    r#"<i>{{ view.submission }}</i>{% endblock %}"#,
                ),
            }
        }
    }

    fn templates() -> Templates {
        let mut templates = Templates::new();
        templates.add(Echo.template()).unwrap();
        templates
    }

    #[test]
    fn test_document_shell_wraps_content() {
        let html = templates()
            .render(
                &Echo,
                &ViewState {
                    loader_data: Some("hi"),
                    ..ViewState::default()
                },
            )
            .unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>A &amp; B</title>"));
        assert!(html.contains("<body>\n<p>hi</p><i>idle</i>\n</body>"));
    }

    #[test]
    fn test_view_data_is_escaped() {
        let html = templates()
            .render(
                &Echo,
                &ViewState {
                    loader_data: Some(r#"<a href="x">&"#),
                    submission: Submission::Submitting,
                    ..ViewState::default()
                },
            )
            .unwrap();
        assert!(html.contains("<p>&lt;a href=&quot;x&quot;&gt;&amp;</p>"));
        assert!(html.contains("<i>submitting</i>"));
    }

    #[test]
    fn test_unregistered_template_is_an_error() {
        assert!(Templates::new()
            .render(&Echo, &ViewState::default())
            .is_err());
    }

    #[test]
    fn test_invalid_template_is_rejected() {
        let mut templates = Templates::new();
        let err = templates.add(Template {
            name: "broken.html",
            source: "{% if %}",
        });
        assert!(err.is_err());
    }

    #[test]
    fn test_submission_states() {
        assert!(!Submission::Idle.is_pending());
        assert!(Submission::Submitting.is_pending());
        assert_eq!(Submission::default(), Submission::Idle);
    }
}
