//! The `/actions` route: a form whose action echoes `field1` back and tags
//! its response with `x-test`, next to a fixed loader message.

use axum::http::{HeaderMap, HeaderName, HeaderValue};
use minijinja::{context, Value};

use crate::http::request::FormSubmission;
use crate::routing::{
    propagate, ActionResult, Exports, HeaderError, HeadersArgs, LoaderResult, RouteModule,
};
use crate::view::Template;

pub const ROUTE_ID: &str = "routes/actions";
pub const ROUTE_PATH: &str = "/actions";

/// Form field read by the action.
pub const FIELD_NAME: &str = "field1";
/// Initial value of the form input.
pub const FIELD_DEFAULT: &str = "stuff";
/// Text interpolated when the submission has no `field1`.
pub const MISSING_FIELD_TEXT: &str = "null";

pub const X_TEST: HeaderName = HeaderName::from_static("x-test");
pub const X_TEST_VALUE: &str = "works";

pub const LOADER_MESSAGE: &str = "ay! data from the loader!";
pub const WAITING_TEXT: &str = "Waiting...";

const TEMPLATE: Template = Template {
    name: "routes/actions.html",
    source: r#"{% extends "document.html" %}
{%- block content %}<form method="post" id="form">
  <p id="action-text">{% if view.action_data is not none %}<span id="action-data">{{ view.action_data }}</span>{% else %}{{ route.waiting_text }}{% endif %}</p>
  <p>
    <input type="text" value="{{ route.field_default }}" name="{{ route.field_name }}">
    <button type="submit" id="submit"{% if view.submission == "submitting" %} disabled{% endif %}>Go</button>
  </p>
  <p>{% if view.loader_data is not none %}{{ view.loader_data }}{% endif %}</p>
</form>{% endblock %}"#,
};

#[derive(Debug, Default, Clone, Copy)]
pub struct ActionsRoute;

impl RouteModule for ActionsRoute {
    fn id(&self) -> &str {
        ROUTE_ID
    }

    fn path(&self) -> &str {
        ROUTE_PATH
    }

    fn title(&self) -> &str {
        "Actions"
    }

    fn exports(&self) -> Exports {
        Exports {
            loader: true,
            action: true,
            headers: true,
        }
    }

    fn loader(&self) -> Option<LoaderResult> {
        Some(LoaderResult::new(LOADER_MESSAGE))
    }

    fn action(&self, submission: &FormSubmission) -> Option<ActionResult> {
        let value = submission.get(FIELD_NAME).unwrap_or(MISSING_FIELD_TEXT);

        let mut headers = HeaderMap::new();
        headers.insert(X_TEST, HeaderValue::from_static(X_TEST_VALUE));

        Some(ActionResult::new(
            format!("heyooo, data from the action: {value}"),
            headers,
        ))
    }

    fn headers(&self, args: &HeadersArgs<'_>) -> Result<HeaderMap, HeaderError> {
        match args.action_headers {
            Some(action_headers) => propagate(action_headers, &[X_TEST]),
            None => Ok(HeaderMap::new()),
        }
    }

    fn template(&self) -> Template {
        TEMPLATE
    }

    fn view_context(&self) -> Value {
        context! {
            field_name => FIELD_NAME,
            field_default => FIELD_DEFAULT,
            waiting_text => WAITING_TEXT,
        }
    }
}
