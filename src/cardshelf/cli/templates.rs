//! Minijinja templates for terminal output.
//!
//! Layout math (numbering, truncation, rules) happens in `render.rs`; templates only pick
//! styles and arrange lines. Every line a template emits ends in an explicit newline, so
//! callers `print!` the result.

pub const LIST_TEMPLATE: &str = r#"{% for card in cards -%}
{{ card.index | style("index") }} {{ card.title | style("title") }}  {{ card.id | style("id") }}
{{ card.indent }}{{ card.description | style("desc") }}
{{ card.indent }}{{ card.image | style("image") }}
{{ card.indent }}{% for action in card.actions %}[{{ action | style("action") }}]{% if not loop.last %} {% endif %}{% endfor %}
{% else -%}
{{ empty_message | style("muted") }}
{% endfor %}"#;

pub const VIEW_TEMPLATE: &str = r#"{{ title | style("heading") }}  {{ id | style("id") }}
{{ rule | style("muted") }}
{{ description | style("desc") }}
{{ rule | style("muted") }}
{{ hint | style("action") }}
"#;

pub const FORM_TEMPLATE: &str = r#"{{ heading | style("heading") }}
{{ rule | style("muted") }}
{% for field in fields -%}
{{ field.label | style("muted") }} {{ field.value }}
{% endfor %}"#;

pub const MESSAGES_TEMPLATE: &str = r#"{% for message in messages -%}
{{ message.content | style(message.style) }}
{% endfor %}"#;
