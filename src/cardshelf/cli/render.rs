//! # Rendering Module
//!
//! Styled terminal output for card lists, the modal dialog and messages. Templates live in
//! `templates.rs`; styles come from the active light/dark palette in `styles.rs`.
//!
//! Layout calculations (numbering, width, truncation) stay in Rust because they need
//! Unicode-aware processing. Templates only choose styles and arrange lines.

use super::styles::{self, Styles};
use super::templates::{FORM_TEMPLATE, LIST_TEMPLATE, MESSAGES_TEMPLATE, VIEW_TEMPLATE};
use cardshelf::app::{CmdMessage, MessageLevel};
use cardshelf::error::{CardsError, Result};
use cardshelf::model::CardFields;
use cardshelf::modal::ViewContent;
use cardshelf::render::CardElement;
use cardshelf::theme::ThemeMode;
use minijinja::{Environment, Value};
use serde::Serialize;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub const LINE_WIDTH: usize = 100;
const INDENT: &str = "     ";
const ELLIPSIS: &str = "…";
const VIEW_HINT: &str = "edit · delete · close";

#[derive(Serialize)]
struct CardLineData {
    index: String,
    indent: &'static str,
    id: String,
    title: String,
    description: String,
    image: String,
    actions: Vec<&'static str>,
}

#[derive(Serialize)]
struct ListData {
    cards: Vec<CardLineData>,
    empty_message: &'static str,
}

#[derive(Serialize)]
struct ViewData<'a> {
    id: &'a str,
    title: &'a str,
    description: &'a str,
    rule: String,
    hint: &'static str,
}

#[derive(Serialize)]
struct FormField {
    label: &'static str,
    value: String,
}

#[derive(Serialize)]
struct FormData<'a> {
    heading: &'a str,
    rule: String,
    fields: Vec<FormField>,
}

#[derive(Serialize)]
struct MessageData<'a> {
    content: &'a str,
    style: &'static str,
}

#[derive(Serialize)]
struct MessagesData<'a> {
    messages: Vec<MessageData<'a>>,
}

/// Pre-compiled templates bound to one palette and colour setting.
pub struct Renderer {
    env: Environment<'static>,
}

impl Renderer {
    pub fn new(mode: ThemeMode, use_color: bool) -> Result<Self> {
        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        register_style_filter(&mut env, styles::for_mode(mode), use_color);
        for (name, source) in [
            ("list", LIST_TEMPLATE),
            ("view", VIEW_TEMPLATE),
            ("form", FORM_TEMPLATE),
            ("messages", MESSAGES_TEMPLATE),
        ] {
            env.add_template(name, source)
                .map_err(|e| CardsError::Api(format!("Template error in {}: {}", name, e)))?;
        }
        Ok(Self { env })
    }

    fn render<T: Serialize>(&self, name: &str, data: &T) -> String {
        self.env
            .get_template(name)
            .and_then(|tmpl| tmpl.render(data))
            .unwrap_or_else(|e| format!("Render error: {}\n", e))
    }

    pub fn card_list(&self, elements: &[CardElement]) -> String {
        let number_width = elements.len().to_string().len().max(2);
        let cards = elements
            .iter()
            .enumerate()
            .map(|(i, el)| {
                let index = format!("{:>width$}.", i + 1, width = number_width);
                let title_room = LINE_WIDTH
                    .saturating_sub(index.width() + 3)
                    .saturating_sub(el.id.width());
                CardLineData {
                    index,
                    indent: INDENT,
                    id: el.id.clone(),
                    title: truncate_to_width(&el.title, title_room),
                    description: truncate_to_width(&el.description, LINE_WIDTH - INDENT.len()),
                    image: el.image.clone(),
                    actions: el.actions.iter().map(|b| b.label).collect(),
                }
            })
            .collect();
        self.render(
            "list",
            &ListData {
                cards,
                empty_message: "No cards found.",
            },
        )
    }

    pub fn card_view(&self, id: &str, view: &ViewContent) -> String {
        self.render(
            "view",
            &ViewData {
                id,
                title: &view.title,
                description: &view.description,
                rule: rule(),
                hint: VIEW_HINT,
            },
        )
    }

    pub fn form(&self, heading: &str, fields: &CardFields) -> String {
        self.render(
            "form",
            &FormData {
                heading,
                rule: rule(),
                fields: vec![
                    FormField {
                        label: "Title:      ",
                        value: fields.title.clone(),
                    },
                    FormField {
                        label: "Description:",
                        value: fields.description.clone(),
                    },
                    FormField {
                        label: "Image:      ",
                        value: fields.image.clone(),
                    },
                ],
            },
        )
    }

    pub fn messages(&self, messages: &[CmdMessage]) -> String {
        let messages = messages
            .iter()
            .map(|m| MessageData {
                content: &m.content,
                style: match m.level {
                    MessageLevel::Info => "info",
                    MessageLevel::Success => "success",
                    MessageLevel::Warning => "warning",
                    MessageLevel::Error => "error",
                },
            })
            .collect();
        self.render("messages", &MessagesData { messages })
    }
}

fn register_style_filter(env: &mut Environment<'static>, styles: &'static Styles, use_color: bool) {
    env.add_filter("style", move |value: Value, name: String| -> String {
        styles.apply(&name, &value.to_string(), use_color)
    });
}

fn rule() -> String {
    "─".repeat(40)
}

/// Cuts `text` to at most `max` display columns, marking the cut with an ellipsis.
pub fn truncate_to_width(text: &str, max: usize) -> String {
    if text.width() <= max {
        return text.to_string();
    }
    let budget = max.saturating_sub(ELLIPSIS.width());
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push_str(ELLIPSIS);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use cardshelf::app::Action;
    use cardshelf::render::BoundAction;

    fn element(id: &str, title: &str) -> CardElement {
        CardElement {
            id: id.into(),
            title: title.into(),
            description: format!("{} description", title),
            image: "https://img.test/1".into(),
            actions: [
                BoundAction {
                    label: "Learn More",
                    action: Action::CardView(id.into()),
                },
                BoundAction {
                    label: "Edit",
                    action: Action::CardEdit(id.into()),
                },
                BoundAction {
                    label: "Delete",
                    action: Action::CardDelete(id.into()),
                },
            ],
        }
    }

    fn plain() -> Renderer {
        Renderer::new(ThemeMode::Dark, false).unwrap()
    }

    #[test]
    fn lists_cards_in_order_with_actions() {
        let out = plain().card_list(&[element("a1", "Lens"), element("b2", "Board")]);
        let lines: Vec<_> = out.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], " 1. Lens  a1");
        assert_eq!(lines[1], "     Lens description");
        assert_eq!(lines[3], "     [Learn More] [Edit] [Delete]");
        assert_eq!(lines[4], " 2. Board  b2");
    }

    #[test]
    fn empty_list_says_so() {
        assert_eq!(plain().card_list(&[]), "No cards found.\n");
    }

    #[test]
    fn colour_adds_ansi_codes_only_when_enabled() {
        let colored = Renderer::new(ThemeMode::Light, true)
            .unwrap()
            .card_list(&[element("a1", "Lens")]);
        assert!(colored.contains("\u{1b}["));
        assert!(!plain().card_list(&[element("a1", "Lens")]).contains("\u{1b}["));
    }

    #[test]
    fn view_shows_title_description_and_id() {
        let view = ViewContent {
            title: "Lens".into(),
            description: "Optics".into(),
        };
        let out = plain().card_view("a1", &view);
        assert!(out.starts_with("Lens  a1\n"));
        assert!(out.contains("\nOptics\n"));
        assert!(out.ends_with("edit · delete · close\n"));
    }

    #[test]
    fn form_lists_fields() {
        let out = plain().form("Edit Card", &CardFields::new("Lens", "Optics", "x.png"));
        assert!(out.starts_with("Edit Card\n"));
        assert!(out.contains("Title:       Lens\n"));
        assert!(out.contains("Description: Optics\n"));
        assert!(out.contains("Image:       x.png\n"));
    }

    #[test]
    fn messages_render_one_per_line() {
        let out = plain().messages(&[
            CmdMessage::success("Card created: Lens"),
            CmdMessage::error("Please fill out all fields."),
        ]);
        assert_eq!(out, "Card created: Lens\nPlease fill out all fields.\n");
    }

    #[test]
    fn truncates_by_display_width() {
        assert_eq!(truncate_to_width("short", 10), "short");
        assert_eq!(truncate_to_width("abcdefghij", 5), "abcd…");
        assert_eq!(truncate_to_width("日本語テキスト", 5), "日本…");
    }

    #[test]
    fn long_titles_are_truncated_in_list() {
        let long = "x".repeat(200);
        let out = plain().card_list(&[element("a1", &long)]);
        let first = out.lines().next().unwrap();
        assert!(first.width() <= LINE_WIDTH);
        assert!(first.contains('…'));
    }
}
