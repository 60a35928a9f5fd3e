//! Line-oriented session over the same dispatch the one-shot commands use.
//!
//! Each line maps to one UI event. When the dialog shows its form, the shell walks the
//! fields and submits them, so create and edit behave like filling in the form by hand.

use super::prompt;
use super::AppContext;
use cardshelf::app::{Action, CmdMessage, MessageLevel};
use cardshelf::error::Result;
use cardshelf::model::CardFields;
use cardshelf::modal::Region;

const HELP: &str = "\
Commands:
  list                 show the (filtered) list
  search <text>        filter by title or description; `search` alone clears it
  new                  open the create form
  view <n|id>          open a card
  edit [n|id]          edit a card, or the open one
  delete [n|id]        delete a card, or the open one
  close | cancel | esc | outside
                       dismiss the dialog
  theme                toggle light/dark
  help                 this text
  quit                 leave
In a form, an empty answer keeps the value shown in brackets and `-` clears it.";

#[derive(Debug, Clone, PartialEq, Eq)]
enum ShellCommand {
    Empty,
    List,
    Search(String),
    Create,
    View(String),
    Edit(Option<String>),
    Delete(Option<String>),
    Close,
    Cancel,
    Escape,
    Outside,
    Theme,
    Help,
    Quit,
    Unknown(String),
}

fn parse(line: &str) -> ShellCommand {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let arg = (!rest.is_empty()).then(|| rest.to_string());

    match word.to_lowercase().as_str() {
        "" => ShellCommand::Empty,
        "list" | "ls" => ShellCommand::List,
        "search" | "s" | "/" => ShellCommand::Search(rest.to_string()),
        "new" | "create" | "n" => ShellCommand::Create,
        "view" | "v" | "open" => match arg {
            Some(card) => ShellCommand::View(card),
            None => ShellCommand::Unknown(line.to_string()),
        },
        "edit" | "e" => ShellCommand::Edit(arg),
        "delete" | "rm" | "d" => ShellCommand::Delete(arg),
        "close" | "x" => ShellCommand::Close,
        "cancel" => ShellCommand::Cancel,
        "esc" | "escape" => ShellCommand::Escape,
        "outside" => ShellCommand::Outside,
        "theme" => ShellCommand::Theme,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        _ => ShellCommand::Unknown(line.to_string()),
    }
}

pub fn run(ctx: &mut AppContext) -> Result<()> {
    ctx.print_list();
    while let Some(line) = prompt::ask(&prompt_label(ctx.app.query()))? {
        let command = parse(&line);
        tracing::debug!(?command, "shell command");

        let reference = match &command {
            ShellCommand::View(r) | ShellCommand::Edit(Some(r)) | ShellCommand::Delete(Some(r)) => {
                Some(r.clone())
            }
            _ => None,
        };
        let action = match command {
            ShellCommand::Empty => continue,
            ShellCommand::Quit => break,
            ShellCommand::Help => {
                println!("{}", HELP);
                continue;
            }
            ShellCommand::List => {
                ctx.print_list();
                continue;
            }
            ShellCommand::Unknown(text) => {
                ctx.print_messages(&[CmdMessage::warning(format!(
                    "Unknown command: {} (type `help`)",
                    text
                ))]);
                continue;
            }
            ShellCommand::Search(text) => Action::SearchInput(text),
            ShellCommand::Create => Action::CreateClick,
            ShellCommand::View(r) => Action::CardView(ctx.resolve_card(&r)),
            ShellCommand::Edit(Some(r)) => Action::CardEdit(ctx.resolve_card(&r)),
            ShellCommand::Edit(None) => Action::ModalEdit,
            ShellCommand::Delete(Some(r)) => Action::CardDelete(ctx.resolve_card(&r)),
            ShellCommand::Delete(None) => Action::ModalDelete,
            ShellCommand::Close => Action::ModalClose,
            ShellCommand::Cancel => Action::FormCancel,
            ShellCommand::Escape => Action::EscapeKey,
            ShellCommand::Outside => Action::OutsideClick,
            ShellCommand::Theme => Action::ToggleTheme,
        };

        let is_search = matches!(action, Action::SearchInput(_));
        let was_open = ctx.app.modal().is_open();
        let result = ctx.dispatch(action)?;
        ctx.print_messages(&result.messages);

        if !result.changed && result.messages.is_empty() && !is_search {
            let hint = if was_open {
                Some("Close the dialog first.".to_string())
            } else {
                reference.map(|r| format!("Card not found: {}", r))
            };
            if let Some(hint) = hint {
                ctx.print_messages(&[CmdMessage::info(hint)]);
            }
        }

        if ctx.app.modal().region() == Region::Form {
            fill_form(ctx)?;
        }
        if ctx.app.modal().is_open() {
            ctx.print_modal();
        } else if result.changed || is_search {
            ctx.print_list();
        }
    }
    Ok(())
}

/// `> `, or `[query]> ` while a search is active.
fn prompt_label(query: &str) -> String {
    if query.trim().is_empty() {
        "> ".to_string()
    } else {
        format!("[{}]> ", query)
    }
}

/// Prompts for each field until the form is submitted or input runs out.
fn fill_form(ctx: &mut AppContext) -> Result<()> {
    while ctx.app.modal().region() == Region::Form {
        ctx.print_modal();
        let current = ctx.app.modal().form().clone();
        let Some(fields) = ask_fields(&current)? else {
            ctx.dispatch(Action::FormCancel)?;
            println!();
            return Ok(());
        };

        let result = ctx.dispatch(Action::FormSubmit(fields))?;
        ctx.print_messages(&result.messages);
        if result
            .messages
            .iter()
            .any(|m| m.level == MessageLevel::Error)
        {
            continue;
        }
        if !result.changed {
            break;
        }
    }
    Ok(())
}

fn ask_fields(current: &CardFields) -> Result<Option<CardFields>> {
    let Some(title) = ask_field("Title", &current.title)? else {
        return Ok(None);
    };
    let Some(description) = ask_field("Description", &current.description)? else {
        return Ok(None);
    };
    let Some(image) = ask_field("Image", &current.image)? else {
        return Ok(None);
    };
    Ok(Some(CardFields::new(title, description, image)))
}

fn ask_field(label: &str, current: &str) -> Result<Option<String>> {
    let question = if current.is_empty() {
        format!("{}: ", label)
    } else {
        format!("{} [{}]: ", label, current)
    };
    Ok(prompt::ask(&question)?.map(|answer| field_value(&answer, current)))
}

fn field_value(answer: &str, current: &str) -> String {
    match answer.trim() {
        "" => current.to_string(),
        "-" => String::new(),
        _ => answer.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_commands_and_arguments() {
        assert_eq!(parse("  "), ShellCommand::Empty);
        assert_eq!(parse("LS"), ShellCommand::List);
        assert_eq!(parse("view 2"), ShellCommand::View("2".into()));
        assert_eq!(parse("edit"), ShellCommand::Edit(None));
        assert_eq!(parse("rm c_1_abc"), ShellCommand::Delete(Some("c_1_abc".into())));
        assert_eq!(parse("quit"), ShellCommand::Quit);
    }

    #[test]
    fn search_keeps_inner_spacing_and_may_be_empty() {
        assert_eq!(
            parse("search neon  light"),
            ShellCommand::Search("neon  light".into())
        );
        assert_eq!(parse("search"), ShellCommand::Search(String::new()));
    }

    #[test]
    fn view_without_card_is_unknown() {
        assert_eq!(parse("view"), ShellCommand::Unknown("view".into()));
        assert_eq!(parse("frobnicate"), ShellCommand::Unknown("frobnicate".into()));
    }

    #[test]
    fn prompt_shows_active_search() {
        assert_eq!(prompt_label(""), "> ");
        assert_eq!(prompt_label("  "), "> ");
        assert_eq!(prompt_label("neon"), "[neon]> ");
    }

    #[test]
    fn empty_answer_keeps_and_dash_clears() {
        assert_eq!(field_value("", "Lens"), "Lens");
        assert_eq!(field_value("-", "Lens"), "");
        assert_eq!(field_value("Board", "Lens"), "Board");
    }
}
