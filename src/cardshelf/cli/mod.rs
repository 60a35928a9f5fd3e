//! Terminal client: argument parsing, handlers, the interactive shell and styled output.
//!
//! Handlers translate each subcommand into the same [`Action`]s a graphical front end would
//! emit, so one-shot commands walk through the dialog exactly like the shell does.

mod args;
mod prompt;
mod render;
mod shell;
mod styles;
mod templates;

use args::{Cli, Commands};
use cardshelf::app::{Action, App, CmdMessage, DispatchResult, MessageLevel};
use cardshelf::collab::{Collaborators, Confirm, FixedAnswer};
use cardshelf::config::{CardsConfig, CONFIG_KEYS};
use cardshelf::error::{CardsError, Result};
use cardshelf::model::CardFields;
use cardshelf::modal::Region;
use cardshelf::storage::fs::FileKv;
use clap::Parser;
use console::Term;
use directories::ProjectDirs;
use prompt::StdinConfirm;
use render::Renderer;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

const DATA_DIR_ENV: &str = "CARDSHELF_DATA";
const LOG_ENV: &str = "CARDSHELF_LOG";

pub struct AppContext {
    pub app: App<FileKv>,
    pub out: Renderer,
    use_color: bool,
}

impl AppContext {
    /// Rebuilds the renderer after the palette changed.
    pub fn refresh_renderer(&mut self) -> Result<()> {
        self.out = Renderer::new(self.app.theme(), self.use_color)?;
        Ok(())
    }

    pub fn dispatch(&mut self, action: Action) -> Result<DispatchResult> {
        let toggles_theme = action == Action::ToggleTheme;
        let result = self.app.dispatch(action)?;
        if toggles_theme {
            self.refresh_renderer()?;
        }
        Ok(result)
    }

    pub fn print_messages(&self, messages: &[CmdMessage]) {
        print!("{}", self.out.messages(messages));
    }

    pub fn print_list(&mut self) {
        let elements = self.app.elements();
        print!("{}", self.out.card_list(&elements));
    }

    /// Prints whatever region of the dialog is showing.
    pub fn print_modal(&self) {
        let modal = self.app.modal();
        match modal.region() {
            Region::Hidden => {}
            Region::View => {
                let id = modal.subject().unwrap_or_default();
                print!("{}", self.out.card_view(id, modal.view()));
            }
            Region::Form => print!("{}", self.out.form(modal.form_heading(), modal.form())),
        }
    }

    /// Turns a user reference into a card id: `3` or `#3` is the third listed card,
    /// anything else is taken as an id.
    pub fn resolve_card(&self, reference: &str) -> String {
        let number = reference.strip_prefix('#').unwrap_or(reference);
        if let Ok(n) = number.parse::<usize>() {
            let visible = self.app.visible_cards();
            if let Some(card) = n.checked_sub(1).and_then(|i| visible.get(i)) {
                return card.id.clone();
            }
        }
        reference.to_string()
    }
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let data_dir = resolve_data_dir(cli.data_dir.clone())?;
    tracing::debug!(data_dir = %data_dir.display(), "using data directory");

    if let Some(Commands::Config { key, value }) = &cli.command {
        return handle_config(&data_dir, key.as_deref(), value.as_deref());
    }

    let confirm: Box<dyn Confirm> = match &cli.command {
        Some(Commands::Delete { yes: true, .. }) => Box::new(FixedAnswer(true)),
        _ => Box::new(StdinConfirm),
    };
    let mut ctx = init_context(&cli, &data_dir, confirm)?;

    match cli.command {
        Some(Commands::List { search }) => handle_list(&mut ctx, search),
        Some(Commands::View { card }) => handle_view(&mut ctx, &card),
        Some(Commands::Create {
            title,
            description,
            image,
        }) => handle_create(&mut ctx, CardFields::new(title, description, image)),
        Some(Commands::Update {
            card,
            title,
            description,
            image,
        }) => handle_update(&mut ctx, &card, title, description, image),
        Some(Commands::Delete { card, .. }) => handle_delete(&mut ctx, &card),
        Some(Commands::Theme) => handle_theme(&mut ctx),
        Some(Commands::Shell) => shell::run(&mut ctx),
        Some(Commands::Config { .. }) => Ok(()),
        None => handle_list(&mut ctx, None),
    }
}

fn init_logging(verbose: bool) {
    let default = if verbose { "cardshelf=debug" } else { "warn" };
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn resolve_data_dir(flag: Option<PathBuf>) -> Result<PathBuf> {
    if let Some(dir) = flag {
        return Ok(dir);
    }
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|v| !v.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    ProjectDirs::from("com", "cardshelf", "cardshelf")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| CardsError::Config("Could not determine data directory".to_string()))
}

fn init_context(cli: &Cli, data_dir: &Path, confirm: Box<dyn Confirm>) -> Result<AppContext> {
    let config = CardsConfig::load(data_dir)?;
    let collab = Collaborators::standard(&config.placeholder_base, confirm);

    let app = App::open(FileKv::new(data_dir), &config, collab);
    let use_color = !cli.no_color && Term::stdout().features().colors_supported();
    let out = Renderer::new(app.theme(), use_color)?;
    Ok(AppContext {
        app,
        out,
        use_color,
    })
}

/// A blocking validation message means the command failed.
fn fail_on_error(result: &DispatchResult) -> Result<()> {
    match result
        .messages
        .iter()
        .find(|m| m.level == MessageLevel::Error)
    {
        Some(m) => Err(CardsError::Validation(m.content.clone())),
        None => Ok(()),
    }
}

fn handle_list(ctx: &mut AppContext, search: Option<String>) -> Result<()> {
    if let Some(term) = search {
        ctx.dispatch(Action::SearchInput(term))?;
    }
    ctx.print_list();
    Ok(())
}

fn handle_view(ctx: &mut AppContext, card: &str) -> Result<()> {
    let id = ctx.resolve_card(card);
    ctx.dispatch(Action::CardView(id))?;
    if !ctx.app.modal().is_open() {
        ctx.print_messages(&[CmdMessage::warning(format!("Card not found: {}", card))]);
        return Ok(());
    }
    ctx.print_modal();
    Ok(())
}

fn handle_create(ctx: &mut AppContext, fields: CardFields) -> Result<()> {
    ctx.dispatch(Action::CreateClick)?;
    let result = ctx.dispatch(Action::FormSubmit(fields))?;
    fail_on_error(&result)?;
    ctx.print_messages(&result.messages);
    Ok(())
}

fn handle_update(
    ctx: &mut AppContext,
    card: &str,
    title: Option<String>,
    description: Option<String>,
    image: Option<String>,
) -> Result<()> {
    let id = ctx.resolve_card(card);
    ctx.dispatch(Action::CardEdit(id))?;
    if !ctx.app.modal().is_open() {
        ctx.print_messages(&[CmdMessage::warning(format!("Card not found: {}", card))]);
        return Ok(());
    }

    let current = ctx.app.modal().form().clone();
    let fields = CardFields::new(
        title.unwrap_or(current.title),
        description.unwrap_or(current.description),
        image.unwrap_or(current.image),
    );
    let result = ctx.dispatch(Action::FormSubmit(fields))?;
    fail_on_error(&result)?;
    ctx.print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, card: &str) -> Result<()> {
    let id = ctx.resolve_card(card);
    if ctx.app.find(&id).is_none() {
        ctx.print_messages(&[CmdMessage::warning(format!("Card not found: {}", card))]);
        return Ok(());
    }
    let result = ctx.dispatch(Action::CardDelete(id))?;
    ctx.print_messages(&result.messages);
    Ok(())
}

fn handle_theme(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.dispatch(Action::ToggleTheme)?;
    ctx.print_messages(&result.messages);
    ctx.print_messages(&[CmdMessage::success(format!(
        "Theme: {}",
        ctx.app.theme().as_str()
    ))]);
    Ok(())
}

fn handle_config(data_dir: &Path, key: Option<&str>, value: Option<&str>) -> Result<()> {
    let mut config = CardsConfig::load(data_dir)?;
    match (key, value) {
        (None, _) => {
            for key in CONFIG_KEYS {
                println!("{} = {}", key, config.get(key)?);
            }
        }
        (Some(key), None) => println!("{}", config.get(key)?),
        (Some(key), Some(value)) => {
            config.set(key, value)?;
            config.save(data_dir)?;
            println!("{} = {}", key, config.get(key)?);
        }
    }
    Ok(())
}
