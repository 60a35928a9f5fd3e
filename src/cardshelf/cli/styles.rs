use cardshelf::theme::ThemeMode;
use console::Style;
use once_cell::sync::Lazy;
use std::collections::HashMap;

/// Shown in front of text whose style name is not registered, to catch template typos.
const MISSING_STYLE_INDICATOR: &str = "(!?)";

/// Named styles referenced from templates through the `style` filter.
pub struct Styles {
    styles: HashMap<&'static str, Style>,
}

impl Styles {
    fn new() -> Self {
        Self {
            styles: HashMap::new(),
        }
    }

    fn add(mut self, name: &'static str, style: Style) -> Self {
        self.styles.insert(name, style);
        self
    }

    /// Styled text, or plain text when colour is off.
    pub fn apply(&self, name: &str, text: &str, use_color: bool) -> String {
        match self.styles.get(name) {
            Some(style) if use_color => style.apply_to(text).force_styling(true).to_string(),
            Some(_) => text.to_string(),
            None => format!("{} {}", MISSING_STYLE_INDICATOR, text),
        }
    }
}

fn base() -> Styles {
    Styles::new()
        .add("index", Style::new().yellow())
        .add("id", Style::new().dim())
        .add("desc", Style::new())
        .add("image", Style::new().dim().italic())
        .add("muted", Style::new().dim())
        .add("info", Style::new().dim())
        .add("success", Style::new().green())
        .add("warning", Style::new().yellow())
        .add("error", Style::new().red().bold())
}

/// Neon accents, matching the dark page theme.
pub static DARK: Lazy<Styles> = Lazy::new(|| {
    base()
        .add("title", Style::new().bold().color256(51))
        .add("heading", Style::new().bold().color256(51).underlined())
        .add("action", Style::new().color256(201))
});

pub static LIGHT: Lazy<Styles> = Lazy::new(|| {
    base()
        .add("title", Style::new().bold().black())
        .add("heading", Style::new().bold().blue().underlined())
        .add("action", Style::new().blue())
});

pub fn for_mode(mode: ThemeMode) -> &'static Styles {
    match mode {
        ThemeMode::Dark => &DARK,
        ThemeMode::Light => &LIGHT,
    }
}
