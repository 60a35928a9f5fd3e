//! Collaborators the core leans on but does not own: id generation, placeholder images,
//! and the yes/no prompt shown before a delete.
//!
//! Each is a small trait so the core stays deterministic under test and free of terminal
//! I/O. The defaults here are what the binary wires in, except [`Confirm`], whose
//! interactive implementation lives in the CLI layer.

use chrono::Utc;
use std::collections::VecDeque;
use uuid::Uuid;

pub const DEFAULT_PLACEHOLDER_BASE: &str = "https://picsum.photos/600/400";
const PLACEHOLDER_RANGE: u128 = 10_000;

/// Prompt text used for every delete confirmation.
pub const DELETE_PROMPT: &str = "Delete this card?";

fn random_below(bound: u128) -> u128 {
    Uuid::new_v4().as_u128() % bound
}

/// Supplies card identifiers. Uniqueness among live cards is enforced by the record store,
/// so an implementation only needs to be unlikely to repeat.
pub trait IdSource {
    fn next_id(&mut self) -> String;
}

/// `c_<unix-millis>_<random hex>`.
#[derive(Debug, Default, Clone, Copy)]
pub struct TimeIds;

impl IdSource for TimeIds {
    fn next_id(&mut self) -> String {
        let suffix = Uuid::new_v4().simple().to_string();
        format!("c_{}_{}", Utc::now().timestamp_millis(), &suffix[..6])
    }
}

/// Hands out `<prefix>1`, `<prefix>2`, ... Handy wherever ids need to be predictable.
#[derive(Debug, Clone)]
pub struct SequentialIds {
    prefix: String,
    next: u64,
}

impl SequentialIds {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next: 1,
        }
    }
}

impl IdSource for SequentialIds {
    fn next_id(&mut self) -> String {
        let id = format!("{}{}", self.prefix, self.next);
        self.next += 1;
        id
    }
}

/// Replays a fixed list of ids, then falls back to `fallback-<n>`.
#[derive(Debug, Clone, Default)]
pub struct ScriptedIds {
    queue: VecDeque<String>,
    issued: u64,
}

impl ScriptedIds {
    pub fn new<I, T>(ids: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        Self {
            queue: ids.into_iter().map(Into::into).collect(),
            issued: 0,
        }
    }
}

impl IdSource for ScriptedIds {
    fn next_id(&mut self) -> String {
        self.issued += 1;
        self.queue
            .pop_front()
            .unwrap_or_else(|| format!("fallback-{}", self.issued))
    }
}

/// Supplies an image URL when the user leaves the field blank.
pub trait ImageSource {
    fn placeholder(&mut self) -> String;
}

/// Random picsum.photos references: `<base>?random=<0..10000>`.
#[derive(Debug, Clone)]
pub struct PlaceholderImages {
    base: String,
}

impl PlaceholderImages {
    pub fn new(base: impl Into<String>) -> Self {
        Self { base: base.into() }
    }
}

impl Default for PlaceholderImages {
    fn default() -> Self {
        Self::new(DEFAULT_PLACEHOLDER_BASE)
    }
}

impl ImageSource for PlaceholderImages {
    fn placeholder(&mut self) -> String {
        format!("{}?random={}", self.base, random_below(PLACEHOLDER_RANGE))
    }
}

/// Blocking yes/no question asked before any delete. `false` aborts with no side effects.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

/// Answers every prompt the same way (`--yes`, or non-interactive callers).
#[derive(Debug, Clone, Copy)]
pub struct FixedAnswer(pub bool);

impl Confirm for FixedAnswer {
    fn confirm(&mut self, _prompt: &str) -> bool {
        self.0
    }
}

/// Everything the record store and app need from the outside world.
pub struct Collaborators {
    pub ids: Box<dyn IdSource>,
    pub images: Box<dyn ImageSource>,
    pub confirm: Box<dyn Confirm>,
}

impl Collaborators {
    pub fn new(
        ids: impl IdSource + 'static,
        images: impl ImageSource + 'static,
        confirm: impl Confirm + 'static,
    ) -> Self {
        Self {
            ids: Box::new(ids),
            images: Box::new(images),
            confirm: Box::new(confirm),
        }
    }

    /// Production ids and placeholders with the given confirmation prompt.
    pub fn standard(placeholder_base: &str, confirm: Box<dyn Confirm>) -> Self {
        Self {
            ids: Box::new(TimeIds),
            images: Box::new(PlaceholderImages::new(placeholder_base)),
            confirm,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_ids_have_expected_shape() {
        let id = TimeIds.next_id();
        let parts: Vec<_> = id.split('_').collect();
        assert_eq!(parts.len(), 3);
        assert_eq!(parts[0], "c");
        assert!(parts[1].parse::<i64>().is_ok());
        assert_eq!(parts[2].len(), 6);
    }

    #[test]
    fn placeholder_uses_base_and_random_suffix() {
        let mut images = PlaceholderImages::new("https://img.test/1/1");
        let url = images.placeholder();
        let n: u32 = url
            .strip_prefix("https://img.test/1/1?random=")
            .unwrap()
            .parse()
            .unwrap();
        assert!(n < 10_000);
    }

    #[test]
    fn scripted_ids_replay_then_fall_back() {
        let mut ids = ScriptedIds::new(["a", "a"]);
        assert_eq!(ids.next_id(), "a");
        assert_eq!(ids.next_id(), "a");
        assert_eq!(ids.next_id(), "fallback-3");
    }

    #[test]
    fn sequential_ids_count_up() {
        let mut ids = SequentialIds::new("card-");
        assert_eq!(ids.next_id(), "card-1");
        assert_eq!(ids.next_id(), "card-2");
    }
}
