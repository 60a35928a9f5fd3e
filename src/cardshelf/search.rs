use crate::model::Card;

/// Cards whose title and description, joined, contain `query` ignoring case.
///
/// A blank query returns everything. Order always follows the collection.
pub fn filter<'a>(cards: &'a [Card], query: &str) -> Vec<&'a Card> {
    if query.trim().is_empty() {
        return cards.iter().collect();
    }
    let needle = query.to_lowercase();
    cards
        .iter()
        .filter(|card| haystack(card).contains(&needle))
        .collect()
}

fn haystack(card: &Card) -> String {
    let mut text = String::with_capacity(card.title.len() + card.description.len());
    text.push_str(&card.title);
    text.push_str(&card.description);
    text.to_lowercase()
}
