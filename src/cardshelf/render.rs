//! Render/bind layer: turns the filtered collection into display elements.
//!
//! Each element carries its three affordances as ready-to-dispatch [`Action`]s bound to the
//! card's id. Elements are rebuilt from scratch on every call; nothing is cached, so a
//! binding can never point at a card from an earlier render.

use crate::app::Action;
use crate::collab::ImageSource;
use crate::model::Card;

pub const VIEW_LABEL: &str = "Learn More";
pub const EDIT_LABEL: &str = "Edit";
pub const DELETE_LABEL: &str = "Delete";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoundAction {
    pub label: &'static str,
    pub action: Action,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardElement {
    pub id: String,
    pub title: String,
    pub description: String,
    pub image: String,
    /// View, edit and delete, in that order.
    pub actions: [BoundAction; 3],
}

impl CardElement {
    fn bind(card: &Card, images: &mut dyn ImageSource) -> Self {
        // Stored data may predate placeholder assignment; show something anyway.
        let image = if card.image.trim().is_empty() {
            images.placeholder()
        } else {
            card.image.clone()
        };
        Self {
            id: card.id.clone(),
            title: card.title.clone(),
            description: card.description.clone(),
            image,
            actions: [
                BoundAction {
                    label: VIEW_LABEL,
                    action: Action::CardView(card.id.clone()),
                },
                BoundAction {
                    label: EDIT_LABEL,
                    action: Action::CardEdit(card.id.clone()),
                },
                BoundAction {
                    label: DELETE_LABEL,
                    action: Action::CardDelete(card.id.clone()),
                },
            ],
        }
    }
}

/// One element per card, in the given order.
pub fn render(filtered: &[&Card], images: &mut dyn ImageSource) -> Vec<CardElement> {
    filtered
        .iter()
        .map(|card| CardElement::bind(card, images))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collab::PlaceholderImages;

    fn card(id: &str, image: &str) -> Card {
        Card {
            id: id.into(),
            title: format!("Title {}", id),
            description: format!("Desc {}", id),
            image: image.into(),
        }
    }

    #[test]
    fn keeps_order_and_binds_three_actions_per_card() {
        let cards = [card("a", "a.png"), card("b", "b.png")];
        let refs: Vec<&Card> = cards.iter().collect();
        let elements = render(&refs, &mut PlaceholderImages::default());

        assert_eq!(elements.len(), 2);
        assert_eq!(elements[0].id, "a");
        assert_eq!(elements[1].id, "b");
        assert_eq!(
            elements[1]
                .actions
                .iter()
                .map(|b| b.action.clone())
                .collect::<Vec<_>>(),
            vec![
                Action::CardView("b".into()),
                Action::CardEdit("b".into()),
                Action::CardDelete("b".into()),
            ]
        );
        assert_eq!(elements[0].actions[0].label, VIEW_LABEL);
    }

    #[test]
    fn blank_image_gets_a_placeholder_at_render_time() {
        let cards = [card("a", "")];
        let refs: Vec<&Card> = cards.iter().collect();
        let elements = render(&refs, &mut PlaceholderImages::new("https://img.test"));
        assert!(elements[0].image.starts_with("https://img.test?random="));
        assert_eq!(cards[0].image, "");
    }

    #[test]
    fn empty_input_renders_nothing() {
        assert!(render(&[], &mut PlaceholderImages::default()).is_empty());
    }
}
