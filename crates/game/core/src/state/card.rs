use crate::ids::CardId;

/// A card instance in a deck, hand or pile.
///
/// `id` is stable for the lifetime of the run (`strike_1`, `cleave_1`), so
/// event logs and saves can refer to one specific copy of a card.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Card {
    pub id: String,
    pub card_id: CardId,
}

impl Card {
    pub fn new(id: impl Into<String>, card_id: CardId) -> Self {
        Self {
            id: id.into(),
            card_id,
        }
    }
}
