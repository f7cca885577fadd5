/// Player input to a battle.
///
/// Target indices are enemy slots. Invalid input is never an error: the engine
/// rejects it with an event and leaves the battle untouched.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlayerAction {
    PlayCard {
        hand_index: usize,
        target: Option<usize>,
    },
    UseConsumable {
        slot: usize,
        target: Option<usize>,
    },
    EndTurn,
    /// Answers a pending foresight with the index of the revealed card to keep.
    ChooseForesight { option: usize },
}
