use std::sync::Arc;

use game_core::generate::EventOption;
use game_core::{BattleEvent, EventId, GameConfig, PendingInput, RelicId, RunEffect, RunError};

use super::*;
use crate::provider::{ActionProvider, GreedyProvider, drive};
use crate::repository::{HistoryRepository, InMemoryHistoryRepo, InMemorySaveRepo, SaveRepository};

fn session(seed: u64) -> RunSession {
    RunSession::new(seed, &GameConfig::new(), Persistence::disabled())
}

fn first_battle(session: &mut RunSession) {
    session
        .apply(SessionAction::SelectNode {
            node_id: "0_0".into(),
        })
        .unwrap();
    let node_id = session.run().accessible_nodes()[0].id.clone();
    session.apply(SessionAction::SelectNode { node_id }).unwrap();
}

#[test]
fn start_node_completes_immediately() {
    let mut session = session(5);
    session
        .apply(SessionAction::SelectNode {
            node_id: "0_0".into(),
        })
        .unwrap();

    assert!(matches!(session.room(), Room::Map));
    assert_eq!(
        session.log().last(),
        Some(&SessionEvent::NodeCompleted {
            node_id: "0_0".into()
        })
    );
    assert_eq!(session.actions().len(), 1);
}

#[test]
fn rejected_actions_are_not_recorded() {
    let mut session = session(5);
    let log_len = session.log().len();

    let error = session
        .apply(SessionAction::SelectNode {
            node_id: "3_0".into(),
        })
        .unwrap_err();
    assert!(matches!(
        error,
        SessionError::Run(RunError::NodeNotAccessible(_))
    ));

    let error = session.apply(SessionAction::EndTurn).unwrap_err();
    assert!(matches!(error, SessionError::Unavailable { room: "the map", .. }));

    assert!(session.actions().is_empty());
    assert_eq!(session.log().len(), log_len);
}

#[test]
fn row_one_is_always_a_battle() {
    let mut session = session(11);
    first_battle(&mut session);

    let engine = session.battle().expect("row 1 starts a battle");
    assert_eq!(engine.state().turn, 1);
    assert!(
        session
            .log()
            .contains(&SessionEvent::Battle(BattleEvent::BattleStarted))
    );
}

#[test]
fn engine_rejections_are_recorded_not_errors() {
    let mut session = session(11);
    first_battle(&mut session);

    session
        .apply(SessionAction::PlayCard {
            hand_index: 42,
            target: None,
        })
        .unwrap();

    assert!(matches!(
        session.log().last(),
        Some(SessionEvent::Battle(BattleEvent::InvalidAction { .. }))
    ));
    assert_eq!(session.actions().len(), 3);
}

#[test]
fn winning_a_battle_offers_a_card_reward() {
    let mut session = session(11);
    first_battle(&mut session);

    let mut provider = GreedyProvider;
    while session.battle().is_some() {
        let action = provider.next_action(&session).unwrap();
        session.apply(action).unwrap();
    }

    if session.is_over() {
        assert_eq!(session.log().last(), Some(&SessionEvent::RunLost));
        return;
    }
    let Room::CardReward(offer) = session.room() else {
        panic!("expected a card reward, got {}", session.room().name());
    };
    assert_eq!(offer.choices.len(), 3);
    assert!(
        session
            .log()
            .iter()
            .any(|event| matches!(event, SessionEvent::GoldGained { amount } if (10..=20).contains(amount)))
    );

    let deck_len = session.run().deck.len();
    session.apply(SessionAction::ChooseCard { index: 1 }).unwrap();
    assert_eq!(session.run().deck.len(), deck_len + 1);
    assert!(matches!(session.room(), Room::Map));
}

#[test]
fn saves_and_history_are_written() {
    let saves = Arc::new(InMemorySaveRepo::new());
    let history = Arc::new(InMemoryHistoryRepo::new());
    let persistence = Persistence::disabled()
        .with_save(Arc::clone(&saves))
        .with_history(Arc::clone(&history));
    let mut session = RunSession::new(21, &GameConfig::new(), persistence);

    assert_eq!(saves.load().unwrap().unwrap().current_node_id, None);

    first_battle(&mut session);
    let mut provider = GreedyProvider;
    while session.battle().is_some() {
        let action = provider.next_action(&session).unwrap();
        session.apply(action).unwrap();
    }

    let records = history.load().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].seed, 21);
    assert_eq!(records[0].floor, 1);
    assert_eq!(saves.load().unwrap().unwrap().current_node_id, Some("0_0".into()));
}

#[test]
fn resumed_sessions_start_on_the_map() {
    let mut session = session(8);
    session
        .apply(SessionAction::SelectNode {
            node_id: "0_0".into(),
        })
        .unwrap();

    let resumed = RunSession::resume(&session.run().snapshot(), Persistence::disabled()).unwrap();
    assert!(matches!(resumed.room(), Room::Map));
    assert_eq!(resumed.run(), session.run());
    assert_eq!(
        resumed.log(),
        &[SessionEvent::RunResumed { seed: 8, floor: 1 }]
    );
}

#[test]
fn greedy_runs_replay_identically() {
    let mut session = session(1234);
    drive(&mut session, &mut GreedyProvider, 2_000).unwrap();

    let recording = Recording::from_session(&session).unwrap();
    let replayed = replay(&recording).unwrap();

    assert_eq!(replayed.log(), session.log());
    assert_eq!(verify(&recording).unwrap(), session.digest().unwrap());
}

#[test]
fn tampered_recordings_diverge() {
    let mut session = session(77);
    drive(&mut session, &mut GreedyProvider, 40).unwrap();

    let mut recording = Recording::from_session(&session).unwrap();
    recording.digest = Some("00".repeat(32));

    assert!(matches!(
        verify(&recording),
        Err(SessionError::ReplayDiverged { .. })
    ));
}

#[test]
fn finished_runs_reject_everything() {
    let mut session = session(3);
    drive(&mut session, &mut GreedyProvider, 10_000).unwrap();
    assert!(session.is_over());
    assert!(matches!(session.room(), Room::Finished));

    let error = session.apply(SessionAction::Leave).unwrap_err();
    assert!(matches!(error, SessionError::Run(RunError::RunOver)));
}

#[test]
fn pending_foresight_blocks_play_until_chosen() {
    let mut session = session(11);
    session.run.add_relic(RelicId::from_static("third_eye"));
    first_battle(&mut session);

    let engine = session.battle().expect("row 1 starts a battle");
    assert!(matches!(
        engine.pending_input(),
        Some(PendingInput::Foresight { from_count: 2, .. })
    ));
    assert_eq!(
        GreedyProvider.next_action(&session),
        Some(SessionAction::ChooseForesight { option: 0 })
    );

    session
        .apply(SessionAction::PlayCard {
            hand_index: 0,
            target: None,
        })
        .unwrap();
    assert!(matches!(
        session.log().last(),
        Some(SessionEvent::Battle(BattleEvent::InvalidAction { .. }))
    ));

    session
        .apply(SessionAction::ChooseForesight { option: 0 })
        .unwrap();
    assert!(matches!(
        session.log().last(),
        Some(SessionEvent::Battle(BattleEvent::ForesightChosen { from_count: 2, .. }))
    ));
    assert_eq!(session.battle().map(|engine| engine.state().hand.len()), Some(6));
}

#[test]
fn failing_event_options_leave_the_run_untouched() {
    let mut session = session(5);
    session.room = Room::Event(EventOffer {
        event_id: EventId::from_static("scavenger"),
        name: "Scavenger".into(),
        description: String::new(),
        options: vec![EventOption::new(
            "Rummage",
            vec![
                RunEffect::GainGold { amount: 40 },
                RunEffect::UpgradeCard { deck_index: 99 },
            ],
        )],
    });
    let before = session.run().clone();
    let log_len = session.log().len();

    let error = session
        .apply(SessionAction::ChooseOption { index: 0 })
        .unwrap_err();

    assert!(matches!(
        error,
        SessionError::Run(RunError::InvalidIndex { index: 99, .. })
    ));
    assert_eq!(session.run(), &before);
    assert_eq!(session.log().len(), log_len);
    assert!(session.actions().is_empty());
    assert!(matches!(session.room(), Room::Event(_)));
}
