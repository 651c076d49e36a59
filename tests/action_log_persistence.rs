use std::env;
use std::fs::{self, File};
use std::io::{BufReader, Cursor};

use hanab_state::{replay_from_log, ActionLog, ActionLogError, Clue, GameAction};

mod common;

use common::{draw, Table};
use hanab_state::Identity;

fn sample_log() -> ActionLog {
    let mut actions: Vec<GameAction> = (0..10)
        .map(|order| draw(order / 5, order, Identity::new(order % 5, 1)))
        .collect();
    actions.push(GameAction::Clue {
        clue: Clue::Rank(1),
        giver: 0,
        list: vec![5, 6, 7, 8, 9],
        target: 1,
    });
    actions.push(GameAction::Play {
        player_index: 1,
        order: 5,
        suit_index: Some(0),
        rank: Some(1),
    });
    ActionLog::from_actions(actions)
}

#[test]
fn write_and_load_action_log_file() {
    let log = sample_log();

    let mut path = env::temp_dir();
    path.push(format!("hanab_actionlog_test_{}.jsonl", std::process::id()));

    log.write_all(File::create(&path).expect("create file"))
        .expect("write file");
    let loaded = ActionLog::load_from_reader(BufReader::new(File::open(&path).expect("open file")))
        .expect("load file");
    let _ = fs::remove_file(&path);

    assert_eq!(loaded.entries(), log.entries());
    // Appends continue after the highest loaded seq.
    let entry = loaded.append(GameAction::SetEffMod { modifier: 1 });
    assert_eq!(entry.seq, 13);

    let table = Table::new("No Variant", 2);
    let state = replay_from_log(&log, &table.ctx()).expect("replay succeeds");
    let reloaded = replay_from_log(&loaded, &table.ctx()).expect("replay succeeds");
    assert_eq!(state.score, 1);
    // The efficiency modifier is bookkeeping only.
    assert_eq!(state, reloaded);
}

#[test]
fn load_skips_blank_lines_and_sorts_by_seq() {
    let text = concat!(
        r#"{"seq":2,"action":{"type":"setEffMod","modifier":3}}"#,
        "\n\n",
        r#"{"seq":1,"action":{"type":"noteList","notes":[]}}"#,
        "\n"
    );
    let log = ActionLog::load_from_reader(Cursor::new(text)).expect("valid log");
    let seqs: Vec<u64> = log.entries().iter().map(|entry| entry.seq).collect();
    assert_eq!(seqs, vec![1, 2]);
}

#[test]
fn malformed_line_reports_its_number() {
    let text = concat!(
        r#"{"seq":1,"action":{"type":"setEffMod","modifier":3}}"#,
        "\n",
        r#"{"seq":2,"action":{"type":"unknownThing"}}"#,
        "\n"
    );
    match ActionLog::load_from_reader(Cursor::new(text)) {
        Err(ActionLogError::Malformed { line, .. }) => assert_eq!(line, 2),
        other => panic!("expected a malformed line, got {other:?}"),
    }
}
