mod common;

use common::*;
use quiz_core::{
    Bookmarks, CatalogQuery, GameSession, Leaderboard, QuizEvent, SortOption, SubmissionPlan,
};
use quiz_types::{GamePhase, GuessOutcome, HighScoreRecord, Tag};

#[test]
fn test_guess_scenario_with_near_miss_duplicate() {
    let matcher = create_scenario_matcher();
    let mut session = GameSession::default();

    let outcomes: Vec<GuessOutcome> = ["kaisa", "zed", "zedd"]
        .iter()
        .map(|guess| session.submit_guess(&matcher, guess).unwrap())
        .collect();

    assert_eq!(
        outcomes,
        vec![
            GuessOutcome::Correct("1".to_string()),
            GuessOutcome::Correct("2".to_string()),
            GuessOutcome::Duplicate("2".to_string()),
        ]
    );
    assert_eq!(session.score(), 2);
    assert_eq!(session.lives(), 3);
    assert_eq!(session.phase(), GamePhase::Playing);
}

#[test]
fn test_three_misses_then_reset() {
    let matcher = create_scenario_matcher();
    let mut session = GameSession::default();

    for _ in 0..3 {
        assert_eq!(session.submit_guess(&matcher, "xyzxyz"), Ok(GuessOutcome::Miss));
    }
    assert_eq!(session.phase(), GamePhase::GameOver);
    assert_eq!(session.lives(), 0);

    session.reset().unwrap();
    assert_eq!(session.lives(), 3);
    assert_eq!(session.phase(), GamePhase::Playing);
}

#[test]
fn test_submission_scenario_updates_case_insensitive_match() {
    let mut session = create_game_over_session(&["ahri", "garen", "jinx", "kaisa", "zed"]);
    assert_eq!(session.score(), 5);

    let leaderboard = vec![HighScoreRecord::new(Some("9".to_string()), "alice", 3)];
    let pending = session.begin_submission("Alice").unwrap();
    let plan = Leaderboard::plan_submission(&pending, &leaderboard);

    assert_eq!(
        plan,
        SubmissionPlan::Update {
            id: "9".to_string(),
            player_name: "alice".to_string(),
            score: 5,
        }
    );

    session.complete_submission(plan).unwrap();
    assert_eq!(session.phase(), GamePhase::Playing);
    assert_eq!(session.score(), 0);
}

#[test]
fn test_events_follow_transitions() {
    let matcher = create_scenario_matcher();
    let collector = EventCollector::new();
    let mut session = GameSession::default();
    session.event_bus.add_handler(Box::new(collector.clone()));

    session.submit_guess(&matcher, "Kai'Sa").unwrap();
    session.submit_guess(&matcher, "KAI SA").unwrap();
    for _ in 0..3 {
        session.submit_guess(&matcher, "nobody").unwrap();
    }

    assert_eq!(
        collector.event_names(),
        vec![
            "guess_accepted",
            "guess_repeated",
            "guess_missed",
            "guess_missed",
            "guess_missed",
            "game_over",
        ]
    );
    assert!(collector.has_event_type(|event| matches!(event, QuizEvent::GameOver { final_score: 1 })));

    session.reset().unwrap();
    assert_eq!(collector.get_events().last(), Some(&QuizEvent::SessionReset));
}

#[test]
fn test_browsing_catalog_with_bookmarks() {
    let champions = create_test_champions();
    let mut bookmarks = Bookmarks::new();
    bookmarks.toggle("Zed");

    let mut query = CatalogQuery::new();
    query.toggle_tag(Tag::Assassin);
    query.set_sort(SortOption::Favorites);

    let visible: Vec<&str> = query
        .apply(&champions, &bookmarks)
        .iter()
        .map(|champion| champion.id.as_str())
        .collect();
    assert_eq!(visible, vec!["Zed", "Ahri"]);
}
