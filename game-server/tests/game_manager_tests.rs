
use futures::future::join_all;
use game_core::MAX_WORDS_PER_GAME;
use game_types::{GameError, GameStatus, SubmitProfileRequest, SubmitWordRequest};
use test_helpers::*;

#[tokio::test]
async fn test_start_game_persists() {
    let setup = TestGameServerSetup::new().await;

    let game = setup.game_manager.start_game().await.unwrap();
    assert_eq!(game.status, GameStatus::Active);
    assert_eq!(game.board.len(), 16);
    assert_eq!(game.score, 0);

    let stored = setup.stored_game(&game.id).await;
    assert_eq!(stored.possible_words, game.possible_words);
    assert_eq!(stored.board.to_letters(), game.board);
}

#[tokio::test]
async fn test_correct_word_is_scored() {
    let setup = TestGameServerSetup::new().await;
    let game_id = setup.create_test_game("game-1").await;

    let result = setup.submit(&game_id, &[0, 1, 2]).await.unwrap();

    assert_eq!(result.played.word, "rat");
    assert!(result.played.correct);
    assert_eq!(result.played.score_for_letters, 13);
    assert_eq!(result.played.score_for_length, 0);
    assert_eq!(result.game.score, 13);
    assert_eq!(result.game.word_count, 1);
    assert_eq!(result.game.top_word.as_deref(), Some("rat"));
    assert_eq!(result.game.words.len(), 1);

    let stored = setup.stored_game(&game_id).await;
    assert_eq!(stored.version, 1);
    assert_eq!(stored.score, 13);
    // Untouched positions keep their letters
    assert!(stored.board.chars().chars().skip(3).eq("mizakrtvodnoe".chars()));
}

#[tokio::test]
async fn test_incorrect_word_is_recorded() {
    let setup = TestGameServerSetup::new().await;
    let game_id = setup.create_test_game("game-1").await;

    let result = setup.submit(&game_id, &[2, 1, 0]).await.unwrap();

    assert_eq!(result.played.word, "tar");
    assert!(!result.played.correct);
    assert_eq!(result.played.score_for_word, 0);
    assert_eq!(result.game.score, 0);
    assert_eq!(result.game.word_count, 0);
    assert_eq!(result.game.words.len(), 1);

    let stored = setup.stored_game(&game_id).await;
    assert_eq!(stored.board.chars(), TEST_BOARD);
}

#[tokio::test]
async fn test_input_is_validated_before_lookup() {
    let setup = TestGameServerSetup::new().await;

    // The game doesn't exist, but bad input is reported first
    let result = setup.submit("missing", &[0, 1]).await;
    assert_eq!(result.unwrap_err(), GameError::TooFewLetters { min: 3, got: 2 });

    let result = setup.submit("missing", &[0, 1, 16]).await;
    assert_eq!(result.unwrap_err(), GameError::LetterIndexOutOfBounds { index: 16 });

    let result = setup.submit("missing", &[4, 4, 5]).await;
    assert_eq!(result.unwrap_err(), GameError::DuplicateLetterIndexes);

    let result = setup.submit("  ", &[0, 1, 2]).await;
    assert_eq!(result.unwrap_err(), GameError::MissingGameId);

    let result = setup.submit("missing", &[0, 1, 2]).await;
    assert_eq!(
        result.unwrap_err(),
        GameError::GameNotFound {
            game_id: "missing".to_string()
        }
    );
}

#[tokio::test]
async fn test_hundredth_word_ends_game() {
    let setup = TestGameServerSetup::new().await;

    let mut record = setup.game_with_board("game-1", TEST_BOARD);
    record.word_count = MAX_WORDS_PER_GAME - 1;
    setup.insert_record(&record).await;

    let result = setup.submit("game-1", &[0, 1, 2]).await.unwrap();

    assert!(result.played.correct);
    assert_eq!(result.game.word_count, MAX_WORDS_PER_GAME);
    assert_ended(&result.game);
    assert_eq!(result.game.leaderboard_rank, Some(1));
    assert!(!result.game.ended_and_named);

    let again = setup.submit("game-1", &[3, 4, 5, 6]).await;
    assert_eq!(
        again.unwrap_err(),
        GameError::GameAlreadyEnded {
            game_id: "game-1".to_string()
        }
    );
}

#[tokio::test]
async fn test_incorrect_word_does_not_count_towards_limit() {
    let setup = TestGameServerSetup::new().await;

    let mut record = setup.game_with_board("game-1", TEST_BOARD);
    record.word_count = MAX_WORDS_PER_GAME - 1;
    setup.insert_record(&record).await;

    let result = setup.submit("game-1", &[2, 1, 0]).await.unwrap();
    assert!(!result.played.correct);
    assert_eq!(result.game.status, GameStatus::Active);
}

#[tokio::test]
async fn test_hundredth_word_propagates_top_game() {
    let setup = TestGameServerSetup::new().await;
    setup.create_player("uid-1", "Janez").await;

    let mut record = setup.game_with_board("game-1", TEST_BOARD);
    record.word_count = MAX_WORDS_PER_GAME - 1;
    setup.insert_record(&record).await;
    setup.assign("game-1", "uid-1").await.unwrap();

    let result = setup.submit("game-1", &[0, 1, 2]).await.unwrap();
    assert_ended(&result.game);
    assert!(result.game.ended_and_named);
    assert_eq!(result.game.leaderboard_rank, Some(1));

    let player = setup
        .store
        .players
        .find_by_uid("uid-1")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(player.top_game_id.as_deref(), Some("game-1"));
    assert_eq!(player.top_game_score, Some(13));
}

#[tokio::test]
async fn test_end_game() {
    let setup = TestGameServerSetup::new().await;
    let game_id = setup.create_test_game("game-1").await;

    let game = setup.end(&game_id).await.unwrap();
    assert_ended(&game);
    assert!(!game.ended_and_named);
    assert_eq!(game.possible_words, 7);
    // Longest word within the 5 letter cap
    assert_eq!(game.missed_opportunity.as_deref(), Some("odmor"));

    let again = setup.end(&game_id).await;
    assert!(matches!(again, Err(GameError::GameAlreadyEnded { .. })));

    let missing = setup.end("missing").await;
    assert!(matches!(missing, Err(GameError::GameNotFound { .. })));

    let empty = setup.end("").await;
    assert_eq!(empty.unwrap_err(), GameError::MissingGameId);
}

#[tokio::test]
async fn test_missed_opportunity_skips_played_words() {
    let setup = TestGameServerSetup::with_words("miza\nvoda").await;
    let game_id = setup.create_test_game("game-1").await;

    // v(7) + o(2) + d(7) + a(1) + 1
    let result = setup.submit(&game_id, &[10, 11, 12, 6]).await.unwrap();
    assert_eq!(result.played.word, "voda");
    assert_eq!(result.played.score_for_word, 18);

    let game = setup.end(&game_id).await.unwrap();
    // miza is still on the board, voda was played
    if game.possible_words > 0 {
        assert_ne!(game.missed_opportunity.as_deref(), Some("voda"));
    }
}

#[tokio::test]
async fn test_rank_ties_share_a_value() {
    let setup = TestGameServerSetup::new().await;

    setup.insert_ranked_game("a", 100, 1, "uid-1").await;
    setup.insert_ranked_game("b", 50, 2, "uid-2").await;
    setup.insert_ranked_game("c", 50, 3, "uid-3").await;

    let manager = &setup.game_manager;
    assert_eq!(manager.leaderboard_rank(101).await.unwrap(), 1);
    assert_eq!(manager.leaderboard_rank(100).await.unwrap(), 2);
    assert_eq!(manager.leaderboard_rank(60).await.unwrap(), 2);
    assert_eq!(manager.leaderboard_rank(50).await.unwrap(), 4);
    assert_eq!(manager.leaderboard_rank(0).await.unwrap(), 4);

    // Unnamed games never count towards anyone's rank
    let game_id = setup.create_test_game("unnamed").await;
    let game = setup.end(&game_id).await.unwrap();
    assert_eq!(game.leaderboard_rank, Some(4));
    assert_eq!(manager.leaderboard_rank(0).await.unwrap(), 4);
}

#[tokio::test]
async fn test_assign_then_end_propagates_top_game() {
    let setup = TestGameServerSetup::new().await;
    setup.create_player("uid-1", "Janez").await;
    let game_id = setup.create_test_game("game-1").await;

    let game = setup.assign(&game_id, "uid-1").await.unwrap();
    assert!(game.assigned_to_player);
    assert_eq!(game.name.as_deref(), Some("Janez"));
    assert!(!game.ended_and_named);

    setup.submit(&game_id, &[3, 4, 5, 6]).await.unwrap();
    let game = setup.end(&game_id).await.unwrap();
    assert!(game.ended_and_named);
    assert_eq!(game.leaderboard_rank, Some(1));

    let profile = setup
        .player_manager
        .read_profile_by_uid("uid-1")
        .await
        .unwrap()
        .unwrap();
    let top_game = profile.top_game.unwrap();
    assert_eq!(top_game.id, game_id);
    assert_eq!(top_game.score, 19);

    // Named and ended, so it now counts for rank
    assert_eq!(setup.game_manager.leaderboard_rank(19).await.unwrap(), 2);
}

#[tokio::test]
async fn test_assign_after_end_marks_named() {
    let setup = TestGameServerSetup::new().await;
    setup.create_player("uid-1", "Mojca").await;
    let game_id = setup.create_test_game("game-1").await;

    setup.submit(&game_id, &[0, 1, 2]).await.unwrap();
    let ended = setup.end(&game_id).await.unwrap();
    assert!(!ended.ended_and_named);

    let game = setup.assign(&game_id, "uid-1").await.unwrap();
    assert!(game.ended_and_named);
    assert_eq!(game.leaderboard_rank, ended.leaderboard_rank);

    let player = setup.store.players.find_by_uid("uid-1").await.unwrap().unwrap();
    assert_eq!(player.top_game_id.as_deref(), Some("game-1"));
    assert_eq!(player.top_game_score, Some(13));
}

#[tokio::test]
async fn test_assign_errors() {
    let setup = TestGameServerSetup::new().await;
    setup.create_player("uid-1", "Janez").await;
    let game_id = setup.create_test_game("game-1").await;

    let result = setup.assign(&game_id, " ").await;
    assert_eq!(result.unwrap_err(), GameError::MissingPlayerUid);

    let result = setup.assign("", "uid-1").await;
    assert_eq!(result.unwrap_err(), GameError::MissingGameId);

    let result = setup.assign("missing", "uid-1").await;
    assert!(matches!(result, Err(GameError::GameNotFound { .. })));

    let result = setup.assign(&game_id, "uid-unknown").await;
    assert_eq!(
        result.unwrap_err(),
        GameError::PlayerNotFound {
            player: "uid-unknown".to_string()
        }
    );

    setup.assign(&game_id, "uid-1").await.unwrap();
    let result = setup.assign(&game_id, "uid-1").await;
    assert!(matches!(result, Err(GameError::GameAlreadyAssigned { .. })));
}

#[tokio::test]
async fn test_top_game_only_replaced_by_strictly_better_score() {
    let setup = TestGameServerSetup::new().await;
    setup.create_player("uid-1", "Janez").await;

    // Each game plays miza (19 points), the last one adds rat
    for (id, extra) in [("first", false), ("second", false), ("third", true)] {
        setup.create_test_game(id).await;
        setup.assign(id, "uid-1").await.unwrap();
        setup.submit(id, &[3, 4, 5, 6]).await.unwrap();
        if extra {
            setup.submit(id, &[0, 1, 2]).await.unwrap();
        }
        setup.end(id).await.unwrap();

        let player = setup.store.players.find_by_uid("uid-1").await.unwrap().unwrap();
        let expected = if extra { "third" } else { "first" };
        assert_eq!(player.top_game_id.as_deref(), Some(expected));
    }
}

#[tokio::test]
async fn test_concurrent_submissions_keep_invariants() {
    let setup = TestGameServerSetup::new().await;
    let game_id = setup.create_test_game("game-1").await;

    let submissions = (0..12).map(|round| {
        let indexes = if round % 2 == 0 { vec![0, 1, 2] } else { vec![3, 4, 5, 6] };
        setup.game_manager.submit_word(SubmitWordRequest {
            game_id: game_id.clone(),
            letter_indexes: indexes,
        })
    });
    let results = join_all(submissions).await;

    // Serialized per game, so none of them lose a race
    for result in &results {
        assert!(result.is_ok(), "submission failed: {:?}", result);
    }

    let stored = setup.stored_game(&game_id).await;
    assert_eq!(stored.words.len(), 12);
    assert_eq!(stored.version, 12);
    assert_score_consistent(&stored);
    assert!(stored.board.has_vowel());
}

#[tokio::test]
async fn test_different_games_proceed_independently() {
    let setup = TestGameServerSetup::new().await;
    let first = setup.create_test_game("first").await;
    let second = setup.create_test_game("second").await;

    let (a, b) = tokio::join!(
        setup.submit(&first, &[0, 1, 2]),
        setup.submit(&second, &[3, 4, 5, 6]),
    );
    assert_eq!(a.unwrap().game.score, 13);
    assert_eq!(b.unwrap().game.score, 19);
}

#[tokio::test]
async fn test_submit_profile_validation() {
    let setup = TestGameServerSetup::new().await;
    let manager = &setup.player_manager;

    let submit = |uid: &str, nickname: &str| SubmitProfileRequest {
        uid: uid.to_string(),
        nickname: nickname.to_string(),
    };

    let profile = manager.submit_profile(submit("uid-1", " Janez ")).await.unwrap();
    assert_eq!(profile.nickname, "Janez");

    let result = manager.submit_profile(submit("uid-2", "two words")).await;
    assert!(matches!(result, Err(GameError::InvalidNickname { .. })));

    let result = manager.submit_profile(submit("uid-2", "   ")).await;
    assert!(matches!(result, Err(GameError::InvalidNickname { .. })));

    let result = manager.submit_profile(submit("uid-2", &"x".repeat(21))).await;
    assert!(matches!(result, Err(GameError::InvalidNickname { .. })));

    let result = manager.submit_profile(submit("", "Someone")).await;
    assert_eq!(result.unwrap_err(), GameError::MissingPlayerUid);

    // Uniqueness ignores case, but a player may keep their own nickname
    let result = manager.submit_profile(submit("uid-2", "JANEZ")).await;
    assert_eq!(
        result.unwrap_err(),
        GameError::NicknameTaken {
            nickname: "JANEZ".to_string()
        }
    );
    let profile = manager.submit_profile(submit("uid-1", "JANEZ")).await.unwrap();
    assert_eq!(profile.nickname, "JANEZ");
}

#[tokio::test]
async fn test_rename_keeps_top_game() {
    let setup = TestGameServerSetup::new().await;
    setup.create_player("uid-1", "Old").await;
    let game_id = setup.create_test_game("game-1").await;
    setup.assign(&game_id, "uid-1").await.unwrap();
    setup.end(&game_id).await.unwrap();

    let profile = setup
        .player_manager
        .submit_profile(SubmitProfileRequest {
            uid: "uid-1".to_string(),
            nickname: "New.Name".to_string(),
        })
        .await
        .unwrap();
    assert_eq!(profile.nickname, "New.Name");
    assert_eq!(profile.top_game.map(|game| game.id), Some(game_id));

    let by_nickname = setup.player_manager.read_profile("new.name").await.unwrap();
    assert!(by_nickname.is_some());
    assert!(setup.player_manager.read_profile("old").await.unwrap().is_none());
}

#[tokio::test]
async fn test_leaderboards() {
    let setup = TestGameServerSetup::new().await;

    for (uid, nickname) in [("uid-1", "ana"), ("uid-2", "bor"), ("uid-3", "cene")] {
        setup.create_player(uid, nickname).await;
    }
    setup.insert_ranked_game("a1", 40, 1, "uid-1").await;
    setup.insert_ranked_game("a2", 70, 5, "uid-1").await;
    setup.insert_ranked_game("a3", 70, 2, "uid-1").await;
    setup.insert_ranked_game("b1", 90, 3, "uid-2").await;

    let players = &setup.store.players;
    players.update_top_game("uid-1", "a3", 70).await.unwrap();
    players.update_top_game("uid-2", "b1", 90).await.unwrap();

    let leaderboard = setup.game_manager.leaderboard().await.unwrap();
    let ids: Vec<&str> = leaderboard.iter().map(|game| game.id.as_str()).collect();
    // cene has no top game yet
    assert_eq!(ids, vec!["b1", "a3"]);

    let games = setup.game_manager.player_leaderboard("ANA").await.unwrap();
    let ids: Vec<&str> = games.iter().map(|game| game.id.as_str()).collect();
    assert_eq!(ids, vec!["a3", "a2", "a1"]);

    let games = setup.game_manager.player_leaderboard("cene").await.unwrap();
    assert!(games.is_empty());

    let result = setup.game_manager.player_leaderboard("nobody").await;
    assert!(matches!(result, Err(GameError::PlayerNotFound { .. })));
}
