use std::sync::Arc;

use serde_json::{json, Value};
use tictactoe_client::{GameId, GameViewModel, InMemoryHttp, Update};

fn game(id: u64, square: u32) -> Value {
    json!({
        "game_id": id,
        "error_list": [],
        "full_board": [{"square": square, "user": "X"}],
    })
}

async fn wait_for_requests(http: &InMemoryHttp, n: usize) {
    while http.requests().len() < n {
        tokio::task::yield_now().await;
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn late_response_to_older_request_is_dropped() -> anyhow::Result<()> {
    let http = InMemoryHttp::new();
    let vm = Arc::new(GameViewModel::new(http.clone(), "http://game.test/api/"));

    http.reply_gated("slow", game(1, 1));
    http.reply(game(2, 2));

    let slow = tokio::spawn({
        let vm = vm.clone();
        async move { vm.load_game("1").await }
    });
    wait_for_requests(&http, 1).await;

    assert_eq!(vm.start_new_game().await?, Update::Applied);
    http.release("slow");

    let outcome = slow.await??;
    assert_eq!(outcome, Update::Superseded { seq: 1, latest: 2 });

    let state = vm.state().await;
    assert_eq!(state.game_id, Some(GameId::new("2")));
    assert_eq!(state.board[0].square, 2);
    Ok(())
}

#[tokio::test(flavor = "multi_thread")]
async fn early_response_to_older_request_is_dropped() -> anyhow::Result<()> {
    let http = InMemoryHttp::new();
    let vm = Arc::new(GameViewModel::new(http.clone(), "http://game.test/api/"));

    http.reply_gated("first", game(1, 1));
    http.reply_gated("second", game(2, 2));

    let first = tokio::spawn({
        let vm = vm.clone();
        async move { vm.load_game("1").await }
    });
    wait_for_requests(&http, 1).await;
    let second = tokio::spawn({
        let vm = vm.clone();
        async move { vm.load_game("2").await }
    });
    wait_for_requests(&http, 2).await;

    http.release("first");
    assert!(matches!(first.await??, Update::Superseded { .. }));
    assert_eq!(vm.state().await.game_id, None);

    http.release("second");
    assert_eq!(second.await??, Update::Applied);
    assert_eq!(vm.state().await.game_id, Some(GameId::new("2")));
    Ok(())
}

#[tokio::test]
async fn sequential_requests_are_all_applied() -> anyhow::Result<()> {
    let http = InMemoryHttp::new();
    let vm = GameViewModel::new(http.clone(), "http://game.test/api/");
    http.reply(game(1, 1));
    http.reply(game(1, 4));
    http.reply(game(1, 7));

    assert!(vm.start_new_game().await?.is_applied());
    assert!(vm.submit_move(4).await?.is_applied());
    assert!(vm.load_game("1").await?.is_applied());

    assert_eq!(vm.latest_request(), 3);
    assert_eq!(vm.state().await.board[0].square, 7);
    assert_eq!(http.pending_replies(), 0);
    Ok(())
}
