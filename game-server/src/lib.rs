use std::sync::Arc;

use serde::Serialize;
use warp::Filter;
use warp::http::StatusCode;
use warp::reply::{Reply, Response};

use crate::game_manager::GameManager;
use crate::player_manager::PlayerManager;
use game_types::{
    AssignPlayerRequest, ErrorClass, GameError, GameOverRequest, SubmitProfileRequest,
    SubmitWordRequest,
};

pub mod config;
pub mod game_manager;
pub mod player_manager;
pub mod store;

pub fn create_routes(
    game_manager: Arc<GameManager>,
    player_manager: Arc<PlayerManager>,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let game_manager_filter = warp::any().map({
        let game_manager = game_manager.clone();
        move || game_manager.clone()
    });

    let player_manager_filter = warp::any().map({
        let player_manager = player_manager.clone();
        move || player_manager.clone()
    });

    // Health check endpoint
    let health = warp::path("health")
        .and(warp::path::end())
        .and(warp::get())
        .map(|| warp::reply::with_status("OK", StatusCode::OK));

    let start_game = warp::path!("games")
        .and(warp::post())
        .and(game_manager_filter.clone())
        .and_then(handle_start_game);

    let submit_word = warp::path!("games" / "word")
        .and(warp::post())
        .and(warp::body::json())
        .and(game_manager_filter.clone())
        .and_then(handle_submit_word);

    let game_over = warp::path!("games" / "over")
        .and(warp::post())
        .and(warp::body::json())
        .and(game_manager_filter.clone())
        .and_then(handle_game_over);

    let assign_player = warp::path!("games" / "player")
        .and(warp::post())
        .and(warp::body::json())
        .and(game_manager_filter.clone())
        .and_then(handle_assign_player);

    let leaderboard = warp::path!("leaderboard")
        .and(warp::get())
        .and(game_manager_filter.clone())
        .and_then(handle_leaderboard);

    let profile = warp::path!("players" / String)
        .and(warp::get())
        .and(player_manager_filter.clone())
        .and_then(handle_read_profile);

    let player_games = warp::path!("players" / String / "games")
        .and(warp::get())
        .and(game_manager_filter.clone())
        .and_then(handle_player_games);

    let submit_profile = warp::path!("players")
        .and(warp::put())
        .and(warp::body::json())
        .and(player_manager_filter.clone())
        .and_then(handle_submit_profile);

    // CORS configuration
    let cors = warp::cors()
        .allow_any_origin()
        .allow_headers(vec!["content-type"])
        .allow_methods(vec!["GET", "POST", "PUT"]);

    health
        .or(start_game)
        .or(submit_word)
        .or(game_over)
        .or(assign_player)
        .or(leaderboard)
        .or(profile)
        .or(player_games)
        .or(submit_profile)
        .with(cors)
        .with(warp::log("word_board"))
}

pub fn status_for(err: &GameError) -> StatusCode {
    match err.class() {
        ErrorClass::InvalidInput => StatusCode::BAD_REQUEST,
        ErrorClass::NotFound => StatusCode::NOT_FOUND,
        ErrorClass::Conflict => StatusCode::CONFLICT,
        ErrorClass::Unavailable => StatusCode::SERVICE_UNAVAILABLE,
    }
}

fn error_reply(err: &GameError) -> Response {
    let status = status_for(err);
    if status == StatusCode::SERVICE_UNAVAILABLE {
        tracing::error!("Request failed: {}", err);
    } else {
        tracing::debug!("Request rejected: {}", err);
    }
    warp::reply::with_status(warp::reply::json(err), status).into_response()
}

fn reply<T: Serialize>(result: Result<T, GameError>) -> Result<Response, warp::Rejection> {
    Ok(match result {
        Ok(value) => warp::reply::with_status(warp::reply::json(&value), StatusCode::OK)
            .into_response(),
        Err(err) => error_reply(&err),
    })
}

async fn handle_start_game(game_manager: Arc<GameManager>) -> Result<Response, warp::Rejection> {
    reply(game_manager.start_game().await)
}

async fn handle_submit_word(
    request: SubmitWordRequest,
    game_manager: Arc<GameManager>,
) -> Result<Response, warp::Rejection> {
    reply(game_manager.submit_word(request).await)
}

async fn handle_game_over(
    request: GameOverRequest,
    game_manager: Arc<GameManager>,
) -> Result<Response, warp::Rejection> {
    reply(game_manager.end_game(request).await)
}

async fn handle_assign_player(
    request: AssignPlayerRequest,
    game_manager: Arc<GameManager>,
) -> Result<Response, warp::Rejection> {
    reply(game_manager.assign_to_player(request).await)
}

async fn handle_leaderboard(game_manager: Arc<GameManager>) -> Result<Response, warp::Rejection> {
    reply(game_manager.leaderboard().await)
}

async fn handle_read_profile(
    nickname: String,
    player_manager: Arc<PlayerManager>,
) -> Result<Response, warp::Rejection> {
    let result = player_manager
        .read_profile(&nickname)
        .await
        .and_then(|profile| profile.ok_or(GameError::PlayerNotFound { player: nickname }));
    reply(result)
}

async fn handle_player_games(
    nickname: String,
    game_manager: Arc<GameManager>,
) -> Result<Response, warp::Rejection> {
    reply(game_manager.player_leaderboard(&nickname).await)
}

async fn handle_submit_profile(
    request: SubmitProfileRequest,
    player_manager: Arc<PlayerManager>,
) -> Result<Response, warp::Rejection> {
    reply(player_manager.submit_profile(request).await)
}
