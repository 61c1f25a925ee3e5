use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{Html, IntoResponse},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::CorsLayer;

use crate::prediction::{MatchAnalysis, PredictionClient, Surface};
use crate::roster;

#[derive(Clone)]
pub struct AppState {
    pub predictor: PredictionClient,
}

/// Build the Axum router for the prediction UI.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(index_handler))
        .route("/api/players", get(players_handler))
        .route("/api/status", get(status_handler))
        .route("/api/predict", get(predict_handler))
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

/// Serve the single-file prediction page.
async fn index_handler() -> impl IntoResponse {
    Html(PREDICTOR_HTML)
}

/// GET /api/players
async fn players_handler() -> impl IntoResponse {
    Json(roster::ROSTER)
}

#[derive(Debug, Serialize)]
struct ConnectionStatus {
    connected: bool,
}

/// GET /api/status
async fn status_handler(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(ConnectionStatus {
        connected: state.predictor.check_connection().await,
    })
}

#[derive(Debug, Deserialize)]
struct PredictQuery {
    player1_rank: u32,
    player2_rank: u32,
    surface: String,
}

/// GET /api/predict?player1_rank=&player2_rank=&surface=
///
/// Ranks must exist in the roster; the same rank on both sides is allowed
/// (the formula yields a coin flip). Never fails on upstream trouble, since
/// the client folds that into the fallback model.
async fn predict_handler(
    State(state): State<Arc<AppState>>,
    Query(query): Query<PredictQuery>,
) -> Result<Json<MatchAnalysis>, (StatusCode, String)> {
    let surface: Surface = query
        .surface
        .parse()
        .map_err(|e| (StatusCode::BAD_REQUEST, e))?;
    let player1 = roster::by_rank(query.player1_rank).ok_or((
        StatusCode::BAD_REQUEST,
        format!("no roster player with rank {}", query.player1_rank),
    ))?;
    let player2 = roster::by_rank(query.player2_rank).ok_or((
        StatusCode::BAD_REQUEST,
        format!("no roster player with rank {}", query.player2_rank),
    ))?;

    let prediction = state
        .predictor
        .predict(player1.rank, player2.rank, surface)
        .await;

    Ok(Json(MatchAnalysis::build(player1, player2, surface, prediction)))
}

/// Embedded single-file prediction page (HTML + CSS + JS)
const PREDICTOR_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>ATP Tennis Match Predictor</title>
<style>
  :root {
    --bg: #0f1117;
    --card: #1a1d27;
    --border: #2a2d3a;
    --accent: #2e8b57;
    --green: #00c896;
    --red: #ff4f6a;
    --amber: #ffc107;
    --text: #e0e0e0;
    --muted: #8888aa;
  }
  * { box-sizing: border-box; margin: 0; padding: 0; }
  body { background: var(--bg); color: var(--text); font-family: 'Segoe UI', system-ui, sans-serif; }
  header { background: linear-gradient(135deg, #2e8b57, #228b22); padding: 1.5rem 2rem; display: flex; align-items: center; gap: 1rem; }
  header h1 { font-size: 1.4rem; font-weight: 700; color: #fff; }
  header p { color: rgba(255,255,255,.85); font-size: .85rem; }
  .status-dot { width: 10px; height: 10px; border-radius: 50%; background: var(--muted); display: inline-block; }
  .status-dot.up { background: var(--green); animation: pulse 1.5s infinite; }
  .status-dot.down { background: var(--red); }
  @keyframes pulse { 0%,100% { opacity: 1; } 50% { opacity: .3; } }
  #status-text { margin-left: auto; text-align: right; font-size: .8rem; color: #fff; }
  #status-text small { display: block; color: rgba(255,255,255,.7); font-size: .7rem; }
  main { padding: 1.5rem 2rem; display: grid; grid-template-columns: 280px 1fr; gap: 1.5rem; align-items: start; }
  @media (max-width: 768px) { main { grid-template-columns: 1fr; } }
  .panel { background: var(--card); border: 1px solid var(--border); border-radius: 10px; padding: 1.2rem; }
  .panel h3 { font-size: 1rem; margin-bottom: .8rem; }
  label { display: block; font-size: .8rem; font-weight: 600; color: var(--muted); margin: .7rem 0 .3rem; }
  select { width: 100%; padding: .45rem; background: var(--bg); color: var(--text); border: 1px solid var(--border); border-radius: 6px; font-size: .85rem; }
  button { width: 100%; margin-top: 1rem; padding: .6rem; background: var(--accent); color: #fff; border: none; border-radius: 6px; font-size: .9rem; font-weight: 700; cursor: pointer; }
  button:hover { filter: brightness(1.1); }
  button:disabled { opacity: .5; cursor: wait; }
  .cards { display: grid; grid-template-columns: 1fr 1fr; gap: 1rem; }
  .result-card { border: 2px solid var(--border); border-radius: 10px; padding: 1.2rem; text-align: center; }
  .result-card.winner { border-color: var(--green); }
  .result-card.loser { border-color: var(--red); }
  .result-card h4 { font-size: 1rem; margin-bottom: .4rem; }
  .result-card .prob { font-size: 2rem; font-weight: 700; }
  .result-card.winner .prob { color: var(--green); }
  .result-card.loser .prob { color: var(--red); }
  .result-card p { color: var(--muted); font-size: .8rem; margin-top: .2rem; }
  .analysis { display: grid; grid-template-columns: repeat(auto-fill, minmax(140px, 1fr)); gap: 1rem; margin-top: 1rem; }
  .analysis .item .label { color: var(--muted); font-size: .75rem; text-transform: uppercase; letter-spacing: .06em; }
  .analysis .item .value { font-weight: 700; margin-top: .2rem; }
  .value.good { color: var(--green); }
  .value.weak { color: var(--amber); }
  .bars { margin-top: 1rem; }
  .chart-bar { padding: .4rem .6rem; color: #fff; margin: .3rem 0; border-radius: 4px; font-size: .8rem; white-space: nowrap; transition: width .3s ease; }
  .chart-bar.p1 { background: linear-gradient(90deg, #28a745, #20c997); }
  .chart-bar.p2 { background: linear-gradient(90deg, #dc3545, #fd7e14); }
  .source { text-align: center; color: var(--muted); font-style: italic; font-size: .8rem; margin-top: 1rem; }
  .empty { color: var(--muted); text-align: center; padding: 3rem 1rem; font-size: .9rem; }
  .error { color: var(--red); text-align: center; padding: 1rem; font-size: .85rem; }
</style>
</head>
<body>
<header>
  <h1>🎾 ATP Tennis Match Predictor</h1>
  <p>Match outcome predictions powered by machine learning</p>
  <div id="status-text"><span class="status-dot" id="dot"></span> <span id="status-label">Checking…</span><small id="status-sub"></small></div>
</header>

<main>
  <div class="panel">
    <h3>Match Setup</h3>
    <label for="player1">Player 1</label>
    <select id="player1"></select>
    <label for="player2">Player 2</label>
    <select id="player2"></select>
    <label for="surface">Surface</label>
    <select id="surface">
      <option>Hard</option>
      <option>Clay</option>
      <option>Grass</option>
    </select>
    <button id="predict-btn" onclick="predict()">Predict</button>
  </div>

  <div class="panel" id="results">
    <div class="empty">Pick two players and press Predict.</div>
  </div>
</main>

<script>
const pct = v => (v*100).toFixed(1)+'%';

async function loadPlayers() {
  const r = await fetch('/api/players');
  if (!r.ok) return;
  const players = await r.json();
  const options = players
    .map(p => `<option value="${p.rank}">${p.name} (#${p.rank})</option>`)
    .join('');
  document.getElementById('player1').innerHTML = options;
  document.getElementById('player2').innerHTML = options;
  document.getElementById('player2').value = '10';
}

async function loadStatus() {
  const dot = document.getElementById('dot');
  const label = document.getElementById('status-label');
  const sub = document.getElementById('status-sub');
  try {
    const r = await fetch('/api/status');
    const s = await r.json();
    dot.className = 'status-dot ' + (s.connected ? 'up' : 'down');
    label.textContent = s.connected ? 'API: Connected' : 'API: Offline';
    sub.textContent = s.connected ? 'ML Model Active' : 'Fallback Mode';
  } catch (e) {
    dot.className = 'status-dot down';
    label.textContent = 'API: Offline';
    sub.textContent = 'Fallback Mode';
  }
}

function card(player) {
  return `<div class="result-card ${player.is_favorite ? 'winner' : 'loser'}">
    <h4>🏆 ${player.name}</h4>
    <div class="prob">${pct(player.win_prob)}</div>
    <p>ATP Ranking #${player.rank}</p>
    <p>Country: ${player.country}</p>
  </div>`;
}

async function predict() {
  const btn = document.getElementById('predict-btn');
  const results = document.getElementById('results');
  const p1 = document.getElementById('player1').value;
  const p2 = document.getElementById('player2').value;
  const surface = document.getElementById('surface').value;

  btn.disabled = true;
  try {
    const r = await fetch(`/api/predict?player1_rank=${p1}&player2_rank=${p2}&surface=${surface}`);
    if (!r.ok) {
      results.innerHTML = `<div class="error">${await r.text()}</div>`;
      return;
    }
    const a = await r.json();
    const favorite = a.player1.is_favorite ? a.player1.name : a.player2.name;
    const conf = a.confidence_pct;
    results.innerHTML = `
      <h3>Match Prediction Analysis</h3>
      <div class="cards">${card(a.player1)}${card(a.player2)}</div>
      <div class="analysis">
        <div class="item"><div class="label">Predicted Winner</div><div class="value good">${favorite}</div></div>
        <div class="item"><div class="label">Court Surface</div><div class="value">${a.surface}</div></div>
        <div class="item"><div class="label">Ranking Difference</div><div class="value">${a.rank_gap} positions</div></div>
        <div class="item"><div class="label">Confidence Level</div><div class="value ${conf > 30 ? 'good' : 'weak'}">${conf.toFixed(0)}%</div></div>
      </div>
      <div class="bars">
        <div class="chart-bar p1" style="width:${a.player1.win_prob*100}%">${a.player1.name}: ${pct(a.player1.win_prob)}</div>
        <div class="chart-bar p2" style="width:${a.player2.win_prob*100}%">${a.player2.name}: ${pct(a.player2.win_prob)}</div>
      </div>
      <div class="source">Prediction generated using: ${a.prediction.source} Model</div>`;
  } catch (e) {
    results.innerHTML = `<div class="error">Prediction request failed: ${e}</div>`;
  } finally {
    btn.disabled = false;
  }
}

loadPlayers();
loadStatus();
setInterval(loadStatus, 5000);
</script>
</body>
</html>"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prediction::{Favorite, Prediction, PredictionSource};

    #[test]
    fn analysis_serializes_for_the_ui() {
        let p1 = roster::by_rank(1).unwrap();
        let p2 = roster::by_rank(30).unwrap();
        let analysis = MatchAnalysis::build(
            p1,
            p2,
            Surface::Hard,
            Prediction {
                player1_win_prob: 0.64,
                player2_win_prob: 0.36,
                favorite: Favorite::Player1,
                source: PredictionSource::Fallback,
            },
        );
        let json = serde_json::to_value(&analysis).unwrap();
        assert_eq!(json["player1"]["name"], "Djokovic N.");
        assert_eq!(json["player1"]["is_favorite"], true);
        assert_eq!(json["surface"], "Hard");
        assert_eq!(json["rank_gap"], 29);
        assert_eq!(json["prediction"]["source"], "Fallback");
    }

    #[test]
    fn page_wires_up_the_api_routes() {
        for route in ["/api/players", "/api/status", "/api/predict"] {
            assert!(PREDICTOR_HTML.contains(route), "page must call {}", route);
        }
    }
}
