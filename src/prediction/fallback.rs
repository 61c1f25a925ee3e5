//! Closed-form fallback model used when the remote predictor is unreachable.
//!
//! A logistic on the scaled rank difference: the better-ranked player is
//! favoured, and the clamp keeps the estimate away from false certainty no
//! matter how lopsided the ranking gap is.

use super::{Favorite, Prediction, PredictionSource};

/// Win-probability points per position of ranking difference, pre-sigmoid.
const RANK_COEFFICIENT: f64 = 0.02;
/// Clamp bounds for the fallback estimate.
const PROB_FLOOR: f64 = 0.1;
const PROB_CEILING: f64 = 0.9;

/// Estimate the outcome of `rank1` vs `rank2` without the remote model.
///
/// `prob1 = clamp(sigmoid((rank2 − rank1) × 0.02), 0.1, 0.9)`; equal ranks
/// come out at exactly 0.5, which labels player 2 the favorite.
pub fn fallback_prediction(rank1: u32, rank2: u32) -> Prediction {
    let rank_diff = rank2 as f64 - rank1 as f64;
    let prob1 = sigmoid(rank_diff * RANK_COEFFICIENT).clamp(PROB_FLOOR, PROB_CEILING);

    Prediction {
        player1_win_prob: prob1,
        player2_win_prob: 1.0 - prob1,
        favorite: if prob1 > 0.5 {
            Favorite::Player1
        } else {
            Favorite::Player2
        },
        source: PredictionSource::Fallback,
    }
}

/// Standard logistic sigmoid function.
fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}
