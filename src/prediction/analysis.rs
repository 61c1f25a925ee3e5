//! Presentation-layer derivation for a rendered prediction.

use chrono::{DateTime, Utc};
use serde::Serialize;

use super::{Prediction, Surface};
use crate::roster::Player;

/// One side of the result display.
#[derive(Debug, Clone, Serialize)]
pub struct PlayerCard {
    pub name: String,
    pub rank: u32,
    pub country: String,
    pub win_prob: f64,
    pub is_favorite: bool,
}

/// Everything the UI needs to render one prediction.
#[derive(Debug, Clone, Serialize)]
pub struct MatchAnalysis {
    pub player1: PlayerCard,
    pub player2: PlayerCard,
    pub prediction: Prediction,
    pub surface: Surface,
    /// Distance from a coin flip, 0–100: `|prob1 − 0.5| × 200`.
    pub confidence_pct: f64,
    /// Ranking positions between the two players.
    pub rank_gap: u32,
    pub generated_at: DateTime<Utc>,
}

impl MatchAnalysis {
    pub fn build(
        player1: &Player,
        player2: &Player,
        surface: Surface,
        prediction: Prediction,
    ) -> Self {
        let p1_is_favorite = prediction.player1_win_prob > 0.5;
        MatchAnalysis {
            player1: PlayerCard {
                name: player1.name.to_string(),
                rank: player1.rank,
                country: player1.country.to_string(),
                win_prob: prediction.player1_win_prob,
                is_favorite: p1_is_favorite,
            },
            player2: PlayerCard {
                name: player2.name.to_string(),
                rank: player2.rank,
                country: player2.country.to_string(),
                win_prob: prediction.player2_win_prob,
                is_favorite: !p1_is_favorite,
            },
            surface,
            confidence_pct: (prediction.player1_win_prob - 0.5).abs() * 200.0,
            rank_gap: player1.rank.abs_diff(player2.rank),
            generated_at: Utc::now(),
            prediction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::prediction::fallback::fallback_prediction;
    use crate::roster;
    use approx::assert_relative_eq;

    #[test]
    fn derives_confidence_and_rank_gap() {
        let p1 = roster::by_rank(1).unwrap();
        let p2 = roster::by_rank(30).unwrap();
        let analysis =
            MatchAnalysis::build(p1, p2, Surface::Clay, fallback_prediction(1, 30));

        // prob1 ≈ 0.6411 → confidence ≈ 28.2%
        assert_relative_eq!(analysis.confidence_pct, 28.2133, epsilon = 1e-3);
        assert_eq!(analysis.rank_gap, 29);
        assert_eq!(analysis.surface, Surface::Clay);
        assert!(analysis.player1.is_favorite);
        assert!(!analysis.player2.is_favorite);
    }

    #[test]
    fn cards_carry_roster_identity() {
        let p1 = roster::by_rank(2).unwrap();
        let p2 = roster::by_rank(4).unwrap();
        let analysis =
            MatchAnalysis::build(p1, p2, Surface::Hard, fallback_prediction(2, 4));

        assert_eq!(analysis.player1.name, "Alcaraz C.");
        assert_eq!(analysis.player1.country, "Spain");
        assert_eq!(analysis.player2.name, "Sinner J.");
        assert_relative_eq!(
            analysis.player1.win_prob + analysis.player2.win_prob,
            1.0,
            epsilon = 1e-12
        );
    }

    #[test]
    fn coin_flip_has_zero_confidence() {
        let p = roster::by_rank(10).unwrap();
        let analysis =
            MatchAnalysis::build(p, p, Surface::Grass, fallback_prediction(10, 10));
        assert_relative_eq!(analysis.confidence_pct, 0.0, epsilon = 1e-12);
        assert_eq!(analysis.rank_gap, 0);
        // Exactly 0.5 never flags player 1
        assert!(!analysis.player1.is_favorite);
        assert!(analysis.player2.is_favorite);
    }
}
