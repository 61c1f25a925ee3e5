use serde::{Deserialize, Serialize};

pub mod analysis;
pub mod client;
pub mod fallback;

pub use analysis::MatchAnalysis;
pub use client::PredictionClient;

/// Court surface of the queried match. Carried to the remote model verbatim;
/// the fallback formula ignores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Surface {
    Hard,
    Clay,
    Grass,
}

impl Surface {
    pub fn as_str(&self) -> &'static str {
        match self {
            Surface::Hard => "Hard",
            Surface::Clay => "Clay",
            Surface::Grass => "Grass",
        }
    }
}

impl std::str::FromStr for Surface {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Hard" => Ok(Surface::Hard),
            "Clay" => Ok(Surface::Clay),
            "Grass" => Ok(Surface::Grass),
            other => Err(format!("unknown surface: {}", other)),
        }
    }
}

/// Which player the model favours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Favorite {
    #[serde(rename = "Player 1")]
    Player1,
    #[serde(rename = "Player 2")]
    Player2,
}

/// Where a prediction came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PredictionSource {
    #[serde(rename = "ML API")]
    MlApi,
    Fallback,
}

/// A match outcome prediction. `player2_win_prob` is always the complement
/// of `player1_win_prob`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Prediction {
    pub player1_win_prob: f64,
    pub player2_win_prob: f64,
    pub favorite: Favorite,
    pub source: PredictionSource,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_match_the_api() {
        assert_eq!(
            serde_json::to_string(&Favorite::Player1).unwrap(),
            "\"Player 1\""
        );
        assert_eq!(
            serde_json::to_string(&PredictionSource::MlApi).unwrap(),
            "\"ML API\""
        );
        assert_eq!(
            serde_json::to_string(&PredictionSource::Fallback).unwrap(),
            "\"Fallback\""
        );
    }

    #[test]
    fn surface_round_trip() {
        for s in [Surface::Hard, Surface::Clay, Surface::Grass] {
            let json = serde_json::to_string(&s).unwrap();
            assert_eq!(json, format!("\"{}\"", s.as_str()));
            let back: Surface = serde_json::from_str(&json).unwrap();
            assert_eq!(back, s);
            assert_eq!(s.as_str().parse::<Surface>().unwrap(), s);
        }
    }

    #[test]
    fn surface_rejects_unknown_values() {
        assert!("Carpet".parse::<Surface>().is_err());
        assert!("hard".parse::<Surface>().is_err());
    }
}
