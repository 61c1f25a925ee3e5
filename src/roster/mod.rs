use serde::Serialize;

/// A ranked player from the static roster.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Player {
    pub name: &'static str,
    /// ATP singles ranking, unique within the roster
    pub rank: u32,
    pub country: &'static str,
}

/// ATP top 30, compiled in. Loaded nowhere else; the UI selects players by rank.
pub const ROSTER: [Player; 30] = [
    Player { name: "Djokovic N.", rank: 1, country: "Serbia" },
    Player { name: "Alcaraz C.", rank: 2, country: "Spain" },
    Player { name: "Medvedev D.", rank: 3, country: "Russia" },
    Player { name: "Sinner J.", rank: 4, country: "Italy" },
    Player { name: "Rublev A.", rank: 5, country: "Russia" },
    Player { name: "Tsitsipas S.", rank: 6, country: "Greece" },
    Player { name: "Rune H.", rank: 7, country: "Denmark" },
    Player { name: "Hurkacz H.", rank: 8, country: "Poland" },
    Player { name: "Fritz T.", rank: 9, country: "USA" },
    Player { name: "Ruud C.", rank: 10, country: "Norway" },
    Player { name: "Paul T.", rank: 11, country: "USA" },
    Player { name: "Dimitrov G.", rank: 12, country: "Bulgaria" },
    Player { name: "Khachanov K.", rank: 13, country: "Russia" },
    Player { name: "Shapovalov D.", rank: 14, country: "Canada" },
    Player { name: "Berrettini M.", rank: 15, country: "Italy" },
    Player { name: "Norrie C.", rank: 16, country: "Great Britain" },
    Player { name: "Musetti L.", rank: 17, country: "Italy" },
    Player { name: "Tiafoe F.", rank: 18, country: "USA" },
    Player { name: "De Minaur A.", rank: 19, country: "Australia" },
    Player { name: "Shelton B.", rank: 20, country: "USA" },
    Player { name: "Zverev A.", rank: 21, country: "Germany" },
    Player { name: "Auger-Aliassime F.", rank: 22, country: "Canada" },
    Player { name: "Korda S.", rank: 23, country: "USA" },
    Player { name: "Cerundolo F.", rank: 24, country: "Argentina" },
    Player { name: "Jarry N.", rank: 25, country: "Chile" },
    Player { name: "Bublik A.", rank: 26, country: "Kazakhstan" },
    Player { name: "Mannarino A.", rank: 27, country: "France" },
    Player { name: "Machac T.", rank: 28, country: "Czech Republic" },
    Player { name: "Nakashima B.", rank: 29, country: "USA" },
    Player { name: "Draper J.", rank: 30, country: "Great Britain" },
];

/// Look up a roster player by ATP rank.
pub fn by_rank(rank: u32) -> Option<&'static Player> {
    ROSTER.iter().find(|p| p.rank == rank)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ranks_are_unique_and_contiguous() {
        let mut ranks: Vec<u32> = ROSTER.iter().map(|p| p.rank).collect();
        ranks.sort_unstable();
        assert_eq!(ranks, (1..=30).collect::<Vec<u32>>());
    }

    #[test]
    fn lookup_by_rank() {
        let p = by_rank(1).unwrap();
        assert_eq!(p.name, "Djokovic N.");
        assert_eq!(p.country, "Serbia");

        let p = by_rank(10).unwrap();
        assert_eq!(p.name, "Ruud C.");
    }

    #[test]
    fn lookup_unknown_rank() {
        assert!(by_rank(0).is_none());
        assert!(by_rank(31).is_none());
    }
}
