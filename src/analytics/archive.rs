use anyhow::{Context, Result};
use rusqlite::{params, Connection};
use tracing::warn;

/// In-memory SQLite view of the match archive CSV.
#[derive(Debug)]
pub struct MatchArchive {
    conn: Connection,
}

/// Per-surface match count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SurfaceStat {
    pub surface: String,
    pub matches: i64,
}

/// Appearance count for one player.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerActivity {
    pub player: String,
    pub matches: i64,
}

const SCHEMA_SQL: &str = "CREATE TABLE matches (
    surface  TEXT,
    rank_1   INTEGER,
    rank_2   INTEGER,
    player_1 TEXT,
    player_2 TEXT
);";

impl MatchArchive {
    /// Load the archive CSV into an in-memory table.
    ///
    /// Columns are located by header name (`Surface`, `Rank_1`, `Rank_2`,
    /// `Player_1`, `Player_2`); extra columns are ignored, short rows are
    /// skipped with a warning, unparsable ranks load as NULL.
    pub fn load(csv: &str) -> Result<Self> {
        let mut lines = csv.lines();
        let header = lines.next().context("Match archive CSV is empty")?;
        let columns = split_record(header);
        let col = |name: &str| {
            columns
                .iter()
                .position(|c| c == name)
                .with_context(|| format!("Match archive is missing the {} column", name))
        };
        let surface_idx = col("Surface")?;
        let rank1_idx = col("Rank_1")?;
        let rank2_idx = col("Rank_2")?;
        let player1_idx = col("Player_1")?;
        let player2_idx = col("Player_2")?;
        let width = 1 + [surface_idx, rank1_idx, rank2_idx, player1_idx, player2_idx]
            .into_iter()
            .max()
            .unwrap_or(0);

        let mut conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA_SQL)?;

        let tx = conn.transaction()?;
        {
            let mut stmt = tx.prepare(
                "INSERT INTO matches (surface, rank_1, rank_2, player_1, player_2)
                 VALUES (?1, ?2, ?3, ?4, ?5)",
            )?;
            let mut skipped = 0usize;
            for line in lines {
                if line.is_empty() {
                    continue;
                }
                let fields = split_record(line);
                if fields.len() < width {
                    skipped += 1;
                    continue;
                }
                stmt.execute(params![
                    fields[surface_idx],
                    parse_rank(&fields[rank1_idx]),
                    parse_rank(&fields[rank2_idx]),
                    fields[player1_idx],
                    fields[player2_idx],
                ])?;
            }
            if skipped > 0 {
                warn!("Skipped {} malformed archive rows", skipped);
            }
        }
        tx.commit()?;

        Ok(MatchArchive { conn })
    }

    pub fn match_count(&self) -> Result<i64> {
        let count = self
            .conn
            .query_row("SELECT COUNT(*) FROM matches", [], |row| row.get(0))?;
        Ok(count)
    }

    /// Matches per surface among rows where both players carry a positive rank.
    pub fn surface_stats(&self) -> Result<Vec<SurfaceStat>> {
        let mut stmt = self.conn.prepare(
            "SELECT surface, COUNT(*) AS matches
             FROM matches
             WHERE rank_1 > 0 AND rank_2 > 0
             GROUP BY surface
             ORDER BY matches DESC, surface",
        )?;
        let stats = stmt
            .query_map([], |row| {
                Ok(SurfaceStat {
                    surface: row.get(0)?,
                    matches: row.get(1)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(stats)
    }

    /// Most active players by `player_1` appearances among rows with
    /// `rank_1 <= 50`.
    pub fn top_players(&self, limit: u32) -> Result<Vec<PlayerActivity>> {
        let mut stmt = self.conn.prepare(
            "SELECT player_1 AS player, COUNT(*) AS matches
             FROM matches
             WHERE rank_1 <= 50
             GROUP BY player_1
             ORDER BY matches DESC, player
             LIMIT ?1",
        )?;
        let players = stmt
            .query_map(params![limit], |row| {
                Ok(PlayerActivity {
                    player: row.get(0)?,
                    matches: row.get(1)?,
                })
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(players)
    }
}

/// Ranks appear as integers, floats ("4.0") or blanks depending on the
/// archive vintage. Anything unparsable becomes NULL.
fn parse_rank(field: &str) -> Option<i64> {
    let field = field.trim();
    field
        .parse::<i64>()
        .ok()
        .or_else(|| field.parse::<f64>().ok().map(|v| v as i64))
}

// Split one CSV record, honouring double-quoted fields with embedded commas
// and doubled quotes. A local helper rather than another dep.
fn split_record(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut in_quotes = false;
    let mut chars = line.chars().peekable();
    while let Some(c) = chars.next() {
        match c {
            '"' if in_quotes => {
                if chars.peek() == Some(&'"') {
                    chars.next();
                    field.push('"');
                } else {
                    in_quotes = false;
                }
            }
            '"' => in_quotes = true,
            ',' if !in_quotes => fields.push(std::mem::take(&mut field)),
            c => field.push(c),
        }
    }
    fields.push(field);
    fields
}
