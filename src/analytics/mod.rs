//! One-shot batch analytics over the S3 match archive.
//!
//! Linear sequence: resolve AWS config from the environment, download the
//! CSV, load it into in-memory SQLite, run the fixed queries, print. Any
//! failure fails the whole run.

use anyhow::{Context, Result};
use aws_sdk_s3::config::Region;
use tracing::info;

use crate::config::AnalyzeConfig;

pub mod archive;
pub use archive::MatchArchive;

pub async fn run(config: &AnalyzeConfig) -> Result<()> {
    let aws_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new(config.region.clone()))
        .load()
        .await;
    // Presence only; never the values.
    info!(
        "AWS credentials resolved: {}",
        aws_config.credentials_provider().is_some()
    );

    let s3 = aws_sdk_s3::Client::new(&aws_config);
    let csv = fetch_archive(&s3, &config.bucket, &config.key).await?;
    info!(
        "Fetched s3://{}/{} ({} bytes)",
        config.bucket,
        config.key,
        csv.len()
    );

    let db = MatchArchive::load(&csv)?;
    info!("Loaded {} matches", db.match_count()?);

    let stats = db.surface_stats()?;
    println!("Matches by surface (both players ranked):");
    println!("{:<12} {:>8}", "Surface", "Matches");
    for row in &stats {
        println!("{:<12} {:>8}", row.surface, row.matches);
    }
    let total: i64 = stats.iter().map(|row| row.matches).sum();
    println!("{:<12} {:>8}", "Total", total);

    println!();
    println!("Most active players (rank <= 50):");
    println!("{:<24} {:>8}", "Player", "Matches");
    for row in db.top_players(config.top_players)? {
        println!("{:<24} {:>8}", row.player, row.matches);
    }

    Ok(())
}

async fn fetch_archive(s3: &aws_sdk_s3::Client, bucket: &str, key: &str) -> Result<String> {
    let resp = s3
        .get_object()
        .bucket(bucket)
        .key(key)
        .send()
        .await
        .with_context(|| format!("Failed to fetch s3://{}/{}", bucket, key))?;
    let bytes = resp
        .body
        .collect()
        .await
        .context("Failed to read match archive body")?
        .into_bytes();
    String::from_utf8(bytes.to_vec()).context("Match archive is not valid UTF-8")
}
