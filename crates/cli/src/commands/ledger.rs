use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use chrono::{Local, NaiveDate};
use cloud_hunter_service::RecordOutcome;

use super::open_ledger;

pub(crate) async fn classify(image: &Path) -> Result<()> {
    let bytes =
        std::fs::read(image).with_context(|| format!("cannot read {}", image.display()))?;
    let ledger = open_ledger(true)?;
    let outcome = match ledger.classify_upload(bytes).await {
        Ok(outcome) => outcome,
        Err(e) => anyhow::bail!("{}", e.user_message()),
    };
    if let RecordOutcome::Duplicate(existing) = &outcome {
        eprintln!("Already recorded as #{} ({})", existing.entry.id, existing.entry.cloud_name);
    }
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    Ok(())
}

pub(crate) fn stats() -> Result<()> {
    let dashboard = open_ledger(false)?.dashboard()?;
    println!("{}", serde_json::to_string_pretty(&dashboard)?);
    Ok(())
}

pub(crate) fn gallery() -> Result<()> {
    let gallery = open_ledger(false)?.gallery()?;
    println!("{}", serde_json::to_string_pretty(&gallery)?);
    Ok(())
}

pub(crate) fn history(name: &str) -> Result<()> {
    let rows = open_ledger(false)?.species_history(name)?;
    if rows.is_empty() {
        eprintln!("No sightings of {name}");
    }
    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}

pub(crate) fn repair() -> Result<()> {
    let report = open_ledger(false)?.repair_all()?;
    println!("{}", report.message());
    Ok(())
}

pub(crate) fn delete(id: i64, confirmed: bool) -> Result<()> {
    if !confirmed {
        anyhow::bail!("refusing to delete #{id} without --yes");
    }
    open_ledger(false)?.delete_observation(id)?;
    println!("Deleted #{id}");
    Ok(())
}

pub(crate) fn card(id: i64, out: Option<PathBuf>, date: Option<&str>) -> Result<()> {
    let date = match date {
        Some(raw) => NaiveDate::parse_from_str(raw, "%Y-%m-%d")
            .with_context(|| format!("invalid date '{raw}', expected YYYY-MM-DD"))?,
        None => Local::now().date_naive(),
    };
    let png = open_ledger(false)?.share_card(id, date)?;
    let out = out.unwrap_or_else(|| PathBuf::from(format!("cloud_card_{id}.png")));
    std::fs::write(&out, png)?;
    println!("{}", out.display());
    Ok(())
}

pub(crate) fn backup(out: Option<PathBuf>) -> Result<()> {
    let bytes = open_ledger(false)?.backup()?;
    let out = out.unwrap_or_else(|| {
        PathBuf::from(format!("cloud_collection_{}.db", Local::now().format("%Y%m%d")))
    });
    std::fs::write(&out, bytes)?;
    println!("{}", out.display());
    Ok(())
}
