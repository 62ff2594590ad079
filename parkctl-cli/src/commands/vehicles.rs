//! Store commands - entry, exit, list, lookup, info
//!
//! Operate on the configured SQLite store directly, without the HTTP server.
//! Every command prints a short human summary, or JSON with `--json`.

use anyhow::{Context, Result};
use chrono::{DateTime, Local, Utc};
use clap::Parser;
use serde::Serialize;

use parkctl_core::{NewVehicle, ParkctlConfig, ParkingInfo, RecordId, VehicleRecord};
use parkctl_server::{db, ParkingService};

/// Store selection shared by all store commands
#[derive(Parser, Debug, Clone, Default)]
pub struct StoreArgs {
    /// Database URL (overrides config/DATABASE_URL)
    #[arg(long)]
    pub database_url: Option<String>,

    /// Number of parking slots (overrides config/PARKCTL_CAPACITY)
    #[arg(long)]
    pub capacity: Option<u32>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Parser, Debug)]
pub struct EntryArgs {
    /// License plate (case-insensitive)
    pub plate: String,

    /// Vehicle model, e.g. "Honda Civic"
    #[arg(long)]
    pub model: String,

    /// Vehicle color
    #[arg(long)]
    pub color: String,

    #[command(flatten)]
    pub store: StoreArgs,
}

#[derive(Parser, Debug)]
pub struct ExitArgs {
    /// Record ID returned by `parkctl entry`
    pub id: RecordId,

    #[command(flatten)]
    pub store: StoreArgs,
}

#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Only vehicles currently parked
    #[arg(long)]
    pub active: bool,

    #[command(flatten)]
    pub store: StoreArgs,
}

#[derive(Parser, Debug)]
pub struct LookupArgs {
    /// License plate (case-insensitive)
    pub plate: String,

    #[command(flatten)]
    pub store: StoreArgs,
}

#[derive(Parser, Debug)]
pub struct InfoArgs {
    #[command(flatten)]
    pub store: StoreArgs,
}

/// Open the store with CLI overrides applied on top of `settings`.
pub async fn open_service(mut settings: ParkctlConfig, store: &StoreArgs) -> Result<ParkingService> {
    if let Some(url) = &store.database_url {
        settings.database.url = url.clone();
    }
    if let Some(capacity) = store.capacity {
        settings.parking.capacity = capacity;
    }
    settings.validate()?;

    tracing::debug!(database = %settings.database.url, "opening store");
    let pool = db::connect(&settings.database.url)
        .await
        .context(format!("Failed to open database {}", settings.database.url))?;

    Ok(ParkingService::new(pool, &settings.parking))
}

pub async fn run_entry(settings: ParkctlConfig, args: EntryArgs) -> Result<()> {
    let service = open_service(settings, &args.store).await?;
    let vehicle = NewVehicle::new(&args.plate, &args.model, &args.color)?;
    let record = service.register_entry(vehicle).await?;

    if args.store.json {
        return print_json(&record);
    }
    println!("✅ Entry registered");
    print_record(&record);
    Ok(())
}

pub async fn run_exit(settings: ParkctlConfig, args: ExitArgs) -> Result<()> {
    let service = open_service(settings, &args.store).await?;
    let record = service.register_exit(args.id).await?;

    if args.store.json {
        return print_json(&record);
    }
    println!("✅ Exit registered");
    print_record(&record);
    if let Some(fee) = record.fee_paid {
        println!("   Amount due: {fee}");
    }
    Ok(())
}

pub async fn run_list(settings: ParkctlConfig, args: ListArgs) -> Result<()> {
    let service = open_service(settings, &args.store).await?;
    let records = if args.active {
        service.list_active().await?
    } else {
        service.list_all().await?
    };

    if args.store.json {
        return print_json(&records);
    }
    if records.is_empty() {
        println!("No vehicles");
        return Ok(());
    }
    print_table(&records);
    Ok(())
}

pub async fn run_lookup(settings: ParkctlConfig, args: LookupArgs) -> Result<()> {
    let service = open_service(settings, &args.store).await?;
    let record = service
        .find_by_plate(&args.plate)
        .await?
        .with_context(|| format!("No vehicle with plate {}", args.plate.trim().to_uppercase()))?;

    if args.store.json {
        return print_json(&record);
    }
    print_record(&record);
    Ok(())
}

pub async fn run_info(settings: ParkctlConfig, args: InfoArgs) -> Result<()> {
    let service = open_service(settings, &args.store).await?;
    let info = service.info().await?;

    if args.store.json {
        return print_json(&info);
    }
    print_info(&info);
    Ok(())
}

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn local(ts: DateTime<Utc>) -> String {
    ts.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string()
}

pub(crate) fn print_record(r: &VehicleRecord) {
    println!("   #{} {} - {} ({})", r.id, r.plate, r.model, r.color);
    println!("   Entry: {}", local(r.entry_at));
    match (r.exit_at, r.fee_paid) {
        (Some(exit_at), Some(fee)) => println!("   Exit:  {} (paid {fee})", local(exit_at)),
        _ => println!("   Parked for {} min", r.stay_duration(Utc::now()).num_minutes()),
    }
}

pub(crate) fn print_table(records: &[VehicleRecord]) {
    println!(
        "{:>4}  {:<8}  {:<20}  {:<10}  {:<19}  {:<19}  {:>7}",
        "ID", "PLATE", "MODEL", "COLOR", "ENTRY", "EXIT", "FEE"
    );
    for r in records {
        println!(
            "{:>4}  {:<8}  {:<20}  {:<10}  {:<19}  {:<19}  {:>7}",
            r.id,
            r.plate,
            truncate(&r.model, 20),
            truncate(&r.color, 10),
            local(r.entry_at),
            r.exit_at.map(local).unwrap_or_else(|| "-".into()),
            r.fee_paid.map(|f| f.to_string()).unwrap_or_else(|| "-".into()),
        );
    }
}

pub(crate) fn print_info(info: &ParkingInfo) {
    println!("🅿️  Capacity:  {}", info.total_capacity);
    println!("   Parked:    {}", info.active_count);
    println!("   Available: {}", info.available_slots);
    if !info.has_space {
        println!("   ⚠ Facility is full");
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{head}…")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_keeps_short_text() {
        assert_eq!(truncate("Gol", 10), "Gol");
    }

    #[test]
    fn truncate_counts_chars() {
        assert_eq!(truncate("Volkswagen Gol", 8), "Volkswa…");
        assert_eq!(truncate("Ônibus Ônibus", 6).chars().count(), 6);
    }

    #[tokio::test]
    async fn open_service_applies_overrides() {
        let store = StoreArgs {
            database_url: Some("sqlite::memory:".into()),
            capacity: Some(3),
            json: false,
        };
        let service = open_service(ParkctlConfig::default(), &store).await.unwrap();
        assert_eq!(service.capacity(), 3);
    }

    #[tokio::test]
    async fn open_service_rejects_zero_capacity() {
        let store = StoreArgs {
            database_url: Some("sqlite::memory:".into()),
            capacity: Some(0),
            json: false,
        };
        assert!(open_service(ParkctlConfig::default(), &store).await.is_err());
    }
}
