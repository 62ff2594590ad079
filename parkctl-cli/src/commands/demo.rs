//! Demo command - scripted walkthrough of the parking rules
//!
//! Registers a few vehicles, charges an exit, shows the duplicate-plate
//! and full-facility rejections, then prints the final occupancy. Runs
//! against a throwaway in-memory store unless `--database-url` is given.

use std::time::Duration;

use anyhow::{bail, Result};
use clap::Parser;

use parkctl_core::{NewVehicle, ParkctlConfig, ParkingError};
use parkctl_server::ServiceError;

use super::vehicles::{open_service, print_info, print_table, StoreArgs};

const DEMO_VEHICLES: [(&str, &str, &str); 3] = [
    ("ABC1234", "Honda Civic", "Branco"),
    ("DEF5678", "Toyota Corolla", "Prata"),
    ("GHI9012", "Volkswagen Gol", "Azul"),
];

/// Extra entries attempted when filling the facility
const FILL_ATTEMPTS: u32 = 15;

#[derive(Parser, Debug)]
pub struct DemoArgs {
    /// Seconds to wait between the entries and the first exit
    #[arg(long, default_value_t = 3)]
    pub wait_secs: u64,

    /// Database URL (default: in-memory)
    #[arg(long)]
    pub database_url: Option<String>,

    /// Number of parking slots (overrides config/PARKCTL_CAPACITY)
    #[arg(long)]
    pub capacity: Option<u32>,
}

pub async fn run_demo(settings: ParkctlConfig, args: DemoArgs) -> Result<()> {
    let store = StoreArgs {
        database_url: Some(
            args.database_url
                .unwrap_or_else(|| "sqlite::memory:".to_string()),
        ),
        capacity: args.capacity,
        json: false,
    };
    let service = open_service(settings, &store).await?;

    println!("=== parkctl demo (capacity {}) ===", service.capacity());

    println!("\n1. Registering entries");
    let mut ids = Vec::new();
    for (plate, model, color) in DEMO_VEHICLES {
        let record = service
            .register_entry(NewVehicle::new(plate, model, color)?)
            .await?;
        println!("   entry registered: {} (id {})", record.plate, record.id);
        ids.push(record.id);
    }

    println!("\n2. Parked vehicles");
    print_table(&service.list_active().await?);

    println!("\n3. Occupancy");
    print_info(&service.info().await?);

    println!("\n4. Waiting {} seconds", args.wait_secs);
    tokio::time::sleep(Duration::from_secs(args.wait_secs)).await;

    println!("\n5. Registering exit");
    let exited = service.register_exit(ids[0]).await?;
    if let Some(fee) = exited.fee_paid {
        println!("   exit registered: {}, amount due: {fee}", exited.plate);
    }

    println!("\n6. Entering an already parked plate");
    let (plate, _, _) = DEMO_VEHICLES[1];
    match service
        .register_entry(NewVehicle::new(plate, "Fiat Uno", "Preto")?)
        .await
    {
        Err(ServiceError::Parking(e @ ParkingError::DuplicatePlate { .. })) => {
            println!("   rejected as expected: {e}");
        }
        Err(e) => return Err(e.into()),
        Ok(record) => bail!("duplicate entry for {} was accepted", record.plate),
    }

    println!("\n7. Looking up {}", DEMO_VEHICLES[2].0);
    match service.find_by_plate(DEMO_VEHICLES[2].0).await? {
        Some(r) => println!("   found: {} - parked: {}", r.plate, r.active),
        None => println!("   not found"),
    }

    println!("\n8. All records");
    print_table(&service.list_all().await?);

    println!("\n9. Filling the facility");
    let mut rejected = false;
    for i in 1..=FILL_ATTEMPTS {
        let plate = format!("TST{i:04}");
        let vehicle = NewVehicle::new(&plate, &format!("Test {i}"), &format!("Color {i}"))?;
        match service.register_entry(vehicle).await {
            Ok(record) => println!("   entry registered: {}", record.plate),
            Err(ServiceError::Parking(e @ ParkingError::CapacityExceeded { .. })) => {
                println!("   limit reached: {e}");
                rejected = true;
                break;
            }
            Err(e) => return Err(e.into()),
        }
    }
    if !rejected {
        println!("   capacity not reached after {FILL_ATTEMPTS} entries");
    }

    let info = service.info().await?;
    println!(
        "\n=== Final occupancy: {}/{} ===",
        info.active_count, info.total_capacity
    );

    Ok(())
}
