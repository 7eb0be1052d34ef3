//! # Seed Data Generator
//!
//! Populates the database with a handful of sample horses for development.
//!
//! ## Usage
//! ```bash
//! # Seed ./horses.db
//! cargo run -p paddock-db --bin seed
//!
//! # Specify database path
//! cargo run -p paddock-db --bin seed -- --db ./data/horses.db
//! ```
//!
//! Seeded horses have no image. The list page shows a placeholder for them
//! until an image is uploaded through the edit form.

use std::env;

use paddock_core::NewHorse;
use paddock_db::{Database, DbConfig};

/// (name, description, price)
const HORSES: &[(&str, &str, f64)] = &[
    ("Bella", "Bay mare, 8 years, calm on trails", 1200.0),
    ("Thunder", "Black gelding, 6 years, show jumper", 4500.0),
    ("Maple", "Chestnut Morgan mare, 12 years, kid safe", 2300.0),
    ("Ghost", "Grey Arabian stallion, 5 years", 7800.0),
    ("Biscuit", "Palomino pony, 15 years, lesson horse", 950.0),
];

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();

    let mut db_path = String::from("./horses.db");

    let mut i = 1;
    while i < args.len() {
        match args[i].as_str() {
            "--db" | "-d" => {
                if i + 1 < args.len() {
                    db_path = args[i + 1].clone();
                    i += 1;
                }
            }
            "--help" | "-h" => {
                println!("Paddock Seed Data Generator");
                println!();
                println!("Usage: seed [OPTIONS]");
                println!();
                println!("Options:");
                println!("  -d, --db <PATH>    Database file path (default: ./horses.db)");
                println!("  -h, --help         Show this help message");
                return Ok(());
            }
            _ => {}
        }
        i += 1;
    }

    println!("🐴 Paddock Seed Data Generator");
    println!("==============================");
    println!("Database: {}", db_path);
    println!();

    let db = Database::open(DbConfig::new(&db_path)).await?;

    println!("✓ Connected to database");
    println!("✓ Migrations applied");

    let existing = db.horses().count().await?;
    if existing > 0 {
        println!("⚠ Database already has {} horses", existing);
        println!("  Skipping seed to avoid duplicates.");
        println!("  Delete the database file to regenerate.");
        return Ok(());
    }

    println!();
    let mut generated = 0;
    for (name, description, price) in HORSES {
        let horse = NewHorse {
            name: name.to_string(),
            description: description.to_string(),
            price: *price,
            image: None,
        };

        match db.horses().insert(&horse).await {
            Ok(stored) => {
                println!("  #{:<3} {}", stored.id, stored.name);
                generated += 1;
            }
            Err(e) => eprintln!("Failed to insert {}: {}", name, e),
        }
    }

    println!();
    println!("✓ Seeded {} horses", generated);

    db.close().await;
    Ok(())
}
