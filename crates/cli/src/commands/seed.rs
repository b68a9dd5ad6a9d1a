//! Seed the database with demo users and catalog products.
//!
//! # Usage
//!
//! ```bash
//! shoplite-cli seed
//! ```
//!
//! Seeding is additive. Users that already exist are skipped; products are
//! inserted as-is (run `cleanup` first for a fresh catalog).

use rust_decimal::Decimal;

use shoplite_core::{Email, Role};
use shoplite_server::db::RepositoryError;
use shoplite_server::db::products::{NewProduct, ProductRepository};
use shoplite_server::db::users::{NewUser, UserRepository};
use shoplite_server::services::auth::hash_password;

use super::{CliError, connect};

/// Demo accounts: (name, email, password).
const USERS: &[(&str, &str, &str)] = &[
    ("Alice", "alice@example.com", "password1"),
    ("Bob", "bob@example.com", "password2"),
    ("Charlie", "charlie@example.com", "password3"),
    ("Diana", "diana@example.com", "password4"),
];

/// Demo catalog: (name, description, category, price).
const PRODUCTS: &[(&str, &str, &str, &str)] = &[
    ("Laptop", "A high-end gaming laptop", "Electronics", "1500.99"),
    ("Smartphone", "Latest model with excellent camera", "Electronics", "999.99"),
    ("Headphones", "Noise-canceling headphones", "Audio", "199.99"),
    ("Smartwatch", "Track your fitness and notifications", "Wearable", "299.99"),
    ("Camera", "Professional DSLR camera", "Photography", "1200.00"),
    ("Tablet", "Portable and powerful tablet", "Electronics", "400.00"),
    ("Desk Lamp", "LED lamp with adjustable brightness", "Home", "29.99"),
    ("Backpack", "Durable and stylish backpack", "Accessories", "49.99"),
    ("Gaming Mouse", "Precision mouse with RGB lighting", "Electronics", "59.99"),
    ("Mechanical Keyboard", "Tactile and durable keyboard", "Electronics", "89.99"),
    ("Coffee Maker", "Brew the perfect cup of coffee", "Kitchen", "79.99"),
    ("Microwave", "Compact microwave with quick heat settings", "Kitchen", "149.99"),
    ("Vacuum Cleaner", "High suction vacuum cleaner", "Home", "199.99"),
    ("Blender", "High-speed blender for smoothies", "Kitchen", "69.99"),
    ("Yoga Mat", "Non-slip yoga mat", "Fitness", "25.99"),
    ("Treadmill", "Electric treadmill for indoor workouts", "Fitness", "599.99"),
    ("Camping Tent", "Spacious tent for 4 people", "Outdoor", "129.99"),
    ("Binoculars", "High-quality binoculars for outdoor adventures", "Outdoor", "89.99"),
    ("Electric Scooter", "Eco-friendly electric scooter", "Transportation", "450.00"),
    ("Mountain Bike", "Durable bike for off-road trails", "Fitness", "850.00"),
];

/// Seed demo users and products.
///
/// # Errors
///
/// Returns `CliError` if the connection or an insert fails.
pub async fn run() -> Result<(), CliError> {
    let pool = connect().await?;
    let users = UserRepository::new(&pool);
    let products = ProductRepository::new(&pool);

    let mut users_inserted = 0;
    for &(name, email, password) in USERS {
        let email = Email::parse(email).map_err(|e| CliError::InvalidArgument(e.to_string()))?;
        let password_hash =
            hash_password(password).map_err(|e| CliError::InvalidArgument(e.to_string()))?;

        match users
            .create(&NewUser {
                name,
                email: &email,
                password_hash: &password_hash,
                role: Role::User,
            })
            .await
        {
            Ok(_) => users_inserted += 1,
            Err(RepositoryError::Conflict(_)) => {
                tracing::warn!("User {name} already exists, skipping");
            }
            Err(e) => return Err(e.into()),
        }
    }
    tracing::info!("{users_inserted} users inserted");

    for &(name, description, category, price) in PRODUCTS {
        let price = price
            .parse::<Decimal>()
            .map_err(|e| CliError::InvalidArgument(format!("bad price for {name}: {e}")))?;

        products
            .create(&NewProduct {
                name,
                description,
                category,
                price,
            })
            .await?;
    }
    tracing::info!("{} products inserted", PRODUCTS.len());

    Ok(())
}
