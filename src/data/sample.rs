//! Bundled sample catalog.
//!
//! The dashboard ships with a small, fixed set of ecaytrade.com listings so it
//! works without a feed. The listings' fair prices double as comparable prices
//! for the estimator (see `CarListing::to_record`).

use chrono::NaiveDate;

use crate::domain::{CarListing, Condition, DealRating, FuelType, PriceTrendPoint, Transmission};

/// The bundled dashboard listings, in catalog order.
pub fn sample_listings() -> Vec<CarListing> {
    vec![
        row("1", "Toyota", "Camry", 2022, 28500.0, 15000.0, 27000.0, (2026, 2, 10), Condition::Excellent, Transmission::Automatic, FuelType::Gasoline, "Sedan", DealRating::FairDeal),
        row("2", "Honda", "CR-V", 2021, 31200.0, 22000.0, 32500.0, (2026, 2, 8), Condition::Good, Transmission::Automatic, FuelType::Gasoline, "SUV", DealRating::GreatDeal),
        row("3", "Toyota", "Tacoma", 2020, 35800.0, 30000.0, 34000.0, (2026, 2, 12), Condition::Good, Transmission::Automatic, FuelType::Gasoline, "Truck", DealRating::Overpriced),
        row("4", "BMW", "X3", 2021, 42000.0, 18000.0, 41500.0, (2026, 2, 5), Condition::Excellent, Transmission::Automatic, FuelType::Gasoline, "SUV", DealRating::FairDeal),
        row("5", "Honda", "Civic", 2023, 24500.0, 8000.0, 25000.0, (2026, 2, 14), Condition::Excellent, Transmission::Automatic, FuelType::Gasoline, "Sedan", DealRating::GreatDeal),
        row("6", "Ford", "F-150", 2019, 38000.0, 45000.0, 36000.0, (2026, 1, 28), Condition::Good, Transmission::Automatic, FuelType::Gasoline, "Truck", DealRating::Overpriced),
        row("7", "Mercedes", "C-Class", 2022, 45000.0, 12000.0, 44000.0, (2026, 2, 1), Condition::Excellent, Transmission::Automatic, FuelType::Gasoline, "Sedan", DealRating::FairDeal),
        row("8", "Toyota", "RAV4", 2021, 29800.0, 25000.0, 30500.0, (2026, 2, 11), Condition::Good, Transmission::Automatic, FuelType::Hybrid, "SUV", DealRating::GreatDeal),
        row("9", "Nissan", "Altima", 2020, 19500.0, 35000.0, 20000.0, (2026, 1, 20), Condition::Fair, Transmission::Automatic, FuelType::Gasoline, "Sedan", DealRating::GreatDeal),
        row("10", "Jeep", "Wrangler", 2022, 48000.0, 10000.0, 46500.0, (2026, 2, 15), Condition::Excellent, Transmission::Automatic, FuelType::Gasoline, "SUV", DealRating::FairDeal),
        row("11", "Hyundai", "Tucson", 2023, 27500.0, 5000.0, 28000.0, (2026, 2, 13), Condition::Excellent, Transmission::Automatic, FuelType::Hybrid, "SUV", DealRating::GreatDeal),
        row("12", "Chevrolet", "Silverado", 2020, 36500.0, 40000.0, 35000.0, (2026, 1, 15), Condition::Good, Transmission::Automatic, FuelType::Gasoline, "Truck", DealRating::FairDeal),
        row("13", "Audi", "Q5", 2021, 40500.0, 20000.0, 41000.0, (2026, 2, 7), Condition::Good, Transmission::Automatic, FuelType::Gasoline, "SUV", DealRating::GreatDeal),
        row("14", "Toyota", "Corolla", 2023, 21000.0, 6000.0, 21500.0, (2026, 2, 16), Condition::Excellent, Transmission::Automatic, FuelType::Gasoline, "Sedan", DealRating::GreatDeal),
        row("15", "Honda", "Accord", 2022, 29000.0, 14000.0, 28500.0, (2026, 2, 9), Condition::Excellent, Transmission::Automatic, FuelType::Gasoline, "Sedan", DealRating::FairDeal),
        row("16", "Ford", "Explorer", 2021, 37500.0, 28000.0, 38000.0, (2026, 1, 25), Condition::Good, Transmission::Automatic, FuelType::Gasoline, "SUV", DealRating::GreatDeal),
        row("17", "Lexus", "RX 350", 2022, 52000.0, 11000.0, 51000.0, (2026, 2, 4), Condition::Excellent, Transmission::Automatic, FuelType::Gasoline, "SUV", DealRating::FairDeal),
        row("18", "Kia", "Sportage", 2023, 26000.0, 7000.0, 26500.0, (2026, 2, 17), Condition::Excellent, Transmission::Automatic, FuelType::Hybrid, "SUV", DealRating::GreatDeal),
        row("19", "Nissan", "Rogue", 2021, 26500.0, 24000.0, 27000.0, (2026, 2, 6), Condition::Good, Transmission::Automatic, FuelType::Gasoline, "SUV", DealRating::GreatDeal),
        row("20", "Toyota", "4Runner", 2020, 42000.0, 35000.0, 40000.0, (2026, 1, 30), Condition::Good, Transmission::Automatic, FuelType::Gasoline, "SUV", DealRating::Overpriced),
        row("21", "Volkswagen", "Tiguan", 2022, 28000.0, 16000.0, 28500.0, (2026, 2, 3), Condition::Good, Transmission::Automatic, FuelType::Gasoline, "SUV", DealRating::GreatDeal),
        row("22", "Subaru", "Outback", 2022, 30000.0, 19000.0, 30500.0, (2026, 2, 2), Condition::Good, Transmission::Automatic, FuelType::Gasoline, "SUV", DealRating::GreatDeal),
        row("23", "Mazda", "CX-5", 2023, 29500.0, 4000.0, 30000.0, (2026, 2, 18), Condition::Excellent, Transmission::Automatic, FuelType::Gasoline, "SUV", DealRating::GreatDeal),
        row("24", "BMW", "3 Series", 2021, 38000.0, 21000.0, 37000.0, (2026, 1, 22), Condition::Good, Transmission::Automatic, FuelType::Gasoline, "Sedan", DealRating::FairDeal),
    ]
}

/// Monthly average/median price and listing counts for the trend charts.
pub fn sample_price_trends() -> Vec<PriceTrendPoint> {
    [
        ("Sep", 33200.0, 30500.0, 145),
        ("Oct", 33800.0, 31000.0, 162),
        ("Nov", 32900.0, 30200.0, 138),
        ("Dec", 32100.0, 29800.0, 120),
        ("Jan", 33500.0, 31200.0, 175),
        ("Feb", 34100.0, 31800.0, 189),
    ]
    .into_iter()
    .map(|(month, avg_price, median_price, listings)| PriceTrendPoint {
        month: month.to_string(),
        avg_price,
        median_price,
        listings,
    })
    .collect()
}

#[allow(clippy::too_many_arguments)]
fn row(
    id: &str,
    make: &str,
    model: &str,
    year: i32,
    price: f64,
    mileage: f64,
    fair_price: f64,
    listed: (i32, u32, u32),
    condition: Condition,
    transmission: Transmission,
    fuel_type: FuelType,
    body_type: &str,
    deal_rating: DealRating,
) -> CarListing {
    let (y, m, d) = listed;
    CarListing {
        id: id.to_string(),
        make: make.to_string(),
        model: model.to_string(),
        year,
        price,
        mileage,
        fair_price,
        listed_date: NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
        condition,
        transmission,
        fuel_type,
        body_type: body_type.to_string(),
        deal_rating,
    }
}
