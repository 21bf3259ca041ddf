// ============================================================================
// Basic Usage Example
// ============================================================================

use ledger_money::prelude::*;
use rust_decimal::Decimal;
use std::sync::Arc;

#[tokio::main(flavor = "current_thread")]
async fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    #[cfg(feature = "logging")]
    ledger_money::utils::init_logging();

    println!("=== Ledger Money Example ===\n");

    // Asset source with a few well-known assets
    let source = StaticAssetSource::with_native()
        .with_asset(AssetDescriptor::new("EIGHT", "Eight Precision Token", 8)?)
        .with_asset(AssetDescriptor::new("FOUR", "Four Precision Token", 4)?);

    let registry = AssetRegistryBuilder::new(Arc::new(source))
        .testnet()
        .with_event_handler(Arc::new(LoggingEventHandler))
        .build()?;

    println!("Created registry for {:?}\n", registry.network());

    // Construct from tokens and coins
    println!("Constructing amounts...");
    let a = Money::from_tokens("1.1", "WAVES", &registry).await?;
    let b = Money::from_coins("190000000", "WAVES", &registry).await?;
    println!("  a = {}", a);
    println!("  b = {}", b);

    // Excess digits are dropped
    let precise = Money::from_tokens("10.1234567890", "WAVES", &registry).await?;
    println!("  10.1234567890 WAVES -> {} coins", precise.to_coins());

    // Arithmetic
    println!("\n=== Arithmetic ===");
    let sum = a.add(&b)?;
    println!("  a + b = {}", sum);
    println!("  a - b = {}", a.sub(&b)?);

    // Numbers are refused
    match Money::from_tokens(10.5, "WAVES", &registry).await {
        Err(err) => println!("  10.5 (f64) rejected: {}", err),
        Ok(money) => println!("  unexpectedly accepted {}", money),
    }

    // Conversion
    println!("\n=== Conversion ===");
    let four = registry.resolve("FOUR").await?;
    let converted = Money::convert(sum.clone(), &four, Decimal::new(25, 2))?;
    println!("  {} at 0.25 -> {}", sum, converted);

    // Mixed assets are an error
    match sum.add(&converted) {
        Err(err) => println!("  {} + {} rejected: {}", sum, converted, err),
        Ok(total) => println!("  unexpectedly added to {}", total),
    }

    // JSON
    println!("\n=== Serialization ===");
    let json = serde_json::to_string(&converted)?;
    println!("  {}", json);

    println!(
        "\nRegistry: {} cached, {} fetches issued",
        registry.len(),
        registry.fetches_issued()
    );

    Ok(())
}
