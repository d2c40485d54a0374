use anyhow::{Context, Result};
use jcrew_product_scraper::extract_product;
use std::env;
use std::fs;
use std::path::Path;

fn main() -> Result<()> {
    env_logger::init();

    // Get snapshot path and optional test name from command line arguments
    let args: Vec<String> = env::args().collect();

    if args.len() < 2 {
        eprintln!("Please provide a snapshot file to inspect");
        eprintln!("Usage: cargo run --bin inspect_snapshot <SNAPSHOT> [test_name]");
        std::process::exit(1);
    }

    let snapshot_path = Path::new(&args[1]);
    let test_name = args.get(2);

    let bytes = fs::read(snapshot_path)
        .with_context(|| format!("Failed to read snapshot {}", snapshot_path.display()))?;
    let html = String::from_utf8_lossy(&bytes);

    // Check for the contract's candidate markup locations
    use scraper::{Html, Selector};

    let document = Html::parse_document(&html);
    let prod_name_selector = Selector::parse("#product-detail h1.prod-name").unwrap();
    let has_prod_name = document.select(&prod_name_selector).next().is_some();

    let prodtitle_selector = Selector::parse("td.prodtitle").unwrap();
    let has_legacy_title = document.select(&prodtitle_selector).next().is_some();

    let sale_selector = Selector::parse("#product-detail span.price-sale").unwrap();
    let has_sale_price = document.select(&sale_selector).next().is_some();

    let list_selector = Selector::parse("#product-detail span.price-list").unwrap();
    let has_list_price = document.select(&list_selector).next().is_some();

    let image_selector = Selector::parse("img#prod-image").unwrap();
    let has_prod_image = document.select(&image_selector).next().is_some();

    println!("Snapshot analysis results:");
    println!("  - Has product name node: {}", has_prod_name);
    println!("  - Has legacy title cell: {}", has_legacy_title);
    println!("  - Has sale price: {}", has_sale_price);
    println!("  - Has list price: {}", has_list_price);
    println!("  - Has product image: {}", has_prod_image);

    // Now try the actual extractor
    match extract_product(&bytes, "text/html", "file://inspect") {
        Ok(record) => {
            println!("Extraction succeeded:");
            println!("  title: {}", record.title);
            println!("  price: {:.2}", record.price);
            println!("  image: {}", record.image_url);
        }
        Err(e) => {
            println!("Extraction failed: {}", e);

            if let Some(name) = test_name {
                // Save the snapshot so the regression tests pick it up
                let failures_dir = Path::new("src/tests/fixtures/failures");
                fs::create_dir_all(failures_dir)
                    .context("Failed to create failures directory")?;

                let file_path = failures_dir.join(format!("{}.html", name));
                fs::write(&file_path, &bytes).context("Failed to write snapshot copy")?;

                println!(
                    "Saved snapshot to {} for regression testing",
                    file_path.display()
                );
            }
        }
    }

    Ok(())
}
