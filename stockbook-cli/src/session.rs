use std::io::{self, BufRead, Write};
use std::path::Path;

use anyhow::Context;
use chrono::{Local, NaiveDate};
use stockbook_catalog::{Inventory, Product, ProductKind};
use stockbook_store::save_inventory;

const MENU: &str = "\
\nInventory Management
  1. View inventory
  2. Add product
  3. Sell product
  4. Restock product
  5. Remove product
  6. Search by name
  7. Search by type
  8. Low stock report
  9. Remove expired groceries
 10. Save inventory
  0. Save and quit";

/// Interactive menu loop. One operation runs to completion per iteration;
/// every domain error is rendered as a message and the session continues.
pub fn run(inventory: &mut Inventory, file: &Path, low_stock_threshold: i32) -> anyhow::Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();

    loop {
        println!("{MENU}");
        let Some(choice) = prompt(&mut input, "Select an option")? else {
            break;
        };

        // One wall-clock read per operation; everything below takes the
        // date as a plain argument.
        let today = Local::now().date_naive();

        let outcome = match choice.as_str() {
            "1" => {
                view(inventory, today);
                Ok(())
            }
            "2" => add_product(&mut input, inventory, file, today),
            "3" => sell(&mut input, inventory, file),
            "4" => restock(&mut input, inventory, file),
            "5" => remove(&mut input, inventory, file),
            "6" => search_by_name(&mut input, inventory, today),
            "7" => search_by_kind(&mut input, inventory, today),
            "8" => {
                low_stock(inventory, low_stock_threshold);
                Ok(())
            }
            "9" => remove_expired(inventory, file, today),
            "10" => save(inventory, file),
            "0" | "q" => {
                save(inventory, file)?;
                break;
            }
            other => {
                println!("Unknown option: {other}");
                Ok(())
            }
        };

        if let Err(err) = outcome {
            println!("Error: {err}");
        }
    }

    Ok(())
}

fn prompt(input: &mut impl BufRead, label: &str) -> io::Result<Option<String>> {
    print!("{label}: ");
    io::stdout().flush()?;
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None); // EOF
    }
    Ok(Some(line.trim().to_string()))
}

fn ask(input: &mut impl BufRead, label: &str) -> anyhow::Result<String> {
    prompt(input, label)?.context("input ended")
}

fn ask_parsed<T>(input: &mut impl BufRead, label: &str) -> anyhow::Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    let raw = ask(input, label)?;
    raw.parse()
        .map_err(|err| anyhow::anyhow!("invalid value '{raw}': {err}"))
}

fn view(inventory: &Inventory, today: NaiveDate) {
    let products = inventory.list_all();
    if products.is_empty() {
        println!("No products in inventory.");
        return;
    }
    for product in products {
        println!("\n{}", product.describe(today));
    }
    println!("\nTotal inventory value: ${:.2}", inventory.total_value());
}

fn add_product(
    input: &mut impl BufRead,
    inventory: &mut Inventory,
    file: &Path,
    today: NaiveDate,
) -> anyhow::Result<()> {
    let kind: ProductKind = ask_parsed(input, "Product type (Electronics/Grocery/Clothing)")?;
    let id = ask(input, "Product ID")?;
    let name = ask(input, "Product name")?;
    let price: f64 = ask_parsed(input, "Price")?;
    let quantity: i32 = ask_parsed(input, "Quantity")?;

    let product = match kind {
        ProductKind::Electronics => {
            let brand = ask(input, "Brand")?;
            let warranty_years: i32 = ask_parsed(input, "Warranty (years)")?;
            Product::electronics(id, name, price, quantity, brand, warranty_years)?
        }
        ProductKind::Grocery => {
            let expiry_date: NaiveDate = ask_parsed(input, "Expiry date (YYYY-MM-DD)")?;
            Product::grocery(id, name, price, quantity, expiry_date)?
        }
        ProductKind::Clothing => {
            let size = ask(input, "Size")?;
            let material = ask(input, "Material")?;
            Product::clothing(id, name, price, quantity, size, material)?
        }
    };

    let summary = product.describe(today);
    inventory.add(product)?;
    println!("{kind} added:\n{summary}");
    save(inventory, file)
}

fn sell(input: &mut impl BufRead, inventory: &mut Inventory, file: &Path) -> anyhow::Result<()> {
    let id = ask(input, "Product ID")?;
    let quantity: i32 = ask_parsed(input, "Quantity to sell")?;
    inventory.sell(&id, quantity)?;
    println!(
        "Sold {quantity} of '{id}'. Remaining stock: {}",
        inventory.get(&id)?.quantity_in_stock()
    );
    save(inventory, file)
}

fn restock(input: &mut impl BufRead, inventory: &mut Inventory, file: &Path) -> anyhow::Result<()> {
    let id = ask(input, "Product ID")?;
    let quantity: i32 = ask_parsed(input, "Quantity to restock")?;
    inventory.restock(&id, quantity)?;
    println!(
        "Restocked {quantity} of '{id}'. Stock is now {}",
        inventory.get(&id)?.quantity_in_stock()
    );
    save(inventory, file)
}

fn remove(input: &mut impl BufRead, inventory: &mut Inventory, file: &Path) -> anyhow::Result<()> {
    let id = ask(input, "Product ID")?;
    inventory.remove(&id)?;
    println!("Removed '{id}'.");
    save(inventory, file)
}

fn search_by_name(
    input: &mut impl BufRead,
    inventory: &Inventory,
    today: NaiveDate,
) -> anyhow::Result<()> {
    let needle = ask(input, "Name contains")?;
    render_results(inventory.search_by_name(&needle), today);
    Ok(())
}

fn search_by_kind(
    input: &mut impl BufRead,
    inventory: &Inventory,
    today: NaiveDate,
) -> anyhow::Result<()> {
    let kind: ProductKind = ask_parsed(input, "Product type (Electronics/Grocery/Clothing)")?;
    render_results(inventory.search_by_kind(kind), today);
    Ok(())
}

fn render_results(results: Vec<&Product>, today: NaiveDate) {
    if results.is_empty() {
        println!("No products found.");
        return;
    }
    for product in results {
        println!("\n{}", product.describe(today));
    }
}

fn low_stock(inventory: &Inventory, threshold: i32) {
    let products = inventory.low_stock(threshold);
    if products.is_empty() {
        println!("No products at or below {threshold} units.");
        return;
    }
    println!("Products at or below {threshold} units:");
    for product in products {
        println!(
            "  {} ({}): {} in stock",
            product.name(),
            product.id(),
            product.quantity_in_stock()
        );
    }
}

fn remove_expired(inventory: &mut Inventory, file: &Path, today: NaiveDate) -> anyhow::Result<()> {
    let removed = inventory.remove_expired(today);
    if removed.is_empty() {
        println!("No expired products found.");
        return Ok(());
    }
    println!("Removed {} expired products: {}", removed.len(), removed.join(", "));
    save(inventory, file)
}

fn save(inventory: &Inventory, file: &Path) -> anyhow::Result<()> {
    save_inventory(inventory, file)?;
    tracing::info!("saved {} products to {}", inventory.len(), file.display());
    Ok(())
}
