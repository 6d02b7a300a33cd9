//! Line-oriented register driver.
//!
//! Reads codes from stdin as if they came off the scanner and prints the
//! cart after every operation. Commands:
//!
//! ```text
//! <code>             scan a product code
//! qty <prd_id> <n>   set the selected line's quantity
//! rm <prd_id>        remove a line
//! sel <prd_id>       select a line (loads its code into the entry field)
//! list               print the cart
//! checkout           submit the sale
//! quit               exit
//! ```
//!
//! This bin is the presentation boundary: it is the only place amounts are
//! formatted with separators, and formatted text never flows back in.

use std::io::BufRead;

use tracing::warn;
use tracing_subscriber::EnvFilter;

use lane_catalog::CatalogConfig;
use lane_core::Money;
use lane_register::{
    CartView, Presentation, RegisterError, RegisterHandle, RegisterSession, ScanInput, ScanReport,
};

/// Formats yen with thousands separators, display only.
fn format_yen(amount: Money) -> String {
    let yen = amount.yen();
    let digits = yen.abs().to_string();
    let mut grouped = String::new();
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    let sign = if yen < 0 { "-" } else { "" };
    format!("¥{sign}{grouped}")
}

fn print_cart(view: &CartView) {
    if view.lines.is_empty() {
        println!("(cart empty)");
        return;
    }
    for line in &view.lines {
        print!(
            "  {} [{}] x{}  {}  {}",
            line.name,
            line.product_id,
            line.quantity,
            format_yen(line.effective_unit_price()),
            format_yen(line.line_total()),
        );
        match &line.promotion {
            Some(plan) if plan.discounts() => {
                println!("  ({} -{})", plan.plan_name, format_yen(plan.discount_amount))
            }
            _ => println!(),
        }
    }
    match view.total_with_tax {
        Some(total) => println!(
            "  total {} (ex tax {})",
            format_yen(total),
            format_yen(view.subtotal)
        ),
        None => println!("  subtotal {} (tax rate not loaded)", format_yen(view.subtotal)),
    }
}

fn report_error(err: &RegisterError) {
    match err.presentation() {
        Presentation::Inline => println!("  {err}"),
        Presentation::Alert => println!("! {err}"),
    }
}

async fn handle_line(handle: &RegisterHandle, line: &str) -> Result<(), RegisterError> {
    let mut parts = line.split_whitespace();
    match parts.next() {
        None => {}
        Some("list") => print_cart(&handle.view().await?),
        Some("qty") => {
            let (Some(product_id), Some(qty)) = (parts.next(), parts.next()) else {
                println!("usage: qty <prd_id> <n>");
                return Ok(());
            };
            let Ok(qty) = qty.parse::<i64>() else {
                println!("usage: qty <prd_id> <n>");
                return Ok(());
            };
            match handle.set_quantity(product_id, qty).await? {
                lane_core::SetQuantityOutcome::Applied { quantity } => {
                    println!("quantity set to {quantity}");
                    print_cart(&handle.view().await?);
                }
                lane_core::SetQuantityOutcome::NotSelected => {
                    println!("select the line first (sel <prd_id>)");
                }
            }
        }
        Some("rm") => {
            let Some(product_id) = parts.next() else {
                println!("usage: rm <prd_id>");
                return Ok(());
            };
            handle.remove_line(product_id).await?;
            print_cart(&handle.view().await?);
        }
        Some("sel") => {
            let Some(product_id) = parts.next() else {
                println!("usage: sel <prd_id>");
                return Ok(());
            };
            match handle.select_line(product_id).await? {
                Some(line) => println!("selected {} ({})", line.name, line.code),
                None => println!("no such line"),
            }
        }
        Some("checkout") => {
            let receipt = handle.checkout().await?;
            println!(
                "PAID  total {} (ex tax {})",
                format_yen(receipt.total_amount),
                format_yen(receipt.total_amount_ex_tax)
            );
        }
        Some(code) => {
            match handle.scan(ScanInput::ScannedCode(code.to_string())).await? {
                ScanReport::Ignored => {}
                ScanReport::Added { name } => println!("added {name}"),
                ScanReport::Incremented { name, quantity } => {
                    println!("{name} x{quantity}")
                }
            }
            print_cart(&handle.view().await?);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let config = match CatalogConfig::load() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("configuration error: {err}");
            std::process::exit(1);
        }
    };
    println!("lane-register terminal ({})", config.base_url);

    let session = match RegisterSession::new(&config) {
        Ok(session) => session,
        Err(err) => {
            eprintln!("failed to start session: {err}");
            std::process::exit(1);
        }
    };
    let handle = session.spawn();

    // Tax is fetched once per session; the register still rings without it
    // but refuses to check out.
    if let Err(err) = handle.refresh_tax().await {
        warn!(error = %err, "tax fetch failed; totals shown without tax");
    }

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(line) => line,
            Err(_) => break,
        };
        let trimmed = line.trim();
        if trimmed == "quit" || trimmed == "exit" {
            break;
        }
        if let Err(err) = handle_line(&handle, trimmed).await {
            report_error(&err);
        }
    }
}
