use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::config::OutputMode;
use crate::error::AppError;

pub fn print_json(value: &serde_json::Value) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).unwrap_or_default()
    );
}

pub fn print_table<T: Tabled>(data: &[T]) {
    if data.is_empty() {
        println!("No results.");
        return;
    }
    let table = Table::new(data).with(Style::rounded()).to_string();
    println!("{}", table);
}

pub fn print_error(err: &AppError, mode: OutputMode) {
    match mode {
        OutputMode::Json => eprintln!(
            "{}",
            serde_json::to_string_pretty(&err.to_json()).unwrap_or_default()
        ),
        OutputMode::Text | OutputMode::Table => eprintln!("Error: {}", err),
    }
}
