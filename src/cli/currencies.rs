//! Catalog listing command.

use anyhow::Result;
use comfy_table::Cell;

use super::ui;
use crate::core::currency::CATALOG;

pub fn run() -> Result<()> {
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Code"),
        ui::header_cell("Currency"),
        ui::header_cell("Country"),
    ]);

    for option in CATALOG {
        table.add_row(vec![
            Cell::new(option.code),
            Cell::new(option.label),
            Cell::new(option.country),
        ]);
    }

    println!("{table}");
    Ok(())
}
