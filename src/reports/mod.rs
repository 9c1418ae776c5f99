use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use keymorph::consts::COL_COUNT;
use keymorph::core_types::{Col, Position, Row};
use keymorph::layout::Layout;
use keymorph::manager::Manager;
use keymorph::util::{coord_to_pos, pos_to_col, pos_to_row};

fn key_cell(b: u8, marked: bool) -> Cell {
    let cell = Cell::new((b as char).to_string()).set_alignment(CellAlignment::Center);
    if marked {
        cell.fg(Color::Yellow).add_attribute(Attribute::Bold)
    } else {
        cell
    }
}

fn grid(layout: &Layout, marked: &[Position]) -> Table {
    let mut table = Table::new();
    table.load_preset(ASCII_FULL);

    for (row, chunk) in layout.keys().chunks(COL_COUNT).enumerate() {
        let cells: Vec<Cell> = chunk
            .iter()
            .enumerate()
            .map(|(col, &b)| {
                let pos = coord_to_pos(row as Row, col as Col);
                key_cell(b, marked.contains(&pos))
            })
            .collect();
        table.add_row(cells);
    }
    table
}

pub fn print_layout_grid(name: &str, layout: &Layout) {
    println!("\nLayout: {} ({})", name, layout);
    println!("{}", grid(layout, &[]));
}

pub fn print_mutation(step: usize, parent: &Layout, child: &Layout) {
    let swapped: Vec<Position> = parent.diff(child).collect();
    let marks: String = (0..parent.keys().len() as Position)
        .map(|p| if swapped.contains(&p) { '^' } else { ' ' })
        .collect();

    let coords: Vec<String> = swapped
        .iter()
        .map(|&p| format!("r{}c{}", pos_to_row(p), pos_to_col(p)))
        .collect();

    println!("\nStep {}: {}  (swapped {})", step, child, coords.join(" <-> "));
    println!("{:width$}{}", "", marks, width = format!("Step {}: ", step).len());
    println!("{}", grid(child, &swapped));
}

pub fn print_compatibility_report(targets: &[(String, Layout)], manager: &Manager) {
    let config = manager.config();
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    let mut header = vec![
        Cell::new("Layout").add_attribute(Attribute::Bold),
        Cell::new("Valid"),
        Cell::new("Pinned"),
    ];
    for (i, area) in config.areas().iter().enumerate() {
        header.push(Cell::new(format!("Area {} ({})", i, area.len())));
    }
    header.push(Cell::new("Manageable").fg(Color::Cyan));
    table.add_row(header);

    for (name, layout) in targets {
        let pinned = config
            .fixed_keys()
            .iter()
            .all(|k| layout.get_value(k.pos) == k.val);

        let mut row = vec![
            Cell::new(name),
            flag_cell(layout.valid()),
            flag_cell(pinned),
        ];
        for area in config.areas() {
            row.push(flag_cell(area.is_compatible(layout)));
        }
        row.push(flag_cell(manager.can_manage(layout)));
        table.add_row(row);
    }

    println!("\n=== Compatibility ===");
    println!("{}", table);
}

fn flag_cell(ok: bool) -> Cell {
    if ok {
        Cell::new("yes").fg(Color::Green)
    } else {
        Cell::new("no").fg(Color::Red)
    }
}
