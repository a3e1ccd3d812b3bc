use crate::{Caravan, CaravanPosition, PlayerPosition, Table};

const COLUMN_WIDTH: usize = 10;

/// A value card followed by the function cards attached to it.
pub fn pile_label(caravan: &Caravan, card_index: usize) -> String {
    let Some(card) = caravan.cards().get(card_index) else {
        return String::new();
    };
    let mut result = card.to_string();
    for face in &caravan.applied_face_cards()[card_index] {
        result += &face.to_string();
    }
    result
}

fn row(cells: impl IntoIterator<Item = String>) -> String {
    let mut line = String::new();
    for cell in cells {
        line += &format!("{:<width$}", cell, width = COLUMN_WIDTH);
    }
    line.trim_end().to_owned()
}

/// Renders all six caravans as text.
///
/// The top player's caravans grow upwards and the bottom player's downwards,
/// with the caravan values next to the dividing line.
pub fn visualize_table(table: &Table) -> String {
    let caravans = |player| CaravanPosition::ALL.map(|c| table.caravan(player, c));
    let height = |caravans: &[&Caravan; 3]| caravans.iter().map(|c| c.len()).max().unwrap_or(0);
    let values = |caravans: &[&Caravan; 3]| row(caravans.iter().map(|c| format!("({})", c.value())));

    let top = caravans(PlayerPosition::Top);
    let bottom = caravans(PlayerPosition::Bottom);
    let mut lines = Vec::new();
    for i in (0..height(&top)).rev() {
        lines.push(row(top.iter().map(|c| pile_label(c, i))));
    }
    lines.push(values(&top));
    lines.push("─".repeat(3 * COLUMN_WIDTH));
    lines.push(values(&bottom));
    for i in 0..height(&bottom) {
        lines.push(row(bottom.iter().map(|c| pile_label(c, i))));
    }
    lines.join("\n")
}
