use crate::{SideId, Table, Tile};

/// The chain of tiles as it lies on the table, from the left end to the
/// right end: `L <left side, outermost first> <engine> <right side> R`.
///
/// The engine is left out when it has not been placed yet.
pub fn layout_line(table: &Table, placed_engine: Option<Tile>) -> String {
    chain_line(
        table.side(SideId::Left).tiles(),
        placed_engine,
        table.side(SideId::Right).tiles(),
    )
}

/// Like [`layout_line`], for sides given in play order.
pub(crate) fn chain_line(left: &[Tile], placed_engine: Option<Tile>, right: &[Tile]) -> String {
    let mut result = String::from("L");
    for tile in left.iter().rev() {
        result += &format!(" {}", tile);
    }
    if let Some(engine) = placed_engine {
        result += &format!(" {}", engine);
    }
    for tile in right {
        result += &format!(" {}", tile);
    }
    result += " R";
    result
}

fn open_stone_label(stone: Option<u8>) -> String {
    match stone {
        Some(stone) => format!("open {}", stone),
        None => String::from("closed"),
    }
}

/// Draws the layout in a box, with the open stone of each end above it.
pub fn visualize_table(table: &Table, placed_engine: Option<Tile>) -> String {
    let line = layout_line(table, placed_engine);
    let width = line.chars().count() + 2;
    let left_label = open_stone_label(table.open_stone(SideId::Left));
    let right_label = open_stone_label(table.open_stone(SideId::Right));
    let gap = (width + 2).saturating_sub(left_label.len() + right_label.len());

    let mut result = format!("{}{}{}\n╭", left_label, " ".repeat(gap), right_label);
    for _ in 0..width {
        result += "─";
    }
    result += &format!("╮\n│ {} │\n╰", line);
    for _ in 0..width {
        result += "─";
    }
    result += "╯";
    result
}

/// Lists a hand with the indices used in move requests.
pub fn visualize_hand(hand: &[Tile]) -> String {
    if hand.is_empty() {
        return String::from("  (empty)");
    }
    hand.iter()
        .enumerate()
        .map(|(index, tile)| format!("  [{}] {}", index, tile))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{tile, Side};

    fn sample_table() -> Table {
        Table::from_sides(
            Side::restore(SideId::Left, vec![tile!("2-6"), tile!("3-2")], Some(6)),
            Side::restore(SideId::Right, vec![tile!("6-1")], Some(6)),
        )
    }

    #[test]
    fn layout_reads_outward_to_outward() {
        assert_eq!(
            layout_line(&sample_table(), Some(tile!("6-6"))),
            "L 3-2 2-6 6-6 6-1 R"
        );
        assert_eq!(layout_line(&Table::new(), None), "L R");
    }

    #[test]
    fn boxed_table() {
        let drawing = visualize_table(&sample_table(), Some(tile!("6-6")));
        let lines: Vec<&str> = drawing.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with("open 3"));
        assert!(lines[0].ends_with("open 1"));
        assert_eq!(lines[2], "│ L 3-2 2-6 6-6 6-1 R │");
        assert_eq!(lines[1].chars().count(), lines[2].chars().count());
    }

    #[test]
    fn hand_listing() {
        assert_eq!(
            visualize_hand(&[tile!("1-2"), tile!("4-4")]),
            "  [0] 1-2\n  [1] 4-4"
        );
        assert_eq!(visualize_hand(&[]), "  (empty)");
    }
}
