use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ContentArrangement, Table, TableComponent,
    modifiers::UTF8_SOLID_INNER_BORDERS, presets::UTF8_FULL,
};

/// Rate with up to four decimals, `-` when the model has none.
pub(super) fn format_rate(rate: Option<f64>) -> String {
    match rate {
        None => "-".to_string(),
        Some(r) => {
            let s = format!("{r:.4}");
            let trimmed = s.trim_end_matches('0');
            let trimmed = trimmed.strip_suffix('.').unwrap_or(trimmed);
            format!("${trimmed}")
        }
    }
}

pub(super) fn header_cell(text: &str, use_color: bool) -> Cell {
    let mut cell = Cell::new(text).add_attribute(Attribute::Bold);
    if use_color {
        cell = cell.fg(Color::Cyan);
    }
    cell
}

pub(super) fn right_cell(text: &str, color: Option<Color>) -> Cell {
    let mut cell = Cell::new(text).set_alignment(CellAlignment::Right);
    if let Some(c) = color {
        cell = cell.fg(c);
    }
    cell
}

/// Replace the double-line header separator (╞═╪═╡) with single-line (├─┼─┤)
fn normalize_header_separator(table: &mut Table) {
    table.set_style(TableComponent::HeaderLines, '─');
    table.set_style(TableComponent::LeftHeaderIntersection, '├');
    table.set_style(TableComponent::MiddleHeaderIntersections, '┼');
    table.set_style(TableComponent::RightHeaderIntersection, '┤');
}

pub(super) fn create_styled_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic);
    normalize_header_separator(&mut table);
    table
}

/// Wrap `text` in an ANSI color when colors are enabled.
pub(super) fn paint(text: &str, code: &str, use_color: bool) -> String {
    if use_color {
        format!("\x1b[{code}m{text}\x1b[0m")
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_rate_trims_zeros() {
        assert_eq!(format_rate(Some(0.1)), "$0.1");
        assert_eq!(format_rate(Some(2.0)), "$2");
        assert_eq!(format_rate(Some(0.025)), "$0.025");
        assert_eq!(format_rate(Some(0.006)), "$0.006");
    }

    #[test]
    fn format_rate_missing() {
        assert_eq!(format_rate(None), "-");
    }

    #[test]
    fn paint_respects_color_flag() {
        assert_eq!(paint("x", "36", false), "x");
        assert_eq!(paint("x", "36", true), "\x1b[36mx\x1b[0m");
    }
}
