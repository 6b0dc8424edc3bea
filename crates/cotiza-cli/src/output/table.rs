use cotiza_core::config::CompareOptions;
use cotiza_core::fields::MASTER_FIELDS;
use cotiza_core::{ComparisonTable, DocumentOutcome};

pub fn print_comparison(table: &ComparisonTable) {
    print!("{}", format_comparison(table));
}

/// Render the comparison as a plain-text grid, one row per field.
pub fn format_comparison(table: &ComparisonTable) -> String {
    let mut out = String::new();

    if let Some(ref vehicle) = table.vehicle {
        out.push_str(&format!("Vehículo: {vehicle}\n\n"));
    }

    let field_width = table
        .fields
        .iter()
        .map(|f| f.chars().count())
        .max()
        .unwrap_or(10);

    let column_widths: Vec<usize> = table
        .columns
        .iter()
        .map(|c| {
            c.values
                .iter()
                .map(|v| v.chars().count())
                .chain(std::iter::once(c.display_name.chars().count()))
                .max()
                .unwrap_or(10)
        })
        .collect();

    // Header
    out.push_str(&format!("  {:<width$}", "Cobertura", width = field_width));
    for (column, width) in table.columns.iter().zip(&column_widths) {
        out.push_str(&format!("  {:<width$}", column.display_name, width = *width));
    }
    out.push('\n');
    let rule_len = field_width + column_widths.iter().map(|w| w + 2).sum::<usize>();
    out.push_str(&format!("  {}\n", "-".repeat(rule_len)));

    for (row, field) in table.fields.iter().enumerate() {
        out.push_str(&format!("  {:<width$}", field, width = field_width));
        for (column, width) in table.columns.iter().zip(&column_widths) {
            let value = column
                .values
                .get(row)
                .map(String::as_str)
                .unwrap_or(&table.placeholder);
            out.push_str(&format!("  {:<width$}", value, width = *width));
        }
        let trimmed = out.trim_end_matches(' ').len();
        out.truncate(trimmed);
        out.push('\n');
    }

    out
}

pub fn print_outcome(name: &str, outcome: &DocumentOutcome, options: &CompareOptions) {
    println!("=== {name} ===\n");
    println!("  Aseguradora: {}", outcome.company.display_name());

    let Some(ref result) = outcome.result else {
        println!();
        for d in &outcome.diagnostics {
            println!("  {}", d.message);
        }
        return;
    };

    if let Some(ref vehicle) = result.vehicle {
        println!("  Vehículo:    {vehicle}");
    }
    println!();

    let width = MASTER_FIELDS
        .iter()
        .map(|f| f.chars().count())
        .max()
        .unwrap_or(20);

    for field in MASTER_FIELDS {
        match result.get(field) {
            Some(value) => println!("  {:<width$}  {}", field, value, width = width),
            None => println!("  {:<width$}  {}", field, options.placeholder, width = width),
        }
    }

    let missing = result.missing_fields();
    println!(
        "\n  {} of {} fields found",
        MASTER_FIELDS.len() - missing.len(),
        MASTER_FIELDS.len()
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use cotiza_core::model::CompanyTag;
    use cotiza_core::CompanyColumn;

    fn table() -> ComparisonTable {
        ComparisonTable {
            fields: vec!["Prima Neta".into(), "IVA".into()],
            placeholder: "No disponible".into(),
            vehicle: Some("VOLKSWAGEN JETTA 2024".into()),
            columns: vec![
                CompanyColumn {
                    company: CompanyTag::Hdi,
                    display_name: "HDI Seguros".into(),
                    source: "hdi.pdf".into(),
                    values: vec!["12000.00".into(), "1920.00".into()],
                },
                CompanyColumn {
                    company: CompanyTag::Atlas,
                    display_name: "Seguros Atlas".into(),
                    source: "atlas.pdf".into(),
                    values: vec!["9800.00".into(), "No disponible".into()],
                },
            ],
        }
    }

    #[test]
    fn test_grid_has_one_line_per_field() {
        let text = format_comparison(&table());
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "Vehículo: VOLKSWAGEN JETTA 2024");
        assert!(lines[2].contains("HDI Seguros"));
        assert!(lines[2].contains("Seguros Atlas"));
        assert!(lines[4].starts_with("  Prima Neta"));
        assert!(lines[4].contains("12000.00"));
        assert!(lines[5].ends_with("No disponible"));
        assert_eq!(lines.len(), 6);
    }

    #[test]
    fn test_columns_are_aligned() {
        let text = format_comparison(&table());
        let lines: Vec<&str> = text.lines().collect();
        let header_pos = lines[2].find("Seguros Atlas").unwrap();
        let value_pos = lines[4].find("9800.00").unwrap();
        assert_eq!(header_pos, value_pos);
    }
}
