use crate::types::SummaryTable;
use crossterm::style::Stylize;
use std::io::Write;

const SEPARATOR_WIDTH: usize = 79;

fn header_line() -> String {
    format!(
        "{:<20} {:>5} {:>8} {:>8} {:>8} {:>8} {:>10}",
        "NAMESPACE", "PODS", "RUNNING", "PENDING", "FAILED", "CPU(m)", "MEMORY(Mi)"
    )
}

/// Write the fixed-width table. `styled` bolds the header for terminals.
pub fn write_table<W: Write>(
    out: &mut W,
    table: &SummaryTable,
    styled: bool,
) -> std::io::Result<()> {
    let header = header_line();
    let separator = "-".repeat(SEPARATOR_WIDTH);
    if styled {
        writeln!(out, "{}", header.bold())?;
        writeln!(out, "{}", separator.bold())?;
    } else {
        writeln!(out, "{}", header)?;
        writeln!(out, "{}", separator)?;
    }

    for (namespace, summary) in table {
        writeln!(
            out,
            "{:<20} {:>5} {:>8} {:>8} {:>8} {:>8} {:>10}",
            namespace,
            summary.pods,
            summary.running,
            summary.pending,
            summary.failed,
            summary.cpu_millis,
            summary.memory_mebibytes(),
        )?;
    }
    Ok(())
}

/// Write the table as a YAML mapping keyed by namespace.
pub fn write_yaml<W: Write>(out: &mut W, table: &SummaryTable) -> anyhow::Result<()> {
    serde_yaml::to_writer(out, table)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::NamespaceSummary;

    fn render(table: &SummaryTable) -> String {
        let mut buf = Vec::new();
        write_table(&mut buf, table, false).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_empty_table_renders_header_only() {
        let output = render(&SummaryTable::new());
        let separator = "-".repeat(79);
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(
            lines,
            vec![
                "NAMESPACE             PODS  RUNNING  PENDING   FAILED   CPU(m) MEMORY(Mi)",
                separator.as_str(),
            ]
        );
    }

    #[test]
    fn test_rows_are_right_aligned() {
        let mut table = SummaryTable::new();
        table.insert(
            "a".to_string(),
            NamespaceSummary {
                pods: 2,
                running: 1,
                pending: 0,
                failed: 1,
                cpu_millis: 750,
                memory_bytes: 384 * 1024 * 1024,
            },
        );
        let output = render(&table);
        assert_eq!(
            output.lines().nth(2),
            Some("a                        2        1        0        1      750        384")
        );
    }

    #[test]
    fn test_memory_column_truncates() {
        let mut table = SummaryTable::new();
        table.insert(
            "ns".to_string(),
            NamespaceSummary {
                pods: 1,
                memory_bytes: 2 * 1024 * 1024 - 1,
                ..Default::default()
            },
        );
        let output = render(&table);
        let row = output.lines().nth(2).unwrap();
        assert!(row.ends_with("         1"), "unexpected row: {row:?}");
    }

    #[test]
    fn test_yaml_output() {
        let mut table = SummaryTable::new();
        table.insert(
            "b".to_string(),
            NamespaceSummary {
                pods: 1,
                pending: 1,
                ..Default::default()
            },
        );
        let mut buf = Vec::new();
        write_yaml(&mut buf, &table).unwrap();
        let parsed: serde_yaml::Value = serde_yaml::from_slice(&buf).unwrap();
        assert_eq!(parsed["b"]["pods"].as_u64(), Some(1));
        assert_eq!(parsed["b"]["pending"].as_u64(), Some(1));
        assert_eq!(parsed["b"]["cpu_millis"].as_i64(), Some(0));
        assert_eq!(parsed["b"]["memory_bytes"].as_i64(), Some(0));
    }
}
