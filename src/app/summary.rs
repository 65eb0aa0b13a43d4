//! Per-platform row counts and their console rendering.

use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlatformSummary {
    pub slug: String,
    pub name: String,
    pub services: i64,
    pub templates: i64,
    pub seo_templates: i64,
    pub phrases: i64,
    pub keywords: i64,
}

const HEADERS: [&str; 6] = ["platform", "services", "templates", "seo", "phrases", "keywords"];

// First column left-aligned, counts right-aligned.
fn format_line(row: &[&str], widths: &[usize]) -> String {
    row.iter()
        .zip(widths)
        .enumerate()
        .map(|(i, (cell, &width))| {
            if i == 0 {
                format!("{:<width$}", cell, width = width)
            } else {
                format!("{:>width$}", cell, width = width)
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

/// Renders one row per platform plus a totals row, columns right-aligned.
pub fn format_summary_table(rows: &[PlatformSummary]) -> String {
    let mut cells: Vec<[String; 6]> = rows
        .iter()
        .map(|r| {
            [
                r.name.clone(),
                r.services.to_string(),
                r.templates.to_string(),
                r.seo_templates.to_string(),
                r.phrases.to_string(),
                r.keywords.to_string(),
            ]
        })
        .collect();

    let total = |f: fn(&PlatformSummary) -> i64| rows.iter().map(f).sum::<i64>().to_string();
    cells.push([
        "total".to_string(),
        total(|r| r.services),
        total(|r| r.templates),
        total(|r| r.seo_templates),
        total(|r| r.phrases),
        total(|r| r.keywords),
    ]);

    let mut widths = HEADERS.map(str::len);
    for row in &cells {
        for (w, cell) in widths.iter_mut().zip(row.iter()) {
            *w = (*w).max(cell.chars().count());
        }
    }

    let rule = widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("  ");

    let mut out = vec![format_line(&HEADERS, &widths), rule.clone()];
    for row in &cells[..cells.len() - 1] {
        out.push(format_line(&row.each_ref().map(String::as_str), &widths));
    }
    out.push(rule);
    if let Some(totals) = cells.last() {
        out.push(format_line(&totals.each_ref().map(String::as_str), &widths));
    }
    out.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(slug: &str, name: &str, keywords: i64) -> PlatformSummary {
        PlatformSummary {
            slug: slug.into(),
            name: name.into(),
            services: 3,
            templates: 4,
            seo_templates: 9,
            phrases: 36,
            keywords,
        }
    }

    #[test]
    fn one_line_per_platform_and_totals() {
        let table = format_summary_table(&[
            row("sos-expat", "SOS-Expat", 648),
            row("ulixai", "Ulixai", 648),
        ]);
        let lines: Vec<&str> = table.lines().collect();
        // header, rule, 2 platforms, rule, total
        assert_eq!(lines.len(), 6);
        assert!(lines[2].starts_with("SOS-Expat"));
        assert!(lines[3].starts_with("Ulixai"));
        assert!(lines[5].starts_with("total"));
        assert!(lines[5].ends_with("1296"));
    }

    #[test]
    fn columns_are_aligned() {
        let table = format_summary_table(&[row("ulysse-ai", "Ulysse.AI", 5)]);
        let widths: Vec<usize> = table.lines().map(|l| l.len()).collect();
        assert!(widths.windows(2).all(|w| w[0] == w[1]));
    }

    #[test]
    fn empty_summary_has_zero_totals() {
        let table = format_summary_table(&[]);
        let last = table.lines().last().unwrap();
        assert!(last.starts_with("total"));
        assert!(last.trim_end().ends_with('0'));
    }
}
