//! Page listing display

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::pages::PageInfo;

#[derive(Tabled)]
struct PageRow {
    #[tabled(rename = "#")]
    position: usize,
    #[tabled(rename = "Source")]
    source: String,
    #[tabled(rename = "Page")]
    source_page: u32,
    #[tabled(rename = "Rotation")]
    rotation: String,
}

/// Format an editing session's pages as a table
pub fn format_page_list(pages: &[PageInfo]) -> String {
    if pages.is_empty() {
        return "No pages.\n".to_string();
    }

    let rows = pages.iter().map(|p| PageRow {
        position: p.position,
        source: p
            .source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default(),
        source_page: p.source_page,
        rotation: p.rotation.to_string(),
    });

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    format!("{}\n", table)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pages::Rotation;
    use std::path::PathBuf;

    #[test]
    fn test_format_page_list() {
        let pages = vec![PageInfo {
            position: 1,
            source: PathBuf::from("/tmp/scan.pdf"),
            source_page: 4,
            rotation: Rotation::from_degrees(90).unwrap(),
        }];
        let output = format_page_list(&pages);
        assert!(output.contains("scan.pdf"));
        assert!(output.contains("90°"));
        assert_eq!(format_page_list(&[]), "No pages.\n");
    }
}
