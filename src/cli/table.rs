//! Table rendering for list and report commands

use tabled::{builder::Builder, settings::Style};

/// Render headers plus string rows as a bordered table
pub fn render(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut builder = Builder::default();
    builder.push_record(headers.iter().map(|h| h.to_string()));
    for row in rows {
        builder.push_record(row.clone());
    }
    builder.build().with(Style::sharp()).to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_includes_headers_and_rows() {
        let out = render(
            &["ID", "Name"],
            &[vec!["1".to_string(), "Ana".to_string()]],
        );
        assert!(out.contains("ID"));
        assert!(out.contains("Ana"));
    }
}
