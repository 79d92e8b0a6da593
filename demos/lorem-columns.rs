use column_flow::layout::ColumnMode;
use column_flow::{CachedMeasure, Document, FixedAdvance, Font, LayoutConfig, Mm, Pt};

fn main() {
    // optionally measure with a real font: `cargo run --example lorem-columns -- path/to/font.ttf`
    let font = std::env::args()
        .nth(1)
        .map(|path| Font::from_path(path).expect("can load font"));

    let text = format!(
        "{}\n\n{}\n\n{}",
        lipsum::lipsum_title(),
        lipsum::lipsum(250),
        lipsum::lipsum(120)
    );
    let config = LayoutConfig::new(text)
        .with_columns(3)
        .with_font("Crimson Pro", Pt(10.0))
        .with_gap(Mm(5.0))
        .with_column_mode(ColumnMode::Custom(vec![Mm(2.0), Mm(3.0), Mm(2.0)]));

    let document = match font {
        Some(font) => Document::layout(&config, &CachedMeasure::new(font)),
        None => Document::layout(&config, &CachedMeasure::new(FixedAdvance::default())),
    }
    .expect("can lay out text");

    let metrics = &document.metrics;
    println!(
        "{} page(s), columns {:?} (custom scale {:.3})",
        document.page_count(),
        metrics.column_widths,
        metrics.custom_scale
    );
    for (page_index, page) in document.pages.iter().enumerate() {
        for (column_index, column) in page.columns.iter().enumerate() {
            let rect = metrics.column_rect(column_index).expect("column is resolved");
            println!(
                "--- page-{} column {} at ({}, {}) ---",
                page_index + 1,
                column_index + 1,
                rect.x1,
                rect.y1
            );
            for (line_index, line) in column.lines.iter().enumerate() {
                println!("{:>8} | {}", metrics.line_top(line_index), line);
            }
        }
    }
}
