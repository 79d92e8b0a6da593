use crate::page::Page;

/// Finalize flowed pages for output: the last page is padded with empty columns up to
/// `column_count`, and a single empty page stands in when nothing was laid out.
pub fn assemble(mut pages: Vec<Page>, column_count: usize) -> Vec<Page> {
    let column_count = column_count.max(1);
    match pages.last_mut() {
        Some(last) => last.pad_to(column_count),
        None => pages.push(Page::empty(column_count)),
    }
    pages
}
