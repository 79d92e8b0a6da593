use crate::error::LayoutError;
use crate::layout::metrics::LayoutMetrics;
use crate::layout::tokenize::{is_separator, Token};
use crate::measure::TextMeasure;
use crate::page::{Column, Line, Page};
use crate::units::Px;
use unicode_segmentation::UnicodeSegmentation;

/// Slack allowed when comparing a measured width or a line's bottom edge against its budget
pub const FIT_TOLERANCE: Px = Px(0.1);

/// Flows `tokens` into lines, columns and pages.
///
/// Lines are broken greedily: each token is appended to the current line while it fits the
/// width of the column being filled, otherwise the line is committed and a new one started.
/// Spaces never start a line and a space that does not fit is dropped at the break. Words wider
/// than a whole column are split at the longest run of grapheme clusters that fits, found by
/// binary search.
///
/// Committed lines stack down the current column; when the next line would pass the column's
/// bottom the column is closed, and a page is closed once it holds `column_count` columns.
/// The last page is padded with empty columns.
///
/// Returns a single empty page when there is nothing to lay out or no column to lay it out in.
/// Fails with [LayoutError::MeasurementUnavailable] if the measurer produces a negative or
/// non-finite width.
pub fn flow<M: TextMeasure + ?Sized>(
    tokens: &[Token],
    metrics: &LayoutMetrics,
    column_count: usize,
    font_family: &str,
    measurer: &M,
) -> Result<Vec<Page>, LayoutError> {
    let column_count = column_count.max(1);
    if tokens.is_empty() || metrics.column_widths.is_empty() {
        return Ok(vec![Page::empty(column_count)]);
    }

    let mut flow = Flow::new(metrics, column_count, font_family, measurer);
    for token in tokens {
        flow.push(token)?;
    }
    Ok(flow.finish())
}

/// Cursor state for one pass of [flow]
struct Flow<'a, M: ?Sized> {
    metrics: &'a LayoutMetrics,
    column_count: usize,
    font_family: &'a str,
    measurer: &'a M,

    /// finished pages
    pages: Vec<Page>,
    /// finished columns of the page being built
    columns: Vec<Column>,
    /// committed lines of the column being built
    lines: Vec<Line>,
    /// top of the next line in the current column
    cursor_y: Px,
    /// the line being built and its measured width
    line: String,
    line_width: Px,
}

impl<'a, M: TextMeasure + ?Sized> Flow<'a, M> {
    fn new(
        metrics: &'a LayoutMetrics,
        column_count: usize,
        font_family: &'a str,
        measurer: &'a M,
    ) -> Self {
        Flow {
            metrics,
            column_count,
            font_family,
            measurer,
            pages: Vec::new(),
            columns: Vec::with_capacity(column_count),
            lines: Vec::new(),
            cursor_y: Px(0.0),
            line: String::new(),
            line_width: Px(0.0),
        }
    }

    fn measure(&self, text: &str) -> Result<Px, LayoutError> {
        let width = self
            .measurer
            .measure(text, self.font_family, self.metrics.font_size);
        if width.is_finite() && width >= Px(0.0) {
            Ok(width)
        } else {
            Err(LayoutError::MeasurementUnavailable {
                text: text.to_string(),
                width: width.0,
            })
        }
    }

    /// Width of the column currently being filled. Falls back to the last configured width if
    /// the page holds more columns than were resolved.
    fn column_width(&self) -> Px {
        let widths = &self.metrics.column_widths;
        widths
            .get(self.columns.len())
            .or(widths.last())
            .copied()
            .unwrap_or_default()
    }

    fn fits(&self, width: Px) -> bool {
        width <= self.column_width() + FIT_TOLERANCE
    }

    /// Close the current column if another line would not fit below the cursor. A column
    /// always takes at least one line, however tall.
    fn ensure_room(&mut self) {
        let bottom = self.cursor_y + self.metrics.line_height;
        if bottom > self.metrics.column_height + FIT_TOLERANCE && !self.lines.is_empty() {
            self.close_column();
        }
    }

    fn close_column(&mut self) {
        let lines = std::mem::take(&mut self.lines);
        self.columns.push(Column::new(lines));
        self.cursor_y = Px(0.0);
        log::trace!(
            "closed column {} of page {}",
            self.columns.len(),
            self.pages.len() + 1
        );

        if self.columns.len() >= self.column_count {
            let columns = std::mem::replace(
                &mut self.columns,
                Vec::with_capacity(self.column_count),
            );
            self.pages.push(Page::new(columns));
            log::trace!("closed page {}", self.pages.len());
        }
    }

    /// Move the line buffer into the current column, with its trailing whitespace trimmed
    fn commit_line(&mut self) {
        self.ensure_room();
        let line = std::mem::take(&mut self.line);
        self.lines.push(Line::new(line.trim_end_matches(is_separator)));
        self.cursor_y += self.metrics.line_height;
        self.line_width = Px(0.0);
    }

    fn push(&mut self, token: &Token) -> Result<(), LayoutError> {
        match token {
            Token::Newline => {
                self.commit_line();
                Ok(())
            }
            Token::Space(ch) => self.push_space(*ch),
            Token::Word(word) => self.push_word(word),
        }
    }

    fn push_space(&mut self, ch: char) -> Result<(), LayoutError> {
        if self.line.is_empty() {
            return Ok(());
        }

        let mut buf = [0u8; 4];
        let width = self.line_width + self.measure(ch.encode_utf8(&mut buf))?;
        if self.fits(width) {
            self.line.push(ch);
            self.line_width = width;
        } else {
            self.commit_line();
        }
        Ok(())
    }

    fn push_word(&mut self, word: &str) -> Result<(), LayoutError> {
        let word_width = self.measure(word)?;

        if !self.line.is_empty() {
            let width = self.line_width + word_width;
            if self.fits(width) {
                self.line.push_str(word);
                self.line_width = width;
                return Ok(());
            }
            self.commit_line();
        }

        // starting a fresh line, which may land in the next column
        self.ensure_room();
        if self.fits(word_width) {
            self.line.push_str(word);
            self.line_width = word_width;
            Ok(())
        } else {
            self.split_word(word)
        }
    }

    /// Break a word wider than a column into column-wide pieces at grapheme cluster
    /// boundaries. The final piece stays in the line buffer so following tokens can still
    /// join it.
    fn split_word(&mut self, word: &str) -> Result<(), LayoutError> {
        if !self.line.is_empty() {
            self.commit_line();
        }

        // bounds[k] is the byte offset just past the k-th grapheme
        let bounds: Vec<usize> = std::iter::once(0)
            .chain(word.grapheme_indices(true).map(|(i, g)| i + g.len()))
            .collect();
        let last = bounds.len() - 1;

        let mut start = 0;
        let mut guess = 1;
        while start < last {
            self.ensure_room();
            let (end, width) = self.longest_fitting_piece(word, &bounds, start, guess)?;
            let piece = &word[bounds[start]..bounds[end]];
            self.line.push_str(piece);
            self.line_width = width;
            if end == last {
                break;
            }
            log::trace!("split {piece:?} off an overlong word");
            self.commit_line();
            guess = end - start;
            start = end;
        }
        Ok(())
    }

    /// Index into `bounds` where the longest run of graphemes from `start` that fits the
    /// current column ends, and its width. At least one grapheme is always taken so splitting
    /// makes progress.
    ///
    /// The upper bound grows by doubling from `guess` (the previous piece length) before the
    /// binary search, so a long word is not re-measured to its end for every piece.
    fn longest_fitting_piece(
        &self,
        word: &str,
        bounds: &[usize],
        start: usize,
        guess: usize,
    ) -> Result<(usize, Px), LayoutError> {
        let last = bounds.len() - 1;
        let from = bounds[start];

        let mut best: Option<(usize, Px)> = None;
        let mut lo = start + 1;
        let mut hi = (start + guess.max(1)).min(last);
        loop {
            let width = self.measure(&word[from..bounds[hi]])?;
            if !self.fits(width) {
                hi -= 1;
                break;
            }
            best = Some((hi, width));
            if hi == last {
                return Ok((hi, width));
            }
            lo = hi + 1;
            hi = (start + (hi - start) * 2).min(last);
        }

        while lo <= hi {
            let mid = lo + (hi - lo) / 2;
            let width = self.measure(&word[from..bounds[mid]])?;
            if self.fits(width) {
                best = Some((mid, width));
                lo = mid + 1;
            } else {
                hi = mid - 1;
            }
        }

        match best {
            Some(found) => Ok(found),
            None => {
                let end = start + 1;
                Ok((end, self.measure(&word[from..bounds[end]])?))
            }
        }
    }

    fn finish(mut self) -> Vec<Page> {
        if !self.line.is_empty() {
            self.commit_line();
        }
        if !self.lines.is_empty() || !self.columns.is_empty() {
            let lines = std::mem::take(&mut self.lines);
            self.columns.push(Column::new(lines));
            let mut page = Page::new(std::mem::take(&mut self.columns));
            page.pad_to(self.column_count);
            self.pages.push(page);
        }
        self.pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::layout::margins::Margins;
    use crate::layout::tokenize::tokenize;

    /// Every character is 10px wide
    struct TenPx;

    impl TextMeasure for TenPx {
        fn measure(&self, text: &str, _font_family: &str, _font_size: Px) -> Px {
            Px(10.0 * text.chars().count() as f32)
        }
    }

    struct Broken;

    impl TextMeasure for Broken {
        fn measure(&self, _text: &str, _font_family: &str, _font_size: Px) -> Px {
            Px(f32::INFINITY)
        }
    }

    fn metrics(widths: &[f32], lines_per_column: usize) -> LayoutMetrics {
        let column_widths: Vec<Px> = widths.iter().map(|w| Px(*w)).collect();
        let mut column_offsets = Vec::new();
        let mut offset = Px(0.0);
        for width in column_widths.iter() {
            column_offsets.push(offset);
            offset += *width;
        }
        LayoutMetrics {
            page_width: Px(1000.0),
            page_height: Px(1000.0),
            margins: Margins::all(Px(0.0)),
            column_widths,
            column_offsets,
            column_height: Px(20.0 * lines_per_column as f32),
            gap: Px(0.0),
            font_size: Px(16.0),
            line_height: Px(20.0),
            custom_scale: 1.0,
        }
    }

    fn run(text: &str, metrics: &LayoutMetrics) -> Vec<Page> {
        flow(
            &tokenize(text),
            metrics,
            metrics.column_count(),
            "mono",
            &TenPx,
        )
        .expect("layout succeeds")
    }

    fn texts(column: &Column) -> Vec<&str> {
        column.lines.iter().map(Line::text).collect()
    }

    #[test]
    fn space_that_does_not_fit_is_dropped() {
        let pages = run("aaaaaaa bb", &metrics(&[75.0], 10));
        assert_eq!(texts(&pages[0].columns[0]), vec!["aaaaaaa", "bb"]);
    }

    #[test]
    fn leading_spaces_are_dropped_and_internal_kept() {
        let pages = run("   a  b   \n  c", &metrics(&[200.0], 10));
        assert_eq!(texts(&pages[0].columns[0]), vec!["a  b", "c"]);
    }

    #[test]
    fn split_word_tail_keeps_accepting_tokens() {
        let pages = run("abcdefghij k", &metrics(&[75.0], 10));
        assert_eq!(texts(&pages[0].columns[0]), vec!["abcdefg", "hij k"]);
    }

    #[test]
    fn pending_line_is_committed_before_splitting() {
        let pages = run("ab abcdefghijkl", &metrics(&[75.0], 10));
        assert_eq!(
            texts(&pages[0].columns[0]),
            vec!["ab", "abcdefg", "hijkl"]
        );
    }

    #[test]
    fn narrower_than_one_character_still_progresses() {
        let pages = run("abc", &metrics(&[5.0], 10));
        assert_eq!(texts(&pages[0].columns[0]), vec!["a", "b", "c"]);
    }

    #[test]
    fn words_are_measured_against_their_own_column() {
        // second column is wide enough for both words, the first is not
        let pages = run("aaaa\nbbbb cccc", &metrics(&[50.0, 100.0], 1));
        assert_eq!(pages.len(), 1);
        assert_eq!(texts(&pages[0].columns[0]), vec!["aaaa"]);
        assert_eq!(texts(&pages[0].columns[1]), vec!["bbbb cccc"]);
    }

    #[test]
    fn split_pieces_cross_columns_and_pages() {
        let pages = run("abcdefghijklmnop", &metrics(&[50.0, 50.0], 1));
        assert_eq!(pages.len(), 2);
        assert_eq!(texts(&pages[0].columns[0]), vec!["abcde"]);
        assert_eq!(texts(&pages[0].columns[1]), vec!["fghij"]);
        assert_eq!(texts(&pages[1].columns[0]), vec!["klmno"]);
        assert_eq!(texts(&pages[1].columns[1]), vec!["p"]);
    }

    #[test]
    fn extra_columns_reuse_the_last_width() {
        let pages = flow(
            &tokenize("aaaa\nbbbb\ncccc"),
            &metrics(&[50.0], 1),
            3,
            "mono",
            &TenPx,
        )
        .expect("layout succeeds");
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].columns.len(), 3);
        assert_eq!(texts(&pages[0].columns[2]), vec!["cccc"]);
    }

    #[test]
    fn final_page_is_padded() {
        let pages = run("a\nb\nc", &metrics(&[50.0, 50.0, 50.0, 50.0], 1));
        assert_eq!(pages.len(), 1);
        assert_eq!(pages[0].columns.len(), 4);
        assert!(pages[0].columns[3].is_empty());
    }

    #[test]
    fn no_widths_yields_one_empty_page() {
        let pages = run("text", &metrics(&[], 3));
        assert_eq!(pages, vec![Page::empty(1)]);
    }

    #[test]
    fn whitespace_only_text_yields_no_pages() {
        assert!(run("   \t ", &metrics(&[100.0], 3)).is_empty());
    }

    #[test]
    fn unmeasurable_text_is_an_error() {
        let err = flow(&tokenize("word"), &metrics(&[100.0], 3), 1, "mono", &Broken)
            .expect_err("measurement fails");
        assert!(matches!(
            err,
            LayoutError::MeasurementUnavailable { ref text, .. } if text == "word"
        ));
    }

    /// Fractional advances: ' ' is free, thin and em spaces and 'b'/'c' overshoot a 75px
    /// column by less and more than the tolerance once seven 'a's are on the line
    struct Fractional;

    impl TextMeasure for Fractional {
        fn measure(&self, text: &str, _font_family: &str, _font_size: Px) -> Px {
            text.chars()
                .map(|ch| match ch {
                    'a' => Px(10.0),
                    '\u{2009}' | 'b' => Px(5.05),
                    '\u{2003}' | 'c' => Px(5.2),
                    _ => Px(0.0),
                })
                .sum()
        }
    }

    fn run_fractional(text: &str, metrics: &LayoutMetrics) -> Vec<Page> {
        flow(&tokenize(text), metrics, 1, "mono", &Fractional).expect("layout succeeds")
    }

    #[test]
    fn word_within_tolerance_stays_on_the_line() {
        let pages = run_fractional("aaaaaaa b", &metrics(&[75.0], 10));
        assert_eq!(texts(&pages[0].columns[0]), vec!["aaaaaaa b"]);
    }

    #[test]
    fn word_past_tolerance_breaks_the_line() {
        let pages = run_fractional("aaaaaaa c", &metrics(&[75.0], 10));
        assert_eq!(texts(&pages[0].columns[0]), vec!["aaaaaaa", "c"]);
    }

    #[test]
    fn space_within_tolerance_is_kept() {
        let pages = run_fractional("aaaaaaa\u{2009}z", &metrics(&[75.0], 10));
        assert_eq!(texts(&pages[0].columns[0]), vec!["aaaaaaa\u{2009}z"]);
    }

    #[test]
    fn space_past_tolerance_breaks_and_is_dropped() {
        let pages = run_fractional("aaaaaaa\u{2003}z", &metrics(&[75.0], 10));
        assert_eq!(texts(&pages[0].columns[0]), vec!["aaaaaaa", "z"]);
    }

    #[test]
    fn line_bottom_within_tolerance_fits_the_column() {
        let mut tight = metrics(&[100.0], 3);
        tight.column_height = Px(59.95);
        let pages = run("1\n2\n3", &tight);
        assert_eq!(pages.len(), 1);
        assert_eq!(texts(&pages[0].columns[0]), vec!["1", "2", "3"]);

        tight.column_height = Px(59.85);
        let pages = run("1\n2\n3", &tight);
        assert_eq!(pages.len(), 2);
        assert_eq!(texts(&pages[0].columns[0]), vec!["1", "2"]);
        assert_eq!(texts(&pages[1].columns[0]), vec!["3"]);
    }

    #[test]
    fn splits_keep_combining_marks_with_their_base() {
        // each decomposed "é" is two chars, 20px
        let word = "e\u{301}".repeat(6);
        let pages = run(&word, &metrics(&[75.0], 10));
        let expected = "e\u{301}".repeat(3);
        assert_eq!(
            texts(&pages[0].columns[0]),
            vec![expected.as_str(), expected.as_str()]
        );
    }

    #[test]
    fn splits_keep_emoji_sequences_whole() {
        // a five-char family emoji joined by zero width joiners is one grapheme, 50px
        let family = "\u{1F469}\u{200D}\u{1F469}\u{200D}\u{1F467}";
        let word = family.repeat(3);
        let pages = run(&word, &metrics(&[75.0], 10));
        assert_eq!(texts(&pages[0].columns[0]), vec![family; 3]);

        // narrower than the grapheme: still taken whole
        let pages = run(&word, &metrics(&[30.0], 10));
        assert_eq!(texts(&pages[0].columns[0]), vec![family; 3]);
    }

    #[test]
    fn long_unspaced_text_splits_into_full_pieces() {
        let word = "日".repeat(1000);
        let pages = run(&word, &metrics(&[75.0], 1000));
        let lines = texts(&pages[0].columns[0]);
        assert_eq!(lines.len(), 143);
        assert!(lines[..142].iter().all(|line| line.chars().count() == 7));
        assert_eq!(lines[142], "日".repeat(6));
    }

    #[test]
    fn trailing_byte_order_mark_is_trimmed() {
        let pages = run("a\u{FEFF}\nb", &metrics(&[100.0], 10));
        assert_eq!(texts(&pages[0].columns[0]), vec!["a", "b"]);
    }
}
