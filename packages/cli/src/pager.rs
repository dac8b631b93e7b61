//! Raw-data pager: shows the filtered rows five at a time on request.

use std::io::Write;
use std::ops::Range;

use bikeshare_trips::table::TripTable;

use crate::CliError;
use crate::input::LineSource;
use crate::prompts::{Answer, ask_yes_no};
use crate::render;

/// Rows shown per page.
pub const PAGE_SIZE: usize = 5;

const FIRST_PROMPT: &str = "Would you like to see the first 5 lines of raw data? (y) (n)";
const NEXT_PROMPT: &str = "Continue with the next 5 lines? (y) (n)";
const EXHAUSTED: &str = "No more raw data to display.";

/// Cursor over a table of `len` rows. Each page starts where the previous
/// one ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RawDataPager {
    cursor: usize,
    len: usize,
}

impl RawDataPager {
    #[must_use]
    pub const fn new(len: usize) -> Self {
        Self { cursor: 0, len }
    }

    /// Index of the first row not yet shown.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.cursor >= self.len
    }

    /// Question to ask before the next page.
    #[must_use]
    pub const fn prompt(&self) -> &'static str {
        if self.cursor == 0 {
            FIRST_PROMPT
        } else {
            NEXT_PROMPT
        }
    }

    /// Moves past the next page and returns its row range, or `None` once
    /// every row has been shown.
    pub fn advance(&mut self) -> Option<Range<usize>> {
        if self.is_exhausted() {
            return None;
        }
        let start = self.cursor;
        let end = (start + PAGE_SIZE).min(self.len);
        self.cursor = end;
        Some(start..end)
    }
}

/// Offers pages of `table` until the user declines or the rows run out.
/// Returns the number of rows shown.
///
/// # Errors
///
/// Returns [`CliError`] if input is closed or output cannot be written.
pub fn run_pager<I, W>(input: &mut I, out: &mut W, table: &TripTable) -> Result<usize, CliError>
where
    I: LineSource + ?Sized,
    W: Write + ?Sized,
{
    let mut pager = RawDataPager::new(table.len());
    loop {
        if pager.is_exhausted() {
            writeln!(out, "{EXHAUSTED}")?;
            break;
        }
        if ask_yes_no(input, out, pager.prompt())? == Answer::No {
            break;
        }
        if let Some(range) = pager.advance() {
            let page = table.page(range.start, PAGE_SIZE);
            for (position, trip) in range.zip(page) {
                render::raw_trip(out, table, position, trip)?;
                writeln!(out)?;
            }
        }
    }
    log::debug!("Pager showed {} of {} rows", pager.cursor(), table.len());
    Ok(pager.cursor())
}
