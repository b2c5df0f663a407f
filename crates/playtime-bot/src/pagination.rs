//! Page slicing and display text for result sets
//!
//! Pages are derived on every render from the full result set and a requested
//! index; nothing about the current page is stored anywhere.

use std::fmt::Write;

use playtime_types::{Entry, ResultSet};

pub const PAGE_SIZE: usize = 10;

/// `ceil(count / PAGE_SIZE)`, never less than one so an empty list still has
/// a page to show.
pub fn total_pages(count: usize) -> usize {
    count.div_ceil(PAGE_SIZE).max(1)
}

/// Clamp a requested page (which may be negative or past the end after a
/// navigation step) into `0..total_pages(count)`.
pub fn clamp_page(requested: i64, count: usize) -> usize {
    let last = (total_pages(count) - 1) as i64;
    requested.clamp(0, last) as usize
}

/// Whole hours, floored: 59 minutes is still "Less than one hour".
pub fn duration_label(minutes: u64) -> String {
    match minutes / 60 {
        0 => "Less than one hour".to_string(),
        1 => "1 hour".to_string(),
        hours => format!("{} hours", hours),
    }
}

/// One displayed line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRow {
    pub entry: Entry,
    pub duration: String,
}

/// A single page of a result set, with everything needed to render it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageView {
    pub title: String,
    pub thumbnail_url: String,
    /// Zero-based, already clamped
    pub page: usize,
    pub total_pages: usize,
    pub total_items: usize,
    pub rows: Vec<PageRow>,
    /// Banner of the first row, or empty for an empty page
    pub banner_url: String,
}

impl PageView {
    /// Markdown body: one `[**name**](url) — duration` line per row.
    pub fn body(&self) -> String {
        let mut body = String::new();
        for row in &self.rows {
            let _ = writeln!(
                body,
                "[**{}**]({}) — {}",
                row.entry.name, row.entry.url, row.duration
            );
        }
        body
    }

    /// "Page P/T", one-based
    pub fn page_label(&self) -> String {
        format!("Page {}/{}", self.page + 1, self.total_pages)
    }

    pub fn total_label(&self) -> String {
        format!("Total items: {}", self.total_items)
    }

    pub fn prev_disabled(&self) -> bool {
        self.page == 0
    }

    pub fn next_disabled(&self) -> bool {
        self.page + 1 >= self.total_pages
    }
}

/// Cut page `requested` (clamped) out of an already sorted result set.
pub fn paginate(set: &ResultSet, requested: i64) -> PageView {
    let count = set.len();
    let page = clamp_page(requested, count);
    let start = page * PAGE_SIZE;
    let end = (start + PAGE_SIZE).min(count);

    let rows: Vec<PageRow> = set.entries[start..end]
        .iter()
        .map(|entry| PageRow {
            entry: entry.clone(),
            duration: duration_label(entry.minutes),
        })
        .collect();

    let banner_url = rows
        .first()
        .map(|row| row.entry.banner_url.clone())
        .unwrap_or_default();

    PageView {
        title: set.title.clone(),
        thumbnail_url: set.thumbnail_url.clone(),
        page,
        total_pages: total_pages(count),
        total_items: count,
        rows,
        banner_url,
    }
}
