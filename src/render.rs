//! Plain-text rendering of list and detail views

use std::fmt::Write;

use pokedex_core::{DetailRecord, PageLink, Pagination};
use pokedex_filter::{DetailView, FilterOptions, ListView};

/// One line per record: number, name and types
pub fn record_line(record: &DetailRecord) -> String {
    format!(
        "#{:>4}  {:<14} {}",
        record.id,
        record.name,
        record.type_names().join("/")
    )
}

/// The page strip, with the current page in brackets
pub fn page_strip(pagination: &Pagination) -> String {
    pagination
        .page_numbers()
        .into_iter()
        .map(|link| match link {
            PageLink::Page(page) if page == pagination.current_page => format!("[{}]", page),
            PageLink::Page(page) => page.to_string(),
            PageLink::Ellipsis => "...".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

pub fn list_view(view: &ListView) -> String {
    let mut out = String::new();
    if let Some(message) = &view.error_message {
        let _ = writeln!(out, "error: {}", message);
    }
    if view.is_loading {
        let _ = writeln!(out, "loading...");
    }
    for display in &view.records {
        let _ = writeln!(out, "{}", record_line(&display.record));
    }
    if view.is_searching {
        let _ = writeln!(out, "{} matching", view.records.len());
    } else if view.total_pages > 0 {
        let _ = writeln!(
            out,
            "page {}/{} ({} total)  {}",
            view.current_page(),
            view.total_pages,
            view.total_count(),
            page_strip(&view.pagination)
        );
    }
    out
}

pub fn detail_view(view: &DetailView) -> String {
    let record = &view.record;
    let mut out = String::new();
    let _ = writeln!(out, "#{} {}", record.id, record.name);
    let _ = writeln!(out, "types: {}", record.type_names().join(", "));
    let _ = writeln!(out, "image: {}", view.image_url);
    if let Some(cry) = view.cry_url() {
        let _ = writeln!(out, "cry:   {}", cry);
    }
    out
}

pub fn filter_options(options: &FilterOptions) -> String {
    let mut out = String::new();
    for (label, names) in [
        ("types", &options.types),
        ("generations", &options.generations),
        ("abilities", &options.abilities),
        ("weaknesses", &options.weaknesses),
    ] {
        let _ = writeln!(out, "{} ({}): {}", label, names.len(), names.join(", "));
    }
    out
}
