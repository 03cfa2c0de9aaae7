//! Terminal rendering of published view states
//!
//! Mechanical card construction only; all state lives in the core.

use console::style;
use paperdeck_browse::{RenderedView, ViewState};
use paperdeck_common::{DateCatalog, MergedPaper};

/// Print whatever the coordinator currently publishes.
pub fn print_view(view: &ViewState) {
    match view {
        ViewState::Idle => {}
        ViewState::Loading => println!("{}", style("Loading...").dim()),
        ViewState::Failed { message } => {
            println!("{}", style("Failed to load data, please retry.").red());
            println!("{}", style(message).dim());
            println!("papers: 0");
        }
        ViewState::Rendered(rendered) => print_rendered(rendered),
    }
}

fn print_rendered(view: &RenderedView) {
    match &view.summary {
        None => {
            // empty selection: the chosen window covers no dates
            println!("{}", style("No data in the selected window.").yellow());
            println!("papers: 0");
            return;
        }
        Some(summary) => println!("{}", style(summary).cyan()),
    }

    if view.papers.is_empty() {
        println!("{}", style("No matching papers.").yellow());
        println!("papers: 0");
        return;
    }

    for merged in &view.papers {
        print_card(merged, view.show_translated);
    }
    println!("papers: {}", view.total);
}

fn print_card(merged: &MergedPaper, show_translated: bool) {
    let paper = &merged.paper;

    println!();
    println!("{}", style(paper.display_title(show_translated)).bold());
    if show_translated && paper.title_zh.is_some() {
        println!("  {}", style(format!("original: {}", paper.title)).dim());
    }
    println!("  {}  {}", style(&paper.id).cyan(), style(&paper.url).underlined());
    if !paper.authors.is_empty() {
        println!("  {}", paper.authors);
    } else {
        println!("  {}", style("unknown authors").dim());
    }
    let tags = paper.tags();
    if !tags.is_empty() {
        println!("  [{}]", tags.join("] ["));
    }
    if !paper.subjects.is_empty() {
        println!("  {}", style(&paper.subjects).dim());
    }
    println!("  {}", style(format!("from {}", merged.source_date)).dim());
}

/// List the catalog dates and their paper counts, newest first.
pub fn print_dates(catalog: &DateCatalog) {
    for entry in &catalog.dates {
        println!("{}  ({} papers)", entry.date, entry.count);
    }
    println!(
        "{} dates, {} papers total",
        catalog.len(),
        catalog.total_count()
    );
}
