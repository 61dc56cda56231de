use ccard_core::{format, StatementService, SummaryService};
use ccard_domain::{Category, MonthlyStatement};

use crate::cli::args::parse_period;
use crate::cli::commands::purchase::purchase_row;
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::{line, section};
use crate::cli::registry::CommandEntry;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "statement",
            "Show the selected statement and the next one, or a given month",
            "statement [MM/YYYY]",
            cmd_statement,
        ),
        CommandEntry::new(
            "month",
            "Select a statement month from the window",
            "month <MM/YYYY>",
            cmd_month,
        ),
        CommandEntry::new("prev", "Select the previous statement month", "prev", cmd_prev),
        CommandEntry::new("next", "Select the following statement month", "next", cmd_next),
        CommandEntry::new(
            "months",
            "List the statement months available for browsing",
            "months",
            cmd_months,
        ),
        CommandEntry::new(
            "categories",
            "List purchase categories",
            "categories",
            cmd_categories,
        ),
    ]
}

fn cmd_statement(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => show_selected(context),
        [raw] => {
            let statement = context.book.statement(parse_period(raw)?)?;
            render_statement(context, &statement);
            Ok(())
        }
        _ => Err(CommandError::InvalidArguments(
            "usage: statement [MM/YYYY]".into(),
        )),
    }
}

fn cmd_month(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [raw] = args else {
        return Err(CommandError::InvalidArguments("usage: month <MM/YYYY>".into()));
    };
    context.browser.select(parse_period(raw)?)?;
    show_selected(context)
}

fn cmd_prev(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if !context.browser.select_previous() {
        io::print_warning("Already at the oldest statement in the window.");
        return Ok(());
    }
    show_selected(context)
}

fn cmd_next(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if !context.browser.select_next() {
        io::print_warning("Already at the current month's statement.");
        return Ok(());
    }
    show_selected(context)
}

fn cmd_months(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let purchases = context.book.list()?;
    let selected = context.browser.selected();

    section("Statement months");
    for period in context.browser.window() {
        let statement = StatementService::statement_for(&purchases, *period);
        let marker = if *period == selected { '*' } else { ' ' };
        line(format!(
            "{} {}  {:<16} {:>3} purchase(s) {:>14}",
            marker,
            period,
            format::period_label(*period, &context.settings),
            statement.len(),
            format::currency(SummaryService::grand_total(&statement.purchases), &context.settings)
        ));
    }
    Ok(())
}

fn cmd_categories(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    section("Categories");
    for category in Category::ALL {
        let note = if category.requires_installments() {
            "  (takes --installments C/T, default 1/1)"
        } else {
            ""
        };
        line(format!("  {:<14} {}{}", category.keyword(), category.label(), note));
    }
    Ok(())
}

fn show_selected(context: &mut ShellContext) -> CommandResult {
    let pair = context.browser.statements(&context.book)?;
    render_statement(context, &pair.current);
    render_statement(context, &pair.next);
    Ok(())
}

/// Purchases of one statement followed by its per-category breakdown.
fn render_statement(context: &ShellContext, statement: &MonthlyStatement) {
    let settings = &context.settings;
    section(format!(
        "Statement {} ({})",
        format::period_label(statement.period, settings),
        statement.period
    ));
    let period = statement.period;
    if let (Some(start), Some(end)) = (period.cycle_start(), period.cycle_end()) {
        line(format!(
            "  Billing cycle: {} to {}",
            format::date(start, settings),
            format::date(end, settings)
        ));
    }
    if statement.is_empty() {
        io::print_info("No purchases on this statement.");
        return;
    }

    for purchase in &statement.purchases {
        line(purchase_row(purchase, settings));
    }

    let summary = SummaryService::summarize(&statement.purchases);
    line("");
    for share in &summary.ranked {
        line(format!(
            "  {:<22} {:>14} {:>7}",
            share.category.label(),
            format::currency(share.total, settings),
            format::percent(share.share)
        ));
    }
    line(format!(
        "  {:<22} {:>14}",
        "Total",
        format::currency(summary.grand_total, settings)
    ));
}
