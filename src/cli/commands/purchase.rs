use ccard_core::{
    format::{self, FormatSettings},
    CoreError, PurchaseDraft, PurchaseService, StatementService,
};
use ccard_domain::Purchase;

use crate::cli::args::{
    parse_category, parse_date, parse_installments, parse_period, parse_value, ParsedArgs,
};
use crate::cli::core::{CommandError, CommandResult, ShellContext};
use crate::cli::io;
use crate::cli::output::{line, section};
use crate::cli::registry::CommandEntry;

const SHORT_ID_LEN: usize = 8;

pub(crate) fn definitions() -> Vec<CommandEntry> {
    vec![
        CommandEntry::new(
            "add",
            "Record a purchase",
            "add <name> <value> <category> [--date DATE] [--desc TEXT] [--installments C/T]",
            cmd_add,
        ),
        CommandEntry::new(
            "edit",
            "Change fields of a purchase",
            "edit <id> [--name N] [--value V] [--category C] [--date DATE] [--desc TEXT] [--installments C/T]",
            cmd_edit,
        ),
        CommandEntry::new("delete", "Remove a purchase", "delete <id>", cmd_delete),
        CommandEntry::new("show", "Show one purchase in detail", "show <id>", cmd_show),
        CommandEntry::new(
            "list",
            "List all purchases, or those of one statement",
            "list [MM/YYYY]",
            cmd_list,
        ),
    ]
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(args, &["date", "desc", "installments"])?;
    let [name, value, category] = parsed.positional[..] else {
        return Err(CommandError::InvalidArguments(
            "usage: add <name> <value> <category> [--date DATE] [--desc TEXT] [--installments C/T]"
                .into(),
        ));
    };

    let date = match parsed.option("date") {
        Some(raw) => parse_date(raw, &context.settings, context.today())?,
        None => context.today(),
    };
    let value = parse_value(value, &context.settings)?;
    let mut draft = PurchaseDraft::new(name, value, parse_category(category)?, date);
    if let Some(description) = parsed.option("desc") {
        draft = draft.with_description(description);
    }
    if let Some(raw) = parsed.option("installments") {
        let (current, total) = parse_installments(raw)?;
        draft = draft.with_installments(current, total);
    }

    let purchase = PurchaseService::create(draft)?;
    context.book.add(purchase.clone())?;
    io::print_success(format!(
        "Added `{}` ({}) to statement {} [id {}].",
        purchase.name,
        format::currency(purchase.value(), &context.settings),
        format::period_label(purchase.statement_period(), &context.settings),
        short_id(&purchase.id)
    ));
    Ok(())
}

fn cmd_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let parsed = ParsedArgs::parse(
        args,
        &["name", "value", "category", "date", "desc", "installments"],
    )?;
    let ([id], true) = (&parsed.positional[..], parsed.has_options()) else {
        return Err(CommandError::InvalidArguments(
            "usage: edit <id> followed by at least one --field option".into(),
        ));
    };
    let Some(existing) = find_purchase(context, id)? else {
        io::print_warning(format!("No purchase matches `{id}`; nothing changed."));
        return Ok(());
    };

    let mut draft = PurchaseDraft::from(&existing);
    if let Some(name) = parsed.option("name") {
        draft.name = name.to_string();
    }
    if let Some(value) = parsed.option("value") {
        draft.value = parse_value(value, &context.settings)?;
    }
    if let Some(date) = parsed.option("date") {
        draft.date = parse_date(date, &context.settings, context.today())?;
    }
    if let Some(description) = parsed.option("desc") {
        draft.description = Some(description.to_string());
    }
    if let Some(category) = parsed.option("category") {
        draft.category = parse_category(category)?;
        if !draft.category.requires_installments() {
            draft.current_installment = None;
            draft.total_installments = None;
        }
    }
    if let Some(raw) = parsed.option("installments") {
        let (current, total) = parse_installments(raw)?;
        draft.current_installment = Some(current);
        draft.total_installments = Some(total);
    }

    let revised = PurchaseService::revise(&existing, draft)?;
    context.book.update(revised.clone())?;
    io::print_success(format!(
        "Updated `{}`; now on statement {}.",
        revised.name,
        format::period_label(revised.statement_period(), &context.settings)
    ));
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [id] = args else {
        return Err(CommandError::InvalidArguments("usage: delete <id>".into()));
    };
    let removed = match find_purchase(context, id)? {
        Some(purchase) => context.book.remove(&purchase.id)?.then_some(purchase),
        None => None,
    };
    match removed {
        Some(purchase) => io::print_success(format!("Deleted `{}`.", purchase.name)),
        None => io::print_info(format!("No purchase matches `{id}`; nothing deleted.")),
    }
    Ok(())
}

fn cmd_show(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [id] = args else {
        return Err(CommandError::InvalidArguments("usage: show <id>".into()));
    };
    let purchase =
        find_purchase(context, id)?.ok_or_else(|| CoreError::PurchaseNotFound(id.to_string()))?;
    let settings = &context.settings;

    section(&purchase.name);
    line(format!("  Id          : {}", purchase.id));
    line(format!(
        "  Value       : {}",
        format::currency(purchase.value(), settings)
    ));
    line(format!("  Category    : {}", purchase.category()));
    line(format!("  Date        : {}", format::date(purchase.date, settings)));
    line(format!(
        "  Statement   : {}",
        format::period_label(purchase.statement_period(), settings)
    ));
    if let Some(description) = &purchase.description {
        line(format!("  Description : {}", description));
    }
    if let (Some(plan), Some(amount)) = (purchase.installments(), purchase.installment_value()) {
        line(format!(
            "  Installment : {} of {}",
            plan,
            format::currency(amount, settings)
        ));
        for slot in StatementService::installment_schedule(&purchase) {
            line(format!(
                "    {:>3}/{:<3} {:<16} {}",
                slot.number,
                slot.total,
                format::period_label(slot.period, settings),
                format::currency(slot.amount, settings)
            ));
        }
    }
    Ok(())
}

fn cmd_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let (title, purchases) = match args {
        [] => {
            let mut all = context.book.list()?;
            all.sort_by(|a, b| a.date.cmp(&b.date).then_with(|| a.id.cmp(&b.id)));
            ("All purchases".to_string(), all)
        }
        [raw] => {
            let period = parse_period(raw)?;
            let statement = context.book.statement(period)?;
            (
                format!(
                    "Statement {}",
                    format::period_label(period, &context.settings)
                ),
                statement.purchases,
            )
        }
        _ => return Err(CommandError::InvalidArguments("usage: list [MM/YYYY]".into())),
    };

    section(title);
    if purchases.is_empty() {
        io::print_info("No purchases.");
        return Ok(());
    }
    for purchase in &purchases {
        line(purchase_row(purchase, &context.settings));
    }
    Ok(())
}

/// One table line: short id, date, name, category and value.
pub(crate) fn purchase_row(purchase: &Purchase, settings: &FormatSettings) -> String {
    let name = match purchase.installments() {
        Some(plan) => format!("{} ({})", purchase.name, plan),
        None => purchase.name.clone(),
    };
    format!(
        "  {:<8} {:<10} {:<24} {:<22} {:>14}",
        short_id(&purchase.id),
        format::date(purchase.date, settings),
        name,
        purchase.category(),
        format::currency(purchase.value(), settings)
    )
}

fn short_id(id: &str) -> &str {
    id.char_indices()
        .nth(SHORT_ID_LEN)
        .map_or(id, |(index, _)| &id[..index])
}

/// Exact id, or a unique id prefix as shown by `list`.
fn find_purchase(context: &ShellContext, raw: &str) -> Result<Option<Purchase>, CommandError> {
    if let Some(purchase) = context.book.get(raw)? {
        return Ok(Some(purchase));
    }
    let mut matches: Vec<Purchase> = context
        .book
        .list()?
        .into_iter()
        .filter(|purchase| purchase.id.starts_with(raw))
        .collect();
    match matches.len() {
        0 => Ok(None),
        1 => Ok(matches.pop()),
        count => Err(CommandError::InvalidArguments(format!(
            "`{raw}` matches {count} purchases; type more of the id"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use crate::cli::core::testing::{run, session};
    use crate::cli::core::CommandError;
    use ccard_core::CoreError;
    use ccard_domain::Category;
    use chrono::NaiveDate;

    fn day(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn add_defaults_to_today_and_single_installment() {
        let (mut context, _guard) = session(day(2024, 3, 20));
        run(&mut context, &["add Sofa 1200 installments --desc \"living room\""]);

        let purchase = context.book.list().unwrap().remove(0);
        assert_eq!(purchase.date, day(2024, 3, 20));
        assert_eq!(purchase.description.as_deref(), Some("living room"));
        let plan = purchase.installments().unwrap();
        assert_eq!((plan.current(), plan.total()), (1, 1));
    }

    #[test]
    fn add_rejects_installments_on_other_categories() {
        let (mut context, _guard) = session(day(2024, 3, 20));
        assert!(context
            .process_line("add Uber 20 transport --installments 1/2")
            .is_err());
        assert!(context.book.list().unwrap().is_empty());
    }

    #[test]
    fn edit_moves_purchase_between_statements() {
        let (mut context, _guard) = session(day(2024, 3, 20));
        run(&mut context, &["add Lunch 40 food --date 2024-03-02"]);
        let id = context.book.list().unwrap()[0].id.clone();

        let edit = format!("edit {} --date 2024-03-15 --value 45,90", &id[..8]);
        run(&mut context, &[edit.as_str()]);

        let edited = context.book.get(&id).unwrap().unwrap();
        assert_eq!(edited.value(), 45.9);
        assert_eq!(edited.statement_period().month(), 4);
    }

    #[test]
    fn edit_away_from_installments_clears_plan() {
        let (mut context, _guard) = session(day(2024, 3, 20));
        run(&mut context, &["add TV 300 installments --installments 2/3"]);
        let id = context.book.list().unwrap()[0].id.clone();

        let edit = format!("edit {id} --category leisure");
        run(&mut context, &[edit.as_str()]);

        let edited = context.book.get(&id).unwrap().unwrap();
        assert_eq!(edited.category(), Category::Leisure);
        assert!(edited.installments().is_none());
    }

    #[test]
    fn unknown_ids_are_no_ops() {
        let (mut context, _guard) = session(day(2024, 3, 20));
        run(
            &mut context,
            &[
                "add Bus 4,40 transport",
                "delete does-not-exist",
                "edit does-not-exist --value 10",
            ],
        );
        assert_eq!(context.book.list().unwrap().len(), 1);
    }

    #[test]
    fn show_reports_unknown_ids() {
        let (mut context, _guard) = session(day(2024, 3, 20));
        run(&mut context, &["add Bus 4,40 transport"]);

        let err = context.process_line("show nope").unwrap_err();
        assert!(matches!(
            err,
            CommandError::Core(CoreError::PurchaseNotFound(id)) if id == "nope"
        ));
    }

    #[test]
    fn values_follow_the_locale_grouping() {
        let (mut context, _guard) = session(day(2024, 3, 20));
        run(&mut context, &["add Notebook 3.499 leisure"]);
        assert_eq!(context.book.list().unwrap()[0].value(), 3499.0);
    }

    #[test]
    fn delete_removes_by_id() {
        let (mut context, _guard) = session(day(2024, 3, 20));
        run(&mut context, &["add Bus 4,40 transport"]);
        let id = context.book.list().unwrap()[0].id.clone();
        let delete = format!("delete {id}");
        run(&mut context, &[delete.as_str()]);
        assert!(context.book.list().unwrap().is_empty());
    }

    #[test]
    fn short_ids_truncate_on_char_boundaries() {
        assert_eq!(super::short_id("abc"), "abc");
        assert_eq!(super::short_id("0123456789"), "01234567");
    }
}
