use crate::infra::{parse_density, seed_board};
use clap::Args;
use loan_rules::config::AppConfig;
use loan_rules::error::AppError;
use loan_rules::rules::{render_row, CommitOutcome, Density, RuleBoard, RuleId};
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct RulesListArgs {
    /// Parameter sheet (CSV) to load instead of the standard auto-loan rules
    #[arg(long)]
    pub(crate) csv: Option<PathBuf>,
    /// Row density: compact, comfortable or spacious
    #[arg(long, value_parser = parse_density)]
    pub(crate) density: Option<Density>,
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Row density: compact, comfortable or spacious
    #[arg(long, value_parser = parse_density)]
    pub(crate) density: Option<Density>,
}

pub(crate) fn run_rules_list(args: RulesListArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let density = args.density.unwrap_or(config.board.default_density);
    let csv = args.csv.or(config.board.seed_csv);

    let board = seed_board(csv.as_deref())?;
    match &csv {
        Some(path) => println!("Rule board from {}", path.display()),
        None => println!("Rule board (standard auto-loan rules)"),
    }
    println!("{}", render_board(&board, density));
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let density = args.density.unwrap_or(Density::Compact);
    let mut board = seed_board(None)?;
    board.on_render(|order| {
        let ids: Vec<&str> = order.iter().map(RuleId::as_str).collect();
        println!("  redraw -> [{}]", ids.join(", "));
    });

    println!("Loan rule board demo ({density} rows)");
    println!("{}", render_board(&board, density));

    if board.order().len() < 3 {
        println!("Not enough rules to run the demo");
        return Ok(());
    }
    let first = board.order()[0].clone();
    let last = board.order()[board.order().len() - 1].clone();

    println!("\nDrag '{last}' onto '{first}' and drop");
    board.start_drag(&last)?;
    board.hover(&first)?;
    report(board.drop_dragged()?);

    let [first, second, third] = leading_three(&board);
    println!("\nDrag '{second}' over itself and drop");
    board.start_drag(&second)?;
    board.hover(&second)?;
    report(board.drop_dragged()?);

    println!("\nDrag '{second}', hover '{third}', then cancel");
    board.start_drag(&second)?;
    board.hover(&third)?;
    match board.start_drag(&third) {
        Ok(_) => println!("  unexpected second drag accepted"),
        Err(err) => println!("  second drag rejected: {err}"),
    }
    println!("  {}", cancel_gesture(&mut board));

    println!("\nDrag '{first}', delete '{third}' mid-gesture, hover '{second}', drop");
    board.start_drag(&first)?;
    board.delete_rule(&third)?;
    board.hover(&second)?;
    report(board.drop_dragged()?);

    println!("\nFinal board ({} rows)", density.toggle());
    println!("{}", render_board(&board, density.toggle()));
    Ok(())
}

/// Cancel the active drag and describe what happened to the order.
fn cancel_gesture(board: &mut RuleBoard) -> String {
    let before = board.order().to_vec();
    let cancelled = board.cancel_drag();
    let after = board.order();

    match cancelled {
        None => "no drag to cancel".to_string(),
        Some(session) if before.as_slice() == after => {
            format!("cancelled drag of {}, order unchanged", session.source)
        }
        Some(session) => {
            let ids: Vec<&str> = after.iter().map(RuleId::as_str).collect();
            format!(
                "cancelled drag of {}, order is now [{}]",
                session.source,
                ids.join(", ")
            )
        }
    }
}

fn leading_three(board: &RuleBoard) -> [RuleId; 3] {
    let order = board.order();
    [order[0].clone(), order[1].clone(), order[2].clone()]
}

fn report(outcome: CommitOutcome) {
    match outcome {
        CommitOutcome::Moved { rule_id, from, to } => {
            println!("  committed: {rule_id} moved {} -> {}", from + 1, to + 1)
        }
        CommitOutcome::Unchanged { rule_id } => println!("  committed: {rule_id} stayed put"),
        CommitOutcome::TargetVanished { rule_id, target } => {
            println!("  dropped: {target} is gone, {rule_id} left in place")
        }
    }
}

pub(crate) fn render_board(board: &RuleBoard, density: Density) -> String {
    board
        .rules()
        .iter()
        .map(|positioned| render_row(positioned.position, &positioned.rule, density))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_board_lists_every_rule() {
        let board = seed_board(None).expect("standard board");
        let rendered = render_board(&board, Density::Compact);
        assert_eq!(rendered.lines().count(), board.rules().len());
        assert!(rendered.starts_with("1. Minimum credit score [credit-score-floor]"));
    }

    #[test]
    fn cancel_gesture_reports_order_after_cancel() {
        let mut board = seed_board(None).expect("standard board");
        let [first, _, third] = leading_three(&board);
        let before = board.order().to_vec();

        board.start_drag(&first).expect("first present");
        board.hover(&third).expect("dragging");
        let message = cancel_gesture(&mut board);

        assert_eq!(message, format!("cancelled drag of {first}, order unchanged"));
        assert_eq!(board.order(), before.as_slice());
        assert_eq!(cancel_gesture(&mut board), "no drag to cancel");
    }

    #[test]
    fn demo_runs_to_completion() {
        run_demo(DemoArgs::default()).expect("demo succeeds");
    }
}
