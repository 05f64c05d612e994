use comfy_table::presets::ASCII_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};
use flanker::config::{ExperimentConfig, ResponseKeys};
use flanker::design::{points_to_euro, Direction, ScaleType};
use flanker::session::SessionReport;
use flanker::trials::{TrialCondition, TrialListBuilder};

fn scale_cell(scale: ScaleType) -> Cell {
    match scale {
        ScaleType::Probabilistic => Cell::new(scale).fg(Color::Cyan),
        ScaleType::Deterministic => Cell::new(scale).fg(Color::Yellow),
    }
}

pub fn print_block_plan(builder: &TrialListBuilder, config: &ExperimentConfig) {
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("Block").add_attribute(Attribute::Bold),
        Cell::new("Kind"),
        Cell::new("Scale"),
        Cell::new("Trials"),
    ]);

    let mut total = 0;
    for block in 0..config.design.n_blocks {
        let n = builder.trials_in_block(block);
        total += n;
        let kind = if block == 0 { "practice" } else { "test" };
        table.add_row(vec![
            Cell::new(block).add_attribute(Attribute::Bold),
            Cell::new(kind),
            scale_cell(builder.scale_for_block(block)),
            Cell::new(n),
        ]);
    }
    table.add_row(vec![
        Cell::new("Total").add_attribute(Attribute::Bold),
        Cell::new(""),
        Cell::new(""),
        Cell::new(total).add_attribute(Attribute::Bold),
    ]);

    if let Some(col) = table.column_mut(3) {
        col.set_cell_alignment(CellAlignment::Right);
    }
    println!("\n{}", table);

    let per_block = builder.trials_in_block(1);
    println!(
        "⏱️  Estimated duration (excluding breaks and instructions): {:.1} minutes",
        config.estimated_minutes(per_block)
    );
}

pub fn print_trial_list(block: usize, trials: &[TrialCondition], keys: &ResponseKeys) {
    println!("\nBlock {} trial order:", block);
    let mut table = Table::new();
    table
        .load_preset(ASCII_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);

    table.add_row(vec![
        Cell::new("#").add_attribute(Attribute::Bold),
        Cell::new("Tag"),
        Cell::new("Bin"),
        Cell::new("Base"),
        Cell::new("Congruency"),
        Cell::new("Stimulus"),
        Cell::new("Key"),
        Cell::new("Scale"),
    ]);

    for (i, t) in trials.iter().enumerate() {
        let key = match t.correct {
            Direction::Left => keys.left_key,
            Direction::Right => keys.right_key,
        };
        table.add_row(vec![
            Cell::new(i),
            Cell::new(t.tag),
            Cell::new(t.bin),
            Cell::new(t.bin_size).set_alignment(CellAlignment::Right),
            Cell::new(t.congruency),
            Cell::new(t.congruency.glyphs()).set_alignment(CellAlignment::Center),
            Cell::new(key).set_alignment(CellAlignment::Center),
            scale_cell(t.scale_type),
        ]);
    }
    println!("{}", table);
}

pub fn print_session_report(report: &SessionReport) {
    let totals = &report.state.totals;
    let total = totals.total_reward();

    let mut table = Table::new();
    table.load_preset(ASCII_FULL);
    table.add_row(vec![
        Cell::new("Session").add_attribute(Attribute::Bold),
        Cell::new("Value").add_attribute(Attribute::Bold),
    ]);
    table.add_row(vec![Cell::new("Blocks"), Cell::new(report.blocks_run)]);
    table.add_row(vec![Cell::new("Trials presented"), Cell::new(report.trials_run)]);
    table.add_row(vec![Cell::new("Scored trials"), Cell::new(totals.trials())]);
    table.add_row(vec![
        Cell::new("Accuracy"),
        Cell::new(format!("{:.1}%", totals.accuracy_pct())),
    ]);
    table.add_row(vec![
        Cell::new("Total reward"),
        Cell::new(total).fg(Color::Green),
    ]);
    table.add_row(vec![
        Cell::new("Monetary"),
        Cell::new(format!("{:.2} EUR", points_to_euro(total))),
    ]);
    table.add_row(vec![
        Cell::new("Final deadline"),
        Cell::new(format!("{:.2}s", report.state.deadline)),
    ]);

    if let Some(col) = table.column_mut(1) {
        col.set_cell_alignment(CellAlignment::Right);
    }
    println!("\n{}", table);
}
