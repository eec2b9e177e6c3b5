use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use growth_cli::batch::BatchOutcome;
use growth_cli::report::EvaluationReport;
use growth_engine::{BloodPressureCategory, BmiCategory};
use growth_model::{GrowthCategory, HeightForZ};
use growth_standards::TableSummary;

pub fn print_evaluation(report: &EvaluationReport) {
    let growth = &report.height_for_age;
    let mut table = Table::new();
    table.set_header(vec![header_cell("Measure"), header_cell("Value"), header_cell("Result")]);
    apply_table_style(&mut table);
    table.add_row(vec![
        Cell::new("Height-for-age"),
        Cell::new(format!("{:.1} cm, z = {:+.2}", report.height_cm, growth.z)),
        growth_cell(growth.category),
    ]);
    if let Some(bmi) = &report.bmi {
        table.add_row(vec![
            Cell::new("BMI"),
            Cell::new(format!("{:.1} kg/m²", bmi.value)),
            bmi_cell(bmi.category),
        ]);
    }
    if let Some(bp) = &report.blood_pressure {
        table.add_row(vec![
            Cell::new("Blood pressure"),
            Cell::new(format!("{}/{} mmHg", bp.systolic, bp.diastolic)),
            blood_pressure_cell(bp.category),
        ]);
    }
    println!("{}, {} years", report.sex, report.age_years);
    println!("{table}");
    println!(
        "Reference: {} ({}), row at {} months",
        growth.table, growth.method, growth.matched_age_months
    );
}

pub fn print_height(result: &HeightForZ) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Row (months)"),
        header_cell("Method"),
        header_cell("Z"),
        header_cell("Height (cm)"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    table.add_row(vec![
        Cell::new(result.table.id()).fg(Color::Blue),
        Cell::new(result.matched_age_months),
        Cell::new(result.method),
        Cell::new(format!("{:+.2}", result.z)),
        Cell::new(format!("{:.1}", result.height_cm)).add_attribute(Attribute::Bold),
    ]);
    println!("{table}");
}

pub fn print_batch(outcomes: &[BatchOutcome]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Line"),
        header_cell("ID"),
        header_cell("Z"),
        header_cell("Height-for-age"),
        header_cell("BMI"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Right);
    align_column(&mut table, 2, CellAlignment::Right);
    let mut failed = 0usize;
    for outcome in outcomes {
        let id = outcome.id.as_deref().map_or_else(|| dim_cell("-"), Cell::new);
        match &outcome.result {
            Ok(report) => table.add_row(vec![
                Cell::new(outcome.line),
                id,
                Cell::new(format!("{:+.2}", report.height_for_age.z)),
                growth_cell(report.height_for_age.category),
                report
                    .bmi
                    .map_or_else(|| dim_cell("-"), |bmi| bmi_cell(bmi.category)),
            ]),
            Err(message) => {
                failed += 1;
                table.add_row(vec![
                    Cell::new(outcome.line),
                    id,
                    dim_cell("-"),
                    Cell::new(message).fg(Color::Red),
                    dim_cell("-"),
                ])
            }
        };
    }
    println!("{table}");
    println!("{} rows, {} failed", outcomes.len(), failed);
}

pub fn print_tables(summaries: &[TableSummary]) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Source"),
        header_cell("Shape"),
        header_cell("Rows"),
        header_cell("Dropped"),
        header_cell("Ages (months)"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    for summary in summaries {
        let source = summary
            .source
            .as_ref()
            .map_or_else(|| dim_cell("-"), |path| Cell::new(path.display()));
        let row = match &summary.unavailable {
            None => vec![
                Cell::new(summary.key.id())
                    .fg(Color::Blue)
                    .add_attribute(Attribute::Bold),
                source,
                summary
                    .shape
                    .map_or_else(|| dim_cell("-"), Cell::new),
                Cell::new(summary.rows),
                count_cell(summary.dropped, Color::Yellow),
                summary.age_range.map_or_else(
                    || dim_cell("-"),
                    |(low, high)| Cell::new(format!("{low}-{high}")),
                ),
            ],
            Some(reason) => vec![
                Cell::new(summary.key.id()).fg(Color::DarkGrey),
                source,
                Cell::new(format!("unavailable: {reason}")).fg(Color::Red),
                dim_cell("-"),
                dim_cell("-"),
                dim_cell("-"),
            ],
        };
        table.add_row(row);
    }
    println!("{table}");
}

pub fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn growth_cell(category: GrowthCategory) -> Cell {
    let color = match category {
        GrowthCategory::SevereStunting => Color::Red,
        GrowthCategory::Stunted => Color::Yellow,
        GrowthCategory::Normal => Color::Green,
        GrowthCategory::Tall => Color::Cyan,
    };
    Cell::new(category).fg(color).add_attribute(Attribute::Bold)
}

fn bmi_cell(category: BmiCategory) -> Cell {
    let color = match category {
        BmiCategory::Normal => Color::Green,
        BmiCategory::Underweight | BmiCategory::Overweight => Color::Yellow,
        BmiCategory::Obese => Color::Red,
    };
    Cell::new(category).fg(color)
}

fn blood_pressure_cell(category: BloodPressureCategory) -> Cell {
    let color = match category {
        BloodPressureCategory::Unreliable => Color::DarkGrey,
        BloodPressureCategory::Normal => Color::Green,
        BloodPressureCategory::Elevated => Color::Yellow,
        BloodPressureCategory::Stage1Hypertension | BloodPressureCategory::Stage2Hypertension => {
            Color::Red
        }
    };
    Cell::new(category).fg(color)
}

fn count_cell(count: usize, color: Color) -> Cell {
    if count > 0 {
        Cell::new(count).fg(color).add_attribute(Attribute::Bold)
    } else {
        dim_cell(count)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
