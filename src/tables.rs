use battery_health::{
    Report,
    Severity,
    quantity::proportions::Percent,
    recommendation::{MONITORING_BELOW, REPLACEMENT_BELOW},
};
use comfy_table::{Attribute, Cell, CellAlignment, Color, Table, modifiers, presets};

fn new_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL_CONDENSED)
        .apply_modifier(modifiers::UTF8_ROUND_CORNERS)
        .enforce_styling();
    table
}

const fn severity_color(severity: Severity) -> Color {
    match severity {
        Severity::Warning => Color::DarkYellow,
        Severity::Critical => Color::Red,
    }
}

fn state_of_health_color(state_of_health: Percent) -> Color {
    if state_of_health < REPLACEMENT_BELOW {
        Color::Red
    } else if state_of_health < MONITORING_BELOW {
        Color::DarkYellow
    } else {
        Color::Green
    }
}

pub fn build_summary_table(report: &Report) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Vehicle", "Timestamp", "SoH", "Full cycles", "Charge", "Discharge"]);
    table.add_row(vec![
        Cell::new(&report.vehicle_id).add_attribute(Attribute::Bold),
        Cell::new(report.timestamp.format("%Y-%m-%d %H:%M:%S")).add_attribute(Attribute::Dim),
        Cell::new(format!("{:.1}", report.soh_percent))
            .set_alignment(CellAlignment::Right)
            .fg(state_of_health_color(report.soh_percent)),
        Cell::new(format!("{:.2}", report.full_cycle_count)).set_alignment(CellAlignment::Right),
        Cell::new(report.charge_cycles).set_alignment(CellAlignment::Right),
        Cell::new(report.discharge_cycles).set_alignment(CellAlignment::Right),
    ]);
    table
}

pub fn build_findings_table(report: &Report) -> Table {
    let mut table = new_table();
    table.set_header(vec!["Severity", "Category", "Finding"]);
    for finding in &report.findings {
        table.add_row(vec![
            Cell::new(finding.severity).fg(severity_color(finding.severity)),
            Cell::new(finding.category).add_attribute(if finding.category.is_diagnostic() {
                Attribute::Italic
            } else {
                Attribute::Dim
            }),
            Cell::new(&finding.message),
        ]);
    }
    table
}

pub fn build_recommendations_table(report: &Report) -> Table {
    let mut table = new_table();
    table.set_header(vec!["#", "Recommendation"]);
    let color = report.worst_severity().map_or(Color::Green, severity_color);
    for (index, recommendation) in report.recommendations.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1).add_attribute(Attribute::Dim),
            Cell::new(recommendation).fg(color),
        ]);
    }
    table
}
