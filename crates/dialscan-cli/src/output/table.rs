use dialscan_core::batch::BatchReport;
use dialscan_core::model::TextLine;
use dialscan_core::Inspection;

pub fn print_contacts(report: &BatchReport) {
    let multi_source = report
        .rows
        .first()
        .map(|first| report.rows.iter().any(|r| r.source_file != first.source_file))
        .unwrap_or(false);

    let name_width = report
        .rows
        .iter()
        .map(|r| r.name.chars().count())
        .max()
        .unwrap_or(4)
        .max(4);

    if multi_source {
        println!("  {:<name_width$}  {:<14}  Source", "Name", "Mobile");
    } else {
        println!("  {:<name_width$}  Mobile", "Name");
    }

    for row in &report.rows {
        if multi_source {
            println!(
                "  {:<name_width$}  {:<14}  {}",
                row.name, row.mobile, row.source_file
            );
        } else {
            println!("  {:<name_width$}  {}", row.name, row.mobile);
        }
    }

    println!();
    println!(
        "  Images: {}, Contacts: {}, Failed images: {}",
        report.images, report.contacts, report.failed
    );
}

pub fn print_inspection(inspection: &Inspection) {
    println!(
        "Image: {}x{} (name column x<{}, phone column x>={})\n",
        inspection.width,
        inspection.height,
        inspection.split.name.width,
        inspection.split.phone.x
    );

    println!("=== Phone column ===\n");
    print_lines(&inspection.phone_lines);
    if inspection.phones.is_empty() {
        println!("  No valid phone numbers.");
    } else {
        println!("  Phones:");
        for p in &inspection.phones {
            println!("    y={:>7.1}  {}", p.center_y, p.phone);
        }
    }
    println!();

    println!("=== Name column ===\n");
    print_lines(&inspection.name_lines);
    if inspection.names.is_empty() {
        println!("  No usable names.");
    } else {
        println!("  Names:");
        for n in &inspection.names {
            println!("    y={:>7.1}  {:<6}  {}", n.center_y, n.strength, n.name);
        }
    }
    println!();
}

fn print_lines(lines: &[TextLine]) {
    for line in lines {
        println!(
            "  y={:>7.1}  [{} fragment(s)]  {}",
            line.center_y,
            line.fragments.len(),
            line.text
        );
    }
    println!();
}
