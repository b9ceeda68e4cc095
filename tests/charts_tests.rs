use std::fs;

use ea_charge_report::charts::{
    load_plot_rows, render_temperature_scatter, render_timeline, scatter_points, timeline_bars,
};

const CSV: &str = "\
Filename,Date,Location,Address,Charger ID,Session ID,Plan Name,Charging Price,\
Session Start Time,Session End Time,Charging Time,Total Energy Delivered,Energy Billed,\
End State of Charge,Max Charging Speed,Charging Cost,Discount,Total Paid,\
Estimated Starting Charge,Effective Charging Speed,Minutes Charging,Average Temperature (°C)\n\
a.eml,03/14/2024,,,,,,,,,,,,80,187,,,,56.23,81.95,31.2,4.5\n\
b.eml,01/02/2024,,,,,,,,,,,,70,150,,,,20.0,60.0,45.0,-2.0\n\
c.eml,02/02/2024,,,,,,,,,,,,90,150,,,,not-a-number,60.0,45.0,3.0\n\
d.eml,,,,,,,,,,,,,,,,,,,,,\n";

#[test]
fn coerces_cells_and_excludes_incomplete_rows() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("charging_sessions.csv");
    fs::write(&path, CSV).unwrap();

    let rows = load_plot_rows(&path).unwrap();
    assert_eq!(rows.len(), 4);

    // Unparsable numeric cell is coerced to missing, not an error.
    assert_eq!(rows[2].estimated_start, None);
    assert_eq!(rows[2].speed, Some(60.0));

    // Timeline drops the junk row and the empty row, sorted date ascending.
    let bars = timeline_bars(&rows);
    assert_eq!(bars.len(), 2);
    assert_eq!(bars[0].start, 20.0);
    assert_eq!(bars[1].end, 80.0);

    // Scatter keeps the junk row (speed and minutes are fine) but not the
    // empty one.
    let points = scatter_points(&rows);
    assert_eq!(points.len(), 3);

    // Reading for charts leaves the persisted data untouched.
    assert_eq!(fs::read_to_string(&path).unwrap(), CSV);
}

#[test]
fn renders_both_charts_and_returns_their_paths() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("charging_sessions.csv");
    fs::write(&path, CSV).unwrap();
    let plots = dir.path().join("plots");

    let timeline = render_timeline(&path, &plots).unwrap();
    let scatter = render_temperature_scatter(&path, &plots).unwrap();

    assert_eq!(timeline, plots.join("charge_timeline.png"));
    assert_eq!(scatter, plots.join("temperature_vs_charge_rate.png"));
    assert!(fs::metadata(&timeline).unwrap().len() > 0);
    assert!(fs::metadata(&scatter).unwrap().len() > 0);
    assert_eq!(fs::read_to_string(&path).unwrap(), CSV);
}
