//! Pure tabular projection of a snapshot.
//!
//! Everything that displays or exports student records draws its cell
//! values from here — one header, one cell function — so a table on
//! screen and the two export formats cannot drift apart. Re-derivation
//! is total: `render` rebuilds the whole view from the snapshot, no
//! incremental diffing (record counts are small).

use rollcall_api::StudentRecord;

/// Column headers, in wire-contract order. Consumers script against
/// these strings; do not reorder or rename.
pub const HEADER: [&str; 9] = [
    "ID",
    "Email",
    "Last Name",
    "First Name",
    "Middle Initial",
    "Course",
    "Year",
    "Gender",
    "Graduating",
];

/// The `graduating` flag as displayed and exported.
pub fn graduating_label(graduating: bool) -> &'static str {
    if graduating { "Yes" } else { "No" }
}

/// Inverse of [`graduating_label`]. Total over its two labels.
pub fn graduating_from_label(label: &str) -> Option<bool> {
    match label {
        "Yes" => Some(true),
        "No" => Some(false),
        _ => None,
    }
}

/// Project one record into its nine cell values, in [`HEADER`] order.
///
/// `middle_initial` is already `""` when absent, so this is a plain
/// field-to-text mapping.
pub fn cells(record: &StudentRecord) -> [String; 9] {
    [
        record.id.to_string(),
        record.email.clone(),
        record.last_name.clone(),
        record.first_name.clone(),
        record.middle_initial.clone(),
        record.course.clone(),
        record.year.to_string(),
        record.gender.clone(),
        graduating_label(record.graduating).to_string(),
    ]
}

/// A fully derived table: header plus one row per record, snapshot order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub header: [&'static str; 9],
    pub rows: Vec<[String; 9]>,
}

/// Derive the complete table view from a snapshot.
pub fn render(snapshot: &[StudentRecord]) -> TableView {
    TableView {
        header: HEADER,
        rows: snapshot.iter().map(cells).collect(),
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn sample() -> StudentRecord {
        StudentRecord {
            id: 1,
            email: "a@x.com".into(),
            last_name: "Cruz".into(),
            first_name: "Ana".into(),
            middle_initial: String::new(),
            course: "BSCS".into(),
            year: 3,
            gender: "F".into(),
            graduating: true,
        }
    }

    #[test]
    fn scenario_row_matches_contract() {
        let row = cells(&sample());
        assert_eq!(
            row,
            ["1", "a@x.com", "Cruz", "Ana", "", "BSCS", "3", "F", "Yes"]
        );
    }

    #[test]
    fn render_is_one_row_per_record_in_order() {
        let mut second = sample();
        second.id = 2;
        second.email = "b@x.com".into();
        second.graduating = false;

        let view = render(&[sample(), second]);
        assert_eq!(view.header, HEADER);
        assert_eq!(view.rows.len(), 2);
        assert_eq!(view.rows[0][0], "1");
        assert_eq!(view.rows[1][0], "2");
        assert_eq!(view.rows[1][8], "No");
    }

    #[test]
    fn render_round_trips_field_values() {
        let record = sample();
        let view = render(std::slice::from_ref(&record));
        let row = &view.rows[0];

        assert_eq!(row[0].parse::<i64>().unwrap(), record.id);
        assert_eq!(row[1], record.email);
        assert_eq!(row[2], record.last_name);
        assert_eq!(row[3], record.first_name);
        assert_eq!(row[4], record.middle_initial);
        assert_eq!(row[5], record.course);
        assert_eq!(row[6].parse::<u32>().unwrap(), record.year);
        assert_eq!(row[7], record.gender);
        assert_eq!(graduating_from_label(&row[8]), Some(record.graduating));
    }

    #[test]
    fn graduating_mapping_is_invertible() {
        for flag in [true, false] {
            assert_eq!(graduating_from_label(graduating_label(flag)), Some(flag));
        }
        assert_eq!(graduating_from_label("Maybe"), None);
    }

    #[test]
    fn empty_snapshot_renders_headers_only() {
        let view = render(&[]);
        assert!(view.rows.is_empty());
        assert_eq!(view.header[0], "ID");
    }
}
