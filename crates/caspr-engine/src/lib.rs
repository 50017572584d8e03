//! caspr_engine - Puzzle text to spreadsheet formulas and sheet layout.

pub mod engine;

#[cfg(test)]
mod tests {
    use crate::engine::*;
    use rstest::rstest;

    fn addresses(pairs: &[(char, usize)]) -> Addresses {
        pairs.iter().copied().collect()
    }

    fn cells(row: &Row) -> Vec<&str> {
        row.cells.iter().map(String::as_str).collect()
    }

    #[rstest]
    #[case("")]
    #[case("Walk along the lake until you reach the bridge.")]
    #[case("a = lower case is not a variable")]
    #[case("The answer is 42.\nNothing to define here.")]
    fn test_parse_without_marker_is_empty(#[case] description: &str) {
        assert_eq!(parse(description).count(), 0);
    }

    #[test]
    fn test_parse_single_task() {
        let tasks: Vec<Task> = parse("A = foo bar baz").collect();
        assert_eq!(tasks, vec![Task::new("foo bar baz", "A")]);
    }

    #[test]
    fn test_parse_repeated_definition_keeps_both() {
        let tasks: Vec<Task> = parse("A = irrelevant\nA = tant pis").collect();
        assert_eq!(
            tasks,
            vec![Task::new("irrelevant", "A"), Task::new("tant pis", "A")]
        );
    }

    #[test]
    fn test_parse_multi_letter_definition() {
        let tasks: Vec<Task> = parse("ABCDEF = foo bar baz").collect();
        assert_eq!(tasks, vec![Task::new("foo bar baz", "ABCDEF")]);
    }

    #[rstest]
    #[case("\n                N 47° 03.204 E 008° 18.557\u{a0}\n\n            ", Some("N 47° 03.204 E 008° 18.557"))]
    #[case("N 47° 03.204 E 008° 18.557", Some("N 47° 03.204 E 008° 18.557"))]
    #[case("S 33° 51.568 W 151° 12.861", Some("S 33° 51.568 W 151° 12.861"))]
    #[case("\n                ???\u{a0}\n\n            ", None)]
    fn test_find_coordinates(#[case] input: &str, #[case] expected: Option<&str>) {
        assert_eq!(CoordinateFilter::find(input), expected);
    }

    #[test]
    fn test_resolve_multi_digit_variable() {
        let conv = FormulaConverter::new(&addresses(&[('A', 0), ('B', 1)]), 2).unwrap();
        assert_eq!(conv.resolve_formula("AB"), "(10*C0+1*C1)");
    }

    #[test]
    fn test_resolve_known_variables() {
        let conv = FormulaConverter::new(&addresses(&[('A', 0), ('B', 1)]), 2).unwrap();
        assert_eq!(conv.resolve_formula("A + B"), "C0 + C1");
    }

    #[test]
    fn test_resolve_unknown_variable_is_kept() {
        let conv = FormulaConverter::new(&addresses(&[('B', 0)]), 2).unwrap();
        assert_eq!(conv.resolve_formula("A"), "A");
    }

    #[test]
    fn test_resolve_three_letter_run() {
        let conv = FormulaConverter::new(&addresses(&[('A', 1), ('B', 2), ('C', 3)]), 2).unwrap();
        assert_eq!(conv.resolve_formula("ABC"), "(100*C1+10*C2+1*C3)");
    }

    #[test]
    fn test_dimension_end_to_end() {
        let alphabet: Addresses = ('A'..='Z').zip(1..).collect();
        let conv = FormulaConverter::new(&alphabet, 2).unwrap();
        let dimensions = conv.dimensions("N 47° [ B - C ].[ B x F - E x F - 3 x C ]");
        assert_eq!(dimensions.len(), 1);
        assert_eq!(dimensions[0].orientation(), Some(Orientation::North));
        assert_eq!(
            assemble(&dimensions[0]),
            "=\"N\"&\" \"&47&\"° \"&( C2 - C3 )&\".\"&( C2 * C6 - C5 * C6 - 3 * C3 )"
        );
    }

    #[test]
    fn test_dimension_without_formula_is_ignored() {
        let conv = FormulaConverter::new(&addresses(&[('A', 1)]), 2).unwrap();
        assert!(conv.extract_formulae("N 47 A.BCD, missing degree mark").is_empty());
        assert!(conv.extract_formulae("no coordinates at all").is_empty());
    }

    #[test]
    fn test_layout_single_stage_single_task() {
        let stages = vec![Stage::new("Stage 1", "???", "A = count the lampposts")];
        let mut rows = layout(&stages);
        let emitted: Vec<Row> = rows.by_ref().collect();
        assert_eq!(emitted.len(), 3);
        assert_eq!(cells(&emitted[0]), ["Stage 1", "???"]);
        assert_eq!(cells(&emitted[1]), ["A = count the lampposts"]);
        assert_eq!(cells(&emitted[2]), ["count the lampposts", "A"]);
        assert_eq!(emitted[2].row, 3);
        assert_eq!(rows.addresses().get('A'), Some(3));
    }

    #[test]
    fn test_layout_merges_variable_across_stages() {
        let stages = vec![
            Stage::new("Stage 1", "???", "A = number of benches"),
            Stage::new("Stage 2", "???", "A = plus the bins\nB = trees"),
            Stage::new("Final", "???", "N 47° 0A.1B2"),
        ];
        let rows: Vec<Row> = layout(&stages).collect();

        let a_rows: Vec<&Row> = rows
            .iter()
            .filter(|r| r.cells.get(1).map(String::as_str) == Some("A"))
            .collect();
        assert_eq!(a_rows.len(), 1);
        assert_eq!(a_rows[0].row, 3);
        assert_eq!(a_rows[0].cells[0], "number of benches\nplus the bins");

        // Stage 2: header 4, description 5, B at 6. Final: header 7, description 8.
        let b_row = rows.iter().find(|r| r.cells.get(1).map(String::as_str) == Some("B"));
        assert_eq!(b_row.map(|r| r.row), Some(6));

        let formula = rows.last().unwrap();
        assert_eq!(formula.row, 8);
        assert_eq!(formula.column, 1);
        assert_eq!(
            cells(formula),
            ["=\"N\"&\" \"&47&\"° \"&(10*0+1*C3)&\".\"&(100*1+10*C6+1*2)"]
        );
    }

    #[test]
    fn test_layout_is_repeatable() {
        let stages = vec![
            Stage::new("Listing", "N 47° 03.204 E 008° 18.557", "Welcome.\nAB = year of the chapel"),
            Stage::new("Stage 1", "???", "C = windows\nN 47° 0A.BC1 E 8° 1C.2AB"),
        ];
        let first: Vec<Row> = layout(&stages).collect();
        let second: Vec<Row> = layout(&stages).collect();
        assert_eq!(first, second);
        assert!(!first.is_empty());
    }

    #[test]
    fn test_later_stage_reuses_address() {
        let stages = vec![
            Stage::new("Stage 1", "???", "A = lamps"),
            Stage::new("Stage 2", "???", "A = more lamps\nS 12° 3A.456"),
        ];
        let rows: Vec<Row> = layout(&stages).collect();
        // Stage 2 defines no new variable: header 4, description 5, formula on 5.
        assert_eq!(rows.len(), 6);
        assert_eq!(rows[5].row, 5);
        assert_eq!(cells(&rows[5]), ["=\"S\"&\" \"&12&\"° \"&(10*3+1*C3)&\".\"&456"]);
    }
}
