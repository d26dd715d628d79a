//! Property-based tests for reading and writing station files
//!
//! Covers the file-level guarantees: serialized stations parse back
//! unchanged, the declared count matches, and a malformed line only costs
//! its own station.

use proptest::prelude::*;

use sii_station_editor::check::CheckReport;
use sii_station_editor::sii::writer::format_record_line;
use sii_station_editor::sii::{parse, parse_line, serialize, ParsedLine, SkipReason, StationRecord};

/// Strategy for field text, mixing ASCII, delimiters and non-Latin scripts
fn field_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-zA-Z0-9 .:/_-]{0,30}".prop_map(|s| s),
        "[а-яА-Я日本ü|\"\\\\ ]{0,15}".prop_map(|s| s),
        any::<String>(),
    ]
}

/// Strategy for a single station
fn station_strategy() -> impl Strategy<Value = StationRecord> {
    (
        field_strategy(),
        field_strategy(),
        field_strategy(),
        "[A-Z]{2}",
        "[0-9]{1,3}",
        any::<bool>(),
    )
        .prop_map(|(url, name, genre, country, bitrate, favorite)| {
            StationRecord::new(url, name, genre, country, bitrate, favorite)
        })
}

fn station_list_strategy() -> impl Strategy<Value = Vec<StationRecord>> {
    prop::collection::vec(station_strategy(), 0..12)
}

/// Lines that look like stations but must be dropped
fn malformed_line_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        // too few fields
        "[a-z]{1,8}(\\|[a-z]{1,8}){0,3}".prop_map(|p| format!(" stream_data[9]: \"{}\"", p)),
        // favorite flag that is not a number
        "[a-z]{1,5}".prop_map(|f| format!(" stream_data[9]: \"u|n|g|c|128|{}\"", f)),
        // missing quotes
        Just(" stream_data[9]: http://a|b|c|d|128|1".to_string()),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // File round-trip
    // *For any* station list, parsing the serialized file yields the same
    // stations in the same order.
    #[test]
    fn property_serialize_parse_roundtrip(stations in station_list_strategy()) {
        let text = serialize(&stations);
        prop_assert_eq!(parse(&text), stations);
    }

    // Declared count
    // *For any* station list, the `stream_data: N` line equals the number of
    // stations and the file checks clean.
    #[test]
    fn property_declared_count_matches(stations in station_list_strategy()) {
        let text = serialize(&stations);
        let expected = format!(" stream_data: {}\n", stations.len());
        prop_assert!(text.contains(&expected));

        let report = CheckReport::from_text(&text);
        prop_assert_eq!(report.declared_count, Some(stations.len()));
        prop_assert_eq!(report.stations, stations.len());
        prop_assert!(report.is_clean(), "serialized file should check clean:\n{}", report);
    }

    // Serialized lines are single lines
    #[test]
    fn property_record_line_has_no_line_break(index in 0usize..1000, station in station_strategy()) {
        let line = format_record_line(index, &station);
        prop_assert!(!line.contains('\n'));
        prop_assert!(!line.contains('\r'));
        let prefix = format!(" stream_data[{}]: \"", index);
        prop_assert!(line.starts_with(&prefix));
        prop_assert_eq!(line.matches('"').count(), 2);
    }

    // Malformed lines are isolated
    // *For any* station list with a malformed line spliced in, the other
    // stations still parse, in order.
    #[test]
    fn property_malformed_line_only_drops_itself(
        stations in station_list_strategy(),
        bad_line in malformed_line_strategy(),
        position in any::<prop::sample::Index>(),
    ) {
        let text = serialize(&stations);
        let mut lines: Vec<&str> = text.lines().collect();
        // insert between the count line and the closing braces
        let at = 4 + position.index(stations.len() + 1);
        lines.insert(at, &bad_line);
        let spliced = lines.join("\n");

        prop_assert_eq!(parse(&spliced), stations);
        let report = CheckReport::from_text(&spliced);
        prop_assert_eq!(report.dropped.len(), 1);
        prop_assert_eq!(report.dropped[0].line_number, at + 1);
    }

    // Five-field lines
    // *For any* five plain fields, a line without the favorite flag parses
    // as a non-favorite station.
    #[test]
    fn property_five_fields_not_favorite(
        fields in prop::collection::vec("[a-zA-Z0-9 .:/]{0,12}", 5),
    ) {
        let line = format!(" stream_data[0]: \"{}\"", fields.join("|"));
        let expected = StationRecord::new(
            fields[0].clone(),
            fields[1].clone(),
            fields[2].clone(),
            fields[3].clone(),
            fields[4].clone(),
            false,
        );
        prop_assert_eq!(parse_line(&line), ParsedLine::Record(expected));
    }

    // Favorite flag
    // *For any* integer flag, the station is a favorite exactly when the
    // flag is non-zero. Extra fields after the flag are ignored.
    #[test]
    fn property_favorite_is_nonzero(flag in any::<i32>(), extra in prop::option::of("[a-z]{1,6}")) {
        let mut payload = format!("http://a|A|Rock|US|128|{}", flag);
        if let Some(extra) = &extra {
            payload.push('|');
            payload.push_str(extra);
        }
        let line = format!(" stream_data[0]: \"{}\"", payload);
        match parse_line(&line) {
            ParsedLine::Record(station) => prop_assert_eq!(station.favorite, flag != 0),
            ParsedLine::Skipped(reason) => prop_assert!(false, "line skipped: {}", reason),
        }
    }

    // Too few fields
    #[test]
    fn property_too_few_fields_skipped(fields in prop::collection::vec("[a-z]{0,6}", 1..5)) {
        let line = format!(" stream_data[0]: \"{}\"", fields.join("|"));
        prop_assert_eq!(
            parse_line(&line),
            ParsedLine::Skipped(SkipReason::TooFewFields { found: fields.len() })
        );
    }
}
