use std::collections::HashSet;

use tracing::{debug, info, warn};

use crate::csv::{
    char_class::{is_blank, is_line_break},
    field_name::{sanitize_field_names, FieldName},
    tokenizer::tokenize_line,
};

use super::record::Record;

#[derive(Debug, Default, PartialEq, Eq)]
pub struct ParsedTable {
    pub headers: Vec<FieldName>,
    pub records: Vec<Record>,
}

pub fn build_records(raw_text: &str) -> Vec<Record> {
    parse_table(raw_text).records
}

pub fn parse_table(raw_text: &str) -> ParsedTable {
    // A CRLF pair leaves an empty piece between the two breaks; it is dropped as blank.
    let mut lines = raw_text
        .split(is_line_break)
        .filter(|line| !line.chars().all(is_blank));

    let header_line = match lines.next() {
        Some(line) => line,
        None => return ParsedTable::default(),
    };

    let headers = sanitize_field_names(&tokenize_line(header_line));
    debug!(columns = headers.len(), "parsed CSV header");
    warn_on_collisions(&headers);

    let records: Vec<Record> = lines
        .enumerate()
        .map(|(index, line)| build_record(&headers, index + 1, line))
        .collect();

    info!(records = records.len(), "built records");
    ParsedTable { headers, records }
}

fn build_record(headers: &[FieldName], line_index: usize, line: &str) -> Record {
    let mut values = tokenize_line(line);
    if values.len() != headers.len() {
        debug!(line_index, fields = values.len(), "ragged row");
    }
    if values.len() < headers.len() {
        values.resize(headers.len(), String::new());
    }

    Record::from_pairs(
        values
            .into_iter()
            .enumerate()
            .map(|(position, value)| (key_for_position(headers, position), value)),
    )
}

fn key_for_position(headers: &[FieldName], position: usize) -> FieldName {
    match headers.get(position) {
        Some(header) => header.clone(),
        None => format!("extra_{}", position - headers.len() + 1),
    }
}

fn warn_on_collisions(headers: &[FieldName]) {
    let mut seen = HashSet::new();
    for header in headers {
        if !seen.insert(header.as_str()) {
            warn!(field = %header, "sanitized header collides with an earlier column; later values overwrite earlier ones");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::{build_records, parse_table};
    use crate::domain::record::Record;

    fn ordered(record: &Record) -> Vec<(String, String)> {
        record.to_ordered_map()
    }

    fn pairs(expected: &[(&str, &str)]) -> Vec<(String, String)> {
        expected
            .iter()
            .map(|(key, value)| (key.to_string(), value.to_string()))
            .collect()
    }

    #[test]
    fn builds_one_record_per_data_line() {
        let records = build_records("title,year\nLost,2004\nFargo,2014\n");
        assert_eq!(records.len(), 2);
        assert_eq!(ordered(&records[0]), pairs(&[("title", "Lost"), ("year", "2004")]));
        assert_eq!(ordered(&records[1]), pairs(&[("title", "Fargo"), ("year", "2014")]));
    }

    #[test]
    fn pads_short_rows() {
        let records = build_records("a,b,c\n1,2");
        assert_eq!(ordered(&records[0]), pairs(&[("a", "1"), ("b", "2"), ("c", "")]));
    }

    #[test]
    fn keeps_surplus_values_as_extra_fields() {
        let records = build_records("a,b\n1,2,3,4");
        assert_eq!(
            ordered(&records[0]),
            pairs(&[("a", "1"), ("b", "2"), ("extra_1", "3"), ("extra_2", "4")])
        );
    }

    #[test]
    fn skips_blank_lines() {
        let records = build_records("a,b\n\n   \n1,2\n");
        assert_eq!(records.len(), 1);
        assert_eq!(ordered(&records[0]), pairs(&[("a", "1"), ("b", "2")]));
    }

    #[test]
    fn leading_blank_lines_do_not_become_the_header() {
        let records = build_records("\n\t\nName,Rating\nThe Wire,9.3\n");
        assert_eq!(records[0].get("Name"), Some("The Wire"));
        assert_eq!(records[0].title(), "The Wire");
    }

    #[test]
    fn empty_input_yields_no_records() {
        assert!(build_records("").is_empty());
        assert!(build_records("\n \r\n").is_empty());
    }

    #[test]
    fn header_only_input_yields_no_records() {
        let table = parse_table("title,year\n");
        assert!(table.records.is_empty());
        assert_eq!(table.headers, vec!["title", "year"]);
    }

    #[test]
    fn splits_on_every_line_boundary() {
        for separator in ["\u{0b}", "\u{0c}", "\u{1c}", "\u{1d}", "\u{1e}", "\u{85}", "\u{2028}", "\u{2029}"] {
            let records = build_records(&format!("a,b{}1,2", separator));
            assert_eq!(records.len(), 1, "{:?}", separator);
            assert_eq!(ordered(&records[0]), pairs(&[("a", "1"), ("b", "2")]));
        }
    }

    #[test]
    fn unit_separator_only_lines_are_blank() {
        let records = build_records("a,b\n\u{1f} \u{1f}\n1,2\n");
        assert_eq!(records.len(), 1);
        assert_eq!(ordered(&records[0]), pairs(&[("a", "1"), ("b", "2")]));
    }

    #[test]
    fn headers_do_not_include_extra_keys() {
        let table = parse_table("a,b\n1,2,3\n");
        assert_eq!(table.headers, vec!["a", "b"]);
        assert_eq!(table.records[0].keys().collect::<Vec<_>>(), vec!["a", "b", "extra_1"]);
    }

    #[test]
    fn handles_crlf_and_lone_cr_line_endings() {
        let records = build_records("a,b\r\n1,2\r3,4\r\n");
        assert_eq!(records.len(), 2);
        assert_eq!(ordered(&records[1]), pairs(&[("a", "3"), ("b", "4")]));
    }

    #[test]
    fn sanitizes_header_keys() {
        let records = build_records("Show Title,1st Aired,\n\"Lost, Again\",2004,x\n");
        assert_eq!(
            ordered(&records[0]),
            pairs(&[("Show_Title", "Lost, Again"), ("_1st_Aired", "2004"), ("field", "x")])
        );
    }

    #[test]
    fn colliding_headers_overwrite_earlier_values() {
        let records = build_records("Name,Name ,year\nfirst,second,1999\n");
        assert_eq!(
            ordered(&records[0]),
            pairs(&[("Name", "second"), ("year", "1999")])
        );
    }

    #[test]
    fn records_do_not_share_state() {
        let text = "a,b\n1,2\n";
        let first = build_records(text);
        let second = build_records(text);
        assert_eq!(first, second);
        assert_eq!(first[0].keys().collect::<Vec<_>>(), vec!["a", "b"]);
    }
}
