//! # Record Iterators
//!
//! Adapters that turn a raw corpus into a stream of [`Record`]s ready
//! to feed a pipeline.

use regex::Regex;

use crate::record::{Payload, Record};

/// Iterates a pattern's matches over one text, yielding a record per
/// match.
///
/// Each record's data is the match's first capture group when the
/// pattern has one (the markup around a region rarely belongs in the
/// extracted text), otherwise the whole match. Records are named by the
/// whole match's byte offsets, `region_{start}_{end}`, so failures
/// downstream point back into the source text.
pub struct PatternMatchIterator<'r, 't> {
    captures: regex::CaptureMatches<'r, 't>,
}

impl<'r, 't> PatternMatchIterator<'r, 't> {
    /// Create an iterator over `pattern`'s matches in `text`.
    ///
    /// ## Arguments
    /// * `pattern` - the region pattern; group 1, if present, selects
    ///   the record data within each match.
    /// * `text` - the source text to scan.
    pub fn new(
        pattern: &'r Regex,
        text: &'t str,
    ) -> Self {
        Self {
            captures: pattern.captures_iter(text),
        }
    }
}

impl Iterator for PatternMatchIterator<'_, '_> {
    type Item = Record;

    fn next(&mut self) -> Option<Record> {
        let captures = self.captures.next()?;
        let whole = captures.get(0)?;
        let data = captures.get(1).unwrap_or(whole);

        Some(
            Record::new(Payload::Chars(data.as_str().to_string()))
                .with_name(format!("region_{}_{}", whole.start(), whole.end())),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::{
        SerialPipeline,
        stages::{intern_features::InternFeatures, segment::SegmentChars},
    };

    #[test]
    fn test_capture_group_selects_record_data() {
        let text = "<p>Inside inside inside</p> outside <p>inside\ninside</p> outside\noutside";
        let pattern = Regex::new("(?s)<p>(.+?)</p>").unwrap();

        let records: Vec<Record> = PatternMatchIterator::new(&pattern, text).collect();

        assert_eq!(records.len(), 2);
        assert_eq!(
            records[0].data,
            Payload::Chars("Inside inside inside".into())
        );
        assert_eq!(records[1].data, Payload::Chars("inside\ninside".into()));

        // Names carry the whole match's offsets, markup included.
        assert_eq!(records[0].name.as_deref(), Some("region_0_27"));
        assert_eq!(records[1].name.as_deref(), Some("region_36_56"));
    }

    #[test]
    fn test_no_capture_group_yields_whole_match() {
        let pattern = Regex::new(r"\d+").unwrap();
        let records: Vec<Record> = PatternMatchIterator::new(&pattern, "a 12 b 345").collect();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].data, Payload::Chars("12".into()));
        assert_eq!(records[0].name.as_deref(), Some("region_2_4"));
        assert_eq!(records[1].data, Payload::Chars("345".into()));
    }

    #[test]
    fn test_no_matches_yields_no_records() {
        let pattern = Regex::new("<p>(.+?)</p>").unwrap();
        let mut iter = PatternMatchIterator::new(&pattern, "no regions here");
        assert!(iter.next().is_none());
    }

    #[test]
    fn test_feeds_a_pipeline() {
        let pipeline = SerialPipeline::new(vec![
            Box::new(SegmentChars::new()),
            Box::new(InternFeatures::new()),
        ]);

        let pattern = Regex::new("<p>(.+?)</p>").unwrap();
        let records = PatternMatchIterator::new(&pattern, "<p>a b</p> <p>b c</p>").collect();

        let results = pipeline.process_batch(records, true).unwrap();
        assert_eq!(results.len(), 2);
        assert_eq!(pipeline.data_alphabet().len(), 3);
    }
}
