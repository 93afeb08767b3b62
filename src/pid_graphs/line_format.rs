use std::fmt;

use anyhow;

/// Meaning of one whitespace-delimited field in an input line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// PrimerID tag, kept as an opaque string key.
    Id,
    /// Name of the reference template a score was computed against.
    Template,
    /// Floating-point likelihood score.
    Likelihood,
}

impl Field {
    pub fn name(&self) -> &'static str {
        match *self {
            Field::Id => "id",
            Field::Template => "template",
            Field::Likelihood => "likelihood",
        }
    }

    fn from_keyword(keyword: &str) -> Option<Field> {
        match keyword {
            "id" => Some(Field::Id),
            "template" => Some(Field::Template),
            "likelihood" => Some(Field::Likelihood),
            _ => None,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Order of the fields making up one input record.
///
/// A line is well-formed only when its whitespace-delimited field count
/// equals the format length and every `likelihood` position parses as a
/// float. Everything else is classified as a skip, never an error: the
/// inputs are loosely delimited text and mixed-in separator or comment
/// lines are expected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineFormat(Vec<Field>);

impl LineFormat {
    /// Builds a format from CLI keywords, one per field in line order.
    /// Unknown and repeated keywords are rejected.
    pub fn from_keywords<S: AsRef<str>>(keywords: &[S]) -> Result<LineFormat, anyhow::Error> {
        if keywords.is_empty() {
            bail!("empty line format");
        }
        let mut fields = Vec::new();
        for keyword in keywords.iter() {
            let field = match Field::from_keyword(keyword.as_ref()) {
                Some(field) => field,
                None => bail!(
                    "unknown field `{}` in line format, expected id, template, or likelihood",
                    keyword.as_ref()
                ),
            };
            if fields.contains(&field) {
                bail!("field `{}` appears twice in line format", field);
            }
            fields.push(field);
        }
        Ok(LineFormat(fields))
    }

    pub fn fields(&self) -> &[Field] {
        &self.0
    }

    pub fn has(&self, field: Field) -> bool {
        self.0.contains(&field)
    }

    /// Checks that an aggregation mode's required field is present, so a
    /// mismatched format is surfaced instead of yielding an empty table.
    pub fn require(&self, field: Field) -> Result<(), anyhow::Error> {
        if self.has(field) {
            Ok(())
        } else {
            bail!("line format `{}` has no `{}` field", self, field)
        }
    }

    /// Classifies one input line as a well-formed record or a skip.
    pub fn classify(&self, line: &str) -> Line {
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() != self.0.len() {
            return Line::Skip(Skip::FieldCount(parts.len()));
        }
        let mut record = Record::default();
        for (field, part) in self.0.iter().zip(parts) {
            match *field {
                Field::Id => record.id = Some(part.to_string()),
                Field::Template => record.template = Some(part.to_string()),
                Field::Likelihood => match part.parse::<f64>() {
                    Ok(score) => record.likelihood = Some(score),
                    Err(_) => return Line::Skip(Skip::BadScore),
                },
            }
        }
        Line::Record(record)
    }
}

impl fmt::Display for LineFormat {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, field) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            f.write_str(field.name())?;
        }
        Ok(())
    }
}

/// One classified input line.
#[derive(Debug, Clone, PartialEq)]
pub enum Line {
    Record(Record),
    Skip(Skip),
}

/// Why a line was left out of aggregation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Skip {
    /// Field count differs from the format length; blank and separator
    /// lines land here.
    FieldCount(usize),
    /// A `likelihood` position did not parse as a float.
    BadScore,
}

/// Fields extracted from one well-formed line. Only the fields named by
/// the format are populated.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Record {
    pub id: Option<String>,
    pub template: Option<String>,
    pub likelihood: Option<f64>,
}

/// Per-pass record and skip tallies, so callers and tests can account
/// for every input line even though skips are silent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParseStats {
    pub records: usize,
    pub field_count_skips: usize,
    pub bad_score_skips: usize,
}

impl ParseStats {
    pub fn count_skip(&mut self, skip: &Skip) {
        match *skip {
            Skip::FieldCount(_) => self.field_count_skips += 1,
            Skip::BadScore => self.bad_score_skips += 1,
        }
    }

    pub fn skipped(&self) -> usize {
        self.field_count_skips + self.bad_score_skips
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keywords_in_order() {
        let format = LineFormat::from_keywords(&["id", "template", "likelihood"]).unwrap();
        assert_eq!(
            format.fields(),
            &[Field::Id, Field::Template, Field::Likelihood]
        );
        assert!(format.has(Field::Template));
        assert!(format.require(Field::Id).is_ok());
    }

    #[test]
    fn bad_keywords() {
        assert!(LineFormat::from_keywords(&["id", "score"]).is_err());
        assert!(LineFormat::from_keywords(&["id", "id"]).is_err());
        let empty: [&str; 0] = [];
        assert!(LineFormat::from_keywords(&empty).is_err());
    }

    #[test]
    fn missing_field_is_surfaced() {
        let format = LineFormat::from_keywords(&["template", "likelihood"]).unwrap();
        let err = format.require(Field::Id).unwrap_err();
        assert!(err.to_string().contains("id"));
    }

    #[test]
    fn classify_well_formed() {
        let format = LineFormat::from_keywords(&["id", "likelihood"]).unwrap();
        match format.classify("TAG_1  0.75") {
            Line::Record(record) => {
                assert_eq!(record.id, Some("TAG_1".to_string()));
                assert_eq!(record.likelihood, Some(0.75));
                assert_eq!(record.template, None);
            }
            other => panic!("expected record, got {:?}", other),
        }
    }

    #[test]
    fn classify_field_count_mismatch() {
        let format = LineFormat::from_keywords(&["id", "likelihood"]).unwrap();
        assert_eq!(format.classify(""), Line::Skip(Skip::FieldCount(0)));
        assert_eq!(format.classify("TAG_1"), Line::Skip(Skip::FieldCount(1)));
        assert_eq!(
            format.classify("TAG_1 0.5 extra"),
            Line::Skip(Skip::FieldCount(3))
        );
    }

    #[test]
    fn classify_bad_score() {
        let format = LineFormat::from_keywords(&["id", "likelihood"]).unwrap();
        assert_eq!(format.classify("TAG_1 n/a"), Line::Skip(Skip::BadScore));
    }

    #[test]
    fn skip_tallies() {
        let format = LineFormat::from_keywords(&["id", "likelihood"]).unwrap();
        let mut stats = ParseStats::default();
        for line in ["TAG_1 0.5", "", "TAG_2 oops", "TAG_2 0.9"].iter() {
            match format.classify(line) {
                Line::Record(_) => stats.records += 1,
                Line::Skip(skip) => stats.count_skip(&skip),
            }
        }
        assert_eq!(stats.records, 2);
        assert_eq!(stats.field_count_skips, 1);
        assert_eq!(stats.bad_score_skips, 1);
        assert_eq!(stats.skipped(), 2);
    }
}
