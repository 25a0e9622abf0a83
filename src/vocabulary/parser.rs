//! Line parsers for the two input relations.
//!
//! The synset relation holds one `id,terms,definition` record per line, the
//! hypernym relation one `id,parent,parent,...` record per line. Only the
//! first two synset fields are interpreted; everything after the second field
//! delimiter is kept verbatim as the definition.

use std::io::BufRead;

use log::{debug, warn};
use serde::{Deserialize, Serialize};

use crate::error::{LexnetError, Result};

/// Delimiters used by both relations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecordFormat {
    /// Separates the fields of a record.
    pub field_delimiter: char,
    /// Separates the member terms inside the synset field.
    pub term_delimiter: char,
}

impl Default for RecordFormat {
    fn default() -> Self {
        RecordFormat {
            field_delimiter: ',',
            term_delimiter: ' ',
        }
    }
}

/// One line of the synset relation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynsetRecord {
    pub id: usize,
    pub terms: Vec<String>,
    pub definition: String,
}

/// One line of the hypernym relation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HypernymRecord {
    pub id: usize,
    pub parents: Vec<usize>,
}

impl RecordFormat {
    /// Check that the two delimiters can be told apart.
    pub fn validate(&self) -> Result<()> {
        if self.field_delimiter == self.term_delimiter {
            return Err(LexnetError::config(format!(
                "field and term delimiters must differ, both are {:?}",
                self.field_delimiter
            )));
        }
        Ok(())
    }

    /// Parse a single synset line. `line_no` is 1-based and only used in errors.
    pub fn parse_synset(&self, line: &str, line_no: usize) -> Result<SynsetRecord> {
        let mut fields = line.splitn(3, self.field_delimiter);
        let id = parse_id(fields.next().unwrap_or_default(), "synset", line_no)?;
        let terms: Vec<String> = fields
            .next()
            .unwrap_or_default()
            .split(self.term_delimiter)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect();
        if terms.is_empty() {
            return Err(LexnetError::config(format!(
                "synsets line {line_no}: synset {id} has no member terms"
            )));
        }
        let definition = fields.next().unwrap_or_default().to_string();

        Ok(SynsetRecord {
            id,
            terms,
            definition,
        })
    }

    /// Parse a single hypernym line. `line_no` is 1-based and only used in errors.
    pub fn parse_hypernym(&self, line: &str, line_no: usize) -> Result<HypernymRecord> {
        let mut fields = line.split(self.field_delimiter);
        let id = parse_id(fields.next().unwrap_or_default(), "hypernyms", line_no)?;
        let parents = fields
            .filter(|f| !f.trim().is_empty())
            .map(|f| parse_id(f, "hypernyms", line_no))
            .collect::<Result<Vec<_>>>()?;

        Ok(HypernymRecord { id, parents })
    }

    /// Parse every non-blank line of a synset relation.
    pub fn read_synsets<R: BufRead>(&self, reader: R) -> Result<Vec<SynsetRecord>> {
        let records =
            self.read_lines(reader, "synsets", |line, no| self.parse_synset(line, no))?;
        debug!("parsed {} synset records", records.len());
        Ok(records)
    }

    /// Parse every non-blank line of a hypernym relation.
    pub fn read_hypernyms<R: BufRead>(&self, reader: R) -> Result<Vec<HypernymRecord>> {
        let records =
            self.read_lines(reader, "hypernyms", |line, no| self.parse_hypernym(line, no))?;
        debug!("parsed {} hypernym records", records.len());
        Ok(records)
    }

    fn read_lines<R, T, F>(&self, reader: R, relation: &str, parse: F) -> Result<Vec<T>>
    where
        R: BufRead,
        F: Fn(&str, usize) -> Result<T>,
    {
        let mut records = Vec::new();
        for (i, line) in reader.lines().enumerate() {
            let line = line?;
            let line = line.trim_end_matches('\r');
            if line.trim().is_empty() {
                warn!("{relation} line {}: skipping blank line", i + 1);
                continue;
            }
            records.push(parse(line, i + 1)?);
        }
        Ok(records)
    }
}

fn parse_id(field: &str, relation: &str, line_no: usize) -> Result<usize> {
    field.trim().parse::<usize>().map_err(|_| {
        LexnetError::config(format!(
            "{relation} line {line_no}: expected a non-negative synset id, got {field:?}"
        ))
    })
}
