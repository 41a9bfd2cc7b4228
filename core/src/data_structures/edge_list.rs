//! Line-oriented edge-list reader and flow writer
//!
//! Input records are `tail head capacity`, output records are
//! `tail head capacity flow`, one per line in load order.

use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Serialize, Deserialize};

use crate::algorithm::traits::AlgorithmError;
use crate::data_structures::graph::{Capacity, FlowGraph};

/// One parsed input record
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeRecord {
    pub tail: u32,
    pub head: u32,
    pub capacity: Capacity,
}

impl From<EdgeRecord> for (u32, u32, Capacity) {
    fn from(record: EdgeRecord) -> Self {
        (record.tail, record.head, record.capacity)
    }
}

impl EdgeRecord {
    /// Parses one record; `Ok(None)` for blank and `#` comment lines
    pub fn parse(text: &str, line: usize) -> Result<Option<Self>, AlgorithmError> {
        let trimmed = text.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(None);
        }

        let malformed = |reason: String| AlgorithmError::MalformedInput {
            line,
            record: trimmed.to_string(),
            reason,
        };

        let mut fields = trimmed.split_ascii_whitespace();
        let mut values = [0u32; 3];
        for (slot, name) in values.iter_mut().zip(["tail", "head", "capacity"]) {
            let field = fields
                .next()
                .ok_or_else(|| malformed(format!("missing {} field", name)))?;
            *slot = field
                .parse::<u32>()
                .map_err(|e| malformed(format!("invalid {} {:?}: {}", name, field, e)))?;
        }
        if fields.next().is_some() {
            return Err(malformed("expected exactly 3 fields".to_string()));
        }

        Ok(Some(Self {
            tail: values[0],
            head: values[1],
            capacity: values[2],
        }))
    }
}

/// Streaming iterator over the records of an edge list
pub struct EdgeRecords<R> {
    reader: R,
    buffer: Vec<u8>,
    line: usize,
    done: bool,
}

impl<R: BufRead> EdgeRecords<R> {
    pub fn new(reader: R) -> Self {
        Self {
            reader,
            buffer: Vec::new(),
            line: 0,
            done: false,
        }
    }
}

impl<R: BufRead> Iterator for EdgeRecords<R> {
    type Item = Result<EdgeRecord, AlgorithmError>;

    fn next(&mut self) -> Option<Self::Item> {
        while !self.done {
            self.buffer.clear();
            match self.reader.read_until(b'\n', &mut self.buffer) {
                Ok(0) => self.done = true,
                Ok(_) => {
                    self.line += 1;
                    let parsed = match std::str::from_utf8(&self.buffer) {
                        Ok(text) => EdgeRecord::parse(text, self.line),
                        Err(_) => Err(AlgorithmError::MalformedInput {
                            line: self.line,
                            record: String::from_utf8_lossy(&self.buffer).trim().to_string(),
                            reason: "invalid UTF-8".to_string(),
                        }),
                    };
                    match parsed {
                        Ok(Some(record)) => return Some(Ok(record)),
                        Ok(None) => continue,
                        Err(e) => {
                            self.done = true;
                            return Some(Err(e));
                        }
                    }
                }
                Err(e) => {
                    self.done = true;
                    return Some(Err(e.into()));
                }
            }
        }
        None
    }
}

/// Reads every record, aborting on the first malformed one
pub fn read_edge_list<R: BufRead>(reader: R) -> Result<Vec<EdgeRecord>, AlgorithmError> {
    EdgeRecords::new(reader).collect()
}

/// Writes `tail head capacity flow` for every edge in load order
pub fn write_flows<W: Write>(graph: &FlowGraph, mut writer: W) -> Result<(), AlgorithmError> {
    for edge in graph.edges() {
        writeln!(writer, "{} {} {} {}", edge.tail, edge.head, edge.capacity, edge.flow)?;
    }
    writer.flush()?;
    Ok(())
}

/// Writes the flow file at `path`
pub fn write_flows_to_path<P: AsRef<Path>>(graph: &FlowGraph, path: P) -> Result<(), AlgorithmError> {
    let file = File::create(path.as_ref())?;
    write_flows(graph, BufWriter::new(file))
}

impl FlowGraph {
    /// Streams an edge list straight into the store without an
    /// intermediate record buffer. No graph is returned on a malformed record.
    pub fn from_reader<R: BufRead>(reader: R) -> Result<Self, AlgorithmError> {
        let mut failure = None;
        let triples = EdgeRecords::new(reader).map_while(|record| match record {
            Ok(record) => Some(record.into()),
            Err(e) => {
                failure = Some(e);
                None
            }
        });
        let graph = FlowGraph::from_edges(triples)?;
        match failure {
            Some(e) => Err(e),
            None => Ok(graph),
        }
    }

    /// Opens and loads the edge list at `path`
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, AlgorithmError> {
        let file = File::open(path.as_ref())?;
        Self::from_reader(BufReader::new(file))
    }

    /// Builds the store from parsed records
    pub fn from_records(records: &[EdgeRecord]) -> Result<Self, AlgorithmError> {
        FlowGraph::from_edges(records.iter().map(|&r| r.into()))
    }
}
