use std::{
    fs::File,
    io::{self, BufRead, BufReader, BufWriter, Write},
    path::Path,
    process::{Command, Stdio},
};

use tracing::debug;

use crate::{
    error::{Error, Result},
    solver::{
        formula::{Formula, FormulaBuilder},
        literal::Literal,
    },
};

/// Trait describing that a struct can process clauses
pub trait ClauseReceiver {
    /// Creates `num_variables` variables
    fn create_variables(&mut self, num_variables: usize);
    /// Add clauses
    ///
    /// # Errors
    ///
    /// Receivers reject literals they cannot represent.
    fn add_clause(&mut self, literals: &[Literal]) -> Result<()>;
}

/// Parsing state
struct ParseState {
    /// Number of variables in header
    num_variables_header: usize,
    /// Number of clauses in header
    num_clauses_header: usize,
    /// Number of parsed clauses
    curr_num_clauses: usize,
    /// Whether already processed the header `p cnf ...`
    processed_header: bool,
    /// Literals of a clause whose terminating `0` was not seen yet
    pending: Vec<Literal>,
}

impl ParseState {
    fn new() -> Self {
        Self {
            num_variables_header: 0,
            num_clauses_header: 0,
            curr_num_clauses: 0,
            processed_header: false,
            pending: Vec::new(),
        }
    }

    /// Hand the pending clause to `receiver`
    fn flush(&mut self, receiver: &mut impl ClauseReceiver) -> Result<()> {
        receiver.add_clause(&self.pending)?;
        self.pending.clear();
        self.curr_num_clauses += 1;
        Ok(())
    }
}

/// Unexpected token
fn unexpected_token(message: &str, line: usize) -> Error {
    Error::Parse {
        line,
        message: message.to_string(),
    }
}

/// Open plain text file
fn open_plain_file(path: &Path) -> Result<BufReader<File>> {
    let file = File::open(path)?;
    Ok(BufReader::new(file))
}

/// Parse a compressed file by piping it through `program -dc`
///
/// The decompressor's exit status takes precedence over parse errors.
fn parse_compressed_file(
    path: &Path,
    program: &str,
    receiver: &mut impl ClauseReceiver,
) -> Result<()> {
    let mut child = Command::new(program)
        .arg("-dc")
        .arg(path)
        .stdout(Stdio::piped())
        .spawn()
        .map_err(|e| {
            io::Error::new(
                e.kind(),
                format!("failed to open {} using \"{program}\": {e}", path.display()),
            )
        })?;
    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| io::Error::other(format!("\"{program}\" has no stdout")))?;
    let mut reader = BufReader::new(stdout);
    let parsed = parse_dimacs(&mut reader, receiver);
    // let the decompressor run to completion before reading its status
    io::copy(&mut reader, &mut io::sink())?;
    let status = child.wait()?;
    if !status.success() {
        return Err(io::Error::other(format!(
            "\"{program}\" failed to decompress {}: {status}",
            path.display()
        ))
        .into());
    }
    parsed
}

/// Parse DIMACS CNF text from `reader` into `receiver`
///
/// # Errors
///
/// Fails on I/O errors, malformed lines, literals beyond the declared
/// variable count, or a clause count that disagrees with the header.
pub fn parse_dimacs(reader: impl BufRead, receiver: &mut impl ClauseReceiver) -> Result<()> {
    let mut curr_state = ParseState::new();
    let mut last_line = 0;
    for (line_idx, line_res) in reader.lines().enumerate() {
        let line_no = line_idx + 1;
        last_line = line_no;
        let line = line_res?;
        let line = line.trim();
        match line {
            // Comment
            l if l.is_empty() || l.starts_with('c') => {}
            // Header
            l if l.starts_with('p') => {
                if curr_state.processed_header {
                    return Err(unexpected_token("Duplicate CNF header", line_no));
                }
                curr_state.processed_header = true;
                let parts: Vec<&str> = l.split_whitespace().collect();
                if parts.len() != 4 || parts[1] != "cnf" {
                    return Err(unexpected_token("CNF header invalid", line_no));
                }
                curr_state.num_variables_header = parts[2].parse().map_err(|_| {
                    unexpected_token("Could not parse number of variables in header", line_no)
                })?;
                curr_state.num_clauses_header = parts[3].parse().map_err(|_| {
                    unexpected_token("Could not parse number of clauses in header", line_no)
                })?;
                receiver.create_variables(curr_state.num_variables_header);
            }
            // Header missing
            _ if !curr_state.processed_header => {
                return Err(unexpected_token("CNF header missing", line_no));
            }
            // Clause literals, possibly spanning several lines
            l => {
                for token in l.split_whitespace() {
                    let value: i64 = token
                        .parse()
                        .map_err(|_| unexpected_token("Could not parse literal", line_no))?;
                    if value == 0 {
                        curr_state.flush(receiver)?;
                        continue;
                    }
                    let literal =
                        Literal::from_dimacs(value).ok_or(Error::VariableOutOfRange {
                            literal: value,
                            num_variables: curr_state.num_variables_header,
                        })?;
                    curr_state.pending.push(literal);
                }
            }
        }
    }

    // Accept a final clause without its terminating `0`
    if !curr_state.pending.is_empty() {
        curr_state.flush(receiver)?;
    }
    if !curr_state.processed_header {
        return Err(unexpected_token("CNF header missing", last_line));
    }

    // Check number of clauses
    if curr_state.curr_num_clauses != curr_state.num_clauses_header {
        return Err(Error::HeaderMismatch {
            what: "clauses",
            expected: curr_state.num_clauses_header,
            found: curr_state.curr_num_clauses,
        });
    }
    Ok(())
}

/// Parse `.cnf`, `.cnf.xz`, or `.cnf.gz`
///
/// # Errors
///
/// See [`parse_dimacs`]; additionally fails if the file cannot be opened.
pub fn parse_cnf(filename: impl AsRef<Path>, receiver: &mut impl ClauseReceiver) -> Result<()> {
    let path = filename.as_ref();
    debug!(path = %path.display(), "parsing CNF");
    match path.extension() {
        Some(x) if x.eq_ignore_ascii_case("xz") => parse_compressed_file(path, "xz", receiver),
        Some(x) if x.eq_ignore_ascii_case("gz") => parse_compressed_file(path, "gzip", receiver),
        _ => parse_dimacs(open_plain_file(path)?, receiver),
    }
}

/// Read a formula from a `.cnf`, `.cnf.xz`, or `.cnf.gz` file
///
/// # Errors
///
/// See [`parse_cnf`].
pub fn read_formula(filename: impl AsRef<Path>) -> Result<Formula> {
    let mut builder = FormulaBuilder::default();
    parse_cnf(filename, &mut builder)?;
    Ok(builder.build())
}

/// Write `formula` in DIMACS CNF format
///
/// # Errors
///
/// Propagates write errors of `writer`.
pub fn write_dimacs(formula: &Formula, writer: impl Write) -> io::Result<()> {
    let mut writer = BufWriter::new(writer);
    writeln!(writer, "p cnf {} {}", formula.num_variables(), formula.num_clauses())?;
    for clause in formula.clauses() {
        for literal in clause.literals() {
            write!(writer, "{literal} ")?;
        }
        writeln!(writer, "0")?;
    }
    writer.flush()
}

/// DIMACS CNF text of `formula`
#[must_use]
pub fn to_dimacs_string(formula: &Formula) -> String {
    let mut out = Vec::new();
    // writing into a Vec cannot fail
    let _ = write_dimacs(formula, &mut out);
    String::from_utf8_lossy(&out).into_owned()
}
