//! Scan-plan serialization.
//!
//! Output format: a line with the signed-library count, then per library a
//! line `library_id scanned_count` followed by a line of space-separated
//! book ids.

use std::fs::File;
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::models::Solution;

use super::parser::{LineReader, ParseError};

/// One signed library's scan assignment, in scan order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanEntry {
    pub library: usize,
    pub books: Vec<usize>,
}

/// The exportable view of a solution: signed libraries in signup order
/// with their scanned books.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanPlan {
    pub entries: Vec<PlanEntry>,
}

impl ScanPlan {
    /// Extracts the plan from a solution, preserving signup order.
    pub fn from_solution(solution: &Solution) -> Self {
        let entries = solution
            .signed_libraries()
            .iter()
            .map(|&library| PlanEntry {
                library,
                books: solution.books_for(library).to_vec(),
            })
            .collect();
        Self { entries }
    }
}

/// Writes a plan in the output format.
pub fn write_plan<W: Write>(plan: &ScanPlan, writer: &mut W) -> io::Result<()> {
    writeln!(writer, "{}", plan.entries.len())?;
    for entry in &plan.entries {
        writeln!(writer, "{} {}", entry.library, entry.books.len())?;
        let ids: Vec<String> = entry.books.iter().map(usize::to_string).collect();
        writeln!(writer, "{}", ids.join(" "))?;
    }
    Ok(())
}

/// Writes a solution's plan to any writer.
pub fn write_solution<W: Write>(solution: &Solution, writer: &mut W) -> io::Result<()> {
    write_plan(&ScanPlan::from_solution(solution), writer)
}

/// Writes a solution's plan to a file.
pub fn save_solution<P: AsRef<Path>>(solution: &Solution, path: P) -> io::Result<()> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_solution(solution, &mut writer)?;
    writer.flush()
}

/// Re-parses a plan from the output format.
pub fn read_plan<R: BufRead>(reader: R) -> Result<ScanPlan, ParseError> {
    let mut lines = LineReader::new(reader);
    let count = lines.next_fields::<usize>(1, "plan header")?[0];

    let mut entries = Vec::with_capacity(count);
    for _ in 0..count {
        let header: Vec<usize> = lines.next_fields(2, "plan entry header")?;
        let (library, book_count) = (header[0], header[1]);
        let books: Vec<usize> = lines.next_fields(book_count, "plan entry books")?;
        entries.push(PlanEntry { library, books });
    }
    Ok(ScanPlan { entries })
}

/// Opens and re-parses a plan file.
pub fn load_plan<P: AsRef<Path>>(path: P) -> Result<ScanPlan, ParseError> {
    let file = File::open(path)?;
    read_plan(BufReader::new(file))
}
