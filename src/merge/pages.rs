//! Page set composition.
//!
//! This module computes output page orders from ordered page sequences:
//! - Removing a subset of pages by 1-based index
//! - Appending, prepending or inserting one sequence into another
//! - Concatenating any number of sequences
//!
//! Everything here is plain list manipulation over an opaque page type.
//! Nothing is loaded or written; [`Merger`](crate::merge::Merger) feeds in
//! [`PageRef`] handles and hands the result to the page tree assembly.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, SpliceError};
use crate::io::PageRef;

/// How the pages of a second document are combined with a base document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeMode {
    /// Base pages followed by added pages.
    Append,
    /// Added pages followed by base pages.
    Prepend,
    /// Added pages placed before a 1-based base position.
    Insert,
}

impl MergeMode {
    /// Lowercase name of the mode.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Append => "append",
            Self::Prepend => "prepend",
            Self::Insert => "insert",
        }
    }
}

impl fmt::Display for MergeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MergeMode {
    type Err = SpliceError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "append" => Ok(Self::Append),
            "prepend" => Ok(Self::Prepend),
            "insert" => Ok(Self::Insert),
            other => Err(SpliceError::invalid_mode(other)),
        }
    }
}

/// Outcome of [`remove_pages`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Removal<P> {
    /// Pages that survived, in source order.
    pub kept: Vec<P>,

    /// Number of pages actually dropped.
    pub removed: usize,

    /// Requested indices that matched no page, in the order given.
    pub ignored: Vec<i64>,
}

/// Drop the pages at the given 1-based indices.
///
/// Indices may be unordered, repeated or out of range. Out-of-range
/// indices are reported in [`Removal::ignored`] and otherwise have no
/// effect. The surviving pages keep their relative order.
///
/// # Examples
///
/// ```
/// use pdfsplice::merge::pages::remove_pages;
///
/// let removal = remove_pages(&[1, 2, 3, 4, 5], &[4, 2, 9]);
/// assert_eq!(removal.kept, vec![1, 3, 5]);
/// assert_eq!(removal.removed, 2);
/// assert_eq!(removal.ignored, vec![9]);
/// ```
pub fn remove_pages<P: Clone>(pages: &[P], indices: &[i64]) -> Removal<P> {
    let total = pages.len() as i64;

    let mut to_remove = HashSet::with_capacity(indices.len());
    let mut ignored = Vec::new();
    for &index in indices {
        if (1..=total).contains(&index) {
            to_remove.insert((index - 1) as usize);
        } else {
            ignored.push(index);
        }
    }

    let kept: Vec<P> = pages
        .iter()
        .enumerate()
        .filter(|(position, _)| !to_remove.contains(position))
        .map(|(_, page)| page.clone())
        .collect();

    Removal {
        removed: pages.len() - kept.len(),
        kept,
        ignored,
    }
}

/// Combine two page sequences.
///
/// For [`MergeMode::Insert`], `position` is the 1-based base page before
/// which `add` goes. Positions past the end behave like append and
/// positions of 1 or less like prepend. The other modes ignore `position`.
///
/// # Errors
///
/// Returns [`SpliceError::MissingPosition`] for insert without a position.
///
/// # Examples
///
/// ```
/// use pdfsplice::merge::pages::{combine, MergeMode};
///
/// let out = combine(&["b1", "b2", "b3"], &["a1", "a2"], MergeMode::Insert, Some(2)).unwrap();
/// assert_eq!(out, vec!["b1", "a1", "a2", "b2", "b3"]);
/// ```
pub fn combine<P: Clone>(
    base: &[P],
    add: &[P],
    mode: MergeMode,
    position: Option<i64>,
) -> Result<Vec<P>> {
    let mut output = Vec::with_capacity(base.len() + add.len());

    match mode {
        MergeMode::Append => {
            output.extend_from_slice(base);
            output.extend_from_slice(add);
        }
        MergeMode::Prepend => {
            output.extend_from_slice(add);
            output.extend_from_slice(base);
        }
        MergeMode::Insert => {
            let position = position.ok_or(SpliceError::MissingPosition)?;
            let split = split_point(position, base.len());

            output.extend_from_slice(&base[..split]);
            output.extend_from_slice(add);
            output.extend_from_slice(&base[split..]);
        }
    }

    Ok(output)
}

/// 0-based split index for a 1-based insert position, clamped to `0..=len`.
fn split_point(position: i64, len: usize) -> usize {
    let zero_based = position.saturating_sub(1);
    if zero_based <= 0 {
        0
    } else {
        usize::try_from(zero_based).map_or(len, |p| p.min(len))
    }
}

/// Concatenate page sequences in order.
pub fn concatenate<P: Clone>(sequences: &[Vec<P>]) -> Vec<P> {
    sequences.iter().flatten().cloned().collect()
}

/// A run of consecutive pages from one source document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRun {
    /// Index of the source in its [`SourceSet`](crate::io::SourceSet).
    pub source: usize,
    /// First page number of the run (1-based).
    pub first: u32,
    /// Last page number of the run (1-based, inclusive).
    pub last: u32,
}

impl PageRun {
    /// Number of pages in the run.
    pub fn len(&self) -> usize {
        (self.last - self.first + 1) as usize
    }

    /// A run always holds at least one page.
    pub fn is_empty(&self) -> bool {
        false
    }
}

impl fmt::Display for PageRun {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.first == self.last {
            write!(f, "page {}", self.first)
        } else {
            write!(f, "pages {}-{}", self.first, self.last)
        }
    }
}

/// Collapse a page plan into runs of ascending consecutive pages.
///
/// Used to print a compact plan in dry-run mode.
pub fn page_runs(plan: &[PageRef]) -> Vec<PageRun> {
    let mut runs: Vec<PageRun> = Vec::new();

    for page in plan {
        match runs.last_mut() {
            Some(run)
                if run.source == page.source
                    && run.last.checked_add(1) == Some(page.page_number) =>
            {
                run.last = page.page_number;
            }
            _ => runs.push(PageRun {
                source: page.source,
                first: page.page_number,
                last: page.page_number,
            }),
        }
    }

    runs
}
