//! Footnote placement under page footers
//!
//! Footnotes are numbered in order of first reference and listed under the
//! footer band of the page holding that reference. Pages are discovered
//! from the rendered footer bands, so placement follows whatever layout the
//! paginator rendered last.

use crate::host::{Transaction, PAGINATION_UPDATED};
use crate::trigger::{Clock, IntervalTimer};
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use rustc_hash::{FxHashMap, FxHasher};
use smallvec::SmallVec;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

/// Period of the fallback re-check
pub const RECHECK_INTERVAL_MS: u64 = 1000;

/// A footnote reference found in the document
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct FootnoteRef {
    pub id: String,
    /// Top offset of the element holding the reference
    pub top: f32,
}

/// A rendered footer band
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FooterBandBox {
    pub break_index: usize,
    pub top: f32,
}

/// One numbered footnote
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FootnoteEntry {
    pub number: usize,
    pub id: String,
    pub text: String,
}

/// Footnotes listed under one footer band
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageFootnotes {
    pub break_index: usize,
    pub entries: SmallVec<[FootnoteEntry; 4]>,
}

/// Rendered document as seen by the footnote placer
pub trait FootnoteSurface {
    /// References in document order
    fn footnote_refs(&self) -> Vec<FootnoteRef>;

    fn footnote_text(&self, id: &str) -> Option<String>;

    /// Visible footer bands in document order
    fn footer_bands(&self) -> Vec<FooterBandBox>;

    /// Replace all rendered footnote lists
    fn render_footnotes(&mut self, placements: &[PageFootnotes]);
}

/// Number the references and attribute each footnote to a footer band.
///
/// A reference belongs to the first band at or below it; references past
/// the last band are listed under it. Pages without footnotes are omitted.
pub fn assign_footnotes(
    refs: &[FootnoteRef],
    bands: &[FooterBandBox],
    text: impl Fn(&str) -> Option<String>,
) -> Vec<PageFootnotes> {
    let Some(last_band) = bands.len().checked_sub(1) else {
        return Vec::new();
    };

    let mut pages: Vec<PageFootnotes> = bands
        .iter()
        .map(|band| PageFootnotes {
            break_index: band.break_index,
            entries: SmallVec::new(),
        })
        .collect();
    let mut numbers: FxHashMap<&str, usize> = FxHashMap::default();

    for reference in refs {
        if numbers.contains_key(reference.id.as_str()) {
            continue;
        }
        let number = numbers.len() + 1;
        numbers.insert(reference.id.as_str(), number);

        let slot = bands
            .iter()
            .position(|band| band.top >= reference.top)
            .unwrap_or(last_band);
        pages[slot].entries.push(FootnoteEntry {
            number,
            id: reference.id.clone(),
            text: text(&reference.id).unwrap_or_default(),
        });
    }

    pages.retain(|page| !page.entries.is_empty());
    pages
}

fn placement_signature(placements: &[PageFootnotes]) -> u64 {
    let mut hasher = FxHasher::default();
    placements.hash(&mut hasher);
    hasher.finish()
}

/// Keeps the rendered footnote lists in sync with the page layout
pub struct FootnotePlacer {
    recheck: IntervalTimer,
    signature: Option<u64>,
    render_count: usize,
}

impl FootnotePlacer {
    pub fn new(clock: Rc<dyn Clock>) -> Self {
        Self {
            recheck: IntervalTimer::new(clock, RECHECK_INTERVAL_MS),
            signature: None,
            render_count: 0,
        }
    }

    /// React to a host transaction; only repagination matters here.
    ///
    /// Repagination rebuilds the footer bands, so the lists are always
    /// re-rendered even when the placement did not change.
    pub fn on_transaction<S: FootnoteSurface>(&mut self, tx: &Transaction, surface: &mut S) -> bool {
        if !tx.has_meta(PAGINATION_UPDATED) {
            return false;
        }
        self.signature = None;
        self.place(surface)
    }

    /// React to a DOM mutation
    pub fn on_mutation<S: FootnoteSurface>(&mut self, surface: &mut S) -> bool {
        self.place(surface)
    }

    /// Periodic re-check
    pub fn tick<S: FootnoteSurface>(&mut self, surface: &mut S) -> bool {
        if !self.recheck.fire_if_due() {
            return false;
        }
        self.place(surface)
    }

    /// Recompute the placement and render it if it changed
    pub fn place<S: FootnoteSurface>(&mut self, surface: &mut S) -> bool {
        let refs = surface.footnote_refs();
        let bands = surface.footer_bands();
        let placements = assign_footnotes(&refs, &bands, |id| surface.footnote_text(id));

        let signature = placement_signature(&placements);
        if self.signature == Some(signature) {
            trace!("footnote placement unchanged, skipping render");
            return false;
        }

        surface.render_footnotes(&placements);
        self.signature = Some(signature);
        self.render_count += 1;
        debug!(
            "rendered {} footnotes on {} pages",
            placements.iter().map(|p| p.entries.len()).sum::<usize>(),
            placements.len()
        );
        true
    }

    pub fn render_count(&self) -> usize {
        self.render_count
    }
}
