//! Parent → children view over the spans of one trace

use super::types::{SpanStatus, TraceSpan};
use std::collections::{HashMap, HashSet};

pub struct TraceTree<'a> {
    spans: &'a [TraceSpan],
    children: HashMap<&'a str, Vec<usize>>,
    roots: Vec<usize>,
}

impl<'a> TraceTree<'a> {
    /// Spans whose parent is not part of the trace are treated as roots
    pub fn build(spans: &'a [TraceSpan]) -> Self {
        let known: HashSet<&str> = spans.iter().map(|s| s.span_id.as_str()).collect();

        let mut children: HashMap<&'a str, Vec<usize>> = HashMap::new();
        let mut roots = Vec::new();

        for (idx, span) in spans.iter().enumerate() {
            match span.parent_span_id.as_deref() {
                Some(parent) if known.contains(parent) => {
                    children.entry(parent).or_default().push(idx);
                }
                _ => roots.push(idx),
            }
        }

        TraceTree { spans, children, roots }
    }

    pub fn roots(&self) -> impl Iterator<Item = &'a TraceSpan> + '_ {
        self.roots.iter().map(move |&i| &self.spans[i])
    }

    pub fn children_of(&self, span_id: &str) -> Vec<&'a TraceSpan> {
        self.children
            .get(span_id)
            .map(|idx| idx.iter().map(|&i| &self.spans[i]).collect())
            .unwrap_or_default()
    }

    /// `(depth, span)` in depth-first order, children sorted by start offset
    pub fn walk(&self) -> Vec<(usize, &'a TraceSpan)> {
        let mut out = Vec::with_capacity(self.spans.len());
        let mut stack: Vec<(usize, usize)> = self.sorted(&self.roots).into_iter().rev().map(|i| (0, i)).collect();

        while let Some((depth, idx)) = stack.pop() {
            let span = &self.spans[idx];
            out.push((depth, span));
            if let Some(kids) = self.children.get(span.span_id.as_str()) {
                stack.extend(self.sorted(kids).into_iter().rev().map(|i| (depth + 1, i)));
            }
        }
        out
    }

    fn sorted(&self, idx: &[usize]) -> Vec<usize> {
        let mut v = idx.to_vec();
        v.sort_by_key(|&i| self.spans[i].start_offset_ms);
        v
    }

    /// Longest end offset reachable from the roots, relative to the earliest root start
    pub fn critical_path_ms(&self) -> u64 {
        let start = self.roots().map(|s| s.start_offset_ms).min().unwrap_or(0);
        let end = self.walk().iter().map(|(_, s)| s.end_offset_ms()).max().unwrap_or(0);
        end.saturating_sub(start)
    }

    pub fn error_count(&self) -> usize {
        self.spans.iter().filter(|s| s.status == SpanStatus::Error).count()
    }

    pub fn depth(&self) -> usize {
        self.walk().iter().map(|(d, _)| d + 1).max().unwrap_or(0)
    }
}
