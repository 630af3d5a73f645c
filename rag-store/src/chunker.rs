//! Fixed-size word windows with overlap.
//!
//! Size and overlap are measured in whitespace-delimited words. Each chunk is
//! an exact slice of its page text (original spacing and newlines kept), so a
//! chunk never spans two pages and is never empty.

use tracing::debug;

use crate::record::{DocumentChunk, DocumentPage};

/// Splits every page into overlapping word windows.
///
/// Deterministic: the same pages always yield the same chunks in the same order.
/// `overlap` must be smaller than `size` (checked by `RagConfig::validate`);
/// a larger value is clamped so the window still advances.
pub fn split_pages(
    pages: &[DocumentPage],
    source: &str,
    size: usize,
    overlap: usize,
) -> Vec<DocumentChunk> {
    let size = size.max(1);
    let step = size - overlap.min(size - 1);

    let mut out = Vec::new();
    for page in pages {
        let spans = word_spans(&page.text);
        if spans.is_empty() {
            continue;
        }

        let mut start = 0usize;
        loop {
            let end = (start + size).min(spans.len());
            let text = &page.text[spans[start].0..spans[end - 1].1];
            let ordinal = out.len() as u32;
            out.push(DocumentChunk {
                id: format!("{source}#p{}c{ordinal}", page.page),
                text: text.to_string(),
                source: source.to_string(),
                page: page.page,
                chunk: ordinal,
                word_start: start as u32,
            });
            if end == spans.len() {
                break;
            }
            start += step;
        }
    }

    debug!(
        chunks = out.len(),
        pages = pages.len(),
        size,
        overlap,
        "split_pages: done"
    );
    out
}

/// Byte ranges `[start, end)` of each whitespace-delimited word.
fn word_spans(text: &str) -> Vec<(usize, usize)> {
    let mut spans = Vec::new();
    let mut current: Option<usize> = None;
    for (i, ch) in text.char_indices() {
        match (ch.is_whitespace(), current) {
            (true, Some(s)) => {
                spans.push((s, i));
                current = None;
            }
            (false, None) => current = Some(i),
            _ => {}
        }
    }
    if let Some(s) = current {
        spans.push((s, text.len()));
    }
    spans
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(n: u32, words: usize) -> DocumentPage {
        let text = (0..words)
            .map(|i| format!("w{n}_{i}"))
            .collect::<Vec<_>>()
            .join(" ");
        DocumentPage { page: n, text }
    }

    fn words(c: &DocumentChunk) -> Vec<&str> {
        c.text.split_whitespace().collect()
    }

    #[test]
    fn windows_overlap_by_the_configured_word_count() {
        let chunks = split_pages(&[page(0, 1200)], "pricing.pdf", 500, 200);
        let starts: Vec<u32> = chunks.iter().map(|c| c.word_start).collect();
        assert_eq!(starts, vec![0, 300, 600, 900]);

        for pair in chunks.windows(2) {
            let a = words(&pair[0]);
            let b = words(&pair[1]);
            assert_eq!(&a[a.len() - 200..], &b[..200]);
        }
        assert_eq!(words(&chunks[3]).len(), 300);
    }

    #[test]
    fn short_page_is_one_chunk_and_blank_page_none() {
        let pages = vec![
            page(0, 10),
            DocumentPage {
                page: 1,
                text: " \n\t ".into(),
            },
            page(2, 3),
        ];
        let chunks = split_pages(&pages, "doc.txt", 500, 200);
        assert_eq!(chunks.len(), 2);
        assert_eq!(chunks[0].page, 0);
        assert_eq!(chunks[1].page, 2);
        assert_eq!(chunks[1].chunk, 1);
        assert_eq!(chunks[1].id, "doc.txt#p2c1");
        assert!(chunks.iter().all(|c| !c.text.trim().is_empty()));
    }

    #[test]
    fn chunks_never_cross_pages() {
        let chunks = split_pages(&[page(0, 520), page(1, 520)], "doc.txt", 500, 200);
        for c in &chunks {
            let prefix = format!("w{}_", c.page);
            assert!(words(c).iter().all(|w| w.starts_with(&prefix)));
        }
    }

    #[test]
    fn original_spacing_is_preserved_inside_a_chunk() {
        let pages = vec![DocumentPage {
            page: 0,
            text: "  Plan A:\n  $10/month\n\nPlan B: $20  ".into(),
        }];
        let chunks = split_pages(&pages, "doc.txt", 500, 200);
        assert_eq!(chunks[0].text, "Plan A:\n  $10/month\n\nPlan B: $20");
    }

    #[test]
    fn splitting_is_deterministic() {
        let pages = vec![page(0, 777), page(1, 42)];
        assert_eq!(
            split_pages(&pages, "doc.txt", 100, 30),
            split_pages(&pages, "doc.txt", 100, 30)
        );
    }
}
