//! Print paginator: packs the renderer's absolute-positioned visual
//! blocks into fixed-height pages.
//!
//! Stateless and reentrant. The input blocks are renderer-owned markup;
//! pagination only clones their content, never mutates it. A block is
//! never split across pages: one taller than a whole page still gets a
//! page of its own, overflow and all.

use serde::{Deserialize, Serialize};

/// One absolute-positioned visual block as reported by the renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrintBlock {
    /// Top edge in the renderer's coordinate space (px)
    pub top: f64,
    /// Block height (px)
    pub height: f64,
    /// The block's markup, cloned verbatim into the page
    pub html: String,
}

/// A block placed on a page, with its top re-baselined against the page's
/// own minimum top so every page renders from 0.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageBlock {
    pub top: f64,
    pub html: String,
}

/// One assembled page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Page {
    pub width: f64,
    pub height: f64,
    pub blocks: Vec<PageBlock>,
}

/// Bin-pack `blocks` into pages and render each as an HTML fragment.
///
/// With no blocks at all, returns one page wrapping `raw_content`
/// unchanged, so a host can always print something.
pub fn paginate(
    raw_content: &str,
    blocks: &[PrintBlock],
    page_height: f64,
    page_width: f64,
) -> Vec<String> {
    if blocks.is_empty() {
        let mut builder = PageBuilder::new(page_width, page_height);
        builder.raw(raw_content);
        return vec![builder.build()];
    }

    paginate_blocks(blocks, page_height, page_width)
        .iter()
        .map(page_to_html)
        .collect()
}

/// The packing itself, exposed for hosts that lay pages out themselves.
///
/// Blocks are sorted by `top` (stable, so equal tops keep their input
/// order) and accumulated greedily: a block joins the current page while
/// it ends above the page's bottom edge, otherwise it opens a new page
/// anchored at its own top.
pub fn paginate_blocks(blocks: &[PrintBlock], page_height: f64, page_width: f64) -> Vec<Page> {
    let mut sorted: Vec<&PrintBlock> = blocks.iter().collect();
    sorted.sort_by(|a, b| a.top.total_cmp(&b.top));

    let mut pages: Vec<Page> = Vec::new();
    let mut current: Vec<&PrintBlock> = Vec::new();
    // The page is anchored at its first block's top; sorting makes that
    // the page's minimum top.
    let mut page_top = 0.0;

    for block in sorted {
        let fits = current.is_empty() || block.top + block.height <= page_top + page_height;
        if !fits {
            pages.push(close_page(&current, page_top, page_width, page_height));
            current.clear();
        }
        if current.is_empty() {
            page_top = block.top;
        }
        current.push(block);

        // A block taller than a whole page keeps its page to itself.
        if block.height > page_height {
            pages.push(close_page(&current, page_top, page_width, page_height));
            current.clear();
        }
    }
    if !current.is_empty() {
        pages.push(close_page(&current, page_top, page_width, page_height));
    }

    pages
}

/// Render one page as a self-contained HTML fragment.
pub fn page_to_html(page: &Page) -> String {
    let mut builder = PageBuilder::new(page.width, page.height);
    for block in &page.blocks {
        builder.block(block.top, &block.html);
    }
    builder.build()
}

fn close_page(blocks: &[&PrintBlock], page_top: f64, width: f64, page_height: f64) -> Page {
    let placed: Vec<PageBlock> = blocks
        .iter()
        .map(|b| PageBlock {
            top: b.top - page_top,
            html: b.html.clone(),
        })
        .collect();

    // The page grows past the nominal height rather than understate an
    // oversized block it holds.
    let content_bottom = blocks
        .iter()
        .map(|b| b.top - page_top + b.height)
        .fold(0.0, f64::max);

    Page {
        width,
        height: page_height.max(content_bottom),
        blocks: placed,
    }
}

// ═══════════════════════════════════════════════════════════════════════
// PageBuilder
// ═══════════════════════════════════════════════════════════════════════

/// Accumulates positioned fragments and produces the final page markup.
struct PageBuilder {
    elements: Vec<String>,
    width: f64,
    height: f64,
}

impl PageBuilder {
    fn new(width: f64, height: f64) -> Self {
        Self {
            elements: Vec::new(),
            width,
            height,
        }
    }

    fn block(&mut self, top: f64, html: &str) {
        self.elements.push(format!(
            r#"<div class="print-block" style="position: absolute; left: 0; top: {top:.1}px;">{html}</div>"#
        ));
    }

    /// Degenerate page content, inserted unchanged.
    fn raw(&mut self, html: &str) {
        self.elements.push(html.to_string());
    }

    fn build(self) -> String {
        let mut page = format!(
            r#"<div class="print-page" style="position: relative; overflow: hidden; width: {:.1}px; height: {:.1}px;">"#,
            self.width, self.height
        );
        page.push('\n');
        for el in &self.elements {
            page.push_str("  ");
            page.push_str(el);
            page.push('\n');
        }
        page.push_str("</div>\n");
        page
    }
}
