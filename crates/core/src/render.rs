//! Paginated rendering of scan results.
//!
//! Pages are bounded by a character budget matching the chat transport's
//! embed description limit. Character counts are in `char`s, not bytes.

use serde::Serialize;

use crate::category::{RewardCategory, EMPTY_COLOR};
use crate::scan::{ScanLine, ScanResult};

const TRUNCATED_MARKER: &str = "\n...(Truncated)";

/// Smallest usable page budget. Smaller configured values are raised to it.
pub const MIN_PAGE_CHARS: usize = 50;

#[derive(Debug, Clone)]
pub struct RenderOptions {
    pub max_lines_per_zone: usize,
    pub max_page_chars: usize,
    /// Sole page content when nothing matched.
    pub empty_message: String,
}

impl RenderOptions {
    /// Page budget in chars, never below [`MIN_PAGE_CHARS`].
    pub fn page_budget(&self) -> usize {
        self.max_page_chars.max(MIN_PAGE_CHARS)
    }
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            max_lines_per_zone: 20,
            max_page_chars: 3800,
            empty_message: "No missions found.".to_string(),
        }
    }
}

fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// Sort descending by value; `sort_by` is stable so ties keep encounter
/// order.
fn sorted_lines(lines: &[ScanLine]) -> Vec<&ScanLine> {
    let mut sorted: Vec<&ScanLine> = lines.iter().collect();
    sorted.sort_by(|a, b| b.sort_value.cmp(&a.sort_value));
    sorted
}

fn zone_block(zone: &str, lines: &[ScanLine], max_lines: usize) -> String {
    let sorted = sorted_lines(lines);
    let mut body: Vec<&str> = sorted.iter().take(max_lines).map(|l| l.text.as_str()).collect();

    let hidden = sorted.len().saturating_sub(max_lines);
    let marker = format!("*...and {hidden} more hidden.*");
    if hidden > 0 {
        body.push(&marker);
    }

    format!("**{}**\n{}\n\n", zone.to_uppercase(), body.join("\n"))
}

/// Cut an oversized block at a line boundary and append the truncation
/// marker. The zone header line is always kept. The result fits `budget`
/// whenever `budget` is at least [`MIN_PAGE_CHARS`].
fn truncate_block(block: &str, budget: usize) -> String {
    let limit = budget.saturating_sub(char_len(TRUNCATED_MARKER));
    let mut lines = block.lines();
    let mut out: String = lines.next().unwrap_or_default().chars().take(limit).collect();
    let mut used = char_len(&out);

    for line in lines {
        let cost = char_len(line) + 1;
        if used + cost > limit {
            break;
        }
        out.push('\n');
        out.push_str(line);
        used += cost;
    }
    out.push_str(TRUNCATED_MARKER);
    out
}

/// Render a scan result into pages.
///
/// Zones are visited in canonical order. A zone block that would overflow
/// the current page starts a new page; a block larger than a whole page is
/// truncated onto a page of its own. Always returns at least one page.
pub fn render(result: &ScanResult, opts: &RenderOptions) -> Vec<String> {
    let budget = opts.page_budget();
    let mut pages = Vec::new();
    let mut current = String::new();

    for (zone, group) in result.ordered_zones() {
        let block = zone_block(zone, &group.lines, opts.max_lines_per_zone);
        let block_len = char_len(&block);

        if char_len(&current) + block_len <= budget {
            current.push_str(&block);
            continue;
        }

        if !current.is_empty() {
            pages.push(std::mem::take(&mut current));
        }
        if block_len > budget {
            pages.push(truncate_block(&block, budget));
        } else {
            current = block;
        }
    }

    if !current.is_empty() {
        pages.push(current);
    }
    if pages.is_empty() {
        pages.push(opts.empty_message.clone());
    }
    pages
}

// ---------------------------------------------------------------------------
// Alert report
// ---------------------------------------------------------------------------

/// Everything a transport needs to post one category's results.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AlertReport {
    pub category: String,
    pub title: String,
    pub color: u32,
    pub pages: Vec<String>,
    pub footer: String,
    pub total: u64,
    pub empty: bool,
}

impl AlertReport {
    pub fn build(
        category: &RewardCategory,
        result: &ScanResult,
        opts: &RenderOptions,
        stale: bool,
    ) -> Self {
        let empty = result.is_empty();
        let opts = RenderOptions {
            empty_message: format!(
                "❌ No missions found for **{}**.\nBetter luck next reset!",
                category.name
            ),
            ..opts.clone()
        };

        let mut footer = format!("Total Items: {}", format_number(result.grand_total));
        if stale {
            footer.push_str(" • Data may be outdated");
        }

        Self {
            category: category.key.to_string(),
            title: format!("STW Alerts For: {}", category.name),
            color: if empty { EMPTY_COLOR } else { category.color },
            pages: render(result, &opts),
            footer,
            total: result.grand_total,
            empty,
        }
    }
}

/// Group thousands with `.`, e.g. `1234567` → `1.234.567`.
pub fn format_number(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('.');
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::find_category;
    use crate::scan::ZoneGroup;

    fn line(text: &str, value: u64) -> ScanLine {
        ScanLine {
            text: text.to_string(),
            sort_value: value,
        }
    }

    fn result(zones: Vec<(&str, Vec<ScanLine>)>) -> ScanResult {
        let mut r = ScanResult::default();
        for (zone, lines) in zones {
            r.grand_total += lines.iter().map(|l| l.sort_value).sum::<u64>();
            r.groups.insert(zone.to_string(), ZoneGroup { lines });
        }
        r
    }

    #[test]
    fn empty_result_is_one_page() {
        let pages = render(&ScanResult::default(), &RenderOptions::default());
        assert_eq!(pages, vec!["No missions found.".to_string()]);
    }

    #[test]
    fn orders_zones_and_lines() {
        let r = result(vec![
            ("Twine Peaks", vec![line("tp-a", 5), line("tp-b", 9), line("tp-c", 5)]),
            ("Stonewood", vec![line("sw", 1)]),
        ]);
        let pages = render(&r, &RenderOptions::default());
        assert_eq!(pages.len(), 1);
        assert_eq!(
            pages[0],
            "**STONEWOOD**\nsw\n\n**TWINE PEAKS**\ntp-b\ntp-a\ntp-c\n\n"
        );
    }

    #[test]
    fn caps_lines_per_zone() {
        let lines = (0..25).map(|i| line(&format!("l{i}"), 100 - i)).collect();
        let pages = render(&result(vec![("Plankerton", lines)]), &RenderOptions::default());
        assert!(pages[0].contains("l19\n*...and 5 more hidden.*"));
        assert!(!pages[0].contains("l20"));
    }

    #[test]
    fn splits_pages_at_zone_boundaries() {
        let opts = RenderOptions {
            max_page_chars: 60,
            ..RenderOptions::default()
        };
        let r = result(vec![
            ("Stonewood", vec![line(&"a".repeat(30), 1)]),
            ("Plankerton", vec![line(&"b".repeat(30), 1)]),
        ]);
        let pages = render(&r, &opts);
        assert_eq!(pages.len(), 2);
        assert!(pages.iter().all(|p| p.chars().count() <= 60));
        assert!(pages[0].starts_with("**STONEWOOD**"));
        assert!(pages[1].starts_with("**PLANKERTON**"));
    }

    #[test]
    fn oversized_zone_is_truncated_at_line_boundary() {
        let opts = RenderOptions {
            max_page_chars: 100,
            ..RenderOptions::default()
        };
        let lines = (0..10).map(|i| line(&format!("line-{i}-⚡⚡⚡⚡⚡"), 1)).collect();
        let pages = render(&result(vec![("Canny Valley", lines)]), &opts);
        assert_eq!(pages.len(), 1);
        assert!(pages[0].ends_with("...(Truncated)"));
        assert!(pages[0].chars().count() <= 100);
        for l in pages[0].lines().filter(|l| l.starts_with("line-")) {
            assert!(l.ends_with("⚡⚡⚡⚡⚡"));
        }
    }

    #[test]
    fn truncation_keeps_zone_header() {
        let opts = RenderOptions {
            max_page_chars: MIN_PAGE_CHARS,
            ..RenderOptions::default()
        };
        let pages = render(&result(vec![("Canny Valley", vec![line(&"x".repeat(100), 1)])]), &opts);
        assert_eq!(pages, vec!["**CANNY VALLEY**\n...(Truncated)".to_string()]);
    }

    #[test]
    fn tiny_budget_is_raised_to_minimum() {
        let opts = RenderOptions {
            max_page_chars: 3,
            ..RenderOptions::default()
        };
        let lines = (0..10).map(|i| line(&format!("mission-{i}"), 1)).collect();
        let pages = render(&result(vec![("Stonewood", lines)]), &opts);
        assert_eq!(pages.len(), 1);
        assert!(pages[0].starts_with("**STONEWOOD**\nmission-0"));
        assert!(pages[0].chars().count() <= MIN_PAGE_CHARS);
    }

    #[test]
    fn report_footer_and_colors() {
        let vbucks = find_category("currency_mtxswap").unwrap();
        let r = result(vec![("Stonewood", vec![line("x", 1234)])]);
        let report = AlertReport::build(vbucks, &r, &RenderOptions::default(), true);
        assert_eq!(report.title, "STW Alerts For: V-Bucks");
        assert_eq!(report.footer, "Total Items: 1.234 • Data may be outdated");
        assert_eq!(report.color, vbucks.color);

        let empty = AlertReport::build(vbucks, &ScanResult::default(), &RenderOptions::default(), false);
        assert!(empty.empty);
        assert_eq!(empty.color, EMPTY_COLOR);
        assert_eq!(empty.pages.len(), 1);
        assert!(empty.pages[0].contains("No missions found for **V-Bucks**"));
    }

    #[test]
    fn formats_thousands() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(1000), "1.000");
        assert_eq!(format_number(1234567), "1.234.567");
    }
}
