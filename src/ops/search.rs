use std::ops::Range;

use regex::Regex;

use crate::model::board::{Board, ItemId};
use crate::model::item::Item;

/// Which field of an item matched
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchField {
    Name,
    Description,
    Category,
}

/// A search hit with the byte ranges to highlight
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchHit {
    pub item: ItemId,
    pub field: MatchField,
    pub spans: Vec<Range<usize>>,
}

/// Collect all non-overlapping match byte-ranges for a regex in the given text.
fn find_matches(re: &Regex, text: &str) -> Vec<Range<usize>> {
    re.find_iter(text).map(|m| m.start()..m.end()).collect()
}

/// Search every item on the board, in board order, reporting a hit per
/// matched field. The query is treated as a case-insensitive literal, so
/// the hit set agrees with `Item::matches`; an empty query yields no hits
/// (match-all belongs to the filter layer, not to highlighting).
pub fn search(board: &Board, query: &str) -> Vec<SearchHit> {
    let mut hits = Vec::new();
    if query.is_empty() {
        return hits;
    }
    // Escaped literal: the pattern cannot fail to compile.
    let Ok(re) = Regex::new(&format!("(?i){}", regex::escape(query))) else {
        return hits;
    };
    for (id, item) in board.items() {
        search_item(&re, id, item, &mut hits);
    }
    hits
}

fn search_item(re: &Regex, id: ItemId, item: &Item, hits: &mut Vec<SearchHit>) {
    let spans = find_matches(re, &item.name);
    if !spans.is_empty() {
        hits.push(SearchHit {
            item: id,
            field: MatchField::Name,
            spans,
        });
    }

    let spans = find_matches(re, &item.description);
    if !spans.is_empty() {
        hits.push(SearchHit {
            item: id,
            field: MatchField::Description,
            spans,
        });
    }

    for category in &item.category {
        let spans = find_matches(re, category);
        if !spans.is_empty() {
            hits.push(SearchHit {
                item: id,
                field: MatchField::Category,
                spans,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::item::Priority;
    use crate::ops::board_ops::{add_category, add_item};

    #[test]
    fn test_search_reports_spans() {
        let mut board = Board::new();
        let id = add_item(
            &mut board,
            Item::new("Fix login bug", "the login form hangs", Priority::High),
        )
        .unwrap();

        let hits = search(&board, "login");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].item, id);
        assert_eq!(hits[0].field, MatchField::Name);
        assert_eq!(hits[0].spans, vec![4..9]);
        assert_eq!(hits[1].field, MatchField::Description);
        assert_eq!(hits[1].spans, vec![4..9]);
    }

    #[test]
    fn test_search_is_case_insensitive_literal() {
        let mut board = Board::new();
        add_item(&mut board, Item::new("a+b", "", Priority::Medium)).unwrap();
        // `+` must be treated literally, not as a regex operator.
        let hits = search(&board, "A+B");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].spans, vec![0..3]);
    }

    #[test]
    fn test_search_matches_categories() {
        let mut board = Board::new();
        let id = add_item(&mut board, Item::new("x", "", Priority::Medium)).unwrap();
        add_category(&mut board, id, "frontend").unwrap();
        let hits = search(&board, "front");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].field, MatchField::Category);
    }

    #[test]
    fn test_empty_query_yields_no_hits() {
        let mut board = Board::new();
        add_item(&mut board, Item::new("x", "", Priority::Medium)).unwrap();
        assert!(search(&board, "").is_empty());
    }

    #[test]
    fn test_search_agrees_with_matches() {
        let mut board = Board::new();
        add_item(
            &mut board,
            Item::new("Write parser", "tokenizer first", Priority::Medium),
        )
        .unwrap();
        for query in ["parser", "TOKEN", "zzz"] {
            let hit = !search(&board, query).is_empty();
            let matched = board.items().any(|(_, item)| item.matches(query));
            assert_eq!(hit, matched, "query {query:?}");
        }
    }
}
