use std::cmp::Ordering;

use crate::filters::Candidate;
use crate::models::{MessageContext, SearchOptions, SearchResult, SortBy, SortOrder};

/// A candidate that passed matching, with its relevance score
#[derive(Debug, Clone, Copy)]
pub struct Scored<'a> {
    pub candidate: Candidate<'a>,
    pub score: f64,
}

/// Ascending comparison for the requested sort key
fn compare(a: &Scored<'_>, b: &Scored<'_>, sort_by: SortBy) -> Ordering {
    match sort_by {
        SortBy::Relevance => a.score.total_cmp(&b.score),
        SortBy::Date => a.candidate.message.timestamp.cmp(&b.candidate.message.timestamp),
        SortBy::Conversation => a.candidate.conversation.title.cmp(&b.candidate.conversation.title),
    }
}

/// Sort in place; `Desc` flips the comparator, ties keep scan order either way
pub fn sort_scored(scored: &mut [Scored<'_>], sort_by: SortBy, sort_order: SortOrder) {
    match sort_order {
        SortOrder::Asc => scored.sort_by(|a, b| compare(a, b, sort_by)),
        SortOrder::Desc => scored.sort_by(|a, b| compare(b, a, sort_by)),
    }
}

/// Neighbouring messages within the same conversation
pub fn context_for(candidate: &Candidate<'_>) -> MessageContext {
    let messages = &candidate.conversation.messages;
    MessageContext {
        previous_message: candidate
            .index
            .checked_sub(1)
            .and_then(|i| messages.get(i))
            .cloned(),
        next_message: messages.get(candidate.index + 1).cloned(),
    }
}

/// Sort, paginate and materialise results
///
/// Only the requested page is cloned out of the borrowed conversations, and
/// `highlight` runs once per returned message.
pub fn assemble<F>(
    mut scored: Vec<Scored<'_>>,
    options: &SearchOptions,
    highlight: F,
) -> Vec<SearchResult>
where
    F: Fn(&str) -> String,
{
    sort_scored(&mut scored, options.sort_by, options.sort_order);

    scored
        .into_iter()
        .skip(options.offset)
        .take(options.limit)
        .map(|s| {
            let Candidate { conversation, message, .. } = s.candidate;
            SearchResult {
                conversation_id: conversation.id.clone(),
                conversation_title: conversation.title.clone(),
                message_id: message.id.clone(),
                message: message.clone(),
                highlighted_content: highlight(&message.content),
                relevance_score: s.score,
                context: context_for(&s.candidate),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{Duration, TimeZone, Utc};

    use super::*;
    use crate::filters::collect_candidates;
    use crate::models::{Conversation, Message, Role};

    fn create_conversation(title: &str, contents: &[&str]) -> Conversation {
        let base = Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap();
        let mut conv = Conversation::new(title, "gpt-4");
        for (i, content) in contents.iter().enumerate() {
            let mut msg = Message::new(
                if i % 2 == 0 { Role::User } else { Role::Assistant },
                *content,
            );
            msg.timestamp = base + Duration::minutes(i as i64);
            conv.push_message(msg);
        }
        conv
    }

    fn score_all<'a>(convs: &'a [Conversation], scores: &[f64]) -> Vec<Scored<'a>> {
        collect_candidates(convs, None)
            .into_iter()
            .zip(scores.iter())
            .map(|(candidate, &score)| Scored { candidate, score })
            .collect()
    }

    #[test]
    fn test_relevance_desc_puts_highest_first() {
        let convs = vec![create_conversation("A", &["one", "two"])];
        let scored = score_all(&convs, &[15.0, 20.0]);
        let results = assemble(scored, &SearchOptions::default(), str::to_string);
        assert_eq!(results.len(), 2);
        assert_eq!(results[0].relevance_score, 20.0);
        assert_eq!(results[1].relevance_score, 15.0);
    }

    #[test]
    fn test_relevance_asc_flips_order() {
        let convs = vec![create_conversation("A", &["one", "two"])];
        let scored = score_all(&convs, &[20.0, 15.0]);
        let options = SearchOptions { sort_order: SortOrder::Asc, ..Default::default() };
        let results = assemble(scored, &options, str::to_string);
        assert_eq!(results[0].relevance_score, 15.0);
    }

    #[test]
    fn test_sort_by_date() {
        let convs = vec![create_conversation("A", &["first", "second", "third"])];
        let scored = score_all(&convs, &[5.0, 5.0, 5.0]);
        let options = SearchOptions { sort_by: SortBy::Date, ..Default::default() };
        let results = assemble(scored, &options, str::to_string);
        let order: Vec<&str> = results.iter().map(|r| r.message.content.as_str()).collect();
        assert_eq!(order, vec!["third", "second", "first"]);
    }

    #[test]
    fn test_sort_by_conversation_title() {
        let convs =
            vec![create_conversation("Beta", &["b"]), create_conversation("Alpha", &["a"])];
        let scored = score_all(&convs, &[5.0, 5.0]);
        let options = SearchOptions {
            sort_by: SortBy::Conversation,
            sort_order: SortOrder::Asc,
            ..Default::default()
        };
        let results = assemble(scored, &options, str::to_string);
        assert_eq!(results[0].conversation_title, "Alpha");
        assert_eq!(results[1].conversation_title, "Beta");
    }

    #[test]
    fn test_ties_keep_scan_order() {
        let convs = vec![create_conversation("A", &["first", "second"])];
        let scored = score_all(&convs, &[5.0, 5.0]);
        let results = assemble(scored, &SearchOptions::default(), str::to_string);
        assert_eq!(results[0].message.content, "first");
    }

    #[test]
    fn test_pagination_slice() {
        let contents: Vec<String> = (0..10).map(|i| format!("m{}", i)).collect();
        let refs: Vec<&str> = contents.iter().map(String::as_str).collect();
        let convs = vec![create_conversation("A", &refs)];
        let scores: Vec<f64> = (0..10).map(|i| (10 - i) as f64).collect();
        let scored = score_all(&convs, &scores);

        let options = SearchOptions { limit: 3, offset: 3, ..Default::default() };
        let results = assemble(scored, &options, str::to_string);
        let page: Vec<&str> = results.iter().map(|r| r.message.content.as_str()).collect();
        assert_eq!(page, vec!["m3", "m4", "m5"]);
    }

    #[test]
    fn test_offset_past_end_is_empty() {
        let convs = vec![create_conversation("A", &["one"])];
        let scored = score_all(&convs, &[5.0]);
        let options = SearchOptions { offset: 5, ..Default::default() };
        assert!(assemble(scored, &options, str::to_string).is_empty());
    }

    #[test]
    fn test_context_at_boundaries() {
        let convs = vec![create_conversation("A", &["first", "middle", "last"])];
        let candidates = collect_candidates(&convs, None);

        let first = context_for(&candidates[0]);
        assert!(first.previous_message.is_none());
        assert_eq!(first.next_message.unwrap().content, "middle");

        let middle = context_for(&candidates[1]);
        assert_eq!(middle.previous_message.unwrap().content, "first");
        assert_eq!(middle.next_message.unwrap().content, "last");

        let last = context_for(&candidates[2]);
        assert_eq!(last.previous_message.unwrap().content, "middle");
        assert!(last.next_message.is_none());
    }

    #[test]
    fn test_highlight_callback_applied() {
        let convs = vec![create_conversation("A", &["fox"])];
        let scored = score_all(&convs, &[5.0]);
        let results =
            assemble(scored, &SearchOptions::default(), |c| format!("<mark>{}</mark>", c));
        assert_eq!(results[0].highlighted_content, "<mark>fox</mark>");
        assert_eq!(results[0].message_id, convs[0].messages[0].id);
        assert_eq!(results[0].conversation_id, convs[0].id);
    }
}
