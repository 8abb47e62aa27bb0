use tracing::debug;

use crate::models::{Conversation, Message, SearchFilter};

/// A message that survived structural filtering and is eligible for text matching
#[derive(Debug, Clone, Copy)]
pub struct Candidate<'a> {
    pub conversation: &'a Conversation,
    pub message: &'a Message,
    /// Position of `message` within `conversation.messages`
    pub index: usize,
}

/// Flatten conversations into candidates that satisfy every filter predicate
///
/// Filter logic:
/// - All present predicates are AND'd together
/// - Absent predicates match everything
/// - Contradictory bounds (start after end, min above max) match nothing
pub fn collect_candidates<'a>(
    conversations: &'a [Conversation],
    filter: Option<&SearchFilter>,
) -> Vec<Candidate<'a>> {
    let candidates: Vec<Candidate<'a>> = conversations
        .iter()
        .flat_map(|conversation| {
            conversation.messages.iter().enumerate().map(move |(index, message)| Candidate {
                conversation,
                message,
                index,
            })
        })
        .filter(|candidate| filter.is_none_or(|f| evaluate_filter(candidate, f)))
        .collect();

    debug!(candidates = candidates.len(), filtered = filter.is_some(), "collected candidates");
    candidates
}

/// Evaluate filter predicates against a single candidate
fn evaluate_filter(candidate: &Candidate<'_>, filter: &SearchFilter) -> bool {
    match_date_range(candidate, filter)
        && match_message_type(candidate, filter)
        && match_models(candidate, filter)
        && match_attachments(candidate, filter)
        && match_length(candidate, filter)
}

fn match_date_range(candidate: &Candidate<'_>, filter: &SearchFilter) -> bool {
    filter.date_range.is_none_or(|range| range.contains(candidate.message.timestamp))
}

fn match_message_type(candidate: &Candidate<'_>, filter: &SearchFilter) -> bool {
    filter.message_type.is_none_or(|kind| kind.matches(candidate.message.role))
}

/// Case-insensitive exact match against the message's model (or the conversation default)
fn match_models(candidate: &Candidate<'_>, filter: &SearchFilter) -> bool {
    match filter.models.as_deref() {
        None | Some([]) => true,
        Some(models) => {
            let model = candidate.conversation.model_for(candidate.message);
            models.iter().any(|m| m.eq_ignore_ascii_case(model))
        }
    }
}

fn match_attachments(candidate: &Candidate<'_>, filter: &SearchFilter) -> bool {
    filter.has_attachments.is_none_or(|wanted| candidate.message.has_attachments() == wanted)
}

/// Length bounds are inclusive and count characters, not bytes
fn match_length(candidate: &Candidate<'_>, filter: &SearchFilter) -> bool {
    if filter.min_length.is_none() && filter.max_length.is_none() {
        return true;
    }

    let len = candidate.message.content.chars().count();
    filter.min_length.is_none_or(|min| len >= min) && filter.max_length.is_none_or(|max| len <= max)
}
