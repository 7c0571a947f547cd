//! Two-level comment threads.
//!
//! Threads are a stateless projection over a flat comment list: comments without a
//! parent start threads, and replies are grouped under the parent they name. Input
//! order is preserved at both levels. Nothing deeper than one level of replies is
//! modelled.

use super::*;

/// A top-level comment and its direct replies.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentThread {
  /// The comment that starts the thread
  pub comment: Comment,
  /// Replies in their original order
  pub replies: Vec<Comment>,
}

/// Comments that start a thread, in input order.
pub fn top_level(comments: &[Comment]) -> Vec<&Comment> {
  comments.iter().filter(|c| c.is_top_level()).collect()
}

/// Direct replies to `parent_id`, in input order.
pub fn replies_of<'a>(comments: &'a [Comment], parent_id: &str) -> Vec<&'a Comment> {
  comments
    .iter()
    .filter(|c| matches!(c.kind(), CommentKind::Reply { parent_id: p } if p == parent_id))
    .collect()
}

/// Groups a flat list into threads.
///
/// Replies whose parent is not among the top-level comments are dropped from the
/// projection.
pub fn build_threads(comments: &[Comment]) -> Vec<CommentThread> {
  let mut replies: BTreeMap<&str, Vec<Comment>> = BTreeMap::new();
  for comment in comments {
    if let CommentKind::Reply { parent_id } = comment.kind() {
      replies.entry(parent_id).or_default().push(comment.clone());
    }
  }

  top_level(comments)
    .into_iter()
    .map(|comment| CommentThread {
      comment: comment.clone(),
      replies: replies.remove(comment.id.as_str()).unwrap_or_default(),
    })
    .collect()
}
