//! Syntactic root lookup for multiword ranges and empty nodes.
//!
//! This is the only dependency-graph query the crate answers. It works on the
//! raw record, so empty nodes dropped from the text are still reachable.

use crate::record::SentenceRecord;
use crate::token::{RawToken, TokenId};
use std::collections::HashSet;
use thiserror::Error;

/// Why a root could not be resolved.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RootError {
    #[error("no token with id {0} in the sentence")]
    UnknownNode(TokenId),
    #[error("token {0} has no usable head")]
    MissingHead(TokenId),
    #[error("head chain starting at {0} is cyclic")]
    Cycle(TokenId),
}

/// Target of a head column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum HeadRef {
    /// The synthetic sentence root, id `0`.
    Root,
    Node(TokenId),
}

fn parse_head(raw: &str) -> Option<HeadRef> {
    if raw == "0" {
        return Some(HeadRef::Root);
    }
    TokenId::parse(raw).map(HeadRef::Node)
}

fn basic_head(token: &RawToken) -> Result<HeadRef, RootError> {
    token
        .head()
        .and_then(parse_head)
        .ok_or(RootError::MissingHead(token.id))
}

/// First enhanced head, falling back to the basic head.
fn enhanced_head(token: &RawToken) -> Result<HeadRef, RootError> {
    match token.enhanced_deps().next() {
        Some((head, _)) => parse_head(head).ok_or(RootError::MissingHead(token.id)),
        None => basic_head(token),
    }
}

impl SentenceRecord {
    /// Resolve the syntactic root of `id`.
    ///
    /// - A range `a-b` resolves to the covered token whose head is `0` or lies
    ///   outside `a..=b`, found by climbing from token `a`.
    /// - An empty node climbs its enhanced heads through other empty nodes
    ///   until it reaches an ordinary token. An empty node attached to `0` is
    ///   its own root.
    /// - A plain id is its own root.
    pub fn find_root(&self, id: TokenId) -> Result<TokenId, RootError> {
        match id {
            TokenId::Plain(_) => self.token(id).map(|t| t.id).ok_or(RootError::UnknownNode(id)),
            TokenId::Range(first, last) => self.range_root(first, last),
            TokenId::Empty(..) => self.empty_node_root(id),
        }
    }

    fn range_root(&self, first: usize, last: usize) -> Result<TokenId, RootError> {
        let mut current = TokenId::Plain(first);
        let mut visited = HashSet::new();

        loop {
            let token = self.token(current).ok_or(RootError::UnknownNode(current))?;
            if !visited.insert(current) {
                return Err(RootError::Cycle(current));
            }
            match basic_head(token)? {
                HeadRef::Node(TokenId::Plain(head)) if (first..=last).contains(&head) => {
                    current = TokenId::Plain(head);
                }
                _ => return Ok(current),
            }
        }
    }

    fn empty_node_root(&self, id: TokenId) -> Result<TokenId, RootError> {
        let mut current = id;
        let mut visited = HashSet::new();

        loop {
            let token = self.token(current).ok_or(RootError::UnknownNode(current))?;
            if !visited.insert(current) {
                return Err(RootError::Cycle(current));
            }
            match enhanced_head(token)? {
                HeadRef::Root => return Ok(current),
                HeadRef::Node(head @ TokenId::Empty(..)) => current = head,
                HeadRef::Node(head) => {
                    return self
                        .token(head)
                        .map(|t| t.id)
                        .ok_or(RootError::UnknownNode(head));
                }
            }
        }
    }
}
