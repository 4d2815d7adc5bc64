//! Per-mode key-sequence → action store with prefix awareness.
//!
//! Bindings are keyed by sequences of whole key tokens, not characters, so a
//! chord token such as `ctrl-d` is a single edge and can never collide with a
//! binding starting with the letter `c`. Each mode owns a small trie; nodes
//! carry a descendant-terminal count so the "is this a strict prefix of a
//! longer binding" query (the dispatcher's wait-or-resolve decision point)
//! is O(sequence length) instead of a scan over every binding.
//!
//! Resolution is pure: the store is mutated only by explicit `bind`/`unbind`
//! calls (defaults at startup, host customization afterwards), never by
//! lookups.

use smallvec::SmallVec;
use tracing::{debug, trace};
use verve_state::Mode;

/// Split a concatenated sequence string into key tokens.
///
/// Grammar: `<...>` bracket groups and `ctrl-<char>` pairs form single
/// tokens; every other character is a token of its own. `"gg"` → `g`,`g`;
/// `"i\""` → `i`,`"`; `"ctrl-d"` → `ctrl-d`. A lone `<` with no closing `>`
/// falls back to a one-character token.
pub fn split_tokens(seq: &str) -> Vec<String> {
    let mut tokens = Vec::new();
    let mut rest = seq;
    while !rest.is_empty() {
        if rest.starts_with('<') {
            if let Some(close) = rest.find('>') {
                tokens.push(rest[..=close].to_string());
                rest = &rest[close + 1..];
                continue;
            }
        }
        if let Some(tail) = rest.strip_prefix("ctrl-") {
            if let Some(c) = tail.chars().next() {
                tokens.push(format!("ctrl-{c}"));
                rest = &tail[c.len_utf8()..];
                continue;
            }
        }
        let c = rest.chars().next().expect("non-empty rest");
        tokens.push(c.to_string());
        rest = &rest[c.len_utf8()..];
    }
    tokens
}

#[derive(Debug, Clone)]
struct Node<A> {
    terminal: Option<A>,
    /// Number of terminals strictly below this node.
    descendants: usize,
    edges: SmallVec<[(String, usize); 4]>,
}

impl<A> Node<A> {
    fn new() -> Self {
        Self {
            terminal: None,
            descendants: 0,
            edges: SmallVec::new(),
        }
    }

    fn child(&self, token: &str) -> Option<usize> {
        self.edges
            .iter()
            .find(|(t, _)| t == token)
            .map(|(_, idx)| *idx)
    }
}

#[derive(Debug, Clone)]
struct Trie<A> {
    nodes: Vec<Node<A>>,
}

impl<A> Default for Trie<A> {
    fn default() -> Self {
        Self {
            nodes: vec![Node::new()],
        }
    }
}

impl<A> Trie<A> {
    /// Walk `tokens` from the root; `None` if the path does not exist.
    fn walk(&self, tokens: &[String]) -> Option<usize> {
        let mut cur = 0usize;
        for tok in tokens {
            cur = self.nodes[cur].child(tok)?;
        }
        Some(cur)
    }

    fn insert(&mut self, tokens: &[String], action: A) -> bool {
        let mut path = vec![0usize];
        let mut cur = 0usize;
        for tok in tokens {
            let next = match self.nodes[cur].child(tok) {
                Some(idx) => idx,
                None => {
                    let idx = self.nodes.len();
                    self.nodes.push(Node::new());
                    self.nodes[cur].edges.push((tok.clone(), idx));
                    idx
                }
            };
            cur = next;
            path.push(cur);
        }
        let fresh = self.nodes[cur].terminal.is_none();
        if fresh {
            for &ancestor in &path[..path.len() - 1] {
                self.nodes[ancestor].descendants += 1;
            }
        } else {
            trace!(target: "keymap.bind", "terminal_override");
        }
        self.nodes[cur].terminal = Some(action);
        fresh
    }

    fn remove(&mut self, tokens: &[String]) -> bool {
        let mut path = vec![0usize];
        let mut cur = 0usize;
        for tok in tokens {
            match self.nodes[cur].child(tok) {
                Some(idx) => {
                    cur = idx;
                    path.push(cur);
                }
                None => return false,
            }
        }
        if self.nodes[cur].terminal.take().is_none() {
            return false;
        }
        for &ancestor in &path[..path.len() - 1] {
            self.nodes[ancestor].descendants -= 1;
        }
        true
    }
}

/// Per-mode associative store from key-token sequences to actions.
#[derive(Debug, Clone)]
pub struct Keymap<A> {
    modes: [Trie<A>; 6],
}

impl<A> Default for Keymap<A> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A> Keymap<A> {
    pub fn new() -> Self {
        Self {
            modes: std::array::from_fn(|_| Trie::default()),
        }
    }

    /// Register a binding. A later binding for the same (mode, sequence)
    /// pair overwrites the earlier one.
    pub fn bind(&mut self, seq: &str, mode: Mode, action: A) {
        let tokens = split_tokens(seq);
        if tokens.is_empty() {
            return;
        }
        debug!(target: "keymap.bind", seq, mode = %mode, "bind");
        self.modes[mode.index()].insert(&tokens, action);
    }

    /// Remove a binding; unknown sequences are ignored.
    pub fn unbind(&mut self, seq: &str, mode: Mode) {
        let tokens = split_tokens(seq);
        if tokens.is_empty() {
            return;
        }
        if self.modes[mode.index()].remove(&tokens) {
            debug!(target: "keymap.bind", seq, mode = %mode, "unbind");
        }
    }

    /// Exact lookup.
    pub fn lookup(&self, seq: &str, mode: Mode) -> Option<&A> {
        let tokens = split_tokens(seq);
        let trie = &self.modes[mode.index()];
        let node = trie.walk(&tokens)?;
        let hit = trie.nodes[node].terminal.as_ref();
        trace!(target: "keymap.resolve", seq, mode = %mode, hit = hit.is_some(), "lookup");
        hit
    }

    /// True iff some bound sequence in `mode` strictly extends `seq`. This
    /// is the dispatcher's signal to wait for more keys.
    pub fn has_prefix(&self, seq: &str, mode: Mode) -> bool {
        let tokens = split_tokens(seq);
        let trie = &self.modes[mode.index()];
        match trie.walk(&tokens) {
            Some(node) => trie.nodes[node].descendants > 0,
            None => false,
        }
    }
}

impl<A: Clone> Keymap<A> {
    /// Register the same binding in several modes.
    pub fn bind_in(&mut self, seq: &str, modes: &[Mode], action: A) {
        for mode in modes {
            self.bind(seq, *mode, action.clone());
        }
    }
}
