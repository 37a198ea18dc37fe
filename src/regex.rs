// retefa-diag: model-based diagnosis for finite-automata networks
// Copyright (C) 2026  retefa-diag contributors
//
// This program is free software; you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation; either version 2 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License along
// with this program; if not, write to the Free Software Foundation, Inc.,
// 51 Franklin Street, Fifth Floor, Boston, MA 02110-1301 USA.

//! # Regex algebra
//!
//! String-level operators over relevance regexes: concatenation,
//! alternation, and the loop-distribution helper used by the
//! intermediate-node-with-self-loop rewrite. `ε` and `""` both denote the
//! empty word throughout.
//!
//! Each distributive law is implemented once, as a total function operating
//! on the top-level alternatives of a regex, instead of being reimplemented
//! ad hoc at every call site.

/// The symbol used to denote the empty word.
pub const EPSILON: &str = "ε";

/// Split `e` into its top-level alternatives (splitting on `|` at
/// parenthesis depth 0). `""` and `"ε"` both map to `["ε"]`.
pub fn alternatives(e: &str) -> Vec<String> {
    if e.is_empty() || e == EPSILON {
        return vec![EPSILON.to_string()];
    }
    let mut out = Vec::new();
    let mut depth = 0i32;
    let mut start = 0usize;
    let chars: Vec<char> = e.chars().collect();
    for (i, &c) in chars.iter().enumerate() {
        match c {
            '(' => depth += 1,
            ')' => depth -= 1,
            '|' if depth == 0 => {
                out.push(chars[start..i].iter().collect());
                start = i + 1;
            }
            _ => {}
        }
    }
    out.push(chars[start..].iter().collect());
    out
}

/// Recombine a set of top-level alternatives into a single regex string.
///
/// A singleton `["ε"]` recombines to `""`; any other singleton recombines to
/// itself; larger sets are joined with `|`.
fn recombine(alts: Vec<String>) -> String {
    match alts.len() {
        0 => String::new(),
        1 => {
            let only = &alts[0];
            if only == EPSILON {
                String::new()
            } else {
                only.clone()
            }
        }
        _ => alts.join("|"),
    }
}

/// Append `item` to `out` unless an equal alternative is already present.
/// Deduplicating every alternative, not just `ε`, keeps the produced strings
/// from doubling in size across repeated state-elimination rewrites without
/// changing the language they denote.
fn push_unique(out: &mut Vec<String>, item: String) {
    if !out.contains(&item) {
        out.push(item);
    }
}

fn concat_single(alpha: &str, beta: &str) -> String {
    if alpha == EPSILON {
        beta.to_string()
    } else if beta == EPSILON {
        alpha.to_string()
    } else {
        format!("{}{}", alpha, beta)
    }
}

/// Concatenation, distributed over alternation:
/// `{ α∘β : α ∈ alternatives(a), β ∈ alternatives(b) }`, with `ε∘x = x∘ε =
/// x`.
pub fn concat(a: &str, b: &str) -> String {
    let alts_a = alternatives(a);
    let alts_b = alternatives(b);
    let mut out = Vec::with_capacity(alts_a.len() * alts_b.len());
    for alpha in &alts_a {
        for beta in &alts_b {
            push_unique(&mut out, concat_single(alpha, beta));
        }
    }
    recombine(out)
}

/// Alternation: the union of `a`'s and `b`'s top-level alternatives.
pub fn alternate(a: &str, b: &str) -> String {
    let mut out = alternatives(a);
    for beta in alternatives(b) {
        push_unique(&mut out, beta);
    }
    recombine(out)
}

/// Wrap a nonempty loop relevance in a Kleene star, omitting the
/// parenthesization when the body is already atomic (a single character),
/// e.g. `"ax*b"` rather than `"a(x)*b"`.
fn star(r_loop: &str) -> String {
    if r_loop.chars().count() == 1 {
        format!("{}*", r_loop)
    } else {
        format!("({})*", r_loop)
    }
}

/// Distribute `r_in ∘ (r_loop)* ∘ r_out` over the alternatives of `r_in` and
/// `r_out`. `r_loop` is treated as a single atom: it is not itself
/// alternative-split before starring, since the self-loop's relevance is
/// exactly one edge's label (or the alternation of several loops already
/// combined by the caller, when more than one self-loop sits on the same
/// node).
pub fn intermediate_replace(r_in: &str, r_loop: &str, r_out: &str) -> String {
    let loop_re = if r_loop.is_empty() || r_loop == EPSILON { String::new() } else { star(r_loop) };

    let alts_in = alternatives(r_in);
    let alts_out = alternatives(r_out);
    let mut out = Vec::with_capacity(alts_in.len() * alts_out.len());
    for alpha in &alts_in {
        for beta in &alts_out {
            let with_loop = concat_single(alpha, &loop_re);
            push_unique(&mut out, concat_single(&with_loop, beta));
        }
    }
    recombine(out)
}

/// Compare two relevance regexes for equivalence modulo top-level
/// alternative ordering. This does *not* check full language equivalence (it
/// would require compiling to automata); it recursively compares the
/// alternatives sets, which is exactly the ordering freedom the extractors
/// are allowed.
pub fn equivalent(a: &str, b: &str) -> bool {
    use std::collections::HashSet;
    let sa: HashSet<String> = alternatives(a).into_iter().collect();
    let sb: HashSet<String> = alternatives(b).into_iter().collect();
    sa == sb
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn alternatives_splits_at_top_level_only() {
        assert_eq!(alternatives("a|b|c"), vec!["a", "b", "c"]);
        assert_eq!(alternatives("(a|b)c"), vec!["(a|b)c"]);
        assert_eq!(alternatives(""), vec![EPSILON]);
        assert_eq!(alternatives(EPSILON), vec![EPSILON]);
    }

    #[test]
    fn concat_identity() {
        assert!(equivalent(&concat("abc", ""), "abc"));
        assert!(equivalent(&concat("", "abc"), "abc"));
        assert!(equivalent(&concat(EPSILON, "abc"), "abc"));
    }

    #[test]
    fn concat_distributes_over_alternation() {
        let r = concat("a|b", "c");
        assert!(equivalent(&r, "ac|bc"));
    }

    #[test]
    fn alternate_is_idempotent() {
        assert!(equivalent(&alternate("a", "a"), "a"));
    }

    #[test]
    fn alternate_unions_alternatives() {
        assert!(equivalent(&alternate("a", "b"), "a|b"));
        assert!(equivalent(&alternate("a|b", "b|c"), "a|b|c"));
    }

    #[test]
    fn intermediate_replace_single_char_loop_has_no_parens() {
        let r = intermediate_replace("a", "x", "b");
        assert_eq!(r, "ax*b");
    }

    #[test]
    fn intermediate_replace_multi_char_loop_is_parenthesized() {
        let r = intermediate_replace("a", "xy", "b");
        assert_eq!(r, "a(xy)*b");
    }

    #[test]
    fn intermediate_replace_empty_loop_drops_star() {
        let r = intermediate_replace("a", "", "b");
        assert_eq!(r, "ab");
    }

    #[test]
    fn equivalent_ignores_alternative_order() {
        assert!(equivalent("a|b", "b|a"));
        assert!(!equivalent("a|b", "a|c"));
    }
}
