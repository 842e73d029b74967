//! The l_system module provides a small Lindenmayer grammar engine for growing
//! plant-like sentences. Take a look at the [`crate::l_system::RuleSet`] struct for
//! more details, and examples.
//!
//! Rules are matched by a linear scan in declaration order, so when a rule set
//! carries two rules for the same predecessor the first one always wins. Symbols
//! without a rule are terminals and are copied through untouched.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::errors::{PlantError, Result};

pub mod presets;

/// A single production: every `predecessor` in the sentence is replaced by
/// `successor` on each generation. An empty successor is legal and shrinks
/// the sentence.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct Rule {
    pub predecessor: char,
    pub successor: String,
}

impl Rule {
    pub fn new(predecessor: char, successor: &str) -> Rule {
        Rule {
            predecessor,
            successor: successor.to_string(),
        }
    }
}

impl From<(char, &str)> for Rule {
    fn from((predecessor, successor): (char, &str)) -> Self {
        Rule::new(predecessor, successor)
    }
}

/// Guard rails for exponential grammars. Expansion stops with
/// [`PlantError::TooManyGenerations`] or [`PlantError::ExpansionTooLarge`]
/// instead of eating all the memory on the machine.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct ExpansionLimits {
    pub max_generations: u32,
    pub max_symbols: usize,
}

impl Default for ExpansionLimits {
    fn default() -> Self {
        Self {
            max_generations: 5,
            max_symbols: 4_000_000,
        }
    }
}

impl ExpansionLimits {
    /// No limits at all. You asked for it.
    pub fn unbounded() -> Self {
        Self {
            max_generations: u32::MAX,
            max_symbols: usize::MAX,
        }
    }
}

/// # RuleSet
///
/// An axiom plus an ordered list of [`Rule`]s. Immutable for the duration of
/// a render pass; clone it if you want to tweak it for the next one.
///
/// # Example
///
/// ```rust
/// use aoer_plants::l_system::{Rule, RuleSet};
///
/// let algae = RuleSet::new("A", vec![Rule::new('A', "AB"), Rule::new('B', "A")]);
/// assert_eq!(algae.expand(2), "ABA");
/// ```
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RuleSet {
    pub axiom: String,
    pub rules: Vec<Rule>,
}

/// The result of [`RuleSet::grow`]: the final sentence, and the branch length
/// after falloff was applied once per generation.
#[derive(Clone, Debug, PartialEq)]
pub struct Growth {
    pub sentence: String,
    pub branch_length: f64,
    pub generations: u32,
}

impl RuleSet {
    pub fn new(axiom: &str, rules: Vec<Rule>) -> RuleSet {
        RuleSet {
            axiom: axiom.to_string(),
            rules,
        }
    }

    /// First rule (in declaration order) whose predecessor is `symbol`.
    pub fn find_rule(&self, symbol: char) -> Option<&Rule> {
        find_rule(&self.rules, symbol)
    }

    /// #expand
    ///
    /// Expands the axiom by the requested "order" of generations. Useful with
    /// [`crate::turtle::Turtle::walk_lpath`]. Unbounded, so keep `order` small.
    pub fn expand(&self, order: u32) -> String {
        expand(&self.axiom, &self.rules, order)
    }

    /// Same as [`RuleSet::expand`] but honours the given [`ExpansionLimits`].
    pub fn expand_bounded(&self, order: u32, limits: &ExpansionLimits) -> Result<String> {
        expand_bounded(&self.axiom, &self.rules, order, limits)
    }

    /// Expands the axiom and shrinks `branch_length` by `falloff` once per
    /// rewrite pass. The shrink is keyed to the generation count, not to
    /// bracket depth, so every `F` in the final sentence is drawn with the
    /// same length.
    pub fn grow(
        &self,
        generations: u32,
        branch_length: f64,
        falloff: f64,
        limits: &ExpansionLimits,
    ) -> Result<Growth> {
        check_limits(&self.axiom, generations, limits)?;
        let mut sentence = self.axiom.clone();
        let mut branch_length = branch_length;
        for generation in 1..=generations {
            sentence = rewrite_bounded(&sentence, &self.rules, generation, limits.max_symbols)?;
            branch_length *= falloff;
        }
        Ok(Growth {
            sentence,
            branch_length,
            generations,
        })
    }
}

fn find_rule(rules: &[Rule], symbol: char) -> Option<&Rule> {
    rules.iter().find(|rule| rule.predecessor == symbol)
}

fn rewrite(sentence: &str, rules: &[Rule]) -> String {
    let mut next = String::with_capacity(sentence.len());
    for c in sentence.chars() {
        match find_rule(rules, c) {
            Some(rule) => next.push_str(&rule.successor),
            None => next.push(c),
        }
    }
    next
}

fn rewrite_bounded(
    sentence: &str,
    rules: &[Rule],
    generation: u32,
    max_symbols: usize,
) -> Result<String> {
    let mut next = String::with_capacity(sentence.len());
    let mut symbols = 0usize;
    for c in sentence.chars() {
        match find_rule(rules, c) {
            Some(rule) => {
                next.push_str(&rule.successor);
                symbols += rule.successor.chars().count();
            }
            None => {
                next.push(c);
                symbols += 1;
            }
        }
        if symbols > max_symbols {
            return Err(PlantError::ExpansionTooLarge {
                generation,
                symbols,
                limit: max_symbols,
            });
        }
    }
    debug!("Generation {} expanded to {} symbols", generation, symbols);
    Ok(next)
}

fn check_limits(axiom: &str, generations: u32, limits: &ExpansionLimits) -> Result<()> {
    if generations > limits.max_generations {
        return Err(PlantError::TooManyGenerations {
            requested: generations,
            limit: limits.max_generations,
        });
    }
    let symbols = axiom.chars().count();
    if symbols > limits.max_symbols {
        return Err(PlantError::ExpansionTooLarge {
            generation: 0,
            symbols,
            limit: limits.max_symbols,
        });
    }
    Ok(())
}

/// Rewrites `axiom` `generations` times. Never fails: unmatched symbols are
/// terminals, and zero generations hands the axiom straight back.
pub fn expand(axiom: &str, rules: &[Rule], generations: u32) -> String {
    let mut current = axiom.to_string();
    for _ in 0..generations {
        current = rewrite(&current, rules);
    }
    current
}

/// [`expand`], but aborts as soon as the generation count or the sentence
/// under construction outgrows `limits`.
pub fn expand_bounded(
    axiom: &str,
    rules: &[Rule],
    generations: u32,
    limits: &ExpansionLimits,
) -> Result<String> {
    check_limits(axiom, generations, limits)?;
    let mut current = axiom.to_string();
    for generation in 1..=generations {
        current = rewrite_bounded(&current, rules, generation, limits.max_symbols)?;
    }
    Ok(current)
}
