//! Block rewrite rules and the first-match decision procedure.
//!
//! A [`Rule`] pairs a four-slot input pattern with a four-slot output
//! template. Slots are either a concrete cell value or a wildcard. In a
//! pattern the wildcard matches anything; in a template it copies whatever
//! was read at that slot. Mirror-symmetric rules are also tried against the
//! block's left-right reflection.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{EngineError, Result};
use crate::state::Cell;

/// Four cells in order: top-left, top-right, bottom-left, bottom-right.
pub type Block = [Cell; 4];

/// One position in a rule pattern or template.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "SlotRepr", into = "SlotRepr")]
pub enum Slot {
    /// Matches any value; in a template, keeps the value read at this slot.
    Any,
    /// Matches or writes exactly this value.
    Is(Cell),
}

/// Wire form of a slot: an integer, or `"*"` for the wildcard.
#[derive(Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum SlotRepr {
    Value(Cell),
    Wild(String),
}

impl TryFrom<SlotRepr> for Slot {
    type Error = String;

    fn try_from(repr: SlotRepr) -> std::result::Result<Self, Self::Error> {
        match repr {
            SlotRepr::Value(v) => Ok(Slot::Is(v)),
            SlotRepr::Wild(s) if s == "*" => Ok(Slot::Any),
            SlotRepr::Wild(s) => Err(format!("expected a cell value or \"*\", got {s:?}")),
        }
    }
}

impl From<Slot> for SlotRepr {
    fn from(slot: Slot) -> Self {
        match slot {
            Slot::Any => SlotRepr::Wild("*".to_string()),
            Slot::Is(v) => SlotRepr::Value(v),
        }
    }
}

impl FromStr for Slot {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        if s == "*" {
            return Ok(Slot::Any);
        }
        s.parse::<Cell>()
            .map(Slot::Is)
            .map_err(|e| EngineError::RuleParse(format!("bad slot {s:?}: {e}")))
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Slot::Any => f.write_str("*"),
            Slot::Is(v) => write!(f, "{v}"),
        }
    }
}

/// Reflect a block left-right, keeping rows in place.
#[inline]
pub fn mirror(block: Block) -> Block {
    [block[1], block[0], block[3], block[2]]
}

/// True when every concrete slot of `pattern` equals the block value there.
#[inline]
pub fn matches(pattern: &[Slot; 4], block: &Block) -> bool {
    pattern.iter().zip(block).all(|(slot, &value)| match slot {
        Slot::Any => true,
        Slot::Is(v) => *v == value,
    })
}

/// Fill a template: wildcards copy the input value at the same slot.
#[inline]
pub fn instantiate(template: &[Slot; 4], block: &Block) -> Block {
    let mut out = *block;
    for (dst, slot) in out.iter_mut().zip(template) {
        if let Slot::Is(v) = slot {
            *dst = *v;
        }
    }
    out
}

/// A single rewrite rule.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RuleRepr", into = "RuleRepr")]
pub struct Rule {
    input: [Slot; 4],
    output: [Slot; 4],
    mirror: bool,
}

#[derive(Clone, Serialize, Deserialize)]
struct RuleRepr {
    input: Vec<Slot>,
    output: Vec<Slot>,
    #[serde(default)]
    mirror: bool,
}

impl TryFrom<RuleRepr> for Rule {
    type Error = EngineError;

    fn try_from(repr: RuleRepr) -> Result<Self> {
        Rule::from_slots(&repr.input, &repr.output, repr.mirror)
    }
}

impl From<Rule> for RuleRepr {
    fn from(rule: Rule) -> Self {
        RuleRepr {
            input: rule.input.to_vec(),
            output: rule.output.to_vec(),
            mirror: rule.mirror,
        }
    }
}

impl Rule {
    pub const fn new(input: [Slot; 4], output: [Slot; 4], mirror: bool) -> Self {
        Rule {
            input,
            output,
            mirror,
        }
    }

    /// Build a rule from slot slices, rejecting anything that is not 4 and 4.
    pub fn from_slots(input: &[Slot], output: &[Slot], mirror: bool) -> Result<Self> {
        let arity = || EngineError::RuleArity {
            input: input.len(),
            output: output.len(),
        };
        let input: [Slot; 4] = input.try_into().map_err(|_| arity())?;
        let output: [Slot; 4] = output.try_into().map_err(|_| arity())?;
        Ok(Rule::new(input, output, mirror))
    }

    pub fn input(&self) -> &[Slot; 4] {
        &self.input
    }

    pub fn output(&self) -> &[Slot; 4] {
        &self.output
    }

    pub fn is_mirrored(&self) -> bool {
        self.mirror
    }

    /// Try this rule against `block`, directly first and then mirrored.
    ///
    /// A mirrored match is instantiated in mirrored orientation and reflected
    /// back, so the caller always receives the block in grid orientation.
    pub fn try_apply(&self, block: &Block) -> Option<(Block, bool)> {
        if matches(&self.input, block) {
            return Some((instantiate(&self.output, block), false));
        }
        if self.mirror {
            let flipped = mirror(*block);
            if matches(&self.input, &flipped) {
                return Some((mirror(instantiate(&self.output, &flipped)), true));
            }
        }
        None
    }
}

/// Text notation: `"1 * 0 * -> 0 * 1 * mirror"`. Commas also separate slots.
impl FromStr for Rule {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self> {
        let (lhs, rhs) = s
            .split_once("->")
            .ok_or_else(|| EngineError::RuleParse(format!("missing \"->\" in {s:?}")))?;

        let tokens = |side: &str| -> Vec<String> {
            side.split(|c: char| c.is_whitespace() || c == ',')
                .filter(|t| !t.is_empty())
                .map(str::to_string)
                .collect()
        };

        let mut out_tokens = tokens(rhs);
        let mirror = out_tokens.last().is_some_and(|t| t == "mirror");
        if mirror {
            out_tokens.pop();
        }

        let input = tokens(lhs)
            .iter()
            .map(|t| t.parse())
            .collect::<Result<Vec<Slot>>>()?;
        let output = out_tokens
            .iter()
            .map(|t| t.parse())
            .collect::<Result<Vec<Slot>>>()?;

        Rule::from_slots(&input, &output, mirror)
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [i0, i1, i2, i3] = self.input;
        let [o0, o1, o2, o3] = self.output;
        write!(f, "{i0} {i1} {i2} {i3} -> {o0} {o1} {o2} {o3}")?;
        if self.mirror {
            f.write_str(" mirror")?;
        }
        Ok(())
    }
}

/// Which rule produced a rewrite, and in which orientation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RuleMatch {
    /// Position of the rule in its table.
    pub rule: usize,
    /// True when the match was found on the mirrored block.
    pub mirrored: bool,
}

/// Outcome of running a block through a rule table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rewrite {
    pub block: Block,
    /// `None` means no rule applied and `block` is the input unchanged.
    pub matched: Option<RuleMatch>,
}

/// Ordered rule list. The first rule that matches a block wins.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleTable {
    rules: Vec<Rule>,
}

impl RuleTable {
    pub fn new(rules: Vec<Rule>) -> Self {
        RuleTable { rules }
    }

    /// Parse one rule per non-empty line; `#` starts a comment.
    pub fn parse_lines(text: &str) -> Result<Self> {
        text.lines()
            .map(|line| line.split('#').next().unwrap_or("").trim())
            .filter(|line| !line.is_empty())
            .map(str::parse)
            .collect()
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Rewrite one block: first match wins, otherwise the block is unchanged.
    ///
    /// Total over every possible block, including values no rule mentions.
    pub fn apply(&self, block: Block) -> Rewrite {
        for (index, rule) in self.rules.iter().enumerate() {
            if let Some((out, mirrored)) = rule.try_apply(&block) {
                return Rewrite {
                    block: out,
                    matched: Some(RuleMatch {
                        rule: index,
                        mirrored,
                    }),
                };
            }
        }
        Rewrite {
            block,
            matched: None,
        }
    }
}

impl FromIterator<Rule> for RuleTable {
    fn from_iter<I: IntoIterator<Item = Rule>>(iter: I) -> Self {
        RuleTable::new(iter.into_iter().collect())
    }
}
