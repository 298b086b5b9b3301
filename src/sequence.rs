//! Token sequences and their promotion into coordinate forests.
//!
//! A [`TokenSequence`] gathers the tokens between non-whitespace gaps of
//! the input. Finalisation runs three stages over it:
//!
//! 1. *cleanup* strips tokens that cannot take part in a reference,
//! 2. *coordination* rewrites the token run into [`Coordinate`] nodes by
//!    an ordered battery of pattern handlers, and
//! 3. *nesting* builds parent/child structure over the coordinates.
//!
//! Stages two and three match DSL patterns (see [`crate::pattern`])
//! against single-character projections of the sequence and rewrite it in
//! place, right-to-left, so indices upstream of a rewrite stay valid.
//! Coordinates live in an arena indexed by [`CoordId`]; the tree is a
//! forest of such indices, never pointers.

use crate::{
    Error,
    model::{self, ANONYMOUS_LEVEL, Group, LanguageModel, TAG_MAP},
    pattern::{GROUP_PATTERNS, TAG_PATTERNS},
    token::{RefToken, Span},
};

/// Index of a coordinate in its sequence's arena.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct CoordId(u32);

/// An arena-backed coordinate: an axis paired with a value, at some
/// hierarchy level, with optional tree edges.
#[derive(Debug)]
struct Coordinate {
    /// The structural element kind. Possibly anonymous (empty tag).
    axis: RefToken,
    /// The label.
    value: RefToken,
    /// Explicit hierarchy level; inferred from the axis tag when unset.
    level: Option<u32>,
    /// Tree edges.
    parent: Option<CoordId>,
    children: Vec<CoordId>,
}

/// One slot of a sequence: still a token, or already coordinated.
#[derive(Debug)]
pub(crate) enum Item {
    Token(RefToken),
    Coord(CoordId),
}

/// A gathering of reference tokens plus the coordinate arena they are
/// rewritten into.
#[derive(Debug)]
pub(crate) struct TokenSequence {
    items: Vec<Item>,
    arena: Vec<Coordinate>,
    finalized: bool,
}

impl TokenSequence {
    pub fn new(token: RefToken) -> Self {
        Self {
            items: vec![Item::Token(token)],
            arena: Vec::new(),
            finalized: false,
        }
    }

    /// Appends a token. Spans must be non-overlapping and non-decreasing.
    pub fn push(&mut self, token: RefToken) {
        debug_assert!(self.end() <= token.span.start);
        self.items.push(Item::Token(token));
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The span covered by the whole sequence.
    pub fn span(&self) -> Span {
        let start = self.item_span(0).map_or(0, |s| s.start);
        let end = self
            .items
            .len()
            .checked_sub(1)
            .and_then(|i| self.item_span(i))
            .map_or(start, |s| s.end);
        Span::new(start, end)
    }

    fn end(&self) -> usize {
        self.span().end
    }

    fn item_span(&self, i: usize) -> Option<Span> {
        match self.items.get(i)? {
            Item::Token(token) => Some(token.span),
            Item::Coord(id) => Some(self.coord_span(*id)),
        }
    }

    /// Mutable access to the final token, for attaching its tail.
    pub fn last_token_mut(&mut self) -> Option<&mut RefToken> {
        match self.items.last_mut()? {
            Item::Token(token) => Some(token),
            Item::Coord(_) => None,
        }
    }

    fn token_at(&self, i: usize) -> Option<&RefToken> {
        match self.items.get(i)? {
            Item::Token(token) => Some(token),
            Item::Coord(_) => None,
        }
    }

    /// Removes and returns the token at `i`; an error if the slot holds a
    /// coordinate, which would mean a handler matched a stale projection.
    fn take_token(&mut self, i: usize) -> Result<RefToken, Error> {
        if !matches!(self.items.get(i), Some(Item::Token(_))) {
            return Err(Error::Invariant("expected a token slot"));
        }
        match self.items.remove(i) {
            Item::Token(token) => Ok(token),
            Item::Coord(_) => unreachable!(),
        }
    }

    fn coord_at(&self, i: usize) -> Result<CoordId, Error> {
        match self.items.get(i) {
            Some(Item::Coord(id)) => Ok(*id),
            _ => Err(Error::Invariant("expected a coordinate slot")),
        }
    }

    // ------------------------------------------------------------------
    // Arena
    // ------------------------------------------------------------------

    fn new_coord(&mut self, axis: RefToken, value: RefToken) -> CoordId {
        let id = CoordId(u32::try_from(self.arena.len()).expect("arena overflow"));
        self.arena.push(Coordinate {
            axis,
            value,
            level: None,
            parent: None,
            children: Vec::new(),
        });
        id
    }

    fn coord(&self, id: CoordId) -> &Coordinate {
        &self.arena[id.0 as usize]
    }

    fn coord_mut(&mut self, id: CoordId) -> &mut Coordinate {
        &mut self.arena[id.0 as usize]
    }

    /// The axis tag of a coordinate.
    pub fn axis_tag(&self, id: CoordId) -> &str {
        &self.coord(id).axis.tag.tag
    }

    /// The value token of a coordinate.
    pub fn value_token(&self, id: CoordId) -> &RefToken {
        &self.coord(id).value
    }

    /// The span covered by a coordinate (axis and value together).
    pub fn coord_span(&self, id: CoordId) -> Span {
        let co = self.coord(id);
        Span::new(
            co.axis.span.start.min(co.value.span.start),
            co.axis.span.end.max(co.value.span.end),
        )
    }

    /// The hierarchy level of a coordinate, inferred from the axis table
    /// on first read. Named-entity coordinates sit at the anonymous
    /// level.
    fn level(&mut self, id: CoordId) -> Result<u32, Error> {
        if let Some(level) = self.coord(id).level {
            return Ok(level);
        }
        let co = self.coord(id);
        let level = match model::axis_level(&co.axis.tag.tag) {
            Some(level) => level,
            None if co.value.tag.group == Group::NamedEntity => ANONYMOUS_LEVEL,
            None => return Err(Error::Nesting("coordinate has no hierarchy level")),
        };
        self.coord_mut(id).level = Some(level);
        Ok(level)
    }

    /// Reparents `child` under `parent`, detaching it first. Refuses to
    /// create a cycle.
    fn set_parent(&mut self, child: CoordId, parent: CoordId) -> Result<(), Error> {
        if child == parent || self.ancestors(parent).contains(&child) {
            return Err(Error::Nesting("reparenting would create a cycle"));
        }
        if let Some(old) = self.coord(child).parent {
            self.coord_mut(old).children.retain(|&c| c != child);
        }
        self.coord_mut(child).parent = Some(parent);
        self.coord_mut(parent).children.push(child);
        Ok(())
    }

    /// Attaches `child` below `parent`, descending through an only child
    /// of a broader level and refusing level conflicts.
    fn append(&mut self, parent: CoordId, child: CoordId) -> Result<(), Error> {
        if self.level(child)? <= self.level(parent)? {
            return Err(Error::Nesting("child level does not exceed parent level"));
        }
        let children = self.coord(parent).children.clone();
        if children.is_empty() {
            return self.set_parent(child, parent);
        }
        if let [only] = children[..] {
            let child_level = self.level(child)?;
            let only_level = self.level(only)?;
            return if only_level < child_level {
                self.append(only, child)
            } else if only_level == child_level {
                self.set_parent(child, parent)
            } else {
                Err(Error::Nesting("level between parent and child"))
            };
        }
        let child_level = self.level(child)?;
        let mut levels = Vec::new();
        for c in &children {
            levels.push(self.level(*c)?);
        }
        levels.dedup();
        if levels.len() == 1 && levels[0] == child_level {
            self.set_parent(child, parent)
        } else {
            Err(Error::Nesting("inconsistent children levels"))
        }
    }

    /// Ancestors of `id`, nearest first.
    fn ancestors(&self, id: CoordId) -> Vec<CoordId> {
        let mut chain = Vec::new();
        let mut cursor = self.coord(id).parent;
        while let Some(parent) = cursor {
            if chain.contains(&parent) || chain.len() > self.arena.len() {
                break;
            }
            chain.push(parent);
            cursor = self.coord(parent).parent;
        }
        chain
    }

    /// The root-to-`id` chain, inclusive.
    pub fn path(&self, id: CoordId) -> Vec<CoordId> {
        let mut path = self.ancestors(id);
        path.reverse();
        path.push(id);
        path
    }

    /// All coordinates in item order.
    pub fn coord_ids(&self) -> Vec<CoordId> {
        self.items
            .iter()
            .filter_map(|item| match item {
                Item::Coord(id) => Some(*id),
                Item::Token(_) => None,
            })
            .collect()
    }

    /// Coordinates without a parent, in item order.
    fn roots(&self) -> Vec<CoordId> {
        self.coord_ids()
            .into_iter()
            .filter(|id| self.coord(*id).parent.is_none())
            .collect()
    }

    /// Coordinates sharing `leader`'s axis token but not its value.
    fn siblings_of(&self, leader: CoordId) -> Vec<CoordId> {
        let axis = &self.coord(leader).axis;
        let value = &self.coord(leader).value;
        self.coord_ids()
            .into_iter()
            .filter(|&id| {
                let co = self.coord(id);
                co.axis == *axis && co.value != *value
            })
            .collect()
    }

    // ------------------------------------------------------------------
    // Projections
    // ------------------------------------------------------------------

    /// One character per item, by token group. Coordinates are `e`.
    pub fn groups(&self) -> String {
        self.items
            .iter()
            .map(|item| match item {
                Item::Token(token) => token.tag.group.symbol(),
                Item::Coord(_) => Group::Coordinate.symbol(),
            })
            .collect()
    }

    /// One character per item, by tag. Coordinates are `#`, unmapped tags
    /// a space.
    pub fn values(&self) -> String {
        self.items
            .iter()
            .map(|item| match item {
                Item::Token(token) => TAG_MAP.symbol(&token.tag.tag),
                Item::Coord(_) => '#',
            })
            .collect()
    }

    /// Whether a single-item sequence is worth keeping: named entities
    /// and annexes reference on their own.
    pub fn keeps_singleton(&self) -> bool {
        match self.items.first() {
            Some(Item::Token(token)) => {
                token.tag.group == Group::NamedEntity || token.tag.tag == "ANX"
            }
            _ => false,
        }
    }

    /// Whether every non-connector item has been promoted.
    pub fn coordinated(&self) -> bool {
        self.groups()
            .chars()
            .all(|c| c == Group::Coordinate.symbol() || c == Group::Connector.symbol())
    }

    // ------------------------------------------------------------------
    // Finalisation
    // ------------------------------------------------------------------

    /// Runs cleanup, coordination, and nesting. An error means the
    /// sequence is unusable and should be dropped by the caller.
    pub fn finalize(&mut self, model: &LanguageModel) -> Result<(), Error> {
        if self.finalized {
            return Ok(());
        }
        self.cleanup();
        self.coordination(model)?;
        if self.items.is_empty() {
            return Ok(());
        }
        self.nesting()?;
        self.finalized = true;
        Ok(())
    }

    // ------------------------------------------------------------------
    // Cleanup
    // ------------------------------------------------------------------

    /// Strips unusable edge tokens until no rule fires, with a bounded
    /// round count as a backstop.
    fn cleanup(&mut self) {
        for _ in 0..16 {
            let mut effect = self.strip_edge_connectors();
            effect |= self.strip_leading_values();
            if TAG_PATTERNS.is_match("orphan_axes", &self.values())
                && self.token_at(self.items.len().wrapping_sub(1)).is_some_and(|t| t.tag.tag != "ANX")
            {
                effect = true;
                self.items.pop();
                self.items.pop();
            }
            if GROUP_PATTERNS.is_match("axis_connector", &self.groups())
                && self.token_at(0).is_some_and(|t| t.tag.tag != "ANX")
            {
                effect = true;
                self.items.remove(0);
                self.items.remove(0);
            }
            if self.items.len() == 1
                && self.token_at(0).is_some_and(|t| {
                    t.tag.group != Group::NamedEntity && t.tag.tag != "ANX"
                })
            {
                effect = true;
                self.items.clear();
            }
            if TAG_PATTERNS.is_match("of_day", &self.values()) {
                effect = true;
                self.items.pop();
                self.items.pop();
            }
            if TAG_PATTERNS.is_match("first_end", &self.values()) && self.items.len() != 2 {
                effect = true;
                self.items.pop();
            }
            if !effect {
                break;
            }
        }
    }

    /// Removes leading and trailing connector tokens, backref connectors
    /// excepted.
    fn strip_edge_connectors(&mut self) -> bool {
        let is_strippable = |token: &RefToken| {
            token.tag.group == Group::Connector
                && !matches!(token.tag.tag.as_str(), "THEREOF" | "BRCRPL")
        };
        let mut removable = Vec::new();
        for (i, item) in self.items.iter().enumerate() {
            match item {
                Item::Token(t) if is_strippable(t) => removable.push(i),
                _ => break,
            }
        }
        for (i, item) in self.items.iter().enumerate().rev() {
            match item {
                Item::Token(t) if is_strippable(t) => {
                    if !removable.contains(&i) {
                        removable.push(i);
                    }
                }
                _ => break,
            }
        }
        removable.sort_unstable();
        for i in removable.iter().rev() {
            self.items.remove(*i);
        }
        !removable.is_empty()
    }

    /// Removes leading value tokens, spoken ranks excepted.
    fn strip_leading_values(&mut self) -> bool {
        let mut effect = false;
        while self
            .token_at(0)
            .is_some_and(|t| t.tag.group == Group::Value && t.tag.tag != "SRNK")
        {
            self.items.remove(0);
            effect = true;
        }
        effect
    }

    // ------------------------------------------------------------------
    // Coordination
    // ------------------------------------------------------------------

    /// The ordered pattern battery. Stops as soon as the sequence is
    /// coordinated.
    fn coordination(&mut self, model: &LanguageModel) -> Result<(), Error> {
        let handlers: [fn(&mut Self, &LanguageModel) -> Result<(), Error>; 11] = [
            Self::handle_generic_context,
            Self::handle_fourth_directive,
            Self::handle_spoken_latin,
            Self::handle_spoken_rank,
            Self::handle_coordinates,
            Self::handle_re_reference,
            Self::handle_range_connected,
            Self::handle_connector_value,
            Self::handle_value_n,
            Self::handle_coordinate_connector_value,
            Self::handle_orphan_annex,
        ];
        for handler in handlers {
            handler(self, model)?;
            if self.coordinated() {
                return Ok(());
            }
        }
        Ok(())
    }

    /// Wraps a single token into a coordinate with an anonymous axis
    /// named after `group`.
    fn promote_single(&mut self, i: usize, group: Group) -> Result<CoordId, Error> {
        let value = self.take_token(i)?;
        let axis = RefToken::anonymous_axis(value.span.start, group.name());
        let id = self.new_coord(axis, value);
        self.items.insert(i, Item::Coord(id));
        Ok(id)
    }

    /// A lone backref connector ("thereof", "dessen") becomes a
    /// coordinate of its own, at the anonymous level.
    fn handle_generic_context(&mut self, _model: &LanguageModel) -> Result<(), Error> {
        for m in TAG_PATTERNS.find("generic_context", &self.values(), true) {
            let id = self.promote_single(m.start, Group::Connector)?;
            self.coord_mut(id).level = Some(ANONYMOUS_LEVEL);
        }
        Ok(())
    }

    /// "Fourth Directive" style: rank and document axis merge into one
    /// axis token.
    fn handle_fourth_directive(&mut self, _model: &LanguageModel) -> Result<(), Error> {
        for m in TAG_PATTERNS.find("fourth_directive", &self.values(), true) {
            let axis = self.take_token(m.start + 1)?;
            let rank = self.take_token(m.start)?;
            let mut merged = RefToken::new(
                axis.tag.clone(),
                Span::new(rank.span.start, axis.span.end),
                format!("{}{}{}", axis.text, axis.tail, rank.text),
            );
            merged.tail = axis.tail;
            self.items.insert(m.start, Item::Token(merged));
        }
        Ok(())
    }

    /// A Latin ordinal right after a value becomes a numeric suffix on
    /// that value.
    fn handle_spoken_latin(&mut self, model: &LanguageModel) -> Result<(), Error> {
        for m in TAG_PATTERNS.find("spoken_latin", &self.values(), true) {
            let latin = self.take_token(m.start)?;
            let suffix = model.value_as_number("LATIN", &latin.text).map(str::to_string);
            let Some(Item::Token(prev)) = self.items.get_mut(m.start - 1) else {
                return Err(Error::Invariant("latin suffix without a value before it"));
            };
            prev.suffix = match suffix {
                Some(s) if prev.tag.tag != "NM" && prev.text == prev.text.to_uppercase() => {
                    Some(s.to_uppercase())
                }
                other => other,
            };
            prev.span = Span::new(prev.span.start, latin.span.end);
            prev.tail = latin.tail;
        }
        Ok(())
    }

    /// "first and second paragraph": the trailing axis distributes over
    /// each preceding rank.
    fn handle_spoken_rank(&mut self, _model: &LanguageModel) -> Result<(), Error> {
        for m in TAG_PATTERNS.find("spoken_rank", &self.values(), true) {
            let axis = self.take_token(m.end - 1)?;
            for k in m.start..m.end - 1 {
                if self
                    .token_at(k)
                    .is_some_and(|t| t.tag.group == Group::Connector)
                {
                    continue;
                }
                let value = self.take_token(k)?;
                let id = self.new_coord(axis.clone(), value);
                self.items.insert(k, Item::Coord(id));
            }
        }
        Ok(())
    }

    /// The workhorse: an axis followed by a value, or a bare named
    /// entity, becomes a coordinate.
    fn handle_coordinates(&mut self, _model: &LanguageModel) -> Result<(), Error> {
        for m in GROUP_PATTERNS.find("coordinates", &self.groups(), true) {
            if m.text == "a" {
                self.promote_single(m.start, Group::NamedEntity)?;
            } else {
                let axis = self.take_token(m.start)?;
                let value = self.take_token(m.start)?;
                let id = self.new_coord(axis, value);
                self.items.insert(m.start, Item::Coord(id));
            }
        }
        Ok(())
    }

    /// A reference determiner before an axis ("the Treaty", "this
    /// Regulation") forms a back- or self-reference coordinate.
    fn handle_re_reference(&mut self, _model: &LanguageModel) -> Result<(), Error> {
        for m in TAG_PATTERNS.find("re_reference", &self.values(), true) {
            let determiner = self.take_token(m.start)?;
            let axis = self.take_token(m.start)?;
            let value = RefToken::quasi_value(&determiner.tag.tag, determiner.span, &determiner.text);
            let id = self.new_coord(axis, value);
            self.items.insert(m.start, Item::Coord(id));
        }
        Ok(())
    }

    /// "points (k)(ii) to (v)": compatible range ends become coordinates
    /// one level below the leader, sharing an anonymous axis.
    fn handle_range_connected(&mut self, _model: &LanguageModel) -> Result<(), Error> {
        for m in TAG_PATTERNS.find("range_connected", &self.values(), true) {
            let leader = self.coord_at(m.start)?;
            let compatible = match (self.token_at(m.start + 1), self.token_at(m.start + 3)) {
                (Some(first), Some(last)) => model::values_compatible(&first.tag.tag, &last.tag.tag),
                _ => false,
            };
            if !compatible {
                continue;
            }
            let level = self.level(leader)? + 1;
            let first = self.take_token(m.start + 1)?;
            let axis = RefToken::anonymous_axis(first.span.start, "");
            let first_id = self.new_coord(axis.clone(), first);
            self.coord_mut(first_id).level = Some(level);
            self.items.insert(m.start + 1, Item::Coord(first_id));
            let last = self.take_token(m.start + 3)?;
            let last_id = self.new_coord(axis, last);
            self.coord_mut(last_id).level = Some(level);
            self.items.insert(m.start + 3, Item::Coord(last_id));
        }
        Ok(())
    }

    /// Values joined to a leading coordinate by join connectors become
    /// its siblings under the same axis.
    fn handle_connector_value(&mut self, _model: &LanguageModel) -> Result<(), Error> {
        for m in GROUP_PATTERNS.find("connector_value", &self.groups(), true) {
            let mut leader = self.coord_at(m.start)?;
            if let Some((after_start, _)) = m.group("after") {
                let after = self.coord_at(after_start)?;
                if self.axis_tag(after) == self.axis_tag(leader) {
                    let before = if m.start == 0 {
                        self.items.len() - 1
                    } else {
                        m.start - 1
                    };
                    leader = self.coord_at(before)?;
                }
            }
            let (buddies_start, buddies_end) = m
                .group("buddies")
                .ok_or(Error::Invariant("connector_value without buddies"))?;
            let leader_axis = self.coord(leader).axis.clone();
            let leader_value_tag = self.coord(leader).value.tag.tag.clone();
            for con in (buddies_start..buddies_end).rev() {
                let Some(connector) = self.token_at(con) else { continue };
                if connector.tag.group != Group::Connector {
                    continue;
                }
                if !matches!(
                    connector.tag.tag.as_str(),
                    "RC" | "COM" | "AND" | "OTHERX" | "LF"
                ) {
                    return Err(Error::Invariant("non-join connector between values"));
                }
                let compatible = self
                    .token_at(con + 1)
                    .is_some_and(|t| model::values_compatible(&t.tag.tag, &leader_value_tag));
                if !compatible {
                    continue;
                }
                let value = self.take_token(con + 1)?;
                let id = self.new_coord(leader_axis.clone(), value);
                self.items.insert(con + 1, Item::Coord(id));
            }
        }
        Ok(())
    }

    /// Trailing bare values become a chain of child coordinates:
    /// "Article 2(1)(a)".
    fn handle_value_n(&mut self, _model: &LanguageModel) -> Result<(), Error> {
        for m in GROUP_PATTERNS.find("value_n", &self.groups(), true) {
            let mut leader = self.coord_at(m.start)?;
            for index in m.start + 1..m.end {
                let value = self.take_token(index)?;
                let axis = RefToken::anonymous_axis(value.span.start, "");
                let id = self.new_coord(axis, value);
                let level = self.level(leader)? + 1;
                self.coord_mut(id).level = Some(level);
                self.items.insert(index, Item::Coord(id));
                leader = id;
            }
        }
        Ok(())
    }

    /// Alternating connector/value pairs after a coordinate become
    /// same-level siblings.
    fn handle_coordinate_connector_value(&mut self, _model: &LanguageModel) -> Result<(), Error> {
        for m in GROUP_PATTERNS.find("coordinate_connector_value", &self.groups(), true) {
            let leader = self.coord_at(m.start)?;
            let leader_axis = self.coord(leader).axis.clone();
            let leader_value_tag = self.coord(leader).value.tag.tag.clone();
            let leader_level = self.level(leader)?;
            let mut index = m.start + 2;
            while index < m.end {
                let is_join = self.token_at(index - 1).is_some_and(|t| {
                    matches!(t.tag.tag.as_str(), "RC" | "AND" | "OTHERX" | "COM")
                });
                if !is_join {
                    break;
                }
                let compatible = self
                    .token_at(index)
                    .is_some_and(|t| model::values_compatible(&leader_value_tag, &t.tag.tag));
                if !compatible {
                    return Err(Error::Invariant("incompatible value after join connector"));
                }
                let value = self.take_token(index)?;
                let id = self.new_coord(leader_axis.clone(), value);
                self.coord_mut(id).level = Some(leader_level);
                self.items.insert(index, Item::Coord(id));
                index += 2;
            }
        }
        Ok(())
    }

    /// A standalone Annex axis is a reference of its own.
    fn handle_orphan_annex(&mut self, _model: &LanguageModel) -> Result<(), Error> {
        for m in TAG_PATTERNS.find("orphan_annex", &self.values(), true) {
            let annex = self.take_token(m.start)?;
            let value = RefToken::quasi_value("ANX", annex.span, &annex.text);
            let id = self.new_coord(annex, value);
            self.items.insert(m.start, Item::Coord(id));
        }
        Ok(())
    }

    // ------------------------------------------------------------------
    // Nesting
    // ------------------------------------------------------------------

    fn nesting(&mut self) -> Result<(), Error> {
        if self.items.len() == 1 {
            return Ok(());
        }
        if TAG_PATTERNS.is_match("co_and_co", &self.values()) {
            // e.g. "Chapter VII and Article 83": peers, not a chain.
            return Ok(());
        }
        self.nest_adjacent()?;
        self.nest_desu()?;
        self.nest_underthe()?;
        self.nest_siblings()?;
        self.nest_comma_stairways()?;
        self.nest_left_of_right()?;
        self.nest_rest()
    }

    /// Chains a run of coordinates by strictly increasing level, or
    /// reverses the edge for an unparented broader successor with a
    /// compatible axis.
    fn nest_neighbours(&mut self, precursor: CoordId, rest: &[CoordId]) -> Result<bool, Error> {
        let mut effect = false;
        let mut pre = precursor;
        for &co in rest {
            let (pre_level, co_level) = (self.level(pre)?, self.level(co)?);
            if pre_level < co_level {
                self.append(pre, co)?;
                pre = co;
                effect = true;
            } else if co_level < pre_level
                && self.coord(pre).parent.is_none()
                && model::axes_compatible(self.axis_tag(co), self.axis_tag(pre))
            {
                self.append(co, pre)?;
                effect = true;
            } else {
                pre = co;
            }
        }
        Ok(effect)
    }

    fn nest_adjacent(&mut self) -> Result<(), Error> {
        for m in GROUP_PATTERNS.find("adjacent_coordinates", &self.groups(), true) {
            let mut run = Vec::new();
            for i in m.start..m.end {
                run.push(self.coord_at(i)?);
            }
            if let Some((&first, rest)) = run.split_first() {
                self.nest_neighbours(first, rest)?;
            }
        }
        Ok(())
    }

    /// `Coordinate XDESUX Coordinate`: the left side belongs under the
    /// right side; upstream coordinates of a broader level adopt the
    /// right side first.
    fn nest_desu(&mut self) -> Result<(), Error> {
        for m in TAG_PATTERNS.find("co_desu_co", &self.values(), true) {
            let su = self.coord_at(m.start + 2)?;
            let su_level = self.level(su)?;
            for j in (0..m.start).rev() {
                let Some(&Item::Coord(upstream)) = self.items.get(j) else {
                    continue;
                };
                if self.level(upstream)? < su_level {
                    self.append(upstream, su)?;
                }
            }
            let left = self.coord_at(m.start)?;
            self.append(su, left)?;
        }
        Ok(())
    }

    /// `Coordinate SPPLCR Coordinate`: the right side and its siblings
    /// become children of the left side.
    fn nest_underthe(&mut self) -> Result<(), Error> {
        for m in TAG_PATTERNS.find("co_underthe_co", &self.values(), false) {
            let left = self.coord_at(m.start)?;
            let right = self.coord_at(m.start + 2)?;
            self.append(left, right)?;
            for sibling in self.siblings_of(right) {
                self.append(left, sibling)?;
            }
        }
        Ok(())
    }

    /// Orphans adopt the parent of a coordinate sharing their axis token.
    fn nest_siblings(&mut self) -> Result<bool, Error> {
        let mut effect = false;
        for co in self.coord_ids() {
            let parent = match self.coord(co).parent {
                Some(parent) => parent,
                None => {
                    let Some(adopted) = self
                        .siblings_of(co)
                        .into_iter()
                        .find_map(|s| self.coord(s).parent)
                    else {
                        continue;
                    };
                    self.set_parent(co, adopted)?;
                    effect = true;
                    adopted
                }
            };
            for sibling in self.siblings_of(co) {
                if self.coord(sibling).parent.is_none() {
                    self.set_parent(sibling, parent)?;
                    effect = true;
                }
            }
        }
        Ok(effect)
    }

    /// "Chapter 4, Section 3 of ...": comma-separated coordinates chain
    /// while their levels strictly increase.
    fn nest_comma_stairways(&mut self) -> Result<(), Error> {
        for m in TAG_PATTERNS.find("comma_stairway", &self.values(), false) {
            if self.items.len() == m.end {
                return Ok(());
            }
            let mut parent = self.coord_at(m.start)?;
            for j in (m.start + 2..m.end).step_by(2) {
                let co = self.coord_at(j)?;
                if self.level(parent)? >= self.level(co)? {
                    break;
                }
                self.append(parent, co)?;
                parent = co;
            }
        }
        Ok(())
    }

    /// `Coordinate+ (SPCLPR|XDESUX) Coordinate`: the left group hangs
    /// below the right coordinate.
    fn nest_left_of_right(&mut self) -> Result<(), Error> {
        for m in TAG_PATTERNS.find("left_of_right", &self.values(), true) {
            let mut child = self.coord_at(m.start)?;
            let new_parent = self.coord_at(m.end - 1)?;
            if let Some((subs_start, subs_end)) = m.group("subs") {
                if subs_end - subs_start > 1 {
                    let last_sub = self.coord_at(subs_end - 1)?;
                    if self.ancestors(child).contains(&last_sub) {
                        child = last_sub;
                    } else if !self.ancestors(last_sub).contains(&child) {
                        return Err(Error::Invariant("left group is not one chain"));
                    }
                }
            }
            if let Some(parent) = self.coord(child).parent {
                if self.axis_tag(parent) != self.axis_tag(new_parent) {
                    continue;
                }
            }
            self.set_parent(child, new_parent)?;
        }
        Ok(())
    }

    /// Bounded fixed point over sibling adoption and root chaining.
    fn nest_rest(&mut self) -> Result<(), Error> {
        for _ in 0..4 {
            let mut effect = self.nest_siblings()?;
            if let Some(Item::Coord(first)) = self.items.first() {
                let first = *first;
                let roots = self.roots();
                effect |= self.nest_neighbours(first, &roots)?;
            }
            if !effect {
                return Ok(());
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        model::{Language, language_model},
        token::RefTag,
    };

    fn tok(group: Group, tag: &str, start: usize, text: &str) -> RefToken {
        RefToken::new(
            RefTag::new(group, tag),
            Span::new(start, start + text.len()),
            text,
        )
    }

    fn seq(tokens: Vec<RefToken>) -> TokenSequence {
        let mut tokens = tokens.into_iter();
        let mut sequence = TokenSequence::new(tokens.next().unwrap());
        for token in tokens {
            sequence.push(token);
        }
        sequence
    }

    #[test]
    fn cleanup_strips_edge_connectors_and_leading_values() {
        let mut s = seq(vec![
            tok(Group::Connector, "RC", 0, "to"),
            tok(Group::Axis, "PNT", 3, "points"),
            tok(Group::Value, "AL_L_BB", 10, "(a)"),
            tok(Group::Connector, "AND", 14, "and"),
        ]);
        s.cleanup();
        assert_eq!(s.groups(), "cd");
    }

    #[test]
    fn cleanup_drops_orphan_axis_pairs() {
        // "... 43 of Regulation" with nothing after the axis.
        let mut s = seq(vec![
            tok(Group::Axis, "ART", 0, "Article"),
            tok(Group::Value, "NM", 8, "43"),
            tok(Group::Connector, "SPCLPR", 11, "of"),
            tok(Group::Axis, "REG", 14, "Regulation"),
        ]);
        s.cleanup();
        assert_eq!(s.groups(), "cd");
    }

    #[test]
    fn cleanup_keeps_single_named_entity_and_annex() {
        let mut s = seq(vec![tok(Group::NamedEntity, "PND_TITLE", 0, "Treaty on European Union")]);
        s.cleanup();
        assert_eq!(s.len(), 1);
        let mut s = seq(vec![tok(Group::Axis, "ANX", 0, "Annex")]);
        s.cleanup();
        assert_eq!(s.len(), 1);
        let mut s = seq(vec![tok(Group::Axis, "ART", 0, "Article")]);
        s.cleanup();
        assert!(s.is_empty());
    }

    #[test]
    fn coordinates_and_value_chain() {
        let model = language_model(Language::En, false);
        let mut s = seq(vec![
            tok(Group::Axis, "ART", 0, "Article"),
            tok(Group::Value, "NM", 8, "2"),
            tok(Group::Value, "NM_BB", 9, "(1)"),
            tok(Group::Value, "AL_L_BB", 12, "(a)"),
        ]);
        s.finalize(&model).unwrap();
        assert!(s.coordinated());
        let coords = s.coord_ids();
        assert_eq!(coords.len(), 3);
        // Chained: each successive value one level deeper.
        let path = s.path(coords[2]);
        assert_eq!(path.len(), 3);
        assert_eq!(s.value_token(path[0]).text, "2");
        assert_eq!(s.value_token(path[2]).text, "(a)");
    }

    #[test]
    fn orphan_annex_coordinates_itself() {
        let model = language_model(Language::En, false);
        let mut s = seq(vec![tok(Group::Axis, "ANX", 0, "Annex")]);
        s.finalize(&model).unwrap();
        assert!(s.coordinated());
        let coords = s.coord_ids();
        assert_eq!(coords.len(), 1);
        assert_eq!(s.value_token(coords[0]).tag.tag, "ANX");
    }

    #[test]
    fn connector_value_makes_siblings() {
        let model = language_model(Language::En, false);
        // points (a), (b) and (c)
        let mut s = seq(vec![
            tok(Group::Axis, "PNT", 0, "points"),
            tok(Group::Value, "AL_L_BB", 7, "(a)"),
            tok(Group::Connector, "COM", 10, ","),
            tok(Group::Value, "AL_L_BB", 12, "(b)"),
            tok(Group::Connector, "AND", 16, "and"),
            tok(Group::Value, "AL_L_BB", 20, "(c)"),
        ]);
        s.finalize(&model).unwrap();
        assert!(s.coordinated());
        let coords = s.coord_ids();
        assert_eq!(coords.len(), 3);
        // All three share the PNT axis token.
        for &id in &coords {
            assert_eq!(s.axis_tag(id), "PNT");
        }
    }

    #[test]
    fn spoken_rank_distributes_axis() {
        let model = language_model(Language::En, false);
        let mut s = seq(vec![
            tok(Group::Value, "SRNK", 0, "first"),
            tok(Group::Connector, "AND", 6, "and"),
            tok(Group::Value, "SRNK", 10, "second"),
            tok(Group::Axis, "PG", 17, "paragraph"),
        ]);
        s.finalize(&model).unwrap();
        assert!(s.coordinated());
        let coords = s.coord_ids();
        assert_eq!(coords.len(), 2);
        assert_eq!(s.axis_tag(coords[0]), "PG");
        assert_eq!(s.value_token(coords[0]).text, "first");
        assert_eq!(s.value_token(coords[1]).text, "second");
    }

    #[test]
    fn re_reference_forms_backref_coordinate() {
        let model = language_model(Language::En, false);
        // Article 251 of the Treaty
        let mut s = seq(vec![
            tok(Group::Axis, "ART", 0, "Article"),
            tok(Group::Value, "NM", 8, "251"),
            tok(Group::Connector, "SPCLPR", 12, "of"),
            tok(Group::Value, "XPREVX", 15, "the"),
            tok(Group::Axis, "TRT", 19, "Treaty"),
        ]);
        s.finalize(&model).unwrap();
        assert!(s.coordinated());
        let coords = s.coord_ids();
        assert_eq!(coords.len(), 2);
        assert_eq!(s.axis_tag(coords[1]), "TRT");
        assert_eq!(s.value_token(coords[1]).tag.tag, "XPREVX");
        // left_of_right hangs the article below the treaty backref.
        let path = s.path(coords[0]);
        assert_eq!(path.len(), 2);
        assert_eq!(s.axis_tag(path[0]), "TRT");
    }

    #[test]
    fn nesting_reverses_for_broader_successor() {
        let model = language_model(Language::De, false);
        // Art. 43 VO (EU) 575/2013: no connector, reversed relation.
        let mut s = seq(vec![
            tok(Group::Axis, "ART", 0, "Art."),
            tok(Group::Value, "NM", 5, "43"),
            tok(Group::Axis, "REG", 8, "VO"),
            tok(Group::Value, "EURCOO", 11, "(EU) 575/2013"),
        ]);
        s.finalize(&model).unwrap();
        let coords = s.coord_ids();
        assert_eq!(coords.len(), 2);
        let path = s.path(coords[0]);
        assert_eq!(path.len(), 2);
        assert_eq!(s.axis_tag(path[0]), "REG");
        assert_eq!(s.axis_tag(path[1]), "ART");
    }

    #[test]
    fn co_and_co_stays_flat() {
        let model = language_model(Language::En, false);
        // Chapter VII and Article 83: peers.
        let mut s = seq(vec![
            tok(Group::Axis, "CHP", 0, "Chapter"),
            tok(Group::Value, "ROM_U", 8, "VII"),
            tok(Group::Connector, "AND", 12, "and"),
            tok(Group::Axis, "ART", 16, "Article"),
            tok(Group::Value, "NM", 24, "83"),
        ]);
        s.finalize(&model).unwrap();
        for id in s.coord_ids() {
            assert_eq!(s.path(id).len(), 1, "peers must stay roots");
        }
    }

    #[test]
    fn append_rejects_level_inversions() {
        let model = language_model(Language::En, false);
        let mut s = seq(vec![
            tok(Group::Axis, "CHP", 0, "Chapter"),
            tok(Group::Value, "NM", 8, "2"),
        ]);
        s.finalize(&model).unwrap();
        let chapter = s.coord_ids()[0];
        let article = {
            let axis = tok(Group::Axis, "ART", 20, "Article");
            let value = tok(Group::Value, "NM", 28, "5");
            s.new_coord(axis, value)
        };
        // An article (level 7) takes a chapter (level 5), never the
        // other way around.
        assert!(s.append(article, chapter).is_err());
        assert!(s.append(chapter, article).is_ok());
    }
}
