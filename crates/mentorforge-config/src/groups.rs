//! Required mentor groups.
//!
//! A partition of mentor names: every mentor appears in at most one group,
//! and all members of a group must end up on the same team.

use std::collections::HashMap;

use mentorforge_core::{EntityName, NameKey};

use crate::error::ConfigError;

/// Disjoint groups of mentors that must be placed together.
#[derive(Debug, Clone, Default)]
pub struct RequiredGroups {
    groups: Vec<Vec<EntityName>>,
    group_of: HashMap<NameKey, usize>,
}

impl RequiredGroups {
    /// Builds the partition, rejecting a mentor listed more than once.
    pub fn new<I, G, S>(groups: I) -> Result<Self, ConfigError>
    where
        I: IntoIterator<Item = G>,
        G: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut result = Self::default();
        for members in groups {
            let index = result.groups.len();
            let mut group = Vec::new();
            for raw in members {
                let name = EntityName::new(raw.as_ref());
                if name.key().is_empty() {
                    continue;
                }
                if let Some(&existing) = result.group_of.get(name.key()) {
                    let message = if existing == index {
                        format!("mentor {name} is listed twice in required group {}", index + 1)
                    } else {
                        format!(
                            "mentor {name} appears in required groups {} and {}",
                            existing + 1,
                            index + 1
                        )
                    };
                    return Err(ConfigError::Invalid(message));
                }
                result.group_of.insert(name.key().clone(), index);
                group.push(name);
            }
            if group.is_empty() {
                continue;
            }
            result.groups.push(group);
        }
        Ok(result)
    }

    /// Returns the groups in declaration order.
    pub fn groups(&self) -> &[Vec<EntityName>] {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Index of the group holding `mentor`, if any.
    pub fn group_of(&self, mentor: &NameKey) -> Option<usize> {
        self.group_of.get(mentor).copied()
    }

    /// Returns true if two distinct mentors share a group.
    pub fn must_pair(&self, a: &NameKey, b: &NameKey) -> bool {
        a != b
            && match (self.group_of(a), self.group_of(b)) {
                (Some(x), Some(y)) => x == y,
                _ => false,
            }
    }

    /// Number of unordered mentor pairs constrained to share a team.
    pub fn pair_count(&self) -> usize {
        self.groups
            .iter()
            .map(|g| g.len() * g.len().saturating_sub(1) / 2)
            .sum()
    }

    /// Iterates every unordered pair within each group.
    pub fn pairs(&self) -> impl Iterator<Item = (&EntityName, &EntityName)> {
        self.groups.iter().flat_map(|group| {
            group
                .iter()
                .enumerate()
                .flat_map(move |(i, a)| group[i + 1..].iter().map(move |b| (a, b)))
        })
    }

    /// Adds "must be together" links, merging groups they connect.
    ///
    /// Groups keep the order in which their first member was seen.
    pub fn merged_with<'a>(&self, links: impl IntoIterator<Item = (&'a EntityName, &'a EntityName)>) -> Self {
        let mut nodes: Vec<EntityName> = Vec::new();
        let mut index: HashMap<NameKey, usize> = HashMap::new();
        let mut parent: Vec<usize> = Vec::new();

        fn node(
            name: &EntityName,
            nodes: &mut Vec<EntityName>,
            index: &mut HashMap<NameKey, usize>,
            parent: &mut Vec<usize>,
        ) -> usize {
            if let Some(&i) = index.get(name.key()) {
                return i;
            }
            let i = nodes.len();
            nodes.push(name.clone());
            index.insert(name.key().clone(), i);
            parent.push(i);
            i
        }

        fn find(parent: &mut [usize], mut i: usize) -> usize {
            while parent[i] != i {
                parent[i] = parent[parent[i]];
                i = parent[i];
            }
            i
        }

        fn union(parent: &mut [usize], a: usize, b: usize) {
            let (ra, rb) = (find(parent, a), find(parent, b));
            if ra != rb {
                // Lower index stays root so group order follows first appearance.
                let (root, child) = if ra < rb { (ra, rb) } else { (rb, ra) };
                parent[child] = root;
            }
        }

        for group in &self.groups {
            let first = node(&group[0], &mut nodes, &mut index, &mut parent);
            for member in &group[1..] {
                let i = node(member, &mut nodes, &mut index, &mut parent);
                union(&mut parent, first, i);
            }
        }
        for (a, b) in links {
            if a.key() == b.key() {
                continue;
            }
            let i = node(a, &mut nodes, &mut index, &mut parent);
            let j = node(b, &mut nodes, &mut index, &mut parent);
            union(&mut parent, i, j);
        }

        let mut slot_of_root: HashMap<usize, usize> = HashMap::new();
        let mut groups: Vec<Vec<EntityName>> = Vec::new();
        for (i, name) in nodes.into_iter().enumerate() {
            let root = find(&mut parent, i);
            let slot = *slot_of_root.entry(root).or_insert_with(|| {
                groups.push(Vec::new());
                groups.len() - 1
            });
            groups[slot].push(name);
        }

        let group_of = groups
            .iter()
            .enumerate()
            .flat_map(|(g, members)| members.iter().map(move |m| (m.key().clone(), g)))
            .collect();
        Self { groups, group_of }
    }
}
