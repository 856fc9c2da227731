//! Assignment reconciliation.
//!
//! Given one anchor (a project or an engineer), the links it currently has
//! and the full set of counterparts it should have, [`reconcile`] computes
//! the smallest set of link deletions and insertions that turns the first
//! into the second. It performs no I/O and cannot fail.

use std::collections::HashSet;
use uuid::Uuid;

use crate::models::{Assignment, NewAssignment};

/// The entity whose membership is being edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Anchor {
    Project(Uuid),
    Engineer(Uuid),
}

impl Anchor {
    pub fn id(&self) -> Uuid {
        match self {
            Anchor::Project(id) | Anchor::Engineer(id) => *id,
        }
    }

    /// True if `link` hangs off this anchor.
    pub fn owns(&self, link: &Assignment) -> bool {
        match self {
            Anchor::Project(id) => link.project_id == *id,
            Anchor::Engineer(id) => link.engineer_id == *id,
        }
    }

    /// The id on the other side of `link`.
    pub fn counterpart(&self, link: &Assignment) -> Uuid {
        match self {
            Anchor::Project(_) => link.engineer_id,
            Anchor::Engineer(_) => link.project_id,
        }
    }

    /// Builds the link between this anchor and `counterpart`.
    pub fn link_to(&self, counterpart: Uuid) -> NewAssignment {
        match self {
            Anchor::Project(project_id) => NewAssignment {
                project_id: *project_id,
                engineer_id: counterpart,
            },
            Anchor::Engineer(engineer_id) => NewAssignment {
                project_id: counterpart,
                engineer_id: *engineer_id,
            },
        }
    }
}

/// Link changes needed to reach the desired membership.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Reconciliation<'a> {
    pub to_remove: Vec<&'a Assignment>,
    pub to_add: Vec<NewAssignment>,
}

impl Reconciliation<'_> {
    pub fn is_empty(&self) -> bool {
        self.to_remove.is_empty() && self.to_add.is_empty()
    }
}

/// Diffs the anchor's current links against `desired` counterpart ids.
///
/// Links in `current` that belong to another anchor are ignored. Every
/// remaining link whose counterpart is not desired is removed; every desired
/// id without a current link is added once, in first-occurrence order.
pub fn reconcile<'a>(
    anchor: Anchor,
    current: &'a [Assignment],
    desired: &[Uuid],
) -> Reconciliation<'a> {
    let wanted: HashSet<Uuid> = desired.iter().copied().collect();

    let owned: Vec<&Assignment> = current.iter().filter(|link| anchor.owns(link)).collect();
    let present: HashSet<Uuid> = owned.iter().map(|link| anchor.counterpart(link)).collect();

    let to_remove = owned
        .into_iter()
        .filter(|link| !wanted.contains(&anchor.counterpart(link)))
        .collect();

    let mut seen = HashSet::new();
    let to_add = desired
        .iter()
        .copied()
        .filter(|id| !present.contains(id) && seen.insert(*id))
        .map(|id| anchor.link_to(id))
        .collect();

    Reconciliation { to_remove, to_add }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn link(project_id: Uuid, engineer_id: Uuid) -> Assignment {
        Assignment::new(NewAssignment {
            project_id,
            engineer_id,
        })
    }

    fn ids(n: usize) -> Vec<Uuid> {
        (0..n).map(|_| Uuid::now_v7()).collect()
    }

    fn sorted(mut links: Vec<NewAssignment>) -> Vec<NewAssignment> {
        links.sort_by_key(|l| (l.project_id, l.engineer_id));
        links
    }

    #[test]
    fn test_creation_adds_every_desired_id() {
        let project = Uuid::now_v7();
        let engineers = ids(2);

        let plan = reconcile(Anchor::Project(project), &[], &engineers);

        assert!(plan.to_remove.is_empty());
        assert_eq!(
            plan.to_add,
            vec![
                NewAssignment {
                    project_id: project,
                    engineer_id: engineers[0],
                },
                NewAssignment {
                    project_id: project,
                    engineer_id: engineers[1],
                },
            ]
        );
    }

    #[test]
    fn test_empty_desired_removes_every_owned_link() {
        let project = Uuid::now_v7();
        let other = Uuid::now_v7();
        let engineers = ids(2);
        let current = vec![
            link(project, engineers[0]),
            link(other, engineers[0]),
            link(project, engineers[1]),
        ];

        let plan = reconcile(Anchor::Project(project), &current, &[]);

        assert_eq!(plan.to_remove, vec![&current[0], &current[2]]);
        assert!(plan.to_add.is_empty());
    }

    #[test]
    fn test_engineer_anchor_links_to_projects() {
        let engineer = Uuid::now_v7();
        let projects = ids(3);
        let current = vec![link(projects[0], engineer), link(projects[1], engineer)];

        let plan = reconcile(Anchor::Engineer(engineer), &current, &[projects[1], projects[2]]);

        assert_eq!(plan.to_remove, vec![&current[0]]);
        assert_eq!(
            plan.to_add,
            vec![NewAssignment {
                project_id: projects[2],
                engineer_id: engineer,
            }]
        );
    }

    #[test]
    fn test_duplicate_desired_ids_add_once() {
        let project = Uuid::now_v7();
        let engineer = Uuid::now_v7();

        let plan = reconcile(Anchor::Project(project), &[], &[engineer, engineer, engineer]);

        assert_eq!(plan.to_add.len(), 1);
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let project = Uuid::now_v7();
        let engineers = ids(3);
        let current = vec![link(project, engineers[0]), link(project, engineers[1])];
        let desired = vec![engineers[1], engineers[2]];

        let plan = reconcile(Anchor::Project(project), &current, &desired);

        let removed: HashSet<Uuid> = plan.to_remove.iter().map(|l| l.id).collect();
        let applied: Vec<Assignment> = current
            .iter()
            .filter(|l| !removed.contains(&l.id))
            .cloned()
            .chain(plan.to_add.iter().copied().map(Assignment::new))
            .collect();

        let effective: HashSet<Uuid> = applied.iter().map(|l| l.engineer_id).collect();
        assert_eq!(effective, desired.iter().copied().collect());

        let again = reconcile(Anchor::Project(project), &applied, &desired);
        assert!(again.is_empty());
    }

    #[test]
    fn test_order_of_inputs_does_not_change_the_result() {
        let project = Uuid::now_v7();
        let engineers = ids(4);
        let current = vec![link(project, engineers[0]), link(project, engineers[1])];
        let reversed: Vec<Assignment> = current.iter().rev().cloned().collect();

        let forward = reconcile(
            Anchor::Project(project),
            &current,
            &[engineers[1], engineers[2], engineers[3]],
        );
        let backward = reconcile(
            Anchor::Project(project),
            &reversed,
            &[engineers[3], engineers[2], engineers[1]],
        );

        let ids_of = |plan: &Reconciliation| -> HashSet<Uuid> {
            plan.to_remove.iter().map(|l| l.id).collect()
        };
        assert_eq!(ids_of(&forward), ids_of(&backward));
        assert_eq!(sorted(forward.to_add), sorted(backward.to_add));
    }

    #[test]
    fn test_replacing_membership_removes_only_dropped_link() {
        let project = Uuid::now_v7();
        let (e1, e2) = (Uuid::now_v7(), Uuid::now_v7());

        let first = reconcile(Anchor::Project(project), &[], &[e1, e2]);
        assert_eq!(first.to_add.len(), 2);

        let stored: Vec<Assignment> = first
            .to_add
            .iter()
            .map(|l| Assignment {
                id: Uuid::now_v7(),
                project_id: l.project_id,
                engineer_id: l.engineer_id,
                created_at: Utc::now(),
            })
            .collect();

        let second = reconcile(Anchor::Project(project), &stored, &[e2]);
        assert_eq!(second.to_remove.len(), 1);
        assert_eq!(second.to_remove[0].engineer_id, e1);
        assert!(second.to_add.is_empty());
    }

    #[test]
    fn test_anchor_helpers() {
        let (p, e) = (Uuid::now_v7(), Uuid::now_v7());
        let l = link(p, e);

        assert_eq!(Anchor::Project(p).id(), p);
        assert!(Anchor::Project(p).owns(&l));
        assert!(!Anchor::Project(e).owns(&l));
        assert_eq!(Anchor::Engineer(e).counterpart(&l), p);
        assert_eq!(
            Anchor::Engineer(e).link_to(p),
            NewAssignment {
                project_id: p,
                engineer_id: e,
            }
        );
    }
}
