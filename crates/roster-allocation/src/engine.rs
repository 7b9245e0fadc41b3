//! Seat allocation pass.
//!
//! [`allocate`] turns a rule array, the active signups, and the previous
//! assignment into a new assignment and waitlist. It has no I/O, no
//! randomness, and no clock dependency: identical inputs always yield
//! identical outputs.
//!
//! Placement order:
//! 1. every previous occupant that is still active keeps its seat (and its
//!    lock flag), even if the seat's rule no longer admits it;
//! 2. the remaining signups are placed in arrival order, each into the
//!    first empty seat whose rule accepts it;
//! 3. failing that, into the first unlocked occupied seat whose rule accepts
//!    it and whose occupant can move to a currently empty seat that accepts
//!    the occupant (one hop only, no displacement chains);
//! 4. otherwise onto the waitlist.

use std::collections::{HashMap, HashSet};

use tracing::debug;

use roster_core::types::{
    Allocation, AssignmentEntry, SeatRule, Signup, SignupAttributes, SignupId,
};

/// Run one allocation pass.
///
/// The capacity is `rules.len()`. Entries of `previous` beyond that are
/// ignored and missing ones count as empty. `signups` need not be sorted;
/// they are ordered by arrival key here.
pub fn allocate(
    rules: &[SeatRule],
    signups: &[Signup],
    previous: &[AssignmentEntry],
) -> Allocation {
    let capacity = rules.len();
    let active: HashMap<SignupId, &SignupAttributes> =
        signups.iter().map(|s| (s.id, &s.attributes)).collect();

    let mut assignment = vec![AssignmentEntry::empty(); capacity];
    let mut carried: HashSet<SignupId> = HashSet::new();

    for (seat, entry) in previous.iter().take(capacity).enumerate() {
        let Some(id) = entry.signup_id else {
            continue;
        };
        if !active.contains_key(&id) {
            debug!(seat, signup_id = %id, "Clearing seat of inactive signup");
            continue;
        }
        if carried.insert(id) {
            assignment[seat] = *entry;
        }
    }

    let mut arrivals: Vec<&Signup> = signups
        .iter()
        .filter(|s| !carried.contains(&s.id))
        .collect();
    arrivals.sort_by_key(|s| (s.arrival, s.id));

    let mut waitlist = Vec::new();
    let mut placed: HashSet<SignupId> = HashSet::new();

    for signup in arrivals {
        if !placed.insert(signup.id) {
            continue;
        }

        if let Some(seat) = first_open_seat(&assignment, rules, &signup.attributes) {
            debug!(seat, signup_id = %signup.id, "Placed in empty seat");
            assignment[seat] = AssignmentEntry::occupied(signup.id, false);
            continue;
        }

        if let Some((seat, relocate_to)) =
            find_swap(&assignment, rules, &active, &signup.attributes)
        {
            let occupant = assignment[seat].signup_id;
            debug!(
                seat,
                relocate_to,
                signup_id = %signup.id,
                occupant = ?occupant,
                "Placed by relocating occupant"
            );
            assignment[relocate_to] = AssignmentEntry {
                signup_id: occupant,
                locked: false,
            };
            assignment[seat] = AssignmentEntry::occupied(signup.id, false);
            continue;
        }

        debug!(
            signup_id = %signup.id,
            position = waitlist.len(),
            "No eligible seat, waitlisted"
        );
        waitlist.push(signup.id);
    }

    Allocation::from_parts(assignment, waitlist)
}

/// First empty seat, ascending, whose rule accepts `attributes`.
fn first_open_seat(
    assignment: &[AssignmentEntry],
    rules: &[SeatRule],
    attributes: &SignupAttributes,
) -> Option<usize> {
    assignment
        .iter()
        .zip(rules)
        .position(|(entry, rule)| entry.is_empty() && rule.accepts(attributes))
}

/// First unlocked occupied seat that accepts `attributes` and whose occupant
/// fits an empty seat. Returns `(seat, empty seat for the occupant)`.
fn find_swap(
    assignment: &[AssignmentEntry],
    rules: &[SeatRule],
    active: &HashMap<SignupId, &SignupAttributes>,
    attributes: &SignupAttributes,
) -> Option<(usize, usize)> {
    assignment
        .iter()
        .zip(rules)
        .enumerate()
        .filter(|(_, (entry, rule))| !entry.locked && rule.accepts(attributes))
        .find_map(|(seat, (entry, _))| {
            let occupant = entry.signup_id?;
            let occupant_attributes = active.get(&occupant)?;
            first_open_seat(assignment, rules, occupant_attributes).map(|empty| (seat, empty))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use roster_core::types::{ArrivalKey, SignupStatus};

    fn signup(id: i64, attributes: SignupAttributes) -> Signup {
        Signup {
            id: SignupId(id),
            attributes,
            arrival: ArrivalKey {
                created_at: Utc.timestamp_opt(1_700_000_000 + id, 0).unwrap(),
                sequence: id,
            },
            display_name: None,
        }
    }

    fn member(id: i64, class: &str) -> Signup {
        signup(id, SignupAttributes::member(class))
    }

    fn sponsor(id: i64) -> Signup {
        signup(id, SignupAttributes::sponsor("any"))
    }

    fn seat(id: i64) -> AssignmentEntry {
        AssignmentEntry::occupied(SignupId(id), false)
    }

    fn scenario_rules() -> Vec<SeatRule> {
        vec![
            SeatRule::classes(["tank"]),
            SeatRule::classes(["healer"]),
            SeatRule::sponsor(),
        ]
    }

    #[test]
    fn test_first_arrivals_fill_matching_seats() {
        let signups = vec![member(1, "tank"), member(2, "healer"), member(3, "dps")];
        let result = allocate(&scenario_rules(), &signups, &[]);

        assert_eq!(result.assignment, vec![seat(1), seat(2), AssignmentEntry::empty()]);
        assert_eq!(result.waitlist, vec![SignupId(3)]);
        assert_eq!(
            result.status_of(SignupId(3)),
            SignupStatus::Waitlisted { position: 0 }
        );
    }

    #[test]
    fn test_sponsor_takes_sponsor_seat() {
        let rules = scenario_rules();
        let mut signups = vec![member(1, "tank"), member(2, "healer"), member(3, "dps")];
        let first = allocate(&rules, &signups, &[]);

        signups.push(sponsor(4));
        let second = allocate(&rules, &signups, &first.assignment);

        assert_eq!(second.assignment[2], seat(4));
        assert_eq!(second.waitlist, vec![SignupId(3)]);
    }

    #[test]
    fn test_occupant_relocated_for_new_signup() {
        let rules = vec![
            SeatRule::classes(["tank", "healer"]),
            SeatRule::classes(["healer"]),
        ];
        let signups = vec![member(1, "healer"), member(2, "tank")];
        let previous = vec![seat(1), AssignmentEntry::empty()];

        let result = allocate(&rules, &signups, &previous);

        assert_eq!(result.assignment, vec![seat(2), seat(1)]);
        assert!(result.waitlist.is_empty());
    }

    #[test]
    fn test_locked_occupant_is_not_relocated() {
        let rules = vec![
            SeatRule::classes(["tank", "healer"]),
            SeatRule::classes(["healer"]),
        ];
        let signups = vec![member(1, "healer"), member(2, "tank")];
        let previous = vec![
            AssignmentEntry::occupied(SignupId(1), true),
            AssignmentEntry::empty(),
        ];

        let result = allocate(&rules, &signups, &previous);

        assert_eq!(result.assignment[0], AssignmentEntry::occupied(SignupId(1), true));
        assert!(result.assignment[1].is_empty());
        assert_eq!(result.waitlist, vec![SignupId(2)]);
    }

    #[test]
    fn test_two_hop_chain_is_not_attempted() {
        // Seating 3 would need 1 -> seat 1 and 2 -> seat 2 at once.
        let rules = vec![
            SeatRule::classes(["tank", "healer"]),
            SeatRule::classes(["healer", "dps"]),
            SeatRule::classes(["dps"]),
        ];
        let signups = vec![member(1, "healer"), member(2, "dps"), member(3, "tank")];
        let previous = vec![seat(1), seat(2), AssignmentEntry::empty()];

        let result = allocate(&rules, &signups, &previous);

        assert_eq!(result.assignment[0], seat(1));
        assert_eq!(result.assignment[1], seat(2));
        assert!(result.assignment[2].is_empty());
        assert_eq!(result.waitlist, vec![SignupId(3)]);
    }

    #[test]
    fn test_rule_drift_does_not_evict() {
        let rules = vec![SeatRule::classes(["healer"]), SeatRule::classes(["tank"])];
        let signups = vec![member(1, "tank")];
        let previous = vec![seat(1), AssignmentEntry::empty()];

        let result = allocate(&rules, &signups, &previous);

        assert_eq!(result.assignment[0], seat(1));
        assert!(result.assignment[1].is_empty());
    }

    #[test]
    fn test_inactive_occupants_are_cleared() {
        let rules = scenario_rules();
        let previous = vec![
            AssignmentEntry::occupied(SignupId(1), true),
            seat(2),
            AssignmentEntry::empty(),
        ];
        let signups = vec![member(2, "healer"), member(5, "tank")];

        let result = allocate(&rules, &signups, &previous);

        assert_eq!(result.assignment[0], seat(5));
        assert_eq!(result.assignment[1], seat(2));
        assert!(!result.statuses.contains_key(&SignupId(1)));
    }

    #[test]
    fn test_waitlist_follows_arrival_order() {
        let rules = vec![SeatRule::classes(["tank"])];
        let signups = vec![
            member(9, "dps"),
            member(4, "dps"),
            member(1, "tank"),
            member(6, "dps"),
        ];

        let result = allocate(&rules, &signups, &[]);

        assert_eq!(result.assignment, vec![seat(1)]);
        assert_eq!(result.waitlist, vec![SignupId(4), SignupId(6), SignupId(9)]);
    }

    #[test]
    fn test_rerun_is_idempotent() {
        let rules = vec![
            SeatRule::classes(["tank", "healer"]),
            SeatRule::classes(["healer"]),
            SeatRule::sponsor(),
            SeatRule::reject_all(),
        ];
        let signups = vec![
            member(1, "healer"),
            member(2, "tank"),
            sponsor(3),
            member(4, "healer"),
            member(5, "dps"),
        ];

        let first = allocate(&rules, &signups, &[]);
        let second = allocate(&rules, &signups, &first.assignment);
        assert_eq!(first, second);
    }

    #[test]
    fn test_every_active_signup_appears_once() {
        let rules = vec![
            SeatRule::classes(["tank"]),
            SeatRule::classes(["tank", "dps"]),
            SeatRule::sponsor().with_sponsor(),
        ];
        let signups: Vec<Signup> = (1..=8)
            .map(|i| match i % 3 {
                0 => sponsor(i),
                1 => member(i, "tank"),
                _ => member(i, "dps"),
            })
            .collect();
        let previous = vec![seat(7), seat(7), seat(42)];

        let result = allocate(&rules, &signups, &previous);

        assert_eq!(result.assignment.len(), rules.len());
        let mut seen: Vec<SignupId> = result
            .assignment
            .iter()
            .filter_map(|e| e.signup_id)
            .chain(result.waitlist.iter().copied())
            .collect();
        seen.sort();
        let mut expected: Vec<SignupId> = signups.iter().map(|s| s.id).collect();
        expected.sort();
        assert_eq!(seen, expected);
    }

    #[test]
    fn test_previous_longer_than_capacity_is_ignored() {
        let rules = vec![SeatRule::classes(["tank"])];
        let signups = vec![member(1, "tank"), member(2, "tank")];
        let previous = vec![AssignmentEntry::empty(), seat(2)];

        let result = allocate(&rules, &signups, &previous);

        assert_eq!(result.assignment, vec![seat(1)]);
        assert_eq!(result.waitlist, vec![SignupId(2)]);
    }
}
