//! Tests for resolving patterns into concrete part trees

#[cfg(test)]
mod tests {
    use partcompose::ComposeError;
    use partcompose::model::{Anchor, PartData};
    use partcompose::pattern::Pattern;
    use partcompose::resolve::{Selection, resolve};
    use std::sync::Arc;

    fn leaf(name: &str) -> Arc<Pattern> {
        Pattern::leaf(PartData::new(name, 2, 2))
    }

    fn images(part: &PartData) -> Vec<&str> {
        part.subparts()
            .iter()
            .map(|child| child.part.image_path())
            .collect()
    }

    fn two_choices() -> Pattern {
        let Ok(pattern) = Pattern::new(PartData::new("body.svg", 10, 10))
            .with_choice(
                &[Anchor::new(0.25, 0.25, 0), Anchor::new(0.75, 0.25, 0)],
                vec![
                    vec![leaf("a.svg"), leaf("b.svg")],
                    vec![leaf("c.svg"), leaf("d.svg")],
                ],
            )
            .and_then(|pattern| {
                pattern.with_choice(
                    &[Anchor::new(0.5, 0.9, -1)],
                    vec![vec![leaf("e.svg")], vec![leaf("f.svg")], vec![leaf("g.svg")]],
                )
            })
        else {
            unreachable!("arity matches");
        };
        pattern
    }

    // Children are attached choice by choice, anchor by anchor
    #[test]
    fn test_resolve_attaches_in_registration_order() {
        let pattern = two_choices();
        let Ok(part) = resolve(&pattern, &Selection::from_options(&[1, 2])) else {
            unreachable!("selection is in range");
        };

        assert_eq!(part.image_path(), "body.svg");
        assert_eq!(images(&part), ["c.svg", "d.svg", "g.svg"]);
        let anchors: Vec<Anchor> = part.subparts().iter().map(|child| child.anchor).collect();
        assert_eq!(
            anchors,
            [
                Anchor::new(0.25, 0.25, 0),
                Anchor::new(0.75, 0.25, 0),
                Anchor::new(0.5, 0.9, -1)
            ]
        );
    }

    // One choice point between two arms: each pick attaches that arm alone
    #[test]
    fn test_single_choice_between_arms() {
        let Ok(pattern) = Pattern::new(PartData::new("base.svg", 10, 10)).with_choice(
            &[Anchor::ORIGIN],
            vec![vec![leaf("arm-a.svg")], vec![leaf("arm-b.svg")]],
        ) else {
            unreachable!("arity matches");
        };

        for (option, expected) in [(0, "arm-a.svg"), (1, "arm-b.svg")] {
            let Ok(part) = resolve(&pattern, &Selection::from_options(&[option])) else {
                unreachable!("selection is in range");
            };
            assert_eq!(images(&part), [expected]);
            assert_eq!(part.subparts()[0].anchor, Anchor::ORIGIN);
        }
    }

    // Missing picks take the first option, surplus picks are ignored
    #[test]
    fn test_missing_and_surplus_picks() {
        let pattern = two_choices();

        let Ok(defaulted) = resolve(&pattern, &Selection::new()) else {
            unreachable!("empty selections always resolve");
        };
        assert_eq!(images(&defaulted), ["a.svg", "b.svg", "e.svg"]);

        let Ok(surplus) = resolve(&pattern, &Selection::from_options(&[0, 1, 5, 9])) else {
            unreachable!("surplus picks are ignored");
        };
        assert_eq!(images(&surplus), ["a.svg", "b.svg", "f.svg"]);
    }

    // Out of range picks fail without producing a tree
    #[test]
    fn test_out_of_range_pick() {
        let result = resolve(&two_choices(), &Selection::from_options(&[0, 3]));

        assert!(matches!(
            result,
            Err(ComposeError::SelectionOutOfRange {
                choice: 1,
                option: 3,
                available: 3,
            })
        ));
    }

    // Nested picks reach sub-patterns, and bad nested picks fail the whole call
    #[test]
    fn test_nested_selection() {
        let Ok(inner) = Pattern::new(PartData::group(4, 4)).with_choice(
            &[Anchor::CENTER],
            vec![vec![leaf("x.svg")], vec![leaf("y.svg")]],
        ) else {
            unreachable!("arity matches");
        };
        let inner = Arc::new(inner);
        let Ok(outer) = Pattern::new(PartData::new("outer.svg", 8, 8)).with_choice(
            &[Anchor::ORIGIN, Anchor::new(0.5, 0.0, 0)],
            vec![vec![Arc::clone(&inner), inner]],
        ) else {
            unreachable!("arity matches");
        };

        let selection = Selection::new().with_pick(
            0,
            vec![Selection::new(), Selection::from_options(&[1])],
        );
        let Ok(part) = resolve(&outer, &selection) else {
            unreachable!("selection is in range");
        };
        let leaves: Vec<Vec<&str>> = part
            .subparts()
            .iter()
            .map(|child| images(&child.part))
            .collect();
        assert_eq!(leaves, [vec!["x.svg"], vec!["y.svg"]]);

        let bad = Selection::new().with_pick(0, vec![Selection::from_options(&[2])]);
        assert!(matches!(
            resolve(&outer, &bad),
            Err(ComposeError::SelectionOutOfRange { option: 2, .. })
        ));
    }

    // The base part's own children survive, and the base is never modified
    #[test]
    fn test_base_is_shared_not_mutated() {
        let base = PartData::new("torso.svg", 10, 10)
            .with_subpart(Anchor::new(0.5, 0.0, 0), Arc::new(PartData::new("neck.svg", 2, 2)));
        let Ok(pattern) = Pattern::new(base)
            .with_choice(&[Anchor::new(0.5, 1.0, 0)], vec![vec![leaf("legs.svg")]])
        else {
            unreachable!("arity matches");
        };

        let Ok(first) = resolve(&pattern, &Selection::new()) else {
            unreachable!("empty selections always resolve");
        };
        let Ok(second) = resolve(&pattern, &Selection::new()) else {
            unreachable!("empty selections always resolve");
        };

        assert_eq!(images(&first), ["neck.svg", "legs.svg"]);
        assert_eq!(pattern.base().subparts().len(), 1);
        assert!(Arc::ptr_eq(&first.subparts()[0].part, &second.subparts()[0].part));
        assert!(Arc::ptr_eq(
            &first.subparts()[0].part,
            &pattern.base().subparts()[0].part
        ));
    }

    // Resolving from many threads at once is safe and deterministic
    #[test]
    fn test_concurrent_resolution() {
        let pattern = two_choices();
        let selection = Selection::from_options(&[1, 1]);
        let Ok(expected) = resolve(&pattern, &selection) else {
            unreachable!("selection is in range");
        };

        let (pattern, selection) = (&pattern, &selection);
        std::thread::scope(|scope| {
            let handles: Vec<_> = (0..4)
                .map(|_| scope.spawn(move || resolve(pattern, selection)))
                .collect();
            for handle in handles {
                assert!(
                    handle
                        .join()
                        .is_ok_and(|result| result.is_ok_and(|part| part == expected))
                );
            }
        });
    }
}
