//! Tests for lazy enumeration of pattern variants

#[cfg(test)]
mod tests {
    use partcompose::ComposeError;
    use partcompose::model::{Anchor, PartData};
    use partcompose::pattern::Pattern;
    use partcompose::resolve::{Selection, Variants, resolve, variants};
    use std::collections::HashSet;
    use std::sync::Arc;

    fn leaf(name: &str) -> Arc<Pattern> {
        Pattern::leaf(PartData::new(name, 2, 2))
    }

    fn choices(options: &[&[&str]]) -> Pattern {
        let mut pattern = Pattern::new(PartData::new("base.svg", 8, 8));
        for (i, names) in options.iter().enumerate() {
            let anchor = Anchor::new(0.0, f64::from(u8::try_from(i).unwrap_or(0)) / 8.0, 0);
            let result = pattern.add_choice(
                &[anchor],
                names.iter().map(|name| vec![leaf(name)]).collect(),
            );
            assert!(result.is_ok());
        }
        pattern
    }

    fn leaves(part: &PartData) -> Vec<String> {
        part.subparts()
            .iter()
            .map(|child| child.part.image_path().to_string())
            .collect()
    }

    // The first choice point is the least significant digit
    #[test]
    fn test_digit_order() {
        let pattern = choices(&[&["a0", "a1"], &["b0", "b1", "b2"]]);
        let Ok(all) = variants(&pattern) else {
            unreachable!("small patterns cannot overflow");
        };
        assert_eq!(all.total(), 6);

        let order: Vec<Vec<String>> = all
            .map(|variant| variant.map(|variant| leaves(&variant.part)))
            .collect::<Result<_, _>>()
            .unwrap_or_default();
        let expected: Vec<Vec<String>> = [
            ["a0", "b0"],
            ["a1", "b0"],
            ["a0", "b1"],
            ["a1", "b1"],
            ["a0", "b2"],
            ["a1", "b2"],
        ]
        .iter()
        .map(|pair| pair.iter().map(ToString::to_string).collect())
        .collect();
        assert_eq!(order, expected);
    }

    // Every index maps to a distinct selection and each resolves to what it says
    #[test]
    fn test_enumeration_is_complete_and_distinct() {
        let inner = Arc::new(choices(&[&["x", "y", "z"]]));
        let mut pattern = choices(&[&["a0", "a1"]]);
        let added = pattern.add_choice(
            &[Anchor::CENTER, Anchor::new(1.0, 1.0, 1)],
            vec![vec![Arc::clone(&inner), inner], vec![leaf("plain"), leaf("plain")]],
        );
        assert!(added.is_ok());

        let Ok(mut all) = Variants::new(&pattern) else {
            unreachable!("small patterns cannot overflow");
        };
        // 2 * (3 * 3 + 1)
        assert_eq!(all.total(), 20);
        assert_eq!(all.size_hint(), (20, Some(20)));

        let mut selections = HashSet::new();
        for variant in all.by_ref() {
            let Ok(variant) = variant else {
                unreachable!("every index is in range");
            };
            assert!(resolve(&pattern, &variant.selection).is_ok_and(|part| part == variant.part));
            assert!(selections.insert(variant.selection));
        }
        assert_eq!(selections.len(), 20);
        assert_eq!(all.remaining(), 0);
        assert!(all.next().is_none());
    }

    // Options are laid out one after another within their choice point
    #[test]
    fn test_nested_digits() {
        let inner = Arc::new(choices(&[&["x", "y"]]));
        let mut pattern = Pattern::new(PartData::group(4, 4));
        let added = pattern.add_choice(
            &[Anchor::ORIGIN],
            vec![vec![leaf("first")], vec![inner], vec![leaf("last")]],
        );
        assert!(added.is_ok());

        let Ok(mut all) = variants(&pattern) else {
            unreachable!("small patterns cannot overflow");
        };
        assert_eq!(all.total(), 4);
        let inner_pick = |option| Selection::new().with_pick(option, vec![Selection::new()]);
        let expected = [
            inner_pick(0),
            Selection::new().with_pick(1, vec![inner_pick(0)]),
            Selection::new().with_pick(1, vec![inner_pick(1)]),
            inner_pick(2),
        ];
        for (index, selection) in (0u64..).zip(&expected) {
            assert!(
                all.selection_at(index)
                    .is_ok_and(|found| &found == selection)
            );
        }
    }

    // Random access agrees with iteration, and the iterator can be rewound
    #[test]
    fn test_random_access_and_restart() {
        let pattern = choices(&[&["a", "b"], &["c", "d"], &["e", "f"]]);
        let Ok(mut all) = variants(&pattern) else {
            unreachable!("small patterns cannot overflow");
        };

        let Some(Ok(fifth)) = all.nth(5) else {
            unreachable!("index 5 is in range");
        };
        assert_eq!(fifth.index, 5);
        assert_eq!(all.position(), 6);
        assert!(all.get(5).is_ok_and(|again| again == fifth));

        all.restart();
        assert_eq!(all.position(), 0);
        assert_eq!(all.count(), 8);
    }

    // Indices past the end are rejected
    #[test]
    fn test_index_out_of_range() {
        let pattern = choices(&[&["a", "b"]]);
        let Ok(mut all) = variants(&pattern) else {
            unreachable!("small patterns cannot overflow");
        };

        assert!(matches!(
            all.get(2),
            Err(ComposeError::InvalidParameter {
                parameter: "index",
                ..
            })
        ));
        assert!(all.nth(10).is_none());
    }

    // A pattern with no choice points has exactly one variant
    #[test]
    fn test_leaf_has_single_variant() {
        let pattern = Pattern::new(PartData::new("solo.svg", 1, 1));
        let Ok(all) = variants(&pattern) else {
            unreachable!("leaves cannot overflow");
        };

        let found: Vec<_> = all.collect();
        assert_eq!(found.len(), 1);
        assert!(matches!(
            found.first(),
            Some(Ok(variant)) if variant.selection == Selection::new()
        ));
    }

    // Enumeration does not resolve anything up front
    #[test]
    fn test_enumeration_is_lazy() {
        let mut layer = Arc::new(choices(&[&["a", "b"], &["c", "d"]]));
        for _ in 0..4 {
            let mut next = Pattern::new(PartData::group(2, 2));
            let added = next.add_choice(
                &[Anchor::ORIGIN, Anchor::CENTER],
                vec![vec![Arc::clone(&layer), Arc::clone(&layer)]],
            );
            assert!(added.is_ok());
            layer = Arc::new(next);
        }

        let Ok(mut all) = variants(&layer) else {
            unreachable!("2^32 fits in u64");
        };
        assert_eq!(all.total(), 1u64 << 32);
        assert!(all.next().is_some_and(|first| first.is_ok()));
        assert_eq!(all.position(), 1);
    }
}
