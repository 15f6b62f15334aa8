//! Tests for choice points and the options they register

#[cfg(test)]
mod tests {
    use partcompose::model::{Anchor, PartData};
    use partcompose::pattern::Pattern;
    use std::sync::Arc;

    fn leaf(name: &str) -> Arc<Pattern> {
        Pattern::leaf(PartData::new(name, 4, 4))
    }

    fn eyes_pattern() -> Pattern {
        let anchors = [Anchor::new(0.25, 0.4, 1), Anchor::new(0.75, 0.4, 1)];
        let mut face = Pattern::new(PartData::new("face.svg", 70, 80));
        let added = face.add_choice(
            &anchors,
            vec![
                vec![leaf("eye-left-angry.svg"), leaf("eye-right-angry.svg")],
                vec![leaf("eye-left-sad.svg"), leaf("eye-right-sad.svg")],
            ],
        );
        assert!(added.is_ok());
        face
    }

    // Each option pairs anchors and patterns by position
    #[test]
    fn test_options_pair_anchors_with_patterns() {
        let face = eyes_pattern();
        let Some(choice) = face.choices().first() else {
            unreachable!("one choice point was registered");
        };

        assert_eq!(choice.len(), 2);
        let Some(sad) = choice.option(1) else {
            unreachable!("two options were registered");
        };
        let images: Vec<&str> = sad
            .placements()
            .iter()
            .map(|placement| placement.pattern.base().image_path())
            .collect();
        assert_eq!(images, ["eye-left-sad.svg", "eye-right-sad.svg"]);

        let anchors: Vec<Anchor> = sad.placements().iter().map(|p| p.anchor).collect();
        assert_eq!(
            anchors,
            [Anchor::new(0.25, 0.4, 1), Anchor::new(0.75, 0.4, 1)]
        );
    }

    // Options outside the registered range are absent
    #[test]
    fn test_option_out_of_range_is_none() {
        let face = eyes_pattern();
        let Some(choice) = face.choices().first() else {
            unreachable!("one choice point was registered");
        };
        assert!(choice.option(2).is_none());
        assert!(!choice.is_empty());
    }

    // Options may place nothing, modelling an absent decoration
    #[test]
    fn test_empty_option() {
        let mut hat_slot = Pattern::new(PartData::new("head.svg", 10, 10));
        let added = hat_slot.add_choice(&[], vec![vec![], vec![]]);
        assert!(added.is_ok());

        let Some(choice) = hat_slot.choices().first() else {
            unreachable!("one choice point was registered");
        };
        assert_eq!(choice.len(), 2);
        assert!(choice.options().iter().all(|option| option.is_empty()));
    }

    // Sub-patterns are shared, not copied, into options
    #[test]
    fn test_options_share_sub_patterns() {
        let eye = leaf("eye.svg");
        let mut face = Pattern::new(PartData::new("face.svg", 10, 10));
        let added = face.add_choice(&[Anchor::CENTER], vec![vec![Arc::clone(&eye)]]);
        assert!(added.is_ok());

        let placed = face
            .choices()
            .first()
            .and_then(|choice| choice.option(0))
            .and_then(|option| option.placements().first());
        assert!(placed.is_some_and(|placement| Arc::ptr_eq(&placement.pattern, &eye)));
    }
}
