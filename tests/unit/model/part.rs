//! Tests for part construction, shallow cloning and tree helpers

#[cfg(test)]
mod tests {
    use partcompose::model::{Anchor, PartData};
    use std::sync::Arc;

    fn arm(name: &str) -> Arc<PartData> {
        Arc::new(PartData::new(name, 2, 6).with_socket(Anchor::new(0.5, 0.0, 0)))
    }

    fn body() -> PartData {
        PartData::new("body.svg", 10, 10)
            .with_subpart(Anchor::new(0.0, 0.5, -1), arm("arm-left.svg"))
            .with_subpart(Anchor::new(1.0, 0.5, 1), arm("arm-right.svg"))
    }

    // Construction keeps size and starts unflipped at the origin socket
    #[test]
    fn test_new_part_defaults() {
        let part = PartData::new("wheel.svg", 4, 3);
        assert_eq!(part.image_path(), "wheel.svg");
        assert_eq!(part.width(), 4);
        assert_eq!(part.height(), 3);
        assert_eq!(part.socket(), Anchor::ORIGIN);
        assert!(part.subparts().is_empty());
        assert!(!part.flip_x());
        assert!(!part.flip_y());
        assert!(part.is_drawable());
    }

    // Grouping nodes have no image
    #[test]
    fn test_group_is_not_drawable() {
        let group = PartData::group(20, 20);
        assert!(!group.is_drawable());
        assert_eq!(group.image_path(), "");
    }

    // Clones share every child with the original
    #[test]
    fn test_clone_shares_children() {
        let original = body();
        let copy = original.clone();

        assert_eq!(copy.subparts().len(), original.subparts().len());
        for (copied, source) in copy.subparts().iter().zip(original.subparts()) {
            assert!(Arc::ptr_eq(&copied.part, &source.part));
            assert_eq!(copied.anchor, source.anchor);
        }
    }

    // Clones own their child list: growing one leaves the other alone
    #[test]
    fn test_clone_has_independent_child_list() {
        let original = body();
        let mut copy = original.clone();
        copy.add_subpart(Anchor::CENTER, arm("tail.svg"));

        assert_eq!(original.subparts().len(), 2);
        assert_eq!(copy.subparts().len(), 3);
    }

    // One part attached at several anchors stays a single shared part
    #[test]
    fn test_add_subpart_allows_repeated_attachment() {
        let wheel = Arc::new(PartData::new("wheel.svg", 3, 3));
        let mut cart = PartData::new("cart.svg", 20, 8);
        for x in [0.1, 0.3, 0.7, 0.9] {
            cart.add_subpart(Anchor::new(x, 1.0, 1), Arc::clone(&wheel));
        }

        assert_eq!(cart.subparts().len(), 4);
        assert_eq!(Arc::strong_count(&wheel), 5);
        assert!(
            cart.subparts()
                .iter()
                .all(|child| Arc::ptr_eq(&child.part, &wheel))
        );
    }

    // Deep clones are equal but share nothing
    #[test]
    fn test_deep_clone_copies_descendants() {
        let original = body();
        let copy = original.deep_clone();

        assert_eq!(copy, original);
        for (copied, source) in copy.subparts().iter().zip(original.subparts()) {
            assert!(!Arc::ptr_eq(&copied.part, &source.part));
        }
    }

    // Node count and depth include the root
    #[test]
    fn test_node_count_and_depth() {
        let hand = Arc::new(PartData::new("hand.svg", 2, 2));
        let forearm = Arc::new(
            PartData::new("forearm.svg", 2, 5).with_subpart(Anchor::new(0.5, 1.0, 0), hand),
        );
        let torso = PartData::new("torso.svg", 8, 12)
            .with_subpart(Anchor::new(0.0, 0.2, 0), Arc::clone(&forearm))
            .with_subpart(Anchor::new(1.0, 0.2, 0), forearm);

        assert_eq!(torso.node_count(), 5);
        assert_eq!(torso.depth(), 3);
        assert_eq!(PartData::new("leaf.svg", 1, 1).depth(), 1);
    }

    // Socket and anchor fractions scale with the part and floor to pixels
    #[test]
    fn test_origin_and_anchor_positions() {
        let part = PartData::new("arm.svg", 5, 8).with_socket(Anchor::new(0.5, 0.25, 0));

        assert_eq!(part.origin_at([0, 0], 1), [-2, -2]);
        assert_eq!(part.origin_at([10, 10], 3), [4, 4]);

        let elbow = Anchor::new(1.0, 0.5, 0);
        assert_eq!(part.anchor_at([4, 4], &elbow, 3), [19, 16]);

        // The socket maps back onto the attach point
        let origin = part.origin_at([7, -3], 2);
        assert_eq!(part.anchor_at(origin, &part.socket(), 2), [7, -3]);
    }
}
