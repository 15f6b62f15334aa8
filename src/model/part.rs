use crate::model::{anchor::Anchor, flip::FlipAxis};
use std::sync::Arc;

/// A child attached to its parent at a local anchor
///
/// The entry itself belongs to exactly one parent's `subparts`, but the part
/// is a shared handle: clones of the parent, and other parents, may point at
/// the same child.
#[derive(Clone, Debug, PartialEq)]
pub struct AnchoredPart {
    /// Position on the parent where the child's socket is placed
    pub anchor: Anchor,
    /// The attached part
    pub part: Arc<PartData>,
}

/// A node in a composition tree
///
/// `Clone` is shallow: the copy gets its own `subparts` vector, but every
/// entry shares its child with the original. Use [`PartData::deep_clone`]
/// when an independent tree is required.
#[derive(Clone, Debug, PartialEq)]
pub struct PartData {
    image_path: String,
    width: u32,
    height: u32,
    socket: Anchor,
    subparts: Vec<AnchoredPart>,
    flip_x: bool,
    flip_y: bool,
}

impl PartData {
    /// Create an unflipped part with no children, attached at its top-left corner
    pub fn new(image_path: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            image_path: image_path.into(),
            width,
            height,
            socket: Anchor::ORIGIN,
            subparts: Vec::new(),
            flip_x: false,
            flip_y: false,
        }
    }

    /// Create a grouping node that is positioned but never drawn
    pub fn group(width: u32, height: u32) -> Self {
        Self::new(String::new(), width, height)
    }

    /// Replace the socket
    #[must_use]
    pub const fn with_socket(mut self, socket: Anchor) -> Self {
        self.socket = socket;
        self
    }

    /// Attach a child and return the part, for building trees inline
    #[must_use]
    pub fn with_subpart(mut self, anchor: Anchor, part: Arc<Self>) -> Self {
        self.add_subpart(anchor, part);
        self
    }

    /// Image to draw for this node; empty for grouping nodes
    pub fn image_path(&self) -> &str {
        &self.image_path
    }

    /// Whether this node has an image to draw
    pub fn is_drawable(&self) -> bool {
        !self.image_path.is_empty()
    }

    /// Width in part units
    pub const fn width(&self) -> u32 {
        self.width
    }

    /// Height in part units
    pub const fn height(&self) -> u32 {
        self.height
    }

    /// Anchor on this part at which its parent attaches it
    pub const fn socket(&self) -> Anchor {
        self.socket
    }

    /// Top-left corner when the socket sits at `attach`, in pixels at `scale`
    pub fn origin_at(&self, attach: [i64; 2], scale: u32) -> [i64; 2] {
        let factor = i64::from(scale);
        let [socket_x, socket_y] = self.socket.to_pixels(self.width, self.height);
        [attach[0] - socket_x * factor, attach[1] - socket_y * factor]
    }

    /// Pixel position of `anchor` when the top-left corner sits at `origin`
    pub fn anchor_at(&self, origin: [i64; 2], anchor: &Anchor, scale: u32) -> [i64; 2] {
        let factor = i64::from(scale);
        let [anchor_x, anchor_y] = anchor.to_pixels(self.width, self.height);
        [origin[0] + anchor_x * factor, origin[1] + anchor_y * factor]
    }

    /// Attached children in draw order
    pub fn subparts(&self) -> &[AnchoredPart] {
        &self.subparts
    }

    /// Whether the image is mirrored left to right
    pub const fn flip_x(&self) -> bool {
        self.flip_x
    }

    /// Whether the image is mirrored top to bottom
    pub const fn flip_y(&self) -> bool {
        self.flip_y
    }

    /// Attach `part` at `anchor`
    ///
    /// The same part may be attached any number of times.
    pub fn add_subpart(&mut self, anchor: Anchor, part: Arc<Self>) {
        self.subparts.push(AnchoredPart { anchor, part });
    }

    /// Mirrored copy for facing the opposite horizontal direction
    ///
    /// Only this part's socket and `flip_x` change. Children keep their
    /// anchors and flags.
    #[must_use]
    pub fn flip_horizontal(&self) -> Self {
        FlipAxis::Horizontal.apply(self)
    }

    /// Mirrored copy for facing the opposite vertical direction
    ///
    /// Only this part's socket and `flip_y` change. Children keep their
    /// anchors and flags.
    #[must_use]
    pub fn flip_vertical(&self) -> Self {
        FlipAxis::Vertical.apply(self)
    }

    /// Fully independent copy of the whole tree
    #[must_use]
    pub fn deep_clone(&self) -> Self {
        let subparts = self
            .subparts
            .iter()
            .map(|child| AnchoredPart {
                anchor: child.anchor,
                part: Arc::new(child.part.deep_clone()),
            })
            .collect();

        Self {
            subparts,
            ..self.without_subparts()
        }
    }

    /// Number of nodes in the tree rooted here
    pub fn node_count(&self) -> usize {
        1 + self
            .subparts
            .iter()
            .map(|child| child.part.node_count())
            .sum::<usize>()
    }

    /// Length of the longest root-to-leaf path, counting nodes
    pub fn depth(&self) -> usize {
        1 + self
            .subparts
            .iter()
            .map(|child| child.part.depth())
            .max()
            .unwrap_or(0)
    }

    pub(crate) const fn socket_mut(&mut self) -> &mut Anchor {
        &mut self.socket
    }

    pub(crate) const fn flip_flag_mut(&mut self, axis: FlipAxis) -> &mut bool {
        match axis {
            FlipAxis::Horizontal => &mut self.flip_x,
            FlipAxis::Vertical => &mut self.flip_y,
        }
    }

    fn without_subparts(&self) -> Self {
        Self {
            image_path: self.image_path.clone(),
            width: self.width,
            height: self.height,
            socket: self.socket,
            subparts: Vec::new(),
            flip_x: self.flip_x,
            flip_y: self.flip_y,
        }
    }
}
