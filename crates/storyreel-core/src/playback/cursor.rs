use crate::story::StoryDeck;

/// Position of the displayed item: `(collection, item)`
///
/// Only constructed through [`Cursor::clamped`] or the step methods, so it
/// always points at a real item of the deck it was built against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Cursor {
    pub collection: usize,
    pub item: usize,
}

/// Result of stepping the cursor forward
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    /// Cursor moved to a new position
    Moved(Cursor),
    /// Already at a boundary; the cursor did not change
    Boundary,
}

impl Cursor {
    pub fn new(collection: usize, item: usize) -> Self {
        Self { collection, item }
    }

    /// Build a cursor from caller-supplied indices, clamping out-of-range
    /// values to the last valid collection/item
    pub fn clamped(deck: &StoryDeck, collection: usize, item: usize) -> Self {
        let collection = collection.min(deck.len().saturating_sub(1));
        let last_item = deck
            .collection(collection)
            .map(|c| c.last_index())
            .unwrap_or(0);
        Self {
            collection,
            item: item.min(last_item),
        }
    }

    pub fn is_last_in_collection(&self, deck: &StoryDeck) -> bool {
        deck.collection(self.collection)
            .map_or(true, |c| self.item >= c.last_index())
    }

    pub fn is_last_collection(&self, deck: &StoryDeck) -> bool {
        self.collection + 1 >= deck.len()
    }

    pub fn is_first(&self) -> bool {
        self.collection == 0 && self.item == 0
    }

    /// Next position, crossing into the following collection when needed
    pub fn next(&self, deck: &StoryDeck) -> Step {
        if !self.is_last_in_collection(deck) {
            Step::Moved(Self::new(self.collection, self.item + 1))
        } else if !self.is_last_collection(deck) {
            Step::Moved(Self::new(self.collection + 1, 0))
        } else {
            Step::Boundary
        }
    }

    /// Previous position, landing on the last item of the previous collection
    pub fn previous(&self, deck: &StoryDeck) -> Step {
        if self.item > 0 {
            Step::Moved(Self::new(self.collection, self.item - 1))
        } else if self.collection > 0 {
            let prev = self.collection - 1;
            let last = deck.collection(prev).map(|c| c.last_index()).unwrap_or(0);
            Step::Moved(Self::new(prev, last))
        } else {
            Step::Boundary
        }
    }
}
