use std::ops::{Index, IndexMut};

/// One of the two selection roles.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Slot {
    Origin,
    Destination,
}

impl Slot {
    pub const ALL: [Slot; 2] = [Slot::Origin, Slot::Destination];

    /// Id of the search box element (fixed page contract).
    pub fn search_box_id(self) -> &'static str {
        match self {
            Slot::Origin => "search-box-origin",
            Slot::Destination => "search-box-dest",
        }
    }

    /// Id of the suggestion panel element (fixed page contract).
    pub fn suggestions_id(self) -> &'static str {
        match self {
            Slot::Origin => "suggestions-origin",
            Slot::Destination => "suggestions-dest",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Slot::Origin => "Origin",
            Slot::Destination => "Destination",
        }
    }
}

/// A value per slot.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct Slots<T> {
    pub origin: T,
    pub destination: T,
}

impl<T> Slots<T> {
    pub fn both(&self) -> (&T, &T) {
        (&self.origin, &self.destination)
    }
}

impl<T> Index<Slot> for Slots<T> {
    type Output = T;

    fn index(&self, slot: Slot) -> &T {
        match slot {
            Slot::Origin => &self.origin,
            Slot::Destination => &self.destination,
        }
    }
}

impl<T> IndexMut<Slot> for Slots<T> {
    fn index_mut(&mut self, slot: Slot) -> &mut T {
        match slot {
            Slot::Origin => &mut self.origin,
            Slot::Destination => &mut self.destination,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_element_ids() {
        assert_eq!(Slot::Origin.search_box_id(), "search-box-origin");
        assert_eq!(Slot::Origin.suggestions_id(), "suggestions-origin");
        assert_eq!(Slot::Destination.search_box_id(), "search-box-dest");
        assert_eq!(Slot::Destination.suggestions_id(), "suggestions-dest");
    }

    #[test]
    fn test_index_by_slot() {
        let mut slots = Slots {
            origin: 1,
            destination: 2,
        };
        slots[Slot::Destination] += 10;
        assert_eq!(slots[Slot::Origin], 1);
        assert_eq!(slots[Slot::Destination], 12);
        assert_eq!(slots.both(), (&1, &12));
    }
}
